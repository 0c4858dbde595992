use crate::brain::BrainLogic;
use crate::config::AppConfig;
use crate::genetics::GenotypeLogic;
use genesis_data::{Agent, DeathCause, Genotype, Identity, Physics, Record, Vitals};
use rand::Rng;
use std::collections::VecDeque;
use std::f64::consts::TAU;
use uuid::Uuid;

/// Random spawn point keeping the body clear of the walls.
pub fn random_position_with_rng<R: Rng>(size: f64, config: &AppConfig, rng: &mut R) -> (f64, f64) {
    let x = axis_position(config.world.width, size, rng);
    let y = axis_position(config.world.height, size, rng);
    (x, y)
}

fn axis_position<R: Rng>(extent: f64, size: f64, rng: &mut R) -> f64 {
    if extent > 2.0 * size {
        rng.gen_range(size..extent - size)
    } else {
        extent / 2.0
    }
}

/// A living agent carrying `genotype`, with fresh transient state.
pub fn spawn_with_genotype_with_rng<R: Rng>(
    genotype: Genotype,
    parent_ids: Option<(Uuid, Uuid)>,
    generation: u32,
    config: &AppConfig,
    rng: &mut R,
) -> Agent {
    let id = Uuid::from_u128(rng.gen::<u128>());
    let (x, y) = random_position_with_rng(genotype.traits.size, config, rng);
    let heading = rng.gen_range(0.0..TAU);
    Agent {
        identity: Identity {
            id,
            parent_ids,
            generation,
        },
        physics: Physics {
            x,
            y,
            heading,
            speed: genotype.traits.base_speed,
            trail: VecDeque::with_capacity(config.visual.trail_length),
        },
        vitals: Vitals {
            energy: config.metabolism.initial_energy,
            age: 0,
            reproduction_cooldown: 0,
            is_alive: true,
            death_cause: None,
        },
        record: Record::default(),
        genotype,
    }
}

/// A founder with a random genotype.
pub fn create_agent_with_rng<R: Rng>(config: &AppConfig, generation: u32, rng: &mut R) -> Agent {
    let genotype = Genotype::new_random_with_rng(config, rng);
    spawn_with_genotype_with_rng(genotype, None, generation, config, rng)
}

pub fn create_population_with_rng<R: Rng>(
    config: &AppConfig,
    generation: u32,
    rng: &mut R,
) -> Vec<Agent> {
    (0..config.world.population_size)
        .map(|_| create_agent_with_rng(config, generation, rng))
        .collect()
}

/// Elite carried into the next generation.
///
/// Weights are kept as-is with the hidden layer resized to `target_hidden`;
/// position, energy, age, cooldown and counters start over. The previous
/// fitness is kept until the next evaluation.
pub fn clone_for_next_generation_with_rng<R: Rng>(
    agent: &Agent,
    target_hidden: usize,
    generation: u32,
    config: &AppConfig,
    rng: &mut R,
) -> Agent {
    let genotype = Genotype {
        brain: agent.genotype.brain.resized_with_rng(target_hidden, rng),
        traits: agent.genotype.traits.clone(),
    };
    let parent = agent.id();
    let mut elite =
        spawn_with_genotype_with_rng(genotype, Some((parent, parent)), generation, config, rng);
    elite.record.fitness = agent.record.fitness;
    elite
}

/// Terminal condition for the current state, old age taking precedence.
#[must_use]
pub fn death_cause(agent: &Agent) -> Option<DeathCause> {
    if agent.vitals.age > agent.genotype.traits.lifespan {
        Some(DeathCause::OldAge)
    } else if agent.vitals.energy <= 0.0 {
        Some(DeathCause::Starvation)
    } else {
        None
    }
}

/// Transitions an agent to dead. Has no effect on an agent already dead.
pub fn mark_dead(agent: &mut Agent, cause: DeathCause) -> bool {
    if !agent.vitals.is_alive {
        return false;
    }
    agent.vitals.is_alive = false;
    agent.vitals.death_cause = Some(cause);
    agent.vitals.energy = agent.vitals.energy.max(0.0);
    true
}

/// Appends the current position to the trail, keeping at most `max_len`.
pub fn push_trail(physics: &mut Physics, max_len: usize) {
    if max_len == 0 {
        return;
    }
    physics.trail.push_back((physics.x, physics.y));
    while physics.trail.len() > max_len {
        physics.trail.pop_front();
    }
}
