//! Generation-end selection and breeding.

use crate::biome::BiomeGrid;
use crate::brain::{BrainLogic, MutationParams};
use crate::config::{AppConfig, BrainConfig};
use crate::fitness::calculate_fitness;
use crate::genetics::GenotypeLogic;
use crate::lifecycle;
use genesis_data::{Agent, Brain, Genotype};
use rand::seq::index::sample;
use rand::Rng;
use rayon::prelude::*;

/// The next population and how it was produced.
pub struct BreedOutcome {
    pub agents: Vec<Agent>,
    /// True when breeding was abandoned for a fresh random population.
    pub restarted: bool,
    pub elites: usize,
}

/// Scores every agent, dead or alive, and stores it in `record.fitness`.
pub fn evaluate_fitness(agents: &mut [Agent], grid: &BiomeGrid, config: &AppConfig) {
    agents.par_iter_mut().for_each(|agent| {
        agent.record.fitness = calculate_fitness(agent, grid, config);
    });
}

/// Hidden-layer target after generation `generation` ends.
///
/// Grows by `growth_step` every `growth_interval` generations, capped at
/// `max_hidden`. Never shrinks.
#[must_use]
pub fn next_hidden_target(current: usize, generation: u32, brain: &BrainConfig) -> usize {
    if brain.growth_interval > 0 && generation > 0 && generation % brain.growth_interval == 0 {
        (current + brain.growth_step).min(brain.max_hidden.max(current))
    } else {
        current
    }
}

/// Indices sorted by fitness, best first. Ties keep population order.
#[must_use]
pub fn rank_by_fitness(agents: &[Agent]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..agents.len()).collect();
    order.sort_by(|&a, &b| agents[b].record.fitness.total_cmp(&agents[a].record.fitness));
    order
}

/// A fresh random population whose brains start at `target_hidden` units.
pub fn fresh_population_with_rng<R: Rng>(
    config: &AppConfig,
    target_hidden: usize,
    generation: u32,
    rng: &mut R,
) -> Vec<Agent> {
    (0..config.world.population_size)
        .map(|_| {
            let mut genotype = Genotype::new_random_with_rng(config, rng);
            if genotype.brain.hidden_count != target_hidden {
                genotype.brain = Brain::new_random_with_rng(target_hidden, rng);
            }
            lifecycle::spawn_with_genotype_with_rng(genotype, None, generation, config, rng)
        })
        .collect()
}

/// Builds the next generation from evaluated `agents`.
///
/// Elites are cloned and resized to `target_hidden`. The rest are bred from
/// two distinct parents drawn uniformly from the fittest `parent_fraction`.
/// With fewer than two parents or a best fitness of zero the population is
/// replaced by random founders.
pub fn breed_next_generation_with_rng<R: Rng>(
    agents: &[Agent],
    target_hidden: usize,
    params: &MutationParams,
    config: &AppConfig,
    generation: u32,
    rng: &mut R,
) -> BreedOutcome {
    let pop_size = config.world.population_size;
    let ranked = rank_by_fitness(agents);
    let best = ranked.first().map_or(0.0, |&i| agents[i].record.fitness);

    let evo = &config.evolution;
    let elite_count = ((pop_size as f64 * f64::from(evo.elite_fraction)).floor() as usize)
        .min(ranked.len())
        .min(pop_size);
    let parent_count = ((pop_size as f64 * f64::from(evo.parent_fraction)).floor() as usize)
        .max(2)
        .min(ranked.len());

    if parent_count < 2 || best <= 0.0 {
        tracing::warn!(
            generation,
            best_fitness = best,
            "Not enough fit agents survived to reproduce; starting a fresh random population"
        );
        return BreedOutcome {
            agents: fresh_population_with_rng(config, target_hidden, generation, rng),
            restarted: true,
            elites: 0,
        };
    }

    let mut next = Vec::with_capacity(pop_size);
    for &i in ranked.iter().take(elite_count) {
        next.push(lifecycle::clone_for_next_generation_with_rng(
            &agents[i],
            target_hidden,
            generation,
            config,
            rng,
        ));
    }

    let pool = &ranked[..parent_count];
    while next.len() < pop_size {
        let picks = sample(rng, pool.len(), 2);
        let p1 = &agents[pool[picks.index(0)]];
        let p2 = &agents[pool[picks.index(1)]];
        let avg_fitness = (p1.record.fitness + p2.record.fitness) / 2.0;
        let genotype = p1.genotype.breed_with_rng(
            &p2.genotype,
            avg_fitness,
            params,
            config,
            target_hidden,
            rng,
        );
        next.push(lifecycle::spawn_with_genotype_with_rng(
            genotype,
            Some((p1.id(), p2.id())),
            generation,
            config,
            rng,
        ));
    }

    BreedOutcome {
        agents: next,
        restarted: false,
        elites: elite_count,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use genesis_data::BiomeKind;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn scored_population(config: &AppConfig, fitness: impl Fn(usize) -> f64) -> Vec<Agent> {
        let mut rng = ChaCha8Rng::seed_from_u64(21);
        let mut agents = lifecycle::create_population_with_rng(config, 1, &mut rng);
        for (i, a) in agents.iter_mut().enumerate() {
            a.record.fitness = fitness(i);
        }
        agents
    }

    #[test]
    fn test_growth_schedule() {
        let brain = BrainConfig::default();
        assert_eq!(next_hidden_target(8, 9, &brain), 8);
        assert_eq!(next_hidden_target(8, 10, &brain), 10);
        assert_eq!(next_hidden_target(31, 20, &brain), 32);
        assert_eq!(next_hidden_target(32, 30, &brain), 32);
    }

    #[test]
    fn test_rank_is_descending() {
        let config = AppConfig::default();
        let agents = scored_population(&config, |i| (i % 7) as f64);
        let ranked = rank_by_fitness(&agents);
        for w in ranked.windows(2) {
            assert!(agents[w[0]].record.fitness >= agents[w[1]].record.fitness);
        }
    }

    #[test]
    fn test_breeding_fills_population_with_elites_first() {
        let config = AppConfig::default();
        let agents = scored_population(&config, |i| 100.0 + i as f64);
        let mut rng = ChaCha8Rng::seed_from_u64(22);

        let params = MutationParams::default();
        let out = breed_next_generation_with_rng(&agents, 8, &params, &config, 2, &mut rng);

        assert!(!out.restarted);
        assert_eq!(out.elites, 5);
        assert_eq!(out.agents.len(), config.world.population_size);
        // Best agent is index 99; its clone comes first with the same weights.
        let top = &agents[99];
        assert_eq!(out.agents[0].genotype.brain, top.genotype.brain);
        assert_eq!(out.agents[0].identity.parent_ids, Some((top.id(), top.id())));

        let pool: std::collections::HashSet<_> = (80..100).map(|i| agents[i].id()).collect();
        for child in &out.agents[5..] {
            let (a, b) = child.identity.parent_ids.expect("bred child has parents");
            assert_ne!(a, b);
            assert!(pool.contains(&a) && pool.contains(&b));
            assert!(child.is_alive());
            assert_eq!(child.vitals.age, 0);
        }
    }

    #[test]
    fn test_zero_fitness_restarts() {
        let config = AppConfig::default();
        let agents = scored_population(&config, |_| 0.0);
        let mut rng = ChaCha8Rng::seed_from_u64(23);

        let params = MutationParams::default();
        let out = breed_next_generation_with_rng(&agents, 12, &params, &config, 2, &mut rng);

        assert!(out.restarted);
        assert_eq!(out.agents.len(), config.world.population_size);
        let old: std::collections::HashSet<_> = agents.iter().map(Agent::id).collect();
        for a in &out.agents {
            assert!(a.identity.parent_ids.is_none());
            assert!(!old.contains(&a.id()));
            assert_eq!(a.genotype.brain.hidden_count, 12);
        }
    }

    #[test]
    fn test_children_use_grown_target() {
        let config = AppConfig::default();
        let agents = scored_population(&config, |i| 10.0 * (i + 1) as f64);
        let mut rng = ChaCha8Rng::seed_from_u64(24);
        let target = next_hidden_target(config.brain.initial_hidden, 10, &config.brain);

        let params = MutationParams::default();
        let out = breed_next_generation_with_rng(&agents, target, &params, &config, 11, &mut rng);
        for a in &out.agents {
            assert_eq!(a.genotype.brain.hidden_count, 10);
            assert!(a.genotype.brain.is_well_formed());
        }
    }

    #[test]
    fn test_evaluate_fitness_sets_records() {
        let config = AppConfig::default();
        let grid = BiomeGrid::uniform(&config.world, BiomeKind::Water);
        let mut agents = scored_population(&config, |_| -1.0);
        evaluate_fitness(&mut agents, &grid, &config);
        assert!(agents.iter().all(|a| a.record.fitness >= 0.0));
    }
}
