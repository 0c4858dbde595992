use crate::model::world::World;
use genesis_core::config::GenerationEndMode;
use genesis_core::error::{Result, SimError};
use genesis_core::fitness::calculate_fitness;
use genesis_core::food;
use genesis_core::genetics::{check_traits, GenotypeLogic};
use genesis_core::lifecycle;
use genesis_core::snapshot::{AgentSnapshot, WorldSnapshot};
use genesis_data::Genotype;
use rayon::prelude::*;
use std::time::Instant;
use uuid::Uuid;

const MAX_FOOD_TARGET: usize = 10_000;

impl World {
    pub fn pause(&mut self) {
        self.paused = true;
    }

    pub fn resume(&mut self) {
        self.paused = false;
    }

    /// Flips the pause flag and returns the new state.
    pub fn toggle_pause(&mut self) -> bool {
        self.paused = !self.paused;
        self.paused
    }

    /// Switches the end condition. The fixed-time clock restarts from now.
    pub fn set_generation_end_mode(&mut self, mode: GenerationEndMode) -> Result<()> {
        if let GenerationEndMode::FixedTime { seconds } = mode {
            if !(seconds.is_finite() && seconds > 0.0) {
                return Err(SimError::invalid_config(format!(
                    "fixed generation time must be positive, got {seconds}"
                )));
            }
        }
        self.config.evolution.generation_end = mode;
        self.generation_start = Instant::now();
        tracing::info!(?mode, "Generation end mode changed");
        Ok(())
    }

    /// Applies from the next breeding step on.
    pub fn set_mutation_rate(&mut self, rate: f32) -> Result<()> {
        if !(0.0..=1.0).contains(&rate) {
            return Err(SimError::invalid_config(format!(
                "mutation rate must be in [0, 1], got {rate}"
            )));
        }
        self.config.evolution.mutation_rate = rate;
        self.params = self.params.with_rate(rate);
        Ok(())
    }

    pub fn set_mutation_strength(&mut self, strength: f32) -> Result<()> {
        if !(strength.is_finite() && strength >= 0.0) {
            return Err(SimError::invalid_config(format!(
                "mutation strength must be non-negative, got {strength}"
            )));
        }
        self.config.evolution.mutation_strength = strength;
        self.params = self.params.with_strength(strength);
        Ok(())
    }

    /// Changes the food target and respawns all food at the new count.
    pub fn set_food_target(&mut self, target: usize) -> Result<()> {
        if target > MAX_FOOD_TARGET {
            return Err(SimError::invalid_config(format!(
                "food target too large (max {MAX_FOOD_TARGET}), got {target}"
            )));
        }
        self.food_target = target;
        food::reset_food_with_rng(&mut self.food, target, &self.grid, &self.config, &mut self.rng);
        Ok(())
    }

    /// Replaces the first agent with a fresh agent carrying the decoded
    /// genome. Returns the new agent's id.
    ///
    /// Genomes whose traits fall outside the configured ranges are rejected
    /// and leave the population untouched.
    pub fn seed_genome(&mut self, hex: &str) -> Result<Uuid> {
        let genotype = Genotype::from_hex(hex)?;
        check_traits(&genotype.traits, &self.config)?;
        let agent = lifecycle::spawn_with_genotype_with_rng(
            genotype,
            None,
            self.generation,
            &self.config,
            &mut self.rng,
        );
        let id = agent.id();
        match self.agents.first_mut() {
            Some(slot) => *slot = agent,
            None => self.agents.push(agent),
        }
        tracing::info!(id = %id, generation = self.generation, "Seeded genome");
        Ok(id)
    }

    /// Genome of the currently fittest agent, dead or alive, as hex.
    #[must_use]
    pub fn best_genotype_hex(&self) -> Option<String> {
        self.agents
            .par_iter()
            .map(|a| (calculate_fitness(a, &self.grid, &self.config), a))
            .max_by(|a, b| a.0.total_cmp(&b.0))
            .map(|(_, a)| a.genotype.to_hex())
    }

    /// Read-only view of the world for renderers.
    ///
    /// Each living agent's fitness is computed exactly once here and reused
    /// to pick the best agent. Dead agents carry a fitness of zero.
    #[must_use]
    pub fn snapshot(&self) -> WorldSnapshot {
        let agents: Vec<AgentSnapshot> = self
            .agents
            .par_iter()
            .map(|a| {
                let fitness = if a.is_alive() {
                    calculate_fitness(a, &self.grid, &self.config)
                } else {
                    0.0
                };
                AgentSnapshot::of(a, fitness)
            })
            .collect();
        let best_agent = agents
            .iter()
            .filter(|a| a.alive)
            .max_by(|a, b| a.fitness.total_cmp(&b.fitness))
            .map(|a| a.id);

        WorldSnapshot {
            tick: self.tick,
            generation: self.generation,
            agents,
            food: self.food.clone(),
            temperature: self.env.temperature,
            best_agent,
            progress: self.progress(),
            paused: self.paused,
            hidden_nodes: self.hidden_target,
            last_stats: self.last_stats.clone(),
        }
    }
}
