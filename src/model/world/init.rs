use crate::model::history::GenerationHistory;
use crate::model::world::World;
use genesis_core::biome::BiomeGrid;
use genesis_core::brain::MutationParams;
use genesis_core::config::AppConfig;
use genesis_core::environment::Environment;
use genesis_core::food;
use genesis_core::lifecycle;
use genesis_core::metrics::Metrics;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::time::Instant;

impl World {
    /// Builds a world with a random biome map, a founder population and a
    /// full food supply. The configuration is validated first.
    pub fn new(config: AppConfig) -> anyhow::Result<Self> {
        config.validate()?;
        let mut rng = if let Some(seed) = config.world.seed {
            ChaCha8Rng::seed_from_u64(seed)
        } else {
            ChaCha8Rng::from_entropy()
        };

        let grid = BiomeGrid::new_random_with_rng(&config.world, &mut rng);
        let agents = lifecycle::create_population_with_rng(&config, 1, &mut rng);
        let food_target = config.world.food_count;
        let mut food = Vec::with_capacity(food_target);
        food::reset_food_with_rng(&mut food, food_target, &grid, &config, &mut rng);

        tracing::info!(
            population = agents.len(),
            food = food.len(),
            seed = ?config.world.seed,
            config = %config.fingerprint(),
            "World created"
        );

        Ok(Self {
            env: Environment::new(config.world.temperature_period),
            history: GenerationHistory::new(config.visual.max_history),
            params: MutationParams::from_config(&config),
            hidden_target: config.brain.initial_hidden,
            grid,
            food,
            agents,
            tick: 0,
            total_ticks: 0,
            generation: 1,
            food_target,
            paused: false,
            last_stats: None,
            metrics: Metrics::new(),
            generation_start: Instant::now(),
            rng,
            config,
        })
    }

    /// Starts over from generation 1: new biome map, fresh founders at the
    /// configured initial hidden size, full food and an empty history.
    /// Runtime overrides (mutation knobs, food target, end mode) are kept.
    pub fn reset(&mut self) {
        self.grid = BiomeGrid::new_random_with_rng(&self.config.world, &mut self.rng);
        self.hidden_target = self.config.brain.initial_hidden;
        self.generation = 1;
        self.tick = 0;
        self.total_ticks = 0;
        self.env.tick_deterministic(0);
        self.agents = lifecycle::create_population_with_rng(&self.config, 1, &mut self.rng);
        food::reset_food_with_rng(
            &mut self.food,
            self.food_target,
            &self.grid,
            &self.config,
            &mut self.rng,
        );
        self.history.clear();
        self.last_stats = None;
        self.paused = false;
        self.generation_start = Instant::now();
        self.metrics.record_generation(1);
        tracing::info!(population = self.agents.len(), "World reset");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded(seed: u64) -> AppConfig {
        let mut config = AppConfig::default();
        config.world.seed = Some(seed);
        config
    }

    #[test]
    fn test_new_world_is_populated() {
        let world = World::new(seeded(1)).expect("world");
        assert_eq!(world.agents.len(), 100);
        assert_eq!(world.food.len(), 100);
        assert_eq!(world.generation, 1);
        assert_eq!(world.tick, 0);
        assert_eq!(world.hidden_target, 8);
        assert!(world.agents.iter().all(|a| a.is_alive()));
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let mut config = seeded(1);
        config.world.population_size = 1;
        assert!(World::new(config).is_err());
    }

    #[test]
    fn test_reset_restores_generation_one() {
        let mut world = World::new(seeded(2)).expect("world");
        world.force_end_generation();
        world.force_end_generation();
        assert_eq!(world.generation, 3);

        world.reset();
        assert_eq!(world.generation, 1);
        assert_eq!(world.tick, 0);
        assert!(world.history.is_empty());
        assert!(world.last_stats.is_none());
        assert_eq!(world.agents.len(), 100);
        assert!(world.agents.iter().all(|a| a.identity.parent_ids.is_none()));
    }
}
