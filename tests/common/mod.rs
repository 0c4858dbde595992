use genesis_core::biome::BiomeGrid;
use genesis_core::brain::{BRAIN_INPUTS, BRAIN_OUTPUTS};
use genesis_core::config::{AppConfig, GenerationEndMode};
use genesis_core::genetics::default_traits;
use genesis_core::lifecycle;
use genesis_data::{Agent, BiomeKind, Brain, Food, FoodKind};
use genesis_lib::World;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

type WorldMod = Box<dyn FnOnce(&mut World)>;

#[allow(dead_code)]
pub struct WorldBuilder {
    config: AppConfig,
    agents: Vec<Agent>,
    mods: Vec<WorldMod>,
}

#[allow(dead_code)]
impl WorldBuilder {
    pub fn new() -> Self {
        let mut config = AppConfig::default();
        config.world.seed = Some(42);
        Self {
            config,
            agents: Vec::new(),
            mods: Vec::new(),
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.config.world.seed = Some(seed);
        self
    }

    pub fn with_config<F>(mut self, modifier: F) -> Self
    where
        F: FnOnce(&mut AppConfig),
    {
        modifier(&mut self.config);
        self
    }

    /// Generations only end when forced.
    pub fn without_generation_end(mut self) -> Self {
        self.config.evolution.generation_end = GenerationEndMode::FixedTime { seconds: 86_400.0 };
        self
    }

    pub fn with_uniform_biome(mut self, kind: BiomeKind) -> Self {
        self.mods.push(Box::new(move |world| {
            world.grid = BiomeGrid::uniform(&world.config.world, kind);
        }));
        self
    }

    /// Clears all food and keeps the world from spawning more.
    pub fn without_food(mut self) -> Self {
        self.mods.push(Box::new(|world| {
            world.food.clear();
            world.food_target = 0;
        }));
        self
    }

    pub fn with_food(mut self, x: f64, y: f64, kind: FoodKind) -> Self {
        self.mods.push(Box::new(move |world| {
            world.food.push(Food {
                x,
                y,
                kind,
                energy_value: 100.0,
                is_toxic: false,
                radius: world.config.world.food_radius,
            });
        }));
        self
    }

    /// Replaces the random founders with the given agents.
    pub fn with_agent(mut self, agent: Agent) -> Self {
        self.agents.push(agent);
        self
    }

    pub fn build(self) -> World {
        let mut world = World::new(self.config).expect("Failed to create world in test builder");
        for modifier in self.mods {
            modifier(&mut world);
        }
        if !self.agents.is_empty() {
            world.agents = self.agents;
        }
        world
    }
}

/// A herbivore with default traits and an all-zero brain: it never turns and
/// moves at its base speed along `heading`.
#[allow(dead_code)]
pub fn still_brain_agent(config: &AppConfig, x: f64, y: f64, heading: f64) -> Agent {
    let mut rng = ChaCha8Rng::seed_from_u64(x.to_bits() ^ y.to_bits());
    let mut agent = lifecycle::create_agent_with_rng(config, 1, &mut rng);
    agent.genotype.traits = default_traits(config);
    agent.genotype.brain = Brain::zeroed(BRAIN_INPUTS, config.brain.initial_hidden, BRAIN_OUTPUTS);
    agent.physics.x = x;
    agent.physics.y = y;
    agent.physics.heading = heading;
    agent.physics.speed = agent.genotype.traits.base_speed;
    agent
}
