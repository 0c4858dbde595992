//! Configuration management for simulation parameters.
//!
//! This module provides strongly-typed configuration structures that map to
//! the `config.toml` file. Every tunable constant of the engine lives here and
//! the whole struct is handed by reference to the world at construction.
//!
//! ## Configuration Hierarchy
//!
//! 1. Default values (hardcoded in `Default` impl)
//! 2. `config.toml` file (overrides defaults)
//! 3. Command line flags of the `genesis` binary (seed, generation end mode)
//!
//! ## Example `config.toml`
//!
//! ```toml
//! [world]
//! population_size = 100
//! food_count = 120
//! seed = 42
//!
//! [evolution]
//! mutation_rate = 0.1
//! mutation_strength = 0.5
//!
//! [evolution.generation_end]
//! mode = "fixed_time"
//! seconds = 5.0
//! ```

use genesis_data::BiomeKind;
use serde::{Deserialize, Serialize};

/// World-level simulation configuration.
///
/// Dimensions of the arena, population and food targets, and the biome grid
/// resolution.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default)]
pub struct WorldConfig {
    pub width: f64,
    pub height: f64,
    pub population_size: usize,
    /// Target number of food items kept in the world.
    pub food_count: usize,
    pub biome_grid_x: usize,
    pub biome_grid_y: usize,
    /// Multiplier applied to a biome's spawn chance during placement.
    pub food_spawn_multiplier: f64,
    pub food_spawn_attempts: u32,
    pub food_replenish_per_tick: usize,
    pub food_radius: f64,
    pub toxic_food_chance: f64,
    /// Ticks for one full temperature cycle.
    pub temperature_period: u64,
    pub initial_carnivore_fraction: f64,
    pub seed: Option<u64>,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
            population_size: 100,
            food_count: 100,
            biome_grid_x: 4,
            biome_grid_y: 3,
            food_spawn_multiplier: 10.0,
            food_spawn_attempts: 50,
            food_replenish_per_tick: 1,
            food_radius: 3.0,
            toxic_food_chance: 0.05,
            temperature_period: 3600,
            initial_carnivore_fraction: 0.2,
            seed: None,
        }
    }
}

/// Energy income and expenditure.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default)]
pub struct MetabolismConfig {
    pub initial_energy: f64,
    /// Multiplied by the agent's metabolism rate and the biome movement cost.
    pub base_decay_rate: f64,
    pub plant_energy: f64,
    pub meat_deposit_energy: f64,
    pub reproduction_threshold: f64,
    /// Total energy a mating costs; each partner pays half.
    pub reproduction_cost: f64,
    pub wall_hit_penalty: f64,
    pub temperature_effect_multiplier: f64,
    pub hazard_drain: f64,
    pub toxic_penalty: f64,
    pub collision_offset: f64,
}

impl Default for MetabolismConfig {
    fn default() -> Self {
        Self {
            initial_energy: 100.0,
            base_decay_rate: 0.6,
            plant_energy: 100.0,
            meat_deposit_energy: 80.0,
            reproduction_threshold: 250.0,
            reproduction_cost: 100.0,
            wall_hit_penalty: 10.0,
            temperature_effect_multiplier: 0.05,
            hazard_drain: 0.2,
            toxic_penalty: 30.0,
            collision_offset: 3.0,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default)]
pub struct MovementConfig {
    /// Species base speed, also the reference for the speed fitness penalty.
    pub base_speed: f64,
    pub base_radius: f64,
    /// Radians per tick at full brain output.
    pub max_turn_rate: f64,
    pub max_speed_adjustment: f64,
    pub min_speed_factor: f64,
    pub max_speed_factor: f64,
}

impl Default for MovementConfig {
    fn default() -> Self {
        Self {
            base_speed: 1.5,
            base_radius: 5.0,
            max_turn_rate: 0.4,
            max_speed_adjustment: 1.0,
            min_speed_factor: 0.5,
            max_speed_factor: 2.5,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default)]
pub struct CombatConfig {
    pub combat_range: f64,
    pub attack_energy_cost: f64,
    pub damage_multiplier: f64,
    /// Energy an attacker gains from a kill.
    pub meat_energy_bonus: f64,
    /// Carnivores only attack while their energy exceeds this.
    pub energy_safety_margin: f64,
    pub mating_range: f64,
}

impl Default for CombatConfig {
    fn default() -> Self {
        Self {
            combat_range: 12.0,
            attack_energy_cost: 1.0,
            damage_multiplier: 1.0,
            meat_energy_bonus: 60.0,
            energy_safety_margin: 50.0,
            mating_range: 15.0,
        }
    }
}

/// How the end of a generation is detected.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum GenerationEndMode {
    /// Ends when more than half the population has died, or all have.
    #[default]
    MajorityMaxAge,
    /// Ends after a wall-clock duration.
    FixedTime { seconds: f64 },
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default)]
pub struct EvolutionConfig {
    pub mutation_rate: f32,
    pub mutation_strength: f32,
    pub elite_fraction: f32,
    pub parent_fraction: f32,
    /// Parents fitter than this are mutated gently.
    pub fine_tune_fitness: f64,
    pub fine_tune_scale: f32,
    /// Parents less fit than this are mutated harder.
    pub explore_fitness: f64,
    pub explore_scale: f32,
    pub diet_flip_multiplier: f32,
    pub color_mutation_magnitude: f32,
    pub speed_mutation_scale: f64,
    pub size_mutation_scale: f64,
    pub generation_end: GenerationEndMode,
}

impl Default for EvolutionConfig {
    fn default() -> Self {
        Self {
            mutation_rate: 0.1,
            mutation_strength: 0.5,
            elite_fraction: 0.05,
            parent_fraction: 0.2,
            fine_tune_fitness: 5000.0,
            fine_tune_scale: 0.6,
            explore_fitness: 1000.0,
            explore_scale: 1.4,
            diet_flip_multiplier: 0.5,
            color_mutation_magnitude: 60.0,
            speed_mutation_scale: 1.0,
            size_mutation_scale: 1.5,
            generation_end: GenerationEndMode::MajorityMaxAge,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default)]
pub struct BrainConfig {
    pub initial_hidden: usize,
    pub min_hidden: usize,
    pub max_hidden: usize,
    /// Grow the hidden layer every this many generations.
    pub growth_interval: u32,
    pub growth_step: usize,
}

impl Default for BrainConfig {
    fn default() -> Self {
        Self {
            initial_hidden: 8,
            min_hidden: 4,
            max_hidden: 32,
            growth_interval: 10,
            growth_step: 2,
        }
    }
}

/// Valid range, starting value and mutation scale of one scalar trait.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct TraitRange {
    pub min: f64,
    pub max: f64,
    pub default: f64,
    pub mutation_scale: f64,
}

impl TraitRange {
    #[must_use]
    pub const fn new(min: f64, max: f64, default: f64, mutation_scale: f64) -> Self {
        Self {
            min,
            max,
            default,
            mutation_scale,
        }
    }

    #[must_use]
    pub fn clamp(&self, value: f64) -> f64 {
        value.clamp(self.min, self.max)
    }

    #[must_use]
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    /// `value` mapped into `[0, 1]` over the range.
    #[must_use]
    pub fn normalize(&self, value: f64) -> f64 {
        if self.max <= self.min {
            return 0.0;
        }
        ((value - self.min) / (self.max - self.min)).clamp(0.0, 1.0)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default)]
pub struct TraitsConfig {
    pub speed: TraitRange,
    pub size: TraitRange,
    pub vision_range: TraitRange,
    pub sensory_range: TraitRange,
    pub lifespan: TraitRange,
    /// Scaled by the number of biomes when mutating the preference index.
    pub biome_preference_scale: f64,
    pub attack_power: TraitRange,
    pub defense: TraitRange,
    pub metabolism_rate: TraitRange,
    pub reproduction_cooldown: TraitRange,
    pub clutch_size: TraitRange,
    pub optimal_temperature: TraitRange,
}

impl Default for TraitsConfig {
    fn default() -> Self {
        Self {
            speed: TraitRange::new(0.5, 3.75, 1.5, 1.0),
            size: TraitRange::new(3.0, 15.0, 5.0, 1.5),
            vision_range: TraitRange::new(50.0, 300.0, 100.0, 50.0),
            sensory_range: TraitRange::new(0.0, 120.0, 30.0, 20.0),
            lifespan: TraitRange::new(600.0, 9000.0, 3600.0, 600.0),
            biome_preference_scale: 0.5,
            attack_power: TraitRange::new(0.0, 20.0, 5.0, 4.0),
            defense: TraitRange::new(0.0, 20.0, 3.0, 4.0),
            metabolism_rate: TraitRange::new(0.01, 0.1, 0.05, 0.02),
            reproduction_cooldown: TraitRange::new(60.0, 1200.0, 300.0, 120.0),
            clutch_size: TraitRange::new(1.0, 5.0, 2.0, 2.0),
            optimal_temperature: TraitRange::new(0.0, 1.0, 0.5, 0.2),
        }
    }
}

/// Coefficients of the fitness function. Rewards are added, penalties
/// subtracted; all values are expected to be non-negative.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default)]
pub struct FitnessConfig {
    pub food_eaten_reward: f64,
    pub age_reward: f64,
    pub energy_reward: f64,
    pub early_death_penalty: f64,
    pub biome_adaptation_reward: f64,
    pub biome_preference_penalty: f64,
    pub speed_deviation_penalty: f64,
    pub vision_deviation_penalty: f64,
    pub wall_hit_penalty: f64,
    pub lifespan_deviation_penalty: f64,
    pub metabolism_deviation_penalty: f64,
    pub cooldown_deviation_penalty: f64,
    pub attack_reward: f64,
    pub defense_reward: f64,
    /// Attack or defense below this incurs `combat_floor_penalty`.
    pub combat_floor: f64,
    pub combat_floor_penalty: f64,
    pub sensory_reward: f64,
    pub sensory_soft_cap: f64,
    pub sensory_overcap_penalty: f64,
    pub temperature_deviation_penalty: f64,
}

impl Default for FitnessConfig {
    fn default() -> Self {
        Self {
            food_eaten_reward: 200.0,
            age_reward: 0.8,
            energy_reward: 0.2,
            early_death_penalty: 0.02,
            biome_adaptation_reward: 75.0,
            biome_preference_penalty: 30.0,
            speed_deviation_penalty: 10.0,
            vision_deviation_penalty: 0.5,
            wall_hit_penalty: 5.0,
            lifespan_deviation_penalty: 0.1,
            metabolism_deviation_penalty: 5000.0,
            cooldown_deviation_penalty: 0.05,
            attack_reward: 2.0,
            defense_reward: 2.0,
            combat_floor: 1.0,
            combat_floor_penalty: 50.0,
            sensory_reward: 1.0,
            sensory_soft_cap: 60.0,
            sensory_overcap_penalty: 2.0,
            temperature_deviation_penalty: 100.0,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default)]
pub struct VisualConfig {
    /// Positions remembered per agent for trail rendering.
    pub trail_length: usize,
    /// Generations kept in the statistics history.
    pub max_history: usize,
}

impl Default for VisualConfig {
    fn default() -> Self {
        Self {
            trail_length: 30,
            max_history: 500,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default)]
pub struct AppConfig {
    pub world: WorldConfig,
    pub metabolism: MetabolismConfig,
    pub movement: MovementConfig,
    pub combat: CombatConfig,
    pub evolution: EvolutionConfig,
    pub brain: BrainConfig,
    pub traits: TraitsConfig,
    pub fitness: FitnessConfig,
    pub visual: VisualConfig,
    pub target_fps: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            world: WorldConfig::default(),
            metabolism: MetabolismConfig::default(),
            movement: MovementConfig::default(),
            combat: CombatConfig::default(),
            evolution: EvolutionConfig::default(),
            brain: BrainConfig::default(),
            traits: TraitsConfig::default(),
            fitness: FitnessConfig::default(),
            visual: VisualConfig::default(),
            target_fps: 60,
        }
    }
}

impl AppConfig {
    /// Validates all configuration parameters.
    ///
    /// Returns `Ok(())` if all parameters are valid, or `Err` with a description
    /// of the first validation failure.
    pub fn validate(&self) -> anyhow::Result<()> {
        // World validation
        anyhow::ensure!(self.world.width > 0.0, "World width must be positive");
        anyhow::ensure!(self.world.height > 0.0, "World height must be positive");
        anyhow::ensure!(
            self.world.population_size >= 2,
            "Population size must be at least 2"
        );
        anyhow::ensure!(
            self.world.population_size <= 10000,
            "Population size too large (max 10000)"
        );
        anyhow::ensure!(
            self.world.food_count <= 10000,
            "Food count too large (max 10000)"
        );
        anyhow::ensure!(
            self.world.biome_grid_x > 0 && self.world.biome_grid_y > 0,
            "Biome grid must have at least one cell"
        );
        anyhow::ensure!(
            (0.0..=1.0).contains(&self.world.toxic_food_chance),
            "Toxic food chance must be in [0.0, 1.0]"
        );
        anyhow::ensure!(
            (0.0..=1.0).contains(&self.world.initial_carnivore_fraction),
            "Initial carnivore fraction must be in [0.0, 1.0]"
        );
        anyhow::ensure!(
            self.world.temperature_period > 0,
            "Temperature period must be positive"
        );

        // Metabolism validation
        anyhow::ensure!(
            self.metabolism.initial_energy > 0.0,
            "Initial energy must be positive"
        );
        anyhow::ensure!(
            self.metabolism.base_decay_rate >= 0.0,
            "Base decay rate must be non-negative"
        );
        anyhow::ensure!(
            self.metabolism.reproduction_threshold > 0.0,
            "Reproduction threshold must be positive"
        );
        anyhow::ensure!(
            self.metabolism.reproduction_cost >= 0.0,
            "Reproduction cost must be non-negative"
        );

        // Movement validation
        anyhow::ensure!(
            self.movement.base_speed > 0.0,
            "Base speed must be positive"
        );
        anyhow::ensure!(
            self.movement.min_speed_factor >= 0.0,
            "Min speed factor must be non-negative"
        );
        anyhow::ensure!(
            self.movement.min_speed_factor <= self.movement.max_speed_factor,
            "Min speed factor must not exceed max speed factor"
        );

        // Evolution validation
        anyhow::ensure!(
            (0.0..=1.0).contains(&self.evolution.mutation_rate),
            "Mutation rate must be in [0.0, 1.0]"
        );
        anyhow::ensure!(
            self.evolution.mutation_strength >= 0.0,
            "Mutation strength must be non-negative"
        );
        anyhow::ensure!(
            (0.0..=1.0).contains(&self.evolution.elite_fraction),
            "Elite fraction must be in [0.0, 1.0]"
        );
        anyhow::ensure!(
            (0.0..=1.0).contains(&self.evolution.parent_fraction),
            "Parent fraction must be in [0.0, 1.0]"
        );
        if let GenerationEndMode::FixedTime { seconds } = self.evolution.generation_end {
            anyhow::ensure!(seconds > 0.0, "Fixed generation time must be positive");
        }

        // Brain validation
        anyhow::ensure!(
            self.brain.min_hidden <= self.brain.max_hidden,
            "Min hidden nodes must not exceed max hidden nodes"
        );
        anyhow::ensure!(
            (self.brain.min_hidden..=self.brain.max_hidden).contains(&self.brain.initial_hidden),
            "Initial hidden nodes must lie within [min_hidden, max_hidden]"
        );
        anyhow::ensure!(
            self.brain.growth_interval > 0,
            "Growth interval must be positive"
        );

        // Trait validation
        for (name, range) in self.trait_ranges() {
            anyhow::ensure!(range.min <= range.max, "Trait {name} has min > max");
            anyhow::ensure!(
                range.contains(range.default),
                "Trait {name} default lies outside its range"
            );
        }

        anyhow::ensure!(
            self.traits.speed.min > 0.0,
            "Trait speed minimum must be positive"
        );

        // Target FPS validation
        anyhow::ensure!(self.target_fps > 0, "Target FPS must be positive");
        anyhow::ensure!(self.target_fps <= 240, "Target FPS too high (max 240)");

        Ok(())
    }

    fn trait_ranges(&self) -> [(&'static str, TraitRange); 11] {
        let t = &self.traits;
        [
            ("speed", t.speed),
            ("size", t.size),
            ("vision_range", t.vision_range),
            ("sensory_range", t.sensory_range),
            ("lifespan", t.lifespan),
            ("attack_power", t.attack_power),
            ("defense", t.defense),
            ("metabolism_rate", t.metabolism_rate),
            ("reproduction_cooldown", t.reproduction_cooldown),
            ("clutch_size", t.clutch_size),
            ("optimal_temperature", t.optimal_temperature),
        ]
    }

    /// Number of biome kinds in the catalog.
    #[must_use]
    pub fn biome_count(&self) -> usize {
        BiomeKind::COUNT
    }

    /// Loads and validates configuration from TOML text.
    pub fn from_toml(content: &str) -> anyhow::Result<Self> {
        let config = toml::from_str::<Self>(content)?;
        config.validate()?;
        Ok(config)
    }

    #[must_use]
    pub fn fingerprint(&self) -> String {
        use sha2::{Digest, Sha256};
        let mut hasher = Sha256::new();
        hasher.update(format!("{:?}", self.world).as_bytes());
        hasher.update(format!("{:?}", self.metabolism).as_bytes());
        hasher.update(format!("{:?}", self.movement).as_bytes());
        hasher.update(format!("{:?}", self.combat).as_bytes());
        hasher.update(format!("{:?}", self.evolution).as_bytes());
        hasher.update(format!("{:?}", self.brain).as_bytes());
        hasher.update(format!("{:?}", self.traits).as_bytes());
        hasher.update(format!("{:?}", self.fitness).as_bytes());
        hex::encode(hasher.finalize())
    }
}
