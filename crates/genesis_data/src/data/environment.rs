use super::agent::DeathCause;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Biome types making up the world grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum BiomeKind {
    #[default]
    Grassland,
    Desert,
    Water,
    Forest,
    Mountain,
    Volcanic,
}

impl BiomeKind {
    /// The catalog, in index order.
    pub const ALL: [BiomeKind; 6] = [
        BiomeKind::Grassland,
        BiomeKind::Desert,
        BiomeKind::Water,
        BiomeKind::Forest,
        BiomeKind::Mountain,
        BiomeKind::Volcanic,
    ];

    pub const COUNT: usize = Self::ALL.len();

    #[must_use]
    pub fn index(self) -> usize {
        match self {
            BiomeKind::Grassland => 0,
            BiomeKind::Desert => 1,
            BiomeKind::Water => 2,
            BiomeKind::Forest => 3,
            BiomeKind::Mountain => 4,
            BiomeKind::Volcanic => 5,
        }
    }

    /// Looks up a biome by catalog index, clamping out-of-range values.
    #[must_use]
    pub fn from_index(idx: usize) -> Self {
        Self::ALL[idx.min(Self::COUNT - 1)]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum FoodKind {
    #[default]
    Plant,
    Meat,
}

/// A food item lying in the world.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Food {
    pub x: f64,
    pub y: f64,
    pub kind: FoodKind,
    pub energy_value: f64,
    pub is_toxic: bool,
    pub radius: f64,
}

/// Summary of one finished generation, as handed to charts.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct GenerationStats {
    pub generation: u32,
    pub population: usize,
    pub alive: usize,
    pub avg_fitness: f64,
    pub best_fitness: f64,
    pub avg_speed: f64,
    pub avg_size: f64,
    pub avg_food_eaten: f64,
    pub avg_vision_range: f64,
    pub avg_lifespan: f64,
    pub avg_biome_preference: f64,
    pub avg_attack_power: f64,
    pub avg_defense: f64,
    pub avg_metabolism_rate: f64,
    pub avg_clutch_size: f64,
    pub avg_sensory_range: f64,
    pub avg_optimal_temperature: f64,
    pub carnivore_fraction: f64,
    pub hidden_nodes: usize,
    /// True when breeding was abandoned for a fresh random population.
    pub restarted: bool,
}

/// Notable things that happened during a tick.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type")]
pub enum LiveEvent {
    Death {
        id: Uuid,
        cause: DeathCause,
        age: u64,
        tick: u64,
        timestamp: String,
    },
    Kill {
        attacker: Uuid,
        target: Uuid,
        tick: u64,
    },
    Mating {
        a: Uuid,
        b: Uuid,
        tick: u64,
    },
    GenerationEnd {
        generation: u32,
        avg_fitness: f64,
        best_fitness: f64,
        timestamp: String,
    },
    HiddenLayerGrowth {
        from: usize,
        to: usize,
        generation: u32,
    },
    Extinction {
        generation: u32,
        timestamp: String,
    },
}
