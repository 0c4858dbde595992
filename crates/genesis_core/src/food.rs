use crate::biome::{BiomeGrid, BiomeLogic};
use crate::config::AppConfig;
use genesis_data::{Food, FoodKind};
use rand::Rng;

/// A plant at a given position, toxic with the configured chance.
pub fn new_plant_with_rng<R: Rng>(x: f64, y: f64, config: &AppConfig, rng: &mut R) -> Food {
    Food {
        x,
        y,
        kind: FoodKind::Plant,
        energy_value: config.metabolism.plant_energy,
        is_toxic: rng.gen_bool(config.world.toxic_food_chance.clamp(0.0, 1.0)),
        radius: config.world.food_radius,
    }
}

/// Meat left behind by an agent that starved.
#[must_use]
pub fn meat_deposit(x: f64, y: f64, config: &AppConfig) -> Food {
    Food {
        x,
        y,
        kind: FoodKind::Meat,
        energy_value: config.metabolism.meat_deposit_energy,
        is_toxic: false,
        radius: config.world.food_radius,
    }
}

/// Picks a spawn location, preferring fertile biomes.
///
/// Up to `food_spawn_attempts` random points are tried, each accepted with
/// probability `spawn_chance × multiplier` of its biome. When every attempt is
/// rejected the last fallback is a uniformly random point.
pub fn pick_spawn_point<R: Rng>(grid: &BiomeGrid, config: &AppConfig, rng: &mut R) -> (f64, f64) {
    let w = config.world.width;
    let h = config.world.height;
    for _ in 0..config.world.food_spawn_attempts {
        let x = rng.gen_range(0.0..w);
        let y = rng.gen_range(0.0..h);
        let chance = grid.biome_at(x, y).food_spawn_chance() * config.world.food_spawn_multiplier;
        if rng.gen::<f64>() < chance {
            return (x, y);
        }
    }
    (rng.gen_range(0.0..w), rng.gen_range(0.0..h))
}

/// Appends `count` biome-weighted plants.
pub fn spawn_food_with_rng<R: Rng>(
    food: &mut Vec<Food>,
    count: usize,
    grid: &BiomeGrid,
    config: &AppConfig,
    rng: &mut R,
) {
    food.reserve(count);
    for _ in 0..count {
        let (x, y) = pick_spawn_point(grid, config, rng);
        food.push(new_plant_with_rng(x, y, config, rng));
    }
}

/// Clears all food and spawns `target` fresh plants.
pub fn reset_food_with_rng<R: Rng>(
    food: &mut Vec<Food>,
    target: usize,
    grid: &BiomeGrid,
    config: &AppConfig,
    rng: &mut R,
) {
    food.clear();
    spawn_food_with_rng(food, target, grid, config, rng);
}

/// Tops the food list up by the per-tick amount while below `target`.
pub fn replenish_with_rng<R: Rng>(
    food: &mut Vec<Food>,
    target: usize,
    grid: &BiomeGrid,
    config: &AppConfig,
    rng: &mut R,
) {
    if food.len() < target {
        spawn_food_with_rng(food, config.world.food_replenish_per_tick, grid, config, rng);
    }
}
