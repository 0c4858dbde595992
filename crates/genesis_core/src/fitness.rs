use crate::biome::{BiomeGrid, BiomeLogic};
use crate::config::AppConfig;
use genesis_data::Agent;

/// Scores an agent's generation performance. Never negative.
///
/// Rewards food, survival, remaining energy, biome adaptation, combat traits
/// and sensory range up to a soft cap. Penalizes early death, living away from
/// the preferred biome, wall hits, and deviation of speed, vision, lifespan,
/// metabolism, cooldown and optimal temperature from their defaults.
#[must_use]
pub fn calculate_fitness(agent: &Agent, grid: &BiomeGrid, config: &AppConfig) -> f64 {
    let f = &config.fitness;
    let t = &config.traits;
    let traits = &agent.genotype.traits;
    let age = agent.vitals.age as f64;
    let lifespan = traits.lifespan as f64;

    let mut score = f64::from(agent.record.food_eaten) * f.food_eaten_reward;
    score += age * f.age_reward;
    score += agent.vitals.energy.max(0.0) * f.energy_reward;
    if agent.vitals.age <= traits.lifespan {
        score -= (lifespan - age) * f.early_death_penalty;
    }

    let biome = grid.biome_at(agent.physics.x, agent.physics.y);
    score += biome.base_adaptation_score() * f.biome_adaptation_reward;
    let preference_gap = (traits.biome_preference as f64 - biome.index() as f64).abs();
    score -= preference_gap * f.biome_preference_penalty;

    score -= (agent.physics.speed - config.movement.base_speed).abs() * f.speed_deviation_penalty;
    score -= (traits.vision_range - t.vision_range.default).abs() * f.vision_deviation_penalty;
    score -= f64::from(agent.record.wall_hits) * f.wall_hit_penalty;
    score -= (lifespan - t.lifespan.default).abs() * f.lifespan_deviation_penalty;
    score -= (traits.metabolism_rate - t.metabolism_rate.default).abs()
        * f.metabolism_deviation_penalty;
    score -= (f64::from(traits.reproduction_cooldown) - t.reproduction_cooldown.default).abs()
        * f.cooldown_deviation_penalty;

    score += traits.attack_power * f.attack_reward;
    score += traits.defense * f.defense_reward;
    if traits.attack_power < f.combat_floor {
        score -= f.combat_floor_penalty;
    }
    if traits.defense < f.combat_floor {
        score -= f.combat_floor_penalty;
    }

    score += traits.sensory_range.min(f.sensory_soft_cap) * f.sensory_reward;
    score -= (traits.sensory_range - f.sensory_soft_cap).max(0.0) * f.sensory_overcap_penalty;

    score -= (f64::from(traits.optimal_temperature) - t.optimal_temperature.default).abs()
        * f.temperature_deviation_penalty;

    if score.is_finite() {
        score.max(0.0)
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lifecycle::create_agent_with_rng;
    use genesis_data::BiomeKind;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn setup() -> (Agent, BiomeGrid, AppConfig) {
        let config = AppConfig::default();
        let grid = BiomeGrid::uniform(&config.world, BiomeKind::Grassland);
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let mut agent = create_agent_with_rng(&config, 1, &mut rng);
        agent.genotype.traits = crate::genetics::default_traits(&config);
        agent.physics.speed = config.movement.base_speed;
        (agent, grid, config)
    }

    #[test]
    fn test_food_increases_fitness() {
        let (mut agent, grid, config) = setup();
        let before = calculate_fitness(&agent, &grid, &config);
        agent.record.food_eaten = 3;
        let after = calculate_fitness(&agent, &grid, &config);
        assert!((after - before - 600.0).abs() < 1e-9);
    }

    #[test]
    fn test_default_traits_baseline() {
        let (mut agent, grid, config) = setup();
        agent.vitals.age = 0;
        agent.vitals.energy = 100.0;
        // 20 energy - 3600*0.02 early death + 75 grassland + 10 attack + 6 defense + 30 sensory
        let expected = 20.0 - 72.0 + 75.0 + 10.0 + 6.0 + 30.0;
        assert!((calculate_fitness(&agent, &grid, &config) - expected).abs() < 1e-9);
    }

    #[test]
    fn test_never_negative() {
        let (mut agent, grid, config) = setup();
        agent.record.wall_hits = 10_000;
        agent.vitals.energy = -50.0;
        agent.genotype.traits.metabolism_rate = 0.1;
        assert_eq!(calculate_fitness(&agent, &grid, &config), 0.0);
    }

    #[test]
    fn test_combat_floor_penalty() {
        let (mut agent, grid, config) = setup();
        agent.record.food_eaten = 10;
        let base = calculate_fitness(&agent, &grid, &config);
        agent.genotype.traits.attack_power = 0.5;
        let floored = calculate_fitness(&agent, &grid, &config);
        assert!((base - floored - (4.5 * 2.0 + 50.0)).abs() < 1e-9);
    }

    #[test]
    fn test_sensory_soft_cap() {
        let (mut agent, grid, config) = setup();
        agent.record.food_eaten = 10;
        agent.genotype.traits.sensory_range = 60.0;
        let at_cap = calculate_fitness(&agent, &grid, &config);
        agent.genotype.traits.sensory_range = 80.0;
        let over = calculate_fitness(&agent, &grid, &config);
        assert!((at_cap - over - 40.0).abs() < 1e-9);
    }

    #[test]
    fn test_preferred_biome_scores_higher() {
        let (mut agent, grid, config) = setup();
        agent.record.food_eaten = 10;
        agent.genotype.traits.biome_preference = BiomeKind::Grassland.index();
        let home = calculate_fitness(&agent, &grid, &config);
        agent.genotype.traits.biome_preference = BiomeKind::Mountain.index();
        let away = calculate_fitness(&agent, &grid, &config);
        assert!((home - away - 4.0 * 30.0).abs() < 1e-9);
    }
}
