mod common;

use common::{still_brain_agent, WorldBuilder};
use genesis_core::config::AppConfig;
use genesis_data::{BiomeKind, DeathCause, FoodKind, LiveEvent};
use std::f64::consts::PI;

#[test]
fn test_starvation_leaves_one_meat_deposit() {
    let config = AppConfig::default();
    let mut starving = still_brain_agent(&config, 200.0, 300.0, 0.0);
    starving.vitals.energy = 1.0;
    let bystander = still_brain_agent(&config, 600.0, 300.0, 0.0);

    let mut world = WorldBuilder::new()
        .with_config(|c| {
            c.world.population_size = 2;
            // Decay of 100 × 0.05 = 5 per tick.
            c.metabolism.base_decay_rate = 100.0;
        })
        .without_generation_end()
        .with_uniform_biome(BiomeKind::Grassland)
        .without_food()
        .with_agent(starving)
        .with_agent(bystander)
        .build();

    let events = world.update().expect("update");

    let dead = &world.agents[0];
    assert!(!dead.is_alive());
    assert!(dead.vitals.energy <= 0.0);
    assert_eq!(dead.vitals.death_cause, Some(DeathCause::Starvation));
    assert!(world.agents[1].is_alive());

    assert_eq!(world.food.len(), 1);
    let meat = &world.food[0];
    assert_eq!(meat.kind, FoodKind::Meat);
    assert_eq!((meat.x, meat.y), (dead.physics.x, dead.physics.y));
    assert_eq!(meat.energy_value, world.config.metabolism.meat_deposit_energy);

    let deaths = events
        .iter()
        .filter(|e| matches!(e, LiveEvent::Death { cause: DeathCause::Starvation, .. }))
        .count();
    assert_eq!(deaths, 1);
    assert_eq!(world.metrics.counter("starvations"), 1);
}

#[test]
fn test_old_age_leaves_no_deposit() {
    let config = AppConfig::default();
    let mut old = still_brain_agent(&config, 200.0, 300.0, 0.0);
    old.vitals.age = old.genotype.traits.lifespan;
    let other = still_brain_agent(&config, 600.0, 300.0, 0.0);

    let mut world = WorldBuilder::new()
        .with_config(|c| c.world.population_size = 2)
        .without_generation_end()
        .without_food()
        .with_agent(old)
        .with_agent(other)
        .build();

    world.update().expect("update");
    assert_eq!(world.agents[0].vitals.death_cause, Some(DeathCause::OldAge));
    assert!(world.food.is_empty());
}

#[test]
fn test_wall_reflection_clamps_and_penalizes() {
    let config = AppConfig::default();
    let size = config.traits.size.default;
    let agent = still_brain_agent(&config, size - 1.0, 300.0, PI);
    let other = still_brain_agent(&config, 600.0, 300.0, 0.0);

    let mut world = WorldBuilder::new()
        .with_config(|c| c.world.population_size = 2)
        .without_generation_end()
        .with_uniform_biome(BiomeKind::Grassland)
        .without_food()
        .with_agent(agent)
        .with_agent(other)
        .build();

    world.update().expect("update");

    let a = &world.agents[0];
    assert_eq!(a.physics.x, size);
    assert!(a.physics.heading.abs() < 1e-9, "heading {}", a.physics.heading);
    assert_eq!(a.record.wall_hits, 1);
    let penalty = world.config.metabolism.wall_hit_penalty;
    assert!(a.vitals.energy < 100.0 - penalty);
    assert!(a.vitals.energy > 100.0 - penalty - 1.0);
}

#[test]
fn test_zero_brain_moves_straight() {
    let config = AppConfig::default();
    let agent = still_brain_agent(&config, 400.0, 300.0, 0.0);
    let other = still_brain_agent(&config, 100.0, 100.0, PI / 2.0);

    let mut world = WorldBuilder::new()
        .with_config(|c| c.world.population_size = 2)
        .without_generation_end()
        .without_food()
        .with_agent(agent)
        .with_agent(other)
        .build();

    for _ in 0..10 {
        world.update().expect("update");
    }
    let a = &world.agents[0];
    let base = a.genotype.traits.base_speed;
    assert!((a.physics.x - (400.0 + 10.0 * base)).abs() < 1e-9);
    assert!((a.physics.y - 300.0).abs() < 1e-9);
    assert_eq!(a.physics.heading, 0.0);
    assert_eq!(a.physics.trail.len(), 10);
}

#[test]
fn test_herbivore_eats_plant_in_reach() {
    let config = AppConfig::default();
    let agent = still_brain_agent(&config, 400.0, 300.0, 0.0);
    let other = still_brain_agent(&config, 100.0, 100.0, 0.0);

    let mut world = WorldBuilder::new()
        .with_config(|c| c.world.population_size = 2)
        .without_generation_end()
        .without_food()
        .with_food(405.0, 300.0, FoodKind::Plant)
        .with_food(405.0, 305.0, FoodKind::Meat)
        .with_agent(agent)
        .with_agent(other)
        .build();

    world.update().expect("update");

    let a = &world.agents[0];
    assert_eq!(a.record.food_eaten, 1);
    assert!(a.vitals.energy > 150.0);
    assert_eq!(world.food.len(), 1);
    assert_eq!(world.food[0].kind, FoodKind::Meat);
}

#[test]
fn test_extinction_restart_on_zero_fitness() {
    let mut world = WorldBuilder::new()
        .with_config(|c| {
            let f = &mut c.fitness;
            f.food_eaten_reward = 0.0;
            f.age_reward = 0.0;
            f.energy_reward = 0.0;
            f.biome_adaptation_reward = 0.0;
            f.attack_reward = 0.0;
            f.defense_reward = 0.0;
            f.sensory_reward = 0.0;
        })
        .build();
    let old: Vec<_> = world.agents.iter().map(|a| a.id()).collect();

    let events = world.force_end_generation();

    assert!(events
        .iter()
        .any(|e| matches!(e, LiveEvent::Extinction { generation: 1, .. })));
    assert_eq!(world.agents.len(), world.config.world.population_size);
    for a in &world.agents {
        assert!(a.identity.parent_ids.is_none());
        assert!(!old.contains(&a.id()));
        assert_eq!(a.identity.generation, 2);
    }
    let stats = world.last_stats.as_ref().expect("stats recorded");
    assert!(stats.restarted);
    assert_eq!(stats.best_fitness, 0.0);
    assert_eq!(world.metrics.counter("restarts"), 1);
}

#[test]
fn test_hidden_layer_growth_reaches_children() {
    let mut world = WorldBuilder::new()
        .with_config(|c| {
            c.brain.growth_interval = 1;
            c.brain.growth_step = 3;
        })
        .build();

    for _ in 0..3 {
        world.force_end_generation();
    }

    assert_eq!(world.hidden_target, 17);
    for a in &world.agents {
        let brain = &a.genotype.brain;
        assert_eq!(brain.hidden_count, 17);
        assert!(brain.is_well_formed());
        assert!(brain
            .weights_ih
            .iter()
            .chain(&brain.bias_h)
            .chain(&brain.weights_ho)
            .chain(&brain.bias_o)
            .all(|w| w.is_finite()));
    }
}

#[test]
fn test_growth_stops_at_max_hidden() {
    let mut world = WorldBuilder::new()
        .with_config(|c| {
            c.brain.growth_interval = 1;
            c.brain.growth_step = 10;
            c.brain.max_hidden = 20;
        })
        .build();

    for _ in 0..4 {
        world.force_end_generation();
    }
    assert_eq!(world.hidden_target, 20);
    assert!(world.agents.iter().all(|a| a.genotype.brain.hidden_count == 20));
}
