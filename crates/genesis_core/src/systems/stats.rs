use genesis_data::{Agent, Diet, GenerationStats};

fn mean<F>(agents: &[Agent], f: F) -> f64
where
    F: Fn(&Agent) -> f64,
{
    if agents.is_empty() {
        return 0.0;
    }
    agents.iter().map(f).sum::<f64>() / agents.len() as f64
}

/// Aggregates an evaluated generation for charts.
///
/// Fitness comes from `record.fitness`, so `evolution::evaluate_fitness` must
/// run first. Trait averages cover the whole generation, dead or alive.
#[must_use]
pub fn generation_stats(
    agents: &[Agent],
    generation: u32,
    hidden_nodes: usize,
    restarted: bool,
) -> GenerationStats {
    let n = agents.len();
    let mut stats = GenerationStats {
        generation,
        population: n,
        alive: agents.iter().filter(|a| a.is_alive()).count(),
        hidden_nodes,
        restarted,
        ..GenerationStats::default()
    };
    if n == 0 {
        return stats;
    }

    stats.avg_fitness = mean(agents, |a| a.record.fitness);
    stats.best_fitness = agents
        .iter()
        .map(|a| a.record.fitness)
        .fold(0.0, f64::max);
    stats.avg_speed = mean(agents, |a| a.genotype.traits.base_speed);
    stats.avg_size = mean(agents, |a| a.genotype.traits.size);
    stats.avg_food_eaten = mean(agents, |a| f64::from(a.record.food_eaten));
    stats.avg_vision_range = mean(agents, |a| a.genotype.traits.vision_range);
    stats.avg_lifespan = mean(agents, |a| a.genotype.traits.lifespan as f64);
    stats.avg_biome_preference = mean(agents, |a| a.genotype.traits.biome_preference as f64);
    stats.avg_attack_power = mean(agents, |a| a.genotype.traits.attack_power);
    stats.avg_defense = mean(agents, |a| a.genotype.traits.defense);
    stats.avg_metabolism_rate = mean(agents, |a| a.genotype.traits.metabolism_rate);
    stats.avg_clutch_size = mean(agents, |a| f64::from(a.genotype.traits.clutch_size));
    stats.avg_sensory_range = mean(agents, |a| a.genotype.traits.sensory_range);
    stats.avg_optimal_temperature =
        mean(agents, |a| f64::from(a.genotype.traits.optimal_temperature));
    stats.carnivore_fraction = mean(agents, |a| {
        if a.genotype.traits.diet == Diet::Carnivore {
            1.0
        } else {
            0.0
        }
    });
    stats
}
