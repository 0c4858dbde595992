use super::perception::{normalize_angle, sense, think, Decision, TickContext};
use crate::biome::BiomeLogic;
use crate::config::AppConfig;
use crate::error::Result;
use crate::lifecycle::push_trail;
use genesis_data::{Agent, BiomeKind};
use std::f64::consts::PI;

/// Passive energy loss for one tick in `biome` at `temperature`.
#[must_use]
pub fn energy_decay(agent: &Agent, biome: BiomeKind, temperature: f32, config: &AppConfig) -> f64 {
    let m = &config.metabolism;
    let traits = &agent.genotype.traits;
    let mut decay = m.base_decay_rate * traits.metabolism_rate * biome.movement_cost_multiplier();
    decay += f64::from((temperature - traits.optimal_temperature).abs())
        * m.temperature_effect_multiplier;
    if biome.is_hazardous() {
        decay += m.hazard_drain;
    }
    decay
}

/// Applies a decision: turn, set speed around the base speed, advance.
pub fn apply_movement(agent: &mut Agent, decision: Decision, config: &AppConfig) {
    let base = agent.genotype.traits.base_speed;
    let mv = &config.movement;
    let physics = &mut agent.physics;
    physics.heading = normalize_angle(physics.heading + decision.turn_rate);
    physics.speed = (base + decision.speed_adjustment)
        .clamp(base * mv.min_speed_factor, base * mv.max_speed_factor);
    physics.x += physics.heading.cos() * physics.speed;
    physics.y += physics.heading.sin() * physics.speed;
}

/// Reflects off and clamps inside the world bounds.
///
/// An x-wall maps the heading to `π - h`, a y-wall to `-h`. Each hit costs the
/// wall penalty once per tick and counts towards the fitness penalty.
pub fn resolve_walls(agent: &mut Agent, config: &AppConfig) -> bool {
    let size = agent.genotype.traits.size;
    let w = config.world.width;
    let h = config.world.height;
    let physics = &mut agent.physics;
    let mut hit = false;

    if physics.x < size {
        physics.x = size;
        physics.heading = PI - physics.heading;
        hit = true;
    } else if physics.x > w - size {
        physics.x = w - size;
        physics.heading = PI - physics.heading;
        hit = true;
    }
    if physics.y < size {
        physics.y = size;
        physics.heading = -physics.heading;
        hit = true;
    } else if physics.y > h - size {
        physics.y = h - size;
        physics.heading = -physics.heading;
        hit = true;
    }

    if hit {
        physics.heading = normalize_angle(physics.heading);
        agent.vitals.energy -= config.metabolism.wall_hit_penalty;
        agent.record.wall_hits += 1;
    }
    hit
}

/// Solo part of an agent's tick: ageing, metabolism, sensing, thinking,
/// moving and wall handling. Dead agents are left untouched.
pub fn update_agent(idx: usize, agent: &mut Agent, ctx: &TickContext) -> Result<()> {
    if !agent.vitals.is_alive {
        return Ok(());
    }
    let config = ctx.config;

    agent.vitals.age += 1;
    agent.vitals.reproduction_cooldown = agent.vitals.reproduction_cooldown.saturating_sub(1);

    let biome = ctx.grid.biome_at(agent.physics.x, agent.physics.y);
    agent.vitals.energy -= energy_decay(agent, biome, ctx.env.temperature, config);

    let inputs = sense(idx, agent, ctx);
    let decision = think(agent, &inputs, config)?;
    apply_movement(agent, decision, config);
    resolve_walls(agent, config);
    push_trail(&mut agent.physics, config.visual.trail_length);

    Ok(())
}
