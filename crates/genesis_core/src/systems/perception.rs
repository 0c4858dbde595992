use crate::biome::{BiomeGrid, BiomeLogic};
use crate::brain::{BrainLogic, BRAIN_INPUTS};
use crate::config::AppConfig;
use crate::environment::Environment;
use crate::error::Result;
use crate::snapshot::AgentView;
use genesis_data::{Agent, BiomeKind, Food};
use std::f64::consts::TAU;

/// Shared read-only state for sensing and moving during one tick.
pub struct TickContext<'a> {
    pub config: &'a AppConfig,
    pub grid: &'a BiomeGrid,
    pub env: &'a Environment,
    pub food: &'a [Food],
    pub views: &'a [AgentView],
}

/// Brain outputs scaled to actions.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Decision {
    pub turn_rate: f64,
    pub speed_adjustment: f64,
}

/// Wraps an angle into `[0, 2π)`.
#[must_use]
pub fn normalize_angle(angle: f64) -> f64 {
    let a = angle.rem_euclid(TAU);
    if a >= TAU {
        0.0
    } else {
        a
    }
}

/// Relative bearing and closeness of a target, both in `[0, 1]`.
fn bearing(agent: &Agent, tx: f64, ty: f64, dist: f64, range: f64) -> (f32, f32) {
    let angle = (ty - agent.physics.y).atan2(tx - agent.physics.x);
    let relative = normalize_angle(angle - agent.physics.heading) / TAU;
    let closeness = if range > 0.0 {
        (1.0 - dist / range).clamp(0.0, 1.0)
    } else {
        0.0
    };
    (relative as f32, closeness as f32)
}

fn nearest_within<I>(candidates: I, range: f64) -> Option<(f64, f64, f64)>
where
    I: Iterator<Item = (f64, f64, f64)>,
{
    let range_sq = range * range;
    candidates
        .filter(|(_, _, d_sq)| *d_sq <= range_sq)
        .min_by(|a, b| a.2.total_cmp(&b.2))
        .map(|(x, y, d_sq)| (x, y, d_sq.sqrt()))
}

/// Builds the normalized sensing vector of agent `idx`.
#[must_use]
pub fn sense(idx: usize, agent: &Agent, ctx: &TickContext) -> [f32; BRAIN_INPUTS] {
    let config = ctx.config;
    let traits = &agent.genotype.traits;
    let (ax, ay) = (agent.physics.x, agent.physics.y);
    let range = traits.vision_range + traits.sensory_range;
    let max_biome = (BiomeKind::COUNT - 1).max(1) as f32;

    let food = nearest_within(
        ctx.food
            .iter()
            .filter(|f| traits.diet.eats(f.kind))
            .map(|f| (f.x, f.y, agent.distance_sq_to(f.x, f.y))),
        range,
    );
    let (food_angle, food_dist) = match food {
        Some((x, y, d)) => bearing(agent, x, y, d, range),
        None => (0.5, 0.0),
    };

    let other = nearest_within(
        ctx.views
            .iter()
            .enumerate()
            .filter(|(j, v)| *j != idx && v.is_alive)
            .map(|(_, v)| (v.x, v.y, v.distance_sq(ax, ay))),
        range,
    );
    let (agent_angle, agent_dist) = match other {
        Some((x, y, d)) => bearing(agent, x, y, d, range),
        None => (0.5, 0.0),
    };

    let w = config.world.width;
    let h = config.world.height;
    let energy =
        (agent.vitals.energy / (config.metabolism.reproduction_threshold * 2.0)).clamp(0.0, 1.0);
    let wall_x = (ax.min(w - ax) / (w / 2.0)).clamp(0.0, 1.0);
    let wall_y = (ay.min(h - ay) / (h / 2.0)).clamp(0.0, 1.0);
    let biome = ctx.grid.biome_at(ax, ay);
    let vision = config.traits.vision_range.normalize(traits.vision_range);
    let sensory = config.traits.sensory_range.normalize(traits.sensory_range);
    let age_ratio = if traits.lifespan > 0 {
        (agent.vitals.age as f64 / traits.lifespan as f64).clamp(0.0, 1.0)
    } else {
        1.0
    };

    [
        food_angle,
        food_dist,
        energy as f32,
        wall_x as f32,
        wall_y as f32,
        biome.index() as f32 / max_biome,
        vision as f32,
        agent_angle,
        agent_dist,
        (traits.biome_preference as f32 / max_biome).clamp(0.0, 1.0),
        age_ratio as f32,
        traits.diet.as_input(),
        sensory as f32,
        ctx.env.temperature,
        if biome.is_hazardous() { 1.0 } else { 0.0 },
    ]
}

/// Runs the brain and scales tanh outputs to the configured action limits.
pub fn think(agent: &Agent, inputs: &[f32], config: &AppConfig) -> Result<Decision> {
    let outputs = agent.genotype.brain.feed_forward(inputs)?;
    let out = |k: usize| f64::from(outputs.get(k).copied().unwrap_or(0.0));
    Ok(Decision {
        turn_rate: out(0) * config.movement.max_turn_rate,
        speed_adjustment: out(1) * config.movement.max_speed_adjustment,
    })
}
