use genesis_data::{Agent, Diet, Food, GenerationStats};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Frozen per-agent state read by other agents during a tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AgentView {
    pub x: f64,
    pub y: f64,
    pub size: f64,
    pub diet: Diet,
    pub energy: f64,
    pub attack_power: f64,
    pub defense: f64,
    pub is_alive: bool,
    pub ready_to_mate: bool,
}

impl AgentView {
    #[must_use]
    pub fn of(agent: &Agent, reproduction_threshold: f64) -> Self {
        Self {
            x: agent.physics.x,
            y: agent.physics.y,
            size: agent.genotype.traits.size,
            diet: agent.genotype.traits.diet,
            energy: agent.vitals.energy,
            attack_power: agent.genotype.traits.attack_power,
            defense: agent.genotype.traits.defense,
            is_alive: agent.vitals.is_alive,
            ready_to_mate: agent.vitals.is_alive
                && agent.vitals.reproduction_cooldown == 0
                && agent.vitals.energy >= reproduction_threshold,
        }
    }

    #[must_use]
    pub fn distance_sq(&self, x: f64, y: f64) -> f64 {
        let dx = self.x - x;
        let dy = self.y - y;
        dx * dx + dy * dy
    }
}

/// Read-only state of one agent for renderers.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct AgentSnapshot {
    pub id: Uuid,
    pub generation: u32,
    pub x: f64,
    pub y: f64,
    pub heading: f64,
    pub speed: f64,
    pub size: f64,
    pub color: String,
    pub diet: Diet,
    pub energy: f64,
    pub age: u64,
    pub lifespan: u64,
    pub food_eaten: u32,
    pub wall_hits: u32,
    pub hidden_nodes: usize,
    pub alive: bool,
    /// Fitness of the current state; zero for dead agents.
    pub fitness: f64,
    pub trail: Vec<(f64, f64)>,
}

impl AgentSnapshot {
    #[must_use]
    pub fn of(agent: &Agent, fitness: f64) -> Self {
        Self {
            id: agent.id(),
            generation: agent.identity.generation,
            x: agent.physics.x,
            y: agent.physics.y,
            heading: agent.physics.heading,
            speed: agent.physics.speed,
            size: agent.genotype.traits.size,
            color: agent.genotype.traits.color.to_hex(),
            diet: agent.genotype.traits.diet,
            energy: agent.vitals.energy,
            age: agent.vitals.age,
            lifespan: agent.genotype.traits.lifespan,
            food_eaten: agent.record.food_eaten,
            wall_hits: agent.record.wall_hits,
            hidden_nodes: agent.genotype.brain.hidden_count,
            alive: agent.vitals.is_alive,
            fitness,
            trail: agent.physics.trail.iter().copied().collect(),
        }
    }
}

/// Everything a renderer needs for one frame.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct WorldSnapshot {
    pub tick: u64,
    pub generation: u32,
    pub agents: Vec<AgentSnapshot>,
    pub food: Vec<Food>,
    pub temperature: f32,
    pub best_agent: Option<Uuid>,
    /// Fraction of the generation elapsed under the active end mode.
    pub progress: f64,
    pub paused: bool,
    pub hidden_nodes: usize,
    pub last_stats: Option<GenerationStats>,
}

impl WorldSnapshot {
    #[must_use]
    pub fn alive_count(&self) -> usize {
        self.agents.iter().filter(|a| a.alive).count()
    }

    #[must_use]
    pub fn best(&self) -> Option<&AgentSnapshot> {
        let id = self.best_agent?;
        self.agents.iter().find(|a| a.id == id)
    }
}
