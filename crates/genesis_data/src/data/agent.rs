use super::genotype::Genotype;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use uuid::Uuid;

/// Why an agent stopped living.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DeathCause {
    OldAge,
    Starvation,
    Predation,
}

impl DeathCause {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            DeathCause::OldAge => "old_age",
            DeathCause::Starvation => "starvation",
            DeathCause::Predation => "predation",
        }
    }
}

/// Unique identification of an agent.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Identity {
    pub id: Uuid,
    pub parent_ids: Option<(Uuid, Uuid)>,
    /// Generation the agent was spawned in.
    pub generation: u32,
}

/// Position and motion state.
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct Physics {
    pub x: f64,
    pub y: f64,
    /// Heading in radians, kept in `[0, 2π)`.
    pub heading: f64,
    pub speed: f64,
    #[serde(skip)]
    pub trail: VecDeque<(f64, f64)>,
}

/// Energy, age and the life flag.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Vitals {
    pub energy: f64,
    pub age: u64,
    /// Ticks remaining before the agent may mate again.
    pub reproduction_cooldown: u32,
    pub is_alive: bool,
    pub death_cause: Option<DeathCause>,
}

/// Per-generation performance counters used for fitness.
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct Record {
    pub food_eaten: u32,
    pub wall_hits: u32,
    pub kills: u32,
    pub matings: u32,
    /// Last computed fitness.
    pub fitness: f64,
}

/// A complete simulated creature.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Agent {
    #[serde(flatten)]
    pub identity: Identity,
    pub physics: Physics,
    pub vitals: Vitals,
    pub record: Record,
    pub genotype: Genotype,
}

impl Agent {
    #[must_use]
    pub fn id(&self) -> Uuid {
        self.identity.id
    }

    #[must_use]
    pub fn is_alive(&self) -> bool {
        self.vitals.is_alive
    }

    /// Squared distance to a point.
    #[must_use]
    pub fn distance_sq_to(&self, x: f64, y: f64) -> f64 {
        let dx = self.physics.x - x;
        let dy = self.physics.y - y;
        dx * dx + dy * dy
    }
}
