use crate::model::history::GenerationHistory;
use genesis_core::biome::BiomeGrid;
use genesis_core::brain::MutationParams;
use genesis_core::config::{AppConfig, GenerationEndMode};
use genesis_core::environment::Environment;
use genesis_core::metrics::Metrics;
use genesis_data::{Agent, Food, GenerationStats};
use rand_chacha::ChaCha8Rng;
use std::time::Instant;
use uuid::Uuid;

pub mod control;
pub mod finalize;
pub mod init;
pub mod update;

/// The generation engine.
///
/// Owns the population, the food list, the biome grid and the temperature
/// signal. Each call to [`World::update`] advances one tick; when the active
/// end condition fires the population is scored and replaced by the next
/// generation within the same call.
pub struct World {
    pub config: AppConfig,
    pub grid: BiomeGrid,
    pub env: Environment,
    pub food: Vec<Food>,
    pub agents: Vec<Agent>,
    /// Ticks since the current generation started.
    pub tick: u64,
    /// Ticks since the world was created or reset; drives the temperature.
    pub total_ticks: u64,
    pub generation: u32,
    /// Hidden-layer size used for breeding and resizing elites.
    pub hidden_target: usize,
    pub food_target: usize,
    pub paused: bool,
    pub history: GenerationHistory,
    pub last_stats: Option<GenerationStats>,
    pub metrics: Metrics,
    params: MutationParams,
    generation_start: Instant,
    rng: ChaCha8Rng,
}

impl World {
    #[must_use]
    pub fn alive_count(&self) -> usize {
        self.agents.iter().filter(|a| a.is_alive()).count()
    }

    #[must_use]
    pub fn dead_count(&self) -> usize {
        self.agents.len() - self.alive_count()
    }

    #[must_use]
    pub fn agent(&self, id: Uuid) -> Option<&Agent> {
        self.agents.iter().find(|a| a.id() == id)
    }

    #[must_use]
    pub fn mutation_params(&self) -> &MutationParams {
        &self.params
    }

    #[must_use]
    pub fn generation_end_mode(&self) -> GenerationEndMode {
        self.config.evolution.generation_end
    }

    /// Whether the active end condition holds at `now`.
    ///
    /// Majority mode: more than half the population has died, or all of it.
    /// Fixed-time mode: the configured duration has elapsed since the
    /// generation started.
    #[must_use]
    pub fn generation_should_end(&self, now: Instant) -> bool {
        match self.config.evolution.generation_end {
            GenerationEndMode::MajorityMaxAge => {
                let dead = self.dead_count();
                dead * 2 > self.agents.len() || dead == self.agents.len()
            }
            GenerationEndMode::FixedTime { seconds } => {
                now.saturating_duration_since(self.generation_start).as_secs_f64() >= seconds
            }
        }
    }

    /// Fraction of the current generation elapsed, in `[0, 1]`.
    #[must_use]
    pub fn progress_at(&self, now: Instant) -> f64 {
        let fraction = match self.config.evolution.generation_end {
            GenerationEndMode::MajorityMaxAge => {
                if self.agents.is_empty() {
                    1.0
                } else {
                    self.dead_count() as f64 / self.agents.len() as f64
                }
            }
            GenerationEndMode::FixedTime { seconds } => {
                if seconds > 0.0 {
                    now.saturating_duration_since(self.generation_start).as_secs_f64() / seconds
                } else {
                    1.0
                }
            }
        };
        fraction.clamp(0.0, 1.0)
    }

    #[must_use]
    pub fn progress(&self) -> f64 {
        self.progress_at(Instant::now())
    }
}
