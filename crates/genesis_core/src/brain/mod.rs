pub mod crossover;
pub mod forward;
pub mod mutation;
pub mod topology;

use crate::error::Result;
pub use genesis_data::Brain;
use rand::Rng;

pub use mutation::MutationParams;
pub use topology::{create_brain_random_with_rng, GeneSlot};

/// Trait defining the core logic for neural network brains in Genesis.
pub trait BrainLogic {
    fn new_random(hidden_count: usize) -> Self;
    fn new_random_with_rng<R: Rng>(hidden_count: usize, rng: &mut R) -> Self;

    fn feed_forward(&self, inputs: &[f32]) -> Result<Vec<f32>>;

    fn clone_and_mutate_with_rng<R: Rng>(
        &self,
        parent_fitness: f64,
        params: &MutationParams,
        target_hidden: usize,
        rng: &mut R,
    ) -> Brain;

    fn crossover_with_rng<R: Rng>(&self, other: &Brain, target_hidden: usize, rng: &mut R)
        -> Brain;
    fn crossover(&self, other: &Brain, target_hidden: usize) -> Brain;

    fn resized_with_rng<R: Rng>(&self, target_hidden: usize, rng: &mut R) -> Brain;

    fn validate(&self) -> Result<()>;
}

pub const INPUT_LABELS: [&str; 15] = [
    "FoodAngle",
    "FoodDist",
    "Energy",
    "WallX",
    "WallY",
    "Biome",
    "Vision",
    "AgentAngle",
    "AgentDist",
    "BiomePref",
    "AgeRatio",
    "Diet",
    "Sensory",
    "Temperature",
    "Hazard",
];

pub const OUTPUT_LABELS: [&str; 2] = ["TurnRate", "SpeedAdj"];

pub const BRAIN_INPUTS: usize = INPUT_LABELS.len();
pub const BRAIN_OUTPUTS: usize = OUTPUT_LABELS.len();

impl BrainLogic for Brain {
    fn new_random(hidden_count: usize) -> Self {
        let mut rng = rand::thread_rng();
        Self::new_random_with_rng(hidden_count, &mut rng)
    }

    fn new_random_with_rng<R: Rng>(hidden_count: usize, rng: &mut R) -> Self {
        topology::create_brain_random_with_rng(BRAIN_INPUTS, hidden_count, BRAIN_OUTPUTS, rng)
    }

    fn feed_forward(&self, inputs: &[f32]) -> Result<Vec<f32>> {
        forward::feed_forward(self, inputs)
    }

    fn clone_and_mutate_with_rng<R: Rng>(
        &self,
        parent_fitness: f64,
        params: &MutationParams,
        target_hidden: usize,
        rng: &mut R,
    ) -> Brain {
        mutation::clone_and_mutate_with_rng(self, parent_fitness, params, target_hidden, rng)
    }

    fn crossover_with_rng<R: Rng>(
        &self,
        other: &Brain,
        target_hidden: usize,
        rng: &mut R,
    ) -> Brain {
        crossover::brain_crossover_with_rng(self, other, target_hidden, rng)
    }

    fn crossover(&self, other: &Brain, target_hidden: usize) -> Brain {
        let mut rng = rand::thread_rng();
        self.crossover_with_rng(other, target_hidden, &mut rng)
    }

    fn resized_with_rng<R: Rng>(&self, target_hidden: usize, rng: &mut R) -> Brain {
        topology::resized_with_rng(self, target_hidden, rng)
    }

    fn validate(&self) -> Result<()> {
        topology::check_shape(self)
    }
}
