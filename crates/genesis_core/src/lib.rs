//! # Genesis Core
//!
//! The deterministic engine of Genesis, an evolutionary simulation of small
//! creatures driven by neural-network brains.
//!
//! This crate contains:
//! - Feed-forward brains with a variable-width hidden layer
//! - Heritable trait operators and genome encoding
//! - The fitness function
//! - Per-tick systems (Perception, Action, Interaction)
//! - Generation-end selection, breeding and hidden-layer growth
//! - Configuration, errors, metrics and structured logging
//!
//! ## Architecture
//!
//! - **Component-based agents**: Identity, Physics, Vitals and Record
//!   components carried by each `Agent`
//! - **Two-phase ticks**: agents move in parallel against a frozen view of
//!   the population, then interactions are committed in agent order
//! - **Deterministic simulation**: every random operation takes a seeded RNG
//!
//! ## Example
//!
//! ```
//! use genesis_core::brain::{BrainLogic, BRAIN_INPUTS};
//! use genesis_data::Brain;
//! use rand::SeedableRng;
//! use rand_chacha::ChaCha8Rng;
//!
//! let mut rng = ChaCha8Rng::seed_from_u64(42);
//! let brain = Brain::new_random_with_rng(8, &mut rng);
//!
//! let outputs = brain.feed_forward(&[0.5; BRAIN_INPUTS]).unwrap();
//! assert_eq!(outputs.len(), 2);
//! ```

/// Biome catalog and the world's biome grid
pub mod biome;
/// Feed-forward brain: inference, mutation, crossover, resizing
pub mod brain;
/// Configuration management for simulation parameters
pub mod config;
/// Global temperature signal
pub mod environment;
/// Error types
pub mod error;
/// Fitness evaluation
pub mod fitness;
/// Food spawning and meat deposits
pub mod food;
/// Trait mutation operators and genome encoding
pub mod genetics;
/// Commands produced by the interaction phase
pub mod interaction;
/// Agent lifecycle management (spawn, elite cloning, death)
pub mod lifecycle;
/// Performance metrics collection and logging
pub mod metrics;
/// Agent views and render snapshots
pub mod snapshot;
/// Per-tick and per-generation systems
pub mod systems;

pub use biome::{BiomeGrid, BiomeLogic};
pub use brain::{BrainLogic, MutationParams};
pub use error::SimError;
pub use genetics::GenotypeLogic;
pub use metrics::{init_logging, Metrics};
