//! Plain data types shared by the Genesis engine, CLI and tests.
//!
//! Nothing in this crate carries behaviour beyond trivial accessors; the
//! simulation logic lives in `genesis_core` as extension traits over these
//! types.

pub mod data;

pub use data::agent::{Agent, DeathCause, Identity, Physics, Record, Vitals};
pub use data::environment::{BiomeKind, Food, FoodKind, GenerationStats, LiveEvent};
pub use data::genotype::{Brain, Color, Diet, Genotype, Traits};
