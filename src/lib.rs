//! # Genesis
//!
//! Headless driver for the Genesis evolutionary simulation. The engine lives
//! in `genesis_core`; this crate owns the generation loop (`World`), the
//! statistics history handed to charts, and the `genesis` binary.

pub mod model;

pub use model::history::GenerationHistory;
pub use model::world::World;
