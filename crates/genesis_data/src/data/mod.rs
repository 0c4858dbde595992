//! Core data structures for the Genesis simulation.

pub mod agent;
pub mod environment;
pub mod genotype;
