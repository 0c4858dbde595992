pub mod action;
pub mod evolution;
pub mod interaction;
pub mod perception;
pub mod stats;
