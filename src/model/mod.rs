pub use genesis_core::{BiomeLogic, BrainLogic, GenotypeLogic};
pub mod biome {
    pub use genesis_core::biome::*;
}
pub mod brain {
    pub use genesis_core::brain::*;
}
pub mod config {
    pub use genesis_core::config::*;
}
pub mod environment {
    pub use genesis_core::environment::*;
}
pub mod food {
    pub use genesis_core::food::*;
}
pub mod lifecycle {
    pub use genesis_core::lifecycle::*;
}
pub mod snapshot {
    pub use genesis_core::snapshot::*;
}
pub mod state {
    pub use genesis_data::*;
}

pub mod history;
pub mod world;
