pub use genesis_data::BiomeKind;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::config::WorldConfig;

/// Static properties of a biome.
pub trait BiomeLogic {
    /// Multiplier on metabolic energy decay while standing in the biome.
    fn movement_cost_multiplier(&self) -> f64;
    /// Per-attempt acceptance chance for food placement, before the spawn multiplier.
    fn food_spawn_chance(&self) -> f64;
    /// Fitness contribution for ending a generation here.
    fn base_adaptation_score(&self) -> f64;
    fn is_hazardous(&self) -> bool;
    fn optimal_temperature_range(&self) -> (f32, f32);
    fn color(&self) -> &'static str;
    fn name(&self) -> &'static str;
}

impl BiomeLogic for BiomeKind {
    fn movement_cost_multiplier(&self) -> f64 {
        match self {
            BiomeKind::Grassland => 1.0,
            BiomeKind::Desert => 1.2,
            BiomeKind::Water => 1.5,
            BiomeKind::Forest => 1.1,
            BiomeKind::Mountain => 1.8,
            BiomeKind::Volcanic => 1.6,
        }
    }

    fn food_spawn_chance(&self) -> f64 {
        match self {
            BiomeKind::Grassland => 0.005,
            BiomeKind::Desert => 0.002,
            BiomeKind::Water => 0.008,
            BiomeKind::Forest => 0.006,
            BiomeKind::Mountain => 0.001,
            BiomeKind::Volcanic => 0.001,
        }
    }

    fn base_adaptation_score(&self) -> f64 {
        match self {
            BiomeKind::Grassland => 1.0,
            BiomeKind::Desert => 0.8,
            BiomeKind::Water => 1.2,
            BiomeKind::Forest => 1.1,
            BiomeKind::Mountain => 0.7,
            BiomeKind::Volcanic => 0.5,
        }
    }

    fn is_hazardous(&self) -> bool {
        matches!(self, BiomeKind::Volcanic)
    }

    fn optimal_temperature_range(&self) -> (f32, f32) {
        match self {
            BiomeKind::Grassland => (0.3, 0.7),
            BiomeKind::Desert => (0.6, 1.0),
            BiomeKind::Water => (0.2, 0.6),
            BiomeKind::Forest => (0.3, 0.6),
            BiomeKind::Mountain => (0.0, 0.4),
            BiomeKind::Volcanic => (0.7, 1.0),
        }
    }

    fn color(&self) -> &'static str {
        match self {
            BiomeKind::Grassland => "#558B2F",
            BiomeKind::Desert => "#FFCC80",
            BiomeKind::Water => "#42A5F5",
            BiomeKind::Forest => "#2E7D32",
            BiomeKind::Mountain => "#757575",
            BiomeKind::Volcanic => "#BF360C",
        }
    }

    fn name(&self) -> &'static str {
        match self {
            BiomeKind::Grassland => "Grassland",
            BiomeKind::Desert => "Desert",
            BiomeKind::Water => "Water",
            BiomeKind::Forest => "Forest",
            BiomeKind::Mountain => "Mountain",
            BiomeKind::Volcanic => "Volcanic",
        }
    }
}

/// Coarse grid of biome cells covering the world. Read-only during a tick.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BiomeGrid {
    pub cols: usize,
    pub rows: usize,
    pub cell_width: f64,
    pub cell_height: f64,
    cells: Vec<BiomeKind>,
}

impl BiomeGrid {
    /// Grid with every cell set to `kind`.
    #[must_use]
    pub fn uniform(config: &WorldConfig, kind: BiomeKind) -> Self {
        let cols = config.biome_grid_x.max(1);
        let rows = config.biome_grid_y.max(1);
        Self {
            cols,
            rows,
            cell_width: config.width / cols as f64,
            cell_height: config.height / rows as f64,
            cells: vec![kind; cols * rows],
        }
    }

    /// Grid with every cell drawn uniformly from the catalog.
    pub fn new_random_with_rng<R: Rng>(config: &WorldConfig, rng: &mut R) -> Self {
        let mut grid = Self::uniform(config, BiomeKind::default());
        for cell in &mut grid.cells {
            *cell = BiomeKind::from_index(rng.gen_range(0..BiomeKind::COUNT));
        }
        grid
    }

    pub fn set(&mut self, col: usize, row: usize, kind: BiomeKind) {
        if col < self.cols && row < self.rows {
            self.cells[row * self.cols + col] = kind;
        }
    }

    #[must_use]
    pub fn get(&self, col: usize, row: usize) -> BiomeKind {
        let col = col.min(self.cols - 1);
        let row = row.min(self.rows - 1);
        self.cells[row * self.cols + col]
    }

    /// Cell coordinates for a world position, clamped into the grid.
    #[must_use]
    pub fn cell_at(&self, x: f64, y: f64) -> (usize, usize) {
        let col = (x / self.cell_width).floor().max(0.0) as usize;
        let row = (y / self.cell_height).floor().max(0.0) as usize;
        (col.min(self.cols - 1), row.min(self.rows - 1))
    }

    #[must_use]
    pub fn biome_at(&self, x: f64, y: f64) -> BiomeKind {
        let (col, row) = self.cell_at(x, y);
        self.get(col, row)
    }

    pub fn cells(&self) -> impl Iterator<Item = (usize, usize, BiomeKind)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, kind)| (i % self.cols, i / self.cols, *kind))
    }
}
