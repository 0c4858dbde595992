use super::environment::FoodKind;
use serde::{Deserialize, Serialize};

/// Feed-forward brain with a single hidden layer.
///
/// Weight matrices are stored row-major so that a brain can be resized by
/// copying overlapping `(row, col)` positions into a freshly allocated vector.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Brain {
    /// Number of sensory inputs.
    pub input_count: usize,
    /// Number of hidden units (may be zero).
    pub hidden_count: usize,
    /// Number of action outputs.
    pub output_count: usize,
    /// Input→hidden weights, `input_count × hidden_count`.
    pub weights_ih: Vec<f32>,
    /// Hidden biases, `hidden_count`.
    pub bias_h: Vec<f32>,
    /// Hidden→output weights, `hidden_count × output_count`.
    pub weights_ho: Vec<f32>,
    /// Output biases, `output_count`.
    pub bias_o: Vec<f32>,
}

impl Brain {
    /// A brain whose every weight and bias is zero.
    #[must_use]
    pub fn zeroed(input_count: usize, hidden_count: usize, output_count: usize) -> Self {
        Self {
            input_count,
            hidden_count,
            output_count,
            weights_ih: vec![0.0; input_count * hidden_count],
            bias_h: vec![0.0; hidden_count],
            weights_ho: vec![0.0; hidden_count * output_count],
            bias_o: vec![0.0; output_count],
        }
    }

    /// Total number of genes (weights plus biases).
    #[must_use]
    pub fn gene_count(&self) -> usize {
        self.weights_ih.len() + self.bias_h.len() + self.weights_ho.len() + self.bias_o.len()
    }

    /// True when every vector length agrees with the declared counts.
    #[must_use]
    pub fn is_well_formed(&self) -> bool {
        self.weights_ih.len() == self.input_count * self.hidden_count
            && self.bias_h.len() == self.hidden_count
            && self.weights_ho.len() == self.hidden_count * self.output_count
            && self.bias_o.len() == self.output_count
    }
}

/// Feeding strategy of an agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Diet {
    #[default]
    Herbivore,
    Carnivore,
}

impl Diet {
    #[must_use]
    pub fn flipped(self) -> Self {
        match self {
            Diet::Herbivore => Diet::Carnivore,
            Diet::Carnivore => Diet::Herbivore,
        }
    }

    /// Whether food of `kind` counts as edible for this diet.
    #[must_use]
    pub fn eats(self, kind: FoodKind) -> bool {
        matches!(
            (self, kind),
            (Diet::Herbivore, FoodKind::Plant) | (Diet::Carnivore, FoodKind::Meat)
        )
    }

    /// Normalized value fed to the brain.
    #[must_use]
    pub fn as_input(self) -> f32 {
        match self {
            Diet::Herbivore => 0.0,
            Diet::Carnivore => 1.0,
        }
    }
}

/// Display color. Purely cosmetic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    #[must_use]
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl Default for Color {
    fn default() -> Self {
        Self {
            r: 100,
            g: 200,
            b: 100,
        }
    }
}

/// Heritable phenotype of an agent.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Traits {
    pub base_speed: f64,
    pub size: f64,
    pub vision_range: f64,
    pub sensory_range: f64,
    /// Maximum age in ticks.
    pub lifespan: u64,
    /// Index into the biome catalog.
    pub biome_preference: usize,
    pub diet: Diet,
    pub attack_power: f64,
    pub defense: f64,
    pub metabolism_rate: f64,
    /// Ticks an agent must wait between matings.
    pub reproduction_cooldown: u32,
    pub clutch_size: u32,
    pub optimal_temperature: f32,
    pub color: Color,
}

/// Everything an agent passes on: its brain and its traits.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Genotype {
    pub brain: Brain,
    pub traits: Traits,
}
