use super::topology::{build_brain, gene_at, random_gene};
use crate::config::AppConfig;
use genesis_data::Brain;
use rand::Rng;

/// Knobs for brain mutation, resolved from config plus runtime overrides.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MutationParams {
    pub rate: f32,
    pub strength: f32,
    pub fine_tune_fitness: f64,
    pub fine_tune_scale: f32,
    pub explore_fitness: f64,
    pub explore_scale: f32,
    pub min_hidden: usize,
    pub max_hidden: usize,
}

impl MutationParams {
    #[must_use]
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            rate: config.evolution.mutation_rate,
            strength: config.evolution.mutation_strength,
            fine_tune_fitness: config.evolution.fine_tune_fitness,
            fine_tune_scale: config.evolution.fine_tune_scale,
            explore_fitness: config.evolution.explore_fitness,
            explore_scale: config.evolution.explore_scale,
            min_hidden: config.brain.min_hidden,
            max_hidden: config.brain.max_hidden,
        }
    }

    #[must_use]
    pub fn with_rate(mut self, rate: f32) -> Self {
        self.rate = rate;
        self
    }

    #[must_use]
    pub fn with_strength(mut self, strength: f32) -> Self {
        self.strength = strength;
        self
    }

    /// Strength scaled down for fit parents and up for weak ones.
    #[must_use]
    pub fn effective_strength(&self, parent_fitness: f64) -> f32 {
        if parent_fitness > self.fine_tune_fitness {
            self.strength * self.fine_tune_scale
        } else if parent_fitness < self.explore_fitness {
            self.strength * self.explore_scale
        } else {
            self.strength
        }
    }

    #[must_use]
    pub fn clamp_hidden(&self, target: usize) -> usize {
        target.clamp(self.min_hidden, self.max_hidden.max(self.min_hidden))
    }
}

impl Default for MutationParams {
    fn default() -> Self {
        Self::from_config(&AppConfig::default())
    }
}

/// Child brain of `target_hidden` units derived from `parent`.
///
/// Every position rolls against `rate`; on success it is shifted uniformly
/// within `±effective_strength`. Positions the parent lacks start from a
/// fresh `[-1, 1]` value and take the same roll.
pub fn clone_and_mutate_with_rng<R: Rng>(
    parent: &Brain,
    parent_fitness: f64,
    params: &MutationParams,
    target_hidden: usize,
    rng: &mut R,
) -> Brain {
    let target = params.clamp_hidden(target_hidden);
    let strength = params.effective_strength(parent_fitness);
    let rate = params.rate;

    build_brain(parent.input_count, target, parent.output_count, |slot| {
        let base = match gene_at(parent, slot) {
            Some(v) => v,
            None => random_gene(rng),
        };
        if rng.gen::<f32>() < rate && strength > 0.0 {
            base + rng.gen_range(-strength..=strength)
        } else {
            base
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::brain::topology::{create_brain_random_with_rng, GeneSlot};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_adaptive_strength_regimes() {
        let params = MutationParams::default().with_strength(1.0);
        assert!((params.effective_strength(6000.0) - 0.6).abs() < 1e-6);
        assert!((params.effective_strength(500.0) - 1.4).abs() < 1e-6);
        assert!((params.effective_strength(3000.0) - 1.0).abs() < 1e-6);
        assert!((params.effective_strength(5000.0) - 1.0).abs() < 1e-6);
        assert!((params.effective_strength(1000.0) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_zero_rate_is_exact_copy() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let parent = create_brain_random_with_rng(15, 8, 2, &mut rng);
        let params = MutationParams::default().with_rate(0.0);
        let child = clone_and_mutate_with_rng(&parent, 2000.0, &params, 8, &mut rng);
        assert_eq!(child, parent);
    }

    #[test]
    fn test_full_rate_perturbs_within_strength() {
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let parent = create_brain_random_with_rng(15, 8, 2, &mut rng);
        let params = MutationParams::default().with_rate(1.0).with_strength(0.5);
        // Fitness 2000 sits between the adaptive thresholds.
        let child = clone_and_mutate_with_rng(&parent, 2000.0, &params, 8, &mut rng);
        for (a, b) in parent.weights_ih.iter().zip(&child.weights_ih) {
            assert!((a - b).abs() <= 0.5 + 1e-6);
        }
        assert_ne!(child, parent);
    }

    #[test]
    fn test_growth_fills_new_positions() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let parent = create_brain_random_with_rng(15, 8, 2, &mut rng);
        let params = MutationParams::default().with_rate(0.0);
        let child = clone_and_mutate_with_rng(&parent, 2000.0, &params, 10, &mut rng);

        assert!(child.is_well_formed());
        assert_eq!(child.hidden_count, 10);
        for input in 0..15 {
            let kept = GeneSlot::InputHidden { input, hidden: 3 };
            assert_eq!(gene_at(&child, kept), gene_at(&parent, kept));
            let fresh = GeneSlot::InputHidden { input, hidden: 9 };
            let v = gene_at(&child, fresh).expect("new slot exists");
            assert!((-1.0..=1.0).contains(&v));
        }
    }

    #[test]
    fn test_target_is_clamped_to_bounds() {
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        let parent = create_brain_random_with_rng(15, 8, 2, &mut rng);
        let params = MutationParams::default();
        let big = clone_and_mutate_with_rng(&parent, 0.0, &params, 100, &mut rng);
        assert_eq!(big.hidden_count, 32);
        let small = clone_and_mutate_with_rng(&parent, 0.0, &params, 0, &mut rng);
        assert_eq!(small.hidden_count, 4);
    }
}
