use crate::error::{Result, SimError};
use genesis_data::Brain;
use rand::Rng;

/// Address of one weight or bias in a brain.
///
/// Slots are stable across hidden-layer sizes, so two brains of different
/// shapes can be compared position by position.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GeneSlot {
    InputHidden { input: usize, hidden: usize },
    HiddenBias(usize),
    HiddenOutput { hidden: usize, output: usize },
    OutputBias(usize),
}

/// Value stored at `slot`, or `None` when the brain has no such position.
#[must_use]
pub fn gene_at(brain: &Brain, slot: GeneSlot) -> Option<f32> {
    match slot {
        GeneSlot::InputHidden { input, hidden } => {
            if input < brain.input_count && hidden < brain.hidden_count {
                brain
                    .weights_ih
                    .get(input * brain.hidden_count + hidden)
                    .copied()
            } else {
                None
            }
        }
        GeneSlot::HiddenBias(hidden) => brain.bias_h.get(hidden).copied(),
        GeneSlot::HiddenOutput { hidden, output } => {
            if hidden < brain.hidden_count && output < brain.output_count {
                brain
                    .weights_ho
                    .get(hidden * brain.output_count + output)
                    .copied()
            } else {
                None
            }
        }
        GeneSlot::OutputBias(output) => brain.bias_o.get(output).copied(),
    }
}

/// Builds a brain of the given shape, asking `gene` for every slot.
///
/// Slots are visited in storage order: input→hidden rows, hidden biases,
/// hidden→output rows, output biases.
pub fn build_brain<F>(
    input_count: usize,
    hidden_count: usize,
    output_count: usize,
    mut gene: F,
) -> Brain
where
    F: FnMut(GeneSlot) -> f32,
{
    let mut weights_ih = Vec::with_capacity(input_count * hidden_count);
    for input in 0..input_count {
        for hidden in 0..hidden_count {
            weights_ih.push(gene(GeneSlot::InputHidden { input, hidden }));
        }
    }
    let bias_h = (0..hidden_count)
        .map(|h| gene(GeneSlot::HiddenBias(h)))
        .collect();
    let mut weights_ho = Vec::with_capacity(hidden_count * output_count);
    for hidden in 0..hidden_count {
        for output in 0..output_count {
            weights_ho.push(gene(GeneSlot::HiddenOutput { hidden, output }));
        }
    }
    let bias_o = (0..output_count)
        .map(|o| gene(GeneSlot::OutputBias(o)))
        .collect();

    Brain {
        input_count,
        hidden_count,
        output_count,
        weights_ih,
        bias_h,
        weights_ho,
        bias_o,
    }
}

/// A fresh gene, uniform in `[-1, 1]`.
pub fn random_gene<R: Rng>(rng: &mut R) -> f32 {
    rng.gen_range(-1.0..=1.0)
}

pub fn create_brain_random_with_rng<R: Rng>(
    input_count: usize,
    hidden_count: usize,
    output_count: usize,
    rng: &mut R,
) -> Brain {
    build_brain(input_count, hidden_count, output_count, |_| random_gene(rng))
}

/// Copy of `brain` with `target_hidden` hidden units.
///
/// Overlapping positions are copied, new positions are drawn fresh, and
/// positions beyond a shrunken layer are dropped.
pub fn resized_with_rng<R: Rng>(brain: &Brain, target_hidden: usize, rng: &mut R) -> Brain {
    build_brain(
        brain.input_count,
        target_hidden,
        brain.output_count,
        |slot| gene_at(brain, slot).unwrap_or_else(|| random_gene(rng)),
    )
}

/// Rejects brains whose vectors disagree with their declared counts.
pub fn check_shape(brain: &Brain) -> Result<()> {
    if brain.is_well_formed() {
        Ok(())
    } else {
        Err(SimError::shape(format!(
            "{}x{}x{} brain with {}/{}/{}/{} genes",
            brain.input_count,
            brain.hidden_count,
            brain.output_count,
            brain.weights_ih.len(),
            brain.bias_h.len(),
            brain.weights_ho.len(),
            brain.bias_o.len()
        )))
    }
}
