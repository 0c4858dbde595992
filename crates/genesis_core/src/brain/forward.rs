use crate::error::{Result, SimError};
use genesis_data::Brain;

/// Neutral output of a brain with no hidden units.
pub const NEUTRAL_OUTPUT: f32 = 0.5;

/// Runs one inference pass: ReLU hidden layer, tanh outputs.
///
/// A brain with an empty hidden layer yields `NEUTRAL_OUTPUT` for every
/// output instead of multiplying through a zero-width matrix.
pub fn feed_forward(brain: &Brain, inputs: &[f32]) -> Result<Vec<f32>> {
    if inputs.len() != brain.input_count {
        return Err(SimError::InputLength {
            expected: brain.input_count,
            actual: inputs.len(),
        });
    }
    super::topology::check_shape(brain)?;

    if brain.hidden_count == 0 {
        return Ok(vec![NEUTRAL_OUTPUT; brain.output_count]);
    }

    let h = brain.hidden_count;
    let o = brain.output_count;

    let mut hidden = brain.bias_h.clone();
    for (row, &x) in brain.weights_ih.chunks_exact(h).zip(inputs) {
        for (acc, &w) in hidden.iter_mut().zip(row) {
            *acc += x * w;
        }
    }
    for v in &mut hidden {
        *v = v.max(0.0);
    }

    let mut outputs = brain.bias_o.clone();
    if o > 0 {
        for (row, &hv) in brain.weights_ho.chunks_exact(o).zip(&hidden) {
            for (acc, &w) in outputs.iter_mut().zip(row) {
                *acc += hv * w;
            }
        }
    }
    for v in &mut outputs {
        *v = v.tanh();
    }

    Ok(outputs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_brain_outputs_zero() {
        let brain = Brain::zeroed(3, 2, 2);
        let out = feed_forward(&brain, &[0.3, -7.0, 1.0]).expect("valid input");
        assert_eq!(out, vec![0.0, 0.0]);
    }

    #[test]
    fn test_zero_hidden_is_neutral() {
        let brain = Brain::zeroed(15, 0, 2);
        let out = feed_forward(&brain, &[1.0; 15]).expect("valid input");
        assert_eq!(out, vec![0.5, 0.5]);
    }

    #[test]
    fn test_wrong_input_length_fails_fast() {
        let brain = Brain::zeroed(3, 2, 2);
        let err = feed_forward(&brain, &[1.0, 2.0]).unwrap_err();
        assert_eq!(
            err,
            SimError::InputLength {
                expected: 3,
                actual: 2
            }
        );
    }

    #[test]
    fn test_relu_blocks_negative_hidden() {
        // One hidden unit with a strongly negative pre-activation: output is tanh(bias).
        let mut brain = Brain::zeroed(1, 1, 1);
        brain.weights_ih[0] = -5.0;
        brain.weights_ho[0] = 10.0;
        brain.bias_o[0] = 0.25;
        let out = feed_forward(&brain, &[1.0]).expect("valid input");
        assert!((out[0] - 0.25f32.tanh()).abs() < 1e-6);
    }

    #[test]
    fn test_known_values() {
        let mut brain = Brain::zeroed(2, 1, 1);
        brain.weights_ih = vec![0.5, 0.5];
        brain.bias_h = vec![0.1];
        brain.weights_ho = vec![2.0];
        brain.bias_o = vec![-0.2];
        let out = feed_forward(&brain, &[1.0, 1.0]).expect("valid input");
        let expected = (1.1f32 * 2.0 - 0.2).tanh();
        assert!((out[0] - expected).abs() < 1e-6);
    }
}
