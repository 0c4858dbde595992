use super::topology::{build_brain, gene_at, random_gene};
use genesis_data::Brain;
use rand::Rng;

/// Uniform crossover into a brain of `target_hidden` units.
///
/// Each position takes `a`'s or `b`'s value with equal probability. A parent
/// lacking the position contributes a fresh random value instead. Input and
/// output counts follow `a`.
pub fn brain_crossover_with_rng<R: Rng>(
    a: &Brain,
    b: &Brain,
    target_hidden: usize,
    rng: &mut R,
) -> Brain {
    build_brain(a.input_count, target_hidden, a.output_count, |slot| {
        let va = match gene_at(a, slot) {
            Some(v) => v,
            None => random_gene(rng),
        };
        let vb = match gene_at(b, slot) {
            Some(v) => v,
            None => random_gene(rng),
        };
        if rng.gen_bool(0.5) {
            va
        } else {
            vb
        }
    })
}
