//! Heritable trait operators and genome encoding.
//!
//! Each trait mutates independently: with probability `rate` it is shifted
//! by `(u - 0.5) × strength × scale` and clamped to its range. Diet flips
//! discretely and color mutates per channel.

use crate::brain::{BrainLogic, MutationParams, BRAIN_INPUTS, BRAIN_OUTPUTS};
use crate::config::{AppConfig, TraitRange};
use crate::error::{Result, SimError};
use genesis_data::{BiomeKind, Brain, Color, Diet, Genotype, Traits};
use rand::Rng;

/// Shared pattern of the continuous trait operators.
pub fn mutate_scalar<R: Rng>(
    value: f64,
    range: &TraitRange,
    rate: f64,
    strength: f64,
    rng: &mut R,
) -> f64 {
    if rng.gen::<f64>() < rate {
        let offset = (rng.gen::<f64>() - 0.5) * strength * range.mutation_scale;
        range.clamp(value + offset)
    } else {
        value
    }
}

/// Like `mutate_scalar`, rounded to a whole number inside the range.
pub fn mutate_integer<R: Rng>(
    value: f64,
    range: &TraitRange,
    rate: f64,
    strength: f64,
    rng: &mut R,
) -> f64 {
    mutate_scalar(value, range, rate, strength, rng)
        .round()
        .clamp(range.min.ceil(), range.max.floor())
}

/// Shifts the preferred biome index by a rounded offset over the catalog.
pub fn mutate_biome_preference<R: Rng>(
    preference: usize,
    rate: f64,
    strength: f64,
    scale: f64,
    rng: &mut R,
) -> usize {
    let max = (BiomeKind::COUNT - 1) as f64;
    let current = (preference as f64).min(max);
    if rng.gen::<f64>() < rate {
        let offset =
            ((rng.gen::<f64>() - 0.5) * strength * scale * BiomeKind::COUNT as f64).round();
        (current + offset).clamp(0.0, max) as usize
    } else {
        current as usize
    }
}

/// Flips herbivore and carnivore with probability `rate × flip_multiplier`.
pub fn mutate_diet<R: Rng>(diet: Diet, rate: f64, flip_multiplier: f64, rng: &mut R) -> Diet {
    if rng.gen::<f64>() < rate * flip_multiplier {
        diet.flipped()
    } else {
        diet
    }
}

/// Each channel mutates with probability `2 × rate`.
pub fn mutate_color<R: Rng>(
    color: Color,
    rate: f64,
    strength: f64,
    magnitude: f64,
    rng: &mut R,
) -> Color {
    let mut channel = |c: u8| -> u8 {
        if rng.gen::<f64>() < rate * 2.0 {
            let offset = ((rng.gen::<f64>() - 0.5) * magnitude * strength).floor();
            (f64::from(c) + offset).clamp(0.0, 255.0) as u8
        } else {
            c
        }
    };
    Color {
        r: channel(color.r),
        g: channel(color.g),
        b: channel(color.b),
    }
}

/// Physical traits are always perturbed, scaled by strength only.
pub fn perturb_physical<R: Rng>(
    value: f64,
    range: &TraitRange,
    strength: f64,
    scale: f64,
    rng: &mut R,
) -> f64 {
    range.clamp(value + (rng.gen::<f64>() - 0.5) * strength * scale)
}

/// Child traits derived from one parent, each operator rolled on its own.
pub fn mutate_traits_with_rng<R: Rng>(
    parent: &Traits,
    config: &AppConfig,
    rate: f32,
    strength: f32,
    rng: &mut R,
) -> Traits {
    let t = &config.traits;
    let evo = &config.evolution;
    let rate = f64::from(rate);
    let strength = f64::from(strength);

    Traits {
        base_speed: perturb_physical(
            parent.base_speed,
            &t.speed,
            strength,
            evo.speed_mutation_scale,
            rng,
        ),
        size: perturb_physical(parent.size, &t.size, strength, evo.size_mutation_scale, rng),
        vision_range: mutate_scalar(parent.vision_range, &t.vision_range, rate, strength, rng),
        sensory_range: mutate_scalar(parent.sensory_range, &t.sensory_range, rate, strength, rng),
        lifespan: mutate_integer(parent.lifespan as f64, &t.lifespan, rate, strength, rng) as u64,
        biome_preference: mutate_biome_preference(
            parent.biome_preference,
            rate,
            strength,
            t.biome_preference_scale,
            rng,
        ),
        diet: mutate_diet(parent.diet, rate, f64::from(evo.diet_flip_multiplier), rng),
        attack_power: mutate_scalar(parent.attack_power, &t.attack_power, rate, strength, rng),
        defense: mutate_scalar(parent.defense, &t.defense, rate, strength, rng),
        metabolism_rate: mutate_scalar(
            parent.metabolism_rate,
            &t.metabolism_rate,
            rate,
            strength,
            rng,
        ),
        reproduction_cooldown: mutate_integer(
            f64::from(parent.reproduction_cooldown),
            &t.reproduction_cooldown,
            rate,
            strength,
            rng,
        ) as u32,
        clutch_size: mutate_integer(
            f64::from(parent.clutch_size),
            &t.clutch_size,
            rate,
            strength,
            rng,
        ) as u32,
        optimal_temperature: mutate_scalar(
            f64::from(parent.optimal_temperature),
            &t.optimal_temperature,
            rate,
            strength,
            rng,
        ) as f32,
        color: mutate_color(
            parent.color,
            rate,
            strength,
            f64::from(evo.color_mutation_magnitude),
            rng,
        ),
    }
}

/// Traits at their configured defaults.
#[must_use]
pub fn default_traits(config: &AppConfig) -> Traits {
    let t = &config.traits;
    Traits {
        base_speed: t.speed.default,
        size: t.size.default,
        vision_range: t.vision_range.default,
        sensory_range: t.sensory_range.default,
        lifespan: t.lifespan.default.round() as u64,
        biome_preference: 0,
        diet: Diet::Herbivore,
        attack_power: t.attack_power.default,
        defense: t.defense.default,
        metabolism_rate: t.metabolism_rate.default,
        reproduction_cooldown: t.reproduction_cooldown.default.round() as u32,
        clutch_size: t.clutch_size.default.round() as u32,
        optimal_temperature: t.optimal_temperature.default as f32,
        color: Color::default(),
    }
}

/// Founder traits: defaults with small random spread on the physical traits,
/// a random biome preference, color and diet.
pub fn random_traits_with_rng<R: Rng>(config: &AppConfig, rng: &mut R) -> Traits {
    let t = &config.traits;
    let mut traits = default_traits(config);
    traits.base_speed = t.speed.clamp(t.speed.default + rng.gen_range(-0.5..=0.5));
    traits.size = t.size.clamp(t.size.default + rng.gen_range(-1.0..=1.0));
    traits.vision_range = t
        .vision_range
        .clamp(t.vision_range.default + rng.gen_range(-25.0..=25.0));
    traits.biome_preference = rng.gen_range(0..BiomeKind::COUNT);
    if rng.gen::<f64>() < config.world.initial_carnivore_fraction {
        traits.diet = Diet::Carnivore;
    }
    traits.color = Color {
        r: rng.gen(),
        g: rng.gen(),
        b: rng.gen(),
    };
    traits
}

/// Fails with `SimError::Genome` naming the first trait outside its
/// configured range. Non-finite values are never in range.
pub fn check_traits(traits: &Traits, config: &AppConfig) -> Result<()> {
    let t = &config.traits;
    let scalars = [
        ("base_speed", traits.base_speed, &t.speed),
        ("size", traits.size, &t.size),
        ("vision_range", traits.vision_range, &t.vision_range),
        ("sensory_range", traits.sensory_range, &t.sensory_range),
        ("lifespan", traits.lifespan as f64, &t.lifespan),
        ("attack_power", traits.attack_power, &t.attack_power),
        ("defense", traits.defense, &t.defense),
        ("metabolism_rate", traits.metabolism_rate, &t.metabolism_rate),
        (
            "reproduction_cooldown",
            f64::from(traits.reproduction_cooldown),
            &t.reproduction_cooldown,
        ),
        ("clutch_size", f64::from(traits.clutch_size), &t.clutch_size),
        (
            "optimal_temperature",
            f64::from(traits.optimal_temperature),
            &t.optimal_temperature,
        ),
    ];
    for (name, value, range) in scalars {
        if !range.contains(value) {
            return Err(SimError::genome(format!(
                "trait {name} = {value} outside [{}, {}]",
                range.min, range.max
            )));
        }
    }
    if traits.biome_preference >= BiomeKind::COUNT {
        return Err(SimError::genome(format!(
            "biome preference {} outside the catalog of {}",
            traits.biome_preference,
            BiomeKind::COUNT
        )));
    }
    Ok(())
}

/// Trait defining the genetic interface for agent genotypes.
pub trait GenotypeLogic {
    fn new_random(config: &AppConfig) -> Self;
    fn new_random_with_rng<R: Rng>(config: &AppConfig, rng: &mut R) -> Self;
    /// Offspring of two parents: crossed-over and mutated brain, traits
    /// mutated from the first parent.
    fn breed_with_rng<R: Rng>(
        &self,
        other: &Genotype,
        parent_fitness: f64,
        params: &MutationParams,
        config: &AppConfig,
        target_hidden: usize,
        rng: &mut R,
    ) -> Genotype;
    fn to_hex(&self) -> String;
    fn from_hex(hex_str: &str) -> Result<Self>
    where
        Self: Sized;
}

impl GenotypeLogic for Genotype {
    fn new_random(config: &AppConfig) -> Self {
        let mut rng = rand::thread_rng();
        Self::new_random_with_rng(config, &mut rng)
    }

    fn new_random_with_rng<R: Rng>(config: &AppConfig, rng: &mut R) -> Self {
        let brain = Brain::new_random_with_rng(config.brain.initial_hidden, rng);
        let traits = random_traits_with_rng(config, rng);
        Genotype { brain, traits }
    }

    fn breed_with_rng<R: Rng>(
        &self,
        other: &Genotype,
        parent_fitness: f64,
        params: &MutationParams,
        config: &AppConfig,
        target_hidden: usize,
        rng: &mut R,
    ) -> Genotype {
        let target = params.clamp_hidden(target_hidden);
        let brain = self
            .brain
            .crossover_with_rng(&other.brain, target, rng)
            .clone_and_mutate_with_rng(parent_fitness, params, target, rng);
        let traits =
            mutate_traits_with_rng(&self.traits, config, params.rate, params.strength, rng);
        Genotype { brain, traits }
    }

    fn to_hex(&self) -> String {
        match serde_json::to_vec(self) {
            Ok(bytes) => hex::encode(bytes),
            Err(e) => {
                tracing::error!(error = %e, "Failed to serialize genotype to JSON");
                String::new()
            }
        }
    }

    fn from_hex(hex_str: &str) -> Result<Self> {
        let bytes = hex::decode(hex_str.trim())?;
        if bytes.is_empty() {
            return Err(SimError::genome("Empty hex string"));
        }
        let genotype: Genotype = serde_json::from_slice(&bytes)?;
        genotype.brain.validate()?;
        if genotype.brain.input_count != BRAIN_INPUTS
            || genotype.brain.output_count != BRAIN_OUTPUTS
        {
            return Err(SimError::genome(format!(
                "brain is {}x{}, expected {}x{}",
                genotype.brain.input_count,
                genotype.brain.output_count,
                BRAIN_INPUTS,
                BRAIN_OUTPUTS
            )));
        }
        Ok(genotype)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn assert_in_range(traits: &Traits, config: &AppConfig) {
        let t = &config.traits;
        assert!(t.speed.contains(traits.base_speed));
        assert!(t.size.contains(traits.size));
        assert!(t.vision_range.contains(traits.vision_range));
        assert!(t.sensory_range.contains(traits.sensory_range));
        assert!(t.lifespan.contains(traits.lifespan as f64));
        assert!(traits.biome_preference < BiomeKind::COUNT);
        assert!(t.attack_power.contains(traits.attack_power));
        assert!(t.defense.contains(traits.defense));
        assert!(t.metabolism_rate.contains(traits.metabolism_rate));
        assert!(t.reproduction_cooldown.contains(f64::from(traits.reproduction_cooldown)));
        assert!(t.clutch_size.contains(f64::from(traits.clutch_size)));
        assert!(t.optimal_temperature.contains(f64::from(traits.optimal_temperature)));
    }

    #[test]
    fn test_mutation_keeps_traits_in_range() {
        let config = AppConfig::default();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut traits = random_traits_with_rng(&config, &mut rng);
        for _ in 0..500 {
            traits = mutate_traits_with_rng(&traits, &config, 1.0, 10.0, &mut rng);
            assert_in_range(&traits, &config);
        }
    }

    #[test]
    fn test_zero_rate_passes_through() {
        let config = AppConfig::default();
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let v = mutate_scalar(0.07, &config.traits.metabolism_rate, 0.0, 1.0, &mut rng);
        assert_eq!(v, 0.07);
        // Unmutated values are copied, not clamped.
        let v = mutate_scalar(0.5, &config.traits.metabolism_rate, 0.0, 1.0, &mut rng);
        assert_eq!(v, 0.5);
        let d = mutate_diet(Diet::Carnivore, 0.0, 0.5, &mut rng);
        assert_eq!(d, Diet::Carnivore);
    }

    #[test]
    fn test_diet_flips_at_full_probability() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        assert_eq!(mutate_diet(Diet::Herbivore, 1.0, 1.0, &mut rng), Diet::Carnivore);
    }

    #[test]
    fn test_integer_traits_are_whole() {
        let config = AppConfig::default();
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        for _ in 0..100 {
            let v = mutate_integer(3.0, &config.traits.clutch_size, 1.0, 3.0, &mut rng);
            assert_eq!(v, v.round());
            assert!((1.0..=5.0).contains(&v));
        }
    }

    #[test]
    fn test_color_zero_rate_unchanged() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let c = Color { r: 10, g: 20, b: 30 };
        assert_eq!(mutate_color(c, 0.0, 1.0, 60.0, &mut rng), c);
    }

    #[test]
    fn test_breed_uses_target_hidden() {
        let config = AppConfig::default();
        let mut rng = ChaCha8Rng::seed_from_u64(6);
        let a = Genotype::new_random_with_rng(&config, &mut rng);
        let b = Genotype::new_random_with_rng(&config, &mut rng);
        let child = a.breed_with_rng(&b, 2000.0, &MutationParams::default(), &config, 12, &mut rng);
        assert_eq!(child.brain.hidden_count, 12);
        assert_in_range(&child.traits, &config);
    }

    #[test]
    fn test_genotype_hex_roundtrip() {
        let config = AppConfig::default();
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let genotype = Genotype::new_random_with_rng(&config, &mut rng);
        let hex = genotype.to_hex();
        let back = Genotype::from_hex(&hex).expect("decode");
        assert_eq!(genotype, back);
    }

    #[test]
    fn test_from_hex_rejects_garbage() {
        assert!(matches!(Genotype::from_hex("not hex"), Err(SimError::Genome(_))));
        assert!(matches!(Genotype::from_hex(""), Err(SimError::Genome(_))));
        assert!(matches!(
            Genotype::from_hex(&hex::encode(b"{}")),
            Err(SimError::Genome(_))
        ));
    }

    #[test]
    fn test_check_traits_accepts_generated_traits() {
        let config = AppConfig::default();
        let mut rng = ChaCha8Rng::seed_from_u64(8);
        assert!(check_traits(&default_traits(&config), &config).is_ok());
        for _ in 0..50 {
            let traits = random_traits_with_rng(&config, &mut rng);
            assert!(check_traits(&traits, &config).is_ok());
        }
    }

    #[test]
    fn test_check_traits_rejects_out_of_range() {
        let config = AppConfig::default();
        let base = default_traits(&config);

        let mut t = base.clone();
        t.base_speed = -2.0;
        assert!(matches!(check_traits(&t, &config), Err(SimError::Genome(_))));

        let mut t = base.clone();
        t.metabolism_rate = 7.0;
        assert!(matches!(check_traits(&t, &config), Err(SimError::Genome(_))));

        let mut t = base.clone();
        t.lifespan = 0;
        assert!(matches!(check_traits(&t, &config), Err(SimError::Genome(_))));

        let mut t = base.clone();
        t.size = f64::NAN;
        assert!(matches!(check_traits(&t, &config), Err(SimError::Genome(_))));

        let mut t = base;
        t.biome_preference = BiomeKind::COUNT;
        assert!(matches!(check_traits(&t, &config), Err(SimError::Genome(_))));
    }

    #[test]
    fn test_from_hex_rejects_wrong_brain_shape() {
        let config = AppConfig::default();
        let mut genotype = Genotype {
            brain: Brain::zeroed(3, 2, 2),
            traits: default_traits(&config),
        };
        assert!(Genotype::from_hex(&genotype.to_hex()).is_err());
        genotype.brain = Brain::zeroed(BRAIN_INPUTS, 2, BRAIN_OUTPUTS);
        genotype.brain.bias_h.pop();
        assert!(matches!(
            Genotype::from_hex(&genotype.to_hex()),
            Err(SimError::ShapeMismatch(_))
        ));
    }
}
