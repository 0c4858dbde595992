use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Global environmental signal read by every agent.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Environment {
    /// Current temperature in `[0, 1]`.
    pub temperature: f32,
    /// Ticks for one full temperature cycle.
    pub period: u64,
}

impl Environment {
    #[must_use]
    pub fn new(period: u64) -> Self {
        let mut env = Self {
            temperature: 0.5,
            period: period.max(1),
        };
        env.tick_deterministic(0);
        env
    }

    /// Sets the temperature as a pure function of the world tick.
    pub fn tick_deterministic(&mut self, tick: u64) {
        let phase = (tick % self.period) as f64 / self.period as f64;
        let t = 0.5 + 0.5 * (2.0 * PI * phase).sin();
        self.temperature = t.clamp(0.0, 1.0) as f32;
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new(3600)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_temperature_cycle() {
        let mut env = Environment::new(100);
        assert!((env.temperature - 0.5).abs() < 1e-6);

        env.tick_deterministic(25);
        assert!((env.temperature - 1.0).abs() < 1e-6);

        env.tick_deterministic(75);
        assert!(env.temperature.abs() < 1e-6);

        env.tick_deterministic(100);
        assert!((env.temperature - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_temperature_stays_in_unit_range() {
        let mut env = Environment::new(37);
        for tick in 0..500 {
            env.tick_deterministic(tick);
            assert!((0.0..=1.0).contains(&env.temperature));
        }
    }
}
