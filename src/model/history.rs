use genesis_data::GenerationStats;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Per-generation statistics, oldest first, bounded to `capacity` entries.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GenerationHistory {
    capacity: usize,
    entries: VecDeque<GenerationStats>,
}

impl GenerationHistory {
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            entries: VecDeque::with_capacity(capacity.min(1024)),
        }
    }

    /// Appends `stats`, evicting the oldest entries past capacity.
    pub fn push(&mut self, stats: GenerationStats) {
        if self.capacity == 0 {
            return;
        }
        self.entries.push_back(stats);
        while self.entries.len() > self.capacity {
            self.entries.pop_front();
        }
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[must_use]
    pub fn latest(&self) -> Option<&GenerationStats> {
        self.entries.back()
    }

    pub fn iter(&self) -> impl Iterator<Item = &GenerationStats> {
        self.entries.iter()
    }

    /// Highest best-fitness among the retained generations.
    #[must_use]
    pub fn best_fitness(&self) -> f64 {
        self.entries
            .iter()
            .map(|s| s.best_fitness)
            .fold(0.0, f64::max)
    }

    /// Number of retained generations that ended in a restart.
    #[must_use]
    pub fn restarts(&self) -> usize {
        self.entries.iter().filter(|s| s.restarted).count()
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats(generation: u32, best: f64) -> GenerationStats {
        GenerationStats {
            generation,
            best_fitness: best,
            ..GenerationStats::default()
        }
    }

    #[test]
    fn test_history_is_bounded() {
        let mut history = GenerationHistory::new(3);
        for g in 1..=5 {
            history.push(stats(g, f64::from(g)));
        }
        assert_eq!(history.len(), 3);
        let gens: Vec<u32> = history.iter().map(|s| s.generation).collect();
        assert_eq!(gens, vec![3, 4, 5]);
        assert_eq!(history.latest().map(|s| s.generation), Some(5));
        assert_eq!(history.best_fitness(), 5.0);
    }

    #[test]
    fn test_zero_capacity_keeps_nothing() {
        let mut history = GenerationHistory::new(0);
        history.push(stats(1, 1.0));
        assert!(history.is_empty());
    }

    #[test]
    fn test_json_export() {
        let mut history = GenerationHistory::new(10);
        history.push(GenerationStats {
            restarted: true,
            ..stats(1, 0.0)
        });
        assert_eq!(history.restarts(), 1);
        let json = history.to_json().expect("serialize");
        let back: Vec<GenerationStats> = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back.len(), 1);
        assert!(back[0].restarted);
    }
}
