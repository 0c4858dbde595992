use crate::model::world::World;
use chrono::Utc;
use genesis_core::food;
use genesis_core::systems::{evolution, stats};
use genesis_data::LiveEvent;
use std::time::Instant;

impl World {
    /// Ends the current generation immediately, whatever the end mode.
    pub fn force_end_generation(&mut self) -> Vec<LiveEvent> {
        self.end_generation_at(Instant::now())
    }

    /// Scores the finished generation and replaces it with the next one.
    ///
    /// Fitness is computed once per agent and stored in `record.fitness`.
    /// Growth of the hidden layer is decided from the number of the finished
    /// generation, so the new target applies to this breeding step.
    pub(crate) fn end_generation_at(&mut self, now: Instant) -> Vec<LiveEvent> {
        let mut events = Vec::new();
        let finished = self.generation;
        let finished_hidden = self.hidden_target;

        evolution::evaluate_fitness(&mut self.agents, &self.grid, &self.config);

        let grown = evolution::next_hidden_target(self.hidden_target, finished, &self.config.brain);
        if grown != self.hidden_target {
            tracing::debug!(
                generation = finished,
                from = self.hidden_target,
                to = grown,
                "Hidden layer growth"
            );
            events.push(LiveEvent::HiddenLayerGrowth {
                from: self.hidden_target,
                to: grown,
                generation: finished,
            });
            self.hidden_target = grown;
        }

        let params = self.params;
        let outcome = evolution::breed_next_generation_with_rng(
            &self.agents,
            self.hidden_target,
            &params,
            &self.config,
            finished + 1,
            &mut self.rng,
        );

        let summary =
            stats::generation_stats(&self.agents, finished, finished_hidden, outcome.restarted);
        tracing::info!(
            generation = finished,
            avg_fitness = summary.avg_fitness,
            best_fitness = summary.best_fitness,
            alive = summary.alive,
            hidden_nodes = finished_hidden,
            ticks = self.tick,
            "Generation complete"
        );
        let timestamp = Utc::now().to_rfc3339();
        events.push(LiveEvent::GenerationEnd {
            generation: finished,
            avg_fitness: summary.avg_fitness,
            best_fitness: summary.best_fitness,
            timestamp: timestamp.clone(),
        });
        if outcome.restarted {
            self.metrics.increment_counter("restarts");
            events.push(LiveEvent::Extinction {
                generation: finished,
                timestamp,
            });
        }
        self.history.push(summary.clone());
        self.last_stats = Some(summary);

        self.agents = outcome.agents;
        self.generation = finished + 1;
        self.tick = 0;
        food::reset_food_with_rng(
            &mut self.food,
            self.food_target,
            &self.grid,
            &self.config,
            &mut self.rng,
        );
        self.generation_start = now;
        self.metrics.record_generation(self.generation);

        events
    }
}
