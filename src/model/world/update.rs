use crate::model::world::World;
use genesis_core::food;
use genesis_core::snapshot::AgentView;
use genesis_core::systems::perception::TickContext;
use genesis_core::systems::{action, interaction};
use genesis_data::LiveEvent;
use rayon::prelude::*;
use std::collections::HashSet;
use std::time::Instant;

impl World {
    /// Advances the simulation by one tick.
    ///
    /// The tick runs in two phases:
    /// - every living agent senses, thinks and moves against a frozen view of
    ///   the population (in parallel, no randomness involved)
    /// - eat, attack and mate intents are computed from the post-move views
    ///   and committed in agent order, then deaths are checked
    ///
    /// Food is then topped up, metrics recorded and the generation-end
    /// condition evaluated. Returns the live events of the tick. A paused
    /// world returns no events and changes nothing.
    pub fn update(&mut self) -> anyhow::Result<Vec<LiveEvent>> {
        self.update_at(Instant::now())
    }

    /// [`World::update`] with an explicit clock, used by the fixed-time end
    /// condition.
    pub fn update_at(&mut self, now: Instant) -> anyhow::Result<Vec<LiveEvent>> {
        if self.paused {
            return Ok(Vec::new());
        }
        let started = Instant::now();
        self.tick += 1;
        self.total_ticks += 1;
        self.env.tick_deterministic(self.total_ticks);

        let mut events = Vec::new();

        self.pass_agents()?;
        self.pass_interactions(&mut events);

        food::replenish_with_rng(
            &mut self.food,
            self.food_target,
            &self.grid,
            &self.config,
            &mut self.rng,
        );

        self.metrics
            .record_tick(started.elapsed(), self.alive_count(), self.food.len());

        if self.generation_should_end(now) {
            events.extend(self.end_generation_at(now));
        }

        Ok(events)
    }

    fn capture_views(&self) -> Vec<AgentView> {
        let threshold = self.config.metabolism.reproduction_threshold;
        self.agents
            .iter()
            .map(|a| AgentView::of(a, threshold))
            .collect()
    }

    fn pass_agents(&mut self) -> anyhow::Result<()> {
        let views = self.capture_views();
        let ctx = TickContext {
            config: &self.config,
            grid: &self.grid,
            env: &self.env,
            food: &self.food,
            views: &views,
        };
        self.agents
            .par_iter_mut()
            .enumerate()
            .try_for_each(|(idx, agent)| action::update_agent(idx, agent, &ctx))?;
        Ok(())
    }

    fn pass_interactions(&mut self, events: &mut Vec<LiveEvent>) {
        let views = self.capture_views();
        let commands = interaction::compute_intents(&views, &self.food, &self.config);
        let result = interaction::commit_commands(
            &mut self.agents,
            &self.food,
            commands,
            &self.config,
            self.tick,
        );

        for _ in 0..result.kills {
            self.metrics.increment_counter("kills");
        }
        for _ in 0..result.matings {
            self.metrics.increment_counter("matings");
        }
        self.remove_eaten_food(&result.eaten_food_indices);
        events.extend(result.events);

        let terminal =
            interaction::apply_terminal_checks(&mut self.agents, &self.config, self.tick);
        for _ in 0..terminal.starvations {
            self.metrics.increment_counter("starvations");
        }
        self.food.extend(terminal.deposits);
        events.extend(terminal.events);
    }

    fn remove_eaten_food(&mut self, eaten: &HashSet<usize>) {
        if eaten.is_empty() {
            return;
        }
        let mut idx = 0;
        self.food.retain(|_| {
            let keep = !eaten.contains(&idx);
            idx += 1;
            keep
        });
    }
}
