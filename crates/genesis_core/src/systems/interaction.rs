use crate::config::AppConfig;
use crate::food;
use crate::interaction::InteractionCommand;
use crate::lifecycle;
use crate::snapshot::AgentView;
use chrono::Utc;
use genesis_data::{Agent, DeathCause, Diet, Food, LiveEvent};
use std::collections::HashSet;

pub struct InteractionResult {
    pub events: Vec<LiveEvent>,
    pub eaten_food_indices: HashSet<usize>,
    pub kills: usize,
    pub matings: usize,
}

fn nearest_index<F>(views: &[AgentView], idx: usize, range: f64, eligible: F) -> Option<usize>
where
    F: Fn(&AgentView) -> bool,
{
    let me = &views[idx];
    let range_sq = range * range;
    views
        .iter()
        .enumerate()
        .filter(|(j, v)| *j != idx && v.is_alive && eligible(v))
        .map(|(j, v)| (j, v.distance_sq(me.x, me.y)))
        .filter(|(_, d_sq)| *d_sq <= range_sq)
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(j, _)| j)
}

/// Decides every eat, attack and mate intent from the frozen post-move views.
///
/// Each agent issues at most one command of each kind. Commands come out in
/// ascending agent order, eat before attack before mate.
#[must_use]
pub fn compute_intents(
    views: &[AgentView],
    food: &[Food],
    config: &AppConfig,
) -> Vec<InteractionCommand> {
    let mut commands = Vec::new();
    let combat = &config.combat;

    for (idx, me) in views.iter().enumerate() {
        if !me.is_alive {
            continue;
        }

        let reach_extra = config.metabolism.collision_offset + me.size;
        if let Some(food_index) = food.iter().position(|f| {
            let reach = reach_extra + f.radius;
            me.diet.eats(f.kind) && me.distance_sq(f.x, f.y) <= reach * reach
        }) {
            commands.push(InteractionCommand::EatFood {
                food_index,
                agent_idx: idx,
            });
        }

        if me.diet == Diet::Carnivore && me.energy > combat.energy_safety_margin {
            let target = nearest_index(views, idx, combat.combat_range, |v| {
                v.diet != Diet::Carnivore || v.attack_power < me.attack_power
            });
            if let Some(target_idx) = target {
                commands.push(InteractionCommand::Attack {
                    attacker_idx: idx,
                    target_idx,
                });
            }
        }

        if me.ready_to_mate {
            let mate = nearest_index(views, idx, combat.mating_range, |v| v.ready_to_mate);
            if let Some(b_idx) = mate {
                commands.push(InteractionCommand::Mate { a_idx: idx, b_idx });
            }
        }
    }

    commands
}

fn ready_to_mate(agent: &Agent, config: &AppConfig) -> bool {
    agent.vitals.is_alive
        && agent.vitals.reproduction_cooldown == 0
        && agent.vitals.energy >= config.metabolism.reproduction_threshold
}

fn death_event(agent: &Agent, cause: DeathCause, tick: u64) -> LiveEvent {
    LiveEvent::Death {
        id: agent.id(),
        cause,
        age: agent.vitals.age,
        tick,
        timestamp: Utc::now().to_rfc3339(),
    }
}

/// Applies commands in order against live state.
///
/// A command whose actor or target died earlier in the commit, or whose food
/// was already taken, is dropped. A mate command is dropped when either
/// partner is no longer ready.
pub fn commit_commands(
    agents: &mut [Agent],
    food: &[Food],
    commands: Vec<InteractionCommand>,
    config: &AppConfig,
    tick: u64,
) -> InteractionResult {
    let mut result = InteractionResult {
        events: Vec::new(),
        eaten_food_indices: HashSet::new(),
        kills: 0,
        matings: 0,
    };

    for cmd in commands {
        if !agents.get(cmd.actor()).is_some_and(Agent::is_alive) {
            continue;
        }
        match cmd {
            InteractionCommand::EatFood {
                food_index,
                agent_idx,
            } => {
                let Some(item) = food.get(food_index) else {
                    continue;
                };
                if !result.eaten_food_indices.insert(food_index) {
                    continue;
                }
                let agent = &mut agents[agent_idx];
                if item.is_toxic {
                    agent.vitals.energy -= config.metabolism.toxic_penalty;
                } else {
                    agent.vitals.energy += item.energy_value;
                    agent.record.food_eaten += 1;
                }
            }
            InteractionCommand::Attack {
                attacker_idx,
                target_idx,
            } => {
                if target_idx == attacker_idx
                    || !agents.get(target_idx).is_some_and(Agent::is_alive)
                {
                    continue;
                }
                let attack = agents[attacker_idx].genotype.traits.attack_power;
                agents[attacker_idx].vitals.energy -= config.combat.attack_energy_cost;

                let target = &mut agents[target_idx];
                let defense = target.genotype.traits.defense;
                let damage = (attack * config.combat.damage_multiplier - defense).max(0.0);
                target.vitals.energy -= damage;
                if target.vitals.energy <= 0.0
                    && lifecycle::mark_dead(target, DeathCause::Predation)
                {
                    result.events.push(death_event(target, DeathCause::Predation, tick));
                    let target_id = target.id();

                    let attacker = &mut agents[attacker_idx];
                    attacker.vitals.energy += config.combat.meat_energy_bonus;
                    attacker.record.kills += 1;
                    result.kills += 1;
                    tracing::debug!(attacker = %attacker.id(), target = %target_id, tick, "Kill");
                    result.events.push(LiveEvent::Kill {
                        attacker: attacker.id(),
                        target: target_id,
                        tick,
                    });
                }
            }
            InteractionCommand::Mate { a_idx, b_idx } => {
                if a_idx == b_idx
                    || b_idx >= agents.len()
                    || !ready_to_mate(&agents[a_idx], config)
                    || !ready_to_mate(&agents[b_idx], config)
                {
                    continue;
                }
                let half_cost = config.metabolism.reproduction_cost / 2.0;
                for idx in [a_idx, b_idx] {
                    let agent = &mut agents[idx];
                    agent.vitals.energy -= half_cost;
                    agent.vitals.reproduction_cooldown =
                        agent.genotype.traits.reproduction_cooldown;
                    agent.record.matings += 1;
                }
                result.matings += 1;
                let (a, b) = (agents[a_idx].id(), agents[b_idx].id());
                tracing::debug!(a = %a, b = %b, tick, "Mating");
                result.events.push(LiveEvent::Mating { a, b, tick });
            }
        }
    }

    result
}

/// Outcome of the end-of-tick terminal checks.
pub struct TerminalResult {
    pub events: Vec<LiveEvent>,
    pub deposits: Vec<Food>,
    pub starvations: usize,
}

/// Marks agents past their lifespan or out of energy as dead. Starved agents
/// leave a meat deposit where they died.
pub fn apply_terminal_checks(
    agents: &mut [Agent],
    config: &AppConfig,
    tick: u64,
) -> TerminalResult {
    let mut out = TerminalResult {
        events: Vec::new(),
        deposits: Vec::new(),
        starvations: 0,
    };
    for agent in agents.iter_mut().filter(|a| a.is_alive()) {
        let Some(cause) = lifecycle::death_cause(agent) else {
            continue;
        };
        if lifecycle::mark_dead(agent, cause) {
            if cause == DeathCause::Starvation {
                out.deposits
                    .push(food::meat_deposit(agent.physics.x, agent.physics.y, config));
                out.starvations += 1;
            }
            out.events.push(death_event(agent, cause, tick));
        }
    }
    out
}
