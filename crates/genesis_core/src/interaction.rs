/// An effect decided against the frozen tick state, applied in the commit step.
#[derive(Debug, Clone, PartialEq)]
pub enum InteractionCommand {
    EatFood {
        food_index: usize,
        agent_idx: usize,
    },
    Attack {
        attacker_idx: usize,
        target_idx: usize,
    },
    Mate {
        a_idx: usize,
        b_idx: usize,
    },
}

impl InteractionCommand {
    /// Agent that issued the command.
    #[must_use]
    pub fn actor(&self) -> usize {
        match self {
            InteractionCommand::EatFood { agent_idx, .. } => *agent_idx,
            InteractionCommand::Attack { attacker_idx, .. } => *attacker_idx,
            InteractionCommand::Mate { a_idx, .. } => *a_idx,
        }
    }
}
