use crate::communication::messages::{ElectAction, ElectionMessage};

/// The election this node currently believes to be in progress.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ElectionState {
    pub candidate_id: u64,
    pub description: String,
    /// Absolute deadline in ms, taken from the message `expires_at`.
    pub deadline: u64,
    pub started_at: u64,
    pub last_action: ElectAction,
    pub active: bool,
}

impl ElectionState {
    pub fn from_message(message: &ElectionMessage, now: u64) -> ElectionState {
        ElectionState {
            candidate_id: message.candidate_id,
            description: message.description.clone(),
            deadline: message.expires_at,
            started_at: now,
            last_action: message.action,
            active: true,
        }
    }

    pub fn is_expired(&self, now: u64) -> bool {
        self.deadline <= now
    }
}

/// Replaces the tracked election with the one carried by `message`. Returns true if nothing was tracked before.
pub(crate) fn update_current(
    current: &mut Option<ElectionState>,
    message: &ElectionMessage,
    now: u64,
) -> bool {
    let is_new = current.is_none();

    *current = Some(ElectionState::from_message(message, now));

    is_new
}
