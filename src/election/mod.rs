use derive_more::Display;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

pub mod engine;
pub mod path;
pub mod quorum;
pub mod state;

/// Operating role of the node. Stored by the ElectionListener, driven by the engine.
#[derive(Copy, Clone, Debug, Display, PartialEq, Eq, Hash)]
pub enum NodeRole {
    #[display(fmt = "Follower")]
    Follower,
    #[display(fmt = "Candidate")]
    Candidate,
    #[display(fmt = "Leader")]
    Leader,
}

impl Default for NodeRole {
    fn default() -> Self {
        NodeRole::Follower
    }
}

/// Hands out strictly increasing election terms.
pub trait TermGenerator: Send + Sync + 'static {
    fn next_term(&self) -> u64;
    /// Fast-forwards the generator so the next term is greater than `term`.
    fn advance_term_to(&self, term: u64);
}

/// Live view of the management connections of the node.
pub trait PeerDirectory: Send + Sync + 'static {
    fn connected_peer_count(&self) -> u32;
}

/// Owner of the node role, the last known term and the log position. Receives election outcomes.
///
/// Callbacks are invoked while the engine holds its lock and must not call back into the engine.
pub trait ElectionListener: Send + Sync + 'static {
    fn last_known_term(&self) -> u64;
    fn last_known_log_index(&self) -> u64;
    fn set_last_known_term(&self, term: u64);
    fn role(&self) -> NodeRole;
    fn set_role(&self, role: NodeRole);
    fn current_leader(&self) -> Option<u64>;
    fn on_concluded(&self, success: bool, winner_id: Option<u64>);
}

/// Millisecond wall clock used for deadlines and path timestamps.
pub trait Clock: Send + Sync + 'static {
    fn now_millis(&self) -> u64;
}

/// Provides the time a node waits without a known leader before nominating itself.
pub trait ElectionTimer: Send + 'static {
    fn next_election_timeout(&self) -> Duration;
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| elapsed.as_millis() as u64)
            .unwrap_or(0)
    }
}
