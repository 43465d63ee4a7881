use flood_election::{ElectionListener, NodeRole};
use parking_lot::Mutex;
use std::sync::Arc;

/// Outcome reported by the election engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Conclusion {
    pub success: bool,
    pub winner_id: Option<u64>,
}

#[derive(Debug, Default)]
struct ListenerState {
    term: u64,
    log_index: u64,
    role: NodeRole,
    leader: Option<u64>,
    conclusions: Vec<Conclusion>,
}

/// Keeps role, term and leader of a node in memory and records every election outcome.
/// Clones share the same state, so a copy can be kept for inspection after the node starts.
#[derive(Clone, Debug, Default)]
pub struct MemoryElectionListener {
    node_id: u64,
    state: Arc<Mutex<ListenerState>>,
}

impl MemoryElectionListener {
    pub fn new(node_id: u64) -> MemoryElectionListener {
        MemoryElectionListener {
            node_id,
            state: Arc::new(Mutex::new(ListenerState::default())),
        }
    }

    /// Sets the last index of the node log, compared against candidate logs when voting.
    pub fn set_last_log_index(&self, log_index: u64) {
        self.state.lock().log_index = log_index;
    }

    pub fn conclusions(&self) -> Vec<Conclusion> {
        self.state.lock().conclusions.clone()
    }

    pub fn last_conclusion(&self) -> Option<Conclusion> {
        self.state.lock().conclusions.last().cloned()
    }
}

impl ElectionListener for MemoryElectionListener {
    fn last_known_term(&self) -> u64 {
        self.state.lock().term
    }

    fn last_known_log_index(&self) -> u64 {
        self.state.lock().log_index
    }

    fn set_last_known_term(&self, term: u64) {
        self.state.lock().term = term;
    }

    fn role(&self) -> NodeRole {
        self.state.lock().role
    }

    fn set_role(&self, role: NodeRole) {
        let mut state = self.state.lock();
        if state.role != role {
            info!("Node {} Status changed to {}", self.node_id, role);
        }
        state.role = role;
        if role == NodeRole::Leader {
            state.leader = Some(self.node_id);
        }
    }

    fn current_leader(&self) -> Option<u64> {
        self.state.lock().leader
    }

    fn on_concluded(&self, success: bool, winner_id: Option<u64>) {
        let mut state = self.state.lock();

        info!(
            "Node {} election concluded. Success: {}, winner: {:?}",
            self.node_id, success, winner_id
        );

        state.leader = if success { winner_id } else { None };
        state.conclusions.push(Conclusion { success, winner_id });
    }
}
