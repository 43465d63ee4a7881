use derive_more::Display;
use std::collections::BTreeSet;

use crate::errors::{new_err, Result};

/// Hop limit value meaning the flood horizon is unbounded.
pub const UNLIMITED_HOPS: i32 = -1;

#[derive(Copy, Clone, Debug, Display, PartialEq, Eq, Hash)]
pub enum ElectAction {
    #[display(fmt = "DeclareElection")]
    DeclareElection,
    #[display(fmt = "Nominate")]
    Nominate,
    #[display(fmt = "Abstain")]
    Abstain,
    #[display(fmt = "DeclareWinner")]
    DeclareWinner,
    #[display(fmt = "DeclareVoid")]
    DeclareVoid,
}

/// One visited hop of an election message.
#[derive(Clone, Copy, Debug, Display, PartialEq, Eq)]
#[display(fmt = "Node {} ({},{})", node_id, term, time)]
pub struct PathEntry {
    pub node_id: u64,
    /// Term of the message when the hop was recorded.
    pub term: u64,
    pub time: u64,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ElectionMessage {
    pub term: u64,
    pub action: ElectAction,
    pub candidate_id: u64,
    pub last_log_index: u64,
    /// Absolute deadline in ms since the epoch.
    pub expires_at: u64,
    pub description: String,
    pub hops_remaining: i32,
    pub path: Vec<PathEntry>,
}

impl ElectionMessage {
    pub fn visited(&self, node_id: u64) -> bool {
        self.path.iter().any(|entry| entry.node_id == node_id)
    }

    /// True if some node appears more than once in the path.
    pub fn has_cycle(&self) -> bool {
        let mut seen = BTreeSet::new();

        !self.path.iter().all(|entry| seen.insert(entry.node_id))
    }

    /// Checks the fields the engine relies on. Called by transports when a message is decoded.
    pub fn validate(&self) -> Result<()> {
        if self.hops_remaining < UNLIMITED_HOPS {
            return new_err(
                format!("Invalid election message for term {}", self.term),
                format!("hops_remaining = {}", self.hops_remaining),
            );
        }
        if self.expires_at == 0 {
            return new_err(
                format!("Invalid election message for term {}", self.term),
                "expires_at is not set".to_string(),
            );
        }

        Ok(())
    }

    pub fn format_path(&self) -> String {
        let hops: Vec<String> = self.path.iter().map(|entry| entry.to_string()).collect();

        format!("[{}]", hops.join(", "))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MessageHeader {
    /// Node that started the flood this message belongs to.
    pub originator: u64,
    pub time: u64,
}

/// Unit exchanged over the management network.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ManagementMessage {
    pub header: MessageHeader,
    pub election: Option<ElectionMessage>,
}

impl ManagementMessage {
    pub fn validate(&self) -> Result<()> {
        match &self.election {
            Some(election) => election.validate(),
            None => Ok(()),
        }
    }
}
