use std::time::Duration;

use crate::communication::messages::UNLIMITED_HOPS;
use crate::communication::{InboundChannels, MessageTransport};
use crate::election::{Clock, ElectionListener, ElectionTimer, PeerDirectory, TermGenerator};
use crate::errors::{new_err, ElectionError};

/// Election parameters of a single node.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct ElectionConfiguration {
    pub node_id: u64,
    /// Hop limit of self-initiated elections, `-1` for unlimited.
    pub max_hops: i32,
    /// Whether a declaration that travelled a cyclic route (a node repeated in its path) still
    /// gets a vote. Allowing cycles can keep an election from converging on cyclic graphs.
    pub allow_cycles: bool,
    /// Lifetime of a self-initiated election.
    pub election_duration: Duration,
    pub description: String,
}

impl ElectionConfiguration {
    pub fn new(node_id: u64) -> ElectionConfiguration {
        ElectionConfiguration {
            node_id,
            max_hops: UNLIMITED_HOPS,
            allow_cycles: true,
            election_duration: Duration::from_secs(10),
            description: format!("Node {} election", node_id),
        }
    }

    pub fn validate(&self) -> Result<(), ElectionError> {
        if self.max_hops < UNLIMITED_HOPS || self.max_hops == 0 {
            return new_err(
                format!("Invalid election configuration for Node {}", self.node_id),
                format!("max_hops = {}", self.max_hops),
            );
        }
        if self.election_duration == Duration::from_millis(0) {
            return new_err(
                format!("Invalid election configuration for Node {}", self.node_id),
                "election_duration is zero".to_string(),
            );
        }

        Ok(())
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct NodeTimings {
    pub expiry_sweep_interval: Duration,
}

impl Default for NodeTimings {
    fn default() -> Self {
        NodeTimings {
            expiry_sweep_interval: Duration::from_millis(1000),
        }
    }
}

#[derive(Debug)]
pub struct NodeConfiguration<Tg, Pd, El, Ck, Tr, Et>
where
    Tg: TermGenerator,
    Pd: PeerDirectory,
    El: ElectionListener,
    Ck: Clock,
    Tr: MessageTransport + InboundChannels,
    Et: ElectionTimer,
{
    pub election: ElectionConfiguration,
    pub term_generator: Tg,
    pub peer_directory: Pd,
    pub listener: El,
    pub clock: Ck,
    pub transport: Tr,
    pub election_timer: Et,
    pub timings: NodeTimings,
}
