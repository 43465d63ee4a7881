//! Flooding leader election with Raft-style terms.
//!
//! Nodes on an arbitrary management network flood election messages, cast at most one vote
//! per term and converge on a leader once a quorum of votes, computed from the live peer
//! count, is observed. The engine is transport agnostic: `FloodElection` turns one inbound
//! message into at most one outbound message, and `start_node` runs it on a worker thread
//! on top of a `MessageTransport`.

#![warn(missing_debug_implementations, unsafe_code)]

#[macro_use]
extern crate log;
#[macro_use]
extern crate crossbeam_channel;

mod common;
mod communication;
mod election;
mod errors;
mod node;

pub use communication::messages::{
    ElectAction, ElectionMessage, ManagementMessage, MessageHeader, PathEntry, UNLIMITED_HOPS,
};
pub use communication::{InboundChannels, MessageTransport};
pub use election::engine::FloodElection;
pub use election::path::{decrement_hops, next_route, Route};
pub use election::quorum::quorum_size;
pub use election::state::ElectionState;
pub use election::{
    Clock, ElectionListener, ElectionTimer, NodeRole, PeerDirectory, SystemClock, TermGenerator,
};
pub use errors::{new_err, ElectionError};
pub use node::configuration::{ElectionConfiguration, NodeConfiguration, NodeTimings};
pub use node::NodeWorker;

/// Starts the election worker of a node. Fails if the election configuration is invalid.
pub fn start_node<Tg, Pd, El, Ck, Tr, Et>(
    node_config: NodeConfiguration<Tg, Pd, El, Ck, Tr, Et>,
) -> Result<NodeWorker, ElectionError>
where
    Tg: TermGenerator,
    Pd: PeerDirectory,
    El: ElectionListener,
    Ck: Clock,
    Tr: MessageTransport + InboundChannels,
    Et: ElectionTimer,
{
    node::start(node_config)
}
