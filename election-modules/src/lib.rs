//! In-memory implementations of the collaborators of a flood-election node: term generation,
//! the election listener, election timers and an in-process management network.

#[macro_use]
extern crate log;
extern crate crossbeam_channel;
extern crate flood_election;

mod communication;
mod election;
mod listener;
mod term;

pub use communication::inproc_network::{InProcNetwork, NodeConnections};
pub use communication::topology::Topology;
pub use election::fixed_election_timer::FixedElectionTimer;
pub use election::randomized_election_timer::RandomizedElectionTimer;
pub use listener::{Conclusion, MemoryElectionListener};
pub use term::IncrementalTermGenerator;
