use election_modules::FixedElectionTimer;
use flood_election::ElectionConfiguration;
use std::thread;
use std::time::{Duration, Instant};

pub mod cluster;

/// Per-node parameters of a case cluster.
pub struct NodeSetup {
	pub election: ElectionConfiguration,
	pub election_timer: FixedElectionTimer,
	pub last_log_index: u64,
}

/// Node 1 nominates itself quickly, every other node waits long enough to only vote.
pub fn node1_candidate(node_id: u64) -> NodeSetup {
	NodeSetup {
		election: ElectionConfiguration::new(node_id),
		election_timer: election_timer(node_id),
		last_log_index: 0,
	}
}

pub fn election_timer(node_id: u64) -> FixedElectionTimer {
	if node_id == 1 {
		FixedElectionTimer::new(200)
	} else {
		FixedElectionTimer::new(30_000)
	}
}

pub fn sleep_millis(millis: u64) {
	thread::sleep(Duration::from_millis(millis));
}

pub fn default_wait() -> Duration {
	Duration::from_secs(5)
}

/// Polls `condition` until it holds or `timeout` elapses.
pub fn wait_until<F: Fn() -> bool>(timeout: Duration, condition: F) -> bool {
	let deadline = Instant::now() + timeout;
	while Instant::now() < deadline {
		if condition() {
			return true;
		}
		sleep_millis(50);
	}

	condition()
}
