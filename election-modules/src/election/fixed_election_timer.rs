use flood_election::ElectionTimer;
use std::time::Duration;

/// Always waits the same time before self-nomination. Useful to pick the first candidate in tests.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct FixedElectionTimer {
    fixed_duration_ms: u64,
}

impl FixedElectionTimer {
    pub fn new(fixed_duration_ms: u64) -> FixedElectionTimer {
        FixedElectionTimer { fixed_duration_ms }
    }
}

impl ElectionTimer for FixedElectionTimer {
    fn next_election_timeout(&self) -> Duration {
        Duration::from_millis(self.fixed_duration_ms)
    }
}
