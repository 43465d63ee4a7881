use flood_election::{new_err, ElectionError, ElectionTimer};
use rand::Rng;
use std::time::Duration;

/// Provides random time duration within a range, so nodes rarely nominate themselves together.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct RandomizedElectionTimer {
    range_start_ms: u64,
    range_stop_ms: u64,
}

impl RandomizedElectionTimer {
    /// Creates new RandomizedElectionTimer with the time range [start, stop) in milliseconds.
    pub fn new(range_start_ms: u64, range_stop_ms: u64) -> Result<RandomizedElectionTimer, ElectionError> {
        if range_start_ms >= range_stop_ms {
            return new_err(
                "Invalid election timer range".to_string(),
                format!(
                    "range_start_ms : {}, range_stop_ms : {}",
                    range_start_ms, range_stop_ms
                ),
            );
        }

        Ok(RandomizedElectionTimer {
            range_start_ms,
            range_stop_ms,
        })
    }
}

impl ElectionTimer for RandomizedElectionTimer {
    fn next_election_timeout(&self) -> Duration {
        let mut rng = rand::thread_rng();

        Duration::from_millis(rng.gen_range(self.range_start_ms, self.range_stop_ms))
    }
}
