use flood_election::TermGenerator;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Monotonic in-memory term source. Clones share the counter.
#[derive(Clone, Debug, Default)]
pub struct IncrementalTermGenerator {
    last_term: Arc<AtomicU64>,
}

impl IncrementalTermGenerator {
    /// Creates a generator whose first term is `last_term + 1`.
    pub fn new(last_term: u64) -> IncrementalTermGenerator {
        IncrementalTermGenerator {
            last_term: Arc::new(AtomicU64::new(last_term)),
        }
    }

    pub fn last_term(&self) -> u64 {
        self.last_term.load(Ordering::SeqCst)
    }
}

impl TermGenerator for IncrementalTermGenerator {
    fn next_term(&self) -> u64 {
        self.last_term.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn advance_term_to(&self, term: u64) {
        let previous = self.last_term.fetch_max(term, Ordering::SeqCst);
        if previous < term {
            trace!("Term generator advanced from {} to {}", previous, term);
        }
    }
}
