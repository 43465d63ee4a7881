use std::collections::BTreeSet;

/// Majority of the node itself plus its live peers.
pub fn quorum_size(peer_count: u32) -> u32 {
    (peer_count + 1) / 2 + 1
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Candidacy {
    pub term: u64,
    pub expires_at: u64,
}

/// Votes and abstentions gathered for the own candidacy of the node.
/// Every peer is counted once per candidacy, whatever it answered.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct VoteTally {
    pub vote_count: u32,
    pub abstain_count: u32,
    candidacy: Option<Candidacy>,
    voters: BTreeSet<u64>,
}

impl Default for VoteTally {
    fn default() -> Self {
        VoteTally {
            vote_count: 1, // own vote
            abstain_count: 0,
            candidacy: None,
            voters: BTreeSet::new(),
        }
    }
}

impl VoteTally {
    pub fn start_candidacy(&mut self, term: u64, expires_at: u64) {
        *self = VoteTally::default();
        self.candidacy = Some(Candidacy { term, expires_at });
    }

    pub fn candidacy(&self) -> Option<Candidacy> {
        self.candidacy
    }

    pub fn is_candidate_for(&self, term: u64) -> bool {
        match self.candidacy {
            Some(candidacy) => candidacy.term == term,
            None => false,
        }
    }

    /// Counts a nomination. Returns None if the voter already answered.
    pub fn add_vote(&mut self, voter_id: u64) -> Option<u32> {
        if !self.voters.insert(voter_id) {
            return None;
        }
        self.vote_count += 1;
        Some(self.vote_count)
    }

    /// Counts an abstention. Returns None if the voter already answered.
    pub fn add_abstain(&mut self, voter_id: u64) -> Option<u32> {
        if !self.voters.insert(voter_id) {
            return None;
        }
        self.abstain_count += 1;
        Some(self.abstain_count)
    }

    pub fn reset(&mut self) {
        *self = VoteTally::default();
    }
}
