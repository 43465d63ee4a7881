use parking_lot::Mutex;
use std::convert::TryFrom;
use std::fmt;
use std::time::Duration;

use crate::communication::messages::{
    ElectAction, ElectionMessage, ManagementMessage, MessageHeader,
};
use crate::election::path::next_route;
use crate::election::quorum::{quorum_size, VoteTally};
use crate::election::state::{update_current, ElectionState};
use crate::election::{Clock, ElectionListener, NodeRole, PeerDirectory, TermGenerator};
use crate::node::configuration::ElectionConfiguration;


#[derive(Debug, Default)]
struct ElectionCore {
    current: Option<ElectionState>,
    tally: VoteTally,
}

/// Flooding election with Raft-style terms for a single node.
///
/// Every inbound message yields at most one outbound message. All state changes happen under
/// a single lock; the returned message is sent by the caller after the lock is released.
pub struct FloodElection<Tg, Pd, El, Ck>
where
    Tg: TermGenerator,
    Pd: PeerDirectory,
    El: ElectionListener,
    Ck: Clock,
{
    config: ElectionConfiguration,
    term_generator: Tg,
    peer_directory: Pd,
    listener: El,
    clock: Ck,
    core: Mutex<ElectionCore>,
}

impl<Tg, Pd, El, Ck> FloodElection<Tg, Pd, El, Ck>
where
    Tg: TermGenerator,
    Pd: PeerDirectory,
    El: ElectionListener,
    Ck: Clock,
{
    pub fn new(
        config: ElectionConfiguration,
        term_generator: Tg,
        peer_directory: Pd,
        listener: El,
        clock: Ck,
    ) -> FloodElection<Tg, Pd, El, Ck> {
        FloodElection {
            config,
            term_generator,
            peer_directory,
            listener,
            clock,
            core: Mutex::new(ElectionCore::default()),
        }
    }

    pub fn node_id(&self) -> u64 {
        self.config.node_id
    }

    pub fn configuration(&self) -> &ElectionConfiguration {
        &self.config
    }

    pub fn listener(&self) -> &El {
        &self.listener
    }

    /// Processes a management message and returns the reply to flood, if any.
    pub fn handle_inbound(&self, message: &ManagementMessage) -> Option<ManagementMessage> {
        let request = message.election.as_ref()?;
        let now = self.clock.now_millis();

        let mut core = self.core.lock();
        match request.action {
            ElectAction::DeclareElection => {
                self.on_declare_election(&mut core, message, request, now)
            }
            ElectAction::DeclareVoid => {
                self.on_declare_void(&mut core, request);
                None
            }
            ElectAction::DeclareWinner => {
                self.on_declare_winner(&mut core, request, now);
                None
            }
            ElectAction::Abstain => self.on_abstain(&mut core, message, request, now),
            ElectAction::Nominate => self.on_nominate(&mut core, message, request, now),
        }
    }

    /// Starts an election with this node as the candidate.
    pub fn initiate(&self, description: &str, max_hops: i32) -> ManagementMessage {
        let node_id = self.config.node_id;
        let now = self.clock.now_millis();

        let mut core = self.core.lock();
        let term = self.term_generator.next_term();
        let expires_at = now.saturating_add(duration_millis(self.config.election_duration));

        core.tally.start_candidacy(term, expires_at);
        self.listener.set_last_known_term(term);
        self.listener.set_role(NodeRole::Candidate);

        let declaration = ElectionMessage {
            term,
            action: ElectAction::DeclareElection,
            candidate_id: node_id,
            last_log_index: self.listener.last_known_log_index(),
            expires_at,
            description: description.to_string(),
            hops_remaining: max_hops,
            path: Vec::new(),
        };
        update_current(&mut core.current, &declaration, now);

        info!(
            "Node {} Status changed to Candidate for term {}. Max hops: {}",
            node_id, term, max_hops
        );

        let quorum = quorum_size(self.peer_directory.connected_peer_count());
        if core.tally.vote_count >= quorum {
            info!(
                "Leader election - own vote is a quorum ({}) for Node {}, term {}",
                quorum, node_id, term
            );
            self.notify(true, Some(node_id));
            self.listener.set_role(NodeRole::Leader);
            core.current = None;
            core.tally.reset();

            let winner = ElectionMessage {
                action: ElectAction::DeclareWinner,
                ..declaration
            };
            return self.envelope(node_id, winner, now);
        }

        self.envelope(node_id, declaration, now)
    }

    /// True while an active election is tracked. An election concluded by a received
    /// `DeclareWinner` stays tracked but inactive and is not reported as in progress.
    pub fn is_election_in_progress(&self) -> bool {
        let core = self.core.lock();

        core.current.as_ref().map_or(false, |state| state.active)
    }

    /// Forgets the tracked election.
    pub fn clear(&self) {
        let mut core = self.core.lock();

        core.current = None;
    }

    /// Candidate of the tracked election, reported only while the last seen action was a declaration.
    pub fn current_candidate(&self) -> Option<u64> {
        let core = self.core.lock();

        match &core.current {
            Some(state) if state.last_action == ElectAction::DeclareElection => {
                Some(state.candidate_id)
            }
            _ => None,
        }
    }

    pub fn election_id(&self) -> u64 {
        self.listener.last_known_term()
    }

    pub fn create_election_id(&self) -> u64 {
        self.term_generator.next_term()
    }

    pub fn election_state(&self) -> Option<ElectionState> {
        self.core.lock().current.clone()
    }

    /// (votes, abstentions) of the own candidacy.
    pub fn tally(&self) -> (u32, u32) {
        let core = self.core.lock();

        (core.tally.vote_count, core.tally.abstain_count)
    }

    /// Drops the tracked election and abandons the own candidacy once their deadlines passed.
    /// Returns true if anything was removed.
    pub fn sweep_expired(&self) -> bool {
        let node_id = self.config.node_id;
        let now = self.clock.now_millis();

        let mut core = self.core.lock();
        let mut swept = false;

        if let Some(candidacy) = core.tally.candidacy() {
            if candidacy.expires_at <= now {
                info!(
                    "Node {} candidacy for term {} expired without a conclusion",
                    node_id, candidacy.term
                );
                core.tally.reset();
                if self.listener.role() == NodeRole::Candidate {
                    self.listener.set_role(NodeRole::Follower);
                }
                self.notify(false, None);
                swept = true;
            }
        }

        let state_expired = core
            .current
            .as_ref()
            .map_or(false, |state| state.is_expired(now));
        if state_expired {
            trace!("Node {} dropping expired election state", node_id);
            core.current = None;
            swept = true;
        }

        swept
    }

    fn on_declare_election(
        &self,
        core: &mut ElectionCore,
        message: &ManagementMessage,
        request: &ElectionMessage,
        now: u64,
    ) -> Option<ManagementMessage> {
        let node_id = self.config.node_id;

        // the declaration already reached this node by another route
        if request.visited(node_id) {
            trace!(
                "Node {} already in the path of election for term {}",
                node_id,
                request.term
            );
            return None;
        }

        info!(
            "Node {} Election declared. Term: {}, last log index: {}, from: Node {}, expires: {}, \
             nominates: Node {}, desc: {}, path: {}",
            node_id,
            request.term,
            request.last_log_index,
            message.header.originator,
            request.expires_at,
            request.candidate_id,
            request.description,
            request.format_path()
        );

        if update_current(&mut core.current, request, now) {
            trace!("Node {} started tracking election for term {}", node_id, request.term);
        }

        self.cast_vote(core, message, request, now)
    }

    fn cast_vote(
        &self,
        core: &ElectionCore,
        message: &ManagementMessage,
        request: &ElectionMessage,
        now: u64,
    ) -> Option<ManagementMessage> {
        let node_id = self.config.node_id;

        match &core.current {
            Some(state) if state.active => {}
            _ => return None,
        }

        if request.expires_at <= now {
            info!("Node {} says election expired - not voting", node_id);
            return None;
        }

        if !self.config.allow_cycles && request.has_cycle() {
            trace!("Node {} declaration came by a cyclic route - not voting", node_id);
            return None;
        }

        let action = if self.listener.last_known_term() < request.term
            && self.listener.last_known_log_index() <= request.last_log_index
        {
            self.listener.set_last_known_term(request.term);
            self.term_generator.advance_term_to(request.term);
            ElectAction::Nominate
        } else {
            ElectAction::Abstain
        };

        info!(
            "Node {} casting vote in election for term {}: {} Node {}",
            node_id, request.term, action, request.candidate_id
        );

        Some(self.reply(message, request, action, now))
    }

    fn on_declare_void(&self, core: &mut ElectionCore, request: &ElectionMessage) {
        info!(
            "Node {} Election for term {} declared void by Node {}",
            self.config.node_id, request.term, request.candidate_id
        );

        core.current = None;
        core.tally.reset();
        self.notify(false, None);
    }

    fn on_declare_winner(&self, core: &mut ElectionCore, request: &ElectionMessage, now: u64) {
        info!(
            "Node {} Election {}: Node {} is declared the leader",
            self.config.node_id, request.term, request.candidate_id
        );

        update_current(&mut core.current, request, now);
        self.listener.set_role(NodeRole::Follower);
        if let Some(state) = core.current.as_mut() {
            state.active = false;
        }
        core.tally.reset();
        self.notify(true, Some(request.candidate_id));
    }

    fn on_abstain(
        &self,
        core: &mut ElectionCore,
        message: &ManagementMessage,
        request: &ElectionMessage,
        now: u64,
    ) -> Option<ManagementMessage> {
        let node_id = self.config.node_id;
        if !self.is_own_candidacy(core, request) {
            return None;
        }

        let voter_id = self.voter(request)?;
        let abstain_count = core.tally.add_abstain(voter_id)?;
        let quorum = quorum_size(self.peer_directory.connected_peer_count());
        trace!(
            "Node {} abstentions for term {}: {}/{}",
            node_id,
            request.term,
            abstain_count,
            quorum
        );
        if abstain_count < quorum {
            return None;
        }

        info!(
            "Leader election failed for Node {}: abstain quorum ({}) for term {}",
            node_id, quorum, request.term
        );
        let void = self.reply(message, request, ElectAction::DeclareVoid, now);
        self.notify(false, Some(node_id));
        self.listener.set_role(NodeRole::Follower);
        core.current = None;
        core.tally.reset();

        Some(void)
    }

    fn on_nominate(
        &self,
        core: &mut ElectionCore,
        message: &ManagementMessage,
        request: &ElectionMessage,
        now: u64,
    ) -> Option<ManagementMessage> {
        let node_id = self.config.node_id;
        if !self.is_own_candidacy(core, request) {
            return None;
        }

        let voter_id = self.voter(request)?;
        let vote_count = core.tally.add_vote(voter_id)?;
        let quorum = quorum_size(self.peer_directory.connected_peer_count());
        trace!(
            "Node {} votes for term {}: {}/{}",
            node_id,
            request.term,
            vote_count,
            quorum
        );
        if vote_count < quorum {
            return None;
        }

        info!(
            "Leader election - quorum ({}) gathered for Node {}, term {}",
            quorum, node_id, request.term
        );
        let winner = self.reply(message, request, ElectAction::DeclareWinner, now);
        self.notify(true, Some(node_id));
        self.listener.set_role(NodeRole::Leader);
        core.current = None;
        core.tally.reset();

        Some(winner)
    }

    // votes for another candidate or for a concluded candidacy are not counted
    fn is_own_candidacy(&self, core: &ElectionCore, request: &ElectionMessage) -> bool {
        if request.candidate_id != self.config.node_id {
            return false;
        }
        if !core.tally.is_candidate_for(request.term) {
            trace!(
                "Node {} ignoring {} for term {}: no such candidacy",
                self.config.node_id,
                request.action,
                request.term
            );
            return false;
        }

        true
    }

    // the voter is the last node on the path, a repeated answer is not counted again
    fn voter(&self, request: &ElectionMessage) -> Option<u64> {
        let voter_id = request.path.last().map(|entry| entry.node_id);
        if voter_id.is_none() {
            trace!(
                "Node {} ignoring {} for term {}: no voter on the path",
                self.config.node_id,
                request.action,
                request.term
            );
        }

        voter_id
    }

    fn reply(
        &self,
        message: &ManagementMessage,
        request: &ElectionMessage,
        action: ElectAction,
        now: u64,
    ) -> ManagementMessage {
        let route = next_route(request, self.config.node_id, now);

        let election = ElectionMessage {
            term: request.term,
            action,
            candidate_id: request.candidate_id,
            last_log_index: request.last_log_index,
            expires_at: request.expires_at,
            description: request.description.clone(),
            hops_remaining: route.hops_remaining,
            path: route.path,
        };

        self.envelope(message.header.originator, election, now)
    }

    fn envelope(&self, originator: u64, election: ElectionMessage, now: u64) -> ManagementMessage {
        ManagementMessage {
            header: MessageHeader {
                originator,
                time: now,
            },
            election: Some(election),
        }
    }

    fn notify(&self, success: bool, winner_id: Option<u64>) {
        self.listener.on_concluded(success, winner_id);
    }
}

fn duration_millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

impl<Tg, Pd, El, Ck> fmt::Debug for FloodElection<Tg, Pd, El, Ck>
where
    Tg: TermGenerator,
    Pd: PeerDirectory,
    El: ElectionListener,
    Ck: Clock,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let core = self.core.lock();
        f.debug_struct("FloodElection")
            .field("config", &self.config)
            .field("current", &core.current)
            .field("tally", &core.tally)
            .finish()
    }
}
