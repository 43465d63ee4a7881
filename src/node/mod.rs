use crossbeam_channel::Receiver;
use std::sync::Arc;
use std::time::Instant;

use crate::common;
use crate::common::peer_notifier::notify_peers;
use crate::communication::messages::ManagementMessage;
use crate::communication::{InboundChannels, MessageTransport};
use crate::election::engine::FloodElection;
use crate::election::{Clock, ElectionListener, ElectionTimer, NodeRole, PeerDirectory, TermGenerator};
use crate::errors::ElectionError;

pub mod configuration;


use configuration::NodeConfiguration;

pub type NodeWorker = common::Worker;

struct NodeWorkerParams<Tg, Pd, El, Ck, Tr, Et>
where
    Tg: TermGenerator,
    Pd: PeerDirectory,
    El: ElectionListener,
    Ck: Clock,
    Tr: MessageTransport + InboundChannels,
    Et: ElectionTimer,
{
    engine: Arc<FloodElection<Tg, Pd, El, Ck>>,
    transport: Tr,
    inbound_rx: Receiver<ManagementMessage>,
    election_timer: Et,
    expiry_sweep_rx: Receiver<Instant>,
}

/// Validates the configuration and runs the election worker of a node in its own thread.
pub fn start<Tg, Pd, El, Ck, Tr, Et>(
    config: NodeConfiguration<Tg, Pd, El, Ck, Tr, Et>,
) -> Result<NodeWorker, ElectionError>
where
    Tg: TermGenerator,
    Pd: PeerDirectory,
    El: ElectionListener,
    Ck: Clock,
    Tr: MessageTransport + InboundChannels,
    Et: ElectionTimer,
{
    config.election.validate()?;

    let node_id = config.election.node_id;
    let inbound_rx = config.transport.inbound_rx(node_id);
    let expiry_sweep_rx = crossbeam_channel::tick(config.timings.expiry_sweep_interval);

    let engine = FloodElection::new(
        config.election,
        config.term_generator,
        config.peer_directory,
        config.listener,
        config.clock,
    );

    let params = NodeWorkerParams {
        engine: Arc::new(engine),
        transport: config.transport,
        inbound_rx,
        election_timer: config.election_timer,
        expiry_sweep_rx,
    };

    Ok(common::run_worker(run_node, params))
}

fn run_node<Tg, Pd, El, Ck, Tr, Et>(
    params: NodeWorkerParams<Tg, Pd, El, Ck, Tr, Et>,
    terminate_worker_rx: Receiver<()>,
) where
    Tg: TermGenerator,
    Pd: PeerDirectory,
    El: ElectionListener,
    Ck: Clock,
    Tr: MessageTransport + InboundChannels,
    Et: ElectionTimer,
{
    let node_id = params.engine.node_id();
    info!("Node {} election worker started", node_id);
    let mut election_deadline = Instant::now() + params.election_timer.next_election_timeout();
    loop {
        let timeout = crossbeam_channel::after(
            election_deadline.saturating_duration_since(Instant::now()),
        );
        select!(
            recv(terminate_worker_rx) -> res => {
                if res.is_err() {
                    error!("Abnormal exit for Node {} election worker", node_id);
                }
                break
            },
            recv(params.inbound_rx) -> res => {
                match res {
                    Ok(message) => {
                        let reply = params.engine.handle_inbound(&message);
                        if let Some(reply) = reply {
                            flood(&params, reply);
                        }
                    },
                    Err(err) => {
                        error!("Node {} inbound channel closed: {}", node_id, err);
                        break
                    }
                }
            },
            recv(params.expiry_sweep_rx) -> _ => {
                if params.engine.sweep_expired() {
                    trace!("Node {} swept expired election state", node_id);
                }
            },
            recv(timeout) -> _ => {
                propose_node_election(&params);
                election_deadline = Instant::now() + params.election_timer.next_election_timeout();
            },
        );
    }
    info!("Node {} election worker stopped", node_id);
}

fn propose_node_election<Tg, Pd, El, Ck, Tr, Et>(params: &NodeWorkerParams<Tg, Pd, El, Ck, Tr, Et>)
where
    Tg: TermGenerator,
    Pd: PeerDirectory,
    El: ElectionListener,
    Ck: Clock,
    Tr: MessageTransport + InboundChannels,
    Et: ElectionTimer,
{
    let engine = &params.engine;
    let listener = engine.listener();

    if listener.role() != NodeRole::Follower
        || listener.current_leader().is_some()
        || engine.is_election_in_progress()
    {
        return;
    }

    info!(
        "Node {} Leader awaiting time elapsed. Starting new election",
        engine.node_id()
    );

    let config = engine.configuration();
    let declaration = engine.initiate(&config.description, config.max_hops);
    flood(params, declaration);
}

fn flood<Tg, Pd, El, Ck, Tr, Et>(
    params: &NodeWorkerParams<Tg, Pd, El, Ck, Tr, Et>,
    message: ManagementMessage,
) where
    Tg: TermGenerator,
    Pd: PeerDirectory,
    El: ElectionListener,
    Ck: Clock,
    Tr: MessageTransport + InboundChannels,
    Et: ElectionTimer,
{
    let node_id = params.engine.node_id();
    let neighbours = params.transport.neighbours(node_id);
    let transport = &params.transport;

    let result = notify_peers(message, node_id, neighbours, |peer_id, msg| {
        transport.send_message(node_id, peer_id, msg)
    });

    if let Err(err) = result {
        warn!("Node {} flood incomplete: {}", node_id, err);
    }
}
