use crossbeam_channel::{Receiver, Sender};
use flood_election::{
    new_err, ElectionError, InboundChannels, ManagementMessage, MessageTransport, PeerDirectory,
};
use parking_lot::Mutex;
use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use super::topology::Topology;

#[derive(Debug)]
struct NodeChannel {
    inbound_tx: Sender<ManagementMessage>,
    inbound_rx: Receiver<ManagementMessage>,
}

impl NodeChannel {
    fn new() -> NodeChannel {
        let (inbound_tx, inbound_rx) = crossbeam_channel::unbounded();

        NodeChannel {
            inbound_tx,
            inbound_rx,
        }
    }
}

#[derive(Debug, Default)]
struct NetworkInternal {
    links: HashMap<u64, BTreeSet<u64>>,
    channels: HashMap<u64, NodeChannel>,
    delivered: u64,
}

impl NetworkInternal {
    fn add_node(&mut self, node_id: u64) {
        self.links.entry(node_id).or_insert_with(BTreeSet::new);
        self.channels.entry(node_id).or_insert_with(NodeChannel::new);
    }

    fn neighbours(&self, node_id: u64) -> Vec<u64> {
        self.links
            .get(&node_id)
            .map(|peers| peers.iter().cloned().collect())
            .unwrap_or_else(Vec::new)
    }
}

/// In-process management network. Each node has an unbounded inbound queue; messages travel
/// only over live links, which can be cut and restored while nodes run.
#[derive(Clone, Debug, Default)]
pub struct InProcNetwork {
    network: Arc<Mutex<NetworkInternal>>,
}

impl InProcNetwork {
    pub fn new(topology: &Topology) -> InProcNetwork {
        let network = InProcNetwork::default();

        for node_id in topology.nodes() {
            network.add_node(node_id);
        }
        for (first, second) in topology.links() {
            network.connect(first, second);
        }

        network
    }

    pub fn add_node(&self, node_id: u64) {
        self.network.lock().add_node(node_id);
    }

    pub fn connect(&self, first: u64, second: u64) {
        let mut network = self.network.lock();
        network.add_node(first);
        network.add_node(second);

        if let Some(peers) = network.links.get_mut(&first) {
            peers.insert(second);
        }
        if let Some(peers) = network.links.get_mut(&second) {
            peers.insert(first);
        }
        trace!("Link Node {} <-> Node {} connected", first, second);
    }

    pub fn disconnect(&self, first: u64, second: u64) {
        let mut network = self.network.lock();

        if let Some(peers) = network.links.get_mut(&first) {
            peers.remove(&second);
        }
        if let Some(peers) = network.links.get_mut(&second) {
            peers.remove(&first);
        }
        trace!("Link Node {} <-> Node {} disconnected", first, second);
    }

    /// Cuts every link of the node.
    pub fn isolate(&self, node_id: u64) {
        for peer_id in self.neighbours(node_id) {
            self.disconnect(node_id, peer_id);
        }
    }

    /// Live connection count of the node, as seen by its election engine.
    pub fn peer_directory(&self, node_id: u64) -> NodeConnections {
        self.add_node(node_id);

        NodeConnections {
            node_id,
            network: self.clone(),
        }
    }

    /// Number of messages handed to inbound queues so far.
    pub fn delivered_messages(&self) -> u64 {
        self.network.lock().delivered
    }
}

impl MessageTransport for InProcNetwork {
    fn neighbours(&self, node_id: u64) -> Vec<u64> {
        self.network.lock().neighbours(node_id)
    }

    fn send_message(
        &self,
        source_node_id: u64,
        destination_node_id: u64,
        message: ManagementMessage,
    ) -> Result<(), ElectionError> {
        message.validate()?;

        let mut network = self.network.lock();
        let linked = network
            .links
            .get(&source_node_id)
            .map_or(false, |peers| peers.contains(&destination_node_id));
        if !linked {
            return new_err(
                format!(
                    "Cannot send message from Node {} to Node {}",
                    source_node_id, destination_node_id
                ),
                "no link".to_string(),
            );
        }

        let inbound_tx = match network.channels.get(&destination_node_id) {
            Some(channel) => channel.inbound_tx.clone(),
            None => {
                return new_err(
                    format!("Cannot send message to Node {}", destination_node_id),
                    "unknown node".to_string(),
                )
            }
        };

        trace!(
            "Node {} -> Node {}: {:?}",
            source_node_id,
            destination_node_id,
            message.election
        );
        if let Err(err) = inbound_tx.send(message) {
            return new_err(
                format!("Cannot send message to Node {}", destination_node_id),
                err.to_string(),
            );
        }
        network.delivered += 1;

        Ok(())
    }
}

impl InboundChannels for InProcNetwork {
    fn inbound_rx(&self, node_id: u64) -> Receiver<ManagementMessage> {
        let mut network = self.network.lock();
        network.add_node(node_id);

        network.channels[&node_id].inbound_rx.clone()
    }
}

/// PeerDirectory view of a single node over the in-process network.
#[derive(Clone, Debug)]
pub struct NodeConnections {
    node_id: u64,
    network: InProcNetwork,
}

impl PeerDirectory for NodeConnections {
    fn connected_peer_count(&self) -> u32 {
        self.network.neighbours(self.node_id).len() as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flood_election::{ElectAction, ElectionMessage, MessageHeader, UNLIMITED_HOPS};

    fn message(hops_remaining: i32) -> ManagementMessage {
        ManagementMessage {
            header: MessageHeader {
                originator: 1,
                time: 5,
            },
            election: Some(ElectionMessage {
                term: 1,
                action: ElectAction::DeclareElection,
                candidate_id: 1,
                last_log_index: 0,
                expires_at: 100,
                description: String::new(),
                hops_remaining,
                path: Vec::new(),
            }),
        }
    }

    #[test]
    fn linked_nodes_exchange_messages() {
        let network = InProcNetwork::new(&Topology::line(vec![1, 2, 3]));
        let inbound_rx = network.inbound_rx(2);

        network
            .send_message(1, 2, message(UNLIMITED_HOPS))
            .expect("message sent");

        assert_eq!(message(UNLIMITED_HOPS), inbound_rx.try_recv().expect("received"));
        assert_eq!(1, network.delivered_messages());
    }

    #[test]
    fn unlinked_nodes_cannot_talk() {
        let network = InProcNetwork::new(&Topology::line(vec![1, 2, 3]));

        let err = network
            .send_message(1, 3, message(UNLIMITED_HOPS))
            .unwrap_err();

        assert_eq!("no link", err.cause());
        assert_eq!(0, network.delivered_messages());
    }

    #[test]
    fn invalid_messages_are_rejected_on_delivery() {
        let network = InProcNetwork::new(&Topology::line(vec![1, 2]));

        assert!(network.send_message(1, 2, message(-5)).is_err());
    }

    #[test]
    fn peer_count_follows_links() {
        let network = InProcNetwork::new(&Topology::full_mesh(vec![1, 2, 3, 4]));
        let directory = network.peer_directory(1);
        assert_eq!(3, directory.connected_peer_count());

        network.disconnect(1, 2);
        assert_eq!(2, directory.connected_peer_count());
        assert_eq!(vec![3, 4], network.neighbours(1));

        network.isolate(1);
        assert_eq!(0, directory.connected_peer_count());
        assert_eq!(vec![3, 4], network.neighbours(2));

        network.connect(1, 2);
        assert_eq!(1, directory.connected_peer_count());
    }
}
