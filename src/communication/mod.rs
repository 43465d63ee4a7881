use crossbeam_channel::Receiver;

use crate::errors::ElectionError;
use messages::ManagementMessage;

pub mod messages;

/// Point-to-point delivery over the management network.
pub trait MessageTransport: Send + Sync + Clone + 'static {
    /// Nodes directly connected to `node_id`.
    fn neighbours(&self, node_id: u64) -> Vec<u64>;
    fn send_message(
        &self,
        source_node_id: u64,
        destination_node_id: u64,
        message: ManagementMessage,
    ) -> Result<(), ElectionError>;
}

pub trait InboundChannels {
    fn inbound_rx(&self, node_id: u64) -> Receiver<ManagementMessage>;
}
