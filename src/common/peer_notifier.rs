use rayon::prelude::*;

use crate::errors;
use crate::errors::ElectionError;

/// Sends `message` to every peer in parallel. Fails with the collected errors if any send failed.
pub fn notify_peers<Msg, Sender>(
    message: Msg,
    node_id: u64,
    peers: Vec<u64>,
    sender: Sender,
) -> Result<(), ElectionError>
where
    Sender: Fn(u64, Msg) -> Result<(), ElectionError> + Sync,
    Msg: Clone + Send + Sync,
{
    if peers.is_empty() {
        trace!("Node {} has no peers to notify", node_id);
        return Ok(());
    }

    let peer_count = peers.len();
    let errors: Vec<ElectionError> = peers
        .into_par_iter()
        .map(|peer_id| sender(peer_id, message.clone()))
        .filter_map(|result| result.err())
        .collect();

    if errors.is_empty() {
        return Ok(());
    }

    warn!(
        "Node {}: {} of {} peers were not notified",
        node_id,
        errors.len(),
        peer_count
    );
    errors::new_multiple_err(format!("Node {} cannot notify peers", node_id), errors)
}
