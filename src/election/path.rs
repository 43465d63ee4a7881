use crate::communication::messages::{ElectionMessage, PathEntry, UNLIMITED_HOPS};

/// Hop bookkeeping of an outbound election message.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Route {
    pub hops_remaining: i32,
    pub path: Vec<PathEntry>,
}

/// Hops left after one more traversal. Zero means the flood horizon is reached.
/// An exhausted budget (`0`) wraps to unlimited.
pub fn decrement_hops(hops_remaining: i32) -> i32 {
    match hops_remaining {
        UNLIMITED_HOPS => UNLIMITED_HOPS,
        hops => hops - 1,
    }
}

/// Builds the route of a reply to `inbound` sent by `node_id`.
///
/// On the horizon the message is turned back: the hop budget becomes the length of the
/// inbound path and the inbound path is not carried over. The sender is always appended.
pub fn next_route(inbound: &ElectionMessage, node_id: u64, now: u64) -> Route {
    let mut hops_remaining = decrement_hops(inbound.hops_remaining);
    let mut path = Vec::with_capacity(inbound.path.len() + 1);

    if hops_remaining == 0 {
        hops_remaining = inbound.path.len() as i32;
    } else {
        path.extend_from_slice(&inbound.path);
    }

    // duplicates are allowed when cycles are allowed
    path.push(PathEntry {
        node_id,
        term: inbound.term,
        time: now,
    });

    Route {
        hops_remaining,
        path,
    }
}
