use crate::steps;
use election_modules::Topology;
use flood_election::{ElectionListener, NodeRole};

pub fn run() {

	let cluster = steps::cluster::start_cluster(Topology::line(vec![1, 2, 3]), |node_id| {
		let mut setup = steps::node1_candidate(node_id);
		setup.election.max_hops = 1;

		setup
	});

	// the vote of node 2 reaches the horizon on its first hop and is turned back
	let elected = steps::wait_until(steps::default_wait(), || cluster.role(1) == NodeRole::Leader);
	cluster.log_status();

	assert!(elected);
	assert_eq!(Some(1), cluster.leader_seen_by(2));
	assert_eq!(1, cluster.listener(2).last_known_term());
	assert_eq!(None, cluster.leader_seen_by(3));

	cluster.terminate();
}

#[cfg(test)]
mod tests {
	#[test]
	fn hop_limited_election_is_won_by_reversed_votes() {
		super::run();
	}
}
