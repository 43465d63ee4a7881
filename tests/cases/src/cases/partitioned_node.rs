use crate::steps;
use election_modules::{FixedElectionTimer, Topology};
use flood_election::NodeRole;

pub fn run() {

	let cluster = steps::cluster::start_cluster(Topology::full_mesh(vec![1, 2, 3]), |node_id| {
		let mut setup = steps::node1_candidate(node_id);
		if node_id == 3 {
			setup.election_timer = FixedElectionTimer::new(500);
		}

		setup
	});
	cluster.network.isolate(3);

	// node 3 sees no peers and becomes the leader of its own partition
	let elected = steps::wait_until(steps::default_wait(), || {
		cluster.role(1) == NodeRole::Leader && cluster.role(3) == NodeRole::Leader
	});
	cluster.log_status();

	assert!(elected);
	assert_eq!(vec![1, 3], cluster.leaders());
	assert_eq!(Some(1), cluster.leader_seen_by(2));
	assert_eq!(Some(3), cluster.leader_seen_by(3));

	cluster.terminate();
}

#[cfg(test)]
mod tests {
	#[test]
	fn isolated_node_leads_its_own_partition() {
		super::run();
	}
}
