use crate::steps;
use election_modules::Topology;
use flood_election::NodeRole;

pub fn run() {

	let cluster = steps::cluster::start_cluster(Topology::new(vec![1]), steps::node1_candidate);

	// no peers: the own vote is the quorum
	let elected = steps::wait_until(steps::default_wait(), || cluster.role(1) == NodeRole::Leader);
	cluster.log_status();

	assert!(elected);
	assert_eq!(Some(1), cluster.leader_seen_by(1));
	assert_eq!(0, cluster.network.delivered_messages());

	cluster.terminate();
}

#[cfg(test)]
mod tests {
	#[test]
	fn single_node_elects_itself() {
		super::run();
	}
}
