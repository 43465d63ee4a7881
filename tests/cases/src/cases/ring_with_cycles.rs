use crate::steps;
use election_modules::Topology;
use flood_election::NodeRole;

pub fn run() {

	let cluster = steps::cluster::start_cluster(Topology::ring(vec![1, 2, 3, 4]), steps::node1_candidate);

	let elected = steps::wait_until(steps::default_wait(), || {
		cluster.leader_seen_by(2) == Some(1) && cluster.leader_seen_by(4) == Some(1)
	});
	cluster.log_status();

	assert!(elected);
	assert_eq!(NodeRole::Leader, cluster.role(1));
	assert_eq!(vec![1], cluster.leaders());

	// node 3 is two hops away and heard only the votes of its neighbours
	assert_eq!(NodeRole::Follower, cluster.role(3));
	assert_eq!(None, cluster.leader_seen_by(3));

	cluster.terminate();
}

#[cfg(test)]
mod tests {
	#[test]
	fn ring_elects_the_first_candidate() {
		super::run();
	}
}
