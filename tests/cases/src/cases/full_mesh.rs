use crate::steps;
use election_modules::Topology;
use flood_election::NodeRole;

pub fn run() {

	let node_ids = vec![1, 2, 3, 4, 5];
	let cluster = steps::cluster::start_cluster(Topology::full_mesh(node_ids.clone()), steps::node1_candidate);

	let converged = steps::wait_until(steps::default_wait(), || {
		node_ids.iter().all(|node_id| cluster.leader_seen_by(*node_id) == Some(1))
	});
	cluster.log_status();

	assert!(converged);
	assert_eq!(vec![1], cluster.leaders());
	for node_id in &node_ids[1..] {
		assert_eq!(NodeRole::Follower, cluster.role(*node_id));
	}

	// late votes for the concluded candidacy change nothing
	steps::sleep_millis(300);
	assert_eq!(vec![1], cluster.leaders());
	assert_eq!(1, cluster.listener(1).conclusions().len());

	cluster.terminate();
}

#[cfg(test)]
mod tests {
	#[test]
	fn full_mesh_agrees_on_a_single_leader() {
		super::run();
	}
}
