use crate::steps;
use election_modules::{Conclusion, Topology};
use flood_election::{ElectionListener, NodeRole};

pub fn run() {

	let cluster = steps::cluster::start_cluster(Topology::full_mesh(vec![1, 2, 3]), |node_id| {
		let mut setup = steps::node1_candidate(node_id);
		if node_id != 1 {
			setup.last_log_index = 5;
		}

		setup
	});

	let voided = Conclusion {
		success: false,
		winner_id: Some(1),
	};
	// peers with longer logs abstain and the candidate declares its election void
	let concluded = steps::wait_until(steps::default_wait(), || {
		cluster.listener(1).conclusions().contains(&voided)
	});
	cluster.log_status();

	assert!(concluded);
	assert_ne!(NodeRole::Leader, cluster.role(1));
	assert!(cluster.leaders().is_empty());
	assert!(cluster
		.listener(1)
		.conclusions()
		.iter()
		.all(|conclusion| !conclusion.success));
	assert_eq!(0, cluster.listener(2).last_known_term());

	cluster.terminate();
}

#[cfg(test)]
mod tests {
	#[test]
	fn outdated_candidate_never_leads() {
		super::run();
	}
}
