use election_modules::{IncrementalTermGenerator, InProcNetwork, MemoryElectionListener, Topology};
use flood_election::{ElectionListener, NodeConfiguration, NodeRole, NodeTimings, NodeWorker, SystemClock};
use std::collections::HashMap;
use std::time::Duration;

use super::NodeSetup;

pub struct CaseCluster {
	pub network: InProcNetwork,
	pub listeners: HashMap<u64, MemoryElectionListener>,
	pub node_workers: Vec<NodeWorker>,
}

pub fn start_cluster<F>(topology: Topology, node_setup: F) -> CaseCluster
where F: Fn(u64) -> NodeSetup {
	let network = InProcNetwork::new(&topology);

	let mut listeners = HashMap::new();
	let mut node_workers = Vec::new();

	for node_id in topology.nodes() {
		let setup = node_setup(node_id);

		let listener = MemoryElectionListener::new(node_id);
		listener.set_last_log_index(setup.last_log_index);

		let config = NodeConfiguration {
			election: setup.election,
			term_generator: IncrementalTermGenerator::default(),
			peer_directory: network.peer_directory(node_id),
			listener: listener.clone(),
			clock: SystemClock,
			transport: network.clone(),
			election_timer: setup.election_timer,
			timings: NodeTimings {
				expiry_sweep_interval: Duration::from_millis(100),
			},
		};

		let node_worker = flood_election::start_node(config).expect("node configuration is valid");

		node_workers.push(node_worker);
		listeners.insert(node_id, listener);
	}

	CaseCluster {
		network,
		listeners,
		node_workers,
	}
}

impl CaseCluster {
	pub fn listener(&self, node_id: u64) -> &MemoryElectionListener {
		&self.listeners[&node_id]
	}

	pub fn role(&self, node_id: u64) -> NodeRole {
		self.listener(node_id).role()
	}

	pub fn leader_seen_by(&self, node_id: u64) -> Option<u64> {
		self.listener(node_id).current_leader()
	}

	pub fn leaders(&self) -> Vec<u64> {
		let mut leaders: Vec<u64> = self
			.listeners
			.iter()
			.filter(|(_, listener)| listener.role() == NodeRole::Leader)
			.map(|(node_id, _)| *node_id)
			.collect();
		leaders.sort();

		leaders
	}

	pub fn log_status(&self) {
		let mut node_ids: Vec<&u64> = self.listeners.keys().collect();
		node_ids.sort();
		for node_id in node_ids {
			let listener = &self.listeners[node_id];
			info!(
				"--Node {}: role = {}, term = {}, leader = {:?}",
				node_id,
				listener.role(),
				listener.last_known_term(),
				listener.current_leader()
			);
		}
	}

	pub fn terminate(self) {
		for node_worker in self.node_workers {
			node_worker.terminate();
		}
	}
}
