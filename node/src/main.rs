#[macro_use] extern crate log;
extern crate env_logger;
extern crate chrono;

use std::env;
use std::io::Write;
use std::thread;
use std::time::Duration;

use chrono::prelude::{DateTime, Local};

extern crate flood_election;
extern crate election_modules;

use flood_election::{ElectionConfiguration, ElectionError, ElectionListener, NodeConfiguration, NodeTimings, NodeWorker, SystemClock};

use election_modules::{IncrementalTermGenerator, InProcNetwork, MemoryElectionListener, RandomizedElectionTimer, Topology};


fn init_logger() {
    env_logger::builder()
        .format(|buf, record| {
            let now: DateTime<Local> = Local::now();
            writeln!(buf, "{:5}: {} - {}", record.level(), now.format("%H:%M:%S.%3f").to_string(), record.args())
        })
        .init();
}


fn main() {
    init_logger();

    let node_ids = vec![1, 2, 3, 4, 5];
    let layout = env::args().nth(1).unwrap_or_else(|| "mesh".to_string());
    let topology = match layout.as_str() {
        "ring" => Topology::ring(node_ids),
        "line" => Topology::line(node_ids),
        "mesh" => Topology::full_mesh(node_ids),
        other => {
            error!("Unknown topology '{}'. Expected: mesh, ring or line", other);
            return;
        }
    };

    info!("Cluster started. Topology: {}, links: {:?}", layout, topology.links());
    let network = InProcNetwork::new(&topology);

    let mut listeners = Vec::new();
    let mut node_workers = Vec::new();
    for node_id in topology.nodes() {
        let listener = MemoryElectionListener::new(node_id);
        match start_node(node_id, &network, listener.clone()) {
            Ok(node_worker) => node_workers.push(node_worker),
            Err(err) => {
                error!("Node {} failed to start: {}", node_id, err);
                continue;
            }
        }
        listeners.push((node_id, listener));
    }

    thread::sleep(get_observation_time());

    for (node_id, listener) in listeners.iter() {
        info!(
            "Node {}: role = {}, term = {}, leader = {:?}, elections = {}",
            node_id,
            listener.role(),
            listener.last_known_term(),
            listener.current_leader(),
            listener.conclusions().len()
        );
    }
    info!("Management messages delivered: {}", network.delivered_messages());

    for node_worker in node_workers {
        node_worker.terminate();
    }
}

fn start_node(node_id: u64, network: &InProcNetwork, listener: MemoryElectionListener) -> Result<NodeWorker, ElectionError> {
    let node_config = NodeConfiguration {
        election: ElectionConfiguration::new(node_id),
        term_generator: IncrementalTermGenerator::default(),
        peer_directory: network.peer_directory(node_id),
        listener,
        clock: SystemClock,
        transport: network.clone(),
        election_timer: RandomizedElectionTimer::new(1000, 4000)?,
        timings: NodeTimings::default(),
    };

    flood_election::start_node(node_config)
}

fn get_observation_time() -> Duration {
    Duration::from_secs(10)
}
