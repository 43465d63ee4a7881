use std::collections::BTreeSet;

/// Undirected management network layout.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Topology {
    nodes: BTreeSet<u64>,
    links: BTreeSet<(u64, u64)>,
}

impl Topology {
    pub fn new(nodes: Vec<u64>) -> Topology {
        Topology {
            nodes: nodes.into_iter().collect(),
            links: BTreeSet::new(),
        }
    }

    /// Every node connected to every other node.
    pub fn full_mesh(nodes: Vec<u64>) -> Topology {
        let mut topology = Topology::new(nodes.clone());
        for (position, first) in nodes.iter().enumerate() {
            for second in &nodes[position + 1..] {
                topology.link(*first, *second);
            }
        }

        topology
    }

    /// Nodes connected in order, without closing the cycle.
    pub fn line(nodes: Vec<u64>) -> Topology {
        let mut topology = Topology::new(nodes.clone());
        for pair in nodes.windows(2) {
            topology.link(pair[0], pair[1]);
        }

        topology
    }

    /// Line closed into a cycle.
    pub fn ring(nodes: Vec<u64>) -> Topology {
        let mut topology = Topology::line(nodes.clone());
        if let (Some(first), Some(last)) = (nodes.first(), nodes.last()) {
            if nodes.len() > 2 {
                topology.link(*first, *last);
            }
        }

        topology
    }

    pub fn link(&mut self, first: u64, second: u64) {
        if first == second {
            warn!("Topology - ignoring self link for Node {}", first);
            return;
        }
        self.nodes.insert(first);
        self.nodes.insert(second);
        self.links.insert(ordered(first, second));
    }

    pub fn nodes(&self) -> Vec<u64> {
        self.nodes.iter().cloned().collect()
    }

    pub fn links(&self) -> Vec<(u64, u64)> {
        self.links.iter().cloned().collect()
    }

    pub fn neighbours(&self, node_id: u64) -> Vec<u64> {
        self.links
            .iter()
            .filter_map(|(first, second)| {
                if *first == node_id {
                    Some(*second)
                } else if *second == node_id {
                    Some(*first)
                } else {
                    None
                }
            })
            .collect()
    }
}

fn ordered(first: u64, second: u64) -> (u64, u64) {
    if first < second {
        (first, second)
    } else {
        (second, first)
    }
}
