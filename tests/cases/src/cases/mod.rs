pub mod full_mesh;
pub mod hop_limited_line;
pub mod partitioned_node;
pub mod ring_with_cycles;
pub mod single_node;
pub mod stale_candidate;
