pub mod inproc_network;
pub mod topology;
