//! Engine components: the logical relationship graph and the geographic clusters.

pub mod geo_cluster;
pub mod network_graph;
