//! Point-in-time reports for nodes, networks and the cloud.

use std::fmt;

use serde::Serialize;

const FOOTER: &str = "================================";

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct NodeStatus {
    pub name: String,
    pub items: usize,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct NetworkStatus {
    pub network_name: String,
    pub node_count: usize,
    pub nodes: Vec<NodeStatus>,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct CloudStatus {
    pub cloud_name: String,
    pub network_name: String,
    pub node_count: usize,
    pub nodes: Vec<NodeStatus>,
}

impl fmt::Display for NodeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, " - Node: {} | Items stored: {}", self.name, self.items)
    }
}

impl fmt::Display for NetworkStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "======== NETWORK STATUS ========")?;
        writeln!(f, "Network Name: {}", self.network_name)?;
        writeln!(f, "Total Nodes: {}", self.node_count)?;
        for node in &self.nodes {
            writeln!(f, "{node}")?;
        }
        write!(f, "{FOOTER}")
    }
}

impl fmt::Display for CloudStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "======== CLOUD STATUS ========")?;
        writeln!(f, "Cloud Name: {}", self.cloud_name)?;
        writeln!(f, "Network: {}", self.network_name)?;
        writeln!(f, "Total Nodes: {}", self.node_count)?;
        for node in &self.nodes {
            writeln!(f, "{node}")?;
        }
        write!(f, "{FOOTER}")
    }
}
