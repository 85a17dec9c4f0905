//! Cloud controller: the top-level façade over one virtual network.
//!
//! The controller does not keep its own node list. Its network holds the only
//! list, and because the network is exposed read-only, every membership change
//! goes through [`CloudController::add_node`]. Replication and alert broadcast
//! therefore always reach the same set of nodes.

use std::sync::Arc;

use crate::{
    events::{CloudEvent, SharedSink, TracingSink},
    network::VirtualNetwork,
    node::{NodeRef, StorageNode},
    status::CloudStatus,
};

pub const DEFAULT_CLOUD_NAME: &str = "CommunityWatchCloud";

/// Prefix added to every alert sent through [`CloudController::broadcast_alert`].
pub const ALERT_PREFIX: &str = "ALERT: ";

#[derive(Debug)]
pub struct CloudController {
    name: String,
    network: VirtualNetwork,
}

impl CloudController {
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_sink(name, TracingSink::shared())
    }

    /// Builds a controller whose network and nodes all report to `events`.
    pub fn with_sink(name: impl Into<String>, events: SharedSink) -> Self {
        let name = name.into();
        let network = VirtualNetwork::with_sink(format!("{name}-Network"), Arc::clone(&events));
        events.emit(&CloudEvent::CloudInitialized { cloud: name.clone() });
        Self { name, network }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn network(&self) -> &VirtualNetwork {
        &self.network
    }

    pub fn nodes(&self) -> &[NodeRef] {
        self.network.nodes()
    }

    /// Creates a node and attaches it to the network. Names are not checked
    /// for uniqueness.
    pub fn add_node(&mut self, name: impl Into<String>) -> NodeRef {
        let node = StorageNode::shared(name, Arc::clone(self.events()));
        self.network.add_node(Arc::clone(&node));
        self.events().emit(&CloudEvent::NodeAttached {
            cloud: self.name.clone(),
            node: node.name().to_string(),
        });
        node
    }

    pub fn list_nodes(&self) -> Vec<String> {
        self.network.list_nodes()
    }

    /// Replicates `data` by storing it on each node directly, without going
    /// through the network broadcast.
    pub fn store_global_data(&self, data: impl Into<String>) {
        let data = data.into();
        for node in self.nodes() {
            node.store_data(data.as_str());
        }
        self.events().emit(&CloudEvent::ReplicationCompleted {
            cloud: self.name.clone(),
            data,
            replicas: self.nodes().len(),
        });
    }

    pub fn broadcast_alert(&self, alert: impl AsRef<str>) {
        let alert = alert.as_ref();
        self.network.broadcast(format!("{ALERT_PREFIX}{alert}"));
        self.events().emit(&CloudEvent::AlertBroadcast {
            cloud: self.name.clone(),
            alert: alert.to_string(),
        });
    }

    /// Gathers every stored item, node by node in controller order.
    pub fn collect_all_data(&self) -> Vec<String> {
        let data = self.network.collect_data();
        self.events().emit(&CloudEvent::DataCollected {
            cloud: self.name.clone(),
            items: data.len(),
        });
        data
    }

    pub fn status(&self) -> CloudStatus {
        let network = self.network.status();
        CloudStatus {
            cloud_name: self.name.clone(),
            network_name: network.network_name,
            node_count: network.node_count,
            nodes: network.nodes,
        }
    }

    fn events(&self) -> &SharedSink {
        self.network.events()
    }
}

impl Default for CloudController {
    fn default() -> Self {
        Self::new(DEFAULT_CLOUD_NAME)
    }
}
