use std::{fmt, sync::Arc};

use crate::{
    events::{CloudEvent, SharedSink, TracingSink},
    node::NodeRef,
    status::NetworkStatus,
};

pub const DEFAULT_NETWORK_NAME: &str = "Virtual-Network";

/// Ordered set of node handles with fan-out delivery.
///
/// The list is authoritative: whoever owns the network owns membership.
/// Duplicate handles are kept, so a node registered twice receives every
/// broadcast twice.
pub struct VirtualNetwork {
    name: String,
    nodes: Vec<NodeRef>,
    events: SharedSink,
}

impl VirtualNetwork {
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_sink(name, TracingSink::shared())
    }

    pub fn with_sink(name: impl Into<String>, events: SharedSink) -> Self {
        let name = name.into();
        events.emit(&CloudEvent::NetworkCreated {
            network: name.clone(),
        });
        Self {
            name,
            nodes: Vec::new(),
            events,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn add_node(&mut self, node: NodeRef) {
        self.events.emit(&CloudEvent::NodeAdded {
            network: self.name.clone(),
            node: node.name().to_string(),
        });
        self.nodes.push(node);
    }

    /// Removes the first handle pointing at `node`. Absent nodes are reported
    /// and leave the list untouched.
    pub fn remove_node(&mut self, node: &NodeRef) {
        match self.nodes.iter().position(|member| Arc::ptr_eq(member, node)) {
            Some(index) => {
                self.nodes.remove(index);
                self.events.emit(&CloudEvent::NodeRemoved {
                    network: self.name.clone(),
                    node: node.name().to_string(),
                });
            }
            None => self.events.emit(&CloudEvent::NodeNotFound {
                network: self.name.clone(),
                node: node.name().to_string(),
            }),
        }
    }

    /// Stores `message` on every listed node, in list order.
    pub fn broadcast(&self, message: impl Into<String>) {
        let message = message.into();
        for node in &self.nodes {
            node.store_data(message.as_str());
        }
        self.events.emit(&CloudEvent::BroadcastSent {
            network: self.name.clone(),
            message,
            recipients: self.nodes.len(),
        });
    }

    pub fn list_nodes(&self) -> Vec<String> {
        self.nodes.iter().map(|node| node.name().to_string()).collect()
    }

    pub fn nodes(&self) -> &[NodeRef] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Concatenates the data of every listed node, in list order.
    pub fn collect_data(&self) -> Vec<String> {
        self.nodes
            .iter()
            .flat_map(|node| node.get_all_data())
            .collect()
    }

    pub fn status(&self) -> NetworkStatus {
        NetworkStatus {
            network_name: self.name.clone(),
            node_count: self.nodes.len(),
            nodes: self.nodes.iter().map(|node| node.status()).collect(),
        }
    }

    pub(crate) fn events(&self) -> &SharedSink {
        &self.events
    }
}

impl Default for VirtualNetwork {
    fn default() -> Self {
        Self::new(DEFAULT_NETWORK_NAME)
    }
}

impl fmt::Debug for VirtualNetwork {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VirtualNetwork")
            .field("name", &self.name)
            .field("nodes", &self.nodes)
            .finish()
    }
}
