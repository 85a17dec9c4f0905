//! Structured events emitted by nodes, networks, controllers and clients.
//!
//! Components never print. Each one holds a [`SharedSink`] and reports what
//! happened through [`EventSink::emit`]; the sink decides where it goes.

use std::{
    io::Write,
    sync::{Arc, Mutex, PoisonError},
};

use crossbeam_channel::Sender;
use serde::Serialize;
use tracing::{debug, info, warn};

/// Sink shared by every component of one cloud.
pub type SharedSink = Arc<dyn EventSink>;

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum CloudEvent {
    NodeCreated { node: String },
    DataStored { node: String, item: String },
    StorageCleared { node: String },
    NetworkCreated { network: String },
    NodeAdded { network: String, node: String },
    NodeRemoved { network: String, node: String },
    NodeNotFound { network: String, node: String },
    BroadcastSent { network: String, message: String, recipients: usize },
    CloudInitialized { cloud: String },
    NodeAttached { cloud: String, node: String },
    ReplicationCompleted { cloud: String, data: String, replicas: usize },
    AlertBroadcast { cloud: String, alert: String },
    DataCollected { cloud: String, items: usize },
    ClientConnected { network: String, node: String },
}

pub trait EventSink: Send + Sync {
    fn emit(&self, event: &CloudEvent);
}

/// Default sink: forwards every event to `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl TracingSink {
    pub fn shared() -> SharedSink {
        Arc::new(Self)
    }
}

impl EventSink for TracingSink {
    fn emit(&self, event: &CloudEvent) {
        match event {
            CloudEvent::NodeCreated { node } => debug!(%node, "node created"),
            CloudEvent::DataStored { node, item } => debug!(%node, %item, "data stored"),
            CloudEvent::StorageCleared { node } => info!(%node, "storage cleared"),
            CloudEvent::NetworkCreated { network } => info!(%network, "network created"),
            CloudEvent::NodeAdded { network, node } => info!(%network, %node, "node added"),
            CloudEvent::NodeRemoved { network, node } => info!(%network, %node, "node removed"),
            CloudEvent::NodeNotFound { network, node } => {
                warn!(%network, %node, "node not found, nothing removed")
            }
            CloudEvent::BroadcastSent {
                network,
                message,
                recipients,
            } => info!(%network, %message, recipients, "broadcast delivered"),
            CloudEvent::CloudInitialized { cloud } => info!(%cloud, "cloud controller initialized"),
            CloudEvent::NodeAttached { cloud, node } => {
                info!(%cloud, %node, "node added to cloud and network")
            }
            CloudEvent::ReplicationCompleted {
                cloud,
                data,
                replicas,
            } => info!(%cloud, %data, replicas, "replication complete"),
            CloudEvent::AlertBroadcast { cloud, alert } => {
                info!(%cloud, %alert, "community alert broadcast")
            }
            CloudEvent::DataCollected { cloud, items } => {
                info!(%cloud, items, "collected data from all nodes")
            }
            CloudEvent::ClientConnected { network, node } => {
                info!(%network, %node, "client connected")
            }
        }
    }
}

/// Drops every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl EventSink for NullSink {
    fn emit(&self, _event: &CloudEvent) {}
}

/// Keeps events in memory so callers can inspect them afterwards.
#[derive(Debug, Default)]
pub struct RecordingSink {
    events: Mutex<Vec<CloudEvent>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of everything recorded so far, oldest first.
    pub fn events(&self) -> Vec<CloudEvent> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn clear(&self) {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

impl EventSink for RecordingSink {
    fn emit(&self, event: &CloudEvent) {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(event.clone());
    }
}

/// Forwards events to another thread over a crossbeam channel.
///
/// A disconnected receiver is not an error for the emitting component; the
/// event is dropped.
pub struct ChannelSink {
    tx: Sender<CloudEvent>,
}

impl ChannelSink {
    pub fn new(tx: Sender<CloudEvent>) -> Self {
        Self { tx }
    }
}

impl EventSink for ChannelSink {
    fn emit(&self, event: &CloudEvent) {
        if self.tx.send(event.clone()).is_err() {
            debug!("event receiver disconnected");
        }
    }
}

/// Writes each event as one JSON object per line.
pub struct JsonLinesSink {
    writer: Mutex<Box<dyn Write + Send>>,
}

impl JsonLinesSink {
    pub fn new<W>(writer: W) -> Self
    where
        W: Write + Send + 'static,
    {
        Self {
            writer: Mutex::new(Box::new(writer)),
        }
    }

    pub fn stderr() -> Self {
        Self::new(std::io::stderr())
    }
}

impl EventSink for JsonLinesSink {
    fn emit(&self, event: &CloudEvent) {
        let mut encoded = match serde_json::to_vec(event) {
            Ok(encoded) => encoded,
            Err(error) => {
                warn!(?error, "failed to encode event");
                return;
            }
        };
        encoded.push(b'\n');

        let mut writer = self.writer.lock().unwrap_or_else(PoisonError::into_inner);
        if let Err(error) = writer.write_all(&encoded).and_then(|()| writer.flush()) {
            warn!(?error, "failed to write event");
        }
    }
}
