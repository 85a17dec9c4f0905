//! Virtual storage node.
//!
//! A node is the leaf of the cloud: a name plus an ordered list of opaque
//! string items. Networks and controllers share nodes through [`NodeRef`].

use std::{
    fmt,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};

use crate::{
    events::{CloudEvent, SharedSink, TracingSink},
    status::NodeStatus,
};

/// Shared handle to a node. Two handles are the same node when
/// [`Arc::ptr_eq`] holds, regardless of name.
pub type NodeRef = Arc<StorageNode>;

/// Append-only item store with a name.
///
/// Storage sits behind a `Mutex` so a [`NodeRef`] can be handed to several
/// threads; every append observes one whole item. Lock poisoning is
/// recovered because no operation here can leave the list half-written.
pub struct StorageNode {
    name: String,
    storage: Mutex<Vec<String>>,
    events: SharedSink,
}

impl StorageNode {
    /// Creates an empty node that reports through `tracing`.
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_sink(name, TracingSink::shared())
    }

    pub fn with_sink(name: impl Into<String>, events: SharedSink) -> Self {
        let name = name.into();
        events.emit(&CloudEvent::NodeCreated { node: name.clone() });
        Self {
            name,
            storage: Mutex::new(Vec::new()),
            events,
        }
    }

    /// Convenience for building a node that is about to be shared.
    pub fn shared(name: impl Into<String>, events: SharedSink) -> NodeRef {
        Arc::new(Self::with_sink(name, events))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Appends an item. Empty and duplicate items are stored as given.
    pub fn store_data(&self, item: impl Into<String>) {
        let item = item.into();
        self.storage().push(item.clone());
        self.events.emit(&CloudEvent::DataStored {
            node: self.name.clone(),
            item,
        });
    }

    /// Returns a copy of every stored item in arrival order.
    pub fn get_all_data(&self) -> Vec<String> {
        self.storage().clone()
    }

    pub fn clear_data(&self) {
        self.storage().clear();
        self.events.emit(&CloudEvent::StorageCleared {
            node: self.name.clone(),
        });
    }

    pub fn len(&self) -> usize {
        self.storage().len()
    }

    pub fn is_empty(&self) -> bool {
        self.storage().is_empty()
    }

    pub fn status(&self) -> NodeStatus {
        NodeStatus {
            name: self.name.clone(),
            items: self.len(),
        }
    }

    fn storage(&self) -> MutexGuard<'_, Vec<String>> {
        self.storage.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl fmt::Debug for StorageNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StorageNode")
            .field("name", &self.name)
            .field("items", &self.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::thread;

    use super::*;
    use crate::events::{NullSink, RecordingSink};

    fn quiet(name: &str) -> StorageNode {
        StorageNode::with_sink(name, Arc::new(NullSink))
    }

    #[test]
    fn stores_items_in_call_order() {
        let node = quiet("a");
        node.store_data("one");
        node.store_data("");
        node.store_data("one");

        assert_eq!(node.get_all_data(), vec!["one", "", "one"]);
        assert_eq!(node.len(), 3);
    }

    #[test]
    fn returned_data_is_a_copy() {
        let node = quiet("a");
        node.store_data("kept");

        let mut copy = node.get_all_data();
        copy.push("local only".into());
        copy[0].push_str(" and changed");

        assert_eq!(node.get_all_data(), vec!["kept"]);
    }

    #[test]
    fn empty_node_returns_empty_vec() {
        let node = quiet("a");
        assert!(node.get_all_data().is_empty());
        assert!(node.is_empty());
    }

    #[test]
    fn clear_is_idempotent() {
        let node = quiet("a");
        node.store_data("x");
        node.clear_data();
        assert!(node.get_all_data().is_empty());

        node.clear_data();
        assert!(node.get_all_data().is_empty());

        node.store_data("y");
        assert_eq!(node.get_all_data(), vec!["y"]);
    }

    #[test]
    fn emits_lifecycle_events() {
        let sink = Arc::new(RecordingSink::new());
        let node = StorageNode::with_sink("a", sink.clone());
        node.store_data("x");
        node.clear_data();

        assert_eq!(
            sink.events(),
            vec![
                CloudEvent::NodeCreated { node: "a".into() },
                CloudEvent::DataStored {
                    node: "a".into(),
                    item: "x".into()
                },
                CloudEvent::StorageCleared { node: "a".into() },
            ]
        );
    }

    #[test]
    fn concurrent_appends_are_all_kept() {
        let node: NodeRef = Arc::new(quiet("shared"));

        let workers: Vec<_> = (0..4)
            .map(|worker| {
                let node = Arc::clone(&node);
                thread::spawn(move || {
                    for i in 0..25 {
                        node.store_data(format!("{worker}-{i}"));
                    }
                })
            })
            .collect();
        for worker in workers {
            worker.join().expect("worker panicked");
        }

        let data = node.get_all_data();
        assert_eq!(data.len(), 100);
        for worker in 0..4 {
            let own: Vec<_> = data
                .iter()
                .filter(|item| item.starts_with(&format!("{worker}-")))
                .cloned()
                .collect();
            let expected: Vec<_> = (0..25).map(|i| format!("{worker}-{i}")).collect();
            assert_eq!(own, expected);
        }
    }

    #[test]
    fn default_node_starts_empty() {
        let node = StorageNode::new("AdminNode");
        assert_eq!(node.name(), "AdminNode");
        assert!(node.is_empty());

        node.store_data("x");
        assert_eq!(
            node.status(),
            NodeStatus {
                name: "AdminNode".into(),
                items: 1,
            }
        );
    }

    #[test]
    fn debug_shows_name_and_count() {
        let node = quiet("a");
        node.store_data("x");
        assert_eq!(format!("{node:?}"), r#"StorageNode { name: "a", items: 1 }"#);
    }
}
