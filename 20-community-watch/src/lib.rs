//! In-memory storage cloud for a neighborhood watch demo.
//!
//! A [`controller::CloudController`] owns one [`network::VirtualNetwork`],
//! which in turn holds shared [`node::StorageNode`] handles. Nothing leaves
//! the process: "replication" and "broadcast" are direct calls that append
//! strings to each node's storage.
//!
//! - [`node`] stores ordered items behind a per-node lock.
//! - [`network`] keeps the authoritative node list and fans out broadcasts.
//! - [`controller`] adds nodes, replicates data, sends alerts, collects data.
//! - [`client`] is the terminal menu participant with its own network.
//! - [`events`] carries structured events to an injected sink.
//! - [`status`] holds the reports returned by `status()` calls.
//! - [`cli`] and [`demo`] back the `community_watch` binary.

pub mod cli;
pub mod client;
pub mod controller;
pub mod demo;
pub mod events;
pub mod menu;
pub mod network;
pub mod node;
pub mod status;
