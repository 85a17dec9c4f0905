use std::{
    io::{BufRead, Write},
    sync::Arc,
};

use anyhow::{Context, Result};
use tracing::debug;

use crate::{
    events::{CloudEvent, SharedSink, TracingSink},
    menu::{MENU, MenuChoice},
    network::VirtualNetwork,
    node::{NodeRef, StorageNode},
};

pub const CLIENT_NETWORK_NAME: &str = "Client Side Network";
pub const CLIENT_NODE_NAME: &str = "Client Node";

/// Terminal-facing participant with its own network and storage node.
#[derive(Debug)]
pub struct WatchClient {
    network: VirtualNetwork,
    node: NodeRef,
}

impl WatchClient {
    pub fn new() -> Self {
        Self::with_sink(TracingSink::shared())
    }

    pub fn with_sink(events: SharedSink) -> Self {
        let mut network = VirtualNetwork::with_sink(CLIENT_NETWORK_NAME, Arc::clone(&events));
        let node = StorageNode::shared(CLIENT_NODE_NAME, Arc::clone(&events));
        network.add_node(Arc::clone(&node));
        events.emit(&CloudEvent::ClientConnected {
            network: network.name().to_string(),
            node: node.name().to_string(),
        });
        Self { network, node }
    }

    pub fn network(&self) -> &VirtualNetwork {
        &self.network
    }

    pub fn node(&self) -> &NodeRef {
        &self.node
    }

    pub fn send_alert(&self, message: &str) {
        self.network.broadcast(format!("New Alert: {message}"));
    }

    pub fn fetch_alerts(&self) -> Vec<String> {
        self.network.collect_data()
    }

    pub fn register_member(&self, name: &str, phone: &str) {
        self.network.broadcast(format!("New Member: {name} - {phone}"));
    }

    /// Runs the menu until the user exits or `input` is exhausted. Input that
    /// ends halfway through a prompt sequence broadcasts nothing.
    pub fn run<R, W>(&self, mut input: R, mut output: W) -> Result<()>
    where
        R: BufRead,
        W: Write,
    {
        loop {
            writeln!(output, "{MENU}")?;
            let Some(line) = prompt(&mut input, &mut output, "Enter your choice: ")? else {
                break;
            };

            match MenuChoice::parse(&line) {
                Ok(MenuChoice::SendAlert) => {
                    let label = "Describe the suspicious activity: ";
                    let Some(message) = prompt(&mut input, &mut output, label)? else {
                        break;
                    };
                    self.send_alert(&message);
                    writeln!(output, "Alert broadcasted.\n")?;
                }
                Ok(MenuChoice::ViewAlerts) => self.render_alerts(&mut output)?,
                Ok(MenuChoice::RegisterMember) => {
                    let Some(name) = prompt(&mut input, &mut output, "Enter member name: ")? else {
                        break;
                    };
                    let Some(phone) = prompt(&mut input, &mut output, "Enter phone number: ")? else {
                        break;
                    };
                    self.register_member(&name, &phone);
                    writeln!(output, "Member information broadcasted.\n")?;
                }
                Ok(MenuChoice::Exit) => break,
                Err(err) => {
                    debug!(%err, "rejected menu input");
                    writeln!(output, "Invalid choice. Try again.\n")?;
                }
            }
        }

        writeln!(output, "Disconnecting client. Goodbye!")?;
        output.flush().context("failed to flush client output")?;
        Ok(())
    }

    fn render_alerts<W: Write>(&self, output: &mut W) -> Result<()> {
        let alerts = self.fetch_alerts();
        writeln!(output, "\n--- ALERTS RECEIVED FROM NETWORK ---")?;
        if alerts.is_empty() {
            writeln!(output, "No alerts found.")?;
        } else {
            for (idx, alert) in alerts.iter().enumerate() {
                writeln!(output, "{}. {alert}", idx + 1)?;
            }
        }
        writeln!(output)?;
        Ok(())
    }
}

impl Default for WatchClient {
    fn default() -> Self {
        Self::new()
    }
}

/// Writes `label`, then reads one line with its line ending stripped.
/// Returns `None` at end of input.
fn prompt<R, W>(input: &mut R, output: &mut W, label: &str) -> Result<Option<String>>
where
    R: BufRead,
    W: Write,
{
    write!(output, "{label}")?;
    output.flush()?;

    let mut line = String::new();
    let bytes = input.read_line(&mut line).context("failed to read input")?;
    if bytes == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
}
