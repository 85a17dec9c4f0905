use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::controller::DEFAULT_CLOUD_NAME;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Build a cloud, replicate data, broadcast an alert and print its status.
    Demo(DemoArgs),
    /// Run the interactive community watch menu.
    Client,
}

#[derive(Args, Debug, Clone)]
pub struct DemoArgs {
    /// Name of the cloud; its network is named "<cloud>-Network".
    #[arg(long, default_value = DEFAULT_CLOUD_NAME)]
    pub cloud_name: String,

    /// Node to create. Repeat for several nodes, in order.
    #[arg(
        long = "node",
        value_name = "NAME",
        default_values_t = [
            "AdminNode".to_string(),
            "AlertNode".to_string(),
            "MembersNode".to_string(),
        ]
    )]
    pub nodes: Vec<String>,

    /// Item replicated to every node.
    #[arg(long, default_value = "Test replication message.")]
    pub data: String,

    /// Alert broadcast over the network.
    #[arg(long, default_value = "Suspicious movement detected near Zone 3.")]
    pub alert: String,

    /// How to print collected data and status.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Write every event to stderr as a JSON line.
    #[arg(long)]
    pub events: bool,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demo_defaults_match_walkthrough() {
        let cli = Cli::try_parse_from(["community_watch", "demo"]).expect("parse");
        let Command::Demo(args) = cli.command else {
            panic!("expected demo command");
        };
        assert_eq!(args.cloud_name, DEFAULT_CLOUD_NAME);
        assert_eq!(args.nodes, vec!["AdminNode", "AlertNode", "MembersNode"]);
        assert_eq!(args.format, OutputFormat::Text);
        assert!(!args.events);
    }

    #[test]
    fn repeated_node_flags_replace_defaults() {
        let cli = Cli::try_parse_from([
            "community_watch",
            "demo",
            "--node",
            "A",
            "--node",
            "B",
            "--format",
            "json",
        ])
        .expect("parse");
        let Command::Demo(args) = cli.command else {
            panic!("expected demo command");
        };
        assert_eq!(args.nodes, vec!["A", "B"]);
        assert_eq!(args.format, OutputFormat::Json);
    }
}
