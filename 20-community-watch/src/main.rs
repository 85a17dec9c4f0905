use std::io;

use anyhow::Result;
use clap::Parser;

use community_watch::{
    cli::{Cli, Command},
    client::WatchClient,
    demo,
};

fn init_tracing() {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    // Menu and report output own stdout.
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .try_init();
}

fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();
    match cli.command {
        Command::Demo(args) => demo::run(&args, io::stdout().lock())?,
        Command::Client => {
            let client = WatchClient::new();
            client.run(io::stdin().lock(), io::stdout().lock())?;
        }
    }

    Ok(())
}
