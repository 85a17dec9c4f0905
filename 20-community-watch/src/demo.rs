//! Controller walkthrough driven by the `demo` subcommand.

use std::{io::Write, sync::Arc};

use anyhow::{Context, Result};
use serde::Serialize;

use crate::{
    cli::{DemoArgs, OutputFormat},
    controller::CloudController,
    events::{JsonLinesSink, SharedSink, TracingSink},
    status::CloudStatus,
};

#[derive(Debug, Serialize)]
pub struct DemoReport {
    pub collected: Vec<String>,
    pub status: CloudStatus,
}

/// Builds the cloud described by `args`, replicates, alerts, and collects.
pub fn execute(args: &DemoArgs, events: SharedSink) -> DemoReport {
    let mut cloud = CloudController::with_sink(args.cloud_name.as_str(), events);
    for name in &args.nodes {
        cloud.add_node(name.as_str());
    }

    cloud.store_global_data(args.data.as_str());
    cloud.broadcast_alert(&args.alert);

    DemoReport {
        collected: cloud.collect_all_data(),
        status: cloud.status(),
    }
}

pub fn run<W: Write>(args: &DemoArgs, mut output: W) -> Result<()> {
    let events: SharedSink = if args.events {
        Arc::new(JsonLinesSink::stderr())
    } else {
        TracingSink::shared()
    };
    let report = execute(args, events);

    match args.format {
        OutputFormat::Text => render_text(&report, &mut output)?,
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut output, &report).context("failed to encode report")?;
            writeln!(output)?;
        }
    }

    output.flush()?;
    Ok(())
}

fn render_text<W: Write>(report: &DemoReport, output: &mut W) -> Result<()> {
    writeln!(output, "Collected Data from Cloud:")?;
    if report.collected.is_empty() {
        writeln!(output, "(none)")?;
    }
    for (idx, item) in report.collected.iter().enumerate() {
        writeln!(output, "{}. {item}", idx + 1)?;
    }
    writeln!(output)?;
    writeln!(output, "{}", report.status)?;
    Ok(())
}
