use std::{
    io::Write,
    process::{Command, Output, Stdio},
};

use anyhow::{Context, Result, anyhow};

fn run_binary(args: &[&str], stdin: &str) -> Result<Output> {
    let binary = assert_cmd::cargo::cargo_bin!("community_watch");

    let mut child = Command::new(binary)
        .args(args)
        .env("RUST_LOG", "warn")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .context("failed to spawn community_watch")?;

    child
        .stdin
        .take()
        .context("child stdin missing after spawn")?
        .write_all(stdin.as_bytes())
        .context("failed to feed stdin")?;

    let output = child
        .wait_with_output()
        .context("failed to wait for community_watch")?;
    if !output.status.success() {
        return Err(anyhow!(
            "community_watch exited with {}: {}",
            output.status,
            String::from_utf8_lossy(&output.stderr)
        ));
    }
    Ok(output)
}

#[test]
fn demo_prints_collected_data_and_status() -> Result<()> {
    let output = run_binary(&["demo", "--node", "A", "--node", "B", "--data", "x"], "")?;
    let stdout = String::from_utf8(output.stdout)?;

    let expected = "\
Collected Data from Cloud:
1. x
2. ALERT: Suspicious movement detected near Zone 3.
3. x
4. ALERT: Suspicious movement detected near Zone 3.

======== CLOUD STATUS ========
Cloud Name: CommunityWatchCloud
Network: CommunityWatchCloud-Network
Total Nodes: 2
 - Node: A | Items stored: 2
 - Node: B | Items stored: 2
================================
";
    assert_eq!(stdout, expected);
    Ok(())
}

#[test]
fn demo_event_stream_is_json_lines() -> Result<()> {
    let output = run_binary(&["demo", "--node", "A", "--events", "--format", "json"], "")?;

    let report: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(report["status"]["node_count"], 1);

    let stderr = String::from_utf8(output.stderr)?;
    let kinds: Vec<String> = stderr
        .lines()
        .filter(|line| line.starts_with('{'))
        .map(|line| -> Result<String> {
            let value: serde_json::Value = serde_json::from_str(line)?;
            Ok(value["event"].as_str().unwrap_or_default().to_string())
        })
        .collect::<Result<_>>()?;

    assert_eq!(kinds.first().map(String::as_str), Some("network_created"));
    assert!(kinds.iter().any(|kind| kind == "alert_broadcast"));
    assert_eq!(kinds.last().map(String::as_str), Some("data_collected"));
    Ok(())
}

#[test]
fn client_menu_session() -> Result<()> {
    let script = "2\n1\nopen garage door\nx\n3\nAna\n555-0100\n2\n4\n";
    let output = run_binary(&["client"], script)?;
    let stdout = String::from_utf8(output.stdout)?;

    assert!(stdout.contains("No alerts found."));
    assert!(stdout.contains("Invalid choice. Try again."));
    assert!(stdout.contains("1. New Alert: open garage door\n2. New Member: Ana - 555-0100\n"));
    assert!(stdout.trim_end().ends_with("Disconnecting client. Goodbye!"));
    Ok(())
}
