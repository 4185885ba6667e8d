use std::process::Stdio;

use anyhow::{Context as _, Result, bail};

pub mod brightnessctl;
pub mod procfs;
pub mod wpctl;

/// Runs a CLI tool to completion and returns what it printed on stdout.
async fn tool_output(program: &str, args: &[&str]) -> Result<String> {
    let output = tokio::process::Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stderr(Stdio::null())
        .output()
        .await
        .with_context(|| format!("Failed to run {program}"))?;
    if !output.status.success() {
        bail!("{program} exited with {}", output.status);
    }
    String::from_utf8(output.stdout).with_context(|| format!("{program} printed invalid UTF-8"))
}
