use std::ffi::OsStr;

use anyhow::{Context as _, Result};
use tokio::process::Child;

use crate::config::Config;
use crate::niri::{self, render::PanelRenderer};
use crate::utils::ResultExt as _;

/// Follows niri's event stream until it ends, printing the workspace and window list
/// after every event.
pub async fn main(cfg: &Config) -> Result<()> {
    let (mut child, events) = niri::spawn_event_stream(OsStr::new(&cfg.niri))?;
    let state = niri::run_event_loop(events, &mut std::io::stdout(), &PanelRenderer::default())
        .await?;
    log::debug!(
        "Final model has {} workspaces and {} windows",
        state.workspaces().len(),
        state.windows().len()
    );
    log_exit(&cfg.niri, &mut child);
    Ok(())
}

/// The stream has already ended at this point, so the child's status is only reported.
fn log_exit(niri: &str, child: &mut Child) {
    let status = child
        .try_wait()
        .with_context(|| format!("Failed to query {niri}"))
        .ok_or_log();
    match status {
        Some(Some(status)) if !status.success() => log::warn!("{niri} exited with {status}"),
        Some(Some(_)) | None => {}
        Some(None) => log::info!("{niri} is still running after its output closed"),
    }
}
