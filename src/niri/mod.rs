use std::ffi::OsStr;
use std::io::Write;
use std::process::Stdio;

use anyhow::{Context as _, Result};
use tokio::io::{AsyncBufRead, AsyncBufReadExt as _, BufReader};
use tokio::process::{Child, ChildStdout, Command};

pub mod event;
pub mod render;
pub mod state;
pub mod view;

use render::Render;
use state::State;

/// Spawns `<niri> msg --json event-stream`. The child is killed when dropped.
pub fn spawn_event_stream(niri: &OsStr) -> Result<(Child, BufReader<ChildStdout>)> {
    let mut child = Command::new(niri)
        .args(["msg", "--json", "event-stream"])
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .kill_on_drop(true)
        .spawn()
        .with_context(|| format!("Failed to spawn {}", niri.to_string_lossy()))?;
    let stdout = child
        .stdout
        .take()
        .context("Event stream has no stdout")?;
    Ok((child, BufReader::new(stdout)))
}

/// Feeds every event from `transport` into a fresh [`State`] and writes one rendered line
/// per applied event to `out`.
///
/// Returns the final state once the transport reaches end of stream or fails to read.
/// Only a failed write is an error.
pub async fn run_event_loop(
    mut transport: impl AsyncBufRead + Unpin,
    out: &mut impl Write,
    renderer: &impl Render,
) -> Result<State> {
    let mut state = State::new();
    let mut buf = Vec::new();
    loop {
        buf.clear();
        match transport.read_until(b'\n', &mut buf).await {
            Ok(0) => {
                log::info!("Event stream closed");
                break;
            }
            Ok(n) => log::trace!("Received {n} bytes"),
            Err(err) => {
                log::error!("Failed to read event stream: {err}");
                break;
            }
        }

        let Ok(line) = std::str::from_utf8(&buf) else {
            log::debug!("Skipping event that is not valid UTF-8");
            continue;
        };
        let event = match event::decode(line) {
            Ok(Some(event)) => event,
            Ok(None) => continue,
            Err(err) => {
                log::debug!("{err}");
                continue;
            }
        };

        log::trace!("Applying {event:?}");
        state.apply(event);
        let rendered = renderer.render(&view::project(&state));
        writeln!(out, "{rendered}")
            .and_then(|()| out.flush())
            .context("Failed to write block output")?;
    }
    Ok(state)
}
