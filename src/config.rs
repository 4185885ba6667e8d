use std::path::PathBuf;

use anyhow::{Context as _, Result, anyhow};

pub const NIRI_VAR: &str = "NIRI_BLOCKS_NIRI";
pub const PANEL_VAR: &str = "NIRI_BLOCKS_PANEL";
pub const SINK_VAR: &str = "NIRI_BLOCKS_SINK";
pub const VOLUME_SIGNAL_VAR: &str = "NIRI_BLOCKS_VOLUME_SIGNAL";
pub const BRIGHTNESS_SIGNAL_VAR: &str = "NIRI_BLOCKS_BRIGHTNESS_SIGNAL";
pub const CLOCK_FORMAT_VAR: &str = "NIRI_BLOCKS_CLOCK_FORMAT";
pub const PROC_VAR: &str = "NIRI_BLOCKS_PROC";

const DEFAULT_VOLUME_SIGNAL: u8 = 1;
const DEFAULT_BRIGHTNESS_SIGNAL: u8 = 2;
const DEFAULT_CLOCK_FORMAT: &str = "%H:%M";

/// Settings shared by all blocks.
///
/// Values that can be malformed are kept as given and only checked by the block that
/// reads them, so a bad clock format never stops the windows block from starting.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// Compositor CLI used to open the event stream.
    pub niri: String,
    /// Process that is sent `SIGRTMIN+n` after a click action so the block is re-run.
    pub panel: String,
    pub sink: String,
    pub proc_root: PathBuf,
    pub volume_signal: Option<String>,
    pub brightness_signal: Option<String>,
    pub clock_format: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            niri: "niri".into(),
            panel: "i3blocks".into(),
            sink: "@DEFAULT_AUDIO_SINK@".into(),
            proc_root: "/proc".into(),
            volume_signal: None,
            brightness_signal: None,
            clock_format: None,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            niri: lookup(NIRI_VAR).unwrap_or(defaults.niri),
            panel: lookup(PANEL_VAR).unwrap_or(defaults.panel),
            sink: lookup(SINK_VAR).unwrap_or(defaults.sink),
            proc_root: lookup(PROC_VAR).map_or(defaults.proc_root, PathBuf::from),
            volume_signal: lookup(VOLUME_SIGNAL_VAR),
            brightness_signal: lookup(BRIGHTNESS_SIGNAL_VAR),
            clock_format: lookup(CLOCK_FORMAT_VAR),
        }
    }

    pub fn volume_signal(&self) -> Result<u8> {
        self.volume_signal
            .as_deref()
            .map_or(Ok(DEFAULT_VOLUME_SIGNAL), |v| parse_signal(VOLUME_SIGNAL_VAR, v))
    }

    pub fn brightness_signal(&self) -> Result<u8> {
        self.brightness_signal
            .as_deref()
            .map_or(Ok(DEFAULT_BRIGHTNESS_SIGNAL), |v| {
                parse_signal(BRIGHTNESS_SIGNAL_VAR, v)
            })
    }

    /// The chrono format of the clock, rejected up front if chrono cannot parse it.
    pub fn clock_format(&self) -> Result<&str> {
        use chrono::format::{Item, StrftimeItems};

        let Some(format) = self.clock_format.as_deref() else {
            return Ok(DEFAULT_CLOCK_FORMAT);
        };
        if StrftimeItems::new(format).any(|item| matches!(item, Item::Error)) {
            return Err(anyhow!("{CLOCK_FORMAT_VAR}: invalid format {format:?}"));
        }
        Ok(format)
    }

    /// Shell snippet that makes the panel re-run the block listening on `signal`.
    pub fn refresh_command(&self, signal: u8) -> String {
        format!("pkill -SIGRTMIN+{signal} {}", self.panel)
    }
}

fn parse_signal(var: &str, value: &str) -> Result<u8> {
    let signal: u8 = value
        .trim()
        .parse()
        .with_context(|| format!("{var}: expected a signal offset, got {value:?}"))?;
    // SIGRTMIN+n must stay at or below SIGRTMAX, which is SIGRTMIN+30 on Linux.
    if signal > 30 {
        return Err(anyhow!("{var}: signal offset {signal} is out of range"));
    }
    Ok(signal)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|&(k, v)| (k.to_owned(), v.to_owned()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn defaults_without_env() {
        let cfg = Config::from_lookup(lookup(&[]));
        assert_eq!(cfg, Config::default());
        assert_eq!(cfg.volume_signal().unwrap(), 1);
        assert_eq!(cfg.brightness_signal().unwrap(), 2);
        assert_eq!(cfg.clock_format().unwrap(), "%H:%M");
        assert_eq!(cfg.proc_root, PathBuf::from("/proc"));
    }

    #[test]
    fn overrides_from_env() {
        let cfg = Config::from_lookup(lookup(&[
            (NIRI_VAR, "/usr/local/bin/niri"),
            (PANEL_VAR, "pbar"),
            (PROC_VAR, "/tmp/proc"),
            (VOLUME_SIGNAL_VAR, " 5 "),
            (CLOCK_FORMAT_VAR, "%H:%M %d/%m"),
        ]));
        assert_eq!(cfg.niri, "/usr/local/bin/niri");
        assert_eq!(cfg.proc_root, PathBuf::from("/tmp/proc"));
        assert_eq!(cfg.volume_signal().unwrap(), 5);
        assert_eq!(cfg.brightness_signal().unwrap(), 2);
        assert_eq!(cfg.clock_format().unwrap(), "%H:%M %d/%m");
        assert_eq!(cfg.refresh_command(5), "pkill -SIGRTMIN+5 pbar");
    }

    #[test]
    fn bad_values_fail_only_where_read() {
        let cfg = Config::from_lookup(lookup(&[
            (NIRI_VAR, "niri-dev"),
            (BRIGHTNESS_SIGNAL_VAR, "two"),
            (VOLUME_SIGNAL_VAR, "31"),
            (CLOCK_FORMAT_VAR, "%Q"),
        ]));
        assert_eq!(cfg.niri, "niri-dev");
        assert_eq!(cfg.sink, "@DEFAULT_AUDIO_SINK@");

        let err = cfg.brightness_signal().unwrap_err();
        assert!(err.to_string().contains(BRIGHTNESS_SIGNAL_VAR));
        assert!(cfg.volume_signal().is_err());
        let err = cfg.clock_format().unwrap_err();
        assert!(err.to_string().contains(CLOCK_FORMAT_VAR));
    }
}
