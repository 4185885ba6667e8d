use std::time::Duration;

use anyhow::Result;

use super::emit_line;
use super::slider::{PRESETS, STEP, Slider};
use crate::clients::wpctl::{self, Volume};
use crate::config::Config;
use crate::utils::retry_forever;

const RETRY_DELAY: Duration = Duration::from_secs(1);
const MUTED_ICON: &str = "\u{eee8}";
const UNMUTED_ICON: &str = "\u{f027}";
const MUTED_BG: u8 = 8;
const UNMUTED_BG: u8 = 11;

pub fn slider(cfg: &Config, signal: u8, volume: Volume) -> Slider {
    let refresh = cfg.refresh_command(signal);
    let with_refresh = |cmd: String| format!("{cmd}; {refresh}");
    Slider {
        badge_bg: if volume.muted { MUTED_BG } else { UNMUTED_BG },
        icon: if volume.muted {
            MUTED_ICON
        } else {
            UNMUTED_ICON
        },
        icon_click: Some(with_refresh(wpctl::toggle_mute_command(&cfg.sink))),
        step_down: with_refresh(wpctl::set_volume_command(&cfg.sink, &format!("{STEP}-"))),
        step_up: with_refresh(wpctl::set_volume_command(&cfg.sink, &format!("{STEP}+"))),
        presets: PRESETS
            .iter()
            .map(|p| with_refresh(wpctl::set_volume_command(&cfg.sink, &format!("{p}%"))))
            .collect(),
        percent: volume.percent,
        refresh: refresh.clone(),
    }
}

/// Waits until wpctl answers, prints one line and exits. The panel runs the block again
/// when it receives the block's signal.
pub async fn main(cfg: &Config) -> Result<()> {
    let signal = cfg.volume_signal()?;
    let volume = retry_forever(RETRY_DELAY, async || wpctl::get_volume(&cfg.sink).await).await;
    log::debug!("{volume:?}");
    emit_line(&slider(cfg, signal, volume).render())
}
