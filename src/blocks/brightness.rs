use std::time::Duration;

use anyhow::Result;

use super::emit_line;
use super::slider::{PRESETS, STEP, Slider};
use crate::clients::brightnessctl;
use crate::config::Config;
use crate::utils::retry_forever;

const RETRY_DELAY: Duration = Duration::from_secs(1);
const ICON: &str = "\u{f00e0}";
const BADGE_BG: u8 = 10;

pub fn slider(cfg: &Config, signal: u8, percent: u32) -> Slider {
    let refresh = cfg.refresh_command(signal);
    let with_refresh = |cmd: String| format!("{cmd}; {refresh}");
    Slider {
        badge_bg: BADGE_BG,
        icon: ICON,
        icon_click: None,
        step_down: with_refresh(brightnessctl::set_brightness_command(&format!("{STEP}-"))),
        step_up: with_refresh(brightnessctl::set_brightness_command(&format!("+{STEP}"))),
        presets: PRESETS
            .iter()
            .map(|p| with_refresh(brightnessctl::set_brightness_command(&format!("{p}%"))))
            .collect(),
        percent,
        refresh: refresh.clone(),
    }
}

pub async fn main(cfg: &Config) -> Result<()> {
    let signal = cfg.brightness_signal()?;
    let percent = retry_forever(RETRY_DELAY, brightnessctl::get_brightness).await;
    emit_line(&slider(cfg, signal, percent).render())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn steps_and_presets_refresh_the_panel() {
        let cfg = Config {
            panel: "pbar".into(),
            ..Config::default()
        };
        let s = slider(&cfg, cfg.brightness_signal().unwrap(), 55);
        assert_eq!(s.icon_click, None);
        assert_eq!(s.step_down, "brightnessctl s 5%-; pkill -SIGRTMIN+2 pbar");
        assert_eq!(s.step_up, "brightnessctl s +5%; pkill -SIGRTMIN+2 pbar");
        assert_eq!(
            s.presets.last().map(String::as_str),
            Some("brightnessctl s 100%; pkill -SIGRTMIN+2 pbar")
        );
        assert!(s.render().contains(" 55% "));
    }
}
