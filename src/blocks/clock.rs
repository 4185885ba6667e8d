use std::time::Duration;

use anyhow::Result;
use chrono::Timelike;

use super::{BLOCK_FONT, badge, emit_line, value};
use crate::config::Config;
use crate::markup::Markup;

const MIN_SLEEP: Duration = Duration::from_millis(250);
const ICON: &str = "\u{f0954}";
const BADGE_BG: u8 = 15;

pub fn render<Tz: chrono::TimeZone>(time: &chrono::DateTime<Tz>, format: &str) -> String
where
    Tz::Offset: std::fmt::Display,
{
    render_text(&time.format(format).to_string())
}

fn render_text(time: &str) -> String {
    let mut m = Markup::new();
    m.font(BLOCK_FONT, |m| {
        m.text(" ");
        badge(m, BADGE_BG, |m| m.text(&format!(" {ICON} ")));
        value(m, |m| m.text(&format!(" {time} ")));
        m.text(" ")
    });
    m.into_string()
}

pub fn once(cfg: &Config) -> Result<()> {
    emit_line(&render(&chrono::Local::now(), cfg.clock_format()?))
}

/// Emits a line whenever the minute changes.
pub async fn persist(cfg: &Config) -> Result<()> {
    let format = cfg.clock_format()?;
    let mut last_minute = None;
    loop {
        let now = chrono::Local::now();
        let minute = now.minute();
        if last_minute != Some(minute) {
            emit_line(&render(&now, format))?;
            last_minute = Some(minute);
        } else {
            let timeout =
                Duration::from_millis(500 * (60 - u64::from(now.second()))).max(MIN_SLEEP);
            tokio::time::sleep(timeout).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone as _;

    #[test]
    fn renders_badge_and_time() {
        let time = chrono::Utc.with_ymd_and_hms(2026, 10, 15, 9, 5, 0).unwrap();
        assert_eq!(
            render(&time, "%H:%M"),
            concat!(
                "\x1fT2\x1f ",
                "\x1fB15\x1f\x1fF4\x1f\x1fT3\x1f \u{f0954} \x1fT\x1f\x1fF\x1f\x1fB\x1f",
                "\x1fB4\x1f\x1fF1\x1f 09:05 \x1fF\x1f\x1fB\x1f",
                " \x1fT\x1f",
            )
        );
    }

    #[test]
    fn honours_custom_format() {
        let time = chrono::Utc.with_ymd_and_hms(2026, 10, 15, 21, 30, 0).unwrap();
        assert!(render(&time, "%H:%M %d/%m").contains(" 21:30 15/10 "));
    }

    #[tokio::test]
    async fn bad_format_stops_only_the_clock() {
        let cfg = Config {
            clock_format: Some("%Q".into()),
            ..Config::default()
        };
        assert!(once(&cfg).is_err());
        assert!(persist(&cfg).await.is_err());
    }
}
