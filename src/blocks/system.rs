use std::time::Duration;

use anyhow::Result;
use futures::Stream;
use tokio::time::MissedTickBehavior;
use tokio_stream::StreamExt as _;

use super::{BLOCK_FONT, badge, emit_line, value};
use crate::clients::procfs::{ProcFs, Snapshot, SystemSample};
use crate::config::Config;
use crate::markup::Markup;
use crate::utils::{ResultExt as _, stream_from_fn};

const SAMPLE_PERIOD: Duration = Duration::from_secs(1);

const NET_ICON: &str = "\u{f059f}";
const NET_BG: u8 = 12;
const MEM_ICON: &str = "\u{f1c0}";
const MEM_BG: u8 = 14;
const CPU_ICON: &str = "\u{f2db}";
const CPU_BG: u8 = 9;

/// Seven characters wide for any rate up to 999 MB/s.
pub fn format_rate(bytes_per_sec: u64) -> String {
    if bytes_per_sec < 1_000 {
        format!(" {bytes_per_sec:3}B/s")
    } else if bytes_per_sec < 1_000_000 {
        format!("{:3}kB/s", bytes_per_sec / 1_000)
    } else {
        format!("{:3}mB/s", bytes_per_sec / 1_000_000)
    }
}

pub fn render(sample: &SystemSample) -> String {
    let section = |m: &mut Markup, bg: u8, icon: &str, text: &str| {
        badge(m, bg, |m| m.text(icon));
        value(m, |m| m.text(text));
    };

    let mut m = Markup::new();
    m.font(BLOCK_FONT, |m| {
        m.text(" ");
        section(
            m,
            NET_BG,
            &format!(" {NET_ICON} "),
            &format!(" {} ", format_rate(sample.net_rate)),
        );
        m.text(" ");
        section(
            m,
            MEM_BG,
            &format!(" {MEM_ICON} "),
            &format!("{:3.0}% ", sample.memory_percent),
        );
        m.text(" ");
        section(
            m,
            CPU_BG,
            &format!(" {CPU_ICON} "),
            &format!("{:3.0}% ", sample.cpu_percent),
        );
        m.text(" ")
    });
    m.into_string()
}

/// One sample per period, each computed against the previous snapshot. The first
/// snapshot only serves as the baseline, so the first sample arrives after one period.
pub fn samples(procfs: ProcFs, period: Duration) -> impl Stream<Item = SystemSample> {
    let mut interval = tokio::time::interval(period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut prev: Option<Snapshot> = None;
    stream_from_fn(async move || {
        loop {
            interval.tick().await;
            let Some(now) = procfs.snapshot().await.ok_or_log() else {
                continue;
            };
            if let Some(prev) = prev.replace(now) {
                break Some(now.sample_since(&prev));
            }
        }
    })
}

pub async fn main(cfg: &Config) -> Result<()> {
    let stream = samples(ProcFs::new(cfg.proc_root.clone()), SAMPLE_PERIOD);
    tokio::pin!(stream);
    while let Some(sample) = stream.next().await {
        log::trace!("{sample:?}");
        emit_line(&render(&sample))?;
    }
    Ok(())
}
