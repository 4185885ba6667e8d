use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result, anyhow};
use tokio::time::Instant;

/// Aggregate CPU time from the first line of `/proc/stat`, in clock ticks.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CpuTimes {
    pub busy: u64,
    pub total: u64,
}
impl CpuTimes {
    pub fn usage_since(&self, prev: &Self) -> f64 {
        let total = self.total.saturating_sub(prev.total);
        if total == 0 {
            return 0.0;
        }
        self.busy.saturating_sub(prev.busy) as f64 / total as f64 * 100.0
    }
}

pub fn parse_cpu_times(stat: &str) -> Result<CpuTimes> {
    let line = stat
        .lines()
        .find(|line| line.starts_with("cpu "))
        .context("No aggregate cpu line")?;
    // user nice system idle iowait irq softirq steal; guest time is already part of user.
    let ticks = line
        .split_whitespace()
        .skip(1)
        .take(8)
        .map(str::parse::<u64>)
        .collect::<Result<Vec<_>, _>>()
        .context("Invalid cpu tick count")?;
    if ticks.len() < 4 {
        return Err(anyhow!("Truncated cpu line {line:?}"));
    }
    let total = ticks.iter().sum::<u64>();
    let idle = ticks[3] + ticks.get(4).copied().unwrap_or(0);
    Ok(CpuTimes {
        busy: total - idle,
        total,
    })
}

pub fn parse_memory_percent(meminfo: &str) -> Result<f64> {
    let field = |name: &str| -> Result<u64> {
        meminfo
            .lines()
            .find_map(|line| line.strip_prefix(name)?.strip_prefix(':'))
            .and_then(|rest| rest.split_whitespace().next())
            .with_context(|| format!("No {name} in meminfo"))?
            .parse()
            .with_context(|| format!("Invalid {name}"))
    };
    let total = field("MemTotal")?;
    let available = field("MemAvailable")?;
    if total == 0 {
        return Err(anyhow!("MemTotal is zero"));
    }
    Ok(total.saturating_sub(available) as f64 / total as f64 * 100.0)
}

/// Sum of received and transmitted bytes over every interface in `/proc/net/dev`.
pub fn parse_net_bytes(dev: &str) -> Result<u64> {
    let mut sum = 0u64;
    for line in dev.lines().skip(2) {
        let Some((iface, counters)) = line.split_once(':') else {
            continue;
        };
        let counters: Vec<&str> = counters.split_whitespace().collect();
        let (Some(rx), Some(tx)) = (counters.first(), counters.get(8)) else {
            return Err(anyhow!("Truncated counters for {}", iface.trim()));
        };
        let parse = |n: &str| {
            n.parse::<u64>()
                .with_context(|| format!("Invalid counter for {}", iface.trim()))
        };
        sum = sum.wrapping_add(parse(rx)?).wrapping_add(parse(tx)?);
    }
    Ok(sum)
}

#[derive(Clone, Copy, Debug)]
pub struct Snapshot {
    pub cpu: CpuTimes,
    pub memory_percent: f64,
    pub net_bytes: u64,
    pub taken: Instant,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SystemSample {
    pub cpu_percent: f64,
    pub memory_percent: f64,
    /// Bytes per second, received and transmitted together.
    pub net_rate: u64,
}

impl Snapshot {
    pub fn sample_since(&self, prev: &Self) -> SystemSample {
        let secs = self.taken.duration_since(prev.taken).as_secs_f64();
        let bytes = self.net_bytes.saturating_sub(prev.net_bytes);
        SystemSample {
            cpu_percent: self.cpu.usage_since(&prev.cpu),
            memory_percent: self.memory_percent,
            net_rate: if secs > 0.0 {
                (bytes as f64 / secs) as u64
            } else {
                bytes
            },
        }
    }
}

pub struct ProcFs {
    root: PathBuf,
}

impl ProcFs {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    async fn read(&self, path: impl AsRef<Path>) -> Result<String> {
        let path = self.root.join(path);
        tokio::fs::read_to_string(&path)
            .await
            .with_context(|| format!("Failed to read {}", path.display()))
    }

    pub async fn snapshot(&self) -> Result<Snapshot> {
        let (stat, meminfo, dev) = tokio::try_join!(
            self.read("stat"),
            self.read("meminfo"),
            self.read("net/dev"),
        )?;
        Ok(Snapshot {
            cpu: parse_cpu_times(&stat)?,
            memory_percent: parse_memory_percent(&meminfo)?,
            net_bytes: parse_net_bytes(&dev)?,
            taken: Instant::now(),
        })
    }
}
