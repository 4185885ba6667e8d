use anyhow::{Context as _, Result};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Volume {
    pub percent: u32,
    pub muted: bool,
}

/// Parses `wpctl get-volume` output such as `Volume: 0.45` or `Volume: 0.45 [MUTED]`.
pub fn parse_volume(output: &str) -> Result<Volume> {
    let rest = output
        .trim()
        .strip_prefix("Volume:")
        .with_context(|| format!("Unexpected wpctl output {output:?}"))?;
    let mut words = rest.split_whitespace();
    let fraction: f64 = words
        .next()
        .context("wpctl printed no volume")?
        .parse()
        .context("Invalid wpctl volume")?;
    Ok(Volume {
        percent: (fraction.max(0.0) * 100.0).round() as u32,
        muted: words.any(|word| word == "[MUTED]"),
    })
}

pub async fn get_volume(sink: &str) -> Result<Volume> {
    parse_volume(&super::tool_output("wpctl", &["get-volume", sink]).await?)
}

/// `amount` is anything `wpctl set-volume` accepts, e.g. `40%` or `5%+`.
pub fn set_volume_command(sink: &str, amount: &str) -> String {
    format!("wpctl set-volume {sink} {amount}")
}

pub fn toggle_mute_command(sink: &str) -> String {
    format!("wpctl set-mute {sink} toggle")
}
