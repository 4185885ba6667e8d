use anyhow::{Context as _, Result};

/// Extracts the percentage from `brightnessctl i`, which prints a line like
/// `Current brightness: 19200 (40%)`.
pub fn parse_brightness(output: &str) -> Result<u32> {
    output
        .split_whitespace()
        .find_map(|word| word.strip_prefix('(')?.strip_suffix("%)"))
        .with_context(|| format!("No brightness percentage in {output:?}"))?
        .parse()
        .context("Invalid brightness percentage")
}

pub async fn get_brightness() -> Result<u32> {
    parse_brightness(&super::tool_output("brightnessctl", &["i"]).await?)
}

/// `amount` is anything `brightnessctl set` accepts, e.g. `40%`, `5%-` or `+5%`.
pub fn set_brightness_command(amount: &str) -> String {
    format!("brightnessctl s {amount}")
}
