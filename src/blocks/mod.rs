use std::io::Write as _;

use anyhow::{Context as _, Result, anyhow};

use crate::config::Config;
use crate::logging::{BlockKind, init_logger};
use crate::markup::{Button, Markup};

pub mod brightness;
pub mod clock;
pub mod slider;
pub mod system;
pub mod volume;
pub mod windows;

const USAGE: &str = "usage: niri-blocks <windows|clock [persist]|volume|brightness|system>";

pub async fn entry_point() -> Result<()> {
    let mut args = std::env::args().skip(1);

    let block = match args.next().as_deref() {
        Some("windows") => BlockKind::Windows,
        Some("clock") => BlockKind::Clock,
        Some("volume") => BlockKind::Volume,
        Some("brightness") => BlockKind::Brightness,
        Some("system") => BlockKind::System,
        Some("-h" | "--help") => {
            println!("{USAGE}");
            return Ok(());
        }
        _ => return Err(anyhow!("Bad arguments\n{USAGE}")),
    };
    init_logger(block);
    let cfg = Config::from_env();
    log::debug!("Running {block} with {cfg:?}");

    match block {
        BlockKind::Windows => windows::main(&cfg).await,
        BlockKind::Clock => match args.next().as_deref() {
            None => clock::once(&cfg),
            Some("persist") => clock::persist(&cfg).await,
            Some(other) => Err(anyhow!("Bad clock mode {other:?}\n{USAGE}")),
        },
        BlockKind::Volume => volume::main(&cfg).await,
        BlockKind::Brightness => brightness::main(&cfg).await,
        BlockKind::System => system::main(&cfg).await,
    }
}

/// Writes one block line to stdout and flushes it right away.
pub fn emit_line(line: &str) -> Result<()> {
    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{line}")
        .and_then(|()| stdout.flush())
        .context("Failed to write block output")
}

// Palette shared by the polling blocks: a colored icon badge followed by the value on
// the common value background.
pub(crate) const BADGE_FG: u8 = 4;
pub(crate) const ICON_FONT: u8 = 3;
pub(crate) const VALUE_BG: u8 = 4;
pub(crate) const VALUE_FG: u8 = 1;
pub(crate) const BLOCK_FONT: u8 = 2;

pub(crate) fn badge<'m>(
    m: &'m mut Markup,
    bg: u8,
    f: impl FnOnce(&mut Markup) -> &mut Markup,
) -> &'m mut Markup {
    m.bg(bg, |m| m.fg(BADGE_FG, |m| m.font(ICON_FONT, f)))
}

pub(crate) fn value<'m>(
    m: &'m mut Markup,
    f: impl FnOnce(&mut Markup) -> &mut Markup,
) -> &'m mut Markup {
    m.bg(VALUE_BG, |m| m.fg(VALUE_FG, f))
}

/// Gives each character of `text` its own left-click action, so clicking the n-th
/// character runs `actions[n]`. Characters without an action are plain text.
pub(crate) fn clickable_chars<'m>(
    m: &'m mut Markup,
    text: &str,
    actions: &[String],
) -> &'m mut Markup {
    let mut buf = [0u8; 4];
    for (i, c) in text.chars().enumerate() {
        let c = c.encode_utf8(&mut buf);
        match actions.get(i) {
            Some(action) => m.action(Button::Left, action, |m| m.text(c)),
            None => m.text(c),
        };
    }
    m
}
