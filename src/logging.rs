use std::sync::OnceLock;

pub const COLOR_VAR: &str = "COLOR";
pub const LOG_SPEC_VAR: &str = "NIRI_BLOCKS_LOG";

pub fn should_color() -> bool {
    COLOR.get().is_some_and(|it| *it)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockKind {
    Windows,
    Clock,
    Volume,
    Brightness,
    System,
}
impl std::fmt::Display for BlockKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Windows => write!(f, "WINDOWS"),
            Self::Clock => write!(f, "CLOCK"),
            Self::Volume => write!(f, "VOLUME"),
            Self::Brightness => write!(f, "BRIGHTNESS"),
            Self::System => write!(f, "SYSTEM"),
        }
    }
}

static COLOR: OnceLock<bool> = OnceLock::new();
static BLOCK_NAME: OnceLock<String> = OnceLock::new();

fn parse_color(value: Option<&str>, is_terminal: impl FnOnce() -> bool) -> bool {
    match value.unwrap_or("auto") {
        "never" | "no" | "off" | "false" => false,
        "always" | "yes" | "on" | "true" => true,
        _ => is_terminal(),
    }
}

/// Starts the stderr logger. Stdout belongs to the panel, so nothing is ever logged there.
pub fn init_logger(block: BlockKind) {
    let doit = || -> anyhow::Result<()> {
        use flexi_logger::*;

        BLOCK_NAME
            .set(block.to_string())
            .map_err(|_| anyhow::anyhow!("Already set"))?;

        fn format(
            w: &mut dyn std::io::Write,
            now: &mut DeferredNow,
            record: &Record,
        ) -> Result<(), std::io::Error> {
            let color = should_color();

            let line_display = record.line();
            let line_display = if let Some(line) = &line_display {
                format_args!("{}", *line)
            } else {
                format_args!("?")
            };

            let now_display = now.format("%Y-%m-%d %H:%M:%S");
            let now_display = if color {
                format_args!("\x1b[35m{now_display}\x1b[0m")
            } else {
                format_args!("{now_display}")
            };

            let level = record.level();

            let level_colored;
            let level_display = if color {
                level_colored = style(level).paint(level.to_string());
                format_args!("{level_colored}")
            } else {
                format_args!("{level}")
            };

            write!(
                w,
                "[{now_display}] {} {level_display} [{}:{line_display}] {}",
                BLOCK_NAME.get().map_or("?", String::as_str),
                record.file().unwrap_or("<unknown>"),
                record.args(),
            )
        }

        let log_spec = match std::env::var(LOG_SPEC_VAR) {
            Ok(spec) => LogSpecification::parse(&spec)?,
            Err(_) if cfg!(debug_assertions) => LevelFilter::Debug.into(),
            Err(_) => LevelFilter::Info.into(),
        };

        let logger = Logger::with(log_spec).format(format).log_to_stderr();
        std::mem::forget(logger.start()?);

        let hook = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            log::error!("{info}");
            hook(info);
        }));

        let color = std::env::var(COLOR_VAR);
        _ = COLOR.set(parse_color(color.as_deref().ok(), || {
            std::io::IsTerminal::is_terminal(&std::io::stderr())
        }));

        Ok(())
    };
    match doit() {
        Ok(_) => log::debug!("Started logger for {block:?}"),
        Err(err) => eprintln!("Failed to start logger: {err}."),
    }
}
