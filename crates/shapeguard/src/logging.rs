use clap::ValueEnum;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

/// Per-target filter directives, e.g. `shapeguard_decode=debug`. When set,
/// they replace `--log-level`.
pub const LOG_ENV: &str = "SHAPEGUARD_LOG";

#[derive(Copy, Clone, Debug, ValueEnum)]
pub enum LogFormat {
    Text,
    Json,
}

/// Minimum level for stderr logs.
///
/// Rejected payloads are logged at `debug` by the libraries, so the CLI
/// defaults to `warn` and only read failures reach stderr unasked.
#[derive(Copy, Clone, Debug, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn as_filter(self) -> LevelFilter {
        match self {
            LogLevel::Error => LevelFilter::ERROR,
            LogLevel::Warn => LevelFilter::WARN,
            LogLevel::Info => LevelFilter::INFO,
            LogLevel::Debug => LevelFilter::DEBUG,
            LogLevel::Trace => LevelFilter::TRACE,
        }
    }
}

/// Filter from `directives` when present and valid, else from `level`.
///
/// The second value explains why unusable directives were ignored.
pub fn build_filter(level: LogLevel, directives: Option<&str>) -> (EnvFilter, Option<String>) {
    let fallback = || EnvFilter::default().add_directive(level.as_filter().into());
    match directives.map(str::trim).filter(|d| !d.is_empty()) {
        None => (fallback(), None),
        Some(directives) => match EnvFilter::try_new(directives) {
            Ok(filter) => (filter, None),
            Err(err) => (
                fallback(),
                Some(format!("ignoring {LOG_ENV}={directives:?}: {err}")),
            ),
        },
    }
}

/// Install the stderr subscriber. Stdout stays reserved for command output.
pub fn init_logging(format: LogFormat, level: LogLevel) {
    let directives = std::env::var(LOG_ENV).ok();
    let (filter, ignored) = build_filter(level, directives.as_deref());

    let builder = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .with_ansi(false)
        .with_target(false);

    match format {
        LogFormat::Text => {
            let _ = builder.try_init();
        }
        LogFormat::Json => {
            let _ = builder.json().try_init();
        }
    }

    if let Some(reason) = ignored {
        tracing::warn!("{reason}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_flag_applies_without_directives() {
        let (filter, ignored) = build_filter(LogLevel::Warn, None);
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::WARN));
        assert!(ignored.is_none());

        let (filter, _) = build_filter(LogLevel::Trace, Some("   "));
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::TRACE));
    }

    #[test]
    fn directives_replace_level_flag() {
        let (filter, ignored) = build_filter(LogLevel::Error, Some("shapeguard_decode=debug"));
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::DEBUG));
        assert!(ignored.is_none());
    }

    #[test]
    fn invalid_directives_fall_back_to_level_flag() {
        let (filter, ignored) = build_filter(LogLevel::Info, Some("shapeguard=loud"));
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::INFO));
        let reason = ignored.expect("invalid directives should be reported");
        assert!(reason.starts_with("ignoring SHAPEGUARD_LOG="));
    }
}
