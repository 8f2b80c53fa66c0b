//! Tracing subscriber setup for programs using the dispatcher

use tracing::level_filters::LevelFilter;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter, Layer};

use crate::config::Settings;

/// Pick the filter: `-v` flags win, otherwise the configured directive.
pub fn filter_for(verbosity: u8, settings: &Settings) -> EnvFilter {
    let level = match verbosity {
        0 => {
            return EnvFilter::try_new(&settings.log_level)
                .unwrap_or_else(|_| EnvFilter::default().add_directive(LevelFilter::WARN.into()))
        }
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };
    EnvFilter::default().add_directive(level.into())
}

/// Install a stderr subscriber. Later calls are no-ops.
pub fn init(verbosity: u8, settings: &Settings) {
    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_names(false)
        .with_span_events(FmtSpan::CLOSE);

    let filtered_layer = fmt_layer.with_filter(filter_for(verbosity, settings));

    if tracing_subscriber::registry()
        .with(filtered_layer)
        .try_init()
        .is_err()
    {
        tracing::debug!("Tracing subscriber already set");
    }
    tracing::debug!(verbosity, log_level = %settings.log_level, "logging initialized");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbosity_overrides_configured_level() {
        let settings = Settings::default();
        assert_eq!(filter_for(2, &settings).max_level_hint(), Some(LevelFilter::DEBUG));
        assert_eq!(filter_for(9, &settings).max_level_hint(), Some(LevelFilter::TRACE));
    }

    #[test]
    fn configured_directive_is_used_without_verbosity() {
        let settings = Settings {
            log_level: "cmder=trace".into(),
            ..Settings::default()
        };
        assert_eq!(filter_for(0, &settings).max_level_hint(), Some(LevelFilter::TRACE));
    }

    #[test]
    fn invalid_directive_falls_back_to_warn() {
        let settings = Settings {
            log_level: "cmder=loud".into(),
            ..Settings::default()
        };
        assert_eq!(filter_for(0, &settings).max_level_hint(), Some(LevelFilter::WARN));
    }
}
