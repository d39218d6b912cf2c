//! Structured logging setup.

use tracing::Level;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Map a level string onto a tracing level.
///
/// Case-insensitive; `fatal` and `panic` collapse onto ERROR and anything
/// unrecognized falls back to INFO.
pub fn parse_level(level: &str) -> Level {
    match level.to_ascii_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" | "fatal" | "panic" => Level::ERROR,
        _ => Level::INFO,
    }
}

/// Install the global subscriber at `level`.
///
/// A `RUST_LOG` directive wins over the configured level when set.
/// Calling this twice keeps the first subscriber.
pub fn init(level: &str) {
    let _ = tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(parse_level(level).to_string())),
        )
        .with(tracing_subscriber::fmt::layer())
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_level_known_values() {
        assert_eq!(parse_level("debug"), Level::DEBUG);
        assert_eq!(parse_level("WARN"), Level::WARN);
        assert_eq!(parse_level("Error"), Level::ERROR);
    }

    #[test]
    fn test_parse_level_fatal_and_panic_map_to_error() {
        assert_eq!(parse_level("fatal"), Level::ERROR);
        assert_eq!(parse_level("panic"), Level::ERROR);
    }

    #[test]
    fn test_parse_level_unknown_falls_back_to_info() {
        assert_eq!(parse_level("verbose"), Level::INFO);
        assert_eq!(parse_level(""), Level::INFO);
    }
}
