//! Structured logging setup.
//!
//! Logs go to stderr so they never mix with the formatted output written to
//! stdout. Lexical diagnostics are logged at `warn`, so the default level shows
//! them and `error` hides them.

use tracing::Subscriber;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::EnvFilter;

use crate::config::Config;

fn filter_from_config(config: &Config) -> EnvFilter {
    EnvFilter::new(config.log_level.as_filter_str())
}

/// Build the fmt subscriber for `config`, writing through `writer`
pub fn build_subscriber<W>(config: &Config, writer: W) -> impl Subscriber + Send + Sync + 'static
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    tracing_subscriber::fmt()
        .with_env_filter(filter_from_config(config))
        .with_writer(writer)
        .with_target(false)
        .without_time()
        .finish()
}

/// Initialise the logging subsystem based on configuration.
///
/// If a global subscriber is already set the call does nothing; the first
/// subscriber wins.
pub fn init_logging(config: &Config) {
    let subscriber = build_subscriber(config, std::io::stderr);
    let _ = tracing::subscriber::set_global_default(subscriber);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LogLevel;
    use crate::parser::parse_keymap;
    use rstest::rstest;
    use std::io;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn log_of_parse(level: LogLevel, source: &str) -> String {
        let captured = Captured::default();
        let writer = captured.clone();
        let config = Config::default().with_log_level(level);
        let subscriber = build_subscriber(&config, move || writer.clone());
        tracing::subscriber::with_default(subscriber, || {
            let _ = parse_keymap(source);
        });
        let bytes = captured.0.lock().unwrap().clone();
        String::from_utf8(bytes).unwrap()
    }

    #[rstest]
    #[case(LogLevel::Debug, true)]
    #[case(LogLevel::Warn, true)]
    #[case(LogLevel::Error, false)]
    fn lexical_diagnostics_follow_log_level(#[case] level: LogLevel, #[case] shown: bool) {
        let log = log_of_parse(level, "xkb_keycodes { <ESC> = 9; @ };");
        assert_eq!(log.contains("illegal character '@'"), shown, "log was: {log}");
    }

    #[test]
    fn parse_failures_are_logged_at_debug() {
        assert!(log_of_parse(LogLevel::Debug, "xkb_keycodes {").contains("parse failed"));
        assert!(log_of_parse(LogLevel::Info, "xkb_keycodes {").is_empty());
    }

    #[test]
    fn init_logging_is_idempotent() {
        let config = Config::default();
        init_logging(&config);
        init_logging(&config);
    }
}
