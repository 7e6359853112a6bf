//! File logging.
//!
//! Logs go to `<config_dir>/retrocalc/logs/retrocalc.log` with daily
//! rotation. There is no console layer: the terminal belongs to the editor.
//!
//! `RUST_LOG` overrides the `log.level` setting, e.g.
//! `RUST_LOG=retrocalc_io=debug`.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Install the global subscriber. Failure to create the log directory
/// leaves logging disabled.
pub fn init(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let logs_dir = retrocalc_config::logs_dir();
    if let Err(e) = std::fs::create_dir_all(&logs_dir) {
        eprintln!("Warning: could not initialize file logging: {}", e);
        return;
    }

    let file_appender = tracing_appender::rolling::daily(logs_dir, "retrocalc.log");
    let file_layer = fmt::layer()
        .with_writer(file_appender)
        .with_ansi(false)
        .with_target(true)
        .with_line_number(true)
        .with_filter(filter);

    // A second init (tests, embedding) keeps the first subscriber
    let _ = tracing_subscriber::registry().with(file_layer).try_init();
}
