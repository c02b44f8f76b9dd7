//! Logging Infrastructure
//!
//! `RUST_LOG` wins when set; otherwise the configured level applies to this
//! crate, to `tower_http` request traces and to the `database` target that
//! 5xx responses log under.

use std::path::Path;
use tracing_subscriber::EnvFilter;

/// Initialize the logger with optional daily-rolling file output
pub fn init_logger_with_file(log_level: &str, log_dir: Option<&str>) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(log_level)));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_file(false)
        .with_line_number(false)
        .with_thread_ids(false)
        .with_target(false);

    if let Some(dir) = log_dir {
        let log_path = Path::new(dir);
        if log_path.is_dir() {
            let file_appender = tracing_appender::rolling::daily(log_path, "employee-server");
            subscriber.with_ansi(false).with_writer(file_appender).init();
            return;
        }
    }

    subscriber.init();
}

/// Filter directives used when `RUST_LOG` is unset
pub fn default_directives(log_level: &str) -> String {
    format!("employee_server={log_level},tower_http={log_level},database={log_level}")
}
