//! Logging Infrastructure
//!
//! Structured logging for the billing and scheduling core:
//! - Console output, pretty for development and JSON for production
//! - Daily rotating application logs (removed after the retention window)
//! - Permanent audit logs for submissions (`target: "audit"`, never deleted)

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{Duration, Local, NaiveDate};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::filter::{self, FilterExt};
use tracing_subscriber::layer::Filter;
use tracing_subscriber::{EnvFilter, Layer, Registry, fmt, prelude::*};

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

const APP_PREFIX: &str = "app";
const AUDIT_PREFIX: &str = "audit";
const LOG_SUFFIX: &str = "log";

/// Delete application log files older than `retention_days`
///
/// Only `app.YYYY-MM-DD.log` files are considered; audit logs are kept forever.
/// Returns the number of deleted files.
pub fn cleanup_old_logs(log_dir: &Path, retention_days: i64) -> anyhow::Result<usize> {
    // A window reaching past the calendar range keeps everything
    let Some(cutoff) = Duration::try_days(retention_days)
        .and_then(|window| Local::now().date_naive().checked_sub_signed(window))
    else {
        return Ok(0);
    };
    let app_log_dir = log_dir.join(APP_PREFIX);
    if !app_log_dir.exists() {
        return Ok(0);
    }

    let mut deleted = 0;
    for entry in fs::read_dir(app_log_dir)? {
        let path = entry?.path();
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };

        let file_date = name
            .strip_prefix("app.")
            .and_then(|rest| rest.strip_suffix(".log"))
            .and_then(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok());

        if let Some(date) = file_date
            && date < cutoff
        {
            fs::remove_file(&path)?;
            deleted += 1;
            tracing::info!(file = %name, "Deleted old log file");
        }
    }

    Ok(deleted)
}

fn rolling(dir: &Path, prefix: &str) -> anyhow::Result<RollingFileAppender> {
    Ok(RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix(prefix)
        .filename_suffix(LOG_SUFFIX)
        .build(dir)?)
}

fn file_layer<F>(appender: RollingFileAppender, json_format: bool, target_filter: F) -> BoxedLayer
where
    F: Filter<Registry> + Send + Sync + 'static,
{
    let writer = std::sync::Mutex::new(appender);

    if json_format {
        fmt::layer()
            .json()
            .with_target(true)
            .with_current_span(true)
            .with_thread_ids(true)
            .with_file(true)
            .with_line_number(true)
            .with_writer(writer)
            .with_filter(target_filter)
            .boxed()
    } else {
        fmt::layer()
            .with_target(true)
            .with_thread_ids(true)
            .with_file(true)
            .with_line_number(true)
            .with_ansi(false)
            .with_writer(writer)
            .with_filter(target_filter)
            .boxed()
    }
}

/// Initialize the logging system
///
/// # Arguments
/// * `level` - Log level or filter directive (e.g., "info", "desk_core=debug")
/// * `json_format` - JSON console output (production) instead of pretty (development)
/// * `log_dir` - Optional directory for rolling file logs
/// * `retention_days` - Age after which app log files are deleted
///
/// # Examples
/// ```no_run
/// // Development setup (console only)
/// desk_core::logger::init_logger_with_file("debug", false, None, 14)?;
///
/// // Production setup (console + files)
/// desk_core::logger::init_logger_with_file("info", true, Some("./logs"), 14)?;
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn init_logger_with_file(
    level: &str,
    json_format: bool,
    log_dir: Option<&str>,
    retention_days: i64,
) -> anyhow::Result<()> {
    let env_filter = || EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let console: BoxedLayer = if json_format {
        fmt::layer()
            .json()
            .with_target(true)
            .with_current_span(true)
            .with_thread_ids(true)
            .with_file(true)
            .with_line_number(true)
            .with_filter(env_filter())
            .boxed()
    } else {
        fmt::layer()
            .with_target(true)
            .with_thread_ids(false)
            .with_file(true)
            .with_line_number(true)
            .with_filter(env_filter())
            .boxed()
    };

    let mut layers = vec![console];

    if let Some(dir) = log_dir {
        let log_dir = Path::new(dir);
        let app_log_dir = log_dir.join(APP_PREFIX);
        let audit_log_dir = log_dir.join(AUDIT_PREFIX);
        fs::create_dir_all(&app_log_dir)?;
        fs::create_dir_all(&audit_log_dir)?;

        layers.push(file_layer(
            rolling(&app_log_dir, APP_PREFIX)?,
            json_format,
            filter::filter_fn(|meta| meta.target() != "audit").and(env_filter()),
        ));
        layers.push(file_layer(
            rolling(&audit_log_dir, AUDIT_PREFIX)?,
            json_format,
            filter::filter_fn(|meta| meta.target() == "audit"),
        ));

        if let Ok(handle) = tokio::runtime::Handle::try_current() {
            handle.spawn(periodic_cleanup(log_dir.to_path_buf(), retention_days));
        } else if let Err(e) = cleanup_old_logs(log_dir, retention_days) {
            eprintln!("Failed to cleanup old logs: {e}");
        }
    }

    tracing_subscriber::registry().with(layers).try_init()?;
    Ok(())
}

/// Runs every hour to delete expired app logs
async fn periodic_cleanup(log_dir: PathBuf, retention_days: i64) {
    use tokio::time::{Duration, sleep};

    loop {
        if let Err(e) = cleanup_old_logs(&log_dir, retention_days) {
            tracing::error!(error = %e, "Failed to cleanup old logs");
        }
        sleep(Duration::from_secs(3600)).await;
    }
}

/// Console-only logging
pub fn init_logger(level: &str, json_format: bool) -> anyhow::Result<()> {
    init_logger_with_file(level, json_format, None, 14)
}

/// Audit log helper for submissions
///
/// Written to the permanent `audit` stream when file logging is enabled.
///
/// ```ignore
/// audit_log!("create", "service-billing", "b-42");
/// ```
#[macro_export]
macro_rules! audit_log {
    ($action:expr, $resource:expr) => {
        tracing::info!(
            target: "audit",
            action = $action,
            resource = $resource,
            timestamp = chrono::Local::now().to_rfc3339(),
            "AUDIT"
        );
    };
    ($action:expr, $resource:expr, $details:expr) => {
        tracing::info!(
            target: "audit",
            action = $action,
            resource = $resource,
            details = %$details,
            timestamp = chrono::Local::now().to_rfc3339(),
            "AUDIT"
        );
    };
}
