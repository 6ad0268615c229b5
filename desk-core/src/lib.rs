//! Service desk billing and scheduling core
//!
//! # Modules
//!
//! ```text
//! desk-core/src/
//! ├── billing/    # billing aggregation: money pipeline, pure ops, async flows
//! ├── schedule/   # next service date, creation modes, status lifecycle
//! ├── gateway.rs  # lookup / persistence traits + REST implementation
//! ├── config.rs   # environment configuration
//! └── logger.rs   # tracing setup, rolling files, audit stream
//! ```

pub mod billing;
pub mod config;
pub mod gateway;
pub mod logger;
pub mod schedule;

pub use billing::{BillingAggregator, BillingError};
pub use config::DeskConfig;
pub use gateway::{Gateway, OrderLookup, Persistence};
pub use logger::{cleanup_old_logs, init_logger, init_logger_with_file};
pub use schedule::{OrderCreationMode, OrderScheduler, ScheduleError, ServiceOrderDraft};

use desk_client::DeskApi;

/// Load `.env`, read the configuration and initialize logging
pub fn setup_environment() -> anyhow::Result<DeskConfig> {
    dotenv::dotenv().ok();
    let config = DeskConfig::from_env();
    init_logger_with_file(
        &config.log_level,
        config.log_json,
        config.log_dir.as_deref(),
        config.log_retention_days,
    )?;
    tracing::info!(
        environment = %config.environment,
        api_url = %config.api_url,
        "Service desk core configured"
    );
    Ok(config)
}

/// REST gateway for the configured backend
pub fn connect(config: &DeskConfig) -> anyhow::Result<DeskApi> {
    Ok(DeskApi::from_config(&config.client_config())?)
}
