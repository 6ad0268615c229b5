//! Desk Client - HTTP client for the service desk REST backend
//!
//! Provides the typed lookup and submission calls the billing and scheduling
//! core needs; everything else on the backend is out of scope.

pub mod api;
pub mod config;
pub mod error;
pub mod http;

pub use api::DeskApi;
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use http::{HttpClient, NetworkHttpClient};
