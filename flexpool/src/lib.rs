//! Typed client for the Flexpool v1 REST API.
//!
//! The [`api_client`] module issues requests and projects the JSON
//! envelope into the records in [`api_client::types`]. [`units`] and
//! [`stats`] hold the conversions and derived pool metrics the reports
//! are built from.

pub mod api_client;
pub mod config;
pub mod error;
pub mod stats;
pub mod tracing;
pub mod units;

pub use api_client::Client;
pub use config::ClientConfig;
pub use error::{Error, Result};
