#![cfg_attr(docsrs, feature(doc_auto_cfg))]

//! Blocking HTTP client for the Zibal internet payment gateway.
//!
//! Wraps the gateway's `request`, `verify` and `inquiry` endpoints on top of
//! the wire models in [`zibal`].
//!
//! # Modules
//!
//! - [`client`] - [`ZibalClient`] and the result-code policy
//! - [`config`] - [`ClientConfig`] builder and environment loading
//! - [`constants`] - Default URLs, endpoint paths, environment variable names
//! - [`error`] - [`ClientError`] and [`ConfigError`]
//!
//! # Feature flags
//!
//! - `telemetry` - wrap each operation in a tracing span and log failures

pub mod client;
pub mod config;
pub mod constants;
pub mod error;

pub use client::ZibalClient;
pub use config::ClientConfig;
pub use error::{ClientError, ConfigError};
