#![cfg_attr(docsrs, feature(doc_auto_cfg))]

//! Core types for the Zibal internet payment gateway.
//!
//! This crate holds everything between the client-facing Rust models and the
//! gateway's camelCase JSON: request/response schemas with eager validation,
//! key-case conversion, and the code tables that give result/status/wage
//! codes their meaning. It does no I/O; the HTTP client lives in
//! `zibal-http`.
//!
//! # Overview
//!
//! A payment runs in three calls. `request` registers the transaction and
//! returns a track id, the payer is sent to the gateway's start page, and
//! after the callback the merchant calls `verify` (and, at any time,
//! `inquiry`) with that track id.
//!
//! # Modules
//!
//! - [`case`] - snake_case / camelCase conversion for identifiers and JSON keys
//! - [`codes`] - Result, status and wage code tables
//! - [`proto`] - Request/response wire models
//! - [`callback`] - Callback query string parsing
//! - [`error`] - [`ValidationError`]

pub mod callback;
pub mod case;
pub mod codes;
pub mod error;
pub mod proto;

pub use error::ValidationError;

/// Merchant id the gateway accepts for sandbox transactions.
pub const SANDBOX_MERCHANT: &str = "zibal";
