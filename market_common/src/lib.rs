//!
//! Alpha Vantage access layer shared by the market command-line client.
//!
//! This crate aggregates:
//! - `error` — unified error type `MarketError` used across the workspace.
//! - `result` — handy `Result<T, MarketError>` alias.
//! - `config` — API key, endpoint and timeout, loaded from the environment.
//! - `function` — the `function=` selectors the API understands.
//! - `gateway` — single-request HTTP gateway with rate-limit detection.
//! - `model` — typed response models, one per selector.
//! - `market` — typed accessors built on the gateway.
#![warn(missing_docs)]
pub mod config;
pub mod error;
pub mod function;
pub mod gateway;
pub mod market;
pub mod model;
pub mod result;

pub use config::ApiConfig;
pub use error::MarketError;
pub use gateway::Gateway;
pub use market::MarketClient;
pub use result::Result;
