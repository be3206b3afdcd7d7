#![forbid(unsafe_code)]
//! cobuy-core library.
//!
//! # Conventions
//!
//! - **Errors**: Use `anyhow::Result` for anything touching the filesystem;
//!   typed failures live in [`error::CobuyError`].
//! - **Logging**: Use `tracing` macros (`info!`, `warn!`, `error!`, `debug!`, `trace!`).

pub mod config;
pub mod dataset;
pub mod error;
pub mod lookup;
pub mod model;

pub use dataset::Dataset;
pub use model::{Catalog, Order, Product, ProductId};
