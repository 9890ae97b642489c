//! Async client for discovering which network/station combinations a
//! SeedLink server exposes.
//!
//! Drives the HELLO/CAT handshake over raw TCP, parses the fixed-column
//! station listing, and caches per-target results behind a configurable
//! freshness window.
//!
//! # Example
//!
//! ```no_run
//! # async fn example() -> slcat_rs_client::Result<()> {
//! use std::time::Duration;
//! use slcat_rs_client::{ClientConfig, QueryRunner, ResultCache, Target};
//!
//! let cache = ResultCache::new(Duration::from_secs(60));
//! let mut runner = QueryRunner::new(ClientConfig::default(), cache);
//!
//! let targets = vec![Target::parse("rtserve.iris.washington.edu")?];
//! for result in runner.run(&targets).await {
//!     println!("{}: {} stations", result.target_id, result.stations.len());
//! }
//! # Ok(())
//! # }
//! ```

pub mod cache;
mod client;
mod connection;
pub mod error;
pub mod mock;
mod runner;
pub mod state;

pub use cache::ResultCache;
pub use slcat_rs_protocol::StationRecord;
pub use client::CatalogClient;
pub use error::{ClientError, Result};
pub use runner::QueryRunner;
pub use state::{ClientConfig, DEFAULT_PORT, QueryError, QueryResult, Target};
