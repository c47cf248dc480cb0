//! Common utilities and shared types for lawhear.
//!
//! This crate provides foundational components used across all lawhear crates:
//!
//! - **Configuration**: Application settings via [`Config`]
//! - **Error handling**: Unified error types via [`AppError`] and [`AppResult`]
//! - **ID Generation**: ULID-based unique identifiers via [`IdGenerator`]
//! - **CSV rendering**: Spreadsheet-safe CSV documents via [`csv::to_csv`]
//!
//! # Example
//!
//! ```no_run
//! use lawhear_common::{Config, IdGenerator, AppResult};
//!
//! fn example() -> AppResult<()> {
//!     let config = Config::load()?;
//!     let id_gen = IdGenerator::new();
//!     let id = id_gen.generate();
//!     println!("Generated ID: {}", id);
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod csv;
pub mod error;
pub mod id;

pub use config::Config;
pub use csv::{to_csv, CSV_BOM};
pub use error::{AppError, AppResult};
pub use id::IdGenerator;
