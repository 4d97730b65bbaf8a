//! xlmerge - merge spreadsheets on their common columns
//!
//! Reads several spreadsheet files, keeps the columns every file shares
//! (matched by trimmed header label, in sorted order), concatenates the rows
//! and writes the result as a single xlsx sheet.

pub mod batch;
pub mod config;
pub mod error;
pub mod loader;
pub mod merge;
pub mod model;
pub mod output;

pub use batch::{run_batch, Report};
pub use config::Config;
pub use error::{LoadError, MergeError};
pub use merge::{merge, MergeOutcome};
pub use model::Table;
