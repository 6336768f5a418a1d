//! # peakenrich-core
//!
//! Typed records shared by every peakenrich crate: narrowPeak peaks grouped into
//! per-sample [`PeakTable`](models::PeakTable)s, experimental [`Condition`](models::Condition)s,
//! gene annotation rows and records, and differential-expression rows.
//!
//! Validation happens at the load boundary. Once a table is built it is only ever
//! read, except for the single depth-normalization pass which returns a new table.
pub mod errors;
pub mod models;
pub mod utils;

pub use errors::ModelError;
