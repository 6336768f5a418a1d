//! # Input/Output utilities for peakenrich.
//!
//! Readers for the four kinds of input a run consumes (narrowPeak peak calls,
//! GTF gene annotation, differential-expression CSV and BAM alignments, which
//! only contribute a mapped-read count) and a small CSV writer for the report
//! tables. Where a file path lives is described by [`DataLayout`].
//!
//! Per-sample readers come in two flavours: a strict one returning
//! [`ReaderError`], and a degrading one that logs the problem and falls back to
//! an empty table or a depth of 1 so a single bad sample never aborts a run.
pub mod consts;
pub mod depth;
pub mod error;
pub mod expression;
pub mod gtf;
pub mod layout;
pub mod narrowpeak;
pub mod report;

// re-expose core functions
pub use consts::*;
pub use depth::*;
pub use error::*;
pub use expression::*;
pub use gtf::*;
pub use layout::*;
pub use narrowpeak::*;
pub use report::*;
