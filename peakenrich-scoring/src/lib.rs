//! Promoter binding-site enrichment between two ChIP-seq conditions.
//!
//! For every up-regulated gene of a differential-expression table, the peaks of
//! each condition that overlap the gene's promoter window are pooled across
//! samples and reduced to a single enrichment score by each of seven
//! [`EnrichmentMethod`]s.
//!
//! # Example
//!
//! ```no_run
//! use peakenrich_scoring::{EnrichmentConfig, EnrichmentPipeline, GeneNameIndex};
//! use peakenrich_scoring::conditions::load_condition;
//! use peakenrich_io::{DataLayout, read_expression_table};
//!
//! let layout = DataLayout::new("analysis", "data");
//! let config = EnrichmentConfig::default();
//!
//! let dea = read_expression_table(&layout.dea_path()).unwrap();
//! let exo = load_condition("exogenous", &layout.exo_samples, &layout);
//! let endo = load_condition("endogenous", &layout.endo_samples, &layout);
//! let index = GeneNameIndex::from_gtf(&layout.annotation_path()).unwrap();
//!
//! let results = EnrichmentPipeline::new(&exo, &endo, &index, &config)
//!     .run(&dea)
//!     .unwrap();
//! ```
pub mod annotation;
pub mod conditions;
pub mod config;
pub mod consts;
pub mod errors;
pub mod fisher;
pub mod methods;
pub mod pipeline;
pub mod promoters;
pub mod summary;

// re-exports
pub use annotation::*;
pub use config::*;
pub use errors::*;
pub use methods::*;
pub use pipeline::*;
pub use promoters::*;
