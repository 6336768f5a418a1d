use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum EnrichmentError {
    #[error("GTF file not found: {0}")]
    AnnotationNotFound(PathBuf),

    #[error("Error parsing annotation: {0}")]
    AnnotationParseError(String),

    #[error("No rows with feature type 'gene' found in annotation")]
    NoGeneFeatures,

    #[error("Insufficient peak data for analysis: no valid peaks in either condition")]
    InsufficientPeakData,

    #[error("No expression row for gene {0}")]
    MissingExpression(String),

    #[error("Fisher exact test failed: {0}")]
    StatisticalTest(String),

    #[error("Invalid enrichment method: {0}")]
    InvalidMethod(String),

    #[error("Failed to build worker pool: {0}")]
    ThreadPool(String),
}
