use serde::{Deserialize, Serialize};

use crate::consts::{
    DEFAULT_LOG2FC_THRESHOLD, DEFAULT_PADJ_THRESHOLD, DEFAULT_PROMOTER_WINDOW,
    DEFAULT_QVALUE_CLIP,
};
use crate::methods::EnrichmentMethod;

///
/// Tunable parameters of an enrichment run.
///
/// Every field has a default, so a partial `[enrichment]` table in a TOML run
/// config only overrides what it names.
///
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnrichmentConfig {
    pub promoter_window: u32,
    pub log2fc_threshold: f64,
    pub padj_threshold: f64,
    pub qvalue_clip: f64,
    pub methods: Vec<EnrichmentMethod>,
    /// Worker threads for per-gene scoring; `None` uses the global rayon pool.
    pub threads: Option<usize>,
}

impl Default for EnrichmentConfig {
    fn default() -> Self {
        EnrichmentConfig {
            promoter_window: DEFAULT_PROMOTER_WINDOW,
            log2fc_threshold: DEFAULT_LOG2FC_THRESHOLD,
            padj_threshold: DEFAULT_PADJ_THRESHOLD,
            qvalue_clip: DEFAULT_QVALUE_CLIP,
            methods: EnrichmentMethod::ALL.to_vec(),
            threads: None,
        }
    }
}

impl EnrichmentConfig {
    pub fn with_window(mut self, window: u32) -> Self {
        self.promoter_window = window;
        self
    }

    pub fn with_methods(mut self, methods: Vec<EnrichmentMethod>) -> Self {
        self.methods = methods;
        self
    }

    pub fn with_threads(mut self, threads: Option<usize>) -> Self {
        self.threads = threads;
        self
    }
}
