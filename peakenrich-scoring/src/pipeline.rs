use fxhash::FxHashMap;
use indicatif::{ProgressBar, ProgressStyle};
use log::{info, warn};
use rayon::prelude::*;
use serde::Serialize;

use peakenrich_core::models::{Condition, ExpressionRecord, total_peak_count};

use crate::annotation::{GeneNameIndex, standardize_gene_name};
use crate::config::EnrichmentConfig;
use crate::consts::NO_PEAKS;
use crate::errors::EnrichmentError;
use crate::methods::{EnrichmentMethod, ScoringContext};
use crate::promoters::{PeakSubset, peaks_near_gene};

///
/// One scored gene in one method's result table.
///
#[derive(Debug, Clone, PartialEq)]
pub struct EnrichmentRecord {
    pub gene: String,
    pub enrichment_score: f64,
    pub log2_fold_change: Option<f64>,
    pub padj: Option<f64>,
    pub exo_peaks: Vec<String>,
    pub endo_peaks: Vec<String>,
}

impl EnrichmentRecord {
    pub fn num_exo_peaks(&self) -> usize {
        self.exo_peaks.len()
    }

    pub fn num_endo_peaks(&self) -> usize {
        self.endo_peaks.len()
    }

    pub fn to_row(&self) -> EnrichmentRow {
        EnrichmentRow {
            gene: self.gene.clone(),
            enrichment_score: self.enrichment_score,
            log2_fold_change: self.log2_fold_change,
            padj: self.padj,
            exo_peaks: join_coordinates(&self.exo_peaks),
            endo_peaks: join_coordinates(&self.endo_peaks),
            num_exo_peaks: self.num_exo_peaks(),
            num_endo_peaks: self.num_endo_peaks(),
        }
    }
}

fn join_coordinates(coordinates: &[String]) -> String {
    if coordinates.is_empty() {
        NO_PEAKS.to_string()
    } else {
        coordinates.join(";")
    }
}

///
/// Flat CSV form of an [EnrichmentRecord].
///
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnrichmentRow {
    pub gene: String,
    pub enrichment_score: f64,
    #[serde(rename = "log2FoldChange")]
    pub log2_fold_change: Option<f64>,
    pub padj: Option<f64>,
    pub exo_peaks: String,
    pub endo_peaks: String,
    pub num_exo_peaks: usize,
    pub num_endo_peaks: usize,
}

/// The ranked records of one method.
#[derive(Debug, Clone, PartialEq)]
pub struct MethodResults {
    pub method: EnrichmentMethod,
    pub records: Vec<EnrichmentRecord>,
}

impl MethodResults {
    pub fn rows(&self) -> Vec<EnrichmentRow> {
        self.records.iter().map(|r| r.to_row()).collect()
    }
}

///
/// Per-method result tables, in the order the methods were requested. A method
/// that produced no records has no table.
///
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EnrichmentResults {
    pub tables: Vec<MethodResults>,
}

impl EnrichmentResults {
    pub fn get(&self, method: EnrichmentMethod) -> Option<&MethodResults> {
        self.tables.iter().find(|t| t.method == method)
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, MethodResults> {
        self.tables.iter()
    }
}

///
/// Standardized names of up-regulated genes, in table order. Duplicates are kept.
///
pub fn upregulated_genes(dea: &[ExpressionRecord], config: &EnrichmentConfig) -> Vec<String> {
    dea.iter()
        .filter(|r| r.is_upregulated(config.log2fc_threshold, config.padj_threshold))
        .filter_map(|r| standardize_gene_name(r.gene.as_deref()))
        .collect()
}

/// First DEA row for every standardized gene name.
fn expression_lookup(dea: &[ExpressionRecord]) -> FxHashMap<String, &ExpressionRecord> {
    let mut lookup: FxHashMap<String, &ExpressionRecord> = FxHashMap::default();
    for record in dea {
        if let Some(gene) = standardize_gene_name(record.gene.as_deref()) {
            lookup.entry(gene).or_insert(record);
        }
    }
    lookup
}

/// Outcome of every requested method for one gene.
struct GeneScores {
    gene: String,
    has_peaks: bool,
    outcomes: Vec<Result<Option<EnrichmentRecord>, EnrichmentError>>,
}

///
/// Scores up-regulated genes between two conditions.
///
/// Conditions and the annotation index are only read, so genes are scored in
/// parallel. Per-method tables are assembled afterwards in gene order and then
/// sorted, so the output does not depend on scheduling.
///
pub struct EnrichmentPipeline<'a> {
    exo: &'a Condition,
    endo: &'a Condition,
    index: &'a GeneNameIndex,
    config: &'a EnrichmentConfig,
}

impl<'a> EnrichmentPipeline<'a> {
    pub fn new(
        exo: &'a Condition,
        endo: &'a Condition,
        index: &'a GeneNameIndex,
        config: &'a EnrichmentConfig,
    ) -> Self {
        EnrichmentPipeline {
            exo,
            endo,
            index,
            config,
        }
    }

    /// Exogenous and endogenous peaks in the promoter window of `gene`.
    pub fn subsets(&self, gene: &str) -> (PeakSubset<'a>, PeakSubset<'a>) {
        let window = self.config.promoter_window;
        (
            peaks_near_gene(gene, self.exo, self.index, window),
            peaks_near_gene(gene, self.endo, self.index, window),
        )
    }

    fn score_gene(
        &self,
        gene: &str,
        expression: Option<&ExpressionRecord>,
        context: &ScoringContext,
    ) -> GeneScores {
        let (exo, endo) = self.subsets(gene);
        let has_peaks = !exo.is_empty() || !endo.is_empty();

        let outcomes = self
            .config
            .methods
            .iter()
            .map(|method| -> Result<Option<EnrichmentRecord>, EnrichmentError> {
                if !has_peaks {
                    return Ok(None);
                }
                let expression =
                    expression.ok_or_else(|| EnrichmentError::MissingExpression(gene.to_string()))?;
                let score = method.score(&exo, &endo, context)?;
                if score.is_nan() {
                    return Ok(None);
                }
                Ok(Some(EnrichmentRecord {
                    gene: gene.to_string(),
                    enrichment_score: score,
                    log2_fold_change: expression.log2_fold_change,
                    padj: expression.padj,
                    exo_peaks: exo.coordinates(),
                    endo_peaks: endo.coordinates(),
                }))
            })
            .collect();

        GeneScores {
            gene: gene.to_string(),
            has_peaks,
            outcomes,
        }
    }

    fn progress_bar(&self, len: usize) -> ProgressBar {
        let progress = ProgressBar::new(len as u64);
        let style = ProgressStyle::with_template(
            "{spinner:.green} [{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} genes",
        )
        .unwrap_or_else(|_| ProgressStyle::default_bar());
        progress.set_style(style);
        progress
    }

    fn score_all(
        &self,
        genes: &[String],
        expression: &FxHashMap<String, &ExpressionRecord>,
        context: &ScoringContext,
    ) -> Vec<GeneScores> {
        let progress = self.progress_bar(genes.len());
        let scored = genes
            .par_iter()
            .map(|gene| {
                let scores = self.score_gene(gene, expression.get(gene).copied(), context);
                progress.inc(1);
                scores
            })
            .collect();
        progress.finish_and_clear();
        scored
    }

    /// Split per-gene outcomes into per-method tables, logging failed genes.
    fn collect(&self, scored: Vec<GeneScores>) -> EnrichmentResults {
        let methods = &self.config.methods;
        let genes_with_peaks = scored.iter().filter(|s| s.has_peaks).count();

        let mut tables: Vec<Vec<EnrichmentRecord>> = vec![Vec::new(); methods.len()];
        for gene_scores in scored {
            for ((method, table), outcome) in methods
                .iter()
                .zip(tables.iter_mut())
                .zip(gene_scores.outcomes)
            {
                match outcome {
                    Ok(Some(record)) => table.push(record),
                    Ok(None) => {}
                    Err(e) => warn!(
                        "Error processing gene {} for {}: {}",
                        gene_scores.gene, method, e
                    ),
                }
            }
        }

        let mut results = EnrichmentResults::default();
        for (method, mut records) in methods.iter().zip(tables) {
            info!("{}: found peaks for {} genes", method, genes_with_peaks);
            info!("{}: found enrichment scores for {} genes", method, records.len());
            if records.is_empty() {
                warn!("No results for {}", method);
                continue;
            }
            // stable, so ties keep gene order
            records.sort_by(|a, b| b.enrichment_score.total_cmp(&a.enrichment_score));
            results.tables.push(MethodResults {
                method: *method,
                records,
            });
        }
        results
    }

    ///
    /// Score every up-regulated gene of `dea` with every configured method.
    ///
    /// Only a failure to build the worker pool is an error. A gene that fails
    /// for one method is logged and left out of that method's table.
    ///
    pub fn run(&self, dea: &[ExpressionRecord]) -> Result<EnrichmentResults, EnrichmentError> {
        let genes = upregulated_genes(dea, self.config);
        info!("Found {} up-regulated genes", genes.len());

        let background = total_peak_count(&[self.exo, self.endo]) as u64;
        info!("Total peaks across conditions: {}", background);

        let context = ScoringContext {
            background,
            qvalue_clip: self.config.qvalue_clip,
        };
        let expression = expression_lookup(dea);

        let scored = match self.config.threads {
            Some(threads) => {
                let pool = rayon::ThreadPoolBuilder::new()
                    .num_threads(threads)
                    .build()
                    .map_err(|e| EnrichmentError::ThreadPool(e.to_string()))?;
                pool.install(|| self.score_all(&genes, &expression, &context))
            }
            None => self.score_all(&genes, &expression, &context),
        };

        Ok(self.collect(scored))
    }
}
