//! Aggregate views over per-method results, written as report tables.
use fxhash::FxHashMap;
use serde::Serialize;

use peakenrich_core::models::Condition;

use crate::consts::{HIGHLY_SIGNIFICANT_LOG2FC, HIGHLY_SIGNIFICANT_PADJ, SIGNIFICANT_SCORE};
use crate::methods::EnrichmentMethod;
use crate::pipeline::{EnrichmentPipeline, EnrichmentResults, MethodResults};

/// Methods compared against the exo/endo peak-width ratio.
pub const WIDTH_METHODS: [EnrichmentMethod; 3] = [
    EnrichmentMethod::WidthWeighted,
    EnrichmentMethod::CoverageScore,
    EnrichmentMethod::AreaIntegration,
];

/// Sample label of the per-condition pooled row in the width distribution.
pub const POOLED_SAMPLE: &str = "all";

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

fn median(values: &[f64]) -> f64 {
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    let n = sorted.len();
    if n == 0 {
        f64::NAN
    } else if n % 2 == 0 {
        (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
    } else {
        sorted[n / 2]
    }
}

/// Sample standard deviation (n - 1 in the denominator), NaN below two values.
fn sample_std(values: &[f64]) -> f64 {
    let n = values.len();
    if n < 2 {
        return f64::NAN;
    }
    let m = mean(values);
    let ss: f64 = values.iter().map(|v| (v - m).powi(2)).sum();
    (ss / (n - 1) as f64).sqrt()
}

///
/// One row of the per-method summary table.
///
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MethodSummary {
    pub method: String,
    pub median_enrichment: f64,
    pub mean_enrichment: f64,
    pub std_enrichment: f64,
    pub num_genes: usize,
    pub significant_genes: usize,
    #[serde(rename = "median_log2FC")]
    pub median_log2fc: f64,
    #[serde(rename = "mean_log2FC")]
    pub mean_log2fc: f64,
    pub median_padj: f64,
    pub highly_significant: usize,
}

impl MethodSummary {
    pub fn from_results(results: &MethodResults) -> Self {
        let records = &results.records;
        let scores: Vec<f64> = records.iter().map(|r| r.enrichment_score).collect();
        let lfc: Vec<f64> = records.iter().filter_map(|r| r.log2_fold_change).collect();
        let padj: Vec<f64> = records.iter().filter_map(|r| r.padj).collect();

        let highly_significant = records
            .iter()
            .filter(|r| {
                r.enrichment_score > SIGNIFICANT_SCORE
                    && r.log2_fold_change.is_some_and(|v| v > HIGHLY_SIGNIFICANT_LOG2FC)
                    && r.padj.is_some_and(|v| v < HIGHLY_SIGNIFICANT_PADJ)
            })
            .count();

        MethodSummary {
            method: results.method.to_string(),
            median_enrichment: median(&scores),
            mean_enrichment: mean(&scores),
            std_enrichment: sample_std(&scores),
            num_genes: records.len(),
            significant_genes: scores.iter().filter(|&&s| s > SIGNIFICANT_SCORE).count(),
            median_log2fc: median(&lfc),
            mean_log2fc: mean(&lfc),
            median_padj: median(&padj),
            highly_significant,
        }
    }
}

pub fn summarize_results(results: &EnrichmentResults) -> Vec<MethodSummary> {
    results.iter().map(MethodSummary::from_results).collect()
}

///
/// How the genes of one method split by which condition had peaks, read off
/// the score: `+inf` is exogenous only, exactly 0 is endogenous only.
///
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PeakDistribution {
    pub method: String,
    pub total_genes: usize,
    pub exo_only: usize,
    pub endo_only: usize,
    pub both: usize,
}

pub fn summarize_peak_distribution(results: &EnrichmentResults) -> Vec<PeakDistribution> {
    results
        .iter()
        .map(|table| {
            let scores = table.records.iter().map(|r| r.enrichment_score);
            let exo_only = scores.clone().filter(|s| *s == f64::INFINITY).count();
            let endo_only = scores.clone().filter(|s| *s == 0.0).count();
            let both = scores.filter(|s| s.is_finite() && *s != 0.0).count();
            PeakDistribution {
                method: table.method.to_string(),
                total_genes: table.records.len(),
                exo_only,
                endo_only,
                both,
            }
        })
        .collect()
}

/// Peak width statistics of one sample, or of a whole condition.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WidthDistribution {
    pub condition: String,
    pub sample: String,
    pub num_peaks: usize,
    pub mean_width: f64,
    pub median_width: f64,
}

impl WidthDistribution {
    fn new(condition: &str, sample: &str, widths: &[f64]) -> Self {
        WidthDistribution {
            condition: condition.to_string(),
            sample: sample.to_string(),
            num_peaks: widths.len(),
            mean_width: mean(widths),
            median_width: median(widths),
        }
    }
}

///
/// Width statistics per sample, then one pooled row per condition.
///
pub fn width_distributions(conditions: &[&Condition]) -> Vec<WidthDistribution> {
    let mut rows = Vec::new();
    for condition in conditions {
        let mut pooled: Vec<f64> = Vec::new();
        for table in condition.iter() {
            let widths: Vec<f64> = table.widths().into_iter().map(f64::from).collect();
            rows.push(WidthDistribution::new(&condition.name, &table.sample_id, &widths));
            pooled.extend(widths);
        }
        rows.push(WidthDistribution::new(&condition.name, POOLED_SAMPLE, &pooled));
    }
    rows
}

/// A gene's score next to its exo/endo mean peak-width ratio.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WidthEnrichmentPoint {
    pub method: String,
    pub gene: String,
    pub width_ratio: f64,
    pub enrichment_score: f64,
}

///
/// Mean exo width over mean endo width for every `width_weighted` gene with
/// peaks in both conditions, joined to the scores of each width-aware method.
/// Only positive scores and ratios are kept.
///
pub fn width_vs_enrichment(
    results: &EnrichmentResults,
    pipeline: &EnrichmentPipeline,
) -> Vec<WidthEnrichmentPoint> {
    let Some(reference) = results.get(EnrichmentMethod::WidthWeighted) else {
        return Vec::new();
    };

    let mut ratios: FxHashMap<&str, f64> = FxHashMap::default();
    for record in &reference.records {
        if ratios.contains_key(record.gene.as_str()) {
            continue;
        }
        let (exo, endo) = pipeline.subsets(&record.gene);
        if let (Some(exo_width), Some(endo_width)) = (exo.mean_width(), endo.mean_width()) {
            ratios.insert(record.gene.as_str(), exo_width / endo_width);
        }
    }

    let mut points = Vec::new();
    for method in WIDTH_METHODS {
        let Some(table) = results.get(method) else {
            continue;
        };
        for record in &table.records {
            let Some(&ratio) = ratios.get(record.gene.as_str()) else {
                continue;
            };
            if record.enrichment_score > 0.0 && ratio > 0.0 {
                points.push(WidthEnrichmentPoint {
                    method: method.to_string(),
                    gene: record.gene.clone(),
                    width_ratio: ratio,
                    enrichment_score: record.enrichment_score,
                });
            }
        }
    }
    points
}
