use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{Context, Result};
use clap::ArgMatches;
use log::{info, warn};

use peakenrich_core::models::Condition;
use peakenrich_io::{CsvWrite, DataLayout, read_expression_table};
use peakenrich_scoring::conditions::{check_conditions, load_condition};
use peakenrich_scoring::consts::{ENDO_CONDITION, EXO_CONDITION};
use peakenrich_scoring::summary::{
    summarize_peak_distribution, summarize_results, width_distributions, width_vs_enrichment,
};
use peakenrich_scoring::{EnrichmentMethod, EnrichmentPipeline, EnrichmentResults, GeneNameIndex};

use crate::config::RunConfig;

fn many(matches: &ArgMatches, id: &str) -> Option<Vec<String>> {
    matches
        .get_many::<String>(id)
        .map(|values| values.map(|v| v.trim().to_string()).filter(|v| !v.is_empty()).collect())
}

///
/// Start from the `--config` file (or defaults) and apply every flag given.
///
pub fn resolve_run_config(matches: &ArgMatches) -> Result<RunConfig> {
    let mut run = match matches.get_one::<String>("config") {
        Some(path) => RunConfig::from_file(&PathBuf::from(path))?,
        None => RunConfig::default(),
    };

    let layout = &mut run.layout;
    if let Some(dir) = matches.get_one::<String>("working-dir") {
        layout.working_dir = PathBuf::from(dir);
    }
    if let Some(dir) = matches.get_one::<String>("data-dir") {
        layout.data_dir = PathBuf::from(dir);
    }
    if let Some(path) = matches.get_one::<String>("dea") {
        layout.dea_path = Some(PathBuf::from(path));
    }
    if let Some(path) = matches.get_one::<String>("gtf") {
        layout.annotation_path = Some(PathBuf::from(path));
    }
    if let Some(dir) = matches.get_one::<String>("output") {
        layout.output_dir = Some(PathBuf::from(dir));
    }
    if let Some(label) = matches.get_one::<String>("label") {
        layout.label = label.clone();
    }
    if let Some(samples) = many(matches, "exo") {
        layout.exo_samples = samples;
    }
    if let Some(samples) = many(matches, "endo") {
        layout.endo_samples = samples;
    }

    let enrichment = &mut run.enrichment;
    if let Some(window) = matches.get_one::<u32>("window") {
        enrichment.promoter_window = *window;
    }
    if let Some(threads) = matches.get_one::<usize>("threads") {
        enrichment.threads = Some(*threads);
    }
    if let Some(methods) = many(matches, "methods") {
        enrichment.methods = methods
            .iter()
            .map(|m| EnrichmentMethod::from_str(m))
            .collect::<Result<Vec<_>, _>>()?;
    }

    Ok(run)
}

fn write_reports(
    layout: &DataLayout,
    results: &EnrichmentResults,
    pipeline: &EnrichmentPipeline,
    conditions: &[&Condition],
) -> Result<()> {
    width_distributions(conditions).write_csv(layout.width_distribution_path())?;

    if results.is_empty() {
        warn!("No enrichment results, skipping ranked and summary tables");
        return Ok(());
    }

    for table in results.iter() {
        table
            .rows()
            .write_csv(layout.ranked_table_path(table.method.as_str()))?;
    }

    let summary = summarize_results(results);
    summary.write_csv(layout.summary_path())?;

    let distribution = summarize_peak_distribution(results);
    distribution.write_csv(layout.peak_distribution_path())?;

    let points = width_vs_enrichment(results, pipeline);
    if points.is_empty() {
        warn!("No genes with peaks in both conditions for width comparison");
    } else {
        points.write_csv(layout.width_vs_enrichment_path())?;
    }

    info!("Summary statistics:");
    for row in &summary {
        info!(
            "  {}: {} genes, median {:.3}, mean {:.3}, {} with score > 1, {} highly significant",
            row.method,
            row.num_genes,
            row.median_enrichment,
            row.mean_enrichment,
            row.significant_genes,
            row.highly_significant
        );
    }
    info!("Peak distribution summary:");
    for row in &distribution {
        info!(
            "  {}: {} genes, {} exo only, {} endo only, {} both",
            row.method, row.total_genes, row.exo_only, row.endo_only, row.both
        );
    }

    Ok(())
}

pub fn run_enrich(matches: &ArgMatches) -> Result<()> {
    let RunConfig { layout, enrichment } = resolve_run_config(matches)?;

    info!("Working directory: {}", layout.working_dir.display());
    info!("Data directory: {}", layout.data_dir.display());

    let dea_path = layout.dea_path();
    let dea = read_expression_table(&dea_path).with_context(|| {
        format!(
            "Failed to load differential expression table {}",
            dea_path.display()
        )
    })?;
    info!("Loaded {} genes from differential expression table", dea.len());

    let exo = load_condition(EXO_CONDITION, &layout.exo_samples, &layout);
    let endo = load_condition(ENDO_CONDITION, &layout.endo_samples, &layout);
    check_conditions(&exo, &endo)?;

    let index = GeneNameIndex::from_gtf(&layout.annotation_path())
        .context("Failed to load gene annotations")?;

    let pipeline = EnrichmentPipeline::new(&exo, &endo, &index, &enrichment);
    let results = pipeline.run(&dea)?;

    write_reports(&layout, &results, &pipeline, &[&exo, &endo])?;

    info!("Analysis completed, results in {}", layout.output_dir().display());

    Ok(())
}
