use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::ArgMatches;

use peakenrich_io::{DataLayout, read_expression_table};
use peakenrich_scoring::{GeneNameIndex, match_gene_names};

use super::cli::DEFAULT_EXAMPLES;

pub fn run_match_names(matches: &ArgMatches) -> Result<()> {
    let working_dir = matches
        .get_one::<String>("working-dir")
        .context("A working directory is required")?;
    let n = matches
        .get_one::<usize>("n")
        .copied()
        .unwrap_or(DEFAULT_EXAMPLES);

    let mut layout = DataLayout::new(working_dir, working_dir);
    layout.dea_path = matches.get_one::<String>("dea").map(PathBuf::from);
    layout.annotation_path = matches.get_one::<String>("gtf").map(PathBuf::from);

    let dea = read_expression_table(&layout.dea_path())
        .context("Failed to load differential expression table")?;
    let index = GeneNameIndex::from_gtf(&layout.annotation_path())
        .context("Failed to load gene annotations")?;

    println!("Gene name matching examples:");
    for m in match_gene_names(&dea, &index, n) {
        println!(
            "  {} -> {} (found: {})",
            m.original.as_deref().unwrap_or("NA"),
            m.standardized.as_deref().unwrap_or("NA"),
            m.found
        );
    }

    Ok(())
}
