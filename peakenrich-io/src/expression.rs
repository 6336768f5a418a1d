use std::path::Path;

use log::info;

use peakenrich_core::models::ExpressionRecord;
use peakenrich_core::utils::parse_optional_float;

use crate::consts::{GENE_COLUMN, LOG2FC_COLUMN, PADJ_COLUMN};
use crate::error::{ReaderError, Result};

fn parse_optional_string(value: &str) -> Option<String> {
    let value = value.trim();
    match value {
        "" | "NA" | "N/A" | "NaN" | "nan" | "null" | "NULL" | "None" | "<NA>" => None,
        _ => Some(value.to_string()),
    }
}

///
/// Read a differential-expression table.
///
/// The file must be comma-separated with a header containing `gene`,
/// `log2FoldChange` and `padj`. Other columns (an unnamed row index, base
/// means, ...) are ignored. Missing-value markers become `None`.
///
pub fn read_expression_table(path: &Path) -> Result<Vec<ExpressionRecord>> {
    if !path.is_file() {
        return Err(ReaderError::MissingFile(path.to_path_buf()));
    }

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)?;

    let headers = reader.headers()?.clone();
    let column = |name: &str| -> Result<usize> {
        headers
            .iter()
            .position(|h| h.trim() == name)
            .ok_or_else(|| ReaderError::MissingColumn {
                column: name.to_string(),
                path: path.to_path_buf(),
            })
    };

    let gene_idx = column(GENE_COLUMN)?;
    let lfc_idx = column(LOG2FC_COLUMN)?;
    let padj_idx = column(PADJ_COLUMN)?;

    let mut records = Vec::new();
    for row in reader.records() {
        let row = row?;
        let cell = |idx: usize| row.get(idx).unwrap_or("");
        records.push(ExpressionRecord::new(
            parse_optional_string(cell(gene_idx)),
            parse_optional_float(cell(lfc_idx)),
            parse_optional_float(cell(padj_idx)),
        ));
    }

    info!("DEA file {}: {} genes", path.display(), records.len());

    Ok(records)
}
