use std::path::Path;

use fxhash::FxHashMap;
use log::{debug, info};

use peakenrich_core::models::{AnnotationRow, ExpressionRecord, GeneRecord, Strand};
use peakenrich_io::{ReaderError, read_annotation};

use crate::errors::EnrichmentError;

const GENE_PREFIX: &str = "gene-";

///
/// Reduce a gene identifier to the form used for every lookup.
///
/// Surrounding whitespace is trimmed, everything from the first `.` on is
/// dropped (Ensembl version suffix) and any leading, case-insensitive `gene-`
/// prefix is removed. Missing or blank input gives `None`.
///
/// Applying the function to its own output returns the same value.
///
pub fn standardize_gene_name(name: Option<&str>) -> Option<String> {
    let name = name?.trim();
    let mut base = name.split('.').next().unwrap_or_default().trim();

    while let Some(prefix) = base.get(..GENE_PREFIX.len()) {
        if !prefix.eq_ignore_ascii_case(GENE_PREFIX) {
            break;
        }
        base = base[GENE_PREFIX.len()..].trim_start();
    }

    let base = base.trim();
    if base.is_empty() {
        None
    } else {
        Some(base.to_string())
    }
}

/// Identifiers pulled from a GTF attribute column.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct GeneAttributes {
    pub gene_name: Option<String>,
    pub gene_id: Option<String>,
    pub gene_type: Option<String>,
}

fn attribute_value(raw: &str) -> Option<String> {
    let raw = raw.trim();
    match raw.split('"').nth(1) {
        Some(quoted) => Some(quoted.to_string()),
        None if !raw.is_empty() => Some(raw.to_string()),
        None => None,
    }
}

///
/// Parse `key "value";` pairs out of a GTF attribute string. Later duplicates
/// of a key win. Unknown keys are ignored.
///
pub fn parse_attributes(attributes: &str) -> GeneAttributes {
    let mut parsed = GeneAttributes::default();

    for field in attributes.split(';') {
        let Some((key, value)) = field.trim().split_once(char::is_whitespace) else {
            continue;
        };
        match key {
            "gene_name" => parsed.gene_name = attribute_value(value),
            "gene_id" => parsed.gene_id = attribute_value(value),
            "gene_type" | "gene_biotype" => parsed.gene_type = attribute_value(value),
            _ => {}
        }
    }

    parsed
}

fn parse_coordinate(value: &str, field: &str, row: &AnnotationRow) -> Result<u32, EnrichmentError> {
    value.trim().parse::<u32>().map_err(|_| {
        EnrichmentError::AnnotationParseError(format!(
            "invalid {} '{}' for gene on {}",
            field, value, row.chr
        ))
    })
}

///
/// Gene annotation keyed by standardized gene name and gene id.
///
/// Both identifiers of every `gene` row map to the same record. When two genes
/// share a standardized key the later row wins.
///
#[derive(Debug, Clone, Default)]
pub struct GeneNameIndex {
    genes: Vec<GeneRecord>,
    lookup: FxHashMap<String, usize>,
}

impl GeneNameIndex {
    ///
    /// Build the index from raw annotation rows. Only rows with feature type
    /// `gene` are used.
    ///
    pub fn build<I>(rows: I) -> Result<Self, EnrichmentError>
    where
        I: IntoIterator<Item = AnnotationRow>,
    {
        let mut genes: Vec<GeneRecord> = Vec::new();
        let mut lookup: FxHashMap<String, usize> = FxHashMap::default();

        for row in rows.into_iter().filter(|r| r.feature == "gene") {
            let start = parse_coordinate(&row.start, "start", &row)?;
            let end = parse_coordinate(&row.end, "end", &row)?;
            let attributes = parse_attributes(&row.attributes);

            let record = GeneRecord {
                chr: row.chr,
                start,
                end,
                strand: Strand::from(row.strand.as_str()),
                gene_name: attributes.gene_name,
                gene_id: attributes.gene_id,
                gene_type: attributes.gene_type,
                feature: row.feature,
            };

            let idx = genes.len();
            for key in [record.gene_name.as_deref(), record.gene_id.as_deref()] {
                if let Some(key) = standardize_gene_name(key) {
                    lookup.insert(key, idx);
                }
            }
            genes.push(record);
        }

        if genes.is_empty() {
            return Err(EnrichmentError::NoGeneFeatures);
        }

        info!("Loaded {} genes", genes.len());
        info!("Created mapping for {} unique gene identifiers", lookup.len());

        Ok(GeneNameIndex { genes, lookup })
    }

    ///
    /// Read a GTF file and build the index from it.
    ///
    pub fn from_gtf(path: &Path) -> Result<Self, EnrichmentError> {
        let rows = read_annotation(path).map_err(|e| match e {
            ReaderError::MissingFile(p) => EnrichmentError::AnnotationNotFound(p),
            other => EnrichmentError::AnnotationParseError(other.to_string()),
        })?;
        debug!("Read {} annotation rows from {}", rows.len(), path.display());
        GeneNameIndex::build(rows)
    }

    /// Look a gene up by any identifier, standardizing it first.
    pub fn lookup(&self, gene: &str) -> Option<&GeneRecord> {
        let key = standardize_gene_name(Some(gene))?;
        self.lookup.get(&key).map(|&idx| &self.genes[idx])
    }

    pub fn contains(&self, gene: &str) -> bool {
        self.lookup(gene).is_some()
    }

    pub fn genes(&self) -> &[GeneRecord] {
        &self.genes
    }

    pub fn num_genes(&self) -> usize {
        self.genes.len()
    }

    pub fn num_identifiers(&self) -> usize {
        self.lookup.len()
    }
}

/// One DEA gene name with its standardized form and whether the index knows it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameMatch {
    pub original: Option<String>,
    pub standardized: Option<String>,
    pub found: bool,
}

///
/// Check the first `n` DEA gene names against the annotation index.
///
pub fn match_gene_names(
    dea: &[ExpressionRecord],
    index: &GeneNameIndex,
    n: usize,
) -> Vec<NameMatch> {
    dea.iter()
        .take(n)
        .map(|record| {
            let standardized = standardize_gene_name(record.gene.as_deref());
            let found = standardized.as_deref().is_some_and(|g| index.contains(g));
            NameMatch {
                original: record.gene.clone(),
                standardized,
                found,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    use pretty_assertions::assert_eq;
    use rstest::*;

    fn gtf_row(feature: &str, start: &str, end: &str, strand: &str, attrs: &str) -> AnnotationRow {
        AnnotationRow::from_str(&format!(
            "chr1\tHAVANA\t{feature}\t{start}\t{end}\t.\t{strand}\t.\t{attrs}"
        ))
        .unwrap()
    }

    #[fixture]
    fn rows() -> Vec<AnnotationRow> {
        vec![
            gtf_row(
                "gene",
                "1000",
                "5000",
                "+",
                "gene_id \"ENSMUSG00000074637.7\"; gene_type \"protein_coding\"; gene_name \"Sox2\";",
            ),
            gtf_row(
                "transcript",
                "1000",
                "5000",
                "+",
                "gene_id \"ENSMUSG00000074637.7\"; gene_name \"Sox2\";",
            ),
            gtf_row(
                "gene",
                "8000",
                "9000",
                "-",
                "gene_id \"ENSMUSG00000000001.4\"; gene_name \"Gnai3\";",
            ),
        ]
    }

    #[rstest]
    #[case(Some("ENSG00000141510.11"), Some("ENSG00000141510"))]
    #[case(Some("gene-TP53"), Some("TP53"))]
    #[case(Some("GENE-Sox2"), Some("Sox2"))]
    #[case(Some("  Gapdh  "), Some("Gapdh"))]
    #[case(Some("gene-gene-Nes"), Some("Nes"))]
    #[case(Some("gene- Pax6.2"), Some("Pax6"))]
    #[case(Some(""), None)]
    #[case(Some("   "), None)]
    #[case(Some(".1"), None)]
    #[case(Some("gene-"), None)]
    #[case(None, None)]
    fn test_standardize_gene_name(#[case] input: Option<&str>, #[case] expected: Option<&str>) {
        assert_eq!(standardize_gene_name(input).as_deref(), expected);
    }

    #[rstest]
    #[case("ENSG00000141510.11")]
    #[case(" gene-Gene-Olig2.3 ")]
    #[case("gene-ab.c")]
    #[case("Rik")]
    fn test_standardize_is_idempotent(#[case] input: &str) {
        let once = standardize_gene_name(Some(input));
        assert_eq!(standardize_gene_name(once.as_deref()), once);
    }

    #[rstest]
    fn test_standardize_handles_multibyte() {
        assert_eq!(standardize_gene_name(Some("gén")).as_deref(), Some("gén"));
    }

    #[rstest]
    fn test_parse_attributes() {
        let attrs = parse_attributes(
            "gene_id \"ENSMUSG00000074637.7\"; gene_type \"protein_coding\"; gene_name \"Sox2\"; level 2;",
        );
        assert_eq!(attrs.gene_id.as_deref(), Some("ENSMUSG00000074637.7"));
        assert_eq!(attrs.gene_name.as_deref(), Some("Sox2"));
        assert_eq!(attrs.gene_type.as_deref(), Some("protein_coding"));
    }

    #[rstest]
    fn test_parse_attributes_biotype_and_missing_name() {
        let attrs = parse_attributes("gene_id \"ENSG1\"; gene_biotype \"lncRNA\";");
        assert_eq!(attrs.gene_name, None);
        assert_eq!(attrs.gene_type.as_deref(), Some("lncRNA"));
    }

    #[rstest]
    fn test_build_index(rows: Vec<AnnotationRow>) {
        let index = GeneNameIndex::build(rows).unwrap();

        assert_eq!(index.num_genes(), 2);
        assert_eq!(index.num_identifiers(), 4);

        let sox2 = index.lookup("Sox2").unwrap();
        assert_eq!(sox2.start, 1000);
        assert_eq!(sox2.strand, Strand::Plus);

        // the id maps to the same record, with or without version
        assert_eq!(index.lookup("ENSMUSG00000074637"), Some(sox2));
        assert_eq!(index.lookup("ENSMUSG00000074637.9"), Some(sox2));
        assert_eq!(index.lookup("gene-Gnai3").unwrap().strand, Strand::Minus);
        assert!(!index.contains("Nope"));
    }

    #[rstest]
    fn test_build_without_genes() {
        let rows = vec![gtf_row("exon", "1", "10", "+", "gene_name \"A\";")];
        assert!(matches!(
            GeneNameIndex::build(rows),
            Err(EnrichmentError::NoGeneFeatures)
        ));
    }

    #[rstest]
    fn test_build_bad_coordinate() {
        let rows = vec![gtf_row("gene", "abc", "10", "+", "gene_name \"A\";")];
        assert!(matches!(
            GeneNameIndex::build(rows),
            Err(EnrichmentError::AnnotationParseError(_))
        ));
    }

    #[rstest]
    fn test_from_gtf_missing_file() {
        let result = GeneNameIndex::from_gtf(Path::new("does/not/exist.gtf"));
        assert!(matches!(result, Err(EnrichmentError::AnnotationNotFound(_))));
    }

    #[rstest]
    fn test_match_gene_names(rows: Vec<AnnotationRow>) {
        let index = GeneNameIndex::build(rows).unwrap();
        let dea = vec![
            ExpressionRecord::new(Some("gene-Sox2".to_string()), Some(1.0), Some(0.01)),
            ExpressionRecord::new(Some("Unknown.1".to_string()), None, None),
            ExpressionRecord::new(None, None, None),
            ExpressionRecord::new(Some("Gnai3".to_string()), None, None),
        ];

        let matches = match_gene_names(&dea, &index, 3);
        assert_eq!(matches.len(), 3);
        assert!(matches[0].found);
        assert_eq!(matches[0].standardized.as_deref(), Some("Sox2"));
        assert!(!matches[1].found);
        assert_eq!(matches[1].standardized.as_deref(), Some("Unknown"));
        assert_eq!(matches[2].standardized, None);
        assert!(!matches[2].found);
    }
}
