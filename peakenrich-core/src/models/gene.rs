use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;
use crate::models::Strand;

/// Number of positional columns in a GTF row.
pub const GTF_FIELDS: usize = 9;

///
/// One raw row of a GTF annotation file. Coordinates are kept as text until
/// the row is known to be a `gene` feature.
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnotationRow {
    pub chr: String,
    pub source: String,
    pub feature: String,
    pub start: String,
    pub end: String,
    pub score: String,
    pub strand: String,
    pub frame: String,
    pub attributes: String,
}

impl FromStr for AnnotationRow {
    type Err = ModelError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let fields: Vec<&str> = line.trim_end_matches(['\r', '\n']).split('\t').collect();
        if fields.len() < GTF_FIELDS {
            return Err(ModelError::FieldCount {
                expected: GTF_FIELDS,
                found: fields.len(),
                line: line.to_string(),
            });
        }

        Ok(AnnotationRow {
            chr: fields[0].to_string(),
            source: fields[1].to_string(),
            feature: fields[2].to_string(),
            start: fields[3].to_string(),
            end: fields[4].to_string(),
            score: fields[5].to_string(),
            strand: fields[6].to_string(),
            frame: fields[7].to_string(),
            // anything past column 9 belongs to the attribute string
            attributes: fields[8..].join("\t"),
        })
    }
}

///
/// A gene feature from the annotation with its identifiers resolved.
///
/// Coordinates are kept exactly as the annotation gives them (GTF: 1-based,
/// inclusive).
///
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GeneRecord {
    pub chr: String,
    pub start: u32,
    pub end: u32,
    pub strand: Strand,
    pub gene_name: Option<String>,
    pub gene_id: Option<String>,
    pub gene_type: Option<String>,
    pub feature: String,
}

impl GeneRecord {
    /// Transcription start site: `start` on `+`, `end` otherwise.
    pub fn tss(&self) -> u32 {
        match self.strand {
            Strand::Plus => self.start,
            _ => self.end,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::*;

    #[rstest]
    fn test_parse_gtf_row() {
        let line = "chr1\tHAVANA\tgene\t3073253\t3074322\t.\t+\t.\tgene_id \"ENSMUSG00000102693.1\"; gene_type \"TEC\"; gene_name \"4933401J01Rik\";";
        let row = AnnotationRow::from_str(line).unwrap();

        assert_eq!(row.chr, "chr1");
        assert_eq!(row.feature, "gene");
        assert_eq!(row.start, "3073253");
        assert_eq!(row.strand, "+");
        assert!(row.attributes.starts_with("gene_id"));
    }

    #[rstest]
    fn test_short_gtf_row() {
        let result = AnnotationRow::from_str("chr1\tHAVANA\tgene");
        assert!(matches!(result, Err(ModelError::FieldCount { found: 3, .. })));
    }

    #[rstest]
    #[case(Strand::Plus, 100)]
    #[case(Strand::Minus, 500)]
    #[case(Strand::Unstranded, 500)]
    fn test_tss_is_strand_aware(#[case] strand: Strand, #[case] expected: u32) {
        let gene = GeneRecord {
            chr: "chr1".to_string(),
            start: 100,
            end: 500,
            strand,
            gene_name: Some("Sox2".to_string()),
            gene_id: None,
            gene_type: None,
            feature: "gene".to_string(),
        };
        assert_eq!(gene.tss(), expected);
    }
}
