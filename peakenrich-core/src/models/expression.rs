#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

///
/// One row of a differential-expression table.
///
/// Missing cells (`NA`, empty) are `None`; a row with a missing fold change or
/// adjusted p-value never passes an up-regulation filter.
///
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ExpressionRecord {
    pub gene: Option<String>,
    pub log2_fold_change: Option<f64>,
    pub padj: Option<f64>,
}

impl ExpressionRecord {
    pub fn new(gene: Option<String>, log2_fold_change: Option<f64>, padj: Option<f64>) -> Self {
        ExpressionRecord {
            gene,
            log2_fold_change,
            padj,
        }
    }

    /// `log2FoldChange > min_log2fc AND padj < max_padj`, both strict.
    pub fn is_upregulated(&self, min_log2fc: f64, max_padj: f64) -> bool {
        match (self.log2_fold_change, self.padj) {
            (Some(lfc), Some(padj)) => lfc > min_log2fc && padj < max_padj,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use rstest::*;

    #[rstest]
    #[case(Some(0.6), Some(0.01), true)]
    #[case(Some(0.5), Some(0.01), false)]
    #[case(Some(2.0), Some(0.05), false)]
    #[case(None, Some(0.01), false)]
    #[case(Some(2.0), None, false)]
    #[case(Some(f64::NAN), Some(0.01), false)]
    fn test_is_upregulated(
        #[case] lfc: Option<f64>,
        #[case] padj: Option<f64>,
        #[case] expected: bool,
    ) {
        let record = ExpressionRecord::new(Some("Sox2".to_string()), lfc, padj);
        assert_eq!(record.is_upregulated(0.5, 0.05), expected);
    }
}
