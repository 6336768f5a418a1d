/// Half-width of the promoter window around the TSS, in bp.
pub const DEFAULT_PROMOTER_WINDOW: u32 = 2000;

/// Up-regulation: `log2FoldChange > DEFAULT_LOG2FC_THRESHOLD`.
pub const DEFAULT_LOG2FC_THRESHOLD: f64 = 0.5;
/// Up-regulation: `padj < DEFAULT_PADJ_THRESHOLD`.
pub const DEFAULT_PADJ_THRESHOLD: f64 = 0.05;

/// Ceiling for `-log10(qValue)` in the area-integration weight.
pub const DEFAULT_QVALUE_CLIP: f64 = 50.0;

/// Lower bound applied to every clamped denominator.
pub const DENOMINATOR_FLOOR: f64 = 1.0;

/// Relative tolerance when comparing table probabilities in the Fisher test.
pub const FISHER_RELATIVE_TOLERANCE: f64 = 1e-7;

pub const SIGNIFICANT_SCORE: f64 = 1.0;
pub const HIGHLY_SIGNIFICANT_LOG2FC: f64 = 1.0;
pub const HIGHLY_SIGNIFICANT_PADJ: f64 = 0.01;

pub const EXO_CONDITION: &str = "exogenous";
pub const ENDO_CONDITION: &str = "endogenous";

/// Placeholder written when a gene has no peaks in a condition.
pub const NO_PEAKS: &str = "None";
