pub const DEFAULT_EXO_SAMPLES: [&str; 3] = ["NSCv1", "NSCv2", "NSCv3"];
pub const DEFAULT_ENDO_SAMPLES: [&str; 3] = ["NSCM1", "NSCM2", "NSCM3"];
pub const DEFAULT_LABEL: &str = "NSC";

/// Relative to the working directory.
pub const DEFAULT_DEA_PATH: &str = "../DATA/DEA_NSC.csv";
/// Relative to the working directory.
pub const DEFAULT_ANNOTATION_PATH: &str = "../DATA/gencode.vM10.annotation.gtf";

pub const PEAKS_SUBDIR: &str = "peaks";
pub const PEAKS_SUFFIX: &str = "_peaks.narrowPeak";
pub const ALIGNED_SUBDIR: &str = "aligned";
pub const BAM_SUFFIX: &str = ".bam";

pub const GENE_COLUMN: &str = "gene";
pub const LOG2FC_COLUMN: &str = "log2FoldChange";
pub const PADJ_COLUMN: &str = "padj";
