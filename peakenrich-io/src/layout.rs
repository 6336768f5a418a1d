use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::consts::*;

///
/// Where a run finds its inputs and writes its reports.
///
/// Every path is derived from this struct; nothing depends on the process's
/// current directory. Relative defaults (`dea_path`, `annotation_path`) are
/// resolved against `working_dir`.
///
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct DataLayout {
    pub working_dir: PathBuf,
    pub data_dir: PathBuf,
    pub dea_path: Option<PathBuf>,
    pub annotation_path: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
    pub exo_samples: Vec<String>,
    pub endo_samples: Vec<String>,
    pub label: String,
}

impl Default for DataLayout {
    fn default() -> Self {
        DataLayout {
            working_dir: PathBuf::from("."),
            data_dir: PathBuf::from("."),
            dea_path: None,
            annotation_path: None,
            output_dir: None,
            exo_samples: DEFAULT_EXO_SAMPLES.iter().map(|s| s.to_string()).collect(),
            endo_samples: DEFAULT_ENDO_SAMPLES.iter().map(|s| s.to_string()).collect(),
            label: DEFAULT_LABEL.to_string(),
        }
    }
}

impl DataLayout {
    pub fn new<P: AsRef<Path>, Q: AsRef<Path>>(working_dir: P, data_dir: Q) -> Self {
        DataLayout {
            working_dir: working_dir.as_ref().to_path_buf(),
            data_dir: data_dir.as_ref().to_path_buf(),
            ..Default::default()
        }
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.working_dir.join(path)
        }
    }

    pub fn dea_path(&self) -> PathBuf {
        match &self.dea_path {
            Some(p) => self.resolve(p),
            None => self.working_dir.join(DEFAULT_DEA_PATH),
        }
    }

    pub fn annotation_path(&self) -> PathBuf {
        match &self.annotation_path {
            Some(p) => self.resolve(p),
            None => self.working_dir.join(DEFAULT_ANNOTATION_PATH),
        }
    }

    pub fn output_dir(&self) -> PathBuf {
        match &self.output_dir {
            Some(p) => self.resolve(p),
            None => self.data_dir.clone(),
        }
    }

    /// `<data_dir>/peaks/<sample>_peaks.narrowPeak`
    pub fn peak_path(&self, sample: &str) -> PathBuf {
        self.data_dir
            .join(PEAKS_SUBDIR)
            .join(format!("{}{}", sample, PEAKS_SUFFIX))
    }

    /// `<data_dir>/aligned/<sample>.bam`
    pub fn bam_path(&self, sample: &str) -> PathBuf {
        self.data_dir
            .join(ALIGNED_SUBDIR)
            .join(format!("{}{}", sample, BAM_SUFFIX))
    }

    pub fn ranked_table_path(&self, method: &str) -> PathBuf {
        self.output_dir()
            .join(format!("enrichment_{}_{}.csv", method, self.label))
    }

    pub fn summary_path(&self) -> PathBuf {
        self.output_dir()
            .join(format!("enrichment_summary_{}.csv", self.label))
    }

    pub fn peak_distribution_path(&self) -> PathBuf {
        self.output_dir()
            .join(format!("peak_distribution_summary_{}.csv", self.label))
    }

    pub fn width_distribution_path(&self) -> PathBuf {
        self.output_dir()
            .join(format!("peak_width_distribution_{}.csv", self.label))
    }

    pub fn width_vs_enrichment_path(&self) -> PathBuf {
        self.output_dir()
            .join(format!("width_vs_enrichment_{}.csv", self.label))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::*;

    #[fixture]
    fn layout() -> DataLayout {
        DataLayout::new("/work/run", "/data")
    }

    #[rstest]
    fn test_default_paths(layout: DataLayout) {
        assert_eq!(
            layout.dea_path(),
            PathBuf::from("/work/run/../DATA/DEA_NSC.csv")
        );
        assert_eq!(
            layout.annotation_path(),
            PathBuf::from("/work/run/../DATA/gencode.vM10.annotation.gtf")
        );
        assert_eq!(
            layout.peak_path("NSCv1"),
            PathBuf::from("/data/peaks/NSCv1_peaks.narrowPeak")
        );
        assert_eq!(layout.bam_path("NSCM2"), PathBuf::from("/data/aligned/NSCM2.bam"));
        assert_eq!(
            layout.ranked_table_path("signal_ratio"),
            PathBuf::from("/data/enrichment_signal_ratio_NSC.csv")
        );
        assert_eq!(layout.exo_samples, vec!["NSCv1", "NSCv2", "NSCv3"]);
    }

    #[rstest]
    fn test_overrides_resolve_against_working_dir(mut layout: DataLayout) {
        layout.dea_path = Some(PathBuf::from("inputs/dea.csv"));
        layout.annotation_path = Some(PathBuf::from("/ref/genes.gtf.gz"));
        layout.output_dir = Some(PathBuf::from("results"));
        layout.label = "ESC".to_string();

        assert_eq!(layout.dea_path(), PathBuf::from("/work/run/inputs/dea.csv"));
        assert_eq!(layout.annotation_path(), PathBuf::from("/ref/genes.gtf.gz"));
        assert_eq!(
            layout.summary_path(),
            PathBuf::from("/work/run/results/enrichment_summary_ESC.csv")
        );
    }
}
