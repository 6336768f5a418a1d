use log::{info, warn};

use peakenrich_core::models::Condition;
use peakenrich_io::{DataLayout, load_sample_peaks, sequencing_depth};

use crate::errors::EnrichmentError;

///
/// Load and depth-normalize every sample of one condition.
///
/// A sample with a missing or malformed peak file contributes an empty table.
/// A sample whose BAM can't be read is normalized with depth 1.
///
pub fn load_condition(name: &str, samples: &[String], layout: &DataLayout) -> Condition {
    let mut condition = Condition::new(name);

    for sample in samples {
        let peaks = load_sample_peaks(&layout.peak_path(sample), sample);
        let depth = sequencing_depth(&layout.bam_path(sample));
        info!(
            "{} {}: {} peaks, {} mapped reads",
            name,
            sample,
            peaks.len(),
            depth.get()
        );
        condition.insert(peaks.normalize(depth));
    }

    condition
}

///
/// Refuse to score when neither condition has a single peak. One empty
/// condition is only worth a warning.
///
pub fn check_conditions(exo: &Condition, endo: &Condition) -> Result<(), EnrichmentError> {
    match (exo.is_empty(), endo.is_empty()) {
        (true, true) => Err(EnrichmentError::InsufficientPeakData),
        (exo_empty, endo_empty) => {
            for (condition, empty) in [(exo, exo_empty), (endo, endo_empty)] {
                if empty {
                    warn!("No valid peaks in {} condition", condition.name);
                }
            }
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    use peakenrich_core::models::PeakTable;
    use pretty_assertions::assert_eq;
    use rstest::*;
    use tempfile::tempdir;

    fn with_peaks(name: &str) -> Condition {
        let mut condition = Condition::new(name);
        condition.insert(PeakTable::load(
            vec!["chr1\t1\t10\tp\t0\t.\t1.0\t0\t0\t0"],
            "S1",
        ));
        condition
    }

    #[rstest]
    fn test_check_conditions() {
        let empty = Condition::new("endogenous");
        assert!(check_conditions(&with_peaks("exogenous"), &with_peaks("endogenous")).is_ok());
        assert!(check_conditions(&with_peaks("exogenous"), &empty).is_ok());
        assert!(matches!(
            check_conditions(&empty, &Condition::new("exogenous")),
            Err(EnrichmentError::InsufficientPeakData)
        ));
    }

    #[rstest]
    fn test_load_condition_without_bams() {
        let dir = tempdir().unwrap();
        let layout = DataLayout::new(dir.path(), dir.path());
        let peaks = layout.peak_path("A");
        fs::create_dir_all(peaks.parent().unwrap()).unwrap();
        fs::write(&peaks, "chr1\t100\t200\tp1\t0\t.\t2.5\t0\t0.01\t50\n").unwrap();

        let samples = vec!["A".to_string(), "B".to_string()];
        let condition = load_condition("exogenous", &samples, &layout);

        assert_eq!(condition.sample_ids(), vec!["A", "B"]);
        assert!(condition.get("B").unwrap().is_empty());
        // depth falls back to 1 without a BAM
        assert_eq!(condition.get("A").unwrap().peaks[0].signal_value, 2.5e6);
    }
}
