use std::path::{Path, PathBuf};

use log::{debug, warn};
use noodles::bam;

use peakenrich_core::models::SampleDepth;

use crate::error::{ReaderError, Result};

/// Candidate locations of the `.bai` index for a BAM file: `x.bam.bai`, then `x.bai`.
fn index_candidates(bam_path: &Path) -> [PathBuf; 2] {
    let mut appended = bam_path.as_os_str().to_owned();
    appended.push(".bai");
    [PathBuf::from(appended), bam_path.with_extension("bai")]
}

pub fn has_bam_index(bam_path: &Path) -> bool {
    index_candidates(bam_path).iter().any(|p| p.is_file())
}

///
/// Count the mapped records of a BAM file.
///
/// The file must exist and be indexed. Unmapped records are not counted;
/// secondary and supplementary alignments are.
///
pub fn count_mapped_reads(bam_path: &Path) -> Result<u64> {
    if !bam_path.is_file() {
        return Err(ReaderError::MissingFile(bam_path.to_path_buf()));
    }
    if !has_bam_index(bam_path) {
        return Err(ReaderError::MissingIndex(bam_path.to_path_buf()));
    }

    let mut reader = bam::io::reader::Builder::default().build_from_path(bam_path)?;
    reader.read_header()?;

    let mut mapped: u64 = 0;
    for result in reader.records() {
        let record = result?;
        if !record.flags().is_unmapped() {
            mapped += 1;
        }
    }

    debug!("{}: {} mapped reads", bam_path.display(), mapped);

    Ok(mapped)
}

///
/// Sequencing depth of one sample. Never fails: any problem is logged and the
/// depth falls back to 1. A count of zero is clamped to 1 as well.
///
pub fn sequencing_depth(bam_path: &Path) -> SampleDepth {
    match count_mapped_reads(bam_path) {
        Ok(reads) => SampleDepth::new(reads),
        Err(ReaderError::MissingFile(p)) => {
            warn!("BAM file not found: {}", p.display());
            SampleDepth::fallback()
        }
        Err(ReaderError::MissingIndex(p)) => {
            warn!("BAM index missing for {}", p.display());
            SampleDepth::fallback()
        }
        Err(e) => {
            warn!("Error calculating depth for {}: {}", bam_path.display(), e);
            SampleDepth::fallback()
        }
    }
}
