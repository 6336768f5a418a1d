use std::io::BufRead;
use std::path::Path;

use log::{debug, warn};

use peakenrich_core::models::PeakTable;
use peakenrich_core::utils::get_dynamic_reader;

use crate::error::{ReaderError, Result};

///
/// Read a narrowPeak file (optionally gzipped) into a validated [PeakTable].
///
/// Row-level validation follows [PeakTable::load]; only a missing or
/// unreadable file is an error here.
///
/// # Arguments
/// - path: path to the narrowPeak file
/// - sample_id: sample the peaks belong to
pub fn read_narrowpeak(path: &Path, sample_id: &str) -> Result<PeakTable> {
    if !path.is_file() {
        return Err(ReaderError::MissingFile(path.to_path_buf()));
    }

    let reader =
        get_dynamic_reader(path).map_err(|e| ReaderError::FileReadError(format!("{:#}", e)))?;
    let lines = reader.lines().collect::<std::io::Result<Vec<String>>>()?;

    debug!("Read {} lines from {}", lines.len(), path.display());

    Ok(PeakTable::load(lines, sample_id))
}

///
/// Like [read_narrowpeak] but never fails: a missing or unreadable file is
/// logged and yields an empty table for the sample.
///
pub fn load_sample_peaks(path: &Path, sample_id: &str) -> PeakTable {
    match read_narrowpeak(path, sample_id) {
        Ok(table) => table,
        Err(ReaderError::MissingFile(p)) => {
            warn!("Peak file not found: {}", p.display());
            PeakTable::empty(sample_id)
        }
        Err(e) => {
            warn!("Error loading peak file {}: {}", path.display(), e);
            PeakTable::empty(sample_id)
        }
    }
}
