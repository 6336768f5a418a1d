use std::str::FromStr;

use log::warn;

use crate::errors::ModelError;
use crate::models::Peak;

/// Reads-per-million scaling numerator.
pub const RPM_SCALE: f64 = 1e6;

///
/// Mapped-read count of one sample. Always at least 1 since it is used as a divisor.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct SampleDepth(u64);

impl SampleDepth {
    /// Clamps `reads` to a minimum of 1.
    pub fn new(reads: u64) -> Self {
        SampleDepth(reads.max(1))
    }

    /// Depth used when the real count can't be determined.
    pub fn fallback() -> Self {
        SampleDepth(1)
    }

    pub fn get(&self) -> u64 {
        self.0
    }
}

impl Default for SampleDepth {
    fn default() -> Self {
        SampleDepth::fallback()
    }
}

impl From<u64> for SampleDepth {
    fn from(value: u64) -> Self {
        SampleDepth::new(value)
    }
}

///
/// PeakTable struct, the validated peaks of a single sample
///
#[derive(Clone, Debug, PartialEq)]
pub struct PeakTable {
    pub sample_id: String,
    pub peaks: Vec<Peak>,
}

fn is_header_line(line: &str) -> bool {
    line.trim().is_empty()
        || line.starts_with('#')
        || line.starts_with("track")
        || line.starts_with("browser")
}

impl PeakTable {
    pub fn empty(sample_id: &str) -> Self {
        PeakTable {
            sample_id: sample_id.to_string(),
            peaks: Vec::new(),
        }
    }

    ///
    /// Build a validated table from raw narrowPeak lines.
    ///
    /// Blank, `#`, `track` and `browser` lines are skipped. If any remaining
    /// line can't be typed into the ten narrowPeak columns the whole table is
    /// discarded and an empty one returned. Rows with `end <= start` and rows
    /// with a negative signal value are dropped.
    ///
    /// # Arguments
    /// - rows: raw tab-separated lines
    /// - sample_id: sample the rows belong to
    pub fn load<I, S>(rows: I, sample_id: &str) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let parsed: Result<Vec<Peak>, ModelError> = rows
            .into_iter()
            .filter(|line| !is_header_line(line.as_ref()))
            .map(|line| Peak::from_str(line.as_ref()))
            .collect();

        match parsed {
            Ok(peaks) => PeakTable::validate(peaks, sample_id),
            Err(e) => {
                warn!("Malformed peak table for {}: {}", sample_id, e);
                PeakTable::empty(sample_id)
            }
        }
    }

    ///
    /// Apply the row-level validation policy to already typed peaks.
    ///
    pub fn validate(peaks: Vec<Peak>, sample_id: &str) -> Self {
        if peaks.is_empty() {
            warn!("Empty peak file for {}", sample_id);
            return PeakTable::empty(sample_id);
        }

        let total = peaks.len();
        let mut peaks: Vec<Peak> = peaks.into_iter().filter(|p| p.end > p.start).collect();
        if peaks.len() < total {
            warn!(
                "Invalid peak coordinates in {}: dropped {} rows with end <= start",
                sample_id,
                total - peaks.len()
            );
        }

        let with_coords = peaks.len();
        peaks.retain(|p| p.signal_value >= 0.0);
        if peaks.len() < with_coords {
            warn!(
                "Negative signal values in {}: dropped {} rows",
                sample_id,
                with_coords - peaks.len()
            );
        }

        PeakTable {
            sample_id: sample_id.to_string(),
            peaks,
        }
    }

    ///
    /// Scale every signal value to reads-per-million: `max(signal, 0) * 1e6 / depth`.
    ///
    pub fn normalize(&self, depth: SampleDepth) -> PeakTable {
        let factor = RPM_SCALE / depth.get() as f64;
        let peaks = self
            .peaks
            .iter()
            .map(|p| Peak {
                signal_value: p.signal_value.max(0.0) * factor,
                ..p.clone()
            })
            .collect();

        PeakTable {
            sample_id: self.sample_id.clone(),
            peaks,
        }
    }

    pub fn len(&self) -> usize {
        self.peaks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.peaks.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Peak> {
        self.peaks.iter()
    }

    /// Peaks on `chr` overlapping the closed interval `[start, end]`, in row order.
    pub fn overlapping<'a, 'c>(
        &'a self,
        chr: &'c str,
        start: u32,
        end: u32,
    ) -> impl Iterator<Item = &'a Peak> + 'c
    where
        'a: 'c,
    {
        self.peaks.iter().filter(move |p| p.overlaps(chr, start, end))
    }

    pub fn widths(&self) -> Vec<u32> {
        self.peaks.iter().map(|p| p.width()).collect()
    }
}

impl<'a> IntoIterator for &'a PeakTable {
    type Item = &'a Peak;
    type IntoIter = std::slice::Iter<'a, Peak>;

    fn into_iter(self) -> Self::IntoIter {
        self.peaks.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::*;

    #[fixture]
    fn rows() -> Vec<&'static str> {
        vec![
            "track name=peaks",
            "chr1\t100\t200\tp1\t10\t.\t4.0\t5.0\t3.0\t50",
            "chr1\t300\t300\tp2\t10\t.\t4.0\t5.0\t3.0\t0",
            "chr1\t500\t400\tp3\t10\t.\t4.0\t5.0\t3.0\t0",
            "chr2\t10\t60\tp4\t10\t.\t-2.0\t5.0\t3.0\t20",
            "",
            "chr2\t70\t90\tp5\t10\t.\t0.0\t5.0\t3.0\t10",
        ]
    }

    #[rstest]
    fn test_load_drops_invalid_rows(rows: Vec<&'static str>) {
        let table = PeakTable::load(rows, "S1");

        assert_eq!(table.sample_id, "S1");
        assert_eq!(table.len(), 2);
        let names: Vec<&str> = table.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["p1", "p5"]);
    }

    #[rstest]
    fn test_load_malformed_row_gives_empty_table() {
        let rows = vec![
            "chr1\t100\t200\tp1\t10\t.\t4.0\t5.0\t3.0\t50",
            "chr1\t100\t200\tp1",
        ];
        let table = PeakTable::load(rows, "S1");
        assert!(table.is_empty());
        assert_eq!(table.sample_id, "S1");
    }

    #[rstest]
    fn test_load_no_rows() {
        let table = PeakTable::load(Vec::<String>::new(), "S1");
        assert!(table.is_empty());
    }

    #[rstest]
    #[case(1_000_000, 4.0)]
    #[case(2_000_000, 2.0)]
    #[case(500_000, 8.0)]
    fn test_normalize_rpm(rows: Vec<&'static str>, #[case] depth: u64, #[case] expected: f64) {
        let table = PeakTable::load(rows, "S1").normalize(SampleDepth::new(depth));
        assert_eq!(table.peaks[0].signal_value, expected);
        assert_eq!(table.peaks[1].signal_value, 0.0);
    }

    #[rstest]
    fn test_depth_clamped_to_one() {
        assert_eq!(SampleDepth::new(0).get(), 1);
        assert_eq!(SampleDepth::fallback().get(), 1);

        let table = PeakTable::load(vec!["chr1\t1\t2\tp\t0\t.\t3.0\t0\t0\t0"], "S1");
        let normalized = table.normalize(SampleDepth::new(0));
        assert_eq!(normalized.peaks[0].signal_value, 3.0 * 1e6);
    }

    #[rstest]
    fn test_normalize_empty_is_noop() {
        let table = PeakTable::empty("S1");
        assert_eq!(table.normalize(SampleDepth::new(10)), table);
    }

    #[rstest]
    fn test_normalize_clips_negative_signal() {
        let table = PeakTable {
            sample_id: "S1".to_string(),
            peaks: vec![Peak::from_str("chr1\t1\t2\tp\t0\t.\t-3.0\t0\t0\t0").unwrap()],
        };
        let normalized = table.normalize(SampleDepth::new(2));
        assert_eq!(normalized.peaks[0].signal_value, 0.0);
    }
}
