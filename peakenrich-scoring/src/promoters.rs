use std::collections::HashSet;

use peakenrich_core::models::{Condition, GeneRecord, Peak};

use crate::annotation::GeneNameIndex;

///
/// Closed interval `[start, end]` around a gene's TSS.
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromoterWindow {
    pub chr: String,
    pub start: u32,
    pub end: u32,
}

///
/// Promoter window of `window` bp on either side of the TSS. The start is
/// clamped at 0.
///
pub fn promoter_window(gene: &GeneRecord, window: u32) -> PromoterWindow {
    let tss = gene.tss();
    PromoterWindow {
        chr: gene.chr.clone(),
        start: tss.saturating_sub(window),
        end: tss.saturating_add(window),
    }
}

/// A peak together with the sample it came from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SamplePeak<'a> {
    pub sample: &'a str,
    pub peak: &'a Peak,
}

///
/// Peaks of one condition that overlap one promoter window, pooled across
/// samples in sample order and then row order.
///
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PeakSubset<'a> {
    peaks: Vec<SamplePeak<'a>>,
}

impl<'a> PeakSubset<'a> {
    pub fn new(peaks: Vec<SamplePeak<'a>>) -> Self {
        PeakSubset { peaks }
    }

    pub fn len(&self) -> usize {
        self.peaks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.peaks.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SamplePeak<'a>> {
        self.peaks.iter()
    }

    pub fn signals(&self) -> impl Iterator<Item = f64> + '_ {
        self.peaks.iter().map(|p| p.peak.signal_value)
    }

    pub fn widths(&self) -> impl Iterator<Item = f64> + '_ {
        self.peaks.iter().map(|p| p.peak.width() as f64)
    }

    /// Number of distinct `(chr, start, end)` loci; replicate calls of one locus count once.
    pub fn distinct_loci(&self) -> usize {
        self.peaks
            .iter()
            .map(|p| (p.peak.chr.as_str(), p.peak.start, p.peak.end))
            .collect::<HashSet<_>>()
            .len()
    }

    pub fn mean_signal(&self) -> Option<f64> {
        mean(self.signals())
    }

    pub fn mean_width(&self) -> Option<f64> {
        mean(self.widths())
    }

    /// `chr:start-end` of every peak, duplicates kept.
    pub fn coordinates(&self) -> Vec<String> {
        self.peaks.iter().map(|p| p.peak.coordinate()).collect()
    }
}

fn mean<I: Iterator<Item = f64>>(values: I) -> Option<f64> {
    let (sum, n) = values.fold((0.0, 0usize), |(sum, n), v| (sum + v, n + 1));
    if n == 0 { None } else { Some(sum / n as f64) }
}

///
/// Every peak of `condition` that overlaps `window` (closed interval, same chromosome).
///
pub fn peaks_in_window<'a>(window: &PromoterWindow, condition: &'a Condition) -> PeakSubset<'a> {
    let peaks = condition
        .iter()
        .flat_map(|table| {
            table
                .overlapping(&window.chr, window.start, window.end)
                .map(move |peak| SamplePeak {
                    sample: table.sample_id.as_str(),
                    peak,
                })
        })
        .collect();

    PeakSubset::new(peaks)
}

///
/// Peaks of `condition` in the promoter window of `gene`. A gene the index
/// doesn't know has no peaks.
///
pub fn peaks_near_gene<'a>(
    gene: &str,
    condition: &'a Condition,
    index: &GeneNameIndex,
    window: u32,
) -> PeakSubset<'a> {
    match index.lookup(gene) {
        Some(record) => peaks_in_window(&promoter_window(record, window), condition),
        None => PeakSubset::default(),
    }
}
