use std::fmt::{self, Display};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_QVALUE_CLIP, DENOMINATOR_FLOOR};
use crate::errors::EnrichmentError;
use crate::fisher::{ContingencyTable, fisher_exact_two_sided};
use crate::promoters::PeakSubset;

///
/// The seven ways of reducing a pair of promoter peak subsets to one score.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnrichmentMethod {
    SignalRatio,
    PeakCount,
    CombinedScore,
    Statistical,
    WidthWeighted,
    CoverageScore,
    AreaIntegration,
}

impl EnrichmentMethod {
    /// Every method, in report order.
    pub const ALL: [EnrichmentMethod; 7] = [
        EnrichmentMethod::SignalRatio,
        EnrichmentMethod::PeakCount,
        EnrichmentMethod::CombinedScore,
        EnrichmentMethod::Statistical,
        EnrichmentMethod::WidthWeighted,
        EnrichmentMethod::CoverageScore,
        EnrichmentMethod::AreaIntegration,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EnrichmentMethod::SignalRatio => "signal_ratio",
            EnrichmentMethod::PeakCount => "peak_count",
            EnrichmentMethod::CombinedScore => "combined_score",
            EnrichmentMethod::Statistical => "statistical",
            EnrichmentMethod::WidthWeighted => "width_weighted",
            EnrichmentMethod::CoverageScore => "coverage_score",
            EnrichmentMethod::AreaIntegration => "area_integration",
        }
    }

    ///
    /// Score one gene.
    ///
    /// # Arguments
    /// - exo: exogenous peaks in the promoter window
    /// - endo: endogenous peaks in the promoter window
    /// - context: run-wide values some methods need
    pub fn score(
        &self,
        exo: &PeakSubset,
        endo: &PeakSubset,
        context: &ScoringContext,
    ) -> Result<f64, EnrichmentError> {
        let score = match self {
            EnrichmentMethod::SignalRatio => signal_ratio(exo, endo),
            EnrichmentMethod::PeakCount => peak_count(exo, endo),
            EnrichmentMethod::CombinedScore => combined_score(exo, endo),
            EnrichmentMethod::Statistical => statistical(exo, endo, context.background)?,
            EnrichmentMethod::WidthWeighted => width_weighted(exo, endo),
            EnrichmentMethod::CoverageScore => coverage_score(exo, endo),
            EnrichmentMethod::AreaIntegration => area_integration(exo, endo, context.qvalue_clip),
        };
        Ok(score)
    }
}

impl Display for EnrichmentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for EnrichmentMethod {
    type Err = EnrichmentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        EnrichmentMethod::ALL
            .into_iter()
            .find(|m| m.as_str() == wanted)
            .ok_or_else(|| EnrichmentError::InvalidMethod(s.to_string()))
    }
}

/// Run-wide inputs shared by every gene.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoringContext {
    /// Total peak rows over both conditions.
    pub background: u64,
    pub qvalue_clip: f64,
}

impl ScoringContext {
    pub fn new(background: u64) -> Self {
        ScoringContext {
            background,
            qvalue_clip: DEFAULT_QVALUE_CLIP,
        }
    }
}

fn floored(denominator: f64) -> f64 {
    denominator.max(DENOMINATOR_FLOOR)
}

/// `mean(exo) / mean(endo)`; `+inf` with no endogenous peaks, `0` with no exogenous peaks.
pub fn signal_ratio(exo: &PeakSubset, endo: &PeakSubset) -> f64 {
    match (exo.mean_signal(), endo.mean_signal()) {
        (Some(e), Some(n)) => e / n,
        (Some(_), None) => f64::INFINITY,
        _ => 0.0,
    }
}

/// Distinct exogenous loci over distinct endogenous loci.
pub fn peak_count(exo: &PeakSubset, endo: &PeakSubset) -> f64 {
    exo.distinct_loci() as f64 / floored(endo.distinct_loci() as f64)
}

/// Mean signal times distinct loci, exogenous over endogenous.
pub fn combined_score(exo: &PeakSubset, endo: &PeakSubset) -> f64 {
    let Some(exo_mean) = exo.mean_signal() else {
        return 0.0;
    };
    let endo_term = endo
        .mean_signal()
        .map(|m| m * endo.distinct_loci() as f64)
        .unwrap_or(0.0);
    exo_mean * exo.distinct_loci() as f64 / floored(endo_term)
}

///
/// Fisher exact p-value of `[[distinct(exo), distinct(endo)], [bg - distinct(exo), bg - distinct(endo)]]`.
/// NaN when both subsets are empty.
///
pub fn statistical(
    exo: &PeakSubset,
    endo: &PeakSubset,
    background: u64,
) -> Result<f64, EnrichmentError> {
    if exo.is_empty() && endo.is_empty() {
        return Ok(f64::NAN);
    }
    let exo_loci = exo.distinct_loci() as u64;
    let endo_loci = endo.distinct_loci() as u64;

    fisher_exact_two_sided(ContingencyTable::new([
        [exo_loci, endo_loci],
        [
            background.saturating_sub(exo_loci),
            background.saturating_sub(endo_loci),
        ],
    ]))
}

fn signal_area(subset: &PeakSubset) -> f64 {
    subset
        .iter()
        .map(|p| p.peak.signal_value * p.peak.width() as f64)
        .sum()
}

/// `Σ signal·width` of exogenous over endogenous.
pub fn width_weighted(exo: &PeakSubset, endo: &PeakSubset) -> f64 {
    if exo.is_empty() {
        return 0.0;
    }
    signal_area(exo) / floored(signal_area(endo))
}

fn coverage(subset: &PeakSubset) -> f64 {
    match subset.mean_signal() {
        Some(mean) => subset.widths().sum::<f64>() * mean,
        None => 0.0,
    }
}

/// `Σ width · mean(signal)` of exogenous over endogenous.
pub fn coverage_score(exo: &PeakSubset, endo: &PeakSubset) -> f64 {
    if exo.is_empty() {
        return 0.0;
    }
    coverage(exo) / floored(coverage(endo))
}

///
/// `-log10(q)` clipped to `[0, ceiling]`. A q-value of 0 gets the ceiling;
/// an undefined log (negative q) gets 0.
///
pub fn significance_weight(q_value: f64, ceiling: f64) -> f64 {
    let weight = -q_value.log10();
    if weight.is_nan() {
        0.0
    } else {
        weight.clamp(0.0, ceiling)
    }
}

fn weighted_area(subset: &PeakSubset, ceiling: f64) -> f64 {
    subset
        .iter()
        .map(|p| {
            p.peak.width() as f64
                * p.peak.signal_value
                * significance_weight(p.peak.q_value, ceiling)
        })
        .sum()
}

/// `Σ width·signal·weight(q)` of exogenous over endogenous.
pub fn area_integration(exo: &PeakSubset, endo: &PeakSubset, ceiling: f64) -> f64 {
    if exo.is_empty() {
        return 0.0;
    }
    weighted_area(exo, ceiling) / floored(weighted_area(endo, ceiling))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    use peakenrich_core::models::{Peak, Strand};
    use pretty_assertions::assert_eq;
    use rstest::*;

    use crate::promoters::SamplePeak;

    fn peak(start: u32, end: u32, signal: f64, q: f64) -> Peak {
        Peak {
            chr: "chr1".to_string(),
            start,
            end,
            name: ".".to_string(),
            score: 0.0,
            strand: Strand::Unstranded,
            signal_value: signal,
            p_value: -1.0,
            q_value: q,
            summit: 0,
        }
    }

    fn subset<'a>(peaks: &'a [Peak]) -> PeakSubset<'a> {
        PeakSubset::new(
            peaks
                .iter()
                .map(|peak| SamplePeak { sample: "S", peak })
                .collect(),
        )
    }

    #[fixture]
    fn exo_peaks() -> Vec<Peak> {
        vec![peak(100, 200, 4.0, 0.01), peak(300, 350, 8.0, 0.1)]
    }

    #[fixture]
    fn endo_peaks() -> Vec<Peak> {
        vec![peak(100, 200, 2.0, 0.01)]
    }

    #[rstest]
    fn test_method_names_round_trip() {
        for method in EnrichmentMethod::ALL {
            assert_eq!(EnrichmentMethod::from_str(method.as_str()).unwrap(), method);
            assert_eq!(method.to_string(), method.as_str());
        }
        assert_eq!(
            EnrichmentMethod::from_str(" Area_Integration ").unwrap(),
            EnrichmentMethod::AreaIntegration
        );
        assert!(EnrichmentMethod::from_str("ratio").is_err());
    }

    #[rstest]
    fn test_both_present(exo_peaks: Vec<Peak>, endo_peaks: Vec<Peak>) {
        let (exo, endo) = (subset(&exo_peaks), subset(&endo_peaks));

        assert_eq!(signal_ratio(&exo, &endo), 3.0);
        assert_eq!(peak_count(&exo, &endo), 2.0);
        // (6 * 2) / (2 * 1)
        assert_eq!(combined_score(&exo, &endo), 6.0);
        // (400 + 400) / 200
        assert_eq!(width_weighted(&exo, &endo), 4.0);
        // 150 * 6 / (100 * 2)
        assert_eq!(coverage_score(&exo, &endo), 4.5);
        // (100*4*2 + 50*8*1) / (100*2*2)
        assert!((area_integration(&exo, &endo, 50.0) - 3.0).abs() < 1e-12);
    }

    #[rstest]
    fn test_both_empty() {
        let empty = PeakSubset::default();
        for method in EnrichmentMethod::ALL {
            let score = method.score(&empty, &empty, &ScoringContext::new(10)).unwrap();
            if method == EnrichmentMethod::Statistical {
                assert!(score.is_nan());
            } else {
                assert_eq!(score, 0.0, "{method}");
            }
        }
    }

    #[rstest]
    fn test_exo_only(exo_peaks: Vec<Peak>) {
        let (exo, endo) = (subset(&exo_peaks), PeakSubset::default());

        assert_eq!(signal_ratio(&exo, &endo), f64::INFINITY);
        assert_eq!(peak_count(&exo, &endo), 2.0);
        assert_eq!(combined_score(&exo, &endo), 12.0);
        assert_eq!(width_weighted(&exo, &endo), 800.0);
        assert_eq!(coverage_score(&exo, &endo), 900.0);
    }

    #[rstest]
    fn test_endo_only(endo_peaks: Vec<Peak>) {
        let (exo, endo) = (PeakSubset::default(), subset(&endo_peaks));
        let context = ScoringContext::new(10);

        for method in EnrichmentMethod::ALL {
            let score = method.score(&exo, &endo, &context).unwrap();
            if method == EnrichmentMethod::Statistical {
                assert!((0.0..=1.0).contains(&score));
            } else {
                assert_eq!(score, 0.0, "{method}");
            }
        }
    }

    #[rstest]
    fn test_distinct_loci_collapse_replicates() {
        let exo_peaks = vec![peak(100, 200, 1.0, 0.1), peak(100, 200, 1.0, 0.1)];
        let endo_peaks = vec![peak(500, 600, 1.0, 0.1)];
        let (exo, endo) = (subset(&exo_peaks), subset(&endo_peaks));
        assert_eq!(peak_count(&exo, &endo), 1.0);
    }

    #[rstest]
    fn test_denominator_floor_biases_small_denominators() {
        // true ratio is 0.5 / 0.25 = 2, the floor at 1 reports 0.5
        let exo_peaks = vec![peak(0, 1, 0.5, 0.1)];
        let endo_peaks = vec![peak(0, 1, 0.25, 0.1)];
        let (exo, endo) = (subset(&exo_peaks), subset(&endo_peaks));
        assert_eq!(width_weighted(&exo, &endo), 0.5);
        assert_eq!(combined_score(&exo, &endo), 0.5);
        // signal_ratio has no floor
        assert_eq!(signal_ratio(&exo, &endo), 2.0);
    }

    #[rstest]
    #[case(0.0, 50.0)]
    #[case(1.0, 0.0)]
    #[case(0.01, 2.0)]
    #[case(1e-80, 50.0)]
    #[case(10.0, 0.0)]
    #[case(-1.0, 0.0)]
    fn test_significance_weight(#[case] q: f64, #[case] expected: f64) {
        let w = significance_weight(q, 50.0);
        assert!((w - expected).abs() < 1e-12, "q={q} w={w}");
    }

    #[rstest]
    fn test_area_integration_zero_qvalue_is_finite() {
        let exo_peaks = vec![peak(0, 10, 1.0, 0.0)];
        let exo = subset(&exo_peaks);
        assert_eq!(area_integration(&exo, &PeakSubset::default(), 50.0), 500.0);
    }

    #[rstest]
    fn test_statistical_in_unit_interval(exo_peaks: Vec<Peak>, endo_peaks: Vec<Peak>) {
        let (exo, endo) = (subset(&exo_peaks), subset(&endo_peaks));
        let p = statistical(&exo, &endo, 3).unwrap();
        assert!((0.0..=1.0).contains(&p));
    }
}
