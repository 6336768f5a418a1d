//! Two-sided Fisher exact test for 2×2 contingency tables.
//!
//! The p-value is the total hypergeometric probability of every table with the
//! observed margins that is no more likely than the observed one. A small
//! relative tolerance keeps tables of numerically equal probability on the
//! same side of the cut.
use statrs::distribution::{Discrete, Hypergeometric};

use crate::consts::FISHER_RELATIVE_TOLERANCE;
use crate::errors::EnrichmentError;

///
/// 2×2 table `[[a, b], [c, d]]` of non-negative counts.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContingencyTable {
    pub a: u64,
    pub b: u64,
    pub c: u64,
    pub d: u64,
}

impl ContingencyTable {
    pub fn new(table: [[u64; 2]; 2]) -> Self {
        ContingencyTable {
            a: table[0][0],
            b: table[0][1],
            c: table[1][0],
            d: table[1][1],
        }
    }

    fn has_empty_margin(&self) -> bool {
        self.a + self.b == 0 || self.c + self.d == 0 || self.a + self.c == 0 || self.b + self.d == 0
    }
}

///
/// Two-sided Fisher exact test p-value, always in `[0, 1]`.
///
/// A table with an all-zero row or column has exactly one arrangement and
/// gets p = 1.
///
pub fn fisher_exact_two_sided(table: ContingencyTable) -> Result<f64, EnrichmentError> {
    if table.has_empty_margin() {
        return Ok(1.0);
    }

    let population = table.a + table.b + table.c + table.d;
    let successes = table.a + table.b;
    let draws = table.a + table.c;

    let dist = Hypergeometric::new(population, successes, draws)
        .map_err(|e| EnrichmentError::StatisticalTest(format!("{:?}", e)))?;

    // log space: plain binomials overflow once the population reaches a few thousand
    let observed = dist.ln_pmf(table.a);
    let threshold = observed + (1.0 + FISHER_RELATIVE_TOLERANCE).ln();

    let lo = (successes + draws).saturating_sub(population);
    let hi = successes.min(draws);

    let p: f64 = (lo..=hi)
        .map(|k| dist.ln_pmf(k))
        .filter(|&ln_prob| ln_prob <= threshold)
        .map(f64::exp)
        .sum();

    Ok(p.min(1.0))
}
