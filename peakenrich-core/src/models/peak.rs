use std::fmt::{self, Display};
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;

/// Number of positional columns in a narrowPeak row.
pub const NARROWPEAK_FIELDS: usize = 10;

/// Strand of a peak or gene feature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Strand {
    Plus,
    Minus,
    Unstranded,
}

impl Strand {
    pub fn from_char(c: char) -> Strand {
        match c {
            '+' => Strand::Plus,
            '-' => Strand::Minus,
            _ => Strand::Unstranded,
        }
    }

    pub fn as_char(&self) -> char {
        match self {
            Strand::Plus => '+',
            Strand::Minus => '-',
            Strand::Unstranded => '.',
        }
    }
}

impl From<&str> for Strand {
    fn from(value: &str) -> Self {
        Strand::from_char(value.trim().chars().next().unwrap_or('.'))
    }
}

///
/// Peak struct, one row of a narrowPeak file
///
/// `signal_value` holds the raw signal straight after loading and the
/// reads-per-million value after [`PeakTable::normalize`](super::PeakTable::normalize).
///
#[derive(PartialEq, Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Peak {
    pub chr: String,
    pub start: u32,
    pub end: u32,
    pub name: String,
    pub score: f64,
    pub strand: Strand,
    pub signal_value: f64,
    pub p_value: f64,
    pub q_value: f64,
    pub summit: i64,
}

impl Peak {
    ///
    /// Get the width of the peak, `end - start`
    ///
    pub fn width(&self) -> u32 {
        self.end.saturating_sub(self.start)
    }

    ///
    /// The `chr:start-end` label used in the report tables
    ///
    pub fn coordinate(&self) -> String {
        format!("{}:{}-{}", self.chr, self.start, self.end)
    }

    /// Closed-interval overlap: touching at either boundary counts.
    pub fn overlaps(&self, chr: &str, start: u32, end: u32) -> bool {
        self.chr == chr && self.start <= end && self.end >= start
    }
}

fn parse_field<T: FromStr>(value: &str, field: &'static str) -> Result<T, ModelError> {
    value.trim().parse::<T>().map_err(|_| ModelError::FieldParse {
        field,
        value: value.to_string(),
    })
}

impl FromStr for Peak {
    type Err = ModelError;

    ///
    /// Parse one tab-separated narrowPeak line. Exactly ten fields are expected.
    ///
    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let fields: Vec<&str> = line.trim_end_matches(['\r', '\n']).split('\t').collect();
        if fields.len() != NARROWPEAK_FIELDS {
            return Err(ModelError::FieldCount {
                expected: NARROWPEAK_FIELDS,
                found: fields.len(),
                line: line.to_string(),
            });
        }

        Ok(Peak {
            chr: fields[0].to_string(),
            start: parse_field(fields[1], "start")?,
            end: parse_field(fields[2], "end")?,
            name: fields[3].to_string(),
            score: parse_field(fields[4], "score")?,
            strand: Strand::from(fields[5]),
            signal_value: parse_field(fields[6], "signalValue")?,
            p_value: parse_field(fields[7], "pValue")?,
            q_value: parse_field(fields[8], "qValue")?,
            summit: parse_field(fields[9], "peak")?,
        })
    }
}

impl Display for Peak {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}",
            self.chr,
            self.start,
            self.end,
            self.name,
            self.score,
            self.strand.as_char(),
            self.signal_value,
            self.p_value,
            self.q_value,
            self.summit
        )
    }
}
