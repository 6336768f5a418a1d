use crate::models::PeakTable;

///
/// One experimental condition (exogenous or endogenous): an ordered mapping
/// from sample id to its depth-normalized [PeakTable].
///
/// Iteration follows insertion order, which fixes the order of pooled peaks.
///
#[derive(Clone, Debug, Default)]
pub struct Condition {
    pub name: String,
    samples: Vec<PeakTable>,
}

impl Condition {
    pub fn new(name: &str) -> Self {
        Condition {
            name: name.to_string(),
            samples: Vec::new(),
        }
    }

    ///
    /// Add a sample table. A table whose sample id is already present replaces
    /// the old one in place, keeping its position.
    ///
    pub fn insert(&mut self, table: PeakTable) {
        match self
            .samples
            .iter_mut()
            .find(|t| t.sample_id == table.sample_id)
        {
            Some(existing) => *existing = table,
            None => self.samples.push(table),
        }
    }

    pub fn get(&self, sample_id: &str) -> Option<&PeakTable> {
        self.samples.iter().find(|t| t.sample_id == sample_id)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PeakTable> {
        self.samples.iter()
    }

    pub fn sample_ids(&self) -> Vec<&str> {
        self.samples.iter().map(|t| t.sample_id.as_str()).collect()
    }

    /// Number of samples, empty or not.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// True when there are no samples or every sample table is empty.
    pub fn is_empty(&self) -> bool {
        self.samples.iter().all(|t| t.is_empty())
    }

    pub fn total_peaks(&self) -> usize {
        self.samples.iter().map(|t| t.len()).sum()
    }
}

impl FromIterator<PeakTable> for Condition {
    fn from_iter<T: IntoIterator<Item = PeakTable>>(iter: T) -> Self {
        let mut condition = Condition::default();
        for table in iter {
            condition.insert(table);
        }
        condition
    }
}

impl<'a> IntoIterator for &'a Condition {
    type Item = &'a PeakTable;
    type IntoIter = std::slice::Iter<'a, PeakTable>;

    fn into_iter(self) -> Self::IntoIter {
        self.samples.iter()
    }
}

///
/// Row count summed over every sample table of every condition given. This is
/// the background population for the Fisher exact test.
///
pub fn total_peak_count(conditions: &[&Condition]) -> usize {
    conditions.iter().map(|c| c.total_peaks()).sum()
}
