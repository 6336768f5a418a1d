use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use log::info;
use serde::Serialize;

use crate::error::Result;

pub trait CsvWrite {
    ///
    /// Write rows to disk as a headed CSV file, creating parent directories
    ///
    /// # Arguments
    /// - path: the path to the file to dump to
    fn write_csv<P: AsRef<Path>>(&self, path: P) -> Result<()>;
}

impl<T: Serialize> CsvWrite for [T] {
    fn write_csv<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let file = File::create(path)?;
        let mut writer = csv::Writer::from_writer(BufWriter::new(file));

        for row in self {
            writer.serialize(row)?;
        }
        writer.flush()?;

        info!("Wrote {} rows to {}", self.len(), path.display());

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::*;

    #[derive(Serialize)]
    struct Row {
        gene: String,
        #[serde(rename = "enrichment_score")]
        score: f64,
    }

    #[rstest]
    fn test_write_csv_creates_parents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("out.csv");

        let rows = vec![
            Row {
                gene: "Sox2".to_string(),
                score: f64::INFINITY,
            },
            Row {
                gene: "Pax6".to_string(),
                score: 0.5,
            },
        ];
        rows.write_csv(&path).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written, "gene,enrichment_score\nSox2,inf\nPax6,0.5\n");
    }
}
