use std::io::BufRead;
use std::path::Path;
use std::str::FromStr;

use log::{debug, info};

use peakenrich_core::models::AnnotationRow;
use peakenrich_core::utils::get_dynamic_reader;

use crate::error::{ReaderError, Result};

///
/// Read every row of a GTF (or GTF.gz) annotation file.
///
/// Lines starting with `#` are comments. Lines with fewer than nine
/// tab-separated columns are skipped. No feature filtering happens here.
///
pub fn read_annotation(path: &Path) -> Result<Vec<AnnotationRow>> {
    if !path.is_file() {
        return Err(ReaderError::MissingFile(path.to_path_buf()));
    }

    info!("Loading gene annotations from {}", path.display());

    let reader =
        get_dynamic_reader(path).map_err(|e| ReaderError::FileReadError(format!("{:#}", e)))?;

    let mut rows = Vec::new();
    let mut skipped = 0usize;
    for line in reader.lines() {
        let line = line?;
        if line.starts_with('#') || line.trim().is_empty() {
            continue;
        }

        match AnnotationRow::from_str(&line) {
            Ok(row) => rows.push(row),
            Err(e) => {
                skipped += 1;
                debug!("Skipping annotation line: {}", e);
            }
        }
    }

    if skipped > 0 {
        debug!("Skipped {} short annotation lines in {}", skipped, path.display());
    }

    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::*;

    #[rstest]
    fn test_read_annotation_skips_comments() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("genes.gtf");
        std::fs::write(
            &path,
            "##description: test\n\
             chr1\tHAVANA\tgene\t1000\t2000\t.\t+\t.\tgene_id \"ENSG1.1\"; gene_name \"GeneA\";\n\
             chr1\tHAVANA\ttranscript\t1000\t2000\t.\t+\t.\tgene_id \"ENSG1.1\";\n\
             broken line\n",
        )
        .unwrap();

        let rows = read_annotation(&path).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].feature, "gene");
        assert_eq!(rows[1].feature, "transcript");
    }

    #[rstest]
    fn test_missing_annotation() {
        let result = read_annotation(Path::new("nowhere/genes.gtf"));
        assert!(matches!(result, Err(ReaderError::MissingFile(_))));
    }
}
