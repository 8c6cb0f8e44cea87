//! Title source for tab-separated titles files.
//!
//! The input is a two-column file without a header: a cluster number
//! (integers starting at zero) and the publication titles of that cluster
//! concatenated into a single string.

use std::path::PathBuf;

use anyhow::{Context, Result, anyhow, bail};
use publabel_ports::TitleSource;

/// Adapter that reads cluster titles from a TSV file.
pub struct TsvTitleSource {
    pub path: PathBuf,
}

impl TitleSource for TsvTitleSource {
    fn read_titles(&self) -> Result<Vec<Option<String>>> {
        let text = std::fs::read_to_string(&self.path)
            .with_context(|| format!("read {:?}", self.path))?;
        parse_titles(&text).with_context(|| format!("parse {:?}", self.path))
    }
}

/// Parse titles file contents into a vector indexed by cluster number.
///
/// Cluster numbers may be sparse; clusters without a line stay `None`.
pub fn parse_titles(text: &str) -> Result<Vec<Option<String>>> {
    let mut entries: Vec<(usize, String, usize)> = Vec::new();
    let mut max_cluster = 0usize;
    for (i, line) in text.lines().enumerate() {
        let line_no = i + 1;
        let columns: Vec<&str> = line.split('\t').collect();
        if columns.len() != 2 {
            bail!("incorrect number of columns (line {line_no})");
        }
        let cluster_no: usize = columns[0].parse().map_err(|_| {
            anyhow!("cluster numbers must be integers starting at zero (line {line_no})")
        })?;
        max_cluster = max_cluster.max(cluster_no);
        entries.push((cluster_no, columns[1].to_string(), line_no));
    }
    if entries.is_empty() {
        bail!("titles file is empty");
    }

    let mut titles = vec![None; max_cluster + 1];
    for (cluster_no, pub_titles, line_no) in entries {
        if titles[cluster_no].is_some() {
            bail!("cluster number {cluster_no} occurs multiple times (line {line_no})");
        }
        titles[cluster_no] = Some(pub_titles);
    }
    Ok(titles)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn two_column_lines_index_by_cluster_number() {
        let titles = parse_titles("0\tTitle a. Title b.\n1\tTitle c.").unwrap();
        assert_eq!(titles.len(), 2);
        assert_eq!(titles[0].as_deref(), Some("Title a. Title b."));
        assert_eq!(titles[1].as_deref(), Some("Title c."));
    }

    #[test]
    fn sparse_cluster_numbers_leave_gaps() {
        let titles = parse_titles("0\tFirst.\n3\tFourth.").unwrap();
        assert_eq!(titles.len(), 4);
        assert!(titles[1].is_none());
        assert!(titles[2].is_none());
        assert_eq!(titles[3].as_deref(), Some("Fourth."));
    }

    #[test]
    fn wrong_column_count_reports_the_line() {
        let err = parse_titles("0\tFine.\njust one column").unwrap_err();
        assert!(err.to_string().contains("line 2"));
    }

    #[test]
    fn non_integer_cluster_number_is_rejected() {
        let err = parse_titles("-1\tNegative.").unwrap_err();
        assert!(
            err.to_string()
                .contains("integers starting at zero (line 1)")
        );
    }

    #[test]
    fn duplicate_cluster_number_is_rejected() {
        let err = parse_titles("0\tFirst.\n0\tAgain.").unwrap_err();
        assert!(
            err.to_string()
                .contains("cluster number 0 occurs multiple times (line 2)")
        );
    }

    #[test]
    fn empty_file_is_rejected() {
        assert!(parse_titles("").is_err());
    }

    #[test]
    fn reads_from_a_file_on_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "0\tTitle a.").unwrap();
        writeln!(file, "1\tTitle b.").unwrap();

        let source = TsvTitleSource {
            path: file.path().to_path_buf(),
        };
        let titles = source.read_titles().unwrap();
        assert_eq!(titles[1].as_deref(), Some("Title b."));
    }

    #[test]
    fn missing_file_reports_the_path() {
        let source = TsvTitleSource {
            path: PathBuf::from("/nonexistent/titles.tsv"),
        };
        assert!(source.read_titles().is_err());
    }
}
