//! Label sink for tab-separated labeling files.
//!
//! One line per labeled cluster, six columns, no header: cluster number,
//! short label, long label, keywords, summary, and Wikipedia page link.

use std::path::PathBuf;

use anyhow::{Context, Result};
use publabel_ports::LabelSink;
use publabel_schema::ClusterLabeling;

/// Adapter that writes cluster labelings to a TSV file.
pub struct TsvLabelSink {
    pub path: PathBuf,
}

impl LabelSink for TsvLabelSink {
    fn write_labels(&self, labelings: &[Option<ClusterLabeling>]) -> Result<()> {
        let mut out = String::new();
        for (cluster_no, labeling) in labelings.iter().enumerate() {
            let Some(labeling) = labeling else { continue };
            out.push_str(&render_line(cluster_no, labeling));
            out.push('\n');
        }
        std::fs::write(&self.path, out).with_context(|| format!("write {:?}", self.path))
    }
}

/// One output line. An empty keyword list is written as the literal `null`.
pub fn render_line(cluster_no: usize, labeling: &ClusterLabeling) -> String {
    let keywords = labeling
        .rendered_keywords()
        .unwrap_or_else(|| "null".to_string());
    format!(
        "{cluster_no}\t{}\t{}\t{keywords}\t{}\t{}",
        labeling.short_label, labeling.long_label, labeling.summary, labeling.wikipedia_page
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labeling(short: &str, keywords: &[&str]) -> ClusterLabeling {
        ClusterLabeling {
            short_label: short.to_string(),
            long_label: format!("Long {short}"),
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
            summary: "This cluster of papers is about examples.".to_string(),
            wikipedia_page: "https://en.wikipedia.org/wiki/Example".to_string(),
        }
    }

    #[test]
    fn line_has_six_tab_separated_columns() {
        let line = render_line(4, &labeling("Topic", &["A", "B", "C"]));
        let columns: Vec<&str> = line.split('\t').collect();
        assert_eq!(
            columns,
            vec![
                "4",
                "Topic",
                "Long Topic",
                "A; B; C",
                "This cluster of papers is about examples.",
                "https://en.wikipedia.org/wiki/Example",
            ]
        );
    }

    #[test]
    fn empty_keywords_are_written_as_null() {
        let line = render_line(0, &labeling("Topic", &[]));
        assert!(line.contains("\tnull\t"));
        assert!(!line.contains("\t\t"));
    }

    #[test]
    fn unlabeled_clusters_produce_no_line() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let sink = TsvLabelSink {
            path: file.path().to_path_buf(),
        };
        sink.write_labels(&[
            Some(labeling("First", &["A"])),
            None,
            Some(labeling("Third", &[])),
        ])
        .unwrap();

        let written = std::fs::read_to_string(file.path()).unwrap();
        let lines: Vec<&str> = written.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("0\tFirst\t"));
        assert!(lines[1].starts_with("2\tThird\t"));
    }
}
