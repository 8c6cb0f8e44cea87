//! Title source and label sink backed by SQLite tables.
//!
//! The titles table must have columns `cluster_no` and `pub_titles`. The
//! labels table is dropped and recreated on every write with columns
//! `cluster_no`, `short_label`, `long_label`, `keywords`, `summary`, and
//! `wikipedia_url`.

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use publabel_ports::{LabelSink, TitleSource};
use publabel_schema::ClusterLabeling;
use rusqlite::Connection;

/// Adapter that reads cluster titles from a SQLite table.
pub struct SqliteTitleSource {
    pub database: PathBuf,
    pub table: String,
}

impl TitleSource for SqliteTitleSource {
    fn read_titles(&self) -> Result<Vec<Option<String>>> {
        let conn = Connection::open(&self.database)
            .with_context(|| format!("open {:?}", self.database))?;
        let mut stmt = conn.prepare(&format!(
            "select cluster_no, pub_titles from {} order by cluster_no",
            self.table
        ))?;
        let rows = stmt.query_map([], |row| {
            Ok((row.get::<_, i64>(0)?, row.get::<_, String>(1)?))
        })?;

        let mut entries: Vec<(usize, String)> = Vec::new();
        let mut max_cluster = 0usize;
        for row in rows {
            let (cluster_no, pub_titles) = row?;
            if cluster_no < 0 {
                bail!("cluster numbers must be integers starting at zero (got {cluster_no})");
            }
            let cluster_no = cluster_no as usize;
            max_cluster = max_cluster.max(cluster_no);
            entries.push((cluster_no, pub_titles));
        }

        let mut titles = vec![None; if entries.is_empty() { 0 } else { max_cluster + 1 }];
        for (cluster_no, pub_titles) in entries {
            if titles[cluster_no].is_some() {
                bail!("cluster number {cluster_no} occurs multiple times");
            }
            titles[cluster_no] = Some(pub_titles);
        }
        Ok(titles)
    }
}

/// Adapter that writes cluster labelings to a SQLite table.
pub struct SqliteLabelSink {
    pub database: PathBuf,
    pub table: String,
}

impl LabelSink for SqliteLabelSink {
    fn write_labels(&self, labelings: &[Option<ClusterLabeling>]) -> Result<()> {
        let conn = Connection::open(&self.database)
            .with_context(|| format!("open {:?}", self.database))?;
        conn.execute_batch(&format!(
            "drop table if exists {table};
             create table {table} (
                 cluster_no integer not null,
                 short_label text not null,
                 long_label text not null,
                 keywords text not null,
                 summary text not null,
                 wikipedia_url text not null
             );",
            table = self.table
        ))?;

        let mut stmt = conn.prepare(&format!(
            "insert into {} values (?1, ?2, ?3, ?4, ?5, ?6)",
            self.table
        ))?;
        for (cluster_no, labeling) in labelings.iter().enumerate() {
            let Some(labeling) = labeling else { continue };
            stmt.execute(rusqlite::params![
                cluster_no as i64,
                labeling.short_label,
                labeling.long_label,
                labeling
                    .rendered_keywords()
                    .unwrap_or_else(|| "null".to_string()),
                labeling.summary,
                labeling.wikipedia_page,
            ])?;
        }
        Ok(())
    }
}
