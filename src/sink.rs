//! Result sinks for classification records.
//!
//! A classification run appends one record per document to a per-class
//! collection. The [`ResultSink`] trait is the seam between scoring and
//! persistence: the default [`FileResultSink`] reproduces the
//! `resultsRoot/<className>/<className>.txt` layout (append mode, directory
//! created on demand), and [`MemoryResultSink`] collects records in memory
//! for tests.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::classifier::ClassificationRecord;
use crate::error::Result;

/// Destination for classification records.
pub trait ResultSink: Send {
    /// Append a record to the per-class collection it belongs to.
    ///
    /// Collections are append-only; records are never overwritten or
    /// deduplicated across runs.
    fn append(&mut self, record: &ClassificationRecord) -> Result<()>;

    /// Get the name of this sink (for debugging and configuration).
    fn name(&self) -> &'static str;
}

/// Writes records under `resultsRoot/<className>/<className>.txt`, one
/// document path per line, in append mode.
#[derive(Debug)]
pub struct FileResultSink {
    results_root: PathBuf,
}

impl FileResultSink {
    /// Create a sink rooted at `results_root`. Directories are created on
    /// first write, not up front.
    pub fn new<P: Into<PathBuf>>(results_root: P) -> Self {
        FileResultSink {
            results_root: results_root.into(),
        }
    }

    /// The configured results root.
    pub fn results_root(&self) -> &Path {
        &self.results_root
    }
}

impl ResultSink for FileResultSink {
    fn append(&mut self, record: &ClassificationRecord) -> Result<()> {
        let class_dir = self.results_root.join(&record.class_name);
        if !class_dir.exists() {
            fs::create_dir_all(&class_dir)?;
        }

        let result_file = class_dir.join(format!("{}.txt", record.class_name));
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(result_file)?;
        writeln!(file, "{}", record.path.display())?;

        Ok(())
    }

    fn name(&self) -> &'static str {
        "file"
    }
}

/// Collects records in memory. Used by tests and callers that post-process
/// results instead of persisting them.
#[derive(Debug, Default)]
pub struct MemoryResultSink {
    records: Vec<ClassificationRecord>,
}

impl MemoryResultSink {
    /// Create a new, empty sink.
    pub fn new() -> Self {
        MemoryResultSink {
            records: Vec::new(),
        }
    }

    /// All records appended so far, in append order.
    pub fn records(&self) -> &[ClassificationRecord] {
        &self.records
    }
}

impl ResultSink for MemoryResultSink {
    fn append(&mut self, record: &ClassificationRecord) -> Result<()> {
        self.records.push(record.clone());
        Ok(())
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_sink_appends_per_class() {
        let dir = tempfile::tempdir().unwrap();
        let mut sink = FileResultSink::new(dir.path().join("results"));

        sink.append(&ClassificationRecord {
            path: PathBuf::from("/docs/one.txt"),
            class_name: "sports".to_string(),
        })
        .unwrap();
        sink.append(&ClassificationRecord {
            path: PathBuf::from("/docs/two.txt"),
            class_name: "sports".to_string(),
        })
        .unwrap();

        let content =
            fs::read_to_string(dir.path().join("results/sports/sports.txt")).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines, vec!["/docs/one.txt", "/docs/two.txt"]);
    }

    #[test]
    fn test_file_sink_creates_directories_on_demand() {
        let dir = tempfile::tempdir().unwrap();
        let results_root = dir.path().join("deep/results");
        let mut sink = FileResultSink::new(&results_root);

        assert!(!results_root.exists());
        sink.append(&ClassificationRecord {
            path: PathBuf::from("/docs/one.txt"),
            class_name: "economy".to_string(),
        })
        .unwrap();
        assert!(results_root.join("economy/economy.txt").is_file());
    }

    #[test]
    fn test_memory_sink_keeps_append_order() {
        let mut sink = MemoryResultSink::new();
        for name in ["b", "a"] {
            sink.append(&ClassificationRecord {
                path: PathBuf::from(format!("/docs/{name}.txt")),
                class_name: name.to_string(),
            })
            .unwrap();
        }

        let classes: Vec<&str> = sink.records().iter().map(|r| r.class_name.as_str()).collect();
        assert_eq!(classes, vec!["b", "a"]);
    }
}
