//! Corpus layout scanning and validation.
//!
//! A training corpus is a root directory whose immediate children are class
//! directories: `corpusRoot/<className>/<documentFile>...`. Scanning assigns
//! each class a zero-based index and fails the whole run if the layout is
//! violated; there is no partial training.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{DoccatError, Result};

/// A class directory discovered while scanning a corpus root.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClassDir {
    /// Zero-based class index, assigned after sorting by name.
    pub index: usize,
    /// The class name (the directory's base name).
    pub name: String,
    /// Absolute or root-relative path to the class directory.
    pub path: PathBuf,
}

/// Scan a corpus root and return its class directories.
///
/// Validation:
///
/// - the root must exist and be a directory
/// - every immediate child must be a directory
/// - at least one class directory must be present
///
/// Any violation fails with [`DoccatError::InvalidCorpus`] and aborts the
/// training run.
///
/// Class directories are sorted by name before indices are assigned, so the
/// index of a class is stable across platforms and reruns regardless of
/// filesystem enumeration order.
pub fn scan_corpus(root: &Path) -> Result<Vec<ClassDir>> {
    if !root.is_dir() {
        return Err(DoccatError::invalid_corpus(format!(
            "corpus root is not a directory: {}",
            root.display()
        )));
    }

    let mut class_dirs = Vec::new();
    for entry in fs::read_dir(root)? {
        let entry = entry?;
        let path = entry.path();
        if !path.is_dir() {
            return Err(DoccatError::invalid_corpus(format!(
                "corpus root contains a non-directory entry: {}",
                path.display()
            )));
        }

        let name = entry.file_name().to_string_lossy().into_owned();
        class_dirs.push((name, path));
    }

    if class_dirs.is_empty() {
        return Err(DoccatError::invalid_corpus(format!(
            "corpus root contains no class directories: {}",
            root.display()
        )));
    }

    class_dirs.sort_by(|a, b| a.0.cmp(&b.0));

    Ok(class_dirs
        .into_iter()
        .enumerate()
        .map(|(index, (name, path))| ClassDir { index, name, path })
        .collect())
}

#[cfg(test)]
mod tests {
    use std::fs::File;

    use super::*;
    use crate::error::DoccatError;

    #[test]
    fn test_scan_corpus_sorts_by_name() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("sports")).unwrap();
        fs::create_dir(dir.path().join("economy")).unwrap();
        fs::create_dir(dir.path().join("politics")).unwrap();

        let classes = scan_corpus(dir.path()).unwrap();

        let names: Vec<&str> = classes.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["economy", "politics", "sports"]);
        assert_eq!(classes[0].index, 0);
        assert_eq!(classes[2].index, 2);
    }

    #[test]
    fn test_scan_corpus_rejects_missing_root() {
        let err = scan_corpus(Path::new("/nonexistent/corpus")).unwrap_err();
        assert!(matches!(err, DoccatError::InvalidCorpus(_)));
    }

    #[test]
    fn test_scan_corpus_rejects_file_children() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("valid")).unwrap();
        File::create(dir.path().join("stray.txt")).unwrap();

        let err = scan_corpus(dir.path()).unwrap_err();
        assert!(matches!(err, DoccatError::InvalidCorpus(_)));
    }

    #[test]
    fn test_scan_corpus_rejects_empty_root() {
        let dir = tempfile::tempdir().unwrap();
        let err = scan_corpus(dir.path()).unwrap_err();
        assert!(matches!(err, DoccatError::InvalidCorpus(_)));
    }
}
