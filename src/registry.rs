//! Persisted list of known repository roots, one path per line.

use crate::error::{GitlocalError, Result};
use crate::util::read_lines;
use std::fs::{self, OpenOptions};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

pub struct Registry {
    path: PathBuf,
}

impl Registry {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the stored entries. A missing file is created empty.
    pub fn load(&self) -> Result<Vec<String>> {
        match read_lines(&self.path) {
            Ok(lines) => Ok(lines),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                OpenOptions::new()
                    .write(true)
                    .create(true)
                    .truncate(false)
                    .open(&self.path)
                    .map_err(|source| self.error(source))?;
                Ok(Vec::new())
            }
            Err(source) => Err(self.error(source)),
        }
    }

    /// Overwrites the file with `entries`.
    pub fn save(&self, entries: &[String]) -> Result<()> {
        let mut content = entries.join("\n");
        if !content.is_empty() {
            content.push('\n');
        }
        fs::write(&self.path, content).map_err(|source| self.error(source))
    }

    /// Merges `incoming` into the stored entries, writes the result and returns it.
    pub fn add(&self, incoming: &[String]) -> Result<Vec<String>> {
        let merged = merge(self.load()?, incoming);
        self.save(&merged)?;
        Ok(merged)
    }

    fn error(&self, source: std::io::Error) -> GitlocalError {
        GitlocalError::Registry {
            path: self.path.clone(),
            source,
        }
    }
}

/// Appends each entry of `incoming` not already present, keeping `existing` order.
pub fn merge(mut existing: Vec<String>, incoming: &[String]) -> Vec<String> {
    for entry in incoming {
        if !existing.contains(entry) {
            existing.push(entry.clone());
        }
    }
    existing
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn merge_appends_only_new_entries() {
        let merged = merge(strings(&["/a", "/b"]), &strings(&["/b", "/c", "/a", "/d"]));
        assert_eq!(merged, strings(&["/a", "/b", "/c", "/d"]));
    }

    #[test]
    fn merge_never_duplicates_a_path() {
        for existing in [strings(&[]), strings(&["/p"]), strings(&["/x", "/p", "/y"])] {
            let merged = merge(existing, &strings(&["/p"]));
            assert_eq!(merged.iter().filter(|e| *e == "/p").count(), 1);
        }
    }

    #[test]
    fn merge_dedups_within_incoming() {
        let merged = merge(Vec::new(), &strings(&["/a", "/a"]));
        assert_eq!(merged, strings(&["/a"]));
    }

    #[test]
    fn load_creates_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let registry = Registry::new(dir.path().join(".gitlocalstats"));
        assert!(registry.load().unwrap().is_empty());
        assert!(registry.path().exists());
    }

    #[test]
    fn add_on_first_run_writes_discovered_paths() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".gitlocalstats");
        let registry = Registry::new(&path);

        registry.add(&strings(&["/home/u/a", "/home/u/b"])).unwrap();
        registry.add(&strings(&["/home/u/b", "/home/u/c"])).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content, "/home/u/a\n/home/u/b\n/home/u/c\n");
    }

    #[test]
    fn load_reports_unreadable_registry() {
        let dir = tempfile::tempdir().unwrap();
        // a directory cannot be read as a file
        let registry = Registry::new(dir.path());
        assert!(matches!(registry.load(), Err(GitlocalError::Registry { .. })));
    }
}
