use crate::config::Config;
use crate::error::Result;
use crate::model::RepoPath;
use crate::registry::Registry;
use anyhow::Context;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use std::collections::HashSet;
use std::path::Path;
use walkdir::WalkDir;

const GIT_DIR: &str = ".git";

/// Decides whether a directory name is skipped (not descended into) while scanning.
pub trait Exclude {
    fn is_excluded(&self, name: &str) -> bool;
}

impl<F> Exclude for F
where
    F: Fn(&str) -> bool,
{
    fn is_excluded(&self, name: &str) -> bool {
        self(name)
    }
}

/// Exact directory-name exclusion list.
#[derive(Debug, Clone, Default)]
pub struct ExcludeSet {
    names: HashSet<String>,
}

impl ExcludeSet {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
        }
    }
}

impl Exclude for ExcludeSet {
    fn is_excluded(&self, name: &str) -> bool {
        self.names.contains(name)
    }
}

pub struct FolderScanner<E = ExcludeSet> {
    exclude: E,
    progress: bool,
}

impl FolderScanner<ExcludeSet> {
    pub fn from_config(config: &Config) -> Self {
        Self::new(ExcludeSet::new(config.exclude.iter().cloned()))
    }
}

impl<E: Exclude> FolderScanner<E> {
    pub fn new(exclude: E) -> Self {
        Self {
            exclude,
            progress: false,
        }
    }

    pub fn with_progress(mut self, progress: bool) -> Self {
        self.progress = progress;
        self
    }

    /// Walks `root` depth-first and returns the parent of every `.git` directory found.
    ///
    /// `.git` directories and excluded directories are never descended into.
    /// Any walk error aborts the scan without a partial result.
    pub fn discover(&self, root: &Path) -> Result<Vec<RepoPath>> {
        self.discover_each(root, |_| {})
    }

    /// Like [`discover`](Self::discover), calling `found` for each repository
    /// as soon as the walk reaches it.
    pub fn discover_each<F>(&self, root: &Path, mut found: F) -> Result<Vec<RepoPath>>
    where
        F: FnMut(&Path),
    {
        let pb = if self.progress {
            ProgressBar::new_spinner()
        } else {
            ProgressBar::hidden()
        };
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        pb.set_message(format!("Scanning {}...", root.display()));

        let mut repos = Vec::new();
        let mut walker = WalkDir::new(root).min_depth(1).into_iter();

        while let Some(entry) = walker.next() {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    pb.finish_and_clear();
                    return Err(e.into());
                }
            };
            if !entry.file_type().is_dir() {
                continue;
            }

            let name = entry.file_name().to_string_lossy();
            if name == GIT_DIR {
                if let Some(repo) = entry.path().parent() {
                    tracing::debug!(repo = %repo.display(), "found repository");
                    pb.suspend(|| found(repo));
                    repos.push(repo.to_path_buf());
                    pb.inc(1);
                }
                walker.skip_current_dir();
            } else if self.exclude.is_excluded(&name) {
                tracing::debug!(dir = %entry.path().display(), "skipping excluded directory");
                walker.skip_current_dir();
            }
        }

        pb.finish_and_clear();
        Ok(repos)
    }
}

pub fn exec(config: &Config, root: &Path) -> anyhow::Result<()> {
    let root = std::path::absolute(root)
        .with_context(|| format!("Failed to resolve {}", root.display()))?;

    let colors = config.color.enabled();
    println!("{}\n", style("Found Folders:").bold().force_styling(colors));
    let scanner = FolderScanner::from_config(config).with_progress(true);
    let found = scanner
        .discover_each(&root, |repo| println!("{}", repo.display()))
        .with_context(|| format!("Failed to scan {}", root.display()))?;

    let registry = Registry::new(&config.registry_path);
    let incoming: Vec<String> = found
        .iter()
        .map(|p| p.to_string_lossy().to_string())
        .collect();
    let merged = registry
        .add(&incoming)
        .context("Failed to update repository registry")?;

    tracing::debug!(
        registry = %config.registry_path.display(),
        entries = merged.len(),
        "registry updated"
    );
    println!("\n{}", merged.join("\n"));
    println!("\n\n{}\n", style("Successfully added").green().force_styling(colors));
    Ok(())
}
