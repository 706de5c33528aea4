use super::Window;
use crate::config::ErrorPolicy;
use crate::error::{GitlocalError, Result};
use crate::git::{AuthorCommit, GitRepo};
use crate::model::{AuthorSet, CommitCounts, RepoPath};
use crate::util::read_lines;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;

/// Loads the author email allow-list.
pub fn load_authors(path: &Path) -> Result<AuthorSet> {
    let emails = read_lines(path).map_err(|source| GitlocalError::EmailFile {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(emails.into_iter().collect())
}

#[derive(Debug, Clone)]
pub struct Aggregation {
    pub counts: CommitCounts,
    pub repos_processed: usize,
    pub repos_skipped: usize,
}

pub struct CommitAggregator<'a> {
    window: &'a Window,
    authors: &'a AuthorSet,
    policy: ErrorPolicy,
    progress: bool,
}

impl<'a> CommitAggregator<'a> {
    pub fn new(window: &'a Window, authors: &'a AuthorSet) -> Self {
        Self {
            window,
            authors,
            policy: ErrorPolicy::Abort,
            progress: false,
        }
    }

    pub fn with_policy(mut self, policy: ErrorPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_progress(mut self, progress: bool) -> Self {
        self.progress = progress;
        self
    }

    /// Counts allow-listed commits of every repository into day buckets.
    ///
    /// Repositories are read one after another. Under `ErrorPolicy::Abort` the
    /// first failing repository ends the run.
    pub fn aggregate(&self, repos: &[RepoPath]) -> Result<Aggregation> {
        let mut aggregation = Aggregation {
            counts: CommitCounts::new(self.window.days()),
            repos_processed: 0,
            repos_skipped: 0,
        };

        let pb = if self.progress {
            ProgressBar::new_spinner()
        } else {
            ProgressBar::hidden()
        };
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg} ({pos} commits)")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );

        for path in repos {
            pb.set_message(format!("Collecting commits in {}", path.display()));
            match self.fill(path, &mut aggregation.counts, &pb) {
                Ok(counted) => {
                    tracing::debug!(repo = %path.display(), counted, "repository processed");
                    aggregation.repos_processed += 1;
                }
                Err(e) if self.policy == ErrorPolicy::Warn => {
                    tracing::warn!(repo = %path.display(), error = %e, "skipping repository");
                    aggregation.repos_skipped += 1;
                }
                Err(e) => {
                    pb.finish_and_clear();
                    return Err(e);
                }
            }
        }

        pb.finish_and_clear();
        Ok(aggregation)
    }

    fn fill(&self, path: &Path, counts: &mut CommitCounts, pb: &ProgressBar) -> Result<usize> {
        let repo = GitRepo::open(path)?;
        let mut counted = 0;
        repo.for_each_commit(|commit| {
            pb.inc(1);
            if self.record(counts, &commit) {
                counted += 1;
            }
        })?;
        Ok(counted)
    }

    /// Adds `commit` to its bucket when its author is allow-listed and it falls
    /// inside the window. Returns whether it was counted.
    pub fn record(&self, counts: &mut CommitCounts, commit: &AuthorCommit) -> bool {
        if !self.authors.contains(&commit.email) {
            return false;
        }
        match self.window.offset_of(commit.timestamp) {
            Some(offset) => counts.increment(offset),
            None => false,
        }
    }
}
