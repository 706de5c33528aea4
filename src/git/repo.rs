use crate::error::{GitlocalError, Result};
use chrono::{DateTime, Utc};
use gix::{ObjectId, Repository};
use std::collections::{HashSet, VecDeque};
use std::path::{Path, PathBuf};

/// Author identity and author time of one commit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorCommit {
    pub email: String,
    pub timestamp: DateTime<Utc>,
}

pub struct GitRepo {
    repo: Repository,
    path: PathBuf,
}

impl GitRepo {
    /// Open the repository rooted exactly at `path`; parent directories are not searched.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let repo = gix::open(&path).map_err(|e| GitlocalError::RepoOpen {
            path: path.clone(),
            source: Box::new(e),
        })?;
        Ok(Self { repo, path })
    }

    pub fn head_id(&self) -> Result<ObjectId> {
        self.peel_head().map_err(|e| GitlocalError::HeadResolution {
            path: self.path.clone(),
            source: Box::new(e),
        })
    }

    fn peel_head(&self) -> Result<ObjectId> {
        let mut head = self.repo.head()?;
        let commit = head.peel_to_commit_in_place()?;
        Ok(commit.id)
    }

    /// Visits every commit reachable from HEAD, newest first along each parent chain.
    pub fn for_each_commit<F>(&self, mut visit: F) -> Result<()>
    where
        F: FnMut(AuthorCommit),
    {
        let head = self.head_id()?;
        self.walk_from(head, &mut visit)
            .map_err(|e| GitlocalError::LogIteration {
                path: self.path.clone(),
                source: Box::new(e),
            })
    }

    fn walk_from(&self, start: ObjectId, visit: &mut dyn FnMut(AuthorCommit)) -> Result<()> {
        let mut seen: HashSet<ObjectId> = HashSet::new();
        let mut stack: VecDeque<ObjectId> = VecDeque::from([start]);

        while let Some(commit_id) = stack.pop_back() {
            if !seen.insert(commit_id) {
                continue;
            }

            let commit = self.repo.find_commit(commit_id)?;
            let author = commit.author()?;
            let secs = author.time()?.seconds;
            let timestamp = DateTime::from_timestamp(secs, 0)
                .ok_or_else(|| GitlocalError::InvalidDate(format!("Invalid timestamp: {secs}")))?;

            visit(AuthorCommit {
                email: author.email.to_string(),
                timestamp,
            });

            for pid in commit.parent_ids() {
                stack.push_back(pid.into());
            }
        }

        Ok(())
    }
}
