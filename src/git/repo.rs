use crate::error::{GrassError, Result};
use crate::model::CommitInfo;
use chrono::DateTime;
use gix::{discover, ObjectId, Repository};
use indicatif::{ProgressBar, ProgressStyle};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

pub struct GitRepo {
    repo: Repository,
    path: PathBuf,
}

impl GitRepo {
    /// Open a repository at `path`, or current dir if `None`
    pub fn open<P: AsRef<Path>>(path: Option<P>) -> Result<Self> {
        let repo_path = path
            .map(|p| p.as_ref().to_path_buf())
            .unwrap_or(std::env::current_dir()?);

        if !repo_path.exists() {
            return Err(GrassError::GitRepo(format!(
                "Invalid repository: {} does not exist",
                repo_path.display()
            )));
        }

        let repo = discover(&repo_path)?;
        let path = repo.workdir().unwrap_or_else(|| repo.path()).to_path_buf();
        tracing::debug!(path = %path.display(), "opened repository");

        Ok(Self { repo, path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Walk every commit reachable from HEAD, merges included.
    ///
    /// Commits whose id is in `known` are neither returned nor descended
    /// into: their ancestry is assumed to be known as well. The known ids the
    /// walk ran into are reported in [`HistoryWalk::boundary`].
    pub fn collect_commits(&self, known: &HashSet<String>, progress: bool) -> Result<HistoryWalk> {
        let mut head = self.repo.head()?;
        if head.is_unborn() {
            tracing::debug!("HEAD is unborn, repository has no commits");
            return Ok(HistoryWalk::default());
        }
        let head_commit = head.peel_to_commit_in_place()?;

        let mut walk = HistoryWalk {
            head: Some(head_commit.id.to_string()),
            ..HistoryWalk::default()
        };
        let mut seen: HashSet<ObjectId> = HashSet::new();
        let mut stack: Vec<ObjectId> = vec![head_commit.id];

        let pb = if progress {
            let pb = ProgressBar::new_spinner();
            pb.set_style(
                ProgressStyle::default_spinner()
                    .template("{spinner:.green} {msg} {pos}")
                    .unwrap_or_else(|_| ProgressStyle::default_spinner()),
            );
            pb.set_message("Reading commits...");
            pb
        } else {
            ProgressBar::hidden()
        };

        while let Some(commit_id) = stack.pop() {
            if !seen.insert(commit_id) {
                continue;
            }
            let hex = commit_id.to_string();
            if known.contains(&hex) {
                walk.boundary.insert(hex);
                continue;
            }

            let commit = self.repo.find_commit(commit_id)?;
            let author = commit.author()?;
            // Bucket by author date, the `%ad` of `git log`.
            let time = author
                .time()
                .map_err(|e| GrassError::InvalidDate(format!("author time of {hex}: {e}")))?;
            let timestamp = DateTime::from_timestamp(time.seconds, 0)
                .ok_or_else(|| GrassError::InvalidDate(format!("Invalid timestamp: {}", time.seconds)))?;

            walk.commits.push(CommitInfo {
                id: hex,
                author_name: author.name.to_string(),
                author_email: author.email.to_string(),
                timestamp,
                utc_offset: time.offset,
            });

            stack.extend(commit.parent_ids().map(|id| id.detach()));
            pb.inc(1);
        }

        pb.finish_and_clear();
        tracing::debug!(
            new_commits = walk.commits.len(),
            boundary = walk.boundary.len(),
            known = known.len(),
            "history walk finished"
        );
        Ok(walk)
    }
}

/// Result of [`GitRepo::collect_commits`].
#[derive(Debug, Default)]
pub struct HistoryWalk {
    /// HEAD commit id, `None` for an unborn branch.
    pub head: Option<String>,
    /// Commits that were not in the known set.
    pub commits: Vec<CommitInfo>,
    /// Known commits the walk stopped at.
    pub boundary: HashSet<String>,
}
