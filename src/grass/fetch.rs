use super::member_series;
use crate::cache::{fetch_commits, Cache};
use crate::calendar::{empty_month, YearMonth};
use crate::cli::CommonArgs;
use crate::config::TeamConfig;
use crate::git::GitRepo;
use crate::model::{DateRange, DayActivity};
use anyhow::Context;
use std::path::PathBuf;

/// Commit series of every configured member for one month.
pub struct MonthData {
    pub month: YearMonth,
    pub repository_path: String,
    pub series: Vec<Vec<DayActivity>>,
}

/// `--repo`, then the config's repository, then the working directory.
pub fn open_repo(common: &CommonArgs, config: &TeamConfig) -> anyhow::Result<GitRepo> {
    let path: Option<PathBuf> = common.repo.clone().or_else(|| config.repository.clone());
    GitRepo::open(path.as_ref()).context("Failed to open git repository")
}

pub fn load_month(
    repo: &GitRepo,
    cache: &mut Cache,
    config: &TeamConfig,
    month: YearMonth,
    progress: bool,
) -> MonthData {
    let (since, until) = month.utc_bounds();
    let range = DateRange::new().with_since(since).with_until(until);

    // A broken history read shows empty grass rather than aborting the whole view.
    let series = match fetch_commits(repo, cache, &range, progress) {
        Ok(commits) => config
            .members
            .iter()
            .map(|m| member_series(&commits, &m.key, month))
            .collect(),
        Err(e) => {
            tracing::error!(error = %e, "failed to read commits, showing empty month");
            config.members.iter().map(|_| empty_month(month)).collect()
        }
    };

    MonthData {
        month,
        repository_path: repo.path().to_string_lossy().to_string(),
        series,
    }
}

pub fn open_cache(common: &CommonArgs, repo: &GitRepo) -> anyhow::Result<Cache> {
    Cache::new(common.cache.as_deref(), repo.path()).context("Failed to initialize cache")
}
