use crate::error::{GrassError, Result};
use crate::git::{GitRepo, HistoryWalk};
use crate::model::{CommitInfo, DateRange, SCHEMA_VERSION};
use chrono::{TimeZone, Utc};
use rusqlite::{params, Connection, OptionalExtension, ToSql};
use std::collections::HashSet;
use std::path::Path;

/// SQLite store of every commit seen in a repository.
pub struct Cache {
    conn: Connection,
}

impl Cache {
    pub fn new<CP: AsRef<Path>, RP: AsRef<Path>>(cache_path: Option<CP>, repo_path: RP) -> Result<Self> {
        let cache_dir = match cache_path {
            Some(path) => path.as_ref().to_path_buf(),
            None => repo_path.as_ref().join(".teamgrass"),
        };
        std::fs::create_dir_all(&cache_dir)?;
        let db_path = cache_dir.join("cache.db");
        tracing::debug!(path = %db_path.display(), "opening commit cache");
        let conn = Connection::open(&db_path)?;
        let mut cache = Self { conn };
        cache.initialize()?;
        Ok(cache)
    }

    pub fn in_memory() -> Result<Self> {
        let mut cache = Self {
            conn: Connection::open_in_memory()?,
        };
        cache.initialize()?;
        Ok(cache)
    }

    fn initialize(&mut self) -> Result<()> {
        self.conn.execute_batch(
            "
            CREATE TABLE IF NOT EXISTS commits (
                id TEXT PRIMARY KEY,
                author_name TEXT NOT NULL,
                author_email TEXT NOT NULL,
                timestamp INTEGER NOT NULL,
                utc_offset INTEGER NOT NULL
            );
            CREATE INDEX IF NOT EXISTS idx_commits_timestamp ON commits(timestamp);
            CREATE TABLE IF NOT EXISTS meta (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );
            ",
        )?;
        self.check_schema_version()?;
        Ok(())
    }

    fn check_schema_version(&mut self) -> Result<()> {
        let user_version: i64 = self
            .conn
            .query_row("PRAGMA user_version;", [], |row| row.get(0))?;

        if user_version == 0 {
            let set_stmt = format!("PRAGMA user_version = {SCHEMA_VERSION};");
            self.conn.execute_batch(&set_stmt)?;
        } else if user_version != SCHEMA_VERSION as i64 {
            return Err(GrassError::Cache(format!(
                "Schema version mismatch: expected {}, found {}",
                SCHEMA_VERSION, user_version
            )));
        }

        Ok(())
    }

    pub fn known_ids(&self) -> Result<HashSet<String>> {
        let mut stmt = self.conn.prepare("SELECT id FROM commits")?;
        let ids = stmt
            .query_map([], |row| row.get::<_, String>(0))?
            .collect::<rusqlite::Result<HashSet<_>>>()?;
        Ok(ids)
    }

    /// HEAD commit the cached history was last read from.
    pub fn head(&self) -> Result<Option<String>> {
        let head = self
            .conn
            .query_row("SELECT value FROM meta WHERE key = 'head'", [], |row| row.get(0))
            .optional()?;
        Ok(head)
    }

    /// Store commits in one transaction; a failed refresh leaves the cache untouched.
    pub fn store_commits(&mut self, commits: &[CommitInfo]) -> Result<()> {
        self.write(false, commits, None)
    }

    /// Add the commits found since the last refresh and move the recorded HEAD.
    pub fn append(&mut self, commits: &[CommitInfo], head: Option<&str>) -> Result<()> {
        self.write(false, commits, Some(head))
    }

    /// Drop everything and store exactly `commits`, the history reachable from `head`.
    pub fn replace_all(&mut self, commits: &[CommitInfo], head: Option<&str>) -> Result<()> {
        self.write(true, commits, Some(head))
    }

    fn write(&mut self, clear: bool, commits: &[CommitInfo], head: Option<Option<&str>>) -> Result<()> {
        let tx = self.conn.transaction()?;
        if clear {
            tx.execute("DELETE FROM commits", [])?;
        }
        {
            let mut insert = tx.prepare(
                "INSERT OR REPLACE INTO commits (id, author_name, author_email, timestamp, utc_offset)
                 VALUES (?, ?, ?, ?, ?)",
            )?;
            for c in commits {
                insert.execute(params![
                    c.id,
                    c.author_name,
                    c.author_email,
                    c.timestamp.timestamp(),
                    c.utc_offset
                ])?;
            }
        }
        match head {
            Some(Some(id)) => {
                tx.execute("INSERT OR REPLACE INTO meta (key, value) VALUES ('head', ?)", [id])?;
            }
            Some(None) => {
                tx.execute("DELETE FROM meta WHERE key = 'head'", [])?;
            }
            None => {}
        }
        tx.commit()?;
        Ok(())
    }

    pub fn commits_in(&self, range: &DateRange) -> Result<Vec<CommitInfo>> {
        let mut query = String::from(
            "SELECT id, author_name, author_email, timestamp, utc_offset FROM commits WHERE 1=1",
        );
        let mut to_bind: Vec<Box<dyn ToSql>> = Vec::new();

        if let Some(since) = &range.since {
            query.push_str(" AND timestamp >= ?");
            to_bind.push(Box::new(since.timestamp()));
        }
        if let Some(until) = &range.until {
            query.push_str(" AND timestamp <= ?");
            to_bind.push(Box::new(until.timestamp()));
        }
        query.push_str(" ORDER BY timestamp");

        let mut stmt = self.conn.prepare(&query)?;
        let bind_refs: Vec<&dyn ToSql> = to_bind.iter().map(|b| b.as_ref()).collect();
        let rows = stmt.query_map(bind_refs.as_slice(), |row| {
            let ts: i64 = row.get(3)?;
            let timestamp = Utc.timestamp_opt(ts, 0).single().ok_or_else(|| {
                rusqlite::Error::InvalidColumnType(3, "timestamp".to_string(), rusqlite::types::Type::Integer)
            })?;
            Ok(CommitInfo {
                id: row.get(0)?,
                author_name: row.get(1)?,
                author_email: row.get(2)?,
                timestamp,
                utc_offset: row.get(4)?,
            })
        })?;

        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }
}

/// Bring the cache up to date with HEAD and return the commits in `range`.
///
/// The cache holds exactly the history reachable from the recorded HEAD. When
/// the new HEAD does not descend from it (amend, rebase, branch switch) the
/// cache is rebuilt from a full walk.
pub fn fetch_commits(repo: &GitRepo, cache: &mut Cache, range: &DateRange, progress: bool) -> Result<Vec<CommitInfo>> {
    let known = cache.known_ids()?;
    let cached_head = cache.head()?;
    let walk = repo.collect_commits(&known, progress)?;

    if extends_cached_history(cached_head.as_deref(), &known, &walk) {
        if !walk.commits.is_empty() || walk.head != cached_head {
            tracing::info!(count = walk.commits.len(), "caching new commits");
            cache.append(&walk.commits, walk.head.as_deref())?;
        }
    } else {
        tracing::info!(previous = ?cached_head, head = ?walk.head, "history rewritten, rebuilding commit cache");
        let full = repo.collect_commits(&HashSet::new(), progress)?;
        cache.replace_all(&full.commits, full.head.as_deref())?;
    }
    cache.commits_in(range)
}

/// Whether `walk` only added commits on top of the cached HEAD.
fn extends_cached_history(cached_head: Option<&str>, known: &HashSet<String>, walk: &HistoryWalk) -> bool {
    match (cached_head, walk.head.as_deref()) {
        (Some(cached), Some(head)) => cached == head || walk.boundary.contains(cached),
        (Some(_), None) => false,
        // Nothing recorded yet: only an empty cache can be trusted.
        (None, _) => known.is_empty(),
    }
}
