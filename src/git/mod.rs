mod repo;

pub use repo::{GitRepo, HistoryWalk};
