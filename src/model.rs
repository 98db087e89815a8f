use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContributionRecord {
    pub username: String,
    pub total: u64,
}

impl ContributionRecord {
    pub fn new(username: impl Into<String>, total: u64) -> Self {
        Self {
            username: username.into(),
            total,
        }
    }
}

/// Date key -> that run's records, highest total first. Ordered map so that
/// iteration follows key order, which is chronological for both key formats.
pub type HistorySnapshot = BTreeMap<String, Vec<ContributionRecord>>;

/// Username -> deltas between consecutive observations, oldest first.
pub type PerUserSeries = HashMap<String, Vec<i64>>;

/// A repository watched by the `pulls` or `releases` reports.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RepoTarget {
    pub url: String,
    pub name: String,
    #[serde(default)]
    pub current_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PullRequest {
    pub number: u64,
    pub title: String,
    pub html_url: String,
    pub user: PullUser,
    pub base: PullBase,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PullUser {
    pub login: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PullBase {
    pub repo: PullRepo,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PullRepo {
    pub full_name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Tag {
    pub name: String,
    pub commit: TagCommit,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TagCommit {
    pub url: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyGranularity {
    Daily,
    Minute,
}
