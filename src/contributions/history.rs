use crate::error::{GhbarError, Result};
use crate::model::{ContributionRecord, HistorySnapshot, PerUserSeries};
use std::collections::HashMap;
use std::io::Write;
use std::path::{Path, PathBuf};

pub const DEFAULT_WINDOW: usize = 5;

pub struct HistoryStore {
    path: PathBuf,
}

impl HistoryStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> Result<HistorySnapshot> {
        let text = match std::fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(GhbarError::Config(format!(
                    "History file {} does not exist (create it with `{{}}`)",
                    self.path.display()
                )));
            }
            Err(e) => return Err(e.into()),
        };
        serde_json::from_str(&text).map_err(|source| GhbarError::CorruptStore {
            path: self.path.clone(),
            source,
        })
    }

    /// Replace the store in one rename so readers never see a half-written file.
    pub fn persist(&self, snapshot: &HistorySnapshot) -> Result<()> {
        let json = serde_json::to_vec(snapshot)?;
        let dir = match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };

        let write_err = |source: std::io::Error| GhbarError::StoreWrite {
            path: self.path.clone(),
            source,
        };

        let mut tmp = tempfile::NamedTempFile::new_in(dir).map_err(write_err)?;
        tmp.write_all(&json).map_err(write_err)?;
        tmp.as_file().sync_all().map_err(write_err)?;
        tmp.persist(&self.path).map_err(|e| write_err(e.error))?;

        log::info!("Wrote {} snapshots to {}", snapshot.len(), self.path.display());
        Ok(())
    }
}

pub fn recent_keys(snapshot: &HistorySnapshot, n: usize) -> Vec<String> {
    let skip = snapshot.len().saturating_sub(n);
    snapshot.keys().skip(skip).cloned().collect()
}

/// Deltas between consecutive observations of each user across `keys`.
/// A key the user is absent from is skipped rather than zero-filled.
pub fn per_user_deltas(snapshot: &HistorySnapshot, keys: &[String]) -> PerUserSeries {
    let mut totals: HashMap<String, Vec<i64>> = HashMap::new();

    for key in keys {
        let Some(records) = snapshot.get(key) else {
            continue;
        };
        let by_user: HashMap<&str, u64> = records
            .iter()
            .map(|r| (r.username.as_str(), r.total))
            .collect();
        for (user, total) in by_user {
            totals
                .entry(user.to_string())
                .or_default()
                .push(i64::try_from(total).unwrap_or(i64::MAX));
        }
    }

    totals
        .into_iter()
        .map(|(user, series)| {
            let deltas = series.windows(2).map(|w| w[1] - w[0]).collect();
            (user, deltas)
        })
        .collect()
}

pub fn merge(
    mut snapshot: HistorySnapshot,
    key: &str,
    records: Vec<ContributionRecord>,
) -> HistorySnapshot {
    snapshot.insert(key.to_string(), records);
    snapshot
}
