pub mod history;
pub mod scrape;

use crate::cli::CommonArgs;
use crate::error::{GhbarError, Result};
use crate::fetch::Fetcher;
use crate::model::{ContributionRecord, KeyGranularity, PerUserSeries};
use crate::output::heading;
use crate::util::{reference_date, snapshot_key, split_users};
use anyhow::Context;
use chrono::Local;
use history::{merge, per_user_deltas, recent_keys, HistoryStore};
use indicatif::{ProgressBar, ProgressStyle};

#[derive(Debug, Clone)]
pub struct RunOptions {
    pub base_url: String,
    pub users: Vec<String>,
    pub key: String,
    pub date: String,
    pub write: bool,
    pub window: usize,
}

#[derive(Debug, Clone)]
pub struct Report {
    pub records: Vec<ContributionRecord>,
    pub deltas: PerUserSeries,
}

pub fn exec(
    common: CommonArgs,
    users: Option<String>,
    write: Option<String>,
    granularity: KeyGranularity,
    window: usize,
) -> anyhow::Result<()> {
    let config = common.load_config()?;
    let fetcher = common.fetcher(&config)?;

    let users = match users.as_deref().map(split_users) {
        Some(listed) if !listed.is_empty() => listed,
        _ => config.contribution_users.clone(),
    };
    if users.is_empty() {
        return Err(GhbarError::Config(
            "No users to check (pass a comma-separated list or set CONTRIBUTION_USERS)".to_string(),
        )
        .into());
    }

    let store = HistoryStore::new(config.history_path()?);
    let now = Local::now().naive_local();
    let options = RunOptions {
        base_url: config.contribution_base_url.clone(),
        users,
        key: snapshot_key(&now, granularity),
        date: reference_date(&now),
        write: write_flag(write.as_deref()),
        window,
    };

    let report = run(&fetcher, &store, &options)?;

    println!("{}\n---\n", heading("Contributions"));
    println!("{}", render_rows(&report));
    Ok(())
}

/// Trend lines come from the history as it was before this run.
pub fn run(fetcher: &Fetcher, store: &HistoryStore, options: &RunOptions) -> anyhow::Result<Report> {
    let snapshot = store
        .load()
        .context("Failed to load contribution history")?;
    let deltas = per_user_deltas(&snapshot, &recent_keys(&snapshot, options.window));

    let records = collect_totals(fetcher, &options.base_url, &options.users, &options.date)
        .context("Failed to fetch contributions")?;

    let merged = merge(snapshot, &options.key, records.clone());
    if options.write {
        store
            .persist(&merged)
            .context("Failed to persist contribution history")?;
    } else {
        log::info!("Write disabled, {} left untouched", store.path().display());
    }

    Ok(Report { records, deltas })
}

/// One request at a time; the contributions pages are scraped HTML and get
/// throttled well before the API does.
pub fn collect_totals(
    fetcher: &Fetcher,
    base_url: &str,
    users: &[String],
    date: &str,
) -> Result<Vec<ContributionRecord>> {
    let pb = ProgressBar::new(users.len() as u64);
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );

    let mut records = Vec::with_capacity(users.len());
    for user in users {
        pb.set_message(user.clone());
        records.push(scrape::fetch_user_total(fetcher, base_url, user, date)?);
        pb.inc(1);
    }
    pb.finish_and_clear();

    sort_by_total(&mut records);
    Ok(records)
}

/// Highest first; equal totals keep their input order.
pub fn sort_by_total(records: &mut [ContributionRecord]) {
    records.sort_by(|a, b| b.total.cmp(&a.total));
}

pub fn write_flag(arg: Option<&str>) -> bool {
    !matches!(arg, Some("false") | Some("0"))
}

pub fn render_rows(report: &Report) -> String {
    report
        .records
        .iter()
        .map(|r| {
            let trend = report
                .deltas
                .get(&r.username)
                .map(|d| d.iter().map(i64::to_string).collect::<Vec<_>>().join(" "))
                .unwrap_or_default();
            format!("{} - {}\n--{}", r.username, r.total, trend)
        })
        .collect::<Vec<_>>()
        .join("\n")
}
