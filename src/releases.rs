use crate::cli::CommonArgs;
use crate::error::{GhbarError, Result};
use crate::fetch::{ContentRequest, Fetcher};
use crate::model::{RepoTarget, Tag};
use crate::output::heading;
use anyhow::Context;
use rayon::prelude::*;

const NO_CURRENT_VERSION: &str = "No Current Version";

#[derive(Debug, Clone)]
pub struct RepoRelease {
    pub name: String,
    pub latest: Option<Tag>,
    pub current: Option<String>,
}

pub fn exec(common: CommonArgs) -> anyhow::Result<()> {
    let config = common.load_config()?;
    let fetcher = common.fetcher(&config)?;

    if config.release_targets.is_empty() {
        log::warn!("No repositories configured, set RELEASE_URLS_BASE64");
    }

    let releases = fetch_all(&fetcher, &config.release_targets)
        .context("Failed to fetch release tags")?;

    println!("{}\n---", heading("Releases"));
    let rows = render_rows(&releases);
    if !rows.is_empty() {
        println!("{rows}");
    }
    Ok(())
}

/// Tag lists for every repository are requested at once, each followed by
/// its deployed-version lookup when one is configured.
pub fn fetch_all(fetcher: &Fetcher, targets: &[RepoTarget]) -> Result<Vec<RepoRelease>> {
    targets
        .par_iter()
        .map(|target| -> Result<RepoRelease> {
            let content = fetcher.get(ContentRequest::with_meta(target.url.as_str(), target))?;
            let tags: Vec<Tag> = serde_json::from_str(&content.body)
                .map_err(|e| GhbarError::Parse(format!("{}: {e}", target.name)))?;

            Ok(RepoRelease {
                name: content.meta.name.clone(),
                latest: tags.into_iter().next(),
                current: target
                    .current_url
                    .as_deref()
                    .and_then(|url| current_version(fetcher, &target.name, url)),
            })
        })
        .collect()
}

fn current_version(fetcher: &Fetcher, name: &str, url: &str) -> Option<String> {
    match fetcher.get_text(url) {
        Ok(body) => Some(body.trim().to_string()).filter(|v| !v.is_empty()),
        Err(e) => {
            log::warn!("Could not read current version of {name}: {e}");
            None
        }
    }
}

/// `https://api.github.com/repos/o/r/commits/sha` -> `https://github.com/o/r/commit/sha`
pub fn web_commit_url(api_url: &str) -> String {
    api_url
        .replace("api.github.com/repos", "github.com")
        .replace("commits/", "commit/")
}

pub fn render_rows(releases: &[RepoRelease]) -> String {
    let mut out = String::new();
    for release in releases {
        match &release.latest {
            Some(tag) => out.push_str(&format!(
                "{}: {} | href={}\n",
                release.name,
                tag.name,
                web_commit_url(&tag.commit.url)
            )),
            None => out.push_str(&format!("{}: No tags\n", release.name)),
        }
        out.push_str(&format!(
            "{} | alternate=true\n",
            release.current.as_deref().unwrap_or(NO_CURRENT_VERSION)
        ));
    }
    out.trim_end().to_string()
}
