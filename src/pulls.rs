use crate::cli::CommonArgs;
use crate::error::{GhbarError, Result};
use crate::fetch::{ContentRequest, Fetcher};
use crate::model::{PullRequest, RepoTarget};
use crate::output::heading;
use anyhow::Context;
use rayon::prelude::*;

#[derive(Debug, Clone)]
pub struct RepoPulls {
    pub name: String,
    pub pulls: Vec<PullRequest>,
}

impl RepoPulls {
    /// GitHub's own `owner/repo` when there is a pull to read it from.
    pub fn display_name(&self) -> &str {
        self.pulls
            .last()
            .map(|p| p.base.repo.full_name.as_str())
            .unwrap_or(&self.name)
    }
}

pub fn exec(common: CommonArgs) -> anyhow::Result<()> {
    let config = common.load_config()?;
    let fetcher = common.fetcher(&config)?;

    if config.pull_targets.is_empty() {
        log::warn!("No repositories configured, set PR_URLS_FILE or PR_URLS_BASE64");
    }

    let repos = fetch_all(&fetcher, &config.pull_targets)
        .context("Failed to fetch pull requests")?;

    let count: usize = repos.iter().map(|r| r.pulls.len()).sum();
    println!("{}", heading(&title(count)));
    let sections = render_sections(&repos);
    if !sections.is_empty() {
        println!("{sections}");
    }
    Ok(())
}

/// Every repository is requested at once; results come back in target order.
pub fn fetch_all(fetcher: &Fetcher, targets: &[RepoTarget]) -> Result<Vec<RepoPulls>> {
    targets
        .par_iter()
        .map(|target| -> Result<RepoPulls> {
            let content = fetcher.get(ContentRequest::with_meta(target.url.as_str(), target))?;
            let pulls = parse_pulls(&content.body)
                .map_err(|e| GhbarError::Parse(format!("{}: {e}", content.meta.name)))?;
            Ok(RepoPulls {
                name: content.meta.name.clone(),
                pulls,
            })
        })
        .collect()
}

pub fn parse_pulls(body: &str) -> serde_json::Result<Vec<PullRequest>> {
    serde_json::from_str(body)
}

pub fn title(count: usize) -> String {
    format!("{count} Pending PR's")
}

pub fn render_sections(repos: &[RepoPulls]) -> String {
    let mut out = String::new();
    for repo in repos {
        out.push_str(&format!("---\n{} ({})\n", repo.display_name(), repo.pulls.len()));
        for pull in &repo.pulls {
            out.push_str(&format!(
                "--#{} - {} - {} | href={}\n",
                pull.number, pull.title, pull.user.login, pull.html_url
            ));
        }
    }
    out.trim_end().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const PULLS: &str = r#"[
        {"number": 12, "title": "Fix the thing", "html_url": "https://github.com/o/r/pull/12",
         "user": {"login": "alice"}, "base": {"repo": {"full_name": "o/r"}}, "state": "open"},
        {"number": 9, "title": "Add stuff", "html_url": "https://github.com/o/r/pull/9",
         "user": {"login": "bob"}, "base": {"repo": {"full_name": "o/r"}}}
    ]"#;

    #[test]
    fn parses_the_fields_it_renders() {
        let pulls = parse_pulls(PULLS).unwrap();
        assert_eq!(pulls.len(), 2);
        assert_eq!(pulls[0].number, 12);
        assert_eq!(pulls[1].user.login, "bob");
    }

    #[test]
    fn sections_list_each_pull() {
        let repos = vec![
            RepoPulls {
                name: "configured".to_string(),
                pulls: parse_pulls(PULLS).unwrap(),
            },
            RepoPulls {
                name: "o/empty".to_string(),
                pulls: vec![],
            },
        ];
        assert_eq!(
            render_sections(&repos),
            "---\no/r (2)\n\
             --#12 - Fix the thing - alice | href=https://github.com/o/r/pull/12\n\
             --#9 - Add stuff - bob | href=https://github.com/o/r/pull/9\n\
             ---\no/empty (0)"
        );
        assert_eq!(title(2), "2 Pending PR's");
    }

    #[test]
    fn non_array_bodies_fail_to_parse() {
        assert!(parse_pulls(r#"{"message": "Not Found"}"#).is_err());
    }
}
