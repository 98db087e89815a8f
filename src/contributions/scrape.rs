use crate::error::{GhbarError, Result};
use crate::fetch::{ContentRequest, Fetcher};
use crate::model::ContributionRecord;
use regex::Regex;
use std::sync::OnceLock;

fn day_count_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r#"data-count="(\d+)""#).expect("static regex"))
}

pub fn contributions_url(base_url: &str, username: &str, date: &str) -> String {
    format!("{base_url}/users/{username}/contributions?to={date}")
}

/// Sum of every `data-count="N"` marker. A page without markers counts as zero.
pub fn count_contributions(body: &str) -> Result<u64> {
    let mut total = 0u64;
    let mut markers = 0usize;
    for caps in day_count_pattern().captures_iter(body) {
        let digits = &caps[1];
        let count: u64 = digits
            .parse()
            .map_err(|e| GhbarError::Parse(format!("Bad day count '{digits}': {e}")))?;
        total = total
            .checked_add(count)
            .ok_or_else(|| GhbarError::Parse("Contribution total overflows".to_string()))?;
        markers += 1;
    }
    if markers == 0 {
        log::debug!("No day-count markers found, counting zero contributions");
    }
    Ok(total)
}

pub fn fetch_user_total(
    fetcher: &Fetcher,
    base_url: &str,
    username: &str,
    date: &str,
) -> Result<ContributionRecord> {
    let url = contributions_url(base_url, username, date);
    let content = fetcher.get(ContentRequest::with_meta(url, username))?;
    let total = count_contributions(&content.body)?;
    Ok(ContributionRecord::new(content.meta, total))
}
