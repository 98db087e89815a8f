use crate::error::GhbarError;
use crate::util::format_reset;
use console::style;

/// Bold on a terminal, plain text when captured by the menu bar.
pub fn heading(text: &str) -> String {
    style(text).bold().to_string()
}

/// The single stdout line shown in place of a report when a run fails.
pub fn failure_line(err: &anyhow::Error) -> String {
    match err.chain().find_map(|e| e.downcast_ref::<GhbarError>()) {
        Some(e) => {
            if let Some(until) = e.rate_limit_reset().and_then(format_reset) {
                format!("Rate Limit Exceeded Until: {until}")
            } else if let GhbarError::HttpStatus { status, .. } = e {
                format!("Error {status}")
            } else {
                "Error".to_string()
            }
        }
        None => "Error".to_string(),
    }
}
