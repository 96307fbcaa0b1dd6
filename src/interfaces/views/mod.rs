pub mod application_form;
pub mod candidates;
pub mod dashboard;
pub mod jobs;
pub mod session;

use crate::entities::notice::{Notice, NoticeLevel};

/// One line per notice, oldest first.
pub fn render_notices(notices: &[Notice]) -> String {
    notices
        .iter()
        .map(|n| {
            let tag = match n.level {
                NoticeLevel::Info => "info",
                NoticeLevel::Success => "ok",
                NoticeLevel::Warning => "warn",
                NoticeLevel::Error => "error",
            };
            format!("[{}] {}\n", tag, n.message)
        })
        .collect()
}

fn or_dash(value: &str) -> &str {
    if value.trim().is_empty() { "-" } else { value }
}
