use crate::domain::model::{Module, ModuleResult, ModuleStatus};
use crate::domain::ports::Storage;
use crate::utils::error::{Result, StudioError};
use regex::Regex;

/// Joins completed module contents in the given order, each followed by a horizontal rule.
pub fn export_markdown<'m, 'r, I>(results: I) -> String
where
    I: IntoIterator<Item = (&'m Module, &'r ModuleResult)>,
{
    results
        .into_iter()
        .filter(|(_, result)| result.status == ModuleStatus::Completed)
        .map(|(_, result)| format!("{}\n\n---\n\n", result.content_text()))
        .collect()
}

pub fn export_filename(unix_millis: i64) -> String {
    format!("concept-studio-{}.md", unix_millis)
}

/// Text to copy for the active tab; nothing for modules without completed content.
pub fn active_content(result: Option<&ModuleResult>) -> Option<String> {
    let result = result?;
    if result.status != ModuleStatus::Completed {
        return None;
    }
    let text = result.content_text();
    (!text.is_empty()).then_some(text)
}

pub async fn save_export<'m, 'r, S: Storage, I>(storage: &S, results: I) -> Result<String>
where
    I: IntoIterator<Item = (&'m Module, &'r ModuleResult)>,
{
    let content = export_markdown(results);
    let filename = export_filename(chrono::Utc::now().timestamp_millis());
    let path = storage.write_file(&filename, content.as_bytes()).await?;
    tracing::info!("Exported {} bytes to {}", content.len(), path);
    Ok(path)
}

fn rule(pattern: &str) -> Result<Regex> {
    Regex::new(pattern).map_err(|e| StudioError::InvalidConfigValue {
        field: "markdown_rule".to_string(),
        value: pattern.to_string(),
        reason: e.to_string(),
    })
}

/// Minimal markdown to HTML used by the results panel: headings, emphasis,
/// inline code, list items and line breaks. Input is escaped first.
pub fn render_markdown(md: &str) -> Result<String> {
    let escaped = md
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;");

    let rules: [(&str, &str); 8] = [
        (r"(?m)^### (.*)$", "<h3>$1</h3>"),
        (r"(?m)^## (.*)$", "<h2>$1</h2>"),
        (r"(?m)^# (.*)$", "<h1>$1</h1>"),
        (r"\*\*(.*?)\*\*", "<strong>$1</strong>"),
        (r"\*(.*?)\*", "<em>$1</em>"),
        (r"`([^`]+)`", "<code>$1</code>"),
        (r"(?m)^- (.*)$", "<li>$1</li>"),
        (r"(?m)^\d+\. (.*)$", "<li>$1</li>"),
    ];

    let mut html = escaped;
    for (pattern, replacement) in rules {
        html = rule(pattern)?.replace_all(&html, replacement).into_owned();
    }
    Ok(html.replace('\n', "<br />"))
}
