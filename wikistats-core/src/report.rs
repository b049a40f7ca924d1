// Result files: external links and ranked neighbors

use crate::error::{CoreError, Result};
use std::fs::File;
use std::io::Write;
use std::path::Path;
use wikistats_scanner::NeighborRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportFormat {
    /// One tuple literal per line.
    #[default]
    Text,
    Json,
}

impl ReportFormat {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Some(ReportFormat::Text),
            "json" => Some(ReportFormat::Json),
            _ => None,
        }
    }
}

/// Newline-joined lines with a trailing newline; nothing at all for an
/// empty list.
pub fn render_lines<I, S>(lines: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut out = String::new();
    for line in lines {
        out.push_str(line.as_ref());
        out.push('\n');
    }
    out
}

pub fn render_links(links: &[String]) -> String {
    render_lines(links)
}

pub fn render_neighbors(records: &[NeighborRecord], format: ReportFormat) -> Result<String> {
    match format {
        ReportFormat::Text => Ok(render_lines(records.iter().map(|r| r.to_string()))),
        ReportFormat::Json => {
            let mut json = serde_json::to_string_pretty(records)?;
            json.push('\n');
            Ok(json)
        }
    }
}

/// Writes `content` to `path`, truncating whatever was there.
pub fn save_report(content: &str, path: &Path) -> Result<()> {
    let write = || -> std::io::Result<()> {
        let mut file = File::create(path)?;
        file.write_all(content.as_bytes())?;
        file.flush()
    };
    write().map_err(|source| CoreError::Write {
        path: path.to_path_buf(),
        source,
    })
}
