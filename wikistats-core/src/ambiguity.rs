// Informational vs. disambiguation page check

use crate::error::{CoreError, Result};
use crate::site::WikiSite;
use tracing::{debug, info};
use wikistats_scanner::Page;
use wikistats_scanner::wiki::canonical_name;

/// Share of same-name links above which a page counts as a disambiguation
/// page. The comparison is strict.
pub const AMBIGUITY_THRESHOLD: f64 = 0.2;

const DISAMBIGUATION_SUFFIX: &str = "_(disambiguation)";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Informational,
    /// The page lists several topics; `candidates` are the links that look
    /// like the informational pages it points to.
    Disambiguation { candidates: Vec<String> },
}

impl Verdict {
    pub fn is_informational(&self) -> bool {
        matches!(self, Verdict::Informational)
    }
}

/// Link counts behind a verdict.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkTally {
    pub wiki_links: usize,
    pub same_name: Vec<String>,
}

impl LinkTally {
    pub fn ratio(&self) -> Option<f64> {
        if self.wiki_links == 0 {
            return None;
        }
        Some(self.same_name.len() as f64 / self.wiki_links as f64)
    }
}

/// Counts same-wiki, non-service links and the ones among them that carry
/// the page's own name.
pub fn tally_links(page: &Page, site: &WikiSite) -> LinkTally {
    let pattern = site.wiki_pattern();
    let own_url = page.url().as_str().to_lowercase();

    let name = match own_url.find(&pattern) {
        Some(pos) => own_url[pos + pattern.len()..].to_string(),
        None => canonical_name(page.url()).unwrap_or_default().to_lowercase(),
    };
    let name = name
        .strip_suffix(DISAMBIGUATION_SUFFIX)
        .unwrap_or(&name)
        .to_string();

    let service_markers = [
        "special:".to_string(),
        "talk:".to_string(),
        DISAMBIGUATION_SUFFIX.to_string(),
        format!("{}#", name),
    ];

    let mut tally = LinkTally::default();
    for anchor in page.anchors() {
        let Some(absolute) = page.resolve_link(&anchor.href) else {
            continue;
        };
        let lower = absolute.as_str().to_lowercase();
        if !lower.contains(&pattern) || service_markers.iter().any(|m| lower.contains(m.as_str())) {
            continue;
        }
        tally.wiki_links += 1;
        if lower.contains(&name) && lower != own_url {
            tally.same_name.push(absolute.to_string());
        }
    }

    debug!(
        "{}: {} wiki links, {} carry the page name '{}'",
        page.url(),
        tally.wiki_links,
        tally.same_name.len(),
        name
    );
    tally
}

/// Decides whether `page` describes one topic or disambiguates several.
///
/// A page without a single same-wiki link has no ratio to compare and is
/// reported as [`CoreError::NoWikiLinks`].
pub fn classify(page: &Page, site: &WikiSite) -> Result<Verdict> {
    info!("Testing ambiguity of {}", page.url());
    let tally = tally_links(page, site);
    let ratio = tally.ratio().ok_or_else(|| CoreError::NoWikiLinks {
        url: page.url().to_string(),
    })?;

    if ratio > AMBIGUITY_THRESHOLD {
        Ok(Verdict::Disambiguation {
            candidates: tally.same_name,
        })
    } else {
        Ok(Verdict::Informational)
    }
}
