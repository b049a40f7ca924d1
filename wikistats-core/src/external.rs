// "External links" section extraction

use crate::error::{CoreError, Result};
use tracing::info;
use wikistats_scanner::Page;
use wikistats_scanner::page::{find_within, next_siblings, parent_element};

/// Anchor id of the "External links" heading, per wiki language.
const EXTERNAL_LINKS_ANCHORS: &[(&str, &str)] = &[
    ("en", "External_links"),
    ("ru", "Ссылки"),
    ("de", "Weblinks"),
    ("es", "Enlaces_externos"),
    ("fr", "Liens_externes"),
    ("pt", "Ligações_externas"),
    ("nl", "Externe_links"),
];

pub fn supported_languages() -> Vec<&'static str> {
    EXTERNAL_LINKS_ANCHORS.iter().map(|(lang, _)| *lang).collect()
}

pub fn anchor_id(lang: &str) -> Result<&'static str> {
    EXTERNAL_LINKS_ANCHORS
        .iter()
        .find(|(code, _)| *code == lang)
        .map(|(_, id)| *id)
        .ok_or_else(|| {
            CoreError::config(format!(
                "external links are not supported for language '{}' (supported: {})",
                lang,
                supported_languages().join(", ")
            ))
        })
}

/// hrefs of every `a.external.text` in the lists that follow the
/// "External links" heading, in document order.
///
/// A page without that section yields an empty list.
pub fn extract_external_links(page: &Page, lang: &str) -> Result<Vec<String>> {
    let id = anchor_id(lang)?;

    let Some(heading) = page.find_by_id(id) else {
        info!("{} has no '{}' section", page.url(), id);
        return Ok(Vec::new());
    };
    let Some(section) = parent_element(heading) else {
        return Ok(Vec::new());
    };

    let links: Vec<String> = next_siblings(section, "ul", None)
        .into_iter()
        .flat_map(|list| find_within(list, "a", Some("external text")))
        .filter_map(|a| a.value().attr("href").map(str::to_string))
        .collect();

    info!("Gathered {} external links from {}", links.len(), page.url());
    Ok(links)
}
