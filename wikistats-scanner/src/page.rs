//! Parsed wiki documents and the small query surface the rest of the
//! workspace uses on them.
//!
//! Everything that inspects markup goes through [`Page`] and the helpers in
//! this module, so callers never touch `scraper` selectors directly.

use scraper::{ElementRef, Html};
use url::Url;

/// A link found in a document: its raw `href` and visible text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Anchor {
    pub href: String,
    pub text: String,
}

/// A fetched and parsed page together with the URL it was served from.
pub struct Page {
    url: Url,
    html: Html,
}

impl Page {
    pub fn parse(url: Url, body: &str) -> Self {
        Self {
            url,
            html: Html::parse_document(body),
        }
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    /// First element carrying the given `id`, in document order.
    pub fn find_by_id(&self, id: &str) -> Option<ElementRef<'_>> {
        self.html
            .root_element()
            .descendants()
            .filter_map(ElementRef::wrap)
            .find(|el| el.value().id() == Some(id))
    }

    /// Every `tag` element in document order, optionally restricted to
    /// elements carrying all classes in the whitespace-separated `class`.
    pub fn find_all(&self, tag: &str, class: Option<&str>) -> Vec<ElementRef<'_>> {
        self.html
            .root_element()
            .descendants()
            .filter_map(ElementRef::wrap)
            .filter(|el| matches(el, tag, class))
            .collect()
    }

    /// Every `<a href>` in the document.
    pub fn anchors(&self) -> Vec<Anchor> {
        anchors_within(self.html.root_element())
    }

    /// Resolves a (possibly relative) link against this page's URL.
    pub fn resolve_link(&self, href: &str) -> Option<Url> {
        self.url.join(href).ok()
    }
}

fn matches(el: &ElementRef<'_>, tag: &str, class: Option<&str>) -> bool {
    if el.value().name() != tag {
        return false;
    }
    match class {
        Some(class) => class
            .split_whitespace()
            .all(|wanted| el.value().classes().any(|c| c == wanted)),
        None => true,
    }
}

/// Descendants of `el` (excluding `el` itself) matching `tag` and `class`.
pub fn find_within<'a>(el: ElementRef<'a>, tag: &str, class: Option<&str>) -> Vec<ElementRef<'a>> {
    el.descendants()
        .skip(1)
        .filter_map(ElementRef::wrap)
        .filter(|child| matches(child, tag, class))
        .collect()
}

/// Following siblings of `el` matching `tag` and `class`, in document order.
pub fn next_siblings<'a>(
    el: ElementRef<'a>,
    tag: &str,
    class: Option<&str>,
) -> Vec<ElementRef<'a>> {
    el.next_siblings()
        .filter_map(ElementRef::wrap)
        .filter(|sibling| matches(sibling, tag, class))
        .collect()
}

pub fn parent_element(el: ElementRef<'_>) -> Option<ElementRef<'_>> {
    el.parent().and_then(ElementRef::wrap)
}

pub fn text_of(el: ElementRef<'_>) -> String {
    el.text().collect::<String>()
}

/// Every `<a href>` below `el`.
pub fn anchors_within(el: ElementRef<'_>) -> Vec<Anchor> {
    find_within(el, "a", None)
        .into_iter()
        .filter_map(|a| {
            a.value().attr("href").map(|href| Anchor {
                href: href.to_string(),
                text: text_of(a),
            })
        })
        .collect()
}
