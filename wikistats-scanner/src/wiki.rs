use url::Url;

/// Path prefix every article lives under.
pub const WIKI_PATH_PREFIX: &str = "/wiki/";

/// Canonical page name: everything in the URL after the `/wiki/` prefix.
///
/// The name keeps the encoding the wiki serves it with, so
/// `https://en.wikipedia.org/wiki/Python_(programming_language)` yields
/// `Python_(programming_language)`.
pub fn canonical_name(url: &Url) -> Option<String> {
    let name = url.path().strip_prefix(WIKI_PATH_PREFIX)?;
    if name.is_empty() {
        return None;
    }
    Some(name.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_name_plain() {
        let url = Url::parse("https://en.wikipedia.org/wiki/Rust").unwrap();
        assert_eq!(canonical_name(&url), Some("Rust".to_string()));
    }

    #[test]
    fn test_canonical_name_with_parens() {
        let url = Url::parse("https://en.wikipedia.org/wiki/Python_(programming_language)").unwrap();
        assert_eq!(
            canonical_name(&url),
            Some("Python_(programming_language)".to_string())
        );
    }

    #[test]
    fn test_canonical_name_outside_wiki_path() {
        let url = Url::parse("https://en.wikipedia.org/w/index.php?title=Rust").unwrap();
        assert_eq!(canonical_name(&url), None);

        let url = Url::parse("https://en.wikipedia.org/wiki/").unwrap();
        assert_eq!(canonical_name(&url), None);
    }
}
