use crate::error::{CoreError, Result};
use url::Url;

/// Which wiki a run talks to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WikiSite {
    lang: String,
    origin: Url,
}

impl WikiSite {
    /// `https://{lang}.wikipedia.org`
    pub fn wikipedia(lang: &str) -> Result<Self> {
        let origin = format!("https://{}.wikipedia.org", lang);
        Self::with_origin(lang, &origin)
    }

    pub fn with_origin(lang: &str, origin: &str) -> Result<Self> {
        let lang = lang.trim().to_lowercase();
        if lang.is_empty() || !lang.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
            return Err(CoreError::config(format!("invalid language code '{}'", lang)));
        }
        let origin = Url::parse(origin)
            .map_err(|e| CoreError::config(format!("invalid wiki origin '{}': {}", origin, e)))?;
        if origin.host_str().is_none() {
            return Err(CoreError::config(format!("wiki origin '{}' has no host", origin)));
        }
        Ok(Self { lang, origin })
    }

    pub fn lang(&self) -> &str {
        &self.lang
    }

    /// `{origin}/wiki/{page}`
    pub fn article_url(&self, page: &str) -> Result<Url> {
        let page = page.trim().replace(' ', "_");
        if page.is_empty() {
            return Err(CoreError::config("page name is empty"));
        }
        self.origin
            .join(&format!("/wiki/{}", page))
            .map_err(|e| CoreError::config(format!("cannot build URL for page '{}': {}", page, e)))
    }

    /// Lower-cased `{host}/wiki/` marker that same-wiki links contain.
    pub fn wiki_pattern(&self) -> String {
        let host = self.origin.host_str().unwrap_or_default();
        match self.origin.port() {
            Some(port) => format!("{}:{}/wiki/", host, port).to_lowercase(),
            None => format!("{}/wiki/", host).to_lowercase(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wikipedia_article_url() {
        let site = WikiSite::wikipedia("en").unwrap();
        assert_eq!(
            site.article_url("Python_(programming_language)").unwrap().as_str(),
            "https://en.wikipedia.org/wiki/Python_(programming_language)"
        );
        assert_eq!(site.wiki_pattern(), "en.wikipedia.org/wiki/");
    }

    #[test]
    fn test_spaces_become_underscores() {
        let site = WikiSite::wikipedia("de").unwrap();
        assert_eq!(
            site.article_url("Albert Einstein").unwrap().as_str(),
            "https://de.wikipedia.org/wiki/Albert_Einstein"
        );
    }

    #[test]
    fn test_custom_origin_keeps_port_in_pattern() {
        let site = WikiSite::with_origin("en", "http://127.0.0.1:8080").unwrap();
        assert_eq!(site.wiki_pattern(), "127.0.0.1:8080/wiki/");
        assert_eq!(
            site.article_url("Rust").unwrap().as_str(),
            "http://127.0.0.1:8080/wiki/Rust"
        );
    }

    #[test]
    fn test_rejects_bad_config() {
        assert!(WikiSite::wikipedia("e n").is_err());
        assert!(WikiSite::wikipedia("").is_err());
        assert!(WikiSite::with_origin("en", "not a url").is_err());
        assert!(WikiSite::wikipedia("en").unwrap().article_url("  ").is_err());
    }
}
