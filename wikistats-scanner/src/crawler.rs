use crate::error::{Result, ScanError};
use crate::fetcher::PageFetcher;
use crate::page::{Page, anchors_within, find_within, next_siblings, parent_element, text_of};
use crate::result::{NeighborRecord, dedup_records, rank_records};
use crate::wiki::canonical_name;
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};
use url::Url;

/// Id of the box listing a page's (non-hidden) categories.
pub const CATEGORY_BOX_ID: &str = "mw-normal-catlinks";

/// Query token that marks a link to a further listing page.
pub const PAGINATION_MARKER: &str = "pagefrom";

#[derive(Debug, Clone)]
pub enum CrawlProgress {
    CategoryStarted {
        index: usize,
        total: usize,
        name: String,
    },
    ListingPage {
        category: String,
        page: usize,
    },
    Candidate {
        name: String,
        processed: usize,
    },
}

pub type ProgressCallback = Arc<dyn Fn(CrawlProgress) + Send + Sync>;

/// A category attached to the target page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub name: String,
    pub url: Url,
}

/// What one page of a category listing yields: its members and the link to
/// the following page, if there is one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingPage {
    pub members: Vec<Url>,
    pub next: Option<Url>,
}

/// Categories in the page's category box, in display order.
///
/// A page without a category box cannot be compared with anything, so this
/// is a structural failure rather than an empty list.
pub fn category_links(page: &Page) -> Result<Vec<Category>> {
    let links = category_box_links(page).ok_or_else(|| {
        ScanError::structure(page.url().as_str(), "page has no category box")
    })?;

    Ok(links
        .into_iter()
        .filter_map(|anchor| {
            page.resolve_link(&anchor.href).map(|url| Category {
                name: anchor.text,
                url,
            })
        })
        .collect())
}

/// Category names shown on a page, or `None` when it has no category box.
pub fn category_names(page: &Page) -> Option<Vec<String>> {
    category_box_links(page).map(|links| links.into_iter().map(|a| a.text).collect())
}

fn category_box_links(page: &Page) -> Option<Vec<crate::page::Anchor>> {
    let catlinks = page.find_by_id(CATEGORY_BOX_ID)?;
    let list = find_within(catlinks, "ul", None).into_iter().next()?;
    Some(anchors_within(list))
}

/// Parses one page of a category listing.
///
/// The members section is found through the first `<h2>` (document order)
/// whose text contains `category_name`. The members container is the
/// `div.mw-category` inside the first `div.mw-content-ltr` following that
/// heading; the next-page link is the first `<a>` after the container's
/// parent whose href carries [`PAGINATION_MARKER`].
pub fn parse_listing(page: &Page, category_name: &str) -> Result<ListingPage> {
    let url = page.url().as_str();

    let heading = page
        .find_all("h2", None)
        .into_iter()
        .find(|h| text_of(*h).contains(category_name))
        .ok_or_else(|| {
            ScanError::structure(url, format!("no heading mentions category \"{}\"", category_name))
        })?;

    let content = next_siblings(heading, "div", Some("mw-content-ltr"))
        .into_iter()
        .next()
        .ok_or_else(|| {
            ScanError::structure(url, format!("no content block below \"{}\" heading", category_name))
        })?;

    let container = find_within(content, "div", Some("mw-category"))
        .into_iter()
        .next()
        .ok_or_else(|| {
            ScanError::structure(url, format!("no members container for \"{}\"", category_name))
        })?;

    let members = anchors_within(container)
        .into_iter()
        .filter_map(|anchor| page.resolve_link(&anchor.href))
        .collect();

    let next = parent_element(container).and_then(|parent| {
        next_siblings(parent, "a", None)
            .into_iter()
            .filter_map(|a| a.value().attr("href"))
            .find(|href| href.contains(PAGINATION_MARKER))
            .and_then(|href| page.resolve_link(href))
    });

    Ok(ListingPage { members, next })
}

/// Target categories the candidate also has, in the target's order.
pub fn shared_categories(target: &[String], candidate: &HashSet<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    target
        .iter()
        .filter(|name| candidate.contains(*name) && seen.insert(name.as_str()))
        .cloned()
        .collect()
}

/// Walks every category of a target page and scores each listed member by
/// how many categories it shares with the target.
///
/// Requests are issued strictly one at a time, and every candidate fetch is
/// followed by the configured pause.
pub struct NeighborCrawler {
    fetcher: PageFetcher,
    pause: Duration,
    progress_callback: Option<ProgressCallback>,
}

impl NeighborCrawler {
    pub fn new(fetcher: PageFetcher) -> Self {
        Self {
            fetcher,
            pause: Duration::ZERO,
            progress_callback: None,
        }
    }

    pub fn with_pause(mut self, pause: Duration) -> Self {
        self.pause = pause;
        self
    }

    pub fn with_progress_callback(mut self, callback: ProgressCallback) -> Self {
        self.progress_callback = Some(callback);
        self
    }

    fn report(&self, progress: CrawlProgress) {
        if let Some(ref callback) = self.progress_callback {
            callback(progress);
        }
    }

    /// Ranked, deduplicated neighbors of `target`.
    ///
    /// Any failed fetch aborts the whole crawl.
    pub async fn crawl(&self, target: &Page) -> Result<Vec<NeighborRecord>> {
        let categories = category_links(target)?;
        let target_names: Vec<String> = categories.iter().map(|c| c.name.clone()).collect();
        info!(
            "Crawling {} categories of {} (pause {:?})",
            categories.len(),
            target.url(),
            self.pause
        );

        let mut records = Vec::new();
        for (index, category) in categories.iter().enumerate() {
            self.report(CrawlProgress::CategoryStarted {
                index,
                total: categories.len(),
                name: category.name.clone(),
            });
            records = self.crawl_category(category, &target_names, records).await?;
        }

        let found = records.len();
        let mut records = dedup_records(records);
        rank_records(&mut records);
        info!(
            "Crawl complete. {} candidate records, {} after dedup",
            found,
            records.len()
        );
        Ok(records)
    }

    /// Follows one category through all of its listing pages, appending a
    /// record per member to `records` and handing it back.
    pub async fn crawl_category(
        &self,
        category: &Category,
        target_names: &[String],
        mut records: Vec<NeighborRecord>,
    ) -> Result<Vec<NeighborRecord>> {
        let mut visited: HashSet<Url> = HashSet::new();
        let mut cursor = Some(category.url.clone());
        let mut page_number = 0;

        while let Some(listing_url) = cursor {
            if !visited.insert(listing_url.clone()) {
                warn!("Listing page {} links back to itself, stopping", listing_url);
                break;
            }
            page_number += 1;
            self.report(CrawlProgress::ListingPage {
                category: category.name.clone(),
                page: page_number,
            });

            let listing = {
                let page = self.fetcher.fetch(&listing_url).await?;
                parse_listing(&page, &category.name)?
            };
            debug!(
                "{} page {}: {} members, next={:?}",
                category.name,
                page_number,
                listing.members.len(),
                listing.next.as_ref().map(Url::as_str)
            );

            for member in &listing.members {
                let record = self.score_member(member, target_names).await?;
                let name = record.name.clone();
                records.push(record);
                self.report(CrawlProgress::Candidate {
                    name,
                    processed: records.len(),
                });
                tokio::time::sleep(self.pause).await;
            }

            cursor = listing.next;
        }

        Ok(records)
    }

    async fn score_member(&self, url: &Url, target_names: &[String]) -> Result<NeighborRecord> {
        let page = self.fetcher.fetch(url).await?;
        let names: HashSet<String> = match category_names(&page) {
            Some(names) => names.into_iter().collect(),
            None => {
                warn!("{} has no category box, scoring it as sharing nothing", url);
                HashSet::new()
            }
        };
        let name = canonical_name(url).unwrap_or_else(|| url.to_string());
        Ok(NeighborRecord::new(name, shared_categories(target_names, &names)))
    }
}
