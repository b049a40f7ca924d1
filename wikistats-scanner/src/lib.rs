pub mod crawler;
pub mod error;
pub mod fetcher;
pub mod page;
pub mod result;
pub mod wiki;

pub use crawler::{CrawlProgress, NeighborCrawler, ProgressCallback};
pub use error::ScanError;
pub use fetcher::PageFetcher;
pub use page::Page;
pub use result::NeighborRecord;
