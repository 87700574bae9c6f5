pub mod config;
pub mod crawl;
pub mod descriptor;
pub mod fetcher;
pub mod models;
pub mod runner;
pub mod sink;
pub mod utils;

// Re-export commonly used types
pub use config::AppConfig;
pub use crawl::{CrawlOptions, CrawlReport, Crawler};
pub use descriptor::PageDescriptor;
pub use fetcher::{FetchedPage, HttpFetcher, PageFetcher};
pub use utils::error::AppError;

pub type Result<T> = std::result::Result<T, AppError>;
