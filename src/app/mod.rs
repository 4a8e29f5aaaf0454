pub mod batch;
pub mod scraper;
