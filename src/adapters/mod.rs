pub mod artifacts;
pub mod scraper;
pub mod webdriver;
