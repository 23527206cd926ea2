pub mod admin;
pub mod candidates;
pub mod probes;
pub mod scraper;
pub mod ui;
