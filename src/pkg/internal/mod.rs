pub mod adaptors;
pub mod candidate;
pub mod dashboard;
pub mod pdf;
pub mod profile;
pub mod questions;
pub mod scrape;
pub mod webhooks;
