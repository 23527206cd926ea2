use lazy_static::lazy_static;
use regex::Regex;
use reqwest::{StatusCode, Url};
use scraper::{Html, Selector};
use serde::{Deserialize, Serialize};
use standard_error::{Interpolate, StandardError, Status};

use crate::prelude::Result;

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// How many results a keyword search will follow and scrape.
const SEARCH_RESULT_LIMIT: usize = 5;

lazy_static! {
    static ref EMAIL: Regex =
        Regex::new(r"[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}").unwrap();
    static ref PHONE: Regex = Regex::new(r"\+?\d[\d\s().-]{7,}\d").unwrap();
}

/// A scraped profile in the display shape the cards and the PDF exporter
/// consume. An empty id means the profile has not been persisted yet.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScrapedProfile {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(rename = "Full Name", default)]
    pub full_name: String,
    #[serde(rename = "Email", default)]
    pub email: String,
    #[serde(rename = "Phone", default)]
    pub phone: String,
    #[serde(default)]
    pub linkedin_url: String,
    #[serde(rename = "Skills", default)]
    pub skills: Vec<String>,
    #[serde(rename = "Education", default)]
    pub education: Vec<String>,
    #[serde(rename = "Experience", default)]
    pub experience: Vec<String>,
    #[serde(rename = "Projects", default)]
    pub projects: String,
}

#[derive(Debug, Default)]
pub struct SearchQuery {
    pub role: String,
    pub skills: String,
    pub location: String,
    pub experience: String,
}

impl SearchQuery {
    pub fn keywords(&self) -> String {
        [&self.role, &self.skills, &self.location, &self.experience]
            .iter()
            .map(|part| part.trim())
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

fn client() -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .build()
        .map_err(|e| StandardError::new("ERR-SCRAPE-001").interpolate_err(e.to_string()))
}

/// Scrapes one public profile page.
pub async fn fetch_profile(url: &str) -> Result<ScrapedProfile> {
    if Url::parse(url).is_err() {
        return Err(StandardError::new("ERR-SCRAPE-002: invalid profile url")
            .code(StatusCode::BAD_REQUEST));
    }
    let html = fetch_page(url).await?;
    let mut profile = extract_profile(&html);
    profile.linkedin_url = url.to_string();
    Ok(profile)
}

/// Keyword search: fetch the people-search page, follow profile links and
/// scrape each one. A profile that fails to scrape is skipped, never fatal.
pub async fn search_profiles(query: &SearchQuery) -> Result<Vec<ScrapedProfile>> {
    let url = Url::parse_with_params(
        "https://www.linkedin.com/search/results/people/",
        &[("keywords", query.keywords())],
    )
    .map_err(|e| StandardError::new("ERR-SCRAPE-002").interpolate_err(e.to_string()))?;
    let html = fetch_page(url.as_str()).await?;
    let links = extract_profile_links(&html);
    tracing::debug!("search found {} profile links", links.len());

    let mut profiles = Vec::new();
    for link in links {
        match fetch_profile(&link).await {
            Ok(profile) => profiles.push(profile),
            Err(err) => {
                tracing::warn!("skipping profile {}: {}", &link, &err);
            }
        }
    }
    Ok(profiles)
}

async fn fetch_page(url: &str) -> Result<String> {
    tracing::debug!("fetching {}", url);
    let response = client()?
        .get(url)
        .send()
        .await
        .map_err(|e| StandardError::new("ERR-SCRAPE-003").interpolate_err(e.to_string()))?;
    let status = response.status();
    tracing::debug!("response status: {}", status);
    if status.as_u16() == 999 {
        tracing::warn!("received 999 status - likely bot detection");
        return Err(StandardError::new("ERR-SCRAPE-004: blocked by bot detection")
            .code(StatusCode::BAD_GATEWAY));
    }
    if !status.is_success() {
        return Err(StandardError::new("ERR-SCRAPE-005")
            .code(StatusCode::BAD_GATEWAY)
            .interpolate_err(status.to_string()));
    }
    response
        .text()
        .await
        .map_err(|e| StandardError::new("ERR-SCRAPE-003").interpolate_err(e.to_string()))
}

/// Best-effort extraction from a public profile page. Every field degrades
/// to empty rather than failing; the caller decides what is usable.
pub fn extract_profile(html: &str) -> ScrapedProfile {
    let document = Html::parse_document(html);
    let mut profile = ScrapedProfile {
        full_name: heading_text(&document),
        ..ScrapedProfile::default()
    };

    let body_text = page_text(&document);
    if let Some(email) = EMAIL.find(&body_text) {
        profile.email = email.as_str().to_string();
    }
    if let Some(phone) = PHONE.find(&body_text) {
        profile.phone = phone.as_str().trim().to_string();
    }

    let section_selector = Selector::parse("section").unwrap();
    let heading_selector = Selector::parse("h2, h3").unwrap();
    let item_selector = Selector::parse("li").unwrap();
    for section in document.select(&section_selector) {
        let heading = section
            .select(&heading_selector)
            .next()
            .map(|h| element_text(h).to_lowercase())
            .unwrap_or_default();
        let items: Vec<String> = section
            .select(&item_selector)
            .map(element_text)
            .filter(|item| !item.is_empty())
            .collect();
        if heading.contains("experience") {
            profile.experience = items;
        } else if heading.contains("education") {
            profile.education = items;
        } else if heading.contains("skill") {
            profile.skills = items;
        } else if heading.contains("project") && profile.projects.is_empty() {
            profile.projects = items.join("; ");
        }
    }
    profile
}

fn heading_text(document: &Html) -> String {
    let h1 = Selector::parse("h1").unwrap();
    if let Some(element) = document.select(&h1).next() {
        let name = element_text(element);
        if !name.is_empty() {
            return name;
        }
    }
    // fall back to the page title, shorn of the site suffix
    let title = Selector::parse("title").unwrap();
    document
        .select(&title)
        .next()
        .map(element_text)
        .unwrap_or_default()
        .split(&['|', '-'][..])
        .next()
        .unwrap_or("")
        .trim()
        .to_string()
}

fn element_text(element: scraper::ElementRef) -> String {
    element
        .text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}

fn page_text(document: &Html) -> String {
    document
        .root_element()
        .text()
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Profile links out of a search-results page: absolute `/in/` urls,
/// deduplicated, query strings stripped, capped at the search limit.
pub fn extract_profile_links(html: &str) -> Vec<String> {
    let document = Html::parse_document(html);
    let anchor = Selector::parse("a[href]").unwrap();
    let mut links: Vec<String> = Vec::new();
    for element in document.select(&anchor) {
        let href = element.value().attr("href").unwrap_or("");
        if !href.contains("/in/") {
            continue;
        }
        let absolute = if href.starts_with("http") {
            href.to_string()
        } else {
            format!("https://www.linkedin.com{}", href)
        };
        let clean = absolute.split('?').next().unwrap_or("").to_string();
        if !links.contains(&clean) {
            links.push(clean);
        }
        if links.len() == SEARCH_RESULT_LIMIT {
            break;
        }
    }
    links
}
