use crate::analysis::DescriptionAnalyzer;
use crate::domain::model::JobPosting;
use crate::domain::ports::JobSource;
use crate::sources::{fetch_page, http_client, DEFAULT_TIMEOUT, INDEED_SEARCH_URL};
use crate::utils::error::Result;
use async_trait::async_trait;
use chrono::Utc;
use reqwest::Client;
use scraper::{ElementRef, Html, Selector};
use std::sync::OnceLock;
use std::time::Duration;
use url::Url;

/// Job postings from Indeed's search results.
pub struct IndeedSource {
    client: Client,
    base_url: String,
    keywords: Vec<String>,
    request_delay: Duration,
    timeout: Duration,
}

#[derive(Debug)]
struct JobCard {
    title: String,
    company: String,
    location: String,
    url: String,
}

impl IndeedSource {
    pub fn new(keywords: Vec<String>) -> Self {
        Self {
            client: http_client(),
            base_url: INDEED_SEARCH_URL.to_string(),
            keywords,
            request_delay: Duration::ZERO,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_endpoint(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_request_delay(mut self, delay: Duration) -> Self {
        self.request_delay = delay;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    async fn fetch_description(&self, url: &str) -> Result<String> {
        let body = fetch_page(&self.client, "indeed", url, self.timeout).await?;
        Ok(parse_description(&body))
    }
}

#[async_trait]
impl JobSource for IndeedSource {
    fn name(&self) -> &str {
        "indeed"
    }

    async fn fetch_jobs(&self, location: &str, limit_per_site: usize) -> Result<Vec<JobPosting>> {
        let mut jobs = Vec::new();

        for keyword in &self.keywords {
            let url = Url::parse_with_params(
                &self.base_url,
                &[("q", keyword.as_str()), ("l", location)],
            )?;

            let body = match fetch_page(&self.client, self.name(), url.as_str(), self.timeout).await
            {
                Ok(body) => body,
                Err(e) => {
                    tracing::error!("Indeed search for '{}' failed: {}", keyword, e);
                    continue;
                }
            };

            // Card hrefs are relative; resolve them against the search URL.
            let cards = parse_search_cards(&body, &url, limit_per_site);
            tracing::debug!(
                "Indeed '{}' in '{}': {} cards",
                keyword,
                location,
                cards.len()
            );

            for card in cards {
                if !self.request_delay.is_zero() {
                    tokio::time::sleep(self.request_delay).await;
                }

                let description = match self.fetch_description(&card.url).await {
                    Ok(description) => description,
                    Err(e) => {
                        tracing::warn!("Indeed posting {} details unavailable: {}", card.url, e);
                        String::new()
                    }
                };

                let profile = DescriptionAnalyzer::analyze(&description);

                jobs.push(JobPosting {
                    title: card.title,
                    company: card.company,
                    location: card.location,
                    description,
                    technologies: profile.technologies,
                    frameworks: profile.frameworks,
                    certifications: profile.certifications,
                    salary_range: profile.salary_range,
                    date_posted: Utc::now().format("%Y-%m-%d").to_string(),
                    recruiter: profile.recruiter,
                    url: card.url,
                });
            }
        }

        Ok(jobs)
    }
}

fn card_selector() -> &'static Selector {
    static SELECTOR: OnceLock<Selector> = OnceLock::new();
    SELECTOR.get_or_init(|| Selector::parse(".jobsearch-SerpJobCard").unwrap())
}

fn parse_search_cards(body: &str, base: &Url, limit: usize) -> Vec<JobCard> {
    let html = Html::parse_document(body);

    html.select(card_selector())
        .filter_map(|card| parse_card(card, base))
        .take(limit)
        .collect()
}

fn parse_card(card: ElementRef, base: &Url) -> Option<JobCard> {
    static TITLE: OnceLock<Selector> = OnceLock::new();
    static COMPANY: OnceLock<Selector> = OnceLock::new();
    static LOCATION: OnceLock<Selector> = OnceLock::new();
    static LINK: OnceLock<Selector> = OnceLock::new();

    let title_sel = TITLE.get_or_init(|| Selector::parse("h2 a span").unwrap());
    let company_sel = COMPANY.get_or_init(|| Selector::parse(".companyName").unwrap());
    let location_sel = LOCATION.get_or_init(|| Selector::parse(".companyLocation").unwrap());
    let link_sel = LINK.get_or_init(|| Selector::parse("h2 a[href]").unwrap());

    let title_el = card.select(title_sel).next()?;
    // Indeed puts the full title in the span's title attribute.
    let title = title_el
        .value()
        .attr("title")
        .map(|t| t.trim().to_string())
        .unwrap_or_else(|| element_text(title_el));

    let company = card.select(company_sel).next().map(element_text)?;
    let location = card.select(location_sel).next().map(element_text)?;

    let href = card.select(link_sel).next()?.value().attr("href")?;
    let url = base.join(href).ok()?.to_string();

    if title.is_empty() {
        return None;
    }

    Some(JobCard {
        title,
        company,
        location,
        url,
    })
}

fn parse_description(body: &str) -> String {
    static DESCRIPTION: OnceLock<Selector> = OnceLock::new();
    let selector = DESCRIPTION.get_or_init(|| Selector::parse("#jobDescriptionText").unwrap());

    let html = Html::parse_document(body);
    html.select(selector)
        .next()
        .map(element_text)
        .unwrap_or_default()
}

fn element_text(el: ElementRef) -> String {
    el.text().collect::<String>().trim().to_string()
}
