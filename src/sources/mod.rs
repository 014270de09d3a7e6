pub mod indeed;
pub mod linkedin;

pub use indeed::IndeedSource;
pub use linkedin::LinkedInSource;

use crate::utils::error::{AgentError, Result};
use reqwest::Client;
use std::time::Duration;

pub const LINKEDIN_SEARCH_URL: &str = "https://www.linkedin.com/jobs/search";
pub const INDEED_SEARCH_URL: &str = "https://www.indeed.com/jobs";

/// Job boards reject clients without a browser-like User-Agent.
const USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/126.0 Safari/537.36";

pub(crate) const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

pub(crate) fn http_client() -> Client {
    Client::builder()
        .user_agent(USER_AGENT)
        .build()
        .unwrap_or_else(|_| Client::new())
}

/// GET a page and return its body, or a scrape error naming the site.
pub(crate) async fn fetch_page(
    client: &Client,
    site: &str,
    url: &str,
    timeout: Duration,
) -> Result<String> {
    let response = client.get(url).timeout(timeout).send().await?;

    if !response.status().is_success() {
        return Err(AgentError::ScrapeError {
            site: site.to_string(),
            message: format!("request to {} returned {}", url, response.status()),
        });
    }

    Ok(response.text().await?)
}
