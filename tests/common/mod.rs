use httpmock::prelude::*;

/// LinkedIn-shaped search results page.
pub fn linkedin_search_page(cards: &[(&str, &str, &str, &str)]) -> String {
    let cards_html: String = cards
        .iter()
        .map(|(title, company, location, url)| {
            format!(
                r##"<div class="base-card job-search-card">
                    <a class="base-card__full-link" href="{url}">{title}</a>
                    <div class="base-search-card__info">
                        <h3 class="base-search-card__title">{title}</h3>
                        <h4 class="base-search-card__subtitle">
                            <a data-tracking-control-name="public_jobs_jserp-result_job-search-card-subtitle" href="#">{company}</a>
                        </h4>
                        <span class="job-search-card__location">{location}</span>
                    </div>
                </div>"##
            )
        })
        .collect();
    format!("<html><body><ul>{}</ul></body></html>", cards_html)
}

pub fn linkedin_detail_page(description: &str) -> String {
    format!(
        r#"<html><body><div class="show-more-less-html__markup">{}</div></body></html>"#,
        description
    )
}

/// Indeed-shaped search results page; hrefs may be relative.
pub fn indeed_search_page(cards: &[(&str, &str, &str, &str)]) -> String {
    let cards_html: String = cards
        .iter()
        .map(|(title, company, location, href)| {
            format!(
                r#"<div class="jobsearch-SerpJobCard">
                    <h2 class="title"><a href="{href}"><span title="{title}">{title}</span></a></h2>
                    <span class="companyName">{company}</span>
                    <div class="companyLocation">{location}</div>
                </div>"#
            )
        })
        .collect();
    format!("<html><body>{}</body></html>", cards_html)
}

pub fn indeed_detail_page(description: &str) -> String {
    format!(
        r#"<html><body><div id="jobDescriptionText">{}</div></body></html>"#,
        description
    )
}

/// Mocks an OpenAI-style chat completions endpoint returning `summary`.
pub fn mock_openai(server: &MockServer, summary: &str) {
    let body = serde_json::json!({
        "choices": [{"message": {"role": "assistant", "content": summary}}]
    });
    server.mock(|when, then| {
        when.method(POST).path("/chat/completions");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(body.clone());
    });
}
