//! OpenAlex paper search.
//!
//! A single best-effort `GET` against the works endpoint. There is no retry
//! or backoff; callers decide whether a failure should abort or degrade to an
//! empty list.

use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, info, instrument};
use url::Url;

use vaultsite_shared::{Result, SearchQuery, VaultSiteError, Work};

/// Maximum number of redirects to follow.
const MAX_REDIRECTS: usize = 3;

// ---------------------------------------------------------------------------
// Response shape
// ---------------------------------------------------------------------------

/// Body of a `/works` response. Everything but `results` is ignored.
#[derive(Debug, Deserialize)]
struct WorksResponse {
    #[serde(default)]
    results: Vec<Work>,
}

// ---------------------------------------------------------------------------
// Main entry point
// ---------------------------------------------------------------------------

/// Fetch the ranked list of works matching `query`.
///
/// Non-2xx responses, transport failures and undecodable bodies are returned
/// as errors. A body without a `results` field is an empty list.
#[instrument(skip_all, fields(endpoint = %query.endpoint, search = %query.search))]
pub async fn fetch_papers(query: &SearchQuery) -> Result<Vec<Work>> {
    let endpoint = parse_endpoint(&query.endpoint)?;
    let client = build_client(query)?;

    info!(per_page = query.per_page, sort = %query.sort, "querying OpenAlex");

    let response = client
        .get(endpoint.clone())
        .query(&query_params(query))
        .send()
        .await
        .map_err(|e| VaultSiteError::Network(format!("{endpoint}: {e}")))?;

    let status = response.status();
    if !status.is_success() {
        return Err(VaultSiteError::Network(format!("{endpoint}: HTTP {status}")));
    }

    let body = response
        .text()
        .await
        .map_err(|e| VaultSiteError::Network(format!("{endpoint}: failed to read body: {e}")))?;

    let works = parse_works(&body)?;
    info!(count = works.len(), "papers fetched");

    Ok(works)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn parse_endpoint(raw: &str) -> Result<Url> {
    Url::parse(raw).map_err(|e| VaultSiteError::config(format!("invalid endpoint '{raw}': {e}")))
}

/// Build a reqwest client with appropriate settings.
fn build_client(query: &SearchQuery) -> Result<Client> {
    Client::builder()
        .user_agent(query.user_agent.as_str())
        .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
        .timeout(Duration::from_secs(query.timeout_secs))
        .build()
        .map_err(|e| VaultSiteError::Network(format!("failed to build HTTP client: {e}")))
}

/// Query string pairs, in the order they are sent.
fn query_params(query: &SearchQuery) -> Vec<(&'static str, String)> {
    let mut params = vec![
        ("search", query.search.clone()),
        ("per_page", query.per_page.to_string()),
        ("sort", query.sort.clone()),
    ];
    if let Some(mailto) = query.mailto.as_deref().filter(|m| !m.is_empty()) {
        params.push(("mailto", mailto.to_string()));
    }
    params
}

fn parse_works(body: &str) -> Result<Vec<Work>> {
    let parsed: WorksResponse = serde_json::from_str(body)
        .map_err(|e| VaultSiteError::parse(format!("unexpected OpenAlex response: {e}")))?;
    debug!(results = parsed.results.len(), "decoded works response");
    Ok(parsed.results)
}
