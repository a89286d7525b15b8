//! Background image discovery.
//!
//! Two upstreams back the picker: Claude proposes stock-photo search terms
//! for a venue location, and Unsplash returns photos for a query.

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

use crate::models::ImageResult;

const ANTHROPIC_URL: &str = "https://api.anthropic.com/v1/messages";
const ANTHROPIC_VERSION: &str = "2023-06-01";
const UNSPLASH_SEARCH_URL: &str = "https://api.unsplash.com/search/photos";
const UNSPLASH_PER_PAGE: u32 = 12;

#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("{0} not configured")]
    MissingKey(&'static str),
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("upstream returned status {0}")]
    Status(u16),
    #[error("unexpected upstream response: {0}")]
    Malformed(String),
}

// ============================================================================
// Search Term Suggestions (Claude)
// ============================================================================

#[derive(Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    messages: [ChatMessage; 1],
}

#[derive(Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

fn suggestion_prompt(location: &str) -> String {
    format!(
        "I'm designing an email banner for a conference or trade show held at: {location}. \
         Suggest 5 specific search terms for stock photo sites such as Unsplash, Pexels or \
         Shutterstock that would find a strong background photo. Favor the city skyline, \
         well-known landmarks or the venue itself. Reply with ONLY a JSON array of strings. \
         Example: [\"Toronto skyline sunset\", \"CN Tower cityscape\"]"
    )
}

/// Used whenever the model's reply cannot be read as a list of terms.
pub fn fallback_suggestions(location: &str) -> Vec<String> {
    vec![
        format!("{} skyline", location),
        format!("{} cityscape", location),
        format!("{} landmark", location),
    ]
}

/// Pull the JSON array of terms out of the model's text reply.
pub fn parse_suggestions(text: &str) -> Option<Vec<String>> {
    let start = text.find('[')?;
    let end = text.rfind(']')?;
    if end < start {
        return None;
    }
    let terms: Vec<String> = serde_json::from_str(&text[start..=end]).ok()?;
    let terms: Vec<String> = terms
        .into_iter()
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .collect();
    (!terms.is_empty()).then_some(terms)
}

pub async fn suggest_search_terms(
    http: &reqwest::Client,
    api_key: Option<&str>,
    model: &str,
    location: &str,
) -> Result<Vec<String>, UpstreamError> {
    let api_key = api_key.ok_or(UpstreamError::MissingKey("ANTHROPIC_API_KEY"))?;

    let request = MessagesRequest {
        model,
        max_tokens: 300,
        messages: [ChatMessage {
            role: "user",
            content: suggestion_prompt(location),
        }],
    };

    let response = http
        .post(ANTHROPIC_URL)
        .header("x-api-key", api_key)
        .header("anthropic-version", ANTHROPIC_VERSION)
        .json(&request)
        .send()
        .await?;

    if !response.status().is_success() {
        return Err(UpstreamError::Status(response.status().as_u16()));
    }

    let body: Value = response.json().await?;
    let text = body
        .get("content")
        .and_then(|c| c.get(0))
        .and_then(|block| block.get("text"))
        .and_then(|t| t.as_str())
        .unwrap_or_default();

    match parse_suggestions(text) {
        Some(terms) => Ok(terms),
        None => {
            debug!(location, "model reply was not a JSON array; using fallback terms");
            Ok(fallback_suggestions(location))
        }
    }
}

// ============================================================================
// Photo Search (Unsplash)
// ============================================================================

/// Map an Unsplash `search/photos` body to picker results. Entries without
/// usable URLs are skipped.
pub fn parse_unsplash_results(body: &Value) -> Result<Vec<ImageResult>, UpstreamError> {
    let results = body
        .get("results")
        .and_then(|r| r.as_array())
        .ok_or_else(|| UpstreamError::Malformed("missing results array".to_string()))?;

    let str_at = |v: &Value, path: &[&str]| -> Option<String> {
        let mut cur = v;
        for key in path {
            cur = cur.get(*key)?;
        }
        cur.as_str().map(|s| s.to_string()).filter(|s| !s.is_empty())
    };

    let images = results
        .iter()
        .filter_map(|photo| {
            let thumb = str_at(photo, &["urls", "small"]).or_else(|| str_at(photo, &["urls", "thumb"]))?;
            let full = str_at(photo, &["urls", "regular"]).or_else(|| str_at(photo, &["urls", "full"]))?;
            Some(ImageResult {
                thumb,
                full,
                photographer: str_at(photo, &["user", "name"]).unwrap_or_else(|| "Unknown".to_string()),
                alt: str_at(photo, &["alt_description"]).or_else(|| str_at(photo, &["description"])),
            })
        })
        .collect();

    Ok(images)
}

pub async fn search_photos(
    http: &reqwest::Client,
    access_key: Option<&str>,
    query: &str,
) -> Result<Vec<ImageResult>, UpstreamError> {
    let access_key = access_key.ok_or(UpstreamError::MissingKey("UNSPLASH_ACCESS_KEY"))?;

    let url = format!(
        "{}?query={}&per_page={}&orientation=landscape",
        UNSPLASH_SEARCH_URL,
        urlencoding::encode(query),
        UNSPLASH_PER_PAGE
    );

    let response = http
        .get(&url)
        .header("Authorization", format!("Client-ID {}", access_key))
        .header("Accept-Version", "v1")
        .send()
        .await?;

    if !response.status().is_success() {
        warn!(status = %response.status(), "unsplash search failed");
        return Err(UpstreamError::Status(response.status().as_u16()));
    }

    let body: Value = response.json().await?;
    parse_unsplash_results(&body)
}
