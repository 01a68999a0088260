//! Unsplash client: the production post source.
//!
//! Calls `GET /photos/random?count=&query=&client_id=` and maps every photo to
//! a [`Post`]: title falls back from `description` to `alt_description` to
//! `"Post {index}"`, image is the `urls.small` rendition.
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::models::Post;
use crate::source::{FetchError, PostSource};

const MAX_RETRIES: u32 = 3;
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const BASE_BACKOFF: Duration = Duration::from_secs(1);

#[derive(Debug, Deserialize)]
struct UnsplashPhoto {
    description: Option<String>,
    alt_description: Option<String>,
    urls: UnsplashUrls,
}

#[derive(Debug, Deserialize)]
struct UnsplashUrls {
    small: String,
}

#[derive(Debug, Deserialize)]
struct UnsplashError {
    errors: Vec<String>,
}

#[derive(Clone)]
pub struct UnsplashClient {
    client: Client,
    api_url: String,
    access_key: String,
    backoff: Duration,
}

impl UnsplashClient {
    pub fn new(api_url: String, access_key: String) -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: Client::builder().timeout(REQUEST_TIMEOUT).build()?,
            api_url: api_url.trim_end_matches('/').to_string(),
            access_key,
            backoff: BASE_BACKOFF,
        })
    }

    #[cfg(test)]
    fn with_backoff(mut self, backoff: Duration) -> Self {
        self.backoff = backoff;
        self
    }

    /// One request, no retries.
    async fn fetch_once(&self, count: &str, query: &str) -> Result<Vec<Post>, FetchError> {
        let response = self
            .client
            .get(format!("{}/photos/random", self.api_url))
            .query(&[
                ("count", count),
                ("query", query),
                ("client_id", self.access_key.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<UnsplashError>(&body)
                .map(|e| e.errors.join("; "))
                .unwrap_or(body);
            return Err(FetchError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body = response.text().await?;
        let photos: Vec<UnsplashPhoto> = serde_json::from_str(&body)?;
        Ok(photos_to_posts(photos))
    }
}

#[async_trait]
impl PostSource for UnsplashClient {
    /// Retries transport errors, 429 (rate limit) and 5xx with exponential backoff.
    async fn fetch_batch(&self, limit: u32, query: &str) -> Result<Vec<Post>, FetchError> {
        let count = limit.to_string();
        let mut attempt = 1;

        loop {
            match self.fetch_once(&count, query).await {
                Ok(posts) => {
                    debug!("Fetched {} posts (query={:?})", posts.len(), query);
                    return Ok(posts);
                }
                Err(e) if is_retryable(&e) && attempt < MAX_RETRIES => {
                    // Exponential backoff: 1s, 2s
                    let delay = self.backoff * (1 << (attempt - 1));
                    warn!(
                        "Photo fetch attempt {} failed ({}), retrying after {}ms...",
                        attempt,
                        e,
                        delay.as_millis()
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }
}

fn is_retryable(error: &FetchError) -> bool {
    match error {
        FetchError::Http(_) => true,
        FetchError::Api { status, .. } => *status == 429 || *status >= 500,
        FetchError::Parse(_) => false,
    }
}

fn photos_to_posts(photos: Vec<UnsplashPhoto>) -> Vec<Post> {
    photos
        .into_iter()
        .enumerate()
        .map(|(index, photo)| {
            let title = non_empty(photo.description)
                .or_else(|| non_empty(photo.alt_description))
                .unwrap_or_else(|| format!("Post {index}"));
            Post::new(index as u64, title, photo.urls.small)
        })
        .collect()
}

fn non_empty(text: Option<String>) -> Option<String> {
    text.filter(|t| !t.is_empty())
}
