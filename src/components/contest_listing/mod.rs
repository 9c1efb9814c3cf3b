pub mod models;
pub mod parser;
pub mod time;

pub use models::Contest;

use crate::error::{listing_error, AppResult};
use async_trait::async_trait;
use reqwest::Client;
use tracing::{error, info};
use url::Url;

/// Source of upcoming contests for one run.
///
/// Implementations swallow their own failures: an unreachable or
/// unparsable listing is logged and yields an empty list.
#[async_trait]
pub trait ContestSource: Send + Sync {
    async fn fetch_contests(&self) -> Vec<Contest>;
}

/// Fetches and parses the AtCoder contest listing page
#[derive(Debug, Clone)]
pub struct AtCoderListing {
    client: Client,
    url: Url,
}

impl AtCoderListing {
    /// Create a listing fetcher for the given page URL
    pub fn new(url: &str) -> AppResult<Self> {
        let url = Url::parse(url)
            .map_err(|e| listing_error(&format!("Invalid listing URL '{}': {}", url, e)))?;
        Ok(Self {
            client: Client::new(),
            url,
        })
    }

    async fn fetch_html(&self) -> AppResult<String> {
        let response = self.client.get(self.url.clone()).send().await?;

        if !response.status().is_success() {
            return Err(listing_error(&format!(
                "Failed to fetch {}: HTTP {}",
                self.url,
                response.status()
            )));
        }

        Ok(response.text().await?)
    }

    async fn try_fetch(&self) -> AppResult<Vec<Contest>> {
        let html = self.fetch_html().await?;
        parser::parse_upcoming(&html, &self.url)
    }
}

#[async_trait]
impl ContestSource for AtCoderListing {
    async fn fetch_contests(&self) -> Vec<Contest> {
        match self.try_fetch().await {
            Ok(contests) => {
                info!("Found {} upcoming contests at {}", contests.len(), self.url);
                contests
            }
            Err(e) => {
                error!("Failed to fetch contest listing: {:?}", e);
                Vec::new()
            }
        }
    }
}
