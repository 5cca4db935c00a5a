use std::time::Duration;

use reqwest::Client;
use thiserror::Error;
use tracing::debug;
use url::Url;

use crate::jobs::models::JobPosting;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Listings endpoint returned status {0}")]
    Status(u16),

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// HTTP client for the job listings document.
#[derive(Clone)]
pub struct JobsClient {
    client: Client,
}

impl JobsClient {
    pub fn new(timeout: Duration) -> Result<Self, FetchError> {
        Ok(Self {
            client: Client::builder().timeout(timeout).build()?,
        })
    }

    /// GETs `url` and decodes the body as a JSON array of postings.
    /// Keywords are not derived here.
    pub async fn fetch(&self, url: &Url) -> Result<Vec<JobPosting>, FetchError> {
        let response = self.client.get(url.clone()).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let body = response.text().await?;
        let postings: Vec<JobPosting> = serde_json::from_str(&body)?;

        debug!(%url, count = postings.len(), "Listings fetched");
        Ok(postings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jobs::test_support::{closed_port_url, serve_fixtures};

    fn client() -> JobsClient {
        JobsClient::new(Duration::from_secs(5)).unwrap()
    }

    #[tokio::test]
    async fn test_fetch_decodes_postings() {
        let base = serve_fixtures().await;
        let postings = client().fetch(&base.join("data.json").unwrap()).await.unwrap();
        assert_eq!(postings.len(), 4);
        assert_eq!(postings[0].company, "Photosnap");
    }

    #[tokio::test]
    async fn test_fetch_reports_non_success_status() {
        let base = serve_fixtures().await;
        let err = client()
            .fetch(&base.join("data-not-found.json").unwrap())
            .await
            .unwrap_err();
        assert!(matches!(err, FetchError::Status(404)));
    }

    #[tokio::test]
    async fn test_fetch_reports_malformed_body() {
        let base = serve_fixtures().await;
        let err = client()
            .fetch(&base.join("malformed/data.json").unwrap())
            .await
            .unwrap_err();
        assert!(matches!(err, FetchError::Parse(_)));
    }

    #[tokio::test]
    async fn test_fetch_reports_connection_failure() {
        let url = closed_port_url().await;
        let err = client().fetch(&url).await.unwrap_err();
        assert!(matches!(err, FetchError::Http(_)));
    }
}
