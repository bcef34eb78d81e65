use thiserror::Error;
use tracing::debug;

use super::types::{PageResponse, Record};

/// Upstream-imposed ceiling on the width of one page request.
pub const MAX_PAGE_WIDTH: u64 = 100;

/// Failures reported by the upstream records API.
#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("upstream request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The upstream answered but flagged the page as failed. The message is
    /// the upstream-reported one, passed through verbatim.
    #[error("upstream reported {marker}: {message}")]
    Status { marker: String, message: String },
}

/// Client for the windowed upstream records endpoint.
pub struct UpstreamClient {
    base_url: String,
    http_client: reqwest::Client,
}

impl UpstreamClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http_client: reqwest::Client::new(),
        }
    }

    /// Discovers the size of the global index space.
    ///
    /// The upstream has no dedicated count endpoint; every page response
    /// carries the total, so a minimal width-1 probe is issued and only its
    /// `total` field is read.
    pub async fn total_count(&self) -> Result<u64, UpstreamError> {
        let page = self.fetch_page(1, 1).await?;
        Ok(page.total)
    }

    /// Fetches all records in `[start, end]`, in index order.
    ///
    /// The window is split into consecutive pages of at most
    /// [`MAX_PAGE_WIDTH`] indices, issued sequentially in ascending order
    /// (which also keeps the request rate flat). `start > end` is the empty
    /// range: no upstream call is made at all.
    pub async fn fetch_range(&self, start: u64, end: u64) -> Result<Vec<Record>, UpstreamError> {
        if start > end {
            return Ok(Vec::new());
        }

        let mut records = Vec::new();
        let mut cursor = start;

        while cursor <= end {
            let page_end = (cursor + MAX_PAGE_WIDTH - 1).min(end);
            let page = self.fetch_page(cursor, page_end).await?;

            debug!(
                "Fetched page [{}, {}]: {} record(s)",
                cursor,
                page_end,
                page.items.len()
            );

            records.extend(page.items);
            cursor = page_end + 1;
        }

        Ok(records)
    }

    async fn fetch_page(&self, start: u64, end: u64) -> Result<PageResponse, UpstreamError> {
        let url = format!("{}/records", self.base_url);
        let page: PageResponse = self
            .http_client
            .get(&url)
            .query(&[("start", start), ("end", end)])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        if page.status != "ok" {
            return Err(UpstreamError::Status {
                marker: page.status,
                message: page.message.unwrap_or_else(|| "no message".to_string()),
            });
        }

        Ok(page)
    }
}
