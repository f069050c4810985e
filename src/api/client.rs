// src/api/client.rs
//! Pure HTTP client wrapper for the Confluence Word export endpoint.
//!
//! A thin wrapper around reqwest: it attaches the static session
//! cookie, addresses the per-page export endpoint and surfaces
//! non-success responses as errors. No parsing, no business logic.

use crate::constants::{ERROR_BODY_PREVIEW_LENGTH, WORD_EXPORT_PATH};
use crate::error::AppError;
use crate::types::{BaseUrl, PageId, SessionCookie};
use reqwest::{header, Client};

/// A thin wrapper around a reqwest Client for export requests.
#[derive(Clone)]
pub struct ExportHttpClient {
    client: Client,
    base_url: BaseUrl,
}

impl ExportHttpClient {
    /// Creates a new HTTP client authenticated by the session cookie.
    pub fn new(base_url: BaseUrl, cookie: &SessionCookie) -> Result<Self, AppError> {
        let client = Client::builder()
            .default_headers(Self::create_headers(cookie)?)
            .build()?;
        Ok(Self { client, base_url })
    }

    /// Creates the default headers for export requests.
    fn create_headers(cookie: &SessionCookie) -> Result<header::HeaderMap, AppError> {
        let mut headers = header::HeaderMap::new();

        headers.insert(
            header::COOKIE,
            header::HeaderValue::from_str(cookie.as_str()).map_err(|e| {
                AppError::MissingConfiguration(format!("Invalid session cookie format: {}", e))
            })?,
        );

        Ok(headers)
    }

    /// The per-page Word export URL.
    fn export_url(&self, id: &PageId) -> String {
        format!(
            "{}/{}?pageId={}",
            self.base_url.as_str().trim_end_matches('/'),
            WORD_EXPORT_PATH,
            id
        )
    }
}

#[async_trait::async_trait]
impl super::PageSource for ExportHttpClient {
    async fn fetch_page(&self, id: &PageId) -> Result<Vec<u8>, AppError> {
        let url = self.export_url(id);
        log::debug!("GET {}", url);

        let response = self.client.get(&url).send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ExportService {
                id: id.clone(),
                status,
                body_preview: preview(&body),
            });
        }

        Ok(response.bytes().await?.to_vec())
    }
}

/// Bounded preview of an error response body.
fn preview(body: &str) -> String {
    body.chars().take(ERROR_BODY_PREVIEW_LENGTH).collect()
}
