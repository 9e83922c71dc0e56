// --- File: crates/webinarsync_zoom/src/client.rs ---

use std::future::Future;
use std::time::Duration;

use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use tracing::{debug, error, info};
use webinarsync_common::http::client::{
    create_client, send_with_retry, RetryPolicy, DEFAULT_MAX_RETRIES, DEFAULT_TIMEOUT_SECS,
};
use webinarsync_config::ZoomConfig;

use crate::error::ZoomError;
use crate::models::{AbsenteeList, AbsenteesPage};

const JSON_CONTENT_TYPE: &str = "application/json;charset=UTF-8";

/// Source of the absentees of a past webinar.
pub trait AbsenteeSource {
    /// All absentees of `webinar_id`, walking every page from page 0.
    ///
    /// Fails as a whole if any page fails.
    fn fetch_all_absentees(
        &self,
        base_url: &str,
        webinar_id: &str,
        token: &str,
    ) -> impl Future<Output = Result<AbsenteeList, ZoomError>> + Send;
}

#[derive(Debug, Clone)]
pub struct ZoomClient {
    http: Client,
    retry: RetryPolicy,
}

impl ZoomClient {
    pub fn new(http: Client, retry: RetryPolicy) -> Self {
        Self { http, retry }
    }

    /// Client with the timeout and retry budget from the `zoom` config section.
    pub fn from_config(config: &ZoomConfig) -> Result<Self, ZoomError> {
        let timeout = config.request_timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS);
        let http = create_client(timeout, true)
            .map_err(|e| ZoomError::ConfigError(format!("failed to build HTTP client: {e}")))?;
        let retry = RetryPolicy {
            max_retries: config.max_retries.unwrap_or(DEFAULT_MAX_RETRIES),
            ..RetryPolicy::default()
        };
        Ok(Self::new(http, retry))
    }

    /// Same client without retries and with a short timeout, for tests.
    pub fn without_retry(timeout: Duration) -> Result<Self, ZoomError> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ZoomError::ConfigError(e.to_string()))?;
        Ok(Self::new(http, RetryPolicy::none()))
    }

    /// Fetches one page of absentees.
    pub async fn fetch_absentees_page(
        &self,
        base_url: &str,
        webinar_id: &str,
        token: &str,
        page: u32,
    ) -> Result<AbsenteesPage, ZoomError> {
        let url = absentees_url(base_url, webinar_id);
        debug!(webinar_id, page, "Fetching absentees page");

        let response = send_with_retry(&self.retry, || {
            self.http
                .get(&url)
                .query(&[("page", page)])
                .header(CONTENT_TYPE, JSON_CONTENT_TYPE)
                .bearer_auth(token)
        })
        .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            error!(webinar_id, page, status = status.as_u16(), "Zoom API error");
            return Err(ZoomError::ApiError {
                status: status.as_u16(),
                message: body,
            });
        }

        Ok(serde_json::from_str(&body)?)
    }
}

impl AbsenteeSource for ZoomClient {
    async fn fetch_all_absentees(
        &self,
        base_url: &str,
        webinar_id: &str,
        token: &str,
    ) -> Result<AbsenteeList, ZoomError> {
        let first = self
            .fetch_absentees_page(base_url, webinar_id, token, 0)
            .await?;
        // page_count is taken from the first page only.
        let mut list = AbsenteeList {
            absentees: first.absentee_records().collect(),
            page_count: first.page_count,
            pages_fetched: 1,
        };

        for page in 1..first.page_count.max(1) {
            debug!(webinar_id, page, of = first.page_count, "Fetching next absentees page");
            let next = self
                .fetch_absentees_page(base_url, webinar_id, token, page)
                .await?;
            list.absentees.extend(next.absentee_records());
            list.pages_fetched += 1;
        }

        info!(
            webinar_id,
            pages = list.pages_fetched,
            page_count = list.page_count,
            absentees = list.absentees.len(),
            "Fetched absentees"
        );
        Ok(list)
    }
}

/// `{base_url}/past_webinars/{webinar_id}/absentees`, tolerating a trailing
/// slash on `base_url`.
pub fn absentees_url(base_url: &str, webinar_id: &str) -> String {
    format!(
        "{}/past_webinars/{}/absentees",
        base_url.trim_end_matches('/'),
        webinar_id
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absentees_url() {
        assert_eq!(
            absentees_url("https://api.zoom.us/v2", "812"),
            "https://api.zoom.us/v2/past_webinars/812/absentees"
        );
        assert_eq!(
            absentees_url("https://api.zoom.us/v2/", "812"),
            "https://api.zoom.us/v2/past_webinars/812/absentees"
        );
    }

    #[test]
    fn test_from_config_defaults() {
        let client = ZoomClient::from_config(&ZoomConfig::default()).unwrap();
        assert_eq!(client.retry.max_retries, DEFAULT_MAX_RETRIES);

        let config = ZoomConfig {
            max_retries: Some(0),
            ..Default::default()
        };
        let client = ZoomClient::from_config(&config).unwrap();
        assert_eq!(client.retry.max_retries, 0);
    }
}
