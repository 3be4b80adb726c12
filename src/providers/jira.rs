use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use base64::Engine;
use tracing::debug;

use super::{IssueSource, SearchQuery};
use crate::error::PrdError;
use crate::model::issue::SearchPage;

/// Connection settings for a Jira Cloud or Server instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JiraSettings {
    pub base_url: String,
    pub email: String,
    pub api_token: String,
    pub api_version: u8,
    pub timeout: Duration,
}

pub struct JiraProvider {
    base_url: String,
    api_version: u8,
    auth_header: String,
    timeout: Duration,
    client: reqwest::Client,
}

impl JiraProvider {
    pub fn new(settings: &JiraSettings) -> Self {
        let creds = format!("{}:{}", settings.email, settings.api_token);
        let encoded = base64::engine::general_purpose::STANDARD.encode(creds);
        Self {
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            api_version: settings.api_version,
            auth_header: format!("Basic {encoded}"),
            timeout: settings.timeout,
            client: reqwest::Client::new(),
        }
    }

    fn search_url(&self, query: &SearchQuery) -> String {
        format!(
            "{}/rest/api/{}/search?jql={}&startAt={}&maxResults={}&fields={}",
            self.base_url,
            self.api_version,
            urlencoding::encode(&query.jql),
            query.start_at,
            query.max_results,
            query.fields.join(",")
        )
    }

    fn build_request(&self, query: &SearchQuery) -> Result<reqwest::Request, PrdError> {
        self.client
            .get(self.search_url(query))
            .header("Authorization", &self.auth_header)
            .header("Accept", "application/json")
            .timeout(self.timeout)
            .build()
            .map_err(PrdError::Request)
    }
}

#[async_trait]
impl IssueSource for JiraProvider {
    fn name(&self) -> &str {
        "Jira"
    }

    async fn search(&self, query: &SearchQuery) -> Result<SearchPage> {
        let request = self.build_request(query)?;
        debug!(url = %request.url(), "GET");

        let resp = self
            .client
            .execute(request)
            .await
            .map_err(PrdError::Request)?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(PrdError::Status {
                status: status.as_u16(),
                body,
            }
            .into());
        }

        let body = resp.text().await.map_err(PrdError::Request)?;
        let page: SearchPage = serde_json::from_str(&body).map_err(PrdError::Decode)?;
        Ok(page)
    }
}
