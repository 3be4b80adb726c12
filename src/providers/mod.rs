pub mod jira;

use anyhow::Result;
use async_trait::async_trait;

use crate::model::issue::SearchPage;

/// Fields requested for every issue; the transformer only reads a subset.
pub const SEARCH_FIELDS: &[&str] = &[
    "summary",
    "status",
    "assignee",
    "created",
    "updated",
    "priority",
    "issuetype",
    "reporter",
    "description",
];

/// One page request against an issue search endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    pub jql: String,
    pub start_at: u64,
    pub max_results: u32,
    pub fields: &'static [&'static str],
}

/// Something that can answer a single paged issue search. Implementations
/// make exactly one attempt per call.
#[async_trait]
pub trait IssueSource: Send + Sync {
    fn name(&self) -> &str;
    async fn search(&self, query: &SearchQuery) -> Result<SearchPage>;
}
