use anyhow::Result;
use tracing::{debug, info};

use crate::error::PrdError;
use crate::model::issue::RawIssue;
use crate::providers::{IssueSource, SearchQuery, SEARCH_FIELDS};

pub const MAX_PAGE_SIZE: u32 = 100;

/// Number of issues requested per search call, always within 1..=100.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageSize(u32);

impl PageSize {
    pub fn new(size: u32) -> Result<Self, PrdError> {
        if (1..=MAX_PAGE_SIZE).contains(&size) {
            Ok(Self(size))
        } else {
            Err(PrdError::InvalidPageSize(size))
        }
    }

    pub fn get(self) -> u32 {
        self.0
    }
}

pub fn project_jql(project_key: &str) -> String {
    format!("project = {project_key} ORDER BY created DESC")
}

/// Fetch every issue of a project, newest first.
///
/// Pages are requested one after another until a page comes back empty or
/// the server-reported total is covered. The cursor advances by the number
/// of issues actually received so short pages are not skipped over. Any
/// failed request aborts the whole fetch and drops what was collected.
pub async fn fetch_all_issues(
    source: &dyn IssueSource,
    project_key: &str,
    page_size: PageSize,
) -> Result<Vec<RawIssue>> {
    let jql = project_jql(project_key);
    info!(project = project_key, source = source.name(), "Fetching tickets");
    debug!(%jql, page_size = page_size.get());

    let mut issues = Vec::new();
    let mut start_at = 0u64;

    loop {
        let query = SearchQuery {
            jql: jql.clone(),
            start_at,
            max_results: page_size.get(),
            fields: SEARCH_FIELDS,
        };
        let page = source.search(&query).await?;

        if page.issues.is_empty() {
            break;
        }

        let received = page.issues.len() as u64;
        issues.extend(page.issues);
        info!("Fetched {} tickets so far...", issues.len());

        if start_at + received >= page.total {
            break;
        }
        start_at += received;
    }

    info!(total = issues.len(), "Total tickets fetched: {}", issues.len());
    Ok(issues)
}
