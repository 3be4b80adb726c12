pub mod criteria;

use crate::model::issue::{Description, RawIssue};
use crate::model::prd::{Prd, UserStory};
use crate::util::adf::extract_text;

use criteria::extract_acceptance_criteria;

const DONE_STATUSES: &[&str] = &["done", "closed", "resolved", "completed"];

/// Document-level values for the generated PRD.
#[derive(Debug, Clone, Default)]
pub struct PrdMetadata {
    pub project_name: String,
    pub branch_name: Option<String>,
    pub description: Option<String>,
}

/// Convert fetched issues into a PRD, one user story per issue, in order.
pub fn transform_to_prd(issues: Vec<RawIssue>, metadata: &PrdMetadata) -> Prd {
    let user_stories = issues
        .into_iter()
        .enumerate()
        .map(|(idx, issue)| to_user_story(issue, idx + 1))
        .collect();

    let project = metadata.project_name.clone();
    let branch_name = non_empty(metadata.branch_name.as_deref())
        .map(String::from)
        .unwrap_or_else(|| default_branch_name(&project));
    let description = non_empty(metadata.description.as_deref())
        .map(String::from)
        .unwrap_or_else(|| format!("JIRA tickets for project {project}"));

    Prd {
        project,
        branch_name,
        description,
        user_stories,
    }
}

/// `position` is 1-based and doubles as the fallback id and priority.
fn to_user_story(issue: RawIssue, position: usize) -> UserStory {
    let fields = issue.fields;
    let id = issue.key.unwrap_or_else(|| format!("US-{position:03}"));
    let title = fields
        .summary
        .clone()
        .unwrap_or_else(|| "Untitled".to_string());

    let description = match &fields.description {
        Some(Description::Document(doc)) => extract_text(doc),
        Some(Description::Text(text)) if !text.is_empty() => text.clone(),
        _ => format!("Implement {title}"),
    };

    let mut acceptance_criteria = extract_acceptance_criteria(&description);
    if acceptance_criteria.is_empty() {
        acceptance_criteria = vec![
            format!("Implement {title}"),
            "Code passes all tests".to_string(),
            "Documentation updated".to_string(),
        ];
    }

    let priority = fields
        .priority_name()
        .and_then(priority_rank)
        .unwrap_or(position);
    let passes = fields.status_name().is_some_and(is_done_status);

    UserStory {
        id,
        title,
        description,
        acceptance_criteria,
        priority,
        passes,
        notes: String::new(),
    }
}

fn priority_rank(name: &str) -> Option<usize> {
    match name.to_lowercase().as_str() {
        "highest" => Some(1),
        "high" => Some(2),
        "medium" => Some(3),
        "low" => Some(4),
        "lowest" => Some(5),
        _ => None,
    }
}

fn is_done_status(name: &str) -> bool {
    DONE_STATUSES.contains(&name.to_lowercase().as_str())
}

fn default_branch_name(project: &str) -> String {
    format!("feature/{}", project.to_lowercase().replace(' ', "-"))
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}
