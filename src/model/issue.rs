use serde::de::{DeserializeOwned, Deserializer};
use serde::Deserialize;
use serde_json::Value;

use crate::util::adf::AdfNode;

/// One page of `GET /rest/api/{version}/search`.
#[derive(Debug, Default, Deserialize)]
pub struct SearchPage {
    #[serde(default, deserialize_with = "lenient_issues")]
    pub issues: Vec<RawIssue>,
    #[serde(default, deserialize_with = "lenient_default")]
    pub total: u64,
}

/// A Jira issue as returned by search. Every field is optional and a field
/// with an unexpected shape is treated as absent.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawIssue {
    #[serde(default, deserialize_with = "lenient")]
    pub key: Option<String>,
    #[serde(default, deserialize_with = "lenient_default")]
    pub fields: IssueFields,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct IssueFields {
    #[serde(default, deserialize_with = "lenient")]
    pub summary: Option<String>,
    #[serde(default, deserialize_with = "lenient_description")]
    pub description: Option<Description>,
    #[serde(default, deserialize_with = "lenient")]
    pub priority: Option<NamedField>,
    #[serde(default, deserialize_with = "lenient")]
    pub status: Option<NamedField>,
}

/// `priority` and `status` both nest their label under `name`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NamedField {
    #[serde(default, deserialize_with = "lenient")]
    pub name: Option<String>,
}

/// API v2 returns descriptions as plain strings, v3 as ADF documents.
#[derive(Debug, Clone, PartialEq)]
pub enum Description {
    Text(String),
    Document(AdfNode),
}

impl IssueFields {
    pub fn priority_name(&self) -> Option<&str> {
        self.priority.as_ref()?.name.as_deref()
    }

    pub fn status_name(&self) -> Option<&str> {
        self.status.as_ref()?.name.as_deref()
    }
}

fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(T::deserialize(value).ok())
}

fn lenient_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Value::deserialize(deserializer)?;
    Ok(T::deserialize(value).unwrap_or_default())
}

fn lenient_issues<'de, D>(deserializer: D) -> Result<Vec<RawIssue>, D::Error>
where
    D: Deserializer<'de>,
{
    let issues = match Value::deserialize(deserializer)? {
        Value::Array(items) => items
            .into_iter()
            .map(|item| RawIssue::deserialize(item).unwrap_or_default())
            .collect(),
        _ => Vec::new(),
    };
    Ok(issues)
}

fn lenient_description<'de, D>(deserializer: D) -> Result<Option<Description>, D::Error>
where
    D: Deserializer<'de>,
{
    let description = match Value::deserialize(deserializer)? {
        Value::String(text) => Some(Description::Text(text)),
        value @ Value::Object(_) => Some(Description::Document(AdfNode::from(value))),
        _ => None,
    };
    Ok(description)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn issue(value: Value) -> RawIssue {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn reads_consumed_fields() {
        let raw = issue(json!({
            "id": "10001",
            "key": "PROJ-1",
            "fields": {
                "summary": "Add login",
                "description": "Users can log in",
                "priority": {"name": "High", "id": "2"},
                "status": {"name": "In Progress"},
                "assignee": null,
                "created": "2024-01-02T10:00:00.000+0000"
            }
        }));
        assert_eq!(raw.key.as_deref(), Some("PROJ-1"));
        assert_eq!(raw.fields.summary.as_deref(), Some("Add login"));
        assert_eq!(
            raw.fields.description,
            Some(Description::Text("Users can log in".into()))
        );
        assert_eq!(raw.fields.priority_name(), Some("High"));
        assert_eq!(raw.fields.status_name(), Some("In Progress"));
    }

    #[test]
    fn object_description_becomes_document() {
        let raw = issue(json!({
            "key": "PROJ-2",
            "fields": {"description": {"type": "doc", "content": []}}
        }));
        assert_eq!(
            raw.fields.description,
            Some(Description::Document(AdfNode::Container(vec![])))
        );
    }

    #[test]
    fn missing_fields_default() {
        let raw = issue(json!({}));
        assert!(raw.key.is_none());
        assert!(raw.fields.summary.is_none());
        assert!(raw.fields.description.is_none());
        assert!(raw.fields.priority_name().is_none());
        assert!(raw.fields.status_name().is_none());
    }

    #[test]
    fn wrong_shapes_degrade_to_absent() {
        let raw = issue(json!({
            "key": 17,
            "fields": {
                "summary": ["not", "a", "string"],
                "description": 3.5,
                "priority": "High",
                "status": {"name": {"nested": true}}
            }
        }));
        assert!(raw.key.is_none());
        assert!(raw.fields.summary.is_none());
        assert!(raw.fields.description.is_none());
        assert!(raw.fields.priority_name().is_none());
        assert!(raw.fields.status.is_some());
        assert!(raw.fields.status_name().is_none());
    }

    #[test]
    fn null_fields_object_defaults() {
        let raw = issue(json!({"key": "PROJ-3", "fields": null}));
        assert_eq!(raw.key.as_deref(), Some("PROJ-3"));
        assert!(raw.fields.summary.is_none());
    }

    #[test]
    fn search_page_tolerates_odd_entries() {
        let page: SearchPage = serde_json::from_value(json!({
            "startAt": 0,
            "maxResults": 50,
            "total": 3,
            "issues": [{"key": "A-1"}, "garbage", {"key": "A-2"}]
        }))
        .unwrap();
        assert_eq!(page.total, 3);
        let keys: Vec<Option<&str>> = page.issues.iter().map(|i| i.key.as_deref()).collect();
        assert_eq!(keys, [Some("A-1"), None, Some("A-2")]);
    }

    #[test]
    fn search_page_without_issues_or_total() {
        let page: SearchPage = serde_json::from_value(json!({"errorMessages": []})).unwrap();
        assert!(page.issues.is_empty());
        assert_eq!(page.total, 0);
    }
}
