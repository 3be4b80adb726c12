use serde::Deserialize;
use serde_json::Value;

/// A node of Jira's Atlassian Document Format (ADF), reduced to the shapes
/// that matter for plain-text rendering.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "Value")]
pub enum AdfNode {
    /// A `text` leaf.
    Text(String),
    /// A `paragraph` or `heading`; starts a new line.
    Block(Vec<AdfNode>),
    /// Any other node type, or a bare JSON list of nodes.
    Container(Vec<AdfNode>),
}

impl From<Value> for AdfNode {
    fn from(value: Value) -> Self {
        match value {
            Value::Array(items) => AdfNode::Container(children_of(items)),
            Value::Object(mut obj) => {
                let children = match obj.remove("content") {
                    Some(Value::Array(items)) => children_of(items),
                    _ => Vec::new(),
                };
                match obj.get("type").and_then(Value::as_str) {
                    Some("text") => AdfNode::Text(
                        obj.get("text")
                            .and_then(Value::as_str)
                            .unwrap_or_default()
                            .to_string(),
                    ),
                    Some("paragraph" | "heading") => AdfNode::Block(children),
                    _ => AdfNode::Container(children),
                }
            }
            // Scalars carry no text in ADF.
            _ => AdfNode::Container(Vec::new()),
        }
    }
}

fn children_of(items: Vec<Value>) -> Vec<AdfNode> {
    items.into_iter().map(AdfNode::from).collect()
}

/// Extract plain text from an ADF tree.
///
/// Text leaves are emitted in document order and every paragraph or heading
/// is preceded by a single `"\n"` token, never two in a row and never at the
/// very start. Tokens are joined with spaces and the result is trimmed, so
/// two paragraphs `Hello` and `World` come out as `"Hello \n World"`.
pub fn extract_text(node: &AdfNode) -> String {
    let mut parts = Vec::new();
    collect(node, &mut parts);
    parts.join(" ").trim().to_string()
}

fn collect<'a>(node: &'a AdfNode, parts: &mut Vec<&'a str>) {
    match node {
        AdfNode::Text(text) => parts.push(text),
        AdfNode::Block(children) => {
            if parts.last().is_some_and(|last| *last != "\n") {
                parts.push("\n");
            }
            for child in children {
                collect(child, parts);
            }
        }
        AdfNode::Container(children) => {
            for child in children {
                collect(child, parts);
            }
        }
    }
}
