use serde::Serialize;
use serde_yaml::Value;

use crate::content::RawFrontmatter;
use crate::error::ValidationError;

/// Validated post metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PostMatter {
    pub title: String,
    pub excerpt: String,
    pub date: String,
    pub tags: Vec<String>,
    pub featured: String,
}

/// Checks the frontmatter against the post schema. Extra keys are ignored.
/// Every offending field is reported, and no partial record is ever produced.
pub fn validate(raw: &RawFrontmatter) -> Result<PostMatter, ValidationError> {
    let mut reasons = vec![];

    let title = required_text(raw, "title", &mut reasons);
    let excerpt = required_text(raw, "excerpt", &mut reasons);
    let date = required_text(raw, "date", &mut reasons);
    let tags = required_text_list(raw, "tags", &mut reasons);
    let featured = required_text(raw, "featured", &mut reasons);

    if let Some(ref title) = title {
        if title.trim().is_empty() {
            reasons.push("`title` must not be empty".to_string());
        }
    }

    match (title, excerpt, date, tags, featured) {
        (Some(title), Some(excerpt), Some(date), Some(tags), Some(featured)) if reasons.is_empty() => Ok(PostMatter {
            title,
            excerpt,
            date,
            tags,
            featured,
        }),
        _ => Err(ValidationError { reasons }),
    }
}

fn required_text(raw: &RawFrontmatter, key: &str, reasons: &mut Vec<String>) -> Option<String> {
    match raw.get(key) {
        None => {
            reasons.push(format!("`{}` is missing", key));
            None
        }
        Some(Value::String(s)) => Some(s.clone()),
        Some(other) => {
            reasons.push(format!("`{}` must be text, found {}", key, kind_of(other)));
            None
        }
    }
}

fn required_text_list(raw: &RawFrontmatter, key: &str, reasons: &mut Vec<String>) -> Option<Vec<String>> {
    let items = match raw.get(key) {
        None => {
            reasons.push(format!("`{}` is missing", key));
            return None;
        }
        Some(Value::Sequence(items)) => items,
        Some(other) => {
            reasons.push(format!("`{}` must be a list of text, found {}", key, kind_of(other)));
            return None;
        }
    };

    let mut list = Vec::with_capacity(items.len());
    for (idx, item) in items.iter().enumerate() {
        match item {
            Value::String(s) => list.push(s.clone()),
            other => {
                reasons.push(format!("`{}[{}]` must be text, found {}", key, idx, kind_of(other)));
                return None;
            }
        }
    }
    Some(list)
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "text",
        Value::Sequence(_) => "a list",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value",
    }
}
