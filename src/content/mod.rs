use serde_yaml::{Mapping, Value};

pub mod content_file;
pub mod content_format;
pub mod markdown_renderer;
pub mod matter;
pub mod parsing_utils;

/// Untyped key/value metadata as read from a content file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawFrontmatter(pub Mapping);

impl RawFrontmatter {
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }
}
