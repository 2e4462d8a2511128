use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentFormat {
    Markdown,
    Mdx,
}

impl ContentFormat {
    pub fn guess(file_name: &Path) -> Option<ContentFormat> {
        match file_name.extension().and_then(|ext| ext.to_str()) {
            Some("md") | Some("markdown") => Some(ContentFormat::Markdown),
            Some("mdx") => Some(ContentFormat::Mdx),
            _ => None,
        }
    }
}
