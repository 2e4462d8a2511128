use std::fmt::Write;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;

use matterblog::text_utils::slug_from_title;

fn render_header(title: &str, date: &NaiveDate) -> String {
    let mut buf = String::new();

    let _ = writeln!(&mut buf, "---");
    let _ = writeln!(&mut buf, "title: {}", yaml_quote(title));
    let _ = writeln!(&mut buf, "excerpt: \"Replace with a one line summary\"");
    let _ = writeln!(&mut buf, "date: \"{}\"", date.format("%Y-%m-%d"));
    let _ = writeln!(&mut buf, "tags: []");
    let _ = writeln!(&mut buf, "featured: ./cover.webp");
    let _ = writeln!(&mut buf, "---");
    let _ = writeln!(&mut buf);
    buf
}

fn render_body() -> String {
    let mut buf = String::new();

    let _ = writeln!(&mut buf, "This is a body example");
    let _ = writeln!(&mut buf, "Please remove it and replace with your content");
    let _ = writeln!(&mut buf);
    let _ = writeln!(&mut buf, "<!-- more -->");
    let _ = writeln!(&mut buf);
    let _ = writeln!(&mut buf, "And this is the rest of your post");

    buf
}

fn yaml_quote(text: &str) -> String {
    format!("\"{}\"", text.replace('\\', "\\\\").replace('"', "\\\""))
}

/// Creates `<posts_dir>/<slug>/index.mdx` and returns its path.
pub(crate) fn create_post(posts_dir: &Path, title: &str, date: NaiveDate) -> Result<PathBuf> {
    let slug = slug_from_title(title);
    if slug.is_empty() {
        bail!("Title {:?} has no characters usable in a directory name", title);
    }

    let post_dir = posts_dir.join(&slug);
    if post_dir.exists() {
        bail!("{} already exists", post_dir.display());
    }
    fs::create_dir_all(&post_dir)
        .with_context(|| format!("Unable to create {}", post_dir.display()))?;

    let file_path = post_dir.join("index.mdx");
    let content = render_header(title, &date) + &render_body();
    fs::write(&file_path, content)
        .with_context(|| format!("Unable to write {}", file_path.display()))?;

    Ok(file_path)
}

#[cfg(test)]
mod tests {
    use matterblog::catalog::CatalogBuilder;
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_header() {
        let date = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();
        let header = render_header("Say \"hi\"", &date);
        assert_eq!(header, "---\ntitle: \"Say \\\"hi\\\"\"\nexcerpt: \"Replace with a one line summary\"\ndate: \"2024-02-29\"\ntags: []\nfeatured: ./cover.webp\n---\n\n");
    }

    #[test]
    fn test_created_post_is_cataloged() {
        let root = TempDir::new().unwrap();
        let date = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();
        let path = create_post(root.path(), "Post title of mine ábaco", date).unwrap();
        assert_eq!(path, root.path().join("post-title-of-mine-abaco").join("index.mdx"));

        let catalog = CatalogBuilder::new(root.path(), &[]).build();
        assert_eq!(catalog.len(), 1);
        let entry = &catalog.entries()[0];
        assert_eq!(entry.matter.title, "Post title of mine ábaco");
        assert_eq!(entry.matter.date, "2024-02-29");
        assert!(entry.matter.tags.is_empty());

        assert!(create_post(root.path(), "Post title of mine ábaco", date).is_err());
    }
}
