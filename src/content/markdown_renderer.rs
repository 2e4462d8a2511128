use std::io;
use std::io::ErrorKind;

use lazy_static::lazy_static;
use markdown::{CompileOptions, Options, ParseOptions};
use regex::Regex;

use crate::content::content_format::ContentFormat;
use crate::content::parsing_utils::remove_comments;

lazy_static! {
    static ref MDX_ESM: Regex = Regex::new(r"^(import|export)\s").unwrap();
    static ref MDX_COMMENT: Regex = Regex::new(r"(?s)\{/\*.*?\*/\}").unwrap();
}

pub struct MarkdownRenderer {}

impl MarkdownRenderer {
    /// Renders a post body, with the frontmatter already stripped, to html.
    pub fn render(body: &str, format: ContentFormat) -> io::Result<String> {
        let buf = match format {
            ContentFormat::Markdown => body.to_string(),
            ContentFormat::Mdx => Self::strip_mdx(body),
        };

        let buf = remove_comments(&buf)
            .map_err(|e| io::Error::new(ErrorKind::InvalidData, e))?;

        let options = Options {
            parse: ParseOptions::gfm(),
            compile: CompileOptions {
                allow_dangerous_html: true,
                ..CompileOptions::gfm()
            },
        };

        match markdown::to_html_with_options(buf.as_str(), &options) {
            Ok(x) => Ok(x),
            Err(e) => Err(io::Error::new(ErrorKind::InvalidInput, e.reason.as_str())),
        }
    }

    // ESM lines and {/* */} comments have no html counterpart.
    // Fenced code blocks are kept verbatim.
    fn strip_mdx(body: &str) -> String {
        let mut res = String::with_capacity(body.len());
        let mut prose = String::new();
        let mut fence: Option<&str> = None;

        for line in body.split_inclusive('\n') {
            let trimmed = line.trim_start();
            match fence {
                Some(marker) => {
                    res.push_str(line);
                    if trimmed.starts_with(marker) {
                        fence = None;
                    }
                }
                None => {
                    if let Some(marker) = fence_marker(trimmed) {
                        res.push_str(&MDX_COMMENT.replace_all(&prose, ""));
                        prose.clear();
                        res.push_str(line);
                        fence = Some(marker);
                    } else if !MDX_ESM.is_match(line) {
                        prose.push_str(line);
                    }
                }
            }
        }

        res.push_str(&MDX_COMMENT.replace_all(&prose, ""));
        res
    }
}

fn fence_marker(line: &str) -> Option<&'static str> {
    if line.starts_with("```") {
        Some("```")
    } else if line.starts_with("~~~") {
        Some("~~~")
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BODY: &str = r##"
import Chart from './chart'

Intro paragraph {/* a note for me */}

<!-- more -->

## Details

| a | b |
|---|---|
| 1 | 2 |
"##;

    #[test]
    fn test_render_mdx() {
        let html = MarkdownRenderer::render(BODY, ContentFormat::Mdx).unwrap();
        assert!(html.contains("<p>Intro paragraph"));
        assert!(html.contains("<h2>Details</h2>"));
        assert!(html.contains("<table>"));
        assert!(!html.contains("import"));
        assert!(!html.contains("a note for me"));
    }

    #[test]
    fn test_unclosed_comment() {
        assert!(MarkdownRenderer::render("text <!-- never closed", ContentFormat::Markdown).is_err());
    }

    #[test]
    fn test_markdown_keeps_import_text() {
        let html = MarkdownRenderer::render("import this as text", ContentFormat::Markdown).unwrap();
        assert!(html.contains("<p>import this as text</p>"));
    }

    #[test]
    fn test_mdx_code_fences_kept() {
        let body = "import Chart from './chart'\n\n```js\nimport React from 'react'\n{/* inside code */}\nexport default App\n```\n\n~~~\nexport const x = 1\n~~~\n\nAfter {/* gone */}\n";
        let html = MarkdownRenderer::render(body, ContentFormat::Mdx).unwrap();
        assert!(html.contains("import React from 'react'"));
        assert!(html.contains("export default App"));
        assert!(html.contains("{/* inside code */}"));
        assert!(html.contains("export const x = 1"));
        assert!(!html.contains("Chart"));
        assert!(!html.contains("gone"));
        assert!(html.contains("<p>After"));
    }
}
