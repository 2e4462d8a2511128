use std::path::Path;

use lazy_static::lazy_static;
use regex::Regex;
use serde_yaml::{Mapping, Value};

use crate::content::RawFrontmatter;
use crate::error::ParseError;

lazy_static! {
    static ref OPEN_FENCE: Regex = Regex::new(r"^---\s*$").unwrap();
    static ref CLOSE_FENCE: Regex = Regex::new(r"^(---|\.\.\.)\s*$").unwrap();
}

/// Example of post
/// ---
/// title: Enhancing UX and DX
/// excerpt: What i18n workflows change for users and developers
/// date: 2023-08-12
/// tags: [i18n, dx]
/// featured: /posts/enhancing-ux-and-dx/cover.webp
/// ---
///
/// Body of the post
pub fn split_frontmatter<'a>(file_name: &Path, content: &'a str) -> Result<(RawFrontmatter, &'a str), ParseError> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);

    let mut offset = 0;
    let mut lines = content.split_inclusive('\n');

    // Leading empty lines are ok
    let opening = loop {
        match lines.next() {
            Some(line) => {
                offset += line.len();
                if !line.trim().is_empty() {
                    break line;
                }
            }
            None => return Err(ParseError::MissingBlock(file_name.to_path_buf())),
        }
    };

    if !OPEN_FENCE.is_match(opening.trim_end_matches(['\r', '\n'])) {
        return Err(ParseError::MissingBlock(file_name.to_path_buf()));
    }

    let block_start = offset;
    let block_end = loop {
        match lines.next() {
            Some(line) => {
                let end = offset;
                offset += line.len();
                if CLOSE_FENCE.is_match(line.trim_end_matches(['\r', '\n'])) {
                    break end;
                }
            }
            None => return Err(ParseError::Unterminated(file_name.to_path_buf())),
        }
    };

    let yaml = &content[block_start..block_end];
    let body = &content[offset..];

    let mapping = parse_yaml_block(file_name, yaml)?;
    Ok((RawFrontmatter(mapping), body))
}

fn parse_yaml_block(file_name: &Path, yaml: &str) -> Result<Mapping, ParseError> {
    if yaml.trim().is_empty() {
        return Ok(Mapping::new());
    }

    let value: Value = serde_yaml::from_str(yaml).map_err(|source| ParseError::Yaml {
        path: file_name.to_path_buf(),
        source,
    })?;

    match value {
        Value::Mapping(mapping) => Ok(mapping),
        Value::Null => Ok(Mapping::new()),
        _ => Err(ParseError::NotAMapping(file_name.to_path_buf())),
    }
}

/// Drops html comments from a markdown body. Fails on a comment that is never closed.
pub fn remove_comments(md_post: &str) -> Result<String, String> {
    let mut res: String = String::new();
    let mut slice = Some(md_post);

    let start_comment = "<!--";
    let end_comment = "-->";

    while let Some(block) = slice {
        let md_buf: &str = match block.find(start_comment) {
            Some(start) => {
                let to_render: &str = &block[0..start];

                let next: &str = &block[(start + start_comment.len())..];
                match next.find(end_comment) {
                    Some(end) => {
                        slice = Some(&next[(end + end_comment.len())..]);
                    }
                    None => return Err("Error finding end of comment".to_string()),
                };

                to_render
            }
            None => {
                slice = None;
                block
            }
        };
        res.push_str(md_buf);
    }

    Ok(res)
}
