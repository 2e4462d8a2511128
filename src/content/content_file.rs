use std::fs;
use std::path::PathBuf;

use crate::content::content_format::ContentFormat;
use crate::content::parsing_utils::split_frontmatter;
use crate::content::RawFrontmatter;
use crate::error::ParseError;
use crate::post_list::PostSource;

pub struct ContentFile {
    pub link: String,
    pub file_path: PathBuf,
    pub format: ContentFormat,
    pub raw_content: String,
}

impl ContentFile {
    pub fn from_source(source: &PostSource) -> Result<ContentFile, ParseError> {
        Self::from_file(source.name.clone(), source.content_path.clone())
    }

    pub fn from_file(link: String, file_path: PathBuf) -> Result<ContentFile, ParseError> {
        let format = match ContentFormat::guess(&file_path) {
            None => return Err(ParseError::UnsupportedFormat(file_path)),
            Some(format) => format,
        };

        let raw_content = match fs::read_to_string(&file_path) {
            Ok(content) => content,
            Err(source) => return Err(ParseError::Unreadable { path: file_path, source }),
        };

        Ok(ContentFile {
            link,
            file_path,
            format,
            raw_content,
        })
    }

    /// The metadata block and the body with the block stripped.
    pub fn frontmatter(&self) -> Result<(RawFrontmatter, &str), ParseError> {
        split_frontmatter(&self.file_path, &self.raw_content)
    }
}
