use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// The content root could not be listed. Fatal for a whole catalog build.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("unable to list content root {}: {source}", path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("content root {} is not a directory", .0.display())]
    NotADirectory(PathBuf),
}

/// A single post source could not be read or has no usable metadata block.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("unable to read {}: {source}", path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("unsupported content file {}", .0.display())]
    UnsupportedFormat(PathBuf),

    #[error("no frontmatter block found in {}", .0.display())]
    MissingBlock(PathBuf),

    #[error("frontmatter block is not closed in {}", .0.display())]
    Unterminated(PathBuf),

    #[error("invalid frontmatter yaml in {}: {source}", path.display())]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("frontmatter in {} is not a key/value mapping", .0.display())]
    NotAMapping(PathBuf),
}

/// Frontmatter that does not match the post schema. Carries one reason per offending field.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid frontmatter: {}", .reasons.join("; "))]
pub struct ValidationError {
    pub reasons: Vec<String>,
}

/// Why a single source was dropped from the catalog.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_message() {
        let err = ValidationError {
            reasons: vec!["`title` is missing".to_string(), "`tags` must be a list of text, found text".to_string()],
        };
        assert_eq!(err.to_string(), "invalid frontmatter: `title` is missing; `tags` must be a list of text, found text");

        let err: SourceError = err.into();
        assert!(err.to_string().starts_with("invalid frontmatter: "));
    }
}
