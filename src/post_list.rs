use std::fs;
use std::path::{Path, PathBuf};

use crate::error::ScanError;

pub const DEFAULT_POST_FILES: [&str; 2] = ["index.mdx", "index.md"];

/// One post folder found under the content root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostSource {
    pub name: String,
    pub dir: PathBuf,
    pub content_path: PathBuf,
}

pub struct PostList {
    pub root_dir: PathBuf,
    pub post_files: Vec<String>,
}

impl PostList {
    pub fn new(root_dir: impl Into<PathBuf>, post_files: &[String]) -> PostList {
        let post_files = if post_files.is_empty() {
            DEFAULT_POST_FILES.iter().map(|s| s.to_string()).collect()
        } else {
            post_files.to_vec()
        };

        PostList {
            root_dir: root_dir.into(),
            post_files,
        }
    }

    /// Every direct child directory of the root, ordered by name.
    pub fn retrieve_sources(&self) -> Result<Vec<PostSource>, ScanError> {
        let dirs = Self::list_dirs(&self.root_dir)?;
        let mut sources: Vec<PostSource> = dirs.into_iter()
            .map(|dir| {
                let name = dir.file_name()
                    .map(|n| n.to_string_lossy().to_string())
                    .unwrap_or_default();
                let content_path = self.content_file(&dir);
                PostSource {
                    name,
                    dir,
                    content_path,
                }
            })
            .collect();

        sources.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(sources)
    }

    fn list_dirs(posts_dir: &Path) -> Result<Vec<PathBuf>, ScanError> {
        let entries = fs::read_dir(posts_dir).map_err(|source| ScanError::Unreadable {
            path: posts_dir.to_path_buf(),
            source,
        })?;

        let mut dirs: Vec<PathBuf> = vec![];
        for entry in entries.flatten() {
            if let Ok(file_type) = entry.file_type() {
                if file_type.is_dir() {
                    dirs.push(entry.path());
                }
            }
        }
        Ok(dirs)
    }

    // Falls back to the first candidate so the parser can report it missing
    fn content_file(&self, dir: &Path) -> PathBuf {
        self.post_files.iter()
            .map(|name| dir.join(name))
            .find(|path| path.is_file())
            .unwrap_or_else(|| dir.join(&self.post_files[0]))
    }
}

/// Checks the root before scanning so a plain file gives a clear error.
pub fn scan_posts(root_dir: &Path, post_files: &[String]) -> Result<Vec<PostSource>, ScanError> {
    if root_dir.exists() && !root_dir.is_dir() {
        return Err(ScanError::NotADirectory(root_dir.to_path_buf()));
    }
    PostList::new(root_dir, post_files).retrieve_sources()
}
