use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::NaiveDateTime;
use rayon::prelude::*;
use serde::Serialize;
use spdlog::{debug, error, info, warn, Logger};

use crate::content::content_file::ContentFile;
use crate::content::matter::{validate, PostMatter};
use crate::error::{ScanError, SourceError};
use crate::post_list::{scan_posts, PostSource};
use crate::text_utils::parse_post_date;

pub const POST_URL_PREFIX: &str = "posts/";

/// A validated post and the link it is served under.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CatalogEntry {
    #[serde(flatten)]
    pub matter: PostMatter,
    pub url: String,
    #[serde(skip)]
    pub name: String,
    #[serde(skip)]
    pub source: PathBuf,
    #[serde(skip)]
    pub parsed_date: Option<NaiveDateTime>,
}

/// Posts ordered from the most recent to the oldest.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct PostCatalog {
    entries: Vec<CatalogEntry>,
}

impl PostCatalog {
    pub fn from_entries(mut entries: Vec<CatalogEntry>) -> PostCatalog {
        sort_by_date(&mut entries);
        PostCatalog { entries }
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CatalogEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn find(&self, name: &str) -> Option<&CatalogEntry> {
        self.entries.iter().find(|entry| entry.name == name)
    }
}

impl<'a> IntoIterator for &'a PostCatalog {
    type Item = &'a CatalogEntry;
    type IntoIter = std::slice::Iter<'a, CatalogEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// A source that did not make it into the catalog.
#[derive(Debug)]
pub struct SourceFailure {
    pub path: PathBuf,
    pub error: SourceError,
}

pub struct CatalogReport {
    pub catalog: PostCatalog,
    pub failures: Vec<SourceFailure>,
}

pub struct CatalogBuilder {
    root_dir: PathBuf,
    post_files: Vec<String>,
    logger: Option<Arc<Logger>>,
}

impl CatalogBuilder {
    pub fn new(root_dir: impl Into<PathBuf>, post_files: &[String]) -> CatalogBuilder {
        CatalogBuilder {
            root_dir: root_dir.into(),
            post_files: post_files.to_vec(),
            logger: None,
        }
    }

    /// Logs to `logger` instead of the default logger.
    pub fn with_logger(mut self, logger: Arc<Logger>) -> CatalogBuilder {
        self.logger = Some(logger);
        self
    }

    fn logger(&self) -> Arc<Logger> {
        self.logger.clone().unwrap_or_else(spdlog::default_logger)
    }

    pub fn root_dir(&self) -> &Path {
        &self.root_dir
    }

    /// Never fails: an unreadable content root gives an empty catalog.
    pub fn build(&self) -> PostCatalog {
        match self.try_build() {
            Ok(catalog) => catalog,
            Err(err) => {
                error!(logger: self.logger(), "Unable to scan posts, using an empty catalog: {}", err);
                PostCatalog::default()
            }
        }
    }

    pub fn try_build(&self) -> Result<PostCatalog, ScanError> {
        self.build_report().map(|report| report.catalog)
    }

    /// Builds the catalog and keeps the dropped sources. Each failure is logged once here.
    pub fn build_report(&self) -> Result<CatalogReport, ScanError> {
        let sources = scan_posts(&self.root_dir, &self.post_files)?;
        debug!(logger: self.logger(), "Found {} post directories in {}", sources.len(), self.root_dir.display());

        // Ordered collect, so results keep the scan order whatever finishes first
        let results: Vec<(PathBuf, Result<CatalogEntry, SourceError>)> = sources.par_iter()
            .map(|source| (source.content_path.clone(), process_source(source)))
            .collect();

        let mut entries = Vec::with_capacity(results.len());
        let mut failures = vec![];
        for (path, result) in results {
            match result {
                Ok(entry) => entries.push(entry),
                Err(error) => {
                    warn!(logger: self.logger(), "[IGNORE] invalid post {}: {}", path.display(), error);
                    failures.push(SourceFailure { path, error });
                }
            }
        }

        let catalog = PostCatalog::from_entries(entries);
        info!(logger: self.logger(), "Post catalog ready: {} posts, {} ignored", catalog.len(), failures.len());

        Ok(CatalogReport {
            catalog,
            failures,
        })
    }
}

pub fn process_source(source: &PostSource) -> Result<CatalogEntry, SourceError> {
    let content_file = ContentFile::from_source(source)?;
    let (raw, _body) = content_file.frontmatter()?;
    let matter = validate(&raw)?;
    Ok(CatalogEntry::new(source, matter))
}

impl CatalogEntry {
    pub fn new(source: &PostSource, matter: PostMatter) -> CatalogEntry {
        let parsed_date = parse_post_date(&matter.date);
        CatalogEntry {
            url: post_url(&source.name),
            name: source.name.clone(),
            source: source.content_path.clone(),
            parsed_date,
            matter,
        }
    }
}

pub fn post_url(name: &str) -> String {
    format!("{}{}", POST_URL_PREFIX, name)
}

// Stable: equal dates keep their order, unparsable dates go last
fn sort_by_date(entries: &mut [CatalogEntry]) {
    entries.sort_by(|a, b| {
        b.parsed_date.cmp(&a.parsed_date)
    });
}
