//! Static rendition of the site, written to an output directory.
//!
//! ```text
//! out/index.html
//! out/rss.xml
//! out/posts/<name>/index.html    plus every other file of the post directory
//! out/public/*
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use spdlog::{debug, info, warn};

use crate::catalog::{CatalogBuilder, CatalogEntry, PostCatalog};
use crate::config::Config;
use crate::post_processor::{render_home, render_post, PageContext};
use crate::theme::{MemoryPreferenceStore, ThemeContext};
use crate::view::rss_renderer::RssChannel;
use crate::view::templates::Templates;

pub struct BuildSummary {
    pub posts: usize,
    pub ignored: usize,
}

pub fn build_site(config: &Config, out_dir: &Path) -> Result<BuildSummary> {
    let templates = Templates::load(config.paths.template_dir.as_deref())
        .context("Unable to load templates")?;
    let report = CatalogBuilder::new(&config.paths.posts_dir, &config.post_files())
        .build_report()
        .with_context(|| format!("Unable to scan {}", config.paths.posts_dir.display()))?;
    let catalog = report.catalog;

    fs::create_dir_all(out_dir)
        .with_context(|| format!("Unable to create {}", out_dir.display()))?;

    // Static pages carry the configured theme and no toggle
    let theme = ThemeContext::new(Arc::new(MemoryPreferenceStore::new()), config.site.default_theme);
    let ctx = PageContext {
        site: &config.site,
        templates: &templates,
        theme: &theme,
        toggle_href: None,
    };

    // Posts whose body fails to render are dropped like invalid sources,
    // so the home page and the feed never link to a missing page
    let mut published = Vec::with_capacity(catalog.len());
    let mut ignored = report.failures.len();
    for entry in catalog.iter() {
        let html = match render_post(&ctx, entry) {
            Ok(html) => html,
            Err(e) => {
                warn!("[IGNORE] unable to render post {}: {}", entry.source.display(), e);
                ignored += 1;
                continue;
            }
        };
        let post_dir = out_dir.join(&entry.url);
        fs::create_dir_all(&post_dir)
            .with_context(|| format!("Unable to create {}", post_dir.display()))?;
        write_file(&post_dir.join("index.html"), html.as_bytes())?;
        copy_post_assets(entry, &post_dir)?;
        published.push(entry.clone());
    }
    let catalog = PostCatalog::from_entries(published);

    let home = render_home(&ctx, &catalog).context("Unable to render home page")?;
    write_file(&out_dir.join("index.html"), home.as_bytes())?;

    let channel = RssChannel {
        ch_title: &config.site.name,
        ch_link: &config.site.origin,
        ch_desc: &config.site.description,
    };
    let xml = channel.render(&catalog).context("Unable to render rss feed")?;
    write_file(&out_dir.join("rss.xml"), &xml)?;

    if config.paths.public_dir.is_dir() {
        copy_dir(&config.paths.public_dir, &out_dir.join("public"))?;
    } else {
        warn!("Public dir {} not found, skipping", config.paths.public_dir.display());
    }

    info!("Site written to {}: {} posts, {} ignored", out_dir.display(), catalog.len(), ignored);
    Ok(BuildSummary {
        posts: catalog.len(),
        ignored,
    })
}

fn write_file(path: &Path, content: &[u8]) -> Result<()> {
    debug!("Writing {}", path.display());
    fs::write(path, content).with_context(|| format!("Unable to write {}", path.display()))
}

/// Images and other files next to the content file. The content file itself is not published.
fn copy_post_assets(entry: &CatalogEntry, post_out_dir: &Path) -> Result<()> {
    let Some(post_dir) = entry.source.parent() else {
        return Ok(());
    };

    for dir_entry in fs::read_dir(post_dir).with_context(|| format!("Unable to read {}", post_dir.display()))? {
        let path = dir_entry?.path();
        if path == entry.source {
            continue;
        }
        copy_path(&path, post_out_dir)?;
    }
    Ok(())
}

fn copy_dir(from: &Path, to: &Path) -> Result<()> {
    fs::create_dir_all(to).with_context(|| format!("Unable to create {}", to.display()))?;
    for dir_entry in fs::read_dir(from).with_context(|| format!("Unable to read {}", from.display()))? {
        copy_path(&dir_entry?.path(), to)?;
    }
    Ok(())
}

fn copy_path(path: &Path, to_dir: &Path) -> Result<()> {
    let Some(file_name) = path.file_name() else {
        return Ok(());
    };
    let target: PathBuf = to_dir.join(file_name);

    if path.is_dir() {
        copy_dir(path, &target)
    } else {
        fs::copy(path, &target)
            .with_context(|| format!("Unable to copy {} to {}", path.display(), target.display()))?;
        Ok(())
    }
}
