use std::io;
use std::io::ErrorKind;

use spdlog::debug;

use crate::catalog::{CatalogEntry, PostCatalog};
use crate::config::Site;
use crate::content::content_file::ContentFile;
use crate::content::markdown_renderer::MarkdownRenderer;
use crate::theme::ThemeContext;
use crate::view::head::{HeadRenderer, PageHead};
use crate::view::layout::LayoutRenderer;
use crate::view::list_renderer::ListRenderer;
use crate::view::post_renderer::PostRenderer;
use crate::view::templates::Templates;

/// Everything a page needs besides its own data.
pub struct PageContext<'a> {
    pub site: &'a Site,
    pub templates: &'a Templates,
    pub theme: &'a ThemeContext,
    pub toggle_href: Option<&'a str>,
}

impl PageContext<'_> {
    fn wrap(&self, head: &PageHead, main: &str) -> io::Result<String> {
        let head = HeadRenderer::new(&self.templates.head)?.render(head);
        let layout = LayoutRenderer::new(&self.templates.layout)?;
        Ok(layout.render(self.site, self.theme, self.toggle_href, &head, main))
    }
}

pub fn render_home(ctx: &PageContext, catalog: &PostCatalog) -> io::Result<String> {
    let list = ListRenderer::new(&ctx.templates.home)?;
    let main = list.render(catalog, ctx.site);
    ctx.wrap(&PageHead::for_home(ctx.site, catalog), &main)
}

pub fn render_post(ctx: &PageContext, entry: &CatalogEntry) -> io::Result<String> {
    debug!("Rendering post {} from {}", entry.name, entry.source.display());
    let body = render_post_body(entry)?;

    let post = PostRenderer::new(&ctx.templates.post)?;
    let main = post.render(entry, &body);
    ctx.wrap(&PageHead::for_post(ctx.site, entry), &main)
}

/// The body is read again from disk, the catalog only keeps frontmatter.
pub fn render_post_body(entry: &CatalogEntry) -> io::Result<String> {
    let to_io = |e: crate::error::ParseError| io::Error::new(ErrorKind::InvalidData, e.to_string());

    let content_file = ContentFile::from_file(entry.name.clone(), entry.source.clone()).map_err(to_io)?;
    let (_matter, body) = content_file.frontmatter().map_err(to_io)?;
    MarkdownRenderer::render(body, content_file.format)
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::sync::Arc;

    use tempfile::TempDir;

    use crate::catalog::CatalogBuilder;
    use crate::test_data::{site, POST_DATA};
    use crate::theme::{MemoryPreferenceStore, ThemePreference};

    use super::*;

    fn catalog_with_post() -> (TempDir, PostCatalog) {
        let root = TempDir::new().unwrap();
        let dir = root.path().join("enhancing-ux");
        fs::create_dir(&dir).unwrap();
        fs::write(dir.join("index.mdx"), POST_DATA).unwrap();

        let catalog = CatalogBuilder::new(root.path(), &[]).build();
        (root, catalog)
    }

    #[test]
    fn test_render_home() {
        let (_root, catalog) = catalog_with_post();
        let site = site();
        let templates = Templates::builtin();
        let theme = ThemeContext::new(Arc::new(MemoryPreferenceStore::new()), ThemePreference::Dark);
        let ctx = PageContext { site: &site, templates: &templates, theme: &theme, toggle_href: Some("/theme/toggle") };

        let html = render_home(&ctx, &catalog).unwrap();
        assert!(html.contains("<title>Welcome to LeoNerd</title>"));
        assert!(html.contains(r#"data-theme="dark""#));
        assert!(html.contains(r#"href="/theme/toggle""#));
        assert!(html.contains(r#"<a href="/posts/enhancing-ux/">Enhancing UX and DX</a>"#));
        assert!(html.contains(r#"<img src="/posts/enhancing-ux/cover.webp""#));
    }

    #[test]
    fn test_render_post() {
        let (_root, catalog) = catalog_with_post();
        let site = site();
        let templates = Templates::builtin();
        let theme = ThemeContext::new(Arc::new(MemoryPreferenceStore::new()), ThemePreference::Light);
        let ctx = PageContext { site: &site, templates: &templates, theme: &theme, toggle_href: None };

        let entry = catalog.find("enhancing-ux").unwrap();
        let html = render_post(&ctx, entry).unwrap();
        assert!(html.contains("<title>Enhancing UX and DX</title>"));
        assert!(html.contains(r#"<meta property="og:image" content="https://leonerd.dev/posts/enhancing-ux/cover.webp" />"#));
        assert!(html.contains("<p>Intro paragraph.</p>"));
        assert!(html.contains("<h2>Details</h2>"));
        assert!(!html.contains("title: Enhancing"));
    }

    #[test]
    fn test_render_post_with_missing_file() {
        let (root, catalog) = catalog_with_post();
        let entry = catalog.find("enhancing-ux").unwrap().clone();
        fs::remove_file(root.path().join("enhancing-ux").join("index.mdx")).unwrap();
        assert!(render_post_body(&entry).is_err());
    }
}
