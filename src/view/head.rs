use std::io;
use std::io::ErrorKind;

use ramhorns::Template;

use crate::catalog::{CatalogEntry, PostCatalog};
use crate::config::Site;

pub const POST_IMAGE_SIZE: (u32, u32) = (1000, 600);
pub const LOGO_IMAGE_SIZE: (u32, u32) = (250, 250);

/// Document head values for one page: title, description and social preview.
#[derive(Debug, Clone, PartialEq, ramhorns::Content)]
pub struct PageHead {
    pub title: String,
    pub og_title: String,
    pub og_type: String,
    pub description: String,
    pub canonical_url: String,
    pub site_name: String,
    pub locale: String,
    pub logo: String,
    pub image_url: String,
    pub image_alt: String,
    pub image_width: u32,
    pub image_height: u32,
    pub has_twitter_site: bool,
    pub twitter_site: String,
    pub has_preload: bool,
    pub preload_image: String,
}

impl PageHead {
    pub fn for_post(site: &Site, entry: &CatalogEntry) -> PageHead {
        let matter = &entry.matter;
        let image_url = absolute_url(&site.origin, &resolve_asset(&entry.url, &matter.featured));
        let (image_width, image_height) = POST_IMAGE_SIZE;

        PageHead {
            title: matter.title.clone(),
            og_title: format!("{} - {}", site.name, matter.title),
            og_type: "article".to_string(),
            description: matter.excerpt.clone(),
            canonical_url: format!("{}/{}/", site.origin, entry.url),
            site_name: site.name.clone(),
            locale: site.locale.clone(),
            logo: site.logo.clone(),
            image_alt: format!("Image of {}'s Post - {}", site.name, matter.title),
            image_width,
            image_height,
            has_twitter_site: site.twitter.is_some(),
            twitter_site: site.twitter.clone().unwrap_or_default(),
            has_preload: true,
            preload_image: image_url.clone(),
            image_url,
        }
    }

    /// The home page previews the site logo and preloads the cover of the latest post.
    pub fn for_home(site: &Site, catalog: &PostCatalog) -> PageHead {
        let title = format!("Welcome to {}", site.name);
        let (image_width, image_height) = LOGO_IMAGE_SIZE;
        let preload_image = catalog.entries().first()
            .map(|entry| absolute_url(&site.origin, &resolve_asset(&entry.url, &entry.matter.featured)))
            .unwrap_or_default();

        PageHead {
            og_title: title.clone(),
            title,
            og_type: "website".to_string(),
            description: site.description.clone(),
            canonical_url: format!("{}/", site.origin),
            site_name: site.name.clone(),
            locale: site.locale.clone(),
            logo: site.logo.clone(),
            image_url: absolute_url(&site.origin, &site.logo),
            image_alt: format!("Image of {}", site.name),
            image_width,
            image_height,
            has_twitter_site: site.twitter.is_some(),
            twitter_site: site.twitter.clone().unwrap_or_default(),
            has_preload: !preload_image.is_empty(),
            preload_image,
        }
    }
}

pub struct HeadRenderer<'a> {
    pub template: Template<'a>,
}

impl HeadRenderer<'_> {
    pub fn new(head_tpl_src: &str) -> io::Result<HeadRenderer> {
        let template = match Template::new(head_tpl_src) {
            Ok(x) => x,
            Err(e) => {
                return Err(io::Error::new(ErrorKind::InvalidInput, format!("Error parsing head template: {}", e)));
            }
        };

        Ok(HeadRenderer {
            template,
        })
    }

    pub fn render(&self, head: &PageHead) -> String {
        self.template.render(head)
    }
}

/// Site-relative path of an image referenced from a post's frontmatter.
/// Relative paths live next to the post, absolute paths and full URLs are kept.
pub fn resolve_asset(post_url: &str, path: &str) -> String {
    if path.starts_with('/') || path.contains("://") {
        return path.to_string();
    }
    let relative = path.trim_start_matches("./");
    format!("/{}/{}", post_url.trim_matches('/'), relative)
}

pub fn absolute_url(origin: &str, path: &str) -> String {
    if path.contains("://") {
        path.to_string()
    } else {
        format!("{}{}", origin.trim_end_matches('/'), path)
    }
}

#[cfg(test)]
mod tests {
    use crate::test_data::{entry, site};
    use crate::view::templates::Templates;

    use super::*;

    fn post(featured: &str) -> CatalogEntry {
        let mut post = entry("enhancing-ux", "Enhancing UX", "2023-08-12", featured);
        post.matter.excerpt = "What i18n changes".to_string();
        post
    }

    #[test]
    fn test_post_head() {
        let head = PageHead::for_post(&site(), &post("/posts/enhancing-ux/cover.webp"));
        assert_eq!(head.title, "Enhancing UX");
        assert_eq!(head.og_title, "LeoNerd - Enhancing UX");
        assert_eq!(head.description, "What i18n changes");
        assert_eq!(head.canonical_url, "https://leonerd.dev/posts/enhancing-ux/");
        assert_eq!(head.image_url, "https://leonerd.dev/posts/enhancing-ux/cover.webp");
        assert_eq!(head.image_alt, "Image of LeoNerd's Post - Enhancing UX");
        assert_eq!((head.image_width, head.image_height), (1000, 600));
        assert_eq!(head.twitter_site, "@leonerd");
    }

    #[test]
    fn test_post_head_relative_and_remote_images() {
        let head = PageHead::for_post(&site(), &post("./cover.webp"));
        assert_eq!(head.image_url, "https://leonerd.dev/posts/enhancing-ux/cover.webp");

        let head = PageHead::for_post(&site(), &post("https://cdn.example.com/c.webp"));
        assert_eq!(head.image_url, "https://cdn.example.com/c.webp");
    }

    #[test]
    fn test_home_head() {
        let head = PageHead::for_home(&site(), &PostCatalog::default());
        assert_eq!(head.title, "Welcome to LeoNerd");
        assert_eq!(head.image_url, "https://leonerd.dev/public/icon-logo.webp");
        assert_eq!((head.image_width, head.image_height), (250, 250));
        assert!(!head.has_preload);

        let catalog = PostCatalog::from_entries(vec![post("cover.webp")]);
        let head = PageHead::for_home(&site(), &catalog);
        assert!(head.has_preload);
        assert_eq!(head.preload_image, "https://leonerd.dev/posts/enhancing-ux/cover.webp");
    }

    #[test]
    fn test_render_head() {
        let renderer = HeadRenderer::new("<title>{{title}}</title>{{#has_twitter_site}}<meta content=\"{{twitter_site}}\">{{/has_twitter_site}}").unwrap();
        let mut head = PageHead::for_post(&site(), &post("cover.webp"));
        head.title = "<b>Tags</b>".to_string();
        let html = renderer.render(&head);
        assert_eq!(html, "<title>&lt;b&gt;Tags&lt;/b&gt;</title><meta content=\"@leonerd\">");

        head.has_twitter_site = false;
        assert_eq!(renderer.render(&head), "<title>&lt;b&gt;Tags&lt;/b&gt;</title>");
    }

    #[test]
    fn test_builtin_head_template() {
        let templates = Templates::builtin();
        let renderer = HeadRenderer::new(templates.head.as_str()).unwrap();
        let html = renderer.render(&PageHead::for_post(&site(), &post("cover.webp")));
        assert!(html.contains(r#"<meta property="og:image:width" content="1000" />"#));
        assert!(html.contains(r#"<meta name="twitter:site" content="@leonerd" />"#));
        assert!(html.contains(r#"<link rel="canonical" href="https://leonerd.dev/posts/enhancing-ux/" />"#));
    }

    #[test]
    fn test_resolve_asset() {
        assert_eq!(resolve_asset("posts/a", "cover.webp"), "/posts/a/cover.webp");
        assert_eq!(resolve_asset("posts/a", "./img/cover.webp"), "/posts/a/img/cover.webp");
        assert_eq!(resolve_asset("posts/a", "/public/x.webp"), "/public/x.webp");
    }
}
