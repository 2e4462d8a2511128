use std::io;
use std::io::ErrorKind;

use ramhorns::Template;

use crate::catalog::{CatalogEntry, PostCatalog};
use crate::config::Site;
use crate::view::head::resolve_asset;

#[derive(ramhorns::Content)]
struct HomePage {
    cards: Vec<PostCard>,
}

#[derive(ramhorns::Content)]
struct PostCard {
    large: bool,
    href: String,
    image: String,
    title: String,
    excerpt: String,
    date: String,
    author: String,
    avatar: String,
}

impl PostCard {
    fn from(entry: &CatalogEntry, site: &Site, large: bool) -> PostCard {
        PostCard {
            large,
            href: format!("/{}/", entry.url),
            image: resolve_asset(&entry.url, &entry.matter.featured),
            title: entry.matter.title.clone(),
            excerpt: entry.matter.excerpt.clone(),
            date: entry.matter.date.clone(),
            author: site.author.clone(),
            avatar: site.avatar.clone(),
        }
    }
}

/// Renders the catalog as a grid of cards, the latest post first and larger.
pub struct ListRenderer<'a> {
    pub template: Template<'a>,
}

impl ListRenderer<'_> {
    pub fn new(list_tpl_src: &str) -> io::Result<ListRenderer> {
        let template = match Template::new(list_tpl_src) {
            Ok(x) => x,
            Err(e) => {
                return Err(io::Error::new(ErrorKind::InvalidInput, format!("Error parsing list template: {}", e)));
            }
        };

        Ok(ListRenderer {
            template,
        })
    }

    pub fn render(&self, catalog: &PostCatalog, site: &Site) -> String {
        let cards = catalog.iter()
            .enumerate()
            .map(|(idx, entry)| PostCard::from(entry, site, idx == 0))
            .collect();

        self.template.render(&HomePage { cards })
    }
}
