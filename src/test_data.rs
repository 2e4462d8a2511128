use std::path::PathBuf;

use crate::catalog::{post_url, CatalogEntry};
use crate::config::Site;
use crate::content::matter::PostMatter;
use crate::text_utils::parse_post_date;
use crate::theme::ThemePreference;

pub const POST_DATA: &str = r##"---
title: Enhancing UX and DX
excerpt: What an i18n workflow changes for users and developers
date: "2023-08-12"
tags: [i18n, dx]
featured: ./cover.webp
---

Intro paragraph.

<!-- more -->

## Details

The rest of the post.
"##;

pub fn site() -> Site {
    Site {
        name: "LeoNerd".to_string(),
        origin: "https://leonerd.dev".to_string(),
        description: "Explore LeoNerd's World".to_string(),
        author: "Leo Lin".to_string(),
        avatar: "/public/avatar.webp".to_string(),
        logo: "/public/icon-logo.webp".to_string(),
        locale: "en_US".to_string(),
        twitter: Some("@leonerd".to_string()),
        github: Some("https://github.com/leonerd".to_string()),
        linkedin: None,
        copyright: Some("© 2023 LeoNerd.".to_string()),
        default_theme: ThemePreference::Light,
    }
}

pub fn entry(name: &str, title: &str, date: &str, featured: &str) -> CatalogEntry {
    CatalogEntry {
        matter: PostMatter {
            title: title.to_string(),
            excerpt: format!("About {}", title),
            date: date.to_string(),
            tags: vec!["rust".to_string()],
            featured: featured.to_string(),
        },
        url: post_url(name),
        name: name.to_string(),
        source: PathBuf::from(format!("posts/{}/index.mdx", name)),
        parsed_date: parse_post_date(date),
    }
}
