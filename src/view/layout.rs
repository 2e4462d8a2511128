use std::io;
use std::io::ErrorKind;

use ramhorns::Template;

use crate::config::Site;
use crate::theme::ThemeContext;

#[derive(ramhorns::Content)]
struct LayoutPage<'a> {
    lang: String,
    theme: &'static str,
    next_theme: &'static str,
    has_toggle: bool,
    toggle_href: &'a str,
    head: &'a str,
    main: &'a str,
    site_name: &'a str,
    logo: &'a str,
    has_github: bool,
    github: &'a str,
    has_linkedin: bool,
    linkedin: &'a str,
    copyright: &'a str,
}

/// Document shell shared by every page.
pub struct LayoutRenderer<'a> {
    pub template: Template<'a>,
}

impl LayoutRenderer<'_> {
    pub fn new(layout_tpl_src: &str) -> io::Result<LayoutRenderer> {
        let template = match Template::new(layout_tpl_src) {
            Ok(x) => x,
            Err(e) => {
                return Err(io::Error::new(ErrorKind::InvalidInput, format!("Error parsing layout template: {}", e)));
            }
        };

        Ok(LayoutRenderer {
            template,
        })
    }

    /// `head` and `main` are already rendered html. The toggle link is left out when
    /// `toggle_href` is `None`, as static pages have nothing to serve it.
    pub fn render(&self, site: &Site, theme: &ThemeContext, toggle_href: Option<&str>, head: &str, main: &str) -> String {
        let current = theme.theme();
        self.template.render(&LayoutPage {
            lang: html_lang(&site.locale),
            theme: current.as_str(),
            next_theme: current.toggled().as_str(),
            has_toggle: toggle_href.is_some(),
            toggle_href: toggle_href.unwrap_or_default(),
            head,
            main,
            site_name: &site.name,
            logo: &site.logo,
            has_github: site.github.is_some(),
            github: site.github.as_deref().unwrap_or_default(),
            has_linkedin: site.linkedin.is_some(),
            linkedin: site.linkedin.as_deref().unwrap_or_default(),
            copyright: site.copyright.as_deref().unwrap_or_default(),
        })
    }
}

/// `en_US` style locales become `en-US` language tags.
fn html_lang(locale: &str) -> String {
    match locale.split('.').next() {
        Some(tag) if !tag.is_empty() => tag.replace('_', "-"),
        _ => "en".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crate::test_data::site;
    use crate::theme::{MemoryPreferenceStore, ThemePreference};
    use crate::view::templates::Templates;

    use super::*;

    #[test]
    fn test_render_layout() {
        let renderer = LayoutRenderer::new("{{theme}}>{{next_theme}}|{{#has_toggle}}{{toggle_href}}|{{/has_toggle}}{{{head}}}|{{{main}}}").unwrap();
        let ctx = ThemeContext::new(Arc::new(MemoryPreferenceStore::new()), ThemePreference::Dark);

        let html = renderer.render(&site(), &ctx, Some("/theme/toggle"), "<title>t</title>", "<main></main>");
        assert_eq!(html, "dark>light|/theme/toggle|<title>t</title>|<main></main>");

        let html = renderer.render(&site(), &ctx, None, "h", "m");
        assert_eq!(html, "dark>light|h|m");
    }

    #[test]
    fn test_builtin_layout() {
        let templates = Templates::builtin();
        let renderer = LayoutRenderer::new(&templates.layout).unwrap();
        let ctx = ThemeContext::new(Arc::new(MemoryPreferenceStore::new()), ThemePreference::Light);

        let html = renderer.render(&site(), &ctx, None, "<title>t</title>", "<main>m</main>");
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains(r#"<html lang="en-US" data-theme="light">"#));
        assert!(html.contains(r#"<a href="https://github.com/leonerd" target="_blank">GitHub</a>"#));
        assert!(!html.contains("LinkedIn"));
        assert!(!html.contains("theme-toggle"));
        assert!(html.contains("© 2023 LeoNerd."));
    }

    #[test]
    fn test_lang_from_locale() {
        let renderer = LayoutRenderer::new("{{lang}}").unwrap();
        let ctx = ThemeContext::new(Arc::new(MemoryPreferenceStore::new()), ThemePreference::Light);

        let mut site = site();
        site.locale = "pt_BR".to_string();
        assert_eq!(renderer.render(&site, &ctx, None, "", ""), "pt-BR");

        site.locale = "de_DE.UTF-8".to_string();
        assert_eq!(renderer.render(&site, &ctx, None, "", ""), "de-DE");

        site.locale = String::new();
        assert_eq!(renderer.render(&site, &ctx, None, "", ""), "en");
    }
}
