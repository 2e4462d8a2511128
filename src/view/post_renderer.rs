use std::io;
use std::io::ErrorKind;

use ramhorns::Template;

use crate::catalog::CatalogEntry;
use crate::view::head::resolve_asset;

#[derive(ramhorns::Content)]
struct ViewTag<'a> {
    tag: &'a str,
}

#[derive(ramhorns::Content)]
struct ViewItem<'a> {
    title: &'a str,
    date: &'a str,
    tags: Vec<ViewTag<'a>>,
    cover: String,
    transition_name: String,
    body: &'a str,
}

pub struct PostRenderer<'a> {
    pub template: Template<'a>,
}

impl PostRenderer<'_> {
    pub fn new(view_tpl_src: &str) -> io::Result<PostRenderer> {
        let template = match Template::new(view_tpl_src) {
            Ok(x) => x,
            Err(e) => {
                return Err(io::Error::new(ErrorKind::InvalidInput, format!("Error parsing post view template: {}", e)));
            }
        };

        Ok(PostRenderer {
            template,
        })
    }

    /// `body` is the post rendered to html and is inserted unescaped.
    pub fn render(&self, entry: &CatalogEntry, body: &str) -> String {
        let matter = &entry.matter;
        let tags: Vec<ViewTag> = matter.tags.iter().map(|t| ViewTag { tag: t.as_str() }).collect();

        self.template.render(&ViewItem {
            title: &matter.title,
            date: &matter.date,
            tags,
            cover: resolve_asset(&entry.url, &matter.featured),
            transition_name: matter.title.split_whitespace().collect::<Vec<_>>().join("-"),
            body,
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::test_data::entry;
    use crate::view::templates::Templates;

    use super::*;

    #[test]
    fn render_view() {
        let template_src = "TITLE=[{{title}}] DATE=[{{date}}] TAGS=[{{#tags}}({{tag}}){{/tags}}] COVER=[{{cover}}] VT=[{{transition_name}}] BODY=[{{{body}}}]";
        let post_renderer = PostRenderer::new(template_src).unwrap();

        let mut post = entry("hello", "Hello <big> world", "2024-01-02", "./cover.webp");
        post.matter.tags = vec!["<rust>".to_string(), "programming".to_string()];

        let res = post_renderer.render(&post, "<p>post-content</p>");
        assert_eq!(res, "TITLE=[Hello &lt;big&gt; world] DATE=[2024-01-02] TAGS=[(&lt;rust&gt;)(programming)] COVER=[/posts/hello/cover.webp] VT=[Hello-&lt;big&gt;-world] BODY=[<p>post-content</p>]");
    }

    #[test]
    fn render_builtin_template() {
        let templates = Templates::builtin();
        let post_renderer = PostRenderer::new(&templates.post).unwrap();
        let res = post_renderer.render(&entry("hello", "Hello", "2024-01-02", "/posts/hello/c.webp"), "<p>body</p>");
        assert!(res.contains(r#"src="/posts/hello/c.webp""#));
        assert!(res.contains(r#"width="1000" height="600""#));
        assert!(res.contains("<p>body</p>"));
        assert!(res.contains("#rust"));
    }
}
