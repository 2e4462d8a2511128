use std::path::Path;
use std::{fs, io};

const LAYOUT_TPL: &str = include_str!("../../templates/layout.tpl");
const HEAD_TPL: &str = include_str!("../../templates/head.tpl");
const HOME_TPL: &str = include_str!("../../templates/home.tpl");
const POST_TPL: &str = include_str!("../../templates/post.tpl");

/// Template sources. Files found in the template directory replace the built-in ones.
pub struct Templates {
    pub layout: String,
    pub head: String,
    pub home: String,
    pub post: String,
}

impl Templates {
    pub fn builtin() -> Templates {
        Templates {
            layout: LAYOUT_TPL.to_string(),
            head: HEAD_TPL.to_string(),
            home: HOME_TPL.to_string(),
            post: POST_TPL.to_string(),
        }
    }

    pub fn load(template_dir: Option<&Path>) -> io::Result<Templates> {
        let Some(dir) = template_dir else {
            return Ok(Self::builtin());
        };

        Ok(Templates {
            layout: read_template(dir, "layout.tpl", LAYOUT_TPL)?,
            head: read_template(dir, "head.tpl", HEAD_TPL)?,
            home: read_template(dir, "home.tpl", HOME_TPL)?,
            post: read_template(dir, "post.tpl", POST_TPL)?,
        })
    }
}

fn read_template(tpl_dir: &Path, file_name: &str, fallback: &str) -> io::Result<String> {
    let full_path = tpl_dir.join(file_name);
    if full_path.is_file() {
        fs::read_to_string(full_path)
    } else {
        Ok(fallback.to_string())
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_override_single_template() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("home.tpl"), "custom {{#cards}}{{title}}{{/cards}}").unwrap();

        let templates = Templates::load(Some(dir.path())).unwrap();
        assert_eq!(templates.home, "custom {{#cards}}{{title}}{{/cards}}");
        assert_eq!(templates.post, POST_TPL);
    }

    #[test]
    fn test_no_dir_is_builtin() {
        let templates = Templates::load(None).unwrap();
        assert_eq!(templates.layout, LAYOUT_TPL);
    }
}
