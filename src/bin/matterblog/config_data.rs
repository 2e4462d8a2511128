use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

const CONFIG_SAMPLE: &str = r#"[site]
name = "My Blog"
# Scheme and host, used for canonical links, social images and the rss feed
origin = "https://example.com"
description = "Notes about things"
author = "Your Name"
# avatar = "/public/avatar.webp"
# logo = "/public/icon-logo.webp"
# locale = "en_US"
# twitter = "@handle"
# github = "https://github.com/handle"
# linkedin = "https://www.linkedin.com/in/handle"
copyright = "© {{YEAR}} Your Name."
# light or dark
default_theme = "light"

# For the file locations, If you want it to be relative to the executable directory
# use ${exe_dir}/location
[paths]
posts_dir = "posts"
public_dir = "public"
out_dir = "out"
# Files here replace the built-in layout.tpl, head.tpl, home.tpl and post.tpl
# template_dir = "templates"

# Content file names looked up in each post directory, first match wins
[defaults]
post_files = ["index.mdx", "index.md"]

[server]
address = "0.0.0.0"
port = 8001

# Remove this section to log to stdout only
[log]
level = "Info"
log_to_console = true
"#;

pub(crate) fn write_sample_cfg(file_path: &Path) -> Result<()> {
    fs::write(file_path, get_sample_cfg())
        .with_context(|| format!("Unable to write {}", file_path.display()))
}

fn get_sample_cfg() -> String {
    let year = chrono::Local::now().format("%Y").to_string();
    CONFIG_SAMPLE.replace("{{YEAR}}", &year)
}
