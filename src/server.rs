use std::io;
use std::path::Path;
use std::sync::Arc;

use ntex::http::Uri;
use ntex::web;
use ntex::web::HttpRequest;
use ntex_files::NamedFile;
use spdlog::{error, info};

use crate::catalog::CatalogBuilder;
use crate::config::Config;
use crate::post_processor::{render_home, render_post, PageContext};
use crate::theme::{MemoryPreferenceStore, ThemeContext, THEME_STORAGE_KEY};
use crate::view::rss_renderer::RssChannel;
use crate::view::templates::Templates;

const TOGGLE_HREF: &str = "/theme/toggle";
const THEME_COOKIE_MAX_AGE: u32 = 60 * 60 * 24 * 365;

struct AppState {
    config: Config,
    templates: Templates,
    builder: CatalogBuilder,
}

type State = web::types::State<Arc<AppState>>;

/// Reads the theme cookie into a fresh store, so each request sees its own preference.
fn theme_context(req: &HttpRequest, config: &Config) -> ThemeContext {
    let store = match cookie_value(req, THEME_STORAGE_KEY) {
        Some(value) => MemoryPreferenceStore::with_value(THEME_STORAGE_KEY, &value),
        None => MemoryPreferenceStore::new(),
    };
    ThemeContext::new(Arc::new(store), config.site.default_theme)
}

fn cookie_value(req: &HttpRequest, name: &str) -> Option<String> {
    let header = req.headers().get("cookie")?.to_str().ok()?;
    find_cookie(header, name).map(str::to_string)
}

fn find_cookie<'a>(header: &'a str, name: &str) -> Option<&'a str> {
    header.split(';')
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value.trim())
}

fn html_response(result: io::Result<String>, what: &str) -> web::HttpResponse {
    match result {
        Ok(html) => web::HttpResponse::Ok()
            .content_type("text/html; charset=utf-8")
            .body(html),
        Err(e) => {
            error!("Error rendering {}: {}", what, e);
            web::HttpResponse::InternalServerError()
                .body(format!("Error rendering {}: {}", what, e))
        }
    }
}

/// Files of a post directory. The content sources themselves are not served.
pub fn get_file(root_dir: &Path, post: String, file: String, source_files: &[String]) -> Result<NamedFile, web::Error> {
    if post.contains("..") || file.contains("..") {
        return Err(web::error::ErrorUnauthorized("Access forbidden").into());
    }
    if source_files.contains(&file) {
        return Err(web::error::ErrorNotFound("File not found").into());
    }

    let file_path = root_dir.join(post).join(file);
    Ok(NamedFile::open(file_path)?)
}

#[web::get("/posts/{post}")]
async fn post_wo_slash(path: web::types::Path<String>) -> web::HttpResponse {
    web::HttpResponse::TemporaryRedirect()
        .header("Location", format!("/posts/{}/", path.into_inner()))
        .content_type("text/html; charset=utf-8")
        .finish()
}

#[web::get("/posts/{post}/")]
async fn post_page(req: HttpRequest, post_name: web::types::Path<String>, state: State) -> web::HttpResponse {
    let post_name = post_name.into_inner();
    let catalog = state.builder.build();
    let Some(entry) = catalog.find(&post_name) else {
        return web::HttpResponse::NotFound()
            .body(format!("Post {} not found", post_name));
    };

    let theme = theme_context(&req, &state.config);
    let ctx = PageContext {
        site: &state.config.site,
        templates: &state.templates,
        theme: &theme,
        toggle_href: Some(TOGGLE_HREF),
    };
    html_response(render_post(&ctx, entry), &format!("post {}", post_name))
}

#[web::get("/posts/{post}/{file}")]
async fn post_files(path: web::types::Path<(String, String)>, state: State) -> Result<NamedFile, web::Error> {
    let (post, file) = path.into_inner();
    get_file(&state.config.paths.posts_dir, post, file, &state.config.post_files())
}

#[web::get("/public/{file_name}")]
async fn public_files(path: web::types::Path<String>, state: State) -> Result<NamedFile, web::Error> {
    if path.contains("..") {
        return Err(web::error::ErrorUnauthorized("Access forbidden").into());
    }

    let file_path = state.config.paths.public_dir.join(path.into_inner());
    Ok(NamedFile::open(file_path)?)
}

#[web::get("/rss.xml")]
async fn rss(state: State) -> web::HttpResponse {
    let site = &state.config.site;
    let channel = RssChannel {
        ch_title: &site.name,
        ch_link: &site.origin,
        ch_desc: &site.description,
    };

    match channel.render(&state.builder.build()) {
        Ok(xml) => web::HttpResponse::Ok()
            .content_type("application/rss+xml; charset=utf-8")
            .body(xml),
        Err(e) => {
            error!("Error rendering rss feed: {}", e);
            web::HttpResponse::InternalServerError()
                .body(format!("Error rendering rss feed: {}", e))
        }
    }
}

/// Path of the referring page when it was served by this host, `/` otherwise.
fn redirect_target(referer: Option<&str>, host: Option<&str>) -> String {
    let Some(uri) = referer.and_then(|referer| referer.parse::<Uri>().ok()) else {
        return "/".to_string();
    };

    let same_site = match uri.authority() {
        Some(authority) => host.is_some_and(|host| authority.as_str().eq_ignore_ascii_case(host)),
        None => uri.scheme().is_none(),
    };
    let path = uri.path_and_query().map(|p| p.as_str()).unwrap_or("/");

    if same_site && path.starts_with('/') && !path.starts_with("//") {
        path.to_string()
    } else {
        "/".to_string()
    }
}

#[web::get("/theme/toggle")]
async fn toggle_theme(req: HttpRequest, state: State) -> web::HttpResponse {
    let theme = theme_context(&req, &state.config);
    let next = theme.toggle();

    let referer = req.headers().get("referer").and_then(|value| value.to_str().ok());
    let host = req.headers().get("host").and_then(|value| value.to_str().ok());
    let back_to = redirect_target(referer, host);

    web::HttpResponse::SeeOther()
        .header("Location", back_to)
        .header("Set-Cookie", format!("{}={}; Path=/; Max-Age={}; SameSite=Lax", THEME_STORAGE_KEY, next, THEME_COOKIE_MAX_AGE))
        .finish()
}

#[web::get("/")]
async fn index(req: HttpRequest, state: State) -> web::HttpResponse {
    let theme = theme_context(&req, &state.config);
    let ctx = PageContext {
        site: &state.config.site,
        templates: &state.templates,
        theme: &theme,
        toggle_href: Some(TOGGLE_HREF),
    };
    html_response(render_home(&ctx, &state.builder.build()), "home page")
}

/// Pages are rebuilt from the content root on every request, so edits show up without a restart.
pub async fn server_run(config: Config) -> io::Result<()> {
    let templates = Templates::load(config.paths.template_dir.as_deref())?;
    let builder = CatalogBuilder::new(&config.paths.posts_dir, &config.post_files());
    for entry in builder.build().iter() {
        info!("Post: {} ({})", entry.name, entry.matter.date);
    }

    let bind_addr = config.server.address.clone();
    let bind_port = config.server.port;
    let app_state = Arc::new(AppState {
        config,
        templates,
        builder,
    });

    web::HttpServer::new(move || {
        web::App::new()
            .state(app_state.clone())
            .service(index)
            .service(public_files)
            .service(rss)
            .service(toggle_theme)
            .service(post_page)
            .service(post_wo_slash)
            .service(post_files)
    })
        .bind((bind_addr, bind_port))?
        .run()
        .await
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_find_cookie() {
        let header = "session=abc; theme-preference=dark; other=1";
        assert_eq!(find_cookie(header, THEME_STORAGE_KEY), Some("dark"));
        assert_eq!(find_cookie(header, "other"), Some("1"));
        assert_eq!(find_cookie(header, "missing"), None);
        assert_eq!(find_cookie("", THEME_STORAGE_KEY), None);
    }

    #[test]
    fn test_get_file_rejects_parent_dirs() {
        let root = Path::new("/tmp");
        assert!(get_file(root, "..".to_string(), "passwd".to_string(), &[]).is_err());
        assert!(get_file(root, "post".to_string(), "../secret".to_string(), &[]).is_err());
    }

    #[test]
    fn test_get_file_hides_content_sources() {
        let root = TempDir::new().unwrap();
        let post_dir = root.path().join("hello");
        fs::create_dir(&post_dir).unwrap();
        fs::write(post_dir.join("index.mdx"), "---\n---\n").unwrap();
        fs::write(post_dir.join("cover.webp"), b"img").unwrap();

        let source_files = vec!["index.mdx".to_string(), "index.md".to_string()];
        assert!(get_file(root.path(), "hello".to_string(), "index.mdx".to_string(), &source_files).is_err());
        assert!(get_file(root.path(), "hello".to_string(), "cover.webp".to_string(), &source_files).is_ok());
    }

    #[test]
    fn test_redirect_target() {
        let host = Some("127.0.0.1:8001");
        assert_eq!(redirect_target(Some("http://127.0.0.1:8001/posts/a/"), host), "/posts/a/");
        assert_eq!(redirect_target(Some("http://127.0.0.1:8001/?x=1"), host), "/?x=1");
        assert_eq!(redirect_target(Some("/posts/b/"), host), "/posts/b/");
        assert_eq!(redirect_target(Some("https://leonerd.dev.evil.com/posts/a/"), Some("leonerd.dev")), "/");
        assert_eq!(redirect_target(Some("https://leonerd.dev/posts/a/"), Some("leonerd.dev")), "/posts/a/");
        assert_eq!(redirect_target(Some("http://127.0.0.1:8001/posts/a/"), None), "/");
        assert_eq!(redirect_target(None, host), "/");
        assert_eq!(redirect_target(Some("not a url"), host), "/");
    }
}
