use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::{env, fs, io};

use serde::Deserialize;

use crate::post_list::DEFAULT_POST_FILES;
use crate::theme::ThemePreference;

#[derive(Deserialize)]
pub struct Site {
    pub name: String,
    /// Scheme and host, without a trailing slash. Prefixed to social images and canonical links.
    pub origin: String,
    pub description: String,
    pub author: String,
    #[serde(default = "default_avatar")]
    pub avatar: String,
    #[serde(default = "default_logo")]
    pub logo: String,
    #[serde(default = "default_locale")]
    pub locale: String,
    pub twitter: Option<String>,
    pub github: Option<String>,
    pub linkedin: Option<String>,
    pub copyright: Option<String>,
    #[serde(default = "default_theme")]
    pub default_theme: ThemePreference,
}

#[derive(Deserialize)]
pub struct Paths {
    pub posts_dir: PathBuf,
    pub public_dir: PathBuf,
    pub out_dir: PathBuf,
    pub template_dir: Option<PathBuf>,
}

#[derive(Deserialize, Default)]
pub struct Defaults {
    /// Content file names looked up in each post directory, first match wins.
    #[serde(default)]
    pub post_files: Vec<String>,
}

#[derive(Deserialize)]
pub struct Server {
    pub address: String,
    pub port: u16,
}

#[derive(Deserialize)]
pub struct Log {
    pub level: LogLevel,
    pub log_to_console: bool,
    pub location: Option<PathBuf>,
}

#[derive(Deserialize, Copy, Clone, Debug, PartialEq)]
pub enum LogLevel {
    Critical = 0,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

#[derive(Deserialize)]
pub struct Config {
    pub site: Site,
    pub paths: Paths,
    #[serde(default)]
    pub defaults: Defaults,
    pub server: Server,
    pub log: Option<Log>,
}

impl Config {
    pub fn post_files(&self) -> Vec<String> {
        if self.defaults.post_files.is_empty() {
            DEFAULT_POST_FILES.iter().map(|s| s.to_string()).collect()
        } else {
            self.defaults.post_files.clone()
        }
    }
}

fn default_avatar() -> String {
    "/public/avatar.webp".to_string()
}

fn default_logo() -> String {
    "/public/icon-logo.webp".to_string()
}

fn default_locale() -> String {
    "en_US".to_string()
}

fn default_theme() -> ThemePreference {
    ThemePreference::Light
}

fn parse_path(path: PathBuf) -> PathBuf {
    if !path.starts_with("${exe_dir}") {
        return path;
    }

    let exe_dir = match env::current_exe() {
        Ok(exe) => exe.parent().map(Path::to_path_buf).unwrap_or_default(),
        Err(_) => return path,
    };
    let str_path = path.to_string_lossy();
    PathBuf::from(str_path.replace("${exe_dir}", &exe_dir.to_string_lossy()))
}

pub fn parse_config(cfg_content: &str) -> io::Result<Config> {
    let mut cfg: Config = match toml::from_str::<Config>(cfg_content) {
        Ok(cfg) => cfg,
        Err(e) => return Err(io::Error::new(
            ErrorKind::InvalidData, format!("Error parsing configuration file: {}", e))),
    };

    cfg.paths = Paths {
        posts_dir: parse_path(cfg.paths.posts_dir),
        public_dir: parse_path(cfg.paths.public_dir),
        out_dir: parse_path(cfg.paths.out_dir),
        template_dir: cfg.paths.template_dir.map(parse_path),
    };
    cfg.site.origin = cfg.site.origin.trim_end_matches('/').to_string();

    Ok(cfg)
}

pub fn read_config(cfg_path: &Path) -> io::Result<Config> {
    let cfg_content = match fs::read_to_string(cfg_path) {
        Ok(content) => content,
        Err(e) => return Err(io::Error::new(e.kind(), format!("Error opening configuration file {}: {}", cfg_path.display(), e))),
    };

    parse_config(&cfg_content)
}
