use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use spdlog::{info, warn};

use matterblog::catalog::CatalogBuilder;
use matterblog::logger::configure_logger;
use matterblog::server::server_run;
use matterblog::site::build_site;

use crate::config::open_config;
use crate::config_data::write_sample_cfg;
use crate::post::create_post;

mod config;
mod config_data;
mod post;

const CFG_FILE_NAME: &str = "matterblog.toml";

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Config path
    #[arg(short, long)]
    config_path: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Serves the blog over http
    Serve,
    /// Writes the blog as static files
    Build {
        /// Output directory. Defaults to paths.out_dir
        #[arg(short, long)]
        out_dir: Option<PathBuf>,
    },
    /// Prints the post catalog as json
    List,
    /// Creates a new post directory with a frontmatter skeleton
    Post {
        /// Title of the post
        #[arg(short, long)]
        title: String,

        /// Directory where the post directory is created. Defaults to paths.posts_dir
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
    /// Writes a sample configuration file
    Init {
        /// Where to write the configuration
        #[arg(short, long, default_value = CFG_FILE_NAME)]
        path: PathBuf,
    },
}

fn init(path: PathBuf) -> Result<()> {
    if path.exists() {
        bail!("{} already exists", path.display());
    }
    write_sample_cfg(&path)?;
    println!("Configuration written to {}", path.display());
    Ok(())
}

async fn run(config_path: Option<PathBuf>, command: Command) -> Result<()> {
    let config = open_config(config_path)?;

    if let Err(err) = configure_logger(config.log.as_ref()) {
        warn!("Error creating logger sinks. Using console instead. Desc={}", err);
    }

    match command {
        Command::Serve => {
            info!("Starting matterblog =-=-=-=-=-=-=-=-=-=-=-=-=-=-=-");
            info!("Listening on {}:{}", config.server.address, config.server.port);
            server_run(config).await?;
        }
        Command::Build { out_dir } => {
            let out_dir = out_dir.unwrap_or_else(|| config.paths.out_dir.clone());
            let summary = build_site(&config, &out_dir)?;
            println!("Wrote {} posts to {} ({} ignored)", summary.posts, out_dir.display(), summary.ignored);
        }
        Command::List => {
            let catalog = CatalogBuilder::new(&config.paths.posts_dir, &config.post_files()).try_build()?;
            println!("{}", serde_json::to_string_pretty(&catalog)?);
        }
        Command::Post { title, out } => {
            let posts_dir = out.unwrap_or_else(|| config.paths.posts_dir.clone());
            let file_path = create_post(&posts_dir, &title, chrono::Local::now().date_naive())?;
            println!("Created {}", file_path.display());
        }
        Command::Init { path } => init(path)?,
    }

    Ok(())
}

#[ntex::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let config_path = args.config_path.map(PathBuf::from);

    match args.command {
        // Runs before any configuration exists
        Command::Init { path } => init(path),
        command => run(config_path, command).await,
    }
}
