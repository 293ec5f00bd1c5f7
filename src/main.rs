use std::io;

use anyhow::{Context, Result, bail};
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use medref::config::Config;
use medref::data::datasets;
use medref::demo::{DemoPlayer, find_demo};
use medref::pages::clipboard::{ToastKind, WriterClipboard};
use medref::pages::listing::ListingState;
use medref::pages::routes::Route;
use medref::pages::{PageView, Renderer};
use medref::sitemap;

#[derive(Parser)]
#[command(name = "medref")]
#[command(about = "Query the bundled clinical reference datasets")]
#[command(version)]
struct Cli {
    /// Path to the JSON config file
    #[arg(short, long, default_value = "")]
    config: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a page as JSON
    Render {
        /// Site path, e.g. /cpt-codes or /lab-tests/ferritin
        path: String,
        #[arg(short, long, default_value = "")]
        query: String,
        #[arg(short, long)]
        filter: Option<String>,
        #[arg(short, long)]
        page: Option<usize>,
    },
    /// List the filter values of a listing page
    Facets { path: String },
    /// Copy a record's text through the clipboard (stdout)
    Copy { path: String },
    /// Print the XML sitemap
    Sitemap {
        /// Last-modified date (YYYY-MM-DD), defaults to today
        #[arg(long)]
        lastmod: Option<NaiveDate>,
    },
    /// Play a product demo: scheduling, scribe or coding
    Demo {
        name: String,
        /// Stop after this many scene changes
        #[arg(short, long)]
        ticks: Option<u64>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let (config, source) = Config::load_with_source(&cli.config)?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
    // Reported only now that a subscriber is installed
    source.log();

    config.validate().context("invalid configuration")?;

    let renderer = Renderer::from_config(datasets(), &config);

    match cli.command {
        Commands::Render {
            path,
            query,
            filter,
            page,
        } => {
            let route = Route::resolve(&path);
            let mut state = ListingState::new();
            state.set_query(query);
            state.set_filter(filter);
            if let (Some(page), Some(section)) = (page, route.section()) {
                let total = renderer.total_pages(section, &state);
                if !state.go_to_page(page, total) {
                    warn!("Page {page} is out of range (1..={total}), showing page 1");
                }
            }

            let view = renderer.render(&route, &state);
            if let PageView::NotFound { message, .. } = &view {
                warn!("{message}");
            }
            println!("{}", serde_json::to_string_pretty(&view)?);
        }
        Commands::Facets { path } => {
            let Route::Listing(section) = Route::resolve(&path) else {
                bail!("not a listing page: {path}");
            };
            let options = renderer.filter_options(section);
            println!("{}", serde_json::to_string_pretty(&options)?);
        }
        Commands::Copy { path } => {
            let route = Route::resolve(&path);
            let clipboard = WriterClipboard::new(io::stdout());
            let toast = renderer
                .copy_record(&route, &clipboard, config.toast.duration_ms)
                .with_context(|| format!("no record at {path}"))?;
            match toast.kind {
                ToastKind::Success => info!("{}", toast.message),
                ToastKind::Failure => warn!("{}", toast.message),
            }
        }
        Commands::Sitemap { lastmod } => {
            let lastmod = lastmod.unwrap_or_else(|| Local::now().date_naive());
            print!("{}", sitemap::build(datasets(), &config.site_url, lastmod));
        }
        Commands::Demo { name, ticks } => run_demo(&name, ticks, &config).await?,
    }

    Ok(())
}

async fn run_demo(name: &str, ticks: Option<u64>, config: &Config) -> Result<()> {
    let script = find_demo(name)?;
    let player = DemoPlayer::spawn(script, config.demo_interval())?;
    let mut rx = player.subscribe();

    println!("{}", serde_json::to_string(&player.current())?);
    let mut seen = 0u64;
    while ticks.is_none_or(|limit| seen < limit) {
        tokio::select! {
            changed = rx.changed() => {
                if changed.is_err() {
                    break;
                }
                let snapshot = rx.borrow_and_update().clone();
                info!(scene = snapshot.scene, index = snapshot.index, "Scene");
                println!("{}", serde_json::to_string(&snapshot)?);
                seen += 1;
            }
            _ = signal::ctrl_c() => {
                info!("Received Ctrl+C, stopping demo");
                break;
            }
        }
    }

    player.stop().await;
    Ok(())
}
