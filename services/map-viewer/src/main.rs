//! Map viewer CLI.
//!
//! Runs one page view against a layer API: fetch the layer, mount the map,
//! replay clicks as identify requests and print what the page would show.

use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use map_viewer::{AppShell, AppState, HttpFetcher, LayerClient, ViewerConfig, Viewport};

#[derive(Parser, Debug)]
#[command(name = "map-viewer")]
#[command(about = "Single-layer WMS map viewer")]
struct Args {
    /// Layer API base URL (default: page origin on port 8000)
    #[arg(long, env = "MAP_VIEWER_API_BASE")]
    api_base: Option<String>,

    /// Origin the viewer is served from
    #[arg(long, env = "MAP_VIEWER_ORIGIN", default_value = "http://localhost:5173")]
    origin: String,

    /// Map container id
    #[arg(long, default_value = "map")]
    target: String,

    /// Map width in pixels
    #[arg(long, default_value = "1024")]
    width: u32,

    /// Map height in pixels
    #[arg(long, default_value = "768")]
    height: u32,

    /// Click at pixel "x,y" (repeatable)
    #[arg(long = "click", value_parser = parse_pixel)]
    clicks: Vec<(f64, f64)>,

    /// Print the tile URLs the map would request
    #[arg(long)]
    tiles: bool,

    /// Log level
    #[arg(long, default_value = "warn")]
    log_level: String,
}

fn parse_pixel(s: &str) -> Result<(f64, f64), String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected x,y but got '{}'", s))?;
    let x = x.trim().parse().map_err(|_| format!("invalid x in '{}'", s))?;
    let y = y.trim().parse().map_err(|_| format!("invalid y in '{}'", s))?;
    Ok((x, y))
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment from .env file if present
    dotenvy::dotenv().ok();

    let args = Args::parse();

    let level = match args.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "error" => Level::ERROR,
        _ => Level::WARN,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    let config = ViewerConfig::resolve(args.api_base, &args.origin);
    info!(api_base = %config.api_base, "Resolved layer API");

    let client = LayerClient::new(&config).context("Failed to create HTTP client")?;
    let viewport = Viewport {
        target: args.target,
        size: (args.width, args.height),
    };
    let fetcher = HttpFetcher::new().context("Failed to create HTTP client")?;
    let mut app = AppShell::new(client, Arc::new(fetcher), viewport);

    println!("{}", app.render());
    app.mount().await;
    println!("{}", app.render());

    if let AppState::Error(message) = app.state() {
        bail!("{}", message);
    }

    let clicked = !args.clicks.is_empty();
    if let Some(view) = app.map_view_mut() {
        if args.tiles {
            if let Some(map) = view.map() {
                for url in map.tile_requests() {
                    println!("{}", url);
                }
            }
        }

        for pixel in args.clicks {
            match view.single_click(pixel) {
                Some(handle) => {
                    handle.await.context("Identify task failed")?;
                }
                None => info!(x = pixel.0, y = pixel.1, "Nothing to identify here"),
            }
        }
    }

    if clicked {
        println!("{}", app.render());
    }
    app.unmount();

    Ok(())
}
