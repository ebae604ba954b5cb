use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use dithercanvas::models::{AppConfig, CanvasSpec, EdgeModeSetting};
use dithercanvas::server;
use dithercanvas::services::{DitherPipeline, RenderOverrides};

#[derive(Parser)]
#[command(name = "dithercanvas")]
#[command(about = "Draws an image and a Floyd-Steinberg dithered copy side by side")]
struct Cli {
    /// YAML config file (default: $CONFIG_FILE)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve,
    /// Render the canvas directly to a PNG file
    Render {
        /// Image URL or path (overrides image_url)
        #[arg(short, long)]
        image: Option<String>,

        /// Output PNG file path
        #[arg(short, long, default_value = "canvas.png")]
        output: PathBuf,

        /// Quantization steps per channel
        #[arg(short, long)]
        steps: Option<u32>,

        /// Reduce the dithered output to gray
        #[arg(short, long)]
        grayscale: bool,

        /// Edge handling while diffusing
        #[arg(long, value_enum)]
        edge_mode: Option<EdgeModeSetting>,

        /// Canvas size as WIDTHxHEIGHT (e.g. 1280x720)
        #[arg(long, value_parser = parse_canvas)]
        canvas: Option<CanvasSpec>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config_path = cli
        .config
        .or_else(|| std::env::var("CONFIG_FILE").ok().map(PathBuf::from));

    match cli.command {
        Some(Commands::Render {
            image,
            output,
            steps,
            grayscale,
            edge_mode,
            canvas,
        }) => {
            let overrides = RenderArgs {
                image,
                steps,
                grayscale,
                edge_mode,
                canvas,
            };
            run_render_command(config_path.as_deref(), overrides, &output).await
        }
        Some(Commands::Serve) => run_server(config_path.as_deref()).await,
        None => {
            run_status_command(config_path.as_deref());
            Ok(())
        }
    }
}

struct RenderArgs {
    image: Option<String>,
    steps: Option<u32>,
    grayscale: bool,
    edge_mode: Option<EdgeModeSetting>,
    canvas: Option<CanvasSpec>,
}

impl RenderArgs {
    fn apply(self, config: &mut AppConfig) {
        if let Some(image) = self.image {
            config.image_url = image;
        }
        if let Some(steps) = self.steps {
            config.steps = steps;
        }
        if self.grayscale {
            config.grayscale = true;
        }
        if let Some(edge_mode) = self.edge_mode {
            config.edge_mode = edge_mode;
        }
        if let Some(canvas) = self.canvas {
            config.canvas = canvas;
        }
    }
}

fn parse_canvas(value: &str) -> Result<CanvasSpec, String> {
    let (w, h) = value
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected WIDTHxHEIGHT, got '{value}'"))?;
    let width = w.trim().parse().map_err(|e| format!("invalid width: {e}"))?;
    let height = h.trim().parse().map_err(|e| format!("invalid height: {e}"))?;
    Ok(CanvasSpec::new(width, height))
}

/// Render the canvas to a PNG file (no server needed)
async fn run_render_command(
    config_path: Option<&Path>,
    args: RenderArgs,
    output: &Path,
) -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "dithercanvas=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time())
        .init();

    let mut config = AppConfig::load(config_path);
    args.apply(&mut config);

    let base_dir = AppConfig::base_dir(config_path);
    let pipeline = DitherPipeline::new(Arc::new(config), base_dir)?;
    let png_bytes = pipeline.render_png(&RenderOverrides::default()).await?;

    tokio::fs::write(output, &png_bytes).await?;
    println!("Rendered {} ({} bytes)", output.display(), png_bytes.len());

    Ok(())
}

async fn run_server(config_path: Option<&Path>) -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "dithercanvas=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());

    let config = AppConfig::load(config_path);
    let state = server::create_app_state(config, AppConfig::base_dir(config_path))?;
    let app = server::build_router(state);

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!(addr = %bind_addr, "Dithercanvas server listening");

    axum::serve(listener, app).await?;

    Ok(())
}

fn run_status_command(config_path: Option<&Path>) {
    const VERSION: &str = env!("CARGO_PKG_VERSION");

    let bind_addr = std::env::var("BIND_ADDR").ok();

    println!("Dithercanvas v{VERSION}");
    println!("Floyd-Steinberg dithering on a canvas\n");

    println!("Environment Variables:");
    println!(
        "  BIND_ADDR   = {}",
        bind_addr.as_deref().unwrap_or("0.0.0.0:3000 (default)")
    );
    println!(
        "  CONFIG_FILE = {}",
        config_path
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "(not set)".to_string())
    );

    let config_source = match config_path {
        Some(path) if path.exists() => path.display().to_string(),
        Some(_) => "defaults (file not found)".to_string(),
        None => "defaults".to_string(),
    };

    let config = AppConfig::load(config_path);
    println!("\nConfiguration ({config_source}):");
    println!("  image_url             = {}", config.image_url);
    println!("  steps                 = {}", config.steps);
    println!("  grayscale             = {}", config.grayscale);
    println!("  source_width_fraction = {}", config.source_width_fraction);
    println!(
        "  canvas                = {}x{}",
        config.canvas.width, config.canvas.height
    );
    println!("  edge_mode             = {:?}", config.edge_mode);
    println!("  diffuse_alpha         = {}", config.diffuse_alpha);

    println!("\nCommands:");
    println!("  dithercanvas serve             Start the HTTP server");
    println!("  dithercanvas render -o out.png Render the canvas to a PNG file");
    println!("\nRun 'dithercanvas --help' for all options.");
}
