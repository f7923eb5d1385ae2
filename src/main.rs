use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use img_color_pick::models::{
    parse_range_arg, AppConfig, ElementLayout, ImageElement, PaletteOptions,
};
use img_color_pick::rendering::{ImageRasterizer, PixmapCanvas};
use img_color_pick::services::{PickerController, PointerEvents, PointerMove};

#[derive(Parser)]
#[command(name = "img-color-pick")]
#[command(about = "Dominant colors and a pixel magnifier for images")]
struct Cli {
    /// YAML configuration file (defaults to $CONFIG_FILE)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the most frequent colors of an image
    Palette {
        /// Image URL, data: URI or file path
        source: String,

        /// Number of colors to return
        #[arg(short, long)]
        length: Option<usize>,

        /// Rasterization scale relative to the natural size
        #[arg(short, long)]
        scale: Option<f64>,

        /// Color to skip, e.g. "rgb(255,255,255)" (repeatable)
        #[arg(short, long)]
        ignore: Vec<String>,

        /// Allowed red range, e.g. 100-255
        #[arg(long, value_parser = parse_range_arg)]
        red: Option<[u8; 2]>,

        /// Allowed green range
        #[arg(long, value_parser = parse_range_arg)]
        green: Option<[u8; 2]>,

        /// Allowed blue range
        #[arg(long, value_parser = parse_range_arg)]
        blue: Option<[u8; 2]>,

        /// Print pixel counts next to each color
        #[arg(long)]
        counts: bool,

        /// Print JSON instead of one color per line
        #[arg(long)]
        json: bool,
    },
    /// Render the magnifier for one cursor position to a PNG file
    Magnify {
        /// Image URL, data: URI or file path
        source: String,

        /// Cursor x in viewport coordinates
        #[arg(short, long, allow_hyphen_values = true)]
        x: f64,

        /// Cursor y in viewport coordinates
        #[arg(short, long, allow_hyphen_values = true)]
        y: f64,

        /// Displayed image width
        #[arg(long)]
        width: u32,

        /// Displayed image height
        #[arg(long)]
        height: u32,

        /// Image left offset in the viewport
        #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
        left: f64,

        /// Image top offset in the viewport
        #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
        top: f64,

        /// Output PNG file path
        #[arg(short, long)]
        output: PathBuf,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let Some(command) = cli.command else {
        run_status_command();
        return Ok(());
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "img_color_pick=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time())
        .init();

    let config_path = cli
        .config
        .or_else(|| std::env::var("CONFIG_FILE").ok().map(PathBuf::from));
    let config = AppConfig::load(config_path.as_deref());

    match command {
        Commands::Palette {
            source,
            length,
            scale,
            ignore,
            red,
            green,
            blue,
            counts,
            json,
        } => {
            let mut options = config.palette.clone();
            if let Some(length) = length {
                options.length = length;
            }
            if let Some(scale) = scale {
                options.scale = scale;
            }
            if !ignore.is_empty() {
                options.ignore = ignore;
            }
            options.r = red.unwrap_or(options.r);
            options.g = green.unwrap_or(options.g);
            options.b = blue.unwrap_or(options.b);

            run_palette_command(&config, &source, &options, counts, json).await
        }
        Commands::Magnify {
            source,
            x,
            y,
            width,
            height,
            left,
            top,
            output,
        } => {
            let layout = ElementLayout::new(width, height, left, top);
            run_magnify_command(&config, &source, layout, PointerMove::new(x, y), &output).await
        }
    }
}

async fn run_palette_command(
    config: &AppConfig,
    source: &str,
    options: &PaletteOptions,
    with_counts: bool,
    json: bool,
) -> anyhow::Result<()> {
    let rasterizer = ImageRasterizer::new(&config.fetch)?;
    let picker = PickerController::new(
        source,
        rasterizer,
        PixmapCanvas,
        config.magnifier.to_config()?,
    );

    let counts = picker.palette_counts(options).await?;

    if json {
        let value = if with_counts {
            serde_json::Value::Array(
                counts
                    .iter()
                    .map(|entry| {
                        serde_json::json!({
                            "color": entry.color.to_string(),
                            "count": entry.count,
                        })
                    })
                    .collect(),
            )
        } else {
            serde_json::json!(counts
                .iter()
                .map(|entry| entry.color.to_string())
                .collect::<Vec<_>>())
        };
        println!("{}", serde_json::to_string_pretty(&value)?);
    } else {
        for entry in &counts {
            if with_counts {
                println!("{}\t{}", entry.color, entry.count);
            } else {
                println!("{}", entry.color);
            }
        }
    }

    Ok(())
}

async fn run_magnify_command(
    config: &AppConfig,
    source: &str,
    layout: ElementLayout,
    cursor: PointerMove,
    output: &Path,
) -> anyhow::Result<()> {
    let rasterizer = ImageRasterizer::new(&config.fetch)?;
    let element = ImageElement::with_layout(source, layout);
    let mut picker = PickerController::new(
        element,
        rasterizer,
        PixmapCanvas,
        config.magnifier.to_config()?,
    );

    let events = PointerEvents::new();
    picker.start(&events).await?;
    events.publish(cursor);
    picker.process_pending();

    let magnifier = picker
        .magnifier()
        .ok_or_else(|| anyhow::anyhow!("picking session did not start"))?;

    match (magnifier.center_color(), magnifier.surface()) {
        (Some(color), Some(surface)) => {
            let png = surface.encode_png()?;
            std::fs::write(output, &png)?;
            println!("{color}");
            eprintln!(
                "Wrote {}x{} magnifier frame to {} ({} bytes)",
                surface.width(),
                surface.height(),
                output.display(),
                png.len()
            );
        }
        _ => println!(
            "Cursor ({}, {}) is outside the image; nothing written",
            cursor.client_x, cursor.client_y
        ),
    }

    picker.exit();
    Ok(())
}

/// Show version and environment status
fn run_status_command() {
    const VERSION: &str = env!("CARGO_PKG_VERSION");

    let config_file = std::env::var("CONFIG_FILE").ok();
    let rust_log = std::env::var("RUST_LOG").ok();

    println!("img-color-pick v{VERSION}");
    println!("Dominant colors and a pixel magnifier for images\n");

    println!("Environment Variables:");
    println!(
        "  CONFIG_FILE = {}",
        config_file.as_deref().unwrap_or("(not set)")
    );
    println!(
        "  RUST_LOG    = {}",
        rust_log.as_deref().unwrap_or("img_color_pick=warn (default)")
    );

    let config_source = match config_file {
        Some(ref path) if Path::new(path).exists() => path.to_string(),
        Some(_) => "defaults (file not found)".to_string(),
        None => "defaults".to_string(),
    };
    let config = AppConfig::load(config_file.as_deref().map(Path::new));

    println!("\nConfiguration: {config_source}");
    println!("  palette.length      = {}", config.palette.length);
    println!("  palette.scale       = {}", config.palette.scale);
    println!(
        "  magnifier           = {} x {} cells of {}px",
        config.magnifier.rect_num, config.magnifier.rect_num, config.magnifier.rect_size
    );
    println!(
        "  fetch.timeout_secs  = {}",
        config
            .fetch
            .timeout_secs
            .map(|secs| secs.to_string())
            .unwrap_or_else(|| "(none)".to_string())
    );

    println!("\nCommands:");
    println!("  img-color-pick palette <SOURCE>   Print dominant colors");
    println!("  img-color-pick magnify <SOURCE>   Render the magnifier to PNG");
    println!("  img-color-pick --help             Show all options");
}
