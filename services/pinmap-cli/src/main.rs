//! Pin map renderer.
//!
//! Reads coordinates from the command line or a JSON/YAML file, marks them
//! as pins on a world map, optionally crops around them, and writes a PNG.

mod config;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{error, info, Level};
use tracing_subscriber::FmtSubscriber;

use config::{Args, RenderConfig};
use pinmap_common::{PinmapError, PinmapResult};
use renderer::assets::{default_pin_parts, open_image};
use renderer::{place_pins, plan_pins, AssetBundle};

/// Exit status for failures that are not a `PinmapError`.
const EXIT_FAILURE: u8 = 1;

fn main() -> ExitCode {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let args = Args::parse();
    if let Err(err) = init_tracing(&args.log_level, args.json_logs) {
        eprintln!("Error: {err:#}");
        return ExitCode::from(EXIT_FAILURE);
    }

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(error = %format!("{err:#}"), "Render failed");
            eprintln!("Error: {err:#}");
            ExitCode::from(exit_status(&err))
        }
    }
}

/// Map an error to a process exit status via the first `PinmapError` in its chain.
fn exit_status(err: &anyhow::Error) -> u8 {
    err.chain()
        .find_map(|cause| cause.downcast_ref::<PinmapError>())
        .map_or(EXIT_FAILURE, PinmapError::exit_code)
}

fn run(args: &Args) -> Result<()> {
    let config = RenderConfig::resolve(args)?;
    info!(
        pins = config.coords.len(),
        projection = ?config.projection,
        crop = ?config.crop,
        output = %config.output.display(),
        "Loaded configuration"
    );

    let assets = load_assets(&config)?;
    let projection = config.projection.projection();
    let (map_width, map_height) = assets.dimensions();
    let crop = config.crop.for_map(map_width, map_height);

    if args.layout {
        let layout = plan_pins(projection, map_width, map_height, &config.coords, crop)?;
        println!("{}", serde_json::to_string_pretty(&layout)?);
        return Ok(());
    }

    let image = place_pins(
        projection,
        &assets.map,
        &assets.pin_parts,
        &config.coords,
        crop,
    )?;

    renderer::png::write_png(&config.output, &image)
        .with_context(|| format!("writing {}", config.output.display()))?;

    info!(
        width = image.width(),
        height = image.height(),
        path = %config.output.display(),
        "Wrote pin map"
    );
    Ok(())
}

fn init_tracing(log_level: &str, json: bool) -> Result<()> {
    let level = match log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let builder = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true)
        .with_writer(std::io::stderr);

    if json {
        tracing::subscriber::set_global_default(builder.json().finish())?;
    } else {
        tracing::subscriber::set_global_default(builder.finish())?;
    }
    Ok(())
}

/// Built-in assets, with any configured map or pin layers swapped in.
fn load_assets(config: &RenderConfig) -> PinmapResult<AssetBundle> {
    let builtin = AssetBundle::builtin();
    match (&config.map_path, config.pin_part_paths.as_slice()) {
        (None, []) => Ok(builtin.clone()),
        (Some(map), []) => Ok(AssetBundle::new(open_image(map)?, default_pin_parts().to_vec())),
        (None, parts) => Ok(builtin.clone().with_pin_parts(open_images(parts)?)),
        (Some(map), parts) => AssetBundle::open(map, parts),
    }
}

fn open_images(paths: &[PathBuf]) -> PinmapResult<Vec<image::RgbaImage>> {
    paths.iter().map(|path| open_image(path)).collect()
}
