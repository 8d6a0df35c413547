// Placeholder sprite generator.
// • `circle` writes an outlined circle (ring) PNG.
// • `rect` writes a rounded rectangle PNG.
// • `window` opens a live preview where keys tweak the settings and C/R generate.
// Every PNG gets a `<file>.png.json` next to it with its sprite import settings.

mod asset;
mod canvas;
mod config;
mod draw;
mod error;
mod preview;
mod raster;
mod shapes;
mod types;

use asset::{AssetDir, resolve_target_dir};
use clap::{Args, Parser, Subcommand};
use config::{DEFAULT_CONFIG_PATH, SpriteSettings};
use error::Error;
use log::{LevelFilter, debug, info};
use raster::PivotMode;
use shapes::{SpriteRequest, render};
use std::path::PathBuf;
use types::{Color, ShapeKind, TextureSize};

#[derive(Parser, Debug)]
#[command(author, version, about = "Generate placeholder sprite textures", long_about = None)]
struct Cli {
    /// Settings file (TOML). Missing file means built-in defaults.
    #[arg(long, global = true, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,
    /// More log output (-v debug, -vv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Outlined circle: a ring of the given outline width.
    Circle {
        #[command(flatten)]
        style: StyleArgs,
        /// Outline width in pixels (0..=size/2).
        #[arg(long)]
        outline: Option<u32>,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Rounded rectangle: solid fill with quarter-circle corners.
    Rect {
        #[command(flatten)]
        style: StyleArgs,
        /// Corner radius in pixels (0..=size/2).
        #[arg(long)]
        corner: Option<u32>,
        /// Outline width; accepted for symmetry, the fill stays solid.
        #[arg(long)]
        outline: Option<u32>,
        /// Reproduce the older tool's off-by-one top/right corner pivots.
        #[arg(long)]
        legacy_corners: bool,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Interactive preview window.
    Window {
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Print the effective settings as TOML.
    Config {
        /// Also write them to the settings file.
        #[arg(long)]
        write: bool,
        #[command(flatten)]
        style: StyleArgs,
    },
}

#[derive(Args, Debug)]
struct StyleArgs {
    /// Texture edge: 32, 64, 128, 256, 512, 1024, 2048, 4096 or 8192.
    #[arg(long)]
    size: Option<TextureSize>,
    /// Sprite color as #RRGGBB or #RRGGBBAA.
    #[arg(long)]
    color: Option<Color>,
}

#[derive(Args, Debug)]
struct OutputArgs {
    /// Target folder, or a file whose folder should be used. Defaults to `.`.
    #[arg(long)]
    out: Option<PathBuf>,
    /// Skip the `.png.json` import settings file.
    #[arg(long)]
    no_meta: bool,
}

impl StyleArgs {
    fn apply(&self, settings: &mut SpriteSettings) {
        if let Some(size) = self.size { settings.texture_size = size; }
        if let Some(color) = self.color { settings.color = color; }
    }
}

impl OutputArgs {
    fn sink(&self) -> AssetDir {
        AssetDir::new(resolve_target_dir(self.out.as_deref()), !self.no_meta)
    }
}

fn generate(request: SpriteRequest, output: &OutputArgs) -> Result<(), Error> {
    let sprite = render(&request)?;
    let written = output.sink().store(sprite)?;
    if let Some(meta) = &written.meta_path {
        debug!("import settings at {}", meta.display());
    }
    println!("{}", written.png_path.display());
    Ok(())
}

fn main() -> Result<(), Error> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => LevelFilter::Info,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level.as_str()))
        .format_timestamp(None)
        .init();

    let mut settings = SpriteSettings::load_or_default(&cli.config)?;
    debug!("settings from {}: {settings:?}", cli.config.display());

    match cli.command {
        Command::Circle { style, outline, output } => {
            style.apply(&mut settings);
            if let Some(w) = outline { settings.outline_width = w; }
            let request = SpriteRequest::from_settings(ShapeKind::OutlinedCircle, &settings);
            generate(request, &output)
        }
        Command::Rect { style, corner, outline, legacy_corners, output } => {
            style.apply(&mut settings);
            if let Some(r) = corner { settings.corner_radius = r; }
            if let Some(w) = outline { settings.outline_width = w; }
            let mut request = SpriteRequest::from_settings(ShapeKind::RoundedRect, &settings);
            if legacy_corners {
                request.pivots = PivotMode::Legacy;
            }
            generate(request, &output)
        }
        Command::Window { output } => preview::run(settings, &output.sink(), cli.config),
        Command::Config { write, style } => {
            style.apply(&mut settings);
            print!("{}", settings.to_toml()?);
            if write {
                settings.save_to_file(&cli.config)?;
                info!("settings written to {}", cli.config.display());
            }
            Ok(())
        }
    }
}
