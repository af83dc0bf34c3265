#![windows_subsystem = "windows"]

mod app;
mod cache;
mod carousel;
mod config;
mod file_io;
mod invariant;
mod loader;
mod logging;
mod settings;
mod surface;
mod widget;

#[allow(unused_imports)]
use log::{debug, info, warn, error};

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;

use crate::app::Filmstrip;
use crate::loader::FsImageLoader;
use crate::settings::UserSettings;
use crate::surface::{SurfaceRegistry, SurfaceSpec};

#[derive(Parser)]
#[command(name = "filmstrip")]
#[command(about = "A draggable image carousel for local photos")]
struct Cli {
    /// Image files or directories to show, in order
    paths: Vec<PathBuf>,

    /// Path to an alternative settings file
    #[arg(long)]
    settings: Option<String>,
}

fn main() -> iced::Result {
    let cli = Cli::parse();

    let shared_log_buffer = logging::setup_logger(config::APP_NAME);
    logging::setup_panic_hook(config::APP_NAME, shared_log_buffer);

    let settings = UserSettings::load(cli.settings.as_deref());
    if cli.settings.is_none() && !UserSettings::settings_path().exists() {
        if let Err(err) = settings.save() {
            warn!("Could not write default settings: {}", err);
        }
    }

    let sources = file_io::collect_sources(&cli.paths);
    info!("Showing {} slides", sources.len());

    let mut surfaces = SurfaceRegistry::new();
    surfaces.register(SurfaceSpec {
        name: config::SURFACE_NAME.to_string(),
        width: settings.window_width as f32,
        height: settings.window_height as f32,
    });

    let loader = Arc::new(FsImageLoader);
    let (filmstrip, boot) =
        match Filmstrip::new(config::SURFACE_NAME, sources, &surfaces, loader, &settings) {
            Ok(built) => built,
            Err(err) => {
                error!("Could not start: {}", err);
                std::process::exit(1);
            }
        };

    let window_size = (settings.window_width as f32, settings.window_height as f32);
    iced::application(Filmstrip::title, Filmstrip::update, Filmstrip::view)
        .theme(Filmstrip::theme)
        .window_size(window_size)
        .run_with(move || (filmstrip, boot))
}
