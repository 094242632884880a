use anyhow::Result;
use clap::Parser;
use image::io::Reader as ImageReader;
use std::{path::Path, path::PathBuf, sync::Arc};
use tracing::{info, warn};
use winit::{dpi::LogicalSize, event_loop::EventLoop, window::Icon, window::WindowBuilder};

use orient_tutorial::{
    config::AppConfig,
    orientation::{Interpolation, OrientationController},
    presenter::{Presenter, Projection},
    run,
    scene::InterpolationScene,
};

/// Interpolates a model between preset orientations.
/// Q..U pick an orientation, SPACE toggles lerp and slerp, ESC quits.
#[derive(Parser, Debug)]
struct Args {
    /// TOML config file; built-in defaults are used when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Print the default config and exit.
    #[arg(long)]
    print_default_config: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "orient_tutorial=info,interpolation=info".into()),
        )
        .init();
    let args = Args::parse();

    if args.print_default_config {
        print!("{}", AppConfig::default().to_toml_string()?);
        return Ok(());
    }

    let config = match &args.config {
        Some(path) => AppConfig::load(path)?,
        None => {
            info!("no config given, using defaults");
            AppConfig::default()
        }
    };

    let interpolation = if config.animation.start_with_slerp {
        Interpolation::Spherical
    } else {
        Interpolation::Linear
    };
    let controller =
        OrientationController::new(config.orientation_set()?, config.animation.settings())
            .with_interpolation(interpolation);
    let scene = InterpolationScene::new(controller, config.key_bindings());

    let event_loop = EventLoop::new();
    let window = WindowBuilder::new()
        .with_visible(false)
        .with_title(&config.window.title)
        .with_inner_size(LogicalSize::new(config.window.width, config.window.height))
        .with_window_icon(config.window.icon.as_deref().and_then(get_logo))
        .build(&event_loop)
        .map_err(orient_tutorial::Error::from)?;
    let window = Arc::new(window);
    let presenter = Presenter::new(
        window.clone(),
        &config.window.title,
        Projection::new(&config.camera),
    );

    info!(
        presets = config.presets.len(),
        duration = config.animation.duration,
        mode = interpolation.label(),
        "starting"
    );
    run(event_loop, window, Box::new(scene), presenter)
}

pub fn get_logo(path: &Path) -> Option<Icon> {
    let decoded_image = match ImageReader::open(path).map(|reader| reader.decode()) {
        Ok(Ok(decoded_image)) => decoded_image,
        Ok(Err(err)) => {
            warn!(?path, %err, "could not decode window icon");
            return None;
        }
        Err(err) => {
            warn!(?path, %err, "could not open window icon");
            return None;
        }
    };
    let formatted_image = decoded_image.into_rgba8();
    let (width, height) = (formatted_image.width(), formatted_image.height());
    match Icon::from_rgba(formatted_image.into_vec(), width, height) {
        Ok(icon) => Some(icon),
        Err(err) => {
            warn!(?path, %err, "invalid window icon");
            None
        }
    }
}
