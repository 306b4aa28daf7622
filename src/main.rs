use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use instant::Instant;
use log::{error, info};

use scroll_showcase::loader::FileTransport;
use scroll_showcase::render::{HeadlessRenderer, Renderer};
use scroll_showcase::scroll::PinnedRegion;
use scroll_showcase::tween::TweenLogger;
use scroll_showcase::viewport::{FixedViewport, Viewport};
use scroll_showcase::{Showcase, ShowcaseConfig, ShowcaseError, ShowcaseEvent};

/// Scrolls through the product showcase without a page, logging what it would do
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// JSON file overriding the built-in presentation
    #[arg(long)]
    config: Option<PathBuf>,

    /// Model to load in place of the placeholder
    #[arg(long)]
    asset: Option<String>,

    #[arg(long, default_value_t = 1200.0)]
    width: f32,

    #[arg(long, default_value_t = 800.0)]
    height: f32,

    /// Frames spent scrolling down, and again back up
    #[arg(long, default_value_t = 240)]
    frames: usize,

    /// Frames per second to pace at, 0 to run flat out
    #[arg(long, default_value_t = 60)]
    fps: u32,

    /// Window width to switch to at the bottom of the scroll
    #[arg(long)]
    resize_to: Option<f32>,

    /// Print channel values for every scroll step as JSON lines
    #[arg(long)]
    dump: bool,

    /// Print the effective configuration and exit
    #[arg(long)]
    print_config: bool,
}

fn main() -> ExitCode {
    #[cfg(not(target_arch = "wasm32"))]
    env_logger::init();
    match run(Args::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(showcase_error) => {
            error!("{showcase_error}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<(), ShowcaseError> {
    let mut config = match &args.config {
        Some(path) => ShowcaseConfig::load(path)?,
        None => ShowcaseConfig::default(),
    };
    if let Some(asset) = &args.asset {
        config.asset_url = asset.clone();
    }
    if args.print_config {
        println!("{}", config.to_json()?);
        return Ok(());
    }

    let mut oracle = FixedViewport::window(args.width, args.height);
    let mut showcase = Showcase::mount(config, &oracle)?;
    let mut renderer = HeadlessRenderer::new(false);
    let mut tweens = TweenLogger;
    renderer.resize(showcase.viewport());
    showcase.load_asset(&FileTransport::default());

    let region = PinnedRegion::new(0.0, args.height);
    let frames = args.frames.max(1);
    let pace = (args.fps > 0).then(|| Duration::from_secs_f64(1.0 / args.fps as f64));
    let started = Instant::now();

    showcase.handle(ShowcaseEvent::SectionEntered, &mut tweens, &mut renderer);
    let down = (0..=frames).map(|frame| frame as f32 / frames as f32);
    let up = (0..=frames).rev().map(|frame| frame as f32 / frames as f32);
    for (step, nuance) in down.chain(up).enumerate() {
        let tick = Instant::now();
        if step == frames + 1 {
            if let Some(width) = args.resize_to {
                oracle.resize(Viewport::new(width, args.height));
                showcase.refresh_viewport(&oracle, &mut renderer);
            }
        }
        let progress = region.progress_at(region.length * nuance);
        showcase.handle(ShowcaseEvent::Scroll(progress.value()), &mut tweens, &mut renderer);
        if args.dump {
            if let Some(line) = showcase
                .last_values()
                .and_then(|values| serde_json::to_string(values).ok())
            {
                println!("{line}");
            }
        }
        showcase.handle(ShowcaseEvent::Frame, &mut tweens, &mut renderer);
        if let Some(pace) = pace {
            if let Some(rest) = pace.checked_sub(tick.elapsed()) {
                std::thread::sleep(rest);
            }
        }
    }
    showcase.handle(ShowcaseEvent::SectionLeftBack, &mut tweens, &mut renderer);

    let stage = showcase.stage();
    info!(
        "{} frames in {:.1}s ({:.1} fps), showing {} ({}), spun {}",
        (frames + 1) * 2,
        started.elapsed().as_secs_f32(),
        renderer.fps(),
        if stage.active().is_placeholder() { "placeholder" } else { "asset" },
        if stage.is_loading() { "still loading" } else { "settled" },
        showcase.applied_rotation().to_degrees()
    );
    Ok(())
}
