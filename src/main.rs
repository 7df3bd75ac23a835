use std::error::Error;

use clap::Parser;

use termcam::camera::CameraCapture;
use termcam::cli::{handle_config_action, list_cameras, Args, Command};
use termcam::config::{Config, Settings};
use termcam::greenscreen::{BackgroundSample, SAMPLE_COUNT};
use termcam::pipeline::{Pipeline, ShutdownSignal};
use termcam::terminal::{CrosstermTerminal, ScreenGuard};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse();

    let result: Result<(), Box<dyn Error>> = match &args.command {
        Some(Command::ListCameras) => list_cameras().map_err(Into::into),
        Some(Command::Config { action }) => {
            handle_config_action(action.clone(), args.config.as_deref()).map_err(Into::into)
        }
        None => run(&args),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(args: &Args) -> Result<(), Box<dyn Error>> {
    let config = Config::load(args.config.as_deref())?;
    let settings = Settings::resolve(args, &config)?;

    let shutdown = ShutdownSignal::new();
    if let Err(e) = shutdown.install_ctrlc_handler() {
        log::warn!("Could not set up Ctrl+C handler: {}", e);
    }

    let mut terminal = CrosstermTerminal::stdout();
    if let Some(profile) = settings.profile {
        terminal = terminal.with_profile(profile);
    }

    let camera = CameraCapture::open(settings.camera.clone())?;
    let mut pipeline = Pipeline::new(camera, terminal, settings.pipeline_options());

    if settings.needs_background() {
        let policy = settings.sample_choice.policy();
        let background = BackgroundSample::load(
            &settings.sample_store(),
            policy.as_ref(),
            pipeline.scaled_grid(),
        )
        .map_err(|e| format!("could not load background sample: {}", e))?;
        pipeline = pipeline.with_background(background);
    }

    if settings.generate {
        let summary = pipeline.run(&shutdown)?;
        if summary.samples_saved >= SAMPLE_COUNT {
            println!("Generated {} background samples", summary.samples_saved);
        } else {
            println!(
                "Stopped after {} of {} background samples",
                summary.samples_saved, SAMPLE_COUNT
            );
        }
        return Ok(());
    }

    let summary = {
        let _guard = ScreenGuard::enter()?;
        pipeline.run(&shutdown)?
    };
    log::info!(
        "Rendered {} frames ({} capture failures)",
        summary.frames_rendered,
        summary.capture_failures
    );
    Ok(())
}
