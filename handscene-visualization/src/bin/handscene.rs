//! Hand-tracked scene viewer
//!
//! Runs the tracking session against a landmark recording (or a scripted
//! sweeping hand when no recording is given) and a virtual camera, and shows
//! the result in a window.
//!
//! Run with: cargo run --bin handscene -- --replay hands.jsonl

use anyhow::{anyhow, Context, Result};
use bevy::prelude::*;
use clap::Parser;
use handscene_core::LatestLandmarks;
use handscene_io::{load_config_or_default, LandmarkTimeline, Recording, ScriptedHand};
use handscene_session::{CaptureEnvironment, Session, TimelineLoader, VirtualCamera};
use handscene_visualization::{HandscenePlugin, SessionHandle};
use std::path::PathBuf;
use tracing::warn;

#[derive(Parser, Debug)]
#[command(name = "handscene", about = "Touch a 3D tool with your tracked index finger")]
struct Args {
    /// Configuration file; defaults apply when it does not exist
    #[arg(short, long, default_value = "handscene.toml")]
    config: PathBuf,

    /// Landmark recording (JSON Lines) to play back instead of the scripted hand
    #[arg(short, long)]
    replay: Option<PathBuf>,

    /// Add a second scripted hand
    #[arg(long)]
    two_hands: bool,

    /// Behave as if served from an insecure origin, so camera setup fails
    #[arg(long)]
    insecure: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let config = load_config_or_default(&args.config)
        .with_context(|| format!("loading {}", args.config.display()))?;

    let timeline: Box<dyn LandmarkTimeline> = match &args.replay {
        Some(path) => Box::new(
            Recording::read_from_path(path).with_context(|| format!("reading {}", path.display()))?,
        ),
        None if args.two_hands => Box::new(ScriptedHand::default().with_mirrored_hand()),
        None => Box::new(ScriptedHand::default()),
    };

    let environment = if args.insecure {
        CaptureEnvironment {
            secure_context: false,
            ..CaptureEnvironment::secure("http://0.0.0.0:8080")
        }
    } else {
        CaptureEnvironment::default()
    };

    let landmarks = LatestLandmarks::new();
    let mut session = Session::new(
        Box::new(TimelineLoader::new(timeline)),
        Box::new(VirtualCamera::new().with_environment(environment)),
        landmarks.clone(),
    )
    .with_options(config.tracker.clone())
    .with_constraints(config.capture.clone());

    let (width, height) = (config.scene.window_width as f32, config.scene.window_height as f32);
    let mut app = App::new();
    app.add_plugins(DefaultPlugins.set(WindowPlugin {
        primary_window: Some(Window {
            title: "Virtual Surgery".to_string(),
            resolution: (width, height).into(),
            ..default()
        }),
        ..default()
    }))
    .add_plugins(HandscenePlugin::new(config).with_landmarks(landmarks));

    // Setup runs after the log plugin is installed so its messages show up.
    // A failed setup is reported in the overlay, not fatal.
    if let Err(e) = pollster::block_on(session.start()) {
        warn!(error = %e, "tracking setup did not complete");
    }
    app.insert_non_send_resource(SessionHandle::new(session));

    match app.run() {
        AppExit::Success => Ok(()),
        AppExit::Error(code) => Err(anyhow!("viewer exited with code {}", code)),
    }
}
