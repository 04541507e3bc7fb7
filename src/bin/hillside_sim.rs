//! Hillside Sim - Headless Simulation Driver
//!
//! Run with: `cargo run --bin hillside_sim -- --frames 900 --summary out.json`
//!
//! Builds the terrain scene, scatters a few ground-snapped props, then replays
//! a scripted input sequence (walk, turn, run, jump, orbit drag) and logs the
//! character and camera transforms as it goes.

use std::error::Error;
use std::path::PathBuf;

use clap::Parser;
use glam::Vec3;
use log::info;

use hillside_engine::game::{SimConfig, Simulation};
use hillside_engine::input::{InputState, KeyCode};
use hillside_engine::logging;
use hillside_engine::world::SpaceMode;

/// Headless terrain/character/camera simulation
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// JSON simulation config (defaults are used when omitted)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of frames to simulate
    #[arg(short, long, default_value_t = 600)]
    frames: u32,

    /// Frame time in seconds
    #[arg(long, default_value_t = 1.0 / 60.0)]
    dt: f32,

    /// Force indoor mode regardless of the config
    #[arg(long)]
    indoor: bool,

    /// Write a JSON summary of the run to this path
    #[arg(short, long)]
    summary: Option<PathBuf>,

    /// Print the effective config as JSON and exit
    #[arg(long)]
    print_config: bool,

    /// Log every Nth frame
    #[arg(long, default_value_t = 60)]
    log_every: u32,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

/// Scripted input phases, in seconds.
fn apply_script(time: f32, input: &mut InputState) {
    let keys = &mut input.keys;
    keys.handle_key(KeyCode::W, (0.0..6.0).contains(&time) || time >= 8.0);
    keys.handle_key(KeyCode::A, (2.0..3.0).contains(&time));
    keys.handle_key(KeyCode::D, (6.5..7.0).contains(&time));
    keys.handle_key(KeyCode::ShiftLeft, (4.0..6.0).contains(&time));
    keys.handle_key(KeyCode::Space, (3.5..3.6).contains(&time) || (8.5..8.6).contains(&time));

    let orbit = &mut input.orbit;
    if (6.0..7.0).contains(&time) {
        orbit.begin_drag();
        orbit.accumulate_yaw(0.02);
    } else if orbit.is_dragging() {
        orbit.end_drag();
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    logging::init(args.verbose);

    let mut config = match &args.config {
        Some(path) => {
            info!("Loading config from {}", path.display());
            SimConfig::load(path)?
        }
        None => SimConfig::default(),
    };
    if args.indoor {
        config.mode = SpaceMode::Indoor;
    }
    if args.print_config {
        println!("{}", config.to_json_string()?);
        return Ok(());
    }

    let mut sim = Simulation::new(config)?;
    for (i, offset) in [(-3.0, 2.0), (6.0, -4.0), (10.0, 3.0)].iter().enumerate() {
        let position = sim.config().spawn + Vec3::new(offset.0, 5.0, offset.1);
        sim.spawn_prop(&format!("boulder_{i}"), position, 0.3, Some(0.5))?;
    }

    let mut input = InputState::new();
    let mut time = 0.0f32;
    let log_every = args.log_every.max(1);

    for frame in 0..args.frames {
        apply_script(time, &mut input);
        let transform = sim.tick(args.dt, &mut input);
        time += args.dt;

        if frame % log_every == 0 {
            let camera = sim.camera_state();
            info!(
                "t={:.2}s pos=({:.2}, {:.2}, {:.2}) yaw={:.2} moving={} jumping={} on {} | camera=({:.2}, {:.2}, {:.2}) offset={:.3}",
                time,
                transform.position.x,
                transform.position.y,
                transform.position.z,
                transform.yaw,
                transform.is_moving,
                transform.is_jumping(),
                sim.terrain_type(transform.position),
                camera.position.x,
                camera.position.y,
                camera.position.z,
                camera.manual_yaw_offset,
            );
        }
    }

    let summary = sim.summary();
    info!(
        "Done: {} frames, {} raycasts, {} snap sweeps",
        summary.frames, summary.raycasts, summary.snap_sweeps
    );

    if let Some(path) = &args.summary {
        std::fs::write(path, serde_json::to_string_pretty(&summary)?)?;
        info!("Summary written to {}", path.display());
    }

    Ok(())
}
