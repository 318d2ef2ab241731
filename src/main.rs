//! Headless driver: load an object's image cube, mesh it, and run the
//! fixed-step scheduler for a short demo simulation.

use std::env;
use std::process::ExitCode;
use std::time::Duration;

use log::{debug, error, info};

use imagevox::geom::image_mesher;
use imagevox::geom::rect::unit_rect_cube;
use imagevox::img::{self, ImageCube};
use imagevox::platform::{Options, Scheduler};

/// Simulation steps the demo loop runs before quitting.
const DEMO_STEPS: u64 = 10;

fn parse_input() -> Option<String> {
    let mut args = env::args().skip(1);
    while let Some(arg) = args.next() {
        if arg == "-i" || arg == "--input" {
            return args.next();
        }
    }
    None
}

fn run(name: &str) -> Result<(), img::Error> {
    let pattern = format!("objects/{name}/*.png");
    let cube = ImageCube::load(&pattern)?;
    cube.validate()?;

    let mesh = image_mesher::mesh_cube(&cube, &unit_rect_cube(), 1.0);
    info!(
        "{name}: {}x{}x{} -> {} vertices, {} triangles",
        cube.width(),
        cube.height(),
        cube.depth(),
        mesh.vertices.len(),
        mesh.triangle_count()
    );

    let mut steps = 0;
    let mut scheduler = Scheduler::new(
        Duration::from_millis(20),
        Box::new(move |time, step| {
            steps += 1;
            debug!("simulate t={time:?} step={step:?}");
            steps < DEMO_STEPS
        }),
        Box::new(|alpha| {
            debug!("render alpha={alpha:.2}");
            true
        }),
        Options { preserve_cpu: true },
    );
    scheduler.start();
    info!("{name}: scheduler stopped after {DEMO_STEPS} steps");

    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::new()
        .target(env_logger::Target::Stdout)
        .parse_env("RUST_LOG")
        .init();

    let Some(name) = parse_input() else {
        error!("usage: imagevox -i/--input <object name>");
        return ExitCode::FAILURE;
    };

    match run(&name) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}
