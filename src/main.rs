//! Cloud Chase entry point
//!
//! Plays one seeded session headlessly with the autopilot at the controls and
//! reports how it ended.
//!
//! Usage: `cloud-chase [seed] [layout.json]`

use std::process::ExitCode;

use cloud_chase::flow::{App, Screen};
use cloud_chase::headless::Autopilot;
use cloud_chase::scene::SceneLayout;

/// Give up after this many frames (five minutes at 60 Hz)
const MAX_FRAMES: u32 = 5 * 60 * 60;

fn main() -> ExitCode {
    env_logger::init();
    log::info!("Cloud Chase (headless) starting...");

    let mut args = std::env::args().skip(1);
    let seed = match args.next().map(|s| s.parse::<u64>()) {
        Some(Ok(seed)) => seed,
        Some(Err(e)) => {
            log::error!("Invalid seed: {}", e);
            return ExitCode::FAILURE;
        }
        None => 1,
    };

    let layout = match args.next() {
        Some(path) => match SceneLayout::load(&path) {
            Ok(layout) => layout,
            Err(e) => {
                log::error!("{}", e);
                return ExitCode::FAILURE;
            }
        },
        None => SceneLayout::default(),
    };

    let mut app = match App::new(layout) {
        Ok(app) => app,
        Err(e) => {
            log::error!("Scene setup failed: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let mut pilot = Autopilot::new(seed);
    let mut frames = 0;
    while frames < MAX_FRAMES {
        let Some(stage) = app.stage() else {
            break;
        };
        let pointer = pilot.pointer(stage);
        app.frame(pointer);
        frames += 1;
    }

    match &app.screen {
        Screen::Menu { did_win: true } => println!("Won after {} frames (seed {})", frames, seed),
        Screen::Menu { did_win: false } => println!("Lost after {} frames (seed {})", frames, seed),
        Screen::Game(stage) => {
            log::debug!("Camera at {}", stage.world.camera());
            println!(
                "Still running after {} frames (seed {}), {}",
                frames,
                seed,
                app.hud.lives_text.as_deref().unwrap_or("no lives shown"),
            );
        }
    }
    ExitCode::SUCCESS
}
