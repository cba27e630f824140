//! Lane Racer headless entry point
//!
//! Drives the simulation at a fixed step with an autopilot standing in for
//! the keyboard, logs the HUD once per simulated second, and prints the
//! final snapshot as JSON.

use std::path::PathBuf;

use lane_racer::consts::SIM_DT;
use lane_racer::sim::{GameEvent, SessionSnapshot, Simulation, TickInput};
use lane_racer::{GamePhase, Settings};

/// Runs to play before quitting from the game over screen
const RUNS: u32 = 3;
/// Hard cap on simulated time (seconds)
const MAX_SECONDS: f32 = 600.0;

fn main() {
    env_logger::init();
    log::info!("Lane Racer (headless) starting...");

    let mut settings = settings_path()
        .map(|path| Settings::load(&path))
        .unwrap_or_default()
        .sanitized();
    if settings.seed.is_none() {
        settings.seed = Some(time_seed());
    }

    let mut sim = Simulation::new(settings.clone());
    let mut snapshot = sim.reset();
    let mut runs = 0;
    let mut elapsed = 0.0;
    let mut next_hud = 1.0;

    while !snapshot.quit_requested && elapsed < MAX_SECONDS {
        let input = match snapshot.phase {
            GamePhase::Running => autopilot(&snapshot, &settings),
            GamePhase::GameOver => TickInput {
                confirm: runs < RUNS,
                quit: runs >= RUNS,
                ..Default::default()
            },
        };

        snapshot = sim.tick(SIM_DT, &input);
        elapsed += SIM_DT;

        for event in sim.events() {
            match event {
                GameEvent::Collision { kind, health, .. } => {
                    log::info!("Crash! Hit {:?}, health {}%", kind, health);
                }
                GameEvent::GameOver { score } => {
                    runs += 1;
                    log::info!("Run {} over at {:.1}s, score {}", runs, elapsed, score);
                }
                _ => {}
            }
        }

        if elapsed >= next_hud {
            log::info!("{}", snapshot.hud_lines().join(" | "));
            next_hud += 1.0;
        }
    }

    match serde_json::to_string_pretty(&snapshot) {
        Ok(json) => println!("{json}"),
        Err(e) => log::error!("Could not serialize final snapshot: {}", e),
    }
}

/// Settings file from the first argument, else the environment
fn settings_path() -> Option<PathBuf> {
    std::env::args()
        .nth(1)
        .or_else(|| std::env::var(Settings::ENV_PATH).ok())
        .map(PathBuf::from)
}

fn time_seed() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(lane_racer::sim::DEFAULT_SEED)
}

/// Steer away from the closest obstacle heading into the player's column
fn autopilot(snapshot: &SessionSnapshot, settings: &Settings) -> TickInput {
    let player = &snapshot.player;
    let player_center = player.x + player.width / 2.0;

    let threat = snapshot
        .obstacles
        .iter()
        .filter(|o| o.y + o.height > player.y)
        .filter(|o| o.x < player.x + player.width && o.x + o.width > player.x)
        .min_by(|a, b| a.y.partial_cmp(&b.y).unwrap_or(std::cmp::Ordering::Equal));

    let Some(threat) = threat else {
        return TickInput::default();
    };

    // Dodge away from the threat unless pinned against that side of the lane
    let threat_center = threat.x + threat.width / 2.0;
    let room_left = player.x - settings.lane_min_x();
    let room_right = settings.lane_max_x() - player.x;
    let go_left = if threat_center >= player_center {
        room_left > 0.0
    } else {
        room_right <= 0.0
    };

    TickInput {
        move_left: go_left,
        move_right: !go_left,
        ..Default::default()
    }
}
