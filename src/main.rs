//! Euclides headless runner
//!
//! Reads `euclides.json` if present and plays an attract session: the
//! autopilot starts a game, sweeps the ship while firing and restarts after
//! every game over. Set `RUST_LOG=info` to follow along.

use std::io::{self, IsTerminal};
use std::path::Path;
use std::process::ExitCode;

use euclides::audio::AudioManager;
use euclides::persistence::JsonFileStore;
use euclides::platform::{Autopilot, FixedName, NameInput, StdinNameInput, SystemClock, require_assets};
use euclides::renderer::MeshRenderer;
use euclides::{Collaborators, Game, GameResult, Settings};

const SETTINGS_PATH: &str = "euclides.json";

/// Attract session length in seconds
const SESSION_SECONDS: u64 = 60;

fn main() -> ExitCode {
    env_logger::init();
    log::info!("Euclides starting...");

    match play() {
        Ok(score) => {
            log::info!("Session finished with score {}", score);
            ExitCode::SUCCESS
        }
        Err(err) => {
            log::error!("{}", err);
            eprintln!("euclides: {}", err);
            ExitCode::FAILURE
        }
    }
}

fn play() -> GameResult<u64> {
    let settings = Settings::load(Path::new(SETTINGS_PATH));
    require_assets(&settings.assets)?;

    let tuning = &settings.tuning;
    // Ask for a name only when someone is at the keyboard
    let names: Box<dyn NameInput> = if io::stdin().is_terminal() {
        Box::new(StdinNameInput)
    } else {
        Box::new(FixedName("AUTO".to_string()))
    };
    let collaborators = Collaborators {
        clock: Box::new(SystemClock::new()),
        input: Box::new(Autopilot::new(
            tuning.player_start(),
            tuning.screen_width,
            SESSION_SECONDS * u64::from(settings.frame_rate),
        )),
        renderer: Box::new(MeshRenderer::new(
            tuning.screen_width.max(1) as u32,
            tuning.screen_height.max(1) as u32,
        )),
        audio: Box::new(AudioManager::from_settings(&settings)),
        store: Box::new(JsonFileStore::new(&settings.leaderboard_path)),
        names,
    };

    let mut game = Game::new(settings, collaborators)?;
    game.run()
}
