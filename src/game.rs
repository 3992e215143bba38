//! Game state machine
//!
//! Owns the simulation and the collaborators and runs the frame loop:
//! poll input, tick the simulation, play cues, render, and switch phases.
//!
//! ```text
//! Intro --click ship--> Play --player destroyed--> GameOver --confirm--> Intro
//!   \____________________\_____________________________\__ quit ___> Quit
//! ```

use glam::IVec2;

use crate::audio::{AudioCue, Cue};
use crate::consts::*;
use crate::error::GameResult;
use crate::format_score;
use crate::highscores::{HallOfFame, Pilot};
use crate::persistence::PersistentStore;
use crate::platform::{Clock, InputEvent, InputSource, Key, NameInput};
use crate::renderer::{Renderer, colors};
use crate::settings::Settings;
use crate::sim::{GameEvent, GamePhase, GameState, Polygon, TickInput, tick};

/// Everything the game talks to outside the simulation
pub struct Collaborators<'a> {
    pub clock: Box<dyn Clock + 'a>,
    pub input: Box<dyn InputSource + 'a>,
    pub renderer: Box<dyn Renderer + 'a>,
    pub audio: Box<dyn AudioCue + 'a>,
    pub store: Box<dyn PersistentStore + 'a>,
    pub names: Box<dyn NameInput + 'a>,
}

/// The running game
pub struct Game<'a> {
    settings: Settings,
    state: GameState,
    hall: HallOfFame,
    io: Collaborators<'a>,
    /// Last known pointer position
    pointer: Option<IVec2>,
    /// Primary button held during play
    trigger: bool,
    /// Rank earned by the last game over, if any
    last_rank: Option<usize>,
    frames: u64,
}

fn point(coords: (i32, i32)) -> IVec2 {
    IVec2::new(coords.0, coords.1)
}

impl<'a> Game<'a> {
    /// Load the hall of fame and set up the intro screen
    pub fn new(settings: Settings, mut io: Collaborators<'a>) -> GameResult<Self> {
        let hall = HallOfFame::from_entries(io.store.load_leaderboard(), HALL_OF_FAME_CAPACITY);
        let seed = settings.seed.unwrap_or_else(rand::random);
        let now = io.clock.now();
        let state = GameState::new(settings.tuning.clone(), seed, hall.top_score(), now)?;
        log::info!(
            "Game initialized with seed {} (hiscore {})",
            seed,
            hall.top_score()
        );

        let mut game = Self {
            settings,
            state,
            hall,
            io,
            pointer: None,
            trigger: false,
            last_rank: None,
            frames: 0,
        };
        game.on_enter(GamePhase::Intro, now);
        Ok(game)
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Direct access to the simulation, for scripted sessions
    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn hall(&self) -> &HallOfFame {
        &self.hall
    }

    pub fn last_rank(&self) -> Option<usize> {
        self.last_rank
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Run until the game quits. Returns the last session's score.
    pub fn run(&mut self) -> GameResult<u64> {
        while self.state.phase != GamePhase::Quit {
            self.step()?;
        }
        Ok(self.state.score())
    }

    /// One frame followed by the clock's pacing
    pub fn step(&mut self) -> GameResult<()> {
        self.frame()?;
        self.io.clock.tick(self.settings.frame_rate);
        Ok(())
    }

    /// Input, update, render for one frame
    pub fn frame(&mut self) -> GameResult<()> {
        let now = self.io.clock.now();

        for event in self.io.input.poll() {
            self.handle_event(event, now);
            if self.state.phase == GamePhase::Quit {
                return Ok(());
            }
        }

        match self.state.phase {
            GamePhase::Play => {
                let input = TickInput {
                    now,
                    pointer: self.pointer,
                    fires: self.trigger,
                };
                let events = tick(&mut self.state, &input)?;
                self.play_cues(&events);
                if self.state.phase == GamePhase::GameOver {
                    self.on_enter(GamePhase::GameOver, now);
                }
            }
            // Explosions keep animating behind the banner
            GamePhase::GameOver => self.state.advance_wreckage(now),
            GamePhase::Intro | GamePhase::Quit => {}
        }

        self.render()?;
        self.frames += 1;
        Ok(())
    }

    fn handle_event(&mut self, event: InputEvent, now: u64) {
        let phase = self.state.phase;
        match event {
            InputEvent::Quit | InputEvent::KeyDown(Key::Escape) => {
                self.transition(GamePhase::Quit, now);
            }
            InputEvent::PointerMoved(p) => self.pointer = Some(p),
            InputEvent::PointerDown if phase == GamePhase::Play => self.trigger = true,
            InputEvent::PointerUp => match phase {
                GamePhase::Intro => {
                    if self
                        .pointer
                        .is_some_and(|p| self.state.player_rect_contains(p))
                    {
                        self.transition(GamePhase::Play, now);
                    }
                }
                GamePhase::Play => self.trigger = false,
                GamePhase::GameOver => self.transition(GamePhase::Intro, now),
                GamePhase::Quit => {}
            },
            InputEvent::KeyDown(Key::Enter | Key::Space) if phase == GamePhase::GameOver => {
                self.transition(GamePhase::Intro, now);
            }
            _ => {}
        }
    }

    fn transition(&mut self, phase: GamePhase, now: u64) {
        self.state.enter(phase, now);
        self.on_enter(phase, now);
    }

    /// Side effects of entering a phase beyond the simulation's own reset
    fn on_enter(&mut self, phase: GamePhase, now: u64) {
        self.trigger = false;
        match phase {
            GamePhase::Intro => {
                self.state.hiscore = self.state.hiscore.max(self.hall.top_score());
                self.io.audio.play(Cue::Music);
            }
            GamePhase::Play => self.last_rank = None,
            GamePhase::GameOver => {
                self.io.audio.play(Cue::GameOver);
                self.record_score(now);
            }
            GamePhase::Quit => {
                log::info!("Last Euclides score: {}", self.state.score());
                self.save_hall();
                self.io.audio.fade_out(Cue::Music, MUSIC_FADE_MS);
            }
        }
    }

    /// Offer the final score to the hall of fame
    fn record_score(&mut self, now: u64) {
        let score = self.state.score();
        log::info!("Game over at {} ms with score {}", now, score);
        if !self.hall.is_eligible(score) {
            return;
        }
        if self.hall.is_new_hiscore(score) {
            log::info!("It's a new hi-score!");
        }
        let Some(pilot) = self.ask_pilot(score) else {
            log::warn!("No valid pilot name, score {} not recorded", score);
            return;
        };
        self.last_rank = self.hall.insert(pilot);
        if self.last_rank.is_some() {
            self.io.audio.play(Cue::HighScore);
        }
        self.save_hall();
    }

    fn ask_pilot(&mut self, score: u64) -> Option<Pilot> {
        for _ in 0..PILOT_NAME_ATTEMPTS {
            let name = self.io.names.prompt_name();
            match Pilot::new(&name, score) {
                Ok(pilot) => return Some(pilot),
                Err(err) => log::warn!("{}", err),
            }
        }
        None
    }

    /// Best-effort save; failures are logged and play goes on
    fn save_hall(&mut self) {
        if let Err(err) = self.io.store.save_leaderboard(self.hall.entries()) {
            log::error!("Could not save hall of fame: {}", err);
        }
    }

    fn play_cues(&mut self, events: &[GameEvent]) {
        for event in events {
            let cue = match event {
                GameEvent::WaveSpawned { .. } => Cue::WaveStart,
                GameEvent::PlayerFired => Cue::Fire,
                GameEvent::EnemyFired => Cue::EnemyFire,
                GameEvent::EnemyHit { .. } => Cue::EnemyHit,
                GameEvent::EnemyDestroyed { .. } | GameEvent::PlayerDestroyed => Cue::Explosion,
                GameEvent::ProjectileClash => Cue::Clash,
                GameEvent::PlayerHit => Cue::PlayerHit,
            };
            self.io.audio.play(cue);
        }
    }

    fn render(&mut self) -> GameResult<()> {
        let state = &self.state;
        if state.phase == GamePhase::Quit {
            return Ok(());
        }
        let r = &mut *self.io.renderer;
        r.clear(colors::BACKGROUND);
        match state.phase {
            GamePhase::Intro => {
                draw_hall(r, &self.hall);
                draw_text(r, "euclides", TITLE_COORDS, TITLE_FONT_SIZE);
                draw_text(r, "a geometric shooter", SUBTITLE_COORDS, SUBTITLE_FONT_SIZE);
                draw_polygon(r, &state.player.polygon);
            }
            GamePhase::Play => {
                draw_field(r, state);
                draw_polygon(r, &state.player.polygon);
            }
            GamePhase::GameOver => {
                draw_field(r, state);
                draw_text(r, "game over", TITLE_COORDS, TITLE_FONT_SIZE);
                if let Some(rank) = self.last_rank {
                    let line = format!("hall of fame rank {}", rank);
                    draw_text(r, &line, SUBTITLE_COORDS, SUBTITLE_FONT_SIZE);
                }
            }
            GamePhase::Quit => {}
        }
        draw_scores(r, state);
        r.present()
    }
}

// === Rendering ===

fn draw_polygon<R: Renderer + ?Sized>(r: &mut R, polygon: &Polygon) {
    let origin = IVec2::new(polygon.rect.x, polygon.rect.y);
    r.draw_polygon(&polygon.vertices(), origin, colors::SHIP, STROKE);
}

fn draw_text<R: Renderer + ?Sized>(r: &mut R, text: &str, center: (i32, i32), size: u32) {
    r.draw_text(text, point(center), size, colors::TEXT);
}

/// Enemies, both swarms and wreckage
fn draw_field<R: Renderer + ?Sized>(r: &mut R, state: &GameState) {
    for ship in state.hostile.iter() {
        draw_polygon(r, &ship.polygon);
    }
    for shot in state.fire.iter().chain(state.hostile_fire.iter()) {
        draw_polygon(r, &shot.polygon);
    }
    for boom in &state.wreckage {
        draw_polygon(r, &boom.polygon);
    }
}

/// Best pilots first, one line each
fn draw_hall<R: Renderer + ?Sized>(r: &mut R, hall: &HallOfFame) {
    let (x, top) = HALL_OF_FAME_COORDS;
    for (i, pilot) in hall.ranked().enumerate() {
        let line = format!("{:>2}. {} {:07}", i + 1, pilot.name(), pilot.score);
        let y = top + HALL_OF_FAME_LINE_HEIGHT * i as i32;
        draw_text(r, &line, (x, y), LIST_FONT_SIZE);
    }
}

fn draw_scores<R: Renderer + ?Sized>(r: &mut R, state: &GameState) {
    draw_text(r, &format_score("score", state.score()), SCORE_COORDS, SCORE_FONT_SIZE);
    draw_text(
        r,
        &format_score("hiscore", state.current_hiscore()),
        HISCORE_COORDS,
        SCORE_FONT_SIZE,
    );
}
