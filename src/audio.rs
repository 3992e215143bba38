//! Audio cues
//!
//! The game only says *what* should be heard; an [`AudioCue`] backend decides
//! how. [`AudioManager`] is the built-in backend: it applies volume and mute
//! and keeps track of what is currently sounding, which is enough for a
//! headless session and for tests.

use crate::settings::Settings;

/// Recent cues kept for inspection
const HISTORY: usize = 256;

/// Sound cue types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cue {
    /// Player weapon fired
    Fire,
    /// An enemy fired at the player
    EnemyFire,
    /// Enemy hull damaged
    EnemyHit,
    /// A ship blew up
    Explosion,
    /// Two projectiles cancelled out
    Clash,
    /// Player hull damaged
    PlayerHit,
    /// A new wave entered
    WaveStart,
    /// Game over banner
    GameOver,
    /// New entry in the hall of fame
    HighScore,
    /// Background loop
    Music,
}

impl Cue {
    /// Looping cues keep sounding until stopped
    pub fn is_looping(&self) -> bool {
        matches!(self, Cue::Music)
    }
}

/// Audio collaborator
pub trait AudioCue {
    fn play(&mut self, cue: Cue);
    fn stop(&mut self, cue: Cue);
    /// Fade a cue out over `ms` milliseconds
    fn fade_out(&mut self, cue: Cue, ms: u64);
}

impl<T: AudioCue + ?Sized> AudioCue for &mut T {
    fn play(&mut self, cue: Cue) {
        (**self).play(cue)
    }

    fn stop(&mut self, cue: Cue) {
        (**self).stop(cue)
    }

    fn fade_out(&mut self, cue: Cue, ms: u64) {
        (**self).fade_out(cue, ms)
    }
}

/// Volume-aware cue tracker
#[derive(Debug, Clone)]
pub struct AudioManager {
    master_volume: f32,
    sfx_volume: f32,
    music_volume: f32,
    muted: bool,
    /// Looping cues currently sounding
    active: Vec<Cue>,
    /// Recently played cues (muted ones are skipped)
    played: Vec<Cue>,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioManager {
    pub fn new() -> Self {
        Self {
            master_volume: 0.8,
            sfx_volume: 1.0,
            music_volume: 0.7,
            muted: false,
            active: Vec::new(),
            played: Vec::new(),
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        let mut audio = Self::new();
        audio.set_master_volume(settings.master_volume);
        audio.set_sfx_volume(settings.sfx_volume);
        audio.set_music_volume(settings.music_volume);
        audio.set_muted(settings.muted);
        audio
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    /// Set music volume (0.0 - 1.0)
    pub fn set_music_volume(&mut self, vol: f32) {
        self.music_volume = vol.clamp(0.0, 1.0);
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
        if muted {
            self.active.clear();
        }
    }

    /// Get effective volume for a cue
    fn effective_volume(&self, cue: Cue) -> f32 {
        if self.muted {
            return 0.0;
        }
        let channel = if cue.is_looping() {
            self.music_volume
        } else {
            self.sfx_volume
        };
        self.master_volume * channel
    }

    pub fn is_active(&self, cue: Cue) -> bool {
        self.active.contains(&cue)
    }

    /// Recent cues that made a sound, oldest first
    pub fn played(&self) -> &[Cue] {
        &self.played
    }
}

impl AudioCue for AudioManager {
    fn play(&mut self, cue: Cue) {
        let vol = self.effective_volume(cue);
        if vol <= 0.0 {
            return;
        }
        log::trace!("Cue {:?} at volume {:.2}", cue, vol);
        if self.played.len() == HISTORY {
            self.played.remove(0);
        }
        self.played.push(cue);
        if cue.is_looping() && !self.is_active(cue) {
            self.active.push(cue);
        }
    }

    fn stop(&mut self, cue: Cue) {
        self.active.retain(|&c| c != cue);
    }

    fn fade_out(&mut self, cue: Cue, ms: u64) {
        if self.is_active(cue) {
            log::debug!("Fading out {:?} over {} ms", cue, ms);
        }
        self.stop(cue);
    }
}
