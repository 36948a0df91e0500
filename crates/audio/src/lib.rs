//! Audio triggers and playback management.
//!
//! Playback is best effort: a clip that cannot be played is logged and
//! skipped, and callers never see the failure.

use std::path::PathBuf;

use bracket_lib::prelude::RandomNumberGenerator;
use common::{GameError, GameResult};
use tracing::{debug, warn};

/// Supported sound effect kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Sound {
    CoinCollected,
    ButtonClick,
    TacoCatHappy,
    SaveSuccess,
    /// Played as a random pick from [`LEVEL_UP_CLIPS`].
    LevelUp,
}

/// A named audio asset.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Clip {
    pub name: &'static str,
    pub path: &'static str,
}

pub const AMBIENT_CLIP: Clip = Clip {
    name: "ambient",
    path: "audio/320506__benpm__ambient-piano-music-1.wav",
};

pub const LEVEL_UP_CLIPS: [Clip; 6] = [
    Clip { name: "level_up_1", path: "audio/LevelUp/Alright.wav" },
    Clip { name: "level_up_2", path: "audio/LevelUp/Alright2.wav" },
    Clip { name: "level_up_3", path: "audio/LevelUp/WeDidIt.wav" },
    Clip { name: "level_up_4", path: "audio/LevelUp/Woohoo1.wav" },
    Clip { name: "level_up_5", path: "audio/LevelUp/Woohoo2.wav" },
    Clip { name: "level_up_6", path: "audio/LevelUp/WooHooYeah.wav" },
];

impl Sound {
    /// Fixed clip for this sound, `None` for pooled sounds.
    pub fn clip(self) -> Option<Clip> {
        let clip = match self {
            Sound::CoinCollected => Clip {
                name: "coin",
                path: "audio/276143__littlerobotsoundfactory__coins_single_04.wav",
            },
            Sound::ButtonClick => Clip { name: "button", path: "audio/button_click.wav" },
            Sound::TacoCatHappy => Clip { name: "happy", path: "audio/taco_cat_happy.wav" },
            Sound::SaveSuccess => Clip { name: "save", path: "audio/save_success.wav" },
            Sound::LevelUp => return None,
        };
        Some(clip)
    }
}

/// Fire-and-forget audio interface consumed by the game.
pub trait AudioSink {
    fn play(&mut self, sound: Sound);
    fn start_ambient(&mut self);
    fn stop_ambient(&mut self);
    /// Flips the mute flag and returns the new state.
    fn toggle_mute(&mut self) -> bool;
    fn is_muted(&self) -> bool;
}

/// Device-level playback used by [`AudioManager`].
pub trait ClipBackend {
    fn play(&mut self, clip: &Clip, volume: f32, looped: bool) -> GameResult<()>;
    fn stop(&mut self, clip: &Clip);
}

/// Backend resolving clips against an asset directory.
///
/// Clips are checked for presence and announced; mixing is left to the host.
#[derive(Debug)]
pub struct AssetBackend {
    root: PathBuf,
}

impl AssetBackend {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl ClipBackend for AssetBackend {
    fn play(&mut self, clip: &Clip, volume: f32, looped: bool) -> GameResult<()> {
        #[cfg(not(target_arch = "wasm32"))]
        {
            let path = self.root.join(clip.path);
            if !path.is_file() {
                return Err(GameError::AudioUnavailable(path.display().to_string()));
            }
        }
        debug!(clip = clip.name, volume, looped, "clip_play");
        Ok(())
    }

    fn stop(&mut self, clip: &Clip) {
        debug!(clip = clip.name, "clip_stop");
    }
}

/// Audio manager holding mute state and volume levels.
pub struct AudioManager<B: ClipBackend> {
    backend: B,
    muted: bool,
    ambient_volume: f32,
    effect_volume: f32,
    rng: RandomNumberGenerator,
}

impl<B: ClipBackend> AudioManager<B> {
    /// Creates an unmuted manager with the default 0.3 ambient and 0.5 effect volume.
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            muted: false,
            ambient_volume: 0.3,
            effect_volume: 0.5,
            rng: RandomNumberGenerator::new(),
        }
    }

    pub fn with_rng(mut self, rng: RandomNumberGenerator) -> Self {
        self.rng = rng;
        self
    }

    /// Sets both volume levels, clamped to `0.0..=1.0`.
    pub fn update_volume(&mut self, ambient: f32, effect: f32) {
        self.ambient_volume = ambient.clamp(0.0, 1.0);
        self.effect_volume = effect.clamp(0.0, 1.0);
    }

    pub fn ambient_volume(&self) -> f32 {
        self.ambient_volume
    }

    pub fn effect_volume(&self) -> f32 {
        self.effect_volume
    }

    /// Sets the mute flag, stopping or resuming the ambient loop.
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
        if muted {
            self.stop_ambient();
        } else {
            self.start_ambient();
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    fn play_clip(&mut self, clip: Clip, volume: f32, looped: bool) {
        if let Err(e) = self.backend.play(&clip, volume, looped) {
            warn!(clip = clip.name, error = %e, "audio_unavailable");
        }
    }
}

impl<B: ClipBackend> AudioSink for AudioManager<B> {
    fn play(&mut self, sound: Sound) {
        if self.muted {
            return;
        }
        let clip = match sound.clip() {
            Some(clip) => clip,
            None => {
                let idx = self.rng.range(0, LEVEL_UP_CLIPS.len());
                LEVEL_UP_CLIPS[idx]
            }
        };
        self.play_clip(clip, self.effect_volume, false);
    }

    fn start_ambient(&mut self) {
        if !self.muted {
            self.play_clip(AMBIENT_CLIP, self.ambient_volume, true);
        }
    }

    fn stop_ambient(&mut self) {
        self.backend.stop(&AMBIENT_CLIP);
    }

    fn toggle_mute(&mut self) -> bool {
        let muted = !self.muted;
        self.set_muted(muted);
        muted
    }

    fn is_muted(&self) -> bool {
        self.muted
    }
}
