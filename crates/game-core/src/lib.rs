//! Game engine entry point.

mod app;
mod input;
mod save;
mod session;
mod types;

use audio::{AssetBackend, AudioManager};
use bracket_lib::prelude::*;
use data::SaveStore;
use tracing::info;
use tracing_subscriber::EnvFilter;
use ui::{ColorPalette, ConsoleRenderer, CONSOLE_HEIGHT, CONSOLE_WIDTH};

pub use app::{AppState, TacoCatApp};
pub use input::{
    Action, AudioSettings, EdgeTrigger, GameConfig, InputConfig, InputSource, KeyNames, KeySet,
    KeyboardState,
};
pub use save::{load_session, store_session};
pub use session::{normalize_name, FrameClock, GameEvent, MapKind, Prompt, Session};
pub use types::{Home, HomeInterior, Player, QuestLog, TacoCat};

#[cfg(not(target_arch = "wasm32"))]
const CONFIG_PATH: &str = "tacocat.ron";
const TITLE: &str = "TacoCat Adventure";

/// Installs the fmt subscriber; `RUST_LOG` overrides the `info` default.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    // a second call, e.g. from tests, keeps the first subscriber
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .try_init();
}

fn save_store(config: &GameConfig) -> Box<dyn SaveStore> {
    #[cfg(target_arch = "wasm32")]
    {
        let _ = config;
        Box::new(data::LocalStorageStore)
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        Box::new(data::FileStore::new(&config.save_dir))
    }
}

fn audio_manager(settings: &AudioSettings) -> AudioManager<AssetBackend> {
    let mut audio = AudioManager::new(AssetBackend::new(&settings.asset_dir));
    audio.update_volume(settings.ambient_volume, settings.effect_volume);
    if settings.muted {
        audio.set_muted(true);
    }
    audio
}

/// Builds the app from a loaded configuration.
pub fn build_app(config: &GameConfig) -> common::GameResult<TacoCatApp> {
    let bindings = config.bindings()?;
    let palette = if config.colorblind {
        ColorPalette::colorblind()
    } else {
        ColorPalette::default()
    };
    Ok(TacoCatApp::new(
        Box::new(audio_manager(&config.audio)),
        save_store(config),
        Box::new(ConsoleRenderer::new(palette)),
        bindings,
    ))
}

/// Runs the game loop using [`bracket-lib`].
pub fn run() -> BError {
    init_tracing();
    #[cfg(target_arch = "wasm32")]
    let config = GameConfig::default();
    #[cfg(not(target_arch = "wasm32"))]
    let config = GameConfig::load(CONFIG_PATH)?;
    let app = build_app(&config)?;
    let context = BTermBuilder::simple(CONSOLE_WIDTH, CONSOLE_HEIGHT)?
        .with_title(TITLE)
        .with_advanced_input(true)
        .build()?;
    info!(
        width = CONSOLE_WIDTH,
        height = CONSOLE_HEIGHT,
        colorblind = config.colorblind,
        "console_ready"
    );
    main_loop(context, app)
}
