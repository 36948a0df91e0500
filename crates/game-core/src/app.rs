use std::collections::HashSet;

use audio::{AudioSink, Sound};
use bracket_lib::prelude::*;
use common::GameResult;
use data::{now_millis, SaveStore, SAVE_KEY};
use tracing::{info, warn};
use ui::{MenuView, RenderSink};

use crate::input::{typed_char, InputConfig, KeyboardState};
use crate::save::{load_session, store_session};
use crate::session::Session;

const MAX_NAME_LEN: usize = 20;
const STATUS_SAVE_FOUND: &str = "Save file found - Continue available!";
const STATUS_NO_SAVE: &str = "No save file found";
const STATUS_LOAD_ERROR: &str = "Error loading save file";
const STATUS_SAVED: &str = "Game saved successfully!";

pub enum AppState {
    Menu,
    Naming { name: String },
    Playing(Box<Session>),
}

/// Top-level state machine wiring a session to its collaborators.
pub struct TacoCatApp {
    state: AppState,
    audio: Box<dyn AudioSink>,
    store: Box<dyn SaveStore>,
    renderer: Box<dyn RenderSink>,
    bindings: InputConfig,
    status: String,
    has_save: bool,
    clock_ms: f64,
    seed: Option<u64>,
}

impl TacoCatApp {
    pub fn new(
        audio: Box<dyn AudioSink>,
        store: Box<dyn SaveStore>,
        renderer: Box<dyn RenderSink>,
        bindings: InputConfig,
    ) -> Self {
        let mut app = Self {
            state: AppState::Menu,
            audio,
            store,
            renderer,
            bindings,
            status: String::new(),
            has_save: false,
            clock_ms: 0.0,
            seed: None,
        };
        app.refresh_status();
        app
    }

    /// Makes every new session use the same random sequence.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn store(&self) -> &dyn SaveStore {
        self.store.as_ref()
    }

    fn rng(&self) -> RandomNumberGenerator {
        match self.seed {
            Some(seed) => RandomNumberGenerator::seeded(seed),
            None => RandomNumberGenerator::new(),
        }
    }

    fn refresh_status(&mut self) {
        self.has_save = match self.store.get(SAVE_KEY) {
            Ok(found) => found.is_some(),
            Err(e) => {
                warn!(error = %e, "save_check_failed");
                false
            }
        };
        self.status = if self.has_save {
            STATUS_SAVE_FOUND
        } else {
            STATUS_NO_SAVE
        }
        .to_string();
    }

    /// Handles this frame's key press. Returns `true` when the app should quit.
    fn update_state(&mut self, key: Option<VirtualKeyCode>, shift: bool) -> bool {
        let Some(key) = key else {
            return false;
        };
        match &mut self.state {
            AppState::Menu => match key {
                VirtualKeyCode::N => {
                    self.audio.play(Sound::ButtonClick);
                    self.state = AppState::Naming {
                        name: String::new(),
                    };
                }
                VirtualKeyCode::C if self.has_save => {
                    self.audio.play(Sound::ButtonClick);
                    self.continue_game();
                }
                VirtualKeyCode::M => {
                    self.audio.toggle_mute();
                }
                VirtualKeyCode::Q => return true,
                _ => {}
            },
            AppState::Naming { name } => match key {
                VirtualKeyCode::Return | VirtualKeyCode::NumpadEnter => {
                    let name = std::mem::take(name);
                    self.start_new(&name);
                }
                VirtualKeyCode::Escape => self.state = AppState::Menu,
                VirtualKeyCode::Back => {
                    name.pop();
                }
                k => {
                    if let Some(c) = typed_char(k, shift) {
                        if name.chars().count() < MAX_NAME_LEN {
                            name.push(c);
                        }
                    }
                }
            },
            AppState::Playing(_) => {
                if key == self.bindings.save {
                    self.save_game();
                } else if key == self.bindings.menu {
                    self.to_menu();
                } else if key == self.bindings.mute {
                    self.audio.toggle_mute();
                }
            }
        }
        false
    }

    fn start_new(&mut self, name: &str) {
        if let Err(e) = self.store.remove(SAVE_KEY) {
            warn!(error = %e, "save_clear_failed");
        }
        let mut session = Session::new(name, self.rng());
        session.start();
        info!(name = %session.character_name(), "new_game_started");
        self.begin(session);
    }

    fn continue_game(&mut self) {
        match load_session(self.store.as_ref(), self.rng()) {
            Ok(Some(mut session)) => {
                session.start();
                self.begin(session);
            }
            Ok(None) => {
                self.has_save = false;
                self.status = STATUS_NO_SAVE.to_string();
            }
            Err(e) => {
                warn!(error = %e, "save_load_failed");
                self.status = STATUS_LOAD_ERROR.to_string();
            }
        }
    }

    fn begin(&mut self, session: Session) {
        self.audio.start_ambient();
        self.state = AppState::Playing(Box::new(session));
    }

    fn save_game(&mut self) {
        let AppState::Playing(session) = &mut self.state else {
            return;
        };
        match store_session(session, self.store.as_mut(), now_millis()) {
            Ok(()) => {
                self.audio.play(Sound::SaveSuccess);
                session.notify("Your progress has been saved");
                self.has_save = true;
                self.status = STATUS_SAVED.to_string();
            }
            Err(e) => {
                warn!(error = %e, "save_failed");
                session.notify("Save failed");
            }
        }
    }

    /// Returns to the menu, handing back the stopped session if one was playing.
    fn to_menu(&mut self) -> Option<Box<Session>> {
        let previous = std::mem::replace(&mut self.state, AppState::Menu);
        self.audio.stop_ambient();
        self.refresh_status();
        match previous {
            AppState::Playing(mut session) => {
                session.stop();
                info!(name = %session.character_name(), "returned_to_menu");
                Some(session)
            }
            _ => None,
        }
    }

    /// Runs one simulation tick if a session is playing.
    fn advance(&mut self, pressed: &HashSet<VirtualKeyCode>) {
        let AppState::Playing(session) = &mut self.state else {
            return;
        };
        let input = KeyboardState::new(&self.bindings, pressed);
        if let Err(e) = session.update(self.clock_ms, &input, self.audio.as_mut()) {
            warn!(error = %e, "tick_skipped");
        }
    }

    fn draw(&mut self) -> GameResult<()> {
        let muted = self.audio.is_muted();
        match &self.state {
            AppState::Playing(session) => self.renderer.render(&session.frame(muted)),
            AppState::Menu | AppState::Naming { .. } => {
                let naming = match &self.state {
                    AppState::Naming { name } => Some(name.clone()),
                    _ => None,
                };
                self.renderer.render_menu(&MenuView {
                    status: self.status.clone(),
                    can_continue: self.has_save,
                    naming,
                    muted,
                })
            }
        }
    }
}

impl GameState for TacoCatApp {
    fn tick(&mut self, ctx: &mut BTerm) {
        self.clock_ms += ctx.frame_time_ms as f64;
        if self.update_state(ctx.key, ctx.shift) {
            ctx.quit();
            return;
        }
        let pressed = INPUT.lock().key_pressed_set().clone();
        self.advance(&pressed);
        if let Err(e) = self.draw() {
            warn!(error = %e, "render_failed");
        }
        if let Err(e) = render_draw_buffer(ctx) {
            warn!(error = %e, "draw_buffer_failed");
        }
    }
}
