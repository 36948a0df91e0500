//! Render snapshots, notifications and the console renderer.
use bracket_lib::prelude::{
    RGB, BLACK, BROWN1, CYAN, DARK_GREEN, FORESTGREEN, GOLD, GRAY, GREEN, LIGHTGREEN, ORANGE,
    PINK, RED, SADDLEBROWN, WHITE, YELLOW,
};
use common::{GameResult, Point, Rect};

mod console;

pub use console::{
    cell_span, coin_glyph, fade, to_cell, ConsoleRenderer, CONSOLE_HEIGHT, CONSOLE_WIDTH, MAP_ROWS,
};

/// How long a toast stays on screen.
pub const TOAST_MS: f64 = 2000.0;

/// Which map a frame shows.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MapView {
    World,
    Home,
}

#[derive(Clone, Debug, PartialEq)]
pub struct CoinSprite {
    pub bounds: Rect,
    pub rotation: f32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct TacoCatSprite {
    pub bounds: Rect,
    pub happiness_level: u32,
    pub total_received: u32,
    pub given: u32,
    pub needed: u32,
    pub show_progress: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct HomeSprite {
    pub bounds: Rect,
    /// Chimney smoke phase.
    pub smoke_phase: f32,
}

/// Interaction hint floating above the player.
#[derive(Clone, Debug, PartialEq)]
pub struct PromptView {
    pub text: &'static str,
    pub anchor: Point,
}

/// Level-up banner with its current opacity.
#[derive(Clone, Debug, PartialEq)]
pub struct BannerView {
    pub level: u32,
    pub alpha: f32,
}

/// Status bar values.
#[derive(Clone, Debug, PartialEq)]
pub struct Hud {
    pub name: String,
    pub level: u32,
    pub coins: u32,
    pub health: u32,
    pub food: u32,
    pub exp: u32,
    pub exp_needed: u32,
    pub exp_percent: f32,
    pub quest: String,
}

/// Read-only snapshot of everything a playing session shows.
#[derive(Clone, Debug, PartialEq)]
pub struct Frame {
    pub map: MapView,
    pub player: Rect,
    pub coins: Vec<CoinSprite>,
    pub taco_cat: TacoCatSprite,
    pub home: HomeSprite,
    pub door: Rect,
    pub prompt: Option<PromptView>,
    pub banner: Option<BannerView>,
    pub toasts: Vec<String>,
    pub hud: Hud,
    pub muted: bool,
}

/// Snapshot of the start menu.
#[derive(Clone, Debug, PartialEq)]
pub struct MenuView {
    pub status: String,
    pub can_continue: bool,
    /// Name typed so far while the naming prompt is open.
    pub naming: Option<String>,
    pub muted: bool,
}

/// Consumer of frame snapshots.
pub trait RenderSink {
    fn render(&mut self, frame: &Frame) -> GameResult<()>;
    fn render_menu(&mut self, menu: &MenuView) -> GameResult<()>;
}

/// Color palette for map and entity rendering.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ColorPalette {
    pub grass: RGB,
    pub grass_shades: [RGB; 4],
    pub player: RGB,
    pub coin: RGB,
    pub taco_cat: RGB,
    pub home: RGB,
    pub floor: RGB,
    pub wall: RGB,
    pub text: RGB,
}

impl Default for ColorPalette {
    fn default() -> Self {
        Self {
            grass: RGB::named(FORESTGREEN),
            grass_shades: [
                RGB::named(LIGHTGREEN),
                RGB::named(GREEN),
                RGB::named(FORESTGREEN),
                RGB::named(DARK_GREEN),
            ],
            player: RGB::named(ORANGE),
            coin: RGB::named(GOLD),
            taco_cat: RGB::named(YELLOW),
            home: RGB::named(BROWN1),
            floor: RGB::named(SADDLEBROWN),
            wall: RGB::named(GRAY),
            text: RGB::named(WHITE),
        }
    }
}

impl ColorPalette {
    /// Returns a high contrast palette suitable for colorblind players.
    pub fn colorblind() -> Self {
        Self {
            grass: RGB::named(BLACK),
            grass_shades: [RGB::named(GRAY); 4],
            player: RGB::named(CYAN),
            coin: RGB::named(YELLOW),
            taco_cat: RGB::named(PINK),
            home: RGB::named(WHITE),
            floor: RGB::named(BLACK),
            wall: RGB::named(WHITE),
            text: RGB::named(WHITE),
        }
    }

    /// Color used for a flower, red ones stay red in both palettes.
    pub fn flower(&self, orange: bool) -> RGB {
        if orange {
            RGB::named(ORANGE)
        } else {
            RGB::named(RED)
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
struct Toast {
    text: String,
    at_ms: f64,
}

/// Short-lived on-screen notifications.
#[derive(Clone, Debug, Default)]
pub struct MessageLog {
    toasts: Vec<Toast>,
}

impl MessageLog {
    /// Adds a message shown from `now_ms` for [`TOAST_MS`].
    pub fn add(&mut self, msg: &str, now_ms: f64) {
        self.toasts.push(Toast {
            text: msg.to_string(),
            at_ms: now_ms,
        });
    }

    /// Drops messages that have expired.
    pub fn prune(&mut self, now_ms: f64) {
        self.toasts.retain(|t| now_ms - t.at_ms < TOAST_MS);
    }

    /// Messages still on screen at `now_ms`, oldest first.
    pub fn visible(&self, now_ms: f64) -> Vec<String> {
        self.toasts
            .iter()
            .filter(|t| now_ms - t.at_ms < TOAST_MS)
            .map(|t| t.text.clone())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.toasts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.toasts.is_empty()
    }
}

/// Fixed-width ASCII bar, e.g. `[#####-----]`.
pub fn meter_bar(value: u32, max: u32) -> String {
    let width = 10;
    let filled = if max == 0 {
        0
    } else {
        (((value as f32 / max as f32) * width as f32).round() as usize).min(width)
    };
    format!("[{}{}]", "#".repeat(filled), "-".repeat(width - filled))
}

/// Status bar lines for a frame.
pub fn hud_lines(hud: &Hud) -> Vec<String> {
    vec![
        format!(
            "{}  Lv {}  Coins: {}  Health: {}  Food: {}",
            hud.name, hud.level, hud.coins, hud.health, hud.food
        ),
        format!(
            "EXP {} {} / {} ({:.0}%)",
            meter_bar(hud.exp, hud.exp_needed),
            hud.exp,
            hud.exp_needed,
            hud.exp_percent
        ),
        format!("Quest: {}", hud.quest),
    ]
}

fn help_strings(map: MapView) -> Vec<&'static str> {
    match map {
        MapView::World => vec![
            "Arrows/WASD: move  SPACE: interact",
            "F5: save  Esc: menu  M: mute",
        ],
        MapView::Home => vec![
            "Walk to the door and press SPACE to leave",
            "F5: save  Esc: menu  M: mute",
        ],
    }
}
