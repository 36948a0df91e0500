//! Common types shared across TacoCat crates.

/// Width of both playable maps in world units.
pub const WORLD_WIDTH: f32 = 800.0;
/// Height of both playable maps in world units.
pub const WORLD_HEIGHT: f32 = 600.0;

/// Simple 2D coordinate in world units.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    /// Creates a new [`Point`].
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned rectangle anchored at its top-left corner.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Rectangle covering a whole map.
    pub fn world() -> Self {
        Self::new(0.0, 0.0, WORLD_WIDTH, WORLD_HEIGHT)
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.w / 2.0, self.y + self.h / 2.0)
    }

    /// Returns the rectangle grown by `pad` on every side.
    pub fn expand(&self, pad: f32) -> Self {
        Self::new(self.x - pad, self.y - pad, self.w + pad * 2.0, self.h + pad * 2.0)
    }

    /// Half-open overlap test; rectangles that only share an edge do not overlap.
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x < other.x + other.w
            && self.x + self.w > other.x
            && self.y < other.y + other.h
            && self.y + self.h > other.y
    }
}

/// Anything occupying an axis-aligned box in the world.
pub trait Bounded {
    fn bounds(&self) -> Rect;

    fn center(&self) -> Point {
        self.bounds().center()
    }
}

impl Bounded for Rect {
    fn bounds(&self) -> Rect {
        *self
    }
}

/// Per-axis center distance thresholds for [`within_reach`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Reach {
    pub x: f32,
    pub y: f32,
}

impl Reach {
    pub const fn square(d: f32) -> Self {
        Self { x: d, y: d }
    }
}

/// Reach used for the home entrance and other outdoor prompts.
pub const OUTDOOR_REACH: Reach = Reach::square(30.0);
/// Reach used for the interior door.
pub const DOOR_REACH: Reach = Reach::square(50.0);

/// AABB overlap between two bounded entities.
pub fn overlaps(a: &impl Bounded, b: &impl Bounded) -> bool {
    a.bounds().overlaps(&b.bounds())
}

/// Center-distance proximity test, strictly below the reach on both axes.
///
/// Looser than [`overlaps`]; it decides whether an interaction is on offer.
pub fn within_reach(actor: &impl Bounded, target: &impl Bounded, reach: Reach) -> bool {
    let a = actor.center();
    let b = target.center();
    (a.x - b.x).abs() < reach.x && (a.y - b.y).abs() < reach.y
}

/// Unified error type for game logic.
#[derive(thiserror::Error, Debug)]
pub enum GameError {
    #[error("invalid operation")]
    InvalidOperation,
    #[error("malformed save: {0}")]
    MalformedSave(String),
    #[error("audio unavailable: {0}")]
    AudioUnavailable(String),
    #[error("storage failure: {0}")]
    Storage(String),
    #[error("bad config: {0}")]
    Config(String),
    #[error("render failure: {0}")]
    Render(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type GameResult<T> = Result<T, GameError>;
