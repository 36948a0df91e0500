use common::{Bounded, Point, Rect, WORLD_HEIGHT, WORLD_WIDTH};
use progression::{Experience, Happiness, LevelUp, EXP_PER_COIN};

pub const PLAYER_SIZE: f32 = 20.0;
/// Units moved per tick on each held axis.
pub const PLAYER_SPEED: f32 = 3.0;
pub const PLAYER_START: Point = Point { x: 400.0, y: 300.0 };
pub const MAX_VITAL: u32 = 100;
const LEVEL_UP_RESTORE: u32 = 10;

pub const TACO_CAT_SIZE: f32 = 30.0;
pub const TACO_CAT_POSITION: Point = Point { x: 100.0, y: 100.0 };

pub const HOME_POSITION: Point = Point { x: 650.0, y: 100.0 };
pub const HOME_WIDTH: f32 = 40.0;
pub const HOME_HEIGHT: f32 = 35.0;
const SMOKE_STEP: f32 = 0.02;
const NEARBY_STEP: f32 = 0.05;

/// Where the player appears after walking into the home.
pub const INTERIOR_ENTRY: Point = Point { x: 400.0, y: 300.0 };
/// Where the player appears after leaving the home.
pub const WORLD_RETURN: Point = Point { x: 650.0, y: 120.0 };

pub const QUEST_TEXT: &str = "Find and collect coins to give to TacoCat!";

/// Player entity with vitals, wallet and experience curve.
#[derive(Clone, Debug, PartialEq)]
pub struct Player {
    pub position: Point,
    pub coins: u32,
    pub health: u32,
    pub food: u32,
    pub experience: Experience,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            position: PLAYER_START,
            coins: 0,
            health: MAX_VITAL,
            food: MAX_VITAL,
            experience: Experience::default(),
        }
    }
}

impl Player {
    /// Moves by the given delta, clamping each axis to the map independently.
    pub fn move_by(&mut self, dx: f32, dy: f32) {
        self.position.x = (self.position.x + dx).clamp(0.0, WORLD_WIDTH - PLAYER_SIZE);
        self.position.y = (self.position.y + dy).clamp(0.0, WORLD_HEIGHT - PLAYER_SIZE);
    }

    /// Teleports to `p`, still respecting the map bounds.
    pub fn place(&mut self, p: Point) {
        self.position = p;
        self.move_by(0.0, 0.0);
    }

    /// Picks up one coin. Returns the level-up it caused, if any.
    pub fn collect_coin(&mut self) -> Option<LevelUp> {
        self.coins = self.coins.saturating_add(1);
        let up = self.experience.gain(EXP_PER_COIN);
        if up.is_some() {
            self.health = (self.health + LEVEL_UP_RESTORE).min(MAX_VITAL);
            self.food = (self.food + LEVEL_UP_RESTORE).min(MAX_VITAL);
        }
        up
    }

    /// Empties the wallet and returns what it held.
    pub fn give_all_coins(&mut self) -> u32 {
        std::mem::take(&mut self.coins)
    }
}

impl Bounded for Player {
    fn bounds(&self) -> Rect {
        Rect::new(self.position.x, self.position.y, PLAYER_SIZE, PLAYER_SIZE)
    }
}

/// The stationary coin collector.
#[derive(Clone, Debug, PartialEq)]
pub struct TacoCat {
    pub position: Point,
    pub happiness: Happiness,
}

impl Default for TacoCat {
    fn default() -> Self {
        Self {
            position: TACO_CAT_POSITION,
            happiness: Happiness::default(),
        }
    }
}

impl TacoCat {
    /// Accepts a delivery and returns the happiness levels gained.
    pub fn receive(&mut self, amount: u32) -> u32 {
        self.happiness.give(amount)
    }
}

impl Bounded for TacoCat {
    fn bounds(&self) -> Rect {
        Rect::new(self.position.x, self.position.y, TACO_CAT_SIZE, TACO_CAT_SIZE)
    }
}

/// The player's house on the world map.
#[derive(Clone, Debug, PartialEq)]
pub struct Home {
    pub position: Point,
    /// Chimney smoke phase, cosmetic only.
    pub animation: f32,
}

impl Default for Home {
    fn default() -> Self {
        Self {
            position: HOME_POSITION,
            animation: 0.0,
        }
    }
}

impl Home {
    pub fn animate(&mut self, player_nearby: bool) {
        self.animation += SMOKE_STEP;
        if player_nearby {
            self.animation += NEARBY_STEP;
        }
    }
}

impl Bounded for Home {
    fn bounds(&self) -> Rect {
        Rect::new(self.position.x, self.position.y, HOME_WIDTH, HOME_HEIGHT)
    }
}

/// Static interior map of the home.
#[derive(Clone, Debug, PartialEq)]
pub struct HomeInterior {
    pub door: Rect,
}

impl Default for HomeInterior {
    fn default() -> Self {
        Self {
            door: Rect::new(350.0, 500.0, 100.0, 80.0),
        }
    }
}

/// Single active quest shown in the status bar.
#[derive(Clone, Debug, PartialEq)]
pub struct QuestLog {
    pub text: &'static str,
}

impl Default for QuestLog {
    fn default() -> Self {
        Self { text: QUEST_TEXT }
    }
}
