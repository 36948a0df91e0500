//! Progression curves for the player and TacoCat.
//!
//! The two curves resolve level-ups differently on purpose: the player
//! resolves at most one level per experience gain, TacoCat keeps levelling
//! while the delivered coins cover the next threshold.

use tracing::info;

/// Experience granted for each collected coin.
pub const EXP_PER_COIN: u32 = 10;
/// Experience needed to leave level 1.
pub const BASE_EXP_TO_NEXT: u32 = 100;
/// Growth factor applied to the requirement on every level-up.
pub const EXP_GROWTH: f64 = 1.2;
/// Coins TacoCat needs for its first happiness level.
pub const BASE_HAPPINESS_COST: u32 = 10;
/// Extra coins needed per happiness level already reached.
pub const HAPPINESS_COST_STEP: u32 = 5;

/// A resolved player level-up.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LevelUp {
    /// The level just reached.
    pub level: u32,
}

/// Experience bar values for display.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ExpProgress {
    pub current: u32,
    pub needed: u32,
    pub percentage: f32,
}

/// Player experience and level.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Experience {
    /// Current level, starting at 1.
    pub level: u32,
    /// Experience accumulated towards the next level.
    pub experience: u32,
    /// Experience required to reach the next level.
    pub to_next: u32,
}

impl Default for Experience {
    fn default() -> Self {
        Self {
            level: 1,
            experience: 0,
            to_next: BASE_EXP_TO_NEXT,
        }
    }
}

impl Experience {
    /// Rebuilds a curve from saved values, treating zero level or
    /// requirement as unset.
    pub fn restore(level: u32, experience: u32, to_next: u32) -> Self {
        Self {
            level: level.max(1),
            experience,
            to_next: if to_next == 0 { BASE_EXP_TO_NEXT } else { to_next },
        }
    }

    /// Adds experience and resolves a single level-up if the requirement is met.
    ///
    /// Surplus that would cover a second threshold stays banked until the
    /// next gain.
    pub fn gain(&mut self, amount: u32) -> Option<LevelUp> {
        self.experience = self.experience.saturating_add(amount);
        if self.experience >= self.to_next {
            Some(self.level_up())
        } else {
            None
        }
    }

    fn level_up(&mut self) -> LevelUp {
        self.level = self.level.saturating_add(1);
        self.experience -= self.to_next;
        self.to_next = (self.to_next as f64 * EXP_GROWTH).floor() as u32;
        info!(
            level = self.level,
            to_next = self.to_next,
            "player_level_up"
        );
        LevelUp { level: self.level }
    }

    pub fn progress(&self) -> ExpProgress {
        ExpProgress {
            current: self.experience,
            needed: self.to_next,
            percentage: self.experience as f32 / self.to_next as f32 * 100.0,
        }
    }
}

/// Coins TacoCat needs to go from `level` to `level + 1`, saturating at
/// `u32::MAX` for levels no save should reach.
pub fn happiness_cost(level: u32) -> u32 {
    HAPPINESS_COST_STEP
        .saturating_mul(level)
        .saturating_add(BASE_HAPPINESS_COST)
}

/// TacoCat's happiness counters.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Happiness {
    /// All coins ever delivered.
    pub total_received: u32,
    /// Current happiness level.
    pub level: u32,
    /// Coins delivered since the last happiness level.
    pub given_to_level: u32,
}

impl Happiness {
    /// Rebuilds counters from saved values and normalizes any overflow.
    pub fn restore(total_received: u32, level: u32, given_to_level: u32) -> Self {
        let mut h = Self {
            total_received,
            level,
            given_to_level,
        };
        h.normalize();
        h
    }

    /// Coins required for the next happiness level.
    pub fn coins_for_next(&self) -> u32 {
        happiness_cost(self.level)
    }

    /// Delivers coins and returns how many happiness levels were gained.
    pub fn give(&mut self, amount: u32) -> u32 {
        self.total_received = self.total_received.saturating_add(amount);
        self.given_to_level = self.given_to_level.saturating_add(amount);
        let gained = self.normalize();
        info!(
            amount,
            total = self.total_received,
            level = self.level,
            "taco_cat_received_coins"
        );
        gained
    }

    fn normalize(&mut self) -> u32 {
        let mut gained = 0;
        while self.given_to_level >= self.coins_for_next() {
            self.given_to_level -= self.coins_for_next();
            self.level = self.level.saturating_add(1);
            gained += 1;
            info!(
                level = self.level,
                next = self.coins_for_next(),
                "taco_cat_happiness_up"
            );
        }
        gained
    }

    /// Whether there is anything worth showing as progress.
    pub fn has_progress(&self) -> bool {
        self.level > 0 || self.given_to_level > 0
    }
}
