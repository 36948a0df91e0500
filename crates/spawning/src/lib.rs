//! Coin entities and the policy deciding when and where they appear.
use bracket_lib::prelude::RandomNumberGenerator;
use common::{Bounded, Point, Rect};
use tracing::debug;

/// Side length of a coin's square footprint.
pub const COIN_SIZE: f32 = 15.0;
/// Rotation added to a coin every tick.
pub const COIN_SPIN: f32 = 0.05;
/// Shortest delay between two spawn attempts, in milliseconds.
pub const MIN_SPAWN_DELAY_MS: f32 = 1000.0;
/// Upper bound (exclusive) of the spawn delay, in milliseconds.
pub const MAX_SPAWN_DELAY_MS: f32 = 5000.0;

/// Collectible coin. Coins have no identity beyond their position.
#[derive(Clone, Debug, PartialEq)]
pub struct Coin {
    pub position: Point,
    /// Cosmetic spin phase, only ever increases.
    pub rotation: f32,
}

impl Coin {
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            position: Point::new(x, y),
            rotation: 0.0,
        }
    }

    /// Advances the spin animation by one tick.
    pub fn spin(&mut self) {
        self.rotation += COIN_SPIN;
    }
}

impl Bounded for Coin {
    fn bounds(&self) -> Rect {
        Rect::new(self.position.x, self.position.y, COIN_SIZE, COIN_SIZE)
    }
}

/// Placement rules for new coins.
#[derive(Clone, Debug, PartialEq)]
pub struct SpawnPolicy {
    /// Cap on simultaneously active coins.
    pub max_coins: usize,
    /// Distance kept from the right and bottom edges of the spawn area.
    pub edge_margin: f32,
    /// Padding added around the home before testing for overlap.
    pub home_padding: f32,
    /// Candidate positions sampled before giving up for this attempt.
    pub max_attempts: u32,
}

impl Default for SpawnPolicy {
    fn default() -> Self {
        Self {
            max_coins: 15,
            edge_margin: 20.0,
            home_padding: 15.0,
            max_attempts: 50,
        }
    }
}

impl SpawnPolicy {
    /// Whether another coin may be added.
    pub fn has_capacity(&self, active: &[Coin]) -> bool {
        active.len() < self.max_coins
    }

    /// Tries to place one coin inside `area` away from `home`.
    ///
    /// Returns `None` when at capacity or when every sampled candidate
    /// landed too close to the home.
    pub fn try_spawn(
        &self,
        rng: &mut RandomNumberGenerator,
        active: &[Coin],
        area: Rect,
        home: &impl Bounded,
    ) -> Option<Coin> {
        if !self.has_capacity(active) {
            return None;
        }
        let keep_out = home.bounds().expand(self.home_padding);
        let span_x = (area.w - self.edge_margin).max(f32::EPSILON);
        let span_y = (area.h - self.edge_margin).max(f32::EPSILON);
        for _ in 0..self.max_attempts {
            let x = area.x + rng.range(0.0, span_x);
            let y = area.y + rng.range(0.0, span_y);
            let coin = Coin::new(x, y);
            if !coin.bounds().overlaps(&keep_out) {
                debug!(x, y, "coin_spawned");
                return Some(coin);
            }
        }
        debug!(attempts = self.max_attempts, "coin_spawn_exhausted");
        None
    }

    /// Attempts `count` spawns into `coins`, returning how many succeeded.
    pub fn spawn_batch(
        &self,
        rng: &mut RandomNumberGenerator,
        coins: &mut Vec<Coin>,
        count: usize,
        area: Rect,
        home: &impl Bounded,
    ) -> usize {
        let mut spawned = 0;
        for _ in 0..count {
            if let Some(coin) = self.try_spawn(rng, coins, area, home) {
                coins.push(coin);
                spawned += 1;
            }
        }
        spawned
    }
}

/// Draws a fresh delay in `[MIN_SPAWN_DELAY_MS, MAX_SPAWN_DELAY_MS)`.
pub fn random_spawn_delay(rng: &mut RandomNumberGenerator) -> f32 {
    rng.range(MIN_SPAWN_DELAY_MS, MAX_SPAWN_DELAY_MS)
}

/// Accumulates elapsed time and signals when a spawn attempt is due.
#[derive(Clone, Debug, PartialEq)]
pub struct SpawnTimer {
    pub elapsed_ms: f32,
    pub threshold_ms: f32,
}

impl SpawnTimer {
    pub fn new(rng: &mut RandomNumberGenerator) -> Self {
        Self {
            elapsed_ms: 0.0,
            threshold_ms: random_spawn_delay(rng),
        }
    }

    /// Adds `dt_ms` and returns `true` when an attempt should be made.
    ///
    /// The timer only resets when it fires; while the policy is at capacity
    /// it keeps accumulating.
    pub fn tick(&mut self, dt_ms: f32, has_capacity: bool, rng: &mut RandomNumberGenerator) -> bool {
        self.elapsed_ms += dt_ms;
        if self.elapsed_ms >= self.threshold_ms && has_capacity {
            self.elapsed_ms = 0.0;
            self.threshold_ms = random_spawn_delay(rng);
            true
        } else {
            false
        }
    }
}
