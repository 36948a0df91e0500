//! One game in progress: entities, map state and the per-tick update.

use audio::{AudioSink, Sound};
use bracket_lib::prelude::RandomNumberGenerator;
use common::{
    overlaps, within_reach, Bounded, GameError, GameResult, Point, Rect, DOOR_REACH,
    OUTDOOR_REACH,
};
use spawning::{Coin, SpawnPolicy, SpawnTimer};
use tracing::{debug, info};
use ui::{
    BannerView, CoinSprite, Frame, HomeSprite, Hud, MapView, MessageLog, PromptView,
    TacoCatSprite,
};

use crate::input::{Action, EdgeTrigger, InputSource};
use crate::types::{
    Home, HomeInterior, Player, QuestLog, TacoCat, INTERIOR_ENTRY, PLAYER_SPEED, WORLD_RETURN,
};

/// Coins placed when a session starts without any.
pub const INITIAL_COINS: usize = 3;
const BANNER_MS: f64 = 3000.0;
const BANNER_FADE_MS: f64 = 300.0;
/// Prompts float this far above the player.
const PROMPT_OFFSET: f32 = 30.0;

/// Which of the two maps the player is on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MapKind {
    World,
    Home,
}

/// Interaction currently on offer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Prompt {
    GiveCoins,
    FindCoins,
    EnterHome,
    ExitHome,
}

impl Prompt {
    pub fn text(self) -> &'static str {
        match self {
            Prompt::GiveCoins => "Press SPACE to give coins to TacoCat",
            Prompt::FindCoins => "Find coins to give to TacoCat!",
            Prompt::EnterHome => "Press SPACE to enter home",
            Prompt::ExitHome => "Press SPACE to exit home",
        }
    }
}

/// Things that happened during a tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameEvent {
    CoinSpawned,
    CoinCollected,
    LevelUp(u32),
    CoinsDelivered { amount: u32, happiness_gained: u32 },
    EnteredHome,
    ExitedHome,
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct Banner {
    level: u32,
    started_ms: f64,
}

impl Banner {
    fn alpha(&self, now_ms: f64) -> Option<f32> {
        let t = now_ms - self.started_ms;
        if !(0.0..BANNER_MS).contains(&t) {
            return None;
        }
        let a = if t < BANNER_FADE_MS {
            t / BANNER_FADE_MS
        } else if t > BANNER_MS - BANNER_FADE_MS {
            (BANNER_MS - t) / BANNER_FADE_MS
        } else {
            1.0
        };
        Some(a as f32)
    }
}

/// Turns host timestamps into per-tick deltas.
#[derive(Clone, Copy, Debug, Default)]
pub struct FrameClock {
    last_ms: Option<f64>,
}

impl FrameClock {
    /// Elapsed time since the previous call; zero on the first.
    pub fn delta(&mut self, now_ms: f64) -> f64 {
        let dt = self.last_ms.map_or(0.0, |last| (now_ms - last).max(0.0));
        self.last_ms = Some(now_ms);
        dt
    }

    pub fn reset(&mut self) {
        self.last_ms = None;
    }
}

/// A game session owning every entity.
pub struct Session {
    pub(crate) character_name: String,
    pub(crate) map: MapKind,
    pub(crate) player: Player,
    pub(crate) taco_cat: TacoCat,
    pub(crate) home: Home,
    pub(crate) interior: HomeInterior,
    pub(crate) quest: QuestLog,
    pub(crate) coins: Vec<Coin>,
    pub(crate) policy: SpawnPolicy,
    pub(crate) timer: SpawnTimer,
    pub(crate) rng: RandomNumberGenerator,
    prompt: Option<Prompt>,
    interact: EdgeTrigger,
    banner: Option<Banner>,
    messages: MessageLog,
    clock: FrameClock,
    running: bool,
    now_ms: f64,
}

/// Trims a typed name, falling back to the default when blank.
pub fn normalize_name(name: &str) -> String {
    let name = name.trim();
    if name.is_empty() {
        data::DEFAULT_CHARACTER_NAME.to_string()
    } else {
        name.to_string()
    }
}

impl Session {
    /// Fresh session with a few coins already scattered around.
    pub fn new(name: &str, rng: RandomNumberGenerator) -> Self {
        let mut session = Self::empty(name, rng);
        session.spawn_initial_coins();
        session
    }

    pub(crate) fn empty(name: &str, mut rng: RandomNumberGenerator) -> Self {
        let timer = SpawnTimer::new(&mut rng);
        Self {
            character_name: normalize_name(name),
            map: MapKind::World,
            player: Player::default(),
            taco_cat: TacoCat::default(),
            home: Home::default(),
            interior: HomeInterior::default(),
            quest: QuestLog::default(),
            coins: Vec::new(),
            policy: SpawnPolicy::default(),
            timer,
            rng,
            prompt: None,
            interact: EdgeTrigger::default(),
            banner: None,
            messages: MessageLog::default(),
            clock: FrameClock::default(),
            running: false,
            now_ms: 0.0,
        }
    }

    pub(crate) fn spawn_initial_coins(&mut self) {
        let placed = self.policy.spawn_batch(
            &mut self.rng,
            &mut self.coins,
            INITIAL_COINS,
            Rect::world(),
            &self.home,
        );
        debug!(placed, "initial_coins_spawned");
    }

    /// Begins ticking. Calling it on a running session does nothing.
    pub fn start(&mut self) {
        if self.running {
            return;
        }
        self.running = true;
        self.clock.reset();
        self.interact.reset();
        info!(name = %self.character_name, "session_started");
    }

    /// Stops ticking. Safe to call more than once.
    pub fn stop(&mut self) {
        if !self.running {
            return;
        }
        self.running = false;
        info!(name = %self.character_name, "session_stopped");
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn character_name(&self) -> &str {
        &self.character_name
    }

    pub fn map(&self) -> MapKind {
        self.map
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn taco_cat(&self) -> &TacoCat {
        &self.taco_cat
    }

    pub fn home(&self) -> &Home {
        &self.home
    }

    pub fn coins(&self) -> &[Coin] {
        &self.coins
    }

    pub fn prompt(&self) -> Option<Prompt> {
        self.prompt
    }

    /// Shows a short toast.
    pub fn notify(&mut self, msg: &str) {
        self.messages.add(msg, self.now_ms);
    }

    /// Advances the simulation by one host frame.
    pub fn update(
        &mut self,
        now_ms: f64,
        input: &dyn InputSource,
        audio: &mut dyn AudioSink,
    ) -> GameResult<Vec<GameEvent>> {
        if !self.running {
            return Err(GameError::InvalidOperation);
        }
        let dt = self.clock.delta(now_ms);
        self.now_ms = now_ms;
        let mut events = Vec::new();

        self.apply_movement(input);
        self.run_spawner(dt, &mut events);
        if self.map == MapKind::World {
            self.collect_coins(audio, &mut events);
        }
        self.prompt = self.compute_prompt();
        if self.interact.update(input.is_held(Action::Interact)) {
            self.interact_now(audio, &mut events);
        }
        self.animate();
        Ok(events)
    }

    fn apply_movement(&mut self, input: &dyn InputSource) {
        let axis = |neg: Action, pos: Action| {
            let mut v = 0.0;
            if input.is_held(neg) {
                v -= PLAYER_SPEED;
            }
            if input.is_held(pos) {
                v += PLAYER_SPEED;
            }
            v
        };
        let dx = axis(Action::Left, Action::Right);
        let dy = axis(Action::Up, Action::Down);
        self.player.move_by(dx, dy);
    }

    fn run_spawner(&mut self, dt: f64, events: &mut Vec<GameEvent>) {
        let capacity = self.policy.has_capacity(&self.coins);
        if !self.timer.tick(dt as f32, capacity, &mut self.rng) {
            return;
        }
        if let Some(coin) =
            self.policy
                .try_spawn(&mut self.rng, &self.coins, Rect::world(), &self.home)
        {
            self.coins.push(coin);
            events.push(GameEvent::CoinSpawned);
        }
    }

    fn collect_coins(&mut self, audio: &mut dyn AudioSink, events: &mut Vec<GameEvent>) {
        let player = self.player.bounds();
        let before = self.coins.len();
        self.coins.retain(|c| !player.overlaps(&c.bounds()));
        let collected = before - self.coins.len();
        for _ in 0..collected {
            audio.play(Sound::CoinCollected);
            events.push(GameEvent::CoinCollected);
            if let Some(up) = self.player.collect_coin() {
                self.banner = Some(Banner {
                    level: up.level,
                    started_ms: self.now_ms,
                });
                audio.play(Sound::LevelUp);
                events.push(GameEvent::LevelUp(up.level));
            }
        }
        if collected > 0 {
            debug!(collected, held = self.player.coins, "coins_collected");
        }
    }

    fn near_taco_cat(&self) -> bool {
        overlaps(&self.player, &self.taco_cat)
    }

    fn near_home(&self) -> bool {
        within_reach(&self.player, &self.home, OUTDOOR_REACH)
    }

    fn near_door(&self) -> bool {
        within_reach(&self.player, &self.interior.door, DOOR_REACH)
    }

    fn compute_prompt(&self) -> Option<Prompt> {
        match self.map {
            MapKind::World if self.near_taco_cat() => Some(if self.player.coins > 0 {
                Prompt::GiveCoins
            } else {
                Prompt::FindCoins
            }),
            MapKind::World if self.near_home() => Some(Prompt::EnterHome),
            MapKind::World => None,
            MapKind::Home => self.near_door().then_some(Prompt::ExitHome),
        }
    }

    fn interact_now(&mut self, audio: &mut dyn AudioSink, events: &mut Vec<GameEvent>) {
        match self.map {
            MapKind::World => {
                if self.near_taco_cat() && self.player.coins > 0 {
                    self.deliver(audio, events);
                } else if self.near_home() {
                    self.enter_home(audio, events);
                }
            }
            MapKind::Home => {
                if self.near_door() {
                    self.exit_home(audio, events);
                }
            }
        }
    }

    fn deliver(&mut self, audio: &mut dyn AudioSink, events: &mut Vec<GameEvent>) {
        let amount = self.player.give_all_coins();
        let happiness_gained = self.taco_cat.receive(amount);
        audio.play(Sound::TacoCatHappy);
        events.push(GameEvent::CoinsDelivered {
            amount,
            happiness_gained,
        });
    }

    fn enter_home(&mut self, audio: &mut dyn AudioSink, events: &mut Vec<GameEvent>) {
        self.map = MapKind::Home;
        self.player.place(INTERIOR_ENTRY);
        self.notify("Entering home...");
        audio.play(Sound::ButtonClick);
        events.push(GameEvent::EnteredHome);
        info!("entered_home");
    }

    fn exit_home(&mut self, audio: &mut dyn AudioSink, events: &mut Vec<GameEvent>) {
        self.map = MapKind::World;
        self.player.place(WORLD_RETURN);
        self.notify("Exiting home...");
        audio.play(Sound::ButtonClick);
        events.push(GameEvent::ExitedHome);
        info!("exited_home");
    }

    fn animate(&mut self) {
        for coin in &mut self.coins {
            coin.spin();
        }
        self.home.animate(self.prompt == Some(Prompt::EnterHome));
        if let Some(b) = self.banner {
            if b.alpha(self.now_ms).is_none() {
                self.banner = None;
            }
        }
        self.messages.prune(self.now_ms);
    }

    /// Read-only snapshot for the renderer.
    pub fn frame(&self, muted: bool) -> Frame {
        let progress = self.player.experience.progress();
        let happiness = &self.taco_cat.happiness;
        let player = self.player.bounds();
        Frame {
            map: match self.map {
                MapKind::World => MapView::World,
                MapKind::Home => MapView::Home,
            },
            player,
            coins: self
                .coins
                .iter()
                .map(|c| CoinSprite {
                    bounds: c.bounds(),
                    rotation: c.rotation,
                })
                .collect(),
            taco_cat: TacoCatSprite {
                bounds: self.taco_cat.bounds(),
                happiness_level: happiness.level,
                total_received: happiness.total_received,
                given: happiness.given_to_level,
                needed: happiness.coins_for_next(),
                show_progress: happiness.has_progress(),
            },
            home: HomeSprite {
                bounds: self.home.bounds(),
                smoke_phase: self.home.animation,
            },
            door: self.interior.door,
            prompt: self.prompt.map(|p| PromptView {
                text: p.text(),
                anchor: Point::new(player.x, player.y - PROMPT_OFFSET),
            }),
            banner: self.banner.and_then(|b| {
                b.alpha(self.now_ms).map(|alpha| BannerView {
                    level: b.level,
                    alpha,
                })
            }),
            toasts: self.messages.visible(self.now_ms),
            hud: Hud {
                name: self.character_name.clone(),
                level: self.player.experience.level,
                coins: self.player.coins,
                health: self.player.health,
                food: self.player.food,
                exp: progress.current,
                exp_needed: progress.needed,
                exp_percent: progress.percentage,
                quest: self.quest.text.to_string(),
            },
            muted,
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use progression::Experience;
    use ui::RenderSink;

    #[derive(Default)]
    pub(crate) struct RecordingAudio {
        pub played: Vec<Sound>,
        pub ambient: bool,
        pub muted: bool,
    }

    impl AudioSink for RecordingAudio {
        fn play(&mut self, sound: Sound) {
            self.played.push(sound);
        }
        fn start_ambient(&mut self) {
            self.ambient = true;
        }
        fn stop_ambient(&mut self) {
            self.ambient = false;
        }
        fn toggle_mute(&mut self) -> bool {
            self.muted = !self.muted;
            self.muted
        }
        fn is_muted(&self) -> bool {
            self.muted
        }
    }

    fn running(seed: u64) -> Session {
        let mut s = Session::new("Nacho", RandomNumberGenerator::seeded(seed));
        s.start();
        s
    }

    fn idle() -> KeySetInput {
        KeySetInput::default()
    }

    type KeySetInput = crate::input::KeySet;

    fn holding(action: Action) -> KeySetInput {
        let mut k = KeySetInput::default();
        k.press(action);
        k
    }

    #[test]
    fn new_session_prespawns_coins_away_from_home() {
        let s = Session::new("  ", RandomNumberGenerator::seeded(1));
        assert_eq!(s.character_name(), "Cat");
        assert_eq!(s.coins().len(), INITIAL_COINS);
        let keep_out = s.home.bounds().expand(15.0);
        assert!(s.coins().iter().all(|c| !c.bounds().overlaps(&keep_out)));
    }

    #[test]
    fn update_requires_running_session() {
        let mut s = Session::new("Nacho", RandomNumberGenerator::seeded(1));
        let mut audio = RecordingAudio::default();
        assert!(matches!(
            s.update(0.0, &idle(), &mut audio),
            Err(GameError::InvalidOperation)
        ));
    }

    #[test]
    fn start_and_stop_are_idempotent() {
        let mut s = running(2);
        s.start();
        assert!(s.is_running());
        s.stop();
        s.stop();
        assert!(!s.is_running());
    }

    #[test]
    fn held_direction_moves_three_units() {
        let mut s = running(3);
        s.coins.clear();
        let mut audio = RecordingAudio::default();
        let mut keys = holding(Action::Right);
        keys.press(Action::Up);
        s.update(0.0, &keys, &mut audio).unwrap();
        assert_eq!(s.player().position, Point::new(403.0, 297.0));
    }

    #[test]
    fn first_tick_has_zero_elapsed() {
        let mut clock = FrameClock::default();
        assert_eq!(clock.delta(5000.0), 0.0);
        assert_eq!(clock.delta(5016.0), 16.0);
        clock.reset();
        assert_eq!(clock.delta(9000.0), 0.0);
    }

    #[test]
    fn overlapping_coins_collected_in_one_tick() {
        let mut s = running(4);
        s.coins = vec![
            Coin::new(405.0, 305.0),
            Coin::new(410.0, 290.0),
            Coin::new(100.0, 500.0),
        ];
        let mut audio = RecordingAudio::default();
        let events = s.update(0.0, &idle(), &mut audio).unwrap();
        assert_eq!(s.coins().len(), 1);
        assert_eq!(s.player().coins, 2);
        assert_eq!(s.player().experience.experience, 20);
        assert_eq!(
            events.iter().filter(|e| **e == GameEvent::CoinCollected).count(),
            2
        );
        assert_eq!(audio.played, vec![Sound::CoinCollected, Sound::CoinCollected]);
    }

    #[test]
    fn level_up_shows_banner_and_plays_sound() {
        let mut s = running(5);
        s.player.experience = Experience::restore(1, 95, 100);
        s.coins = vec![Coin::new(400.0, 300.0)];
        let mut audio = RecordingAudio::default();
        let events = s.update(100.0, &idle(), &mut audio).unwrap();
        assert!(events.contains(&GameEvent::LevelUp(2)));
        assert_eq!(audio.played, vec![Sound::CoinCollected, Sound::LevelUp]);
        let banner = s.frame(false).banner.unwrap();
        assert_eq!(banner.level, 2);
        assert_eq!(banner.alpha, 0.0);
        s.update(250.0, &idle(), &mut audio).unwrap();
        assert!((s.frame(false).banner.unwrap().alpha - 0.5).abs() < 1e-6);
        s.update(3100.0, &idle(), &mut audio).unwrap();
        assert!(s.frame(false).banner.is_none());
    }

    #[test]
    fn coins_are_not_collected_indoors() {
        let mut s = running(6);
        s.map = MapKind::Home;
        s.coins = vec![Coin::new(400.0, 300.0)];
        let mut audio = RecordingAudio::default();
        s.update(0.0, &idle(), &mut audio).unwrap();
        assert_eq!(s.coins().len(), 1);
        assert_eq!(s.player().coins, 0);
    }

    #[test]
    fn prompt_at_taco_cat_depends_on_wallet() {
        let mut s = running(7);
        s.coins.clear();
        s.player.place(Point::new(110.0, 110.0));
        let mut audio = RecordingAudio::default();
        s.update(0.0, &idle(), &mut audio).unwrap();
        assert_eq!(s.prompt(), Some(Prompt::FindCoins));
        s.player.coins = 2;
        s.update(16.0, &idle(), &mut audio).unwrap();
        assert_eq!(s.prompt(), Some(Prompt::GiveCoins));
        let frame = s.frame(false);
        let prompt = frame.prompt.unwrap();
        assert_eq!(prompt.text, "Press SPACE to give coins to TacoCat");
        assert_eq!(prompt.anchor, Point::new(120.0, 80.0));
    }

    #[test]
    fn delivery_empties_wallet_and_raises_happiness() {
        let mut s = running(8);
        s.coins.clear();
        s.player.place(Point::new(110.0, 110.0));
        s.player.coins = 23;
        let mut audio = RecordingAudio::default();
        let events = s.update(0.0, &holding(Action::Interact), &mut audio).unwrap();
        assert_eq!(
            events,
            vec![GameEvent::CoinsDelivered {
                amount: 23,
                happiness_gained: 1
            }]
        );
        assert_eq!(s.player().coins, 0);
        let h = &s.taco_cat().happiness;
        assert_eq!((h.level, h.given_to_level, h.coins_for_next()), (1, 13, 15));
        assert_eq!(audio.played, vec![Sound::TacoCatHappy]);
    }

    #[test]
    fn delivery_preferred_over_entering_home() {
        let mut s = running(9);
        s.coins.clear();
        // stack TacoCat onto the home so both are in range
        s.taco_cat.position = Point::new(650.0, 100.0);
        s.player.place(Point::new(655.0, 105.0));
        s.player.coins = 1;
        let mut audio = RecordingAudio::default();
        s.update(0.0, &holding(Action::Interact), &mut audio).unwrap();
        assert_eq!(s.map(), MapKind::World);
        assert_eq!(s.taco_cat().happiness.total_received, 1);
    }

    #[test]
    fn interact_is_edge_triggered() {
        let mut s = running(10);
        s.coins.clear();
        s.player.place(Point::new(655.0, 105.0));
        let mut audio = RecordingAudio::default();
        let held = holding(Action::Interact);
        s.update(0.0, &held, &mut audio).unwrap();
        assert_eq!(s.map(), MapKind::Home);
        // walk onto the door while still holding the key
        s.player.place(Point::new(390.0, 530.0));
        s.update(16.0, &held, &mut audio).unwrap();
        assert_eq!(s.map(), MapKind::Home);
        s.update(32.0, &idle(), &mut audio).unwrap();
        assert_eq!(s.prompt(), Some(Prompt::ExitHome));
        s.update(48.0, &held, &mut audio).unwrap();
        assert_eq!(s.map(), MapKind::World);
    }

    #[test]
    fn enter_then_exit_lands_at_fixed_spot() {
        let mut s = running(11);
        s.coins.clear();
        s.player.place(Point::new(640.0, 100.0));
        let mut audio = RecordingAudio::default();
        let keys = holding(Action::Interact);
        let events = s.update(0.0, &keys, &mut audio).unwrap();
        assert_eq!(events, vec![GameEvent::EnteredHome]);
        assert_eq!(s.player().position, INTERIOR_ENTRY);
        assert_eq!(s.frame(false).toasts, vec!["Entering home...".to_string()]);
        s.player.place(Point::new(390.0, 530.0));
        s.update(16.0, &idle(), &mut audio).unwrap();
        let events = s.update(32.0, &keys, &mut audio).unwrap();
        assert_eq!(events, vec![GameEvent::ExitedHome]);
        assert_eq!(s.player().position, Point::new(650.0, 120.0));
        assert_eq!(audio.played, vec![Sound::ButtonClick, Sound::ButtonClick]);
    }

    #[test]
    fn door_needs_proximity() {
        let mut s = running(12);
        s.map = MapKind::Home;
        s.player.place(Point::new(100.0, 100.0));
        let mut audio = RecordingAudio::default();
        s.update(0.0, &holding(Action::Interact), &mut audio).unwrap();
        assert_eq!(s.map(), MapKind::Home);
        assert_eq!(s.prompt(), None);
    }

    #[test]
    fn coin_count_never_exceeds_cap() {
        let mut s = running(13);
        // park the player in a corner so nothing is collected
        s.player.place(Point::new(0.0, 0.0));
        s.coins.retain(|c| c.position.x > 40.0 || c.position.y > 40.0);
        let mut audio = RecordingAudio::default();
        let mut now = 0.0;
        for _ in 0..2000 {
            now += 250.0;
            s.update(now, &idle(), &mut audio).unwrap();
            assert!(s.coins().len() <= s.policy.max_coins);
        }
        assert!(s.coins().len() >= 10);
    }

    #[test]
    fn cosmetic_phases_advance_in_update() {
        let mut s = running(14);
        s.coins = vec![Coin::new(10.0, 500.0)];
        let mut audio = RecordingAudio::default();
        s.update(0.0, &idle(), &mut audio).unwrap();
        s.update(16.0, &idle(), &mut audio).unwrap();
        assert!((s.coins()[0].rotation - 0.1).abs() < 1e-6);
        assert!((s.home().animation - 0.04).abs() < 1e-6);
        let before = s.coins()[0].rotation;
        let _ = s.frame(false);
        assert_eq!(s.coins()[0].rotation, before);
    }

    #[test]
    fn smoke_speeds_up_only_under_enter_prompt() {
        let mut s = running(16);
        s.coins.clear();
        s.player.place(Point::new(640.0, 100.0));
        let mut audio = RecordingAudio::default();
        s.update(0.0, &idle(), &mut audio).unwrap();
        assert_eq!(s.prompt(), Some(Prompt::EnterHome));
        assert!((s.home().animation - 0.07).abs() < 1e-6);

        // TacoCat standing on the home takes the prompt
        let mut s = running(17);
        s.coins.clear();
        s.taco_cat.position = Point::new(650.0, 100.0);
        s.player.place(Point::new(655.0, 105.0));
        s.update(0.0, &idle(), &mut audio).unwrap();
        assert_eq!(s.prompt(), Some(Prompt::FindCoins));
        assert!((s.home().animation - 0.02).abs() < 1e-6);
    }

    #[test]
    fn prompt_hangs_above_player_corner() {
        let mut s = running(18);
        s.coins.clear();
        s.player.place(Point::new(640.0, 100.0));
        let mut audio = RecordingAudio::default();
        s.update(0.0, &idle(), &mut audio).unwrap();
        let prompt = s.frame(false).prompt.unwrap();
        assert_eq!(prompt.text, "Press SPACE to enter home");
        assert_eq!(prompt.anchor, Point::new(640.0, 70.0));
    }

    #[test]
    fn frame_renders_on_console() {
        let mut s = running(19);
        let mut audio = RecordingAudio::default();
        s.update(0.0, &idle(), &mut audio).unwrap();
        let mut console = ui::ConsoleRenderer::default();
        assert!(console.render(&s.frame(false)).is_ok());
        s.map = MapKind::Home;
        assert!(console.render(&s.frame(true)).is_ok());
    }

    #[test]
    fn frame_reports_hud() {
        let s = running(15);
        let frame = s.frame(true);
        assert!(frame.muted);
        assert_eq!(frame.hud.name, "Nacho");
        assert_eq!(frame.hud.exp_needed, 100);
        assert_eq!(frame.hud.quest, "Find and collect coins to give to TacoCat!");
        assert!(!frame.taco_cat.show_progress);
        assert_eq!(frame.taco_cat.needed, 10);
    }
}
