use bracket_lib::prelude::RandomNumberGenerator;
use common::{GameResult, Point};
use data::{CoinRecord, HomeRecord, PlayerRecord, SaveRecord, SaveStore, TacoCatRecord, SAVE_KEY};
use progression::{Experience, Happiness};
use spawning::Coin;
use tracing::info;

use crate::session::Session;
use crate::types::{Home, Player, TacoCat};

impl Session {
    /// Snapshot of every gameplay-relevant field.
    pub fn to_record(&self, timestamp: u64) -> SaveRecord {
        let p = &self.player;
        let h = &self.taco_cat.happiness;
        SaveRecord {
            character_name: self.character_name.clone(),
            player: PlayerRecord {
                coins: p.coins,
                health: p.health,
                food: p.food,
                experience: p.experience.experience,
                level: p.experience.level,
                exp_to_next_level: p.experience.to_next,
                x: p.position.x,
                y: p.position.y,
            },
            taco_cat: TacoCatRecord {
                total_coins_received: h.total_received,
                happiness_level: h.level,
                coins_for_next_level: h.coins_for_next(),
                coins_given_to_this_level: h.given_to_level,
            },
            home: HomeRecord {
                x: self.home.position.x,
                y: self.home.position.y,
            },
            coins: self
                .coins
                .iter()
                .map(|c| CoinRecord {
                    x: c.position.x,
                    y: c.position.y,
                })
                .collect(),
            timestamp,
        }
    }

    /// Rebuilds a session; the player always starts on the world map.
    pub fn from_record(record: SaveRecord, rng: RandomNumberGenerator) -> Self {
        let mut session = Session::empty(&record.character_name, rng);
        let p = record.player;
        let mut player = Player {
            coins: p.coins,
            health: p.health.min(crate::types::MAX_VITAL),
            food: p.food.min(crate::types::MAX_VITAL),
            experience: Experience::restore(p.level, p.experience, p.exp_to_next_level),
            ..Player::default()
        };
        player.place(Point::new(p.x, p.y));
        session.player = player;

        let t = record.taco_cat;
        session.taco_cat = TacoCat {
            happiness: Happiness::restore(
                t.total_coins_received,
                t.happiness_level,
                t.coins_given_to_this_level,
            ),
            ..TacoCat::default()
        };
        session.home = Home {
            position: Point::new(record.home.x, record.home.y),
            ..Home::default()
        };

        if record.coins.is_empty() {
            session.spawn_initial_coins();
        } else {
            session.coins = record.coins.iter().map(|c| Coin::new(c.x, c.y)).collect();
        }
        session
    }
}

/// Encodes the session and writes it under [`SAVE_KEY`].
pub fn store_session(
    session: &Session,
    store: &mut dyn SaveStore,
    timestamp: u64,
) -> GameResult<()> {
    let payload = data::encode(&session.to_record(timestamp))?;
    store.set(SAVE_KEY, &payload)?;
    info!(
        name = %session.character_name(),
        coins = session.coins().len(),
        timestamp,
        "game_saved"
    );
    Ok(())
}

/// Reads and decodes the saved session, `Ok(None)` when nothing is stored.
pub fn load_session(
    store: &dyn SaveStore,
    rng: RandomNumberGenerator,
) -> GameResult<Option<Session>> {
    let Some(payload) = store.get(SAVE_KEY)? else {
        return Ok(None);
    };
    let record = data::decode(&payload)?;
    info!(name = %record.character_name, timestamp = record.timestamp, "game_loaded");
    Ok(Some(Session::from_record(record, rng)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::GameError;
    use data::MemoryStore;

    fn rng() -> RandomNumberGenerator {
        RandomNumberGenerator::seeded(42)
    }

    fn played_session() -> Session {
        let mut s = Session::new("Nacho", rng());
        s.player.coins = 4;
        s.player.health = 70;
        s.player.food = 85;
        s.player.experience = Experience::restore(3, 30, 144);
        s.player.place(Point::new(120.5, 33.0));
        s.taco_cat.receive(23);
        s.coins = vec![
            Coin::new(10.0, 20.0),
            Coin::new(300.0, 400.0),
            Coin::new(55.5, 500.25),
        ];
        s
    }

    fn sorted(mut v: Vec<(f32, f32)>) -> Vec<(f32, f32)> {
        v.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
        v
    }

    #[test]
    fn store_then_load_preserves_gameplay_state() {
        let saved = played_session();
        let mut store = MemoryStore::default();
        store_session(&saved, &mut store, 1_700_000_000_000).unwrap();
        let loaded = load_session(&store, RandomNumberGenerator::seeded(7))
            .unwrap()
            .unwrap();
        assert_eq!(loaded.character_name(), "Nacho");
        assert_eq!(loaded.player(), saved.player());
        assert_eq!(loaded.taco_cat().happiness, saved.taco_cat().happiness);
        assert_eq!(loaded.home().position, saved.home().position);
        let pos = |s: &Session| -> Vec<(f32, f32)> {
            s.coins()
                .iter()
                .map(|c| (c.position.x, c.position.y))
                .collect()
        };
        assert_eq!(sorted(pos(&loaded)), sorted(pos(&saved)));
        assert!(!loaded.is_running());
    }

    #[test]
    fn record_carries_derived_threshold() {
        let record = played_session().to_record(5);
        assert_eq!(record.taco_cat.happiness_level, 1);
        assert_eq!(record.taco_cat.coins_for_next_level, 15);
        assert_eq!(record.taco_cat.coins_given_to_this_level, 13);
        assert_eq!(record.timestamp, 5);
    }

    #[test]
    fn empty_store_loads_nothing() {
        let store = MemoryStore::default();
        assert!(load_session(&store, rng()).unwrap().is_none());
    }

    #[test]
    fn malformed_payload_is_reported() {
        let mut store = MemoryStore::default();
        store.set(SAVE_KEY, "{\"player\":").unwrap();
        assert!(matches!(
            load_session(&store, rng()),
            Err(GameError::MalformedSave(_))
        ));
    }

    #[test]
    fn old_save_without_coins_respawns_three() {
        let record = data::decode(r#"{"characterName":"","player":{"coins":2}}"#).unwrap();
        let s = Session::from_record(record, rng());
        assert_eq!(s.character_name(), "Cat");
        assert_eq!(s.player().coins, 2);
        assert_eq!(s.player().position, Point::new(400.0, 300.0));
        assert_eq!(s.coins().len(), 3);
    }

    #[test]
    fn inconsistent_counters_are_normalized() {
        let record = data::decode(
            r#"{"player":{"level":0,"expToNextLevel":0},
                "tacoCat":{"happinessLevel":2,"coinsForNextLevel":99,"coinsGivenToThisLevel":45}}"#,
        )
        .unwrap();
        let s = Session::from_record(record, rng());
        assert_eq!(s.player().experience.level, 1);
        assert_eq!(s.player().experience.to_next, 100);
        let h = &s.taco_cat().happiness;
        // 45 covers level 2 (20) and level 3 (25)
        assert_eq!((h.level, h.given_to_level, h.coins_for_next()), (4, 0, 30));
    }

    #[test]
    fn oversized_counters_load_and_keep_playing() {
        let record = data::decode(
            r#"{"player":{"coins":4294967295,"experience":4294967290},
                "tacoCat":{"totalCoinsReceived":4294967290,"happinessLevel":900000000}}"#,
        )
        .unwrap();
        let mut s = Session::from_record(record, rng());
        assert_eq!(s.taco_cat().happiness.level, 900_000_000);
        assert_eq!(s.taco_cat().happiness.coins_for_next(), u32::MAX);

        s.taco_cat.receive(10);
        assert_eq!(s.taco_cat().happiness.total_received, u32::MAX);
        assert_eq!(s.taco_cat().happiness.level, 900_000_000);

        assert!(s.player.collect_coin().is_some());
        assert_eq!(s.player().coins, u32::MAX);
        assert_eq!(s.player().experience.level, 2);
    }
}
