//! Save records and the stores that keep them.

use std::collections::HashMap;

use common::{GameError, GameResult};
use serde::{Deserialize, Serialize};

mod store;

pub use store::FileStore;
#[cfg(target_arch = "wasm32")]
pub use store::LocalStorageStore;

/// Name under which the single save record is stored.
pub const SAVE_KEY: &str = "tacoCatSave";
/// Name used when a save carries no character name.
pub const DEFAULT_CHARACTER_NAME: &str = "Cat";

fn default_name() -> String {
    DEFAULT_CHARACTER_NAME.to_string()
}

/// Snapshot of a session, serialized as JSON.
///
/// Every field may be missing in older saves and falls back to the value
/// a fresh game starts with.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveRecord {
    #[serde(default = "default_name")]
    pub character_name: String,
    #[serde(default)]
    pub player: PlayerRecord,
    #[serde(default)]
    pub taco_cat: TacoCatRecord,
    #[serde(default)]
    pub home: HomeRecord,
    /// An empty list makes the loader spawn a fresh set of coins.
    #[serde(default)]
    pub coins: Vec<CoinRecord>,
    /// Milliseconds since the Unix epoch at save time.
    #[serde(default)]
    pub timestamp: u64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PlayerRecord {
    pub coins: u32,
    pub health: u32,
    pub food: u32,
    pub experience: u32,
    pub level: u32,
    pub exp_to_next_level: u32,
    pub x: f32,
    pub y: f32,
}

impl Default for PlayerRecord {
    fn default() -> Self {
        Self {
            coins: 0,
            health: 100,
            food: 100,
            experience: 0,
            level: 1,
            exp_to_next_level: 100,
            x: 400.0,
            y: 300.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TacoCatRecord {
    pub total_coins_received: u32,
    pub happiness_level: u32,
    pub coins_for_next_level: u32,
    pub coins_given_to_this_level: u32,
}

impl Default for TacoCatRecord {
    fn default() -> Self {
        Self {
            total_coins_received: 0,
            happiness_level: 0,
            coins_for_next_level: 10,
            coins_given_to_this_level: 0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HomeRecord {
    pub x: f32,
    pub y: f32,
}

impl Default for HomeRecord {
    fn default() -> Self {
        Self { x: 650.0, y: 100.0 }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CoinRecord {
    pub x: f32,
    pub y: f32,
}

/// Serializes a record to its JSON payload.
pub fn encode(record: &SaveRecord) -> GameResult<String> {
    serde_json::to_string(record).map_err(|e| GameError::MalformedSave(e.to_string()))
}

/// Parses a JSON payload into a record.
pub fn decode(payload: &str) -> GameResult<SaveRecord> {
    serde_json::from_str(payload).map_err(|e| GameError::MalformedSave(e.to_string()))
}

/// Key-value store holding opaque save payloads.
pub trait SaveStore {
    fn get(&self, key: &str) -> GameResult<Option<String>>;
    fn set(&mut self, key: &str, payload: &str) -> GameResult<()>;
    fn remove(&mut self, key: &str) -> GameResult<()>;
}

/// In-memory store, used by tests and headless runs.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl SaveStore for MemoryStore {
    fn get(&self, key: &str) -> GameResult<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, payload: &str) -> GameResult<()> {
        self.entries.insert(key.to_string(), payload.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> GameResult<()> {
        self.entries.remove(key);
        Ok(())
    }
}

/// Current wall-clock time in milliseconds since the Unix epoch.
#[cfg(not(target_arch = "wasm32"))]
pub fn now_millis() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

/// Current wall-clock time in milliseconds since the Unix epoch.
#[cfg(target_arch = "wasm32")]
pub fn now_millis() -> u64 {
    js_sys::Date::now() as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> SaveRecord {
        SaveRecord {
            character_name: "Nacho".into(),
            player: PlayerRecord {
                coins: 4,
                health: 90,
                food: 80,
                experience: 30,
                level: 3,
                exp_to_next_level: 144,
                x: 120.5,
                y: 33.0,
            },
            taco_cat: TacoCatRecord {
                total_coins_received: 23,
                happiness_level: 1,
                coins_for_next_level: 15,
                coins_given_to_this_level: 13,
            },
            home: HomeRecord::default(),
            coins: vec![CoinRecord { x: 10.0, y: 20.0 }],
            timestamp: 1_700_000_000_000,
        }
    }

    #[test]
    fn encode_uses_camel_case_fields() {
        let json = encode(&sample()).unwrap();
        assert!(json.contains("\"characterName\":\"Nacho\""));
        assert!(json.contains("\"expToNextLevel\":144"));
        assert!(json.contains("\"tacoCat\""));
        assert!(json.contains("\"coinsGivenToThisLevel\":13"));
    }

    #[test]
    fn decode_reads_encoded_record() {
        let record = sample();
        let back = decode(&encode(&record).unwrap()).unwrap();
        assert_eq!(back, record);
    }

    #[test]
    fn missing_fields_default() {
        let record = decode("{}").unwrap();
        assert_eq!(record.character_name, "Cat");
        assert_eq!(record.player, PlayerRecord::default());
        assert_eq!(record.player.level, 1);
        assert_eq!(record.taco_cat.coins_for_next_level, 10);
        assert_eq!(record.home, HomeRecord { x: 650.0, y: 100.0 });
        assert!(record.coins.is_empty());
    }

    #[test]
    fn partial_player_keeps_present_fields() {
        let record = decode(r#"{"player":{"coins":7,"x":10}}"#).unwrap();
        assert_eq!(record.player.coins, 7);
        assert_eq!(record.player.x, 10.0);
        assert_eq!(record.player.health, 100);
        assert_eq!(record.player.y, 300.0);
    }

    #[test]
    fn garbage_is_malformed() {
        assert!(matches!(decode("not json"), Err(GameError::MalformedSave(_))));
        assert!(matches!(
            decode(r#"{"player":{"coins":-3}}"#),
            Err(GameError::MalformedSave(_))
        ));
        assert!(matches!(decode(r#"[1,2]"#), Err(GameError::MalformedSave(_))));
    }

    #[test]
    fn memory_store_roundtrip() {
        let mut store = MemoryStore::default();
        assert_eq!(store.get(SAVE_KEY).unwrap(), None);
        store.set(SAVE_KEY, "{}").unwrap();
        assert_eq!(store.get(SAVE_KEY).unwrap().as_deref(), Some("{}"));
        store.remove(SAVE_KEY).unwrap();
        assert_eq!(store.get(SAVE_KEY).unwrap(), None);
    }

    #[test]
    fn now_is_after_2020() {
        assert!(now_millis() > 1_577_836_800_000);
    }
}
