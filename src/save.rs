//! Paper Forker save/load.
//!
//! The snapshot is a flat JSON object holding exactly the five
//! [`ProgressState`] fields under one key. It has no version tag: anything
//! that does not parse into those five fields counts as "no save" and the
//! game starts fresh.
//!
//! Storage goes through [`KeyValueStore`] so the core never touches browser
//! APIs directly. [`LocalStorage`] is the browser provider (wasm only);
//! [`MemoryStore`] backs native runs and tests.

use std::collections::HashMap;

use log::{info, warn};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::state::ProgressState;

/// localStorage key.
pub const STORAGE_KEY: &str = "paperForkerSave";

/// Why a snapshot could not be read. Callers of [`load`] never see this;
/// it is logged and turned into a fresh game.
#[derive(Debug, Error)]
pub enum SaveError {
    #[error("no save found")]
    Missing,
    #[error("save data is malformed: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// A key-value persistence provider.
///
/// Writes are fire-and-forget: a provider that cannot store a value logs the
/// failure and carries on.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str);
    fn remove(&mut self, key: &str);
}

/// Serialized form of [`ProgressState`].
#[derive(Serialize, Deserialize, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
struct SaveData {
    lines_of_code: u64,
    forks: u64,
    developer_skill_level: u64,
    developer_friends: u64,
    friend_upgrades: u64,
}

impl From<&ProgressState> for SaveData {
    fn from(state: &ProgressState) -> Self {
        Self {
            lines_of_code: state.lines_of_code,
            forks: state.forks,
            developer_skill_level: state.developer_skill_level,
            developer_friends: state.developer_friends,
            friend_upgrades: state.friend_upgrades,
        }
    }
}

impl From<SaveData> for ProgressState {
    fn from(save: SaveData) -> Self {
        Self {
            lines_of_code: save.lines_of_code,
            forks: save.forks,
            developer_skill_level: save.developer_skill_level,
            developer_friends: save.developer_friends,
            friend_upgrades: save.friend_upgrades,
        }
    }
}

/// Serialize a state into its snapshot JSON.
pub fn encode(state: &ProgressState) -> String {
    // Five integers cannot fail to serialize.
    serde_json::to_string(&SaveData::from(state)).unwrap_or_default()
}

/// Parse snapshot JSON back into a state.
pub fn decode(json: &str) -> Result<ProgressState, SaveError> {
    let save: SaveData = serde_json::from_str(json)?;
    Ok(save.into())
}

/// Read the snapshot from `store`.
pub fn read(store: &impl KeyValueStore) -> Result<ProgressState, SaveError> {
    let json = store.get(STORAGE_KEY).ok_or(SaveError::Missing)?;
    decode(&json)
}

/// Write the snapshot to `store`.
pub fn save(store: &mut impl KeyValueStore, state: &ProgressState) {
    store.set(STORAGE_KEY, &encode(state));
}

/// Load the saved game. Returns `None` when there is no usable save; a
/// present but unreadable save is removed.
pub fn load(store: &mut impl KeyValueStore) -> Option<ProgressState> {
    match read(store) {
        Ok(state) => {
            info!("loaded save ({} forks, {} LoC)", state.forks, state.lines_of_code);
            Some(state)
        }
        Err(SaveError::Missing) => {
            info!("no save found");
            None
        }
        Err(e) => {
            warn!("discarding save: {e}");
            store.remove(STORAGE_KEY);
            None
        }
    }
}

/// Drop any saved game and start (and save) a fresh one.
pub fn reset(store: &mut impl KeyValueStore) -> ProgressState {
    store.remove(STORAGE_KEY);
    let state = ProgressState::new();
    save(store, &state);
    info!("started a new game");
    state
}

/// Load the saved game, or start a fresh one if there is none.
pub fn load_or_reset(store: &mut impl KeyValueStore) -> ProgressState {
    match load(store) {
        Some(state) => state,
        None => reset(store),
    }
}

/// In-memory provider for native runs and tests.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
    /// Number of `set` calls, for observing autosave cadence.
    pub writes: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.writes += 1;
        self.entries.insert(key.to_string(), value.to_string());
    }

    fn remove(&mut self, key: &str) {
        self.entries.remove(key);
    }
}

/// Browser `localStorage` provider. WASM only.
#[cfg(target_arch = "wasm32")]
pub struct LocalStorage {
    storage: Option<web_sys::Storage>,
}

#[cfg(target_arch = "wasm32")]
impl LocalStorage {
    pub fn new() -> Self {
        let storage = web_sys::window().and_then(|w| w.local_storage().ok().flatten());
        if storage.is_none() {
            warn!("localStorage unavailable; progress will not be saved");
        }
        Self { storage }
    }
}

#[cfg(target_arch = "wasm32")]
impl KeyValueStore for LocalStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.storage.as_ref()?.get_item(key).ok().flatten()
    }

    fn set(&mut self, key: &str, value: &str) {
        if let Some(storage) = &self.storage {
            if let Err(e) = storage.set_item(key, value) {
                warn!("failed to write localStorage: {e:?}");
            }
        }
    }

    fn remove(&mut self, key: &str) {
        if let Some(storage) = &self.storage {
            let _ = storage.remove_item(key);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_uses_camel_case_keys() {
        let state = ProgressState {
            lines_of_code: 1,
            forks: 2,
            developer_skill_level: 3,
            developer_friends: 4,
            friend_upgrades: 5,
        };
        let value: serde_json::Value = serde_json::from_str(&encode(&state)).unwrap();
        let obj = value.as_object().unwrap();
        assert_eq!(obj.len(), 5);
        assert_eq!(obj["linesOfCode"], 1);
        assert_eq!(obj["forks"], 2);
        assert_eq!(obj["developerSkillLevel"], 3);
        assert_eq!(obj["developerFriends"], 4);
        assert_eq!(obj["friendUpgrades"], 5);
    }

    #[test]
    fn save_and_load_roundtrip() {
        let mut store = MemoryStore::new();
        let original = ProgressState {
            lines_of_code: 12_345,
            forks: 3,
            developer_skill_level: 7,
            developer_friends: 2,
            friend_upgrades: 1,
        };
        save(&mut store, &original);
        assert_eq!(load(&mut store), Some(original));
    }

    #[test]
    fn decode_reads_browser_written_json() {
        let json = r#"{"linesOfCode":500,"forks":1,"developerSkillLevel":2,"developerFriends":1,"friendUpgrades":0}"#;
        let state = decode(json).unwrap();
        assert_eq!(state.lines_of_code, 500);
        assert_eq!(state.forks, 1);
        assert_eq!(state.developer_skill_level, 2);
        assert_eq!(state.developer_friends, 1);
    }

    #[test]
    fn decode_rejects_missing_field() {
        let json = r#"{"linesOfCode":500,"forks":1,"developerSkillLevel":2,"developerFriends":1}"#;
        assert!(matches!(decode(json), Err(SaveError::Malformed(_))));
    }

    #[test]
    fn decode_rejects_negative_values() {
        let json = r#"{"linesOfCode":-5,"forks":1,"developerSkillLevel":2,"developerFriends":1,"friendUpgrades":0}"#;
        assert!(decode(json).is_err());
    }

    #[test]
    fn unknown_fields_are_ignored() {
        let json = r#"{"linesOfCode":1,"forks":0,"developerSkillLevel":0,"developerFriends":0,"friendUpgrades":0,"theme":"dark"}"#;
        assert_eq!(decode(json).unwrap().lines_of_code, 1);
    }

    #[test]
    fn load_missing_returns_none() {
        let mut store = MemoryStore::new();
        assert!(matches!(read(&store), Err(SaveError::Missing)));
        assert_eq!(load(&mut store), None);
    }

    #[test]
    fn load_garbage_returns_none_and_discards() {
        let mut store = MemoryStore::new();
        store.set(STORAGE_KEY, "{not json");
        assert_eq!(load(&mut store), None);
        assert_eq!(store.get(STORAGE_KEY), None);
    }

    #[test]
    fn load_json_null_is_no_save() {
        let mut store = MemoryStore::new();
        store.set(STORAGE_KEY, "null");
        assert_eq!(load(&mut store), None);
    }

    #[test]
    fn reset_writes_fresh_state() {
        let mut store = MemoryStore::new();
        save(
            &mut store,
            &ProgressState {
                lines_of_code: 99,
                forks: 4,
                ..ProgressState::new()
            },
        );
        let state = reset(&mut store);
        assert_eq!(state, ProgressState::new());
        assert_eq!(read(&store).unwrap(), ProgressState::new());
    }

    #[test]
    fn load_or_reset_prefers_existing_save() {
        let mut store = MemoryStore::new();
        let saved = ProgressState {
            forks: 2,
            ..ProgressState::new()
        };
        save(&mut store, &saved);
        assert_eq!(load_or_reset(&mut store), saved);
    }

    #[test]
    fn load_or_reset_starts_fresh_and_saves() {
        let mut store = MemoryStore::new();
        let state = load_or_reset(&mut store);
        assert_eq!(state, ProgressState::new());
        assert_eq!(store.writes, 1);
        assert!(store.get(STORAGE_KEY).is_some());
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn prop_snapshot_roundtrip(
            loc in any::<u64>(),
            forks in any::<u64>(),
            skill in any::<u64>(),
            friends in any::<u64>(),
            upgrades in any::<u64>(),
        ) {
            let state = ProgressState {
                lines_of_code: loc,
                forks,
                developer_skill_level: skill,
                developer_friends: friends,
                friend_upgrades: upgrades,
            };
            prop_assert_eq!(decode(&encode(&state)).unwrap(), state);
        }
    }
}
