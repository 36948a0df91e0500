use std::path::{Path, PathBuf};

use common::{GameError, GameResult};
use tracing::debug;

use crate::SaveStore;

/// Store keeping one JSON file per key inside a directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl SaveStore for FileStore {
    fn get(&self, key: &str) -> GameResult<Option<String>> {
        match std::fs::read_to_string(self.path_for(key)) {
            Ok(s) => Ok(Some(s)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&mut self, key: &str, payload: &str) -> GameResult<()> {
        std::fs::create_dir_all(&self.dir)?;
        let path = self.path_for(key);
        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, payload)?;
        replace(&tmp, &path)?;
        debug!(path = %path.display(), bytes = payload.len(), "save_written");
        Ok(())
    }

    fn remove(&mut self, key: &str) -> GameResult<()> {
        match std::fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

fn replace(from: &Path, to: &Path) -> GameResult<()> {
    if to.exists() {
        std::fs::remove_file(to)?;
    }
    std::fs::rename(from, to).map_err(GameError::from)
}

/// Browser `localStorage` backed store.
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalStorageStore;

#[cfg(target_arch = "wasm32")]
impl LocalStorageStore {
    fn storage() -> GameResult<web_sys::Storage> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok().flatten())
            .ok_or_else(|| GameError::Storage("localStorage unavailable".into()))
    }
}

#[cfg(target_arch = "wasm32")]
impl SaveStore for LocalStorageStore {
    fn get(&self, key: &str) -> GameResult<Option<String>> {
        Self::storage()?
            .get_item(key)
            .map_err(|e| GameError::Storage(format!("{e:?}")))
    }

    fn set(&mut self, key: &str, payload: &str) -> GameResult<()> {
        Self::storage()?
            .set_item(key, payload)
            .map_err(|e| GameError::Storage(format!("{e:?}")))
    }

    fn remove(&mut self, key: &str) -> GameResult<()> {
        Self::storage()?
            .remove_item(key)
            .map_err(|e| GameError::Storage(format!("{e:?}")))
    }
}
