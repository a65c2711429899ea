//! Favorite characters and their persistence.
//!
//! The set is stored as a JSON array of ids under a single key. Reads never
//! fail: a missing or unreadable value loads as an empty set.

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::StorageError;
use crate::state::CharacterId;

pub const FAVORITES_KEY: &str = "favPersonajes";

/// Favorite ids in the order they were added.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<CharacterId>", into = "Vec<CharacterId>")]
pub struct Favorites(Vec<CharacterId>);

impl Favorites {
    pub fn contains(&self, id: CharacterId) -> bool {
        self.0.contains(&id)
    }

    /// Flip membership of `id`; returns whether it is a favorite afterwards.
    pub fn toggle(&mut self, id: CharacterId) -> bool {
        match self.0.iter().position(|existing| *existing == id) {
            Some(index) => {
                self.0.remove(index);
                false
            }
            None => {
                self.0.push(id);
                true
            }
        }
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = CharacterId> + '_ {
        self.0.iter().copied()
    }
}

impl FromIterator<CharacterId> for Favorites {
    fn from_iter<I: IntoIterator<Item = CharacterId>>(iter: I) -> Self {
        let mut favorites = Self::default();
        for id in iter {
            if !favorites.contains(id) {
                favorites.0.push(id);
            }
        }
        favorites
    }
}

impl From<Vec<CharacterId>> for Favorites {
    fn from(ids: Vec<CharacterId>) -> Self {
        ids.into_iter().collect()
    }
}

impl From<Favorites> for Vec<CharacterId> {
    fn from(favorites: Favorites) -> Self {
        favorites.0
    }
}

/// Key/value backing store, modelled on browser local storage.
pub trait Storage {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn write(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// One `<key>.json` file per key inside a data directory.
#[derive(Clone, Debug)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl Storage for FileStorage {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(contents) => Ok(Some(contents)),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        fs::create_dir_all(&self.dir)?;
        // Write beside the target and rename so readers never see half a file.
        let path = self.path_for(key);
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, value)?;
        fs::rename(&tmp, &path)?;
        Ok(())
    }
}

#[derive(Clone, Debug, Default)]
pub struct MemoryStorage {
    values: HashMap<String, String>,
    writes: usize,
}

impl MemoryStorage {
    pub fn with_value(key: &str, value: &str) -> Self {
        let mut values = HashMap::new();
        values.insert(key.to_string(), value.to_string());
        Self { values, writes: 0 }
    }

    pub fn writes(&self) -> usize {
        self.writes
    }

    pub fn value(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }
}

impl Storage for MemoryStorage {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.values.get(key).cloned())
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.values.insert(key.to_string(), value.to_string());
        self.writes += 1;
        Ok(())
    }
}

pub struct FavoritesStore<S: Storage> {
    storage: S,
}

impl<S: Storage> FavoritesStore<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn load(&self) -> Favorites {
        let raw = match self.storage.read(FAVORITES_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Favorites::default(),
            Err(err) => {
                tracing::warn!(error = %err, "favorites unreadable, starting empty");
                return Favorites::default();
            }
        };
        match serde_json::from_str::<Favorites>(&raw) {
            Ok(favorites) => favorites,
            Err(err) => {
                tracing::warn!(error = %err, "favorites corrupt, starting empty");
                Favorites::default()
            }
        }
    }

    /// Overwrite the stored set in full.
    pub fn save(&mut self, favorites: &Favorites) -> Result<(), StorageError> {
        let json = serde_json::to_string(favorites)?;
        self.storage.write(FAVORITES_KEY, &json)?;
        tracing::debug!(count = favorites.len(), "favorites saved");
        Ok(())
    }
}
