//! File-backed keyed store.
//!
//! Each store is a JSON-lines file of `[key, value]` entries under a directory.
//! The file is loaded on open and rewritten on every mutation, so a write is
//! durable before the next read observes it. A failed rewrite rolls the
//! in-memory entry back.

use std::collections::BTreeMap;
use std::fs::{create_dir_all, rename, OpenOptions};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::{de::DeserializeOwned, Serialize};

use crate::core::{ActivationError, KeyedStore};

/// File-backed store using JSON lines for durability.
pub struct FileStore<K, V> {
    path: PathBuf,
    name: String,
    entries: BTreeMap<K, V>,
}

impl<K, V> FileStore<K, V>
where
    K: Ord + Serialize + DeserializeOwned,
    V: Serialize + DeserializeOwned,
{
    /// Open (or create) the store `name` under `path`.
    pub fn open(path: impl AsRef<Path>, name: impl Into<String>) -> Result<Self, ActivationError> {
        let path = path.as_ref().to_path_buf();
        let name = name.into();
        create_dir_all(&path).map_err(ActivationError::store)?;
        let mut store = Self {
            path,
            name,
            entries: BTreeMap::new(),
        };
        store.load_from_disk()?;
        Ok(store)
    }

    /// Location of the backing file.
    pub fn file_path(&self) -> PathBuf {
        self.path.join(format!("{}.jsonl", self.name))
    }

    fn load_from_disk(&mut self) -> Result<(), ActivationError> {
        let file_path = self.file_path();
        if !file_path.exists() {
            return Ok(());
        }
        let file = OpenOptions::new()
            .read(true)
            .open(&file_path)
            .map_err(ActivationError::store)?;
        let reader = BufReader::new(file);
        for line in reader.lines() {
            let line = line.map_err(ActivationError::store)?;
            if line.trim().is_empty() {
                continue;
            }
            let (key, value): (K, V) =
                serde_json::from_str(&line).map_err(ActivationError::store)?;
            self.entries.insert(key, value);
        }
        Ok(())
    }

    fn rewrite_disk(&self) -> Result<(), ActivationError> {
        let file_path = self.file_path();
        let tmp_path = self.path.join(format!("{}.jsonl.tmp", self.name));
        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(&tmp_path)
            .map_err(ActivationError::store)?;
        let mut writer = BufWriter::new(file);
        for entry in &self.entries {
            let line = serde_json::to_string(&entry).map_err(ActivationError::store)?;
            writeln!(writer, "{line}").map_err(ActivationError::store)?;
        }
        let file = writer
            .into_inner()
            .map_err(|e| ActivationError::store(e.error()))?;
        file.sync_all().map_err(ActivationError::store)?;
        rename(&tmp_path, &file_path).map_err(ActivationError::store)
    }
}

impl<K, V> KeyedStore<K, V> for FileStore<K, V>
where
    K: Ord + Clone + Serialize + DeserializeOwned,
    V: Clone + Serialize + DeserializeOwned,
{
    fn get(&self, key: &K) -> Result<Option<V>, ActivationError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: K, value: V) -> Result<(), ActivationError> {
        let previous = self.entries.insert(key.clone(), value);
        if let Err(err) = self.rewrite_disk() {
            match previous {
                Some(old) => self.entries.insert(key, old),
                None => self.entries.remove(&key),
            };
            return Err(err);
        }
        Ok(())
    }

    fn remove(&mut self, key: &K) -> Result<(), ActivationError> {
        let Some(old) = self.entries.remove(key) else {
            return Ok(());
        };
        if let Err(err) = self.rewrite_disk() {
            self.entries.insert(key.clone(), old);
            return Err(err);
        }
        Ok(())
    }
}
