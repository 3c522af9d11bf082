//! Flat key-value persistence.
//!
//! Every entry is a typed [`Value`]. The whole map lives in one JSON file that
//! is rewritten on each mutation (last writer wins, no transactions).

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::error::{QuotelyError, Result};

/// Persisted key names. These are part of the on-disk format.
pub mod keys {
    pub const QUOTE: &str = "quote";
    pub const AUTHOR: &str = "author";
    pub const QUOTE_TYPE: &str = "quoteType";
    pub const LARGER_FONT: &str = "largerFont";
    pub const CUSTOM_FONT_COLOR: &str = "customFontColor";
    pub const FONT_COLOR_R: &str = "fontColorR";
    pub const FONT_COLOR_G: &str = "fontColorG";
    pub const FONT_COLOR_B: &str = "fontColorB";
    pub const NOTIFS: &str = "notifs";
    pub const FAVORITES: &str = "favoritesArray";
}

/// A single stored value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum Value {
    String(String),
    Bool(bool),
    Int(i64),
    Double(f64),
    Data(Vec<u8>),
}

/// Key-value store backed by a JSON file, or by nothing at all for
/// [`Store::in_memory`].
#[derive(Debug, Default)]
pub struct Store {
    path: Option<PathBuf>,
    entries: BTreeMap<String, Value>,
}

impl Store {
    /// A store that is never written to disk.
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Open the store file at `path`.
    ///
    /// A missing file yields an empty store. A file that cannot be parsed,
    /// including one that is not UTF-8, is logged and also treated as empty;
    /// it is replaced on the next write.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let entries = if path.exists() {
            let content = fs::read(&path)?;
            match serde_json::from_slice(&content) {
                Ok(entries) => entries,
                Err(e) => {
                    warn!("ignoring unreadable store {}: {e}", path.display());
                    BTreeMap::new()
                }
            }
        } else {
            BTreeMap::new()
        };
        debug!("opened store {} ({} keys)", path.display(), entries.len());

        Ok(Self {
            path: Some(path),
            entries,
        })
    }

    /// `<config_dir>/quotely/store.json`.
    pub fn default_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir().ok_or_else(|| QuotelyError::Config {
            message: "Could not determine config directory".into(),
        })?;
        Ok(config_dir.join("quotely").join("store.json"))
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    /// Replace the value under `key` and persist.
    ///
    /// If the write fails the in-memory value is left as it was.
    pub fn set(&mut self, key: &str, value: Value) -> Result<()> {
        self.set_many([(key, value)])
    }

    /// Set several keys with a single write. Either all of them change or,
    /// when the write fails, none do.
    pub fn set_many<'k, I>(&mut self, values: I) -> Result<()>
    where
        I: IntoIterator<Item = (&'k str, Value)>,
    {
        let mut candidate = self.entries.clone();
        for (key, value) in values {
            candidate.insert(key.to_string(), value);
        }
        self.write(&candidate)?;
        self.entries = candidate;
        Ok(())
    }

    // ---- typed accessors ---------------------------------------------------

    pub fn string(&self, key: &str) -> Option<&str> {
        match self.get(key)? {
            Value::String(s) => Some(s.as_str()),
            other => mismatch(key, other),
        }
    }

    pub fn bool(&self, key: &str) -> Option<bool> {
        match self.get(key)? {
            Value::Bool(b) => Some(*b),
            other => mismatch(key, other),
        }
    }

    pub fn int(&self, key: &str) -> Option<i64> {
        match self.get(key)? {
            Value::Int(i) => Some(*i),
            other => mismatch(key, other),
        }
    }

    pub fn double(&self, key: &str) -> Option<f64> {
        match self.get(key)? {
            Value::Double(d) => Some(*d),
            Value::Int(i) => Some(*i as f64),
            other => mismatch(key, other),
        }
    }

    pub fn data(&self, key: &str) -> Option<&[u8]> {
        match self.get(key)? {
            Value::Data(d) => Some(d.as_slice()),
            other => mismatch(key, other),
        }
    }

    pub fn set_string(&mut self, key: &str, value: impl Into<String>) -> Result<()> {
        self.set(key, Value::String(value.into()))
    }

    pub fn set_bool(&mut self, key: &str, value: bool) -> Result<()> {
        self.set(key, Value::Bool(value))
    }

    pub fn set_int(&mut self, key: &str, value: i64) -> Result<()> {
        self.set(key, Value::Int(value))
    }

    pub fn set_double(&mut self, key: &str, value: f64) -> Result<()> {
        self.set(key, Value::Double(value))
    }

    pub fn set_data(&mut self, key: &str, value: Vec<u8>) -> Result<()> {
        self.set(key, Value::Data(value))
    }

    /// Write `entries` as the whole file, replacing the previous one.
    fn write(&self, entries: &BTreeMap<String, Value>) -> Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(entries)?;
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, content)?;
        fs::rename(&tmp, path)?;
        Ok(())
    }
}

fn mismatch<T>(key: &str, found: &Value) -> Option<T> {
    debug!("store key '{key}' holds an unexpected type: {found:?}");
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn values_use_tagged_json() {
        let json = serde_json::to_string(&Value::Bool(true)).unwrap();
        assert_eq!(json, r#"{"type":"bool","value":true}"#);
        let json = serde_json::to_string(&Value::Data(vec![1, 2])).unwrap();
        assert_eq!(json, r#"{"type":"data","value":[1,2]}"#);
    }

    #[test]
    fn typed_getters_reject_other_types() {
        let mut store = Store::in_memory();
        store.set_string(keys::QUOTE, "hello").unwrap();
        assert_eq!(store.string(keys::QUOTE), Some("hello"));
        assert_eq!(store.bool(keys::QUOTE), None);
        assert_eq!(store.int(keys::QUOTE), None);
    }

    #[test]
    fn double_accepts_int() {
        let mut store = Store::in_memory();
        store.set_int(keys::FONT_COLOR_R, 1).unwrap();
        assert_eq!(store.double(keys::FONT_COLOR_R), Some(1.0));
    }
}
