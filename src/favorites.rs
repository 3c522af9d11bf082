//! Favorite quotes.
//!
//! In memory favorites are [`Favorite`] records. On disk they stay a single
//! JSON array of strings under `favoritesArray`, alternating quote text and
//! author: `["q1", "a1", "q2", "a2", ...]`.

use log::{info, warn};

use crate::error::{QuotelyError, Result};
use crate::models::Favorite;
use crate::store::{keys, Store};

// ---------------------------------------------------------------------------
// Codec
// ---------------------------------------------------------------------------

/// Serialize favorites to the flat on-disk blob.
pub fn encode_favorites(favorites: &[Favorite]) -> Vec<u8> {
    encode_flat(&flatten(favorites))
}

/// Serialize an already-flat list.
pub fn encode_flat(flat: &[String]) -> Vec<u8> {
    // Serializing a slice of strings cannot fail.
    serde_json::to_vec(flat).unwrap_or_else(|_| b"[]".to_vec())
}

/// Parse the on-disk blob back into its flat form.
pub fn decode_favorites(blob: &[u8]) -> Result<Vec<String>> {
    serde_json::from_slice(blob).map_err(|e| QuotelyError::PersistenceDecode {
        key: keys::FAVORITES.into(),
        message: e.to_string(),
    })
}

fn flatten(favorites: &[Favorite]) -> Vec<String> {
    favorites
        .iter()
        .flat_map(|f| [f.text.clone(), f.author.clone()])
        .collect()
}

/// Group a flat list into pairs. An unpaired trailing entry is dropped.
fn pair_up(flat: Vec<String>) -> Vec<Favorite> {
    if flat.len() % 2 != 0 {
        warn!(
            "favorites list has odd length {}; dropping the unpaired entry",
            flat.len()
        );
    }
    let mut iter = flat.into_iter();
    let mut pairs = Vec::new();
    while let (Some(text), Some(author)) = (iter.next(), iter.next()) {
        pairs.push(Favorite { text, author });
    }
    pairs
}

// ---------------------------------------------------------------------------
// Manager
// ---------------------------------------------------------------------------

/// Favorites stored in a [`Store`].
///
/// Every mutation reads the full list, changes it, and rewrites the blob.
pub struct Favorites<'a> {
    store: &'a mut Store,
}

impl<'a> Favorites<'a> {
    pub fn new(store: &'a mut Store) -> Self {
        Self { store }
    }

    /// The flat list as persisted. Absent or unreadable blobs read as empty.
    pub fn load(&self) -> Vec<String> {
        load_flat(&*self.store)
    }

    /// The list as records.
    pub fn pairs(&self) -> Vec<Favorite> {
        load_pairs(&*self.store)
    }

    pub fn len(&self) -> usize {
        self.pairs().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Append one (quote, author) pair.
    ///
    /// The list is rewritten from whole pairs, so a dangling entry left by an
    /// odd-length blob is dropped rather than shifting every later pair.
    pub fn append(&mut self, text: &str, author: &str) -> Result<()> {
        let mut pairs = self.pairs();
        pairs.push(Favorite::new(text, author));
        self.store
            .set_data(keys::FAVORITES, encode_favorites(&pairs))?;
        info!("added favorite by {author}");
        Ok(())
    }

    /// Remove the pair at `pair_index` and return it.
    ///
    /// Out-of-range indices leave the list untouched and return `None`.
    pub fn delete_at(&mut self, pair_index: usize) -> Result<Option<Favorite>> {
        let mut pairs = self.pairs();
        if pair_index >= pairs.len() {
            warn!(
                "favorite index {pair_index} out of range ({} pairs)",
                pairs.len()
            );
            return Ok(None);
        }
        let removed = pairs.remove(pair_index);
        self.store
            .set_data(keys::FAVORITES, encode_favorites(&pairs))?;
        info!("removed favorite by {}", removed.author);
        Ok(Some(removed))
    }

    pub fn clear(&mut self) -> Result<()> {
        self.store.set_data(keys::FAVORITES, encode_flat(&[]))
    }
}

/// Read-only view of the flat list, for callers holding a shared borrow.
pub fn load_flat(store: &Store) -> Vec<String> {
    let Some(blob) = store.data(keys::FAVORITES) else {
        return Vec::new();
    };
    decode_favorites(blob).unwrap_or_else(|e| {
        warn!("{e}; treating favorites as empty");
        Vec::new()
    })
}

/// Read-only view of the favorites as records.
pub fn load_pairs(store: &Store) -> Vec<Favorite> {
    pair_up(load_flat(store))
}
