//! Persisted deck documents and format migration.
//!
//! A deck is stored as a single JSON document. The current format (version
//! 2) carries both the main-deck map and the reiki allocation. The legacy
//! format -- a bare card-id to copy-count map with no version tag -- is
//! detected on read and migrated by attaching an all-zero reiki allocation;
//! migration produces a new in-memory value and never rewrites stored bytes.

use std::collections::BTreeMap;
use std::time::{SystemTime, UNIX_EPOCH};

use rocket::serde::{Deserialize, Serialize};
use rocket_okapi::JsonSchema;
use serde_json::Value;

use crate::catalog::CardColor;
use crate::reiki_deck::ReikiEntry;

pub mod endpoints;
pub mod store;

pub use store::DeckStore;

/// Version stamped on every document written by this build.
pub const CURRENT_FORMAT_VERSION: u32 = 2;

pub(crate) fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

/// The persisted unit: one named, versioned deck.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize, JsonSchema)]
#[serde(crate = "rocket::serde")]
pub struct SavedDeck {
    pub id: String,
    pub name: String,
    pub main_cards: BTreeMap<String, u32>,
    pub reiki_cards: Vec<ReikiEntry>,
    pub created_at: u64,
    pub updated_at: u64,
    pub format_version: u32,
}

/// An all-zero reiki allocation, attached to migrated legacy decks.
pub fn zero_reiki() -> Vec<ReikiEntry> {
    CardColor::chromatic()
        .iter()
        .map(|&color| ReikiEntry { color, count: 0 })
        .collect()
}

/// Interpret a stored JSON document as a [`SavedDeck`], migrating the
/// legacy format when necessary.
///
/// Rejects structurally malformed documents with a message; never partially
/// succeeds, so callers can apply the result atomically.
pub fn migrate_stored_deck(value: &Value, fallback_id: &str) -> Result<SavedDeck, String> {
    let object = value
        .as_object()
        .ok_or_else(|| "deck document must be a JSON object".to_string())?;

    if object.contains_key("format_version") {
        return serde_json::from_value(value.clone())
            .map_err(|e| format!("malformed deck document: {e}"));
    }

    // Legacy: a bare card-id -> copy-count map.
    let mut main_cards = BTreeMap::new();
    for (card_id, count) in object {
        let count = count
            .as_u64()
            .and_then(|n| u32::try_from(n).ok())
            .ok_or_else(|| {
                format!("legacy copy-count for '{card_id}' is not a non-negative integer")
            })?;
        if count > 0 {
            main_cards.insert(card_id.clone(), count);
        }
    }

    let now = now_millis();
    Ok(SavedDeck {
        id: fallback_id.to_string(),
        name: "Imported Deck".to_string(),
        main_cards,
        reiki_cards: zero_reiki(),
        created_at: now,
        updated_at: now,
        format_version: CURRENT_FORMAT_VERSION,
    })
}
