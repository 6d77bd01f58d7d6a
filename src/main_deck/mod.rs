//! Main deck composition store.
//!
//! Holds the working 50-card deck as a card-id to copy-count map. Write-time
//! limits (4 copies per card, 50 cards total) are enforced by silently
//! rejecting out-of-range mutations; mutators return whether the mutation
//! was applied so callers can surface limit feedback without the store ever
//! raising an error. Reaching exactly 50 cards is a validation concern, not
//! a write-time one.

use std::collections::BTreeMap;
use std::time::{SystemTime, UNIX_EPOCH};

use rocket::serde::{Deserialize, Serialize};
use rocket_okapi::JsonSchema;

pub mod endpoints;

/// A legal deck holds exactly this many cards.
pub const MAIN_DECK_TARGET: u32 = 50;
/// Maximum number of copies of a single card.
pub const MAX_COPIES_PER_CARD: u32 = 4;
/// Name given to a freshly created or cleared deck.
pub const DEFAULT_DECK_NAME: &str = "New Deck";

fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

/// The working main deck: card-id -> copy-count plus metadata.
///
/// Invariant: every stored count is in [1, 4]; zero-count entries are
/// removed rather than stored.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize, JsonSchema)]
#[serde(crate = "rocket::serde")]
pub struct MainDeck {
    pub cards: BTreeMap<String, u32>,
    pub name: String,
    /// Epoch milliseconds of the last mutation.
    pub updated_at: u64,
}

impl Default for MainDeck {
    fn default() -> Self {
        Self::new()
    }
}

impl MainDeck {
    pub fn new() -> Self {
        MainDeck {
            cards: BTreeMap::new(),
            name: DEFAULT_DECK_NAME.to_string(),
            updated_at: now_millis(),
        }
    }

    /// Total copies across all cards. `u64` because `replace` can install
    /// imported maps with arbitrary per-card counts.
    pub fn total_count(&self) -> u64 {
        self.cards.values().map(|&count| u64::from(count)).sum()
    }

    pub fn count_of(&self, card_id: &str) -> u32 {
        self.cards.get(card_id).copied().unwrap_or(0)
    }

    fn touch(&mut self) {
        self.updated_at = now_millis();
    }

    /// Add one copy of a card. No-op when the card is already at 4 copies
    /// or the deck already holds 50 cards.
    pub fn add_card(&mut self, card_id: &str) -> bool {
        if self.count_of(card_id) >= MAX_COPIES_PER_CARD {
            return false;
        }
        if self.total_count() >= u64::from(MAIN_DECK_TARGET) {
            return false;
        }
        *self.cards.entry(card_id.to_string()).or_insert(0) += 1;
        self.touch();
        true
    }

    /// Remove one copy of a card, dropping the entry when it reaches zero.
    /// No-op when the card is not present.
    pub fn remove_card(&mut self, card_id: &str) -> bool {
        match self.cards.get_mut(card_id) {
            Some(count) if *count > 1 => {
                *count -= 1;
            }
            Some(_) => {
                self.cards.remove(card_id);
            }
            None => return false,
        }
        self.touch();
        true
    }

    /// Set the absolute copy-count of a card.
    ///
    /// Zero deletes the entry (a no-op when the card is absent). Counts
    /// above 4, or counts that would push the deck total past 50, are
    /// rejected and the prior value retained. The ceiling is always checked
    /// against the resulting grand total.
    pub fn set_count(&mut self, card_id: &str, count: u32) -> bool {
        if count == 0 {
            if self.cards.remove(card_id).is_none() {
                return false;
            }
            self.touch();
            return true;
        }
        if count > MAX_COPIES_PER_CARD {
            return false;
        }
        let others = self.total_count() - u64::from(self.count_of(card_id));
        if others + u64::from(count) > u64::from(MAIN_DECK_TARGET) {
            return false;
        }
        self.cards.insert(card_id.to_string(), count);
        self.touch();
        true
    }

    /// Empty the deck and reset the name.
    pub fn clear(&mut self) {
        self.cards.clear();
        self.name = DEFAULT_DECK_NAME.to_string();
        self.touch();
    }

    /// Rename the deck. Empty names are permitted at the store level.
    pub fn set_name(&mut self, name: String) {
        self.name = name;
        self.touch();
    }

    /// Replace the whole composition, e.g. on load or import. Zero-count
    /// entries are dropped to restore the store invariant; limits are not
    /// re-applied (loaded decks are judged by the validator instead).
    pub fn replace(&mut self, cards: BTreeMap<String, u32>, name: String) {
        self.cards = cards;
        self.cards.retain(|_, count| *count > 0);
        self.name = name;
        self.touch();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_card_caps_at_four_copies() {
        let mut deck = MainDeck::new();
        for _ in 0..4 {
            assert!(deck.add_card("R-001"));
        }
        assert!(!deck.add_card("R-001"));
        assert_eq!(deck.count_of("R-001"), 4);
    }

    #[test]
    fn add_card_caps_at_fifty_total() {
        let mut deck = MainDeck::new();
        for i in 0..13 {
            for _ in 0..4 {
                deck.add_card(&format!("card-{i}"));
            }
        }
        // 13 * 4 = 52 attempted, but the 50th copy is the last accepted.
        assert_eq!(deck.total_count(), 50);
        assert!(!deck.add_card("another"));
        assert_eq!(deck.total_count(), 50);
    }

    #[test]
    fn remove_card_drops_empty_entries() {
        let mut deck = MainDeck::new();
        deck.add_card("B-001");
        assert!(deck.remove_card("B-001"));
        assert!(!deck.cards.contains_key("B-001"));
        assert!(!deck.remove_card("B-001"));
    }

    #[test]
    fn set_count_rejects_out_of_range_silently() {
        let mut deck = MainDeck::new();
        assert!(deck.set_count("R-001", 3));
        assert!(!deck.set_count("R-001", 5));
        assert_eq!(deck.count_of("R-001"), 3);

        // Fill the deck to 48 with other cards; raising R-001 to 3 is the
        // most that still fits under 50.
        for i in 0..15 {
            deck.set_count(&format!("filler-{i}"), 3);
        }
        assert_eq!(deck.total_count(), 48);
        assert!(!deck.set_count("R-001", 4));
        assert_eq!(deck.count_of("R-001"), 3);
    }

    #[test]
    fn set_count_zero_deletes_entry() {
        let mut deck = MainDeck::new();
        deck.set_count("G-001", 2);
        assert!(deck.set_count("G-001", 0));
        assert!(!deck.cards.contains_key("G-001"));
    }

    #[test]
    fn set_count_zero_on_absent_card_is_a_no_op() {
        let mut deck = MainDeck::new();
        deck.updated_at = 0;
        assert!(!deck.set_count("ghost", 0));
        assert!(deck.cards.is_empty());
        // A refused mutation must not bump the timestamp either.
        assert_eq!(deck.updated_at, 0);
    }

    #[test]
    fn replaced_decks_with_huge_counts_still_total() {
        let mut deck = MainDeck::new();
        let mut cards = BTreeMap::new();
        cards.insert("a".to_string(), u32::MAX);
        cards.insert("b".to_string(), u32::MAX);
        deck.replace(cards, "Imported".to_string());
        assert_eq!(deck.total_count(), 2 * u64::from(u32::MAX));
        // The deck is over the ceiling, so adds stay refused.
        assert!(!deck.add_card("c"));
    }

    #[test]
    fn clear_resets_name_and_cards() {
        let mut deck = MainDeck::new();
        deck.set_name("Aggro Red".to_string());
        deck.add_card("R-001");
        deck.clear();
        assert!(deck.cards.is_empty());
        assert_eq!(deck.name, DEFAULT_DECK_NAME);
    }

    #[test]
    fn replace_drops_zero_counts() {
        let mut deck = MainDeck::new();
        let mut cards = BTreeMap::new();
        cards.insert("a".to_string(), 4);
        cards.insert("b".to_string(), 0);
        deck.replace(cards, "Loaded".to_string());
        assert_eq!(deck.count_of("a"), 4);
        assert!(!deck.cards.contains_key("b"));
        assert_eq!(deck.name, "Loaded");
    }
}
