//! Reiki (resource) deck store.
//!
//! A fixed allocation of the 15 resource slots across the five chromatic
//! colors. Unlike the main deck store, out-of-range writes are clamped
//! rather than rejected; `increment` additionally refuses to push the
//! running total past 15. `set_color` deliberately ignores the running
//! total, so a sequence of sets can exceed 15 in sum -- validity (total ==
//! 15 exactly) is a read-time question answered by `is_valid`.

use std::collections::BTreeMap;

use rocket::serde::{Deserialize, Serialize};
use rocket_okapi::JsonSchema;

use crate::catalog::CardColor;

pub mod endpoints;

/// A legal reiki deck holds exactly this many cards.
pub const REIKI_DECK_TARGET: u32 = 15;

/// One color's slice of the reiki allocation.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize, JsonSchema)]
#[serde(crate = "rocket::serde")]
pub struct ReikiEntry {
    pub color: CardColor,
    pub count: u32,
}

/// The working reiki allocation: one count per chromatic color.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize, JsonSchema)]
#[serde(crate = "rocket::serde")]
pub struct ReikiDeck {
    slots: BTreeMap<CardColor, u32>,
}

impl Default for ReikiDeck {
    fn default() -> Self {
        Self::new()
    }
}

impl ReikiDeck {
    /// All chromatic colors at zero.
    pub fn new() -> Self {
        let mut slots = BTreeMap::new();
        for color in CardColor::chromatic() {
            slots.insert(color, 0);
        }
        ReikiDeck { slots }
    }

    /// Build an allocation from persisted entries, clamping each count into
    /// [0, 15] and ignoring colorless entries.
    pub fn from_entries(entries: &[ReikiEntry]) -> Self {
        let mut deck = Self::new();
        for entry in entries {
            deck.set_color(entry.color, entry.count);
        }
        deck
    }

    pub fn get(&self, color: CardColor) -> u32 {
        self.slots.get(&color).copied().unwrap_or(0)
    }

    pub fn total(&self) -> u32 {
        self.slots.values().sum()
    }

    /// A reiki deck is legal when it holds exactly 15 cards.
    pub fn is_valid(&self) -> bool {
        self.total() == REIKI_DECK_TARGET
    }

    /// Set a color's count, clamping into [0, 15]. Colorless is not a slot
    /// and is ignored. Returns the stored value.
    pub fn set_color(&mut self, color: CardColor, count: u32) -> u32 {
        if !color.is_chromatic() {
            return 0;
        }
        let clamped = count.min(REIKI_DECK_TARGET);
        self.slots.insert(color, clamped);
        clamped
    }

    /// Add one resource of a color. Refused when the color is already at 15
    /// or the running total across all colors has reached 15.
    pub fn increment(&mut self, color: CardColor) -> bool {
        if !color.is_chromatic() {
            return false;
        }
        if self.get(color) >= REIKI_DECK_TARGET || self.total() >= REIKI_DECK_TARGET {
            return false;
        }
        *self.slots.entry(color).or_insert(0) += 1;
        true
    }

    /// Remove one resource of a color, stopping at zero.
    pub fn decrement(&mut self, color: CardColor) -> bool {
        if !color.is_chromatic() {
            return false;
        }
        match self.slots.get_mut(&color) {
            Some(count) if *count > 0 => {
                *count -= 1;
                true
            }
            _ => false,
        }
    }

    pub fn clear(&mut self) {
        for count in self.slots.values_mut() {
            *count = 0;
        }
    }

    /// Replace the whole allocation with a suggestion's entries.
    pub fn apply_suggestion(&mut self, entries: &[ReikiEntry]) {
        self.clear();
        for entry in entries {
            self.set_color(entry.color, entry.count);
        }
    }

    /// The allocation as a list of per-color entries, in canonical color
    /// order, including zero counts.
    pub fn entries(&self) -> Vec<ReikiEntry> {
        CardColor::chromatic()
            .iter()
            .map(|&color| ReikiEntry {
                color,
                count: self.get(color),
            })
            .collect()
    }

    /// Only the colors with at least one resource.
    pub fn active_entries(&self) -> Vec<ReikiEntry> {
        self.entries().into_iter().filter(|e| e.count > 0).collect()
    }
}
