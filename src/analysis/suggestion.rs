//! Reiki suggestion engine.
//!
//! Given the main deck's chromatic color distribution, computes a
//! recommended split of the 15 reiki slots. Deterministic: identical
//! distributions always yield identical suggestions.

use std::collections::BTreeMap;

use rocket::serde::{Deserialize, Serialize};
use rocket_okapi::JsonSchema;

use crate::catalog::CardColor;
use crate::reiki_deck::{ReikiEntry, REIKI_DECK_TARGET};

/// A recommended reiki allocation with its rationale.
///
/// `entries` always sum to exactly 15. `confidence` is in [0, 1]: highest
/// for mono-color decks, lowest for the colorless fallback.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize, JsonSchema)]
#[serde(crate = "rocket::serde")]
pub struct ReikiSuggestion {
    pub entries: Vec<ReikiEntry>,
    pub reasoning: String,
    pub confidence: f64,
}

impl ReikiSuggestion {
    pub fn total(&self) -> u32 {
        self.entries.iter().map(|e| e.count).sum()
    }
}

/// Compute the suggested reiki split for a main-deck color distribution.
///
/// Colorless and zero-count entries in the input are ignored. With no
/// chromatic cards at all, falls back to an even 3/3/3/3/3 split. Counts
/// are `u64` and the proportional shares are computed in `u128`, so
/// arbitrarily large distributions cannot overflow.
pub fn calculate_suggested_reiki(distribution: &BTreeMap<CardColor, u64>) -> ReikiSuggestion {
    let counts: Vec<(CardColor, u64)> = CardColor::chromatic()
        .iter()
        .map(|&color| (color, distribution.get(&color).copied().unwrap_or(0)))
        .collect();
    let chromatic_total: u128 = counts.iter().map(|&(_, count)| u128::from(count)).sum();

    if chromatic_total == 0 {
        let per_color = REIKI_DECK_TARGET / CardColor::chromatic().len() as u32;
        return ReikiSuggestion {
            entries: counts
                .iter()
                .map(|&(color, _)| ReikiEntry {
                    color,
                    count: per_color,
                })
                .collect(),
            reasoning: "No colored cards in the main deck; suggesting an even split across all colors".to_string(),
            confidence: 0.6,
        };
    }

    // Floor of each color's proportional share of the 15 slots. Each share
    // is at most 15, so the cast back down is lossless.
    let mut suggested: BTreeMap<CardColor, u32> = BTreeMap::new();
    for &(color, count) in &counts {
        let share = u128::from(count) * u128::from(REIKI_DECK_TARGET) / chromatic_total;
        suggested.insert(color, share as u32);
    }

    // Hand the flooring shortfall out one slot at a time, largest main-deck
    // presence first (canonical color order breaks ties).
    let mut shortfall = REIKI_DECK_TARGET - suggested.values().sum::<u32>();
    let mut by_presence = counts.clone();
    by_presence.sort_by(|a, b| b.1.cmp(&a.1));
    while shortfall > 0 {
        let mut progressed = false;
        for &(color, count) in &by_presence {
            if shortfall == 0 {
                break;
            }
            if count == 0 {
                continue;
            }
            let slot = suggested.entry(color).or_insert(0);
            if *slot < REIKI_DECK_TARGET {
                *slot += 1;
                shortfall -= 1;
                progressed = true;
            }
        }
        if !progressed {
            break;
        }
    }

    let active: Vec<(CardColor, u64)> = counts
        .iter()
        .filter(|(_, count)| *count > 0)
        .copied()
        .collect();
    let (reasoning, confidence) = match active.len() {
        1 => (
            format!(
                "Mono-{} deck; all 15 reiki go to its only color",
                active[0].0.name()
            ),
            0.9,
        ),
        2 => (
            format!(
                "Two-color deck ({}/{}); reiki split in proportion to card counts",
                active[0].0.name(),
                active[1].0.name()
            ),
            0.85,
        ),
        n => (
            format!(
                "Multi-color deck ({n} colors); reiki split in proportion to card counts"
            ),
            0.75,
        ),
    };

    ReikiSuggestion {
        entries: suggested
            .into_iter()
            .filter(|(_, count)| *count > 0)
            .map(|(color, count)| ReikiEntry { color, count })
            .collect(),
        reasoning,
        confidence,
    }
}
