//! Pure deck analysis.
//!
//! Everything in this module is a deterministic, side-effect-free function
//! over a deck map, the catalog, and (for the integrated analyzer) the reiki
//! allocation. None of these functions can fail: unknown card ids are
//! skipped in statistics and reported as validation errors, never panics.

use std::collections::BTreeMap;

use crate::catalog::{CardColor, Catalog};

pub mod endpoints;
pub mod integrated;
pub mod suggestion;
pub mod support;
pub mod validator;

pub use integrated::{analyze_deck_synergy, ColorBalance, IntegratedAnalysis};
pub use suggestion::{calculate_suggested_reiki, ReikiSuggestion};
pub use support::{calculate_support_distribution, SupportDistribution};
pub use validator::{validate, ValidationResult};

/// Per-chromatic-color copy counts of a deck map, resolved against the
/// catalog. Colorless cards and unknown ids are excluded. Counts are
/// accumulated in `u64` so maps with arbitrary per-card counts cannot
/// overflow the totals.
pub fn chromatic_distribution(
    cards: &BTreeMap<String, u32>,
    catalog: &Catalog,
) -> BTreeMap<CardColor, u64> {
    let mut distribution = BTreeMap::new();
    for (card_id, &count) in cards {
        if count == 0 {
            continue;
        }
        if let Some(card) = catalog.get(card_id) {
            if card.color.is_chromatic() {
                *distribution.entry(card.color).or_insert(0) += u64::from(count);
            }
        }
    }
    distribution
}
