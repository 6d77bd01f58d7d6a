//! Support-value distribution.
//!
//! Buckets the main deck's cards by their `support_value` field (cards
//! without one are ignored) and derives summary statistics plus qualitative
//! recommendations.

use std::collections::BTreeMap;

use rocket::serde::{Deserialize, Serialize};
use rocket_okapi::JsonSchema;

use crate::catalog::Catalog;
use crate::main_deck::MAIN_DECK_TARGET;

/// The support values printed on cards.
pub const SUPPORT_BUCKETS: [u32; 5] = [1000, 2000, 3000, 4000, 5000];

/// Fewer support copies than this draws a low-count flag.
const LOW_SUPPORT_FLOOR: u32 = 6;
/// More support copies than this draws a high-count flag.
const HIGH_SUPPORT_CEILING: u32 = 20;

/// Distribution of support values across the deck.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize, JsonSchema)]
#[serde(crate = "rocket::serde")]
pub struct SupportDistribution {
    /// Copy counts per support value; all five standard buckets are always
    /// present. Counts are `u64` since input maps may carry arbitrary
    /// per-card counts.
    pub buckets: BTreeMap<u32, u64>,
    pub total_support_cards: u64,
    /// Copy-weighted average support value, rounded to the nearest integer.
    /// Zero when the deck has no support cards.
    pub average_support_value: u32,
    /// The most populated bucket, or `None` when all buckets are empty.
    /// Ties resolve to the lowest support value.
    pub dominant_bucket: Option<u32>,
    /// Normalized Shannon entropy of the bucket proportions, in [0, 1].
    pub diversity_score: f64,
    pub recommendations: Vec<String>,
}

/// Bucket the deck's support values and derive statistics. Unknown card ids
/// and cards without a support value are skipped.
pub fn calculate_support_distribution(
    cards: &BTreeMap<String, u32>,
    catalog: &Catalog,
) -> SupportDistribution {
    let mut buckets: BTreeMap<u32, u64> = SUPPORT_BUCKETS.iter().map(|&v| (v, 0)).collect();

    for (card_id, &count) in cards {
        if count == 0 {
            continue;
        }
        if let Some(card) = catalog.get(card_id) {
            if let Some(value) = card.support_value {
                *buckets.entry(value).or_insert(0) += u64::from(count);
            }
        }
    }

    let total: u64 = buckets.values().sum();
    let weighted: u128 = buckets
        .iter()
        .map(|(&value, &count)| u128::from(value) * u128::from(count))
        .sum();
    // The weighted average is bounded by the largest bucket value, so the
    // cast down is lossless.
    let average = if total > 0 {
        (weighted as f64 / total as f64).round() as u32
    } else {
        0
    };

    // Ties resolve to the lowest value: take the first bucket holding the
    // maximum count.
    let dominant = if total > 0 {
        let best = buckets.values().copied().max().unwrap_or(0);
        buckets
            .iter()
            .find(|(_, &count)| count == best)
            .map(|(&value, _)| value)
    } else {
        None
    };

    let diversity = if total > 0 {
        let entropy: f64 = buckets
            .values()
            .filter(|&&count| count > 0)
            .map(|&count| {
                let p = count as f64 / total as f64;
                -p * p.ln()
            })
            .sum();
        (entropy / (SUPPORT_BUCKETS.len() as f64).ln()).clamp(0.0, 1.0)
    } else {
        0.0
    };

    let mut recommendations = Vec::new();
    if total < u64::from(LOW_SUPPORT_FLOOR) {
        recommendations.push(format!(
            "Only {} support cards; decks usually want at least {}",
            total, LOW_SUPPORT_FLOOR
        ));
    } else if total > u64::from(HIGH_SUPPORT_CEILING) {
        recommendations.push(format!(
            "{} support cards; above {} the deck leans heavily on supported battles",
            total, HIGH_SUPPORT_CEILING
        ));
    }
    let low_pair = (
        buckets.get(&1000).copied().unwrap_or(0),
        buckets.get(&2000).copied().unwrap_or(0),
    );
    if (low_pair.0 == 0) != (low_pair.1 == 0) {
        let present = if low_pair.0 > 0 { 1000 } else { 2000 };
        recommendations.push(format!(
            "Support values cluster at {}; mixing 1000 and 2000 support gives more flexible plays",
            present
        ));
    }
    if total > 0 {
        let percent = u128::from(total) * 100 / u128::from(MAIN_DECK_TARGET);
        let label = if percent <= 10 {
            "low"
        } else if percent <= 30 {
            "moderate"
        } else {
            "high"
        };
        recommendations.push(format!(
            "Support cards are {}% of a {}-card deck ({})",
            percent, MAIN_DECK_TARGET, label
        ));
    }

    SupportDistribution {
        buckets,
        total_support_cards: total,
        average_support_value: average,
        dominant_bucket: dominant,
        diversity_score: diversity,
        recommendations,
    }
}
