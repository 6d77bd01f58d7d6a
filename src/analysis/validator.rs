//! Deck legality validation and derived statistics.

use std::collections::BTreeMap;

use rocket::serde::{Deserialize, Serialize};
use rocket_okapi::JsonSchema;

use crate::catalog::{CardColor, CardType, Catalog};
use crate::main_deck::{MAIN_DECK_TARGET, MAX_COPIES_PER_CARD};

/// Any single chromatic color above this share of the chromatic total
/// triggers an overconcentration warning.
const CONCENTRATION_WARN_SHARE: f64 = 0.85;
/// A chromatic color present but below this share triggers an
/// underrepresentation warning.
const SPLASH_WARN_SHARE: f64 = 0.10;
/// A full deck wants at least this many cards at cost 0-2.
const EARLY_GAME_FLOOR: u32 = 12;
/// A full deck wants at most this many cards at cost 6+.
const LATE_GAME_CEILING: u32 = 12;
/// Minimum unit share of a full deck.
const UNIT_SHARE_FLOOR: f64 = 0.40;
/// Minimum supporter share of a full deck.
const SUPPORTER_SHARE_FLOOR: f64 = 0.10;

/// Outcome of validating a deck map against the catalog.
///
/// `errors` hold violated hard rules (deck illegal); `warnings` hold soft
/// advisory notices that never affect `is_valid`. The derived statistics
/// cover catalog-resolvable entries only and are accumulated in `u64`,
/// since input maps may carry arbitrary per-card counts.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize, JsonSchema)]
#[serde(crate = "rocket::serde")]
pub struct ValidationResult {
    pub is_valid: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    pub total_cards: u64,
    pub color_distribution: BTreeMap<CardColor, u64>,
    pub cost_curve: BTreeMap<u32, u64>,
    pub type_distribution: BTreeMap<CardType, u64>,
}

/// Validate a deck map. Total over all inputs: any map, including one
/// referencing unknown card ids or exceeding limits, produces a well-formed
/// result.
pub fn validate(cards: &BTreeMap<String, u32>, catalog: &Catalog) -> ValidationResult {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();
    let mut color_distribution: BTreeMap<CardColor, u64> = BTreeMap::new();
    let mut cost_curve: BTreeMap<u32, u64> = BTreeMap::new();
    let mut type_distribution: BTreeMap<CardType, u64> = BTreeMap::new();

    let total_cards: u64 = cards.values().map(|&count| u64::from(count)).sum();
    let target = u64::from(MAIN_DECK_TARGET);

    if total_cards < target {
        errors.push(format!(
            "Deck has {} cards, needs {} more to reach {}",
            total_cards,
            target - total_cards,
            MAIN_DECK_TARGET
        ));
    } else if total_cards > target {
        errors.push(format!(
            "Deck has {} cards, {} over the {} card limit",
            total_cards,
            total_cards - target,
            MAIN_DECK_TARGET
        ));
    }

    for (card_id, &count) in cards {
        if count == 0 {
            continue;
        }
        match catalog.get(card_id) {
            Some(card) => {
                if count > MAX_COPIES_PER_CARD {
                    errors.push(format!(
                        "'{}' has {} copies, above the {} copy limit",
                        card.name, count, MAX_COPIES_PER_CARD
                    ));
                }
                *color_distribution.entry(card.color).or_insert(0) += u64::from(count);
                *cost_curve.entry(card.cost).or_insert(0) += u64::from(count);
                *type_distribution.entry(card.card_type).or_insert(0) += u64::from(count);
            }
            None => {
                if count > MAX_COPIES_PER_CARD {
                    errors.push(format!(
                        "'{}' has {} copies, above the {} copy limit",
                        card_id, count, MAX_COPIES_PER_CARD
                    ));
                }
                errors.push(format!("Card '{}' does not exist in the catalog", card_id));
            }
        }
    }

    let chromatic_total: u64 = color_distribution
        .iter()
        .filter(|(color, _)| color.is_chromatic())
        .map(|(_, &count)| count)
        .sum();
    if chromatic_total > 0 {
        for (&color, &count) in &color_distribution {
            if !color.is_chromatic() || count == 0 {
                continue;
            }
            let share = count as f64 / chromatic_total as f64;
            if share > CONCENTRATION_WARN_SHARE {
                warnings.push(format!(
                    "{} makes up {:.0}% of colored cards; the deck is heavily concentrated",
                    color.name(),
                    share * 100.0
                ));
            } else if share < SPLASH_WARN_SHARE {
                warnings.push(format!(
                    "{} makes up only {:.0}% of colored cards; such a light splash is hard to support with reiki",
                    color.name(),
                    share * 100.0
                ));
            }
        }
    }

    // Curve and type shape warnings only make sense for a complete deck.
    if total_cards == target {
        let early: u64 = cost_curve
            .iter()
            .filter(|(&cost, _)| cost <= 2)
            .map(|(_, &count)| count)
            .sum();
        if early < u64::from(EARLY_GAME_FLOOR) {
            warnings.push(format!(
                "Only {} cards at cost 0-2; fewer than {} early plays makes slow starts likely",
                early, EARLY_GAME_FLOOR
            ));
        }
        let late: u64 = cost_curve
            .iter()
            .filter(|(&cost, _)| cost >= 6)
            .map(|(_, &count)| count)
            .sum();
        if late > u64::from(LATE_GAME_CEILING) {
            warnings.push(format!(
                "{} cards at cost 6 or more; more than {} expensive cards risks clogged hands",
                late, LATE_GAME_CEILING
            ));
        }

        let units = type_distribution
            .get(&CardType::Unit)
            .copied()
            .unwrap_or(0);
        if units as f64 / f64::from(MAIN_DECK_TARGET) < UNIT_SHARE_FLOOR {
            warnings.push(format!(
                "Only {} units; below {:.0}% of the deck the board is hard to hold",
                units,
                UNIT_SHARE_FLOOR * 100.0
            ));
        }
        let supporters = type_distribution
            .get(&CardType::Supporter)
            .copied()
            .unwrap_or(0);
        if supporters as f64 / f64::from(MAIN_DECK_TARGET) < SUPPORTER_SHARE_FLOOR {
            warnings.push(format!(
                "Only {} supporters; below {:.0}% of the deck",
                supporters,
                SUPPORTER_SHARE_FLOOR * 100.0
            ));
        }
    }

    ValidationResult {
        is_valid: errors.is_empty(),
        errors,
        warnings,
        total_cards,
        color_distribution,
        cost_curve,
        type_distribution,
    }
}
