//! Integrated cross-deck analysis.
//!
//! Reconciles the main deck's color needs against the reiki deck's color
//! supply: a per-color alignment report, an overall balance score in
//! [0, 100], concrete recommendations, and risk factors.

use std::collections::BTreeMap;

use rocket::serde::{Deserialize, Serialize};
use rocket_okapi::JsonSchema;

use crate::analysis::chromatic_distribution;
use crate::catalog::{CardColor, Catalog};
use crate::main_deck::MAIN_DECK_TARGET;
use crate::reiki_deck::{ReikiDeck, REIKI_DECK_TARGET};

/// A main/reiki ratio is balanced inside this band (inclusive).
const BALANCED_RATIO_MIN: f64 = 3.0;
const BALANCED_RATIO_MAX: f64 = 5.0;
/// A color is dominant when it holds at least this share of chromatic cards.
const DOMINANT_SHARE: f64 = 0.10;
/// Main-deck copies above this with zero reiki support count as a risk.
const HEAVY_UNSUPPORTED_FLOOR: u64 = 5;

/// Alignment of one color across the two decks.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize, JsonSchema)]
#[serde(crate = "rocket::serde")]
pub struct ColorBalance {
    pub color: CardColor,
    pub main_count: u64,
    pub reiki_count: u32,
    /// main_count / reiki_count; absent when either side is zero.
    pub ratio: Option<f64>,
    pub is_balanced: bool,
    pub note: String,
}

/// The full cross-deck report.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize, JsonSchema)]
#[serde(crate = "rocket::serde")]
pub struct IntegratedAnalysis {
    pub color_balance: Vec<ColorBalance>,
    pub balance_score: u32,
    pub recommendations: Vec<String>,
    pub risk_factors: Vec<String>,
}

/// Points for a deck-size component: full credit inside [low, high],
/// proportional credit below, scaled-down credit above. Totals are `u64`
/// because imported decks can carry arbitrary copy counts.
fn size_points(total: u64, low: u32, high: u32, max_points: u32) -> u32 {
    if (u64::from(low)..=u64::from(high)).contains(&total) {
        max_points
    } else if total < u64::from(low) {
        // total < low <= 50, so this fits comfortably in u32.
        total as u32 * max_points / high
    } else {
        (u64::from(high) * u64::from(max_points) / total) as u32
    }
}

/// Analyze how well the reiki allocation supports the main deck.
pub fn analyze_deck_synergy(
    cards: &BTreeMap<String, u32>,
    catalog: &Catalog,
    reiki: &ReikiDeck,
) -> IntegratedAnalysis {
    let main_distribution = chromatic_distribution(cards, catalog);
    let chromatic_total: u64 = main_distribution.values().sum();
    let main_total: u64 = cards.values().map(|&count| u64::from(count)).sum();
    let reiki_total = reiki.total();

    let mut color_balance = Vec::new();
    let mut recommendations = Vec::new();
    let mut risk_factors = Vec::new();

    let mut balanced_colors = 0u32;
    let mut unbalanced_colors = 0u32;
    let mut dual_active_colors = 0u32;
    let mut wasted_colors = 0u32;
    let mut heavy_unsupported_colors = 0u32;

    for color in CardColor::chromatic() {
        let main_count = main_distribution.get(&color).copied().unwrap_or(0);
        let reiki_count = reiki.get(color);
        if main_count == 0 && reiki_count == 0 {
            continue;
        }

        let ratio = (main_count > 0 && reiki_count > 0)
            .then(|| main_count as f64 / f64::from(reiki_count));
        let is_balanced = ratio
            .map(|r| (BALANCED_RATIO_MIN..=BALANCED_RATIO_MAX).contains(&r))
            .unwrap_or(false);

        if main_count > 0 && reiki_count > 0 {
            dual_active_colors += 1;
        }

        let note = match ratio {
            Some(_) if is_balanced => {
                balanced_colors += 1;
                format!(
                    "Balanced: {} cards supported by {} reiki",
                    main_count, reiki_count
                )
            }
            Some(r) if r < BALANCED_RATIO_MIN => {
                unbalanced_colors += 1;
                format!("Reiki overallocated: ratio {:.2} is below 3.0", r)
            }
            Some(r) => {
                unbalanced_colors += 1;
                format!("Reiki underallocated: ratio {:.2} is above 5.0", r)
            }
            None if main_count > 0 => {
                unbalanced_colors += 1;
                format!("Consider adding {} reiki", color.name())
            }
            None => {
                unbalanced_colors += 1;
                wasted_colors += 1;
                format!(
                    "Reiki wasted: no {} cards in the main deck",
                    color.name()
                )
            }
        };

        if main_count > HEAVY_UNSUPPORTED_FLOOR && reiki_count == 0 {
            heavy_unsupported_colors += 1;
        }

        // Recommendations per color.
        if main_count > 0 && reiki_count == 0 && chromatic_total > 0 {
            let share = main_count as f64 / chromatic_total as f64;
            if share >= DOMINANT_SHARE {
                recommendations.push(format!(
                    "Add {} reiki: {} main deck cards have no resource support",
                    color.name(),
                    main_count
                ));
            }
        } else if main_count == 0 && reiki_count > 0 {
            recommendations.push(format!(
                "Remove {} {} reiki: no matching main deck cards",
                reiki_count,
                color.name()
            ));
        } else if ratio.is_some() && !is_balanced {
            // Aim for the middle of the balanced band.
            let target = ((main_count as f64 / 4.0).round() as u32)
                .clamp(1, REIKI_DECK_TARGET);
            recommendations.push(format!(
                "Adjust {} reiki from {} to {} to bring the ratio into the 3-5 band",
                color.name(),
                reiki_count,
                target
            ));
        }

        color_balance.push(ColorBalance {
            color,
            main_count,
            reiki_count,
            ratio,
            is_balanced,
            note,
        });
    }

    let mut score = i64::from(size_points(main_total, 45, MAIN_DECK_TARGET, 15));
    score += i64::from(size_points(
        u64::from(reiki_total),
        10,
        REIKI_DECK_TARGET,
        15,
    ));
    if dual_active_colors >= 2 {
        score += 25;
    }
    score += i64::from((8 * balanced_colors).min(25));
    score -= i64::from((8 * wasted_colors + 5 * heavy_unsupported_colors).min(20));
    let balance_score = score.clamp(0, 100) as u32;

    if main_total < u64::from(MAIN_DECK_TARGET) {
        risk_factors.push(format!(
            "Main deck is {} cards short of {}",
            u64::from(MAIN_DECK_TARGET) - main_total,
            MAIN_DECK_TARGET
        ));
    }
    if reiki_total < REIKI_DECK_TARGET {
        risk_factors.push(format!(
            "Reiki deck is {} cards short of {}",
            REIKI_DECK_TARGET - reiki_total,
            REIKI_DECK_TARGET
        ));
    }
    if unbalanced_colors >= 2 {
        risk_factors.push(
            "Two or more colors are out of balance between main deck and reiki".to_string(),
        );
    }
    if main_distribution.values().filter(|&&count| count > 0).count() == 1 {
        risk_factors.push(
            "Mono-color main deck: a single reiki color must carry every cost".to_string(),
        );
    }

    IntegratedAnalysis {
        color_balance,
        balance_score,
        recommendations,
        risk_factors,
    }
}
