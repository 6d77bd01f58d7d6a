//! Read-only analysis endpoints over the working decks.

use rocket::serde::json::Json;
use rocket::State;
use rocket_okapi::openapi;

use crate::analysis::{
    analyze_deck_synergy, calculate_suggested_reiki, calculate_support_distribution,
    chromatic_distribution, validate, IntegratedAnalysis, ReikiSuggestion, SupportDistribution,
    ValidationResult,
};
use crate::builder_state::BuilderState;

/// Validate the working main deck against the catalog.
#[openapi]
#[get("/analysis/validation")]
pub async fn get_validation(state: &State<BuilderState>) -> Json<ValidationResult> {
    let deck = state.main_deck.lock().await;
    Json(validate(&deck.cards, &state.catalog))
}

/// Compute the recommended reiki split for the working main deck without
/// applying it.
#[openapi]
#[get("/analysis/reiki-suggestion")]
pub async fn get_reiki_suggestion(state: &State<BuilderState>) -> Json<ReikiSuggestion> {
    let deck = state.main_deck.lock().await;
    let distribution = chromatic_distribution(&deck.cards, &state.catalog);
    Json(calculate_suggested_reiki(&distribution))
}

/// Cross-deck balance report for the working main and reiki decks.
#[openapi]
#[get("/analysis/integrated")]
pub async fn get_integrated_analysis(state: &State<BuilderState>) -> Json<IntegratedAnalysis> {
    let main_deck = state.main_deck.lock().await;
    let reiki_deck = state.reiki_deck.lock().await;
    Json(analyze_deck_synergy(
        &main_deck.cards,
        &state.catalog,
        &reiki_deck,
    ))
}

/// Support-value distribution of the working main deck.
#[openapi]
#[get("/analysis/support")]
pub async fn get_support_distribution(state: &State<BuilderState>) -> Json<SupportDistribution> {
    let deck = state.main_deck.lock().await;
    Json(calculate_support_distribution(&deck.cards, &state.catalog))
}
