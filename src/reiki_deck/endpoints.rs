use rocket::response::status::NotFound;
use rocket::serde::json::Json;
use rocket::serde::{Deserialize, Serialize};
use rocket::State;
use rocket_okapi::{openapi, JsonSchema};

use crate::analysis::{calculate_suggested_reiki, chromatic_distribution, ReikiSuggestion};
use crate::builder_state::BuilderState;
use crate::catalog::CardColor;
use crate::reiki_deck::{ReikiDeck, ReikiEntry};
use crate::status_messages::{new_status, Status};

/// Snapshot of the reiki allocation.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(crate = "rocket::serde")]
pub struct ReikiDeckResponse {
    pub entries: Vec<ReikiEntry>,
    pub total: u32,
    pub is_valid: bool,
}

/// Result of an increment/decrement: whether the step was applied and the
/// allocation afterwards.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(crate = "rocket::serde")]
pub struct ReikiMutationResponse {
    pub applied: bool,
    pub entries: Vec<ReikiEntry>,
    pub total: u32,
    pub is_valid: bool,
}

/// Result of applying the suggestion engine to the working decks.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(crate = "rocket::serde")]
pub struct ApplySuggestionResponse {
    pub suggestion: ReikiSuggestion,
    pub entries: Vec<ReikiEntry>,
    pub total: u32,
    pub is_valid: bool,
}

fn snapshot(deck: &ReikiDeck) -> ReikiDeckResponse {
    ReikiDeckResponse {
        entries: deck.entries(),
        total: deck.total(),
        is_valid: deck.is_valid(),
    }
}

/// Chromatic colors only: the reiki deck has no colorless slot.
fn parse_color(name: &str) -> Result<CardColor, NotFound<Json<Status>>> {
    match CardColor::from_name(name) {
        Some(color) if color.is_chromatic() => Ok(color),
        _ => Err(NotFound(new_status(format!(
            "'{}' is not a reiki color",
            name
        )))),
    }
}

/// Get the working reiki allocation.
#[openapi]
#[get("/deck/reiki")]
pub async fn get_reiki_deck(state: &State<BuilderState>) -> Json<ReikiDeckResponse> {
    let deck = state.reiki_deck.lock().await;
    Json(snapshot(&deck))
}

/// Set a color's count. Out-of-range values are clamped into [0, 15]
/// rather than rejected.
#[openapi]
#[put("/deck/reiki/<color>?<count>")]
pub async fn set_reiki_color(
    state: &State<BuilderState>,
    color: &str,
    count: u32,
) -> Result<Json<ReikiDeckResponse>, NotFound<Json<Status>>> {
    let color = parse_color(color)?;
    let mut deck = state.reiki_deck.lock().await;
    deck.set_color(color, count);
    Ok(Json(snapshot(&deck)))
}

/// Add one resource of a color. Refused (`applied: false`) at 15 total.
#[openapi]
#[post("/deck/reiki/<color>/increment")]
pub async fn increment_reiki_color(
    state: &State<BuilderState>,
    color: &str,
) -> Result<Json<ReikiMutationResponse>, NotFound<Json<Status>>> {
    let color = parse_color(color)?;
    let mut deck = state.reiki_deck.lock().await;
    let applied = deck.increment(color);
    Ok(Json(ReikiMutationResponse {
        applied,
        entries: deck.entries(),
        total: deck.total(),
        is_valid: deck.is_valid(),
    }))
}

/// Remove one resource of a color, stopping at zero.
#[openapi]
#[post("/deck/reiki/<color>/decrement")]
pub async fn decrement_reiki_color(
    state: &State<BuilderState>,
    color: &str,
) -> Result<Json<ReikiMutationResponse>, NotFound<Json<Status>>> {
    let color = parse_color(color)?;
    let mut deck = state.reiki_deck.lock().await;
    let applied = deck.decrement(color);
    Ok(Json(ReikiMutationResponse {
        applied,
        entries: deck.entries(),
        total: deck.total(),
        is_valid: deck.is_valid(),
    }))
}

/// Reset all colors to zero.
#[openapi]
#[post("/deck/reiki/clear")]
pub async fn clear_reiki_deck(state: &State<BuilderState>) -> Json<ReikiDeckResponse> {
    let mut deck = state.reiki_deck.lock().await;
    deck.clear();
    Json(snapshot(&deck))
}

/// Run the suggestion engine against the current main deck and replace the
/// reiki allocation with its output.
#[openapi]
#[post("/deck/reiki/apply-suggestion")]
pub async fn apply_reiki_suggestion(
    state: &State<BuilderState>,
) -> Json<ApplySuggestionResponse> {
    let distribution = {
        let main_deck = state.main_deck.lock().await;
        chromatic_distribution(&main_deck.cards, &state.catalog)
    };
    let suggestion = calculate_suggested_reiki(&distribution);
    let mut deck = state.reiki_deck.lock().await;
    deck.apply_suggestion(&suggestion.entries);
    Json(ApplySuggestionResponse {
        entries: deck.entries(),
        total: deck.total(),
        is_valid: deck.is_valid(),
        suggestion,
    })
}
