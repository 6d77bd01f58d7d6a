use rocket::response::status::NotFound;
use rocket::serde::json::Json;
use rocket::serde::{Deserialize, Serialize};
use rocket::State;
use rocket_okapi::{openapi, JsonSchema};

use crate::builder_state::BuilderState;
use crate::main_deck::MainDeck;
use crate::status_messages::{new_status, Status};

/// Snapshot of the working main deck.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(crate = "rocket::serde")]
pub struct MainDeckResponse {
    pub deck: MainDeck,
    pub total_cards: u64,
}

/// Result of a mutating call: whether the mutation was applied (limits
/// reject silently, so a refused mutation is still a 200) and the deck
/// afterwards.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(crate = "rocket::serde")]
pub struct MainDeckMutationResponse {
    pub applied: bool,
    pub deck: MainDeck,
    pub total_cards: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(crate = "rocket::serde")]
pub struct RenameRequest {
    pub name: String,
}

fn snapshot(deck: &MainDeck) -> MainDeckResponse {
    MainDeckResponse {
        total_cards: deck.total_count(),
        deck: deck.clone(),
    }
}

fn mutation(applied: bool, deck: &MainDeck) -> Json<MainDeckMutationResponse> {
    Json(MainDeckMutationResponse {
        applied,
        total_cards: deck.total_count(),
        deck: deck.clone(),
    })
}

/// Get the working main deck.
#[openapi]
#[get("/deck/main")]
pub async fn get_main_deck(state: &State<BuilderState>) -> Json<MainDeckResponse> {
    let deck = state.main_deck.lock().await;
    Json(snapshot(&deck))
}

/// Add one copy of a card to the main deck. 404 when the card id is not in
/// the catalog; `applied: false` when a limit rejected the add.
#[openapi]
#[post("/deck/main/cards/<card_id>")]
pub async fn add_main_deck_card(
    state: &State<BuilderState>,
    card_id: &str,
) -> Result<Json<MainDeckMutationResponse>, NotFound<Json<Status>>> {
    if !state.catalog.contains(card_id) {
        return Err(NotFound(new_status(format!(
            "Card '{}' does not exist in the catalog",
            card_id
        ))));
    }
    let mut deck = state.main_deck.lock().await;
    let applied = deck.add_card(card_id);
    Ok(mutation(applied, &deck))
}

/// Remove one copy of a card. `applied: false` when the card is not in the
/// deck.
#[openapi]
#[delete("/deck/main/cards/<card_id>")]
pub async fn remove_main_deck_card(
    state: &State<BuilderState>,
    card_id: &str,
) -> Json<MainDeckMutationResponse> {
    let mut deck = state.main_deck.lock().await;
    let applied = deck.remove_card(card_id);
    mutation(applied, &deck)
}

/// Set the absolute copy-count of a card. Counts above 4, or that would
/// push the deck past 50, are rejected with `applied: false`.
#[openapi]
#[put("/deck/main/cards/<card_id>?<count>")]
pub async fn set_main_deck_card_count(
    state: &State<BuilderState>,
    card_id: &str,
    count: u32,
) -> Result<Json<MainDeckMutationResponse>, NotFound<Json<Status>>> {
    if !state.catalog.contains(card_id) {
        return Err(NotFound(new_status(format!(
            "Card '{}' does not exist in the catalog",
            card_id
        ))));
    }
    let mut deck = state.main_deck.lock().await;
    let applied = deck.set_count(card_id, count);
    Ok(mutation(applied, &deck))
}

/// Empty the main deck and reset its name.
#[openapi]
#[post("/deck/main/clear")]
pub async fn clear_main_deck(state: &State<BuilderState>) -> Json<MainDeckResponse> {
    let mut deck = state.main_deck.lock().await;
    deck.clear();
    Json(snapshot(&deck))
}

/// Rename the working deck. An empty name is accepted here; presentation
/// layers fall back to a default label on their own.
#[openapi]
#[put("/deck/main/name", format = "json", data = "<request>")]
pub async fn rename_main_deck(
    state: &State<BuilderState>,
    request: Json<RenameRequest>,
) -> Json<MainDeckResponse> {
    let mut deck = state.main_deck.lock().await;
    deck.set_name(request.0.name);
    Json(snapshot(&deck))
}
