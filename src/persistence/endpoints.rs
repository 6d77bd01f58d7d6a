use either::{Either, Left, Right};
use rocket::response::status::{BadRequest, NotFound};
use rocket::serde::json::Json;
use rocket::serde::{Deserialize, Serialize};
use rocket::State;
use rocket_okapi::{openapi, JsonSchema};

use crate::builder_state::BuilderState;
use crate::persistence::{migrate_stored_deck, now_millis, SavedDeck, CURRENT_FORMAT_VERSION};
use crate::reiki_deck::ReikiDeck;
use crate::status_messages::{new_status, Status};

/// Response wrapper for deck listings.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(crate = "rocket::serde")]
pub struct DeckListResponse {
    pub decks: Vec<SavedDeck>,
    pub total: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(crate = "rocket::serde")]
pub struct SaveDeckRequest {
    /// Overwrite this stored deck; a fresh id is assigned when absent.
    pub id: Option<String>,
}

/// Save the working main and reiki decks as one stored document.
#[openapi]
#[post("/decks", format = "json", data = "<request>")]
pub async fn save_deck(
    state: &State<BuilderState>,
    request: Json<SaveDeckRequest>,
) -> Result<Json<SavedDeck>, BadRequest<Json<Status>>> {
    let (main_cards, name, updated_at) = {
        let main_deck = state.main_deck.lock().await;
        (
            main_deck.cards.clone(),
            main_deck.name.clone(),
            main_deck.updated_at,
        )
    };
    let reiki_cards = {
        let reiki_deck = state.reiki_deck.lock().await;
        reiki_deck.entries()
    };

    let mut deck = SavedDeck {
        id: request.0.id.unwrap_or_default(),
        name,
        main_cards,
        reiki_cards,
        created_at: now_millis(),
        updated_at,
        format_version: CURRENT_FORMAT_VERSION,
    };
    // Overwrites keep the original creation time when the prior document is
    // readable.
    if !deck.id.is_empty() {
        if let Ok(Some(existing)) = state.deck_store.load(&deck.id) {
            deck.created_at = existing.created_at;
        }
    }
    match state.deck_store.save(&mut deck) {
        Ok(_) => Ok(Json(deck)),
        Err(e) => Err(BadRequest(new_status(format!("Failed to save deck: {e}")))),
    }
}

/// List all stored decks, newest first.
#[openapi]
#[get("/decks")]
pub async fn list_decks(state: &State<BuilderState>) -> Json<DeckListResponse> {
    let decks = state.deck_store.list();
    let total = decks.len();
    Json(DeckListResponse { decks, total })
}

/// Get a stored deck without touching the working decks.
#[openapi]
#[get("/decks/<deck_id>")]
pub async fn get_deck(
    state: &State<BuilderState>,
    deck_id: &str,
) -> Result<Json<SavedDeck>, Either<NotFound<Json<Status>>, BadRequest<Json<Status>>>> {
    match state.deck_store.load(deck_id) {
        Ok(Some(deck)) => Ok(Json(deck)),
        Ok(None) => Err(Left(NotFound(new_status(format!(
            "Deck '{}' not found",
            deck_id
        ))))),
        Err(e) => Err(Right(BadRequest(new_status(e)))),
    }
}

/// Load a stored deck into the working stores. The document is read and
/// migrated completely before either store is touched, so a failed load
/// leaves the working state unchanged.
#[openapi]
#[post("/decks/<deck_id>/load")]
pub async fn load_deck(
    state: &State<BuilderState>,
    deck_id: &str,
) -> Result<Json<SavedDeck>, Either<NotFound<Json<Status>>, BadRequest<Json<Status>>>> {
    let deck = match state.deck_store.load(deck_id) {
        Ok(Some(deck)) => deck,
        Ok(None) => {
            return Err(Left(NotFound(new_status(format!(
                "Deck '{}' not found",
                deck_id
            )))))
        }
        Err(e) => return Err(Right(BadRequest(new_status(e)))),
    };

    apply_to_working_state(state, &deck).await;
    Ok(Json(deck))
}

/// Delete a stored deck.
#[openapi]
#[delete("/decks/<deck_id>")]
pub async fn delete_deck(
    state: &State<BuilderState>,
    deck_id: &str,
) -> Result<Json<Status>, NotFound<Json<Status>>> {
    if state.deck_store.delete(deck_id) {
        Ok(new_status(format!("Deck '{}' deleted", deck_id)))
    } else {
        Err(NotFound(new_status(format!(
            "Deck '{}' not found",
            deck_id
        ))))
    }
}

/// Import a deck document (current or legacy format) into the working
/// stores without persisting it. Malformed documents are rejected before
/// any store mutation, so imports are all-or-nothing.
#[openapi]
#[post("/decks/import", format = "json", data = "<document>")]
pub async fn import_deck(
    state: &State<BuilderState>,
    document: Json<serde_json::Value>,
) -> Result<Json<SavedDeck>, BadRequest<Json<Status>>> {
    let deck = migrate_stored_deck(&document.0, "")
        .map_err(|e| BadRequest(new_status(format!("Import rejected: {e}"))))?;
    apply_to_working_state(state, &deck).await;
    Ok(Json(deck))
}

async fn apply_to_working_state(state: &State<BuilderState>, deck: &SavedDeck) {
    {
        let mut main_deck = state.main_deck.lock().await;
        main_deck.replace(deck.main_cards.clone(), deck.name.clone());
    }
    let mut reiki_deck = state.reiki_deck.lock().await;
    *reiki_deck = ReikiDeck::from_entries(&deck.reiki_cards);
}
