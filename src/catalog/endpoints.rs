use rocket::response::status::NotFound;
use rocket::serde::json::Json;
use rocket::serde::{Deserialize, Serialize};
use rocket::State;
use rocket_okapi::{openapi, JsonSchema};

use crate::builder_state::BuilderState;
use crate::catalog::{Card, CardColor, CardType};
use crate::status_messages::{new_status, Status};

/// Response wrapper for catalog listings.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(crate = "rocket::serde")]
pub struct CardListResponse {
    pub cards: Vec<Card>,
    pub total: usize,
}

/// List catalog cards, optionally narrowed by a substring query over name
/// and effect text and/or color and card-type filters. Unknown filter
/// values match nothing.
#[openapi]
#[get("/cards?<query>&<color>&<card_type>")]
pub async fn list_cards(
    state: &State<BuilderState>,
    query: Option<String>,
    color: Option<String>,
    card_type: Option<String>,
) -> Json<CardListResponse> {
    let catalog = &state.catalog;
    let matched = match &query {
        Some(q) => catalog.search(q),
        None => catalog.all(),
    };

    let color_filter = color.as_deref().map(CardColor::from_name);
    let type_filter = card_type.as_deref().map(CardType::from_name);

    let cards: Vec<Card> = matched
        .into_iter()
        .filter(|card| match color_filter {
            None => true,
            Some(Some(c)) => card.color == c,
            Some(None) => false,
        })
        .filter(|card| match type_filter {
            None => true,
            Some(Some(t)) => card.card_type == t,
            Some(None) => false,
        })
        .cloned()
        .collect();

    let total = cards.len();
    Json(CardListResponse { cards, total })
}

/// Get a single card by id.
#[openapi]
#[get("/cards/<card_id>")]
pub async fn get_card(
    state: &State<BuilderState>,
    card_id: &str,
) -> Result<Json<Card>, NotFound<Json<Status>>> {
    match state.catalog.get(card_id) {
        Some(card) => Ok(Json(card.clone())),
        None => Err(NotFound(new_status(format!(
            "Card '{}' does not exist in the catalog",
            card_id
        )))),
    }
}
