//! # Reiki Deck Studio
//!
//! A web API for building decks of a trading card game: a 50-card main deck
//! plus a 15-card reiki (color resource) deck.
//!
//! ## Overview
//!
//! Clients browse an immutable card catalog, edit the two working decks
//! through mutating endpoints, and read pure analysis over them: legality
//! validation, a reiki split suggestion, a cross-deck balance report, and
//! the support-value distribution. Decks persist as JSON documents through
//! a file-backed store with legacy-format migration on read.
//!
//! ## Architecture
//!
//! The API is built using the Rocket web framework with OpenAPI
//! documentation support. Working state is managed through `Arc<Mutex<T>>`
//! wrappers so concurrent HTTP requests serialize their mutations; all
//! analysis is pure functions over snapshots of that state.

#[macro_use]
extern crate rocket;

use std::path::PathBuf;

use rocket_okapi::openapi_get_routes;
use rocket_okapi::swagger_ui::{make_swagger_ui, SwaggerUIConfig};

pub mod analysis;
pub mod builder_state;
pub mod catalog;
pub mod main_deck;
pub mod persistence;
pub mod reiki_deck;
pub mod status_messages;

use crate::catalog::Catalog;
use crate::persistence::DeckStore;

/// Environment variable naming the deck-document directory.
pub const DATA_DIR_ENV: &str = "DECK_STUDIO_DATA_DIR";

/// Initializes the Rocket server with the built-in catalog and the default
/// data directory (`$DECK_STUDIO_DATA_DIR`, falling back to `deck_data`).
///
/// # Example
///
/// ```no_run
/// use reiki_deck_studio::rocket_initialize;
///
/// #[rocket::main]
/// async fn main() {
///     rocket_initialize().launch().await.expect("Failed to launch rocket");
/// }
/// ```
pub fn rocket_initialize() -> rocket::Rocket<rocket::Build> {
    let data_dir = std::env::var(DATA_DIR_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("deck_data"));
    rocket_initialize_with(Catalog::with_canonical(), data_dir)
}

/// Initializes the Rocket server with an explicit catalog and data
/// directory. Used directly by tests to isolate persistence.
pub fn rocket_initialize_with(
    catalog: Catalog,
    data_dir: PathBuf,
) -> rocket::Rocket<rocket::Build> {
    use crate::analysis::endpoints::{
        get_integrated_analysis, get_reiki_suggestion, get_support_distribution, get_validation,
        okapi_add_operation_for_get_integrated_analysis_,
        okapi_add_operation_for_get_reiki_suggestion_,
        okapi_add_operation_for_get_support_distribution_,
        okapi_add_operation_for_get_validation_,
    };
    use crate::catalog::endpoints::{
        get_card, list_cards, okapi_add_operation_for_get_card_,
        okapi_add_operation_for_list_cards_,
    };
    use crate::main_deck::endpoints::{
        add_main_deck_card, clear_main_deck, get_main_deck,
        okapi_add_operation_for_add_main_deck_card_, okapi_add_operation_for_clear_main_deck_,
        okapi_add_operation_for_get_main_deck_, okapi_add_operation_for_remove_main_deck_card_,
        okapi_add_operation_for_rename_main_deck_,
        okapi_add_operation_for_set_main_deck_card_count_, remove_main_deck_card,
        rename_main_deck, set_main_deck_card_count,
    };
    use crate::persistence::endpoints::{
        delete_deck, get_deck, import_deck, list_decks, load_deck,
        okapi_add_operation_for_delete_deck_, okapi_add_operation_for_get_deck_,
        okapi_add_operation_for_import_deck_, okapi_add_operation_for_list_decks_,
        okapi_add_operation_for_load_deck_, okapi_add_operation_for_save_deck_, save_deck,
    };
    use crate::reiki_deck::endpoints::{
        apply_reiki_suggestion, clear_reiki_deck, decrement_reiki_color, get_reiki_deck,
        increment_reiki_color, okapi_add_operation_for_apply_reiki_suggestion_,
        okapi_add_operation_for_clear_reiki_deck_, okapi_add_operation_for_decrement_reiki_color_,
        okapi_add_operation_for_get_reiki_deck_, okapi_add_operation_for_increment_reiki_color_,
        okapi_add_operation_for_set_reiki_color_, set_reiki_color,
    };

    #[allow(clippy::no_effect_underscore_binding)]
    let _ = env_logger::try_init();

    rocket::build()
        .mount(
            "/",
            openapi_get_routes![
                list_cards,
                get_card,
                get_main_deck,
                add_main_deck_card,
                remove_main_deck_card,
                set_main_deck_card_count,
                clear_main_deck,
                rename_main_deck,
                get_reiki_deck,
                set_reiki_color,
                increment_reiki_color,
                decrement_reiki_color,
                clear_reiki_deck,
                apply_reiki_suggestion,
                get_validation,
                get_reiki_suggestion,
                get_integrated_analysis,
                get_support_distribution,
                save_deck,
                list_decks,
                get_deck,
                load_deck,
                delete_deck,
                import_deck,
            ],
        )
        .mount("/swagger", make_swagger_ui(&get_docs()))
        .manage(builder_state::new(catalog, DeckStore::new(data_dir)))
}

fn get_docs() -> SwaggerUIConfig {
    SwaggerUIConfig {
        url: "/openapi.json".to_string(),
        ..Default::default()
    }
}
