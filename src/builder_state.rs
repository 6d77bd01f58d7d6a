use std::sync::Arc;

use rocket::futures::lock::Mutex;

use crate::catalog::Catalog;
use crate::main_deck::MainDeck;
use crate::persistence::DeckStore;
use crate::reiki_deck::ReikiDeck;

/// Managed application state: the immutable catalog, the two working deck
/// stores, and the persistence adapter. Deck stores are wrapped in async
/// mutexes so concurrent HTTP requests serialize their mutations.
pub struct BuilderState {
    pub catalog: Arc<Catalog>,
    pub main_deck: Arc<Mutex<MainDeck>>,
    pub reiki_deck: Arc<Mutex<ReikiDeck>>,
    pub deck_store: Arc<DeckStore>,
}

pub fn new(catalog: Catalog, deck_store: DeckStore) -> BuilderState {
    BuilderState {
        catalog: Arc::new(catalog),
        main_deck: Arc::new(Mutex::new(MainDeck::new())),
        reiki_deck: Arc::new(Mutex::new(ReikiDeck::new())),
        deck_store: Arc::new(deck_store),
    }
}
