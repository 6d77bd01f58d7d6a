use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

use reiki_deck_studio::catalog::CardColor;
use reiki_deck_studio::persistence::{zero_reiki, DeckStore, SavedDeck, CURRENT_FORMAT_VERSION};
use reiki_deck_studio::reiki_deck::ReikiEntry;

fn temp_store_dir(label: &str) -> PathBuf {
    std::env::temp_dir().join(format!(
        "reiki_deck_studio_{}_{}",
        label,
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ))
}

fn sample_deck(id: &str, updated_at: u64) -> SavedDeck {
    SavedDeck {
        id: id.to_string(),
        name: "Aggro Red".to_string(),
        main_cards: [("R-001".to_string(), 4), ("R-002".to_string(), 3)]
            .into_iter()
            .collect(),
        reiki_cards: vec![ReikiEntry {
            color: CardColor::Red,
            count: 15,
        }],
        created_at: 100,
        updated_at,
        format_version: CURRENT_FORMAT_VERSION,
    }
}

#[test]
fn test_save_and_load_round_trip() {
    let store = DeckStore::new(temp_store_dir("round_trip"));
    let mut deck = sample_deck("aggro-red", 200);
    let id = store.save(&mut deck).expect("save");
    assert_eq!(id, "aggro-red");

    let loaded = store.load("aggro-red").expect("load").expect("present");
    assert_eq!(loaded, deck);
}

#[test]
fn test_save_assigns_an_id_when_missing() {
    let store = DeckStore::new(temp_store_dir("assigns_id"));
    let mut deck = sample_deck("", 200);
    let first = store.save(&mut deck).expect("save");
    assert!(first.starts_with("deck-"));
    assert_eq!(deck.id, first);

    let mut other = sample_deck("", 300);
    let second = store.save(&mut other).expect("save");
    assert_ne!(first, second);
}

#[test]
fn test_save_rejects_ids_unfit_for_file_names() {
    let store = DeckStore::new(temp_store_dir("bad_id"));
    let mut deck = sample_deck("../escape", 200);
    assert!(store.save(&mut deck).is_err());
}

#[test]
fn test_load_of_unknown_id_is_none() {
    let store = DeckStore::new(temp_store_dir("unknown_id"));
    assert_eq!(store.load("nothing-here").expect("load"), None);
    // Ids that cannot be file names are unknown, not errors.
    assert_eq!(store.load("../escape").expect("load"), None);
}

#[test]
fn test_legacy_document_migrates_without_rewriting_the_file() {
    let dir = temp_store_dir("legacy");
    fs::create_dir_all(&dir).expect("create dir");
    let legacy_body = r#"{ "R-001": 4, "B-002": 2 }"#;
    fs::write(dir.join("old-deck.json"), legacy_body).expect("write legacy file");

    let store = DeckStore::new(dir.clone());
    let deck = store.load("old-deck").expect("load").expect("present");
    assert_eq!(deck.id, "old-deck");
    assert_eq!(deck.name, "Imported Deck");
    assert_eq!(deck.format_version, CURRENT_FORMAT_VERSION);
    assert_eq!(deck.main_cards.get("R-001").copied(), Some(4));
    assert_eq!(deck.reiki_cards, zero_reiki());

    // Migration is read-only: the stored bytes are untouched.
    let on_disk = fs::read_to_string(dir.join("old-deck.json")).expect("reread");
    assert_eq!(on_disk, legacy_body);
}

#[test]
fn test_corrupt_document_is_an_error_not_a_miss() {
    let dir = temp_store_dir("corrupt");
    fs::create_dir_all(&dir).expect("create dir");
    fs::write(dir.join("broken.json"), "not json at all").expect("write file");

    let store = DeckStore::new(dir);
    assert!(store.load("broken").is_err());
}

#[test]
fn test_delete_reports_whether_anything_was_removed() {
    let store = DeckStore::new(temp_store_dir("delete"));
    let mut deck = sample_deck("short-lived", 200);
    store.save(&mut deck).expect("save");

    assert!(store.delete("short-lived"));
    assert!(!store.delete("short-lived"));
    assert_eq!(store.load("short-lived").expect("load"), None);
}

#[test]
fn test_list_is_newest_first_and_skips_unreadable_entries() {
    let dir = temp_store_dir("list");
    let store = DeckStore::new(dir.clone());
    store.save(&mut sample_deck("oldest", 100)).expect("save");
    store.save(&mut sample_deck("newest", 300)).expect("save");
    store.save(&mut sample_deck("middle", 200)).expect("save");
    fs::write(dir.join("broken.json"), "{").expect("write corrupt file");

    let listed: Vec<String> = store.list().into_iter().map(|d| d.id).collect();
    assert_eq!(listed, vec!["newest", "middle", "oldest"]);
}

#[test]
fn test_overwrite_replaces_the_stored_document() {
    let store = DeckStore::new(temp_store_dir("overwrite"));
    let mut deck = sample_deck("evolving", 200);
    store.save(&mut deck).expect("save");

    deck.main_cards = BTreeMap::from([("B-001".to_string(), 4)]);
    deck.updated_at = 500;
    store.save(&mut deck).expect("second save");

    let loaded = store.load("evolving").expect("load").expect("present");
    assert_eq!(loaded.main_cards.get("B-001").copied(), Some(4));
    assert!(!loaded.main_cards.contains_key("R-001"));
    assert_eq!(store.list().len(), 1);
}
