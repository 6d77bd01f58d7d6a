use rocket::http::{ContentType, Status};
use rocket::local::blocking::Client;
use serde_json::Value;

use reiki_deck_studio::catalog::Catalog;
use reiki_deck_studio::rocket_initialize_with;

fn test_client() -> Client {
    let dir = std::env::temp_dir().join(format!(
        "reiki_deck_studio_api_test_{}",
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ));
    Client::tracked(rocket_initialize_with(Catalog::with_canonical(), dir))
        .expect("valid rocket instance")
}

#[test]
fn test_list_and_search_cards() {
    let client = test_client();

    let response = client.get("/cards").dispatch();
    assert_eq!(response.status(), Status::Ok);
    let body: Value = response.into_json().expect("json body");
    assert_eq!(body["total"].as_u64(), Some(24));

    let response = client.get("/cards?query=leviathan").dispatch();
    let body: Value = response.into_json().expect("json body");
    assert_eq!(body["total"].as_u64(), Some(1));
    assert_eq!(body["cards"][0]["id"].as_str(), Some("B-003"));

    let response = client.get("/cards?color=red").dispatch();
    let body: Value = response.into_json().expect("json body");
    assert!(body["total"].as_u64().unwrap() >= 5);
    for card in body["cards"].as_array().unwrap() {
        assert_eq!(card["color"].as_str(), Some("red"));
    }

    // Unknown filter values match nothing rather than erroring.
    let response = client.get("/cards?color=octarine").dispatch();
    let body: Value = response.into_json().expect("json body");
    assert_eq!(body["total"].as_u64(), Some(0));
}

#[test]
fn test_get_nonexistent_card() {
    let client = test_client();
    let response = client.get("/cards/Z-999").dispatch();
    assert_eq!(response.status(), Status::NotFound);
}

#[test]
fn test_add_card_caps_at_four_copies() {
    let client = test_client();

    for i in 0..4 {
        let response = client.post("/deck/main/cards/R-001").dispatch();
        assert_eq!(response.status(), Status::Ok);
        let body: Value = response.into_json().expect("json body");
        assert_eq!(body["applied"].as_bool(), Some(true), "copy {}", i + 1);
    }

    let response = client.post("/deck/main/cards/R-001").dispatch();
    let body: Value = response.into_json().expect("json body");
    assert_eq!(body["applied"].as_bool(), Some(false));
    assert_eq!(body["deck"]["cards"]["R-001"].as_u64(), Some(4));
    assert_eq!(body["total_cards"].as_u64(), Some(4));
}

#[test]
fn test_add_unknown_card_is_not_found() {
    let client = test_client();
    let response = client.post("/deck/main/cards/NOPE-1").dispatch();
    assert_eq!(response.status(), Status::NotFound);
}

#[test]
fn test_set_count_remove_and_clear() {
    let client = test_client();

    let response = client.put("/deck/main/cards/B-001?count=3").dispatch();
    let body: Value = response.into_json().expect("json body");
    assert_eq!(body["applied"].as_bool(), Some(true));
    assert_eq!(body["deck"]["cards"]["B-001"].as_u64(), Some(3));

    // Five copies is over the limit: silently rejected, prior value kept.
    let response = client.put("/deck/main/cards/B-001?count=5").dispatch();
    let body: Value = response.into_json().expect("json body");
    assert_eq!(body["applied"].as_bool(), Some(false));
    assert_eq!(body["deck"]["cards"]["B-001"].as_u64(), Some(3));

    let response = client.delete("/deck/main/cards/B-001").dispatch();
    let body: Value = response.into_json().expect("json body");
    assert_eq!(body["applied"].as_bool(), Some(true));
    assert_eq!(body["deck"]["cards"]["B-001"].as_u64(), Some(2));

    let response = client.post("/deck/main/clear").dispatch();
    let body: Value = response.into_json().expect("json body");
    assert_eq!(body["total_cards"].as_u64(), Some(0));
    assert_eq!(body["deck"]["name"].as_str(), Some("New Deck"));
}

#[test]
fn test_rename_deck() {
    let client = test_client();
    let response = client
        .put("/deck/main/name")
        .header(ContentType::JSON)
        .body(r#"{ "name": "Aggro Red" }"#)
        .dispatch();
    let body: Value = response.into_json().expect("json body");
    assert_eq!(body["deck"]["name"].as_str(), Some("Aggro Red"));
}

#[test]
fn test_reiki_set_clamps_and_increment_respects_total() {
    let client = test_client();

    // Out-of-range set is clamped, not rejected.
    let response = client.put("/deck/reiki/red?count=40").dispatch();
    let body: Value = response.into_json().expect("json body");
    let red = body["entries"]
        .as_array()
        .unwrap()
        .iter()
        .find(|e| e["color"] == "red")
        .unwrap()["count"]
        .as_u64();
    assert_eq!(red, Some(15));
    assert_eq!(body["is_valid"].as_bool(), Some(true));

    // Total is already 15: increments of another color are refused.
    let response = client.post("/deck/reiki/blue/increment").dispatch();
    let body: Value = response.into_json().expect("json body");
    assert_eq!(body["applied"].as_bool(), Some(false));
    assert_eq!(body["total"].as_u64(), Some(15));

    let response = client.post("/deck/reiki/red/decrement").dispatch();
    let body: Value = response.into_json().expect("json body");
    assert_eq!(body["applied"].as_bool(), Some(true));
    assert_eq!(body["total"].as_u64(), Some(14));

    let response = client.post("/deck/reiki/colorless/increment").dispatch();
    assert_eq!(response.status(), Status::NotFound);
    let response = client.post("/deck/reiki/octarine/increment").dispatch();
    assert_eq!(response.status(), Status::NotFound);
}

#[test]
fn test_validation_of_empty_deck() {
    let client = test_client();
    let response = client.get("/analysis/validation").dispatch();
    assert_eq!(response.status(), Status::Ok);
    let body: Value = response.into_json().expect("json body");
    assert_eq!(body["is_valid"].as_bool(), Some(false));
    assert_eq!(body["total_cards"].as_u64(), Some(0));
    let errors = body["errors"].as_array().unwrap();
    assert!(errors[0].as_str().unwrap().contains("needs 50 more"));
}

#[test]
fn test_apply_suggestion_for_mono_color_deck() {
    let client = test_client();
    for _ in 0..4 {
        client.post("/deck/main/cards/R-001").dispatch();
    }

    let response = client.post("/deck/reiki/apply-suggestion").dispatch();
    let body: Value = response.into_json().expect("json body");
    assert!((body["suggestion"]["confidence"].as_f64().unwrap() - 0.9).abs() < 1e-9);
    assert!(body["suggestion"]["reasoning"]
        .as_str()
        .unwrap()
        .contains("Mono-red"));
    assert_eq!(body["total"].as_u64(), Some(15));
    let red = body["entries"]
        .as_array()
        .unwrap()
        .iter()
        .find(|e| e["color"] == "red")
        .unwrap()["count"]
        .as_u64();
    assert_eq!(red, Some(15));
}

#[test]
fn test_save_load_delete_deck_flow() {
    let client = test_client();

    client.put("/deck/main/cards/G-001?count=4").dispatch();
    client.put("/deck/main/cards/G-002?count=2").dispatch();
    client.put("/deck/reiki/green?count=2").dispatch();
    client
        .put("/deck/main/name")
        .header(ContentType::JSON)
        .body(r#"{ "name": "Green Ramp" }"#)
        .dispatch();

    let response = client
        .post("/decks")
        .header(ContentType::JSON)
        .body("{}")
        .dispatch();
    assert_eq!(response.status(), Status::Ok);
    let saved: Value = response.into_json().expect("json body");
    let deck_id = saved["id"].as_str().expect("assigned id").to_string();
    assert_eq!(saved["name"].as_str(), Some("Green Ramp"));
    assert_eq!(saved["format_version"].as_u64(), Some(2));

    let response = client.get("/decks").dispatch();
    let listing: Value = response.into_json().expect("json body");
    assert_eq!(listing["total"].as_u64(), Some(1));

    // Wipe the working state, then load the stored deck back.
    client.post("/deck/main/clear").dispatch();
    client.post("/deck/reiki/clear").dispatch();
    let response = client.post(format!("/decks/{deck_id}/load")).dispatch();
    assert_eq!(response.status(), Status::Ok);

    let response = client.get("/deck/main").dispatch();
    let body: Value = response.into_json().expect("json body");
    assert_eq!(body["deck"]["cards"]["G-001"].as_u64(), Some(4));
    assert_eq!(body["deck"]["name"].as_str(), Some("Green Ramp"));
    let response = client.get("/deck/reiki").dispatch();
    let body: Value = response.into_json().expect("json body");
    assert_eq!(body["total"].as_u64(), Some(2));

    let response = client.delete(format!("/decks/{deck_id}")).dispatch();
    assert_eq!(response.status(), Status::Ok);
    let response = client.delete(format!("/decks/{deck_id}")).dispatch();
    assert_eq!(response.status(), Status::NotFound);
    let response = client.get(format!("/decks/{deck_id}")).dispatch();
    assert_eq!(response.status(), Status::NotFound);
}

#[test]
fn test_import_legacy_document() {
    let client = test_client();

    let response = client
        .post("/decks/import")
        .header(ContentType::JSON)
        .body(r#"{ "R-001": 4, "B-001": 2 }"#)
        .dispatch();
    assert_eq!(response.status(), Status::Ok);
    let imported: Value = response.into_json().expect("json body");
    assert_eq!(imported["format_version"].as_u64(), Some(2));

    let response = client.get("/deck/main").dispatch();
    let body: Value = response.into_json().expect("json body");
    assert_eq!(body["deck"]["cards"]["R-001"].as_u64(), Some(4));
    assert_eq!(body["total_cards"].as_u64(), Some(6));
}

#[test]
fn test_import_with_extreme_counts_survives_analysis() {
    let client = test_client();

    let response = client
        .post("/decks/import")
        .header(ContentType::JSON)
        .body(r#"{ "R-001": 4294967295, "B-001": 4294967295 }"#)
        .dispatch();
    assert_eq!(response.status(), Status::Ok);

    // Every analysis endpoint must stay total over the imported state.
    let response = client.get("/analysis/validation").dispatch();
    assert_eq!(response.status(), Status::Ok);
    let body: Value = response.into_json().expect("json body");
    assert!(!body["is_valid"].as_bool().unwrap());
    assert_eq!(body["total_cards"].as_u64(), Some(8_589_934_590));

    let response = client.get("/analysis/reiki-suggestion").dispatch();
    let body: Value = response.into_json().expect("json body");
    let total: u64 = body["entries"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["count"].as_u64().unwrap())
        .sum();
    assert_eq!(total, 15);

    let response = client.get("/analysis/integrated").dispatch();
    let body: Value = response.into_json().expect("json body");
    assert!(body["balance_score"].as_u64().unwrap() <= 100);

    let response = client.get("/analysis/support").dispatch();
    assert_eq!(response.status(), Status::Ok);
}

#[test]
fn test_malformed_import_leaves_state_untouched() {
    let client = test_client();
    client.post("/deck/main/cards/Y-001").dispatch();

    let response = client
        .post("/decks/import")
        .header(ContentType::JSON)
        .body(r#"{ "R-001": "four" }"#)
        .dispatch();
    assert_eq!(response.status(), Status::BadRequest);

    let response = client.get("/deck/main").dispatch();
    let body: Value = response.into_json().expect("json body");
    assert_eq!(body["deck"]["cards"]["Y-001"].as_u64(), Some(1));
    assert_eq!(body["total_cards"].as_u64(), Some(1));
}
