//! Hydration and browsing tests against a local mock of the catalog API

use mockito::{Mock, Server, ServerGuard};
use pokegrid::api::ApiClient;
use pokegrid::browser::Browser;
use pokegrid::document::GridContainer;
use pokegrid::hydrate::{hydrate_types, hydrate_types_bounded, HydrationReport};
use pokegrid::state::{ListingEntry, NamedResource};
use pokegrid::ui;
use pretty_assertions::assert_eq;
use serde_json::json;

fn reference(base: &str, id: u32) -> ListingEntry {
    ListingEntry::from(NamedResource {
        name: format!("mon-{id}"),
        url: format!("{base}/pokemon/{id}/"),
    })
}

fn detail_body(id: u32, types: &[&str]) -> String {
    let types: Vec<_> = types
        .iter()
        .map(|name| json!({ "slot": 1, "type": { "name": name, "url": "" } }))
        .collect();
    json!({
        "id": id,
        "name": format!("mon-{id}"),
        "height": 7,
        "weight": 69,
        "sprites": { "front_default": null },
        "types": types,
        "stats": [{ "base_stat": 45, "stat": { "name": "hp" } }],
        "abilities": [{ "ability": { "name": "overgrow" }, "is_hidden": false }],
        "species": { "name": format!("mon-{id}"), "url": format!("https://pokeapi.co/api/v2/pokemon-species/{id}/") }
    })
    .to_string()
}

async fn mock_detail(server: &mut ServerGuard, id: u32, types: &[&str]) -> Mock {
    server
        .mock("GET", format!("/pokemon/{id}/").as_str())
        .with_status(200)
        .with_body(detail_body(id, types))
        .create_async()
        .await
}

#[tokio::test]
async fn sequential_hydration_fills_empty_slots() {
    let mut server = Server::new_async().await;
    let base = server.url();
    let first = mock_detail(&mut server, 1, &["grass", "poison"]).await;
    let fourth = mock_detail(&mut server, 4, &["fire"]).await;

    let entries = vec![reference(&base, 1), reference(&base, 4)];
    let mut container = GridContainer::new();
    ui::grid(&entries, &mut container);
    assert!(!container.slot_is_populated("1"));

    let client = ApiClient::new(base);
    let report = hydrate_types(&client, &entries, &mut container).await;

    first.assert_async().await;
    fourth.assert_async().await;
    assert_eq!(
        report,
        HydrationReport {
            filled: 2,
            skipped: 0,
            failed: 0
        }
    );
    assert_eq!(
        container.type_slot("1"),
        Some(format!("{}{}", ui::type_badge("grass"), ui::type_badge("poison")).as_str())
    );
    assert!(container.type_slot("4").is_some_and(|slot| slot.contains("#EE8130")));
}

#[tokio::test]
async fn hydration_skips_populated_missing_and_detailed_entries() {
    let mut server = Server::new_async().await;
    let base = server.url();
    let untouched = server
        .mock("GET", mockito::Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let detailed: ListingEntry = serde_json::from_str(&detail_body(7, &["water"])).unwrap();
    let painted = vec![reference(&base, 1), detailed.clone()];
    let mut container = GridContainer::new();
    ui::grid(&painted, &mut container);
    container.fill_type_slot("1", ui::type_badge("grass"));

    // Entry 9 was never painted, so it has no slot to fill.
    let entries = vec![reference(&base, 1), detailed, reference(&base, 9)];
    let client = ApiClient::new(base);
    let report = hydrate_types(&client, &entries, &mut container).await;

    untouched.assert_async().await;
    assert_eq!(report.skipped, 3);
    assert_eq!(report.filled, 0);
}

#[tokio::test]
async fn failed_fetch_leaves_slot_empty() {
    let mut server = Server::new_async().await;
    let base = server.url();
    let _first = server
        .mock("GET", "/pokemon/1/")
        .with_status(503)
        .create_async()
        .await;
    let second = mock_detail(&mut server, 2, &["fire"]).await;

    let entries = vec![reference(&base, 1), reference(&base, 2)];
    let mut container = GridContainer::new();
    ui::grid(&entries, &mut container);

    let client = ApiClient::new(base);
    let report = hydrate_types(&client, &entries, &mut container).await;

    second.assert_async().await;
    assert_eq!(report.failed, 1);
    assert_eq!(report.filled, 1);
    assert_eq!(container.type_slot("1"), Some(""));
    assert!(container.slot_is_populated("2"));
}

#[tokio::test]
async fn bounded_hydration_fetches_each_entry_once() {
    let mut server = Server::new_async().await;
    let base = server.url();
    let mut mocks = Vec::new();
    for id in 1..=6 {
        let mock = server
            .mock("GET", format!("/pokemon/{id}/").as_str())
            .with_status(200)
            .with_body(detail_body(id, &["normal"]))
            .expect(1)
            .create_async()
            .await;
        mocks.push(mock);
    }

    let entries: Vec<ListingEntry> = (1..=6).map(|id| reference(&base, id)).collect();
    let mut container = GridContainer::new();
    ui::grid(&entries, &mut container);

    let client = ApiClient::new(base);
    let report = hydrate_types_bounded(&client, &entries, &mut container, 3).await;

    for mock in &mocks {
        mock.assert_async().await;
    }
    assert_eq!(report.filled, 6);
    let ids: Vec<&str> = container.cards().iter().map(|card| card.id.as_str()).collect();
    assert_eq!(ids, vec!["1", "2", "3", "4", "5", "6"]);
    assert!(container
        .cards()
        .iter()
        .all(|card| card.types.contains("#A8A77A")));
}

#[tokio::test]
async fn browser_pages_and_hydrates() {
    let mut server = Server::new_async().await;
    let base = server.url();
    let _first_page = server
        .mock("GET", "/pokemon")
        .match_query(mockito::Matcher::UrlEncoded("offset".into(), "0".into()))
        .with_status(200)
        .with_body(
            json!({ "results": [
                { "name": "mon-1", "url": format!("{base}/pokemon/1/") },
                { "name": "mon-2", "url": format!("{base}/pokemon/2/") }
            ] })
            .to_string(),
        )
        .create_async()
        .await;
    let _second_page = server
        .mock("GET", "/pokemon")
        .match_query(mockito::Matcher::UrlEncoded("offset".into(), "2".into()))
        .with_status(200)
        .with_body(json!({ "results": [] }).to_string())
        .create_async()
        .await;
    let _bug = mock_detail(&mut server, 1, &["bug"]).await;
    let _rock = mock_detail(&mut server, 2, &["rock"]).await;

    let mut browser = Browser::new(ApiClient::new(base), 2);
    assert_eq!(browser.load_page(0).await, 2);
    let names: Vec<&str> = browser.entries().iter().map(ListingEntry::name).collect();
    assert_eq!(names, vec!["mon-1", "mon-2"]);
    assert!(!browser.container().slot_is_populated("1"));

    let report = browser.hydrate(2).await;
    assert_eq!(report.filled, 2);
    assert!(browser.render_page().contains("#A6B91A"));

    assert_eq!(browser.next_page().await, 0);
    assert_eq!(browser.offset(), 2);
    assert!(browser.container().is_empty());

    assert_eq!(browser.prev_page().await, 2);
    assert_eq!(browser.offset(), 0);
    assert_eq!(browser.prev_page().await, 2);
    assert_eq!(browser.offset(), 0);
}

#[tokio::test]
async fn browser_opens_and_closes_detail() {
    let mut server = Server::new_async().await;
    let base = server.url();
    let _detail = server
        .mock("GET", "/pokemon/1")
        .with_status(200)
        .with_body(detail_body(1, &["grass"]))
        .create_async()
        .await;
    let species = server
        .mock("GET", "/pokemon-species/1")
        .with_status(200)
        .with_body(
            json!({
                "flavor_text_entries": [
                    { "flavor_text": "A strange seed was\u{000C}planted on its back.", "language": { "name": "en" } }
                ],
                "genera": [{ "genus": "Seed Pokémon", "language": { "name": "en" } }]
            })
            .to_string(),
        )
        .create_async()
        .await;

    let mut browser = Browser::new(ApiClient::new(base), 20);
    assert!(browser.open_detail("1").await);
    species.assert_async().await;

    let overlay = browser.overlay().expect("overlay open");
    assert_eq!(overlay.detail.id, 1);
    assert!(overlay
        .markup
        .contains("A strange seed was planted on its back."));
    assert!(overlay.markup.contains("Seed Pokémon"));
    assert!(overlay.markup.contains("0.7m"));
    assert!(overlay.markup.contains("6.9kg"));
    assert!(browser.render_page().contains("modal-backdrop"));

    browser.close_detail();
    assert!(browser.overlay().is_none());
    assert!(!browser.render_page().contains("modal-backdrop"));
}

#[tokio::test]
async fn browser_reports_missing_detail() {
    let mut server = Server::new_async().await;
    let base = server.url();
    let _missing = server
        .mock("GET", mockito::Matcher::Any)
        .with_status(404)
        .create_async()
        .await;

    let mut browser = Browser::new(ApiClient::new(base), 20);
    assert!(!browser.open_detail("0").await);
    assert!(browser.overlay().is_none());
}

#[tokio::test]
async fn bounded_hydration_fetches_shared_id_once() {
    let mut server = Server::new_async().await;
    let base = server.url();
    let shared = server
        .mock("GET", "/pokemon/1/")
        .with_status(200)
        .with_body(detail_body(1, &["grass"]))
        .expect(1)
        .create_async()
        .await;

    let entries = vec![reference(&base, 1), reference(&base, 1)];
    let mut container = GridContainer::new();
    ui::grid(&entries, &mut container);

    let client = ApiClient::new(base);
    let report = hydrate_types_bounded(&client, &entries, &mut container, 4).await;

    shared.assert_async().await;
    assert_eq!(
        report,
        HydrationReport {
            filled: 1,
            skipped: 1,
            failed: 0
        }
    );
    assert!(container.slot_is_populated("1"));
}

fn alternate_form_body(base: &str) -> String {
    json!({
        "id": 10034,
        "name": "charizard-mega-x",
        "height": 17,
        "weight": 1105,
        "sprites": { "front_default": null },
        "types": [
            { "slot": 1, "type": { "name": "fire" } },
            { "slot": 2, "type": { "name": "dragon" } }
        ],
        "stats": [],
        "abilities": [],
        "species": { "name": "charizard", "url": format!("{base}/pokemon-species/6/") }
    })
    .to_string()
}

#[tokio::test]
async fn alternate_form_falls_back_to_linked_species() {
    let mut server = Server::new_async().await;
    let base = server.url();
    let _detail = server
        .mock("GET", "/pokemon/10034")
        .with_status(200)
        .with_body(alternate_form_body(&base))
        .create_async()
        .await;
    let form_species = server
        .mock("GET", "/pokemon-species/10034")
        .with_status(404)
        .expect(1)
        .create_async()
        .await;
    let linked_species = server
        .mock("GET", "/pokemon-species/6/")
        .with_status(200)
        .with_body(
            json!({
                "flavor_text_entries": [],
                "genera": [{ "genus": "Flame Pokémon", "language": { "name": "en" } }]
            })
            .to_string(),
        )
        .expect(1)
        .create_async()
        .await;

    let mut browser = Browser::new(ApiClient::new(base), 20);
    assert!(browser.open_detail("10034").await);

    form_species.assert_async().await;
    linked_species.assert_async().await;
    let overlay = browser.overlay().expect("overlay open");
    assert_eq!(overlay.detail.id, 10034);
    assert!(overlay.markup.contains("Flame Pokémon"));
    assert!(overlay.markup.contains("#10034"));
}

#[tokio::test]
async fn alternate_form_without_any_species_stays_closed() {
    let mut server = Server::new_async().await;
    let base = server.url();
    let _detail = server
        .mock("GET", "/pokemon/10034")
        .with_status(200)
        .with_body(alternate_form_body(&base))
        .create_async()
        .await;
    let _form_species = server
        .mock("GET", "/pokemon-species/10034")
        .with_status(404)
        .create_async()
        .await;
    let linked_species = server
        .mock("GET", "/pokemon-species/6/")
        .with_status(500)
        .expect(1)
        .create_async()
        .await;

    let mut browser = Browser::new(ApiClient::new(base), 20);
    assert!(!browser.open_detail("10034").await);

    linked_species.assert_async().await;
    assert!(browser.overlay().is_none());
}
