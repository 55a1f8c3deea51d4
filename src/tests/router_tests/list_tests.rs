// src/tests/router_tests/list_tests.rs
use crate::db::properties::SqlitePropertyRepo;
use crate::domain::repository::PropertyRepository;
use crate::importer::RowParser;
use crate::responses::error_to_response;
use crate::router::{handle, AppState};
use crate::tests::utils::{init_test_db, read_json, sample_record, InMemoryRepo};
use astra::Body;
use http::{Method, Request};

fn get(uri: &str) -> astra::Request {
    Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

#[test]
fn empty_store_lists_nothing() {
    let repo = SqlitePropertyRepo::new(init_test_db("list_empty"));
    let state = AppState::new(repo, RowParser::new(), 2 << 20);

    let json = read_json(handle(get("/property"), &state).unwrap());

    assert_eq!(json["message"], "Got 0 properties data.");
    assert_eq!(json["properties"], serde_json::json!([]));
}

#[test]
fn lists_stored_properties_with_ids() {
    let repo = SqlitePropertyRepo::new(init_test_db("list_stored"));
    repo.insert(&sample_record()).unwrap();
    let mut second = sample_record();
    second.building = String::new();
    repo.insert(&second).unwrap();

    let state = AppState::new(repo, RowParser::new(), 2 << 20);
    let resp = handle(get("/property"), &state).unwrap();
    assert_eq!(resp.status(), 200);

    let json = read_json(resp);
    assert_eq!(json["message"], "Got 2 properties data.");

    let first = &json["properties"][0];
    assert_eq!(first["id"], 1);
    assert_eq!(first["full_address"], "Tokyo Shibuya Jingumae, 1 2 3, Sky Tower");
    assert_eq!(first["nearest_station"], "Harajuku");
    assert_eq!(first["property_type"], "House");

    let second = &json["properties"][1];
    assert_eq!(second["id"], 2);
    assert_eq!(second["building"], "");
    assert_eq!(second["full_address"], "Tokyo Shibuya Jingumae, 1 2 3, ");
}

#[test]
fn storage_failure_is_a_generic_500() {
    let repo = InMemoryRepo::broken();
    let state = AppState::new(&repo, RowParser::new(), 2 << 20);

    let resp = error_to_response(handle(get("/property"), &state).unwrap_err());

    assert_eq!(resp.status(), 500);
    assert_eq!(read_json(resp)["error"], "Internal Server Error");
}

#[test]
fn list_path_requires_get() {
    let repo = InMemoryRepo::default();
    let state = AppState::new(&repo, RowParser::new(), 2 << 20);
    let req = Request::builder()
        .method(Method::POST)
        .uri("/property")
        .body(Body::empty())
        .unwrap();

    let resp = error_to_response(handle(req, &state).unwrap_err());
    assert_eq!(resp.status(), 404);
}

#[test]
fn unknown_path_is_not_found() {
    let repo = InMemoryRepo::default();
    let state = AppState::new(&repo, RowParser::new(), 2 << 20);

    let resp = error_to_response(handle(get("/nope"), &state).unwrap_err());
    assert_eq!(resp.status(), 404);
}
