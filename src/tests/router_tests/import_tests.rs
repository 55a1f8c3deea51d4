// src/tests/router_tests/import_tests.rs
use crate::db::properties::SqlitePropertyRepo;
use crate::domain::repository::PropertyRepository;
use crate::importer::RowParser;
use crate::router::{handle, AppState};
use crate::tests::utils::{init_test_db, read_json, upload_request, InMemoryRepo, TEST_BOUNDARY};
use astra::Body;
use http::{Method, Request};

const HEADER: &[u8] = b"prefecture,city,town,chome,banchi,go,building,price,nearest_station,property_type,land_area\n";

fn sqlite_state(name: &str) -> AppState<SqlitePropertyRepo> {
    let repo = SqlitePropertyRepo::new(init_test_db(name));
    AppState::new(repo, RowParser::new(), 2 << 20)
}

fn csv(rows: &[&str]) -> Vec<u8> {
    let mut out = HEADER.to_vec();
    for row in rows {
        out.extend_from_slice(row.as_bytes());
        out.push(b'\n');
    }
    out
}

#[test]
fn upload_imports_valid_rows_and_skips_short_ones() {
    let state = sqlite_state("import_valid_short");
    let file = csv(&[
        "Tokyo,Shibuya,X,1,2,3,B,1000,St,House,50",
        "Tokyo,Shibuya,X,1,2",
    ]);

    let resp = handle(upload_request(&[("file", file.as_slice())]), &state).expect("Handler failed");
    assert_eq!(resp.status(), 200);
    assert_eq!(
        resp.headers().get("Content-Type").unwrap(),
        "application/json"
    );

    let json = read_json(resp);
    assert_eq!(json, serde_json::json!({ "message": "Processed 1 properties." }));

    let stored = state.lister.list().unwrap();
    assert_eq!(stored.properties.len(), 1);
    assert_eq!(stored.properties[0].record.town, "X");
}

#[test]
fn full_width_numbers_are_stored_as_integers() {
    let state = sqlite_state("import_full_width");
    let file = csv(&["東京都,渋谷区,神宮前,１,１２,３,ビル,2500000,原宿,マンション,45.3"]);

    let resp = handle(upload_request(&[("file", file.as_slice())]), &state).unwrap();
    assert_eq!(resp.status(), 200);

    let listed = state.lister.list().unwrap();
    let record = &listed.properties[0].record;
    assert_eq!((record.chome, record.banchi, record.go), (1, 12, 3));
    assert_eq!(record.land_area, "45.3");
    assert_eq!(listed.properties[0].full_address, "東京都 渋谷区 神宮前, 1 12 3, ビル");
}

#[test]
fn file_field_is_found_among_other_parts() {
    let state = sqlite_state("import_other_parts");
    let file = csv(&["Osaka,Kita,Umeda,4,5,6,Tower,99,Umeda,Office,10"]);

    let req = upload_request(&[("note", b"hello".as_slice()), ("file", file.as_slice())]);
    let json = read_json(handle(req, &state).unwrap());

    assert_eq!(json["message"], "Processed 1 properties.");
}

#[test]
fn storage_failures_reduce_the_count() {
    let repo = InMemoryRepo::failing_every(2);
    let state = AppState::new(&repo, RowParser::new(), 2 << 20);
    let file = csv(&[
        "A,B,C,1,1,1,D,1,E,F,G",
        "A,B,C,2,2,2,D,2,E,F,G",
        "A,B,C,3,3,3,D,3,E,F,G",
        "A,B,C,4,4,4,D,4,E,F,G",
    ]);

    let json = read_json(handle(upload_request(&[("file", file.as_slice())]), &state).unwrap());

    assert_eq!(json["message"], "Processed 2 properties.");
    let chomes: Vec<u32> = repo.list_all().unwrap().iter().map(|p| p.record.chome).collect();
    assert_eq!(chomes, [1, 3]);
}

#[test]
fn missing_file_field_is_bad_request() {
    let state = sqlite_state("import_missing_field");

    let err = handle(upload_request(&[("upload", csv(&[]).as_slice())]), &state).unwrap_err();
    assert!(matches!(err, crate::errors::ServerError::BadRequest(_)));

    let resp = crate::responses::error_to_response(err);
    assert_eq!(resp.status(), 400);
    assert_eq!(read_json(resp)["error"], "missing form field `file`");
}

#[test]
fn non_multipart_body_is_bad_request() {
    let state = sqlite_state("import_not_multipart");
    let req = Request::builder()
        .method(Method::POST)
        .uri("/property/import")
        .header("Content-Type", "text/csv")
        .body(Body::from(csv(&[])))
        .unwrap();

    let resp = crate::responses::error_to_response(handle(req, &state).unwrap_err());
    assert_eq!(resp.status(), 400);
}

#[test]
fn oversized_upload_is_rejected() {
    let repo = InMemoryRepo::default();
    let state = AppState::new(&repo, RowParser::new(), 64);
    let file = csv(&["Tokyo,Shibuya,X,1,2,3,B,1000,St,House,50"; 4]);

    let err = handle(upload_request(&[("file", file.as_slice())]), &state).unwrap_err();
    let resp = crate::responses::error_to_response(err);

    assert_eq!(resp.status(), 413);
    assert!(repo.list_all().unwrap().is_empty(), "nothing imported");
}

#[test]
fn declared_length_over_limit_is_rejected_up_front() {
    let repo = InMemoryRepo::default();
    let state = AppState::new(&repo, RowParser::new(), 1024);
    let req = Request::builder()
        .method(Method::POST)
        .uri("/property/import")
        .header(
            "Content-Type",
            format!("multipart/form-data; boundary={TEST_BOUNDARY}"),
        )
        .header("Content-Length", "4096")
        .body(Body::empty())
        .unwrap();

    let err = handle(req, &state).unwrap_err();
    assert!(matches!(
        err,
        crate::errors::ServerError::PayloadTooLarge { limit: 1024 }
    ));
}

#[test]
fn import_path_requires_post() {
    let state = sqlite_state("import_wrong_method");
    let req = Request::builder()
        .method(Method::GET)
        .uri("/property/import")
        .body(Body::empty())
        .unwrap();

    let resp = crate::responses::error_to_response(handle(req, &state).unwrap_err());
    assert_eq!(resp.status(), 404);
    assert_eq!(read_json(resp)["error"], "Not Found");
}
