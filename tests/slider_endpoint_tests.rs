use std::fs;

use atera_calc::config::{SLIDERS_CACHE_CONTROL, SLIDERS_ROUTE, SliderEndpoint};
use serde_json::json;

#[test]
fn serves_document_with_cache_directive() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("calc-sliders.json");
    fs::write(&path, r#"{"sliders":[{"min":1},{},{}]}"#).expect("write sliders");

    let response = SliderEndpoint::new(&path).respond();
    assert!(response.is_success());
    assert_eq!(response.cache_control, Some(SLIDERS_CACHE_CONTROL));
    assert_eq!(response.body, json!({"sliders": [{"min": 1}, {}, {}]}));
    assert_eq!(SLIDERS_ROUTE, "/atera/v1/calc-sliders");
}

#[test]
fn missing_file_is_not_found() {
    let dir = tempfile::tempdir().expect("temp dir");
    let response = SliderEndpoint::new(dir.path().join("absent.json")).respond();
    assert_eq!(response.status, 404);
    assert_eq!(response.cache_control, None);
    assert_eq!(response.body["code"], "atera_cc_not_found");
    assert_eq!(response.body["data"]["status"], 404);
}

#[test]
fn unreadable_path_is_server_error() {
    let dir = tempfile::tempdir().expect("temp dir");
    let response = SliderEndpoint::new(dir.path()).respond();
    assert_eq!(response.status, 500);
    assert_eq!(response.body["code"], "atera_cc_read_error");
}

#[test]
fn malformed_json_is_server_error() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("calc-sliders.json");
    fs::write(&path, "{ sliders: nope").expect("write garbage");

    let response = SliderEndpoint::new(&path).respond();
    assert_eq!(response.status, 500);
    assert_eq!(response.body["code"], "atera_cc_bad_json");
    assert_eq!(
        response.body["message"],
        "Invalid sliders configuration JSON."
    );
}
