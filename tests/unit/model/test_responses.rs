use gazelle_client::model::responses::{ApiResponse, IndexInfo};
use serde_json::json;

#[test]
fn test_success_returns_response_verbatim() {
    let payload = json!({"results": [{"groupId": 1}], "pages": 3});
    let envelope = ApiResponse::from_value(json!({"status": "success", "response": payload}));
    assert!(envelope.is_success());
    assert_eq!(envelope.into_payload("browse").unwrap(), payload);
}

#[test]
fn test_success_without_response_is_null() {
    let envelope = ApiResponse::from_value(json!({"status": "success"}));
    assert_eq!(envelope.into_payload("logout").unwrap(), serde_json::Value::Null);
}

#[test]
fn test_failure_message_names_action_and_status() {
    let envelope = ApiResponse::from_value(json!({"status": "failure"}));
    let msg = envelope.into_payload("torrent").unwrap_err().to_string();
    assert_eq!(msg, "protocol error: Gazelle API call 'torrent' failed: failure");
}

#[test]
fn test_index_info_display_is_json() {
    let info = IndexInfo {
        id: Some(7),
        authkey: Some("k".to_string()),
        ..IndexInfo::default()
    };
    let shown: serde_json::Value = serde_json::from_str(&info.to_string()).unwrap();
    assert_eq!(shown["id"], 7);
    assert_eq!(shown["authkey"], "k");
}
