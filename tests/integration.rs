//! Integration tests for the Time & Attendance Variance Engine.
//!
//! This test suite drives the HTTP surface end to end:
//! - Balanced days, open shifts and dangling breaks
//! - Re-clock-in discard
//! - Window boundaries
//! - Staff identity resolution and labels
//! - Malformed rows
//! - Error cases

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use rust_decimal::Decimal;
use serde_json::{Value, json};
use std::str::FromStr;
use tower::ServiceExt;

use attendance_engine::api::{AppState, create_router};
use attendance_engine::config::ConfigLoader;

// =============================================================================
// Test Helpers
// =============================================================================

fn create_test_state() -> AppState {
    let config = ConfigLoader::load("./config/attendance").expect("Failed to load config");
    AppState::new(config)
}

fn create_router_for_test() -> Router {
    create_router(create_test_state())
}

async fn post_variance(router: Router, body: Value) -> (StatusCode, Value) {
    let response = router
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/variance")
                .header("Content-Type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: Value = serde_json::from_slice(&body_bytes).unwrap();

    (status, json)
}

/// A request for the week of Monday 2026-01-12.
fn create_request(shifts: Vec<Value>, punches: Vec<Value>) -> Value {
    create_request_for_window(
        "2026-01-12T00:00:00Z",
        "2026-01-19T00:00:00Z",
        shifts,
        punches,
    )
}

fn create_request_for_window(
    start: &str,
    end: &str,
    shifts: Vec<Value>,
    punches: Vec<Value>,
) -> Value {
    json!({
        "window": { "start": start, "end": end },
        "shifts": shifts,
        "punches": punches,
        "staff": []
    })
}

fn create_shift(account_id: &str, starts_at: &str, ends_at: &str, break_minutes: u32) -> Value {
    json!({
        "account_id": account_id,
        "starts_at": starts_at,
        "ends_at": ends_at,
        "break_minutes": break_minutes
    })
}

fn create_punch(account_id: &str, action: &str, at: &str) -> Value {
    json!({
        "account_id": account_id,
        "action": action,
        "at": at
    })
}

fn row_for<'a>(result: &'a Value, label: &str) -> &'a Value {
    result["rows"]
        .as_array()
        .unwrap()
        .iter()
        .find(|row| row["label"] == label)
        .unwrap_or_else(|| panic!("No row labelled '{}'", label))
}

fn assert_minutes(row: &Value, scheduled: i64, actual: i64, variance: i64) {
    assert_eq!(row["scheduled_minutes"], scheduled, "scheduled_minutes");
    assert_eq!(row["actual_minutes"], actual, "actual_minutes");
    assert_eq!(row["variance_minutes"], variance, "variance_minutes");
}

// =============================================================================
// SECTION 1: Punch Reconstruction
// =============================================================================

#[tokio::test]
async fn test_balanced_day_against_schedule() {
    // 09:00-17:30 with 30 minute break scheduled = 480
    // 09:00-12:00 + 12:30-17:00 worked = 450
    let request = create_request(
        vec![create_shift("ana", "2026-01-13T09:00:00Z", "2026-01-13T17:30:00Z", 30)],
        vec![
            create_punch("ana", "clock_in", "2026-01-13T09:00:00Z"),
            create_punch("ana", "break_out", "2026-01-13T12:00:00Z"),
            create_punch("ana", "break_in", "2026-01-13T12:30:00Z"),
            create_punch("ana", "clock_out", "2026-01-13T17:00:00Z"),
        ],
    );

    let (status, result) = post_variance(create_router_for_test(), request).await;

    assert_eq!(status, StatusCode::OK);
    assert_minutes(row_for(&result, "ana"), 480, 450, -30);
}

#[tokio::test]
async fn test_open_shift_closes_at_window_end() {
    let request = create_request_for_window(
        "2026-01-13T00:00:00Z",
        "2026-01-13T18:00:00Z",
        vec![],
        vec![create_punch("ana", "clock_in", "2026-01-13T16:00:00Z")],
    );

    let (status, result) = post_variance(create_router_for_test(), request).await;

    assert_eq!(status, StatusCode::OK);
    assert_minutes(row_for(&result, "ana"), 0, 120, 120);
}

#[tokio::test]
async fn test_dangling_break_is_not_credited() {
    let request = create_request(
        vec![],
        vec![
            create_punch("ana", "clock_in", "2026-01-13T09:00:00Z"),
            create_punch("ana", "break_out", "2026-01-13T12:00:00Z"),
            create_punch("ana", "clock_out", "2026-01-13T12:45:00Z"),
        ],
    );

    let (_, result) = post_variance(create_router_for_test(), request).await;

    assert_minutes(row_for(&result, "ana"), 0, 180, 180);
}

#[tokio::test]
async fn test_re_clock_in_discards_first_segment() {
    let request = create_request(
        vec![],
        vec![
            create_punch("ana", "clock_in", "2026-01-13T09:00:00Z"),
            create_punch("ana", "clock_in", "2026-01-13T10:00:00Z"),
            create_punch("ana", "clock_out", "2026-01-13T11:00:00Z"),
        ],
    );

    let (_, result) = post_variance(create_router_for_test(), request).await;

    assert_minutes(row_for(&result, "ana"), 0, 60, 60);
}

#[tokio::test]
async fn test_shuffled_punches_match_ordered_punches() {
    let ordered = vec![
        create_punch("ana", "clock_in", "2026-01-14T08:00:00Z"),
        create_punch("ana", "break_out", "2026-01-14T11:00:00Z"),
        create_punch("ana", "break_in", "2026-01-14T11:45:00Z"),
        create_punch("ana", "clock_out", "2026-01-14T16:10:00Z"),
    ];
    let mut shuffled = ordered.clone();
    shuffled.swap(0, 3);
    shuffled.swap(1, 2);

    let (_, first) = post_variance(create_router_for_test(), create_request(vec![], ordered)).await;
    let (_, second) =
        post_variance(create_router_for_test(), create_request(vec![], shuffled)).await;

    assert_eq!(first["rows"], second["rows"]);
    assert_minutes(row_for(&first, "ana"), 0, 180 + 265, 445);
}

// =============================================================================
// SECTION 2: Window Boundaries
// =============================================================================

#[tokio::test]
async fn test_punch_at_window_end_is_excluded() {
    let request = create_request_for_window(
        "2026-01-13T00:00:00Z",
        "2026-01-13T18:00:00Z",
        vec![],
        vec![
            create_punch("ana", "clock_in", "2026-01-13T00:00:00Z"),
            create_punch("ana", "clock_out", "2026-01-13T01:00:00Z"),
            create_punch("ben", "clock_in", "2026-01-13T18:00:00Z"),
        ],
    );

    let (_, result) = post_variance(create_router_for_test(), request).await;

    assert_minutes(row_for(&result, "ana"), 0, 60, 60);
    assert_minutes(row_for(&result, "ben"), 0, 0, 0);
}

#[tokio::test]
async fn test_shift_starting_before_window_is_not_scheduled() {
    let request = create_request(
        vec![
            create_shift("ana", "2026-01-11T22:00:00Z", "2026-01-12T06:00:00Z", 0),
            create_shift("ana", "2026-01-18T22:00:00Z", "2026-01-19T06:00:00Z", 0),
        ],
        vec![],
    );

    let (_, result) = post_variance(create_router_for_test(), request).await;

    assert_minutes(row_for(&result, "ana"), 480, 0, -480);
}

// =============================================================================
// SECTION 3: Identity and Labels
// =============================================================================

#[tokio::test]
async fn test_pin_and_account_rows_stay_separate() {
    let request = create_request(
        vec![json!({
            "account_id": "1234",
            "starts_at": "2026-01-13T09:00:00Z",
            "ends_at": "2026-01-13T13:00:00Z"
        })],
        vec![
            json!({ "pin": "1234", "action": "clock_in", "at": "2026-01-13T09:00:00Z" }),
            json!({ "pin": "1234", "action": "clock_out", "at": "2026-01-13T12:00:00Z" }),
        ],
    );

    let (_, result) = post_variance(create_router_for_test(), request).await;

    let rows = result["rows"].as_array().unwrap();
    assert_eq!(rows.len(), 2);
    let account_row = rows
        .iter()
        .find(|r| r["staff_key"]["kind"] == "account")
        .unwrap();
    let pin_row = rows.iter().find(|r| r["staff_key"]["kind"] == "pin").unwrap();
    assert_minutes(account_row, 240, 0, -240);
    assert_minutes(pin_row, 0, 180, 180);
}

#[tokio::test]
async fn test_directory_names_and_sorting() {
    let mut request = create_request(
        vec![
            create_shift("acct-z", "2026-01-13T09:00:00Z", "2026-01-13T10:00:00Z", 0),
            create_shift("acct-a", "2026-01-13T09:00:00Z", "2026-01-13T10:00:00Z", 0),
        ],
        vec![json!({ "action": "clock_in", "at": "2026-01-13T09:00:00Z" })],
    );
    request["staff"] = json!([
        { "account_id": "acct-z", "display_name": "aaron" },
        { "account_id": "acct-a", "display_name": "Zed" }
    ]);

    let (_, result) = post_variance(create_router_for_test(), request).await;

    let labels: Vec<&str> = result["rows"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["label"].as_str().unwrap())
        .collect();
    assert_eq!(labels, vec!["aaron", "Unidentified staff", "Zed"]);
}

// =============================================================================
// SECTION 4: Malformed Input and Totals
// =============================================================================

#[tokio::test]
async fn test_malformed_rows_are_skipped_with_warnings() {
    let request = create_request(
        vec![
            create_shift("ana", "not-a-date", "2026-01-13T17:00:00Z", 0),
            create_shift("ana", "2026-01-14T09:00:00Z", "2026-01-14T17:00:00Z", 0),
        ],
        vec![
            create_punch("ana", "clock_in", "2026-01-14T09:00:00Z"),
            create_punch("ana", "clock_out", "??"),
            create_punch("ana", "clock_out", "2026-01-14T17:00:00Z"),
        ],
    );

    let (status, result) = post_variance(create_router_for_test(), request).await;

    assert_eq!(status, StatusCode::OK);
    assert_minutes(row_for(&result, "ana"), 480, 480, 0);
    let codes: Vec<&str> = result["warnings"]
        .as_array()
        .unwrap()
        .iter()
        .map(|w| w["code"].as_str().unwrap())
        .collect();
    assert_eq!(codes, vec!["MALFORMED_SHIFT", "MALFORMED_PUNCH"]);
}

#[tokio::test]
async fn test_null_punch_timestamp_is_skipped_not_rejected() {
    let request = create_request(
        vec![],
        vec![
            create_punch("ana", "clock_in", "2026-01-13T09:00:00Z"),
            create_punch("ana", "clock_out", "2026-01-13T17:00:00Z"),
            json!({ "account_id": "ben", "action": "clock_in", "at": null }),
        ],
    );

    let (status, result) = post_variance(create_router_for_test(), request).await;

    assert_eq!(status, StatusCode::OK);
    assert_minutes(row_for(&result, "ana"), 0, 480, 480);
    let warnings = result["warnings"].as_array().unwrap();
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0]["code"], "MALFORMED_PUNCH");
    assert!(warnings[0]["message"].as_str().unwrap().contains("missing"));
}

#[tokio::test]
async fn test_open_shift_without_end_is_skipped_not_rejected() {
    let request = create_request(
        vec![
            create_shift("ana", "2026-01-13T09:00:00Z", "2026-01-13T17:00:00Z", 30),
            json!({
                "account_id": "ben",
                "starts_at": "2026-01-13T09:00:00Z",
                "ends_at": null
            }),
            json!({
                "account_id": "cy",
                "starts_at": 1736758800,
                "ends_at": "2026-01-13T17:00:00Z"
            }),
        ],
        vec![],
    );

    let (status, result) = post_variance(create_router_for_test(), request).await;

    assert_eq!(status, StatusCode::OK);
    assert_minutes(row_for(&result, "ana"), 450, 0, -450);
    assert_eq!(result["rows"].as_array().unwrap().len(), 1);
    let codes: Vec<&str> = result["warnings"]
        .as_array()
        .unwrap()
        .iter()
        .map(|w| w["code"].as_str().unwrap())
        .collect();
    assert_eq!(codes, vec!["MALFORMED_SHIFT", "MALFORMED_SHIFT"]);
}

#[tokio::test]
async fn test_unknown_action_is_ignored() {
    let request = create_request(
        vec![],
        vec![
            create_punch("ana", "clock_in", "2026-01-13T09:00:00Z"),
            create_punch("ana", "meal_start", "2026-01-13T10:00:00Z"),
            create_punch("ana", "clock_out", "2026-01-13T11:00:00Z"),
        ],
    );

    let (status, result) = post_variance(create_router_for_test(), request).await;

    assert_eq!(status, StatusCode::OK);
    assert_minutes(row_for(&result, "ana"), 0, 120, 120);
}

#[tokio::test]
async fn test_totals_sum_rows() {
    let request = create_request(
        vec![
            create_shift("ana", "2026-01-13T09:00:00Z", "2026-01-13T17:00:00Z", 0),
            create_shift("ben", "2026-01-13T09:00:00Z", "2026-01-13T13:00:00Z", 0),
        ],
        vec![
            create_punch("ana", "clock_in", "2026-01-13T09:00:00Z"),
            create_punch("ana", "clock_out", "2026-01-13T16:30:00Z"),
            create_punch("ben", "clock_in", "2026-01-13T09:00:00Z"),
            create_punch("ben", "clock_out", "2026-01-13T14:00:00Z"),
        ],
    );

    let (_, result) = post_variance(create_router_for_test(), request).await;

    let totals = &result["totals"];
    assert_eq!(totals["staff_count"], 2);
    assert_eq!(totals["scheduled_minutes"], 720);
    assert_eq!(totals["actual_minutes"], 750);
    assert_eq!(totals["variance_minutes"], 30);
    let variance_hours = Decimal::from_str(totals["variance_hours"].as_str().unwrap()).unwrap();
    assert_eq!(variance_hours, Decimal::new(5, 1));
}

#[tokio::test]
async fn test_empty_collections_yield_empty_report() {
    let (status, result) =
        post_variance(create_router_for_test(), create_request(vec![], vec![])).await;

    assert_eq!(status, StatusCode::OK);
    assert!(result["rows"].as_array().unwrap().is_empty());
    assert_eq!(result["totals"]["staff_count"], 0);
}

// =============================================================================
// SECTION 5: Error Cases
// =============================================================================

#[tokio::test]
async fn test_window_longer_than_maximum_is_rejected() {
    let request = create_request_for_window(
        "2026-01-01T00:00:00Z",
        "2026-03-01T00:00:00Z",
        vec![],
        vec![],
    );

    let (status, result) = post_variance(create_router_for_test(), request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(result["code"], "WINDOW_TOO_LONG");
}

#[tokio::test]
async fn test_empty_window_is_rejected() {
    let request = create_request_for_window(
        "2026-01-12T00:00:00Z",
        "2026-01-12T00:00:00Z",
        vec![],
        vec![],
    );

    let (status, result) = post_variance(create_router_for_test(), request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(result["code"], "INVALID_WINDOW");
}

#[tokio::test]
async fn test_unparsable_window_is_rejected() {
    let request = create_request_for_window("last monday", "2026-01-19T00:00:00Z", vec![], vec![]);

    let (status, result) = post_variance(create_router_for_test(), request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(result["code"], "MALFORMED_JSON");
}
