//! Tender lifecycle integration tests
//!
//! Exercises the mutation engine end-to-end: creation, the edit
//! authorization matrix, status transitions, version history and rollback.

use serde_json::json;
use uuid::Uuid;

use crate::common::{
    seed_employee, seed_organization, seed_responsibility, seed_responsible_employee,
    tender_payload, TestApp,
};

async fn create_tender(app: &TestApp, organization_id: Uuid, creator: &str) -> serde_json::Value {
    let response = app
        .post_json("/api/v1/tenders/new", tender_payload(organization_id, creator))
        .await;
    response.assert_created();
    response.json()
}

#[tokio::test]
async fn test_create_tender() {
    let app = TestApp::new().await;
    let (_, org_id) = seed_responsible_employee(&app.state.db, "alice", "Acme").await;

    let tender = create_tender(&app, org_id, "alice").await;

    assert_eq!(tender["name"], "Office supplies");
    assert_eq!(tender["status"], "CREATED");
    assert_eq!(tender["version"], 1);
    assert_eq!(tender["creator_username"], "alice");
    assert_eq!(tender["organization_id"], json!(org_id));
}

#[tokio::test]
async fn test_create_tender_unknown_employee() {
    let app = TestApp::new().await;
    let org_id = seed_organization(&app.state.db, "Acme").await;

    let response = app
        .post_json("/api/v1/tenders/new", tender_payload(org_id, "ghost"))
        .await;

    response.assert_not_found();
    assert_eq!(response.error_code(), "employee_not_found");
}

#[tokio::test]
async fn test_create_tender_unknown_organization() {
    let app = TestApp::new().await;
    seed_employee(&app.state.db, "alice").await;

    let response = app
        .post_json(
            "/api/v1/tenders/new",
            tender_payload(Uuid::new_v4(), "alice"),
        )
        .await;

    response.assert_not_found();
    assert_eq!(response.error_code(), "organization_not_found");
}

#[tokio::test]
async fn test_create_tender_not_responsible() {
    let app = TestApp::new().await;
    seed_employee(&app.state.db, "alice").await;
    let org_id = seed_organization(&app.state.db, "Acme").await;

    let response = app
        .post_json("/api/v1/tenders/new", tender_payload(org_id, "alice"))
        .await;

    response.assert_forbidden();
    assert_eq!(response.error_code(), "not_responsible_for_organization");
}

#[tokio::test]
async fn test_create_tender_rejects_non_initial_status() {
    let app = TestApp::new().await;
    let (_, org_id) = seed_responsible_employee(&app.state.db, "alice", "Acme").await;

    let mut payload = tender_payload(org_id, "alice");
    payload["status"] = json!("PUBLISHED");

    let response = app.post_json("/api/v1/tenders/new", payload).await;
    response.assert_bad_request();
    assert_eq!(response.error_code(), "invalid_initial_status");
}

#[tokio::test]
async fn test_create_tender_rejects_unknown_status() {
    let app = TestApp::new().await;
    let (_, org_id) = seed_responsible_employee(&app.state.db, "alice", "Acme").await;

    let mut payload = tender_payload(org_id, "alice");
    payload["status"] = json!("DRAFT");

    let response = app.post_json("/api/v1/tenders/new", payload).await;
    response.assert_bad_request();
    assert_eq!(response.error_code(), "unknown_status");
}

#[tokio::test]
async fn test_list_tenders_all_and_filtered() {
    let app = TestApp::new().await;
    let (_, org_id) = seed_responsible_employee(&app.state.db, "alice", "Acme").await;
    create_tender(&app, org_id, "alice").await;

    let response = app.get("/api/v1/tenders").await;
    response.assert_ok();
    let all: Vec<serde_json::Value> = response.json();
    assert_eq!(all.len(), 1);

    let response = app.get("/api/v1/tenders?service_type=Delivery").await;
    response.assert_ok();
    let filtered: Vec<serde_json::Value> = response.json();
    assert_eq!(filtered.len(), 1);

    // no match is an empty list, not an error
    let response = app.get("/api/v1/tenders?service_type=Construction").await;
    response.assert_ok();
    let empty: Vec<serde_json::Value> = response.json();
    assert!(empty.is_empty());
}

#[tokio::test]
async fn test_my_tenders() {
    let app = TestApp::new().await;
    let (_, org_id) = seed_responsible_employee(&app.state.db, "alice", "Acme").await;
    seed_employee(&app.state.db, "bob").await;
    create_tender(&app, org_id, "alice").await;

    let response = app.get("/api/v1/tenders/my?username=alice").await;
    response.assert_ok();
    let mine: Vec<serde_json::Value> = response.json();
    assert_eq!(mine.len(), 1);

    // zero tenders is an empty list
    let response = app.get("/api/v1/tenders/my?username=bob").await;
    response.assert_ok();
    let none: Vec<serde_json::Value> = response.json();
    assert!(none.is_empty());

    // unknown employee is a 404
    let response = app.get("/api/v1/tenders/my?username=ghost").await;
    response.assert_not_found();
    assert_eq!(response.error_code(), "employee_not_found");
}

#[tokio::test]
async fn test_edit_tender_fields() {
    let app = TestApp::new().await;
    let (_, org_id) = seed_responsible_employee(&app.state.db, "alice", "Acme").await;
    let tender = create_tender(&app, org_id, "alice").await;

    let response = app
        .patch_json(
            &format!("/api/v1/tenders/{}/edit?username=alice", tender["id"].as_str().unwrap()),
            json!({"name": "Renamed", "description": "Updated"}),
        )
        .await;

    response.assert_ok();
    let updated: serde_json::Value = response.json();
    assert_eq!(updated["name"], "Renamed");
    assert_eq!(updated["description"], "Updated");
    assert_eq!(updated["version"], 2);
}

#[tokio::test]
async fn test_edit_tender_requires_owner() {
    let app = TestApp::new().await;
    let (_, org_id) = seed_responsible_employee(&app.state.db, "alice", "Acme").await;
    seed_employee(&app.state.db, "bob").await;
    let tender = create_tender(&app, org_id, "alice").await;

    let response = app
        .patch_json(
            &format!("/api/v1/tenders/{}/edit?username=bob", tender["id"].as_str().unwrap()),
            json!({"name": "Hijacked"}),
        )
        .await;

    response.assert_forbidden();
    assert_eq!(response.error_code(), "not_tender_owner");
}

#[tokio::test]
async fn test_edit_tender_not_found() {
    let app = TestApp::new().await;
    seed_employee(&app.state.db, "alice").await;

    let response = app
        .patch_json(
            &format!("/api/v1/tenders/{}/edit?username=alice", Uuid::new_v4()),
            json!({"name": "Renamed"}),
        )
        .await;

    response.assert_not_found();
    assert_eq!(response.error_code(), "tender_not_found");
}

#[tokio::test]
async fn test_edit_move_to_org_without_responsibility() {
    // alice owns a tender under Acme and is not responsible for Globex;
    // moving the tender there must fail and change nothing
    let app = TestApp::new().await;
    let (_, acme_id) = seed_responsible_employee(&app.state.db, "alice", "Acme").await;
    let globex_id = seed_organization(&app.state.db, "Globex").await;
    let tender = create_tender(&app, acme_id, "alice").await;
    let tender_id = tender["id"].as_str().unwrap();

    let response = app
        .patch_json(
            &format!("/api/v1/tenders/{}/edit?username=alice", tender_id),
            json!({"organization_id": globex_id}),
        )
        .await;

    response.assert_forbidden();
    assert_eq!(response.error_code(), "not_responsible_for_new_org");

    let listed: Vec<serde_json::Value> = app.get("/api/v1/tenders").await.json();
    assert_eq!(listed[0]["organization_id"], json!(acme_id));
    assert_eq!(listed[0]["version"], 1);
}

#[tokio::test]
async fn test_edit_move_to_org_with_responsibility() {
    let app = TestApp::new().await;
    let (alice_id, acme_id) = seed_responsible_employee(&app.state.db, "alice", "Acme").await;
    let globex_id = seed_organization(&app.state.db, "Globex").await;
    seed_responsibility(&app.state.db, alice_id, globex_id).await;
    let tender = create_tender(&app, acme_id, "alice").await;

    let response = app
        .patch_json(
            &format!("/api/v1/tenders/{}/edit?username=alice", tender["id"].as_str().unwrap()),
            json!({"organization_id": globex_id}),
        )
        .await;

    response.assert_ok();
    let updated: serde_json::Value = response.json();
    assert_eq!(updated["organization_id"], json!(globex_id));
    assert_eq!(updated["version"], 2);
}

#[tokio::test]
async fn test_edit_hand_over_to_creator_without_responsibility() {
    // bob is not responsible for the tender's current organization
    let app = TestApp::new().await;
    let (_, acme_id) = seed_responsible_employee(&app.state.db, "alice", "Acme").await;
    seed_employee(&app.state.db, "bob").await;
    let tender = create_tender(&app, acme_id, "alice").await;

    let response = app
        .patch_json(
            &format!("/api/v1/tenders/{}/edit?username=alice", tender["id"].as_str().unwrap()),
            json!({"creator_username": "bob"}),
        )
        .await;

    response.assert_forbidden();
    assert_eq!(response.error_code(), "not_responsible_for_current_org");
}

#[tokio::test]
async fn test_status_endpoints() {
    let app = TestApp::new().await;
    let (_, org_id) = seed_responsible_employee(&app.state.db, "alice", "Acme").await;
    let tender = create_tender(&app, org_id, "alice").await;
    let tender_id = tender["id"].as_str().unwrap();

    let response = app.get(&format!("/api/v1/tenders/{}/status", tender_id)).await;
    response.assert_ok();
    assert_eq!(response.json::<String>(), "CREATED");

    let response = app
        .put(&format!(
            "/api/v1/tenders/{}/status?status=PUBLISHED&username=alice",
            tender_id
        ))
        .await;
    response.assert_ok();
    let updated: serde_json::Value = response.json();
    assert_eq!(updated["status"], "PUBLISHED");
    assert_eq!(updated["version"], 2);
}

#[tokio::test]
async fn test_closed_tender_cannot_return_to_created() {
    let app = TestApp::new().await;
    let (_, org_id) = seed_responsible_employee(&app.state.db, "alice", "Acme").await;
    let tender = create_tender(&app, org_id, "alice").await;
    let tender_id = tender["id"].as_str().unwrap();

    app.put(&format!(
        "/api/v1/tenders/{}/status?status=CLOSED&username=alice",
        tender_id
    ))
    .await
    .assert_ok();

    let response = app
        .patch_json(
            &format!("/api/v1/tenders/{}/edit?username=alice", tender_id),
            json!({"status": "CREATED"}),
        )
        .await;

    response.assert_conflict();
    assert_eq!(response.error_code(), "forbidden_status_transition");

    let response = app.get(&format!("/api/v1/tenders/{}/status", tender_id)).await;
    assert_eq!(response.json::<String>(), "CLOSED");
}

#[tokio::test]
async fn test_rollback_round_trip() {
    let app = TestApp::new().await;
    let (_, org_id) = seed_responsible_employee(&app.state.db, "alice", "Acme").await;
    let tender = create_tender(&app, org_id, "alice").await;
    let tender_id = tender["id"].as_str().unwrap();

    app.patch_json(
        &format!("/api/v1/tenders/{}/edit?username=alice", tender_id),
        json!({"name": "Renamed", "status": "PUBLISHED"}),
    )
    .await
    .assert_ok();

    let response = app
        .put(&format!(
            "/api/v1/tenders/{}/rollback/1?username=alice",
            tender_id
        ))
        .await;

    response.assert_ok();
    let restored: serde_json::Value = response.json();

    // original fields are back; the version counter moves forward
    assert_eq!(restored["name"], tender["name"]);
    assert_eq!(restored["status"], "CREATED");
    assert_eq!(restored["version"], 3);
}

#[tokio::test]
async fn test_rollback_missing_version() {
    let app = TestApp::new().await;
    let (_, org_id) = seed_responsible_employee(&app.state.db, "alice", "Acme").await;
    let tender = create_tender(&app, org_id, "alice").await;
    let tender_id = tender["id"].as_str().unwrap();

    let response = app
        .put(&format!(
            "/api/v1/tenders/{}/rollback/42?username=alice",
            tender_id
        ))
        .await;

    response.assert_not_found();
    assert_eq!(response.error_code(), "tender_version_not_found");

    // current state is untouched
    let listed: Vec<serde_json::Value> = app.get("/api/v1/tenders").await.json();
    assert_eq!(listed[0]["version"], 1);
}

#[tokio::test]
async fn test_rollback_requires_owner() {
    let app = TestApp::new().await;
    let (_, org_id) = seed_responsible_employee(&app.state.db, "alice", "Acme").await;
    seed_employee(&app.state.db, "bob").await;
    let tender = create_tender(&app, org_id, "alice").await;

    let response = app
        .put(&format!(
            "/api/v1/tenders/{}/rollback/1?username=bob",
            tender["id"].as_str().unwrap()
        ))
        .await;

    response.assert_forbidden();
    assert_eq!(response.error_code(), "not_tender_owner");
}
