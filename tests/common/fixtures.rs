//! Test fixtures for common test data
//!
//! Seeds employees, organizations and responsibility links directly into a
//! test database; the engine treats these as read-only directory data.

use chrono::Utc;
use uuid::Uuid;

use tender_api::DbPool;

/// Insert an employee and return its id
pub async fn seed_employee(db: &DbPool, username: &str) -> Uuid {
    let id = Uuid::new_v4();
    sqlx::query(
        r#"
        INSERT INTO employees (id, username, first_name, last_name, created_at)
        VALUES (?, ?, ?, ?, ?)
        "#,
    )
    .bind(id.to_string())
    .bind(username)
    .bind("Test")
    .bind("Employee")
    .bind(Utc::now().to_rfc3339())
    .execute(db)
    .await
    .expect("Failed to seed employee");
    id
}

/// Insert an organization and return its id
pub async fn seed_organization(db: &DbPool, name: &str) -> Uuid {
    let id = Uuid::new_v4();
    sqlx::query(
        r#"
        INSERT INTO organizations (id, name, description, organization_type, created_at)
        VALUES (?, ?, ?, ?, ?)
        "#,
    )
    .bind(id.to_string())
    .bind(name)
    .bind("Test organization")
    .bind("LLC")
    .bind(Utc::now().to_rfc3339())
    .execute(db)
    .await
    .expect("Failed to seed organization");
    id
}

/// Record that an employee is responsible for an organization
pub async fn seed_responsibility(db: &DbPool, employee_id: Uuid, organization_id: Uuid) {
    sqlx::query(
        r#"
        INSERT INTO organization_responsibles (organization_id, employee_id)
        VALUES (?, ?)
        "#,
    )
    .bind(organization_id.to_string())
    .bind(employee_id.to_string())
    .execute(db)
    .await
    .expect("Failed to seed responsibility link");
}

/// Seed one employee responsible for one organization; returns
/// (employee_id, organization_id)
pub async fn seed_responsible_employee(
    db: &DbPool,
    username: &str,
    organization_name: &str,
) -> (Uuid, Uuid) {
    let employee_id = seed_employee(db, username).await;
    let organization_id = seed_organization(db, organization_name).await;
    seed_responsibility(db, employee_id, organization_id).await;
    (employee_id, organization_id)
}

/// A well-formed create payload for tests
pub fn tender_payload(organization_id: Uuid, creator_username: &str) -> serde_json::Value {
    serde_json::json!({
        "name": "Office supplies",
        "description": "Paper and pens",
        "service_type": "Delivery",
        "status": "CREATED",
        "organization_id": organization_id,
        "creator_username": creator_username,
    })
}
