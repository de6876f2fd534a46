//! Storage capability traits consumed by the tender engine
//!
//! The engine never talks SQL; it depends on these traits and receives a
//! concrete backend at construction time. [`crate::db::SqliteStore`] is the
//! production implementation; tests substitute in-memory fakes.

use anyhow::Result;
use async_trait::async_trait;
use uuid::Uuid;

use crate::models::{Employee, NewTender, Organization, Tender, TenderVersion};

/// Read/write access to tenders plus read-only entity lookups.
#[async_trait]
pub trait EntityStore: Send + Sync {
    async fn employee_by_username(&self, username: &str) -> Result<Option<Employee>>;

    async fn organization_by_id(&self, id: Uuid) -> Result<Option<Organization>>;

    async fn tender_by_id(&self, id: Uuid) -> Result<Option<Tender>>;

    /// Persist a new tender. The store assigns the id and timestamps, sets
    /// version 1 and appends snapshot #1 in the same transaction.
    async fn create_tender(&self, tender: &NewTender) -> Result<Tender>;

    /// Persist a tender's full field set (including its already-incremented
    /// version counter) and append the matching snapshot atomically.
    async fn update_tender(&self, tender: &Tender) -> Result<Tender>;

    async fn find_version(&self, tender_id: Uuid, version: i32) -> Result<Option<TenderVersion>>;

    /// List tenders, optionally filtered by exact service type
    async fn list_tenders(&self, service_type: Option<&str>) -> Result<Vec<Tender>>;

    async fn list_tenders_by_creator(&self, username: &str) -> Result<Vec<Tender>>;
}

/// Authorization relation between employees and organizations.
#[async_trait]
pub trait ResponsibilityStore: Send + Sync {
    /// Whether the employee is recorded as responsible for the organization
    async fn is_responsible(&self, employee_id: Uuid, organization_id: Uuid) -> Result<bool>;
}
