//! Tender model and its lifecycle statuses

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Lifecycle status of a tender
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TenderStatus {
    /// Pre-publication draft, the only legal initial status
    Created,
    Published,
    Closed,
}

impl TenderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TenderStatus::Created => "CREATED",
            TenderStatus::Published => "PUBLISHED",
            TenderStatus::Closed => "CLOSED",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "CREATED" => Some(TenderStatus::Created),
            "PUBLISHED" => Some(TenderStatus::Published),
            "CLOSED" => Some(TenderStatus::Closed),
            _ => None,
        }
    }

    pub fn all() -> &'static [TenderStatus] {
        &[
            TenderStatus::Created,
            TenderStatus::Published,
            TenderStatus::Closed,
        ]
    }
}

impl std::fmt::Display for TenderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tender {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub service_type: String,
    pub status: TenderStatus,
    pub organization_id: Uuid,
    pub creator_username: String,
    /// Current version number; incremented on every successful mutation
    pub version: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Immutable snapshot of a tender's fields at one version.
///
/// One row is appended per successful mutation (create = version 1) and is
/// never updated afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TenderVersion {
    pub tender_id: Uuid,
    pub version: i32,
    pub name: String,
    pub description: String,
    pub service_type: String,
    pub status: TenderStatus,
    pub organization_id: Uuid,
    pub creator_username: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateTenderRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(length(max = 500))]
    #[serde(default)]
    pub description: String,
    #[validate(length(min = 1, max = 100))]
    pub service_type: String,
    /// Candidate status string; the engine requires it to parse to CREATED
    pub status: String,
    pub organization_id: Uuid,
    #[validate(length(min = 1, max = 50))]
    pub creator_username: String,
}

/// Sparse patch: absent fields are left unchanged
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateTenderRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,
    #[validate(length(max = 500))]
    pub description: Option<String>,
    #[validate(length(min = 1, max = 100))]
    pub service_type: Option<String>,
    /// Candidate status string, validated by the engine rather than serde
    pub status: Option<String>,
    pub organization_id: Option<Uuid>,
    #[validate(length(min = 1, max = 50))]
    pub creator_username: Option<String>,
}

impl UpdateTenderRequest {
    /// True when the patch carries no fields at all
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.service_type.is_none()
            && self.status.is_none()
            && self.organization_id.is_none()
            && self.creator_username.is_none()
    }
}

/// Validated create payload as handed to the store; the store assigns the
/// id, timestamps and version number.
#[derive(Debug, Clone)]
pub struct NewTender {
    pub name: String,
    pub description: String,
    pub service_type: String,
    pub status: TenderStatus,
    pub organization_id: Uuid,
    pub creator_username: String,
}
