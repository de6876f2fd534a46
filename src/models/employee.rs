//! Employee model
//!
//! Employees are read-only for the tender engine; rows are provisioned
//! out of band (seed data or an external directory sync).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Employee {
    pub id: Uuid,
    /// Unique, used as the external identifier in API calls
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub created_at: DateTime<Utc>,
}
