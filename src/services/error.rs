//! Tender engine error taxonomy
//!
//! Every failed check aborts the whole mutation with exactly one of these;
//! the engine performs no retries and writes nothing on failure. The HTTP
//! layer maps variants to status codes; `code()` gives the stable tag
//! surfaced in error bodies.

use thiserror::Error;
use uuid::Uuid;

use crate::models::TenderStatus;

/// Which creator/organization pairing a responsibility check ran against
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponsibilityScope {
    /// Creator vs. organization at tender creation
    AtCreation,
    /// Incoming creator vs. the tender's current organization
    CurrentOrganization,
    /// Creator (current or incoming) vs. the incoming organization
    NewOrganization,
}

#[derive(Debug, Error)]
pub enum TenderError {
    #[error("tender {0} not found")]
    TenderNotFound(Uuid),

    #[error("employee '{0}' not found")]
    EmployeeNotFound(String),

    #[error("organization {0} not found")]
    OrganizationNotFound(Uuid),

    #[error("version {version} not found for tender {tender_id}")]
    VersionNotFound { tender_id: Uuid, version: i32 },

    /// Acting user is not the tender's creator
    #[error("user '{username}' may not modify tender {tender_id}")]
    NotTenderOwner { username: String, tender_id: Uuid },

    #[error("employee '{username}' is not responsible for organization {organization_id}")]
    NotResponsible {
        username: String,
        organization_id: Uuid,
        scope: ResponsibilityScope,
    },

    #[error("unknown tender status '{0}'")]
    UnknownStatus(String),

    #[error("tender status cannot change from {from} to {to}")]
    ForbiddenTransition {
        from: TenderStatus,
        to: TenderStatus,
    },

    #[error("a new tender must start as {expected}, got {requested}")]
    InvalidInitialStatus {
        expected: TenderStatus,
        requested: TenderStatus,
    },

    /// Storage backend fault (not a business-rule rejection)
    #[error(transparent)]
    Store(#[from] anyhow::Error),
}

impl TenderError {
    /// Stable error tag for programmatic handling
    pub fn code(&self) -> &'static str {
        match self {
            TenderError::TenderNotFound(_) => "tender_not_found",
            TenderError::EmployeeNotFound(_) => "employee_not_found",
            TenderError::OrganizationNotFound(_) => "organization_not_found",
            TenderError::VersionNotFound { .. } => "tender_version_not_found",
            TenderError::NotTenderOwner { .. } => "not_tender_owner",
            TenderError::NotResponsible { scope, .. } => match scope {
                ResponsibilityScope::AtCreation => "not_responsible_for_organization",
                ResponsibilityScope::CurrentOrganization => "not_responsible_for_current_org",
                ResponsibilityScope::NewOrganization => "not_responsible_for_new_org",
            },
            TenderError::UnknownStatus(_) => "unknown_status",
            TenderError::ForbiddenTransition { .. } => "forbidden_status_transition",
            TenderError::InvalidInitialStatus { .. } => "invalid_initial_status",
            TenderError::Store(_) => "storage_error",
        }
    }
}
