//! Employee-organization responsibility checks
//!
//! Existence of the responsibility link is the sole authorization predicate
//! for acting on an organization's tenders.

use std::sync::Arc;

use uuid::Uuid;

use crate::db::ResponsibilityStore;
use crate::models::Employee;
use crate::services::error::{ResponsibilityScope, TenderError};

pub struct ResponsibilityValidator {
    store: Arc<dyn ResponsibilityStore>,
}

impl ResponsibilityValidator {
    pub fn new(store: Arc<dyn ResponsibilityStore>) -> Self {
        Self { store }
    }

    /// Verify the employee may act for the organization; the scope is
    /// carried into the error so callers can tell which pairing failed.
    pub async fn check(
        &self,
        employee: &Employee,
        organization_id: Uuid,
        scope: ResponsibilityScope,
    ) -> Result<(), TenderError> {
        if self
            .store
            .is_responsible(employee.id, organization_id)
            .await?
        {
            Ok(())
        } else {
            Err(TenderError::NotResponsible {
                username: employee.username.clone(),
                organization_id,
                scope,
            })
        }
    }
}
