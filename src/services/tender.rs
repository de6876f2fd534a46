//! Tender mutation engine
//!
//! Orchestrates creation, partial edit and rollback. The engine decides
//! which cross-entity checks a mutation needs from which fields the patch
//! touches, and leaves the persisted state internally consistent: the
//! creator always exists, the organization always exists, and the creator
//! is responsible for whichever organization the tender ends up under.
//!
//! Collaborators (entity store, responsibility store, transition policy)
//! are injected at construction; the engine holds no ambient state.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use crate::db::{EntityStore, ResponsibilityStore};
use crate::models::{
    CreateTenderRequest, Employee, NewTender, Organization, Tender, TenderStatus,
    UpdateTenderRequest,
};
use crate::services::error::{ResponsibilityScope, TenderError};
use crate::services::responsibility::ResponsibilityValidator;
use crate::services::status::TransitionPolicy;

/// How a patch changes the tender's creator/organization pairing.
///
/// Closed enumeration of the four combinations; `classify` is total over
/// any patch, so no combination can fall through unhandled.
#[derive(Debug)]
enum OwnershipChange<'a> {
    Unchanged,
    NewCreator(&'a str),
    NewOrganization(Uuid),
    Both {
        creator: &'a str,
        organization: Uuid,
    },
}

impl<'a> OwnershipChange<'a> {
    fn classify(patch: &'a UpdateTenderRequest) -> Self {
        match (patch.creator_username.as_deref(), patch.organization_id) {
            (None, None) => OwnershipChange::Unchanged,
            (Some(creator), None) => OwnershipChange::NewCreator(creator),
            (None, Some(organization)) => OwnershipChange::NewOrganization(organization),
            (Some(creator), Some(organization)) => OwnershipChange::Both {
                creator,
                organization,
            },
        }
    }
}

pub struct TenderService {
    store: Arc<dyn EntityStore>,
    responsibility: ResponsibilityValidator,
    transitions: TransitionPolicy,
}

impl TenderService {
    pub fn new(
        store: Arc<dyn EntityStore>,
        responsibility_store: Arc<dyn ResponsibilityStore>,
    ) -> Self {
        Self::with_policy(store, responsibility_store, TransitionPolicy::default())
    }

    pub fn with_policy(
        store: Arc<dyn EntityStore>,
        responsibility_store: Arc<dyn ResponsibilityStore>,
        transitions: TransitionPolicy,
    ) -> Self {
        Self {
            store,
            responsibility: ResponsibilityValidator::new(responsibility_store),
            transitions,
        }
    }

    /// Create a tender.
    ///
    /// Check order is fixed: creator existence, organization existence,
    /// responsibility, then status semantics. Identity failures must not be
    /// reachable through a status error.
    pub async fn create(&self, req: CreateTenderRequest) -> Result<Tender, TenderError> {
        let employee = self.employee(&req.creator_username).await?;
        let organization = self.organization(req.organization_id).await?;
        self.responsibility
            .check(&employee, organization.id, ResponsibilityScope::AtCreation)
            .await?;

        let status = TransitionPolicy::parse_status(&req.status)?;
        if status != TenderStatus::Created {
            return Err(TenderError::InvalidInitialStatus {
                expected: TenderStatus::Created,
                requested: status,
            });
        }

        let tender = self
            .store
            .create_tender(&NewTender {
                name: req.name,
                description: req.description,
                service_type: req.service_type,
                status,
                organization_id: organization.id,
                creator_username: employee.username,
            })
            .await?;

        info!(tender_id = %tender.id, creator = %tender.creator_username, "tender created");
        Ok(tender)
    }

    /// Apply a sparse patch to a tender.
    ///
    /// Responsibility is re-verified against the creator/organization
    /// pairing that will hold after the patch, using the unchanged side
    /// when only one side moves.
    pub async fn edit(
        &self,
        tender_id: Uuid,
        patch: UpdateTenderRequest,
        acting_username: &str,
    ) -> Result<Tender, TenderError> {
        let mut tender = self.load(tender_id).await?;
        self.require_owner(&tender, acting_username)?;

        match OwnershipChange::classify(&patch) {
            OwnershipChange::Unchanged => {}
            OwnershipChange::NewCreator(creator) => {
                let employee = self.employee(creator).await?;
                self.responsibility
                    .check(
                        &employee,
                        tender.organization_id,
                        ResponsibilityScope::CurrentOrganization,
                    )
                    .await?;
            }
            OwnershipChange::NewOrganization(organization_id) => {
                let organization = self.organization(organization_id).await?;
                // current creator is resolved fresh from the store, not
                // trusted from the loaded row
                let employee = self.employee(&tender.creator_username).await?;
                self.responsibility
                    .check(
                        &employee,
                        organization.id,
                        ResponsibilityScope::NewOrganization,
                    )
                    .await?;
            }
            OwnershipChange::Both {
                creator,
                organization,
            } => {
                let employee = self.employee(creator).await?;
                let organization = self.organization(organization).await?;
                self.responsibility
                    .check(
                        &employee,
                        organization.id,
                        ResponsibilityScope::NewOrganization,
                    )
                    .await?;
            }
        }

        let next_status = match patch.status.as_deref() {
            Some(candidate) => {
                let next = TransitionPolicy::parse_status(candidate)?;
                if !self.transitions.allows(tender.status, next) {
                    return Err(TenderError::ForbiddenTransition {
                        from: tender.status,
                        to: next,
                    });
                }
                Some(next)
            }
            None => None,
        };

        if let Some(name) = patch.name {
            tender.name = name;
        }
        if let Some(description) = patch.description {
            tender.description = description;
        }
        if let Some(service_type) = patch.service_type {
            tender.service_type = service_type;
        }
        if let Some(organization_id) = patch.organization_id {
            tender.organization_id = organization_id;
        }
        if let Some(creator_username) = patch.creator_username {
            tender.creator_username = creator_username;
        }
        if let Some(status) = next_status {
            tender.status = status;
        }
        tender.version += 1;

        let updated = self.store.update_tender(&tender).await?;
        info!(tender_id = %updated.id, version = updated.version, "tender updated");
        Ok(updated)
    }

    /// Restore a tender to a prior snapshot.
    ///
    /// The rollback is itself recorded as a new version; intervening
    /// history is never deleted. The snapshot's creator/organization
    /// pairing is restored verbatim and is not re-checked against today's
    /// responsibility links (see DESIGN.md).
    pub async fn rollback(
        &self,
        tender_id: Uuid,
        target_version: i32,
        acting_username: &str,
    ) -> Result<Tender, TenderError> {
        let mut tender = self.load(tender_id).await?;
        self.require_owner(&tender, acting_username)?;

        let snapshot = self
            .store
            .find_version(tender_id, target_version)
            .await?
            .ok_or(TenderError::VersionNotFound {
                tender_id,
                version: target_version,
            })?;

        tender.name = snapshot.name;
        tender.description = snapshot.description;
        tender.service_type = snapshot.service_type;
        tender.status = snapshot.status;
        tender.organization_id = snapshot.organization_id;
        tender.creator_username = snapshot.creator_username;
        tender.version += 1;

        let updated = self.store.update_tender(&tender).await?;
        info!(
            tender_id = %updated.id,
            restored_version = target_version,
            version = updated.version,
            "tender rolled back"
        );
        Ok(updated)
    }

    /// List tenders; `"all"` matches every service type, anything else
    /// filters by exact match. An empty result is an empty list, not an
    /// error.
    pub async fn list(&self, service_type: &str) -> Result<Vec<Tender>, TenderError> {
        let filter = if service_type == "all" {
            None
        } else {
            Some(service_type)
        };
        Ok(self.store.list_tenders(filter).await?)
    }

    /// Tenders authored by the employee; the username must resolve, zero
    /// tenders is an empty list.
    pub async fn list_for_employee(&self, username: &str) -> Result<Vec<Tender>, TenderError> {
        let employee = self.employee(username).await?;
        Ok(self
            .store
            .list_tenders_by_creator(&employee.username)
            .await?)
    }

    pub async fn status_of(&self, tender_id: Uuid) -> Result<TenderStatus, TenderError> {
        Ok(self.load(tender_id).await?.status)
    }

    async fn load(&self, tender_id: Uuid) -> Result<Tender, TenderError> {
        self.store
            .tender_by_id(tender_id)
            .await?
            .ok_or(TenderError::TenderNotFound(tender_id))
    }

    /// Edit rights are scoped to the tender's creator, independent of
    /// organization responsibility.
    fn require_owner(&self, tender: &Tender, acting_username: &str) -> Result<(), TenderError> {
        if tender.creator_username == acting_username {
            Ok(())
        } else {
            Err(TenderError::NotTenderOwner {
                username: acting_username.to_string(),
                tender_id: tender.id,
            })
        }
    }

    async fn employee(&self, username: &str) -> Result<Employee, TenderError> {
        self.store
            .employee_by_username(username)
            .await?
            .ok_or_else(|| TenderError::EmployeeNotFound(username.to_string()))
    }

    async fn organization(&self, id: Uuid) -> Result<Organization, TenderError> {
        self.store
            .organization_by_id(id)
            .await?
            .ok_or(TenderError::OrganizationNotFound(id))
    }
}
