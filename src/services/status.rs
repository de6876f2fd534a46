//! Tender status transition policy
//!
//! The policy is a plain adjacency structure over forbidden edges so it can
//! be unit-tested independently of the mutation engine. CREATED is a
//! pre-publication draft state: once a tender is PUBLISHED or CLOSED it must
//! never return to CREATED. Every other pair, self-transitions included, is
//! allowed.

use crate::models::TenderStatus;
use crate::services::error::TenderError;

pub struct TransitionPolicy {
    forbidden: Vec<(TenderStatus, TenderStatus)>,
}

impl Default for TransitionPolicy {
    fn default() -> Self {
        Self {
            forbidden: vec![
                (TenderStatus::Published, TenderStatus::Created),
                (TenderStatus::Closed, TenderStatus::Created),
            ],
        }
    }
}

impl TransitionPolicy {
    /// Policy with an explicit forbidden-edge set
    pub fn with_forbidden(forbidden: Vec<(TenderStatus, TenderStatus)>) -> Self {
        Self { forbidden }
    }

    /// Whether the status graph permits `from -> to`
    pub fn allows(&self, from: TenderStatus, to: TenderStatus) -> bool {
        !self.forbidden.contains(&(from, to))
    }

    /// Parse a candidate status string, rejecting anything outside the
    /// declared status set.
    pub fn parse_status(candidate: &str) -> Result<TenderStatus, TenderError> {
        TenderStatus::from_str(candidate)
            .ok_or_else(|| TenderError::UnknownStatus(candidate.to_string()))
    }
}
