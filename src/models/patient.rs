//! Patient value objects.
//!
//! Patients are immutable snapshots once loaded from storage; mutation always
//! round-trips through the repository layer.

use serde::{Deserialize, Serialize};

use crate::api::PatientId;

/// A registered patient.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Patient {
    /// Database ID (storage-assigned, immutable after creation)
    pub id: PatientId,
    /// Full name
    pub name: String,
    /// Contact telephone, unique across all patients
    pub telephone: String,
}

/// Payload for registering a new patient.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewPatient {
    pub name: String,
    pub telephone: String,
}

impl NewPatient {
    pub fn new(name: impl Into<String>, telephone: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            telephone: telephone.into(),
        }
    }
}

/// Partial update for an existing patient.
///
/// `None` fields are left unchanged by the storage layer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatientUpdate {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub telephone: Option<String>,
}

impl PatientUpdate {
    /// True when no field would change.
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.telephone.is_none()
    }
}
