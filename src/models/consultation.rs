//! Consultation value objects.
//!
//! A consultation occupies a scheduling slot identified by the literal
//! `(date, hour)` string pair. Both fields are opaque text: no calendar
//! normalization or time-zone handling is applied anywhere in the backend,
//! and slot uniqueness is enforced on the exact pair.

use serde::{Deserialize, Serialize};

use crate::api::{ConsultationId, PatientId};

/// A scheduled consultation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Consultation {
    /// Database ID (storage-assigned)
    pub id: ConsultationId,
    /// Calendar date, as provided by the caller
    pub date: String,
    /// Time of day, as provided by the caller
    pub hour: String,
    /// Reference to the patient this consultation is for.
    ///
    /// Non-owning back-reference; the rule layer does not verify the patient
    /// exists. The Postgres schema enforces it with a foreign key.
    pub patient_id: PatientId,
    /// Medical specialty of the consultation
    pub specialty: String,
}

/// Payload for scheduling a new consultation.
///
/// `patient_id` is carried as a raw integer here: the rule layer treats
/// zero as "absent" when validating, and only wraps it into [`PatientId`]
/// once the payload passes validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewConsultation {
    pub date: String,
    pub hour: String,
    pub patient_id: i64,
    pub specialty: String,
}

impl NewConsultation {
    pub fn new(
        date: impl Into<String>,
        hour: impl Into<String>,
        patient_id: i64,
        specialty: impl Into<String>,
    ) -> Self {
        Self {
            date: date.into(),
            hour: hour.into(),
            patient_id,
            specialty: specialty.into(),
        }
    }
}

/// Partial update for an existing consultation.
///
/// `None` fields are left unchanged by the storage layer. No slot collision
/// re-check is performed on update.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsultationUpdate {
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub hour: Option<String>,
    #[serde(default)]
    pub patient_id: Option<i64>,
    #[serde(default)]
    pub specialty: Option<String>,
}

impl ConsultationUpdate {
    /// True when no field would change.
    pub fn is_empty(&self) -> bool {
        self.date.is_none()
            && self.hour.is_none()
            && self.patient_id.is_none()
            && self.specialty.is_none()
    }
}
