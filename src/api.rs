//! Public API surface for the clinic backend.
//!
//! This file consolidates the identifier newtypes and re-exports the domain
//! value objects used across the repository, service and HTTP layers.
//! All types derive Serialize/Deserialize for JSON serialization.

pub use crate::models::Consultation;
pub use crate::models::ConsultationUpdate;
pub use crate::models::NewConsultation;
pub use crate::models::NewPatient;
pub use crate::models::Patient;
pub use crate::models::PatientUpdate;

use serde::{Deserialize, Serialize};

/// Patient identifier (database primary key).
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PatientId(pub i64);

/// Consultation identifier (database primary key).
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ConsultationId(pub i64);

impl PatientId {
    pub fn new(value: i64) -> Self {
        PatientId(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

impl ConsultationId {
    pub fn new(value: i64) -> Self {
        ConsultationId(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for PatientId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::fmt::Display for ConsultationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::{ConsultationId, PatientId};

    #[test]
    fn test_patient_id_new() {
        let id = PatientId::new(42);
        assert_eq!(id.value(), 42);
    }

    #[test]
    fn test_patient_id_equality() {
        let id1 = PatientId::new(100);
        let id2 = PatientId::new(100);
        let id3 = PatientId::new(101);

        assert_eq!(id1, id2);
        assert_ne!(id1, id3);
    }

    #[test]
    fn test_patient_id_ordering() {
        let id1 = PatientId::new(1);
        let id2 = PatientId::new(2);

        assert!(id1 < id2);
        assert!(id2 > id1);
    }

    #[test]
    fn test_consultation_id_display() {
        let id = ConsultationId::new(7);
        assert_eq!(id.to_string(), "7");
    }

    #[test]
    fn test_ids_serialize_transparently() {
        let json = serde_json::to_string(&PatientId::new(5)).unwrap();
        assert_eq!(json, "5");

        let id: ConsultationId = serde_json::from_str("9").unwrap();
        assert_eq!(id, ConsultationId::new(9));
    }
}
