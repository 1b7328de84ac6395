//! Data Transfer Objects for the HTTP API.
//!
//! These DTOs are used for request/response serialization in the REST API.
//! Consultation fields use camelCase on the wire (`patientId`), matching the
//! frontend contract.

use serde::{Deserialize, Serialize};

use crate::api::{
    Consultation, ConsultationUpdate, NewConsultation, NewPatient, Patient, PatientUpdate,
};

/// Request body for registering a patient.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePatientRequest {
    pub name: String,
    pub telephone: String,
}

impl From<CreatePatientRequest> for NewPatient {
    fn from(request: CreatePatientRequest) -> Self {
        NewPatient {
            name: request.name,
            telephone: request.telephone,
        }
    }
}

/// Request body for partially updating a patient.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdatePatientRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub telephone: Option<String>,
}

impl From<UpdatePatientRequest> for PatientUpdate {
    fn from(request: UpdatePatientRequest) -> Self {
        PatientUpdate {
            name: request.name,
            telephone: request.telephone,
        }
    }
}

/// Patient representation in API responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatientDto {
    pub id: i64,
    pub telephone: String,
    pub name: String,
}

impl From<Patient> for PatientDto {
    fn from(patient: Patient) -> Self {
        Self {
            id: patient.id.value(),
            telephone: patient.telephone,
            name: patient.name,
        }
    }
}

/// Request body for scheduling a consultation.
///
/// Fields default to empty/zero when absent so that the rule layer can
/// answer with its own `EmptyInput` message instead of a bare
/// deserialization failure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateConsultationRequest {
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub hour: String,
    #[serde(default)]
    pub patient_id: i64,
    #[serde(default)]
    pub specialty: String,
}

impl From<CreateConsultationRequest> for NewConsultation {
    fn from(request: CreateConsultationRequest) -> Self {
        NewConsultation {
            date: request.date,
            hour: request.hour,
            patient_id: request.patient_id,
            specialty: request.specialty,
        }
    }
}

/// Request body for partially updating a consultation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateConsultationRequest {
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub hour: Option<String>,
    #[serde(default)]
    pub patient_id: Option<i64>,
    #[serde(default)]
    pub specialty: Option<String>,
}

impl From<UpdateConsultationRequest> for ConsultationUpdate {
    fn from(request: UpdateConsultationRequest) -> Self {
        ConsultationUpdate {
            date: request.date,
            hour: request.hour,
            patient_id: request.patient_id,
            specialty: request.specialty,
        }
    }
}

/// Consultation representation in API responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsultationDto {
    pub id: i64,
    pub date: String,
    pub hour: String,
    pub patient_id: i64,
    pub specialty: String,
}

impl From<Consultation> for ConsultationDto {
    fn from(consultation: Consultation) -> Self {
        Self {
            id: consultation.id.value(),
            date: consultation.date,
            hour: consultation.hour,
            patient_id: consultation.patient_id.value(),
            specialty: consultation.specialty,
        }
    }
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Status of the service
    pub status: String,
    /// Version of the API
    pub version: String,
    /// Database connection status
    pub database: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{ConsultationId, PatientId};

    #[test]
    fn test_consultation_dto_uses_camel_case() {
        let dto = ConsultationDto::from(Consultation {
            id: ConsultationId::new(3),
            date: "2024-06-22".to_string(),
            hour: "10:00".to_string(),
            patient_id: PatientId::new(7),
            specialty: "Cardiology".to_string(),
        });

        let json = serde_json::to_value(&dto).unwrap();
        assert_eq!(json["patientId"], 7);
        assert_eq!(json["date"], "2024-06-22");
    }

    #[test]
    fn test_create_consultation_request_defaults_missing_fields() {
        // An absent field deserializes to its empty value, which the rule
        // layer rejects as EmptyInput.
        let request: CreateConsultationRequest =
            serde_json::from_str(r#"{"date": "2024-06-22"}"#).unwrap();
        assert_eq!(request.date, "2024-06-22");
        assert_eq!(request.hour, "");
        assert_eq!(request.patient_id, 0);
        assert_eq!(request.specialty, "");
    }
}
