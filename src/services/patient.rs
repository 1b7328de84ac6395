//! Patient business rules.
//!
//! Guards the patient invariants around an injected repository collaborator:
//! no two patients may share a telephone number, and reads of absent records
//! surface typed client errors instead of empty results.

use std::sync::Arc;

use super::{ServiceError, ServiceResult, ValidationMessage};
use crate::api::{NewPatient, Patient, PatientId, PatientUpdate};
use crate::db::repository::PatientRepository;

/// Business-rule service for patient management.
#[derive(Clone)]
pub struct PatientService {
    repository: Arc<dyn PatientRepository>,
}

impl PatientService {
    /// Create a new service around a repository collaborator.
    pub fn new(repository: Arc<dyn PatientRepository>) -> Self {
        Self { repository }
    }

    /// Register a new patient.
    ///
    /// Fails with `DuplicateTelephone` when a patient with the same telephone
    /// is already registered; otherwise delegates to storage and returns the
    /// stored representation including the assigned id.
    pub async fn create(&self, input: NewPatient) -> ServiceResult<Patient> {
        let existing = self
            .repository
            .get_patient_by_telephone(&input.telephone)
            .await?;
        if existing.is_some() {
            return Err(ServiceError::validation(
                ValidationMessage::DuplicateTelephone,
            ));
        }

        let created = self.repository.create_patient(&input).await?;
        Ok(created)
    }

    /// Retrieve all registered patients.
    ///
    /// An empty collection is treated as an error condition, not a valid
    /// empty result.
    pub async fn get_all(&self) -> ServiceResult<Vec<Patient>> {
        let patients = self.repository.get_all_patients().await?;
        if patients.is_empty() {
            return Err(ServiceError::validation(
                ValidationMessage::NotFoundPatients,
            ));
        }
        Ok(patients)
    }

    /// Retrieve a patient by id.
    pub async fn get_by_id(&self, id: i64) -> ServiceResult<Patient> {
        let id = PatientId::new(id);
        let patient = self.repository.get_patient_by_id(id).await?;
        patient.ok_or_else(|| ServiceError::validation(ValidationMessage::NotFoundPatient))
    }

    /// Apply a partial update to a patient.
    ///
    /// Delegates to storage unconditionally: telephone uniqueness is not
    /// re-validated on update.
    pub async fn update(&self, id: i64, update: PatientUpdate) -> ServiceResult<Patient> {
        let id = PatientId::new(id);
        let updated = self.repository.update_patient(id, &update).await?;
        Ok(updated)
    }

    /// Remove a patient by id.
    ///
    /// Fails with `NotFoundPatient` when the record is absent; no storage
    /// mutation happens in that case.
    pub async fn delete(&self, id: i64) -> ServiceResult<()> {
        let id = PatientId::new(id);
        let patient = self.repository.get_patient_by_id(id).await?;
        if patient.is_none() {
            return Err(ServiceError::validation(ValidationMessage::NotFoundPatient));
        }
        self.repository.delete_patient(id).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repositories::LocalRepository;

    fn service() -> (PatientService, Arc<LocalRepository>) {
        let repo = Arc::new(LocalRepository::new());
        (PatientService::new(repo.clone()), repo)
    }

    #[tokio::test]
    async fn test_create_assigns_id() {
        let (service, _) = service();

        let patient = service
            .create(NewPatient::new("John Doe", "123456789"))
            .await
            .unwrap();

        assert_eq!(patient.id, PatientId::new(1));
        assert_eq!(patient.name, "John Doe");
        assert_eq!(patient.telephone, "123456789");
    }

    #[tokio::test]
    async fn test_create_rejects_duplicate_telephone() {
        let (service, repo) = service();

        service
            .create(NewPatient::new("John Doe", "123456789"))
            .await
            .unwrap();

        let err = service
            .create(NewPatient::new("Jane Doe", "123456789"))
            .await
            .unwrap_err();

        assert_eq!(
            err.validation_message(),
            Some(ValidationMessage::DuplicateTelephone)
        );
        assert_eq!(err.to_string(), "Paciente já cadastrado!");
        assert_eq!(repo.patient_count(), 1);
    }

    #[tokio::test]
    async fn test_create_accepts_distinct_telephone() {
        let (service, _) = service();

        service
            .create(NewPatient::new("John Doe", "123456789"))
            .await
            .unwrap();
        let second = service
            .create(NewPatient::new("Jane Doe", "987654321"))
            .await
            .unwrap();

        assert_eq!(second.id, PatientId::new(2));
    }

    #[tokio::test]
    async fn test_get_all_empty_is_an_error() {
        let (service, _) = service();

        let err = service.get_all().await.unwrap_err();
        assert_eq!(
            err.validation_message(),
            Some(ValidationMessage::NotFoundPatients)
        );
    }

    #[tokio::test]
    async fn test_delete_missing_patient() {
        let (service, _) = service();

        let err = service.delete(42).await.unwrap_err();
        assert_eq!(
            err.validation_message(),
            Some(ValidationMessage::NotFoundPatient)
        );
    }
}
