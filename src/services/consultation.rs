//! Consultation business rules.
//!
//! Guards the scheduling invariant: no two consultations may occupy the same
//! `(date, hour)` slot. The slot key is the literal string pair; there is no
//! calendar normalization and no overlap detection for adjacent intervals.

use std::sync::Arc;

use super::{ServiceError, ServiceResult, ValidationMessage};
use crate::api::{Consultation, ConsultationId, ConsultationUpdate, NewConsultation};
use crate::db::repository::ConsultationRepository;

/// Business-rule service for consultation scheduling.
#[derive(Clone)]
pub struct ConsultationService {
    repository: Arc<dyn ConsultationRepository>,
}

impl ConsultationService {
    /// Create a new service around a repository collaborator.
    pub fn new(repository: Arc<dyn ConsultationRepository>) -> Self {
        Self { repository }
    }

    /// Schedule a new consultation.
    ///
    /// Fails with `EmptyInput` when any field is absent or empty, before any
    /// storage access. Fails with `AlreadyChosenSlot` when the exact
    /// `(date, hour)` pair is already taken.
    ///
    /// `patient_id` is not verified against the patients collection here;
    /// referential integrity is left to the storage schema.
    pub async fn create(&self, input: NewConsultation) -> ServiceResult<Consultation> {
        if input.date.is_empty()
            || input.hour.is_empty()
            || input.specialty.is_empty()
            || input.patient_id == 0
        {
            return Err(ServiceError::validation(ValidationMessage::EmptyInput));
        }

        let existing = self
            .repository
            .get_consultations_by_date(&input.date, &input.hour)
            .await?;
        if existing.is_some() {
            return Err(ServiceError::validation(
                ValidationMessage::AlreadyChosenSlot,
            ));
        }

        let created = self.repository.create_consultation(&input).await?;
        Ok(created)
    }

    /// Retrieve all scheduled consultations.
    ///
    /// An empty collection is treated as an error condition, not a valid
    /// empty result.
    pub async fn get_all(&self) -> ServiceResult<Vec<Consultation>> {
        let consultations = self.repository.get_all_consultations().await?;
        if consultations.is_empty() {
            return Err(ServiceError::validation(
                ValidationMessage::NotFoundConsultations,
            ));
        }
        Ok(consultations)
    }

    /// Retrieve every consultation on a given date.
    ///
    /// Queries storage with an empty hour, which the repository treats as a
    /// wildcard. The repository signals "no match" on this path with `None`
    /// rather than an empty list.
    pub async fn get_by_date(&self, date: &str) -> ServiceResult<Vec<Consultation>> {
        let hour = "";
        let consultations = self
            .repository
            .get_consultations_by_date(date, hour)
            .await?;
        consultations
            .ok_or_else(|| ServiceError::validation(ValidationMessage::NotFoundConsultations))
    }

    /// Retrieve a consultation by id.
    pub async fn get_by_id(&self, id: i64) -> ServiceResult<Consultation> {
        let id = ConsultationId::new(id);
        let consultation = self.repository.get_consultation_by_id(id).await?;
        consultation
            .ok_or_else(|| ServiceError::validation(ValidationMessage::NotFoundConsultations))
    }

    /// Apply a partial update to a consultation.
    ///
    /// Delegates to storage unconditionally: the slot is not re-checked for
    /// collisions on update.
    pub async fn update(
        &self,
        id: i64,
        update: ConsultationUpdate,
    ) -> ServiceResult<Consultation> {
        let id = ConsultationId::new(id);
        let updated = self.repository.update_consultation(id, &update).await?;
        Ok(updated)
    }

    /// Remove a consultation by id.
    ///
    /// Unlike patient deletion there is no existence pre-check: removing an
    /// absent id is a storage-level no-op.
    pub async fn delete(&self, id: i64) -> ServiceResult<()> {
        let id = ConsultationId::new(id);
        self.repository.delete_consultation(id).await?;
        Ok(())
    }
}
