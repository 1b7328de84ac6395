//! Consultation repository trait for CRUD and lookup operations.

use async_trait::async_trait;

use super::error::RepositoryResult;
use crate::api::{Consultation, ConsultationId, ConsultationUpdate, NewConsultation};

/// Repository trait for consultation database operations.
///
/// # Thread Safety
/// Implementations must be `Send + Sync` to work with async Rust.
#[async_trait]
pub trait ConsultationRepository: Send + Sync {
    /// Store a new consultation.
    ///
    /// Slot uniqueness is NOT checked here; the business-rule layer
    /// pre-checks the `(date, hour)` pair, and the storage schema is the
    /// authoritative backstop.
    async fn create_consultation(&self, input: &NewConsultation)
        -> RepositoryResult<Consultation>;

    /// Retrieve all consultations, ordered by ID.
    async fn get_all_consultations(&self) -> RepositoryResult<Vec<Consultation>>;

    /// Retrieve a consultation by ID.
    async fn get_consultation_by_id(
        &self,
        id: ConsultationId,
    ) -> RepositoryResult<Option<Consultation>>;

    /// Retrieve consultations matching a `(date, hour)` slot.
    ///
    /// An empty `hour` acts as a wildcard: every consultation on `date`
    /// matches, whatever its hour. A non-empty `hour` matches the exact pair.
    ///
    /// # Returns
    /// * `Ok(Some(consultations))` - At least one record matched
    /// * `Ok(None)` - Nothing matched. This is a sentinel, deliberately
    ///   distinct from an empty list; callers of the by-date query path rely
    ///   on the distinction.
    async fn get_consultations_by_date(
        &self,
        date: &str,
        hour: &str,
    ) -> RepositoryResult<Option<Vec<Consultation>>>;

    /// Apply a partial update to an existing consultation.
    ///
    /// `None` fields are left unchanged.
    ///
    /// # Returns
    /// * `Ok(Consultation)` - The updated, re-mapped record
    /// * `Err(RepositoryError::NotFound)` - If the consultation doesn't exist
    async fn update_consultation(
        &self,
        id: ConsultationId,
        update: &ConsultationUpdate,
    ) -> RepositoryResult<Consultation>;

    /// Delete a consultation by ID.
    ///
    /// # Returns
    /// * `Ok(n)` - Number of rows removed (0 when the id was absent)
    async fn delete_consultation(&self, id: ConsultationId) -> RepositoryResult<u64>;
}
