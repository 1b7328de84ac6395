//! Patient repository trait for CRUD and lookup operations.
//!
//! Read operations return absence values (`None`) for missing records; only
//! genuine storage failures produce errors. Mapping a raw storage row to a
//! [`Patient`] value object is this layer's only transformation.

use async_trait::async_trait;

use super::error::RepositoryResult;
use crate::api::{NewPatient, Patient, PatientId, PatientUpdate};

/// Repository trait for patient database operations.
///
/// # Thread Safety
/// Implementations must be `Send + Sync` to work with async Rust.
#[async_trait]
pub trait PatientRepository: Send + Sync {
    /// Store a new patient.
    ///
    /// Uniqueness of `telephone` is NOT checked here; the business-rule layer
    /// pre-checks it, and the storage schema is the authoritative backstop.
    ///
    /// # Returns
    /// * `Ok(Patient)` - The stored patient including its assigned ID
    /// * `Err(RepositoryError)` - If the operation fails
    async fn create_patient(&self, input: &NewPatient) -> RepositoryResult<Patient>;

    /// Retrieve all patients, ordered by ID.
    async fn get_all_patients(&self) -> RepositoryResult<Vec<Patient>>;

    /// Retrieve a patient by ID.
    ///
    /// # Returns
    /// * `Ok(Some(Patient))` - The patient, if present
    /// * `Ok(None)` - If no record matches
    async fn get_patient_by_id(&self, id: PatientId) -> RepositoryResult<Option<Patient>>;

    /// Retrieve a patient by telephone number.
    ///
    /// # Returns
    /// * `Ok(Some(Patient))` - The first patient registered with `telephone`
    /// * `Ok(None)` - If no record matches
    async fn get_patient_by_telephone(&self, telephone: &str)
        -> RepositoryResult<Option<Patient>>;

    /// Apply a partial update to an existing patient.
    ///
    /// `None` fields are left unchanged.
    ///
    /// # Returns
    /// * `Ok(Patient)` - The updated, re-mapped record
    /// * `Err(RepositoryError::NotFound)` - If the patient doesn't exist
    async fn update_patient(
        &self,
        id: PatientId,
        update: &PatientUpdate,
    ) -> RepositoryResult<Patient>;

    /// Delete a patient by ID.
    ///
    /// # Returns
    /// * `Ok(n)` - Number of rows removed (0 when the id was absent)
    async fn delete_patient(&self, id: PatientId) -> RepositoryResult<u64>;
}
