//! In-memory local repository implementation.
//!
//! This module provides a local implementation of all repository traits
//! suitable for unit testing and local development. All data is stored in
//! memory using HashMap structures, providing fast, deterministic, and
//! isolated execution.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::api::{
    Consultation, ConsultationId, ConsultationUpdate, NewConsultation, NewPatient, Patient,
    PatientId, PatientUpdate,
};
use crate::db::repository::*;

/// In-memory local repository.
///
/// This implementation stores all data in memory using HashMaps, making it
/// ideal for unit tests and local development that need isolation and speed.
///
/// # Example
/// ```
/// use clinic_rust::db::repositories::LocalRepository;
///
/// let repo = LocalRepository::new();
/// assert_eq!(repo.patient_count(), 0);
/// ```
#[derive(Clone)]
pub struct LocalRepository {
    data: Arc<RwLock<LocalData>>,
}

struct LocalData {
    patients: HashMap<PatientId, Patient>,
    consultations: HashMap<ConsultationId, Consultation>,

    // ID counters
    next_patient_id: i64,
    next_consultation_id: i64,

    // Connection health
    is_healthy: bool,
}

impl Default for LocalData {
    fn default() -> Self {
        Self {
            patients: HashMap::new(),
            consultations: HashMap::new(),
            next_patient_id: 1,
            next_consultation_id: 1,
            is_healthy: true,
        }
    }
}

impl LocalRepository {
    /// Create a new empty local repository.
    pub fn new() -> Self {
        Self {
            data: Arc::new(RwLock::new(LocalData::default())),
        }
    }

    /// Set the health status for testing connection failures.
    pub fn set_healthy(&self, healthy: bool) {
        let mut data = self.data.write().unwrap();
        data.is_healthy = healthy;
    }

    /// Clear all data from the repository, keeping the health flag.
    pub fn clear(&self) {
        let mut data = self.data.write().unwrap();
        *data = LocalData {
            is_healthy: data.is_healthy,
            ..Default::default()
        };
    }

    /// Get the number of patients stored.
    pub fn patient_count(&self) -> usize {
        self.data.read().unwrap().patients.len()
    }

    /// Get the number of consultations stored.
    pub fn consultation_count(&self) -> usize {
        self.data.read().unwrap().consultations.len()
    }

    /// Helper to check health and return error if unhealthy.
    fn check_health(&self) -> RepositoryResult<()> {
        let data = self.data.read().unwrap();
        if !data.is_healthy {
            return Err(RepositoryError::connection("Database is not healthy"));
        }
        Ok(())
    }
}

impl Default for LocalRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ConnectionCheck for LocalRepository {
    async fn health_check(&self) -> RepositoryResult<bool> {
        let data = self.data.read().unwrap();
        Ok(data.is_healthy)
    }
}

// ==================== Patient Repository ====================

#[async_trait]
impl PatientRepository for LocalRepository {
    async fn create_patient(&self, input: &NewPatient) -> RepositoryResult<Patient> {
        self.check_health()?;

        let mut data = self.data.write().unwrap();
        let id = PatientId::new(data.next_patient_id);
        data.next_patient_id += 1;

        let patient = Patient {
            id,
            name: input.name.clone(),
            telephone: input.telephone.clone(),
        };
        data.patients.insert(id, patient.clone());

        Ok(patient)
    }

    async fn get_all_patients(&self) -> RepositoryResult<Vec<Patient>> {
        let data = self.data.read().unwrap();

        let mut patients: Vec<Patient> = data.patients.values().cloned().collect();
        patients.sort_by_key(|p| p.id);
        Ok(patients)
    }

    async fn get_patient_by_id(&self, id: PatientId) -> RepositoryResult<Option<Patient>> {
        let data = self.data.read().unwrap();
        Ok(data.patients.get(&id).cloned())
    }

    async fn get_patient_by_telephone(
        &self,
        telephone: &str,
    ) -> RepositoryResult<Option<Patient>> {
        let data = self.data.read().unwrap();

        let mut matches: Vec<&Patient> = data
            .patients
            .values()
            .filter(|p| p.telephone == telephone)
            .collect();
        matches.sort_by_key(|p| p.id);
        Ok(matches.first().map(|p| (*p).clone()))
    }

    async fn update_patient(
        &self,
        id: PatientId,
        update: &PatientUpdate,
    ) -> RepositoryResult<Patient> {
        let mut data = self.data.write().unwrap();

        let patient = data.patients.get_mut(&id).ok_or_else(|| {
            RepositoryError::not_found_with_context(
                format!("Patient {} not found", id),
                ErrorContext::new("update_patient")
                    .with_entity("patient")
                    .with_entity_id(id),
            )
        })?;

        if let Some(ref name) = update.name {
            patient.name = name.clone();
        }
        if let Some(ref telephone) = update.telephone {
            patient.telephone = telephone.clone();
        }

        Ok(patient.clone())
    }

    async fn delete_patient(&self, id: PatientId) -> RepositoryResult<u64> {
        let mut data = self.data.write().unwrap();
        let existed = data.patients.remove(&id).is_some();
        Ok(if existed { 1 } else { 0 })
    }
}

// ==================== Consultation Repository ====================

#[async_trait]
impl ConsultationRepository for LocalRepository {
    async fn create_consultation(
        &self,
        input: &NewConsultation,
    ) -> RepositoryResult<Consultation> {
        self.check_health()?;

        let mut data = self.data.write().unwrap();
        let id = ConsultationId::new(data.next_consultation_id);
        data.next_consultation_id += 1;

        let consultation = Consultation {
            id,
            date: input.date.clone(),
            hour: input.hour.clone(),
            patient_id: PatientId::new(input.patient_id),
            specialty: input.specialty.clone(),
        };
        data.consultations.insert(id, consultation.clone());

        Ok(consultation)
    }

    async fn get_all_consultations(&self) -> RepositoryResult<Vec<Consultation>> {
        let data = self.data.read().unwrap();

        let mut consultations: Vec<Consultation> =
            data.consultations.values().cloned().collect();
        consultations.sort_by_key(|c| c.id);
        Ok(consultations)
    }

    async fn get_consultation_by_id(
        &self,
        id: ConsultationId,
    ) -> RepositoryResult<Option<Consultation>> {
        let data = self.data.read().unwrap();
        Ok(data.consultations.get(&id).cloned())
    }

    async fn get_consultations_by_date(
        &self,
        date: &str,
        hour: &str,
    ) -> RepositoryResult<Option<Vec<Consultation>>> {
        let data = self.data.read().unwrap();

        // Empty hour is the wildcard: match every hour on the given date.
        let mut matches: Vec<Consultation> = data
            .consultations
            .values()
            .filter(|c| c.date == date && (hour.is_empty() || c.hour == hour))
            .cloned()
            .collect();

        if matches.is_empty() {
            return Ok(None);
        }

        matches.sort_by_key(|c| c.id);
        Ok(Some(matches))
    }

    async fn update_consultation(
        &self,
        id: ConsultationId,
        update: &ConsultationUpdate,
    ) -> RepositoryResult<Consultation> {
        let mut data = self.data.write().unwrap();

        let consultation = data.consultations.get_mut(&id).ok_or_else(|| {
            RepositoryError::not_found_with_context(
                format!("Consultation {} not found", id),
                ErrorContext::new("update_consultation")
                    .with_entity("consultation")
                    .with_entity_id(id),
            )
        })?;

        if let Some(ref date) = update.date {
            consultation.date = date.clone();
        }
        if let Some(ref hour) = update.hour {
            consultation.hour = hour.clone();
        }
        if let Some(patient_id) = update.patient_id {
            consultation.patient_id = PatientId::new(patient_id);
        }
        if let Some(ref specialty) = update.specialty {
            consultation.specialty = specialty.clone();
        }

        Ok(consultation.clone())
    }

    async fn delete_consultation(&self, id: ConsultationId) -> RepositoryResult<u64> {
        let mut data = self.data.write().unwrap();
        let existed = data.consultations.remove(&id).is_some();
        Ok(if existed { 1 } else { 0 })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_health_check() {
        let repo = LocalRepository::new();
        assert!(repo.health_check().await.unwrap());

        repo.set_healthy(false);
        assert!(!repo.health_check().await.unwrap());
    }

    #[tokio::test]
    async fn test_create_and_retrieve_patient() {
        let repo = LocalRepository::new();

        let stored = repo
            .create_patient(&NewPatient::new("John Doe", "123456789"))
            .await
            .unwrap();
        assert_eq!(stored.id, PatientId::new(1));

        let retrieved = repo.get_patient_by_id(stored.id).await.unwrap().unwrap();
        assert_eq!(retrieved, stored);
    }

    #[tokio::test]
    async fn test_patient_ids_are_sequential() {
        let repo = LocalRepository::new();

        let first = repo
            .create_patient(&NewPatient::new("A", "111"))
            .await
            .unwrap();
        let second = repo
            .create_patient(&NewPatient::new("B", "222"))
            .await
            .unwrap();

        assert_eq!(first.id, PatientId::new(1));
        assert_eq!(second.id, PatientId::new(2));
    }

    #[tokio::test]
    async fn test_get_patient_by_telephone() {
        let repo = LocalRepository::new();

        repo.create_patient(&NewPatient::new("A", "111"))
            .await
            .unwrap();

        let found = repo.get_patient_by_telephone("111").await.unwrap();
        assert!(found.is_some());

        let missing = repo.get_patient_by_telephone("999").await.unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn test_update_patient_partial() {
        let repo = LocalRepository::new();

        let stored = repo
            .create_patient(&NewPatient::new("A", "111"))
            .await
            .unwrap();

        let update = PatientUpdate {
            name: Some("B".to_string()),
            telephone: None,
        };
        let updated = repo.update_patient(stored.id, &update).await.unwrap();

        assert_eq!(updated.name, "B");
        assert_eq!(updated.telephone, "111");
    }

    #[tokio::test]
    async fn test_update_missing_patient_is_not_found() {
        let repo = LocalRepository::new();

        let result = repo
            .update_patient(PatientId::new(999), &PatientUpdate::default())
            .await;
        assert!(matches!(result, Err(RepositoryError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_delete_patient_returns_row_count() {
        let repo = LocalRepository::new();

        let stored = repo
            .create_patient(&NewPatient::new("A", "111"))
            .await
            .unwrap();

        assert_eq!(repo.delete_patient(stored.id).await.unwrap(), 1);
        assert_eq!(repo.delete_patient(stored.id).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_get_consultations_by_date_exact_and_wildcard() {
        let repo = LocalRepository::new();

        repo.create_consultation(&NewConsultation::new(
            "2024-06-22",
            "10:00",
            1,
            "Cardiology",
        ))
        .await
        .unwrap();
        repo.create_consultation(&NewConsultation::new(
            "2024-06-22",
            "11:00",
            2,
            "Dermatology",
        ))
        .await
        .unwrap();

        let exact = repo
            .get_consultations_by_date("2024-06-22", "10:00")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(exact.len(), 1);
        assert_eq!(exact[0].specialty, "Cardiology");

        let whole_day = repo
            .get_consultations_by_date("2024-06-22", "")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(whole_day.len(), 2);
    }

    #[tokio::test]
    async fn test_get_consultations_by_date_no_match_is_none() {
        let repo = LocalRepository::new();

        // The sentinel for this query path is None, not an empty Vec.
        let result = repo
            .get_consultations_by_date("2024-01-01", "")
            .await
            .unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_unhealthy_repository_rejects_writes() {
        let repo = LocalRepository::new();
        repo.set_healthy(false);

        let result = repo.create_patient(&NewPatient::new("A", "111")).await;
        assert!(matches!(
            result,
            Err(RepositoryError::ConnectionError { .. })
        ));
    }

    #[tokio::test]
    async fn test_clear() {
        let repo = LocalRepository::new();

        repo.create_patient(&NewPatient::new("A", "111"))
            .await
            .unwrap();
        repo.create_consultation(&NewConsultation::new("d", "h", 1, "s"))
            .await
            .unwrap();

        repo.clear();
        assert_eq!(repo.patient_count(), 0);
        assert_eq!(repo.consultation_count(), 0);
    }
}
