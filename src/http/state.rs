//! Application state for the HTTP server.

use std::sync::Arc;

use crate::db::repository::{ConnectionCheck, FullRepository};
use crate::services::{ConsultationService, PatientService};

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Patient business-rule service
    pub patients: PatientService,
    /// Consultation business-rule service
    pub consultations: ConsultationService,
    /// Repository handle, kept for the health probe
    pub repository: Arc<dyn FullRepository>,
}

impl AppState {
    /// Create a new application state wiring both services to the given
    /// repository.
    pub fn new(repository: Arc<dyn FullRepository>) -> Self {
        Self {
            patients: PatientService::new(repository.clone()),
            consultations: ConsultationService::new(repository.clone()),
            repository,
        }
    }

    /// Probe the repository's connection health.
    pub async fn database_healthy(&self) -> bool {
        self.repository.health_check().await.unwrap_or(false)
    }
}
