//! Service layer for business rules.
//!
//! This module contains the business-rule services that sit between the HTTP
//! boundary and the repository layer. Services enforce uniqueness and
//! existence invariants before delegating to storage, and translate
//! "not found" and "duplicate" conditions into typed client errors.
//!
//! The checks here are best-effort check-then-act sequences with no
//! transaction around them; the storage schema's unique constraints are the
//! authoritative backstop for races.

pub mod consultation;
pub mod patient;

pub use consultation::ConsultationService;
pub use patient::PatientService;

use std::fmt;

use crate::db::repository::RepositoryError;

/// Result type for service operations.
pub type ServiceResult<T> = Result<T, ServiceError>;

/// Stable user-facing messages for business-rule violations.
///
/// Callers (and the reference frontend) discriminate error kinds by this
/// text, so the strings must not change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationMessage {
    /// A required field was missing on consultation creation.
    EmptyInput,
    /// Patient creation with an already-registered telephone.
    DuplicateTelephone,
    /// Consultation creation with a `(date, hour)` slot already taken.
    AlreadyChosenSlot,
    /// "List all patients" on an empty collection.
    NotFoundPatients,
    /// Read/delete against an absent patient record.
    NotFoundPatient,
    /// Consultation lookups with no matching record, or an empty collection.
    NotFoundConsultations,
}

impl ValidationMessage {
    /// The user-facing message text.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::EmptyInput => "É necessário preecher todos os campos.",
            Self::DuplicateTelephone => "Paciente já cadastrado!",
            Self::AlreadyChosenSlot => {
                "Já existe um agendamento nesse horário. Por favor, escolha outra data ou horário."
            }
            Self::NotFoundPatients => "Não foram encontrados pacientes cadastrados.",
            Self::NotFoundPatient => "Esse paciente não foi encontrado.",
            Self::NotFoundConsultations => "Não foram encontradas consultas marcadas.",
        }
    }
}

impl fmt::Display for ValidationMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error type for service operations.
///
/// Business-rule violations carry a [`ValidationMessage`] and propagate
/// unchanged to the boundary layer, which renders them as client errors.
/// Storage failures pass through untranslated.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// A business rule was violated.
    #[error("{0}")]
    Validation(ValidationMessage),

    /// The storage layer failed; not a rule violation.
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl ServiceError {
    /// Shorthand for constructing a rule violation.
    pub fn validation(message: ValidationMessage) -> Self {
        Self::Validation(message)
    }

    /// The validation message, when this is a rule violation.
    pub fn validation_message(&self) -> Option<ValidationMessage> {
        match self {
            Self::Validation(message) => Some(*message),
            Self::Repository(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_are_stable() {
        assert_eq!(
            ValidationMessage::DuplicateTelephone.to_string(),
            "Paciente já cadastrado!"
        );
        assert_eq!(
            ValidationMessage::EmptyInput.to_string(),
            "É necessário preecher todos os campos."
        );
        assert_eq!(
            ValidationMessage::AlreadyChosenSlot.to_string(),
            "Já existe um agendamento nesse horário. Por favor, escolha outra data ou horário."
        );
    }

    #[test]
    fn test_validation_message_accessor() {
        let err = ServiceError::validation(ValidationMessage::NotFoundPatient);
        assert_eq!(
            err.validation_message(),
            Some(ValidationMessage::NotFoundPatient)
        );

        let err = ServiceError::Repository(RepositoryError::internal("boom"));
        assert_eq!(err.validation_message(), None);
    }
}
