//! Repository trait definitions for database operations.
//!
//! This module provides a collection of focused repository traits that abstract
//! database operations. By splitting responsibilities across per-entity traits,
//! implementations can be more focused and testable, and the business-rule
//! services can depend on exactly the collaborator they need.
//!
//! # Module Organization
//!
//! - [`error`]: Error types for repository operations
//! - [`patient`]: CRUD and lookup operations for patients
//! - [`consultation`]: CRUD and lookup operations for consultations
//!
//! # Trait Composition
//!
//! A complete repository implementation implements all traits:
//!
//! ```ignore
//! impl ConnectionCheck for MyRepo { ... }
//! impl PatientRepository for MyRepo { ... }
//! impl ConsultationRepository for MyRepo { ... }
//! ```
//!
//! For wiring that needs every capability, use the [`FullRepository`] trait
//! bound, which is implemented automatically for any such type.

pub mod consultation;
pub mod error;
pub mod patient;

// Re-export error types
pub use error::{ErrorContext, RepositoryError, RepositoryResult};

// Re-export all traits
pub use consultation::ConsultationRepository;
pub use patient::PatientRepository;

use async_trait::async_trait;

/// Connection health probe, shared by every backend.
#[async_trait]
pub trait ConnectionCheck: Send + Sync {
    /// Check if the storage connection is healthy.
    ///
    /// # Returns
    /// - `Ok(true)` if the connection is healthy
    /// - `Ok(false)` if the connection is unhealthy but no error occurred
    /// - `Err(RepositoryError)` if an error occurred during the check
    async fn health_check(&self) -> RepositoryResult<bool>;
}

/// Composite trait bound for a complete repository implementation.
///
/// This trait is automatically implemented for any type that implements
/// the connection probe and both entity repositories. Use this as a
/// convenient bound when you need access to all repository operations.
pub trait FullRepository: ConnectionCheck + PatientRepository + ConsultationRepository {}

// Blanket implementation: any type implementing all three traits automatically
// implements FullRepository
impl<T> FullRepository for T where T: ConnectionCheck + PatientRepository + ConsultationRepository {}
