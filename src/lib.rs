//! # Clinic Rust Backend
//!
//! Clinic scheduling backend for patient and consultation management.
//!
//! This crate provides a Rust backend for a small clinic-scheduling system:
//! patients and consultations exposed through a REST CRUD API backed by a
//! relational database. The business-rule layer guards patient uniqueness
//! (no duplicate telephone numbers) and consultation scheduling (no
//! double-booking of a `(date, hour)` slot).
//!
//! ## Architecture
//!
//! The crate is organized into several logical modules:
//!
//! - [`api`]: Identifier newtypes and the public DTO surface
//! - [`models`]: Patient and Consultation value objects and input payloads
//! - [`db`]: Database operations, repository pattern, and persistence layer
//! - [`services`]: Business-rule layer enforcing uniqueness and existence
//!   invariants
//! - [`http`]: Axum-based HTTP server and request handlers
//!
//! ## Storage backends
//!
//! Two interchangeable backends implement the same repository traits:
//!
//! - `LocalRepository` (feature `local-repo`): in-memory store for unit
//!   tests and local development
//! - `PostgresRepository` (feature `postgres-repo`): Diesel + r2d2 pool with
//!   embedded migrations; the schema's unique constraints are the
//!   authoritative backstop for the rule layer's pre-checks

// Allow large error types - RepositoryError carries rich context for debugging
#![allow(clippy::result_large_err)]

pub mod api;

pub mod db;
pub mod models;

pub mod services;

#[cfg(feature = "http-server")]
pub mod http;
