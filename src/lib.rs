//! Core library exports for the Flipkart affiliates importer.
//!
//! The `data` feature exposes the domain model, marketplace DTOs and the
//! Diesel persistence layer. The `server` feature adds the import job, the
//! marketplace HTTP client and the Actix-web admin surface that triggers it.

#[cfg(feature = "data")]
pub mod domain;
#[cfg(feature = "data")]
pub mod dto;
#[cfg(feature = "data")]
pub mod error_conversions;
#[cfg(feature = "server")]
pub mod forms;
#[cfg(feature = "server")]
pub mod marketplace;
#[cfg(feature = "data")]
pub mod models;
#[cfg(feature = "data")]
pub mod repository;
#[cfg(feature = "server")]
pub mod routes;
#[cfg(feature = "data")]
pub mod schema;
#[cfg(feature = "server")]
pub mod services;

/// Role required to view imported products and trigger imports.
pub const SERVICE_ACCESS_ROLE: &str = "affiliates";
