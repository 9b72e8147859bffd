//! Domain layer - Pure business abstractions
//!
//! This layer contains NO transport details.
//! Only trait definitions and domain error types.

pub mod catalog;
pub mod errors;

pub use catalog::CatalogApi;
pub use errors::DomainError;
