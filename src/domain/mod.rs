//! Domain layer containing business entities and repository contracts.
//!
//! - [`entities`] - Core data structures
//! - [`repositories`] - Data access trait definitions
//!
//! The domain layer has no dependency on the infrastructure or API layers.
//! Repository traits are implemented in `crate::infrastructure::persistence`
//! and consumed by `crate::application::services`.

pub mod entities;
pub mod repositories;
