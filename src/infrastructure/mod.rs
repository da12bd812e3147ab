//! Infrastructure layer for external integrations.
//!
//! This layer implements interfaces defined by the domain layer.
//!
//! # Modules
//!
//! - [`persistence`] - Campaign store backends (memory, file, PostgreSQL)

pub mod persistence;
