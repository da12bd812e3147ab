//! Utility functions shared across layers.
//!
//! - [`id_generator`] - Random campaign id generation
//! - [`url_validator`] - Destination URL validation

pub mod id_generator;
pub mod url_validator;
