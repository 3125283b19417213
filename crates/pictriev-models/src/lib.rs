//! Result types for the Pictriev face recognition service.
//!
//! This crate provides Serde-serializable types for:
//! - Face detection results
//! - Identity lookup ("whois") results: ranked attributes, age and gender
//! - Service-reported faults
//! - Supported label languages

pub mod detection;
pub mod fault;
pub mod identity;
pub mod language;

// Re-export common types
pub use detection::DetectionResult;
pub use fault::{Command, ServiceFault};
pub use identity::{Attribute, Gender, IdentityResult};
pub use language::{Language, LanguageParseError};
