//! Client for the Pictriev face recognition web service.
//!
//! This crate provides:
//! - Face detection for a remote image URL or an uploaded image
//! - Identity lookup ("whois") for a detected face
//! - Decoding of the service's loosely typed JSON into [`pictriev_models`] types
//!
//! Every operation performs a single HTTP round trip. Nothing is retried or
//! cached; deadlines come from [`PictrievConfig`].

pub mod client;
pub mod config;
pub mod decode;
pub mod error;
pub mod metrics;
pub mod transport;

pub use client::PictrievClient;
pub use config::{PictrievConfig, DEFAULT_BASE_URL};
pub use error::{PictrievError, PictrievResult};
pub use transport::RawResponse;

pub use pictriev_models::{
    Attribute, Command, DetectionResult, Gender, IdentityResult, Language, ServiceFault,
};
