//! Identity lookup ("whois") results.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::language::Language;

/// One ranked guess about who (or what) a face resembles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Attribute {
    /// Likelihood in [0, 1]
    pub probability: f64,
    /// Localized label
    pub label: String,
    /// Reference image the guess is based on
    pub image_id: String,
}

/// Gender estimate, stored as the probability that the face is male.
///
/// `man() + woman()` is always 1.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct Gender(f64);

impl Gender {
    /// Label the service uses for the male category.
    pub const MALE_LABEL: &'static str = "M";

    /// Create from a male probability.
    pub fn from_male_probability(p: f64) -> Self {
        Self(p)
    }

    /// Create from a `(label, probability)` pair as sent by the service.
    ///
    /// Any label other than `"M"` is read as the probability of the other
    /// category.
    pub fn from_label(label: &str, probability: f64) -> Self {
        if label == Self::MALE_LABEL {
            Self(probability)
        } else {
            Self(1.0 - probability)
        }
    }

    pub fn man(&self) -> f64 {
        self.0
    }

    pub fn woman(&self) -> f64 {
        1.0 - self.0
    }
}

/// Result of a successful identity lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct IdentityResult {
    /// Estimated age in years
    pub age: f64,
    /// Age histogram in service bucket order
    pub age_distribution: Vec<f64>,
    /// Ranked guesses, highest probability first, as sent by the service
    pub attributes: Vec<Attribute>,
    pub gender: Gender,
    /// Language the labels were requested in
    pub language: Language,
}

impl IdentityResult {
    /// The most likely attribute, if any.
    pub fn top_attribute(&self) -> Option<&Attribute> {
        self.attributes.first()
    }
}
