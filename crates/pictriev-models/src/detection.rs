//! Face detection results.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Result of a successful face detection request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct DetectionResult {
    /// Service-assigned identifier used for later identity lookups
    pub image_id: String,
    /// Number of faces found. Zero is a valid outcome, not a failure.
    pub face_count: u32,
    /// Server-side processing time in seconds
    pub processing_time: f64,
    /// Image width in pixels
    pub width: u32,
    /// Image height in pixels
    pub height: u32,
}

impl DetectionResult {
    /// Returns true if at least one face was detected.
    pub fn has_faces(&self) -> bool {
        self.face_count > 0
    }

    /// Face indices that can be passed to an identity lookup.
    pub fn face_ids(&self) -> impl Iterator<Item = u32> {
        0..self.face_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(face_count: u32) -> DetectionResult {
        DetectionResult {
            image_id: "abc".to_string(),
            face_count,
            processing_time: 0.5,
            width: 640,
            height: 480,
        }
    }

    #[test]
    fn test_no_faces() {
        let r = result(0);
        assert!(!r.has_faces());
        assert_eq!(r.face_ids().count(), 0);
    }

    #[test]
    fn test_face_ids() {
        let r = result(3);
        assert!(r.has_faces());
        assert_eq!(r.face_ids().collect::<Vec<_>>(), vec![0, 1, 2]);
    }
}
