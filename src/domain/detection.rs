//! Detection values produced by the vision collaborator.
//!
//! A detection carries no identity beyond the query that returned it and is
//! never retained across ticks.

use serde::{Deserialize, Serialize};

/// A single detection from one vision query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Detection {
    /// Class label assigned by the detector (e.g. "person").
    pub class_name: String,

    /// Confidence score in [0, 1].
    pub confidence: f64,
}

impl Detection {
    /// Create a new detection.
    pub fn new(class_name: impl Into<String>, confidence: f64) -> Self {
        Self {
            class_name: class_name.into(),
            confidence,
        }
    }

    /// Whether this detection carries `class` (ASCII case-insensitive) with
    /// confidence strictly greater than `min_confidence`.
    pub fn matches(&self, class: &str, min_confidence: f64) -> bool {
        self.confidence > min_confidence && self.class_name.eq_ignore_ascii_case(class)
    }
}

/// True iff at least one detection matches, evaluated in returned order.
///
/// Short-circuits on the first match; which detection matched is irrelevant.
pub fn any_match(detections: &[Detection], class: &str, min_confidence: f64) -> bool {
    detections.iter().any(|d| d.matches(class, min_confidence))
}
