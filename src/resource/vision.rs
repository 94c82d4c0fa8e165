//! Vision collaborator seam.

use async_trait::async_trait;

use crate::domain::Detection;
use crate::error::Result;

/// Detection source provided by the host - a vision service reading a camera.
#[async_trait]
pub trait VisionSource: Send + Sync {
    /// Current detections on the named camera.
    async fn detections(&self, camera: &str) -> Result<Vec<Detection>>;
}
