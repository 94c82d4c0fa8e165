//! Collaborator seams - the host-provided interfaces this plugin consumes.
//!
//! The vision service, buzzer component, and camera are owned by the host
//! framework. This module defines the traits the plugin calls through, the
//! bundle of resolved handles bound at reconfigure time, and simulated
//! implementations used by the demo binary and the tests.

pub mod actuator;
pub mod sim;
pub mod vision;

use std::sync::Arc;

pub use actuator::{Actuator, CommandMap, sound_buzzer};
pub use sim::{RecordingActuator, ScriptedFrame, ScriptedVision};
pub use vision::VisionSource;

/// Resolved collaborator handles, bound at reconfiguration time.
#[derive(Clone)]
pub struct Dependencies {
    /// Vision service queried for detections.
    pub vision: Arc<dyn VisionSource>,
    /// Generic component that receives the buzzer command.
    pub actuator: Arc<dyn Actuator>,
    /// Camera name passed to every detection query.
    pub camera: String,
}
