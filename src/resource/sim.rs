//! Simulated collaborators for the demo binary and the tests.
//!
//! The scripted feed replays a fixed sequence of detection frames, wrapping
//! around at the end; the recording actuator captures every command it is
//! asked to execute. Together they exercise the loop without a live host.

use std::path::Path;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use crate::domain::Detection;
use crate::error::{BuzzrError, Result};
use crate::resource::actuator::{Actuator, CommandMap};
use crate::resource::vision::VisionSource;

/// One scripted response from the vision feed.
#[derive(Debug, Clone)]
pub enum ScriptedFrame {
    /// The query succeeds with these detections.
    Detections(Vec<Detection>),
    /// The query fails with this message.
    Error(String),
}

/// Vision source that replays a fixed frame sequence, wrapping around at the
/// end. Counts queries so tests can assert that every tick executed.
pub struct ScriptedVision {
    frames: Vec<ScriptedFrame>,
    cursor: AtomicUsize,
}

impl ScriptedVision {
    /// Replay the given frames in order.
    pub fn new(frames: Vec<ScriptedFrame>) -> Self {
        Self {
            frames,
            cursor: AtomicUsize::new(0),
        }
    }

    /// Build a feed where every frame is a successful detection set.
    pub fn from_detections(frames: Vec<Vec<Detection>>) -> Self {
        Self::new(frames.into_iter().map(ScriptedFrame::Detections).collect())
    }

    /// Parse a feed from a JSON array of detection arrays.
    pub fn from_json(json: &str) -> Result<Self> {
        let frames: Vec<Vec<Detection>> = serde_json::from_str(json)?;
        Ok(Self::from_detections(frames))
    }

    /// Load a feed from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Number of frames in the script.
    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    /// Number of queries served so far.
    pub fn calls(&self) -> usize {
        self.cursor.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl VisionSource for ScriptedVision {
    async fn detections(&self, _camera: &str) -> Result<Vec<Detection>> {
        let call = self.cursor.fetch_add(1, Ordering::SeqCst);
        if self.frames.is_empty() {
            return Ok(Vec::new());
        }
        match &self.frames[call % self.frames.len()] {
            ScriptedFrame::Detections(detections) => Ok(detections.clone()),
            ScriptedFrame::Error(message) => Err(BuzzrError::Vision(message.clone())),
        }
    }
}

/// Actuator that records every command and always succeeds.
#[derive(Default)]
pub struct RecordingActuator {
    commands: Mutex<Vec<CommandMap>>,
}

impl RecordingActuator {
    /// Create an actuator with an empty command log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Commands executed so far, oldest first.
    pub fn commands(&self) -> Vec<CommandMap> {
        self.commands.lock().unwrap().clone()
    }

    /// Number of commands executed so far.
    pub fn command_count(&self) -> usize {
        self.commands.lock().unwrap().len()
    }
}

#[async_trait]
impl Actuator for RecordingActuator {
    async fn execute(&self, command: CommandMap) -> Result<CommandMap> {
        self.commands.lock().unwrap().push(command);
        Ok(CommandMap::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resource::actuator::sound_buzzer;

    #[tokio::test]
    async fn test_scripted_vision_replays_in_order() {
        let vision = ScriptedVision::from_detections(vec![
            vec![Detection::new("person", 0.9)],
            vec![],
        ]);

        let first = vision.detections("cam").await.unwrap();
        assert_eq!(first.len(), 1);
        let second = vision.detections("cam").await.unwrap();
        assert!(second.is_empty());
        assert_eq!(vision.calls(), 2);
    }

    #[tokio::test]
    async fn test_scripted_vision_wraps_around() {
        let vision = ScriptedVision::from_detections(vec![vec![Detection::new("person", 0.9)]]);

        for _ in 0..3 {
            let detections = vision.detections("cam").await.unwrap();
            assert_eq!(detections.len(), 1);
        }
        assert_eq!(vision.calls(), 3);
    }

    #[tokio::test]
    async fn test_scripted_vision_empty_script() {
        let vision = ScriptedVision::new(Vec::new());
        let detections = vision.detections("cam").await.unwrap();
        assert!(detections.is_empty());
    }

    #[tokio::test]
    async fn test_scripted_vision_error_frame() {
        let vision = ScriptedVision::new(vec![ScriptedFrame::Error("camera offline".to_string())]);
        let err = vision.detections("cam").await.unwrap_err();
        assert!(matches!(err, BuzzrError::Vision(_)));
    }

    #[test]
    fn test_from_json() {
        let vision = ScriptedVision::from_json(
            r#"[[{"class_name": "person", "confidence": 0.9}], []]"#,
        )
        .unwrap();
        assert_eq!(vision.frame_count(), 2);
    }

    #[test]
    fn test_from_json_rejects_malformed_input() {
        assert!(ScriptedVision::from_json("not json").is_err());
    }

    #[tokio::test]
    async fn test_recording_actuator_captures_commands() {
        let actuator = RecordingActuator::new();
        actuator.execute(sound_buzzer()).await.unwrap();
        actuator.execute(sound_buzzer()).await.unwrap();

        assert_eq!(actuator.command_count(), 2);
        assert!(actuator.commands()[0].contains_key("sound_buzzer"));
    }
}
