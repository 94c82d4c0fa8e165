//! Buzzr - a detection-driven buzzer control plugin
//!
//! Buzzr polls a vision service for person detections on a camera feed and
//! sounds a piezo buzzer when a person newly enters the frame. The vision
//! service, buzzer component, and camera are host-provided collaborators
//! bound at reconfigure time; this crate supplies the control loop and the
//! lifecycle glue around it.

pub mod alarm;
pub mod config;
pub mod control;
pub mod domain;
pub mod error;
pub mod resource;

pub use error::{BuzzrError, Result};
