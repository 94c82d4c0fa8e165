//! Host-facing plugin surface for the people-piezo alarm.
//!
//! The host validates configuration before instantiating the resource, hands
//! resolved dependency handles to `reconfigure`, drives the control plane
//! through `do_command`, and calls `close` on teardown. Everything else - the
//! registry, attribute parsing, dependency resolution - is host-owned.

use log::{info, warn};
use serde_json::{Map, Value};

use crate::config::validate_attributes;
use crate::control::{ControlLoop, CycleConfig};
use crate::error::Result;
use crate::resource::{CommandMap, Dependencies};

/// Generic service that buzzes a piezo when a person newly appears on camera.
pub struct PiezoAlarm {
    deps: Option<Dependencies>,
    control: ControlLoop,
}

impl PiezoAlarm {
    /// Create an unconfigured alarm with production pacing.
    pub fn new() -> Self {
        Self::with_config(CycleConfig::default())
    }

    /// Create an unconfigured alarm with custom cycle pacing.
    pub fn with_config(config: CycleConfig) -> Self {
        Self {
            deps: None,
            control: ControlLoop::new(config),
        }
    }

    /// Validate configuration attributes.
    ///
    /// Returns the dependency names the host must resolve, in declaration
    /// order: vision, generic, camera.
    pub fn validate_config(attributes: &Map<String, Value>) -> Result<Vec<String>> {
        validate_attributes(attributes)
    }

    /// Bind resolved collaborators and start the loop if it is not running.
    pub fn reconfigure(&mut self, deps: Dependencies) {
        self.deps = Some(deps);
        if self.control.is_running() {
            info!("already running control logic");
        } else {
            self.start();
        }
    }

    /// Start the control loop.
    ///
    /// A no-op with a log line while a run is already active or before any
    /// dependencies are bound; a running loop keeps the bindings it was
    /// started with.
    pub fn start(&mut self) {
        match &self.deps {
            Some(deps) => self.control.start(deps.clone()),
            None => warn!("start requested before dependencies were bound"),
        }
    }

    /// Request the control loop to stop. Safe when nothing is running.
    pub fn stop(&mut self) {
        self.control.stop();
    }

    /// Whether the control loop is currently running.
    pub fn is_running(&self) -> bool {
        self.control.is_running()
    }

    /// Dispatch a control command.
    ///
    /// Recognizes `{"action": "start"}` and `{"action": "stop"}`. Every input
    /// key maps to a success flag in the result; unrecognized entries report
    /// `false` and have no side effect.
    pub fn do_command(&mut self, command: &CommandMap) -> CommandMap {
        let mut result = CommandMap::new();
        for key in command.keys() {
            result.insert(key.clone(), Value::Bool(false));
        }

        for (name, args) in command {
            if name == "action" && args.as_str() == Some("start") {
                self.start();
                result.insert(name.clone(), Value::Bool(true));
            }
            if name == "action" && args.as_str() == Some("stop") {
                self.stop();
                result.insert(name.clone(), Value::Bool(true));
            }
        }
        result
    }

    /// Stop the loop as part of resource teardown.
    pub fn close(&mut self) {
        self.stop();
    }
}

impl Default for PiezoAlarm {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::time::Duration;

    use serde_json::json;

    use crate::resource::{RecordingActuator, ScriptedVision};

    fn command(value: Value) -> CommandMap {
        value.as_object().unwrap().clone()
    }

    fn test_deps() -> Dependencies {
        Dependencies {
            vision: Arc::new(ScriptedVision::from_detections(vec![vec![]])),
            actuator: Arc::new(RecordingActuator::new()),
            camera: "cam".to_string(),
        }
    }

    fn idle_config() -> CycleConfig {
        CycleConfig {
            ticks: 10,
            tick_interval: Duration::from_millis(5),
            cycle_pause: Duration::from_millis(5),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_reconfigure_starts_loop() {
        let mut alarm = PiezoAlarm::with_config(idle_config());
        assert!(!alarm.is_running());

        alarm.reconfigure(test_deps());
        assert!(alarm.is_running());

        alarm.close();
        assert!(!alarm.is_running());
    }

    #[tokio::test]
    async fn test_reconfigure_while_running_keeps_single_loop() {
        let mut alarm = PiezoAlarm::with_config(idle_config());
        alarm.reconfigure(test_deps());
        alarm.reconfigure(test_deps());
        assert!(alarm.is_running());

        alarm.close();
        assert!(!alarm.is_running());
    }

    #[tokio::test]
    async fn test_do_command_start_and_stop() {
        let mut alarm = PiezoAlarm::with_config(idle_config());
        alarm.reconfigure(test_deps());

        let result = alarm.do_command(&command(json!({"action": "stop"})));
        assert_eq!(result.get("action"), Some(&Value::Bool(true)));
        assert!(!alarm.is_running());

        let result = alarm.do_command(&command(json!({"action": "start"})));
        assert_eq!(result.get("action"), Some(&Value::Bool(true)));
        assert!(alarm.is_running());

        alarm.close();
    }

    #[tokio::test]
    async fn test_do_command_unknown_action() {
        let mut alarm = PiezoAlarm::with_config(idle_config());
        let result = alarm.do_command(&command(json!({"action": "bogus"})));
        assert_eq!(result.get("action"), Some(&Value::Bool(false)));
    }

    #[tokio::test]
    async fn test_do_command_unknown_key() {
        let mut alarm = PiezoAlarm::with_config(idle_config());
        let result = alarm.do_command(&command(json!({"foo": "bar"})));
        assert_eq!(result.get("foo"), Some(&Value::Bool(false)));
    }

    #[tokio::test]
    async fn test_do_command_mixed_keys() {
        let mut alarm = PiezoAlarm::with_config(idle_config());
        alarm.reconfigure(test_deps());

        let result = alarm.do_command(&command(json!({"action": "stop", "foo": 1})));
        assert_eq!(result.len(), 2);
        assert_eq!(result.get("action"), Some(&Value::Bool(true)));
        assert_eq!(result.get("foo"), Some(&Value::Bool(false)));
    }

    #[tokio::test]
    async fn test_start_before_reconfigure_schedules_nothing() {
        let mut alarm = PiezoAlarm::with_config(idle_config());
        let result = alarm.do_command(&command(json!({"action": "start"})));

        // The dispatch recognizes the key, but with no bound dependencies
        // there is nothing to run.
        assert_eq!(result.get("action"), Some(&Value::Bool(true)));
        assert!(!alarm.is_running());
    }

    #[tokio::test]
    async fn test_stop_when_idle_is_safe() {
        let mut alarm = PiezoAlarm::with_config(idle_config());
        alarm.stop();
        alarm.close();
        assert!(!alarm.is_running());
    }
}
