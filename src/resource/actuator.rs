//! Actuator collaborator seam and the buzzer command shape.

use async_trait::async_trait;
use serde_json::{Map, Value, json};

use crate::error::Result;

/// Command mapping exchanged with generic components.
pub type CommandMap = Map<String, Value>;

/// Generic actuator component provided by the host.
#[async_trait]
pub trait Actuator: Send + Sync {
    /// Execute a command, returning the component's response mapping.
    async fn execute(&self, command: CommandMap) -> Result<CommandMap>;
}

const BUZZER_FREQUENCY_HZ: u32 = 1200;
const BUZZER_DURATION_SECS: f64 = 1.5;
const BUZZER_DUTY_CYCLE: f64 = 0.7;

/// The one command this plugin ever sends: a fixed buzzer chirp.
pub fn sound_buzzer() -> CommandMap {
    let mut command = CommandMap::new();
    command.insert(
        "sound_buzzer".to_string(),
        json!({
            "frequency": BUZZER_FREQUENCY_HZ,
            "duration": BUZZER_DURATION_SECS,
            "duty_cycle": BUZZER_DUTY_CYCLE,
        }),
    );
    command
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sound_buzzer_shape() {
        let command = sound_buzzer();
        assert_eq!(command.len(), 1);

        let args = command.get("sound_buzzer").unwrap();
        assert_eq!(args.get("frequency"), Some(&json!(1200)));
        assert_eq!(args.get("duration"), Some(&json!(1.5)));
        assert_eq!(args.get("duty_cycle"), Some(&json!(0.7)));
    }
}
