use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use clap::Parser;
use colored::*;
use eyre::{Context, Result};
use log::info;
use serde_json::{Map, Value};

use buzzr::alarm::PiezoAlarm;
use buzzr::control::CycleConfig;
use buzzr::domain::Detection;
use buzzr::resource::{Actuator, CommandMap, Dependencies, ScriptedVision};

/// Run the people-piezo alarm against a simulated camera feed.
#[derive(Parser, Debug)]
#[command(name = "buzzr", about = "Detection-driven buzzer control loop")]
struct Cli {
    /// JSON file with an array of detection frames to replay
    #[arg(long)]
    pattern: Option<PathBuf>,

    /// Camera name recorded in the plugin configuration
    #[arg(long, default_value = "cam-1")]
    camera: String,

    /// Demo pacing (sub-second ticks) instead of the production 1s/10s pacing
    #[arg(long)]
    fast: bool,
}

/// Stand-in buzzer that prints every command it receives.
struct ConsoleBuzzer;

#[async_trait]
impl Actuator for ConsoleBuzzer {
    async fn execute(&self, command: CommandMap) -> buzzr::Result<CommandMap> {
        println!("{} {}", "BUZZ".yellow().bold(), Value::Object(command));
        Ok(CommandMap::new())
    }
}

fn setup_logging() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
}

/// A person walks through the frame, leaves, and comes back.
fn default_pattern() -> ScriptedVision {
    let person = vec![Detection::new("person", 0.92)];
    ScriptedVision::from_detections(vec![
        vec![],
        vec![],
        person.clone(),
        person.clone(),
        vec![Detection::new("person", 0.4)],
        vec![],
        person,
        vec![],
    ])
}

fn config_attributes(cli: &Cli) -> Map<String, Value> {
    let mut attributes = Map::new();
    attributes.insert("vision".to_string(), Value::String("people-detector".to_string()));
    attributes.insert("generic".to_string(), Value::String("piezo".to_string()));
    attributes.insert("camera".to_string(), Value::String(cli.camera.clone()));
    attributes
}

#[tokio::main]
async fn main() -> Result<()> {
    setup_logging();

    let cli = Cli::parse();

    let attributes = config_attributes(&cli);
    let dependencies =
        PiezoAlarm::validate_config(&attributes).context("invalid configuration")?;
    info!("configuration references dependencies: {dependencies:?}");

    let vision: Arc<ScriptedVision> = match &cli.pattern {
        Some(path) => Arc::new(
            ScriptedVision::from_json_file(path)
                .with_context(|| format!("failed to load pattern from {}", path.display()))?,
        ),
        None => Arc::new(default_pattern()),
    };

    let config = if cli.fast {
        CycleConfig {
            ticks: 20,
            tick_interval: Duration::from_millis(250),
            cycle_pause: Duration::from_secs(2),
            ..Default::default()
        }
    } else {
        CycleConfig::default()
    };

    let mut alarm = PiezoAlarm::with_config(config);
    alarm.reconfigure(Dependencies {
        vision,
        actuator: Arc::new(ConsoleBuzzer),
        camera: cli.camera.clone(),
    });

    println!(
        "{} camera {} (Ctrl-C to stop)",
        "Watching".cyan(),
        cli.camera
    );

    tokio::signal::ctrl_c()
        .await
        .context("failed to listen for ctrl-c")?;

    alarm.close();
    println!("{}", "Stopped.".green());

    Ok(())
}
