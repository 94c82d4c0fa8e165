//! Required-attribute validation for the plugin configuration.
//!
//! The host hands the plugin a free-form attribute map; three string-valued
//! attributes name the dependencies the plugin binds at reconfigure time.

use serde_json::{Map, Value};

use crate::error::{BuzzrError, Result};

/// Attribute names that must be present and string-valued.
pub const REQUIRED_DEPENDENCIES: [&str; 3] = ["vision", "generic", "camera"];

/// Validate a configuration attribute map.
///
/// Returns the dependency names referenced by the `vision`, `generic`, and
/// `camera` attributes, in that order, for the host to resolve.
pub fn validate_attributes(attributes: &Map<String, Value>) -> Result<Vec<String>> {
    let mut dependencies = Vec::with_capacity(REQUIRED_DEPENDENCIES.len());
    for attribute in REQUIRED_DEPENDENCIES {
        match attributes.get(attribute).and_then(Value::as_str) {
            Some(name) => dependencies.push(name.to_string()),
            None => {
                return Err(BuzzrError::Config(format!(
                    "{attribute} is required and must be a string"
                )));
            }
        }
    }
    Ok(dependencies)
}
