pub mod types;

use std::collections::HashSet;
use std::path::Path;

use crate::error::{AvailabilityError, Result};
use types::Config;

pub fn load_config(path: &Path) -> Result<Config> {
    if !path.exists() {
        tracing::info!(
            "Config file not found at {}, using defaults",
            path.display()
        );
        return Ok(Config::default());
    }

    let content = std::fs::read_to_string(path).map_err(|e| {
        AvailabilityError::Config(format!(
            "failed to read config file {}: {e}",
            path.display()
        ))
    })?;
    if content.trim().is_empty() {
        return Ok(Config::default());
    }
    let config: Config = serde_yml::from_str(&content)?;
    validate(&config)?;
    Ok(config)
}

fn validate(config: &Config) -> Result<()> {
    if let Some(p) = config
        .properties
        .iter()
        .find(|p| p.id.trim().is_empty() || p.name.trim().is_empty())
    {
        return Err(AvailabilityError::Config(format!(
            "property entries need a name and an id (got name '{}', id '{}')",
            p.name, p.id
        )));
    }
    // Results are keyed by listing name, so names must be unique.
    let mut seen = HashSet::new();
    if let Some(p) = config.properties.iter().find(|p| !seen.insert(p.name.trim())) {
        return Err(AvailabilityError::Config(format!(
            "duplicate property name '{}' (id '{}')",
            p.name, p.id
        )));
    }
    if config.renderer.max_month_advances == 0 {
        return Err(AvailabilityError::Config(
            "renderer.max_month_advances must be at least 1".into(),
        ));
    }
    Ok(())
}
