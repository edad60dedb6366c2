mod types;

pub use types::*;

use anyhow::{Context, Result};
use std::path::Path;

/// Load configuration from a TOML file
pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;

    let config = parse_config(&content)
        .with_context(|| format!("Failed to load config file: {:?}", path))?;

    tracing::debug!("Loaded config from {:?}", path);
    Ok(config)
}

/// Parse and validate configuration from TOML text
pub fn parse_config(content: &str) -> Result<Config> {
    let config: Config = toml::from_str(content).context("Failed to parse config")?;
    validate_config(&config)?;
    Ok(config)
}

/// Load config from default locations or return default config
pub fn load_config_or_default(custom_path: Option<&Path>) -> Result<Config> {
    if let Some(path) = custom_path {
        return load_config(path);
    }

    // Try default locations
    let default_paths = [
        "./fragseek.toml",
        "./config.toml",
        "~/.config/fragseek/config.toml",
    ];

    for path_str in default_paths {
        let path = shellexpand::tilde(path_str);
        let path = Path::new(path.as_ref());
        if path.exists() {
            return load_config(path);
        }
    }

    Ok(Config::default())
}

/// Validate configuration
pub fn validate_config(config: &Config) -> Result<()> {
    let tolerance = config.locator.max_frag_lookup_tolerance;
    if !tolerance.is_finite() {
        anyhow::bail!("max_frag_lookup_tolerance must be finite, got {}", tolerance);
    }
    if tolerance < 0.0 {
        anyhow::bail!("max_frag_lookup_tolerance cannot be negative, got {}", tolerance);
    }
    if tolerance > 10.0 {
        tracing::warn!(
            "max_frag_lookup_tolerance of {}s is larger than most fragments",
            tolerance
        );
    }

    Ok(())
}
