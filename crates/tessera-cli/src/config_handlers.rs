//! Handler functions for `tessera config {path,show,get,init}`.

use std::path::PathBuf;

use tessera_core::{Error, Result};

use crate::cli::ConfigAction;
use crate::config::TesseraConfig;

// ============================================================================
// Command dispatch
// ============================================================================

/// Handle a config subcommand.
///
/// Receives the raw `--config` path (not a loaded config) because `path`
/// and `init` work before a config file exists.
pub fn handle_config_command(config_path: Option<&str>, action: ConfigAction) -> Result<()> {
    match action {
        ConfigAction::Path => cmd_config_path(config_path),
        ConfigAction::Show => cmd_config_show(config_path),
        ConfigAction::Get { key } => cmd_config_get(config_path, &key),
        ConfigAction::Init { file, force } => cmd_config_init(file.as_deref(), force).map(|_| ()),
    }
}

// ============================================================================
// Command handlers
// ============================================================================

fn cmd_config_path(config_path: Option<&str>) -> Result<()> {
    let path = TesseraConfig::resolve_config_path(config_path).ok_or_else(|| {
        Error::config("Could not determine config directory for this platform")
    })?;

    println!("{}", path.display());
    if !path.exists() {
        eprintln!("(file does not exist; run `tessera config init` to create it)");
    }
    Ok(())
}

fn cmd_config_show(config_path: Option<&str>) -> Result<()> {
    let config = TesseraConfig::load(config_path)?;
    print!("{}", config.to_toml_string()?);
    Ok(())
}

fn cmd_config_get(config_path: Option<&str>, key: &str) -> Result<()> {
    let config = TesseraConfig::load(config_path)?;
    println!("{}", lookup(&config, key)?);
    Ok(())
}

/// Write a default configuration file and return its path.
fn cmd_config_init(file: Option<&str>, force: bool) -> Result<PathBuf> {
    let path = match file {
        Some(p) => PathBuf::from(p),
        None => TesseraConfig::default_config_path()
            .ok_or_else(|| Error::config("Could not determine config directory"))?,
    };

    if path.exists() && !force {
        return Err(Error::config(format!(
            "Config file already exists at {}. Use --force to overwrite.",
            path.display()
        )));
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(&path, TesseraConfig::default().to_toml_string()?)?;

    println!("Config file created at {}", path.display());
    Ok(path)
}

// ============================================================================
// Dotted-key lookup
// ============================================================================

/// Look up a dotted key in the effective configuration.
fn lookup(config: &TesseraConfig, key: &str) -> Result<String> {
    let root = toml::Value::try_from(config).map_err(|e| Error::config(e.to_string()))?;
    key.split('.')
        .try_fold(&root, |current, part| current.as_table()?.get(part))
        .map(format_toml_value)
        .ok_or_else(|| Error::config(format!("Key '{key}' not found in configuration")))
}

fn format_toml_value(value: &toml::Value) -> String {
    match value {
        toml::Value::String(s) => s.clone(),
        toml::Value::Integer(i) => i.to_string(),
        toml::Value::Float(f) => f.to_string(),
        toml::Value::Boolean(b) => b.to_string(),
        toml::Value::Datetime(dt) => dt.to_string(),
        toml::Value::Array(_) | toml::Value::Table(_) => {
            toml::to_string_pretty(value).unwrap_or_else(|_| format!("{value:?}"))
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
