use std::path::{Path, PathBuf};

use dogechat_core::config::{CURRENT_CONFIG_VERSION, ChatConfig};
use serde_json::{Map, Value};

const APP_DIR: &str = "stfudoge";

fn config_dir() -> eyre::Result<PathBuf> {
    let base = dirs::config_dir().ok_or_else(|| eyre::eyre!("no config directory found"))?;
    Ok(base.join(APP_DIR))
}

pub fn default_config_path() -> eyre::Result<PathBuf> {
    Ok(config_dir()?.join("config.json"))
}

/// Where the client key/value store lives unless `--store` says otherwise.
pub fn default_store_path() -> eyre::Result<PathBuf> {
    let base = dirs::data_dir().ok_or_else(|| eyre::eyre!("no data directory found"))?;
    Ok(base.join(APP_DIR).join("storage.json"))
}

/// Load the chat config at `path`, falling back to the built-in defaults
/// when no file exists yet.
pub fn load_config(path: &Path) -> eyre::Result<ChatConfig> {
    if !path.exists() {
        tracing::debug!(path = %path.display(), "no config file, using defaults");
        return Ok(ChatConfig::default());
    }

    let contents = std::fs::read_to_string(path)
        .map_err(|e| eyre::eyre!("failed to read config at {}: {e}", path.display()))?;

    // Parse as raw JSON so we can run migrations before deserializing.
    let json: Value = serde_json::from_str(&contents)?;
    let on_disk_version = json
        .get("config_version")
        .and_then(|v| v.as_u64())
        .unwrap_or(0) as u32;

    let migrated = migrate(json, on_disk_version)?;
    let config: ChatConfig = serde_json::from_value(migrated)?;
    config.validate()?;
    Ok(config)
}

/// Run sequential migrations from `from_version` up to
/// [`CURRENT_CONFIG_VERSION`]. Each step is a pure transform on raw JSON.
pub fn migrate(mut json: Value, from_version: u32) -> eyre::Result<Value> {
    if from_version > CURRENT_CONFIG_VERSION {
        return Err(eyre::eyre!(
            "config_version {from_version} is newer than this build supports \
             ({CURRENT_CONFIG_VERSION}). Please update dogechat."
        ));
    }

    // v0 → v1: flat model and chain keys move under `models` / `chain`
    if from_version < 1 {
        let obj = json
            .as_object_mut()
            .ok_or_else(|| eyre::eyre!("config is not a JSON object"))?;

        nest(obj, "models", &[("free_model", "free"), ("premium_model", "verified")]);
        nest(
            obj,
            "chain",
            &[("rpc_url", "rpc_url"), ("token_address", "token_address")],
        );
        obj.insert(
            "config_version".to_string(),
            Value::Number(CURRENT_CONFIG_VERSION.into()),
        );
        tracing::info!("migrated config v0 → v1 (nested models and chain)");
    }

    Ok(json)
}

/// Move top-level `from` keys into the `section` object as `to`. Missing
/// section fields are filled from defaults when deserializing.
fn nest(obj: &mut Map<String, Value>, section: &str, moves: &[(&str, &str)]) {
    let mut moved = Map::new();
    for (from, to) in moves {
        if let Some(value) = obj.remove(*from) {
            moved.insert((*to).to_string(), value);
        }
    }
    if moved.is_empty() {
        return;
    }

    let defaults = match section {
        "models" => serde_json::to_value(ChatConfig::default().models),
        _ => serde_json::to_value(ChatConfig::default().chain),
    };
    let entry = obj
        .entry(section)
        .or_insert_with(|| defaults.unwrap_or_else(|_| Value::Object(Map::new())));
    if let Some(target) = entry.as_object_mut() {
        target.extend(moved);
    }
}

pub fn save_config(path: &Path, config: &ChatConfig) -> eyre::Result<()> {
    let dir = path
        .parent()
        .ok_or_else(|| eyre::eyre!("config path {} has no parent", path.display()))?;
    std::fs::create_dir_all(dir)?;

    // Always write the current version, regardless of what was loaded.
    let mut stamped = config.clone();
    stamped.config_version = CURRENT_CONFIG_VERSION;

    let json = serde_json::to_string_pretty(&stamped)?;

    // Write to a temp file then rename for atomicity
    let tmp_path = path.with_extension("json.tmp");
    std::fs::write(&tmp_path, json.as_bytes())?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(&tmp_path, std::fs::Permissions::from_mode(0o600))?;
    }

    std::fs::rename(&tmp_path, path)?;

    tracing::info!(path = %path.display(), "config saved");
    Ok(())
}
