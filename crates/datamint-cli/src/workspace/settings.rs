use std::path::{Path, PathBuf};

use datamint_client::DEFAULT_BACKEND_URL;
use datamint_core::ConfigPreset;
use serde::{Deserialize, Serialize};

use super::WorkspaceResult;
use super::atomic::write_bytes_atomic;

pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    pub backend_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Log file; the workspace default is used when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_path: Option<PathBuf>,
    /// Overrides applied on top of a fresh configuration.
    #[serde(default)]
    pub defaults: ConfigPreset,
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            backend_url: DEFAULT_BACKEND_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            log_path: None,
            defaults: ConfigPreset::default(),
        }
    }
}

pub fn load_or_create_settings(path: &Path) -> WorkspaceResult<Settings> {
    if path.exists() {
        let content = std::fs::read_to_string(path)?;
        let settings: Settings = toml::from_str(&content)?;
        return Ok(settings);
    }

    let settings = Settings::default();
    save_settings(path, &settings)?;
    Ok(settings)
}

pub fn save_settings(path: &Path, settings: &Settings) -> WorkspaceResult<()> {
    let encoded = toml::to_string_pretty(settings)?;
    write_bytes_atomic(path, encoded.as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;
    use datamint_core::{Domain, GenerationPath};

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "datamint-settings-{name}-{}",
            std::process::id()
        ));
        let _ = std::fs::remove_dir_all(&dir);
        dir
    }

    #[test]
    fn creates_defaults_on_first_load() {
        let dir = scratch_dir("create");
        let path = dir.join("config").join("settings.toml");

        let settings = load_or_create_settings(&path).expect("load");
        assert_eq!(settings, Settings::default());
        assert!(path.exists());

        let reloaded = load_or_create_settings(&path).expect("reload");
        assert_eq!(reloaded, settings);
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn reads_defaults_table_as_preset() {
        let settings: Settings = toml::from_str(
            r#"
backend_url = "http://generator.internal:8091"

[defaults]
domain = "healthcare"
entity = "order"
count = 30
generation_path = "rag"
"#,
        )
        .expect("parse");
        assert_eq!(settings.timeout_secs, DEFAULT_TIMEOUT_SECS);
        assert_eq!(settings.defaults.domain, Some(Domain::Healthcare));
        assert_eq!(settings.defaults.count, Some(30));
        assert_eq!(settings.defaults.generation_path, Some(GenerationPath::Rag));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let err = toml::from_str::<Settings>(
            "backend_url = \"http://x\"\n[defaults]\nmystery = 1\n",
        );
        assert!(err.is_err());
    }

    #[test]
    fn save_round_trips_through_disk() {
        let dir = scratch_dir("save");
        let path = dir.join("settings.toml");
        let settings = Settings {
            timeout_secs: 5,
            defaults: ConfigPreset::builder().count(42).build(),
            ..Settings::default()
        };
        save_settings(&path, &settings).expect("save");
        assert_eq!(load_or_create_settings(&path).expect("load"), settings);
        assert!(!dir.join(".settings.toml.tmp").exists());
        let _ = std::fs::remove_dir_all(&dir);
    }
}
