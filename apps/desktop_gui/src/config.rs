use std::{fs, io, path::Path};

use anyhow::Context;
use serde::Deserialize;

pub const DEFAULT_CONFIG_PATH: &str = "stock_analyzer.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientSettings {
    pub api_base_url: String,
    pub log_filter: String,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:5001".into(),
            log_filter: "info".into(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct SettingsFile {
    api_base_url: Option<String>,
    log_filter: Option<String>,
}

/// Reads settings from `path`. A missing file means defaults; any other read or parse
/// problem is an error.
pub fn load_settings(path: &Path) -> anyhow::Result<ClientSettings> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(ClientSettings::default()),
        Err(err) => {
            return Err(err)
                .with_context(|| format!("failed to read config file '{}'", path.display()))
        }
    };
    parse_settings(&raw).with_context(|| format!("invalid config file '{}'", path.display()))
}

fn parse_settings(raw: &str) -> anyhow::Result<ClientSettings> {
    let file: SettingsFile = toml::from_str(raw)?;
    let mut settings = ClientSettings::default();

    if let Some(v) = file.api_base_url {
        settings.api_base_url = v.trim().to_string();
    }
    if let Some(v) = file.log_filter.filter(|v| !v.trim().is_empty()) {
        settings.log_filter = v;
    }

    client_core::analyze_endpoint(&settings.api_base_url)?;
    Ok(settings)
}

#[cfg(test)]
mod tests {
    use std::{
        env,
        time::{SystemTime, UNIX_EPOCH},
    };

    use super::*;

    fn temp_config_path(tag: &str) -> std::path::PathBuf {
        let suffix = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock")
            .as_nanos();
        env::temp_dir().join(format!("stock_analyzer_{tag}_{suffix}.toml"))
    }

    #[test]
    fn missing_file_yields_defaults() {
        let settings = load_settings(&temp_config_path("missing")).expect("defaults");
        assert_eq!(settings, ClientSettings::default());
        assert_eq!(settings.api_base_url, "http://localhost:5001");
    }

    #[test]
    fn file_overrides_base_url_and_log_filter() {
        let path = temp_config_path("override");
        fs::write(
            &path,
            "api_base_url = \"http://127.0.0.1:6001\"\nlog_filter = \"debug\"\n",
        )
        .expect("write config");

        let settings = load_settings(&path).expect("settings");
        assert_eq!(settings.api_base_url, "http://127.0.0.1:6001");
        assert_eq!(settings.log_filter, "debug");

        fs::remove_file(path).expect("cleanup");
    }

    #[test]
    fn blank_log_filter_keeps_default() {
        let settings = parse_settings("log_filter = \"  \"").expect("settings");
        assert_eq!(settings.log_filter, "info");
    }

    #[test]
    fn rejects_unusable_base_url() {
        assert!(parse_settings("api_base_url = \"\"").is_err());
        assert!(parse_settings("api_base_url = \"ftp://localhost:5001\"").is_err());
    }

    #[test]
    fn rejects_unknown_keys() {
        assert!(parse_settings("base_url = \"http://localhost:5001\"").is_err());
    }
}
