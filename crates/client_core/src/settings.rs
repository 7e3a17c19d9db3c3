use std::{fs, path::Path};

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use url::Url;

use shared::protocol::SCREEN_PATH;

pub const SETTINGS_FILE: &str = "screening.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub server_url: String,
    pub log_filter: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server_url: "http://127.0.0.1:8000".into(),
            log_filter: "info".into(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct SettingsFile {
    server_url: Option<String>,
    log_filter: Option<String>,
}

impl Settings {
    pub fn with_server_url(mut self, server_url: Option<String>) -> Self {
        if let Some(server_url) = server_url {
            self.server_url = server_url;
        }
        self
    }
}

/// Loads settings from `screening.toml` in the working directory (when present) and the
/// environment.
pub fn load_settings() -> Settings {
    let mut settings = Settings::default();

    if let Ok(raw) = fs::read_to_string(SETTINGS_FILE) {
        if let Err(err) = apply_file_overrides(&mut settings, &raw) {
            tracing::warn!("ignoring malformed {SETTINGS_FILE}: {err:#}");
        }
    }
    apply_env_overrides(&mut settings, |key| std::env::var(key).ok());

    settings
}

/// Like [`load_settings`] but with an explicit file, which must exist and parse.
pub fn load_settings_from(path: &Path) -> Result<Settings> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read settings file '{}'", path.display()))?;
    let mut settings = Settings::default();
    apply_file_overrides(&mut settings, &raw)
        .with_context(|| format!("invalid settings file '{}'", path.display()))?;
    apply_env_overrides(&mut settings, |key| std::env::var(key).ok());
    Ok(settings)
}

fn apply_file_overrides(settings: &mut Settings, raw: &str) -> Result<()> {
    let file_cfg: SettingsFile = toml::from_str(raw)?;
    if let Some(v) = file_cfg.server_url {
        settings.server_url = v;
    }
    if let Some(v) = file_cfg.log_filter {
        settings.log_filter = v;
    }
    Ok(())
}

fn apply_env_overrides(settings: &mut Settings, lookup: impl Fn(&str) -> Option<String>) {
    if let Some(v) = lookup("SCREENING_SERVER_URL") {
        settings.server_url = v;
    }
    if let Some(v) = lookup("APP__SERVER_URL") {
        settings.server_url = v;
    }
    if let Some(v) = lookup("APP__LOG_FILTER") {
        settings.log_filter = v;
    }
}

/// Resolves the analysis endpoint under `server_url`, keeping any path prefix.
pub fn screen_endpoint(server_url: &str) -> Result<Url> {
    let mut base = Url::parse(server_url.trim())
        .with_context(|| format!("invalid screening server url '{server_url}'"))?;
    if !matches!(base.scheme(), "http" | "https") {
        bail!(
            "unsupported scheme '{}' in screening server url '{server_url}'",
            base.scheme()
        );
    }
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    base.join(SCREEN_PATH)
        .with_context(|| format!("failed to build screening endpoint from '{server_url}'"))
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    #[test]
    fn endpoint_is_appended_to_bare_host() {
        assert_eq!(
            screen_endpoint("http://127.0.0.1:8000").expect("url").as_str(),
            "http://127.0.0.1:8000/screen"
        );
        assert_eq!(
            screen_endpoint("http://127.0.0.1:8000/").expect("url").as_str(),
            "http://127.0.0.1:8000/screen"
        );
    }

    #[test]
    fn endpoint_keeps_path_prefix() {
        assert_eq!(
            screen_endpoint("https://example.org/api").expect("url").as_str(),
            "https://example.org/api/screen"
        );
    }

    #[test]
    fn endpoint_rejects_garbage_and_foreign_schemes() {
        assert!(screen_endpoint("not a url").is_err());
        assert!(screen_endpoint("ftp://example.org").is_err());
    }

    #[test]
    fn file_values_override_defaults() {
        let mut settings = Settings::default();
        apply_file_overrides(&mut settings, "server_url = \"http://screening:9000\"\n")
            .expect("parse");
        assert_eq!(settings.server_url, "http://screening:9000");
        assert_eq!(settings.log_filter, "info");
    }

    #[test]
    fn malformed_file_is_reported() {
        let mut settings = Settings::default();
        assert!(apply_file_overrides(&mut settings, "server_url = ").is_err());
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn prefixed_env_wins_over_plain_env() {
        let env: HashMap<&str, &str> = HashMap::from([
            ("SCREENING_SERVER_URL", "http://plain:1"),
            ("APP__SERVER_URL", "http://prefixed:2"),
            ("APP__LOG_FILTER", "debug"),
        ]);
        let mut settings = Settings::default();
        apply_env_overrides(&mut settings, |key| env.get(key).map(|v| v.to_string()));
        assert_eq!(settings.server_url, "http://prefixed:2");
        assert_eq!(settings.log_filter, "debug");
    }

    #[test]
    fn cli_override_applies_last() {
        let settings = Settings::default().with_server_url(Some("http://cli:3".into()));
        assert_eq!(settings.server_url, "http://cli:3");
        let settings = settings.with_server_url(None);
        assert_eq!(settings.server_url, "http://cli:3");
    }

    #[test]
    fn explicit_settings_file_must_exist() {
        let missing = std::env::temp_dir().join("voice_screen_missing_settings.toml");
        assert!(load_settings_from(&missing).is_err());
    }
}
