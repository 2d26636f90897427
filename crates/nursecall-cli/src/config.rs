use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Default)]
pub struct ProfileConfig {
    pub server: Option<String>,
    pub format: Option<String>,
}

pub type ConfigFile = HashMap<String, ProfileConfig>;

pub fn config_dir() -> Result<PathBuf> {
    let dir = dirs::home_dir()
        .context("Cannot determine home directory")?
        .join(".nursecall");
    fs::create_dir_all(&dir)?;
    Ok(dir)
}

fn config_path() -> Result<PathBuf> {
    Ok(config_dir()?.join("config.toml"))
}

fn load_all_from(path: &Path) -> Result<ConfigFile> {
    if !path.exists() {
        return Ok(ConfigFile::new());
    }
    let content = fs::read_to_string(path)?;
    let cfg: ConfigFile = toml::from_str(&content)?;
    Ok(cfg)
}

fn save_all_to(path: &Path, all: &ConfigFile) -> Result<()> {
    let content = toml::to_string_pretty(all)?;
    fs::write(path, content)?;
    Ok(())
}

pub fn load_profile(profile: &str) -> Result<ProfileConfig> {
    let all = load_all_from(&config_path()?)?;
    Ok(all
        .into_iter()
        .find(|(k, _)| k == profile)
        .map(|(_, v)| v)
        .unwrap_or_default())
}

pub fn save_profile(profile: &str, config: &ProfileConfig) -> Result<()> {
    let path = config_path()?;
    let mut all = load_all_from(&path)?;
    all.insert(
        profile.to_string(),
        ProfileConfig {
            server: config.server.clone(),
            format: config.format.clone(),
        },
    );
    save_all_to(&path, &all)
}

/// Server URL resolution order: --server flag / NURSECALL_URL env var,
/// then the profile's config, then the server stored with the credentials.
pub fn resolve_server(cli_server: &Option<String>, profile: &str) -> Result<String> {
    if let Some(s) = cli_server {
        return Ok(s.clone());
    }
    let cfg = load_profile(profile)?;
    if let Some(s) = cfg.server {
        return Ok(s);
    }
    if let Ok(Some(creds)) = crate::auth::load_credentials(profile) {
        return Ok(creds.server);
    }
    anyhow::bail!(
        "No server URL configured. Use --server, set NURSECALL_URL, or run: nursecall login --server <url>"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_is_empty_config() {
        let dir = tempfile::tempdir().unwrap();
        let all = load_all_from(&dir.path().join("config.toml")).unwrap();
        assert!(all.is_empty());
    }

    #[test]
    fn test_profile_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let mut all = ConfigFile::new();
        all.insert(
            "default".to_string(),
            ProfileConfig {
                server: Some("http://localhost:5000/api".to_string()),
                format: Some("table".to_string()),
            },
        );
        all.insert(
            "staging".to_string(),
            ProfileConfig {
                server: Some("https://staging.example.org/api".to_string()),
                format: None,
            },
        );
        save_all_to(&path, &all).unwrap();

        let back = load_all_from(&path).unwrap();
        assert_eq!(back.len(), 2);
        assert_eq!(
            back["default"].server.as_deref(),
            Some("http://localhost:5000/api")
        );
        assert_eq!(back["staging"].format, None);
    }

    #[test]
    fn test_invalid_toml_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "not [valid toml").unwrap();
        assert!(load_all_from(&path).is_err());
    }
}
