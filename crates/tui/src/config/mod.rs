use clap::Parser;
use serde::Deserialize;

use crate::error::Result;

const DEFAULT_CONFIG_PATH: &str = "config/carteira.toml";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub base_url: String,
    /// Session token issued by the API login; sent as a bearer token.
    pub token: Option<String>,
    /// JSON file holding the accessibility preferences.
    pub state_path: String,
    pub log_file: String,
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_url: "https://ds-projeto-back.onrender.com".to_string(),
            token: None,
            state_path: crate::local_state::default_state_path().to_string(),
            log_file: "carteira.log".to_string(),
            log_level: "info".to_string(),
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "carteira", disable_version_flag = true)]
struct Args {
    /// Optional config file path (TOML).
    #[arg(long)]
    config: Option<String>,
    /// Override base URL (e.g. http://localhost:8080).
    #[arg(long)]
    base_url: Option<String>,
    /// Session token (prefer CARTEIRA_TOKEN to keep it out of shell history).
    #[arg(long)]
    token: Option<String>,
    /// Override the preferences file path.
    #[arg(long)]
    state_path: Option<String>,
    /// Override the log file path.
    #[arg(long)]
    log_file: Option<String>,
}

pub fn load() -> Result<AppConfig> {
    let args = Args::parse();

    let config_path = args.config.as_deref().unwrap_or(DEFAULT_CONFIG_PATH);
    let mut settings = layered(config_path)?;

    if let Some(base_url) = args.base_url {
        settings.base_url = base_url;
    }
    if let Some(token) = args.token {
        settings.token = Some(token);
    }
    if let Some(state_path) = args.state_path {
        settings.state_path = state_path;
    }
    if let Some(log_file) = args.log_file {
        settings.log_file = log_file;
    }

    Ok(settings)
}

/// Defaults, then the optional TOML file, then `CARTEIRA_*` variables.
fn layered(config_path: &str) -> Result<AppConfig> {
    let mut builder = config::Config::builder();
    builder = builder.add_source(config::File::with_name(config_path).required(false));
    builder = builder.add_source(config::Environment::with_prefix("CARTEIRA"));
    let mut settings: AppConfig = builder.build()?.try_deserialize()?;

    if settings.token.as_deref().is_some_and(|t| t.trim().is_empty()) {
        settings.token = None;
    }

    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let settings = layered("config/does-not-exist.toml").unwrap();

        assert_eq!(settings.base_url, "https://ds-projeto-back.onrender.com");
        assert_eq!(settings.state_path, "config/carteira_state.json");
        assert_eq!(settings.log_level, "info");
    }

    #[test]
    fn file_values_override_defaults() {
        let dir = std::env::temp_dir().join(format!("carteira_cfg_{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("carteira.toml");
        std::fs::write(
            &path,
            "base_url = \"http://localhost:8080\"\ntoken = \"abc.def.ghi\"\n",
        )
        .unwrap();

        let settings = layered(path.to_str().unwrap()).unwrap();

        assert_eq!(settings.base_url, "http://localhost:8080");
        assert_eq!(settings.token.as_deref(), Some("abc.def.ghi"));
        assert_eq!(settings.log_file, "carteira.log");
        std::fs::remove_dir_all(dir).unwrap();
    }
}
