//! Startup configuration: defaults, then an optional TOML file, then
//! environment variables, then command line flags.

use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::{bail, Context};
use clap::Parser;
use serde::Deserialize;

pub const DEFAULT_CONFIG_FILE: &str = "pitch_deck.toml";
const CONFIG_DIR_NAME: &str = "pitch_deck_studio";

#[derive(Parser, Debug, Default, Clone)]
#[command(name = "pitch_deck_studio", about = "Generate startup pitch decks")]
pub struct CliArgs {
    /// Base url of the deck generation service, e.g. http://localhost:5000/api
    #[arg(long)]
    pub api_url: Option<String>,
    /// Per-request timeout in seconds
    #[arg(long)]
    pub timeout_secs: Option<u64>,
    /// Path to a TOML settings file
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// tracing filter used when RUST_LOG is unset
    #[arg(long)]
    pub log_filter: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub api_base_url: String,
    pub request_timeout_secs: u64,
    pub notification_secs: u64,
    pub log_filter: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:5000/api".into(),
            request_timeout_secs: 120,
            notification_secs: 6,
            log_filter: "info".into(),
        }
    }
}

impl Settings {
    pub fn request_timeout(&self) -> Option<Duration> {
        (self.request_timeout_secs > 0).then(|| Duration::from_secs(self.request_timeout_secs))
    }

    pub fn notification_ttl(&self) -> Duration {
        Duration::from_secs(self.notification_secs.max(1))
    }
}

#[derive(Debug, Default, Deserialize)]
struct FileSettings {
    api_base_url: Option<String>,
    request_timeout_secs: Option<u64>,
    notification_secs: Option<u64>,
    log_filter: Option<String>,
}

pub fn load_settings(args: &CliArgs) -> anyhow::Result<Settings> {
    let file_contents = match &args.config {
        Some(path) => Some(
            fs::read_to_string(path)
                .with_context(|| format!("failed to read config file {}", path.display()))?,
        ),
        None => default_config_paths()
            .into_iter()
            .find_map(|path| fs::read_to_string(path).ok()),
    };
    resolve_settings(args, file_contents.as_deref(), |name| std::env::var(name).ok())
}

fn default_config_paths() -> Vec<PathBuf> {
    let mut paths = vec![PathBuf::from(DEFAULT_CONFIG_FILE)];
    if let Some(dir) = dirs::config_dir() {
        paths.push(user_config_path(&dir));
    }
    paths
}

fn user_config_path(config_dir: &Path) -> PathBuf {
    config_dir.join(CONFIG_DIR_NAME).join("config.toml")
}

pub fn resolve_settings(
    args: &CliArgs,
    file_contents: Option<&str>,
    env: impl Fn(&str) -> Option<String>,
) -> anyhow::Result<Settings> {
    let mut settings = Settings::default();

    if let Some(raw) = file_contents {
        let file_cfg: FileSettings = toml::from_str(raw).context("malformed settings file")?;
        if let Some(v) = file_cfg.api_base_url {
            settings.api_base_url = v;
        }
        if let Some(v) = file_cfg.request_timeout_secs {
            settings.request_timeout_secs = v;
        }
        if let Some(v) = file_cfg.notification_secs {
            settings.notification_secs = v;
        }
        if let Some(v) = file_cfg.log_filter {
            settings.log_filter = v;
        }
    }

    if let Some(v) = non_empty(env("PITCH_DECK_API_URL")) {
        settings.api_base_url = v;
    }
    if let Some(v) = non_empty(env("PITCH_DECK_TIMEOUT_SECS")) {
        match v.parse::<u64>() {
            Ok(parsed) => settings.request_timeout_secs = parsed,
            Err(err) => bail!("PITCH_DECK_TIMEOUT_SECS must be a whole number of seconds: {err}"),
        }
    }

    if let Some(v) = &args.api_url {
        settings.api_base_url = v.clone();
    }
    if let Some(v) = args.timeout_secs {
        settings.request_timeout_secs = v;
    }
    if let Some(v) = &args.log_filter {
        settings.log_filter = v.clone();
    }

    client_core::normalize_base_url(&settings.api_base_url)?;
    Ok(settings)
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
