use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub telegram: TelegramConfig,
    #[serde(default = "default_messages_config")]
    pub messages: MessagesConfig,
    #[serde(default = "default_storage_config")]
    pub storage: StorageConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct TelegramConfig {
    pub bot_token: String,
    /// Chat id of the staff group user messages are forwarded into
    pub group_id: i64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct MessagesConfig {
    #[serde(default = "default_welcome_message")]
    pub welcome_message: String,
    #[serde(default = "default_confirmation_message")]
    pub confirmation_message: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StorageConfig {
    #[serde(default = "default_db_path")]
    pub database_path: PathBuf,
}

fn default_welcome_message() -> String {
    "Hello! Send me a message and I'll pass it on to the team.".to_string()
}

fn default_confirmation_message() -> String {
    "Your message has been passed on to the team. A reply will arrive here."
        .to_string()
}

fn default_db_path() -> PathBuf {
    PathBuf::from("relay.db")
}

fn default_messages_config() -> MessagesConfig {
    MessagesConfig {
        welcome_message: default_welcome_message(),
        confirmation_message: default_confirmation_message(),
    }
}

fn default_storage_config() -> StorageConfig {
    StorageConfig {
        database_path: default_db_path(),
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }
}
