use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Environment variable holding the Telegram bot token.
pub const TOKEN_ENV: &str = "TELEGRAM_APIKEY";

/// Environment variable overriding the optional config file location.
pub const CONFIG_PATH_ENV: &str = "PORTFOLIO_BOT_CONFIG";

#[derive(Debug, Clone)]
pub struct Config {
    pub telegram: TelegramConfig,
    pub script: ScriptConfig,
}

#[derive(Debug, Clone)]
pub struct TelegramConfig {
    pub bot_token: String,
    pub poll_timeout_secs: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ScriptConfig {
    /// Directory holding the media referenced by upload messages
    #[serde(default = "default_assets_dir")]
    pub assets_dir: PathBuf,
}

impl Default for ScriptConfig {
    fn default() -> Self {
        Self {
            assets_dir: default_assets_dir(),
        }
    }
}

/// On-disk shape of `config.toml`. Every field is optional.
#[derive(Debug, Deserialize, Default)]
pub struct FileConfig {
    #[serde(default)]
    pub telegram: FileTelegramConfig,
    #[serde(default)]
    pub script: ScriptConfig,
}

#[derive(Debug, Deserialize, Default)]
pub struct FileTelegramConfig {
    #[serde(default)]
    pub bot_token: Option<String>,
    #[serde(default)]
    pub poll_timeout_secs: Option<u32>,
}

fn default_assets_dir() -> PathBuf {
    PathBuf::from("assets")
}

fn default_poll_timeout_secs() -> u32 {
    60
}

impl FileConfig {
    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse config file")
    }

    /// Reads the file if it exists; a missing file is an empty config.
    pub fn read(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::parse(&content)
    }
}

/// A missing `.env` is fine; one that exists but cannot be read or parsed is not.
fn check_dotenv(result: std::result::Result<PathBuf, dotenvy::Error>) -> Result<()> {
    match result {
        Ok(path) => {
            tracing::debug!("Loaded environment from {}", path.display());
            Ok(())
        }
        Err(e) if e.not_found() => {
            tracing::debug!("No .env file found, using process environment");
            Ok(())
        }
        Err(e) => Err(e).context("Error loading .env file"),
    }
}

impl Config {
    /// Path of the optional TOML file, from `PORTFOLIO_BOT_CONFIG` or `config.toml`.
    pub fn default_path() -> PathBuf {
        std::env::var_os(CONFIG_PATH_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("config.toml"))
    }

    /// Load the `.env` file, then the optional TOML file, and resolve the token.
    pub fn load(path: &Path) -> Result<Self> {
        check_dotenv(dotenvy::dotenv())?;
        let env_token = std::env::var(TOKEN_ENV).ok();

        let file = FileConfig::read(path)?;
        Self::resolve(file, env_token)
    }

    /// Merge the file config with the environment token. The environment wins.
    pub fn resolve(file: FileConfig, env_token: Option<String>) -> Result<Self> {
        let bot_token = env_token
            .filter(|t| !t.trim().is_empty())
            .or(file.telegram.bot_token.filter(|t| !t.trim().is_empty()))
            .with_context(|| format!("{} is not set", TOKEN_ENV))?;

        Ok(Config {
            telegram: TelegramConfig {
                bot_token,
                poll_timeout_secs: file
                    .telegram
                    .poll_timeout_secs
                    .unwrap_or_else(default_poll_timeout_secs),
            },
            script: file.script,
        })
    }
}
