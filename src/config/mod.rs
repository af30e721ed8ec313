use std::time::Duration;

use serde::Deserialize;

static CONFIG: OnceCell<Config> = OnceCell::const_new();

mod config_dir;
pub use config_dir::{find_config_file, read_config, read_config_from};

mod error;
pub use error::{ConfigError, ConfigResult};
use tokio::sync::OnceCell;

/// Environment variable consulted when `llm.api_key` is absent from the file.
pub static LLM_API_KEY_ENV: &str = "LLM_API_KEY";

#[derive(Debug, Deserialize)]
pub struct Config {
    host: Host,
    app: App,
    llm: Llm,
}

#[derive(Debug, Deserialize)]
pub struct Host {
    bindto: String,
}

#[derive(Debug, Deserialize)]
pub struct App {
    database_uri: String,
    #[serde(default)]
    docs: bool,
    #[serde(default = "App::default_session_idle_minutes")]
    session_idle_minutes: u64,
}

#[derive(Debug, Deserialize)]
pub struct Llm {
    base_url: String,
    model: String,
    api_key: Option<String>,
    #[serde(default = "Llm::default_timeout_secs")]
    timeout_secs: u64,
    #[serde(default = "Llm::default_tree_temperature")]
    tree_temperature: f32,
    #[serde(default = "Llm::default_content_temperature")]
    content_temperature: f32,
}

impl Config {
    #[tracing::instrument]
    pub async fn get_or_init(use_local: bool) -> &'static Config {
        CONFIG
            .get_or_init(|| async {
                let read_cfg = |use_local| -> ConfigResult<Self> {
                    let bytes = read_config(use_local)?;
                    let config: Self = toml::from_slice(&bytes)?;
                    Ok(config)
                };

                let config = match read_cfg(use_local) {
                    Ok(c) => c,
                    Err(e) => {
                        if !matches!(e, error::ConfigError::ConfigNotFound) {
                            crate::error::log_error(&e);
                        }
                        tracing::error!("Config not found.");
                        std::process::exit(1);
                    }
                };

                config
            })
            .await
    }

    pub fn from_toml(raw: &str) -> ConfigResult<Self> {
        Ok(toml::from_str(raw)?)
    }

    #[inline]
    pub fn host(&self) -> &Host {
        &self.host
    }

    #[inline]
    pub fn app(&self) -> &App {
        &self.app
    }

    #[inline]
    pub fn llm(&self) -> &Llm {
        &self.llm
    }
}

impl Host {
    #[inline]
    pub fn bindto(&self) -> &str {
        &self.bindto
    }
}

impl App {
    fn default_session_idle_minutes() -> u64 {
        12 * 60
    }

    #[inline]
    pub fn database_uri(&self) -> &str {
        &self.database_uri
    }

    #[inline]
    pub fn docs(&self) -> bool {
        self.docs
    }

    /// Learner sessions untouched for this long are forgotten.
    #[inline]
    pub fn session_idle_timeout(&self) -> Duration {
        Duration::from_secs(self.session_idle_minutes * 60)
    }
}

impl Llm {
    fn default_timeout_secs() -> u64 {
        120
    }

    fn default_tree_temperature() -> f32 {
        0.5
    }

    fn default_content_temperature() -> f32 {
        0.3
    }

    #[inline]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    #[inline]
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Key from the config file, or from `LLM_API_KEY` when the file omits it.
    pub fn api_key(&self) -> ConfigResult<String> {
        if let Some(key) = &self.api_key {
            return Ok(key.clone());
        }

        std::env::var(LLM_API_KEY_ENV).map_err(|_| ConfigError::MissingApiKey)
    }

    #[inline]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    #[inline]
    pub fn tree_temperature(&self) -> f32 {
        self.tree_temperature
    }

    #[inline]
    pub fn content_temperature(&self) -> f32 {
        self.content_temperature
    }
}
