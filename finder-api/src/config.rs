use std::{path::Path, str::FromStr, time::Duration};

use github_search::ClientOptions;
use serde::Deserialize;
use serde_with::serde_as;
use strum::{Display, EnumString};

use crate::domain::search::SearchConfig;

#[derive(Deserialize, Clone)]
pub struct Settings {
    pub application: ApplicationSettings,
    #[serde(default)]
    pub auth: AuthSettings,
    pub github: GithubSettings,
    pub search: SearchSettings,
}

#[serde_as]
#[derive(Deserialize, Clone, Debug)]
pub struct ApplicationSettings {
    #[serde_as(as = "serde_with::DisplayFromStr")]
    pub port: u16,
    pub host: String,
    pub disable_auth: bool,
    /// Empty means any origin is allowed.
    #[serde(default)]
    pub cors_allowed_origins: Vec<String>,
}

#[derive(Deserialize, Clone, Debug, Default)]
pub struct AuthSettings {
    /// HMAC secret used to verify bearer tokens.
    pub secret: Option<String>,
}

#[serde_as]
#[derive(Deserialize, Clone)]
pub struct GithubSettings {
    pub api_url: String,
    pub token: Option<String>,
    pub user_agent: String,
    #[serde_as(as = "serde_with::DisplayFromStr")]
    pub timeout_secs: u64,
}

#[serde_as]
#[derive(Deserialize, Clone, Debug)]
pub struct SearchSettings {
    #[serde_as(as = "serde_with::DisplayFromStr")]
    pub default_limit: u32,
    #[serde_as(as = "serde_with::DisplayFromStr")]
    pub max_limit: u32,
}

impl GithubSettings {
    pub fn client_options(&self) -> ClientOptions {
        ClientOptions {
            api_url: self.api_url.clone(),
            token: self.token.clone().filter(|t| !t.is_empty()),
            user_agent: self.user_agent.clone(),
            timeout: Duration::from_secs(self.timeout_secs),
        }
    }
}

impl From<&SearchSettings> for SearchConfig {
    fn from(settings: &SearchSettings) -> Self {
        Self {
            default_limit: settings.default_limit,
            max_limit: settings.max_limit,
        }
    }
}

pub fn read_config() -> Result<Settings, config::ConfigError> {
    let base_path = std::env::current_dir()
        .map_err(|e| config::ConfigError::Message(format!("current directory: {}", e)))?;

    load_settings(&base_path.join("config"), std::env::vars().collect())
}

/// Builds the settings from the files in `config_directory` and the given environment.
fn load_settings(
    config_directory: &Path,
    vars: config::Map<String, String>,
) -> Result<Settings, config::ConfigError> {
    let environment = Environment::from_str(
        vars.get("APP_ENVIRONMENT")
            .map(String::as_str)
            .unwrap_or("local"),
    )
    .map_err(|e| config::ConfigError::Message(format!("APP_ENVIRONMENT: {}", e)))?;
    let environment_filename = format!("{}.yaml", environment);

    let mut builder = config::Config::builder()
        .add_source(config::File::from(config_directory.join("base.yaml")))
        .add_source(config::File::from(config_directory.join(environment_filename)).required(false));

    // Plain deployment variables win over the files and FINDER_* variables.
    for (key, var) in [
        ("github.token", "GITHUB_TOKEN"),
        ("auth.secret", "SECRET"),
        ("application.port", "PORT"),
    ] {
        if let Some(value) = vars.get(var) {
            builder = builder.set_override(key, value.as_str())?;
        }
    }

    let settings = builder
        .add_source(
            config::Environment::with_prefix("FINDER")
                .prefix_separator("_")
                .separator("__")
                .source(Some(vars)),
        )
        .build()?;

    settings.try_deserialize::<Settings>()
}

#[derive(Display, Debug, EnumString, PartialEq, Eq)]
pub enum Environment {
    #[strum(ascii_case_insensitive, serialize = "local")]
    Local,
    #[strum(ascii_case_insensitive, serialize = "production")]
    Production,
}
