mod api_client;
mod environment;

pub use api_client::{ApiClientSettings, UrlWrapper};
use environment::Environment;

use serde::Deserialize;

#[derive(Clone, Debug, Deserialize)]
pub struct Config {
    pub api_client: ApiClientSettings,
}

impl Config {
    /// Reads `config/base.yaml`, then the file named by `APP_ENVIRONMENT`
    /// (`local` by default), then `APP_`-prefixed environment variables such
    /// as `APP_API_CLIENT__API_KEY`.
    pub fn init() -> Result<Self, config::ConfigError> {
        let base_path = std::env::current_dir()
            .map_err(|e| config::ConfigError::Message(e.to_string()))?;
        let config_directory = base_path.join("config");
        let environment: Environment = std::env::var("APP_ENVIRONMENT")
            .unwrap_or_else(|_| "local".into())
            .try_into()
            .map_err(config::ConfigError::Message)?;
        let config_file = format!("{}.yaml", environment.as_str());
        config::Config::builder()
            .add_source(config::File::from(config_directory.join("base.yaml")))
            .add_source(config::File::from(config_directory.join(config_file)))
            .add_source(
                config::Environment::with_prefix("APP")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?
            .try_deserialize::<Self>()
    }
}
