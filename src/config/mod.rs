mod api;
mod export;
mod logging;

use std::env;
use crate::error::Error;

pub use self::api::ApiConfig;
pub use self::export::{parse_field_list, ExportConfig};
pub use self::logging::LoggingConfig;

#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    pub api: ApiConfig,
    pub export: ExportConfig,
    pub logging: LoggingConfig,
}

impl Config {
    pub fn from_env() -> Result<Self, Error> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    // Builds the configuration through an injectable lookup so tests can
    // supply variables without touching the process environment
    pub fn from_lookup<F>(lookup: F) -> Result<Self, Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let token = lookup("TRAMITES_API_TOKEN").unwrap_or_default();
        if token.is_empty() {
            return Err(Error::Config(
                "the TRAMITES_API_TOKEN environment variable is not set; \
                 make sure a valid .env file is present"
                    .to_string(),
            ));
        }

        let base_url = lookup("URL_API").unwrap_or_default();
        let nested_fields =
            parse_field_list(&lookup("CAMPOS_DATOS_EXPORTAR").unwrap_or_default());
        let directory = lookup("TRAMITES_LOG_DIR").unwrap_or_else(|| "logs".to_string());

        Ok(Config {
            api: ApiConfig { base_url, token },
            export: ExportConfig { nested_fields },
            logging: LoggingConfig { directory },
        })
    }
}
