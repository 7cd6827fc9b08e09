use crate::error::{to_env_var, ConfigError};
use config::{Config, Environment};
use orchestration_parser::{ListFlattening, ParserOptions};
use serde::Deserialize;
use std::net::SocketAddr;

#[derive(Debug, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        ServerSettings {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl ServerSettings {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        format!("{}:{}", self.host, self.port).parse().map_err(|_| {
            ConfigError::Other(config::ConfigError::Message(format!(
                "invalid value for {}: {}",
                to_env_var("server.host"),
                self.host
            )))
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub parser: ParserOptions,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        Self::load_and_validate()
    }

    fn load_and_validate() -> Result<Self, ConfigError> {
        let config = Config::builder()
            .set_default("server.host", default_host())?
            .set_default("server.port", default_port())?
            .set_default(
                "parser.list_flattening",
                ListFlattening::default().to_string(),
            )?
            .add_source(
                Environment::with_prefix("PARSER")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let result: Result<Self, config::ConfigError> = config.try_deserialize();

        match result {
            Ok(settings) => Ok(settings),
            Err(err) => {
                tracing::debug!("Configuration error: {:?}", &err);

                // "missing field `port`" style errors name the field, not the path
                let error_str = err.to_string();
                if error_str.starts_with("missing field") {
                    let field = error_str
                        .trim_start_matches("missing field `")
                        .trim_end_matches('`');
                    let env_var = to_env_var(field);
                    Err(ConfigError::MissingEnvVar { env_var })
                } else if let config::ConfigError::NotFound(field) = &err {
                    let env_var = to_env_var(field);
                    Err(ConfigError::MissingEnvVar { env_var })
                } else {
                    Err(ConfigError::Other(err))
                }
            }
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}
