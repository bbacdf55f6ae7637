use std::{
    env,
    net::SocketAddr,
    path::{Path, PathBuf},
};

use thiserror::Error;

#[derive(Debug, Clone)]
pub struct Config {
    pub zammad_url: String,
    pub zammad_token: String,
    pub bind_addr: String,
    pub bind_port: u16,
    pub api_token: Option<String>,
    pub tls: Option<TlsConfig>,
}

#[derive(Debug, Clone)]
pub enum TlsConfig {
    Provided { cert: PathBuf, key: PathBuf },
    SelfSigned { hostname: String, cert_dir: PathBuf },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("ZAMMAD_URL is required and must not be empty")]
    MissingZammadUrl,
    #[error("ZAMMAD_API_TOKEN is required and must not be empty")]
    MissingZammadToken,
    #[error("BIND_PORT must be a valid u16")]
    InvalidPort,
    #[error("GATEWAY_TLS_CERT and GATEWAY_TLS_KEY must be provided together")]
    IncompleteTlsPair,
    #[error("invalid bind address or port")]
    InvalidSocket,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let zammad_url = non_empty_env("ZAMMAD_URL")
            .map(|url| url.trim_end_matches('/').to_string())
            .ok_or(ConfigError::MissingZammadUrl)?;
        let zammad_token = non_empty_env("ZAMMAD_API_TOKEN").ok_or(ConfigError::MissingZammadToken)?;

        let bind_addr = env::var("BIND_ADDR").unwrap_or_else(|_| "127.0.0.1".to_string());
        let bind_port = env::var("BIND_PORT")
            .ok()
            .map(|value| value.parse::<u16>().map_err(|_| ConfigError::InvalidPort))
            .transpose()?
            .unwrap_or(8080);

        let api_token = non_empty_env("GATEWAY_API_TOKEN");
        let tls = tls_from_env()?;

        let config = Self {
            zammad_url,
            zammad_token,
            bind_addr,
            bind_port,
            api_token,
            tls,
        };

        let _ = config.bind_socket()?;
        Ok(config)
    }

    pub fn bind_socket(&self) -> Result<SocketAddr, ConfigError> {
        format!("{}:{}", self.bind_addr, self.bind_port)
            .parse::<SocketAddr>()
            .map_err(|_| ConfigError::InvalidSocket)
    }
}

fn tls_from_env() -> Result<Option<TlsConfig>, ConfigError> {
    let cert = non_empty_env("GATEWAY_TLS_CERT");
    let key = non_empty_env("GATEWAY_TLS_KEY");

    match (cert, key) {
        (Some(cert), Some(key)) => Ok(Some(TlsConfig::Provided {
            cert: Path::new(&cert).to_path_buf(),
            key: Path::new(&key).to_path_buf(),
        })),
        (None, None) => {
            let generate = non_empty_env("GATEWAY_TLS_GENERATE")
                .map(|value| value.eq_ignore_ascii_case("true") || value == "1")
                .unwrap_or(false);
            if !generate {
                return Ok(None);
            }

            let hostname =
                non_empty_env("GATEWAY_TLS_HOSTNAME").unwrap_or_else(|| "localhost".to_string());
            let cert_dir = non_empty_env("GATEWAY_TLS_DIR").unwrap_or_else(|| ".certs".to_string());
            Ok(Some(TlsConfig::SelfSigned {
                hostname,
                cert_dir: Path::new(&cert_dir).to_path_buf(),
            }))
        }
        _ => Err(ConfigError::IncompleteTlsPair),
    }
}

fn non_empty_env(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}
