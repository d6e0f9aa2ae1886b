//! Application configuration loaded from environment variables.

use serde::Deserialize;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use strum::{Display, EnumString};
use url::Url;

/// Which acquisition strategy backs the data endpoint.
///
/// Exactly one is active per process; the two are alternative deployments of
/// the same endpoint contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    /// Read a JSON document from the local filesystem.
    #[strum(to_string = "file", serialize = "FILE")]
    #[serde(alias = "FILE")]
    File,
    /// Relay JSON fetched from a fixed upstream URL.
    #[strum(to_string = "remote", serialize = "REMOTE")]
    #[serde(alias = "REMOTE")]
    Remote,
}

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    // === Data Source ===
    /// Active source variant: `file` or `remote`.
    #[serde(default = "default_data_source")]
    pub data_source: SourceKind,

    /// JSON document served by the local-file variant.
    #[serde(default = "default_data_file_path")]
    pub data_file_path: PathBuf,

    /// Upstream JSON endpoint relayed by the remote-fetch variant.
    #[serde(default = "default_upstream_url")]
    pub upstream_url: String,

    // === Server Configuration ===
    /// Bind address for the HTTP server (an IPv4 or IPv6 literal).
    #[serde(default = "default_host")]
    pub bind_host: String,

    /// HTTP server port.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Install the Prometheus recorder and expose `/metrics`.
    #[serde(default = "default_true")]
    pub metrics_enabled: bool,

    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub rust_log: String,
}

fn default_data_source() -> SourceKind {
    SourceKind::File
}

fn default_data_file_path() -> PathBuf {
    PathBuf::from("src/meteodaten_2023_daily.json")
}

fn default_upstream_url() -> String {
    "https://data.stadt-zuerich.ch/dataset/ugz_meteodaten_tagesmittelwerte/download/ugz_ogd_meteo_d1_2023.json"
        .to_string()
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_true() -> bool {
    true
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_source: default_data_source(),
            data_file_path: default_data_file_path(),
            upstream_url: default_upstream_url(),
            bind_host: default_host(),
            port: default_port(),
            metrics_enabled: default_true(),
            rust_log: default_log_level(),
        }
    }
}

impl Config {
    /// Load configuration from environment, reading .env file first.
    pub fn load() -> Result<Self, envy::Error> {
        dotenvy::dotenv().ok();
        envy::from_env()
    }

    /// Check if the configuration is valid.
    pub fn validate(&self) -> Result<(), String> {
        self.bind_addr()?;

        match self.data_source {
            SourceKind::File => {
                if self.data_file_path.as_os_str().is_empty() {
                    return Err("DATA_FILE_PATH is required for the file source".to_string());
                }
            }
            SourceKind::Remote => {
                self.parsed_upstream_url()?;
            }
        }

        Ok(())
    }

    /// Parse the upstream URL, accepting only http(s).
    pub fn parsed_upstream_url(&self) -> Result<Url, String> {
        let url = Url::parse(&self.upstream_url)
            .map_err(|e| format!("UPSTREAM_URL is not a valid URL: {}", e))?;

        match url.scheme() {
            "http" | "https" => Ok(url),
            other => Err(format!("UPSTREAM_URL must use http or https, got {}", other)),
        }
    }

    /// Socket address for the HTTP listener.
    pub fn bind_addr(&self) -> Result<SocketAddr, String> {
        let ip: IpAddr = self
            .bind_host
            .parse()
            .map_err(|e| format!("BIND_HOST must be an IP address: {}", e))?;

        Ok(SocketAddr::new(ip, self.port))
    }
}
