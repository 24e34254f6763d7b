use clap::{Args, ValueEnum};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Clone, Debug, Args)]
pub struct Config {
    /// Base URL of the Rehber backend
    #[arg(long, env = "REHBER_API_URL", default_value = "http://localhost:5000", global = true)]
    pub api_url: String,

    /// Directory for settings.json (defaults to ~/.rehber)
    #[arg(long, env = "REHBER_DATA_DIR", global = true)]
    pub data_dir: Option<PathBuf>,

    /// Keep the session in memory only instead of the OS keyring
    #[arg(long, env = "REHBER_NO_KEYRING", global = true)]
    pub no_keyring: bool,

    #[command(flatten)]
    pub http: HttpConfig,

    #[command(flatten)]
    pub telemetry: TelemetryConfig,
}

#[derive(Clone, Debug, Args)]
pub struct HttpConfig {
    /// Whole-request timeout in seconds
    #[arg(long, env = "REHBER_REQUEST_TIMEOUT_SECS", default_value_t = 40, global = true)]
    pub request_timeout_secs: u64,

    /// Connection timeout in seconds
    #[arg(long, env = "REHBER_CONNECT_TIMEOUT_SECS", default_value_t = 10, global = true)]
    pub connect_timeout_secs: u64,
}

impl HttpConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.max(1))
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs.max(1))
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

#[derive(Clone, Debug, Args)]
pub struct TelemetryConfig {
    /// Log output format
    #[arg(long, env = "REHBER_LOG_FORMAT", value_enum, default_value_t = LogFormat::Text, global = true)]
    pub log_format: LogFormat,

    /// Default log filter when RUST_LOG is unset
    #[arg(long, env = "REHBER_LOG_LEVEL", default_value = "warn", global = true)]
    pub log_level: String,
}

impl Config {
    pub fn data_dir(&self) -> PathBuf {
        if let Some(dir) = &self.data_dir {
            return dir.clone();
        }
        std::env::var_os("HOME")
            .or_else(|| std::env::var_os("USERPROFILE"))
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".rehber")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct Harness {
        #[command(flatten)]
        config: Config,
    }

    #[test]
    fn defaults_match_backend_expectations() {
        let config = Harness::try_parse_from(["rehber"]).unwrap().config;
        assert_eq!(config.http.request_timeout(), Duration::from_secs(40));
        assert_eq!(config.http.connect_timeout(), Duration::from_secs(10));
        assert_eq!(config.telemetry.log_format, LogFormat::Text);
    }

    #[test]
    fn flags_override_defaults() {
        let config = Harness::try_parse_from([
            "rehber",
            "--api-url",
            "https://rehber.example.com",
            "--data-dir",
            "/tmp/rehber-test",
            "--log-format",
            "json",
            "--no-keyring",
        ])
        .unwrap()
        .config;
        assert_eq!(config.api_url, "https://rehber.example.com");
        assert_eq!(config.data_dir(), PathBuf::from("/tmp/rehber-test"));
        assert_eq!(config.telemetry.log_format, LogFormat::Json);
        assert!(config.no_keyring);
    }
}
