use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub database: DatabaseConfig,
    pub mail: MailConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
        let log_format = match env::var("APP_LOG_FORMAT") {
            Ok(raw) => LogFormat::parse(&raw).ok_or(ConfigError::UnknownLogFormat(raw))?,
            Err(_) => LogFormat::Compact,
        };

        let database = DatabaseConfig {
            path: env::var("DATABASE_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("data/assessments.db")),
        };

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig {
                log_level,
                format: log_format,
            },
            database,
            mail: MailConfig::from_env()?,
        })
    }
}

/// Settings controlling the HTTP server binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        if self.host.eq_ignore_ascii_case("localhost") {
            return Ok(SocketAddr::new(IpAddr::from([127, 0, 0, 1]), self.port));
        }

        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|source| ConfigError::InvalidHost { source })?;

        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Compact,
    Json,
}

impl LogFormat {
    fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "compact" | "text" => Some(Self::Compact),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

/// Location of the assessment store.
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub path: PathBuf,
}

impl DatabaseConfig {
    pub fn is_in_memory(&self) -> bool {
        self.path.as_os_str() == ":memory:"
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MailProvider {
    Disabled,
    Http,
}

/// Outbound mail settings. The provider is configuration only; the pipeline sees a `Notifier`.
#[derive(Debug, Clone)]
pub struct MailConfig {
    pub provider: MailProvider,
    pub api_url: Option<String>,
    pub api_key: Option<String>,
    pub from: String,
}

impl MailConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let provider = match env::var("MAIL_PROVIDER") {
            Ok(raw) => match raw.trim().to_ascii_lowercase().as_str() {
                "" | "disabled" | "none" => MailProvider::Disabled,
                "http" => MailProvider::Http,
                _ => return Err(ConfigError::UnknownMailProvider(raw)),
            },
            Err(_) => MailProvider::Disabled,
        };

        let api_url = env::var("MAIL_API_URL").ok().filter(|value| !value.is_empty());
        let api_key = env::var("MAIL_API_KEY").ok().filter(|value| !value.is_empty());

        if provider == MailProvider::Http {
            if api_url.is_none() {
                return Err(ConfigError::MissingMailSetting("MAIL_API_URL"));
            }
            if api_key.is_none() {
                return Err(ConfigError::MissingMailSetting("MAIL_API_KEY"));
            }
        }

        let from = env::var("MAIL_FROM")
            .unwrap_or_else(|_| "AI Readiness <assessments@localhost>".to_string());

        Ok(Self {
            provider,
            api_url,
            api_key,
            from,
        })
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    UnknownLogFormat(String),
    UnknownMailProvider(String),
    MissingMailSetting(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::UnknownLogFormat(value) => {
                write!(f, "APP_LOG_FORMAT '{value}' is not one of compact, json")
            }
            ConfigError::UnknownMailProvider(value) => {
                write!(f, "MAIL_PROVIDER '{value}' is not one of disabled, http")
            }
            ConfigError::MissingMailSetting(name) => {
                write!(f, "{name} is required when MAIL_PROVIDER=http")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source } => Some(source),
            _ => None,
        }
    }
}
