/*
 * Responsibility
 * - 環境変数や設定の読み込み (bind host/port, CORS 許可, storage backend)
 * - 設定値のバリデーション (不足なら起動失敗)
 */
use std::fmt;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnv {
    Development,
    Production,
}

impl AppEnv {
    fn parse(value: &str) -> Self {
        match value.to_ascii_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            _ => Self::Development,
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Missing(&'static str),
    Invalid(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Missing(key) => write!(f, "missing configuration: {}", key),
            ConfigError::Invalid(key) => write!(f, "invalid configuration: {}", key),
        }
    }
}

impl std::error::Error for ConfigError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageConfig {
    /// JSON file storage (`HBNB_TYPE_STORAGE` unset or anything but `db`).
    File { path: PathBuf },
    /// PostgreSQL (`HBNB_TYPE_STORAGE=db`).
    Db { database_url: String },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,

    pub app_env: AppEnv,
    pub cors_allowed_origins: Vec<String>,

    pub storage: StorageConfig,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let host = lookup("HBNB_API_HOST")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| "0.0.0.0".to_string());

        let port: u16 = match lookup("HBNB_API_PORT") {
            Some(s) => s
                .trim()
                .parse()
                .map_err(|_| ConfigError::Invalid("HBNB_API_PORT"))?,
            None => 5000,
        };

        let app_env = lookup("APP_ENV")
            .map(|v| AppEnv::parse(&v))
            .unwrap_or(AppEnv::Development);

        let cors_allowed_origins = lookup("CORS_ALLOWED_ORIGINS")
            .unwrap_or_default()
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>();

        let storage = match lookup("HBNB_TYPE_STORAGE").as_deref() {
            Some("db") => StorageConfig::Db {
                database_url: lookup("DATABASE_URL")
                    .ok_or(ConfigError::Missing("DATABASE_URL"))?,
            },
            _ => StorageConfig::File {
                path: lookup("HBNB_FILE_PATH")
                    .unwrap_or_else(|| "file.json".to_string())
                    .into(),
            },
        };

        Ok(Self {
            host,
            port,
            app_env,
            cors_allowed_origins,
            storage,
        })
    }
}
