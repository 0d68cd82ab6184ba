//! Configuration module
//!
//! Environment-based configuration for the API service: database, storage,
//! authentication, and upload limits. Loaded once at startup and validated
//! before anything else runs.

use std::env;

const MAX_CONNECTIONS: u32 = 20;
const CONNECTION_TIMEOUT_SECS: u64 = 30;
const DEFAULT_SERVER_PORT: u16 = 3000;
const DEFAULT_MAX_RESUME_SIZE_BYTES: usize = 10 * 1024 * 1024;

/// Which storage backend to use for resume bytes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StorageBackend {
    S3,
    Local,
}

impl StorageBackend {
    fn parse(s: &str) -> Result<Self, anyhow::Error> {
        match s.to_lowercase().as_str() {
            "s3" => Ok(StorageBackend::S3),
            "local" => Ok(StorageBackend::Local),
            other => Err(anyhow::anyhow!(
                "Invalid STORAGE_BACKEND '{}': must be 's3' or 'local'",
                other
            )),
        }
    }
}

/// Application configuration.
#[derive(Clone, Debug)]
pub struct Config {
    server_port: u16,
    cors_origins: Vec<String>,
    environment: String,
    database_url: String,
    db_max_connections: u32,
    db_timeout_seconds: u64,
    jwt_secret: String,
    storage_backend: StorageBackend,
    s3_bucket: Option<String>,
    s3_region: Option<String>,
    s3_endpoint: Option<String>,
    local_storage_path: Option<String>,
    local_storage_base_url: Option<String>,
    max_resume_size_bytes: usize,
    allowed_content_types: Vec<String>,
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_parse<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

fn env_list(key: &str, default: &str) -> Vec<String> {
    env_or(key, default)
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

impl Config {
    /// Load configuration from the environment (reads `.env` if present).
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();

        let config = Config {
            server_port: env_parse("SERVER_PORT", DEFAULT_SERVER_PORT),
            cors_origins: env_list("CORS_ORIGINS", "*"),
            environment: env_or("ENVIRONMENT", "development"),
            database_url: env::var("DATABASE_URL")
                .map_err(|_| anyhow::anyhow!("DATABASE_URL is required"))?,
            db_max_connections: env_parse("DB_MAX_CONNECTIONS", MAX_CONNECTIONS),
            db_timeout_seconds: env_parse("DB_TIMEOUT_SECONDS", CONNECTION_TIMEOUT_SECS),
            jwt_secret: env::var("JWT_SECRET")
                .map_err(|_| anyhow::anyhow!("JWT_SECRET is required"))?,
            storage_backend: StorageBackend::parse(&env_or("STORAGE_BACKEND", "s3"))?,
            s3_bucket: env::var("S3_BUCKET").ok(),
            s3_region: env::var("S3_REGION").ok(),
            s3_endpoint: env::var("S3_ENDPOINT").ok(),
            local_storage_path: env::var("LOCAL_STORAGE_PATH").ok(),
            local_storage_base_url: env::var("LOCAL_STORAGE_BASE_URL").ok(),
            max_resume_size_bytes: env_parse(
                "MAX_RESUME_SIZE_BYTES",
                DEFAULT_MAX_RESUME_SIZE_BYTES,
            ),
            allowed_content_types: env_list("ALLOWED_CONTENT_TYPES", "application/pdf"),
        };

        config.validate()?;
        Ok(config)
    }

    /// Fail fast on misconfiguration: backend-specific settings must be present.
    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.jwt_secret.len() < 32 {
            anyhow::bail!("JWT_SECRET must be at least 32 characters");
        }
        match self.storage_backend {
            StorageBackend::S3 => {
                if self.s3_bucket.is_none() || self.s3_region.is_none() {
                    anyhow::bail!("S3_BUCKET and S3_REGION are required for the s3 backend");
                }
            }
            StorageBackend::Local => {
                if self.local_storage_path.is_none() || self.local_storage_base_url.is_none() {
                    anyhow::bail!(
                        "LOCAL_STORAGE_PATH and LOCAL_STORAGE_BASE_URL are required for the local backend"
                    );
                }
            }
        }
        if self.max_resume_size_bytes == 0 {
            anyhow::bail!("MAX_RESUME_SIZE_BYTES must be greater than zero");
        }
        Ok(())
    }

    pub fn is_production(&self) -> bool {
        let env = self.environment.to_lowercase();
        env == "production" || env == "prod"
    }

    pub fn server_port(&self) -> u16 {
        self.server_port
    }

    pub fn cors_origins(&self) -> &[String] {
        &self.cors_origins
    }

    pub fn environment(&self) -> &str {
        &self.environment
    }

    pub fn database_url(&self) -> &str {
        &self.database_url
    }

    pub fn db_max_connections(&self) -> u32 {
        self.db_max_connections
    }

    pub fn db_timeout_seconds(&self) -> u64 {
        self.db_timeout_seconds
    }

    pub fn jwt_secret(&self) -> &str {
        &self.jwt_secret
    }

    pub fn storage_backend(&self) -> StorageBackend {
        self.storage_backend
    }

    pub fn s3_bucket(&self) -> Option<&str> {
        self.s3_bucket.as_deref()
    }

    pub fn s3_region(&self) -> Option<&str> {
        self.s3_region.as_deref()
    }

    pub fn s3_endpoint(&self) -> Option<&str> {
        self.s3_endpoint.as_deref()
    }

    pub fn local_storage_path(&self) -> Option<&str> {
        self.local_storage_path.as_deref()
    }

    pub fn local_storage_base_url(&self) -> Option<&str> {
        self.local_storage_base_url.as_deref()
    }

    pub fn max_resume_size_bytes(&self) -> usize {
        self.max_resume_size_bytes
    }

    pub fn allowed_content_types(&self) -> &[String] {
        &self.allowed_content_types
    }

    /// Test configuration pointing at a caller-provided database and local storage.
    pub fn for_tests(database_url: &str, storage_path: &str) -> Self {
        Config {
            server_port: 0,
            cors_origins: vec!["*".to_string()],
            environment: "test".to_string(),
            database_url: database_url.to_string(),
            db_max_connections: 5,
            db_timeout_seconds: 30,
            jwt_secret: "test-secret-test-secret-test-secret-42".to_string(),
            storage_backend: StorageBackend::Local,
            s3_bucket: None,
            s3_region: None,
            s3_endpoint: None,
            local_storage_path: Some(storage_path.to_string()),
            local_storage_base_url: Some("http://localhost:3000/files".to_string()),
            max_resume_size_bytes: DEFAULT_MAX_RESUME_SIZE_BYTES,
            allowed_content_types: vec!["application/pdf".to_string()],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_backend_parse() {
        assert_eq!(StorageBackend::parse("s3").unwrap(), StorageBackend::S3);
        assert_eq!(StorageBackend::parse("S3").unwrap(), StorageBackend::S3);
        assert_eq!(
            StorageBackend::parse("local").unwrap(),
            StorageBackend::Local
        );
        assert!(StorageBackend::parse("gcs").is_err());
    }

    #[test]
    fn test_test_config_validates() {
        let config = Config::for_tests("postgresql://localhost/test", "/tmp/resumes");
        assert!(config.validate().is_ok());
        assert!(!config.is_production());
        assert_eq!(config.allowed_content_types(), &["application/pdf"]);
    }

    #[test]
    fn test_validate_rejects_short_jwt_secret() {
        let mut config = Config::for_tests("postgresql://localhost/test", "/tmp/resumes");
        config.jwt_secret = "short".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_requires_backend_settings() {
        let mut config = Config::for_tests("postgresql://localhost/test", "/tmp/resumes");
        config.storage_backend = StorageBackend::S3;
        assert!(config.validate().is_err());
    }
}
