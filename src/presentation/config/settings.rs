use crate::domain::{DEFAULT_MAX_LENGTH, DEFAULT_TOP_K};
use crate::presentation::config::Environment;

/// Runtime configuration, read from the environment with defaults. Missing
/// credentials are not an error here; the storage factory rejects them when
/// the S3 provider is actually selected.
#[derive(Debug, Clone)]
pub struct Settings {
    pub environment: Environment,
    pub log_json: bool,
    pub server: ServerSettings,
    pub model: ModelSettings,
    pub segmentation: SegmentationSettings,
    pub storage: StorageSettings,
}

#[derive(Debug, Clone)]
pub struct ServerSettings {
    pub port: u16,
}

#[derive(Debug, Clone)]
pub struct ModelSettings {
    pub provider: GeneratorProviderSetting,
    pub model_dir: String,
    pub model_url: String,
    pub max_length: usize,
    pub top_k: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeneratorProviderSetting {
    Local,
    Mock,
}

#[derive(Debug, Clone)]
pub struct SegmentationSettings {
    pub max_block_size: usize,
}

#[derive(Debug, Clone)]
pub struct StorageSettings {
    pub provider: StorageProviderSetting,
    pub local_path: String,
    pub s3_bucket: Option<String>,
    pub s3_region: String,
    pub aws_access_key: Option<String>,
    pub aws_secret_key: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageProviderSetting {
    Local,
    S3,
}

impl Settings {
    pub fn from_env() -> Self {
        Self {
            environment: std::env::var("APP_ENVIRONMENT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(Environment::Local),
            log_json: std::env::var("LOG_JSON")
                .map(|v| v.to_lowercase() == "true" || v == "1")
                .unwrap_or(false),
            server: ServerSettings {
                port: env_parse("SERVER_PORT", 8080),
            },
            model: ModelSettings {
                provider: match env_string("GENERATOR_PROVIDER", "local").to_lowercase().as_str() {
                    "mock" => GeneratorProviderSetting::Mock,
                    _ => GeneratorProviderSetting::Local,
                },
                model_dir: env_string("MODEL_DIR", "./Llama-3.2-1B"),
                model_url: env_string("MODEL_URL", "https://example.com/model.tar.gz"),
                max_length: env_parse("MAX_LENGTH", DEFAULT_MAX_LENGTH),
                top_k: env_parse("TOP_K", DEFAULT_TOP_K),
            },
            segmentation: SegmentationSettings {
                max_block_size: env_parse("MAX_BLOCK_SIZE", 3000),
            },
            storage: StorageSettings {
                provider: match env_string("STORAGE_PROVIDER", "s3").to_lowercase().as_str() {
                    "local" => StorageProviderSetting::Local,
                    _ => StorageProviderSetting::S3,
                },
                local_path: env_string("LOCAL_STORAGE_PATH", "./storage"),
                s3_bucket: std::env::var("S3_BUCKET_NAME").ok(),
                s3_region: env_string("S3_REGION", "us-east-1"),
                aws_access_key: std::env::var("AWS_ACCESS_KEY").ok(),
                aws_secret_key: std::env::var("AWS_SECRET_KEY").ok(),
            },
        }
    }
}

fn env_string(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_parse<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
