//! Server configuration

use crate::cli::Cli;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Listen address
    #[serde(default = "default_listen")]
    pub listen: String,

    /// Listen port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Record storage
    #[serde(default)]
    pub storage: StorageConfig,

    /// Categorizer training data
    #[serde(default)]
    pub classifier: ClassifierConfig,

    /// Cross-origin settings
    #[serde(default)]
    pub cors: CorsConfig,

    /// Default page size for listing expenses
    #[serde(default = "default_page_size")]
    pub default_page_size: usize,
}

impl ServerConfig {
    /// Load configuration from file and CLI overrides
    pub fn load(cli: &Cli) -> anyhow::Result<Self> {
        // Try to load from file, or use defaults
        let mut config = if Path::new(&cli.config).exists() {
            let content = std::fs::read_to_string(&cli.config)?;
            serde_yaml::from_str(&content)?
        } else {
            Self::default()
        };

        // Apply CLI overrides
        if let Some(listen) = &cli.listen {
            config.listen = listen.clone();
        }

        if let Some(port) = cli.port {
            config.port = port;
        }

        if let Some(data) = &cli.data {
            config.storage = StorageConfig {
                backend: StorageBackend::Jsonl,
                path: PathBuf::from(data),
            };
        }

        if let Some(corpus) = &cli.corpus {
            config.classifier.corpus_path = Some(PathBuf::from(corpus));
        }

        Ok(config)
    }

    /// `listen:port`
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.listen, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen: default_listen(),
            port: default_port(),
            storage: StorageConfig::default(),
            classifier: ClassifierConfig::default(),
            cors: CorsConfig::default(),
            default_page_size: default_page_size(),
        }
    }
}

/// Storage configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default)]
    pub backend: StorageBackend,

    /// Backing file for the JSON-lines backend
    #[serde(default = "default_data_path")]
    pub path: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::default(),
            path: default_data_path(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// Append-only file, survives restarts
    #[default]
    Jsonl,
    /// Process memory only
    Memory,
}

/// Categorizer configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClassifierConfig {
    /// YAML training corpus; the embedded corpus is used when unset
    #[serde(default)]
    pub corpus_path: Option<PathBuf>,
}

/// CORS configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorsConfig {
    /// Allow requests from any origin
    #[serde(default = "default_true")]
    pub allow_any_origin: bool,

    /// Allowed origins when `allow_any_origin` is off
    #[serde(default)]
    pub allowed_origins: Vec<String>,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allow_any_origin: true,
            allowed_origins: Vec::new(),
        }
    }
}

fn default_listen() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_data_path() -> PathBuf {
    PathBuf::from("./data/expenses.jsonl")
}

fn default_page_size() -> usize {
    100
}

fn default_true() -> bool {
    true
}
