//! Application state shared across all requests

use crate::config::{ServerConfig, StorageBackend};
use anyhow::Result;
use metrics_exporter_prometheus::PrometheusHandle;
use spendwise_classifiers::{load_corpus, ExpenseCategorizer, TextClassifier};
use spendwise_store::{JsonlStore, MemoryStore, SharedStore};
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
pub struct AppState {
    /// Loaded configuration
    pub config: Arc<ServerConfig>,

    /// Fitted categorizer, read-only after startup
    pub classifier: Arc<dyn TextClassifier>,

    /// Expense record store
    pub store: SharedStore,

    /// Prometheus metrics handle for rendering
    pub metrics_handle: Option<PrometheusHandle>,
}

impl AppState {
    /// Assemble state from already-built parts
    pub fn new(
        config: ServerConfig,
        classifier: Arc<dyn TextClassifier>,
        store: SharedStore,
    ) -> Self {
        Self {
            config: Arc::new(config),
            classifier,
            store,
            metrics_handle: None,
        }
    }

    /// Attach the Prometheus handle used by `/metrics`
    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics_handle = Some(handle);
        self
    }

    /// Fit the categorizer and open the store described by `config`
    pub fn from_config(config: ServerConfig) -> Result<Self> {
        info!("Initializing application state");

        let categorizer = match &config.classifier.corpus_path {
            Some(path) => {
                info!("Loading training corpus from: {}", path.display());
                ExpenseCategorizer::from_corpus(&load_corpus(path)?)?
            }
            None => {
                info!("Using embedded training corpus");
                ExpenseCategorizer::with_default_corpus()?
            }
        };
        info!(
            "Categorizer ready with {} categories",
            categorizer.labels()?.len()
        );

        let store: SharedStore = match config.storage.backend {
            StorageBackend::Jsonl => Arc::new(JsonlStore::open(&config.storage.path)?),
            StorageBackend::Memory => Arc::new(MemoryStore::new()),
        };
        info!("Using {} expense store", store.name());

        Ok(Self::new(config, Arc::new(categorizer), store))
    }
}
