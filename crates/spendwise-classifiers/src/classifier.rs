//! Classifier trait used by the request layer

use spendwise_core::Result;

/// Text-to-category classifier shared read-only across requests
pub trait TextClassifier: Send + Sync {
    /// Predict the category label for a text
    fn predict(&self, text: &str) -> Result<String>;

    /// Get the classifier name
    fn name(&self) -> &str;

    /// Labels this classifier can return, in sorted order
    fn labels(&self) -> Vec<String>;
}
