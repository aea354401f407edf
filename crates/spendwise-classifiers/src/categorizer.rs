//! Expense categorizer: TF-IDF features feeding a multinomial naive Bayes model

use crate::classifier::TextClassifier;
use crate::corpus::{default_corpus, LabeledExample};
use crate::naive_bayes::MultinomialNb;
use crate::vectorizer::{FeatureVector, TfidfVectorizer};
use spendwise_core::{Error, Result};
use std::time::Instant;
use tracing::{debug, info};

/// Fitted vectorizer and classifier, always built together
#[derive(Debug, Clone)]
struct FittedModel {
    vectorizer: TfidfVectorizer,
    classifier: MultinomialNb,
}

/// Composed categorizer owning both the feature extractor and the classifier.
///
/// The classifier's input dimension is the vectorizer's vocabulary size; both
/// are fit together, so a fitted categorizer always has them in agreement.
#[derive(Debug, Clone)]
pub struct ExpenseCategorizer {
    name: String,
    model: Option<FittedModel>,
}

impl Default for ExpenseCategorizer {
    fn default() -> Self {
        Self::new()
    }
}

impl ExpenseCategorizer {
    /// Create an unfitted categorizer
    pub fn new() -> Self {
        Self::with_name("expense-categorizer")
    }

    pub fn with_name(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            model: None,
        }
    }

    /// Create a categorizer fit on the given corpus
    pub fn from_corpus(corpus: &[LabeledExample]) -> Result<Self> {
        let mut categorizer = Self::new();
        categorizer.fit(corpus)?;
        Ok(categorizer)
    }

    /// Create a categorizer fit on the embedded expense corpus
    pub fn with_default_corpus() -> Result<Self> {
        Self::from_corpus(&default_corpus())
    }

    pub fn is_fitted(&self) -> bool {
        self.model.is_some()
    }

    /// Fit the vectorizer and classifier on a labeled corpus.
    ///
    /// On error the categorizer keeps whatever state it had before the call.
    pub fn fit(&mut self, corpus: &[LabeledExample]) -> Result<()> {
        let start = Instant::now();
        let texts: Vec<&str> = corpus.iter().map(|e| e.text.as_str()).collect();
        let labels: Vec<&str> = corpus.iter().map(|e| e.category.as_str()).collect();

        let mut vectorizer = TfidfVectorizer::new()?;
        let vectors = vectorizer.fit_transform(&texts)?;

        let mut classifier = MultinomialNb::new();
        classifier.fit(&vectors, &labels)?;

        let vocabulary = vectorizer.dimension()?;
        let classes = classifier.statistics()?.labels().len();
        self.model = Some(FittedModel {
            vectorizer,
            classifier,
        });

        info!(
            examples = corpus.len(),
            vocabulary,
            classes,
            elapsed_us = start.elapsed().as_micros() as u64,
            "Categorizer fitted"
        );
        Ok(())
    }

    fn model(&self) -> Result<&FittedModel> {
        self.model.as_ref().ok_or(Error::NotFitted)
    }

    /// Size of every feature vector this categorizer produces
    pub fn dimension(&self) -> Result<usize> {
        self.model()?.vectorizer.dimension()
    }

    /// Feature vector for a text
    pub fn transform(&self, text: &str) -> Result<FeatureVector> {
        self.model()?.vectorizer.transform(text)
    }

    /// Category for an already-extracted feature vector
    pub fn predict_vector(&self, vector: &FeatureVector) -> Result<String> {
        self.model()?.classifier.predict(vector).map(str::to_string)
    }

    /// Category for a free-text description
    pub fn predict(&self, text: &str) -> Result<String> {
        let vector = self.transform(text)?;
        let label = self.predict_vector(&vector)?;
        debug!(text, label = %label, "Predicted category");
        Ok(label)
    }

    /// Known category labels in sorted order
    pub fn labels(&self) -> Result<&[String]> {
        Ok(self.model()?.classifier.statistics()?.labels())
    }
}

impl TextClassifier for ExpenseCategorizer {
    fn predict(&self, text: &str) -> Result<String> {
        ExpenseCategorizer::predict(self, text)
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn labels(&self) -> Vec<String> {
        ExpenseCategorizer::labels(self)
            .map(<[String]>::to_vec)
            .unwrap_or_default()
    }
}
