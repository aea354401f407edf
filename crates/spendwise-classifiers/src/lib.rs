//! Spendwise Classifiers
//!
//! Expense auto-categorization for Spendwise.
//!
//! The engine has two stages, fit once at startup and read-only afterwards:
//! - [`TfidfVectorizer`] learns a vocabulary with smoothed IDF weights and maps
//!   descriptions onto L2-normalized feature vectors
//! - [`MultinomialNb`] learns class priors and Laplace-smoothed feature
//!   log-probabilities and picks the most probable category
//!
//! [`ExpenseCategorizer`] composes both and is what the HTTP layer holds.

pub mod categorizer;
pub mod classifier;
pub mod corpus;
pub mod naive_bayes;
pub mod tokenizer;
pub mod vectorizer;

pub use categorizer::ExpenseCategorizer;
pub use classifier::TextClassifier;
pub use corpus::{default_corpus, load_corpus, CorpusFile, LabeledExample};
pub use naive_bayes::{ClassStatistics, MultinomialNb};
pub use tokenizer::Tokenizer;
pub use vectorizer::{FeatureVector, TfidfVectorizer, Vocabulary};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::categorizer::ExpenseCategorizer;
    pub use crate::classifier::TextClassifier;
    pub use crate::corpus::{default_corpus, LabeledExample};
    pub use crate::vectorizer::FeatureVector;
}
