//! Multinomial naive Bayes over TF-IDF features

use crate::vectorizer::FeatureVector;
use spendwise_core::{Error, Result};
use std::collections::BTreeMap;
use tracing::debug;

/// Default additive smoothing pseudo-count
pub const DEFAULT_ALPHA: f64 = 1.0;

/// Per-class parameters learned at fit time
#[derive(Debug, Clone)]
pub struct ClassStatistics {
    /// Class labels in ascending lexicographic order
    labels: Vec<String>,

    /// Training examples per class
    class_counts: Vec<usize>,

    /// `ln(count_c / n)` per class
    class_log_prior: Vec<f64>,

    /// Smoothed `ln P(feature | class)`, one row per class
    feature_log_prob: Vec<Vec<f64>>,

    n_features: usize,
}

impl ClassStatistics {
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn class_counts(&self) -> &[usize] {
        &self.class_counts
    }

    pub fn class_log_prior(&self) -> &[f64] {
        &self.class_log_prior
    }

    /// Log-probability row for the class at `class_index`
    pub fn feature_log_prob(&self, class_index: usize) -> Option<&[f64]> {
        self.feature_log_prob.get(class_index).map(Vec::as_slice)
    }

    pub fn n_features(&self) -> usize {
        self.n_features
    }
}

/// Multinomial naive Bayes classifier with Laplace smoothing.
///
/// Ties between equal scores go to the class whose label sorts first.
#[derive(Debug, Clone)]
pub struct MultinomialNb {
    alpha: f64,
    stats: Option<ClassStatistics>,
}

impl Default for MultinomialNb {
    fn default() -> Self {
        Self::new()
    }
}

impl MultinomialNb {
    /// Create an unfitted classifier with `alpha = 1.0`
    pub fn new() -> Self {
        Self::with_alpha(DEFAULT_ALPHA)
    }

    /// Create an unfitted classifier with a custom smoothing pseudo-count
    pub fn with_alpha(alpha: f64) -> Self {
        Self { alpha, stats: None }
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    pub fn is_fitted(&self) -> bool {
        self.stats.is_some()
    }

    /// The fitted class statistics
    pub fn statistics(&self) -> Result<&ClassStatistics> {
        self.stats.as_ref().ok_or(Error::NotFitted)
    }

    /// Learn priors and smoothed feature log-probabilities.
    ///
    /// All inputs are validated before any state changes, so a failed fit
    /// leaves the classifier as it was.
    pub fn fit<S: AsRef<str>>(&mut self, vectors: &[FeatureVector], labels: &[S]) -> Result<()> {
        if vectors.len() != labels.len() {
            return Err(Error::LabelCountMismatch {
                vectors: vectors.len(),
                labels: labels.len(),
            });
        }
        if vectors.is_empty() {
            return Err(Error::EmptyTrainingSet);
        }
        if !(self.alpha > 0.0 && self.alpha.is_finite()) {
            return Err(Error::config(format!(
                "smoothing alpha must be positive, got {}",
                self.alpha
            )));
        }

        let n_features = vectors[0].len();
        for vector in vectors {
            if vector.len() != n_features {
                return Err(Error::DimensionMismatch {
                    expected: n_features,
                    actual: vector.len(),
                });
            }
            if vector.as_slice().iter().any(|v| *v < 0.0 || !v.is_finite()) {
                return Err(Error::validation(
                    "feature values must be finite and non-negative",
                ));
            }
        }

        // BTreeMap keeps classes in label order
        let mut grouped: BTreeMap<&str, Vec<&FeatureVector>> = BTreeMap::new();
        for (vector, label) in vectors.iter().zip(labels) {
            grouped.entry(label.as_ref()).or_default().push(vector);
        }

        let total = vectors.len() as f64;
        let smoothing_total = self.alpha * n_features as f64;

        let mut stats = ClassStatistics {
            labels: Vec::with_capacity(grouped.len()),
            class_counts: Vec::with_capacity(grouped.len()),
            class_log_prior: Vec::with_capacity(grouped.len()),
            feature_log_prob: Vec::with_capacity(grouped.len()),
            n_features,
        };

        for (label, members) in grouped {
            let mut feature_count = vec![0.0; n_features];
            for vector in &members {
                for (count, value) in feature_count.iter_mut().zip(vector.as_slice()) {
                    *count += value;
                }
            }
            let class_total: f64 = feature_count.iter().sum();
            let denominator = (class_total + smoothing_total).ln();

            stats.labels.push(label.to_string());
            stats.class_counts.push(members.len());
            stats
                .class_log_prior
                .push((members.len() as f64 / total).ln());
            stats.feature_log_prob.push(
                feature_count
                    .iter()
                    .map(|count| (count + self.alpha).ln() - denominator)
                    .collect(),
            );
        }

        debug!(
            examples = vectors.len(),
            classes = stats.labels.len(),
            features = n_features,
            "Fitted multinomial naive Bayes"
        );

        self.stats = Some(stats);
        Ok(())
    }

    /// Joint log-likelihood of each class, in label order
    pub fn scores(&self, vector: &FeatureVector) -> Result<Vec<f64>> {
        let stats = self.statistics()?;
        if vector.len() != stats.n_features {
            return Err(Error::DimensionMismatch {
                expected: stats.n_features,
                actual: vector.len(),
            });
        }

        Ok(stats
            .class_log_prior
            .iter()
            .zip(&stats.feature_log_prob)
            .map(|(prior, log_prob)| {
                prior
                    + vector
                        .nonzero()
                        .map(|(i, value)| value * log_prob[i])
                        .sum::<f64>()
            })
            .collect())
    }

    /// Most probable label for the vector
    pub fn predict(&self, vector: &FeatureVector) -> Result<&str> {
        let scores = self.scores(vector)?;
        let stats = self.statistics()?;

        let mut best = 0;
        for (i, score) in scores.iter().enumerate().skip(1) {
            if *score > scores[best] {
                best = i;
            }
        }
        Ok(&stats.labels[best])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vectors(rows: &[&[f64]]) -> Vec<FeatureVector> {
        rows.iter().map(|r| FeatureVector::new(r.to_vec())).collect()
    }

    #[test]
    fn test_priors_and_smoothing() {
        let mut nb = MultinomialNb::new();
        nb.fit(
            &vectors(&[&[1.0, 0.0], &[0.0, 1.0], &[0.0, 2.0]]),
            &["a", "b", "b"],
        )
        .unwrap();

        let stats = nb.statistics().unwrap();
        assert_eq!(stats.labels(), &["a", "b"]);
        assert_eq!(stats.class_counts(), &[1, 2]);
        assert!((stats.class_log_prior()[0] - (1.0_f64 / 3.0).ln()).abs() < 1e-12);

        // class "a": counts [1, 0], total 1, V = 2
        let row = stats.feature_log_prob(0).unwrap();
        assert!((row[0] - (2.0_f64 / 3.0).ln()).abs() < 1e-12);
        assert!((row[1] - (1.0_f64 / 3.0).ln()).abs() < 1e-12);

        // class "b": counts [0, 3], total 3
        let row = stats.feature_log_prob(1).unwrap();
        assert!((row[0] - (1.0_f64 / 5.0).ln()).abs() < 1e-12);
        assert!((row[1] - (4.0_f64 / 5.0).ln()).abs() < 1e-12);
    }

    #[test]
    fn test_predict_picks_matching_class() {
        let mut nb = MultinomialNb::new();
        nb.fit(&vectors(&[&[1.0, 0.0], &[0.0, 1.0]]), &["left", "right"])
            .unwrap();

        assert_eq!(nb.predict(&FeatureVector::new(vec![0.9, 0.1])).unwrap(), "left");
        assert_eq!(nb.predict(&FeatureVector::new(vec![0.0, 1.0])).unwrap(), "right");
    }

    #[test]
    fn test_tie_goes_to_first_label() {
        let mut nb = MultinomialNb::new();
        nb.fit(&vectors(&[&[1.0, 0.0], &[0.0, 1.0]]), &["zeta", "alpha"])
            .unwrap();

        assert_eq!(nb.predict(&FeatureVector::zeros(2)).unwrap(), "alpha");
    }

    #[test]
    fn test_zero_vector_follows_prior() {
        let mut nb = MultinomialNb::new();
        nb.fit(
            &vectors(&[&[1.0, 0.0], &[0.0, 1.0], &[0.0, 1.0]]),
            &["alpha", "zeta", "zeta"],
        )
        .unwrap();

        assert_eq!(nb.predict(&FeatureVector::zeros(2)).unwrap(), "zeta");
    }

    #[test]
    fn test_fit_errors() {
        let mut nb = MultinomialNb::new();
        let no_labels: [&str; 0] = [];

        assert!(matches!(
            nb.fit(&[], &no_labels),
            Err(Error::EmptyTrainingSet)
        ));
        assert!(matches!(
            nb.fit(&vectors(&[&[1.0]]), &["a", "b"]),
            Err(Error::LabelCountMismatch { vectors: 1, labels: 2 })
        ));
        assert!(matches!(
            nb.fit(&vectors(&[&[1.0], &[1.0, 0.0]]), &["a", "b"]),
            Err(Error::DimensionMismatch { expected: 1, actual: 2 })
        ));
        assert!(nb.fit(&vectors(&[&[-1.0]]), &["a"]).is_err());
        assert!(!nb.is_fitted());
    }

    #[test]
    fn test_predict_errors() {
        let mut nb = MultinomialNb::new();
        assert!(matches!(
            nb.predict(&FeatureVector::zeros(2)),
            Err(Error::NotFitted)
        ));

        nb.fit(&vectors(&[&[1.0, 0.0]]), &["a"]).unwrap();
        assert!(matches!(
            nb.predict(&FeatureVector::zeros(3)),
            Err(Error::DimensionMismatch { expected: 2, actual: 3 })
        ));
    }

    #[test]
    fn test_invalid_alpha() {
        let mut nb = MultinomialNb::with_alpha(0.0);
        assert!(matches!(
            nb.fit(&vectors(&[&[1.0]]), &["a"]),
            Err(Error::Config(_))
        ));
    }
}
