//! TF-IDF feature extraction
//!
//! The vectorizer learns a vocabulary and smoothed inverse-document-frequency
//! weights once from a corpus, then maps any text onto a fixed-length,
//! L2-normalized vector over that vocabulary.

use crate::tokenizer::Tokenizer;
use spendwise_core::{Error, Result};
use std::collections::{BTreeSet, HashMap, HashSet};
use tracing::debug;

/// Dense feature vector over a fitted vocabulary
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureVector {
    values: Vec<f64>,
}

impl FeatureVector {
    /// Wrap raw feature values
    pub fn new(values: Vec<f64>) -> Self {
        Self { values }
    }

    /// All-zero vector of the given dimension
    pub fn zeros(dim: usize) -> Self {
        Self {
            values: vec![0.0; dim],
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    /// Euclidean norm
    pub fn norm(&self) -> f64 {
        self.values.iter().map(|v| v * v).sum::<f64>().sqrt()
    }

    /// True when every component is zero
    pub fn is_zero(&self) -> bool {
        self.values.iter().all(|&v| v == 0.0)
    }

    /// Iterate over `(index, value)` pairs with non-zero value
    pub fn nonzero(&self) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.values
            .iter()
            .copied()
            .enumerate()
            .filter(|(_, v)| *v != 0.0)
    }

    /// Scale to unit L2 norm; a zero vector is left untouched
    fn normalize(&mut self) {
        let norm = self.norm();
        if norm > 0.0 {
            for v in &mut self.values {
                *v /= norm;
            }
        }
    }
}

/// Fitted vocabulary: token to dense index, plus per-token IDF weight
#[derive(Debug, Clone)]
pub struct Vocabulary {
    index: HashMap<String, usize>,
    terms: Vec<String>,
    idf: Vec<f64>,
}

impl Vocabulary {
    /// Number of distinct tokens
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Index of a token, if it is in the vocabulary
    pub fn index_of(&self, token: &str) -> Option<usize> {
        self.index.get(token).copied()
    }

    /// IDF weight of a token, if it is in the vocabulary
    pub fn idf_of(&self, token: &str) -> Option<f64> {
        self.index_of(token).map(|i| self.idf[i])
    }

    /// Tokens in index order (lexicographic)
    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    /// IDF weights in index order
    pub fn idf(&self) -> &[f64] {
        &self.idf
    }
}

/// TF-IDF vectorizer with fit-once, transform-many semantics
#[derive(Debug, Clone, Default)]
pub struct TfidfVectorizer {
    tokenizer: Tokenizer,
    vocabulary: Option<Vocabulary>,
}

impl TfidfVectorizer {
    /// Create an unfitted vectorizer
    pub fn new() -> Result<Self> {
        Ok(Self {
            tokenizer: Tokenizer::new()?,
            vocabulary: None,
        })
    }

    pub fn is_fitted(&self) -> bool {
        self.vocabulary.is_some()
    }

    /// The fitted vocabulary
    pub fn vocabulary(&self) -> Result<&Vocabulary> {
        self.vocabulary.as_ref().ok_or(Error::NotFitted)
    }

    /// Dimension of every vector this vectorizer produces
    pub fn dimension(&self) -> Result<usize> {
        self.vocabulary().map(Vocabulary::len)
    }

    /// Learn the vocabulary and IDF weights from a corpus.
    ///
    /// `idf(t) = ln((1 + n) / (1 + df(t))) + 1`, so a token present in every
    /// text gets weight 1 and rarer tokens weigh more. On error the vectorizer
    /// keeps its previous state.
    pub fn fit<S: AsRef<str>>(&mut self, texts: &[S]) -> Result<()> {
        if texts.is_empty() {
            return Err(Error::EmptyCorpus);
        }

        let mut document_frequency: HashMap<String, usize> = HashMap::new();
        for text in texts {
            let distinct: HashSet<String> =
                self.tokenizer.tokenize(text.as_ref()).into_iter().collect();
            for token in distinct {
                *document_frequency.entry(token).or_insert(0) += 1;
            }
        }

        let terms: Vec<String> = document_frequency
            .keys()
            .cloned()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        let n = texts.len() as f64;
        let idf = terms
            .iter()
            .map(|t| ((1.0 + n) / (1.0 + document_frequency[t] as f64)).ln() + 1.0)
            .collect();

        let index = terms
            .iter()
            .enumerate()
            .map(|(i, t)| (t.clone(), i))
            .collect();

        debug!(
            documents = texts.len(),
            vocabulary = terms.len(),
            "Fitted TF-IDF vocabulary"
        );

        self.vocabulary = Some(Vocabulary { index, terms, idf });
        Ok(())
    }

    /// Map a text onto the fitted vocabulary.
    ///
    /// Out-of-vocabulary tokens are ignored. A text with no known tokens
    /// yields the zero vector.
    pub fn transform(&self, text: &str) -> Result<FeatureVector> {
        let vocabulary = self.vocabulary()?;
        let tokens = self.tokenizer.tokenize(text);
        let mut vector = FeatureVector::zeros(vocabulary.len());
        if tokens.is_empty() {
            return Ok(vector);
        }

        let total = tokens.len() as f64;
        for token in &tokens {
            if let Some(i) = vocabulary.index_of(token) {
                vector.values[i] += 1.0;
            }
        }
        for (value, idf) in vector.values.iter_mut().zip(&vocabulary.idf) {
            *value = *value / total * idf;
        }

        vector.normalize();
        Ok(vector)
    }

    /// Fit on the corpus, then transform each of its texts
    pub fn fit_transform<S: AsRef<str>>(&mut self, texts: &[S]) -> Result<Vec<FeatureVector>> {
        self.fit(texts)?;
        texts.iter().map(|t| self.transform(t.as_ref())).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fitted(texts: &[&str]) -> TfidfVectorizer {
        let mut vectorizer = TfidfVectorizer::new().unwrap();
        vectorizer.fit(texts).unwrap();
        vectorizer
    }

    #[test]
    fn test_vocabulary_is_sorted() {
        let vectorizer = fitted(&["restaurant bill", "grocery store purchase"]);
        let vocab = vectorizer.vocabulary().unwrap();
        assert_eq!(
            vocab.terms(),
            &["bill", "grocery", "purchase", "restaurant", "store"]
        );
        assert_eq!(vocab.index_of("grocery"), Some(1));
        assert_eq!(vocab.index_of("cafe"), None);
    }

    #[test]
    fn test_idf_weights() {
        let vectorizer = fitted(&["gas bill", "water bill", "gas station"]);
        let vocab = vectorizer.vocabulary().unwrap();

        // "bill" and "gas" occur in 2 of 3 texts, "water" in 1
        let common = (4.0_f64 / 3.0).ln() + 1.0;
        let rare = (4.0_f64 / 2.0).ln() + 1.0;
        assert!((vocab.idf_of("bill").unwrap() - common).abs() < 1e-12);
        assert!((vocab.idf_of("water").unwrap() - rare).abs() < 1e-12);
        assert!(vocab.idf_of("water").unwrap() > vocab.idf_of("gas").unwrap());
    }

    #[test]
    fn test_token_in_every_text_has_unit_idf() {
        let vectorizer = fitted(&["fee one", "fee two"]);
        assert_eq!(vectorizer.vocabulary().unwrap().idf_of("fee"), Some(1.0));
    }

    #[test]
    fn test_transform_is_unit_norm() {
        let vectorizer = fitted(&["grocery store purchase", "restaurant bill"]);
        let vector = vectorizer.transform("Grocery store, grocery!").unwrap();

        assert_eq!(vector.len(), 5);
        assert!((vector.norm() - 1.0).abs() < 1e-12);
        assert_eq!(vector.as_slice()[0], 0.0);
        assert!(vector.as_slice()[1] > vector.as_slice()[4]);
    }

    #[test]
    fn test_out_of_vocabulary_is_zero_vector() {
        let vectorizer = fitted(&["grocery store purchase", "restaurant bill"]);
        let vector = vectorizer.transform("xyz totally unknown words").unwrap();

        assert_eq!(vector.len(), 5);
        assert!(vector.is_zero());
        assert_eq!(vector.norm(), 0.0);
    }

    #[test]
    fn test_empty_corpus_rejected() {
        let mut vectorizer = TfidfVectorizer::new().unwrap();
        let texts: [&str; 0] = [];
        assert!(matches!(vectorizer.fit(&texts), Err(Error::EmptyCorpus)));
        assert!(!vectorizer.is_fitted());
    }

    #[test]
    fn test_failed_refit_keeps_vocabulary() {
        let mut vectorizer = fitted(&["movie tickets"]);
        let texts: [&str; 0] = [];
        assert!(vectorizer.fit(&texts).is_err());
        assert_eq!(vectorizer.dimension().unwrap(), 2);
    }

    #[test]
    fn test_transform_before_fit() {
        let vectorizer = TfidfVectorizer::new().unwrap();
        assert!(matches!(
            vectorizer.transform("anything"),
            Err(Error::NotFitted)
        ));
    }

    #[test]
    fn test_fit_transform_matches_transform() {
        let texts = ["taxi ride", "train fare", "bus ticket"];
        let mut vectorizer = TfidfVectorizer::new().unwrap();
        let vectors = vectorizer.fit_transform(&texts).unwrap();

        assert_eq!(vectors.len(), 3);
        for (text, vector) in texts.iter().zip(&vectors) {
            assert_eq!(&vectorizer.transform(text).unwrap(), vector);
        }
    }
}
