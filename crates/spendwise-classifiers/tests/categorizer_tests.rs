//! Categorizer integration tests
//!
//! End-to-end fit/predict behavior on the embedded corpus and on small
//! hand-built corpora, plus property tests over arbitrary corpora.

use proptest::prelude::*;
use spendwise_classifiers::{
    default_corpus, ExpenseCategorizer, LabeledExample, TextClassifier, TfidfVectorizer,
};
use spendwise_core::Error;
use std::collections::BTreeSet;

fn two_example_corpus() -> Vec<LabeledExample> {
    vec![
        LabeledExample::new("grocery store purchase", "groceries"),
        LabeledExample::new("restaurant bill", "dining"),
    ]
}

#[test]
fn test_grocery_shopping_scenario() {
    let categorizer = ExpenseCategorizer::from_corpus(&two_example_corpus()).unwrap();
    assert_eq!(categorizer.predict("grocery shopping").unwrap(), "groceries");
}

#[test]
fn test_unknown_words_scenario() {
    let categorizer = ExpenseCategorizer::from_corpus(&two_example_corpus()).unwrap();
    let vector = categorizer.transform("xyz totally unknown words").unwrap();
    assert!(vector.is_zero());
    assert_eq!(
        categorizer.predict("xyz totally unknown words").unwrap(),
        "dining"
    );
}

#[test]
fn test_predict_before_fit() {
    let categorizer = ExpenseCategorizer::new();
    assert!(matches!(
        categorizer.predict("coffee"),
        Err(Error::NotFitted)
    ));
}

#[test]
fn test_default_corpus_predictions() {
    let categorizer = ExpenseCategorizer::with_default_corpus().unwrap();
    assert_eq!(categorizer.labels().unwrap().len(), 15);

    let cases = [
        ("Weekly supermarket run", "groceries"),
        ("Coffee with friends", "dining"),
        ("Taxi to the airport", "transportation"),
        ("Cinema night", "entertainment"),
        ("Monthly electricity bill", "utilities"),
        ("Pharmacy refill", "healthcare"),
        ("Gym membership renewal", "fitness"),
        ("Hotel booking in Lisbon", "travel"),
        ("Birthday gift for mom", "gifts"),
        ("Tuition fee", "education"),
    ];
    for (text, expected) in cases {
        assert_eq!(categorizer.predict(text).unwrap(), expected, "text: {text}");
    }
}

#[test]
fn test_training_texts_round_trip() {
    let corpus = default_corpus();
    let categorizer = ExpenseCategorizer::from_corpus(&corpus).unwrap();

    let correct = corpus
        .iter()
        .filter(|e| categorizer.predict(&e.text).unwrap() == e.category)
        .count();
    // a couple of short examples are outweighed by tokens of larger classes
    assert!(
        correct * 10 >= corpus.len() * 8,
        "only {correct}/{} training examples recovered",
        corpus.len()
    );
}

#[test]
fn test_shared_across_threads() {
    let categorizer =
        std::sync::Arc::new(ExpenseCategorizer::with_default_corpus().unwrap());

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let categorizer = categorizer.clone();
            std::thread::spawn(move || categorizer.predict("fast food takeout").unwrap())
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), "dining");
    }
}

fn corpus_strategy() -> impl Strategy<Value = Vec<LabeledExample>> {
    prop::collection::vec(("[a-z]{2,8}( [a-z]{2,8}){0,3}", "[a-c]{1,2}"), 1..12).prop_map(
        |pairs| {
            pairs
                .into_iter()
                .map(|(text, label)| LabeledExample::new(text, label))
                .collect()
        },
    )
}

proptest! {
    #[test]
    fn prop_predictions_use_training_labels(corpus in corpus_strategy(), query in "[a-z ]{0,30}") {
        let categorizer = ExpenseCategorizer::from_corpus(&corpus).unwrap();
        let labels: BTreeSet<_> = corpus.iter().map(|e| e.category.clone()).collect();

        for example in &corpus {
            let label = categorizer.predict(&example.text).unwrap();
            prop_assert!(labels.contains(&label));
        }
        let label = categorizer.predict(&query).unwrap();
        prop_assert!(labels.contains(&label));
        prop_assert_eq!(TextClassifier::labels(&categorizer), labels.into_iter().collect::<Vec<_>>());
    }

    #[test]
    fn prop_predict_is_pure(corpus in corpus_strategy(), query in "[a-z ]{0,30}") {
        let categorizer = ExpenseCategorizer::from_corpus(&corpus).unwrap();
        prop_assert_eq!(
            categorizer.predict(&query).unwrap(),
            categorizer.predict(&query).unwrap()
        );
    }

    #[test]
    fn prop_vectors_have_vocabulary_dimension(corpus in corpus_strategy(), query in "\\PC{0,40}") {
        let texts: Vec<&str> = corpus.iter().map(|e| e.text.as_str()).collect();
        let mut vectorizer = TfidfVectorizer::new().unwrap();
        vectorizer.fit(&texts).unwrap();
        let dim = vectorizer.dimension().unwrap();

        let vector = vectorizer.transform(&query).unwrap();
        prop_assert_eq!(vector.len(), dim);
        let norm = vector.norm();
        prop_assert!(norm == 0.0 || (norm - 1.0).abs() < 1e-9);
    }

    #[test]
    fn prop_out_of_vocabulary_text_still_classified(corpus in corpus_strategy()) {
        let categorizer = ExpenseCategorizer::from_corpus(&corpus).unwrap();
        // digits never appear in generated corpora
        let vector = categorizer.transform("1234 5678").unwrap();
        prop_assert!(vector.is_zero());
        prop_assert!(categorizer.predict("1234 5678").is_ok());
    }
}
