//! Labeled training corpus
//!
//! The default corpus is compiled into the binary so startup cannot fail on a
//! missing or corrupt training file. A YAML corpus can be loaded instead.

use serde::{Deserialize, Serialize};
use spendwise_core::{Error, Result};
use std::path::Path;

/// One training example: a description and its category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabeledExample {
    pub text: String,
    pub category: String,
}

impl LabeledExample {
    pub fn new(text: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            category: category.into(),
        }
    }
}

/// On-disk corpus format
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorpusFile {
    pub examples: Vec<LabeledExample>,
}

const DEFAULT_EXAMPLES: &[(&str, &str)] = &[
    // Food & groceries
    ("grocery store purchase", "groceries"),
    ("supermarket", "groceries"),
    ("fruits and vegetables", "groceries"),
    ("food store", "groceries"),
    ("meat", "groceries"),
    ("dairy", "groceries"),
    // Dining
    ("restaurant bill", "dining"),
    ("cafe", "dining"),
    ("coffee shop", "dining"),
    ("fast food", "dining"),
    ("takeout", "dining"),
    ("delivery food", "dining"),
    // Transportation
    ("gas station", "transportation"),
    ("fuel", "transportation"),
    ("bus ticket", "transportation"),
    ("train fare", "transportation"),
    ("taxi ride", "transportation"),
    ("car maintenance", "transportation"),
    ("parking fee", "transportation"),
    // Shopping
    ("clothing store", "shopping"),
    ("mall purchase", "shopping"),
    ("online shopping", "shopping"),
    ("retail store", "shopping"),
    ("department store", "shopping"),
    // Entertainment
    ("movie tickets", "entertainment"),
    ("cinema", "entertainment"),
    ("theater", "entertainment"),
    ("concert", "entertainment"),
    ("sports event", "entertainment"),
    ("streaming service", "entertainment"),
    // Utilities
    ("electricity bill", "utilities"),
    ("water bill", "utilities"),
    ("gas bill", "utilities"),
    ("internet service", "utilities"),
    ("phone bill", "utilities"),
    // Healthcare
    ("doctor visit", "healthcare"),
    ("medicine", "healthcare"),
    ("pharmacy", "healthcare"),
    ("medical test", "healthcare"),
    ("dental care", "healthcare"),
    ("health insurance", "healthcare"),
    // Education
    ("tuition fee", "education"),
    ("textbooks", "education"),
    ("school supplies", "education"),
    ("online course", "education"),
    ("training program", "education"),
    // Rent & housing
    ("rent payment", "rent"),
    ("apartment lease", "rent"),
    ("housing maintenance", "rent"),
    ("property tax", "rent"),
    // Fitness
    ("gym membership", "fitness"),
    ("fitness equipment", "fitness"),
    ("sports gear", "fitness"),
    ("workout class", "fitness"),
    // Electronics
    ("computer purchase", "electronics"),
    ("phone accessories", "electronics"),
    ("electronic gadgets", "electronics"),
    ("software subscription", "electronics"),
    // Travel
    ("hotel booking", "travel"),
    ("flight tickets", "travel"),
    ("vacation package", "travel"),
    ("travel insurance", "travel"),
    // Insurance
    ("car insurance", "insurance"),
    ("life insurance", "insurance"),
    ("home insurance", "insurance"),
    ("property insurance", "insurance"),
    // Subscriptions
    ("magazine subscription", "subscriptions"),
    ("digital subscription", "subscriptions"),
    ("membership fee", "subscriptions"),
    ("subscription box", "subscriptions"),
    // Gifts
    ("birthday gift", "gifts"),
    ("holiday present", "gifts"),
    ("gift card", "gifts"),
    ("charitable donation", "gifts"),
];

/// The embedded expense corpus (74 examples over 15 categories)
pub fn default_corpus() -> Vec<LabeledExample> {
    DEFAULT_EXAMPLES
        .iter()
        .map(|(text, category)| LabeledExample::new(*text, *category))
        .collect()
}

/// Load a corpus from a YAML file of the form `examples: [{text, category}]`
pub fn load_corpus(path: impl AsRef<Path>) -> Result<Vec<LabeledExample>> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|e| {
        Error::config(format!(
            "Failed to read training corpus {}: {e}",
            path.display()
        ))
    })?;
    let file: CorpusFile = serde_yaml::from_str(&content).map_err(|e| {
        Error::config(format!(
            "Failed to parse training corpus {}: {e}",
            path.display()
        ))
    })?;
    Ok(file.examples)
}
