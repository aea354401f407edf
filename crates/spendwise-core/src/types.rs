//! Expense record types

use crate::error::{Error, Result};
use chrono::{NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

/// Payment method recorded when the client supplies none
pub const DEFAULT_PAYMENT_METHOD: &str = "Card";

/// Date format accepted in create requests
const DATE_FORMAT: &str = "%Y-%m-%d";

/// A stored expense record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    /// Store-assigned identifier, starting at 1
    pub id: u64,

    /// Free-text description, also the classifier input
    pub description: String,

    /// Amount spent
    pub amount: f64,

    /// Explicit or predicted spending category
    pub category: String,

    /// When the expense happened
    pub date: NaiveDateTime,

    /// Payment method (card, cash, ...)
    pub payment_method: String,

    /// Free-form notes
    pub notes: String,
}

/// Create request for an expense, as sent by clients
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewExpense {
    pub description: String,

    pub amount: f64,

    /// Category; predicted from the description when missing or blank
    #[serde(default)]
    pub category: Option<String>,

    /// Date as `YYYY-MM-DD`; defaults to the current UTC time
    #[serde(default)]
    pub date: Option<String>,

    #[serde(default)]
    pub payment_method: Option<String>,

    #[serde(default)]
    pub notes: Option<String>,
}

impl NewExpense {
    /// Create a request with only the required fields set
    pub fn new(description: impl Into<String>, amount: f64) -> Self {
        Self {
            description: description.into(),
            amount,
            ..Default::default()
        }
    }

    /// Set an explicit category
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Set the date (`YYYY-MM-DD`)
    pub fn with_date(mut self, date: impl Into<String>) -> Self {
        self.date = Some(date.into());
        self
    }

    /// The explicit category, if one was given and is not blank.
    ///
    /// Blankness is checked on the trimmed value; the category itself is
    /// returned exactly as sent.
    pub fn explicit_category(&self) -> Option<&str> {
        self.category
            .as_deref()
            .filter(|c| !c.trim().is_empty())
    }

    /// Check the request once, parsing the date.
    ///
    /// A blank description is accepted; it carries no known tokens, so its
    /// predicted category is the one with the highest prior.
    pub fn validate(self) -> Result<ValidExpense> {
        if !self.amount.is_finite() {
            return Err(Error::validation("amount must be a finite number"));
        }
        let date = match self.date.as_deref().map(str::trim) {
            None | Some("") => Utc::now().naive_utc(),
            Some(raw) => NaiveDate::parse_from_str(raw, DATE_FORMAT)
                .map(|d| d.and_time(chrono::NaiveTime::MIN))
                .map_err(|e| Error::validation(format!("invalid date '{raw}': {e}")))?,
        };
        Ok(ValidExpense { request: self, date })
    }

    /// Validate and resolve into a draft using the given category
    pub fn into_draft(self, category: impl Into<String>) -> Result<ExpenseDraft> {
        Ok(self.validate()?.into_draft(category))
    }
}

/// A create request that passed validation, with its date resolved
#[derive(Debug, Clone)]
pub struct ValidExpense {
    request: NewExpense,
    date: NaiveDateTime,
}

impl ValidExpense {
    pub fn description(&self) -> &str {
        &self.request.description
    }

    /// See [`NewExpense::explicit_category`]
    pub fn explicit_category(&self) -> Option<&str> {
        self.request.explicit_category()
    }

    pub fn date(&self) -> NaiveDateTime {
        self.date
    }

    /// Resolve into a draft using the given category
    pub fn into_draft(self, category: impl Into<String>) -> ExpenseDraft {
        let request = self.request;
        ExpenseDraft {
            description: request.description,
            amount: request.amount,
            category: category.into(),
            date: self.date,
            payment_method: request
                .payment_method
                .filter(|p| !p.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_PAYMENT_METHOD.to_string()),
            notes: request.notes.unwrap_or_default(),
        }
    }
}

/// A fully resolved expense waiting for a store-assigned id
#[derive(Debug, Clone, PartialEq)]
pub struct ExpenseDraft {
    pub description: String,
    pub amount: f64,
    pub category: String,
    pub date: NaiveDateTime,
    pub payment_method: String,
    pub notes: String,
}

impl ExpenseDraft {
    /// Attach the store-assigned id
    pub fn with_id(self, id: u64) -> Expense {
        Expense {
            id,
            description: self.description,
            amount: self.amount,
            category: self.category,
            date: self.date,
            payment_method: self.payment_method,
            notes: self.notes,
        }
    }
}
