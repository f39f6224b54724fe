//! Currency catalog
//!
//! Fixed, ordered table of currencies the bill can take on. Read-only once
//! built; a custom table can be supplied as JSON and is validated on load.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A single currency the bill can be printed in
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrencyRecord {
    /// Unique short identifier ("USD")
    pub code: String,
    /// Display glyph
    pub symbol: String,
    /// Bill color
    pub color: String,
    /// Play field color while this currency is active
    pub background_color: String,
    /// Printable bill values, non-empty
    pub denominations: Vec<u32>,
    /// Capital city shown next to the clock
    pub capital: String,
    /// IANA timezone identifier of the capital
    pub timezone: String,
}

/// Reasons a catalog is rejected
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("catalog has no currencies")]
    Empty,
    #[error("duplicate currency code `{0}`")]
    DuplicateCode(String),
    #[error("currency `{0}` has no denominations")]
    NoDenominations(String),
    #[error("currency `{0}` has a zero denomination")]
    ZeroDenomination(String),
    #[error("currency `{0}` has no timezone")]
    MissingTimezone(String),
    #[error("malformed catalog JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Ordered, validated list of currencies; serializes as a bare array so
/// [`Catalog::from_json`] reads back what it writes
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Catalog {
    records: Vec<CurrencyRecord>,
}

/// (code, symbol, color, denominations, capital, timezone, background)
type Row = (
    &'static str,
    &'static str,
    &'static str,
    &'static [u32],
    &'static str,
    &'static str,
    &'static str,
);

#[rustfmt::skip]
const BUILTIN: &[Row] = &[
    ("USD", "$", "#85bb65", &[1, 5, 10, 20, 50, 100],
        "Washington D.C.", "America/New_York", "#e6f7ff"),
    ("EUR", "€", "#0a328c", &[5, 10, 20, 50, 100, 200],
        "Brussels", "Europe/Brussels", "#e6ffe6"),
    ("GBP", "£", "#9c27b0", &[5, 10, 20, 50],
        "London", "Europe/London", "#ffe6e6"),
    ("JPY", "¥", "#e91e63", &[1000, 2000, 5000, 10000],
        "Tokyo", "Asia/Tokyo", "#fff0e6"),
    ("CNY", "¥", "#f44336", &[1, 5, 10, 20, 50, 100],
        "Beijing", "Asia/Shanghai", "#ffffe6"),
    ("INR", "₹", "#ff9800", &[10, 20, 50, 100, 200, 500, 2000],
        "New Delhi", "Asia/Kolkata", "#f5e6ff"),
    ("AUD", "A$", "#4caf50", &[5, 10, 20, 50, 100],
        "Canberra", "Australia/Sydney", "#e6fff2"),
];

impl Catalog {
    /// Build a catalog, enforcing unique codes and non-empty denominations
    pub fn new(records: Vec<CurrencyRecord>) -> Result<Self, CatalogError> {
        if records.is_empty() {
            return Err(CatalogError::Empty);
        }
        for (i, record) in records.iter().enumerate() {
            if records[..i].iter().any(|r| r.code == record.code) {
                return Err(CatalogError::DuplicateCode(record.code.clone()));
            }
            if record.denominations.is_empty() {
                return Err(CatalogError::NoDenominations(record.code.clone()));
            }
            if record.denominations.contains(&0) {
                return Err(CatalogError::ZeroDenomination(record.code.clone()));
            }
            if record.timezone.trim().is_empty() {
                return Err(CatalogError::MissingTimezone(record.code.clone()));
            }
        }
        Ok(Self { records })
    }

    /// Parse a JSON array of currency records
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let records: Vec<CurrencyRecord> = serde_json::from_str(json)?;
        Self::new(records)
    }

    /// The seven currencies the game ships with
    pub fn builtin() -> Self {
        let records = BUILTIN
            .iter()
            .map(
                |&(code, symbol, color, denominations, capital, timezone, background)| {
                    CurrencyRecord {
                        code: code.to_string(),
                        symbol: symbol.to_string(),
                        color: color.to_string(),
                        background_color: background.to_string(),
                        denominations: denominations.to_vec(),
                        capital: capital.to_string(),
                        timezone: timezone.to_string(),
                    }
                },
            )
            .collect();
        Self { records }
    }

    pub fn records(&self) -> &[CurrencyRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Look up a currency by code
    pub fn get(&self, code: &str) -> Option<&CurrencyRecord> {
        self.records.iter().find(|r| r.code == code)
    }

    /// Look up a currency, falling back to the first entry on a miss
    pub fn get_or_first(&self, code: &str) -> &CurrencyRecord {
        self.get(code).unwrap_or_else(|| self.first())
    }

    /// First entry (a catalog is never empty)
    pub fn first(&self) -> &CurrencyRecord {
        &self.records[0]
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}
