//! The kana-unit → romaji-spellings mapping table.
//!
//! A *kana unit* is one or two consecutive kana characters romanized as an
//! atom ("きゃ" is one unit, not "き" + "ゃ"). Each unit maps to its accepted
//! spellings, most-preferred first; that order is the priority order and it
//! always comes from an ordered source (a TOML array or `from_pairs`), never
//! from map iteration.
//!
//! The default table is embedded and parsed lazily. Both core operations also
//! take an explicit `&RomajiTable`, so alternate romanization schemes and
//! small test fixtures coexist with the default.

use std::collections::BTreeMap;
use std::sync::OnceLock;

use serde::Deserialize;

pub const DEFAULT_TABLE_TOML: &str = include_str!("default_table.toml");

#[derive(Debug, thiserror::Error)]
pub enum TableError {
    #[error("TOML parse error: {0}")]
    Parse(String),
    #[error("[units] table is empty")]
    Empty,
    #[error("kana unit must be 1 or 2 characters: {0:?}")]
    UnitLength(String),
    #[error("no spellings for unit: {0}")]
    NoSpellings(String),
    #[error("empty spelling for unit: {0}")]
    EmptySpelling(String),
    #[error("non-ASCII spelling: {0:?}")]
    NonAsciiSpelling(String),
    #[error("uppercase spelling: {0:?}")]
    UppercaseSpelling(String),
}

/// Validated, read-only mapping from kana units to ordered romaji spellings.
#[derive(Debug, Clone)]
pub struct RomajiTable {
    units: BTreeMap<String, Vec<String>>,
}

impl RomajiTable {
    /// Parse a `[units]` TOML table into a validated `RomajiTable`.
    pub fn from_toml(toml_str: &str) -> Result<Self, TableError> {
        #[derive(Deserialize)]
        struct Raw {
            units: BTreeMap<String, Vec<String>>,
        }
        let raw: Raw = toml::from_str(toml_str).map_err(|e| TableError::Parse(e.to_string()))?;
        Self::from_pairs(raw.units)
    }

    /// Build from an explicitly ordered sequence of (unit, spellings) pairs.
    ///
    /// Validation: every unit is 1–2 characters with at least one spelling;
    /// every spelling is non-empty, ASCII, and free of uppercase (the
    /// predictor matches against lowercased input).
    pub fn from_pairs<I, K, S>(pairs: I) -> Result<Self, TableError>
    where
        I: IntoIterator<Item = (K, Vec<S>)>,
        K: Into<String>,
        S: Into<String>,
    {
        let mut units = BTreeMap::new();
        for (unit, spellings) in pairs {
            let unit: String = unit.into();
            let spellings: Vec<String> = spellings.into_iter().map(Into::into).collect();

            let unit_chars = unit.chars().count();
            if unit_chars == 0 || unit_chars > 2 {
                return Err(TableError::UnitLength(unit));
            }
            if spellings.is_empty() {
                return Err(TableError::NoSpellings(unit));
            }
            for spelling in &spellings {
                if spelling.is_empty() {
                    return Err(TableError::EmptySpelling(unit));
                }
                if !spelling.is_ascii() {
                    return Err(TableError::NonAsciiSpelling(spelling.clone()));
                }
                if spelling.bytes().any(|b| b.is_ascii_uppercase()) {
                    return Err(TableError::UppercaseSpelling(spelling.clone()));
                }
            }
            units.insert(unit, spellings);
        }
        if units.is_empty() {
            return Err(TableError::Empty);
        }
        Ok(Self { units })
    }

    /// Get or initialize the embedded default table.
    pub fn default_table() -> &'static RomajiTable {
        static INSTANCE: OnceLock<RomajiTable> = OnceLock::new();
        INSTANCE.get_or_init(|| {
            RomajiTable::from_toml(DEFAULT_TABLE_TOML).expect("default table TOML must be valid")
        })
    }

    /// Spellings for a kana unit, most-preferred first.
    pub fn spellings(&self, unit: &str) -> Option<&[String]> {
        self.units.get(unit).map(Vec::as_slice)
    }

    /// Iterate over all (unit, spellings) pairs.
    pub fn units(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.units.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }
}
