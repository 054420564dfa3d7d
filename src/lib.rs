//! Kana→romaji typing prediction for live IME input.
//!
//! Two operations over an injected kana-unit → romaji-spellings table:
//! [`build_dag`] produces the graph of accepted romaji transitions between
//! character positions of a kana string, and [`predict`] classifies a typed
//! romaji buffer, once per keystroke, into the consumed prefix, the romaji
//! still required, and the trailing noise to drop.
//!
//! Both are pure and total: unknown kana degrades to verbatim pass-through
//! edges and unmatchable romaji ends up in `del_romaji`, never in an error.
//!
//! ```
//! use romaji_predict::predict;
//!
//! let p = predict("っか", "kk");
//! assert_eq!(p.hit_romaji, "kk");
//! assert_eq!(p.rem_romaji, "a");
//! assert_eq!(p.del_romaji, "");
//! ```

pub mod dag;
pub mod predict;
pub mod table;
pub mod unicode;

#[cfg(test)]
mod tests;

pub use dag::{Dag, Edge};
pub use predict::{predict_with, Prediction};
pub use table::{RomajiTable, TableError};

/// Build the transition DAG for `kana` with the default table.
pub fn build_dag(kana: &str) -> Dag {
    Dag::build(RomajiTable::default_table(), kana)
}

/// Classify `romaji` against `kana` with the default table.
pub fn predict(kana: &str, romaji: &str) -> Prediction {
    predict::predict_with(RomajiTable::default_table(), kana, romaji)
}
