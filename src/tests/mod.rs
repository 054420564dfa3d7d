//! Cross-module tests: golden outputs pinned to the documented tie-break
//! rules, and randomized round-trip properties.
