//! Locale file parsers.
//!
//! - `json`: JSON locale files, flattened into a [`LocaleTable`](crate::core::LocaleTable)

pub mod json;
