//! Core data types shared by every pipeline stage.
//!
//! ## Module Structure
//!
//! - `annotation`: Buffer-side types (KeyOccurrence, Position, Annotation)
//! - `table`: The flattened locale lookup table (LocaleTable)

pub mod annotation;
pub mod table;

pub use annotation::{ANNOTATION_GLYPH, Annotation, KeyOccurrence, Position};
pub use table::LocaleTable;
