//! Core annotation pipeline.
//!
//! Locale file → flattened table → key extraction → annotation planning,
//! driven by an [`Engine`] that reacts to host events.
//!
//! ## Module Structure
//!
//! - `annotate`: Joins keys against the table, truncates values
//! - `data`: Shared data types (LocaleTable, KeyOccurrence, Annotation)
//! - `engine`: Engine lifecycle and event routing, the `Host` trait
//! - `extract`: `t('key')` call-site scanning
//! - `parsers`: Locale file parsing and flattening
//! - `resolver`: Manual override vs. discovery of the locale file
//! - `schedule`: Debounce scheduler and clocks
//! - `store`: Atomically replaced lookup table
//! - `text`: Offset → line/column conversion
//! - `watch`: File-change subscription

pub mod annotate;
pub mod data;
pub mod engine;
pub mod extract;
pub mod parsers;
pub mod resolver;
pub mod schedule;
pub mod store;
pub mod text;
pub mod watch;

pub use annotate::{AnnotationPlanner, ELLIPSIS, MAX_DISPLAY_LEN, truncate};
pub use data::{ANNOTATION_GLYPH, Annotation, KeyOccurrence, LocaleTable, Position};
pub use engine::{Engine, EngineEvent, Host};
pub use extract::{CallSiteExtractor, KeyExtractor};
pub use resolver::LocaleResolver;
pub use schedule::{Clock, DEBOUNCE_DELAY, ManualClock, SystemClock, Trigger, UpdateScheduler};
pub use store::LocaleStore;
pub use text::LineIndex;
pub use watch::{FileEvent, FileWatcher, NotifyWatcher, NullWatcher, WatchTarget};
