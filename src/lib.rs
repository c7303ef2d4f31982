//! Ghostlens - inline previews of translation strings
//!
//! Ghostlens resolves a workspace's locale file, flattens it into a
//! key → string table, finds `t('key')` call sites in source text and plans
//! an overlay after each one showing the translated value. The [`core::Engine`]
//! keeps all of that current as buffers change and locale files are edited,
//! deleted or created.
//!
//! ## Module Structure
//!
//! - `cli`: Command-line host (`preview`, `watch`, `locate`, `init`)
//! - `config`: Configuration file loading and parsing
//! - `core`: Resolution, loading, extraction, planning, scheduling, watching
//! - `error`: Error taxonomy for the core pipeline

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
