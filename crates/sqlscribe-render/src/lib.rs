//! Per-dataset documents
//!
//! This crate handles:
//! - Classifying SQL tokens for syntax highlighting
//! - Rendering one HTML document per dataset with its SQL, version labels
//!   and dependency listings

pub mod highlight;
pub mod document;

pub use highlight::{highlight_sql, HighlightedToken, TokenKind};
pub use document::{DocumentRenderer, RenderError};
