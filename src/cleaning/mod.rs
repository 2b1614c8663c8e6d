//! Cleaning pipeline.
//!
//! Two ordered sequences of tree rewrites. The document passes run on the
//! parsed page before any scoring; the content passes run on the
//! synthesized content root after selection. Every pass is total: a
//! selector that matches nothing is a no-op.

pub mod content;
pub mod document;
pub mod headers;
pub mod lazy_media;
pub mod tables;

pub use content::clean_content_root;
pub use document::clean_document;
