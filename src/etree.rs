//! Element Tree (etree) Utilities
//!
//! Tree manipulation helpers re-exported from the `html-cleaning` crate.
//! `strip` removes an element while keeping its children (and their text)
//! in place; the cleaning pipeline uses it to unwrap redundant wrappers.

pub use html_cleaning::tree::strip;
