//! Shared primitives for the recast converter.
//!
//! Everything in this crate is front-end agnostic: source trees, semantic
//! lookups and diagnostics all key their positions off [`Span`], and
//! human-readable locations are derived on demand through [`LineIndex`].

pub mod span;

pub use span::{LineIndex, Span};
