//! The semantic half of the converter's input: what the front end knows.
//!
//! A conversion always runs against a [`SemanticModel`], but the model is
//! allowed to be arbitrarily degraded -- missing references, half-built
//! projects, single files torn out of context. Every query therefore has a
//! defined "don't know" answer ([`Resolution::Unknown`], [`Ty::Unknown`])
//! and no query can fail. The conversion rules in `recast-convert` are
//! written against exactly this contract.

pub mod model;
pub mod symbol;

pub use model::{Resolution, SemanticModel, SymbolIndex};
pub use symbol::{MethodSig, Param, RefKind, Symbol, SymbolKind, Ty};
