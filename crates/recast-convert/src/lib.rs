//! The conversion engine: source tree in, target tree out.
//!
//! This crate turns a `recast_syntax::vb` compilation unit into a
//! `recast_syntax::cs` unit against a [`SemanticModel`] that is allowed to
//! be arbitrarily degraded. Missing symbol or type information never
//! aborts a conversion; it changes which rule fires and leaves a
//! diagnostic behind.
//!
//! ## Architecture
//!
//! - [`lower`]: the top-down lowering walk over declarations, statements
//!   and expressions
//! - [`resolve`]: the call-versus-index decision for the ambiguous
//!   `head(args)` form
//! - [`intrinsics`]: source runtime calls rewritten to their target
//!   library equivalents, and the implicit-conversion table
//! - [`fallback`]: renderings for names and values the model could not
//!   resolve
//! - [`diagnostics`]: the ordered record of every fallback and heuristic
//!   the conversion relied on
//!
//! ## Pipeline
//!
//! ```text
//! vb::CompilationUnit + SemanticModel -> lowering walk -> cs::CompilationUnit + Vec<Diagnostic>
//! ```
//!
//! The same inputs always produce the same outputs, and units are
//! independent: converting many units concurrently against one shared
//! model is safe because the model is read-only for the whole run.

pub mod diagnostics;
pub mod fallback;
pub mod intrinsics;
pub mod lower;
pub mod resolve;

use recast_sema::SemanticModel;
use recast_syntax::{cs, vb};

pub use diagnostics::{Code, Diagnostic, Severity};
pub use lower::ConversionContext;

/// Everything one unit conversion produced: the complete target tree and
/// the diagnostics in the order the lowering walk recorded them.
#[derive(Debug)]
pub struct UnitConversion {
    pub unit: cs::CompilationUnit,
    pub diagnostics: Vec<Diagnostic>,
}

impl UnitConversion {
    /// Whether any recorded diagnostic is an error. Warnings describe
    /// fallbacks that still produced plausible output; errors mark spots
    /// that need a human.
    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|d| d.severity == Severity::Error)
    }
}

/// Convert one compilation unit.
///
/// Total by construction: every input tree produces a complete output
/// tree, with explicit placeholders standing in for constructs that have
/// no translation rule.
pub fn convert(unit: &vb::CompilationUnit, model: &dyn SemanticModel) -> UnitConversion {
    let mut context = ConversionContext::new(model);
    let lowered = context.lower_unit(unit);
    let diagnostics = context.finish();
    tracing::debug!(
        types = lowered.types.len(),
        diagnostics = diagnostics.len(),
        "conversion finished"
    );
    UnitConversion {
        unit: lowered,
        diagnostics,
    }
}
