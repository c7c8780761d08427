//! Closed table of legacy runtime intrinsics and implicit coercions.
//!
//! The legacy runtime exposes a set of global helper functions
//! (`IsNothing`, `Val`, `UCase`, ...) and a family of implicit
//! conversions the target language does not perform. Both rewrite to
//! explicit compatibility-library calls with identical runtime
//! semantics. Recognition is purely syntactic, keyed by the spelled
//! call shape, and applies whether or not the argument types resolved;
//! a recognized name with no target equivalent is emitted unchanged
//! behind a `RuntimeMappingGap` warning.

use recast_common::Span;
use recast_sema::Ty;
use recast_syntax::cs;

use crate::diagnostics::{Diagnostic, Diagnostics};
use crate::fallback;

/// A recognized legacy runtime intrinsic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intrinsic {
    /// `IsNothing(x)`: null test.
    IsNothing,
    /// `Val(x)`: locale-aware string-to-number parse.
    Val,
    /// `UCase(x)` / `LCase(x)`: culture-sensitive case folding.
    UCase,
    LCase,
    /// `CStr` / `CInt` / `CSng` / `CDbl`: checked conversion functions.
    CStr,
    CInt,
    CSng,
    CDbl,
    /// Recognized but unmapped; these degrade to the spelled call.
    Mid,
    InStr,
    Len,
}

/// Look a spelled name up in the intrinsic table.
///
/// The source language folds identifier case, so recognition does too.
pub fn recognize(name: &str) -> Option<Intrinsic> {
    let intrinsic = match name.to_ascii_lowercase().as_str() {
        "isnothing" => Intrinsic::IsNothing,
        "val" => Intrinsic::Val,
        "ucase" => Intrinsic::UCase,
        "lcase" => Intrinsic::LCase,
        "cstr" => Intrinsic::CStr,
        "cint" => Intrinsic::CInt,
        "csng" => Intrinsic::CSng,
        "cdbl" => Intrinsic::CDbl,
        "mid" => Intrinsic::Mid,
        "instr" => Intrinsic::InStr,
        "len" => Intrinsic::Len,
        _ => return None,
    };
    Some(intrinsic)
}

/// Rewrite a recognized intrinsic call into its compatibility form.
///
/// `spelled` is the name as written at the call site; unmapped
/// intrinsics keep it in the emitted call and record a
/// [`RuntimeMappingGap`](crate::diagnostics::Code::RuntimeMappingGap)
/// warning at `span`.
pub fn expand(
    intrinsic: Intrinsic,
    spelled: &str,
    args: Vec<cs::Expr>,
    span: Span,
    diagnostics: &mut Diagnostics,
) -> cs::Expr {
    match intrinsic {
        Intrinsic::IsNothing => cs::Expr::static_call("Information", "IsNothing", args),
        Intrinsic::Val => cs::Expr::static_call("Conversion", "Val", args),
        Intrinsic::UCase => cs::Expr::static_call("Strings", "UCase", args),
        Intrinsic::LCase => cs::Expr::static_call("Strings", "LCase", args),
        Intrinsic::CStr => cs::Expr::static_call("Conversions", "ToString", args),
        Intrinsic::CInt => cs::Expr::static_call("Conversions", "ToInteger", args),
        Intrinsic::CSng => cs::Expr::static_call("Conversions", "ToSingle", args),
        Intrinsic::CDbl => cs::Expr::static_call("Conversions", "ToDouble", args),
        Intrinsic::Mid | Intrinsic::InStr | Intrinsic::Len => {
            diagnostics.push(Diagnostic::mapping_gap(
                span,
                format!("no runtime equivalent for `{spelled}`; the call is emitted unchanged"),
            ));
            cs::Expr::call(cs::Expr::name(spelled), args)
        }
    }
}

/// Insert an explicit conversion where the source language converted
/// implicitly.
///
/// Covers enum-to-string, numeric-literal-to-enum, numeric narrowing,
/// and late-bound `Object`/string conversions. An `Unknown` on either
/// side leaves the expression untouched; there is nothing sound to
/// insert without the type.
pub fn coerce(expr: cs::Expr, from: &Ty, to: &Ty) -> cs::Expr {
    if from.is_unknown() || to.is_unknown() || from == to {
        return expr;
    }
    if from.is_enum() {
        return match to {
            Ty::Str => cs::Expr::static_call("Conversions", "ToString", vec![expr]),
            Ty::Integer | Ty::Single | Ty::Double => cast_to(to, expr),
            _ => expr,
        };
    }
    if let Ty::Enum(name) = to {
        // A literal zero converts to any enum implicitly on the target
        // side; everything else numeric needs the cast spelled out.
        return match &expr {
            cs::Expr::Literal(cs::Lit::Int(0)) => expr,
            cs::Expr::Literal(cs::Lit::Int(_)) => cast_named(name, expr),
            _ if from.numeric_rank().is_some() || *from == Ty::Object => cast_named(name, expr),
            _ => expr,
        };
    }
    if let (Some(from_rank), Some(to_rank)) = (from.numeric_rank(), to.numeric_rank()) {
        if from_rank > to_rank {
            if let Some(method) = conversion_method(to) {
                return cs::Expr::static_call("Conversions", method, vec![expr]);
            }
        }
        // Widening stays implicit.
        return expr;
    }
    if matches!(from, Ty::Object | Ty::Str) {
        if let Some(method) = conversion_method(to) {
            return cs::Expr::static_call("Conversions", method, vec![expr]);
        }
    }
    if from.numeric_rank().is_some() && *to == Ty::Str {
        return cs::Expr::static_call("Conversions", "ToString", vec![expr]);
    }
    expr
}

fn conversion_method(to: &Ty) -> Option<&'static str> {
    match to {
        Ty::Integer => Some("ToInteger"),
        Ty::Single => Some("ToSingle"),
        Ty::Double => Some("ToDouble"),
        Ty::Boolean => Some("ToBoolean"),
        Ty::Str => Some("ToString"),
        _ => None,
    }
}

fn cast_to(to: &Ty, expr: cs::Expr) -> cs::Expr {
    cs::Expr::Cast {
        ty: cs::TypeName::new(fallback::cs_type_name(to)),
        operand: Box::new(expr),
    }
}

fn cast_named(name: &str, expr: cs::Expr) -> cs::Expr {
    cs::Expr::Cast {
        ty: cs::TypeName::new(name),
        operand: Box::new(expr),
    }
}

// ── Tests ───────────────────────────────────────────────────────────────
