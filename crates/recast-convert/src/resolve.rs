//! Call-versus-index disambiguation for the parenthesized apply form.
//!
//! The source syntax spells invocation and element access the same way:
//! `Foo(0)` is a call when `Foo` names a method and an element access
//! when it names an array or a type with a default member. With a full
//! symbol table the split is mechanical. Against a partial table every
//! undecidable occurrence takes the documented default, records a
//! [`Diagnostic`], and conversion keeps going.

use recast_common::Span;
use recast_sema::{Resolution, Symbol, SymbolKind};
use recast_syntax::vb;

use crate::diagnostics::{Diagnostic, Diagnostics, Severity};

/// How a `head(args)` form renders on the target side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rendering {
    /// The parentheses survive as an invocation: `head(args)`.
    Call,
    /// The parentheses become an element access: `head[args]`.
    Index,
}

/// Where the ambiguous form sits in the surrounding tree.
///
/// In statement position an index rendering produces a bare element
/// access whose value is discarded. The rendering stays faithful to
/// the input tree either way; statement position only escalates the
/// assumed-indexer diagnostic to [`Severity::Error`] so the line is
/// impossible to miss in review.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Position {
    Expression,
    Statement,
}

/// Decide whether `head(args)` renders as a call or an index access.
///
/// Resolved heads follow their symbol kind: methods, delegates, and
/// events invoke; properties and fields invoke only when a declared
/// signature accepts `arg_count` arguments or the declared type is a
/// delegate, and index otherwise. Unresolved standalone names -- bare
/// or spelled through `Me` -- assume an indexer (the common shape in
/// the legacy corpus is a field of a collection type the loader could
/// not see); heads qualified by any other receiver assume a call.
/// Every assumption leaves a diagnostic behind.
pub fn classify(
    head: &vb::Expr,
    arg_count: usize,
    resolution: &Resolution,
    position: Position,
    diagnostics: &mut Diagnostics,
) -> Rendering {
    match resolution {
        Resolution::Resolved(symbol) => {
            classify_resolved(head, arg_count, symbol, position, diagnostics)
        }
        Resolution::Unknown => classify_unknown(head, position, diagnostics),
    }
}

fn classify_resolved(
    head: &vb::Expr,
    arg_count: usize,
    symbol: &Symbol,
    position: Position,
    diagnostics: &mut Diagnostics,
) -> Rendering {
    match symbol.kind {
        SymbolKind::Method | SymbolKind::Delegate | SymbolKind::Event | SymbolKind::Type => {
            Rendering::Call
        }
        SymbolKind::Property | SymbolKind::Field => {
            if let Some(signature) = &symbol.signature {
                if signature.accepts(arg_count) {
                    // Parameterized property; the parentheses are its
                    // argument list, not an element index.
                    return Rendering::Call;
                }
            }
            if symbol.declared_type.is_delegate() {
                // Implicit delegate invocation through a field.
                return Rendering::Call;
            }
            if symbol.is_indexable() {
                tracing::debug!(name = %symbol.name, "indexable head, no diagnostic");
                return Rendering::Index;
            }
            let shown = display_name(head);
            let message = if symbol.declared_type.is_unknown() {
                format!(
                    "assumed-indexer: the declared type of {shown} is unresolved; \
                     the parenthesized arguments render as an index access"
                )
            } else {
                format!(
                    "assumed-indexer: {shown} has type `{}` with no default member; \
                     the parenthesized arguments render as an index access",
                    symbol.declared_type
                )
            };
            note_assumed_indexer(head.span(), message, position, diagnostics);
            Rendering::Index
        }
    }
}

fn classify_unknown(
    head: &vb::Expr,
    position: Position,
    diagnostics: &mut Diagnostics,
) -> Rendering {
    let shown = display_name(head);
    if is_standalone_head(head) {
        // An unresolved standalone name defaults to element access;
        // most such names in practice are fields of collection or
        // array types the symbol loader could not see.
        let message = format!(
            "assumed-indexer: {shown} does not resolve to a declaration; \
             the parenthesized arguments render as an index access"
        );
        tracing::debug!(head = %shown, "unresolved standalone head assumed indexer");
        note_assumed_indexer(head.span(), message, position, diagnostics);
        Rendering::Index
    } else {
        // Qualified heads (`obj.Member(...)`) default to a call; the
        // usual cause is a receiver type that was never loaded, and
        // member access on such a type is almost always a method.
        let message =
            format!("{shown} does not resolve to a declaration; the parenthesized form renders as a call");
        tracing::debug!(head = %shown, "unresolved qualified head kept as call");
        diagnostics.push(Diagnostic::unresolved_symbol(head.span(), message));
        Rendering::Call
    }
}

/// `Me.Name` is the same self-member reference a bare `Name` is, so both
/// count as standalone. Only a head qualified by some other receiver
/// expression carries the call default.
fn is_standalone_head(head: &vb::Expr) -> bool {
    match head {
        vb::Expr::Ident { .. } => true,
        vb::Expr::Member { base, .. } => matches!(base.as_ref(), vb::Expr::Me { .. }),
        _ => false,
    }
}

fn note_assumed_indexer(
    span: Span,
    message: String,
    position: Position,
    diagnostics: &mut Diagnostics,
) {
    let mut diagnostic = Diagnostic::ambiguous(span, message);
    if position == Position::Statement {
        diagnostic = diagnostic.with_severity(Severity::Error);
    }
    diagnostics.push(diagnostic);
}

fn display_name(head: &vb::Expr) -> String {
    match head {
        vb::Expr::Ident { name, .. } | vb::Expr::Member { name, .. } => format!("`{name}`"),
        _ => "this expression".to_string(),
    }
}

// ── Tests ───────────────────────────────────────────────────────────────
