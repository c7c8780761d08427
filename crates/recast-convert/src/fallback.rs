//! Missing-type fallback: verbatim names and safe default values.
//!
//! A declared type that resolves to nothing still has to render as
//! something. The fallback carries the spelled source name over
//! verbatim, on the assumption that a same-named type exists in a
//! resolution scope the symbol loader could not see, and analysis
//! continues against the `Unknown` marker. Default values for such
//! types are always the bare `default` literal; `null` is never safe
//! because the nullability of an unresolved type cannot be determined.

use recast_sema::Ty;
use recast_syntax::{cs, vb};

use crate::diagnostics::{Diagnostic, Diagnostics};

/// Render a declared type annotation against its resolved type.
///
/// A resolved type uses the target language's canonical spelling. An
/// unresolved one keeps the annotation verbatim and records an
/// [`UnresolvedSymbol`](crate::diagnostics::Code::UnresolvedSymbol)
/// warning at the annotation's span.
pub fn render_type(
    annotation: &vb::TypeName,
    resolved: &Ty,
    diagnostics: &mut Diagnostics,
) -> cs::TypeName {
    if resolved.is_unknown() {
        diagnostics.push(Diagnostic::unresolved_symbol(
            annotation.span,
            format!(
                "cannot resolve type `{}`; the spelled name is carried over verbatim",
                annotation.name
            ),
        ));
        return cs::TypeName::new(annotation.name.clone());
    }
    cs::TypeName::new(cs_type_name(resolved))
}

/// The target-language spelling of a resolved type.
///
/// `Unknown` has no canonical spelling; [`render_type`] substitutes the
/// source's spelled name before this table is consulted.
pub fn cs_type_name(ty: &Ty) -> String {
    match ty {
        Ty::Integer => "int".into(),
        Ty::Single => "float".into(),
        Ty::Double => "double".into(),
        Ty::Boolean => "bool".into(),
        Ty::Str => "string".into(),
        Ty::Object => "object".into(),
        Ty::Enum(name) | Ty::Delegate(name) => name.clone(),
        Ty::Named { name, .. } => name.clone(),
        Ty::Array(element) => format!("{}[]", cs_type_name(element)),
        Ty::Unknown => "object".into(),
    }
}

/// Lower the source null literal against the slot's expected type.
///
/// `null` is correct only when the slot is a known reference type;
/// everywhere else the `default` literal is the one spelling that works
/// for value, enum, and unresolved types alike.
pub fn nothing_value(expected: Option<&Ty>) -> cs::Expr {
    match expected {
        Some(ty) if ty.is_reference() => cs::Expr::Null,
        _ => cs::Expr::Default,
    }
}

// ── Tests ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::{Code, Severity};
    use recast_common::Span;

    fn annotation(name: &str) -> vb::TypeName {
        vb::TypeName::new(name, Span::new(30, 30 + name.len() as u32))
    }

    #[test]
    fn known_types_render_with_target_spellings() {
        let mut diagnostics = Diagnostics::new();
        let rendered = render_type(&annotation("Integer"), &Ty::Integer, &mut diagnostics);
        assert_eq!(rendered.0, "int");
        let rendered = render_type(&annotation("String"), &Ty::Str, &mut diagnostics);
        assert_eq!(rendered.0, "string");
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn unresolved_type_keeps_the_spelled_name() {
        let mut diagnostics = Diagnostics::new();
        let rendered = render_type(
            &annotation("System.Some.UnknownType"),
            &Ty::Unknown,
            &mut diagnostics,
        );
        assert_eq!(rendered.0, "System.Some.UnknownType");
        let recorded = diagnostics.into_vec();
        assert_eq!(recorded.len(), 1);
        assert_eq!(recorded[0].code, Code::UnresolvedSymbol);
        assert_eq!(recorded[0].severity, Severity::Warning);
        assert!(recorded[0].message.contains("`System.Some.UnknownType`"));
    }

    #[test]
    fn array_types_render_with_brackets() {
        assert_eq!(cs_type_name(&Ty::array(Ty::Integer)), "int[]");
        assert_eq!(cs_type_name(&Ty::array(Ty::array(Ty::Str))), "string[][]");
    }

    #[test]
    fn named_types_keep_their_names() {
        assert_eq!(cs_type_name(&Ty::class("Widget")), "Widget");
        assert_eq!(cs_type_name(&Ty::Enum("PositionEnum".into())), "PositionEnum");
        assert_eq!(
            cs_type_name(&Ty::Delegate("ChangedEventHandler".into())),
            "ChangedEventHandler"
        );
    }

    #[test]
    fn nothing_is_null_only_for_known_reference_types() {
        assert_eq!(nothing_value(Some(&Ty::Str)), cs::Expr::Null);
        assert_eq!(
            nothing_value(Some(&Ty::class("Widget"))),
            cs::Expr::Null
        );
        assert_eq!(nothing_value(Some(&Ty::Unknown)), cs::Expr::Default);
        assert_eq!(nothing_value(Some(&Ty::Integer)), cs::Expr::Default);
        assert_eq!(nothing_value(None), cs::Expr::Default);
    }
}
