//! The query interface the converter runs against, and a map-backed
//! implementation for front ends that precompute their answers.

use recast_common::Span;
use rustc_hash::FxHashMap;

use crate::symbol::{Symbol, Ty};

/// Outcome of a symbol lookup.
///
/// There is no error case. A degraded model answers [`Resolution::Unknown`];
/// it never fails, and `Unknown` never aborts a conversion.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    Resolved(Symbol),
    Unknown,
}

impl Resolution {
    pub fn symbol(&self) -> Option<&Symbol> {
        match self {
            Resolution::Resolved(symbol) => Some(symbol),
            Resolution::Unknown => None,
        }
    }
}

/// Read-only semantic answers, keyed by use-site span.
///
/// Implementations must be `Sync`: one model is shared by every unit
/// converted in parallel, and nothing in a conversion writes back into it.
pub trait SemanticModel: Sync {
    /// Resolve the declaration the expression at `span` refers to.
    fn resolve_symbol(&self, span: Span) -> Resolution;

    /// The type of the expression or type annotation at `span`.
    fn declared_type(&self, span: Span) -> Ty;
}

/// Span-keyed model backed by hash maps.
///
/// Whatever was never defined answers `Unknown`, which makes an empty index
/// the canonical fully-degraded model.
#[derive(Debug, Default)]
pub struct SymbolIndex {
    symbols: FxHashMap<Span, Symbol>,
    types: FxHashMap<Span, Ty>,
}

impl SymbolIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the declaration the use site at `span` resolves to.
    pub fn define_symbol(&mut self, span: Span, symbol: Symbol) {
        self.symbols.insert(span, symbol);
    }

    /// Record the type of the expression or annotation at `span`.
    pub fn define_type(&mut self, span: Span, ty: Ty) {
        self.types.insert(span, ty);
    }
}

impl SemanticModel for SymbolIndex {
    fn resolve_symbol(&self, span: Span) -> Resolution {
        match self.symbols.get(&span) {
            Some(symbol) => Resolution::Resolved(symbol.clone()),
            None => Resolution::Unknown,
        }
    }

    fn declared_type(&self, span: Span) -> Ty {
        self.types.get(&span).cloned().unwrap_or(Ty::Unknown)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbol::SymbolKind;

    #[test]
    fn empty_index_answers_unknown_everywhere() {
        let index = SymbolIndex::new();
        assert_eq!(index.resolve_symbol(Span::new(0, 7)), Resolution::Unknown);
        assert_eq!(index.declared_type(Span::new(0, 7)), Ty::Unknown);
    }

    #[test]
    fn defined_spans_answer_what_was_recorded() {
        let mut index = SymbolIndex::new();
        let span = Span::new(10, 22);
        index.define_symbol(
            span,
            Symbol::new("SomeProperty", SymbolKind::Property, Ty::Unknown),
        );
        index.define_type(Span::new(30, 36), Ty::Single);

        let resolved = index.resolve_symbol(span);
        let symbol = resolved.symbol().unwrap();
        assert_eq!(symbol.name, "SomeProperty");
        assert_eq!(symbol.kind, SymbolKind::Property);
        assert_eq!(index.declared_type(Span::new(30, 36)), Ty::Single);
    }

    #[test]
    fn lookup_is_exact_span_match() {
        let mut index = SymbolIndex::new();
        index.define_type(Span::new(5, 9), Ty::Double);
        // A sub-span of a recorded span is a different key.
        assert_eq!(index.declared_type(Span::new(5, 8)), Ty::Unknown);
    }

    #[test]
    fn model_is_usable_as_shared_trait_object() {
        fn takes_model(model: &dyn SemanticModel, span: Span) -> Resolution {
            model.resolve_symbol(span)
        }
        let index = SymbolIndex::new();
        assert_eq!(takes_model(&index, Span::new(0, 1)), Resolution::Unknown);
    }
}
