//! Symbols and types as the semantic model knows them.
//!
//! This vocabulary is deliberately small. The converter only ever asks
//! questions that change a rendering decision: what kind of declaration a
//! name is, whether its type is indexable, whether a type is a known
//! reference type, how wide a numeric type is. Anything the front end could
//! not recover collapses into [`Ty::Unknown`], which downstream rules treat
//! as "carry on with the documented default", never as an error.

use std::fmt;

/// What kind of declaration a resolved name points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolKind {
    Method,
    Property,
    Field,
    Event,
    Delegate,
    Type,
}

/// A resolved declaration, as much of it as the front end could recover.
#[derive(Debug, Clone, PartialEq)]
pub struct Symbol {
    pub name: String,
    pub kind: SymbolKind,
    /// The member's own type: return type for methods, value type for
    /// properties and fields, delegate type for events.
    pub declared_type: Ty,
    /// Parameter shape for callable symbols (methods, parameterized
    /// properties), when known.
    pub signature: Option<MethodSig>,
}

impl Symbol {
    pub fn new(name: impl Into<String>, kind: SymbolKind, declared_type: Ty) -> Self {
        Self {
            name: name.into(),
            kind,
            declared_type,
            signature: None,
        }
    }

    pub fn with_signature(mut self, signature: MethodSig) -> Self {
        self.signature = Some(signature);
        self
    }

    /// Whether the symbol's declared type exposes a default indexed
    /// accessor.
    pub fn is_indexable(&self) -> bool {
        self.declared_type.is_indexable()
    }
}

/// Parameter shape of a callable symbol.
#[derive(Debug, Clone, PartialEq)]
pub struct MethodSig {
    pub params: Vec<Param>,
}

impl MethodSig {
    pub fn new(params: Vec<Param>) -> Self {
        Self { params }
    }

    /// Whether a call with `argc` positional arguments fits this signature,
    /// counting optional parameters as fillable.
    pub fn accepts(&self, argc: usize) -> bool {
        let required = self.params.iter().filter(|p| !p.optional).count();
        argc >= required && argc <= self.params.len()
    }

    pub fn param(&self, index: usize) -> Option<&Param> {
        self.params.get(index)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Param {
    pub ty: Ty,
    pub mode: RefKind,
    pub optional: bool,
}

impl Param {
    pub fn value(ty: Ty) -> Self {
        Self { ty, mode: RefKind::Value, optional: false }
    }

    pub fn by_ref(ty: Ty) -> Self {
        Self { ty, mode: RefKind::Ref, optional: false }
    }

    pub fn out(ty: Ty) -> Self {
        Self { ty, mode: RefKind::Out, optional: false }
    }

    pub fn optional(ty: Ty) -> Self {
        Self { ty, mode: RefKind::Value, optional: true }
    }
}

/// How a parameter receives its argument on the target side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefKind {
    Value,
    Ref,
    Out,
}

/// A type as far as the semantic model could resolve it.
#[derive(Debug, Clone, PartialEq)]
pub enum Ty {
    Integer,
    Single,
    Double,
    Boolean,
    Str,
    Object,
    /// A resolved enum type, by name.
    Enum(String),
    /// A resolved delegate type, by name.
    Delegate(String),
    /// Any other resolved named type.
    Named {
        name: String,
        /// The type exposes a default parameterized accessor.
        indexable: bool,
        /// The type is a reference type.
        reference: bool,
    },
    Array(Box<Ty>),
    /// Synthetic marker for a type the model could not resolve. Lookups on
    /// a value of this type answer `Unknown` again rather than failing.
    Unknown,
}

impl Ty {
    /// A resolved class type with no indexer.
    pub fn class(name: impl Into<String>) -> Ty {
        Ty::Named {
            name: name.into(),
            indexable: false,
            reference: true,
        }
    }

    /// A resolved class type exposing a default indexed accessor.
    pub fn indexable_class(name: impl Into<String>) -> Ty {
        Ty::Named {
            name: name.into(),
            indexable: true,
            reference: true,
        }
    }

    /// A resolved value type (struct) with no indexer.
    pub fn value_struct(name: impl Into<String>) -> Ty {
        Ty::Named {
            name: name.into(),
            indexable: false,
            reference: false,
        }
    }

    pub fn array(element: Ty) -> Ty {
        Ty::Array(Box::new(element))
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, Ty::Unknown)
    }

    pub fn is_enum(&self) -> bool {
        matches!(self, Ty::Enum(_))
    }

    pub fn is_delegate(&self) -> bool {
        matches!(self, Ty::Delegate(_))
    }

    /// Whether values of this type support `target[args]` on the target
    /// side.
    pub fn is_indexable(&self) -> bool {
        matches!(
            self,
            Ty::Array(_) | Ty::Named { indexable: true, .. }
        )
    }

    /// Whether this is a positively known reference type. `Unknown` answers
    /// `false`: a degraded model must not steer anything toward `null`.
    pub fn is_reference(&self) -> bool {
        matches!(
            self,
            Ty::Str
                | Ty::Object
                | Ty::Delegate(_)
                | Ty::Array(_)
                | Ty::Named { reference: true, .. }
        )
    }

    /// Widening rank among the numeric primitives. A move from a higher
    /// rank to a lower one is a narrowing the target language will not do
    /// implicitly.
    pub fn numeric_rank(&self) -> Option<u8> {
        match self {
            Ty::Integer => Some(0),
            Ty::Single => Some(1),
            Ty::Double => Some(2),
            _ => None,
        }
    }
}

impl fmt::Display for Ty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Ty::Integer => write!(f, "Integer"),
            Ty::Single => write!(f, "Single"),
            Ty::Double => write!(f, "Double"),
            Ty::Boolean => write!(f, "Boolean"),
            Ty::Str => write!(f, "String"),
            Ty::Object => write!(f, "Object"),
            Ty::Enum(name) | Ty::Delegate(name) | Ty::Named { name, .. } => {
                write!(f, "{name}")
            }
            Ty::Array(element) => write!(f, "{element}()"),
            Ty::Unknown => write!(f, "unknown"),
        }
    }
}
