//! Go type expressions and field lists.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A Go type expression, as written in a parameter or result list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TypeExpr {
    /// Plain identifier (e.g. `int`, `string`, `error`, `Point`).
    Ident(String),
    /// Package-qualified name (e.g. `time.Duration`).
    Qualified { package: String, name: String },
    /// Instantiated generic type (e.g. `List[int]`).
    Generic { base: Box<TypeExpr>, args: Vec<TypeExpr> },
    /// `*T`
    Pointer(Box<TypeExpr>),
    /// `[]T` (len = None) or `[N]T` / `[...]T` (len = Some).
    Array {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        len: Option<String>,
        elem: Box<TypeExpr>,
    },
    /// `map[K]V`
    Map { key: Box<TypeExpr>, value: Box<TypeExpr> },
    /// `chan T`, `chan<- T`, `<-chan T`
    Chan { dir: ChanDir, elem: Box<TypeExpr> },
    /// `func(params) results`
    Func { params: FieldList, results: FieldList },
    /// `struct { ... }` — body kept as raw text.
    Struct(String),
    /// `interface { ... }` — body kept as raw text.
    Interface(String),
    /// Variadic parameter `...T`.
    Ellipsis(Box<TypeExpr>),
    /// `(T)`
    Paren(Box<TypeExpr>),
}

/// Channel direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChanDir {
    Both,
    Send,
    Recv,
}

impl TypeExpr {
    pub fn ident(name: impl Into<String>) -> Self {
        TypeExpr::Ident(name.into())
    }

    /// `[]elem`
    pub fn slice(elem: TypeExpr) -> Self {
        TypeExpr::Array {
            len: None,
            elem: Box::new(elem),
        }
    }

    /// Returns the identifier if this is a plain identifier type.
    pub fn as_ident(&self) -> Option<&str> {
        match self {
            TypeExpr::Ident(name) => Some(name),
            _ => None,
        }
    }
}

impl fmt::Display for TypeExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeExpr::Ident(name) => write!(f, "{}", name),
            TypeExpr::Qualified { package, name } => write!(f, "{}.{}", package, name),
            TypeExpr::Generic { base, args } => {
                write!(f, "{}[", base)?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", arg)?;
                }
                write!(f, "]")
            }
            TypeExpr::Pointer(inner) => write!(f, "*{}", inner),
            TypeExpr::Array { len: None, elem } => write!(f, "[]{}", elem),
            TypeExpr::Array { len: Some(len), elem } => write!(f, "[{}]{}", len, elem),
            TypeExpr::Map { key, value } => write!(f, "map[{}]{}", key, value),
            TypeExpr::Chan { dir, elem } => match dir {
                ChanDir::Both => write!(f, "chan {}", elem),
                ChanDir::Send => write!(f, "chan<- {}", elem),
                ChanDir::Recv => write!(f, "<-chan {}", elem),
            },
            TypeExpr::Func { params, results } => {
                write!(f, "func{}", params)?;
                match results.fields.as_slice() {
                    [] => Ok(()),
                    [only] if only.names.is_empty() => write!(f, " {}", only.ty),
                    _ => write!(f, " {}", results),
                }
            }
            TypeExpr::Struct(body) => write!(f, "struct{{{}}}", body),
            TypeExpr::Interface(body) => write!(f, "interface{{{}}}", body),
            TypeExpr::Ellipsis(inner) => write!(f, "...{}", inner),
            TypeExpr::Paren(inner) => write!(f, "({})", inner),
        }
    }
}

/// One entry of a parameter or result list.
///
/// `a, b int` is a single field with two names; an anonymous result such as
/// `error` is a field with no names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub names: Vec<String>,
    pub ty: TypeExpr,
}

impl Field {
    pub fn named(names: &[&str], ty: TypeExpr) -> Self {
        Self {
            names: names.iter().map(|n| n.to_string()).collect(),
            ty,
        }
    }

    pub fn anonymous(ty: TypeExpr) -> Self {
        Self { names: vec![], ty }
    }

    pub fn is_anonymous(&self) -> bool {
        self.names.is_empty()
    }
}

/// An ordered parameter or result list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldList {
    pub fields: Vec<Field>,
}

impl FieldList {
    pub fn new(fields: Vec<Field>) -> Self {
        Self { fields }
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Number of values the list declares (each name counts, each anonymous field counts once).
    pub fn arity(&self) -> usize {
        self.fields.iter().map(|f| f.names.len().max(1)).sum()
    }
}

impl fmt::Display for FieldList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (i, field) in self.fields.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            if field.names.is_empty() {
                write!(f, "{}", field.ty)?;
            } else {
                write!(f, "{} {}", field.names.join(", "), field.ty)?;
            }
        }
        write!(f, ")")
    }
}
