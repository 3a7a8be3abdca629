use std::fmt;

use crate::error::CompositionError;

/// Dynamically typed value exchanged with behaviors and initializers.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Val {
    #[default]
    Unit,
    Bool(bool),
    S64(i64),
    Float64(f64),
    String(String),
    List(Vec<Val>),
}

impl Val {
    /// Short name of the variant, used in mismatch errors.
    pub fn kind(&self) -> &'static str {
        match self {
            Val::Unit => "unit",
            Val::Bool(_) => "bool",
            Val::S64(_) => "s64",
            Val::Float64(_) => "float64",
            Val::String(_) => "string",
            Val::List(_) => "list",
        }
    }

    pub fn as_bool(&self) -> Result<bool, CompositionError> {
        match self {
            Val::Bool(b) => Ok(*b),
            other => Err(mismatch("bool", other)),
        }
    }

    pub fn as_s64(&self) -> Result<i64, CompositionError> {
        match self {
            Val::S64(n) => Ok(*n),
            other => Err(mismatch("s64", other)),
        }
    }

    pub fn as_f64(&self) -> Result<f64, CompositionError> {
        match self {
            Val::Float64(n) => Ok(*n),
            other => Err(mismatch("float64", other)),
        }
    }

    pub fn as_str(&self) -> Result<&str, CompositionError> {
        match self {
            Val::String(s) => Ok(s),
            other => Err(mismatch("string", other)),
        }
    }

    pub fn as_list(&self) -> Result<&[Val], CompositionError> {
        match self {
            Val::List(items) => Ok(items),
            other => Err(mismatch("list", other)),
        }
    }

    pub fn is_unit(&self) -> bool {
        matches!(self, Val::Unit)
    }
}

fn mismatch(expected: &'static str, found: &Val) -> CompositionError {
    CompositionError::TypeMismatch {
        expected,
        found: found.kind(),
    }
}

impl fmt::Display for Val {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Val::Unit => f.write_str("()"),
            Val::Bool(b) => write!(f, "{b}"),
            Val::S64(n) => write!(f, "{n}"),
            Val::Float64(n) => write!(f, "{n}"),
            Val::String(s) => write!(f, "{s:?}"),
            Val::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
        }
    }
}

impl From<()> for Val {
    fn from(_: ()) -> Self {
        Val::Unit
    }
}

impl From<bool> for Val {
    fn from(b: bool) -> Self {
        Val::Bool(b)
    }
}

impl From<i64> for Val {
    fn from(n: i64) -> Self {
        Val::S64(n)
    }
}

impl From<i32> for Val {
    fn from(n: i32) -> Self {
        Val::S64(n.into())
    }
}

impl From<f64> for Val {
    fn from(n: f64) -> Self {
        Val::Float64(n)
    }
}

impl From<&str> for Val {
    fn from(s: &str) -> Self {
        Val::String(s.to_string())
    }
}

impl From<String> for Val {
    fn from(s: String) -> Self {
        Val::String(s)
    }
}

impl<T: Into<Val>> From<Vec<T>> for Val {
    fn from(items: Vec<T>) -> Self {
        Val::List(items.into_iter().map(Into::into).collect())
    }
}
