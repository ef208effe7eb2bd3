use std::fmt;

/// One element payload as it appears in a script.
///
/// Values are copied into the visual layer; nothing here refers back to caller data. A `Null`
/// marks a missing node in a tree's complete-binary-tree addressing, and a two-element `List`
/// inside a dict is read as a key/value pair.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum ElementValue {
    /// Absent value (`None`).
    Null,
    /// Boolean.
    Bool(bool),
    /// Signed integer.
    Int(i64),
    /// Floating-point number.
    Float(f64),
    /// Text.
    Str(String),
    /// Nested sequence (pairs, tuples, sub-lists).
    List(Vec<ElementValue>),
}

impl ElementValue {
    /// `true` for [`ElementValue::Null`].
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Key and value when this is a two-element list.
    pub fn as_pair(&self) -> Option<(&ElementValue, &ElementValue)> {
        match self {
            Self::List(items) => match items.as_slice() {
                [k, v] => Some((k, v)),
                _ => None,
            },
            _ => None,
        }
    }

    /// Quoted form used for strings nested inside lists.
    fn fmt_nested(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Str(s) => write!(f, "'{s}'"),
            other => fmt::Display::fmt(other, f),
        }
    }
}

impl fmt::Display for ElementValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("None"),
            Self::Bool(true) => f.write_str("True"),
            Self::Bool(false) => f.write_str("False"),
            Self::Int(v) => write!(f, "{v}"),
            Self::Float(v) if v.is_finite() && v.fract() == 0.0 => write!(f, "{v:.1}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::Str(s) => f.write_str(s),
            Self::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    item.fmt_nested(f)?;
                }
                f.write_str("]")
            }
        }
    }
}

impl From<i64> for ElementValue {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<i32> for ElementValue {
    fn from(v: i32) -> Self {
        Self::Int(i64::from(v))
    }
}

impl From<f64> for ElementValue {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<bool> for ElementValue {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<&str> for ElementValue {
    fn from(v: &str) -> Self {
        Self::Str(v.to_owned())
    }
}

impl From<String> for ElementValue {
    fn from(v: String) -> Self {
        Self::Str(v)
    }
}

impl<T: Into<ElementValue>> From<Option<T>> for ElementValue {
    fn from(v: Option<T>) -> Self {
        v.map_or(Self::Null, Into::into)
    }
}

impl<K: Into<ElementValue>, V: Into<ElementValue>> From<(K, V)> for ElementValue {
    fn from((k, v): (K, V)) -> Self {
        Self::List(vec![k.into(), v.into()])
    }
}

#[cfg(test)]
#[path = "../../tests/unit/model/value.rs"]
mod tests;
