use std::fmt;

use crate::foundation::error::{VizError, VizResult};
use crate::model::value::ElementValue;

/// Array operation animated by the sequencer.
#[derive(Clone, Debug, PartialEq)]
pub enum Operation {
    /// Exchange two elements.
    Swap {
        /// First index.
        i: usize,
        /// Second index.
        j: usize,
    },
    /// Emphasize elements without changing them.
    Highlight {
        /// Indices to emphasize.
        indices: Vec<usize>,
    },
    /// Emphasize two elements and connect them.
    Compare {
        /// First index.
        i: usize,
        /// Second index.
        j: usize,
    },
    /// Insert `value` so that it ends up at `index`.
    Insert {
        /// Target index, at most the current length.
        index: usize,
        /// New element.
        value: ElementValue,
    },
    /// Remove the element at `index`.
    Delete {
        /// Index to remove.
        index: usize,
    },
}

impl Operation {
    /// Script name of the operation.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Swap { .. } => "swap",
            Self::Highlight { .. } => "highlight",
            Self::Compare { .. } => "compare",
            Self::Insert { .. } => "insert",
            Self::Delete { .. } => "delete",
        }
    }

    /// Parse an operation from its script name and positional arguments.
    ///
    /// `swap i j`, `compare i j`, `highlight i...`, `insert index value`, `delete index`.
    /// Unknown names and malformed arguments are validation errors.
    pub fn from_name(name: &str, args: &[ElementValue]) -> VizResult<Self> {
        let arity = |n: usize| -> VizResult<()> {
            if args.len() == n {
                Ok(())
            } else {
                Err(VizError::validation(format!(
                    "operation '{name}' takes {n} argument(s), got {}",
                    args.len()
                )))
            }
        };
        match name {
            "swap" => {
                arity(2)?;
                Ok(Self::Swap {
                    i: index_arg(name, &args[0])?,
                    j: index_arg(name, &args[1])?,
                })
            }
            "compare" => {
                arity(2)?;
                Ok(Self::Compare {
                    i: index_arg(name, &args[0])?,
                    j: index_arg(name, &args[1])?,
                })
            }
            "highlight" => Ok(Self::Highlight {
                indices: args
                    .iter()
                    .map(|a| index_arg(name, a))
                    .collect::<VizResult<_>>()?,
            }),
            "insert" => {
                arity(2)?;
                Ok(Self::Insert {
                    index: index_arg(name, &args[0])?,
                    value: args[1].clone(),
                })
            }
            "delete" => {
                arity(1)?;
                Ok(Self::Delete {
                    index: index_arg(name, &args[0])?,
                })
            }
            other => Err(VizError::validation(format!(
                "unknown operation '{other}' (expected swap, highlight, compare, insert or delete)"
            ))),
        }
    }

    /// Check every index against a structure of `len` elements.
    pub fn validate(&self, len: usize) -> VizResult<()> {
        let check = |i: usize, bound: usize| -> VizResult<()> {
            if i < bound {
                Ok(())
            } else {
                Err(VizError::validation(format!(
                    "{}: index {i} out of range for {len} element(s)",
                    self.name()
                )))
            }
        };
        match self {
            Self::Swap { i, j } | Self::Compare { i, j } => {
                check(*i, len)?;
                check(*j, len)
            }
            Self::Highlight { indices } => indices.iter().try_for_each(|&i| check(i, len)),
            Self::Insert { index, .. } => check(*index, len + 1),
            Self::Delete { index } => check(*index, len),
        }
    }

    /// Elements after the operation.
    pub fn apply(&self, elements: &[ElementValue]) -> VizResult<Vec<ElementValue>> {
        self.validate(elements.len())?;
        let mut out = elements.to_vec();
        match self {
            Self::Swap { i, j } => out.swap(*i, *j),
            Self::Highlight { .. } | Self::Compare { .. } => {}
            Self::Insert { index, value } => out.insert(*index, value.clone()),
            Self::Delete { index } => {
                out.remove(*index);
            }
        }
        Ok(out)
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Swap { i, j } | Self::Compare { i, j } => write!(f, "{}({i}, {j})", self.name()),
            Self::Highlight { indices } => write!(f, "highlight({indices:?})"),
            Self::Insert { index, value } => write!(f, "insert({index}, {value})"),
            Self::Delete { index } => write!(f, "delete({index})"),
        }
    }
}

fn index_arg(op: &str, v: &ElementValue) -> VizResult<usize> {
    match v {
        ElementValue::Int(n) => usize::try_from(*n).map_err(|_| {
            VizError::validation(format!("{op}: index must be non-negative, got {n}"))
        }),
        other => Err(VizError::validation(format!(
            "{op}: index must be an integer, got {other}"
        ))),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/ops.rs"]
mod tests;
