use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

use crate::foundation::error::VizError;
use crate::model::value::ElementValue;

/// Closed set of supported structure shapes.
///
/// The kind selects one layout rule and one draw rule.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum StructureKind {
    /// Indexed boxes in a row.
    Array,
    /// Boxes in a row joined by forward (and optionally backward) links.
    LinkedList,
    /// Brace-delimited `key: value` rows.
    Dict,
    /// Brace-delimited value rows.
    Set,
    /// Binary tree in complete-binary-tree index addressing.
    Tree,
}

impl StructureKind {
    /// Script spelling of the kind.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Array => "array",
            Self::LinkedList => "linked_list",
            Self::Dict => "dict",
            Self::Set => "set",
            Self::Tree => "tree",
        }
    }

    /// Text shown in place of an empty structure.
    pub fn empty_caption(self) -> &'static str {
        match self {
            Self::Array => "Empty Array",
            Self::LinkedList => "Empty Linked List",
            Self::Dict => "Empty Dict",
            Self::Set => "Empty Set",
            Self::Tree => "Empty Tree",
        }
    }

    /// `true` for kinds laid out as a single row.
    pub fn is_linear(self) -> bool {
        !matches!(self, Self::Tree)
    }

    /// `true` for kinds whose cells can move one step at a time (arrays and linked lists).
    pub fn is_sequence(self) -> bool {
        matches!(self, Self::Array | Self::LinkedList)
    }

    /// `true` for kinds drawn as brace-delimited text rows.
    pub fn is_keyed(self) -> bool {
        matches!(self, Self::Dict | Self::Set)
    }
}

impl fmt::Display for StructureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StructureKind {
    type Err = VizError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "array" => Ok(Self::Array),
            "linked_list" | "linkedlist" => Ok(Self::LinkedList),
            "dict" => Ok(Self::Dict),
            "set" => Ok(Self::Set),
            "tree" => Ok(Self::Tree),
            other => Err(VizError::validation(format!(
                "unknown structure type '{other}' (expected array, linked_list, dict, set or tree)"
            ))),
        }
    }
}

/// One named visual object inside a frame.
///
/// Annotation indices are not checked here. References outside `elements` are skipped when the
/// frame is composed.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct DataStructure {
    /// Shape of the structure.
    #[serde(rename = "type")]
    pub kind: StructureKind,
    /// Element values in index order.
    #[serde(default)]
    pub elements: Vec<ElementValue>,
    /// Explicit top-left anchor; centered horizontally when absent.
    #[serde(default)]
    pub position: Option<(i32, i32)>,
    /// Indices drawn with the highlight color.
    #[serde(default)]
    pub highlighted: BTreeSet<usize>,
    /// Curved connectors between two different elements.
    #[serde(default)]
    pub arrows: Vec<(usize, usize)>,
    /// Indices that receive a self-reference loop.
    #[serde(default)]
    pub self_arrows: Vec<usize>,
    /// Short strings drawn below an element.
    #[serde(default)]
    pub labels: BTreeMap<usize, Vec<String>>,
    /// Short strings drawn above an element with an arrow down to it.
    #[serde(default)]
    pub pointers: BTreeMap<usize, Vec<String>>,
    /// Linked lists only: also draw backward links.
    #[serde(default)]
    pub is_doubly: bool,
}

impl DataStructure {
    /// Structure with no annotations.
    pub fn new<I, V>(kind: StructureKind, elements: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<ElementValue>,
    {
        Self {
            kind,
            elements: elements.into_iter().map(Into::into).collect(),
            position: None,
            highlighted: BTreeSet::new(),
            arrows: Vec::new(),
            self_arrows: Vec::new(),
            labels: BTreeMap::new(),
            pointers: BTreeMap::new(),
            is_doubly: false,
        }
    }

    /// Shorthand for an [`StructureKind::Array`].
    pub fn array<I, V>(elements: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<ElementValue>,
    {
        Self::new(StructureKind::Array, elements)
    }

    /// Shorthand for a [`StructureKind::LinkedList`].
    pub fn linked_list<I, V>(elements: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<ElementValue>,
    {
        Self::new(StructureKind::LinkedList, elements)
    }

    /// Shorthand for a [`StructureKind::Tree`] in level order, `None` marking missing nodes.
    pub fn tree<I, V>(elements: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<ElementValue>,
    {
        Self::new(StructureKind::Tree, elements)
    }

    /// Set an explicit anchor.
    pub fn at(mut self, x: i32, y: i32) -> Self {
        self.position = Some((x, y));
        self
    }

    /// Add highlighted indices.
    pub fn highlight(mut self, indices: impl IntoIterator<Item = usize>) -> Self {
        self.highlighted.extend(indices);
        self
    }

    /// Add a connector from `from` to `to`.
    pub fn arrow(mut self, from: usize, to: usize) -> Self {
        self.arrows.push((from, to));
        self
    }

    /// Add a self-reference loop on `index`.
    pub fn self_arrow(mut self, index: usize) -> Self {
        self.self_arrows.push(index);
        self
    }

    /// Append a label below `index`.
    pub fn label(mut self, index: usize, text: impl Into<String>) -> Self {
        self.labels.entry(index).or_default().push(text.into());
        self
    }

    /// Append a pointer above `index`.
    pub fn pointer(mut self, index: usize, text: impl Into<String>) -> Self {
        self.pointers.entry(index).or_default().push(text.into());
        self
    }

    /// Mark a linked list as doubly linked.
    pub fn doubly(mut self, is_doubly: bool) -> Self {
        self.is_doubly = is_doubly;
        self
    }

    /// Number of element slots (tree slots included even when `None`).
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// `true` when there is nothing to draw.
    ///
    /// A tree whose root slot is `None` is empty as well.
    pub fn is_empty(&self) -> bool {
        match self.kind {
            StructureKind::Tree => self.elements.first().is_none_or(ElementValue::is_null),
            _ => self.elements.is_empty(),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/model/structure.rs"]
mod tests;
