use crate::model::named::NamedMap;
use crate::model::structure::{DataStructure, StructureKind};
use crate::model::value::ElementValue;

/// One fully specified visual instant: named structures, variables, caption and timing.
///
/// Durations are wall-clock seconds. In scripts they may be written as numbers or as timing
/// strings (`"3s"`, `"500ms"`).
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Frame {
    /// Structures drawn top to bottom in insertion order.
    #[serde(default)]
    pub structures: NamedMap<DataStructure>,
    /// Algorithm variables shown as `name = value` lines.
    #[serde(default)]
    pub variables: NamedMap<ElementValue>,
    /// How long the frame is held.
    #[serde(
        default = "default_duration",
        deserialize_with = "crate::script::duration::de_secs"
    )]
    pub duration: f64,
    /// 1-based source line highlighted in the code panel.
    #[serde(default)]
    pub line: Option<usize>,
    /// Caption text.
    #[serde(default)]
    pub text: Option<String>,
    /// Seconds the caption appears before the frame starts.
    #[serde(
        default = "default_pre_duration",
        deserialize_with = "crate::script::duration::de_secs"
    )]
    pub pre_duration: f64,
    /// Seconds the caption stays after the frame starts.
    #[serde(
        default = "default_post_duration",
        deserialize_with = "crate::script::duration::de_secs"
    )]
    pub post_duration: f64,
}

fn default_duration() -> f64 {
    3.0
}

fn default_pre_duration() -> f64 {
    1.0
}

fn default_post_duration() -> f64 {
    2.0
}

impl Default for Frame {
    fn default() -> Self {
        Self {
            structures: NamedMap::new(),
            variables: NamedMap::new(),
            duration: default_duration(),
            line: None,
            text: None,
            pre_duration: default_pre_duration(),
            post_duration: default_post_duration(),
        }
    }
}

impl Frame {
    /// Empty frame with default timing.
    pub fn new() -> Self {
        Self::default()
    }

    /// Frame holding a single array named `main`.
    pub fn from_array<I, V>(elements: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<ElementValue>,
    {
        Self::new().with_structure("main", DataStructure::new(StructureKind::Array, elements))
    }

    /// Frame holding a single linked list named `main`.
    pub fn from_linked_list<I, V>(elements: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<ElementValue>,
    {
        Self::new().with_structure(
            "main",
            DataStructure::new(StructureKind::LinkedList, elements),
        )
    }

    /// Add or replace a named structure.
    pub fn with_structure(mut self, name: impl Into<String>, structure: DataStructure) -> Self {
        self.structures.insert(name, structure);
        self
    }

    /// Add or replace a variable.
    pub fn with_variable(mut self, name: impl Into<String>, value: impl Into<ElementValue>) -> Self {
        self.variables.insert(name, value.into());
        self
    }

    /// Set the hold duration in seconds.
    pub fn with_duration(mut self, secs: f64) -> Self {
        self.duration = secs;
        self
    }

    /// Set the caption.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Set the highlighted code line.
    pub fn with_line(mut self, line: usize) -> Self {
        self.line = Some(line);
        self
    }

    /// Set how long the caption is shown around the frame start.
    pub fn with_caption_window(mut self, pre_secs: f64, post_secs: f64) -> Self {
        self.pre_duration = pre_secs;
        self.post_duration = post_secs;
        self
    }
}

#[cfg(test)]
#[path = "../../tests/unit/model/frame.rs"]
mod tests;
