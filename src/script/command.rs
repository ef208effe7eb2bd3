use std::collections::BTreeSet;
use std::path::Path;

use crate::animation::ops::Operation;
use crate::foundation::error::{VizError, VizResult};
use crate::model::structure::StructureKind;
use crate::model::value::ElementValue;
use crate::script::duration::DurationValue;

/// Duration of a command that does not name one.
pub const DEFAULT_COMMAND_SECS: f64 = 2.0;

/// Desired resulting state of one animated structure.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct StateSpec {
    /// Element values in order.
    #[serde(default)]
    pub elements: Vec<ElementValue>,
    /// Highlighted indices.
    #[serde(default)]
    pub highlighted: BTreeSet<usize>,
    /// Curved connectors between indices.
    #[serde(default)]
    pub arrows: Vec<(usize, usize)>,
}

/// One step of an incremental animation script.
///
/// A command either names a resulting `state` or an `action` with positional `args`
/// (`{"action": "swap", "args": [0, 3]}`).
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct VisualizationCommand {
    /// Step number, informational.
    #[serde(default)]
    pub step: u32,
    /// Name of the structure to animate.
    pub target: String,
    /// Resulting state.
    #[serde(default)]
    pub state: Option<StateSpec>,
    /// Transition length, `"2s"` when absent.
    #[serde(default)]
    pub duration: Option<DurationValue>,
    /// Code line to highlight.
    #[serde(default)]
    pub line: Option<usize>,
    /// Caption to show from this step on.
    #[serde(default)]
    pub text: Option<String>,
    /// Operation name (`swap`, `highlight`, `compare`, `insert`, `delete`).
    #[serde(default)]
    pub action: Option<String>,
    /// Operation arguments.
    #[serde(default)]
    pub args: Vec<ElementValue>,
}

/// What a command asks the sequencer to do.
#[derive(Clone, Debug, PartialEq)]
pub enum CommandAction {
    /// Transition to a state.
    State(StateSpec),
    /// Run an array operation.
    Operation(Operation),
}

impl VisualizationCommand {
    /// Command transitioning `target` to `state`.
    pub fn to_state(step: u32, target: impl Into<String>, state: StateSpec) -> Self {
        Self {
            step,
            target: target.into(),
            state: Some(state),
            duration: None,
            line: None,
            text: None,
            action: None,
            args: Vec::new(),
        }
    }

    /// Same command with a duration.
    pub fn with_duration(mut self, duration: impl Into<DurationValue>) -> Self {
        self.duration = Some(duration.into());
        self
    }

    /// Validated duration in seconds.
    pub fn duration_secs(&self) -> VizResult<f64> {
        match &self.duration {
            Some(d) => d.secs(),
            None => Ok(DEFAULT_COMMAND_SECS),
        }
    }

    /// Resolve the state or operation this command carries.
    pub fn resolve(&self) -> VizResult<CommandAction> {
        match (&self.action, &self.state) {
            (Some(name), _) => Operation::from_name(name, &self.args).map(CommandAction::Operation),
            (None, Some(state)) => Ok(CommandAction::State(state.clone())),
            (None, None) => Err(VizError::validation(format!(
                "command step {} for '{}' has neither a state nor an action",
                self.step, self.target
            ))),
        }
    }
}

/// Structure registered before the commands run.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct StructureDecl {
    /// Unique name commands refer to.
    pub name: String,
    /// Shape of the structure: `array` or `linked_list`.
    #[serde(alias = "type")]
    pub kind: StructureKind,
    /// Initial elements.
    #[serde(default)]
    pub elements: Vec<ElementValue>,
    /// Explicit top-left of the row.
    #[serde(default)]
    pub position: Option<(i32, i32)>,
}

/// Incremental animation script: structures, then commands in order.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CommandScript {
    /// Source listing for the code panel.
    #[serde(default)]
    pub code: Option<String>,
    /// Structures to register.
    #[serde(default)]
    pub structures: Vec<StructureDecl>,
    /// Commands to run.
    #[serde(default)]
    pub commands: Vec<VisualizationCommand>,
}

impl CommandScript {
    /// Parse and validate a JSON script.
    pub fn from_reader<R: std::io::Read>(r: R) -> VizResult<Self> {
        let script: Self = serde_json::from_reader(r)?;
        script.validate()?;
        Ok(script)
    }

    /// Read, parse and validate a JSON script file.
    pub fn from_path(path: impl AsRef<Path>) -> VizResult<Self> {
        use anyhow::Context as _;
        let path = path.as_ref();
        let file = std::fs::File::open(path)
            .with_context(|| format!("open command script '{}'", path.display()))?;
        Self::from_reader(std::io::BufReader::new(file))
    }

    /// Unique structure names, known command targets and well-formed durations/actions.
    pub fn validate(&self) -> VizResult<()> {
        let mut names = BTreeSet::new();
        for decl in &self.structures {
            if !names.insert(decl.name.as_str()) {
                return Err(VizError::validation(format!(
                    "structure '{}' is declared twice",
                    decl.name
                )));
            }
            if !decl.kind.is_sequence() {
                return Err(VizError::validation(format!(
                    "structure '{}': {} cannot be animated by commands",
                    decl.name, decl.kind
                )));
            }
        }
        for cmd in &self.commands {
            if !names.contains(cmd.target.as_str()) {
                return Err(VizError::validation(format!(
                    "command step {} targets unknown structure '{}'",
                    cmd.step, cmd.target
                )));
            }
            cmd.duration_secs()?;
            cmd.resolve()?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/script/command.rs"]
mod tests;
