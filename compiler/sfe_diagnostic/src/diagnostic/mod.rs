//! The [`Diagnostic`] record shared by every phase.
//!
//! SFE config has no warnings: any diagnostic means the unit failed to
//! load. A diagnostic names the failure by [`ErrorCode`], points at one
//! primary position, and may add related positions and free-form notes.

use std::fmt;

use sfe_ir::Position;

use crate::ErrorCode;

/// A message attached to a source position.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Label {
    pub pos: Position,
    pub message: String,
    /// `false` for related locations, such as an earlier declaration.
    pub is_primary: bool,
}

/// A load failure, ready to render.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[must_use = "diagnostics should be reported or returned, not silently dropped"]
pub struct Diagnostic {
    pub code: ErrorCode,
    pub message: String,
    /// Primary label first, in the order they were added.
    pub labels: Vec<Label>,
    pub notes: Vec<String>,
}

impl Diagnostic {
    #[cold]
    pub fn error(code: ErrorCode) -> Self {
        Diagnostic {
            code,
            message: String::new(),
            labels: Vec::new(),
            notes: Vec::new(),
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Point at where the failure happened.
    pub fn with_label(self, pos: Position, message: impl Into<String>) -> Self {
        self.push_label(pos, message.into(), true)
    }

    /// Point at a related location.
    pub fn with_secondary_label(self, pos: Position, message: impl Into<String>) -> Self {
        self.push_label(pos, message.into(), false)
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    fn push_label(mut self, pos: Position, message: String, is_primary: bool) -> Self {
        self.labels.push(Label {
            pos,
            message,
            is_primary,
        });
        self
    }

    pub fn primary_pos(&self) -> Option<Position> {
        self.labels
            .iter()
            .find(|label| label.is_primary)
            .map(|label| label.pos)
    }
}

/// One line per label and note, without source excerpts; see
/// [`TerminalEmitter`](crate::TerminalEmitter) for the full rendering.
impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "error [{}]: {}", self.code, self.message)?;
        for label in &self.labels {
            let marker = if label.is_primary { "-->" } else { "   " };
            write!(f, "\n  {marker} {}: {}", label.pos, label.message)?;
        }
        for note in &self.notes {
            write!(f, "\n  = note: {note}")?;
        }
        Ok(())
    }
}

impl std::error::Error for Diagnostic {}

#[cfg(test)]
mod tests;
