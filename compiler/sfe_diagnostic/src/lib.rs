//! Diagnostic system for SFE config.
//!
//! Every phase reports failures as a [`Diagnostic`]:
//! - Error codes for searchability
//! - A clear message (what went wrong)
//! - A primary label (where it went wrong)
//! - Optional notes (context)

mod diagnostic;
pub mod emitter;
mod error_code;

pub use diagnostic::{Diagnostic, Label};
pub use emitter::{ColorMode, DiagnosticEmitter, TerminalEmitter};
pub use error_code::ErrorCode;
