//! Rendering diagnostics for a terminal.
//!
//! Without a [`SourceMap`] each label is printed as `line:column`. With
//! one, labels carry the file path and are followed by the offending
//! source line and a caret under the column.

use std::io::{self, Write};

use sfe_ir::SourceMap;

use crate::{Diagnostic, Label};

/// ANSI styles.
#[derive(Copy, Clone)]
enum Style {
    /// Bold red: the `error` word and primary labels.
    Error,
    /// Bold blue: related locations.
    Related,
    Bold,
}

impl Style {
    fn code(self) -> &'static str {
        match self {
            Style::Error => "\x1b[1;31m",
            Style::Related => "\x1b[1;34m",
            Style::Bold => "\x1b[1m",
        }
    }
}

const RESET: &str = "\x1b[0m";

/// When to style output.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ColorMode {
    /// Style only when writing to a terminal.
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorMode {
    pub fn should_use_colors(self, is_tty: bool) -> bool {
        match self {
            ColorMode::Auto => is_tty,
            ColorMode::Always => true,
            ColorMode::Never => false,
        }
    }
}

/// A sink for diagnostics.
pub trait DiagnosticEmitter {
    fn emit(&mut self, diagnostic: &Diagnostic);

    fn flush(&mut self);
}

/// Writes diagnostics as text, optionally styled.
pub struct TerminalEmitter<'a, W: Write> {
    writer: W,
    colors: bool,
    sources: Option<&'a SourceMap>,
}

impl<'a, W: Write> TerminalEmitter<'a, W> {
    pub fn with_color_mode(writer: W, mode: ColorMode, is_tty: bool) -> Self {
        TerminalEmitter {
            writer,
            colors: mode.should_use_colors(is_tty),
            sources: None,
        }
    }

    /// Resolve label file ids and source lines through `sources`.
    #[must_use]
    pub fn with_sources(mut self, sources: &'a SourceMap) -> Self {
        self.sources = Some(sources);
        self
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    fn styled(&mut self, text: &str, style: Style) -> io::Result<()> {
        if self.colors {
            write!(self.writer, "{}{text}{RESET}", style.code())
        } else {
            self.writer.write_all(text.as_bytes())
        }
    }

    fn write_diagnostic(&mut self, diagnostic: &Diagnostic) -> io::Result<()> {
        self.styled("error", Style::Error)?;
        self.styled(&format!(" [{}]", diagnostic.code), Style::Bold)?;
        writeln!(self.writer, ": {}", diagnostic.message)?;
        for label in &diagnostic.labels {
            self.write_label(label)?;
        }
        for note in &diagnostic.notes {
            writeln!(self.writer, "  = note: {note}")?;
        }
        writeln!(self.writer)
    }

    fn write_label(&mut self, label: &Label) -> io::Result<()> {
        let (marker, style) = if label.is_primary {
            ("-->", Style::Error)
        } else {
            ("   ", Style::Related)
        };
        write!(self.writer, "  {marker} ")?;
        if let Some(file) = self.sources.and_then(|s| s.get(label.pos.file)) {
            write!(self.writer, "{}:", file.path.display())?;
        }
        write!(self.writer, "{}: ", label.pos)?;
        self.styled(&label.message, style)?;
        writeln!(self.writer)?;

        let Some(text) = self
            .sources
            .and_then(|s| s.line_text(label.pos.file, label.pos.line))
        else {
            return Ok(());
        };
        let line = label.pos.line.to_string();
        let gutter = " ".repeat(line.len());
        let indent = " ".repeat(label.pos.column.saturating_sub(1) as usize);
        writeln!(self.writer, "  {line} | {text}")?;
        write!(self.writer, "  {gutter} | {indent}")?;
        self.styled("^", style)?;
        writeln!(self.writer)
    }
}

impl<'a> TerminalEmitter<'a, io::Stderr> {
    pub fn stderr(mode: ColorMode, is_tty: bool) -> Self {
        Self::with_color_mode(io::stderr(), mode, is_tty)
    }
}

impl<W: Write> DiagnosticEmitter for TerminalEmitter<'_, W> {
    /// Write errors are dropped: there is nowhere left to report them.
    fn emit(&mut self, diagnostic: &Diagnostic) {
        let _ = self.write_diagnostic(diagnostic);
    }

    fn flush(&mut self) {
        let _ = self.writer.flush();
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::ErrorCode;
    use pretty_assertions::assert_eq;
    use sfe_ir::{FileId, Position};

    fn sample() -> Diagnostic {
        Diagnostic::error(ErrorCode::E3001)
            .with_message("unresolved identifier `widht`")
            .with_label(Position::new(FileId::new(0), 2, 13), "not found")
    }

    #[test]
    fn test_terminal_emitter_no_color() {
        let mut emitter = TerminalEmitter::with_color_mode(Vec::new(), ColorMode::Never, true);
        emitter.emit(&sample());
        let text = String::from_utf8(emitter.into_inner()).unwrap();
        assert_eq!(
            text,
            "error [E3001]: unresolved identifier `widht`\n  --> 2:13: not found\n\n"
        );
    }

    #[test]
    fn test_terminal_emitter_with_sources() {
        let mut sources = SourceMap::new();
        sources.add("main.sfe", "var a = 1;\nvar b = a + widht;\n");
        let mut emitter = TerminalEmitter::with_color_mode(Vec::new(), ColorMode::Never, false)
            .with_sources(&sources);
        emitter.emit(&sample());
        let text = String::from_utf8(emitter.into_inner()).unwrap();
        assert_eq!(
            text,
            "error [E3001]: unresolved identifier `widht`\n  --> main.sfe:2:13: not found\n  2 | var b = a + widht;\n    |             ^\n\n"
        );
    }

    #[test]
    fn test_related_label_and_note() {
        let diag = Diagnostic::error(ErrorCode::E2002)
            .with_message("object \"smoke\" is declared twice")
            .with_label(Position::new(FileId::new(0), 3, 1), "duplicate object")
            .with_secondary_label(Position::new(FileId::new(0), 1, 1), "first declared here")
            .with_note("object names are global across includes");
        let mut emitter = TerminalEmitter::with_color_mode(Vec::new(), ColorMode::Never, false);
        emitter.emit(&diag);
        let text = String::from_utf8(emitter.into_inner()).unwrap();
        assert_eq!(
            text,
            "error [E2002]: object \"smoke\" is declared twice\n  --> 3:1: duplicate object\n      1:1: first declared here\n  = note: object names are global across includes\n\n"
        );
    }

    #[test]
    fn test_terminal_emitter_colors() {
        let mut emitter = TerminalEmitter::with_color_mode(Vec::new(), ColorMode::Always, false);
        emitter.emit(&sample());
        let text = String::from_utf8(emitter.into_inner()).unwrap();
        assert!(text.contains("\x1b[1;31m"));
        assert!(text.contains("\x1b[0m"));
    }

    #[test]
    fn test_color_mode() {
        assert!(ColorMode::Auto.should_use_colors(true));
        assert!(!ColorMode::Auto.should_use_colors(false));
        assert!(ColorMode::Always.should_use_colors(false));
        assert!(!ColorMode::Never.should_use_colors(true));
    }
}
