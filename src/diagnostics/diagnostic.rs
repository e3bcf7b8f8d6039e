// Copyright (c) ZeroC, Inc.

use super::{Error, Note};
use crate::source_file::Span;

/// A diagnostic is a message that is reported to the user during compilation.
///
/// Decaf diagnostics are always errors: the compiler keeps processing after reporting one so it
/// can surface as many as possible, but any reported diagnostic fails the compilation and
/// suppresses code generation.
#[derive(Debug)]
pub struct Diagnostic {
    error: Error,
    span: Option<Span>,
    notes: Vec<Note>,
}

impl Diagnostic {
    pub fn new(error: Error) -> Self {
        Diagnostic {
            error,
            span: None,
            notes: Vec::new(),
        }
    }

    /// Returns the message of this diagnostic.
    pub fn message(&self) -> String {
        self.error.message()
    }

    /// Returns this diagnostic's code, of the form `E###`.
    pub fn code(&self) -> &str {
        self.error.code()
    }

    /// Returns the [Span] of this diagnostic if it has one.
    pub fn span(&self) -> Option<&Span> {
        self.span.as_ref()
    }

    /// Returns any [Notes](Note) associated with this diagnostic.
    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn set_span(mut self, span: &Span) -> Self {
        self.span = Some(span.to_owned());
        self
    }

    pub fn add_note(mut self, message: impl Into<String>, span: Option<&Span>) -> Self {
        self.notes.push(Note {
            message: message.into(),
            span: span.cloned(),
        });
        self
    }

    pub fn extend_notes<I: IntoIterator<Item = Note>>(mut self, iter: I) -> Self {
        self.notes.extend(iter);
        self
    }

    pub fn push_into(self, diagnostics: &mut Diagnostics) {
        diagnostics.0.push(self);
    }
}

impl From<Error> for Diagnostic {
    fn from(error: Error) -> Self {
        Diagnostic::new(error)
    }
}

/// A container for all the diagnostics reported during a compilation.
#[derive(Debug, Default)]
pub struct Diagnostics(Vec<Diagnostic>);

impl Diagnostics {
    /// Creates a new diagnostics container that is empty.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if this contains any diagnostics.
    /// Every Decaf diagnostic is an error, so this doubles as the code-generation gate.
    pub fn has_errors(&self) -> bool {
        !self.0.is_empty()
    }

    /// Returns the number of diagnostics reported so far.
    /// This count never decreases over the lifetime of a compilation.
    pub fn error_count(&self) -> usize {
        self.0.len()
    }

    /// Returns true if this contains no diagnostics.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the diagnostics held by this container.
    pub fn into_inner(self) -> Vec<Diagnostic> {
        self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.0.iter()
    }
}
