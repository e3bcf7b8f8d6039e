// Copyright (c) ZeroC, Inc.

use console::style;
use serde::Serialize;
use std::cmp::{max, min, Ordering};

/// Stores the row and column numbers of a location in a Decaf source file.
/// These values are indexed starting at 1 instead of 0 for human readability.
/// Ex: (1,1) is the start of a file: the first column in the first row.
#[derive(Serialize, Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd)]
pub struct Location {
    pub row: usize,
    pub col: usize,
}

impl Location {
    /// Returns true if this [`Location`] is within the specified [`Span`] (including the span's boundary).
    pub fn is_within(&self, span: &Span) -> bool {
        self.cmp(&span.start) != Ordering::Less && self.cmp(&span.end) != Ordering::Greater
    }
}

impl From<(usize, usize)> for Location {
    /// Creates a [Location] from a pair of indices, where the first element represents the line number,
    /// and the second element represents the column number.
    fn from(x: (usize, usize)) -> Self {
        Location { row: x.0, col: x.1 }
    }
}

impl Default for Location {
    /// Returns a [Location] representing the start of a file: (1,1).
    fn default() -> Self {
        Location { row: 1, col: 1 }
    }
}

/// A region of the source text, used to anchor diagnostics.
#[derive(Serialize, Clone, Debug, Eq, PartialEq)]
pub struct Span {
    pub start: Location,
    pub end: Location,
}

impl Span {
    pub fn new(start: Location, end: Location) -> Self {
        Span { start, end }
    }
}

impl Default for Span {
    /// Returns a zero-width [Span] at the start of a file.
    fn default() -> Self {
        Span::new(Location::default(), Location::default())
    }
}

impl std::ops::Add for &Span {
    type Output = Span;

    fn add(self, rhs: Self) -> Self::Output {
        Span {
            start: min(self.start, rhs.start),
            end: max(self.end, rhs.end),
        }
    }
}

/// The source text being compiled, along with the name it should be reported under.
/// The compiler operates on exactly one source per compilation; programs read from
/// standard input are named "<stdin>".
#[derive(Debug)]
pub struct SourceFile {
    pub name: String,
    pub raw_text: String,
}

impl SourceFile {
    pub fn new(name: impl Into<String>, raw_text: impl Into<String>) -> Self {
        SourceFile {
            name: name.into(),
            raw_text: raw_text.into(),
        }
    }

    /// Renders the source lines covered by `start..end` for diagnostic output. Every line is
    /// prefixed with its number in a gutter, and the region the diagnostic points at is marked
    /// with carets on the line beneath it.
    pub(crate) fn get_snippet(&self, start: Location, end: Location) -> String {
        debug_assert!(start <= end);

        // The gutter is sized to the widest line number it has to hold, which is always the last.
        let gutter = end.row.to_string().len();
        let mut snippet = String::new();

        for (index, line) in self.raw_text.lines().enumerate() {
            let row = index + 1;
            if row < start.row || row > end.row {
                continue;
            }

            let number = style(format!("{row:>gutter$} |")).blue().bold();
            snippet.push_str(&format!("{number} {line}\n"));

            // The marked columns: the span's own columns on its first and last rows, the whole
            // line on any row in between. The end column is exclusive.
            let first = if row == start.row { start.col } else { 1 };
            let last = if row == end.row { end.col } else { line.chars().count() + 1 };

            let spacer = style(format!("{:>gutter$} |", "")).blue().bold();
            snippet.push_str(&format!("{spacer} {}\n", marker_line(line, first, last)));
        }

        // Drop the final newline; the emitter terminates the snippet itself.
        snippet.pop();
        snippet
    }
}

/// Builds the caret line marking columns `first..last` (1-based) of `line`.
///
/// Tabs are copied into the padding unchanged, so the carets stay aligned no matter how wide
/// the terminal renders a tab. A region that is empty, or that sits past the end of the line,
/// still gets one caret pointing at where it starts.
fn marker_line(line: &str, first: usize, last: usize) -> String {
    let mut marker = String::new();
    for (index, c) in line.chars().enumerate() {
        let column = index + 1;
        if column >= last {
            break;
        }
        if column < first {
            marker.push(if c == '\t' { '\t' } else { ' ' });
        } else {
            marker.push(if c == '\t' { '\t' } else { '^' });
        }
    }
    if !marker.contains('^') {
        marker.push('^');
    }
    style(marker).yellow().bold().to_string()
}
