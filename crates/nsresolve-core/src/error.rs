//! Error types shared by every stage of resolution.
//!
//! ## Error Hierarchy
//!
//! ```text
//! SyntaxError    - general syntax failure with an optional, settable line
//! ResolveError   - malformed namespace structure (with ResolveErrorKind)
//! HashError      - hash service construction failures
//! ```
//!
//! Both [`SyntaxError`] and [`ResolveError`] implement [`LineNumbered`], so
//! callers that only care about "where did it go wrong" can treat them
//! uniformly.

use thiserror::Error;

/// Errors that carry a source line number which can be read and replaced.
pub trait LineNumbered {
    /// The 1-based line the error refers to, if known.
    fn line(&self) -> Option<u32>;

    /// Replace the line the error refers to.
    fn set_line(&mut self, line: u32);
}

// ============================================================================
// Syntax Errors
// ============================================================================

/// A general syntax error with an optional source line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}{}", .line.map(|l| format!(" on line {l}")).unwrap_or_default())]
pub struct SyntaxError {
    message: String,
    line: Option<u32>,
}

impl SyntaxError {
    /// Create an error without a known line.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            line: None,
        }
    }

    /// Create an error pointing at a line.
    pub fn at_line(message: impl Into<String>, line: u32) -> Self {
        Self {
            message: message.into(),
            line: Some(line),
        }
    }

    /// The error message without location.
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl LineNumbered for SyntaxError {
    fn line(&self) -> Option<u32> {
        self.line
    }

    fn set_line(&mut self, line: u32) {
        self.line = Some(line);
    }
}

impl From<ResolveError> for SyntaxError {
    fn from(error: ResolveError) -> Self {
        Self::at_line(error.message, error.line)
    }
}

// ============================================================================
// Resolve Errors
// ============================================================================

/// Categories of malformed namespace structure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResolveErrorKind {
    /// A namespace declared inside an open brace scope.
    NestedNamespace,
    /// More than one unbraced namespace statement in a unit.
    DuplicateUnbracedNamespace,
    /// Braced and unbraced namespace statements mixed in a unit.
    MixedNamespaceStyles,
    /// A `namespace` keyword not followed by a name, `;` or `{`.
    MalformedNamespace,
    /// A closing brace without an opening one, or an opening brace never closed.
    UnbalancedBrace,
    /// A braced namespace still open at end of input.
    UnclosedNamespace,
    /// The input exceeds the configured size limit.
    SourceTooLarge,
}

impl ResolveErrorKind {
    /// Returns a human-readable name for this error kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            ResolveErrorKind::NestedNamespace => "nested namespace",
            ResolveErrorKind::DuplicateUnbracedNamespace => "duplicate namespace statement",
            ResolveErrorKind::MixedNamespaceStyles => "mixed namespace styles",
            ResolveErrorKind::MalformedNamespace => "malformed namespace",
            ResolveErrorKind::UnbalancedBrace => "unbalanced brace",
            ResolveErrorKind::UnclosedNamespace => "unclosed namespace",
            ResolveErrorKind::SourceTooLarge => "source too large",
        }
    }
}

impl std::fmt::Display for ResolveErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A terminal structural error for one source unit.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error(
    "{}line {line}: {kind}: {message}",
    .label.as_deref().map(|l| format!("{l}: ")).unwrap_or_default()
)]
pub struct ResolveError {
    /// The category of this error.
    pub kind: ResolveErrorKind,
    /// 1-based line where the problem was detected.
    pub line: u32,
    /// Label of the unit being resolved, when it has one.
    pub label: Option<String>,
    /// A detailed error message.
    pub message: String,
}

impl ResolveError {
    /// Create a new resolve error.
    pub fn new(kind: ResolveErrorKind, line: u32, message: impl Into<String>) -> Self {
        Self {
            kind,
            line,
            label: None,
            message: message.into(),
        }
    }

    /// Attach the label of the unit that failed.
    pub fn with_label(mut self, label: Option<&str>) -> Self {
        self.label = label.map(str::to_string);
        self
    }

    /// A namespace statement found inside an open brace scope.
    pub fn nested_namespace(line: u32, name: &str, enclosing: Option<&str>) -> Self {
        let message = match enclosing {
            Some(outer) => format!("namespace `{name}` declared inside namespace `{outer}`"),
            None => format!("namespace `{name}` must be declared at the top level"),
        };
        Self::new(ResolveErrorKind::NestedNamespace, line, message)
    }

    /// A closing brace with nothing to close.
    pub fn unexpected_close_brace(line: u32) -> Self {
        Self::new(
            ResolveErrorKind::UnbalancedBrace,
            line,
            "unexpected `}` with no matching `{`",
        )
    }

    /// An opening brace never closed.
    pub fn unclosed_brace(line: u32) -> Self {
        Self::new(
            ResolveErrorKind::UnbalancedBrace,
            line,
            "`{` is never closed",
        )
    }

    /// Format the error with the offending source line and a caret.
    pub fn display_with_source(&self, source: &str) -> String {
        let mut output = String::new();

        match &self.label {
            Some(label) => output.push_str(&format!("Error in {} at line {}: {}\n", label, self.line, self.kind)),
            None => output.push_str(&format!("Error at line {}: {}\n", self.line, self.kind)),
        }

        if !self.message.is_empty() {
            output.push_str(&format!("  {}\n", self.message));
        }

        let mut lines = source.split('\n').flat_map(|line| {
            let line = line.strip_suffix('\r').unwrap_or(line);
            line.split('\r')
        });
        if let Some(line_text) = lines.nth(self.line.saturating_sub(1) as usize) {
            let indent = line_text.len() - line_text.trim_start().len();
            output.push_str("  |\n");
            output.push_str(&format!("{:>3} | {}\n", self.line, line_text));
            output.push_str(&format!("  | {}^\n", " ".repeat(indent)));
        }

        output
    }
}

impl LineNumbered for ResolveError {
    fn line(&self) -> Option<u32> {
        Some(self.line)
    }

    fn set_line(&mut self, line: u32) {
        self.line = line;
    }
}

// ============================================================================
// Hash Errors
// ============================================================================

/// Errors raised by the hash service.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HashError {
    /// The requested algorithm identifier is not in the supported set.
    #[error("unsupported hash algorithm '{name}'")]
    UnsupportedAlgorithm { name: String },
}
