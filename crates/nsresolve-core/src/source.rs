//! Input units handed to the resolver.

use std::fmt;

/// One unit of source text plus an optional label used in diagnostics.
///
/// The resolver only ever reads the text; loading it from disk is the
/// caller's job.
///
/// # Example
///
/// ```
/// use nsresolve_core::SourceUnit;
///
/// let unit = SourceUnit::labeled("src/Foo.php", "<?php class Foo {}");
/// assert_eq!(unit.label(), Some("src/Foo.php"));
/// assert_eq!(unit.display_label(), "src/Foo.php");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceUnit {
    label: Option<String>,
    text: String,
}

impl SourceUnit {
    /// Create an unlabeled unit.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            label: None,
            text: text.into(),
        }
    }

    /// Create a unit with a label (usually its path).
    pub fn labeled(label: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            label: Some(label.into()),
            text: text.into(),
        }
    }

    /// The source text.
    #[inline]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The label, if one was given.
    #[inline]
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// The label, or `<memory>` for unlabeled units.
    pub fn display_label(&self) -> &str {
        self.label.as_deref().unwrap_or("<memory>")
    }

    /// Size of the text in bytes.
    #[inline]
    pub fn len(&self) -> usize {
        self.text.len()
    }

    /// Whether the text is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

impl From<&str> for SourceUnit {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

impl From<String> for SourceUnit {
    fn from(text: String) -> Self {
        Self::new(text)
    }
}

impl fmt::Display for SourceUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} bytes)", self.display_label(), self.text.len())
    }
}
