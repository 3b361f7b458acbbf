use std::fmt;

/// A backslash-separated name such as `App\Http\Controller`.
///
/// Leading separators are dropped: `\App\Model` and `App\Model` are the same
/// name, since both imports and namespace declarations are always absolute.
///
/// # Examples
///
/// ```
/// use nsresolve_core::QualifiedName;
///
/// let name = QualifiedName::parse("\\App\\Http\\Kernel");
/// assert_eq!(name.to_string(), "App\\Http\\Kernel");
/// assert_eq!(name.last_segment(), "Kernel");
///
/// let global = QualifiedName::parse("");
/// assert!(global.is_global());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct QualifiedName {
    segments: Vec<String>,
}

impl QualifiedName {
    /// The separator between segments.
    pub const SEPARATOR: char = '\\';

    /// The empty (global) name.
    pub fn global() -> Self {
        Self::default()
    }

    /// Parse from source text, splitting on `\`.
    pub fn parse(s: &str) -> Self {
        Self {
            segments: s
                .split(Self::SEPARATOR)
                .filter(|p| !p.is_empty())
                .map(str::to_string)
                .collect(),
        }
    }

    /// Whether this is the global (empty) name.
    pub fn is_global(&self) -> bool {
        self.segments.is_empty()
    }

    /// The segments of the name.
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// The final segment, or `""` for the global name.
    pub fn last_segment(&self) -> &str {
        self.segments.last().map(String::as_str).unwrap_or("")
    }

    /// Append another name below this one.
    ///
    /// Example: `App\Models` + `User` = `App\Models\User`
    pub fn join(&self, other: &QualifiedName) -> Self {
        let mut segments = self.segments.clone();
        segments.extend(other.segments.iter().cloned());
        Self { segments }
    }

    /// The enclosing name (if any).
    ///
    /// Example: `App\Models\User` -> Some(`App\Models`)
    pub fn parent(&self) -> Option<Self> {
        if self.segments.is_empty() {
            None
        } else {
            Some(Self {
                segments: self.segments[..self.segments.len() - 1].to_vec(),
            })
        }
    }
}

impl fmt::Display for QualifiedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                write!(f, "{}", Self::SEPARATOR)?;
            }
            f.write_str(segment)?;
        }
        Ok(())
    }
}

impl From<&str> for QualifiedName {
    fn from(s: &str) -> Self {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_strips_leading_separator() {
        assert_eq!(QualifiedName::parse("\\A\\B"), QualifiedName::parse("A\\B"));
        assert_eq!(QualifiedName::parse("\\A\\B").segments(), ["A", "B"]);
    }

    #[test]
    fn single_segment() {
        let name = QualifiedName::parse("Closure");
        assert_eq!(name.last_segment(), "Closure");
        assert_eq!(name.to_string(), "Closure");
        assert_eq!(name.parent(), Some(QualifiedName::global()));
    }

    #[test]
    fn join_and_parent() {
        let prefix = QualifiedName::parse("App\\Models");
        let joined = prefix.join(&QualifiedName::parse("Sub\\User"));
        assert_eq!(joined.to_string(), "App\\Models\\Sub\\User");
        assert_eq!(joined.parent().map(|p| p.to_string()), Some("App\\Models\\Sub".to_string()));
    }

    #[test]
    fn global_name() {
        let global = QualifiedName::global();
        assert!(global.is_global());
        assert_eq!(global.last_segment(), "");
        assert_eq!(global.to_string(), "");
        assert_eq!(global.parent(), None);
    }
}
