use std::path::PathBuf;

use nsresolve_core::{HashError, LineNumbered, ResolveError, SyntaxError};

pub type Result<T> = std::result::Result<T, Error>;

/// Any failure surfaced by the facade.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Malformed namespace structure in a source unit.
    #[error(transparent)]
    Resolve(#[from] ResolveError),

    #[error(transparent)]
    Syntax(#[from] SyntaxError),

    #[error(transparent)]
    Hash(#[from] HashError),

    /// A source file could not be read.
    #[error("failed to read '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    /// The source line the error refers to, for resolve and syntax errors.
    pub fn line(&self) -> Option<u32> {
        match self {
            Error::Resolve(err) => err.line(),
            Error::Syntax(err) => err.line(),
            Error::Hash(_) | Error::Io { .. } => None,
        }
    }

    /// Get the underlying resolve error, if this is one.
    pub fn as_resolve_error(&self) -> Option<&ResolveError> {
        match self {
            Error::Resolve(err) => Some(err),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nsresolve_core::ResolveErrorKind;

    #[test]
    fn line_comes_from_the_wrapped_error() {
        let err: Error = ResolveError::unclosed_brace(9).into();
        assert_eq!(err.line(), Some(9));
        assert_eq!(
            err.as_resolve_error().map(|e| e.kind),
            Some(ResolveErrorKind::UnbalancedBrace)
        );

        let err: Error = SyntaxError::new("bad").into();
        assert_eq!(err.line(), None);
    }

    #[test]
    fn io_error_names_the_path() {
        let err = Error::Io {
            path: PathBuf::from("missing.php"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        };
        assert_eq!(err.to_string(), "failed to read 'missing.php': not found");
        assert!(err.line().is_none());
    }
}
