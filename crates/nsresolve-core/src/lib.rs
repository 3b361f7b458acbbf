//! Common types shared by the nsresolve crates.
//!
//! This crate provides:
//! - Source spans (`Span`)
//! - Source units handed to the resolver (`SourceUnit`)
//! - Backslash-qualified names (`QualifiedName`)
//! - The error taxonomy (`SyntaxError`, `ResolveError`, `HashError`)
//! - The `TokenCode` interface implemented by tokenizers
//! - A hash service over an explicit algorithm set (`hash`)

mod error;
pub mod hash;
mod qualified_name;
mod source;
mod span;
mod token;

pub use error::{HashError, LineNumbered, ResolveError, ResolveErrorKind, SyntaxError};
pub use hash::{HashAlgorithm, Hasher};
pub use qualified_name::QualifiedName;
pub use source::SourceUnit;
pub use span::Span;
pub use token::TokenCode;
