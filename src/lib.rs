//! Static namespace, import and class resolution for PHP source text.
//!
//! For every class, interface, trait and enum in a unit of source text,
//! `nsresolve` reports the namespace it is declared in and the `use` imports
//! visible to it. Nothing is executed and no other files are consulted.
//!
//! # Example
//!
//! ```
//! let source = r#"<?php
//! namespace App\Http;
//!
//! use Psr\Log\LoggerInterface as Logger;
//!
//! $handler = function ($request) use ($config) {};
//!
//! class Controller {}
//! "#;
//!
//! let result = nsresolve::resolve(source).unwrap();
//! let controller = &result.classes[0];
//! assert_eq!(controller.fully_qualified_name().to_string(), "App\\Http\\Controller");
//! assert_eq!(controller.imports.class("Logger"), Some("Psr\\Log\\LoggerInterface"));
//! assert_eq!(controller.imports.len(), 1);
//! ```
//!
//! # Crates
//!
//! - `nsresolve-core`: spans, errors, qualified names, the hash service
//! - `nsresolve-parser`: stripper, lexer and resolver

mod error;

use std::path::Path;

pub use error::{Error, Result};
pub use nsresolve_core::{
    HashAlgorithm, HashError, Hasher, LineNumbered, QualifiedName, ResolveError,
    ResolveErrorKind, SourceUnit, Span, SyntaxError, TokenCode, hash,
};
pub use nsresolve_parser::{
    ClassDeclaration, ClassKind, DeclKinds, ImportAlias, ImportKind, Imports, Lexer,
    NamespaceBlock, NamespaceStyle, ResolutionResult, Resolver, ResolverOptions, Token, TokenKind,
    lexer, strip,
};
use tracing::{debug, warn};

/// Resolve source text with the default options.
pub fn resolve(source: &str) -> Result<ResolutionResult> {
    Ok(Resolver::new().resolve_str(source)?)
}

/// Resolve a source unit with the default options.
pub fn resolve_unit(unit: &SourceUnit) -> Result<ResolutionResult> {
    Ok(Resolver::new().resolve(unit)?)
}

/// Resolve a source unit with custom options.
pub fn resolve_with(unit: &SourceUnit, options: ResolverOptions) -> Result<ResolutionResult> {
    Ok(Resolver::with_options(options).resolve(unit)?)
}

/// Resolve several units independently.
///
/// One result per unit, in order. A malformed unit yields an error in its own
/// slot and never affects the others.
#[cfg_attr(feature = "profiling", profiling::function)]
pub fn resolve_all<'a, I>(units: I, options: &ResolverOptions) -> Vec<Result<ResolutionResult>>
where
    I: IntoIterator<Item = &'a SourceUnit>,
{
    let resolver = Resolver::with_options(options.clone());
    units
        .into_iter()
        .map(|unit| {
            resolver.resolve(unit).map_err(|err| {
                warn!(unit = unit.display_label(), %err, "unit failed to resolve");
                Error::from(err)
            })
        })
        .collect()
}

/// Read a file into a [`SourceUnit`] labeled with its path.
pub fn load(path: impl AsRef<Path>) -> Result<SourceUnit> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), bytes = text.len(), "loaded source");
    Ok(SourceUnit::labeled(path.display().to_string(), text))
}

/// Load and resolve a file with the default options.
pub fn resolve_file(path: impl AsRef<Path>) -> Result<ResolutionResult> {
    resolve_unit(&load(path)?)
}
