//! Namespace, import and class resolution.
//!
//! A [`Resolver`] runs three stages over one [`SourceUnit`]:
//!
//! 1. [`strip`](crate::strip) blanks comments, literal contents and inline HTML;
//! 2. the [`Lexer`] tokenizes the stripped text;
//! 3. a single pass over the tokens tracks brace depth and namespace blocks,
//!    collects `use` imports at each block's statement level and records every
//!    class-like declaration against the block it appears in.
//!
//! Imports are attached once the pass is complete, so a class sees every
//! import of its block regardless of where the `use` statement sits.
//!
//! # Example
//!
//! ```
//! use nsresolve_parser::Resolver;
//!
//! let result = Resolver::new()
//!     .resolve_str("<?php namespace A; use X\\Y as Z; class C {}")
//!     .unwrap();
//!
//! let class = &result.classes[0];
//! assert_eq!(class.name, "C");
//! assert_eq!(class.namespace.to_string(), "A");
//! assert_eq!(class.imports.class("Z"), Some("X\\Y"));
//! ```

mod classes;
mod imports;
mod options;
mod scope;

pub use classes::{ClassDeclaration, ClassKind};
pub use imports::{ImportAlias, ImportKind, Imports};
pub use options::{DeclKinds, ResolverOptions};
pub use scope::{NamespaceBlock, NamespaceStyle};

use nsresolve_core::{ResolveError, ResolveErrorKind, SourceUnit};
use tracing::{debug, trace};

use crate::lexer::{Lexer, Token, TokenKind};
use crate::strip::Stripper;
use classes::declaration_at;
use imports::parse_use;
use scope::ScopeTracker;

/// Everything discovered in one source unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolutionResult {
    /// Label of the resolved unit.
    pub label: Option<String>,
    /// Declarations in source order.
    pub classes: Vec<ClassDeclaration>,
    /// Namespace blocks in source order; the implicit global block is first.
    pub namespaces: Vec<NamespaceBlock>,
}

impl ResolutionResult {
    /// The first declaration with this short name.
    pub fn find(&self, name: &str) -> Option<&ClassDeclaration> {
        self.classes.iter().find(|c| c.name == name)
    }

    /// Declarations in the named namespace.
    pub fn in_namespace<'a>(&'a self, namespace: &'a str) -> impl Iterator<Item = &'a ClassDeclaration> {
        self.classes
            .iter()
            .filter(move |c| c.namespace.to_string() == namespace)
    }

    /// Whether no declarations were found.
    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}

/// Resolves namespaces, imports and declarations in PHP source text.
#[derive(Debug, Clone, Default)]
pub struct Resolver {
    options: ResolverOptions,
}

impl Resolver {
    /// A resolver with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// A resolver with custom options.
    pub fn with_options(options: ResolverOptions) -> Self {
        Self { options }
    }

    /// The options in use.
    pub fn options(&self) -> &ResolverOptions {
        &self.options
    }

    /// Resolve an unlabeled piece of source text.
    pub fn resolve_str(&self, source: &str) -> Result<ResolutionResult, ResolveError> {
        self.resolve(&SourceUnit::new(source))
    }

    /// Resolve one source unit.
    ///
    /// Errors carry the unit's label and the 1-based line of the problem.
    #[cfg_attr(feature = "profiling", profiling::function)]
    pub fn resolve(&self, unit: &SourceUnit) -> Result<ResolutionResult, ResolveError> {
        self.resolve_text(unit.text())
            .map(|(classes, namespaces)| ResolutionResult {
                label: unit.label().map(str::to_string),
                classes,
                namespaces,
            })
            .map_err(|e| e.with_label(unit.label()))
    }

    fn resolve_text(
        &self,
        text: &str,
    ) -> Result<(Vec<ClassDeclaration>, Vec<NamespaceBlock>), ResolveError> {
        if let Some(limit) = self.options.max_source_len()
            && text.len() > limit
        {
            return Err(ResolveError::new(
                ResolveErrorKind::SourceTooLarge,
                1,
                format!("source is {} bytes, limit is {limit}", text.len()),
            ));
        }

        let stripped = Stripper::new()
            .with_open_tags(self.options.open_tags())
            .strip(text);
        let tokens = Lexer::tokenize(stripped.text());
        debug!(tokens = tokens.len(), "tokenized");

        let pending = walk(&tokens, &self.options)?;
        let last_line = tokens.last().map_or(1, |t| t.span.line);
        let blocks = pending.scope.finish(text.len(), last_line)?;

        let classes: Vec<_> = pending
            .classes
            .into_iter()
            .map(|p| {
                let block = &blocks[p.block];
                ClassDeclaration {
                    name: p.name,
                    kind: p.kind,
                    line: p.line,
                    namespace: block.name.clone(),
                    imports: block.imports.clone(),
                }
            })
            .collect();

        debug!(
            classes = classes.len(),
            namespaces = blocks.len(),
            "resolved"
        );
        Ok((classes, blocks))
    }
}

/// A declaration whose imports are attached after the pass.
struct PendingClass {
    block: usize,
    name: String,
    kind: ClassKind,
    line: u32,
}

struct Walk {
    scope: ScopeTracker,
    classes: Vec<PendingClass>,
}

/// The single pass over the token stream.
fn walk(tokens: &[Token<'_>], options: &ResolverOptions) -> Result<Walk, ResolveError> {
    let mut scope = ScopeTracker::new();
    let mut classes = Vec::new();

    let mut pos = 0;
    while pos < tokens.len() {
        let token = &tokens[pos];
        match token.kind {
            TokenKind::LeftBrace => scope.open_brace(token),
            TokenKind::RightBrace => scope.close_brace(token)?,
            TokenKind::Namespace => pos = scope.namespace(tokens, pos)?,
            TokenKind::Use if is_import(tokens, pos, &scope) => {
                if let Some((imports, end)) = parse_use(tokens, pos) {
                    scope.active_block_mut().add_imports(imports);
                    pos = end;
                } else {
                    debug!(line = token.span.line, "skipping malformed use statement");
                }
            }
            TokenKind::Class | TokenKind::Interface | TokenKind::Trait | TokenKind::Enum => {
                if let Some((kind, name)) = declaration_at(tokens, pos)
                    && options.kinds().contains(kind.flag())
                {
                    trace!(%kind, name = name.lexeme, line = token.span.line, "declaration");
                    classes.push(PendingClass {
                        block: scope.active(),
                        name: name.lexeme.to_string(),
                        kind,
                        line: token.span.line,
                    });
                    pos += 1;
                }
            }
            _ => {}
        }
        pos += 1;
    }

    Ok(Walk { scope, classes })
}

/// Whether the `use` at `pos` is an import rather than a closure capture or
/// trait composition.
fn is_import(tokens: &[Token<'_>], pos: usize, scope: &ScopeTracker) -> bool {
    if !scope.at_statement_level() {
        return false;
    }
    let next = tokens.get(pos + 1).map(|t| t.kind);
    let prev = pos.checked_sub(1).map(|p| tokens[p].kind);
    next != Some(TokenKind::LeftParen) && prev != Some(TokenKind::RightParen)
}
