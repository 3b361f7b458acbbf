//! `use` statement parsing.
//!
//! Handles the plain, comma-separated and group forms:
//!
//! ```text
//! use A\B;
//! use A\B as C, D\E;
//! use function A\f, A\g as h;
//! use const A\X;
//! use A\{B, C as D, function f, const X};
//! ```

use nsresolve_core::QualifiedName;
use rustc_hash::FxHashMap;
use tracing::{debug, trace};

use crate::lexer::{Token, TokenKind};

/// What an import binds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImportKind {
    /// Class, interface, trait or enum (`use A\B`).
    Class,
    /// `use function A\f`
    Function,
    /// `use const A\X`
    Constant,
}

/// One `alias → name` binding from a `use` statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportAlias {
    pub kind: ImportKind,
    /// Local name; the last segment of `name` unless `as` was given.
    pub alias: String,
    /// Imported name, always absolute.
    pub name: QualifiedName,
    /// 1-based line of the imported name.
    pub line: u32,
}

/// The imports visible in one namespace block, keyed by alias.
///
/// Values are rendered fully qualified names without a leading `\`.
/// A later import with the same alias replaces an earlier one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Imports {
    pub aliases: FxHashMap<String, String>,
    pub functions: FxHashMap<String, String>,
    pub constants: FxHashMap<String, String>,
}

impl Imports {
    /// Record an import in the map for its kind.
    pub fn insert(&mut self, import: &ImportAlias) {
        let map = match import.kind {
            ImportKind::Class => &mut self.aliases,
            ImportKind::Function => &mut self.functions,
            ImportKind::Constant => &mut self.constants,
        };
        if let Some(previous) = map.insert(import.alias.clone(), import.name.to_string()) {
            debug!(
                alias = %import.alias,
                %previous,
                line = import.line,
                "import alias redefined"
            );
        }
    }

    /// The class name bound to `alias`, if any.
    pub fn class(&self, alias: &str) -> Option<&str> {
        self.aliases.get(alias).map(String::as_str)
    }

    /// The function name bound to `alias`, if any.
    pub fn function(&self, alias: &str) -> Option<&str> {
        self.functions.get(alias).map(String::as_str)
    }

    /// The constant name bound to `alias`, if any.
    pub fn constant(&self, alias: &str) -> Option<&str> {
        self.constants.get(alias).map(String::as_str)
    }

    /// Total number of bindings across all three maps.
    pub fn len(&self) -> usize {
        self.aliases.len() + self.functions.len() + self.constants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Parse the `use` statement whose keyword is at `tokens[start]`.
///
/// Returns the imports and the index of the terminating `;` (or `?>`).
/// Returns `None` without consuming anything if the statement does not have
/// the shape of an import.
pub(crate) fn parse_use(tokens: &[Token<'_>], start: usize) -> Option<(Vec<ImportAlias>, usize)> {
    let mut pos = start + 1;
    let kind = match kind_at(tokens, pos) {
        TokenKind::Function => {
            pos += 1;
            ImportKind::Function
        }
        TokenKind::Const => {
            pos += 1;
            ImportKind::Constant
        }
        _ => ImportKind::Class,
    };

    let mut imports = Vec::new();
    loop {
        let target = tokens.get(pos).filter(|t| t.is_import_target())?;
        pos += 1;

        if kind_at(tokens, pos) == TokenKind::Backslash
            && kind_at(tokens, pos + 1) == TokenKind::LeftBrace
        {
            let prefix = QualifiedName::parse(target.lexeme);
            pos = parse_group(tokens, pos + 2, kind, &prefix, &mut imports)?;
        } else {
            let (import, next) = parse_clause(tokens, pos, kind, target, None)?;
            imports.push(import);
            pos = next;
        }

        match kind_at(tokens, pos) {
            TokenKind::Comma => pos += 1,
            TokenKind::Semicolon | TokenKind::CloseTag => {
                trace!(count = imports.len(), line = tokens[start].span.line, "use statement");
                return Some((imports, pos));
            }
            _ => return None,
        }
    }
}

/// Parse the items of `prefix\{ ... }` starting after the `{`.
///
/// Returns the index just past the closing `}`.
fn parse_group(
    tokens: &[Token<'_>],
    mut pos: usize,
    outer: ImportKind,
    prefix: &QualifiedName,
    imports: &mut Vec<ImportAlias>,
) -> Option<usize> {
    loop {
        if kind_at(tokens, pos) == TokenKind::RightBrace {
            return Some(pos + 1);
        }

        // Mixed groups may tag individual items.
        let kind = match (outer, kind_at(tokens, pos)) {
            (ImportKind::Class, TokenKind::Function) => {
                pos += 1;
                ImportKind::Function
            }
            (ImportKind::Class, TokenKind::Const) => {
                pos += 1;
                ImportKind::Constant
            }
            _ => outer,
        };

        let target = tokens.get(pos).filter(|t| t.is_import_target())?;
        let (import, next) = parse_clause(tokens, pos + 1, kind, target, Some(prefix))?;
        imports.push(import);
        pos = next;

        match kind_at(tokens, pos) {
            TokenKind::Comma => pos += 1,
            TokenKind::RightBrace => return Some(pos + 1),
            _ => return None,
        }
    }
}

/// Build one import from `target` and an optional `as alias` at `pos`.
fn parse_clause(
    tokens: &[Token<'_>],
    pos: usize,
    kind: ImportKind,
    target: &Token<'_>,
    prefix: Option<&QualifiedName>,
) -> Option<(ImportAlias, usize)> {
    let relative = QualifiedName::parse(target.lexeme);
    let name = match prefix {
        Some(prefix) => prefix.join(&relative),
        None => relative,
    };

    let (alias, next) = if kind_at(tokens, pos) == TokenKind::As {
        let alias = tokens.get(pos + 1).filter(|t| t.is_name())?;
        (alias.lexeme.to_string(), pos + 2)
    } else {
        (name.last_segment().to_string(), pos)
    };

    if alias.is_empty() {
        return None;
    }

    Some((
        ImportAlias {
            kind,
            alias,
            name,
            line: target.span.line,
        },
        next,
    ))
}

#[inline]
fn kind_at(tokens: &[Token<'_>], pos: usize) -> TokenKind {
    tokens.get(pos).map_or(TokenKind::Eof, |t| t.kind)
}
