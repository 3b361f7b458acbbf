//! Namespace block tracking.
//!
//! [`ScopeTracker`] follows brace depth across the token stream and keeps the
//! list of namespace blocks. Block 0 is always the implicit global block; it
//! spans the whole unit and explicit blocks carve their ranges out of it.

use std::ops::Range;

use nsresolve_core::{QualifiedName, ResolveError, ResolveErrorKind};
use tracing::debug;

use super::imports::{ImportAlias, Imports};
use crate::lexer::{Token, TokenKind};

/// How a namespace block is delimited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NamespaceStyle {
    /// `namespace A { ... }` or `namespace { ... }`
    Braced,
    /// `namespace A;` running to end of file.
    Unbraced,
    /// Code outside every explicit namespace.
    Global,
}

/// A namespace scope and the imports declared directly in it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamespaceBlock {
    /// Namespace name; global when empty.
    pub name: QualifiedName,
    pub style: NamespaceStyle,
    /// Byte range from the `namespace` keyword to the closing `}` or end of input.
    pub range: Range<usize>,
    /// 1-based line of the `namespace` keyword (1 for the global block).
    pub start_line: u32,
    /// 1-based line where the block ends.
    pub end_line: u32,
    /// Import statements in source order.
    pub uses: Vec<ImportAlias>,
    /// The same imports keyed by alias.
    pub imports: Imports,
}

impl NamespaceBlock {
    fn new(name: QualifiedName, style: NamespaceStyle, start: usize, line: u32) -> Self {
        Self {
            name,
            style,
            range: start..start,
            start_line: line,
            end_line: line,
            uses: Vec::new(),
            imports: Imports::default(),
        }
    }

    /// Add imports from one `use` statement.
    pub fn add_imports(&mut self, imports: Vec<ImportAlias>) {
        for import in &imports {
            self.imports.insert(import);
        }
        self.uses.extend(imports);
    }
}

/// The braced namespace currently open.
#[derive(Debug, Clone, Copy)]
struct OpenNamespace {
    block: usize,
    /// Brace depth inside the body.
    body_depth: usize,
    keyword_line: u32,
}

/// What follows a `namespace` keyword.
enum Declaration<'src> {
    Unbraced(&'src str),
    Braced(Option<&'src str>),
}

/// Brace and namespace state for one pass over a token stream.
#[derive(Debug)]
pub(crate) struct ScopeTracker {
    blocks: Vec<NamespaceBlock>,
    active: usize,
    braced: Option<OpenNamespace>,
    /// Line of every `{` still open.
    open_braces: Vec<u32>,
    unbraced_line: Option<u32>,
    braced_seen: bool,
}

impl ScopeTracker {
    pub fn new() -> Self {
        Self {
            blocks: vec![NamespaceBlock::new(
                QualifiedName::global(),
                NamespaceStyle::Global,
                0,
                1,
            )],
            active: 0,
            braced: None,
            open_braces: Vec::new(),
            unbraced_line: None,
            braced_seen: false,
        }
    }

    /// Index of the block governing the current position.
    #[inline]
    pub fn active(&self) -> usize {
        self.active
    }

    pub fn active_block_mut(&mut self) -> &mut NamespaceBlock {
        &mut self.blocks[self.active]
    }

    /// Whether the current position is a statement of the active block,
    /// i.e. not inside a class, function or control-flow body.
    pub fn at_statement_level(&self) -> bool {
        let depth = self.braced.map_or(0, |ns| ns.body_depth);
        self.open_braces.len() == depth
    }

    pub fn open_brace(&mut self, token: &Token<'_>) {
        self.open_braces.push(token.span.line);
    }

    pub fn close_brace(&mut self, token: &Token<'_>) -> Result<(), ResolveError> {
        if self.open_braces.pop().is_none() {
            return Err(ResolveError::unexpected_close_brace(token.span.line));
        }

        if let Some(ns) = self.braced
            && self.open_braces.len() < ns.body_depth
        {
            let block = &mut self.blocks[ns.block];
            block.range.end = token.span.end() as usize;
            block.end_line = token.span.line;
            debug!(namespace = %block.name, line = token.span.line, "namespace closed");
            self.braced = None;
            self.active = 0;
        }
        Ok(())
    }

    /// Handle the `namespace` keyword at `tokens[pos]`.
    ///
    /// Only a `namespace` at the start of a statement declares anything;
    /// elsewhere it is a name (`Foo::namespace`, `const NAMESPACE`,
    /// `case Namespace`, `f(namespace: 1)`).
    ///
    /// Returns the index of the last token consumed: the keyword itself when
    /// it is only a name, else the `;` or `{`.
    pub fn namespace(&mut self, tokens: &[Token<'_>], pos: usize) -> Result<usize, ResolveError> {
        let keyword = &tokens[pos];
        let line = keyword.span.line;

        if !starts_statement(tokens, pos) {
            return Ok(pos);
        }

        let declaration = parse_declaration(tokens, pos).ok_or_else(|| {
            ResolveError::new(
                ResolveErrorKind::MalformedNamespace,
                line,
                format!(
                    "expected a namespace name followed by `;` or `{{`, found {}",
                    tokens.get(pos + 1).map_or(TokenKind::Eof, |t| t.kind)
                ),
            )
        })?;

        if !self.open_braces.is_empty() {
            let name = match declaration {
                Declaration::Unbraced(name) | Declaration::Braced(Some(name)) => name,
                Declaration::Braced(None) => "",
            };
            let enclosing = self.braced.map(|ns| self.blocks[ns.block].name.to_string());
            return Err(ResolveError::nested_namespace(line, name, enclosing.as_deref()));
        }

        match declaration {
            Declaration::Unbraced(name) => {
                if let Some(first) = self.unbraced_line {
                    return Err(ResolveError::new(
                        ResolveErrorKind::DuplicateUnbracedNamespace,
                        line,
                        format!("namespace `{name}` follows the namespace statement on line {first}"),
                    ));
                }
                if self.braced_seen {
                    return Err(mixed_styles(line));
                }

                self.unbraced_line = Some(line);
                self.push_block(QualifiedName::parse(name), NamespaceStyle::Unbraced, keyword);
                Ok(pos + 2)
            }
            Declaration::Braced(name) => {
                if self.unbraced_line.is_some() {
                    return Err(mixed_styles(line));
                }

                self.braced_seen = true;
                let name = name.map(QualifiedName::parse).unwrap_or_default();
                let brace = if name.is_global() { pos + 1 } else { pos + 2 };
                self.push_block(name, NamespaceStyle::Braced, keyword);
                self.open_brace(&tokens[brace]);
                self.braced = Some(OpenNamespace {
                    block: self.active,
                    body_depth: self.open_braces.len(),
                    keyword_line: line,
                });
                Ok(brace)
            }
        }
    }

    /// Close out the pass: check nothing is left open and fix block ends.
    pub fn finish(mut self, len: usize, last_line: u32) -> Result<Vec<NamespaceBlock>, ResolveError> {
        if let Some(ns) = self.braced {
            let name = &self.blocks[ns.block].name;
            let message = if name.is_global() {
                "global namespace block is never closed".to_string()
            } else {
                format!("namespace `{name}` is never closed")
            };
            return Err(ResolveError::new(
                ResolveErrorKind::UnclosedNamespace,
                ns.keyword_line,
                message,
            ));
        }
        if let Some(&line) = self.open_braces.first() {
            return Err(ResolveError::unclosed_brace(line));
        }

        for block in &mut self.blocks {
            if block.style != NamespaceStyle::Braced {
                block.range.end = len;
                block.end_line = last_line;
            }
        }
        Ok(self.blocks)
    }

    fn push_block(&mut self, name: QualifiedName, style: NamespaceStyle, keyword: &Token<'_>) {
        debug!(namespace = %name, ?style, line = keyword.span.line, "namespace opened");
        self.blocks.push(NamespaceBlock::new(
            name,
            style,
            keyword.span.offset as usize,
            keyword.span.line,
        ));
        self.active = self.blocks.len() - 1;
    }
}

/// Whether `tokens[pos]` is the first token of a statement.
fn starts_statement(tokens: &[Token<'_>], pos: usize) -> bool {
    pos.checked_sub(1).is_none_or(|prev| {
        matches!(
            tokens[prev].kind,
            TokenKind::Semicolon
                | TokenKind::LeftBrace
                | TokenKind::RightBrace
                | TokenKind::OpenTag
                | TokenKind::CloseTag
        )
    })
}

fn mixed_styles(line: u32) -> ResolveError {
    ResolveError::new(
        ResolveErrorKind::MixedNamespaceStyles,
        line,
        "braced and unbraced namespace declarations cannot be mixed",
    )
}

/// Match `namespace Name ;`, `namespace Name {` or `namespace {` at `pos`.
fn parse_declaration<'src>(tokens: &[Token<'src>], pos: usize) -> Option<Declaration<'src>> {
    let next = tokens.get(pos + 1)?;
    if next.kind == TokenKind::LeftBrace {
        return Some(Declaration::Braced(None));
    }
    if !(next.is_name() || next.kind == TokenKind::QualifiedName) {
        return None;
    }
    match tokens.get(pos + 2)?.kind {
        TokenKind::Semicolon | TokenKind::CloseTag => Some(Declaration::Unbraced(next.lexeme)),
        TokenKind::LeftBrace => Some(Declaration::Braced(Some(next.lexeme))),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::Lexer;

    /// Run the tracker over braces and namespace keywords only.
    fn scan(source: &str) -> Result<Vec<NamespaceBlock>, ResolveError> {
        let tokens = Lexer::tokenize(source);
        let mut scope = ScopeTracker::new();
        let mut pos = 0;
        while pos < tokens.len() {
            match tokens[pos].kind {
                TokenKind::Namespace => pos = scope.namespace(&tokens, pos)?,
                TokenKind::LeftBrace => scope.open_brace(&tokens[pos]),
                TokenKind::RightBrace => scope.close_brace(&tokens[pos])?,
                _ => {}
            }
            pos += 1;
        }
        let eof = tokens[tokens.len() - 1];
        scope.finish(source.len(), eof.span.line)
    }

    fn names(blocks: &[NamespaceBlock]) -> Vec<(String, NamespaceStyle)> {
        blocks.iter().map(|b| (b.name.to_string(), b.style)).collect()
    }

    #[test]
    fn global_block_only() {
        let blocks = scan("<?php\nclass A {}\n").unwrap();
        assert_eq!(names(&blocks), vec![(String::new(), NamespaceStyle::Global)]);
        assert_eq!(blocks[0].range, 0..17);
        assert_eq!(blocks[0].end_line, 3);
    }

    #[test]
    fn unbraced_runs_to_end() {
        let source = "<?php\nnamespace App\\Http;\nclass A {}\n";
        let blocks = scan(source).unwrap();
        assert_eq!(blocks[1].name.to_string(), "App\\Http");
        assert_eq!(blocks[1].style, NamespaceStyle::Unbraced);
        assert_eq!(blocks[1].range, 6..source.len());
        assert_eq!(blocks[1].start_line, 2);
    }

    #[test]
    fn braced_blocks_close_at_matching_brace() {
        let source = "namespace A {\n  class X { function f() { } }\n}\nnamespace B { }";
        let blocks = scan(source).unwrap();
        assert_eq!(
            names(&blocks),
            vec![
                (String::new(), NamespaceStyle::Global),
                ("A".to_string(), NamespaceStyle::Braced),
                ("B".to_string(), NamespaceStyle::Braced),
            ]
        );
        assert_eq!(blocks[1].range, 0..46);
        assert_eq!((blocks[1].start_line, blocks[1].end_line), (1, 3));
        assert_eq!(&source[blocks[2].range.clone()], "namespace B { }");
    }

    #[test]
    fn braced_global_namespace() {
        let blocks = scan("namespace { class A {} }").unwrap();
        assert!(blocks[1].name.is_global());
        assert_eq!(blocks[1].style, NamespaceStyle::Braced);
    }

    #[test]
    fn relative_names_and_members_are_not_declarations() {
        let blocks = scan("namespace\\foo(); $x->namespace; Foo::namespace; function namespace() {}").unwrap();
        assert_eq!(blocks.len(), 1);
    }

    #[test]
    fn namespace_as_a_name_mid_statement() {
        let source = "<?php\nnamespace App;\nclass C {\n    const NAMESPACE = 'x';\n}\n\
                      enum E {\n    case Namespace;\n}\nfoo(namespace: 'x');\n";
        let blocks = scan(source).unwrap();
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[1].name.to_string(), "App");
    }

    #[test]
    fn nested_namespace() {
        let err = scan("namespace A {\n  namespace B;\n}").unwrap_err();
        assert_eq!(err.kind, ResolveErrorKind::NestedNamespace);
        assert_eq!(err.line, 2);
        assert!(err.message.contains("`A`"));

        let err = scan("function f() {\nnamespace B { }\n}").unwrap_err();
        assert_eq!(err.kind, ResolveErrorKind::NestedNamespace);
        assert!(err.message.contains("top level"));
    }

    #[test]
    fn second_unbraced_namespace() {
        let err = scan("namespace A;\n\nnamespace B;").unwrap_err();
        assert_eq!(err.kind, ResolveErrorKind::DuplicateUnbracedNamespace);
        assert_eq!(err.line, 3);
        assert!(err.message.contains("line 1"));
    }

    #[test]
    fn mixed_styles() {
        let err = scan("namespace A;\nnamespace B { }").unwrap_err();
        assert_eq!(err.kind, ResolveErrorKind::MixedNamespaceStyles);
        assert_eq!(err.line, 2);

        let err = scan("namespace A { }\nnamespace B;").unwrap_err();
        assert_eq!(err.kind, ResolveErrorKind::MixedNamespaceStyles);
    }

    #[test]
    fn malformed_namespace() {
        for source in ["namespace ;", "namespace A", "namespace A B;", "namespace 'x';"] {
            let err = scan(source).unwrap_err();
            assert_eq!(err.kind, ResolveErrorKind::MalformedNamespace, "{source}");
            assert_eq!(err.line, 1);
        }
    }

    #[test]
    fn unbalanced_braces() {
        let err = scan("class A {\n}\n}").unwrap_err();
        assert_eq!(err.kind, ResolveErrorKind::UnbalancedBrace);
        assert_eq!(err.line, 3);

        let err = scan("class A {\n  function f() {\n}").unwrap_err();
        assert_eq!(err.kind, ResolveErrorKind::UnbalancedBrace);
        assert_eq!(err.line, 1);
    }

    #[test]
    fn unclosed_namespace_reports_keyword_line() {
        let err = scan("\n\nnamespace A {\n  class B {\n").unwrap_err();
        assert_eq!(err.kind, ResolveErrorKind::UnclosedNamespace);
        assert_eq!(err.line, 3);
    }

    #[test]
    fn statement_level_follows_block_depth() {
        let tokens = Lexer::tokenize("namespace A {");
        let mut scope = ScopeTracker::new();
        assert!(scope.at_statement_level());
        scope.namespace(&tokens, 0).unwrap();
        assert!(scope.at_statement_level());
        scope.open_brace(&tokens[2]);
        assert!(!scope.at_statement_level());
    }
}
