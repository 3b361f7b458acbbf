//! Token types produced by the lexer.
//!
//! Only the tokens the scope scanner cares about are distinguished; every
//! other operator or punctuation byte becomes [`TokenKind::Other`].

use std::fmt;

use nsresolve_core::{Span, TokenCode};
use num_enum::IntoPrimitive;

/// A token from the stripped source text.
#[derive(Clone, Copy, PartialEq)]
pub struct Token<'src> {
    /// The type of token.
    pub kind: TokenKind,
    /// The source text of this token.
    pub lexeme: &'src str,
    /// Location in source.
    pub span: Span,
}

impl<'src> Token<'src> {
    /// Create a new token.
    #[inline]
    pub fn new(kind: TokenKind, lexeme: &'src str, span: Span) -> Self {
        Self { kind, lexeme, span }
    }

    /// Whether this token can name a namespace, class or import alias.
    ///
    /// `enum` is only a keyword in declaration position, so it also names things.
    #[inline]
    pub fn is_name(&self) -> bool {
        matches!(self.kind, TokenKind::Identifier | TokenKind::Enum)
    }

    /// Whether this token can be the target of an import.
    #[inline]
    pub fn is_import_target(&self) -> bool {
        self.is_name()
            || matches!(
                self.kind,
                TokenKind::QualifiedName | TokenKind::FullyQualifiedName
            )
    }
}

impl TokenCode for Token<'_> {
    #[inline]
    fn code(&self) -> u16 {
        self.kind.into()
    }
}

impl fmt::Debug for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}({:?} @ {:?})", self.kind, self.lexeme, self.span)
    }
}

/// All token types the scanner distinguishes.
///
/// The discriminant is the token's [`TokenCode`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, IntoPrimitive)]
#[repr(u16)]
pub enum TokenKind {
    // =========================================
    // Names and literals
    // =========================================
    /// Unqualified name: `Foo`
    Identifier = 1,
    /// Qualified name: `Foo\Bar`
    QualifiedName,
    /// Fully qualified name: `\Foo\Bar`
    FullyQualifiedName,
    /// Namespace-relative name: `namespace\Foo`
    RelativeName,
    /// Variable: `$foo`
    Variable,
    /// Numeric literal
    Number,
    /// String literal (contents already blanked)
    StringLiteral,

    // =========================================
    // Keywords
    // =========================================
    /// `namespace`
    Namespace,
    /// `use`
    Use,
    /// `as`
    As,
    /// `class`
    Class,
    /// `interface`
    Interface,
    /// `trait`
    Trait,
    /// `enum`
    Enum,
    /// `function`
    Function,
    /// `fn`
    Fn,
    /// `const`
    Const,
    /// `new`
    New,
    /// `extends`
    Extends,
    /// `implements`
    Implements,

    // =========================================
    // Delimiters and operators
    // =========================================
    /// `{`
    LeftBrace,
    /// `}`
    RightBrace,
    /// `(`
    LeftParen,
    /// `)`
    RightParen,
    /// `;`
    Semicolon,
    /// `,`
    Comma,
    /// `:`
    Colon,
    /// `::`
    DoubleColon,
    /// `->`
    Arrow,
    /// `?->`
    NullsafeArrow,
    /// A lone `\` (e.g. before a group-use brace)
    Backslash,
    /// `<?php` or `<?=`
    OpenTag,
    /// `?>`
    CloseTag,
    /// Any other operator or punctuation
    Other,

    // =========================================
    // Special
    // =========================================
    /// End of file
    Eof,
}

impl TokenKind {
    /// Check if this is a keyword token.
    pub fn is_keyword(self) -> bool {
        matches!(
            self,
            TokenKind::Namespace
                | TokenKind::Use
                | TokenKind::As
                | TokenKind::Class
                | TokenKind::Interface
                | TokenKind::Trait
                | TokenKind::Enum
                | TokenKind::Function
                | TokenKind::Fn
                | TokenKind::Const
                | TokenKind::New
                | TokenKind::Extends
                | TokenKind::Implements
        )
    }

    /// Check if this token introduces a member access, after which a keyword
    /// is just a member name (`Foo::class`, `$x->namespace`).
    pub fn is_member_access(self) -> bool {
        matches!(
            self,
            TokenKind::DoubleColon | TokenKind::Arrow | TokenKind::NullsafeArrow
        )
    }

    /// Get a human-readable description of this token kind.
    pub fn description(self) -> &'static str {
        match self {
            TokenKind::Identifier => "identifier",
            TokenKind::QualifiedName => "qualified name",
            TokenKind::FullyQualifiedName => "fully qualified name",
            TokenKind::RelativeName => "namespace-relative name",
            TokenKind::Variable => "variable",
            TokenKind::Number => "number",
            TokenKind::StringLiteral => "string literal",
            TokenKind::Namespace => "'namespace'",
            TokenKind::Use => "'use'",
            TokenKind::As => "'as'",
            TokenKind::Class => "'class'",
            TokenKind::Interface => "'interface'",
            TokenKind::Trait => "'trait'",
            TokenKind::Enum => "'enum'",
            TokenKind::Function => "'function'",
            TokenKind::Fn => "'fn'",
            TokenKind::Const => "'const'",
            TokenKind::New => "'new'",
            TokenKind::Extends => "'extends'",
            TokenKind::Implements => "'implements'",
            TokenKind::LeftBrace => "'{'",
            TokenKind::RightBrace => "'}'",
            TokenKind::LeftParen => "'('",
            TokenKind::RightParen => "')'",
            TokenKind::Semicolon => "';'",
            TokenKind::Comma => "','",
            TokenKind::Colon => "':'",
            TokenKind::DoubleColon => "'::'",
            TokenKind::Arrow => "'->'",
            TokenKind::NullsafeArrow => "'?->'",
            TokenKind::Backslash => "'\\'",
            TokenKind::OpenTag => "open tag",
            TokenKind::CloseTag => "'?>'",
            TokenKind::Other => "operator",
            TokenKind::Eof => "end of file",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.description())
    }
}

/// Keywords recognised by the lexer. Matching ignores ASCII case.
const KEYWORDS: &[(&str, TokenKind)] = &[
    ("namespace", TokenKind::Namespace),
    ("use", TokenKind::Use),
    ("as", TokenKind::As),
    ("class", TokenKind::Class),
    ("interface", TokenKind::Interface),
    ("trait", TokenKind::Trait),
    ("enum", TokenKind::Enum),
    ("function", TokenKind::Function),
    ("fn", TokenKind::Fn),
    ("const", TokenKind::Const),
    ("new", TokenKind::New),
    ("extends", TokenKind::Extends),
    ("implements", TokenKind::Implements),
];

/// Look up a keyword from an identifier string.
///
/// Returns `None` if the identifier is not a keyword.
pub fn lookup_keyword(ident: &str) -> Option<TokenKind> {
    KEYWORDS
        .iter()
        .find(|(word, _)| word.eq_ignore_ascii_case(ident))
        .map(|(_, kind)| *kind)
}
