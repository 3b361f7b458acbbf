//! Class-like declaration discovery.

use std::fmt;

use nsresolve_core::QualifiedName;

use super::imports::Imports;
use super::options::DeclKinds;
use crate::lexer::{Token, TokenKind};

/// The kind of a class-like declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClassKind {
    Class,
    Interface,
    Trait,
    Enum,
}

impl ClassKind {
    /// The keyword that introduces this kind.
    pub fn keyword(self) -> &'static str {
        match self {
            ClassKind::Class => "class",
            ClassKind::Interface => "interface",
            ClassKind::Trait => "trait",
            ClassKind::Enum => "enum",
        }
    }

    /// The option flag that enables this kind.
    pub fn flag(self) -> DeclKinds {
        match self {
            ClassKind::Class => DeclKinds::CLASS,
            ClassKind::Interface => DeclKinds::INTERFACE,
            ClassKind::Trait => DeclKinds::TRAIT,
            ClassKind::Enum => DeclKinds::ENUM,
        }
    }

    fn from_token(kind: TokenKind) -> Option<Self> {
        match kind {
            TokenKind::Class => Some(ClassKind::Class),
            TokenKind::Interface => Some(ClassKind::Interface),
            TokenKind::Trait => Some(ClassKind::Trait),
            TokenKind::Enum => Some(ClassKind::Enum),
            _ => None,
        }
    }
}

impl fmt::Display for ClassKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// A discovered declaration with the namespace and imports in effect for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassDeclaration {
    /// Declared short name.
    pub name: String,
    pub kind: ClassKind,
    /// 1-based line of the declaring keyword.
    pub line: u32,
    /// Enclosing namespace; global when empty.
    pub namespace: QualifiedName,
    /// Every import of the enclosing namespace block.
    pub imports: Imports,
}

impl ClassDeclaration {
    /// `Namespace\Name`, or just `Name` in the global namespace.
    pub fn fully_qualified_name(&self) -> QualifiedName {
        self.namespace.join(&QualifiedName::parse(&self.name))
    }
}

/// Modifiers that may sit between `new` and `class` in an anonymous class.
const CLASS_MODIFIERS: &[&str] = &["readonly", "final", "abstract"];

/// If `tokens[pos]` starts a named declaration, return its kind and name token.
///
/// Rejects member names (`Foo::class`, `$x->trait`), anonymous classes
/// (`new class`, `new readonly class`), functions named after a keyword and
/// `enum` used as a plain identifier.
pub(crate) fn declaration_at<'t, 'src>(
    tokens: &'t [Token<'src>],
    pos: usize,
) -> Option<(ClassKind, &'t Token<'src>)> {
    let kind = ClassKind::from_token(tokens.get(pos)?.kind)?;

    if let Some(prev) = previous_significant(tokens, pos)
        && (prev.kind.is_member_access()
            || matches!(prev.kind, TokenKind::New | TokenKind::Function | TokenKind::Const))
    {
        return None;
    }

    let name = tokens.get(pos + 1).filter(|t| t.is_name())?;

    if kind == ClassKind::Enum {
        let follows = tokens.get(pos + 2).map(|t| t.kind)?;
        if !matches!(
            follows,
            TokenKind::LeftBrace | TokenKind::Colon | TokenKind::Implements
        ) {
            return None;
        }
    }

    Some((kind, name))
}

/// The token before `pos`, skipping class modifiers.
fn previous_significant<'t, 'src>(tokens: &'t [Token<'src>], pos: usize) -> Option<&'t Token<'src>> {
    tokens[..pos].iter().rev().find(|t| {
        !(t.kind == TokenKind::Identifier
            && CLASS_MODIFIERS
                .iter()
                .any(|m| m.eq_ignore_ascii_case(t.lexeme)))
    })
}
