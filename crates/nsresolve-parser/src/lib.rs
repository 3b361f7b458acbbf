//! Comment stripping, tokenizing and namespace resolution for PHP source text.
//!
//! The entry point is [`Resolver`]: give it a [`SourceUnit`](nsresolve_core::SourceUnit)
//! and it reports every class, interface, trait and enum together with the
//! namespace and `use` imports in effect where it is declared.
//!
//! The lower stages are public too:
//!
//! - [`strip`] blanks comments, string contents and inline HTML while
//!   keeping byte offsets and line numbers intact;
//! - [`lexer`] turns (stripped) text into [`Token`]s.

pub mod lexer;
pub mod resolve;
pub mod strip;

pub use lexer::{Lexer, Token, TokenKind};
pub use resolve::{
    ClassDeclaration, ClassKind, DeclKinds, ImportAlias, ImportKind, Imports, NamespaceBlock,
    NamespaceStyle, ResolutionResult, Resolver, ResolverOptions,
};
pub use strip::{RegionKind, StrippedRegion, StrippedText, Stripper};
