//! Lexer over stripped source text.
//!
//! The [`Lexer`] converts text into a stream of [`Token`]s using direct
//! dispatch on the first byte. It is meant to run after
//! [`strip`](crate::strip::strip), so comments never reach it and string
//! literals arrive with blank contents; it still tokenizes raw text
//! correctly apart from treating comment bodies as code.

use nsresolve_core::Span;

use super::cursor::{Cursor, is_ident_continue, is_ident_start};
use super::token::{Token, TokenKind, lookup_keyword};

/// Lexer for PHP-style source text.
///
/// Never fails: bytes it does not recognise become [`TokenKind::Other`].
pub struct Lexer<'src> {
    /// Low-level byte cursor.
    cursor: Cursor<'src>,
    /// Whether the EOF token has been handed out.
    finished: bool,
}

impl<'src> Lexer<'src> {
    /// Create a new lexer for the given source text.
    pub fn new(source: &'src str) -> Self {
        Self {
            cursor: Cursor::new(source),
            finished: false,
        }
    }

    /// Tokenize the whole source. The last token is always [`TokenKind::Eof`].
    pub fn tokenize(source: &'src str) -> Vec<Token<'src>> {
        let mut lexer = Lexer::new(source);
        let mut tokens = Vec::with_capacity(source.len() / 4);
        loop {
            let token = lexer.next_token();
            let done = token.kind == TokenKind::Eof;
            tokens.push(token);
            if done {
                return tokens;
            }
        }
    }

    /// Consume and return the next token.
    pub fn next_token(&mut self) -> Token<'src> {
        self.skip_whitespace();

        if self.cursor.is_eof() {
            self.finished = true;
            let span = Span::point(
                self.cursor.offset() as u32,
                self.cursor.line(),
                self.cursor.column(),
            );
            return Token::new(TokenKind::Eof, "", span);
        }

        let start = Start {
            offset: self.cursor.offset(),
            line: self.cursor.line(),
            col: self.cursor.column(),
        };

        let kind = match self.cursor.peek() {
            Some(b'$') => self.scan_variable(),
            Some(quote @ (b'\'' | b'"' | b'`')) => self.scan_string(quote),
            Some(b'0'..=b'9') => {
                self.cursor
                    .eat_while(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'.');
                TokenKind::Number
            }
            Some(b'\\') => self.scan_backslash(),
            Some(c) if is_ident_start(c) => self.scan_name(),
            _ => self.scan_operator(),
        };

        self.make_token(kind, start)
    }

    // =========================================
    // Internal: Token scanning
    // =========================================

    /// Skip whitespace and BOM.
    fn skip_whitespace(&mut self) {
        if self.cursor.offset() == 0 && self.cursor.check_str("\u{FEFF}") {
            self.cursor.advance();
        }
        self.cursor.eat_while(|b| b.is_ascii_whitespace() || b == 0x0B);
    }

    /// Create a token from the start position to the current position.
    fn make_token(&self, kind: TokenKind, start: Start) -> Token<'src> {
        let lexeme = self.cursor.slice_from(start.offset);
        let span = Span::new(
            start.offset as u32,
            start.line,
            start.col,
            lexeme.len() as u32,
        );
        Token::new(kind, lexeme, span)
    }

    /// Scan `$name`, or a lone `$` (variable-variables).
    fn scan_variable(&mut self) -> TokenKind {
        self.cursor.advance(); // '$'
        if self.cursor.peek().is_some_and(is_ident_start) {
            self.cursor.eat_while(is_ident_continue);
            TokenKind::Variable
        } else {
            TokenKind::Other
        }
    }

    /// Scan a quoted literal. Unterminated literals run to EOF.
    fn scan_string(&mut self, quote: u8) -> TokenKind {
        self.cursor.advance(); // opening quote
        while let Some(b) = self.cursor.peek() {
            self.cursor.advance();
            if b == b'\\' {
                self.cursor.advance();
            } else if b == quote {
                break;
            }
        }
        TokenKind::StringLiteral
    }

    /// Scan `\Fully\Qualified` or a lone `\`.
    fn scan_backslash(&mut self) -> TokenKind {
        self.cursor.advance(); // '\'
        if self.cursor.peek().is_some_and(is_ident_start) {
            self.scan_segments();
            TokenKind::FullyQualifiedName
        } else {
            TokenKind::Backslash
        }
    }

    /// Scan an identifier, keyword, or multi-segment name.
    fn scan_name(&mut self) -> TokenKind {
        let first = self.cursor.eat_while(is_ident_continue);
        if !self.scan_segments() {
            return lookup_keyword(first).unwrap_or(TokenKind::Identifier);
        }
        if first.eq_ignore_ascii_case("namespace") {
            TokenKind::RelativeName
        } else {
            TokenKind::QualifiedName
        }
    }

    /// Consume `\segment` continuations. Returns `true` if any were consumed.
    ///
    /// A trailing `\` not followed by a name start is left for the next
    /// token, so `A\{` lexes as `A`, `\`, `{`.
    fn scan_segments(&mut self) -> bool {
        let mut any = false;
        loop {
            self.cursor.eat_while(is_ident_continue);
            if self.cursor.peek() == Some(b'\\')
                && self.cursor.peek_nth(1).is_some_and(is_ident_start)
            {
                self.cursor.advance();
                any = true;
            } else {
                return any;
            }
        }
    }

    /// Scan an operator or punctuation token.
    fn scan_operator(&mut self) -> TokenKind {
        if self.cursor.check_str_ignore_case("<?php") {
            self.cursor.advance_n(5);
            return TokenKind::OpenTag;
        }
        if self.cursor.check_str("<?=") {
            self.cursor.advance_n(3);
            return TokenKind::OpenTag;
        }
        if self.cursor.check_str("?->") {
            self.cursor.advance_n(3);
            return TokenKind::NullsafeArrow;
        }

        let Some(c) = self.cursor.advance() else {
            return TokenKind::Eof;
        };
        let next = self.cursor.peek();

        match (c, next) {
            (b'{', _) => TokenKind::LeftBrace,
            (b'}', _) => TokenKind::RightBrace,
            (b'(', _) => TokenKind::LeftParen,
            (b')', _) => TokenKind::RightParen,
            (b';', _) => TokenKind::Semicolon,
            (b',', _) => TokenKind::Comma,

            (b':', Some(b':')) => { self.cursor.advance(); TokenKind::DoubleColon }
            (b':', _) => TokenKind::Colon,

            (b'-', Some(b'>')) => { self.cursor.advance(); TokenKind::Arrow }
            (b'?', Some(b'>')) => { self.cursor.advance(); TokenKind::CloseTag }

            _ => TokenKind::Other,
        }
    }
}

/// Where the token being scanned started.
#[derive(Clone, Copy)]
struct Start {
    offset: usize,
    line: u32,
    col: u32,
}

/// Implement Iterator for convenient token streaming.
impl<'src> Iterator for Lexer<'src> {
    type Item = Token<'src>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        let token = self.next_token();
        if token.kind == TokenKind::Eof {
            None
        } else {
            Some(token)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Helper to collect all tokens from source.
    fn tokenize(source: &str) -> Vec<(TokenKind, String)> {
        Lexer::new(source)
            .map(|t| (t.kind, t.lexeme.to_string()))
            .collect()
    }

    /// Helper to get token kinds only.
    fn token_kinds(source: &str) -> Vec<TokenKind> {
        Lexer::new(source).map(|t| t.kind).collect()
    }

    #[test]
    fn empty_source() {
        let mut lexer = Lexer::new("");
        assert_eq!(lexer.next_token().kind, TokenKind::Eof);
        assert_eq!(Lexer::tokenize("  \n ").len(), 1);
    }

    #[test]
    fn keywords_ignore_case() {
        assert_eq!(
            token_kinds("namespace NAMESPACE Use class Interface trait enum"),
            vec![
                TokenKind::Namespace,
                TokenKind::Namespace,
                TokenKind::Use,
                TokenKind::Class,
                TokenKind::Interface,
                TokenKind::Trait,
                TokenKind::Enum,
            ]
        );
    }

    #[test]
    fn qualified_names() {
        assert_eq!(
            tokenize("Foo Foo\\Bar \\Foo\\Bar namespace\\Baz"),
            vec![
                (TokenKind::Identifier, "Foo".to_string()),
                (TokenKind::QualifiedName, "Foo\\Bar".to_string()),
                (TokenKind::FullyQualifiedName, "\\Foo\\Bar".to_string()),
                (TokenKind::RelativeName, "namespace\\Baz".to_string()),
            ]
        );
    }

    #[test]
    fn keyword_segments_stay_inside_names() {
        assert_eq!(
            tokenize("App\\Class\\Enum"),
            vec![(TokenKind::QualifiedName, "App\\Class\\Enum".to_string())]
        );
    }

    #[test]
    fn group_use_prefix_splits_trailing_separator() {
        assert_eq!(
            token_kinds("use A\\B\\{C, D};"),
            vec![
                TokenKind::Use,
                TokenKind::QualifiedName,
                TokenKind::Backslash,
                TokenKind::LeftBrace,
                TokenKind::Identifier,
                TokenKind::Comma,
                TokenKind::Identifier,
                TokenKind::RightBrace,
                TokenKind::Semicolon,
            ]
        );
    }

    #[test]
    fn variables_are_not_keywords() {
        assert_eq!(
            tokenize("$class $namespace $"),
            vec![
                (TokenKind::Variable, "$class".to_string()),
                (TokenKind::Variable, "$namespace".to_string()),
                (TokenKind::Other, "$".to_string()),
            ]
        );
    }

    #[test]
    fn member_access_operators() {
        assert_eq!(
            token_kinds("Foo::class $a->b $a?->b a ? b : c"),
            vec![
                TokenKind::Identifier,
                TokenKind::DoubleColon,
                TokenKind::Class,
                TokenKind::Variable,
                TokenKind::Arrow,
                TokenKind::Identifier,
                TokenKind::Variable,
                TokenKind::NullsafeArrow,
                TokenKind::Identifier,
                TokenKind::Identifier,
                TokenKind::Other,
                TokenKind::Identifier,
                TokenKind::Colon,
                TokenKind::Identifier,
            ]
        );
    }

    #[test]
    fn strings_are_single_tokens() {
        assert_eq!(
            tokenize(r#"'a b' "c \" d" `e`"#),
            vec![
                (TokenKind::StringLiteral, "'a b'".to_string()),
                (TokenKind::StringLiteral, r#""c \" d""#.to_string()),
                (TokenKind::StringLiteral, "`e`".to_string()),
            ]
        );
    }

    #[test]
    fn unterminated_string_runs_to_eof() {
        let tokens = tokenize("'abc { ");
        assert_eq!(tokens, vec![(TokenKind::StringLiteral, "'abc { ".to_string())]);
    }

    #[test]
    fn open_and_close_tags() {
        assert_eq!(
            token_kinds("<?php echo 1; ?> <?= $x ?>"),
            vec![
                TokenKind::OpenTag,
                TokenKind::Identifier,
                TokenKind::Number,
                TokenKind::Semicolon,
                TokenKind::CloseTag,
                TokenKind::OpenTag,
                TokenKind::Variable,
                TokenKind::CloseTag,
            ]
        );
    }

    #[test]
    fn delimiters() {
        assert_eq!(
            token_kinds("{ } ( ) ; , \\"),
            vec![
                TokenKind::LeftBrace,
                TokenKind::RightBrace,
                TokenKind::LeftParen,
                TokenKind::RightParen,
                TokenKind::Semicolon,
                TokenKind::Comma,
                TokenKind::Backslash,
            ]
        );
    }

    #[test]
    fn spans_track_lines() {
        let tokens = Lexer::tokenize("<?php\nnamespace A;\n\nclass B {}");
        let class = tokens.iter().find(|t| t.kind == TokenKind::Class).unwrap();
        assert_eq!(class.span.line, 4);
        assert_eq!(class.span.col, 1);
        assert_eq!(class.span.offset, 20);
        assert_eq!(tokens.last().map(|t| t.kind), Some(TokenKind::Eof));
    }

    #[test]
    fn non_ascii_bytes_lex_as_names() {
        let tokens = tokenize("a « b");
        assert_eq!(tokens[1], (TokenKind::Identifier, "«".to_string()));
        assert_eq!(tokens.len(), 3);
    }

    #[test]
    fn iterator_stops_after_eof() {
        let mut lexer = Lexer::new("a");
        assert!(lexer.next().is_some());
        assert!(lexer.next().is_none());
        assert!(lexer.next().is_none());
    }
}
