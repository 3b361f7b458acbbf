//! Comment, string-literal and inline-HTML blanking.
//!
//! [`strip`] produces a "logical" view of the source in which every byte of a
//! comment, of a string literal's contents, and of inline HTML outside the
//! `<?php … ?>` tags is replaced with a space. Newlines are kept, so the
//! result has exactly the same length and line numbering as the input and
//! spans computed on it are valid for the original text.
//!
//! ```
//! use nsresolve_parser::strip::strip;
//!
//! let stripped = strip("// namespace A;\nclass B { var $s = 'class C'; }");
//! assert_eq!(stripped.text(), "               \nclass B { var $s = '       '; }");
//! ```

use std::ops::Range;

use tracing::debug;

use crate::lexer::{Cursor, is_ident_continue, is_ident_start};

/// What kind of region was blanked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RegionKind {
    /// `// …` or `# …` up to end of line.
    LineComment,
    /// `/* … */`, including doc comments.
    BlockComment,
    /// Contents of a quoted literal (the quotes themselves are kept).
    StringLiteral,
    /// Heredoc or nowdoc label, body and closing label.
    Heredoc,
    /// Text outside the open/close tags.
    InlineHtml,
}

/// A blanked byte range of the original source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StrippedRegion {
    /// What was blanked.
    pub kind: RegionKind,
    /// Byte range in the original (and stripped) text.
    pub range: Range<usize>,
    /// `false` when the region ran to end of input without its closing delimiter.
    pub terminated: bool,
}

/// Source text with comments, literal contents and inline HTML blanked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StrippedText {
    text: String,
    regions: Vec<StrippedRegion>,
}

impl StrippedText {
    /// The stripped text. Same byte length as the input.
    #[inline]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Consume and return the stripped text.
    pub fn into_text(self) -> String {
        self.text
    }

    /// The blanked regions, in source order and non-overlapping.
    #[inline]
    pub fn regions(&self) -> &[StrippedRegion] {
        &self.regions
    }

    /// Whether the byte at `offset` lies in a blanked region.
    pub fn is_blanked(&self, offset: usize) -> bool {
        let idx = self.regions.partition_point(|r| r.range.end <= offset);
        self.regions
            .get(idx)
            .is_some_and(|r| r.range.contains(&offset))
    }
}

/// Configurable stripper.
#[derive(Debug, Clone, Copy)]
pub struct Stripper {
    open_tags: bool,
}

impl Stripper {
    /// A stripper that honours `<?php` / `?>` tags.
    pub fn new() -> Self {
        Self { open_tags: true }
    }

    /// Whether text outside the open/close tags is blanked as inline HTML.
    ///
    /// Even when enabled, text is only treated as a template if it starts
    /// with an open tag or has one outside every comment and string literal;
    /// otherwise it is code from the first byte.
    pub fn with_open_tags(mut self, enabled: bool) -> Self {
        self.open_tags = enabled;
        self
    }

    /// Blank comments, literal contents and inline HTML in `source`.
    #[cfg_attr(feature = "profiling", profiling::function)]
    pub fn strip(&self, source: &str) -> StrippedText {
        let code = Scan::regions(source, false);
        let tags = self.open_tags && is_template(source, &code);
        let regions = if tags {
            Scan::regions(source, true)
        } else {
            code
        };

        debug!(
            bytes = source.len(),
            regions = regions.len(),
            tags,
            "stripped source"
        );

        let text = render(source, &regions);
        debug_assert_eq!(text.len(), source.len());
        StrippedText { text, regions }
    }
}

impl Default for Stripper {
    fn default() -> Self {
        Self::new()
    }
}

/// Strip `source` with the default settings.
pub fn strip(source: &str) -> StrippedText {
    Stripper::new().strip(source)
}

/// Whether `source` mixes inline HTML with code.
///
/// `code` are the regions of a scan that treats everything as code. An open
/// tag inside one of its terminated comments or literals does not count; one
/// inside an unterminated region does.
fn is_template(source: &str, code: &[StrippedRegion]) -> bool {
    let body = source.strip_prefix('\u{FEFF}').unwrap_or(source);
    if is_open_tag(body.as_bytes()) {
        return true;
    }

    let bytes = source.as_bytes();
    (0..bytes.len())
        .filter(|&i| bytes[i] == b'<' && is_open_tag(&bytes[i..]))
        .any(|offset| {
            let idx = code.partition_point(|r| r.range.end <= offset);
            !code
                .get(idx)
                .is_some_and(|r| r.terminated && r.range.contains(&offset))
        })
}

/// Whether `rest` starts with `<?php` or `<?=`.
fn is_open_tag(rest: &[u8]) -> bool {
    rest.get(..5).is_some_and(|head| head.eq_ignore_ascii_case(b"<?php")) || rest.starts_with(b"<?=")
}

/// Rebuild the text with every region's bytes replaced by spaces.
fn render(source: &str, regions: &[StrippedRegion]) -> String {
    let mut out = String::with_capacity(source.len());
    let mut last = 0;
    for region in regions {
        out.push_str(&source[last..region.range.start]);
        for b in source[region.range.clone()].bytes() {
            out.push(if b == b'\n' || b == b'\r' { b as char } else { ' ' });
        }
        last = region.range.end;
    }
    out.push_str(&source[last..]);
    out
}

/// Single left-to-right pass collecting regions.
struct Scan<'src> {
    cursor: Cursor<'src>,
    regions: Vec<StrippedRegion>,
    tags: bool,
}

impl Scan<'_> {
    /// Collect the regions of `source`, in tag mode or as pure code.
    fn regions(source: &str, tags: bool) -> Vec<StrippedRegion> {
        let mut scan = Scan {
            cursor: Cursor::new(source),
            regions: Vec::new(),
            tags,
        };
        scan.run();
        scan.regions
    }

    fn run(&mut self) {
        if self.tags {
            self.inline_html();
        }

        while let Some(b) = self.cursor.peek() {
            let next = self.cursor.peek_nth(1);
            match (b, next) {
                (b'/', Some(b'/')) => self.line_comment(),
                (b'#', next) if next != Some(b'[') => self.line_comment(),
                (b'/', Some(b'*')) => self.block_comment(),
                (b'\'' | b'"' | b'`', _) => self.string(b),
                (b'<', Some(b'<')) if self.cursor.check_str("<<<") => self.heredoc(),
                (b'?', Some(b'>')) if self.tags => {
                    self.cursor.advance_n(2);
                    self.inline_html();
                }
                _ => {
                    self.cursor.advance();
                }
            }
        }
    }

    fn push(&mut self, kind: RegionKind, start: usize, terminated: bool) {
        let end = self.cursor.offset();
        if end == start {
            return;
        }
        if !terminated {
            debug!(?kind, offset = start, "unterminated region runs to end of input");
        }
        self.regions.push(StrippedRegion {
            kind,
            range: start..end,
            terminated,
        });
    }

    /// Blank up to the next open tag and step over it.
    fn inline_html(&mut self) {
        let start = self.cursor.offset();
        while !self.cursor.is_eof() {
            if self.cursor.check_str_ignore_case("<?php") {
                self.push(RegionKind::InlineHtml, start, true);
                self.cursor.advance_n(5);
                return;
            }
            if self.cursor.check_str("<?=") {
                self.push(RegionKind::InlineHtml, start, true);
                self.cursor.advance_n(3);
                return;
            }
            self.cursor.advance();
        }
        self.push(RegionKind::InlineHtml, start, true);
    }

    /// `//` or `#` comment. Ends before the newline, or before `?>` in tag mode.
    fn line_comment(&mut self) {
        let start = self.cursor.offset();
        while let Some(b) = self.cursor.peek() {
            if b == b'\n' || b == b'\r' || (self.tags && self.cursor.check_str("?>")) {
                break;
            }
            self.cursor.advance();
        }
        self.push(RegionKind::LineComment, start, true);
    }

    /// `/* … */`. Not nested: the first `*/` closes it.
    fn block_comment(&mut self) {
        let start = self.cursor.offset();
        self.cursor.advance_n(2);
        let terminated = self.cursor.skip_until("*/");
        if terminated {
            self.cursor.advance_n(2);
        }
        self.push(RegionKind::BlockComment, start, terminated);
    }

    /// Quoted literal; the contents are blanked, the quotes kept.
    fn string(&mut self, quote: u8) {
        self.cursor.advance();
        let start = self.cursor.offset();
        let mut terminated = false;
        while let Some(b) = self.cursor.peek() {
            if b == quote {
                terminated = true;
                break;
            }
            self.cursor.advance();
            if b == b'\\' {
                self.cursor.advance();
            }
        }
        self.push(RegionKind::StringLiteral, start, terminated);
        if terminated {
            self.cursor.advance();
        }
    }

    /// `<<<LABEL`, `<<<"LABEL"` or `<<<'LABEL'` through the closing label.
    ///
    /// The `<<<` itself is kept; anything that does not parse as a heredoc
    /// opener is left alone.
    fn heredoc(&mut self) {
        let mut ahead = self.cursor.clone();
        ahead.advance_n(3);
        let start = ahead.offset();

        ahead.eat_while(|b| b == b' ' || b == b'\t');
        let quote = match ahead.peek() {
            Some(q @ (b'\'' | b'"')) => {
                ahead.advance();
                Some(q)
            }
            _ => None,
        };
        if !ahead.peek().is_some_and(is_ident_start) {
            self.cursor.advance();
            return;
        }
        let label = ahead.eat_while(is_ident_continue);
        if let Some(q) = quote
            && !ahead.eat(q)
        {
            self.cursor.advance();
            return;
        }
        let cr = ahead.eat(b'\r');
        if !ahead.eat(b'\n') && !cr {
            self.cursor.advance();
            return;
        }

        self.cursor = ahead;
        loop {
            self.cursor.eat_while(|b| b == b' ' || b == b'\t');
            if self.cursor.check_str(label)
                && !self
                    .cursor
                    .peek_nth(label.len())
                    .is_some_and(is_ident_continue)
            {
                let end = self.cursor.offset() + label.len();
                while self.cursor.offset() < end {
                    self.cursor.advance();
                }
                self.push(RegionKind::Heredoc, start, true);
                return;
            }
            self.cursor.eat_while(|b| b != b'\n' && b != b'\r');
            if self.cursor.is_eof() {
                self.push(RegionKind::Heredoc, start, false);
                return;
            }
            if self.cursor.eat(b'\r') {
                self.cursor.eat(b'\n');
            } else {
                self.cursor.advance();
            }
        }
    }
}
