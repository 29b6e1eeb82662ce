use std::iter::Peekable;

use logos::{Logos, SpannedIter};

use crate::tag::{Command, Span, Tag};

/// Which commands a scan recognizes.
///
/// Text that looks like a tag of another command is left alone, exactly as
/// if it were not a tag at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pass {
    /// First pass: the `if` and `default` guard tags.
    Guard,
    /// Second pass: `set` tags.
    Mutation,
    /// Every command word, including the empty one. Used by presentation.
    Any,
}

impl Pass {
    fn accepts(self, word: &str) -> bool {
        match self {
            Pass::Guard => matches!(word, "if" | "default"),
            Pass::Mutation => word == "set",
            Pass::Any => true,
        }
    }
}

/// Raw token. Borrows nothing; the scanner slices the source by span.
///
/// Every character of the input belongs to exactly one token, so the
/// scanner sees every `$` and can try a tag there.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
enum RawToken {
    #[token("$")]
    Dollar,

    #[token("/")]
    Slash,

    #[regex(r"\w+")]
    Word,

    #[regex(r"[^$/\w]+")]
    Text,
}

/// A recognized tag and where it sits in the scanned text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagMatch {
    /// The decoded tag.
    pub tag: Tag,
    /// Byte range of the tag, delimiters included.
    pub span: Span,
}

/// Lazy left-to-right iterator over the tags of a text.
///
/// Matches never overlap. Malformed tags are skipped and stay literal text;
/// scanning never fails.
pub struct Scanner<'s> {
    pass: Pass,
    source: &'s str,
    tokens: Peekable<SpannedIter<'s, RawToken>>,
}

impl<'s> Scanner<'s> {
    /// Start scanning `source`.
    pub fn new(pass: Pass, source: &'s str) -> Self {
        Self {
            pass,
            source,
            tokens: RawToken::lexer(source).spanned().peekable(),
        }
    }

    fn peek(&mut self) -> Option<(RawToken, Span)> {
        self.tokens
            .peek()
            .map(|(tok, span)| (tok.unwrap_or(RawToken::Text), span.clone()))
    }

    /// Consume the peeked token if it is `kind`.
    fn eat(&mut self, kind: RawToken) -> Option<Span> {
        match self.peek() {
            Some((tok, span)) if tok == kind => {
                self.tokens.next();
                Some(span)
            }
            _ => None,
        }
    }

    /// Try to read a tag whose opening `$` ends at `open.end`.
    ///
    /// On failure nothing past the offending token is consumed, and the
    /// offending token is never a `$`, so no later tag start is skipped.
    fn tag_at(&mut self, open: Span) -> Option<TagMatch> {
        let source = self.source;
        let command = match self.peek() {
            Some((RawToken::Word, span)) => {
                let word = &source[span];
                if !self.pass.accepts(word) {
                    return None;
                }
                self.tokens.next();
                word
            }
            Some((RawToken::Dollar | RawToken::Slash, _)) if self.pass == Pass::Any => "",
            _ => return None,
        };

        // thing and key: a slash followed by a possibly empty word
        let mut segments: Vec<&str> = Vec::with_capacity(2);
        while segments.len() < 2 {
            if let Some(close) = self.eat(RawToken::Dollar) {
                return Some(finish(open, close, command, &segments, None));
            }
            self.eat(RawToken::Slash)?;
            let segment = match self.eat(RawToken::Word) {
                Some(span) => &source[span],
                None => "",
            };
            segments.push(segment);
        }

        if let Some(close) = self.eat(RawToken::Dollar) {
            return Some(finish(open, close, command, &segments, None));
        }
        let slash = self.eat(RawToken::Slash)?;

        // arg: anything up to the closing delimiter
        loop {
            match self.tokens.next() {
                Some((Ok(RawToken::Dollar), close)) => {
                    let arg = &source[slash.end..close.start];
                    return Some(finish(open, close, command, &segments, Some(arg)));
                }
                Some(_) => continue,
                None => return None,
            }
        }
    }
}

impl Iterator for Scanner<'_> {
    type Item = TagMatch;

    fn next(&mut self) -> Option<TagMatch> {
        while let Some((tok, span)) = self.tokens.next() {
            if tok == Ok(RawToken::Dollar)
                && let Some(found) = self.tag_at(span)
            {
                return Some(found);
            }
        }
        None
    }
}

fn finish(
    open: Span,
    close: Span,
    command: &str,
    segments: &[&str],
    arg: Option<&str>,
) -> TagMatch {
    let tag = Tag::new(
        Command::parse(command),
        segments.first().copied(),
        segments.get(1).copied(),
        arg,
    );
    TagMatch {
        tag,
        span: open.start..close.end,
    }
}

/// Scan `source` for the tags recognized by `pass`.
pub fn scan(pass: Pass, source: &str) -> Scanner<'_> {
    Scanner::new(pass, source)
}

/// Remove every tag recognized by `pass`, leaving the surrounding text as is.
pub fn strip(pass: Pass, source: &str) -> String {
    let mut out = String::with_capacity(source.len());
    let mut last = 0;
    for found in scan(pass, source) {
        out.push_str(&source[last..found.span.start]);
        last = found.span.end;
    }
    out.push_str(&source[last..]);
    out
}
