//! Token kinds and the two token representations.
//!
//! The scanner stores [`RawToken`]s, whose lexeme is a [`LexemeSpan`] into
//! the character pool. Consumers see [`Token`]s, which borrow the lexeme
//! bytes from the owning [`TokenStream`](crate::TokenStream). Spans are
//! plain offsets, so they survive every relocation of the pool.

use std::fmt;

/// Classification of a token.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum TokenKind {
    /// `123`, `1.5`, `.5`, `.`
    Number,
    /// `x`, `foo_1`
    Identifier,
    /// `+`
    Plus,
    /// `-`
    Minus,
    /// `*`
    Multiply,
    /// `/`
    Divide,
    /// `%`
    Modulo,
    /// `^` or `**`
    Power,
    /// `e`/`E` directly after a number and before numeric content.
    Exponent,
    /// `(`
    LParen,
    /// `)`
    RParen,
    /// `[`
    LBracket,
    /// `]`
    RBracket,
    /// `{`
    LBrace,
    /// `}`
    RBrace,
    /// A single byte the grammar does not recognise.
    Invalid,
    /// End of input. The only kind without a lexeme.
    EndOfInput,
}

impl TokenKind {
    /// Upper-case display name, e.g. `NUMBER_TOKEN`.
    pub const fn name(self) -> &'static str {
        match self {
            TokenKind::Number => "NUMBER_TOKEN",
            TokenKind::Identifier => "IDENTIFIER_TOKEN",
            TokenKind::Plus => "PLUS_TOKEN",
            TokenKind::Minus => "MINUS_TOKEN",
            TokenKind::Multiply => "MULTIPLY_TOKEN",
            TokenKind::Divide => "DIVIDE_TOKEN",
            TokenKind::Modulo => "MODULO_TOKEN",
            TokenKind::Power => "POWER_TOKEN",
            TokenKind::Exponent => "EXPONENT_TOKEN",
            TokenKind::LParen => "LPAREN_TOKEN",
            TokenKind::RParen => "RPAREN_TOKEN",
            TokenKind::LBracket => "LBRACKET_TOKEN",
            TokenKind::RBracket => "RBRACKET_TOKEN",
            TokenKind::LBrace => "LBRACE_TOKEN",
            TokenKind::RBrace => "RBRACE_TOKEN",
            TokenKind::Invalid => "INVALID_TOKEN",
            TokenKind::EndOfInput => "EOI_TOKEN",
        }
    }

    /// The only spelling of this kind, if it has exactly one.
    ///
    /// `Power` has two spellings (`^`, `**`) and returns `None`, as do the
    /// kinds whose text varies.
    pub const fn fixed_lexeme(self) -> Option<&'static str> {
        match self {
            TokenKind::Plus => Some("+"),
            TokenKind::Minus => Some("-"),
            TokenKind::Multiply => Some("*"),
            TokenKind::Divide => Some("/"),
            TokenKind::Modulo => Some("%"),
            TokenKind::LParen => Some("("),
            TokenKind::RParen => Some(")"),
            TokenKind::LBracket => Some("["),
            TokenKind::RBracket => Some("]"),
            TokenKind::LBrace => Some("{"),
            TokenKind::RBrace => Some("}"),
            TokenKind::Number
            | TokenKind::Identifier
            | TokenKind::Power
            | TokenKind::Exponent
            | TokenKind::Invalid
            | TokenKind::EndOfInput => None,
        }
    }

    /// Binary operators: `+ - * / % ^ **`.
    pub const fn is_operator(self) -> bool {
        matches!(
            self,
            TokenKind::Plus
                | TokenKind::Minus
                | TokenKind::Multiply
                | TokenKind::Divide
                | TokenKind::Modulo
                | TokenKind::Power
        )
    }

    /// Any of the six bracket kinds.
    pub const fn is_bracket(self) -> bool {
        matches!(
            self,
            TokenKind::LParen
                | TokenKind::RParen
                | TokenKind::LBracket
                | TokenKind::RBracket
                | TokenKind::LBrace
                | TokenKind::RBrace
        )
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Location of a lexeme in the character pool.
///
/// The pool stores a NUL byte at `start + len`; `len` excludes it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct LexemeSpan {
    pub start: usize,
    pub len: usize,
}

impl LexemeSpan {
    #[inline]
    pub const fn new(start: usize, len: usize) -> Self {
        LexemeSpan { start, len }
    }

    /// One past the last lexeme byte; the index of the terminator.
    #[inline]
    pub const fn end(self) -> usize {
        self.start + self.len
    }
}

/// Token as stored by the scanner: kind plus pool span.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct RawToken {
    pub kind: TokenKind,
    /// `None` only for [`TokenKind::EndOfInput`].
    pub lexeme: Option<LexemeSpan>,
}

impl RawToken {
    /// The end-of-input marker.
    pub const END: RawToken = RawToken {
        kind: TokenKind::EndOfInput,
        lexeme: None,
    };
}

/// Token as seen by consumers, borrowing its lexeme from the stream.
///
/// Only a [`TokenStream`](crate::TokenStream) hands these out, so a token
/// without a lexeme is always the end marker.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Token<'a> {
    pub(crate) kind: TokenKind,
    pub(crate) lexeme: Option<&'a [u8]>,
}

impl<'a> Token<'a> {
    #[inline]
    pub fn kind(&self) -> TokenKind {
        self.kind
    }

    /// Lexeme bytes without the terminator. `None` only for
    /// [`TokenKind::EndOfInput`].
    #[inline]
    pub fn lexeme(&self) -> Option<&'a [u8]> {
        self.lexeme
    }

    /// The lexeme as text, when it is valid UTF-8.
    ///
    /// Only an [`Invalid`](TokenKind::Invalid) token holding a non-ASCII
    /// byte can fail this.
    pub fn text(&self) -> Option<&'a str> {
        self.lexeme.and_then(|bytes| std::str::from_utf8(bytes).ok())
    }
}

impl fmt::Debug for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.lexeme {
            Some(bytes) => write!(f, "{:?}(\"{}\")", self.kind, bytes.escape_ascii()),
            None => write!(f, "{:?}", self.kind),
        }
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    reason = "test assertions use unwrap/expect for clarity"
)]
