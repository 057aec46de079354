//! The finished product of a scan.

use std::ffi::CStr;

use crate::{GrowableBuffer, LexError, RawToken, Token, TokenKind};

/// Tokens of one scan together with the character pool backing their
/// lexemes.
///
/// Both buffers are owned here and released together, by
/// [`destroy`](TokenStream::destroy) or on drop. Every [`Token`] borrows
/// from the stream, so no lexeme can outlive the pool.
///
/// # Invariant
///
/// The last token is the only [`TokenKind::EndOfInput`] and the only token
/// without a lexeme. Every lexeme span lies inside the pool and is followed
/// by a NUL byte.
#[derive(Debug)]
pub struct TokenStream {
    tokens: GrowableBuffer<RawToken>,
    pool: GrowableBuffer<u8>,
}

impl TokenStream {
    pub(crate) fn new(tokens: GrowableBuffer<RawToken>, pool: GrowableBuffer<u8>) -> Self {
        debug_assert!(tokens.last().is_some_and(|t| *t == RawToken::END));
        TokenStream { tokens, pool }
    }

    /// Number of tokens, including the trailing `EndOfInput`.
    #[inline]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Always `false` for a stream produced by a scan.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Token at `index`.
    pub fn token_at(&self, index: usize) -> Result<Token<'_>, LexError> {
        self.get(index).ok_or(LexError::IndexOutOfRange {
            index,
            len: self.len(),
        })
    }

    /// Token at `index`, or `None` past the end.
    pub fn get(&self, index: usize) -> Option<Token<'_>> {
        self.tokens.get(index).map(|raw| self.view(*raw))
    }

    /// Tokens in emission order.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            stream: self,
            raw: self.tokens.iter(),
        }
    }

    /// Token kinds in emission order.
    pub fn kinds(&self) -> impl ExactSizeIterator<Item = TokenKind> + '_ {
        self.tokens.iter().map(|raw| raw.kind)
    }

    /// Stored tokens with their pool spans.
    pub fn raw_tokens(&self) -> &[RawToken] {
        self.tokens.as_slice()
    }

    /// The whole pool: every lexeme followed by its NUL terminator.
    pub fn pool(&self) -> &[u8] {
        self.pool.as_slice()
    }

    /// Lexeme at `index` in its NUL-terminated form.
    ///
    /// `None` for the end marker, for indices past the end, and for an
    /// `Invalid` token whose byte is itself NUL.
    pub fn lexeme_cstr(&self, index: usize) -> Option<&CStr> {
        let span = self.tokens.get(index)?.lexeme?;
        let bytes = self.pool.as_slice().get(span.start..=span.end())?;
        CStr::from_bytes_with_nul(bytes).ok()
    }

    /// Release the token buffer and the pool together.
    pub fn destroy(self) {
        drop(self);
    }

    fn view(&self, raw: RawToken) -> Token<'_> {
        Token {
            kind: raw.kind,
            lexeme: raw
                .lexeme
                .and_then(|span| self.pool.as_slice().get(span.start..span.end())),
        }
    }
}

impl<'a> IntoIterator for &'a TokenStream {
    type Item = Token<'a>;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Iter<'a> {
        self.iter()
    }
}

/// Iterator over the tokens of a [`TokenStream`].
#[derive(Clone, Debug)]
pub struct Iter<'a> {
    stream: &'a TokenStream,
    raw: std::slice::Iter<'a, RawToken>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = Token<'a>;

    #[inline]
    fn next(&mut self) -> Option<Token<'a>> {
        self.raw.next().map(|raw| self.stream.view(*raw))
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.raw.size_hint()
    }
}

impl ExactSizeIterator for Iter<'_> {}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    reason = "test assertions use unwrap/expect for clarity"
)]
