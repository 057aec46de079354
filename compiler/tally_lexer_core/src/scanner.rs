//! Deterministic finite-state scanner.
//!
//! Bytes are fed one at a time. Each byte is classified
//! ([`classify`](crate::classify)), and the pair `(State, CharClass)`
//! selects one [`Action`] from [`transition`]. The table is the whole
//! grammar: there is no per-state code beyond it.
//!
//! # Lexeme Storage
//!
//! Lexeme bytes are appended to a character pool as they are accepted. A
//! cut appends a NUL terminator and records the lexeme as a [`LexemeSpan`]
//! (`start`, `len`) into the pool. Spans are offsets, so emitted tokens stay
//! valid however often the pool grows and moves.
//!
//! # Termination
//!
//! [`Scanner::finish`] flushes the pending lexeme as if a space had been
//! fed, then appends the single [`TokenKind::EndOfInput`] token.

use tracing::{debug, trace};

use crate::char_class::{classify, Bracket, CharClass, Operator};
use crate::{
    CharSource, ChunkedSource, GrowableBuffer, Growth, LexError, LexemeSpan, RawToken,
    TokenKind, TokenStream,
};

/// Scanner state. `Start` is both the initial state and the state after
/// every emitted token; every other state has a pending lexeme.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum State {
    Start,
    Number,
    Decimal,
    Identifier,
    Plus,
    Minus,
    Multiply,
    Divide,
    Modulo,
    Power,
    Exponent,
    LParen,
    RParen,
    LBracket,
    RBracket,
    LBrace,
    RBrace,
}

impl State {
    /// Every state, in declaration order.
    pub const ALL: [State; 17] = [
        State::Start,
        State::Number,
        State::Decimal,
        State::Identifier,
        State::Plus,
        State::Minus,
        State::Multiply,
        State::Divide,
        State::Modulo,
        State::Power,
        State::Exponent,
        State::LParen,
        State::RParen,
        State::LBracket,
        State::RBracket,
        State::LBrace,
        State::RBrace,
    ];
}

/// What the scanner does with one byte.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Action {
    /// Drop the byte. Only reachable from `Start`.
    Skip,
    /// Append the byte to the pending lexeme and move to the state.
    Extend(State),
    /// Emit the byte as a one-byte `Invalid` token. Only reachable from
    /// `Start`; other states reach it through `Cut`.
    Reject,
    /// Cut the pending lexeme as the kind, then handle the byte exactly as
    /// `Start` would.
    Cut(TokenKind),
    /// Cut the pending lexeme as the kind, then begin a new lexeme in the
    /// state with the byte.
    CutAndBegin(TokenKind, State),
}

/// State entered from `Start` on an operator byte.
fn operator_state(op: Operator) -> State {
    match op {
        Operator::Plus => State::Plus,
        Operator::Minus => State::Minus,
        Operator::Star => State::Multiply,
        Operator::Slash => State::Divide,
        Operator::Percent => State::Modulo,
        Operator::Caret => State::Power,
    }
}

fn open_state(bracket: Bracket) -> State {
    match bracket {
        Bracket::Paren => State::LParen,
        Bracket::Square => State::LBracket,
        Bracket::Curly => State::LBrace,
    }
}

fn close_state(bracket: Bracket) -> State {
    match bracket {
        Bracket::Paren => State::RParen,
        Bracket::Square => State::RBracket,
        Bracket::Curly => State::RBrace,
    }
}

/// The transition table.
///
/// The outer match lists every state without a wildcard, so adding a state
/// without rules fails to compile.
fn transition(state: State, class: CharClass) -> Action {
    use CharClass as C;

    match state {
        State::Start => match class {
            C::Space => Action::Skip,
            C::Other => Action::Reject,
            C::Digit => Action::Extend(State::Number),
            C::Dot => Action::Extend(State::Decimal),
            C::ExpMarker | C::Letter => Action::Extend(State::Identifier),
            C::Op(op) => Action::Extend(operator_state(op)),
            C::Open(bracket) => Action::Extend(open_state(bracket)),
            C::Close(bracket) => Action::Extend(close_state(bracket)),
        },

        State::Number => match class {
            C::Digit => Action::Extend(State::Number),
            C::Dot => Action::Extend(State::Decimal),
            C::ExpMarker => Action::CutAndBegin(TokenKind::Number, State::Exponent),
            _ => Action::Cut(TokenKind::Number),
        },

        // A second `.` ends the number; `Start` then opens a new one.
        State::Decimal => match class {
            C::Digit => Action::Extend(State::Decimal),
            C::ExpMarker => Action::CutAndBegin(TokenKind::Number, State::Exponent),
            _ => Action::Cut(TokenKind::Number),
        },

        State::Identifier => match class {
            C::Digit | C::Letter | C::ExpMarker => Action::Extend(State::Identifier),
            _ => Action::Cut(TokenKind::Identifier),
        },

        // The marker is an identifier only when it cannot start an exponent:
        // before a space, a closer, or a non-sign operator.
        State::Exponent => match class {
            C::Letter | C::ExpMarker => Action::Extend(State::Identifier),
            C::Digit
            | C::Dot
            | C::Op(Operator::Plus | Operator::Minus)
            | C::Open(_)
            | C::Other => Action::Cut(TokenKind::Exponent),
            C::Space
            | C::Close(_)
            | C::Op(Operator::Star | Operator::Slash | Operator::Percent | Operator::Caret) => {
                Action::Cut(TokenKind::Identifier)
            }
        },

        State::Multiply => match class {
            C::Op(Operator::Star) => Action::Extend(State::Power),
            _ => Action::Cut(TokenKind::Multiply),
        },

        State::Plus => Action::Cut(TokenKind::Plus),
        State::Minus => Action::Cut(TokenKind::Minus),
        State::Divide => Action::Cut(TokenKind::Divide),
        State::Modulo => Action::Cut(TokenKind::Modulo),
        State::Power => Action::Cut(TokenKind::Power),
        State::LParen => Action::Cut(TokenKind::LParen),
        State::RParen => Action::Cut(TokenKind::RParen),
        State::LBracket => Action::Cut(TokenKind::LBracket),
        State::RBracket => Action::Cut(TokenKind::RBracket),
        State::LBrace => Action::Cut(TokenKind::LBrace),
        State::RBrace => Action::Cut(TokenKind::RBrace),
    }
}

/// Initial buffer sizes for a scan.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScannerConfig {
    /// Initial token buffer capacity.
    pub token_capacity: usize,
    /// Initial character pool capacity, in bytes.
    pub pool_capacity: usize,
}

impl Default for ScannerConfig {
    fn default() -> Self {
        ScannerConfig {
            token_capacity: 25,
            pool_capacity: 150,
        }
    }
}

/// Streaming tokenizer. Created per scan and consumed by
/// [`finish`](Scanner::finish).
#[derive(Debug)]
pub struct Scanner {
    /// NUL-delimited lexeme text.
    pool: GrowableBuffer<u8>,
    tokens: GrowableBuffer<RawToken>,
    /// Pool index where the pending lexeme began.
    pending_start: usize,
    state: State,
}

impl Scanner {
    /// Create a scanner with the default buffer sizes.
    pub fn new() -> Result<Self, LexError> {
        Self::with_config(ScannerConfig::default())
    }

    pub fn with_config(config: ScannerConfig) -> Result<Self, LexError> {
        Ok(Scanner {
            pool: GrowableBuffer::with_capacity(config.pool_capacity)?,
            tokens: GrowableBuffer::with_capacity(config.token_capacity)?,
            pending_start: 0,
            state: State::Start,
        })
    }

    /// Current state.
    pub fn state(&self) -> State {
        self.state
    }

    /// Tokens emitted so far.
    pub fn token_count(&self) -> usize {
        self.tokens.len()
    }

    /// Feed one byte.
    ///
    /// Unrecognised bytes become `Invalid` tokens; the only errors are
    /// buffer growth failures, after which the scan cannot continue.
    pub fn feed(&mut self, byte: u8) -> Result<(), LexError> {
        let class = classify(byte);
        self.state = self.apply(transition(self.state, class), byte, class)?;
        Ok(())
    }

    /// Feed every byte `source` yields, until it reports end-of-stream.
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn scan<S: CharSource + ?Sized>(&mut self, source: &mut S) -> Result<(), LexError> {
        while let Some(byte) = source.read() {
            self.feed(byte)?;
        }
        Ok(())
    }

    /// Flush the pending lexeme, append `EndOfInput`, and hand both buffers
    /// to a [`TokenStream`].
    pub fn finish(mut self) -> Result<TokenStream, LexError> {
        self.feed(b' ')?;
        debug_assert_eq!(self.state, State::Start);
        debug_assert_eq!(self.pending_start, self.pool.len());

        let growth = self.tokens.push(RawToken::END)?;
        trace_token_growth(growth);

        debug!(
            tokens = self.tokens.len(),
            pool_bytes = self.pool.len(),
            invalid = self
                .tokens
                .iter()
                .filter(|t| t.kind == TokenKind::Invalid)
                .count(),
            "scan finished"
        );

        Ok(TokenStream::new(self.tokens, self.pool))
    }

    fn apply(&mut self, action: Action, byte: u8, class: CharClass) -> Result<State, LexError> {
        match action {
            Action::Skip => Ok(State::Start),
            Action::Extend(next) => {
                self.push_char(byte)?;
                Ok(next)
            }
            Action::Reject => {
                self.push_char(byte)?;
                self.cut(TokenKind::Invalid)?;
                Ok(State::Start)
            }
            Action::Cut(kind) => {
                self.cut(kind)?;
                self.apply(transition(State::Start, class), byte, class)
            }
            Action::CutAndBegin(kind, next) => {
                self.cut(kind)?;
                self.push_char(byte)?;
                Ok(next)
            }
        }
    }

    /// Append one byte to the pool.
    fn push_char(&mut self, byte: u8) -> Result<(), LexError> {
        if let Growth::Grown {
            old_capacity,
            new_capacity,
        } = self.pool.push(byte)?
        {
            trace!(
                old_capacity,
                new_capacity,
                tokens = self.tokens.len(),
                "character pool grew"
            );
        }
        Ok(())
    }

    /// Terminate the pending lexeme and record it as a `kind` token.
    fn cut(&mut self, kind: TokenKind) -> Result<(), LexError> {
        self.push_char(0)?;
        let len = self.pool.len() - 1 - self.pending_start;
        debug_assert!(len > 0, "cut with an empty pending lexeme");

        let growth = self.tokens.push(RawToken {
            kind,
            lexeme: Some(LexemeSpan::new(self.pending_start, len)),
        })?;
        trace_token_growth(growth);

        self.pending_start = self.pool.len();
        Ok(())
    }
}

fn trace_token_growth(growth: Growth) {
    if let Growth::Grown {
        old_capacity,
        new_capacity,
    } = growth
    {
        trace!(old_capacity, new_capacity, "token buffer grew");
    }
}

/// Scan a byte slice with the default configuration.
#[tracing::instrument(level = "debug", skip_all, fields(len = input.len()))]
pub fn lex(input: &[u8]) -> Result<TokenStream, LexError> {
    let mut source = input;
    let mut scanner = Scanner::new()?;
    scanner.scan(&mut source)?;
    scanner.finish()
}

/// Scan the concatenation of `fragments` with the default configuration.
#[tracing::instrument(level = "debug", skip_all)]
pub fn lex_chunks<I>(fragments: I) -> Result<TokenStream, LexError>
where
    I: IntoIterator,
    I::Item: Into<Vec<u8>>,
{
    let mut source = ChunkedSource::new();
    for fragment in fragments {
        source.add(fragment)?;
    }
    debug!(fragments = source.fragment_count(), "fragments queued");

    let mut scanner = Scanner::new()?;
    scanner.scan(&mut source)?;
    scanner.finish()
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    reason = "test assertions use unwrap/expect for clarity"
)]
mod tests;
