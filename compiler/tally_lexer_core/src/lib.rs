//! Low-level scanner for tally arithmetic expressions.
//!
//! Turns input supplied as independently owned fragments into a
//! [`TokenStream`] of classified tokens. The pieces, leaf first:
//!
//! - [`GrowableBuffer`]: append-only storage with doubling growth and
//!   checked capacity arithmetic, used for both tokens and lexeme text.
//! - [`ChunkedSource`]: presents many fragments as one byte stream and
//!   releases each fragment once it has been read.
//! - [`Scanner`]: the deterministic state machine. Lexeme text is copied
//!   into a NUL-delimited pool and tokens refer to it by `(start, len)`
//!   span, so pool relocation never invalidates an emitted token.
//! - [`TokenStream`]: the finished product. Tokens borrow their lexemes
//!   from it and cannot outlive it.
//!
//! Resource exhaustion is reported as [`LexError`]. Unrecognised input is
//! not an error: it becomes an [`TokenKind::Invalid`] token and scanning
//! continues.

mod char_class;
mod chunked_source;
mod error;
mod growable_buffer;
mod scanner;
mod token;
mod token_stream;

pub use char_class::{classify, Bracket, CharClass, Operator};
pub use chunked_source::{CharSource, ChunkedSource};
pub use error::LexError;
pub use growable_buffer::{GrowableBuffer, Growth};
pub use scanner::{lex, lex_chunks, Scanner, ScannerConfig, State};
pub use token::{LexemeSpan, RawToken, Token, TokenKind};
pub use token_stream::{Iter, TokenStream};
