//! Byte classification for the scanner's transition table.
//!
//! Every input byte maps to exactly one [`CharClass`]. The scanner decides
//! what to do from `(State, CharClass)` alone, so the per-byte checks live
//! here and nowhere else.

/// Binary operator characters.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Operator {
    /// `+`
    Plus,
    /// `-`
    Minus,
    /// `*`
    Star,
    /// `/`
    Slash,
    /// `%`
    Percent,
    /// `^`
    Caret,
}

/// Bracket pair kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Bracket {
    /// `(` / `)`
    Paren,
    /// `[` / `]`
    Square,
    /// `{` / `}`
    Curly,
}

/// Scanner-relevant class of a single input byte.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CharClass {
    /// Token separator: space, tab, newline, carriage return.
    Space,
    /// `0`-`9`
    Digit,
    /// `.`
    Dot,
    /// `e` or `E`: a letter that may start an exponent after a number.
    ExpMarker,
    /// Any other ASCII letter, or `_`.
    Letter,
    Op(Operator),
    Open(Bracket),
    Close(Bracket),
    /// Everything else, including non-ASCII bytes.
    Other,
}

impl CharClass {
    /// Every class, in declaration order. Used to check the transition
    /// table is total.
    pub const ALL: [CharClass; 18] = [
        CharClass::Space,
        CharClass::Digit,
        CharClass::Dot,
        CharClass::ExpMarker,
        CharClass::Letter,
        CharClass::Op(Operator::Plus),
        CharClass::Op(Operator::Minus),
        CharClass::Op(Operator::Star),
        CharClass::Op(Operator::Slash),
        CharClass::Op(Operator::Percent),
        CharClass::Op(Operator::Caret),
        CharClass::Open(Bracket::Paren),
        CharClass::Open(Bracket::Square),
        CharClass::Open(Bracket::Curly),
        CharClass::Close(Bracket::Paren),
        CharClass::Close(Bracket::Square),
        CharClass::Close(Bracket::Curly),
        CharClass::Other,
    ];
}

/// Classify one input byte.
#[inline]
pub fn classify(byte: u8) -> CharClass {
    match byte {
        b' ' | b'\t' | b'\n' | b'\r' => CharClass::Space,
        b'0'..=b'9' => CharClass::Digit,
        b'.' => CharClass::Dot,
        b'e' | b'E' => CharClass::ExpMarker,
        b'a'..=b'z' | b'A'..=b'Z' | b'_' => CharClass::Letter,
        b'+' => CharClass::Op(Operator::Plus),
        b'-' => CharClass::Op(Operator::Minus),
        b'*' => CharClass::Op(Operator::Star),
        b'/' => CharClass::Op(Operator::Slash),
        b'%' => CharClass::Op(Operator::Percent),
        b'^' => CharClass::Op(Operator::Caret),
        b'(' => CharClass::Open(Bracket::Paren),
        b'[' => CharClass::Open(Bracket::Square),
        b'{' => CharClass::Open(Bracket::Curly),
        b')' => CharClass::Close(Bracket::Paren),
        b']' => CharClass::Close(Bracket::Square),
        b'}' => CharClass::Close(Bracket::Curly),
        _ => CharClass::Other,
    }
}
