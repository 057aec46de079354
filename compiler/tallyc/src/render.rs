//! Text rendering of tokens.

use tally_lexer_core::Token;

/// Placeholder printed for the lexeme-less end marker.
const NO_LEXEME: &str = "[NULL]";

/// `{ type:"NUMBER_TOKEN", lexeme:"12" }`. Non-printable lexeme bytes are
/// escaped.
pub fn render_token_line(token: &Token<'_>) -> String {
    let lexeme = match token.lexeme() {
        Some(bytes) => bytes.escape_ascii().to_string(),
        None => NO_LEXEME.to_string(),
    };
    format!("{{ type:\"{}\", lexeme:\"{lexeme}\" }}", token.kind().name())
}

/// Just the kind name.
pub fn render_kind_line(token: &Token<'_>) -> String {
    token.kind().name().to_string()
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    reason = "test assertions use unwrap/expect for clarity"
)]
