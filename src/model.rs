/// The lexical class of a piece of JSON text.
///
/// The formatter dispatches on this to decide what to emit and how the
/// indent level changes. End of input is represented by the token stream
/// running out, not by a variant here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenType {
    BeginObject,
    EndObject,
    BeginArray,
    EndArray,
    Colon,
    Comma,
    /// A quoted string literal, including its surrounding quotes.
    String,
    Number,
    Null,
    True,
    False,
    /// Anything the scanner could not classify. Emitted verbatim so that
    /// malformed input degrades to pass-through instead of failing.
    Unknown,
}

impl TokenType {
    /// True for `}` and `]`, the tokens that trigger a dedent when seen
    /// in the lookahead position.
    pub fn closes_container(self) -> bool {
        matches!(self, TokenType::EndObject | TokenType::EndArray)
    }
}

/// One lexical unit: its class plus the literal text span it came from.
///
/// Tokens are produced on demand by the scanner and consumed immediately
/// by the formatter's two-token window; they are never collected in bulk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub token_type: TokenType,
    pub text: String,
}

impl Token {
    pub fn new(token_type: TokenType, text: impl Into<String>) -> Self {
        Self { token_type, text: text.into() }
    }
}
