use crate::model::{Token, TokenType};

/// Cursor over the input text. Tracks the current character and the start
/// of the token being scanned, and can slice the original text back out
/// by byte range so multi-byte characters survive untouched.
struct ScannerState {
    original_text: String,
    chars: Vec<char>,
    byte_indices: Vec<usize>,
    index: usize,
    token_start: usize,
}

impl ScannerState {
    fn new(original_text: &str) -> Self {
        let mut chars: Vec<char> = Vec::new();
        let mut byte_indices: Vec<usize> = Vec::new();
        for (idx, ch) in original_text.char_indices() {
            byte_indices.push(idx);
            chars.push(ch);
        }
        byte_indices.push(original_text.len());

        Self {
            original_text: original_text.to_string(),
            chars,
            byte_indices,
            index: 0,
            token_start: 0,
        }
    }

    fn at_end(&self) -> bool {
        self.index >= self.chars.len()
    }

    fn current(&self) -> Option<char> {
        self.chars.get(self.index).copied()
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.index + 1).copied()
    }

    fn advance(&mut self) {
        self.index += 1;
    }

    fn set_token_start(&mut self) {
        self.token_start = self.index;
    }

    fn token_from_buffer(&self, token_type: TokenType) -> Token {
        let start = self.byte_indices[self.token_start];
        let end = self.byte_indices[self.index];
        Token::new(token_type, &self.original_text[start..end])
    }
}

/// Lazy scanner producing one [`Token`] at a time.
///
/// The scanner never fails: anything it cannot classify comes out as an
/// [`TokenType::Unknown`] token carrying the raw text, and every call
/// consumes at least one character, so iteration always terminates.
/// Whitespace and `//`/`/* */` comments are tolerated and dropped.
pub struct TokenGenerator {
    state: ScannerState,
}

impl TokenGenerator {
    pub fn new(input: &str) -> Self {
        Self { state: ScannerState::new(input) }
    }
}

impl Iterator for TokenGenerator {
    type Item = Token;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let ch = self.state.current()?;
            match ch {
                ' ' | '\t' | '\r' | '\n' => self.state.advance(),
                '{' => return Some(scan_single(&mut self.state, TokenType::BeginObject)),
                '}' => return Some(scan_single(&mut self.state, TokenType::EndObject)),
                '[' => return Some(scan_single(&mut self.state, TokenType::BeginArray)),
                ']' => return Some(scan_single(&mut self.state, TokenType::EndArray)),
                ':' => return Some(scan_single(&mut self.state, TokenType::Colon)),
                ',' => return Some(scan_single(&mut self.state, TokenType::Comma)),
                '"' => return Some(scan_string(&mut self.state)),
                '/' if matches!(self.state.peek(), Some('/') | Some('*')) => {
                    skip_comment(&mut self.state);
                }
                '-' => return Some(scan_number(&mut self.state)),
                c if c.is_ascii_digit() => return Some(scan_number(&mut self.state)),
                c if c.is_ascii_alphabetic() => return Some(scan_word(&mut self.state)),
                _ => return Some(scan_other(&mut self.state)),
            }
        }
    }
}

fn scan_single(state: &mut ScannerState, token_type: TokenType) -> Token {
    state.set_token_start();
    state.advance();
    state.token_from_buffer(token_type)
}

/// Consumes from the opening quote through the closing quote, honoring
/// backslash escapes. An unterminated string is returned as Unknown so
/// the remaining text still passes through verbatim.
fn scan_string(state: &mut ScannerState) -> Token {
    state.set_token_start();
    state.advance();

    loop {
        match state.current() {
            None => return state.token_from_buffer(TokenType::Unknown),
            Some('"') => {
                state.advance();
                return state.token_from_buffer(TokenType::String);
            }
            Some('\\') => {
                state.advance();
                if !state.at_end() {
                    state.advance();
                }
            }
            Some(_) => state.advance(),
        }
    }
}

fn scan_number(state: &mut ScannerState) -> Token {
    state.set_token_start();
    let mut valid = true;

    if state.current() == Some('-') {
        state.advance();
    }
    if consume_digits(state) == 0 {
        valid = false;
    }
    if state.current() == Some('.') {
        state.advance();
        if consume_digits(state) == 0 {
            valid = false;
        }
    }
    if matches!(state.current(), Some('e') | Some('E')) {
        state.advance();
        if matches!(state.current(), Some('+') | Some('-')) {
            state.advance();
        }
        if consume_digits(state) == 0 {
            valid = false;
        }
    }

    let token_type = if valid { TokenType::Number } else { TokenType::Unknown };
    state.token_from_buffer(token_type)
}

fn consume_digits(state: &mut ScannerState) -> usize {
    let mut count = 0;
    while matches!(state.current(), Some(c) if c.is_ascii_digit()) {
        state.advance();
        count += 1;
    }
    count
}

fn scan_word(state: &mut ScannerState) -> Token {
    state.set_token_start();
    while matches!(state.current(), Some(c) if c.is_ascii_alphabetic()) {
        state.advance();
    }

    let token = state.token_from_buffer(TokenType::Unknown);
    let token_type = match token.text.as_str() {
        "true" => TokenType::True,
        "false" => TokenType::False,
        "null" => TokenType::Null,
        _ => TokenType::Unknown,
    };
    Token::new(token_type, token.text)
}

/// A run of characters that can't start any known token.
fn scan_other(state: &mut ScannerState) -> Token {
    state.set_token_start();
    state.advance();
    while let Some(c) = state.current() {
        if c.is_whitespace()
            || c.is_ascii_digit()
            || c.is_ascii_alphabetic()
            || matches!(c, '{' | '}' | '[' | ']' | ':' | ',' | '"' | '-' | '/')
        {
            break;
        }
        state.advance();
    }
    state.token_from_buffer(TokenType::Unknown)
}

fn skip_comment(state: &mut ScannerState) {
    let block = state.peek() == Some('*');
    state.advance();
    state.advance();

    if block {
        let mut last_was_asterisk = false;
        while let Some(c) = state.current() {
            state.advance();
            if c == '/' && last_was_asterisk {
                return;
            }
            last_was_asterisk = c == '*';
        }
    } else {
        while let Some(c) = state.current() {
            if c == '\n' {
                return;
            }
            state.advance();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(input: &str) -> Vec<TokenType> {
        TokenGenerator::new(input).map(|t| t.token_type).collect()
    }

    #[test]
    fn scans_simple_object() {
        let tokens: Vec<Token> = TokenGenerator::new(r#"{"a": 1, "b": [true, null]}"#).collect();
        let expected = [
            (TokenType::BeginObject, "{"),
            (TokenType::String, "\"a\""),
            (TokenType::Colon, ":"),
            (TokenType::Number, "1"),
            (TokenType::Comma, ","),
            (TokenType::String, "\"b\""),
            (TokenType::Colon, ":"),
            (TokenType::BeginArray, "["),
            (TokenType::True, "true"),
            (TokenType::Comma, ","),
            (TokenType::Null, "null"),
            (TokenType::EndArray, "]"),
            (TokenType::EndObject, "}"),
        ];
        assert_eq!(tokens.len(), expected.len());
        for (token, (token_type, text)) in tokens.iter().zip(expected.iter()) {
            assert_eq!(token.token_type, *token_type);
            assert_eq!(token.text, *text);
        }
    }

    #[test]
    fn scans_numbers() {
        assert_eq!(kinds("-1.5e+10"), vec![TokenType::Number]);
        assert_eq!(kinds("0.25"), vec![TokenType::Number]);
        let bad: Vec<Token> = TokenGenerator::new("1.").collect();
        assert_eq!(bad[0].token_type, TokenType::Unknown);
        assert_eq!(bad[0].text, "1.");
    }

    #[test]
    fn escaped_quotes_stay_inside_string() {
        let tokens: Vec<Token> = TokenGenerator::new(r#""a\"b""#).collect();
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].token_type, TokenType::String);
        assert_eq!(tokens[0].text, r#""a\"b""#);
    }

    #[test]
    fn unterminated_string_is_unknown() {
        let tokens: Vec<Token> = TokenGenerator::new(r#""abc"#).collect();
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].token_type, TokenType::Unknown);
    }

    #[test]
    fn comments_are_dropped() {
        assert_eq!(
            kinds("// leading\n{ /* inner */ }"),
            vec![TokenType::BeginObject, TokenType::EndObject]
        );
    }

    #[test]
    fn garbage_degrades_to_unknown() {
        assert_eq!(kinds("not json"), vec![TokenType::Unknown, TokenType::Unknown]);
        assert_eq!(kinds("@#%"), vec![TokenType::Unknown]);
    }

    #[test]
    fn multibyte_text_survives() {
        let tokens: Vec<Token> = TokenGenerator::new(r#""héllo — ünïcode""#).collect();
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].text, r#""héllo — ünïcode""#);
    }
}
