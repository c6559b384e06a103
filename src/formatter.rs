use chrono::{FixedOffset, Local, TimeZone, Utc};

use crate::model::{Token, TokenType};
use crate::options::FormatOptions;
use crate::tokenizer::TokenGenerator;

/// Streaming JSON pretty-printer.
///
/// Works as a single-pass transducer over the token stream: a two-token
/// lookahead window decides indentation transitions before each token is
/// emitted, and no document tree is ever built. String values that hold a
/// serialized `/Date(ms)/` timestamp or a nested JSON document are rewritten
/// in place before emission.
///
/// For well-formed JSON the output parses back to the same value. Malformed
/// input is passed through token by token with no structural guarantee.
///
/// # Example
///
/// ```rust
/// use resfmt::{EolStyle, FormatOptions, JsonPrettifier};
///
/// let mut options = FormatOptions::default();
/// options.eol_style = EolStyle::Lf;
/// let prettifier = JsonPrettifier::with_options(options);
///
/// assert_eq!(
///     prettifier.prettify(r#"{"a":1}"#, 0),
///     "{\n  \"a\": 1\n}"
/// );
/// ```
pub struct JsonPrettifier {
    pub options: FormatOptions,
}

/// What a token contributes to the output, keyed by its kind.
enum EmissionRule {
    /// `{` or `[`: emit the bracket; indent unless the container is empty.
    Open { closer: TokenType },
    /// Closers, keywords, numbers, strings, unknowns: emit the literal
    /// text; dedent before the line break when the lookahead closes a
    /// container.
    Value,
    Comma,
    Colon,
}

fn emission_rule(token_type: TokenType) -> EmissionRule {
    match token_type {
        TokenType::BeginObject => EmissionRule::Open { closer: TokenType::EndObject },
        TokenType::BeginArray => EmissionRule::Open { closer: TokenType::EndArray },
        TokenType::Comma => EmissionRule::Comma,
        TokenType::Colon => EmissionRule::Colon,
        _ => EmissionRule::Value,
    }
}

impl JsonPrettifier {
    pub fn new() -> Self {
        Self::with_options(FormatOptions::default())
    }

    pub fn with_options(options: FormatOptions) -> Self {
        Self { options }
    }

    /// Reformats `text` with one value per line and
    /// `indent_spaces * level` spaces of indentation.
    ///
    /// `start_indent_level` seeds the indent counter so a nested document
    /// can continue from its host's depth; top-level callers pass 0. Each
    /// call owns its own counter and output buffer, so the recursive calls
    /// made for nested string documents share no state with their host.
    pub fn prettify(&self, text: &str, start_indent_level: usize) -> String {
        let mut tokens = TokenGenerator::new(text);
        let mut current = tokens.next();
        let mut next = tokens.next();

        let mut indent_level = start_indent_level as isize;
        let mut out = String::with_capacity(text.len() * 2);

        while let Some(mut token) = current {
            // String special cases rewrite the token text up front; the
            // rewritten literal then flows through the shared value rule.
            if token.token_type == TokenType::String {
                if let Some(rewritten) = self.rewrite_string(&token.text, indent_level) {
                    token.text = rewritten;
                }
            }

            let next_closes = next
                .as_ref()
                .map(|t| t.token_type.closes_container())
                .unwrap_or(false);

            match emission_rule(token.token_type) {
                EmissionRule::Open { closer } => {
                    out.push_str(&token.text);
                    let is_empty = next.as_ref().map(|t| t.token_type) == Some(closer);
                    if !is_empty {
                        indent_level += 1;
                        self.push_line_break(&mut out, indent_level);
                    }
                }
                EmissionRule::Value => {
                    out.push_str(&token.text);
                    if next_closes {
                        indent_level -= 1;
                        self.push_line_break(&mut out, indent_level);
                    }
                }
                EmissionRule::Comma => {
                    out.push_str(&token.text);
                    if next_closes {
                        indent_level -= 1;
                    }
                    self.push_line_break(&mut out, indent_level);
                }
                EmissionRule::Colon => {
                    out.push_str(": ");
                }
            }

            current = next;
            next = tokens.next();
        }

        out
    }

    /// First match wins: date token, then nested JSON document. `None`
    /// leaves the literal untouched.
    fn rewrite_string(&self, text: &str, indent_level: isize) -> Option<String> {
        let content: String = serde_json::from_str(text).ok()?;
        if let Some(rewritten) = rewrite_date(&content, self.options.utc_offset) {
            return Some(rewritten);
        }
        self.rewrite_nested_document(&content, indent_level)
    }

    /// Reformats a string value whose content is itself a JSON document,
    /// continuing from the current indent level. The result is re-encoded
    /// as a JSON string literal so the output stays parseable. Content that
    /// merely looks bracketed but fails to parse is left alone.
    fn rewrite_nested_document(&self, content: &str, indent_level: isize) -> Option<String> {
        let trimmed = content.trim();
        let bracketed = (trimmed.starts_with('{') && trimmed.ends_with('}'))
            || (trimmed.starts_with('[') && trimmed.ends_with(']'));
        if !bracketed {
            return None;
        }
        if serde_json::from_str::<serde_json::Value>(trimmed).is_err() {
            return None;
        }

        let pretty = self.prettify(trimmed, indent_level.max(0) as usize);
        serde_json::to_string(&pretty).ok()
    }

    fn push_line_break(&self, out: &mut String, indent_level: isize) {
        out.push_str(self.options.eol_style.as_str());
        let level = indent_level.max(0) as usize;
        out.push_str(&" ".repeat(level * self.options.indent_spaces));
    }
}

impl Default for JsonPrettifier {
    fn default() -> Self {
        Self::new()
    }
}

/// Rewrites a `/Date(ms)/` string value as a quoted `YYYY-MM-DD HH:mm:ss`
/// timestamp, rendered in `offset` when configured and in the local time
/// zone otherwise. An unparsable payload returns `None` and the original
/// literal is emitted verbatim.
fn rewrite_date(content: &str, offset: Option<FixedOffset>) -> Option<String> {
    let payload = content.strip_prefix("/Date(")?.strip_suffix(")/")?;
    let millis = parse_epoch_millis(payload)?;
    let utc = Utc.timestamp_millis_opt(millis).single()?;

    let formatted = match offset {
        Some(zone) => utc.with_timezone(&zone).format("%Y-%m-%d %H:%M:%S").to_string(),
        None => utc.with_timezone(&Local).format("%Y-%m-%d %H:%M:%S").to_string(),
    };
    Some(format!("\"{formatted}\""))
}

/// The wire format is epoch milliseconds, optionally negative, optionally
/// followed by a `±HHMM` zone hint which is ignored: the milliseconds are
/// already UTC and display selection belongs to the caller's offset.
fn parse_epoch_millis(payload: &str) -> Option<i64> {
    if !payload.starts_with(|c: char| c.is_ascii_digit() || c == '-') {
        return None;
    }
    let end = payload[1..]
        .find(['+', '-'])
        .map(|pos| pos + 1)
        .unwrap_or(payload.len());
    payload[..end].parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::{parse_utc_offset, EolStyle};

    fn prettifier() -> JsonPrettifier {
        prettifier_with_offset(None)
    }

    fn prettifier_with_offset(offset: Option<&str>) -> JsonPrettifier {
        let mut options = FormatOptions::default();
        options.eol_style = EolStyle::Lf;
        options.utc_offset = offset.map(|o| parse_utc_offset(o).unwrap());
        JsonPrettifier::with_options(options)
    }

    #[test]
    fn formats_object_with_nested_array() {
        let output = prettifier().prettify(r#"{"a":1,"b":[1,2]}"#, 0);
        assert_eq!(output, "{\n  \"a\": 1,\n  \"b\": [\n    1,\n    2\n  ]\n}");
    }

    #[test]
    fn empty_containers_stay_flat() {
        let p = prettifier();
        assert_eq!(p.prettify("{}", 0), "{}");
        assert_eq!(p.prettify("[]", 0), "[]");
        assert_eq!(
            p.prettify(r#"{"a":{},"b":[]}"#, 0),
            "{\n  \"a\": {},\n  \"b\": []\n}"
        );
    }

    #[test]
    fn trailing_comma_dedents_once() {
        let output = prettifier().prettify("[1,]", 0);
        assert_eq!(output, "[\n  1,\n]");
    }

    #[test]
    fn booleans_and_null_share_the_value_rule() {
        let output = prettifier().prettify(r#"[true,false,null]"#, 0);
        assert_eq!(output, "[\n  true,\n  false,\n  null\n]");
    }

    #[test]
    fn indent_size_is_configurable() {
        let mut options = FormatOptions::default();
        options.eol_style = EolStyle::Lf;
        options.indent_spaces = 4;
        let p = JsonPrettifier::with_options(options);
        assert_eq!(p.prettify(r#"{"a":1}"#, 0), "{\n    \"a\": 1\n}");
    }

    #[test]
    fn start_indent_level_offsets_every_line_break() {
        let output = prettifier().prettify(r#"{"x":1}"#, 1);
        assert_eq!(output, "{\n    \"x\": 1\n  }");
    }

    #[test]
    fn date_token_renders_in_configured_offset() {
        let p = prettifier_with_offset(Some("+00:00"));
        let output = p.prettify(r#"{"d":"\/Date(1609459200000)\/"}"#, 0);
        assert_eq!(output, "{\n  \"d\": \"2021-01-01 00:00:00\"\n}");

        let p = prettifier_with_offset(Some("+08:00"));
        let output = p.prettify(r#"{"d":"\/Date(1609459200000)\/"}"#, 0);
        assert_eq!(output, "{\n  \"d\": \"2021-01-01 08:00:00\"\n}");
    }

    #[test]
    fn date_token_without_escaped_slashes_also_matches() {
        let p = prettifier_with_offset(Some("Z"));
        let output = p.prettify(r#"{"d":"/Date(0)/"}"#, 0);
        assert_eq!(output, "{\n  \"d\": \"1970-01-01 00:00:00\"\n}");
    }

    #[test]
    fn date_token_zone_hint_is_ignored() {
        let p = prettifier_with_offset(Some("+00:00"));
        let output = p.prettify(r#"{"d":"\/Date(1609459200000+0800)\/"}"#, 0);
        assert_eq!(output, "{\n  \"d\": \"2021-01-01 00:00:00\"\n}");
    }

    #[test]
    fn unparsable_date_payload_is_left_verbatim() {
        let p = prettifier_with_offset(Some("+00:00"));
        let output = p.prettify(r#"{"d":"\/Date(soon)\/"}"#, 0);
        assert_eq!(output, "{\n  \"d\": \"\\/Date(soon)\\/\"\n}");
    }

    #[test]
    fn nested_json_string_is_reformatted_at_current_level() {
        let output = prettifier().prettify(r#"{"payload":"{\"x\":1}"}"#, 0);
        assert_eq!(
            output,
            "{\n  \"payload\": \"{\\n    \\\"x\\\": 1\\n  }\"\n}"
        );
    }

    #[test]
    fn nested_rewrite_keeps_output_parseable() {
        let output = prettifier().prettify(r#"{"payload":"[1,2]"}"#, 0);
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        let inner = value["payload"].as_str().unwrap();
        let inner_value: serde_json::Value = serde_json::from_str(inner).unwrap();
        assert_eq!(inner_value, serde_json::json!([1, 2]));
    }

    #[test]
    fn bracketed_but_invalid_string_is_untouched() {
        let output = prettifier().prettify(r#"{"payload":"{oops}"}"#, 0);
        assert_eq!(output, "{\n  \"payload\": \"{oops}\"\n}");
    }

    #[test]
    fn plain_strings_are_untouched() {
        let output = prettifier().prettify(r#"{"a":"hello world"}"#, 0);
        assert_eq!(output, "{\n  \"a\": \"hello world\"\n}");
    }

    #[test]
    fn numbers_never_get_nested_reformatting() {
        let output = prettifier().prettify("[12345678901234567890]", 0);
        assert_eq!(output, "[\n  12345678901234567890\n]");
    }

    #[test]
    fn round_trip_preserves_value() {
        let input = r#"{"s":"text","n":-1.5e3,"b":true,"z":null,"arr":[{},{"k":[]}]}"#;
        let output = prettifier().prettify(input, 0);
        let before: serde_json::Value = serde_json::from_str(input).unwrap();
        let after: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(before, after);
    }

    #[test]
    fn reformatting_the_minified_output_is_byte_stable() {
        let input = r#"{"a":1,"b":[1,2],"c":{"d":"e"}}"#;
        let p = prettifier();
        let first = p.prettify(input, 0);

        let value: serde_json::Value = serde_json::from_str(&first).unwrap();
        let minified = serde_json::to_string(&value).unwrap();
        let second = p.prettify(&minified, 0);
        assert_eq!(first, second);
    }

    #[test]
    fn malformed_input_passes_tokens_through() {
        let p = prettifier();
        assert_eq!(p.prettify("", 0), "");
        // No structural guarantee, but no panic and no lost text either.
        let output = p.prettify("}}", 0);
        assert_eq!(output.matches('}').count(), 2);
    }

    #[test]
    fn indentation_tracks_open_containers() {
        let output = prettifier().prettify(r#"{"a":{"b":{"c":1}}}"#, 0);
        let expected = "{\n  \"a\": {\n    \"b\": {\n      \"c\": 1\n    }\n  }\n}";
        assert_eq!(output, expected);
    }
}
