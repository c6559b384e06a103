//! # resfmt
//!
//! Content-type aware pretty-printing for HTTP response previews.
//!
//! Given a response body and its declared content type, resfmt picks a
//! formatting strategy: JSON bodies run through a streaming pretty-printer,
//! XML and CSS are handed to pluggable external printers, and anything
//! else is checked for mislabeled JSON before being passed through
//! unchanged.
//!
//! The JSON prettifier is a single-pass token transducer, not a parser: it
//! reads two tokens of lookahead, tracks one indent counter, and never
//! materializes a document tree. Two kinds of string values are rewritten
//! on the way through:
//!
//! - `"/Date(1609459200000)/"` timestamps become quoted
//!   `"YYYY-MM-DD HH:mm:ss"` strings, rendered in a configured UTC offset
//!   or the local time zone;
//! - string values that contain a serialized JSON document (APIs that
//!   double-encode payloads) are reformatted in place, indented from the
//!   surrounding depth.
//!
//! ## Command-Line Tool
//!
//! The crate ships a `resfmt` binary for formatting response bodies from
//! the terminal:
//!
//! ```sh
//! # Format a JSON body from stdin
//! curl -s https://api.example.com/items | resfmt -c application/json
//!
//! # Render a captured exchange snapshot
//! resfmt --exchange capture.json --preview full
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use resfmt::BodyFormatter;
//!
//! let formatter = BodyFormatter::new();
//! let result = formatter.format_body(
//!     r#"{"name":"Alice","scores":[95,87]}"#,
//!     Some("application/json"),
//!     false,
//! );
//!
//! println!("{}", result.text);
//! assert!(result.warning.is_none());
//! ```
//!
//! ## Formatting JSON directly
//!
//! ```rust
//! use resfmt::{EolStyle, FormatOptions, JsonPrettifier};
//!
//! let mut options = FormatOptions::default();
//! options.eol_style = EolStyle::Lf;
//!
//! let prettifier = JsonPrettifier::with_options(options);
//! let output = prettifier.prettify(r#"{"a":1,"b":[1,2]}"#, 0);
//!
//! assert_eq!(output, "{\n  \"a\": 1,\n  \"b\": [\n    1,\n    2\n  ]\n}");
//! ```
//!
//! ## Time zones
//!
//! `/Date(ms)/` rewriting uses the local time zone unless an explicit UTC
//! offset is configured:
//!
//! ```rust
//! use resfmt::{parse_utc_offset, EolStyle, FormatOptions, JsonPrettifier};
//!
//! let mut options = FormatOptions::default();
//! options.eol_style = EolStyle::Lf;
//! options.utc_offset = Some(parse_utc_offset("+08:00").unwrap());
//!
//! let prettifier = JsonPrettifier::with_options(options);
//! let output = prettifier.prettify(r#"{"d":"\/Date(1609459200000)\/"}"#, 0);
//!
//! assert_eq!(output, "{\n  \"d\": \"2021-01-01 08:00:00\"\n}");
//! ```

mod dispatch;
mod error;
mod formatter;
mod mime;
mod model;
mod options;
mod preview;
mod tokenizer;

pub use crate::dispatch::{is_json_string, BodyFormatter, FormattedBody, TextPrinter};
pub use crate::error::ResponseFormatError;
pub use crate::formatter::JsonPrettifier;
pub use crate::mime::{is_css, is_html, is_javascript, is_json, is_xml, MediaType};
pub use crate::model::{Token, TokenType};
pub use crate::options::{parse_utc_offset, EolStyle, FormatOptions};
pub use crate::preview::{
    HttpExchange, PreviewOption, PreviewRenderer, RequestData, ResponseData,
};
pub use crate::tokenizer::TokenGenerator;
