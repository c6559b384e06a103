use log::{debug, warn};

use crate::formatter::JsonPrettifier;
use crate::mime;
use crate::options::FormatOptions;

/// An injected pretty-printer for a text format this crate does not
/// understand itself (XML, CSS). Opaque: it receives the raw body and
/// returns the replacement text.
pub type TextPrinter = Box<dyn Fn(&str) -> String>;

/// The dispatcher's result: the (possibly reformatted) body plus at most
/// one user-visible warning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormattedBody {
    pub text: String,
    pub warning: Option<String>,
}

impl FormattedBody {
    fn clean(text: String) -> Self {
        Self { text, warning: None }
    }
}

/// Selects a pretty-print strategy by content type.
///
/// JSON bodies go through the crate's own [`JsonPrettifier`]; XML and CSS
/// are delegated to injected printers; anything else is checked for
/// mislabeled JSON and otherwise returned unchanged.
pub struct BodyFormatter {
    prettifier: JsonPrettifier,
    xml_printer: Option<TextPrinter>,
    css_printer: Option<TextPrinter>,
}

impl BodyFormatter {
    pub fn new() -> Self {
        Self::with_options(FormatOptions::default())
    }

    pub fn with_options(options: FormatOptions) -> Self {
        Self {
            prettifier: JsonPrettifier::with_options(options),
            xml_printer: None,
            css_printer: None,
        }
    }

    /// Installs the XML pretty-printer. Without one, XML bodies pass
    /// through unchanged.
    pub fn with_xml_printer(mut self, printer: TextPrinter) -> Self {
        self.xml_printer = Some(printer);
        self
    }

    /// Installs the CSS pretty-printer. Without one, CSS bodies pass
    /// through unchanged.
    pub fn with_css_printer(mut self, printer: TextPrinter) -> Self {
        self.css_printer = Some(printer);
        self
    }

    pub fn options(&self) -> &FormatOptions {
        &self.prettifier.options
    }

    /// Formats a response body according to its declared content type.
    ///
    /// A JSON content type with a body that fails to parse yields the body
    /// unchanged plus a warning, unless `suppress_validation` is set. An
    /// absent, empty or unrecognized content type falls back to JSON
    /// detection so mislabeled responses still get formatted.
    pub fn format_body(
        &self,
        body: &str,
        content_type: Option<&str>,
        suppress_validation: bool,
    ) -> FormattedBody {
        let content_type = content_type.map(str::trim).filter(|ct| !ct.is_empty());

        match content_type {
            Some(ct) if mime::is_json(ct) => {
                if is_json_string(body) {
                    FormattedBody::clean(self.prettifier.prettify(body, 0))
                } else if suppress_validation {
                    debug!("response declared {ct} but body is not valid JSON; validation suppressed");
                    FormattedBody::clean(body.to_string())
                } else {
                    let message = "The content type of response is application/json, \
                                   while response body is not a valid json string";
                    warn!("{message}");
                    FormattedBody { text: body.to_string(), warning: Some(message.to_string()) }
                }
            }
            Some(ct) if mime::is_xml(ct) => self.delegate(self.xml_printer.as_ref(), body),
            Some(ct) if mime::is_css(ct) => self.delegate(self.css_printer.as_ref(), body),
            _ => {
                // A body that parses as JSON gets formatted even when the
                // label says otherwise.
                if is_json_string(body) {
                    FormattedBody::clean(self.prettifier.prettify(body, 0))
                } else {
                    FormattedBody::clean(body.to_string())
                }
            }
        }
    }

    fn delegate(&self, printer: Option<&TextPrinter>, body: &str) -> FormattedBody {
        match printer {
            Some(print) => FormattedBody::clean(print(body)),
            None => FormattedBody::clean(body.to_string()),
        }
    }
}

impl Default for BodyFormatter {
    fn default() -> Self {
        Self::new()
    }
}

/// Whether `text` parses as a JSON document. Nothing is built from the
/// input; this is a validity probe only.
pub fn is_json_string(text: &str) -> bool {
    serde_json::from_str::<serde::de::IgnoredAny>(text).is_ok()
}
