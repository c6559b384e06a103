use serde::{Deserialize, Serialize};

use crate::dispatch::BodyFormatter;
use crate::mime;

/// Which parts of an HTTP exchange the preview text includes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PreviewOption {
    /// Status line, headers and body.
    Full,
    /// Status line and headers only.
    Headers,
    /// Body only.
    Body,
    /// The request that was sent, then the full response.
    Exchange,
}

/// The request half of a captured exchange.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestData {
    pub method: String,
    pub url: String,
    #[serde(default)]
    pub headers: Vec<(String, String)>,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub content_type: Option<String>,
}

/// The response half of a captured exchange.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResponseData {
    #[serde(default = "default_http_version")]
    pub http_version: String,
    pub status_code: u16,
    #[serde(default)]
    pub status_message: String,
    #[serde(default)]
    pub headers: Vec<(String, String)>,
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub content_type: Option<String>,
}

fn default_http_version() -> String {
    "1.1".to_string()
}

/// A request/response pair as captured by whatever issued the request.
/// The request side is optional; it is only shown in
/// [`PreviewOption::Exchange`] mode.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpExchange {
    #[serde(default)]
    pub request: Option<RequestData>,
    pub response: ResponseData,
}

/// Composes the preview pane text for an exchange, formatting bodies
/// through a [`BodyFormatter`]. Body validation warnings are suppressed
/// here: the preview always renders, mislabeled bodies included.
pub struct PreviewRenderer {
    formatter: BodyFormatter,
    pub option: PreviewOption,
}

impl PreviewRenderer {
    pub fn new(formatter: BodyFormatter, option: PreviewOption) -> Self {
        Self { formatter, option }
    }

    pub fn render(&self, exchange: &HttpExchange) -> String {
        let eol = self.formatter.options().eol_style.as_str();
        let response = &exchange.response;
        let mut content = String::new();

        if self.option == PreviewOption::Exchange {
            if let Some(request) = &exchange.request {
                content.push_str(&format!("{} {} HTTP/1.1{eol}", request.method, request.url));
                content.push_str(&render_headers(&request.headers, eol));
                if let Some(body) = &request.body {
                    let formatted =
                        self.formatter.format_body(body, request.content_type.as_deref(), true);
                    content.push_str(&format!("{eol}{}{eol}", formatted.text));
                }
                content.push_str(&eol.repeat(2));
            }
        }

        if self.option != PreviewOption::Body {
            content.push_str(&format!(
                "HTTP/{} {} {}{eol}",
                response.http_version, response.status_code, response.status_message
            ));
            content.push_str(&render_headers(&response.headers, eol));
        }

        if self.option != PreviewOption::Headers {
            let prefix = if self.option == PreviewOption::Body { "" } else { eol };
            let formatted =
                self.formatter
                    .format_body(&response.body, response.content_type.as_deref(), true);
            content.push_str(&format!("{prefix}{}", formatted.text));
        }

        content
    }

    /// The editor language for the preview document. Body-only previews
    /// take the language of the payload; anything showing headers is
    /// plain `http`.
    pub fn language_id(&self, response: &ResponseData) -> &'static str {
        if self.option == PreviewOption::Body {
            if let Some(content_type) = response.content_type.as_deref() {
                if mime::is_json(content_type) {
                    return "json";
                } else if mime::is_javascript(content_type) {
                    return "javascript";
                } else if mime::is_xml(content_type) {
                    return "xml";
                } else if mime::is_html(content_type) {
                    return "html";
                } else if mime::is_css(content_type) {
                    return "css";
                }
            }
        }

        "http"
    }
}

fn render_headers(headers: &[(String, String)], eol: &str) -> String {
    let mut out = String::new();
    for (name, value) in headers {
        out.push_str(&format!("{name}: {value}{eol}"));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::{EolStyle, FormatOptions};

    fn renderer(option: PreviewOption) -> PreviewRenderer {
        let mut options = FormatOptions::default();
        options.eol_style = EolStyle::Lf;
        PreviewRenderer::new(BodyFormatter::with_options(options), option)
    }

    fn sample_exchange() -> HttpExchange {
        HttpExchange {
            request: Some(RequestData {
                method: "POST".to_string(),
                url: "https://api.example.com/items".to_string(),
                headers: vec![("Content-Type".to_string(), "application/json".to_string())],
                body: Some(r#"{"name":"widget"}"#.to_string()),
                content_type: Some("application/json".to_string()),
            }),
            response: ResponseData {
                http_version: "1.1".to_string(),
                status_code: 200,
                status_message: "OK".to_string(),
                headers: vec![
                    ("Content-Type".to_string(), "application/json".to_string()),
                    ("Content-Length".to_string(), "13".to_string()),
                ],
                body: r#"{"id":7}"#.to_string(),
                content_type: Some("application/json".to_string()),
            },
        }
    }

    #[test]
    fn body_preview_is_the_formatted_body_alone() {
        let text = renderer(PreviewOption::Body).render(&sample_exchange());
        assert_eq!(text, "{\n  \"id\": 7\n}");
    }

    #[test]
    fn headers_preview_has_status_line_and_headers_only() {
        let text = renderer(PreviewOption::Headers).render(&sample_exchange());
        assert_eq!(
            text,
            "HTTP/1.1 200 OK\nContent-Type: application/json\nContent-Length: 13\n"
        );
    }

    #[test]
    fn full_preview_appends_the_body_after_a_blank_line() {
        let text = renderer(PreviewOption::Full).render(&sample_exchange());
        assert!(text.starts_with("HTTP/1.1 200 OK\n"));
        assert!(text.ends_with("Content-Length: 13\n\n{\n  \"id\": 7\n}"));
    }

    #[test]
    fn exchange_preview_leads_with_the_request() {
        let text = renderer(PreviewOption::Exchange).render(&sample_exchange());
        assert!(text.starts_with("POST https://api.example.com/items HTTP/1.1\n"));
        assert!(text.contains("{\n  \"name\": \"widget\"\n}"));
        assert!(text.contains("HTTP/1.1 200 OK\n"));
        assert!(text.ends_with("{\n  \"id\": 7\n}"));
    }

    #[test]
    fn exchange_preview_without_request_data_degrades_to_full() {
        let mut exchange = sample_exchange();
        exchange.request = None;
        let text = renderer(PreviewOption::Exchange).render(&exchange);
        assert!(text.starts_with("HTTP/1.1 200 OK\n"));
    }

    #[test]
    fn language_follows_content_type_for_body_previews() {
        let exchange = sample_exchange();
        assert_eq!(renderer(PreviewOption::Body).language_id(&exchange.response), "json");
        assert_eq!(renderer(PreviewOption::Full).language_id(&exchange.response), "http");

        let mut response = exchange.response.clone();
        response.content_type = Some("text/html; charset=utf-8".to_string());
        assert_eq!(renderer(PreviewOption::Body).language_id(&response), "html");

        response.content_type = None;
        assert_eq!(renderer(PreviewOption::Body).language_id(&response), "http");
    }

    #[test]
    fn exchange_round_trips_through_serde() {
        let exchange = sample_exchange();
        let encoded = serde_json::to_string(&exchange).unwrap();
        let decoded: HttpExchange = serde_json::from_str(&encoded).unwrap();
        assert_eq!(decoded.response.status_code, 200);
        assert_eq!(decoded.request.unwrap().method, "POST");
    }
}
