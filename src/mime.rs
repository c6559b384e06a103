/// A content-type header value reduced to its base media type.
///
/// Parameters such as `charset=utf-8` are dropped and the remainder is
/// lowercased, so `Application/JSON; charset=UTF-8` classifies the same as
/// `application/json`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaType {
    pub top: String,
    pub subtype: String,
    /// Structured-syntax suffix, e.g. the `json` in `application/hal+json`.
    pub suffix: Option<String>,
}

impl MediaType {
    pub fn parse(raw: &str) -> Option<Self> {
        let essence = raw.split(';').next().unwrap_or("").trim().to_ascii_lowercase();
        let (top, subtype) = essence.split_once('/')?;
        if top.is_empty() || subtype.is_empty() {
            return None;
        }

        let (subtype, suffix) = match subtype.rsplit_once('+') {
            Some((base, suffix)) if !base.is_empty() && !suffix.is_empty() => {
                (base.to_string(), Some(suffix.to_string()))
            }
            _ => (subtype.to_string(), None),
        };

        Some(Self { top: top.to_string(), subtype, suffix })
    }

    fn suffix_is(&self, expected: &str) -> bool {
        self.suffix.as_deref() == Some(expected)
    }
}

pub fn is_json(content_type: &str) -> bool {
    MediaType::parse(content_type)
        .map(|m| m.subtype == "json" || m.suffix_is("json"))
        .unwrap_or(false)
}

pub fn is_xml(content_type: &str) -> bool {
    MediaType::parse(content_type)
        .map(|m| m.subtype == "xml" || m.suffix_is("xml"))
        .unwrap_or(false)
}

pub fn is_css(content_type: &str) -> bool {
    MediaType::parse(content_type)
        .map(|m| m.top == "text" && m.subtype == "css")
        .unwrap_or(false)
}

pub fn is_javascript(content_type: &str) -> bool {
    MediaType::parse(content_type)
        .map(|m| {
            (m.top == "application" || m.top == "text")
                && (m.subtype == "javascript" || m.subtype == "x-javascript")
        })
        .unwrap_or(false)
}

pub fn is_html(content_type: &str) -> bool {
    MediaType::parse(content_type)
        .map(|m| m.subtype == "html")
        .unwrap_or(false)
}
