use chrono::FixedOffset;

use crate::error::ResponseFormatError;

/// Line ending style for the formatted output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EolStyle {
    /// Windows-style line endings (`\r\n`).
    Crlf,
    /// Unix-style line endings (`\n`).
    Lf,
}

impl EolStyle {
    /// The host platform's convention: `Crlf` on Windows, `Lf` elsewhere.
    pub fn native() -> Self {
        if cfg!(windows) {
            EolStyle::Crlf
        } else {
            EolStyle::Lf
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            EolStyle::Crlf => "\r\n",
            EolStyle::Lf => "\n",
        }
    }
}

/// Configuration for the JSON prettifier.
///
/// # Example
///
/// ```rust
/// use resfmt::{FormatOptions, EolStyle};
///
/// let mut options = FormatOptions::default();
/// options.indent_spaces = 4;
/// options.eol_style = EolStyle::Lf;
/// ```
#[derive(Debug, Clone)]
pub struct FormatOptions {
    /// Number of spaces per indentation level. Default: 2.
    pub indent_spaces: usize,

    /// Line ending style for the output. Default: the platform convention
    /// ([`EolStyle::native()`]).
    pub eol_style: EolStyle,

    /// UTC offset used when rewriting `/Date(ms)/` tokens. `None` renders
    /// timestamps in the local time zone. Default: `None`.
    pub utc_offset: Option<FixedOffset>,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            indent_spaces: 2,
            eol_style: EolStyle::native(),
            utc_offset: None,
        }
    }
}

/// Parses a user-configured UTC offset string such as `"+08:00"`, `"-0530"`
/// or `"Z"` into a [`FixedOffset`].
///
/// This is how an offset supplied by the surrounding environment becomes a
/// [`FormatOptions::utc_offset`] value; an empty string is the conventional
/// "use local time" marker and is rejected here so callers keep `None`.
pub fn parse_utc_offset(raw: &str) -> Result<FixedOffset, ResponseFormatError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(ResponseFormatError::new("empty UTC offset"));
    }
    if raw == "Z" || raw == "z" {
        return FixedOffset::east_opt(0)
            .ok_or_else(|| ResponseFormatError::new("invalid UTC offset"));
    }

    let (sign, rest) = if let Some(rest) = raw.strip_prefix('+') {
        (1, rest)
    } else if let Some(rest) = raw.strip_prefix('-') {
        (-1, rest)
    } else {
        (1, raw)
    };

    let bad = || ResponseFormatError::new(format!("unrecognized UTC offset '{raw}'"));
    let digits: String = rest.chars().filter(|c| *c != ':').collect();
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return Err(bad());
    }
    let (hours, minutes) = match digits.len() {
        1 | 2 => (digits.parse::<i32>().map_err(|_| bad())?, 0),
        4 => (
            digits[..2].parse::<i32>().map_err(|_| bad())?,
            digits[2..].parse::<i32>().map_err(|_| bad())?,
        ),
        _ => return Err(bad()),
    };
    if hours > 23 || minutes > 59 {
        return Err(ResponseFormatError::new(format!(
            "UTC offset '{raw}' out of range"
        )));
    }

    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
        .ok_or_else(|| ResponseFormatError::new(format!("UTC offset '{raw}' out of range")))
}
