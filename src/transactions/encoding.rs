//! The text encodings a report may be uploaded in.

use std::{fmt, str::FromStr};

/// The character encoding used to decode uploaded reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextEncoding {
    /// UTF-8, with or without a byte order mark.
    Utf8,
    /// Latin-1, identical to ISO-8859-1.
    Latin1,
    /// ISO-8859-1, the encoding preselected in the upload form.
    #[default]
    Iso8859_1,
}

/// Every encoding in the order it is offered to the user.
pub const ALL_ENCODINGS: [TextEncoding; 3] = [
    TextEncoding::Utf8,
    TextEncoding::Latin1,
    TextEncoding::Iso8859_1,
];

impl TextEncoding {
    /// The label used in forms and error messages.
    pub fn label(self) -> &'static str {
        match self {
            Self::Utf8 => "utf-8",
            Self::Latin1 => "latin1",
            Self::Iso8859_1 => "iso-8859-1",
        }
    }

    /// Decode `bytes` into a string.
    ///
    /// Latin-1 and ISO-8859-1 are the same mapping: every byte is the code
    /// point with the same value, so decoding never fails.
    ///
    /// Returns `None` if `bytes` is not valid UTF-8 and `self` is [TextEncoding::Utf8].
    pub fn decode(self, bytes: &[u8]) -> Option<String> {
        match self {
            Self::Utf8 => {
                let text = std::str::from_utf8(bytes).ok()?;
                Some(text.strip_prefix('\u{feff}').unwrap_or(text).to_owned())
            }
            Self::Latin1 | Self::Iso8859_1 => Some(bytes.iter().map(|&byte| byte as char).collect()),
        }
    }
}

impl fmt::Display for TextEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The label did not name a supported encoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownEncoding(pub String);

impl FromStr for TextEncoding {
    type Err = UnknownEncoding;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "utf-8" | "utf8" => Ok(Self::Utf8),
            "latin1" | "latin-1" => Ok(Self::Latin1),
            "iso-8859-1" | "iso8859-1" => Ok(Self::Iso8859_1),
            _ => Err(UnknownEncoding(s.to_owned())),
        }
    }
}
