use std::fmt;

use serde::Serialize;

/// Media types the sniffer can recognise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(into = "&'static str")]
pub enum MimeType {
    Pdf,
    Png,
    Jpeg,
    Gif,
    Webp,
    Mp4,
    Webm,
    Avi,
    Html,
    Json,
    PlainText,
    OctetStream,
}

impl MimeType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MimeType::Pdf => "application/pdf",
            MimeType::Png => "image/png",
            MimeType::Jpeg => "image/jpeg",
            MimeType::Gif => "image/gif",
            MimeType::Webp => "image/webp",
            MimeType::Mp4 => "video/mp4",
            MimeType::Webm => "video/webm",
            MimeType::Avi => "video/avi",
            MimeType::Html => "text/html",
            MimeType::Json => "application/json",
            MimeType::PlainText => "text/plain",
            MimeType::OctetStream => "application/octet-stream",
        }
    }

    /// Top-level type, e.g. `image` for `image/png`.
    pub fn top_level(&self) -> &'static str {
        let s = self.as_str();
        s.split_once('/').map_or(s, |(top, _)| top)
    }

    /// Whether a sniffed result of this type may replace a generic server type.
    pub fn overrides_generic(&self) -> bool { matches!(self.top_level(), "image" | "text" | "video") }
}

impl From<MimeType> for &'static str {
    fn from(mime: MimeType) -> Self { mime.as_str() }
}

impl fmt::Display for MimeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) }
}

/// Pick the media type reported to callers.
///
/// The server's type passes through unchanged unless it is missing, or it is
/// `application/octet-stream` and sniffing found an image, text or video type.
pub fn select_mime_type(server: Option<&str>, sniffed: MimeType) -> String {
    let Some(server) = server.map(str::trim).filter(|s| !s.is_empty()) else {
        return sniffed.as_str().to_string();
    };

    let essence = server.split(';').next().unwrap_or_default().trim();
    if essence.eq_ignore_ascii_case(MimeType::OctetStream.as_str()) && sniffed.overrides_generic() {
        return sniffed.as_str().to_string();
    }

    server.to_string()
}
