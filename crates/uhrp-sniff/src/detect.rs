use crate::MimeType;

/// Bytes examined by the textual heuristics.
pub const SAMPLE_LEN: usize = 100;

/// Share of printable bytes, in percent, above which a sample counts as text.
const PRINTABLE_THRESHOLD: usize = 70;

/// Classify `data` by its byte signature.
///
/// Binary signatures are checked before textual heuristics and the first
/// match wins.
pub fn detect_type(data: &[u8]) -> MimeType {
    if let Some(mime) = detect_signature(data) {
        return mime;
    }

    let sample = &data[..data.len().min(SAMPLE_LEN)];
    let text = String::from_utf8_lossy(sample).to_ascii_lowercase();

    if text.contains("<html") || text.contains("<!doctype html") {
        MimeType::Html
    } else if text.trim_start().starts_with(['{', '[']) {
        MimeType::Json
    } else if is_mostly_printable(sample) {
        MimeType::PlainText
    } else {
        MimeType::OctetStream
    }
}

fn detect_signature(data: &[u8]) -> Option<MimeType> {
    match data {
        [0x25, 0x50, 0x44, 0x46, ..] => Some(MimeType::Pdf),
        [0x89, 0x50, 0x4E, 0x47, ..] => Some(MimeType::Png),
        [0xFF, 0xD8, 0xFF, ..] => Some(MimeType::Jpeg),
        [0x47, 0x49, 0x46, ..] => Some(MimeType::Gif),
        [0x52, 0x49, 0x46, 0x46, _, _, _, _, 0x57, 0x45, 0x42, 0x50, ..] => Some(MimeType::Webp),
        [_, _, _, _, 0x66, 0x74, 0x79, 0x70, ..] => Some(MimeType::Mp4),
        [0x1A, 0x45, 0xDF, 0xA3, ..] => Some(MimeType::Webm),
        [0x52, 0x49, 0x46, 0x46, _, _, _, _, 0x41, 0x56, 0x49, 0x20, ..] => Some(MimeType::Avi),
        _ => None,
    }
}

fn is_mostly_printable(sample: &[u8]) -> bool {
    if sample.is_empty() {
        return false;
    }
    let printable = sample
        .iter()
        .filter(|&&b| matches!(b, 0x20..=0x7E | b'\t' | b'\n' | b'\r'))
        .count();
    printable * 100 >= sample.len() * PRINTABLE_THRESHOLD
}

#[cfg(test)]
mod tests {
    use super::*;

    fn riff(tag: &[u8; 4]) -> Vec<u8> {
        let mut data = b"RIFF\x24\x00\x00\x00".to_vec();
        data.extend_from_slice(tag);
        data.extend_from_slice(&[0u8; 16]);
        data
    }

    #[test]
    fn binary_signatures() {
        assert_eq!(detect_type(b"%PDF-1.7\n"), MimeType::Pdf);
        assert_eq!(detect_type(&[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A]), MimeType::Png);
        assert_eq!(detect_type(&[0xFF, 0xD8, 0xFF, 0xE0]), MimeType::Jpeg);
        assert_eq!(detect_type(b"GIF89a"), MimeType::Gif);
        assert_eq!(detect_type(&riff(b"WEBP")), MimeType::Webp);
        assert_eq!(detect_type(b"\x00\x00\x00\x18ftypmp42"), MimeType::Mp4);
        assert_eq!(detect_type(&[0x1A, 0x45, 0xDF, 0xA3, 0x9F]), MimeType::Webm);
        assert_eq!(detect_type(&riff(b"AVI ")), MimeType::Avi);
    }

    #[test]
    fn short_buffers_do_not_match_longer_signatures() {
        assert_eq!(detect_type(&[0xFF, 0xD8]), MimeType::OctetStream);
        assert_eq!(detect_type(b"RIFF\x00\x00\x00\x00WEB"), MimeType::OctetStream);
        assert_eq!(detect_type(b"GI"), MimeType::PlainText);
    }

    #[test]
    fn riff_with_unknown_form_is_not_media() {
        assert_ne!(detect_type(&riff(b"WAVE")), MimeType::Webp);
        assert_ne!(detect_type(&riff(b"WAVE")), MimeType::Avi);
    }

    #[test]
    fn gif_signature_wins_over_text() {
        // "GIF" is printable, but the signature check runs first.
        assert_eq!(detect_type(b"GIF is a plain sentence"), MimeType::Gif);
    }

    #[test]
    fn html_markers_case_insensitive() {
        assert_eq!(detect_type(b"<!DOCTYPE HTML><p>hi</p>"), MimeType::Html);
        assert_eq!(detect_type(b"\n  <HTML lang=\"en\">"), MimeType::Html);
        assert_eq!(detect_type(b"{\"a\": \"<html>\"}"), MimeType::Html);
    }

    #[test]
    fn html_marker_beyond_sample_is_ignored() {
        let mut data = vec![b'a'; SAMPLE_LEN];
        data.extend_from_slice(b"<html>");
        assert_eq!(detect_type(&data), MimeType::PlainText);
    }

    #[test]
    fn json_after_whitespace() {
        assert_eq!(detect_type(b"  \n{\"key\": 1}"), MimeType::Json);
        assert_eq!(detect_type(b"[1, 2, 3]"), MimeType::Json);
    }

    #[test]
    fn printable_ratio_threshold() {
        let mut data = vec![b'x'; 70];
        data.extend_from_slice(&[0u8; 30]);
        assert_eq!(detect_type(&data), MimeType::PlainText);

        let mut data = vec![b'x'; 69];
        data.extend_from_slice(&[0u8; 31]);
        assert_eq!(detect_type(&data), MimeType::OctetStream);
    }

    #[test]
    fn whitespace_controls_count_as_printable() {
        assert_eq!(detect_type(b"line one\r\n\tline two\n"), MimeType::PlainText);
    }

    #[test]
    fn empty_and_binary_fall_back_to_octet_stream() {
        assert_eq!(detect_type(&[]), MimeType::OctetStream);
        assert_eq!(detect_type(&[0x00, 0x01, 0x02, 0x03, 0xFE]), MimeType::OctetStream);
    }
}
