//! Text decoding helpers shared by the document parsers.

use encoding_rs::{Encoding, UTF_8};
use log::{debug, warn};

/// Resolves an encoding label, normalizing GBK/GB2312 to GB18030.
///
/// Returns `None` for labels `encoding_rs` does not know.
pub fn parse_encoding(label: &str) -> Option<&'static Encoding> {
    let label = label.trim();
    let label = if label.eq_ignore_ascii_case("GBK") || label.eq_ignore_ascii_case("GB2312") {
        "GB18030"
    } else {
        label
    };
    Encoding::for_label(label.as_bytes())
}

/// Decodes raw document bytes to text.
///
/// Priority for determining the encoding (highest → lowest):
/// 1. A byte order mark (UTF-8, UTF-16LE, UTF-16BE), which is stripped
/// 2. `declared`, the label named inside the document itself (e.g. an XML declaration)
/// 3. UTF-8
///
/// Malformed sequences are replaced with U+FFFD and reported at `warn` level.
pub fn decode_document(bytes: &[u8], declared: Option<&str>) -> String {
    let fallback = match declared {
        Some(label) => parse_encoding(label).unwrap_or_else(|| {
            warn!("Unknown document encoding '{}', decoding as UTF-8", label);
            UTF_8
        }),
        None => UTF_8,
    };

    // `decode` sniffs the BOM first and only uses `fallback` without one.
    let (text, used, had_errors) = fallback.decode(bytes);
    debug!("Decoded {} bytes as {}", bytes.len(), used.name());
    if had_errors {
        warn!(
            "Document contains malformed {} sequences; they were replaced with U+FFFD",
            used.name()
        );
    }

    text.into_owned()
}
