//! File naming and payload decoding helpers.

use std::path::Path;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use rand::Rng;

/// Extension every stored model carries.
pub const MODEL_EXTENSION: &str = ".h5";

/// Extension every stored image carries.
pub const IMAGE_EXTENSION: &str = ".png";

const HEX: &[u8; 16] = b"0123456789abcdef";

/// Random lowercase hex token of `len` characters.
pub fn random_token(len: usize) -> String {
    let mut rng = rand::thread_rng();
    (0..len)
        .map(|_| HEX[rng.gen_range(0..HEX.len())] as char)
        .collect()
}

/// Drop a `scheme,` data-URL prefix, up to the first comma.
pub fn strip_data_url_prefix(payload: &str) -> &str {
    match payload.split_once(',') {
        Some((_, data)) => data,
        None => payload,
    }
}

/// Decode a base64 payload, ignoring any data-URL prefix and whitespace.
pub fn decode_payload(payload: &str) -> Result<Vec<u8>, base64::DecodeError> {
    let data = strip_data_url_prefix(payload);
    if data.bytes().any(|b| b.is_ascii_whitespace()) {
        let compact: String = data.chars().filter(|c| !c.is_ascii_whitespace()).collect();
        STANDARD.decode(compact)
    } else {
        STANDARD.decode(data)
    }
}

/// `<project><label><index>_<suffix>.png`, with a 1-based index.
pub fn image_file_name(project: &str, label: &str, index: usize, suffix: &str) -> String {
    format!("{project}{label}{index}_{suffix}{IMAGE_EXTENSION}")
}

/// `<project>model<suffix>.h5`.
pub fn model_file_name(project: &str, suffix: &str) -> String {
    format!("{project}model{suffix}{MODEL_EXTENSION}")
}

/// Whether `original` already carries the model extension (case-insensitive).
pub fn has_model_extension(original: &str) -> bool {
    Path::new(original)
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case(&MODEL_EXTENSION[1..]))
}
