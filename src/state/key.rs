//! Path to state key mapping
//!
//! A key is the path itself when the path is valid UTF-8. Any other path is
//! stored as a NUL marker followed by its raw bytes, with bytes outside
//! printable ASCII (and the backslash) written as `\xNN`. No real path
//! contains NUL, so the two forms never collide.

use std::path::{Path, PathBuf};

const RAW_MARKER: char = '\0';

/// State key for `path`.
pub fn path_to_key(path: &Path) -> String {
    match path.to_str() {
        Some(key) => key.to_owned(),
        None => encode_raw(path),
    }
}

/// Path a state key refers to. Inverse of [`path_to_key`].
pub fn key_to_path(key: &str) -> PathBuf {
    match key.strip_prefix(RAW_MARKER) {
        Some(raw) => decode_raw(raw),
        None => PathBuf::from(key),
    }
}

#[cfg(unix)]
fn encode_raw(path: &Path) -> String {
    use std::fmt::Write;
    use std::os::unix::ffi::OsStrExt;

    let mut key = String::from(RAW_MARKER);
    for &byte in path.as_os_str().as_bytes() {
        if (byte.is_ascii_graphic() && byte != b'\\') || byte == b' ' {
            key.push(char::from(byte));
        } else {
            let _ = write!(key, "\\x{byte:02x}");
        }
    }
    key
}

// Windows paths that are not UTF-8 hold unpaired surrogates; those are
// recorded lossily and will not match on the next run.
#[cfg(not(unix))]
fn encode_raw(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

#[cfg(unix)]
fn decode_raw(raw: &str) -> PathBuf {
    use std::ffi::OsString;
    use std::os::unix::ffi::OsStringExt;

    let bytes = raw.as_bytes();
    let mut decoded = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'\\' && bytes.get(i + 1) == Some(&b'x') {
            let escaped = raw
                .get(i + 2..i + 4)
                .and_then(|hex| u8::from_str_radix(hex, 16).ok());
            if let Some(byte) = escaped {
                decoded.push(byte);
                i += 4;
                continue;
            }
        }
        decoded.push(bytes[i]);
        i += 1;
    }
    PathBuf::from(OsString::from_vec(decoded))
}

#[cfg(not(unix))]
fn decode_raw(raw: &str) -> PathBuf {
    PathBuf::from(raw)
}
