//! Track filename derivation
//!
//! Track names are arbitrary UTF-8, so they are escaped before they become
//! part of a filename. Escaping works on the UTF-8 *bytes* of the name: each
//! byte is looked at as the code point of the same value (U+0000..=U+00FF).
//! `.`, `_`, `/` and alphanumeric characters pass through, everything else
//! becomes `-XX` (uppercase hex of the byte).
//!
//! Because of the byte-wise view, a multi-byte character is split: `é`
//! (`C3 A9`) becomes `Ã-A9`, since U+00C3 is a letter and U+00A9 is not.
//! Existing track files are named this way, so the behaviour is kept as is.
//!
//! `-` is never passed through, which makes the scheme reversible.

use std::fmt::Write;

use crate::TRACK_EXT;

fn is_safe(ch: char) -> bool {
    matches!(ch, '.' | '_' | '/') || ch.is_alphanumeric()
}

/// Escape a track name for use in a filename
pub fn escape_track_name(name: &str) -> String {
    let mut escaped = String::with_capacity(name.len());
    for &byte in name.as_bytes() {
        let ch = char::from(byte);
        if is_safe(ch) {
            escaped.push(ch);
        } else {
            // Writing to a String cannot fail
            let _ = write!(escaped, "-{byte:02X}");
        }
    }
    escaped
}

/// Relative path of the file holding track `name`: `<base>_<escaped>.track`
pub fn track_path(base: &str, name: &str) -> String {
    format!("{}_{}.{}", base, escape_track_name(name), TRACK_EXT)
}

/// Reverse [`escape_track_name`]
///
/// Returns `None` if `escaped` could not have been produced by the escaper.
pub fn unescape_track_name(escaped: &str) -> Option<String> {
    let mut bytes = Vec::with_capacity(escaped.len());
    let mut chars = escaped.chars();

    while let Some(ch) = chars.next() {
        if ch == '-' {
            let hi = chars.next()?;
            let lo = chars.next()?;
            if !is_upper_hex(hi) || !is_upper_hex(lo) {
                return None;
            }
            let byte = ((hi.to_digit(16)? << 4) | lo.to_digit(16)?) as u8;
            // A byte that would have passed through is never escaped
            if is_safe(char::from(byte)) {
                return None;
            }
            bytes.push(byte);
        } else {
            let byte = u8::try_from(u32::from(ch)).ok()?;
            if !is_safe(ch) {
                return None;
            }
            bytes.push(byte);
        }
    }

    String::from_utf8(bytes).ok()
}

fn is_upper_hex(ch: char) -> bool {
    ch.is_ascii_digit() || ('A'..='F').contains(&ch)
}

/// Recover the track name from a track filename produced with `base`
///
/// Accepts a bare file name (`sync_vol.track`) or a path ending in one.
pub fn track_name_from_path(base: &str, path: &str) -> Option<String> {
    let stem = path.strip_suffix(TRACK_EXT)?.strip_suffix('.')?;
    let prefix = format!("{base}_");

    let escaped = match stem.strip_prefix(&prefix) {
        Some(escaped) => escaped,
        // Base prefixes like `data/sync` only match the tail of a longer path
        None => {
            let at = stem.rfind(&prefix)?;
            if at > 0 && !stem[..at].ends_with('/') {
                return None;
            }
            &stem[at + prefix.len()..]
        }
    };

    unescape_track_name(escaped)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_name() {
        assert_eq!(track_path("sync", "vol"), "sync_vol.track");
    }

    #[test]
    fn test_space_is_escaped() {
        assert_eq!(track_path("sync", "my track"), "sync_my-20track.track");
    }

    #[test]
    fn test_safe_string_unchanged() {
        assert_eq!(escape_track_name("abc_123.track"), "abc_123.track");
        assert_eq!(escape_track_name("group/sub.x"), "group/sub.x");
    }

    #[test]
    fn test_punctuation() {
        assert_eq!(escape_track_name("cam:pos-x"), "cam-3Apos-2Dx");
        assert_eq!(escape_track_name("a#b"), "a-23b");
        assert_eq!(escape_track_name("\t"), "-09");
    }

    #[test]
    fn test_multibyte_escaped_bytewise() {
        // U+00E9 encodes as C3 A9; C3 reads as 'Ã' (alphabetic), A9 as '©' (not)
        assert_eq!(escape_track_name("é"), "Ã-A9");
        // E2 82 AC: 'â' passes, 0x82 and 0xAC are not alphanumeric
        assert_eq!(escape_track_name("€"), "â-82-AC");
    }

    #[test]
    fn test_install_base() {
        assert_eq!(
            track_path(crate::INSTALL_BASE, "fade"),
            "data/sync_fade.track"
        );
    }

    #[test]
    fn test_unescape() {
        assert_eq!(unescape_track_name("my-20track").as_deref(), Some("my track"));
        assert_eq!(unescape_track_name("Ã-A9").as_deref(), Some("é"));
        assert_eq!(unescape_track_name("").as_deref(), Some(""));
    }

    #[test]
    fn test_unescape_rejects_foreign_input() {
        // Lowercase hex, escaped safe byte, raw unsafe char, dangling escape
        assert!(unescape_track_name("a-2a").is_none());
        assert!(unescape_track_name("-41").is_none());
        assert!(unescape_track_name("a b").is_none());
        assert!(unescape_track_name("ab-2").is_none());
        assert!(unescape_track_name("\u{0100}").is_none());
    }

    #[test]
    fn test_name_from_path() {
        assert_eq!(
            track_name_from_path("sync", "sync_my-20track.track").as_deref(),
            Some("my track")
        );
        assert_eq!(
            track_name_from_path("data/sync", "/opt/demo/data/sync_fade.track").as_deref(),
            Some("fade")
        );
        assert_eq!(
            track_name_from_path("sync", "build/sync_vol.track").as_deref(),
            Some("vol")
        );
        assert!(track_name_from_path("sync", "sync_vol.bin").is_none());
        assert!(track_name_from_path("sync", "async_vol.track").is_none());
    }
}
