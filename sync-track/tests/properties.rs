//! Property tests for track encoding and filename escaping

use proptest::prelude::*;
use sync_track::{
    decode_track, encode_track, escape_track_name, track_path, unescape_track_name, Keyframe,
};

fn keyframe() -> impl Strategy<Value = Keyframe> {
    (any::<u32>(), any::<f32>(), any::<i8>())
        .prop_map(|(row, value, interpolation)| Keyframe::new(row, value, interpolation))
}

proptest! {
    #[test]
    fn prop_encoded_size(keys in proptest::collection::vec(keyframe(), 0..200)) {
        let data = encode_track("t", &keys).unwrap();
        prop_assert_eq!(data.len(), 4 + 9 * keys.len());
    }

    #[test]
    fn prop_decode_reproduces_keyframes(keys in proptest::collection::vec(keyframe(), 0..64)) {
        let data = encode_track("t", &keys).unwrap();
        let decoded = decode_track(&data).unwrap();

        prop_assert_eq!(decoded.len(), keys.len());
        for (got, want) in decoded.iter().zip(&keys) {
            // Bitwise so NaN payloads count too
            prop_assert_eq!(got.row, want.row);
            prop_assert_eq!(got.value.to_bits(), want.value.to_bits());
            prop_assert_eq!(got.interpolation, want.interpolation);
        }
    }

    #[test]
    fn prop_escape_is_reversible(name in any::<String>()) {
        let escaped = escape_track_name(&name);
        prop_assert_eq!(unescape_track_name(&escaped), Some(name));
    }

    #[test]
    fn prop_distinct_names_distinct_paths(a in any::<String>(), b in any::<String>()) {
        prop_assume!(a != b);
        prop_assert_ne!(track_path("sync", &a), track_path("sync", &b));
    }

    #[test]
    fn prop_safe_names_unchanged(name in "[A-Za-z0-9._/]{0,32}") {
        prop_assert_eq!(escape_track_name(&name), name);
    }
}
