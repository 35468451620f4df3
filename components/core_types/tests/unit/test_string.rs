//! Unit tests for encoding-tagged strings.

use core_types::{Encoding, RString};

mod encoding_tests {
    use super::*;

    #[test]
    fn test_canonical_names() {
        assert_eq!(Encoding::Utf8.name(), "UTF-8");
        assert_eq!(Encoding::UsAscii.name(), "US-ASCII");
        assert_eq!(Encoding::Binary.name(), "ASCII-8BIT");
    }
}

mod byte_semantics_tests {
    use super::*;

    #[test]
    fn test_byte_equality_ignores_the_encoding_tag() {
        let utf8 = RString::from_bytes(b"abc".to_vec(), Encoding::Utf8);
        let binary = RString::from_bytes(b"abc".to_vec(), Encoding::Binary);
        assert!(utf8.byte_eq(&binary));
    }

    #[test]
    fn test_char_len_is_encoding_sensitive() {
        let s = RString::from_str("héllo");
        assert_eq!(s.byte_len(), 6);
        assert_eq!(s.char_len().unwrap(), 5);

        let raw = RString::from_bytes(s.as_bytes().to_vec(), Encoding::Binary);
        // Binary has no character semantics; every byte is a "character".
        assert_eq!(raw.char_len().unwrap(), 6);
    }

    #[test]
    fn test_invalid_utf8_fails_char_len() {
        let bad = RString::from_bytes(vec![0xff, 0xfe], Encoding::Utf8);
        assert!(!bad.valid_encoding());
        assert!(bad.char_len().is_err());
    }

    #[test]
    fn test_non_ascii_bytes_are_invalid_us_ascii() {
        let s = RString::from_bytes("é".as_bytes().to_vec(), Encoding::UsAscii);
        assert!(!s.valid_encoding());
    }
}

mod compatibility_tests {
    use super::*;

    #[test]
    fn test_ascii_only_strings_are_compatible_across_encodings() {
        let a = RString::from_bytes(b"plain".to_vec(), Encoding::Utf8);
        let b = RString::from_bytes(b"ascii".to_vec(), Encoding::UsAscii);
        assert!(a.compatible_encoding(&b).is_some());
    }
}
