//! Encoding-tagged byte strings.
//!
//! A runtime string is a byte sequence plus a declared encoding. Two strings
//! with identical bytes but different encodings are byte-equal yet not
//! interchangeable for encoding-sensitive operations (character length,
//! validity, compatibility).

use crate::error::{RubyError, RubyResult};

/// Character encoding tag carried by every string value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Encoding {
    /// UTF-8, the default source encoding
    Utf8,
    /// 7-bit US-ASCII
    UsAscii,
    /// ASCII-8BIT, a raw byte encoding with no character semantics
    Binary,
}

impl Encoding {
    /// Canonical encoding name.
    pub fn name(self) -> &'static str {
        match self {
            Encoding::Utf8 => "UTF-8",
            Encoding::UsAscii => "US-ASCII",
            Encoding::Binary => "ASCII-8BIT",
        }
    }

    /// True if this encoding can only hold 7-bit bytes.
    pub fn is_ascii_compatible_subset(self) -> bool {
        matches!(self, Encoding::UsAscii)
    }
}

/// A byte string with an explicit encoding tag.
///
/// # Examples
///
/// ```
/// use core_types::{Encoding, RString};
///
/// let s = RString::from_str("héllo");
/// assert_eq!(s.encoding(), Encoding::Utf8);
/// assert_eq!(s.byte_len(), 6);
/// assert_eq!(s.char_len().unwrap(), 5);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RString {
    bytes: Vec<u8>,
    encoding: Encoding,
}

impl RString {
    /// Creates a UTF-8 string from a Rust string slice.
    pub fn from_str(s: &str) -> Self {
        RString {
            bytes: s.as_bytes().to_vec(),
            encoding: Encoding::Utf8,
        }
    }

    /// Creates a string from raw bytes with a declared encoding.
    ///
    /// The bytes are not validated here; [`RString::valid_encoding`] reports
    /// whether they form a well-formed sequence in the declared encoding.
    pub fn from_bytes(bytes: Vec<u8>, encoding: Encoding) -> Self {
        RString { bytes, encoding }
    }

    /// The declared encoding tag.
    pub fn encoding(&self) -> Encoding {
        self.encoding
    }

    /// The underlying bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Length in bytes, independent of encoding.
    pub fn byte_len(&self) -> usize {
        self.bytes.len()
    }

    /// Byte equality, ignoring the encoding tags.
    pub fn byte_eq(&self, other: &RString) -> bool {
        self.bytes == other.bytes
    }

    /// True if every byte is 7-bit.
    pub fn is_ascii_only(&self) -> bool {
        self.bytes.iter().all(|b| b.is_ascii())
    }

    /// Whether the bytes form a well-formed sequence in the declared encoding.
    pub fn valid_encoding(&self) -> bool {
        match self.encoding {
            Encoding::Utf8 => std::str::from_utf8(&self.bytes).is_ok(),
            Encoding::UsAscii => self.is_ascii_only(),
            Encoding::Binary => true,
        }
    }

    /// Character length under the declared encoding.
    ///
    /// Binary strings measure in bytes. For UTF-8 and US-ASCII the bytes must
    /// be well-formed or a `TypeMismatch`-class error is returned.
    pub fn char_len(&self) -> RubyResult<usize> {
        match self.encoding {
            Encoding::Binary => Ok(self.bytes.len()),
            Encoding::UsAscii => {
                if self.is_ascii_only() {
                    Ok(self.bytes.len())
                } else {
                    Err(RubyError::type_mismatch("invalid byte sequence in US-ASCII"))
                }
            }
            Encoding::Utf8 => std::str::from_utf8(&self.bytes)
                .map(|s| s.chars().count())
                .map_err(|_| RubyError::type_mismatch("invalid byte sequence in UTF-8")),
        }
    }

    /// Computes the compatible encoding for concatenation, if any.
    ///
    /// Identical encodings are trivially compatible. Otherwise two strings
    /// are compatible when both are ASCII-only, resolving to the wider tag.
    pub fn compatible_encoding(&self, other: &RString) -> Option<Encoding> {
        if self.encoding == other.encoding {
            return Some(self.encoding);
        }
        if self.is_ascii_only() && other.is_ascii_only() {
            // Prefer the non-ASCII-subset tag so no information is lost.
            if self.encoding.is_ascii_compatible_subset() {
                Some(other.encoding)
            } else {
                Some(self.encoding)
            }
        } else {
            None
        }
    }
}
