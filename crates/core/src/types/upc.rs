//! Comic barcode UPC type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`Upc`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum UpcError {
    /// The input is empty (or whitespace only).
    #[error("UPC is required")]
    Missing,
    /// The input contains characters other than ASCII digits.
    #[error("UPC must contain only digits")]
    InvalidCharacters,
    /// The input does not have exactly 17 digits.
    #[error("UPC must be 17 digits")]
    WrongLength,
}

/// A comic-book UPC: the 17-digit identifier printed on a comic's barcode.
///
/// The first 12 digits are the standard UPC-A code; the 5-digit extension
/// encodes the issue number plus, by publisher convention, the variant
/// (16th digit) and printing (17th digit).
///
/// ## Constraints
///
/// - Exactly 17 ASCII digits after whitespace stripping
/// - Whitespace anywhere in the input is ignored (users paste UPCs with
///   spaces as visual grouping, e.g. "75960 62020 03001 11")
/// - Leading zeros are preserved
///
/// ## Examples
///
/// ```
/// use longbox_core::Upc;
///
/// let upc = Upc::parse("75960 62020 03001 21").unwrap();
/// assert_eq!(upc.as_str(), "75960620200300121");
/// assert_eq!(upc.variant_number(), '2');
/// assert_eq!(upc.printing(), '1');
///
/// assert!(Upc::parse("").is_err());                   // missing
/// assert!(Upc::parse("1234567890123456A").is_err());  // non-digit
/// assert!(Upc::parse("12345").is_err());              // wrong length
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct Upc(String);

impl Upc {
    /// Number of digits in a comic UPC.
    pub const LENGTH: usize = 17;

    /// Parse a `Upc` from a string, stripping whitespace first.
    ///
    /// # Errors
    ///
    /// Returns an error if the input, after whitespace stripping:
    /// - Is empty
    /// - Contains any non-digit character
    /// - Does not have exactly 17 digits
    pub fn parse(raw: &str) -> Result<Self, UpcError> {
        let sanitized: String = raw.chars().filter(|c| !c.is_whitespace()).collect();

        if sanitized.is_empty() {
            return Err(UpcError::Missing);
        }

        if !sanitized.bytes().all(|b| b.is_ascii_digit()) {
            return Err(UpcError::InvalidCharacters);
        }

        if sanitized.len() != Self::LENGTH {
            return Err(UpcError::WrongLength);
        }

        Ok(Self(sanitized))
    }

    /// Returns the UPC as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The variant number encoded in the 16th digit.
    #[must_use]
    pub fn variant_number(&self) -> char {
        self.digit_at(15)
    }

    /// The printing encoded in the 17th (last) digit.
    #[must_use]
    pub fn printing(&self) -> char {
        self.digit_at(16)
    }

    fn digit_at(&self, index: usize) -> char {
        // Parsing guarantees 17 ASCII digits
        self.0.as_bytes().get(index).copied().unwrap_or(b'0') as char
    }
}

impl fmt::Display for Upc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for Upc {
    type Err = UpcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for Upc {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

// SQLx support (with postgres feature)
#[cfg(feature = "postgres")]
impl sqlx::Type<sqlx::Postgres> for Upc {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <String as sqlx::Type<sqlx::Postgres>>::type_info()
    }

    fn compatible(ty: &sqlx::postgres::PgTypeInfo) -> bool {
        <String as sqlx::Type<sqlx::Postgres>>::compatible(ty)
    }
}

#[cfg(feature = "postgres")]
impl<'r> sqlx::Decode<'r, sqlx::Postgres> for Upc {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let s = <String as sqlx::Decode<sqlx::Postgres>>::decode(value)?;
        // Database values are assumed valid
        Ok(Self(s))
    }
}

#[cfg(feature = "postgres")]
impl sqlx::Encode<'_, sqlx::Postgres> for Upc {
    fn encode_by_ref(
        &self,
        buf: &mut sqlx::postgres::PgArgumentBuffer,
    ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
        <String as sqlx::Encode<sqlx::Postgres>>::encode_by_ref(&self.0, buf)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid() {
        assert!(Upc::parse("12345678901234567").is_ok());
    }

    #[test]
    fn test_parse_preserves_leading_zeros() {
        let upc = Upc::parse("00000000000000001").unwrap();
        assert_eq!(upc.as_str(), "00000000000000001");
    }

    #[test]
    fn test_parse_strips_whitespace() {
        let upc = Upc::parse("12345 67890 123456 7").unwrap();
        assert_eq!(upc.as_str(), "12345678901234567");

        let upc = Upc::parse("  12345678901234567\n").unwrap();
        assert_eq!(upc.as_str(), "12345678901234567");
    }

    #[test]
    fn test_parse_empty() {
        assert_eq!(Upc::parse(""), Err(UpcError::Missing));
        assert_eq!(Upc::parse("   "), Err(UpcError::Missing));
    }

    #[test]
    fn test_parse_letters() {
        assert_eq!(
            Upc::parse("1234567890123456A"),
            Err(UpcError::InvalidCharacters)
        );
    }

    #[test]
    fn test_parse_special_characters() {
        assert_eq!(
            Upc::parse("1234567890123456-"),
            Err(UpcError::InvalidCharacters)
        );
    }

    #[test]
    fn test_parse_too_short() {
        assert_eq!(Upc::parse("1234567890"), Err(UpcError::WrongLength));
    }

    #[test]
    fn test_parse_too_long() {
        assert_eq!(Upc::parse("123456789012345678"), Err(UpcError::WrongLength));
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(Upc::parse("").unwrap_err().to_string(), "UPC is required");
        assert_eq!(
            Upc::parse("abc").unwrap_err().to_string(),
            "UPC must contain only digits"
        );
        assert_eq!(
            Upc::parse("123").unwrap_err().to_string(),
            "UPC must be 17 digits"
        );
    }

    #[test]
    fn test_variant_and_printing_digits() {
        let upc = Upc::parse("75960620200300121").unwrap();
        assert_eq!(upc.variant_number(), '2');
        assert_eq!(upc.printing(), '1');

        let upc = Upc::parse("75960620200300111").unwrap();
        assert_eq!(upc.variant_number(), '1');
        assert_eq!(upc.printing(), '1');
    }

    #[test]
    fn test_display() {
        let upc = Upc::parse("75960620200300111").unwrap();
        assert_eq!(format!("{upc}"), "75960620200300111");
    }

    #[test]
    fn test_serde_roundtrip() {
        let upc = Upc::parse("75960620200300111").unwrap();
        let json = serde_json::to_string(&upc).unwrap();
        assert_eq!(json, "\"75960620200300111\"");

        let parsed: Upc = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, upc);
    }

    #[test]
    fn test_from_str() {
        let upc: Upc = "75960620200300111".parse().unwrap();
        assert_eq!(upc.as_str(), "75960620200300111");
    }
}
