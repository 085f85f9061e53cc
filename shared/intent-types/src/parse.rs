//! Field parsers for user-supplied intent values.
//!
//! Every parser takes the name of the field it is reading so that errors point at the offending
//! input.

use core::str::FromStr;

use alloy_primitives::{Address, Bytes, U256};
use serde_json::Value;

/// Malformed intent input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IntentError {
    #[error("`{field}`: invalid address `{value}`")]
    InvalidAddress { field: String, value: String },
    #[error("`{field}`: address `{value}` has an invalid EIP-55 checksum")]
    BadChecksum { field: String, value: String },
    #[error("`{field}`: amount must not be negative, got `{value}`")]
    NegativeAmount { field: String, value: String },
    #[error("`{field}`: `{value}` is not an unsigned integer")]
    InvalidNumber { field: String, value: String },
    #[error("`{field}`: `{value}` does not fit in 256 bits")]
    OutOfRange { field: String, value: String },
    #[error("`{field}`: invalid hex bytes `{value}`")]
    InvalidBytes { field: String, value: String },
}

/// Parse a `0x`-prefixed hex address. Mixed-case input must carry a valid EIP-55 checksum.
pub fn parse_address(field: &str, s: &str) -> Result<Address, IntentError> {
    let invalid = || IntentError::InvalidAddress {
        field: field.to_string(),
        value: s.to_string(),
    };

    let digits = s.strip_prefix("0x").ok_or_else(invalid)?;
    if digits.len() != 40 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(invalid());
    }
    let address = Address::from_str(digits).map_err(|_| invalid())?;

    let has_lower = digits.chars().any(|c| c.is_ascii_lowercase());
    let has_upper = digits.chars().any(|c| c.is_ascii_uppercase());
    if has_lower && has_upper && address.to_checksum(None)[2..] != *digits {
        return Err(IntentError::BadChecksum {
            field: field.to_string(),
            value: s.to_string(),
        });
    }
    Ok(address)
}

/// Parse an unsigned 256-bit integer from a JSON number or a decimal / `0x` hex string.
pub fn parse_uint(field: &str, value: &Value) -> Result<U256, IntentError> {
    match value {
        Value::Number(n) => {
            if let Some(u) = n.as_u64() {
                Ok(U256::from(u))
            } else if n.as_i64().is_some() {
                Err(IntentError::NegativeAmount {
                    field: field.to_string(),
                    value: n.to_string(),
                })
            } else {
                Err(IntentError::InvalidNumber {
                    field: field.to_string(),
                    value: n.to_string(),
                })
            }
        }
        Value::String(s) => parse_uint_str(field, s),
        other => Err(IntentError::InvalidNumber {
            field: field.to_string(),
            value: other.to_string(),
        }),
    }
}

pub fn parse_uint_str(field: &str, s: &str) -> Result<U256, IntentError> {
    let trimmed = s.trim();
    if trimmed.starts_with('-') {
        return Err(IntentError::NegativeAmount {
            field: field.to_string(),
            value: s.to_string(),
        });
    }
    if !is_integer_literal(trimmed) {
        return Err(IntentError::InvalidNumber {
            field: field.to_string(),
            value: s.to_string(),
        });
    }
    // The literal is well formed at this point, so a parse failure can only be an overflow.
    U256::from_str(trimmed).map_err(|_| IntentError::OutOfRange {
        field: field.to_string(),
        value: s.to_string(),
    })
}

/// Parse `0x`-prefixed (or bare) hex into bytes. An empty string and `0x` are empty bytes.
pub fn parse_bytes(field: &str, s: &str) -> Result<Bytes, IntentError> {
    let digits = s.strip_prefix("0x").unwrap_or(s);
    hex::decode(digits)
        .map(Bytes::from)
        .map_err(|_| IntentError::InvalidBytes {
            field: field.to_string(),
            value: s.to_string(),
        })
}

fn is_integer_literal(s: &str) -> bool {
    match s.strip_prefix("0x") {
        Some(digits) => !digits.is_empty() && digits.chars().all(|c| c.is_ascii_hexdigit()),
        None => !s.is_empty() && s.chars().all(|c| c.is_ascii_digit()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_address_accepts_lowercase_and_checksummed() {
        let lower = "0xa238cbeb142c10ef7ad8442c6d1f9e89e07e7761";
        let checksummed = "0xA238CBeb142c10Ef7Ad8442C6D1f9E89e07e7761";
        assert_eq!(
            parse_address("to", lower).unwrap(),
            parse_address("to", checksummed).unwrap()
        );
    }

    #[test]
    fn test_address_rejects_bad_checksum() {
        let err = parse_address("to", "0xA238CBEb142c10Ef7Ad8442C6D1f9E89e07e7761").unwrap_err();
        assert!(matches!(err, IntentError::BadChecksum { ref field, .. } if field == "to"));
    }

    #[test]
    fn test_address_requires_prefix() {
        let err = parse_address("to", "a238cbeb142c10ef7ad8442c6d1f9e89e07e7761").unwrap_err();
        assert!(matches!(err, IntentError::InvalidAddress { ref field, .. } if field == "to"));
    }

    #[test]
    fn test_address_rejects_wrong_length() {
        let err = parse_address("token", "0x1234").unwrap_err();
        assert_eq!(
            err,
            IntentError::InvalidAddress {
                field: "token".to_string(),
                value: "0x1234".to_string()
            }
        );
    }

    #[test]
    fn test_uint_from_numbers_and_strings() {
        assert_eq!(parse_uint("amount", &json!(42)).unwrap(), U256::from(42u64));
        assert_eq!(parse_uint("amount", &json!("1000")).unwrap(), U256::from(1000u64));
        assert_eq!(parse_uint("amount", &json!("0xff")).unwrap(), U256::from(255u64));
        assert_eq!(parse_uint("amount", &json!(U256::MAX.to_string())).unwrap(), U256::MAX);
    }

    #[test]
    fn test_uint_rejects_negative_and_overflow() {
        assert!(matches!(
            parse_uint("amount", &json!(-1)),
            Err(IntentError::NegativeAmount { .. })
        ));
        assert!(matches!(
            parse_uint("amount", &json!("-5")),
            Err(IntentError::NegativeAmount { .. })
        ));
        let too_big = format!("{}0", U256::MAX);
        assert!(matches!(
            parse_uint("value", &json!(too_big)),
            Err(IntentError::OutOfRange { .. })
        ));
        assert!(matches!(
            parse_uint("value", &json!("12abc")),
            Err(IntentError::InvalidNumber { .. })
        ));
        assert!(matches!(
            parse_uint("value", &json!(1.5)),
            Err(IntentError::InvalidNumber { .. })
        ));
    }

    #[test]
    fn test_bytes_parsing() {
        assert!(parse_bytes("data", "0x").unwrap().is_empty());
        assert_eq!(parse_bytes("data", "0x1234").unwrap().as_ref(), &[0x12, 0x34]);
        assert!(matches!(
            parse_bytes("data", "0x123"),
            Err(IntentError::InvalidBytes { .. })
        ));
    }
}
