//! Address parsing.
//!
//! Addresses are [`alloy_primitives::Address`] values. User-facing input must
//! carry the `0x` prefix. Mixed-case input must be a valid EIP-55 checksum;
//! all-lowercase and all-uppercase input is taken as is.

use std::str::FromStr;

use alloy_primitives::Address;

use crate::error::ValidationError;

/// Parse a `0x`-prefixed, 40-hex-digit address.
///
/// A mistyped letter in a checksummed address is rejected rather than
/// silently yielding a different account.
///
/// # Example
///
/// ```
/// use relay_kit::parse_address;
///
/// let addr = parse_address("0x1c7D4B196Cb0C7B01d743Fbc6116a902379C7238").unwrap();
/// assert_eq!(addr.as_slice()[0], 0x1c);
///
/// assert!(parse_address("1c7D4B196Cb0C7B01d743Fbc6116a902379C7238").is_err());
/// assert!(parse_address("0x1c7d4B196Cb0C7B01d743Fbc6116a902379C7238").is_err());
/// ```
pub fn parse_address(s: &str) -> Result<Address, ValidationError> {
    let s = s.trim();
    let digits = s
        .strip_prefix("0x")
        .or_else(|| s.strip_prefix("0X"))
        .ok_or_else(|| ValidationError::InvalidAddress(s.to_string()))?;

    if digits.len() != 40 {
        return Err(ValidationError::InvalidAddress(s.to_string()));
    }

    let mixed_case = digits.bytes().any(|b| b.is_ascii_uppercase())
        && digits.bytes().any(|b| b.is_ascii_lowercase());
    let parsed = if mixed_case {
        Address::parse_checksummed(format!("0x{digits}"), None).ok()
    } else {
        Address::from_str(digits).ok()
    };
    parsed.ok_or_else(|| ValidationError::InvalidAddress(s.to_string()))
}

/// Trait for types that can be converted into an [`Address`].
///
/// Lets builders accept typed addresses as well as strings from runtime
/// input.
///
/// ```
/// use alloy_primitives::Address;
/// use relay_kit::IntoAddress;
///
/// fn example(to: impl IntoAddress) -> Address {
///     to.into_address().unwrap()
/// }
///
/// example(Address::ZERO);
/// example("0x0000000000000000000000000000000000000001");
/// ```
pub trait IntoAddress {
    /// Convert into an address.
    fn into_address(self) -> Result<Address, ValidationError>;
}

impl IntoAddress for Address {
    fn into_address(self) -> Result<Address, ValidationError> {
        Ok(self)
    }
}

impl IntoAddress for &Address {
    fn into_address(self) -> Result<Address, ValidationError> {
        Ok(*self)
    }
}

impl IntoAddress for &str {
    fn into_address(self) -> Result<Address, ValidationError> {
        parse_address(self)
    }
}

impl IntoAddress for String {
    fn into_address(self) -> Result<Address, ValidationError> {
        parse_address(&self)
    }
}

impl IntoAddress for &String {
    fn into_address(self) -> Result<Address, ValidationError> {
        parse_address(self)
    }
}
