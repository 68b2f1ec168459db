//! Token amounts and fixed-point decimal scaling.
//!
//! Human-readable amounts (`"10.5"`) are scaled into a token's smallest unit
//! with integer arithmetic only. Digits beyond the token's precision are
//! truncated (rounded toward zero), so a caller never transfers more than it
//! asked for.

use std::fmt;

use alloy_primitives::U256;

use crate::error::ValidationError;

/// A token amount in smallest units, with decimals and symbol for display.
///
/// ```
/// use alloy_primitives::U256;
/// use relay_kit::TokenAmount;
///
/// let amount = TokenAmount::new(U256::from(10_500_000u64), 6, "USDC");
/// assert_eq!(amount.to_string(), "10.5 USDC");
///
/// let parsed = TokenAmount::parse("10.5", 6, "USDC").unwrap();
/// assert_eq!(parsed, amount);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenAmount {
    raw: U256,
    decimals: u8,
    symbol: String,
}

impl TokenAmount {
    /// Create an amount from a raw smallest-unit value.
    pub fn new(raw: U256, decimals: u8, symbol: impl Into<String>) -> Self {
        Self {
            raw,
            decimals,
            symbol: symbol.into(),
        }
    }

    /// Parse a human-readable decimal string like `"1.5"`.
    ///
    /// Extra fractional digits are truncated.
    pub fn parse(
        s: &str,
        decimals: u8,
        symbol: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let raw = parse_decimal_to_raw(s, decimals)?;
        Ok(Self::new(raw, decimals, symbol))
    }

    /// The raw amount in smallest units.
    pub fn raw(&self) -> U256 {
        self.raw
    }

    pub fn decimals(&self) -> u8 {
        self.decimals
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn is_zero(&self) -> bool {
        self.raw.is_zero()
    }

    /// Format as a decimal string without the symbol.
    pub fn format_amount(&self) -> String {
        format_raw_with_decimals(self.raw, self.decimals)
    }
}

impl fmt::Display for TokenAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.format_amount(), self.symbol)
    }
}

impl From<TokenAmount> for U256 {
    fn from(amount: TokenAmount) -> U256 {
        amount.raw
    }
}

// ============================================================================
// IntoTokenAmount trait
// ============================================================================

/// Trait for values that can be scaled into a token's smallest unit.
///
/// Strings are parsed as decimals. `f64` values go through their shortest
/// round-trip decimal representation before scaling, so `10.5` becomes
/// exactly `10500000` at 6 decimals rather than whatever `10.5 * 1e6`
/// happens to produce.
///
/// ```
/// use alloy_primitives::U256;
/// use relay_kit::IntoTokenAmount;
///
/// assert_eq!("10.5".into_raw_amount(6).unwrap(), U256::from(10_500_000u64));
/// assert_eq!(10.5f64.into_raw_amount(6).unwrap(), U256::from(10_500_000u64));
/// assert!((-1.0f64).into_raw_amount(6).is_err());
/// ```
pub trait IntoTokenAmount {
    /// Scale into a raw amount for a token with `decimals` decimal places.
    fn into_raw_amount(self, decimals: u8) -> Result<U256, ValidationError>;
}

impl IntoTokenAmount for &str {
    fn into_raw_amount(self, decimals: u8) -> Result<U256, ValidationError> {
        parse_decimal_to_raw(self, decimals)
    }
}

impl IntoTokenAmount for String {
    fn into_raw_amount(self, decimals: u8) -> Result<U256, ValidationError> {
        parse_decimal_to_raw(&self, decimals)
    }
}

impl IntoTokenAmount for &String {
    fn into_raw_amount(self, decimals: u8) -> Result<U256, ValidationError> {
        parse_decimal_to_raw(self, decimals)
    }
}

impl IntoTokenAmount for f64 {
    fn into_raw_amount(self, decimals: u8) -> Result<U256, ValidationError> {
        if !self.is_finite() {
            return Err(ValidationError::NonFiniteAmount);
        }
        if self < 0.0 {
            return Err(ValidationError::NegativeAmount(self.to_string()));
        }
        // `Display` for f64 never uses exponent notation.
        parse_decimal_to_raw(&self.to_string(), decimals)
    }
}

impl IntoTokenAmount for TokenAmount {
    fn into_raw_amount(self, decimals: u8) -> Result<U256, ValidationError> {
        rescale(self.raw, self.decimals, decimals)
    }
}

impl IntoTokenAmount for &TokenAmount {
    fn into_raw_amount(self, decimals: u8) -> Result<U256, ValidationError> {
        rescale(self.raw, self.decimals, decimals)
    }
}

// ============================================================================
// Helper functions
// ============================================================================

/// `10^decimals` as a `U256`.
fn decimal_scale(decimals: u8) -> Result<U256, ValidationError> {
    let ten = U256::from(10u8);
    let mut scale = U256::from(1u8);
    for _ in 0..decimals {
        scale = scale
            .checked_mul(ten)
            .ok_or(ValidationError::DecimalsTooLarge(decimals))?;
    }
    Ok(scale)
}

fn rescale(raw: U256, from: u8, to: u8) -> Result<U256, ValidationError> {
    if from <= to {
        raw.checked_mul(decimal_scale(to - from)?)
            .ok_or(ValidationError::AmountOverflow)
    } else {
        Ok(raw / decimal_scale(from - to)?)
    }
}

fn parse_digits(digits: &str, original: &str) -> Result<U256, ValidationError> {
    let ten = U256::from(10u8);
    let mut acc = U256::ZERO;
    for b in digits.bytes() {
        if !b.is_ascii_digit() {
            return Err(ValidationError::InvalidAmount(original.to_string()));
        }
        acc = acc
            .checked_mul(ten)
            .and_then(|v| v.checked_add(U256::from(b - b'0')))
            .ok_or(ValidationError::AmountOverflow)?;
    }
    Ok(acc)
}

/// Parse a decimal string into smallest units, truncating excess precision.
fn parse_decimal_to_raw(s: &str, decimals: u8) -> Result<U256, ValidationError> {
    let s = s.trim();

    if s.is_empty() {
        return Err(ValidationError::InvalidAmount(s.to_string()));
    }

    let lower = s.to_ascii_lowercase();
    let unsigned = lower.trim_start_matches(['-', '+']);
    if matches!(unsigned, "inf" | "infinity" | "nan") {
        return Err(ValidationError::NonFiniteAmount);
    }

    let (negative, body) = match s.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, s),
    };

    let (whole_str, frac_str) = match body.split_once('.') {
        Some((w, f)) => (w, f),
        None => (body, ""),
    };

    if whole_str.is_empty() && frac_str.is_empty() {
        return Err(ValidationError::InvalidAmount(s.to_string()));
    }
    if frac_str.contains('.') {
        return Err(ValidationError::InvalidAmount(s.to_string()));
    }

    let is_digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
    if !is_digits(whole_str) || !is_digits(frac_str) {
        return Err(ValidationError::InvalidAmount(s.to_string()));
    }

    if negative {
        // "-0" and "-0.000" denote zero; anything else is a real negative.
        if body.bytes().all(|b| b == b'0' || b == b'.') {
            return Ok(U256::ZERO);
        }
        return Err(ValidationError::NegativeAmount(s.to_string()));
    }

    let whole = parse_digits(whole_str, s)?;

    let places = decimals as usize;
    let kept = if frac_str.len() > places {
        &frac_str[..places]
    } else {
        frac_str
    };
    let padded = format!("{:0<width$}", kept, width = places);
    let frac = parse_digits(&padded, s)?;

    whole
        .checked_mul(decimal_scale(decimals)?)
        .and_then(|v| v.checked_add(frac))
        .ok_or(ValidationError::AmountOverflow)
}

/// Format a raw amount as a decimal string, trimming trailing zeros.
fn format_raw_with_decimals(raw: U256, decimals: u8) -> String {
    if decimals == 0 {
        return raw.to_string();
    }

    let Ok(divisor) = decimal_scale(decimals) else {
        return raw.to_string();
    };
    let whole = raw / divisor;
    let frac = raw % divisor;

    if frac.is_zero() {
        whole.to_string()
    } else {
        let frac_str = format!("{:0>width$}", frac.to_string(), width = decimals as usize);
        let trimmed = frac_str.trim_end_matches('0');
        format!("{}.{}", whole, trimmed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(v: u64) -> U256 {
        U256::from(v)
    }

    // ─── Display ───

    #[test]
    fn test_token_amount_display_whole_number() {
        let amount = TokenAmount::new(raw(1_000_000), 6, "USDC");
        assert_eq!(amount.to_string(), "1 USDC");
    }

    #[test]
    fn test_token_amount_display_with_decimals() {
        let amount = TokenAmount::new(raw(10_500_000), 6, "USDC");
        assert_eq!(amount.to_string(), "10.5 USDC");
    }

    #[test]
    fn test_token_amount_display_fractional_only() {
        let amount = TokenAmount::new(raw(1), 6, "USDC");
        assert_eq!(amount.format_amount(), "0.000001");
    }

    #[test]
    fn test_token_amount_display_zero_decimals() {
        let amount = TokenAmount::new(raw(42), 0, "PTS");
        assert_eq!(amount.to_string(), "42 PTS");
    }

    // ─── Parsing ───

    #[test]
    fn test_parse_whole_number() {
        assert_eq!(parse_decimal_to_raw("100", 6).unwrap(), raw(100_000_000));
    }

    #[test]
    fn test_parse_with_fraction() {
        assert_eq!(parse_decimal_to_raw("10.5", 6).unwrap(), raw(10_500_000));
    }

    #[test]
    fn test_parse_leading_decimal_point() {
        assert_eq!(parse_decimal_to_raw(".25", 6).unwrap(), raw(250_000));
    }

    #[test]
    fn test_parse_trailing_decimal_point() {
        assert_eq!(parse_decimal_to_raw("3.", 6).unwrap(), raw(3_000_000));
    }

    #[test]
    fn test_parse_truncates_excess_precision() {
        assert_eq!(parse_decimal_to_raw("1.2345679", 6).unwrap(), raw(1_234_567));
        assert_eq!(parse_decimal_to_raw("0.0000009", 6).unwrap(), U256::ZERO);
    }

    #[test]
    fn test_parse_zero() {
        assert_eq!(parse_decimal_to_raw("0", 6).unwrap(), U256::ZERO);
        assert_eq!(parse_decimal_to_raw("-0.0", 6).unwrap(), U256::ZERO);
    }

    #[test]
    fn test_parse_negative() {
        assert_eq!(
            parse_decimal_to_raw("-1", 6),
            Err(ValidationError::NegativeAmount("-1".to_string()))
        );
        assert!(matches!(
            parse_decimal_to_raw("-0.0000001", 6),
            Err(ValidationError::NegativeAmount(_))
        ));
    }

    #[test]
    fn test_parse_non_finite_text() {
        assert_eq!(
            parse_decimal_to_raw("NaN", 6),
            Err(ValidationError::NonFiniteAmount)
        );
        assert_eq!(
            parse_decimal_to_raw("-inf", 6),
            Err(ValidationError::NonFiniteAmount)
        );
    }

    #[test]
    fn test_parse_invalid() {
        for input in ["", ".", "abc", "1.2.3", "1e6", "+5", "1,5"] {
            assert!(
                matches!(
                    parse_decimal_to_raw(input, 6),
                    Err(ValidationError::InvalidAmount(_))
                ),
                "{input:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_parse_overflow() {
        let huge = "1".repeat(80);
        assert_eq!(
            parse_decimal_to_raw(&huge, 0),
            Err(ValidationError::AmountOverflow)
        );
    }

    #[test]
    fn test_decimal_scale_limit() {
        assert!(decimal_scale(77).is_ok());
        assert_eq!(
            decimal_scale(78),
            Err(ValidationError::DecimalsTooLarge(78))
        );
    }

    // ─── IntoTokenAmount ───

    #[test]
    fn test_f64_uses_shortest_decimal() {
        assert_eq!(10.5f64.into_raw_amount(6).unwrap(), raw(10_500_000));
        assert_eq!(0.1f64.into_raw_amount(6).unwrap(), raw(100_000));
        // 0.1 + 0.2 == 0.30000000000000004, truncated at 6 places
        assert_eq!((0.1f64 + 0.2).into_raw_amount(6).unwrap(), raw(300_000));
        assert_eq!(1e-7f64.into_raw_amount(6).unwrap(), U256::ZERO);
    }

    #[test]
    fn test_f64_rejects_negative_and_non_finite() {
        assert!(matches!(
            (-1.0f64).into_raw_amount(6),
            Err(ValidationError::NegativeAmount(_))
        ));
        assert_eq!(
            f64::NAN.into_raw_amount(6),
            Err(ValidationError::NonFiniteAmount)
        );
        assert_eq!(
            f64::INFINITY.into_raw_amount(6),
            Err(ValidationError::NonFiniteAmount)
        );
    }

    #[test]
    fn test_f64_negative_zero_is_zero() {
        assert_eq!((-0.0f64).into_raw_amount(6).unwrap(), U256::ZERO);
    }

    #[test]
    fn test_token_amount_rescales() {
        let amount = TokenAmount::new(raw(1_500_000), 6, "USDC");
        assert_eq!(
            amount.clone().into_raw_amount(18).unwrap(),
            U256::from(1_500_000_000_000_000_000u128)
        );
        assert_eq!(amount.into_raw_amount(2).unwrap(), raw(150));
    }
}
