//! Typed argument values.

use alloy_dyn_abi::DynSolValue;
use alloy_primitives::{Address, Bytes, U256};

/// A typed value for a contract call argument.
///
/// Conversions exist from the natural Rust types, so argument lists read
/// like the call they describe:
///
/// ```
/// use alloy_primitives::{Address, U256};
/// use relay_kit::AbiValue;
///
/// let args: Vec<AbiValue> = vec![Address::ZERO.into(), U256::from(42u64).into()];
/// assert_eq!(args[1].as_uint(), Some(U256::from(42u64)));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum AbiValue {
    Address(Address),
    Bool(bool),
    Uint(U256),
    /// Raw bytes of a `bytes<N>` value; the length must equal `N`.
    FixedBytes(Vec<u8>),
    Bytes(Bytes),
    String(String),
}

impl AbiValue {
    /// Short name of the value's kind, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            AbiValue::Address(_) => "address",
            AbiValue::Bool(_) => "bool",
            AbiValue::Uint(_) => "uint",
            AbiValue::FixedBytes(_) => "fixed bytes",
            AbiValue::Bytes(_) => "bytes",
            AbiValue::String(_) => "string",
        }
    }

    /// Convert a decoded value back, dropping the declared width.
    ///
    /// Returns `None` for value kinds calls never carry (signed integers,
    /// arrays, tuples).
    pub(crate) fn from_dyn(value: DynSolValue) -> Option<Self> {
        match value {
            DynSolValue::Address(a) => Some(AbiValue::Address(a)),
            DynSolValue::Bool(b) => Some(AbiValue::Bool(b)),
            DynSolValue::Uint(v, _) => Some(AbiValue::Uint(v)),
            DynSolValue::FixedBytes(word, len) => {
                word.0.get(..len).map(|b| AbiValue::FixedBytes(b.to_vec()))
            }
            DynSolValue::Bytes(b) => Some(AbiValue::Bytes(Bytes::from(b))),
            DynSolValue::String(s) => Some(AbiValue::String(s)),
            _ => None,
        }
    }

    pub fn as_address(&self) -> Option<Address> {
        match self {
            AbiValue::Address(a) => Some(*a),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            AbiValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_uint(&self) -> Option<U256> {
        match self {
            AbiValue::Uint(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            AbiValue::FixedBytes(b) => Some(b),
            AbiValue::Bytes(b) => Some(b),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            AbiValue::String(s) => Some(s),
            _ => None,
        }
    }
}

impl From<Address> for AbiValue {
    fn from(a: Address) -> Self {
        AbiValue::Address(a)
    }
}

impl From<bool> for AbiValue {
    fn from(b: bool) -> Self {
        AbiValue::Bool(b)
    }
}

impl From<U256> for AbiValue {
    fn from(v: U256) -> Self {
        AbiValue::Uint(v)
    }
}

impl From<u64> for AbiValue {
    fn from(v: u64) -> Self {
        AbiValue::Uint(U256::from(v))
    }
}

impl From<u128> for AbiValue {
    fn from(v: u128) -> Self {
        AbiValue::Uint(U256::from(v))
    }
}

impl From<Bytes> for AbiValue {
    fn from(b: Bytes) -> Self {
        AbiValue::Bytes(b)
    }
}

impl From<Vec<u8>> for AbiValue {
    fn from(b: Vec<u8>) -> Self {
        AbiValue::Bytes(Bytes::from(b))
    }
}

impl From<String> for AbiValue {
    fn from(s: String) -> Self {
        AbiValue::String(s)
    }
}

impl From<&str> for AbiValue {
    fn from(s: &str) -> Self {
        AbiValue::String(s.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_dyn_drops_width() {
        let v = AbiValue::from_dyn(DynSolValue::Uint(U256::from(7u8), 8)).unwrap();
        assert_eq!(v, AbiValue::Uint(U256::from(7u8)));

        let mut word = alloy_primitives::B256::ZERO;
        word.0[..4].copy_from_slice(&[0xde, 0xad, 0xbe, 0xef]);
        let v = AbiValue::from_dyn(DynSolValue::FixedBytes(word, 4)).unwrap();
        assert_eq!(v.as_bytes(), Some(&[0xde, 0xad, 0xbe, 0xef][..]));
    }

    #[test]
    fn test_from_dyn_rejects_composites() {
        assert_eq!(AbiValue::from_dyn(DynSolValue::Tuple(vec![])), None);
        assert_eq!(
            AbiValue::from_dyn(DynSolValue::Array(vec![DynSolValue::Bool(true)])),
            None
        );
    }

    #[test]
    fn test_accessors() {
        let v = AbiValue::from(true);
        assert_eq!(v.as_bool(), Some(true));
        assert_eq!(v.as_uint(), None);
        assert_eq!(v.kind(), "bool");
        assert_eq!(AbiValue::from("x").as_str(), Some("x"));
        assert_eq!(AbiValue::from(vec![1u8, 2]).as_bytes(), Some(&[1u8, 2][..]));
    }
}
