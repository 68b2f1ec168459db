//! Call payload encoding and decoding.
//!
//! Arguments are checked against the declared input types here, then
//! `alloy-dyn-abi` lays out `selector || head || tail`.

use alloy_dyn_abi::{DynSolType, DynSolValue, JsonAbiExt};
use alloy_primitives::{B256, Bytes};

use super::signature::{FunctionSignature, Param};
use super::value::AbiValue;
use crate::error::EncodeError;

/// Encode a call to `signature` with `args`.
///
/// The result is deterministic: the same inputs always give the same bytes.
///
/// # Errors
///
/// [`EncodeError::Arity`] on a wrong argument count,
/// [`EncodeError::TypeMismatch`] when a value has the wrong kind, and
/// [`EncodeError::OutOfRange`] when it does not fit the declared width.
///
/// # Example
///
/// ```
/// use alloy_primitives::{Address, U256};
/// use relay_kit::{FunctionSignature, encode_call};
///
/// let transfer = FunctionSignature::parse("transfer(address,uint256)").unwrap();
/// let data = encode_call(&transfer, &[Address::ZERO.into(), U256::from(1u8).into()]).unwrap();
///
/// assert_eq!(data.len(), 4 + 2 * 32);
/// assert_eq!(&data[..4], transfer.selector().as_slice());
/// ```
pub fn encode_call(signature: &FunctionSignature, args: &[AbiValue]) -> Result<Bytes, EncodeError> {
    let values = typed_args(signature, args)?;
    let data = signature.as_function().abi_encode_input(&values)?;
    Ok(Bytes::from(data))
}

/// Decode a payload produced for `signature` back into its arguments.
///
/// The selector must match and the arguments must be canonically encoded:
/// zero padding, booleans 0 or 1, integers within their width and no
/// trailing bytes.
pub fn decode_call(signature: &FunctionSignature, data: &[u8]) -> Result<Vec<AbiValue>, EncodeError> {
    let Some((selector, body)) = data.split_first_chunk::<4>() else {
        return Err(EncodeError::Malformed(format!(
            "payload is {} bytes, shorter than a selector",
            data.len()
        )));
    };

    let expected = signature.selector();
    if selector != &expected.0 {
        return Err(EncodeError::SelectorMismatch {
            expected: hex::encode(expected),
            actual: hex::encode(selector),
        });
    }

    let values = signature
        .as_function()
        .abi_decode_input(body)
        .map_err(|e| EncodeError::Malformed(e.to_string()))?;

    // The decoder tolerates dirty padding; re-encoding must reproduce the body.
    if values.iter().any(exceeds_width)
        || DynSolValue::Tuple(values.clone()).abi_encode_params() != body
    {
        return Err(EncodeError::Malformed(
            "arguments are not canonically encoded".to_string(),
        ));
    }

    values
        .into_iter()
        .map(|value| {
            AbiValue::from_dyn(value)
                .ok_or_else(|| EncodeError::Malformed("unsupported value kind".to_string()))
        })
        .collect()
}

fn exceeds_width(value: &DynSolValue) -> bool {
    match value {
        DynSolValue::Uint(v, bits) => v.bit_len() > *bits,
        DynSolValue::FixedBytes(word, len) => word.0.iter().skip(*len).any(|b| *b != 0),
        _ => false,
    }
}

fn typed_args(signature: &FunctionSignature, args: &[AbiValue]) -> Result<Vec<DynSolValue>, EncodeError> {
    let types = signature.input_types();
    if args.len() != types.len() {
        return Err(EncodeError::Arity {
            function: signature.canonical(),
            expected: types.len(),
            actual: args.len(),
        });
    }

    types
        .iter()
        .zip(signature.inputs())
        .zip(args)
        .enumerate()
        .map(|(index, ((ty, param), arg))| typed_arg(index, param, ty, arg))
        .collect()
}

fn typed_arg(
    index: usize,
    param: &Param,
    ty: &DynSolType,
    arg: &AbiValue,
) -> Result<DynSolValue, EncodeError> {
    let out_of_range = || EncodeError::OutOfRange {
        index,
        name: param.name.clone(),
        ty: ty.sol_type_name().into_owned(),
    };

    match (ty, arg) {
        (DynSolType::Address, AbiValue::Address(a)) => Ok(DynSolValue::Address(*a)),
        (DynSolType::Bool, AbiValue::Bool(b)) => Ok(DynSolValue::Bool(*b)),
        (DynSolType::Uint(bits), AbiValue::Uint(v)) => {
            if v.bit_len() > *bits {
                return Err(out_of_range());
            }
            Ok(DynSolValue::Uint(*v, *bits))
        }
        (DynSolType::FixedBytes(len), AbiValue::FixedBytes(bytes)) => {
            if bytes.len() != *len || *len > 32 {
                return Err(out_of_range());
            }
            let mut word = B256::ZERO;
            word.0[..*len].copy_from_slice(bytes);
            Ok(DynSolValue::FixedBytes(word, *len))
        }
        (DynSolType::Bytes, AbiValue::Bytes(b)) => Ok(DynSolValue::Bytes(b.to_vec())),
        (DynSolType::String, AbiValue::String(s)) => Ok(DynSolValue::String(s.clone())),
        _ => Err(EncodeError::TypeMismatch {
            index,
            name: param.name.clone(),
            expected: ty.sol_type_name().into_owned(),
            actual: arg.kind(),
        }),
    }
}
