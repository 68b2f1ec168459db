//! Function signatures.
//!
//! Parsing and the JSON ABI model come from `alloy-json-abi`; parameter
//! types resolve through `alloy-dyn-abi`. A [`FunctionSignature`] only exists
//! once every input type resolved to a supported primitive.

use std::fmt;
use std::str::FromStr;

use alloy_dyn_abi::DynSolType;
use alloy_json_abi::{AbiItem, Function, JsonAbi};
use alloy_primitives::Selector;

pub use alloy_json_abi::{Param, StateMutability};

use crate::error::EncodeError;

/// A declared contract function with resolved input types.
///
/// Type names are stored in canonical form, so `uint` becomes `uint256` and
/// the selector is always computed over the canonical signature.
///
/// # Example
///
/// ```
/// use relay_kit::FunctionSignature;
///
/// let transfer: FunctionSignature = "function transfer(address to, uint256 amount) returns (bool)"
///     .parse()
///     .unwrap();
///
/// assert_eq!(transfer.canonical(), "transfer(address,uint256)");
/// assert_eq!(transfer.selector().as_slice(), &[0xa9, 0x05, 0x9c, 0xbb]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionSignature {
    function: Function,
    input_types: Vec<DynSolType>,
}

impl FunctionSignature {
    /// Wrap an ABI function, checking that every input type is supported.
    ///
    /// Supported inputs are `address`, `bool`, `uint<N>` (N a multiple of 8
    /// up to 256), `bytes<N>` (N from 1 to 32), `bytes` and `string`.
    ///
    /// # Errors
    ///
    /// [`EncodeError::UnsupportedType`] naming the first input that is not.
    pub fn new(mut function: Function) -> Result<Self, EncodeError> {
        let input_types = function
            .inputs
            .iter_mut()
            .map(canonicalize)
            .collect::<Result<Vec<_>, _>>()?;

        // Outputs never reach the encoder; normalize what resolves.
        for param in &mut function.outputs {
            let _ = canonicalize(param);
        }

        Ok(Self {
            function,
            input_types,
        })
    }

    /// Parse a human-readable fragment.
    ///
    /// The `function` keyword, parameter names, data locations, visibility,
    /// mutability and `returns (...)` are all optional:
    ///
    /// - `"transfer(address,uint256)"`
    /// - `"function setURI(string calldata uri) external payable returns (bytes32)"`
    pub fn parse(signature: &str) -> Result<Self, EncodeError> {
        let function = Function::parse(signature).map_err(|e| EncodeError::InvalidSignature {
            signature: signature.to_string(),
            reason: e.to_string(),
        })?;
        Self::new(function)
    }

    /// Parse a single JSON ABI function item.
    ///
    /// Legacy items with `constant` / `payable` instead of `stateMutability`
    /// are accepted.
    pub fn from_json(json: &str) -> Result<Self, EncodeError> {
        match serde_json::from_str::<AbiItem<'static>>(json)? {
            AbiItem::Function(function) => Self::new(function.into_owned()),
            _ => Err(EncodeError::Json("ABI item is not a function".to_string())),
        }
    }

    /// Find the first function called `name` in a full JSON ABI array.
    pub fn from_json_abi(json: &str, name: &str) -> Result<Self, EncodeError> {
        let abi: JsonAbi = serde_json::from_str(json)?;
        let function = abi
            .function(name)
            .and_then(|overloads| overloads.first())
            .ok_or_else(|| EncodeError::InvalidSignature {
                signature: name.to_string(),
                reason: "no function with this name in the ABI".to_string(),
            })?;
        Self::new(function.clone())
    }

    /// Signature of a well-known function whose input types are fixed.
    pub(crate) fn declared(
        name: &str,
        inputs: &[(&str, DynSolType)],
        outputs: &[(&str, DynSolType)],
    ) -> Self {
        fn params(list: &[(&str, DynSolType)]) -> Vec<Param> {
            list.iter()
                .map(|(name, ty)| Param {
                    ty: ty.sol_type_name().into_owned(),
                    name: (*name).to_string(),
                    components: Vec::new(),
                    internal_type: None,
                })
                .collect()
        }

        Self {
            function: Function {
                name: name.to_string(),
                inputs: params(inputs),
                outputs: params(outputs),
                state_mutability: StateMutability::NonPayable,
            },
            input_types: inputs.iter().map(|(_, ty)| ty.clone()).collect(),
        }
    }

    pub fn name(&self) -> &str {
        &self.function.name
    }

    pub fn inputs(&self) -> &[Param] {
        &self.function.inputs
    }

    pub fn outputs(&self) -> &[Param] {
        &self.function.outputs
    }

    pub fn state_mutability(&self) -> StateMutability {
        self.function.state_mutability
    }

    /// Resolved input types, in declaration order.
    pub fn input_types(&self) -> &[DynSolType] {
        &self.input_types
    }

    /// The underlying ABI function.
    pub fn as_function(&self) -> &Function {
        &self.function
    }

    /// Canonical form used for the selector, e.g. `transfer(address,uint256)`.
    pub fn canonical(&self) -> String {
        self.function.signature()
    }

    /// First four bytes of the keccak-256 hash of [`canonical`](Self::canonical).
    pub fn selector(&self) -> Selector {
        self.function.selector()
    }
}

/// Resolve `param` to a supported type and rewrite its name canonically.
fn canonicalize(param: &mut Param) -> Result<DynSolType, EncodeError> {
    let unsupported = || EncodeError::UnsupportedType(param.ty.clone());
    let ty = DynSolType::parse(&param.ty).map_err(|_| unsupported())?;

    let supported = match ty {
        DynSolType::Address | DynSolType::Bool | DynSolType::Bytes | DynSolType::String => true,
        DynSolType::Uint(bits) => bits > 0 && bits <= 256 && bits % 8 == 0,
        DynSolType::FixedBytes(len) => (1..=32).contains(&len),
        _ => false,
    };
    if !supported {
        return Err(unsupported());
    }

    param.ty = ty.sol_type_name().into_owned();
    Ok(ty)
}

impl fmt::Display for FunctionSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.function.full_signature())
    }
}

impl FromStr for FunctionSignature {
    type Err = EncodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<Function> for FunctionSignature {
    type Error = EncodeError;

    fn try_from(function: Function) -> Result<Self, Self::Error> {
        Self::new(function)
    }
}
