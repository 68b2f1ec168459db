//! Token call helpers for ERC-20 transfers and ERC-721 mints.
//!
//! # Fungible Tokens (ERC-20)
//!
//! ```rust
//! use alloy_primitives::U256;
//! use relay_kit::{build_transfer_operation, tokens};
//!
//! # fn example() -> Result<(), relay_kit::Error> {
//! let call = build_transfer_operation(
//!     "0x00000000000000000000000000000000000000aa",
//!     "0x00000000000000000000000000000000000000bb",
//!     "10.5",
//!     &tokens::USDC_SEPOLIA,
//! )?;
//! assert_eq!(call.to(), tokens::USDC_SEPOLIA.address);
//! assert_eq!(call.value(), U256::ZERO);
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```
//!
//! # Non-Fungible Tokens (ERC-721)
//!
//! ```rust
//! use alloy_primitives::{Address, U256};
//! use relay_kit::tokens;
//!
//! # fn example() -> Result<(), relay_kit::Error> {
//! let nft = Address::repeat_byte(0x0a);
//! let owner = Address::repeat_byte(0x0b);
//!
//! // Random 256-bit token id
//! let call = tokens::build_mint_operation(nft, owner, None)?;
//!
//! // Or a fixed one
//! let call = tokens::build_mint_operation(nft, owner, Some(U256::from(42u64)))?;
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

pub(crate) mod erc20;
mod erc721;
mod known;

pub use erc20::{Erc20Token, transfer_signature};
pub use erc721::{
    build_mint_operation, build_mint_operation_with, encode_safe_mint, safe_mint_signature,
};
pub use known::{USDC_MAINNET, USDC_SEPOLIA};
