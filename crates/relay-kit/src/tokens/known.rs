//! Known token contracts.
//!
//! ```rust
//! use relay_kit::tokens;
//!
//! assert_eq!(tokens::USDC_SEPOLIA.decimals, 6);
//! assert_eq!(tokens::USDC_SEPOLIA.symbol, "USDC");
//! ```

use std::borrow::Cow;

use alloy_primitives::address;

use super::erc20::Erc20Token;

/// Circle USDC on Ethereum mainnet.
pub const USDC_MAINNET: Erc20Token = Erc20Token {
    address: address!("0xA0b86991c6218b36c1d19D4a2e9Eb0cE3606eB48"),
    decimals: 6,
    symbol: Cow::Borrowed("USDC"),
};

/// Circle USDC on the Sepolia testnet.
pub const USDC_SEPOLIA: Erc20Token = Erc20Token {
    address: address!("0x1c7D4B196Cb0C7B01d743Fbc6116a902379C7238"),
    decimals: 6,
    symbol: Cow::Borrowed("USDC"),
};
