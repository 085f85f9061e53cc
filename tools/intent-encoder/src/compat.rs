//! Conversions between alloy primitives and the ethers types used for runtime ABI encoding and
//! transport.

use alloy_primitives::{Address, Bytes, U256};
use ethers::types::{self as ethers_types, H160};

pub fn to_h160(address: Address) -> H160 {
    H160::from_slice(address.as_slice())
}

pub fn to_ethers_u256(value: U256) -> ethers_types::U256 {
    ethers_types::U256::from_big_endian(&value.to_be_bytes::<32>())
}

pub fn to_ethers_bytes(data: &Bytes) -> ethers_types::Bytes {
    ethers_types::Bytes::from(data.to_vec())
}
