//! Well-known deployment addresses and packed record widths.

use alloy_primitives::{address, Address};

/// Safe MultiSend v1.3.0, deployed at the same address on most EVM chains.
pub const DEFAULT_MULTISEND_ADDRESS: Address = address!("A238CBeb142c10Ef7Ad8442C6D1f9E89e07e7761");

/// operation (1) + to (20) + value (32) + data length (32).
pub const PACKED_HEADER_LEN: usize = 1 + 20 + 32 + 32;
