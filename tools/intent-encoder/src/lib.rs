//! Encode transaction intents into calldata and batch them into a single MultiSend call that an
//! execution module runs on behalf of its avatar.

pub mod abi;
pub mod batch;
pub mod compat;
pub mod config;
pub mod constants;
pub mod decoder;
pub mod dispatch;
pub mod encoder;
pub mod errors;
pub mod interfaces;
pub mod mock;


pub use batch::encode_batch;
pub use constants::DEFAULT_MULTISEND_ADDRESS;
pub use dispatch::{EthersTransport, ExecutionModule, ModuleTransaction, ModuleTransport};
pub use encoder::encode_single;
pub use errors::{DecodeError, DispatchError, EncodeError};
pub use intent_types::{
    BatchEntry, ContractCall, ModuleCall, NormalizedCall, Operation, TransactionIntent, TxOverrides,
};
