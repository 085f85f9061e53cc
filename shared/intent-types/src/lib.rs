//! Shared types for transaction intents, normalized calls and module calls.

pub mod call;
pub mod intent;
pub mod parse;

pub use call::{ModuleCall, NormalizedCall, Operation, TxOverrides};
pub use intent::{BatchEntry, ContractCall, TransactionIntent};
pub use parse::IntentError;
