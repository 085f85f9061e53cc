//! Packing of module calls into a single MultiSend payload.

use alloy_primitives::{Address, U256};
use alloy_sol_types::SolCall;
use intent_types::{BatchEntry, ModuleCall, Operation};
use tracing::debug;

use crate::{
    constants::{DEFAULT_MULTISEND_ADDRESS, PACKED_HEADER_LEN},
    encoder::encode_single,
    errors::EncodeError,
    interfaces::IMultiSend,
};

/// Append one packed record: operation | to | value | data length | data.
pub fn pack_call(buf: &mut Vec<u8>, call: &ModuleCall) {
    buf.push(call.operation.into());
    buf.extend_from_slice(call.to.as_slice());
    buf.extend_from_slice(&call.value.to_be_bytes::<32>());
    buf.extend_from_slice(&U256::from(call.data.len()).to_be_bytes::<32>());
    buf.extend_from_slice(&call.data);
}

/// Concatenate packed records in input order.
pub fn pack_calls(calls: &[ModuleCall]) -> Vec<u8> {
    let len: usize = calls
        .iter()
        .map(|call| PACKED_HEADER_LEN + call.data.len())
        .sum();
    let mut buf = Vec::with_capacity(len);
    for call in calls {
        pack_call(&mut buf, call);
    }
    buf
}

/// Wrap `calls` into a delegate call of `multiSend(bytes)` on the relay.
pub fn multisend_call(calls: &[ModuleCall], multisend: Address) -> ModuleCall {
    let transactions = pack_calls(calls);
    debug!(
        %multisend,
        calls = calls.len(),
        packed_len = transactions.len(),
        "wrapping batch in multiSend"
    );
    ModuleCall {
        to: multisend,
        value: U256::ZERO,
        data: IMultiSend::multiSendCall {
            transactions: transactions.into(),
        }
        .abi_encode()
        .into(),
        operation: Operation::DelegateCall,
    }
}

/// The relay to use: the override unless it is absent or the zero address.
pub fn resolve_multisend(multisend: Option<Address>) -> Address {
    match multisend {
        Some(address) if !address.is_zero() => address,
        _ => DEFAULT_MULTISEND_ADDRESS,
    }
}

/// Encode an ordered batch into one module call.
///
/// A single entry is returned as is, with its own operation. Larger batches become a delegate
/// call to the MultiSend relay that replays every entry in order.
pub fn encode_batch(
    entries: &[BatchEntry],
    multisend: Option<Address>,
) -> Result<ModuleCall, EncodeError> {
    let mut calls = entries
        .iter()
        .map(|entry| {
            encode_single(&entry.intent).map(|call| call.with_operation(entry.operation))
        })
        .collect::<Result<Vec<_>, EncodeError>>()?;

    match calls.len() {
        0 => Err(EncodeError::EmptyBatch),
        1 => Ok(calls.swap_remove(0)),
        _ => Ok(multisend_call(&calls, resolve_multisend(multisend))),
    }
}
