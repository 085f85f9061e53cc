use alloy_primitives::{Bytes, U256};
use alloy_sol_types::SolCall;
use intent_types::{NormalizedCall, TransactionIntent};
use tracing::debug;

use crate::{
    abi::encode_contract_call,
    errors::EncodeError,
    interfaces::{IERC20, IERC721},
};

/// Encode a single intent into the `(to, value, data)` triple that executes it.
pub fn encode_single(intent: &TransactionIntent) -> Result<NormalizedCall, EncodeError> {
    let call = match intent {
        TransactionIntent::TransferValue {
            to,
            amount,
            token: None,
        } => NormalizedCall {
            to: *to,
            value: *amount,
            data: Bytes::new(),
        },
        TransactionIntent::TransferValue {
            to,
            amount,
            token: Some(token),
        } => NormalizedCall {
            to: *token,
            value: U256::ZERO,
            data: IERC20::transferCall {
                to: *to,
                amount: *amount,
            }
            .abi_encode()
            .into(),
        },
        TransactionIntent::TransferCollectible {
            from,
            to,
            contract_address,
            token_id,
        } => NormalizedCall {
            to: *contract_address,
            value: U256::ZERO,
            data: IERC721::safeTransferFromCall {
                from: *from,
                to: *to,
                tokenId: *token_id,
            }
            .abi_encode()
            .into(),
        },
        TransactionIntent::CallContract(call) => NormalizedCall {
            to: call.to,
            value: call.value,
            data: encode_contract_call(call)?.into(),
        },
        TransactionIntent::RawCall { to, value, data } => NormalizedCall {
            to: *to,
            value: *value,
            data: data.clone(),
        },
    };

    debug!(to = %call.to, value = %call.value, data_len = call.data.len(), "encoded intent");
    Ok(call)
}
