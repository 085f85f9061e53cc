use alloy_primitives::{Address, Bytes, U256};
use alloy_sol_types::SolCall;
use intent_types::{ModuleCall, Operation};

use crate::{errors::DecodeError, interfaces::IMultiSend};

/// Decode `multiSend(bytes)` calldata into the module calls it replays, in order.
pub fn decode_multisend(calldata: &[u8]) -> Result<Vec<ModuleCall>, DecodeError> {
    if calldata.len() < 4 || calldata[..4] != IMultiSend::multiSendCall::SELECTOR {
        return Err(DecodeError::NotMultiSend);
    }
    let call = IMultiSend::multiSendCall::abi_decode(calldata, true)
        .map_err(|_| DecodeError::MalformedCalldata)?;
    unpack_calls(&call.transactions)
}

/// Split a packed MultiSend payload into its records.
pub fn unpack_calls(bytes: &[u8]) -> Result<Vec<ModuleCall>, DecodeError> {
    let mut calls = Vec::new();
    let mut i = 0usize;

    while i < bytes.len() {
        let op = read_u8(bytes, &mut i)?;
        let operation = Operation::try_from(op).map_err(DecodeError::UnknownOperation)?;
        let to = read_address(bytes, &mut i)?;
        let value = read_u256(bytes, &mut i)?;
        let data_len = read_u256(bytes, &mut i)?;
        if data_len > U256::from(bytes.len() - i) {
            return Err(DecodeError::Truncated);
        }
        let data = read_vec(bytes, &mut i, data_len.saturating_to::<usize>())?;

        calls.push(ModuleCall {
            to,
            value,
            data: Bytes::from(data),
            operation,
        });
    }

    Ok(calls)
}

fn read_u8(bytes: &[u8], i: &mut usize) -> Result<u8, DecodeError> {
    let b = *bytes.get(*i).ok_or(DecodeError::Truncated)?;
    *i += 1;
    Ok(b)
}

fn read_vec(bytes: &[u8], i: &mut usize, len: usize) -> Result<Vec<u8>, DecodeError> {
    if bytes.len() < *i + len {
        return Err(DecodeError::Truncated);
    }
    let out = bytes[*i..*i + len].to_vec();
    *i += len;
    Ok(out)
}

fn read_u256(bytes: &[u8], i: &mut usize) -> Result<U256, DecodeError> {
    if bytes.len() < *i + 32 {
        return Err(DecodeError::Truncated);
    }
    let word = &bytes[*i..*i + 32];
    *i += 32;
    Ok(U256::from_be_slice(word))
}

fn read_address(bytes: &[u8], i: &mut usize) -> Result<Address, DecodeError> {
    if bytes.len() < *i + 20 {
        return Err(DecodeError::Truncated);
    }
    let addr = Address::from_slice(&bytes[*i..*i + 20]);
    *i += 20;
    Ok(addr)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::batch::pack_calls;

    #[test]
    fn test_rejects_unknown_operation() {
        let mut packed = pack_calls(&[ModuleCall {
            to: Address::with_last_byte(1),
            ..Default::default()
        }]);
        packed[0] = 2;
        assert_eq!(unpack_calls(&packed), Err(DecodeError::UnknownOperation(2)));
    }

    #[test]
    fn test_rejects_truncated_records() {
        let packed = pack_calls(&[ModuleCall {
            to: Address::with_last_byte(1),
            data: Bytes::from_static(&[1, 2, 3]),
            ..Default::default()
        }]);
        assert_eq!(unpack_calls(&packed[..packed.len() - 1]), Err(DecodeError::Truncated));
        assert_eq!(unpack_calls(&packed[..30]), Err(DecodeError::Truncated));
    }

    #[test]
    fn test_rejects_other_selectors() {
        assert_eq!(decode_multisend(&[0xa9, 0x05, 0x9c, 0xbb]), Err(DecodeError::NotMultiSend));
        assert_eq!(decode_multisend(&[]), Err(DecodeError::NotMultiSend));
    }

    #[test]
    fn test_empty_payload_has_no_records() {
        assert_eq!(unpack_calls(&[]), Ok(vec![]));
    }
}
