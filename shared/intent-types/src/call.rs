use alloy_primitives::{Address, Bytes, U256};
use serde::{Deserialize, Serialize};

/// Call type of a module call, as understood by Safe-style avatars and the MultiSend relay.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum Operation {
    #[default]
    Call = 0,
    DelegateCall = 1,
}

impl TryFrom<u8> for Operation {
    type Error = u8;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Operation::Call),
            1 => Ok(Operation::DelegateCall),
            other => Err(other),
        }
    }
}

impl From<Operation> for u8 {
    fn from(operation: Operation) -> Self {
        operation as u8
    }
}

/// A call ready for direct on-chain execution. Every intent collapses to this.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedCall {
    pub to: Address,
    pub value: U256,
    pub data: Bytes,
}

impl NormalizedCall {
    pub fn with_operation(self, operation: Operation) -> ModuleCall {
        ModuleCall {
            to: self.to,
            value: self.value,
            data: self.data,
            operation,
        }
    }
}

/// A normalized call plus the call type the executing avatar should use.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleCall {
    pub to: Address,
    pub value: U256,
    pub data: Bytes,
    pub operation: Operation,
}

impl From<NormalizedCall> for ModuleCall {
    fn from(call: NormalizedCall) -> Self {
        call.with_operation(Operation::Call)
    }
}

/// Transaction parameters forwarded verbatim to the transport on dispatch.
///
/// Unset fields are left for the transport (or the node) to fill in.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TxOverrides {
    /// The transaction sender.
    pub from: Option<Address>,

    /// Gas limit for the module transaction.
    pub gas: Option<U256>,

    /// Legacy gas price.
    pub gas_price: Option<U256>,

    /// Max fee per gas.
    pub max_fee_per_gas: Option<U256>,

    /// Miner tip.
    pub max_priority_fee_per_gas: Option<U256>,

    pub nonce: Option<U256>,

    /// Native value attached to the module transaction itself, not to the inner call.
    pub value: Option<U256>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operation_byte_round_trip() {
        assert_eq!(Operation::try_from(0u8), Ok(Operation::Call));
        assert_eq!(Operation::try_from(1u8), Ok(Operation::DelegateCall));
        assert_eq!(Operation::try_from(2u8), Err(2));
        assert_eq!(u8::from(Operation::DelegateCall), 1);
    }

    #[test]
    fn test_normalized_call_defaults_to_call() {
        let call = NormalizedCall {
            to: Address::repeat_byte(0x11),
            value: U256::from(7u64),
            data: Bytes::from_static(&[0xde, 0xad]),
        };
        let module_call = ModuleCall::from(call.clone());
        assert_eq!(module_call.operation, Operation::Call);
        assert_eq!(module_call.to, call.to);
        assert_eq!(module_call.value, call.value);
        assert_eq!(module_call.data, call.data);
    }

    #[test]
    fn test_operation_serde_names() {
        assert_eq!(serde_json::to_string(&Operation::DelegateCall).unwrap(), "\"delegatecall\"");
        let op: Operation = serde_json::from_str("\"call\"").unwrap();
        assert_eq!(op, Operation::Call);
    }
}
