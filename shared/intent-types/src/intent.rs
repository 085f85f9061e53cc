use std::collections::BTreeMap;

use alloy_primitives::{Address, Bytes, U256};
use serde::Deserialize;
use serde_json::Value;

use crate::{
    call::Operation,
    parse::{parse_address, parse_bytes, parse_uint, IntentError},
};

/// High-level description of a single transaction.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(try_from = "IntentRepr")]
pub enum TransactionIntent {
    /// Native transfer when `token` is `None`, ERC20 `transfer` otherwise.
    TransferValue {
        to: Address,
        amount: U256,
        token: Option<Address>,
    },
    /// ERC721 `safeTransferFrom`.
    TransferCollectible {
        from: Address,
        to: Address,
        contract_address: Address,
        token_id: U256,
    },
    CallContract(ContractCall),
    RawCall { to: Address, value: U256, data: Bytes },
}

/// Call of a function described at runtime by a human-readable ABI.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ContractCall {
    pub to: Address,
    pub value: U256,
    /// Human-readable function signatures, eg `function transfer(address to, uint256 amount)`.
    pub abi: Vec<String>,
    /// Function name, canonical signature (`transfer(address,uint256)`) or a human-readable entry.
    pub function_signature: String,
    /// Arguments keyed by parameter name. Missing parameters encode as their type's zero value.
    pub input_values: BTreeMap<String, Value>,
}

/// One record of a batch: an intent plus the call type it should run with.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct BatchEntry {
    #[serde(flatten)]
    pub intent: TransactionIntent,
    #[serde(default)]
    pub operation: Operation,
}

impl BatchEntry {
    pub fn delegate(intent: TransactionIntent) -> Self {
        Self {
            intent,
            operation: Operation::DelegateCall,
        }
    }
}

impl From<TransactionIntent> for BatchEntry {
    fn from(intent: TransactionIntent) -> Self {
        Self {
            intent,
            operation: Operation::Call,
        }
    }
}

/// Wire form of an intent; every field is validated on conversion.
#[derive(Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
enum IntentRepr {
    TransferValue {
        to: String,
        amount: Value,
        #[serde(default)]
        token: Option<String>,
    },
    TransferCollectible {
        from: String,
        to: String,
        contract_address: String,
        token_id: Value,
    },
    CallContract {
        to: String,
        #[serde(default)]
        value: Option<Value>,
        abi_description: Vec<String>,
        function_signature: String,
        #[serde(default)]
        input_values: BTreeMap<String, Value>,
    },
    RawCall {
        to: String,
        #[serde(default)]
        value: Option<Value>,
        #[serde(default)]
        data: Option<String>,
    },
}

impl TryFrom<IntentRepr> for TransactionIntent {
    type Error = IntentError;

    fn try_from(repr: IntentRepr) -> Result<Self, Self::Error> {
        let intent = match repr {
            IntentRepr::TransferValue { to, amount, token } => TransactionIntent::TransferValue {
                to: parse_address("to", &to)?,
                amount: parse_uint("amount", &amount)?,
                // An empty token string means a native transfer.
                token: match token.as_deref() {
                    None | Some("") => None,
                    Some(token) => Some(parse_address("token", token)?),
                },
            },
            IntentRepr::TransferCollectible {
                from,
                to,
                contract_address,
                token_id,
            } => TransactionIntent::TransferCollectible {
                from: parse_address("from", &from)?,
                to: parse_address("to", &to)?,
                contract_address: parse_address("contractAddress", &contract_address)?,
                token_id: parse_uint("tokenId", &token_id)?,
            },
            IntentRepr::CallContract {
                to,
                value,
                abi_description,
                function_signature,
                input_values,
            } => TransactionIntent::CallContract(ContractCall {
                to: parse_address("to", &to)?,
                value: optional_uint("value", value.as_ref())?,
                abi: abi_description,
                function_signature,
                input_values,
            }),
            IntentRepr::RawCall { to, value, data } => TransactionIntent::RawCall {
                to: parse_address("to", &to)?,
                value: optional_uint("value", value.as_ref())?,
                data: match data.as_deref() {
                    None => Bytes::new(),
                    Some(data) => parse_bytes("data", data)?,
                },
            },
        };
        Ok(intent)
    }
}

fn optional_uint(field: &str, value: Option<&Value>) -> Result<U256, IntentError> {
    match value {
        None | Some(Value::Null) => Ok(U256::ZERO),
        Some(value) => parse_uint(field, value),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_native_transfer_from_json() {
        let intent: TransactionIntent = serde_json::from_value(json!({
            "type": "transferValue",
            "to": "0x00000000000000000000000000000000000000aa",
            "amount": "1000000000000000000",
            "token": null,
        }))
        .unwrap();
        assert_eq!(
            intent,
            TransactionIntent::TransferValue {
                to: Address::with_last_byte(0xaa),
                amount: U256::from(1_000_000_000_000_000_000u64),
                token: None,
            }
        );
    }

    #[test]
    fn test_empty_token_is_native() {
        let intent: TransactionIntent = serde_json::from_value(json!({
            "type": "transferValue",
            "to": "0x00000000000000000000000000000000000000aa",
            "amount": 1,
            "token": "",
        }))
        .unwrap();
        assert!(matches!(intent, TransactionIntent::TransferValue { token: None, .. }));
    }

    #[test]
    fn test_raw_call_defaults() {
        let intent: TransactionIntent = serde_json::from_value(json!({
            "type": "rawCall",
            "to": "0x00000000000000000000000000000000000000bb",
        }))
        .unwrap();
        assert_eq!(
            intent,
            TransactionIntent::RawCall {
                to: Address::with_last_byte(0xbb),
                value: U256::ZERO,
                data: Bytes::new(),
            }
        );
    }

    #[test]
    fn test_contract_call_fields() {
        let intent: TransactionIntent = serde_json::from_value(json!({
            "type": "callContract",
            "to": "0x00000000000000000000000000000000000000cc",
            "abiDescription": ["function approve(address spender, uint256 amount)"],
            "functionSignature": "approve",
            "inputValues": { "amount": "5" },
        }))
        .unwrap();
        let TransactionIntent::CallContract(call) = intent else {
            panic!("expected contract call");
        };
        assert_eq!(call.value, U256::ZERO);
        assert_eq!(call.function_signature, "approve");
        assert_eq!(call.input_values.get("amount"), Some(&json!("5")));
    }

    #[test]
    fn test_malformed_fields_are_named() {
        let err = serde_json::from_value::<TransactionIntent>(json!({
            "type": "transferCollectible",
            "from": "0x00000000000000000000000000000000000000aa",
            "to": "0x00000000000000000000000000000000000000bb",
            "contractAddress": "0xnotanaddress",
            "tokenId": 1,
        }))
        .unwrap_err();
        assert!(err.to_string().contains("contractAddress"));

        let err = serde_json::from_value::<TransactionIntent>(json!({
            "type": "transferValue",
            "to": "0x00000000000000000000000000000000000000aa",
            "amount": "-3",
        }))
        .unwrap_err();
        assert!(err.to_string().contains("amount"));
    }

    #[test]
    fn test_batch_entry_operation() {
        let entry: BatchEntry = serde_json::from_value(json!({
            "type": "rawCall",
            "to": "0x00000000000000000000000000000000000000bb",
            "data": "0x1234",
            "operation": "delegatecall",
        }))
        .unwrap();
        assert_eq!(entry.operation, Operation::DelegateCall);

        let entry: BatchEntry = serde_json::from_value(json!({
            "type": "rawCall",
            "to": "0x00000000000000000000000000000000000000bb",
        }))
        .unwrap();
        assert_eq!(entry.operation, Operation::Call);
    }
}
