//! Runtime ABI resolution for contract calls described by human-readable signatures.
//!
//! Arguments arrive as JSON values keyed by parameter name and are tokenized against the declared
//! parameter types. Parameters without a supplied value are encoded as their type's zero value.

use alloy_primitives::U256;
use ethers::{
    abi::{Abi, Function, ParamType, Token},
    types::{self as ethers_types, H160},
};
use intent_types::{
    parse::{parse_address, parse_bytes, parse_uint, parse_uint_str},
    ContractCall,
};
use serde_json::Value;
use tracing::debug;

use crate::{
    compat::{to_ethers_u256, to_h160},
    errors::EncodeError,
};

/// Encode the calldata of a runtime-described contract call.
pub fn encode_contract_call(call: &ContractCall) -> Result<Vec<u8>, EncodeError> {
    let abi = parse_abi(&call.abi)?;
    let function = resolve_function(&abi, &call.function_signature)?;

    let mut tokens = Vec::with_capacity(function.inputs.len());
    for (index, param) in function.inputs.iter().enumerate() {
        let key = if param.name.is_empty() {
            index.to_string()
        } else {
            param.name.clone()
        };
        let token = match call.input_values.get(&key) {
            Some(value) => tokenize(&key, &param.kind, value)?,
            None => zero_token(&param.kind),
        };
        tokens.push(token);
    }

    for key in call.input_values.keys() {
        let known = function
            .inputs
            .iter()
            .enumerate()
            .any(|(index, param)| {
                param.name == *key || (param.name.is_empty() && index.to_string() == *key)
            });
        if !known {
            debug!(
                function = %function.name,
                param = %key,
                "ignoring value for undeclared parameter"
            );
        }
    }

    function
        .encode_input(&tokens)
        .map_err(|source| EncodeError::Abi {
            signature: canonical_signature(function),
            source,
        })
}

/// Parse human-readable ABI entries. Entries without a leading keyword are treated as functions.
pub fn parse_abi(entries: &[String]) -> Result<Abi, EncodeError> {
    let normalized: Vec<String> = entries.iter().map(|entry| normalize_entry(entry)).collect();
    let refs: Vec<&str> = normalized.iter().map(String::as_str).collect();
    ethers::abi::parse_abi(&refs).map_err(|err| EncodeError::InvalidAbi(err.to_string()))
}

/// Find a function by plain name (must be unambiguous), canonical signature or human-readable
/// entry.
pub fn resolve_function<'a>(abi: &'a Abi, signature: &str) -> Result<&'a Function, EncodeError> {
    let wanted = signature.trim();
    let unknown = || EncodeError::UnknownFunction(wanted.to_string());

    if !wanted.contains('(') {
        let candidates = abi.functions_by_name(wanted).map_err(|_| unknown())?;
        return match candidates.as_slice() {
            [function] => Ok(function),
            [] => Err(unknown()),
            _ => Err(EncodeError::AmbiguousFunction(wanted.to_string())),
        };
    }

    let parsed = parse_abi(&[wanted.to_string()]).map_err(|_| unknown())?;
    let target = parsed
        .functions()
        .next()
        .map(canonical_signature)
        .ok_or_else(unknown)?;
    abi.functions()
        .find(|function| canonical_signature(function) == target)
        .ok_or_else(unknown)
}

/// `name(type1,type2,...)`, the form hashed into a function selector.
pub fn canonical_signature(function: &Function) -> String {
    let inputs: Vec<String> = function
        .inputs
        .iter()
        .map(|param| param.kind.to_string())
        .collect();
    format!("{}({})", function.name, inputs.join(","))
}

/// Canonical zero value of a parameter type.
pub fn zero_token(kind: &ParamType) -> Token {
    match kind {
        ParamType::Address => Token::Address(H160::zero()),
        ParamType::Bytes => Token::Bytes(Vec::new()),
        ParamType::Int(_) => Token::Int(ethers_types::U256::zero()),
        ParamType::Uint(_) => Token::Uint(ethers_types::U256::zero()),
        ParamType::Bool => Token::Bool(false),
        ParamType::String => Token::String(String::new()),
        ParamType::Array(_) => Token::Array(Vec::new()),
        ParamType::FixedBytes(len) => Token::FixedBytes(vec![0u8; *len]),
        ParamType::FixedArray(inner, len) => {
            Token::FixedArray((0..*len).map(|_| zero_token(inner)).collect())
        }
        ParamType::Tuple(components) => Token::Tuple(components.iter().map(zero_token).collect()),
    }
}

/// Convert a JSON argument into a token of the declared type.
///
/// `path` names the argument in errors, eg `orders[1].0` for a tuple field inside an array.
pub fn tokenize(path: &str, kind: &ParamType, value: &Value) -> Result<Token, EncodeError> {
    let mismatch = || EncodeError::ArgumentType {
        param: path.to_string(),
        expected: kind.to_string(),
        value: value.to_string(),
    };
    let out_of_range = || EncodeError::ArgumentOutOfRange {
        param: path.to_string(),
        ty: kind.to_string(),
        value: value.to_string(),
    };

    let token = match kind {
        ParamType::Address => {
            let s = value.as_str().ok_or_else(mismatch)?;
            Token::Address(to_h160(parse_address(path, s)?))
        }
        ParamType::Bytes => {
            let s = value.as_str().ok_or_else(mismatch)?;
            Token::Bytes(parse_bytes(path, s)?.to_vec())
        }
        ParamType::FixedBytes(len) => {
            let s = value.as_str().ok_or_else(mismatch)?;
            let bytes = parse_bytes(path, s)?;
            if bytes.len() != *len {
                return Err(mismatch());
            }
            Token::FixedBytes(bytes.to_vec())
        }
        ParamType::Uint(bits) => {
            let parsed = parse_uint(path, value)?;
            if parsed.bit_len() > *bits {
                return Err(out_of_range());
            }
            Token::Uint(to_ethers_u256(parsed))
        }
        ParamType::Int(bits) => {
            let (negative, magnitude) = parse_signed(path, value).ok_or_else(mismatch)??;
            let limit = U256::from(1u64) << (*bits - 1);
            let fits = if negative {
                magnitude <= limit
            } else {
                magnitude < limit
            };
            if !fits {
                return Err(out_of_range());
            }
            let raw = if negative {
                magnitude.wrapping_neg()
            } else {
                magnitude
            };
            Token::Int(to_ethers_u256(raw))
        }
        ParamType::Bool => match value {
            Value::Bool(b) => Token::Bool(*b),
            Value::String(s) if s == "true" => Token::Bool(true),
            Value::String(s) if s == "false" => Token::Bool(false),
            _ => return Err(mismatch()),
        },
        ParamType::String => Token::String(value.as_str().ok_or_else(mismatch)?.to_string()),
        ParamType::Array(inner) => {
            let items = value.as_array().ok_or_else(mismatch)?;
            Token::Array(tokenize_items(path, inner, items)?)
        }
        ParamType::FixedArray(inner, len) => {
            let items = value.as_array().ok_or_else(mismatch)?;
            if items.len() != *len {
                return Err(mismatch());
            }
            Token::FixedArray(tokenize_items(path, inner, items)?)
        }
        ParamType::Tuple(components) => {
            let items = value.as_array().ok_or_else(mismatch)?;
            if items.len() != components.len() {
                return Err(mismatch());
            }
            let tokens = components
                .iter()
                .zip(items)
                .enumerate()
                .map(|(index, (component, item))| {
                    tokenize(&format!("{path}.{index}"), component, item)
                })
                .collect::<Result<Vec<_>, _>>()?;
            Token::Tuple(tokens)
        }
    };
    Ok(token)
}

fn tokenize_items(
    path: &str,
    inner: &ParamType,
    items: &[Value],
) -> Result<Vec<Token>, EncodeError> {
    items
        .iter()
        .enumerate()
        .map(|(index, item)| tokenize(&format!("{path}[{index}]"), inner, item))
        .collect()
}

/// Split a signed JSON integer into sign and magnitude. `None` when the value is not an integer.
fn parse_signed(path: &str, value: &Value) -> Option<Result<(bool, U256), EncodeError>> {
    match value {
        Value::Number(n) => {
            if let Some(u) = n.as_u64() {
                Some(Ok((false, U256::from(u))))
            } else {
                n.as_i64()
                    .map(|i| Ok((i < 0, U256::from(i.unsigned_abs()))))
            }
        }
        Value::String(s) => {
            let s = s.trim();
            let parsed = match s.strip_prefix('-') {
                Some(digits) => parse_uint_str(path, digits).map(|m| (true, m)),
                None => parse_uint_str(path, s).map(|m| (false, m)),
            };
            Some(parsed.map_err(EncodeError::from))
        }
        _ => None,
    }
}

fn normalize_entry(entry: &str) -> String {
    let entry = entry.trim();
    const KEYWORDS: [&str; 6] = [
        "function ",
        "event ",
        "error ",
        "constructor",
        "fallback",
        "receive",
    ];
    if KEYWORDS.iter().any(|keyword| entry.starts_with(keyword)) {
        entry.to_string()
    } else {
        format!("function {entry}")
    }
}
