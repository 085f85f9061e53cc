/// Malformed intent input.
pub use intent_types::IntentError;

/// Errors while turning intents into calldata.
#[derive(Debug, thiserror::Error)]
pub enum EncodeError {
    #[error(transparent)]
    Intent(#[from] IntentError),
    #[error("invalid ABI description: {0}")]
    InvalidAbi(String),
    #[error("function `{0}` not found in the supplied ABI")]
    UnknownFunction(String),
    #[error("function name `{0}` is overloaded; pass the full signature")]
    AmbiguousFunction(String),
    #[error("parameter `{param}`: expected {expected}, got `{value}`")]
    ArgumentType {
        param: String,
        expected: String,
        value: String,
    },
    #[error("parameter `{param}`: `{value}` does not fit in {ty}")]
    ArgumentOutOfRange {
        param: String,
        ty: String,
        value: String,
    },
    #[error("failed to encode call to `{signature}`: {source}")]
    Abi {
        signature: String,
        #[source]
        source: ethers::abi::Error,
    },
    #[error("cannot encode an empty batch")]
    EmptyBatch,
    #[error("override `{field}` cannot be combined with `gasPrice`")]
    ConflictingFees { field: &'static str },
}

/// Errors while unpacking a MultiSend payload.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    #[error("calldata is not a multiSend(bytes) call")]
    NotMultiSend,
    #[error("malformed multiSend calldata")]
    MalformedCalldata,
    #[error("unknown operation byte {0}")]
    UnknownOperation(u8),
    #[error("packed record truncated")]
    Truncated,
}

/// Errors while submitting a batch through the execution module.
#[derive(Debug, thiserror::Error)]
pub enum DispatchError<E> {
    #[error(transparent)]
    Encode(#[from] EncodeError),
    #[error("module transaction failed: {0}")]
    Transport(#[source] E),
}
