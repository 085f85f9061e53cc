//! Submission of encoded batches through an execution module.
//!
//! The module contract is modeled as its address plus an injected [`ModuleTransport`] that owns
//! network access and signing. Encoding always completes before the transport is touched.

use std::sync::Arc;

use alloy_primitives::{Address, Bytes};
use alloy_sol_types::SolCall;
use async_trait::async_trait;
use ethers::{
    providers::Middleware,
    types::{
        transaction::eip2718::TypedTransaction, Eip1559TransactionRequest, TransactionRequest,
        TxHash,
    },
};
use intent_types::{BatchEntry, ModuleCall, TxOverrides};
use tracing::{debug, instrument, warn};

use crate::{
    batch::encode_batch,
    compat::{to_ethers_bytes, to_ethers_u256, to_h160},
    errors::{DispatchError, EncodeError},
    interfaces::IExecutionModule,
};

/// A transaction addressed to the execution module.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ModuleTransaction {
    pub to: Address,
    pub data: Bytes,
    pub overrides: TxOverrides,
}

/// Network and signing capability used to submit module transactions.
#[async_trait]
pub trait ModuleTransport: Send + Sync {
    /// Handle of a submitted transaction.
    type Receipt: Send;
    type Error: std::error::Error + Send + Sync + 'static;

    async fn submit(&self, tx: ModuleTransaction) -> Result<Self::Receipt, Self::Error>;
}

/// Binding of an execution module contract.
pub struct ExecutionModule<T> {
    address: Address,
    multisend: Option<Address>,
    transport: T,
}

impl<T: ModuleTransport> ExecutionModule<T> {
    pub fn new(address: Address, transport: T) -> Self {
        Self {
            address,
            multisend: None,
            transport,
        }
    }

    /// Use a MultiSend relay other than the default deployment.
    pub fn with_multisend(mut self, multisend: Address) -> Self {
        self.multisend = Some(multisend);
        self
    }

    pub fn address(&self) -> Address {
        self.address
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Build the module transaction for `entries` without submitting it.
    pub fn prepare(
        &self,
        entries: &[BatchEntry],
        overrides: TxOverrides,
    ) -> Result<ModuleTransaction, EncodeError> {
        check_fee_overrides(&overrides)?;
        let call = encode_batch(entries, self.multisend)?;
        Ok(ModuleTransaction {
            to: self.address,
            data: exec_calldata(&call),
            overrides,
        })
    }

    /// Encode `entries` and submit them through the module's `execTransactionFromModule`.
    ///
    /// The transport result is returned unmodified; there are no retries and no timeout.
    #[instrument(skip_all, fields(module = %self.address, entries = entries.len()))]
    pub async fn exec(
        &self,
        entries: &[BatchEntry],
        overrides: TxOverrides,
    ) -> Result<T::Receipt, DispatchError<T::Error>> {
        let tx = self.prepare(entries, overrides)?;
        debug!(data_len = tx.data.len(), "submitting module transaction");
        self.transport.submit(tx).await.map_err(|err| {
            warn!(?err, "module transaction failed");
            DispatchError::Transport(err)
        })
    }
}

/// `execTransactionFromModule(to, value, data, operation)` calldata for `call`.
pub fn exec_calldata(call: &ModuleCall) -> Bytes {
    IExecutionModule::execTransactionFromModuleCall {
        to: call.to,
        value: call.value,
        data: call.data.clone(),
        operation: call.operation.into(),
    }
    .abi_encode()
    .into()
}

/// Transport backed by an ethers middleware stack (provider plus signer).
pub struct EthersTransport<M> {
    client: Arc<M>,
}

impl<M> EthersTransport<M> {
    pub fn new(client: Arc<M>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl<M: Middleware + 'static> ModuleTransport for EthersTransport<M> {
    type Receipt = TxHash;
    type Error = M::Error;

    async fn submit(&self, tx: ModuleTransaction) -> Result<TxHash, M::Error> {
        let pending = self
            .client
            .send_transaction(typed_transaction(&tx), None)
            .await?;
        Ok(pending.tx_hash())
    }
}

/// A forced `gas_price` selects a legacy request, which has no EIP-1559 fee fields.
pub fn check_fee_overrides(overrides: &TxOverrides) -> Result<(), EncodeError> {
    if overrides.gas_price.is_none() {
        return Ok(());
    }
    if overrides.max_fee_per_gas.is_some() {
        return Err(EncodeError::ConflictingFees {
            field: "maxFeePerGas",
        });
    }
    if overrides.max_priority_fee_per_gas.is_some() {
        return Err(EncodeError::ConflictingFees {
            field: "maxPriorityFeePerGas",
        });
    }
    Ok(())
}

/// Legacy request when a gas price is forced, EIP-1559 otherwise.
///
/// Expects overrides accepted by [`check_fee_overrides`].
pub fn typed_transaction(tx: &ModuleTransaction) -> TypedTransaction {
    let overrides = &tx.overrides;
    let to = to_h160(tx.to);
    let data = to_ethers_bytes(&tx.data);

    if let Some(gas_price) = overrides.gas_price {
        let mut request = TransactionRequest::new()
            .to(to)
            .data(data)
            .gas_price(to_ethers_u256(gas_price));
        if let Some(from) = overrides.from {
            request = request.from(to_h160(from));
        }
        if let Some(gas) = overrides.gas {
            request = request.gas(to_ethers_u256(gas));
        }
        if let Some(nonce) = overrides.nonce {
            request = request.nonce(to_ethers_u256(nonce));
        }
        if let Some(value) = overrides.value {
            request = request.value(to_ethers_u256(value));
        }
        return request.into();
    }

    let mut request = Eip1559TransactionRequest::new().to(to).data(data);
    if let Some(from) = overrides.from {
        request = request.from(to_h160(from));
    }
    if let Some(gas) = overrides.gas {
        request = request.gas(to_ethers_u256(gas));
    }
    if let Some(nonce) = overrides.nonce {
        request = request.nonce(to_ethers_u256(nonce));
    }
    if let Some(value) = overrides.value {
        request = request.value(to_ethers_u256(value));
    }
    if let Some(max_fee) = overrides.max_fee_per_gas {
        request = request.max_fee_per_gas(to_ethers_u256(max_fee));
    }
    if let Some(tip) = overrides.max_priority_fee_per_gas {
        request = request.max_priority_fee_per_gas(to_ethers_u256(tip));
    }
    request.into()
}
