use std::fmt::{self, Display, Formatter};

use alloy_primitives::Address;
use intent_types::{parse::parse_address, IntentError};

use crate::{
    batch::resolve_multisend,
    dispatch::{ExecutionModule, ModuleTransport},
};

/// Arguments for binaries that submit intent batches through an execution module.
#[derive(clap::Parser, Debug, Clone)]
#[group(skip)]
pub struct Arguments {
    /// Address of the execution module that module transactions are sent to.
    #[clap(long, env)]
    pub module_address: Address,

    /// MultiSend relay used for batches of more than one call. Empty selects the default
    /// Safe MultiSend v1.3.0 deployment.
    #[clap(long, env, default_value = "")]
    pub multisend_address: String,
}

impl Arguments {
    /// The configured relay, falling back to the default deployment for an empty or zero value.
    pub fn multisend_address(&self) -> Result<Address, IntentError> {
        let configured = self.multisend_address.trim();
        if configured.is_empty() {
            return Ok(resolve_multisend(None));
        }
        let address = parse_address("multisend_address", configured)?;
        Ok(resolve_multisend(Some(address)))
    }

    pub fn execution_module<T: ModuleTransport>(
        &self,
        transport: T,
    ) -> Result<ExecutionModule<T>, IntentError> {
        Ok(ExecutionModule::new(self.module_address, transport)
            .with_multisend(self.multisend_address()?))
    }
}

impl Display for Arguments {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        writeln!(f, "module_address: {}", self.module_address)?;
        match self.multisend_address() {
            Ok(address) => writeln!(f, "multisend_address: {address}")?,
            Err(_) => writeln!(f, "multisend_address: invalid ({})", self.multisend_address)?,
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::DEFAULT_MULTISEND_ADDRESS;
    use clap::Parser;

    const MODULE: &str = "0x00000000000000000000000000000000000000aa";

    #[test]
    fn test_empty_multisend_falls_back_to_default() {
        let args = Arguments::try_parse_from([
            "test",
            "--module-address",
            MODULE,
            "--multisend-address",
            "",
        ])
        .unwrap();
        assert_eq!(args.multisend_address().unwrap(), DEFAULT_MULTISEND_ADDRESS);
        assert_eq!(args.module_address, Address::with_last_byte(0xaa));
    }

    #[test]
    fn test_zero_multisend_falls_back_to_default() {
        let args = Arguments::try_parse_from([
            "test",
            "--module-address",
            MODULE,
            "--multisend-address",
            "0x0000000000000000000000000000000000000000",
        ])
        .unwrap();
        assert_eq!(args.multisend_address().unwrap(), DEFAULT_MULTISEND_ADDRESS);
    }

    #[test]
    fn test_explicit_multisend_is_used() {
        let args = Arguments::try_parse_from([
            "test",
            "--module-address",
            MODULE,
            "--multisend-address",
            "0x00000000000000000000000000000000000000bb",
        ])
        .unwrap();
        assert_eq!(args.multisend_address().unwrap(), Address::with_last_byte(0xbb));
        assert!(args.to_string().starts_with("module_address: "));
    }

    #[test]
    fn test_malformed_multisend_is_reported() {
        let args = Arguments::try_parse_from([
            "test",
            "--module-address",
            MODULE,
            "--multisend-address",
            "0x12",
        ])
        .unwrap();
        assert!(matches!(
            args.multisend_address(),
            Err(IntentError::InvalidAddress { field, .. }) if field == "multisend_address"
        ));
    }
}
