//! Contract bindings.
//!
//! ERC20 is bound statically with only the two view methods balance queries
//! need. Arbitrary contracts get a dynamic binding from their JSON ABI.

use alloy::contract::{ContractInstance, Interface};
use alloy::json_abi::JsonAbi;
use alloy::primitives::Address;
use alloy::providers::DynProvider;
use alloy::sol;

use crate::blockchain::types::{BlockchainError, BlockchainResult};
use crate::blockchain::wallet::Wallet;

sol! {
    /// Minimal ERC20 surface used for balance queries.
    #[sol(rpc)]
    interface IERC20 {
        function balanceOf(address owner) external view returns (uint256);
        function decimals() external view returns (uint8);
    }
}

/// Dynamic contract binding over the wallet's provider.
pub type Contract = ContractInstance<DynProvider>;

impl Wallet {
    /// Bind `abi` at `address` using the active client's provider.
    pub fn get_contract(&self, abi: JsonAbi, address: Address) -> BlockchainResult<Contract> {
        let provider = self.client().provider().ok_or_else(|| {
            BlockchainError::NotAvailable("client exposes no provider for contract calls".to_string())
        })?;
        Ok(ContractInstance::new(address, provider, Interface::new(abi)))
    }

    /// Bind the minimal ERC20 interface at `token`.
    pub fn erc20(&self, token: Address) -> BlockchainResult<IERC20::IERC20Instance<DynProvider>> {
        let provider = self.client().provider().ok_or_else(|| {
            BlockchainError::NotAvailable("client exposes no provider for contract calls".to_string())
        })?;
        Ok(IERC20::new(token, provider))
    }
}
