//! Native and ERC20 balance queries.

use alloy::primitives::utils::Unit;
use alloy::primitives::{Address, U256};

use crate::blockchain::types::BlockchainResult;
use crate::blockchain::units::to_decimal;
use crate::blockchain::wallet::Wallet;

impl Wallet {
    fn owner_or_active(&self, address: Option<Address>) -> BlockchainResult<Address> {
        match address {
            Some(address) => Ok(address),
            None => self.active_address(),
        }
    }

    /// Wei balance of `address`, or of the active account.
    pub async fn get_raw_balance(&self, address: Option<Address>) -> BlockchainResult<U256> {
        let owner = self.owner_or_active(address)?;
        self.client().balance(owner).await
    }

    /// Native balance rendered in `unit`.
    pub async fn get_balance(
        &self,
        address: Option<Address>,
        unit: Unit,
    ) -> BlockchainResult<String> {
        let raw = self.get_raw_balance(address).await?;
        to_decimal(&raw.to_string(), usize::from(unit.get()))
    }

    /// ERC20 balance rendered with the token's own decimals.
    pub async fn get_token_balance(
        &self,
        token: Address,
        address: Option<Address>,
    ) -> BlockchainResult<String> {
        let owner = self.owner_or_active(address)?;
        let client = self.client();

        let (balance, decimals) = tokio::try_join!(
            client.token_balance(token, owner),
            client.token_decimals(token)
        )?;

        tracing::debug!(%token, %owner, %balance, decimals, "Token balance fetched");
        to_decimal(&balance.to_string(), usize::from(decimals))
    }
}
