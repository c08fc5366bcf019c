//! Runtime variables: client handle, active account, active network id.
//!
//! Each variable is read through a getter so hosts can point them at live
//! state (an injected provider, a wallet UI selection) instead of values
//! frozen at startup. `VariableOverrides` replaces any subset of them.

use std::fmt;
use std::sync::Arc;

use crate::blockchain::client::Web3Client;

pub type ClientGetter = Arc<dyn Fn() -> Arc<dyn Web3Client> + Send + Sync>;
pub type AccountGetter = Arc<dyn Fn() -> String + Send + Sync>;
pub type NetworkIdGetter = Arc<dyn Fn() -> u64 + Send + Sync>;

/// The three getters the wallet reads on every call.
#[derive(Clone)]
pub struct RuntimeVariables {
    client: ClientGetter,
    account: AccountGetter,
    network_id: NetworkIdGetter,
}

impl RuntimeVariables {
    pub fn new(client: ClientGetter, account: AccountGetter, network_id: NetworkIdGetter) -> Self {
        Self {
            client,
            account,
            network_id,
        }
    }

    /// Getters that always return the given values.
    pub fn fixed(client: Arc<dyn Web3Client>, account: impl Into<String>, network_id: u64) -> Self {
        let account = account.into();
        Self {
            client: Arc::new(move || client.clone()),
            account: Arc::new(move || account.clone()),
            network_id: Arc::new(move || network_id),
        }
    }

    pub fn client(&self) -> Arc<dyn Web3Client> {
        (self.client)()
    }

    pub fn account(&self) -> String {
        (self.account)()
    }

    pub fn network_id(&self) -> u64 {
        (self.network_id)()
    }

    /// A copy with every getter present in `overrides` swapped in.
    pub fn with_overrides(&self, overrides: VariableOverrides) -> Self {
        Self {
            client: overrides.client.unwrap_or_else(|| self.client.clone()),
            account: overrides.account.unwrap_or_else(|| self.account.clone()),
            network_id: overrides.network_id.unwrap_or_else(|| self.network_id.clone()),
        }
    }
}

impl fmt::Debug for RuntimeVariables {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuntimeVariables")
            .field("account", &self.account())
            .field("network_id", &self.network_id())
            .finish_non_exhaustive()
    }
}

/// Partial set of getters to install over the current ones.
#[derive(Clone, Default)]
pub struct VariableOverrides {
    pub client: Option<ClientGetter>,
    pub account: Option<AccountGetter>,
    pub network_id: Option<NetworkIdGetter>,
}

impl VariableOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn client<F>(mut self, getter: F) -> Self
    where
        F: Fn() -> Arc<dyn Web3Client> + Send + Sync + 'static,
    {
        self.client = Some(Arc::new(getter));
        self
    }

    pub fn account<F>(mut self, getter: F) -> Self
    where
        F: Fn() -> String + Send + Sync + 'static,
    {
        self.account = Some(Arc::new(getter));
        self
    }

    pub fn network_id<F>(mut self, getter: F) -> Self
    where
        F: Fn() -> u64 + Send + Sync + 'static,
    {
        self.network_id = Some(Arc::new(getter));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.client.is_none() && self.account.is_none() && self.network_id.is_none()
    }
}
