//! Known network metadata and Etherscan link formatting.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::blockchain::types::{BlockchainError, BlockchainResult};

/// Static description of a supported Ethereum network.
#[derive(Debug, Clone, Serialize)]
pub struct NetworkDescriptor {
    pub id: u64,
    pub name: &'static str,
    /// Consensus type, e.g. "PoW" or "PoA".
    pub kind: &'static str,
    /// Subdomain prefix on etherscan.io, empty for mainnet.
    pub explorer_prefix: &'static str,
}

const NETWORKS: &[NetworkDescriptor] = &[
    NetworkDescriptor {
        id: 1,
        name: "Mainnet",
        kind: "PoW",
        explorer_prefix: "",
    },
    NetworkDescriptor {
        id: 3,
        name: "Ropsten",
        kind: "PoW",
        explorer_prefix: "ropsten.",
    },
    NetworkDescriptor {
        id: 4,
        name: "Rinkeby",
        kind: "PoA",
        explorer_prefix: "rinkeby.",
    },
    NetworkDescriptor {
        id: 42,
        name: "Kovan",
        kind: "PoA",
        explorer_prefix: "kovan.",
    },
];

/// Look up a network by id.
pub fn get_network(network_id: u64) -> BlockchainResult<&'static NetworkDescriptor> {
    NETWORKS
        .iter()
        .find(|n| n.id == network_id)
        .ok_or(BlockchainError::UnknownNetwork(network_id))
}

/// All known networks.
pub fn supported_networks() -> &'static [NetworkDescriptor] {
    NETWORKS
}

pub fn network_name(network_id: u64) -> BlockchainResult<&'static str> {
    get_network(network_id).map(|n| n.name)
}

pub fn network_type(network_id: u64) -> BlockchainResult<&'static str> {
    get_network(network_id).map(|n| n.kind)
}

/// Kind of object an Etherscan link points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EtherscanType {
    Transaction,
    Address,
    Token,
}

impl EtherscanType {
    fn path(self) -> &'static str {
        match self {
            EtherscanType::Transaction => "tx",
            EtherscanType::Address => "address",
            EtherscanType::Token => "token",
        }
    }
}

impl fmt::Display for EtherscanType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EtherscanType::Transaction => "transaction",
            EtherscanType::Address => "address",
            EtherscanType::Token => "token",
        };
        f.write_str(name)
    }
}

impl FromStr for EtherscanType {
    type Err = BlockchainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "transaction" => Ok(EtherscanType::Transaction),
            "address" => Ok(EtherscanType::Address),
            "token" => Ok(EtherscanType::Token),
            other => Err(BlockchainError::UnknownEtherscanType(other.to_string())),
        }
    }
}

/// Build an Etherscan URL for `data` on the given network.
pub fn etherscan_format(
    kind: EtherscanType,
    data: &str,
    network_id: u64,
) -> BlockchainResult<String> {
    let network = get_network(network_id)?;
    Ok(format!(
        "https://{}etherscan.io/{}/{}",
        network.explorer_prefix,
        kind.path(),
        data
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_network_names() {
        assert_eq!(network_name(1).unwrap(), "Mainnet");
        assert_eq!(network_name(3).unwrap(), "Ropsten");
        assert_eq!(network_name(4).unwrap(), "Rinkeby");
        assert_eq!(network_name(42).unwrap(), "Kovan");
    }

    #[test]
    fn test_network_types() {
        assert_eq!(network_type(1).unwrap(), "PoW");
        assert_eq!(network_type(4).unwrap(), "PoA");
        assert_eq!(network_type(42).unwrap(), "PoA");
    }

    #[test]
    fn test_unknown_network() {
        let err = network_name(99).unwrap_err();
        assert!(matches!(err, BlockchainError::UnknownNetwork(99)));
        assert!(network_type(11155111).is_err());
    }

    #[test]
    fn test_supported_networks_len() {
        assert_eq!(supported_networks().len(), 4);
        let prefixed = supported_networks()
            .iter()
            .filter(|n| !n.explorer_prefix.is_empty())
            .count();
        assert_eq!(prefixed, 3);
    }

    #[test]
    fn test_etherscan_rinkeby_address() {
        let url = etherscan_format(EtherscanType::Address, "0xabc", 4).unwrap();
        assert_eq!(url, "https://rinkeby.etherscan.io/address/0xabc");
    }

    #[test]
    fn test_etherscan_mainnet_tx() {
        let url = etherscan_format(EtherscanType::Transaction, "0xdead", 1).unwrap();
        assert_eq!(url, "https://etherscan.io/tx/0xdead");
    }

    #[test]
    fn test_etherscan_kovan_token() {
        let url = etherscan_format(EtherscanType::Token, "0x1", 42).unwrap();
        assert_eq!(url, "https://kovan.etherscan.io/token/0x1");
    }

    #[test]
    fn test_etherscan_unknown_network() {
        assert!(etherscan_format(EtherscanType::Address, "0xabc", 5).is_err());
    }

    #[test]
    fn test_etherscan_type_parse() {
        assert_eq!(
            "transaction".parse::<EtherscanType>().unwrap(),
            EtherscanType::Transaction
        );
        let err = "block".parse::<EtherscanType>().unwrap_err();
        assert_eq!(err.to_string(), "Unrecognized etherscan type: block");
    }
}
