//! web3-helpers command line.
//!
//! ```text
//! web3-helpers [--config FILE] <command>
//!
//!   offline:  to-decimal, from-decimal, etherscan, network --id, networks
//!   online:   network, balance, token-balance, sign
//! ```
//!
//! Online commands connect with the `[blockchain]` section of the config file
//! (defaults to a node on localhost:8545).

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use web3_helpers::blockchain::{self, EtherscanType, Wallet};
use web3_helpers::config::{load_config, WalletConfig};
use web3_helpers::observability::logging::init_logging;
use web3_helpers::primitives::utils::Unit;
use web3_helpers::primitives::{Address, U256};

#[derive(Parser, Debug)]
#[command(name = "web3-helpers", version, about = "Ethereum wallet helpers")]
struct Cli {
    /// Path to a TOML config file.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a raw integer amount as a decimal.
    ToDecimal { raw: U256, decimals: usize },

    /// Convert a decimal amount to a raw integer.
    FromDecimal { value: String, decimals: usize },

    /// Build an Etherscan link (type: transaction, address or token).
    Etherscan {
        kind: EtherscanType,
        data: String,
        #[arg(long)]
        network_id: Option<u64>,
    },

    /// Show the name and consensus type of a network.
    Network {
        #[arg(long)]
        id: Option<u64>,
    },

    /// List the known networks as JSON.
    Networks,

    /// Native balance of an address (default: active account).
    Balance {
        #[arg(long)]
        address: Option<Address>,
        /// Unit name (wei, gwei, ether, ...) or decimal count.
        #[arg(long, default_value = "ether")]
        unit: String,
    },

    /// ERC20 balance of an address (default: active account).
    TokenBalance {
        token: Address,
        #[arg(long)]
        address: Option<Address>,
    },

    /// personal_sign a message with the active account.
    Sign { message: String },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => WalletConfig::default(),
    };
    init_logging(&config.logging);

    tracing::debug!(command = ?cli.command, "web3-helpers starting");

    match cli.command {
        Command::ToDecimal { raw, decimals } => {
            println!("{}", blockchain::to_decimal(&raw.to_string(), decimals)?);
        }
        Command::FromDecimal { value, decimals } => {
            println!("{}", blockchain::from_decimal(&value, decimals)?);
        }
        Command::Etherscan {
            kind,
            data,
            network_id: Some(id),
        } => {
            println!("{}", blockchain::etherscan_format(kind, &data, id)?);
        }
        Command::Etherscan {
            kind,
            data,
            network_id: None,
        } => {
            let wallet = Wallet::connect(&config.blockchain).await?;
            println!("{}", wallet.etherscan_format(kind, &data, None)?);
        }
        Command::Network { id: Some(id) } => {
            println!("{} ({})", blockchain::network_name(id)?, blockchain::network_type(id)?);
        }
        Command::Network { id: None } => {
            let wallet = Wallet::connect(&config.blockchain).await?;
            println!(
                "{} ({})",
                wallet.get_network_name(None)?,
                wallet.get_network_type(None)?
            );
        }
        Command::Networks => {
            println!(
                "{}",
                serde_json::to_string_pretty(blockchain::supported_networks())?
            );
        }
        Command::Balance { address, unit } => {
            let scale: Unit = unit.parse()?;
            let wallet = Wallet::connect(&config.blockchain).await?;
            println!("{} {}", wallet.get_balance(address, scale).await?, unit);
        }
        Command::TokenBalance { token, address } => {
            let wallet = Wallet::connect(&config.blockchain).await?;
            println!("{}", wallet.get_token_balance(token, address).await?);
        }
        Command::Sign { message } => {
            let wallet = Wallet::connect(&config.blockchain).await?;
            let signed = wallet.sign_message(&message).await?;
            println!("{}", serde_json::to_string_pretty(&signed)?);
        }
    }

    Ok(())
}
