//! `platon-aide` command-line client.

use std::path::PathBuf;
use std::time::Duration;

use alloy::primitives::utils::parse_ether;
use clap::{Parser, Subcommand};
use serde::Serialize;

use platon_aide::config::{load_config, AideConfig};
use platon_aide::observability::init_logging;
use platon_aide::{Account, BlockId, PlatonAide, ReturnMode, TxOptions};

#[derive(Parser)]
#[command(name = "platon-aide")]
#[command(about = "Convenience client for PlatON nodes", long_about = None)]
struct Cli {
    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Node endpoint, overriding the config file
    #[arg(short, long)]
    uri: Option<String>,

    /// Return mode for transactions: txn, hash or receipt
    #[arg(short, long)]
    returns: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the node's chain id
    ChainId,
    /// Print the current block height
    BlockNumber,
    /// Block until the chain reaches a height
    WaitBlock {
        /// Target block height
        #[arg(long)]
        to: Option<u64>,
        /// Seconds between polls
        #[arg(long)]
        interval: Option<u64>,
        /// Give up after this many seconds
        #[arg(long)]
        timeout: Option<u64>,
    },
    /// Recover the public key of the node that sealed a block
    EcRecover {
        /// latest, a height, or a block hash
        #[arg(long, default_value = "latest")]
        block: String,
    },
    /// Print node id, BLS key and program version
    NodeInfo,
    /// Generate a new account
    CreateAccount,
    /// Transfer LAT to an address
    Transfer {
        /// Recipient (hex or bech32)
        #[arg(long)]
        to: String,
        /// Amount in LAT, e.g. 1.5
        #[arg(long)]
        amount: String,
        /// Environment variable holding the sender's private key
        #[arg(long)]
        key_env: Option<String>,
    },
}

/// Config file plus command-line overrides, validated before any node contact.
fn resolve_config(cli: &Cli) -> Result<AideConfig, Box<dyn std::error::Error>> {
    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => AideConfig::default(),
    };
    if let Some(uri) = &cli.uri {
        config.node.uri = uri.clone();
    }
    if let Some(wait_timeout) = match &cli.command {
        Commands::WaitBlock { timeout, .. } => *timeout,
        _ => None,
    } {
        config.wait.max_wait_secs = Some(wait_timeout);
    }
    if let Some(returns) = &cli.returns {
        config.transactions.returns = returns.parse::<ReturnMode>()?;
    }
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = resolve_config(&cli)?;

    init_logging(&config.observability.log_level);

    let mut aide = PlatonAide::connect(&config).await?;

    match cli.command {
        Commands::ChainId => print_json(&aide.chain_id())?,
        Commands::BlockNumber => print_json(&aide.block_number().await?)?,
        Commands::WaitBlock { to, interval, .. } => {
            let cancel = aide.cancellation().clone();
            tokio::spawn(async move {
                if tokio::signal::ctrl_c().await.is_ok() {
                    cancel.cancel();
                }
            });
            let reached = aide.wait_block(to, interval.map(Duration::from_secs)).await?;
            print_json(&reached)?;
        }
        Commands::EcRecover { block } => {
            let block: BlockId = block.parse()?;
            print_json(&aide.ec_recover(block).await?)?;
        }
        Commands::NodeInfo => print_json(&aide.node_info().await?)?,
        Commands::CreateAccount => {
            let (address, private_key) = aide.create_account()?;
            print_json(&serde_json::json!({
                "address": address,
                "private_key": private_key,
            }))?;
        }
        Commands::Transfer { to, amount, key_env } => {
            let amount = parse_ether(&amount)?;
            if let Some(var) = key_env {
                let account = Account::from_env(&var, aide.hrp())?;
                aide.set_default_account(account);
            }
            let outcome = aide.transfer().transfer(&to, amount, TxOptions::new()).await?;
            print_json(&outcome)?;
        }
    }

    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
