// src/main.rs
//! Xian wallet command line entry point.
use anyhow::{bail, Context, Result};
use clap::Parser;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};
use zeroize::Zeroizing;

use xian_wallet::blockchain::traits::NodeClient;
use xian_wallet::cli::{Cli, Commands};
use xian_wallet::core::config::ClientConfig;
use xian_wallet::core::value::Kwargs;
use xian_wallet::crypto::{DerivationPath, KeyDerivation, SigningWallet};
use xian_wallet::network::HttpNodeClient;
use xian_wallet::service::XianService;
use xian_wallet::transaction::BroadcastOutcome;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging()?;

    match cli.command {
        Commands::NewWallet { ref path, show_seed } => {
            let path: DerivationPath = path.parse()?;
            let (kd, seed) = KeyDerivation::generate_new()?;
            let wallet = kd.wallet(&path)?;
            println!("path:       {}", path);
            println!("public_key: {}", wallet.public_key_hex());
            if show_seed {
                let seed_hex = Zeroizing::new(hex::encode(&seed[..]));
                println!("seed:       {}", seed_hex.as_str());
            } else {
                eprintln!("seed not shown; rerun with --show-seed to back it up");
            }
        }
        Commands::Derive { ref seed, ref path } => {
            let path: DerivationPath = path.parse()?;
            let seed_bytes = Zeroizing::new(
                hex::decode(seed.trim().trim_start_matches("0x")).context("seed is not valid hex")?,
            );
            let wallet = KeyDerivation::from_slice(&seed_bytes)?.wallet(&path)?;
            println!("path:       {}", path);
            println!("public_key: {}", wallet.public_key_hex());
        }
        Commands::Balance { ref address } => {
            let config = load_config(&cli)?;
            let address = match address {
                Some(address) => address.clone(),
                None => wallet_from_env()?.public_key_hex(),
            };
            let client = HttpNodeClient::new(&config)?;
            let balance = client.balance(&address).await?;
            println!("{}", balance);
        }
        Commands::Send { amount, ref to } => {
            let config = load_config(&cli)?;
            let service = XianService::new(&config, wallet_from_env()?)?;
            let result = service.send(amount, to).await?;
            if !result.success {
                bail!("node refused transfer to {}", to);
            }
            println!("{}", result.hash);
        }
        Commands::Call { ref contract, ref function, ref kwargs, simulate } => {
            let config = load_config(&cli)?;
            let kwargs: Kwargs =
                serde_json::from_str(kwargs).context("--kwargs must be a JSON object")?;
            let client: Arc<dyn NodeClient> = Arc::new(HttpNodeClient::new(&config)?);
            let service = XianService::with_client(client, wallet_from_env()?, &config);
            let pipeline = service.transactions();

            if simulate {
                let unsigned = pipeline.create_unsigned(contract, function, kwargs).await;
                let result = pipeline.simulate(&unsigned.payload).await;
                println!("{}", serde_json::to_string_pretty(&result)?);
                if !result.success {
                    bail!("simulation failed: {}", result.error.unwrap_or_default());
                }
                return Ok(());
            }

            match pipeline.submit(contract, function, kwargs).await? {
                BroadcastOutcome::Accepted => println!("accepted"),
                BroadcastOutcome::Rejected { status, reason } => {
                    bail!("rejected by node ({}): {}", status, reason)
                }
                BroadcastOutcome::Failed(e) => bail!("broadcast failed: {}", e),
            }
        }
    }

    Ok(())
}

fn init_logging() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

fn load_config(cli: &Cli) -> Result<ClientConfig> {
    let mut config = match &cli.config {
        Some(path) => ClientConfig::load(path)?,
        None => ClientConfig::default(),
    }
    .with_env_overrides();
    if let Some(url) = &cli.node_url {
        config.node_url = url.clone();
    }
    config.validate()?;
    info!(node_url = %config.node_url, "Using node");
    Ok(config)
}

fn wallet_from_env() -> Result<SigningWallet> {
    let key = Zeroizing::new(
        std::env::var("XIAN_PRIVATE_KEY").context("XIAN_PRIVATE_KEY is not set")?,
    );
    Ok(SigningWallet::from_hex(&key)?)
}
