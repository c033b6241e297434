use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Xian wallet CLI (library-facing definitions)
#[derive(Debug, Parser)]
#[command(
    name = "xian-wallet",
    about = "Xian ledger wallet",
    version,
    disable_help_subcommand = true
)]
pub struct Cli {
    /// TOML file with node settings; XIAN_* environment variables override it
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Node base URL, overrides the config file and XIAN_NODE_URL
    #[arg(long, global = true)]
    pub node_url: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Generate a fresh seed and print the wallet at the given path
    NewWallet {
        #[arg(long, default_value = "m/44/0/0/0/0")]
        path: String,
        /// Print the 64-byte seed in hex. Anyone holding it controls every derived key.
        #[arg(long)]
        show_seed: bool,
    },
    /// Derive the wallet at `path` from an existing hex seed
    Derive {
        #[arg(long)]
        seed: String,
        #[arg(long, default_value = "m/44/0/0/0/0")]
        path: String,
    },
    Balance {
        /// Hex public key; defaults to the XIAN_PRIVATE_KEY wallet
        #[arg(long)]
        address: Option<String>,
    },
    /// Native transfer signed by XIAN_PRIVATE_KEY
    Send {
        #[arg(long)]
        amount: u64,
        #[arg(long)]
        to: String,
    },
    /// Build, sign and broadcast a contract call (or only dry-run it)
    Call {
        #[arg(long)]
        contract: String,
        #[arg(long)]
        function: String,
        /// Keyword arguments as a JSON object
        #[arg(long, default_value = "{}")]
        kwargs: String,
        #[arg(long)]
        simulate: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_call() {
        let cli = Cli::parse_from([
            "xian-wallet",
            "--node-url",
            "http://node:26657",
            "call",
            "--contract",
            "currency",
            "--function",
            "transfer",
            "--kwargs",
            r#"{"to":"bob","amount":5}"#,
            "--simulate",
        ]);
        assert_eq!(cli.node_url.as_deref(), Some("http://node:26657"));
        match cli.command {
            Commands::Call { contract, function, simulate, .. } => {
                assert_eq!(contract, "currency");
                assert_eq!(function, "transfer");
                assert!(simulate);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_derive_default_path() {
        let cli = Cli::parse_from(["xian-wallet", "derive", "--seed", "00"]);
        match cli.command {
            Commands::Derive { path, .. } => assert_eq!(path, "m/44/0/0/0/0"),
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_send_requires_amount() {
        assert!(Cli::try_parse_from(["xian-wallet", "send", "--to", "bob"]).is_err());
    }
}
