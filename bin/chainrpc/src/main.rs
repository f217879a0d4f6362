//! Chain RPC resolver
//!
//! Resolves chains to RPC endpoints from the bundled chain registry or from user-supplied chain
//! definitions, and inspects the registry.

use anyhow::{Context, Result};
use chainrpc_primitives::{ChainKey, ChainMetadata, Environment, Transport};
use chainrpc_registry::{BUNDLED_CHAINS, BUNDLED_OVERRIDES, ChainRegistry};
use chainrpc_resolver::{ApiKeys, ResolverConfig, RpcRequest, RpcResolver};
use clap::{ArgAction, Parser, Subcommand};
use std::{convert::Infallible, fs, path::PathBuf};
use tabled::{Table, Tabled};
use tracing::debug;

mod logger;

/// The chainrpc command
#[derive(Parser, Debug, Clone)]
#[command(about = "Resolves chains to ready-to-use RPC endpoints")]
struct Cli {
    /// Verbosity level (-v, -vv, -vvv).
    /// Without the flag only warnings and errors are printed.
    #[arg(long, short, action = ArgAction::Count, default_value_t = 0, global = true)]
    v: u8,
    /// Disable logging entirely.
    #[arg(long, short, global = true, conflicts_with = "v")]
    quiet: bool,
    /// Deployment environment. Non-production environments are routed to the preview RPC host.
    #[arg(
        long,
        env = "CHAINRPC_ENVIRONMENT",
        default_value_t = Environment::Production,
        global = true
    )]
    environment: Environment,
    /// Value for `${THIRDWEB_API_KEY}` placeholders.
    #[arg(long, env = "THIRDWEB_API_KEY", hide_env_values = true, global = true)]
    thirdweb_api_key: Option<String>,
    /// Value for `${INFURA_API_KEY}` placeholders.
    #[arg(long, env = "INFURA_API_KEY", hide_env_values = true, global = true)]
    infura_api_key: Option<String>,
    /// Value for `${ALCHEMY_API_KEY}` placeholders.
    #[arg(long, env = "ALCHEMY_API_KEY", hide_env_values = true, global = true)]
    alchemy_api_key: Option<String>,
    /// JSON file with base chain definitions. Defaults to the bundled snapshot.
    #[arg(long, global = true)]
    chains: Option<PathBuf>,
    /// JSON file with override records. Defaults to the bundled overrides.
    #[arg(long, global = true)]
    overrides: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone)]
enum Command {
    /// Prints the preferred RPC endpoint of a chain.
    Resolve {
        /// Chain id or slug.
        #[arg(value_parser = parse_chain_key)]
        chain: ChainKey,
        /// Identifier of the calling application.
        #[arg(long, default_value = "")]
        client_id: String,
        /// Restrict candidates to a transport: any, http or ws.
        #[arg(long, default_value_t = Transport::Any)]
        transport: Transport,
    },
    /// Prints every viable RPC endpoint of a chain in priority order.
    Candidates {
        /// Chain id or slug.
        #[arg(value_parser = parse_chain_key)]
        chain: ChainKey,
        /// Identifier of the calling application.
        #[arg(long, default_value = "")]
        client_id: String,
        /// Restrict candidates to a transport: any, http or ws.
        #[arg(long, default_value_t = Transport::Any)]
        transport: Transport,
    },
    /// Lists the chains in the registry.
    List {
        /// Print JSON instead of a table.
        #[arg(long)]
        json: bool,
    },
    /// Prints the merged metadata of a chain as JSON.
    Show {
        /// Chain id or slug.
        #[arg(value_parser = parse_chain_key)]
        chain: ChainKey,
    },
}

impl Cli {
    fn api_keys(&self) -> ApiKeys {
        ApiKeys {
            thirdweb: self.thirdweb_api_key.clone(),
            infura: self.infura_api_key.clone(),
            alchemy: self.alchemy_api_key.clone(),
        }
    }

    fn load_registry(&self) -> Result<ChainRegistry> {
        if self.chains.is_none() && self.overrides.is_none() {
            return Ok(ChainRegistry::bundled()?);
        }
        let base = read_or(self.chains.as_ref(), BUNDLED_CHAINS)?;
        let overrides = read_or(self.overrides.as_ref(), BUNDLED_OVERRIDES)?;
        ChainRegistry::from_json(&base, &overrides).context("Failed to build chain registry")
    }
}

/// Routes chain arguments through [ChainKey]'s `FromStr` so numeric input becomes a chain id.
fn parse_chain_key(s: &str) -> Result<ChainKey, Infallible> {
    s.parse()
}

fn read_or(path: Option<&PathBuf>, bundled: &str) -> Result<String> {
    path.map_or_else(
        || Ok(bundled.to_string()),
        |path| {
            fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
        },
    )
}

#[derive(Debug, Tabled)]
struct ChainRow {
    #[tabled(rename = "chain id")]
    chain_id: u64,
    slug: String,
    name: String,
    testnet: bool,
    status: String,
    #[tabled(rename = "rpc candidates")]
    rpc_candidates: usize,
}

impl From<&ChainMetadata> for ChainRow {
    fn from(chain: &ChainMetadata) -> Self {
        Self {
            chain_id: chain.chain_id,
            slug: chain.slug.clone(),
            name: chain.name.clone(),
            testnet: chain.testnet,
            status: chain.status.map(|status| status.to_string()).unwrap_or_default(),
            rpc_candidates: chain.rpc_candidates.len(),
        }
    }
}

#[derive(Debug, Tabled)]
struct EndpointRow {
    priority: usize,
    url: String,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    if !cli.quiet {
        logger::init_tracing(cli.v);
    }

    let registry = cli.load_registry()?;
    debug!(chains = registry.len(), environment = %cli.environment, "Loaded chain registry");
    let config = ResolverConfig::default().with_api_keys(cli.api_keys());
    let resolver = RpcResolver::new(&registry, config);

    match &cli.command {
        Command::Resolve { chain, client_id, transport } => {
            let request = RpcRequest::new(chain.clone(), client_id.as_str(), cli.environment)
                .with_transport(*transport);
            let endpoint = resolver.resolve(&request)?;
            println!("{endpoint}");
        }
        Command::Candidates { chain, client_id, transport } => {
            let request = RpcRequest::new(chain.clone(), client_id.as_str(), cli.environment)
                .with_transport(*transport);
            let rows = resolver.candidates(&request)?.into_iter().map(|endpoint| EndpointRow {
                priority: endpoint.source_template_index,
                url: endpoint.url,
            });
            println!("{}", Table::new(rows));
        }
        Command::List { json } => {
            if *json {
                let chains: Vec<_> = registry.all().collect();
                println!("{}", serde_json::to_string_pretty(&chains)?);
            } else {
                println!("{}", Table::new(registry.all().map(ChainRow::from)));
            }
        }
        Command::Show { chain } => {
            let metadata = registry
                .get(chain)
                .ok_or_else(|| anyhow::anyhow!("unsupported network: chain {chain} not found"))?;
            println!("{}", serde_json::to_string_pretty(metadata)?);
        }
    }

    Ok(())
}
