//! Lynx staking CLI
//!
//! Operator and oracle tooling for Lynx direct staking: deposit roots,
//! withdrawal credentials, stake authorization digests and signatures,
//! deployment config scaffolding and in-memory dry runs.

use alloy_primitives::{Address, U256};
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use lynx_crypto::{
    withdrawal_credentials, DepositData, OracleSigner, RecoverableSignature, StakeParams,
    DEPOSIT_AMOUNT_GWEI,
};
use lynx_staking::{
    deposit_value, DirectStaking, InMemoryDepositContract, InMemoryLedger, RewardsVault,
    StakeRequest, StakingConfig,
};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{info, Level};
use tracing_subscriber::EnvFilter;

/// Lynx direct staking control tool
#[derive(Parser)]
#[command(name = "lynxctl")]
#[command(author = "Lynx Contributors")]
#[command(version)]
#[command(about = "Lynx direct staking control tool", long_about = None)]
#[command(propagate_version = true)]
#[command(arg_required_else_help = true)]
struct Cli {
    /// Path to the deployment config
    #[arg(
        long,
        global = true,
        env = lynx_staking::LYNX_CONFIG_ENV,
        default_value = "lynx.json"
    )]
    config: PathBuf,

    /// The logging level (trace|debug|info|warn|error)
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    /// The logging format (json|plain)
    #[arg(long, global = true, default_value = "plain")]
    log_format: String,

    /// Disable colored logs
    #[arg(long, global = true, default_value = "false")]
    log_no_color: bool,

    /// Print out full error chain on failure
    #[arg(long, global = true, default_value = "false")]
    trace: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute the deposit data root for one validator
    DepositRoot {
        /// BLS public key (48 bytes, hex)
        #[arg(long)]
        pubkey: String,

        /// Deposit signature (96 bytes, hex)
        #[arg(long)]
        signature: String,

        /// Execution-layer withdrawal address
        #[arg(long)]
        withdraw_address: Address,

        /// Deposit amount in gwei
        #[arg(long, default_value_t = DEPOSIT_AMOUNT_GWEI)]
        amount_gwei: u64,

        /// Output format (text|json)
        #[arg(long, default_value = "text")]
        output: String,
    },

    /// Print the 0x01 withdrawal credentials for an address
    WithdrawalCredentials {
        /// Execution-layer withdrawal address
        #[arg(long)]
        address: Address,
    },

    /// Print the EIP-712 digest the oracle signs for a stake request
    Digest {
        /// Stake parameters (JSON)
        #[arg(long)]
        params: PathBuf,

        /// Output format (text|json)
        #[arg(long, default_value = "text")]
        output: String,
    },

    /// Sign stake parameters with the oracle key
    SignStake {
        /// Stake parameters (JSON)
        #[arg(long)]
        params: PathBuf,

        /// Oracle secret key (32 bytes, hex)
        #[arg(long, env = "LYNX_ORACLE_KEY", hide_env_values = true)]
        oracle_key: String,
    },

    /// Check an oracle signature over stake parameters
    VerifyStake {
        /// Stake parameters (JSON)
        #[arg(long)]
        params: PathBuf,

        /// Oracle signature (65 bytes, hex)
        #[arg(long)]
        signature: String,
    },

    /// Write a deployment config
    InitConfig {
        /// EVM chain id
        #[arg(long)]
        chain_id: u64,

        /// Gateway address
        #[arg(long)]
        gateway: Address,

        /// Rewards vault address
        #[arg(long)]
        vault: Address,

        /// Oracle address
        #[arg(long)]
        oracle: Address,

        /// Admin address
        #[arg(long)]
        admin: Address,

        /// Manager address (defaults to admin)
        #[arg(long)]
        manager: Option<Address>,

        /// Pauser address (defaults to admin)
        #[arg(long)]
        pauser: Option<Address>,

        /// Manager fee share in thousandths
        #[arg(long, default_value = "0")]
        fee_share: u64,

        /// Overwrite an existing config
        #[arg(long, default_value = "false")]
        overwrite: bool,
    },

    /// Validate the deployment config
    ValidateConfig,

    /// Run a signed stake request against in-memory contracts
    DryRun {
        /// Stake parameters (JSON)
        #[arg(long)]
        params: PathBuf,

        /// Oracle signature (65 bytes, hex)
        #[arg(long)]
        signature: String,

        /// Tips in wei attached on top of the deposits
        #[arg(long, default_value = "0")]
        tips: U256,

        /// Caller address
        #[arg(long, default_value_t = Address::with_last_byte(1))]
        caller: Address,

        /// Print the metrics registry after the run
        #[arg(long, default_value = "false")]
        metrics: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    init_tracing(&cli.log_level, &cli.log_format, cli.log_no_color);

    let result = match cli.command {
        Commands::DepositRoot {
            pubkey,
            signature,
            withdraw_address,
            amount_gwei,
            output,
        } => cmd_deposit_root(&pubkey, &signature, withdraw_address, amount_gwei, &output),

        Commands::WithdrawalCredentials { address } => {
            println!("{}", withdrawal_credentials(&address));
            Ok(())
        }

        Commands::Digest { params, output } => cmd_digest(&cli.config, &params, &output),

        Commands::SignStake { params, oracle_key } => {
            cmd_sign_stake(&cli.config, &params, &oracle_key)
        }

        Commands::VerifyStake { params, signature } => {
            cmd_verify_stake(&cli.config, &params, &signature)
        }

        Commands::InitConfig {
            chain_id,
            gateway,
            vault,
            oracle,
            admin,
            manager,
            pauser,
            fee_share,
            overwrite,
        } => {
            let mut config = StakingConfig::new(chain_id, gateway, vault, oracle, admin);
            config.manager = manager.unwrap_or(admin);
            config.pauser = pauser.unwrap_or(admin);
            config.manager_fee_share = fee_share;
            cmd_init_config(&cli.config, &config, overwrite)
        }

        Commands::ValidateConfig => cmd_validate_config(&cli.config),

        Commands::DryRun {
            params,
            signature,
            tips,
            caller,
            metrics,
        } => cmd_dry_run(&cli.config, &params, &signature, tips, caller, metrics),
    };

    if let Err(e) = &result {
        if cli.trace {
            eprintln!("Error: {:?}", e);
        } else {
            eprintln!("Error: {:#}", e);
        }
        std::process::exit(1);
    }
}

fn init_tracing(log_level: &str, log_format: &str, no_color: bool) {
    let level = match log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::WARN,
    };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.to_string()));

    // stdout carries command output
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .with_ansi(!no_color);

    match log_format {
        "json" => subscriber.json().init(),
        _ => subscriber.init(),
    }
}

// =============================================================================
// Helpers
// =============================================================================

fn decode_hex(field: &str, value: &str) -> Result<Vec<u8>> {
    hex::decode(value.strip_prefix("0x").unwrap_or(value))
        .with_context(|| format!("{field} is not valid hex"))
}

fn load_config(path: &Path) -> Result<StakingConfig> {
    StakingConfig::load(path).with_context(|| format!("failed to load config {}", path.display()))
}

fn load_params(path: &Path) -> Result<StakeParams> {
    let data = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read stake params {}", path.display()))?;
    serde_json::from_str(&data)
        .with_context(|| format!("failed to parse stake params {}", path.display()))
}

fn parse_signature(value: &str) -> Result<RecoverableSignature> {
    let bytes = decode_hex("signature", value)?;
    Ok(RecoverableSignature::from_slice(&bytes)?)
}

// =============================================================================
// Command Implementations
// =============================================================================

#[derive(Serialize)]
struct DepositRootOutput {
    withdrawal_credentials: String,
    amount_gwei: u64,
    deposit_data_root: String,
}

fn cmd_deposit_root(
    pubkey: &str,
    signature: &str,
    withdraw_address: Address,
    amount_gwei: u64,
    output: &str,
) -> Result<()> {
    let credentials = withdrawal_credentials(&withdraw_address);
    let data = DepositData::from_slices(
        &decode_hex("pubkey", pubkey)?,
        credentials,
        amount_gwei,
        &decode_hex("signature", signature)?,
    )?;
    let root = data.root();

    match output {
        "json" => {
            let out = DepositRootOutput {
                withdrawal_credentials: credentials.to_string(),
                amount_gwei,
                deposit_data_root: root.to_string(),
            };
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        _ => println!("{root}"),
    }
    Ok(())
}

fn cmd_digest(config_path: &Path, params_path: &Path, output: &str) -> Result<()> {
    let config = load_config(config_path)?;
    let params = load_params(params_path)?;

    let domain_separator = config.domain_separator();
    let struct_hash = params.struct_hash();
    let digest = params.signing_hash(&domain_separator);

    match output {
        "json" => {
            let out = serde_json::json!({
                "domain_separator": domain_separator,
                "struct_hash": struct_hash,
                "digest": digest,
            });
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        _ => {
            println!("Domain separator: {domain_separator}");
            println!("Struct hash:      {struct_hash}");
            println!("Digest:           {digest}");
        }
    }
    Ok(())
}

fn cmd_sign_stake(config_path: &Path, params_path: &Path, oracle_key: &str) -> Result<()> {
    let config = load_config(config_path)?;
    let params = load_params(params_path)?;
    let signer = OracleSigner::from_hex(oracle_key).context("invalid oracle key")?;

    if signer.address() != config.oracle {
        tracing::warn!(
            signer = %signer.address(),
            oracle = %config.oracle,
            "Signing key does not match the configured oracle"
        );
    }

    let digest = params.signing_hash(&config.domain_separator());
    let signature = signer.sign_digest(&digest)?;
    info!(signer = %signer.address(), digest = %digest, "Stake parameters signed");

    println!("0x{}", hex::encode(signature.as_bytes()));
    Ok(())
}

fn cmd_verify_stake(config_path: &Path, params_path: &Path, signature: &str) -> Result<()> {
    let config = load_config(config_path)?;
    let params = load_params(params_path)?;
    let signature = parse_signature(signature)?;

    let digest = params.signing_hash(&config.domain_separator());
    let signer = signature.recover(&digest)?;
    if signer != config.oracle {
        anyhow::bail!(
            "signature recovers to {signer}, configured oracle is {}",
            config.oracle
        );
    }

    println!("Signature is valid");
    println!("  Signer: {signer}");
    println!("  Digest: {digest}");
    Ok(())
}

fn cmd_init_config(path: &Path, config: &StakingConfig, overwrite: bool) -> Result<()> {
    config.validate()?;
    if path.exists() && !overwrite {
        anyhow::bail!(
            "Configuration already exists at {}. Use --overwrite to replace.",
            path.display()
        );
    }
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    config.save(path)?;

    println!("Successfully wrote staking configuration");
    println!();
    println!("  Config:           {}", path.display());
    println!("  Chain ID:         {}", config.chain_id);
    println!("  Gateway:          {}", config.gateway_address);
    println!("  Vault:            {}", config.vault_address);
    println!("  Domain separator: {}", config.domain_separator());
    Ok(())
}

fn cmd_validate_config(path: &Path) -> Result<()> {
    let config = load_config(path)?;

    println!("Configuration at {} is valid", path.display());
    println!();
    println!("  Chain ID:    {}", config.chain_id);
    println!("  Gateway:     {}", config.gateway_address);
    println!("  Vault:       {}", config.vault_address);
    println!("  Oracle:      {}", config.oracle);
    println!("  Fee share:   {}/1000", config.manager_fee_share);
    Ok(())
}

fn cmd_dry_run(
    config_path: &Path,
    params_path: &Path,
    signature: &str,
    tips: U256,
    caller: Address,
    metrics: bool,
) -> Result<()> {
    let config = load_config(config_path)?;
    let params = load_params(params_path)?;
    let signature = decode_hex("signature", signature)?;

    lynx_metrics::init();

    let ledger = Arc::new(InMemoryLedger::new());
    let vault = Arc::new(RewardsVault::from_config(&config, ledger)?);
    // Address is irrelevant to the run
    let deposits = Arc::new(InMemoryDepositContract::new(Address::ZERO));
    let gateway = DirectStaking::from_config(&config, deposits.clone(), vault.clone())?;

    let value = deposit_value() * U256::from(params.pubkeys.len()) + tips;
    let request = StakeRequest::new(params, signature).with_tips(tips);
    let registered = gateway
        .stake(caller, value, &request)
        .context("stake request rejected")?;

    println!("Stake request accepted");
    println!();
    println!("  Validators:   {registered}");
    println!("  Value:        {value} wei");
    println!("  Pool shares:  {} wei", vault.total_shares());
    for (id, deposit) in deposits.deposits().iter().enumerate() {
        println!(
            "  Deposit {id}:    pubkey {} root {}",
            deposit.data.pubkey, deposit.deposit_data_root
        );
    }

    if metrics {
        println!();
        print!("{}", lynx_metrics::gather_text());
    }
    Ok(())
}
