//! AIM CLI: authorize and capture card payments from the command line
//!
//! Loads a gateway configuration file, runs one operation against the gateway and prints
//! the decoded response as JSON on stdout. The exit code is 0 when the gateway approved the
//! transaction and 1 otherwise.
//!
//! # Usage
//!
//! ```text
//! aim-cli --config gateway.toml authorize \
//!     --card-number 4111111111111111 --cvv 123 --expiry 12/2030 --brand visa \
//!     --amount 5.56 --invoice 123 --description "My Test transaction"
//!
//! aim-cli --config gateway.toml capture --transaction-id 2149186848
//! ```
//!
//! # Environment Variables
//!
//! - `AIM_CONFIG`: configuration file path
//! - `AIM_LOGIN`, `AIM_TRANSACTION_KEY`: credentials, overriding the file
//! - `LOG_FORMAT`: `json` or `pretty` (default: `pretty`)
//! - `RUST_LOG`: log level filter (default: `warn`)

#![allow(
    clippy::multiple_crate_versions,
    reason = "transitive dependencies from reqwest and clap"
)]

mod observability;

use std::{fs, path::PathBuf, process::ExitCode};

use aim_gateway::{
    CardError, CardRecord, Gateway, GatewayConfig, GatewayError, TransactionRecord, card,
};
use clap::{Args, Parser, Subcommand};
use thiserror::Error;
use tracing::{error, info};

use crate::observability::{LogFormat, init_observability};

/// Command-line client for the Authorize.Net AIM gateway.
#[derive(Debug, Parser)]
#[command(name = "aim-cli", version, about)]
struct Cli {
    /// Gateway configuration file (TOML).
    #[arg(long, short, env = "AIM_CONFIG")]
    config: PathBuf,

    /// API login id, overriding the configuration file.
    #[arg(long, env = "AIM_LOGIN")]
    login: Option<String>,

    /// Transaction key, overriding the configuration file.
    #[arg(long, env = "AIM_TRANSACTION_KEY", hide_env_values = true)]
    transaction_key: Option<String>,

    /// Log output format.
    #[arg(long, env = "LOG_FORMAT", value_enum, default_value_t)]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Reserve funds on a card without capturing them.
    Authorize(AuthorizeArgs),
    /// Capture a prior authorization.
    Capture(CaptureArgs),
}

#[derive(Debug, Args)]
struct AuthorizeArgs {
    /// Card number, digits only.
    #[arg(long)]
    card_number: String,

    /// Card security code.
    #[arg(long)]
    cvv: String,

    /// Expiration date as MM/YYYY.
    #[arg(long)]
    expiry: String,

    /// Card brand: visa, mastercard, amex or discover.
    #[arg(long)]
    brand: String,

    /// Amount to authorize, e.g. 5.56.
    #[arg(long)]
    amount: String,

    /// Merchant invoice number.
    #[arg(long, default_value = "")]
    invoice: String,

    /// Order description.
    #[arg(long, default_value = "")]
    description: String,

    /// Ask the gateway to email a receipt to the customer.
    #[arg(long)]
    email_customer: bool,

    /// Send the card without local pre-validation.
    #[arg(long)]
    skip_validation: bool,
}

#[derive(Debug, Args)]
struct CaptureArgs {
    /// Transaction id returned by the authorization.
    #[arg(long)]
    transaction_id: String,

    /// Amount to capture; the full authorized amount when omitted.
    #[arg(long, default_value = "")]
    amount: String,
}

#[derive(Debug, Error)]
enum CliError {
    #[error("failed to read configuration file {path}: {source}")]
    ReadConfig {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Gateway(#[from] GatewayError),

    #[error("card rejected: {0}")]
    Card(#[from] CardError),
}

/// Builds the gateway configuration from file contents and credential overrides.
fn build_config(
    toml_str: &str,
    login: Option<&str>,
    transaction_key: Option<&str>,
) -> Result<GatewayConfig, GatewayError> {
    let config = GatewayConfig::from_toml(toml_str)?;
    if login.is_none() && transaction_key.is_none() {
        return Ok(config);
    }
    let login = login.unwrap_or(config.login()).to_owned();
    let transaction_key = transaction_key.unwrap_or(config.transaction_key()).to_owned();
    Ok(config.with_credentials(&login, &transaction_key))
}

async fn authorize(gateway: &Gateway, args: AuthorizeArgs) -> Result<bool, CliError> {
    let mut card_record = CardRecord::new(args.card_number, args.cvv, args.expiry, args.brand);

    if args.skip_validation {
        info!("local card validation skipped");
    } else if let Err(e) = card::validate(&card_record) {
        card_record.wipe();
        return Err(e.into());
    }

    let transaction = TransactionRecord {
        amount: args.amount,
        invoice_number: args.invoice,
        description: args.description,
        ..Default::default()
    };

    let response = gateway.authorize(&card_record, &transaction, args.email_customer).await;
    card_record.wipe();

    println!("{response}");
    Ok(response.is_approved)
}

async fn capture(gateway: &Gateway, args: CaptureArgs) -> bool {
    let response = gateway.capture_preauth(&args.transaction_id, &args.amount).await;
    println!("{response}");
    response.is_approved
}

async fn run(cli: Cli) -> Result<bool, CliError> {
    let toml_str = fs::read_to_string(&cli.config)
        .map_err(|source| CliError::ReadConfig { path: cli.config.clone(), source })?;
    let config = build_config(&toml_str, cli.login.as_deref(), cli.transaction_key.as_deref())?;
    info!(endpoint = config.endpoint(), test_mode = config.test_mode(), "gateway configured");

    let gateway = Gateway::new(config)?;

    match cli.command {
        Command::Authorize(args) => authorize(&gateway, args).await,
        Command::Capture(args) => Ok(capture(&gateway, args).await),
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = init_observability(cli.log_format, "warn") {
        eprintln!("failed to initialize logging: {e}");
    }

    match run(cli).await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            error!(error = %e, "aim-cli failed");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    const CONFIG: &str = r#"
        login = "file-login"
        transaction_key = "file-key"
        test_mode = true
    "#;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_authorize() {
        let cli = Cli::try_parse_from([
            "aim-cli",
            "--config",
            "gateway.toml",
            "authorize",
            "--card-number",
            "4111111111111111",
            "--cvv",
            "123",
            "--expiry",
            "12/2030",
            "--brand",
            "visa",
            "--amount",
            "5.56",
            "--email-customer",
        ])
        .unwrap();

        assert_eq!(cli.config, PathBuf::from("gateway.toml"));
        let Command::Authorize(args) = cli.command else {
            panic!("expected authorize subcommand");
        };
        assert_eq!(args.card_number, "4111111111111111");
        assert_eq!(args.amount, "5.56");
        assert!(args.email_customer);
        assert!(!args.skip_validation);
        assert!(args.invoice.is_empty());
    }

    #[test]
    fn test_parse_capture_default_amount() {
        let cli = Cli::try_parse_from([
            "aim-cli",
            "-c",
            "gateway.toml",
            "capture",
            "--transaction-id",
            "TX789",
        ])
        .unwrap();

        let Command::Capture(args) = cli.command else {
            panic!("expected capture subcommand");
        };
        assert_eq!(args.transaction_id, "TX789");
        assert!(args.amount.is_empty());
    }

    #[test]
    fn test_authorize_requires_card_fields() {
        let result = Cli::try_parse_from(["aim-cli", "-c", "g.toml", "authorize", "--cvv", "1"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_build_config_from_file() {
        let config = build_config(CONFIG, None, None).unwrap();
        assert_eq!(config.login(), "file-login");
        assert_eq!(config.transaction_key(), "file-key");
        assert!(config.test_mode());
    }

    #[test]
    fn test_build_config_overrides_credentials() {
        let config = build_config(CONFIG, Some("env-login"), None).unwrap();
        assert_eq!(config.login(), "env-login");
        assert_eq!(config.transaction_key(), "file-key");

        let config = build_config(CONFIG, None, Some("env-key")).unwrap();
        assert_eq!(config.login(), "file-login");
        assert_eq!(config.transaction_key(), "env-key");
    }

    #[test]
    fn test_build_config_invalid() {
        assert!(matches!(build_config("login = 1", None, None), Err(GatewayError::Config(_))));
    }

    #[tokio::test]
    async fn test_authorize_rejects_invalid_card_before_sending() {
        let config = GatewayConfig::new("http://127.0.0.1:1/", "l", "k", true, -1).unwrap();
        let gateway = Gateway::new(config).unwrap();
        let args = AuthorizeArgs {
            card_number: "4111111111111112".to_owned(),
            cvv: "123".to_owned(),
            expiry: "12/2099".to_owned(),
            brand: "visa".to_owned(),
            amount: "1.00".to_owned(),
            invoice: String::new(),
            description: String::new(),
            email_customer: false,
            skip_validation: false,
        };

        let result = authorize(&gateway, args).await;
        assert!(matches!(result, Err(CliError::Card(CardError::InvalidCardNumber))));
    }
}
