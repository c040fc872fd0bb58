//! PayCrypt CLI
//!
//! Sign requests, verify webhook signatures and call the gateway from the
//! command line.

use clap::{Parser, Subcommand};
use owo_colors::OwoColorize;
use std::path::PathBuf;
use std::process::ExitCode;

mod commands;
mod output;

use commands::{account, payment, sign, verify, webhook};
use output::Format;

/// PayCrypt gateway command-line tool
#[derive(Parser)]
#[command(name = "paycrypt")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output format (text, json)
    #[arg(short, long, global = true, value_enum, default_value = "text")]
    format: Format,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute the authentication headers for a request (offline)
    Sign {
        /// API key
        #[arg(long, env = "PAYCRYPT_API_KEY", hide_env_values = true)]
        api_key: String,

        /// API secret
        #[arg(long, env = "PAYCRYPT_API_SECRET", hide_env_values = true)]
        api_secret: String,

        /// HTTP method
        #[arg(short, long, default_value = "GET")]
        method: String,

        /// Request path relative to the base URL, e.g. /payments
        #[arg(short, long)]
        path: String,

        /// JSON body
        #[arg(short, long)]
        body: Option<String>,

        /// Timestamp in milliseconds (defaults to now)
        #[arg(short, long)]
        timestamp: Option<i64>,
    },

    /// Check a webhook signature (offline); exits non-zero when invalid
    VerifyWebhook {
        /// Shared webhook secret
        #[arg(long, env = "PAYCRYPT_WEBHOOK_SECRET", hide_env_values = true)]
        secret: String,

        /// Value of the X-Signature header
        #[arg(long)]
        signature: String,

        /// Raw payload
        #[arg(long, conflicts_with = "file", required_unless_present = "file")]
        payload: Option<String>,

        /// Read the raw payload from a file
        #[arg(long)]
        file: Option<PathBuf>,
    },

    /// Create or inspect payments
    Payment {
        #[command(subcommand)]
        action: PaymentAction,
    },

    /// Show account information
    Account,

    /// Show usage statistics
    Usage,

    /// Manage the webhook endpoint
    Webhook {
        #[command(subcommand)]
        action: WebhookAction,
    },
}

#[derive(Subcommand)]
enum PaymentAction {
    /// Create a new payment
    Create {
        /// Amount in fiat currency
        #[arg(long)]
        amount: f64,

        /// Fiat currency
        #[arg(long, default_value = "USD")]
        currency: String,

        /// Crypto currency to pay with
        #[arg(long)]
        crypto_currency: String,

        /// Merchant order identifier
        #[arg(long)]
        order_id: String,

        /// Webhook callback URL
        #[arg(long)]
        callback_url: Option<String>,

        /// Redirect URL after payment
        #[arg(long)]
        return_url: Option<String>,

        /// Payment description
        #[arg(long)]
        description: Option<String>,
    },

    /// Get payment status
    Get {
        /// Payment ID
        payment_id: String,
    },
}

#[derive(Subcommand)]
enum WebhookAction {
    /// Register the webhook endpoint
    Configure {
        /// Endpoint URL
        #[arg(long)]
        url: String,

        /// Event types to subscribe to (repeatable)
        #[arg(long = "event")]
        events: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    if cli.verbose {
        tracing_subscriber::fmt()
            .with_env_filter("paycrypt=debug,paycrypt_api_client=debug")
            .with_writer(std::io::stderr)
            .init();
    }

    let result = match cli.command {
        Commands::Sign {
            api_key,
            api_secret,
            method,
            path,
            body,
            timestamp,
        } => sign::run(
            &sign::SignArgs {
                api_key,
                api_secret,
                method,
                path,
                body,
                timestamp,
            },
            cli.format,
        ),

        Commands::VerifyWebhook {
            secret,
            signature,
            payload,
            file,
        } => verify::run(&secret, &signature, payload.as_deref(), file.as_deref(), cli.format),

        Commands::Payment { action } => match action {
            PaymentAction::Create {
                amount,
                currency,
                crypto_currency,
                order_id,
                callback_url,
                return_url,
                description,
            } => {
                let mut request = paycrypt_api_client::endpoints::payments::CreatePaymentRequest::new(
                    amount,
                    currency,
                    crypto_currency,
                    order_id,
                );
                request.callback_url = callback_url;
                request.return_url = return_url;
                request.description = description;
                payment::create(&request, cli.format).await
            }
            PaymentAction::Get { payment_id } => payment::get(&payment_id, cli.format).await,
        },

        Commands::Account => account::info(cli.format).await,

        Commands::Usage => account::usage(cli.format).await,

        Commands::Webhook { action } => match action {
            WebhookAction::Configure { url, events } => {
                webhook::configure(&url, events, cli.format).await
            }
        },
    };

    match result {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("{} {:#}", "Error:".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}
