//! Gifte+ CLI
//!
//! Aggregates an identity profile from concurrent third-party lookups.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use gifte_core::{generate_dorks, IdentityRequest};
use gifte_net::{EndpointConfig, ProviderConfig};
use gifte_runtime::Aggregator;

#[derive(Parser)]
#[command(name = "gifte-osint")]
#[command(author, version, about = "Gifte+: identity profile aggregation", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbosity level (0-3)
    #[arg(short, long, default_value = "1")]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Aggregate an identity profile
    Profile {
        /// Email address to look up
        #[arg(short, long)]
        email: String,

        /// Phone number to look up
        #[arg(short, long)]
        phone: String,

        /// Social handle (defaults to the email local part)
        #[arg(long)]
        handle: Option<String>,

        /// Provider configuration file (TOML); otherwise GIFTE_* env vars are used
        #[arg(short, long, env = "GIFTE_CONFIG")]
        config: Option<PathBuf>,

        /// Per-call timeout in seconds
        #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
        timeout: Option<u64>,

        /// Skip the caller-ID lookup
        #[arg(long)]
        no_caller_id: bool,

        /// Write the profile to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Save the profile to profile_<timestamp>.json
        #[arg(long)]
        save: bool,
    },

    /// Print search-engine dorks for an email address
    Dorks {
        /// Email address
        #[arg(short, long)]
        email: String,
    },

    /// Show provider configuration (credentials are not printed)
    Providers {
        /// Provider configuration file (TOML)
        #[arg(short, long, env = "GIFTE_CONFIG")]
        config: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => Level::ERROR,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    // Logs go to stderr so stdout carries only the profile
    FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .with_thread_ids(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();

    match cli.command {
        Commands::Profile {
            email,
            phone,
            handle,
            config,
            timeout,
            no_caller_id,
            output,
            save,
        } => {
            let mut config = load_config(config)?;
            if let Some(secs) = timeout {
                config.timeout_secs = secs;
            }
            if no_caller_id {
                config.caller_id_enabled = false;
            }
            config.validate().context("validating provider config")?;

            let mut request = IdentityRequest::new(&email, &phone);
            if let Some(handle) = handle {
                request = request.with_handle(&handle);
            }

            let output = output.or_else(|| {
                save.then(|| {
                    let timestamp = chrono::Utc::now().format("%Y-%m-%d_%H-%M-%S");
                    PathBuf::from(format!("profile_{}.json", timestamp))
                })
            });
            run_profile(config, request, output).await?;
        }
        Commands::Dorks { email } => {
            for dork in generate_dorks(&email) {
                println!("{}", dork);
            }
        }
        Commands::Providers { config } => {
            show_providers(&load_config(config)?);
        }
    }

    Ok(())
}

fn load_config(path: Option<PathBuf>) -> Result<ProviderConfig> {
    match path {
        Some(path) => ProviderConfig::from_file(&path)
            .with_context(|| format!("loading provider config from {}", path.display())),
        None => ProviderConfig::from_env().context("loading provider config from environment"),
    }
}

async fn run_profile(
    config: ProviderConfig,
    request: IdentityRequest,
    output: Option<PathBuf>,
) -> Result<()> {
    let aggregator = Aggregator::from_config(config).context("building provider client")?;
    let response = aggregator.aggregate(request).await?;
    let json = serde_json::to_string_pretty(&response)?;

    match output {
        Some(path) => {
            fs::write(&path, &json)
                .with_context(|| format!("writing profile to {}", path.display()))?;
            eprintln!(
                "Profile saved to {} (gift: {}, score: {}, {} lookups failed)",
                path.display(),
                response.gift,
                response.score,
                response.failed_count()
            );
        }
        None => println!("{}", json),
    }

    Ok(())
}

fn show_providers(config: &ProviderConfig) {
    let endpoints: [(&str, &EndpointConfig); 8] = [
        ("email_a", &config.email_a),
        ("email_b", &config.email_b),
        ("phone_a", &config.phone_a),
        ("phone_b", &config.phone_b),
        ("caller_id", &config.caller_id),
        ("social", &config.social),
        ("self_ip", &config.self_ip),
        ("geo", &config.geo),
    ];

    println!("Timeout: {}s per call", config.timeout_secs);
    println!(
        "Caller-ID: {}",
        if config.caller_id_configured() {
            "enabled"
        } else if config.caller_id_enabled {
            "enabled, but no credential (will be skipped)"
        } else {
            "disabled"
        }
    );
    for (name, endpoint) in endpoints {
        let key = if endpoint.has_key() { "key set" } else { "no key" };
        println!("  {:<10} {} ({})", name, endpoint.base_url, key);
    }
}
