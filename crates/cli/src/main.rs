//! # madns
//!
//! Resolves a multiaddr through the system resolver or DNS-over-HTTPS and
//! prints every resulting address on its own line.

mod bootstrap;
mod di;

use anyhow::Context;
use bootstrap::{init_logging, load_config};
use clap::Parser;
use madoh_application::use_cases::{parse_multiaddr, MultiaddrResolver};
use madoh_domain::CliOverrides;
use std::io::Write;
use std::process::ExitCode;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "madns")]
#[command(version)]
#[command(about = "Resolve multiaddrs over DNS or DNS-over-HTTPS")]
struct Cli {
    /// Use the default DoH endpoint
    #[arg(long)]
    doh: bool,

    /// Use a custom DoH endpoint (wins over --doh)
    #[arg(long, value_name = "URL")]
    doh_url: Option<String>,

    /// Path to a TOML configuration file
    #[arg(short, long, value_name = "PATH")]
    config: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, value_name = "LEVEL")]
    log_level: Option<String>,

    /// Multiaddr to resolve; a bare domain is looked up as /dnsaddr/<domain>
    address: String,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            return if e.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = load_config(
        cli.config.as_deref(),
        CliOverrides {
            doh: cli.doh,
            doh_url: cli.doh_url,
            log_level: cli.log_level,
        },
    )?;
    init_logging(&config);

    let backend = di::build_backend(&config)?;
    let resolver = MultiaddrResolver::new(backend);

    let address = normalize_address(&cli.address);
    let addr = parse_multiaddr(&address)?;
    let resolved = resolver
        .resolve(&addr)
        .await
        .with_context(|| format!("failed to resolve {}", address))?;

    info!(address = %address, count = resolved.len(), "Resolution complete");

    let mut stdout = std::io::stdout().lock();
    for addr in resolved {
        writeln!(stdout, "{}", addr)?;
    }
    Ok(())
}

/// Anything that is not already a multiaddr is treated as a dnsaddr domain.
fn normalize_address(input: &str) -> String {
    if input.starts_with('/') {
        return input.to_string();
    }
    let address = format!("/dnsaddr/{}", input);
    info!(input = %input, address = %address, "Treating bare domain as dnsaddr");
    address
}
