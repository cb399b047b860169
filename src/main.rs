//! geolens main entry point
//!
//! This is the command-line interface for the geolens AI-visibility scanner.

use clap::{Parser, Subcommand};
use geolens::config::{load_config_or_default, Config};
use geolens::output::{generate_markdown_report, render, write_report, ReportFormat};
use geolens::{ScanRequest, Scanner};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// geolens: how visible is a page to generative-AI crawlers?
///
/// geolens fetches a single page, checks the signals AI crawlers rely on
/// (metadata, indexability, structured data, headings, copy, internal links,
/// robots.txt and sitemap.xml) and reports a weighted 0-100 score with
/// suggestions.
#[derive(Parser, Debug)]
#[command(name = "geolens")]
#[command(version)]
#[command(about = "AI-visibility scanner for web pages", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(short, long, value_name = "CONFIG", global = true)]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose", global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Scan one page and print the report
    Scan {
        /// Page to scan (http or https)
        #[arg(value_name = "URL")]
        url: String,

        /// Report format: json or markdown
        #[arg(short, long, default_value = "json")]
        format: ReportFormat,

        /// Write the report to a file instead of stdout
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
    },

    /// Run the HTTP service
    Serve {
        /// Address to listen on (overrides [server] bind)
        #[arg(short, long, value_name = "ADDR")]
        bind: Option<SocketAddr>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    let config = match load_config_or_default(cli.config.as_deref()) {
        Ok(cfg) => {
            if let Some(path) = &cli.config {
                tracing::info!("Configuration loaded from: {}", path.display());
            }
            cfg
        }
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    match cli.command {
        Command::Scan {
            url,
            format,
            output,
        } => handle_scan(&config, url, format, output).await,
        Command::Serve { bind } => handle_serve(&config, bind).await,
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("geolens=info,warn"),
            1 => EnvFilter::new("geolens=debug,info"),
            2 => EnvFilter::new("geolens=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    // stdout carries the report
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles `geolens scan`
async fn handle_scan(
    config: &Config,
    url: String,
    format: ReportFormat,
    output: Option<PathBuf>,
) -> Result<(), Box<dyn std::error::Error>> {
    let scanner = Scanner::new(config)?;

    let report = match scanner.scan(&ScanRequest::new(url)).await {
        Ok(report) => report,
        Err(e) => {
            tracing::error!("Scan failed: {}", e);
            return Err(e.into());
        }
    };

    match (output, format) {
        (Some(path), ReportFormat::Markdown) => {
            generate_markdown_report(&report, &path)?;
            tracing::info!("Report written to: {}", path.display());
        }
        (Some(path), format) => {
            write_report(&render(&report, format)?, &path)?;
            tracing::info!("Report written to: {}", path.display());
        }
        (None, format) => println!("{}", render(&report, format)?),
    }

    Ok(())
}

/// Handles `geolens serve`
async fn handle_serve(
    config: &Config,
    bind: Option<SocketAddr>,
) -> Result<(), Box<dyn std::error::Error>> {
    let addr = match bind {
        Some(addr) => addr,
        None => config.server.bind.parse()?,
    };

    tracing::info!(
        "Starting server as {}",
        config.user_agent.header_value()
    );

    let scanner = Arc::new(Scanner::new(config)?);
    if let Err(e) = geolens::server::serve(addr, scanner).await {
        tracing::error!("Server failed: {}", e);
        return Err(e.into());
    }

    Ok(())
}
