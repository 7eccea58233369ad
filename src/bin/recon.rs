//! Command-line front end running scans in-process.
//!
//! # Usage
//!
//! ```bash
//! # Everything at once
//! cargo run --bin recon -- scan example.com
//!
//! # A single scan
//! cargo run --bin recon -- dns example.com
//! cargo run --bin recon -- whois https://www.example.co.uk
//! cargo run --bin recon -- headers example.com
//! cargo run --bin recon -- social example.com
//!
//! # Raw JSON, same shape as the HTTP API
//! cargo run --bin recon -- scan example.com --json
//! ```
//!
//! # Environment Variables
//!
//! Timeouts, `WHOIS_SERVER` and `USER_AGENT` are read the same way the
//! server reads them. See [`reconsight::config`].

use reconsight::AppError;
use reconsight::config::{Config, load_from_env};
use reconsight::domain::entities::{
    DnsScan, HeaderStatus, HeadersScan, NormalizedTarget, ScanReport, ScanResult, SocialScan,
    WhoisScan,
};
use reconsight::server::build_state;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use colored::*;
use serde::Serialize;

/// Passive reconnaissance for a domain.
#[derive(Parser)]
#[command(name = "recon")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run all four scans
    Scan(TargetArgs),

    /// A, AAAA, MX, TXT and NS records
    Dns(TargetArgs),

    /// Registration data for the registrable domain
    Whois(TargetArgs),

    /// Security header checklist
    Headers(TargetArgs),

    /// Social profile links and contact emails
    Social(TargetArgs),
}

#[derive(Args)]
struct TargetArgs {
    /// Hostname or URL, e.g. "example.com" or "https://www.example.com/about"
    target: String,

    /// Print the raw JSON result
    #[arg(long)]
    json: bool,
}

/// Client token the in-process limiters see.
const LOCAL_CLIENT: &str = "cli";

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = load_config()?;
    reconsight::logging::init_tracing("warn", &config.log_format);
    let state = build_state(&config)?;

    match cli.command {
        Commands::Scan(args) => {
            let target = parse_target(&args.target)?;
            let report = state.scan_service.scan_all(target, LOCAL_CLIENT).await;
            emit(&report, args.json, print_report)?;
        }
        Commands::Dns(args) => {
            let target = parse_target(&args.target)?;
            let scan = state.dns_service.scan(&target).await;
            emit(&scan, args.json, print_dns)?;
        }
        Commands::Whois(args) => {
            let target = parse_target(&args.target)?;
            let scan = state.whois_service.scan(&target).await.map_err(scan_error)?;
            emit(&scan, args.json, print_whois)?;
        }
        Commands::Headers(args) => {
            let target = parse_target(&args.target)?;
            let scan = state.headers_service.scan(&target).await.map_err(scan_error)?;
            emit(&scan, args.json, print_headers)?;
        }
        Commands::Social(args) => {
            let target = parse_target(&args.target)?;
            let scan = state.social_service.scan(&target).await.map_err(scan_error)?;
            emit(&scan, args.json, print_social)?;
        }
    }

    Ok(())
}

/// Same environment and validation rules as the server.
fn load_config() -> Result<Config> {
    load_from_env().context("Invalid configuration")
}

fn scan_error(e: AppError) -> anyhow::Error {
    anyhow::anyhow!("{} (HTTP {})", e, e.status_code().as_u16())
}

fn parse_target(raw: &str) -> Result<NormalizedTarget> {
    NormalizedTarget::parse(Some(raw)).map_err(|e| anyhow::anyhow!("{}: {}", e, raw))
}

fn emit<T: Serialize>(value: &T, json: bool, print: fn(&T)) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(value)?);
    } else {
        print(value);
    }
    Ok(())
}

fn print_report(report: &ScanReport) {
    println!(
        "{} {}",
        "Recon report for".bright_blue().bold(),
        report.target.hostname().cyan().bold()
    );
    println!("  Root domain: {}", report.target.registrable_domain());
    println!();

    print_slot("DNS", &report.dns, print_dns);
    print_slot("WHOIS", &report.whois, print_whois);
    print_slot("Headers", &report.headers, print_headers);
    print_slot("Social", &report.social, print_social);

    let failures = report.failure_count();
    if failures == 0 {
        println!("{}", "All scans succeeded".green().bold());
    } else {
        println!("{}", format!("{} of 4 scans failed", failures).yellow().bold());
    }
}

fn print_slot<T>(name: &str, slot: &ScanResult<T>, print: fn(&T)) {
    println!("{}", format!("── {} ──", name).bright_white().bold());
    match slot {
        ScanResult::Success { data } => print(data),
        ScanResult::Failure { error } => println!("  {} {}", "failed:".red().bold(), error),
    }
    println!();
}

fn print_dns(scan: &DnsScan) {
    let records = &scan.records;
    for (kind, values) in [
        ("A", &records.a),
        ("AAAA", &records.aaaa),
        ("MX", &records.mx),
        ("TXT", &records.txt),
        ("NS", &records.ns),
    ] {
        if values.is_empty() {
            println!("  {:<5} {}", kind.bright_cyan(), "-".dimmed());
        } else {
            for value in values {
                println!("  {:<5} {}", kind.bright_cyan(), value);
            }
        }
    }
}

fn print_whois(scan: &WhoisScan) {
    println!("  Queried: {}", scan.root_domain.cyan());

    match &scan.summary {
        Some(summary) => {
            let show = |label: &str, value: &Option<String>| {
                println!("  {:<13} {}", label, value.as_deref().unwrap_or("-"));
            };
            show("Registrar:", &summary.registrar);
            show("Created:", &summary.creation_date);
            show("Updated:", &summary.updated_date);
            show("Expires:", &summary.expiry_date);
            println!("  {:<13} {}", "Organization:", summary.organization);
        }
        None => println!("  {}", "No recognizable registration fields".yellow()),
    }

    let servers: Vec<&str> = scan.data.keys().map(String::as_str).collect();
    println!("  Servers:      {}", servers.join(", ").dimmed());
}

fn print_headers(scan: &HeadersScan) {
    println!("  {} → {} ({})", scan.url, scan.final_url, scan.status_code);

    for check in &scan.security_analysis {
        let status = match check.status {
            HeaderStatus::Present => "present".green(),
            HeaderStatus::Missing => "missing".red(),
            HeaderStatus::Warning => "warning".yellow(),
        };
        println!(
            "  {:<8} {} {}",
            status,
            check.header.bright_white(),
            check.value.as_deref().unwrap_or("").dimmed()
        );
    }
}

fn print_social(scan: &SocialScan) {
    if scan.socials.is_empty() && scan.emails.is_empty() {
        println!("  {}", "Nothing found".dimmed());
        return;
    }

    for link in &scan.socials {
        println!("  {} {}", "link ".bright_cyan(), link);
    }
    for email in &scan.emails {
        println!("  {} {}", "email".bright_cyan(), email);
    }
}
