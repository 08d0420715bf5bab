//! Proof-of-work and signing CLI.
//!
//! # Commands
//!
//! - `run` - Find a nonce, sign the winning message, verify the signature
//! - `mine` - Nonce search only
//! - `benchmark` - Measure hash throughput

use std::time::Instant;

use clap::{Parser, Subcommand};
use rsa::pkcs8::{EncodePublicKey, LineEnding};
use serde::Serialize;

use powsign::{digest_hex, find_nonce_parallel, sign_message, verify, Solution};

#[derive(Parser)]
#[command(name = "powsign")]
#[command(version = "0.1.0")]
#[command(about = "SHA-256 leading-zero proof-of-work solver with RSA message signing")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Find a nonce, sign the winning message, verify the signature
    Run {
        /// Identifier the decimal nonce is appended to
        #[arg(short, long, default_value = "ymjrcc")]
        identifier: String,

        /// Required leading run of '0' hex characters
        #[arg(short, long, default_value = "0000")]
        prefix: String,

        /// Number of search threads (default: number of CPU cores)
        #[arg(short, long)]
        threads: Option<usize>,

        /// Emit a JSON report instead of plain text
        #[arg(long)]
        json: bool,
    },

    /// Search for a matching nonce without signing
    Mine {
        /// Identifier the decimal nonce is appended to
        #[arg(short, long, default_value = "ymjrcc")]
        identifier: String,

        /// Required leading run of '0' hex characters
        #[arg(short, long, default_value = "0000")]
        prefix: String,

        /// Number of search threads (default: number of CPU cores)
        #[arg(short, long)]
        threads: Option<usize>,
    },

    /// Measure hash throughput
    Benchmark {
        /// Number of digests to compute
        #[arg(short, long, default_value = "100000")]
        count: u64,
    },
}

/// Machine-readable report for `run --json`.
#[derive(Serialize)]
struct RunReport<'a> {
    identifier: &'a str,
    prefix: &'a str,
    nonce: u64,
    message: &'a str,
    digest: &'a str,
    signature: String,
    public_key_pem: String,
    verified: bool,
    elapsed_secs: f64,
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Run {
            identifier,
            prefix,
            threads,
            json,
        } => cmd_run(&identifier, &prefix, threads, json),
        Commands::Mine {
            identifier,
            prefix,
            threads,
        } => cmd_mine(&identifier, &prefix, threads),
        Commands::Benchmark { count } => cmd_benchmark(count),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn cmd_run(identifier: &str, prefix: &str, threads: Option<usize>, json: bool) -> anyhow::Result<()> {
    let threads = threads.unwrap_or_else(num_cpus::get);

    let start = Instant::now();
    let solution = find_nonce_parallel(identifier, prefix, threads)?;
    let elapsed = start.elapsed();

    let (public_key, signature) = sign_message(&solution.message)?;
    let verified = verify(&solution.message, &public_key, &signature);

    if json {
        let report = RunReport {
            identifier,
            prefix,
            nonce: solution.nonce,
            message: &solution.message,
            digest: &solution.digest,
            signature: hex::encode(&signature),
            public_key_pem: public_key.to_public_key_pem(LineEnding::LF)?,
            verified,
            elapsed_secs: elapsed.as_secs_f64(),
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("message:  {}", solution.message);
    println!("digest:   {}", solution.digest);
    println!("nonce:    {}", solution.nonce);
    println!("elapsed:  {:.2}s", elapsed.as_secs_f64());
    println!("verified: {}", verified);

    Ok(())
}

fn cmd_mine(identifier: &str, prefix: &str, threads: Option<usize>) -> anyhow::Result<()> {
    let threads = threads.unwrap_or_else(num_cpus::get);

    println!("Searching...");
    println!("Identifier: {}", identifier);
    println!("Prefix: {} hex zeros", prefix.len());
    println!("Threads: {}", threads);

    let start = Instant::now();
    let solution = find_nonce_parallel(identifier, prefix, threads)?;
    let elapsed = start.elapsed();

    report_solution(&solution, elapsed.as_secs_f64());

    Ok(())
}

fn report_solution(solution: &Solution, elapsed_secs: f64) {
    // Nonces 0..=winner all get hashed, whichever thread scans them
    let attempts = solution.nonce.saturating_add(1);
    let rate = attempts as f64 / elapsed_secs.max(f64::EPSILON);

    println!("\nFound matching digest!");
    println!("Message: {}", solution.message);
    println!("Digest: {}", solution.digest);
    println!("Nonce: {}", solution.nonce);
    println!(
        "Attempts: {} in {:.2}s ({:.0} H/s)",
        attempts, elapsed_secs, rate
    );
}

fn cmd_benchmark(count: u64) -> anyhow::Result<()> {
    println!("Computing {} digests...", count);

    let start = Instant::now();
    for nonce in 0..count {
        let _ = digest_hex("benchmark", nonce);
    }
    let elapsed = start.elapsed();
    let rate = count as f64 / elapsed.as_secs_f64();

    println!("\nResults:");
    println!("  Digests: {}", count);
    println!("  Time elapsed: {:.2}s", elapsed.as_secs_f64());
    println!("  Rate: {:.0} H/s", rate);

    Ok(())
}
