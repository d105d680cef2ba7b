//! ndsync CLI entry point.

use clap::Parser;
use colored::Colorize;
use ndsync::cli::Cli;
use ndsync::config::Config;
use ndsync::error::Error;
use ndsync::notion::NotionClient;
use ndsync::sync::{fetch_schema, select_eligible, RunReport, SyncEngine};
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Set up tracing based on verbosity
    init_tracing(cli.verbose, cli.quiet);

    let runtime = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("Error: failed to start runtime: {e}");
            return ExitCode::FAILURE;
        }
    };

    // Per-record failures are reported inside the run and exit 0;
    // only fatal pre-loop errors reach this handler.
    match runtime.block_on(run(&cli)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if cli.json {
                eprintln!("{}", e.to_structured_json());
            } else if !cli.quiet {
                if let Some(hint) = e.hint() {
                    eprintln!("Error: {e}\n  Hint: {hint}");
                } else {
                    eprintln!("Error: {e}");
                }
            }
            ExitCode::from(e.exit_code())
        }
    }
}

fn init_tracing(verbose: u8, quiet: bool) {
    use tracing_subscriber::EnvFilter;

    if quiet {
        return;
    }

    // Honor RUST_LOG if set, otherwise use verbosity flag
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        match verbose {
            0 => EnvFilter::new("warn"),
            1 => EnvFilter::new("info"),
            2 => EnvFilter::new("debug,reqwest=info,hyper=info"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .init();
}

async fn run(cli: &Cli) -> Result<(), Error> {
    let config = Config::from_env()?;
    let client = NotionClient::new(&config.api_key);

    // Fatal pre-loop phase: schema fetch and selection. Nothing has
    // been touched if either fails.
    let schema = fetch_schema(&client, &config.slave_db_id).await?;
    let pages = select_eligible(&client, &config.master_db_id, cli.limit).await?;

    let human = !cli.json && !cli.quiet;
    if pages.is_empty() {
        if cli.json {
            print_json_report(&RunReport::default(), cli.dry_run)?;
        } else if human {
            println!("No pages need to be synced.");
        }
        return Ok(());
    }
    if human {
        println!("Found {} pages to sync.", pages.len());
    }

    let engine = SyncEngine::new(&client, &config.slave_db_id, &schema)
        .with_dry_run(cli.dry_run)
        .with_progress(human);
    let report = engine.run(&pages).await;

    if cli.json {
        print_json_report(&report, cli.dry_run)?;
    } else if human {
        print_summary(&report, cli.dry_run);
    }

    Ok(())
}

fn print_json_report(report: &RunReport, dry_run: bool) -> Result<(), Error> {
    let output = serde_json::json!({
        "dry_run": dry_run,
        "processed": report.processed(),
        "succeeded": report.succeeded(),
        "failed": report.failed(),
        "records": &report.outcomes,
    });
    println!("{}", serde_json::to_string(&output)?);
    Ok(())
}

fn print_summary(report: &RunReport, dry_run: bool) {
    println!();
    if dry_run {
        println!("Dry run complete. {} pages checked.", report.processed());
    } else {
        println!("Sync completed. {} pages processed.", report.processed());
    }
    println!("  Succeeded: {}", report.succeeded().to_string().green());
    if report.failed() > 0 {
        println!("  Failed:    {}", report.failed().to_string().red());
    }
}
