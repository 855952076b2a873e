/*!

This is the command line interface for checking the Kubernetes tags on a
cluster's EC2 subnets and writing the subnet ids to a PDF report.

!*/

use anyhow::Result;
use clap::Parser;
use env_logger::Builder;
use log::LevelFilter;
use std::path::PathBuf;
use subnet_checker::aws::{self, AwsClients};
use subnet_checker::report::{self, ReportConfig};
use subnet_checker::{json_display, tags};

/// Check a cluster's subnets for the Kubernetes ownership and ELB role tags
/// and write the subnet ids to a PDF report.
#[derive(Debug, Parser)]
#[clap(author, version, about)]
struct Args {
    /// Name of the cluster the subnets should be tagged for.
    cluster_name: String,
    /// AWS region used for subnet tag lookups.
    region: Option<String>,
    /// Set logging verbosity [trace|debug|info|warn|error]. If the environment variable `RUST_LOG`
    /// is present, it overrides the default logging behavior. See https://docs.rs/env_logger/latest
    #[clap(long = "log-level", default_value = "info")]
    log_level: LevelFilter,
    /// The place the subnet report should be written.
    #[clap(long, parse(from_os_str), default_value = "abc.pdf")]
    output: PathBuf,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();
    init_logger(args.log_level);
    if let Err(e) = run(args).await {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}

async fn run(args: Args) -> Result<()> {
    let clients = AwsClients::new(args.region.as_deref()).await;
    let subnet_ids = aws::subnet_ids(&clients.subnet_client).await?;
    println!("{}", json_display(&subnet_ids));

    // The report covers the discovery result even when the tag check fails
    // partway; the check error is surfaced after the report is written.
    let check_result =
        tags::check_cluster_tags(&clients.tag_client, &args.cluster_name, &subnet_ids).await;

    let config = ReportConfig {
        output_path: args.output,
        ..ReportConfig::default()
    };
    report::render_report(&config, &subnet_ids)?;

    check_result?;
    Ok(())
}

/// Initialize the logger with the value passed by `--log-level` (or its default) when the
/// `RUST_LOG` environment variable is not present. If present, the `RUST_LOG` environment variable
/// overrides `--log-level`/`level`.
fn init_logger(level: LevelFilter) {
    match std::env::var(env_logger::DEFAULT_FILTER_ENV).ok() {
        Some(_) => {
            // RUST_LOG exists; env_logger will use it.
            Builder::from_default_env().init();
        }
        None => {
            // RUST_LOG does not exist; use default log level for this crate only.
            Builder::new()
                .filter(Some(env!("CARGO_CRATE_NAME")), level)
                .init();
        }
    }
}
