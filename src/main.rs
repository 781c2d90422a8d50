//! Command line entry point: pick an identifier list, then run the pipeline.

use clap::Parser;
use console::style;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;
use zomboid_workshop::{
    discover_lists, parse_proxy, read_identifiers, select_list, Layout, PipelineBuilder, Report,
    Result, Status,
};

/// Download Project Zomboid workshop items with SteamCMD and install them
/// into the game's mods directory.
#[derive(Parser, Debug)]
#[command(name = "zomboid-workshop", version, about)]
struct Cli {
    /// Install root holding steamcmd/ and mods/ [default: directory of this program]
    #[arg(long, env = "ZOMBOID_WORKSHOP_ROOT")]
    root: Option<PathBuf>,

    /// Identifier list to install, skipping discovery and the prompt
    #[arg(long, env = "ZOMBOID_WORKSHOP_LIST")]
    list: Option<PathBuf>,

    /// Where mods are installed [default: ~/Zomboid/mods]
    #[arg(long, env = "ZOMBOID_WORKSHOP_DESTINATION")]
    destination: Option<PathBuf>,

    /// Proxy used to download SteamCMD, e.g. socks5://127.0.0.1:1080
    #[arg(long, env = "ZOMBOID_WORKSHOP_PROXY")]
    proxy: Option<String>,

    /// Hide progress bars
    #[arg(short, long)]
    quiet: bool,

    /// Log every step
    #[arg(short, long)]
    verbose: bool,
}

fn init_logging(verbose: bool) {
    let default = if verbose {
        "zomboid_workshop=debug"
    } else {
        "zomboid_workshop=info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_writer(std::io::stdout)
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

async fn run(cli: Cli) -> Result<()> {
    let layout = match cli.root {
        Some(root) => Layout::new(root),
        None => Layout::from_current_exe()?,
    };

    let list = match cli.list {
        Some(list) => list,
        None => {
            let candidates = discover_lists(layout.root())?;
            match select_list(candidates, layout.root())? {
                Some(list) => list,
                None => {
                    info!("No list selected, nothing to do");
                    return Ok(());
                }
            }
        }
    };

    let identifiers = read_identifiers(&list)?;
    if identifiers.is_empty() {
        warn!("{} contains no workshop identifiers", list.display());
    }
    info!(
        "Installing {} workshop items from {}",
        identifiers.len(),
        list.display()
    );

    let mut builder = if cli.quiet {
        PipelineBuilder::hidden()
    } else {
        PipelineBuilder::new()
    };
    builder = builder.root(layout.root().to_path_buf());
    if let Some(destination) = cli.destination {
        builder = builder.destination(destination);
    }
    if let Some(proxy) = cli.proxy {
        builder = builder.proxy(parse_proxy(&proxy)?);
    }

    let pipeline = builder.build()?;
    let report = pipeline.run(&identifiers).await?;
    print_report(&report, pipeline.destination().display());

    Ok(())
}

fn print_report(report: &Report, destination: impl std::fmt::Display) {
    println!(
        "{} {} of {} workshop items downloaded",
        style("✔").green(),
        style(report.succeeded()).bold(),
        report.summaries.len()
    );
    for summary in report.failed() {
        if let Status::Fail(reason) = summary.status() {
            println!(
                "  {} {} {}",
                style("✘").red(),
                summary.identifier(),
                style(reason).dim()
            );
        }
    }
    println!(
        "{} {} mods installed into {}",
        style("✔").green(),
        style(report.installed.len()).bold(),
        destination
    );
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e.report());
            ExitCode::from(e.exit_code())
        }
    }
}
