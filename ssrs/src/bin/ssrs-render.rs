use anyhow::Result;
use clap::{Parser, Subcommand};
use human_panic::setup_panic;
use ssrs_render::prelude::*;
use tracing::{Level, enabled, error, info};

/// ssrs-render
///
/// Render a report hosted on a SQL Server Reporting Services server through
/// URL access and save the result, e.g. as PDF or Excel.
#[derive(Parser)]
#[clap(author, version, about)]
struct Cli {
    #[clap(flatten)]
    logging: LoggingOpts,

    #[clap(flatten)]
    config: ServerOptions,

    #[clap(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Render a report and write the bytes to a file or stdout.
    #[clap(alias("r"))]
    Render(RenderArgs),
    /// Print the render URL without contacting the server.
    #[clap(alias("u"))]
    Url(UrlArgs),
}

#[tokio::main]
async fn main() {
    setup_panic!();
    dotenvy::dotenv().ok();
    let opts = Cli::parse();

    let (guard, file_location) = match opts.logging.configure_logging(&opts.config.get_run_id()) {
        Ok(v) => v,
        Err(e) => {
            eprintln!("Unable to configure logging: {}", e);
            std::process::exit(2);
        }
    };
    let error_code = run_subcommand(opts).await;

    if error_code != 0 || enabled!(Level::DEBUG) {
        info!(target: "user", "More detailed logs at {}", file_location);
    }

    drop(guard);
    std::process::exit(error_code);
}

async fn run_subcommand(opts: Cli) -> i32 {
    let loaded_config = match opts.config.load_config().await {
        Err(e) => {
            error!(target: "user", "Failed to load configuration: {}", e);
            return 2;
        }
        Ok(c) => c,
    };

    handle_commands(&loaded_config, &opts.command)
        .await
        .unwrap_or_else(|e| {
            error!(target: "user", "Critical Error. {}", e);
            1
        })
}

async fn handle_commands(found_config: &FoundConfig, command: &Command) -> Result<i32> {
    match command {
        Command::Render(args) => render_root(found_config, args).await,
        Command::Url(args) => url_root(found_config, args).await,
    }
}
