mod cli;
mod config;
mod error;
mod output;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use copylan_core::{SyncRequest, session};

use crate::cli::Cli;
use crate::error::CliError;

#[tokio::main]
async fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup tracing based on verbosity
    init_tracing(cli.global.verbose, cli.global.quiet);

    // Run and handle errors with proper exit codes
    if let Err(err) = run(cli).await {
        let code = err.exit_code();
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(code);
    }
}

fn init_tracing(verbosity: u8, quiet: bool) {
    let filter = match (quiet, verbosity) {
        (true, _) => "error",
        (false, 0) => "info",
        (false, 1) => "debug",
        (false, _) => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let cfg = copylan_config::load_config()?;
    let session_config = config::build_session_config(&cli.global, &cfg)?;
    let format = config::output_format(&cli.global, &cfg)?;
    let color = output::should_color(&config::color_mode(&cli.global, &cfg)?);

    let request = SyncRequest {
        source: cli.src_element,
        destination: cli.dst_element,
        parent_interface: cli.parent_interface,
        include_routes: !cli.run.skip_routes,
        dry_run: cli.run.dry_run,
    };
    tracing::debug!(?request, "starting run");

    let summary = session::oneshot(&session_config, &request).await?;

    let rendered = output::render_summary(&format, &summary, color);
    output::print_output(&rendered, cli.global.quiet);

    if cli.run.strict && summary.has_failures() {
        return Err(CliError::PartialFailure {
            failed: summary.failed(),
            total: summary.outcomes.len(),
        });
    }
    Ok(())
}
