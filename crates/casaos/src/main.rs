mod cli;
mod commands;
mod config;
mod error;
mod output;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use casaos_core::CancellationToken;

use crate::cli::{Cli, Command};
use crate::error::CliError;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    init_tracing(cli.global.verbose);

    if let Err(err) = run(cli).await {
        let code = err.exit_code();
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(code);
    }
}

fn init_tracing(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Command::Completions(args) => {
            use clap::CommandFactory;
            use clap_complete::generate;

            let mut cmd = Cli::command();
            generate(args.shell, &mut cmd, "casaos", &mut std::io::stdout());
            Ok(())
        }

        Command::Apps(args) => {
            let cancel = cancel_on(tokio::signal::ctrl_c());
            commands::apps::handle(args, &cli.global, &cancel).await
        }
    }
}

/// A token that fires once `signal` resolves, normally the first Ctrl-C.
fn cancel_on<F>(signal: F) -> CancellationToken
where
    F: Future<Output = std::io::Result<()>> + Send + 'static,
{
    let cancel = CancellationToken::new();
    let trigger = cancel.clone();
    tokio::spawn(async move {
        match signal.await {
            Ok(()) => {
                tracing::debug!("interrupt received, canceling");
                trigger.cancel();
            }
            Err(e) => tracing::warn!(error = %e, "failed to register ctrl-c handler"),
        }
    });
    cancel
}
