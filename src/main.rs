use clap::Parser;
use salestrack::cli::Cli;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Log lines would tear the dashboard; keep it quiet unless RUST_LOG says otherwise
    let default_level = if cli.is_interactive() { "off" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .compact()
        .init();

    cli.run()
}
