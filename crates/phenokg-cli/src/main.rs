//! PhenoKG CLI - Convert cohort definitions into RDF knowledge graphs.

use clap::Parser;
use phenokg_cli::commands;
use phenokg_cli::{logging, Cli, Command, Config, Formatter};

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(e.exit_code());
    }
}

async fn run() -> phenokg_cli::Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // `config init` may target a file that does not exist yet
    let config = match (&cli.command, cli.config.as_deref()) {
        (Command::Config(_), Some(path)) if !path.exists() => Config::default(),
        (_, explicit) => Config::load(explicit)?,
    };
    logging::init(cli.log_level.as_deref(), &config.settings.log_level)?;

    // Determine output format
    let format = cli.format.map(Into::into).unwrap_or(config.settings.format);

    // Determine color setting
    let color_enabled = !cli.no_color && config.settings.color;

    let formatter = Formatter::new(format, color_enabled);
    let ontology = cli.ontology.as_deref();

    match cli.command {
        Command::Convert(args) => commands::execute_convert(args, &config, ontology, &formatter).await,
        Command::Validate(args) => commands::execute_validate(args, &config, &formatter).await,
        Command::Batch(args) => commands::execute_batch(args, &config, ontology, &formatter).await,
        Command::Config(args) => commands::execute_config(args, &config, cli.config.as_deref(), &formatter).await,
    }
}
