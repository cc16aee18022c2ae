use anyhow::{Context, Result};
use clap::Parser;
use subtopic_explorer::cli::{Args, Command};
use subtopic_explorer::commands::{handle_generate, handle_history, handle_models, handle_settings};
use subtopic_explorer::generator::context::GeneratorContext;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let args = Args::parse();
    let config = args.load_config()?;

    let default_level = if config.verbose { "debug" } else { "info" };
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set tracing subscriber")?;

    let context = GeneratorContext::new(config);

    match args.command {
        Command::Generate(generate) => handle_generate(&context, generate).await,
        Command::History { command } => handle_history(&context, command),
        Command::Settings { command } => handle_settings(&context, command),
        Command::Models => handle_models(&context).await,
    }
}
