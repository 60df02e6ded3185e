//! Urzędnicy CLI - import the register of officials into Wikibase.

use clap::Parser;
use tracing_subscriber::EnvFilter;
use urzednicy_cli::commands;
use urzednicy_cli::{Cli, Command, Config, Formatter};

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Log to stderr so stdout carries only command output.
fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: Cli) -> urzednicy_cli::Result<()> {
    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    if let Some(profile_name) = cli.profile {
        config.switch_profile(profile_name)?;
    }

    let format = cli.format.map(Into::into).unwrap_or(config.settings.format);
    let color_enabled = !cli.no_color && config.settings.color;
    let formatter = Formatter::new(format, color_enabled);

    match cli.command {
        Command::Import(args) => commands::execute_import(args, &config, &formatter),
        Command::Date(args) => commands::execute_date(args, &formatter),
        Command::Profile(args) => commands::execute_profile(args, &mut config, &formatter),
    }
}
