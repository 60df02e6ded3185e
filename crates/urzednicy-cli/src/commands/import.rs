//! Import command implementation.

use crate::cli::ImportArgs;
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use tracing::info;
use urzednicy_domain::PersonRecord;
use urzednicy_importer::{read_persons, ImportReport, Importer, ImporterConfig};
use urzednicy_sdk::{InMemoryStore, WikibaseClient};

/// Execute the import command.
pub fn execute_import(args: ImportArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let importer_config = importer_config(&args)?;
    let records = read_persons(&args.file)?;
    info!(file = %args.file.display(), records = records.len(), "Read register");

    if args.dry_run {
        let (report, store) = dry_run(&records, importer_config)?;
        println!("{}", formatter.format_report(&report)?);
        let written = store.items().len();
        println!(
            "{}",
            formatter.info(&format!("Dry run: {} item(s) would be written", written))
        );
        println!("{}", formatter.format_documents(store.items())?);
        return Ok(());
    }

    let (bot_name, bot_password) = match (&args.bot_name, &args.bot_password) {
        (Some(name), Some(password)) => (name.as_str(), password.as_str()),
        _ => return Err(CliError::MissingCredentials),
    };

    let profile = config.get_active_profile()?;
    let mut client = WikibaseClient::new(profile.wikibase_config())?;
    client.login(bot_name, bot_password)?;
    println!(
        "{}",
        formatter.success(&format!("Logged in to {} as {}", profile.api_url, bot_name))
    );

    let mut importer = Importer::new(client, importer_config)?;
    let report = importer.run(&records);
    println!("{}", formatter.format_report(&report)?);
    Ok(())
}

/// Vocabulary from `--vocabulary` (or the built-in one) with `--limit` applied.
fn importer_config(args: &ImportArgs) -> Result<ImporterConfig> {
    let mut config = match &args.vocabulary {
        Some(path) => ImporterConfig::from_file(path)?,
        None => ImporterConfig::default(),
    };
    if args.limit.is_some() {
        config.limit = args.limit;
    }
    Ok(config)
}

/// Import into an empty in-memory store.
pub fn dry_run(
    records: &[PersonRecord],
    config: ImporterConfig,
) -> Result<(ImportReport, InMemoryStore)> {
    let store = InMemoryStore::with_language(config.primary_language());
    let mut importer = Importer::new(store, config)?;
    let report = importer.run(records);
    Ok((report, importer.into_store()))
}
