//! Locale table checker.
//!
//! Usage:
//!   cargo run --bin check-locales              # Check the embedded tables
//!   cargo run --bin check-locales -- locales   # Check <dir>/<code>.json files
//!
//! Exits non-zero when any table has errors. Warnings are printed but do not
//! fail the check.

use anyhow::{bail, Context, Result};
use std::path::PathBuf;
use studio_i18n::i18n::{TableValidator, TranslationStore};
use tracing::info;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("studio_i18n=info".parse()?),
        )
        .init();

    let store = match std::env::args().nth(1).map(PathBuf::from) {
        Some(dir) => TranslationStore::from_dir(&dir)
            .with_context(|| format!("Failed to load locales from {}", dir.display()))?,
        None => {
            info!("Checking embedded translation tables");
            TranslationStore::embedded().context("Failed to load embedded locales")?
        }
    };

    for language in store.supported_languages() {
        let keys = store.table(language).map_or(0, |t| t.len());
        println!("{:<6} {} keys", language.code(), keys);
    }

    let report = TableValidator::validate_store(&store);

    for warning in &report.warnings {
        println!("warning: {}", warning);
    }
    for error in &report.errors {
        println!("error: {}", error);
    }

    if report.has_errors() {
        bail!(
            "{} error(s), {} warning(s)",
            report.errors.len(),
            report.warnings.len()
        );
    }

    println!(
        "OK ({} warning(s))",
        report.warnings.len()
    );
    Ok(())
}
