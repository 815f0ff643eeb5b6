//! Language switching walkthrough.
//!
//! Mounts the tab bar, three sample pages and a language toggle against the
//! persisted preference, switches language once and prints what every
//! consumer shows afterwards.
//!
//! Usage:
//!   cargo run                 # Toggle to the next language
//!   cargo run -- en           # Switch to a specific language code
//!
//! Optional environment variables:
//! - STUDIO_I18N_STORAGE_PATH (defaults to data/storage.json)
//! - STUDIO_I18N_LOCALES_DIR (defaults to the embedded tables)
//! - STUDIO_I18N_DEFAULT_LANGUAGE (defaults to zh-CN)
//! - STUDIO_I18N_LOG_MISSING_KEYS (defaults to true)

use anyhow::Result;
use std::sync::Arc;
use studio_i18n::chrome::{TabBar, TabBarLabels};
use studio_i18n::config::Config;
use studio_i18n::i18n::{
    ConsumerSnapshot, LanguageController, LanguageToggle, MountedConsumer, Params,
};
use studio_i18n::storage::JsonFileStorage;
use tracing::{info, warn};

fn main() -> Result<()> {
    // Load .env file (ignored when absent)
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("studio_i18n=info".parse()?),
        )
        .init();

    let config = Config::from_env()?;
    let store = Arc::new(config.build_store()?);
    let storage = JsonFileStorage::new(config.storage_path.clone());

    let mut controller =
        LanguageController::new(store, storage).with_default_language(config.default_language);
    let start = controller.initialize();
    info!(
        "Preference file: {} (starting in {})",
        config.storage_path.display(),
        start
    );

    // Chrome first, then pages
    let tab_bar = TabBar::new();
    let _tab_labels = TabBarLabels::new(tab_bar.clone()).attach(&controller);

    let pages = vec![
        MountedConsumer::mount(
            "index",
            &controller,
            ConsumerSnapshot::builder()
                .text("welcomeText", "index.welcome")
                .text("storeInfoText", "index.store.info")
                .text("todayCoursesText", "index.courses.today")
                .text("allText", "button.all"),
        ),
        MountedConsumer::mount(
            "booking",
            &controller,
            ConsumerSnapshot::builder()
                .text("upcomingText", "booking.upcoming")
                .text("historyText", "booking.history")
                .text_with("remainingText", "course.remaining", Params::new().with("count", 3))
                .text_with(
                    "consumeText",
                    "course.consume.card",
                    Params::new().with("danceType", "Jazz"),
                ),
        ),
        MountedConsumer::mount(
            "profile",
            &controller,
            ConsumerSnapshot::builder()
                .text("bookingsText", "profile.my.bookings")
                .text("cardsText", "profile.my.course.cards")
                .text("logoutText", "profile.logout"),
        ),
    ];
    let toggle = LanguageToggle::mount(&controller);

    println!("\nBefore: {}", controller.language());
    print_state(&tab_bar, &pages, &toggle);

    let switched = match std::env::args().nth(1) {
        Some(code) => controller.set_language(&code),
        None => toggle.switch(&mut controller),
    };
    if !switched {
        warn!("Language unchanged, staying in {}", controller.language());
    }

    println!("\nAfter: {}", controller.language());
    print_state(&tab_bar, &pages, &toggle);

    let report = controller.metrics().report();
    println!("\nMetrics:\n{}", serde_json::to_string_pretty(&report)?);

    Ok(())
}

fn print_state(tab_bar: &TabBar, pages: &[MountedConsumer], toggle: &LanguageToggle) {
    println!("  tab bar: {}", tab_bar.labels().join(" | "));
    println!("  toggle:  {}", toggle.label());
    for page in pages {
        println!("  [{}] ({} refreshes)", page.name(), page.refresh_count());
        for (slot, text) in page.snapshot().iter() {
            println!("    {:<18} {}", slot, text);
        }
    }
}
