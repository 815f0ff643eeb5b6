//! Internationalization (i18n) core.
//!
//! The host UI has no reactive global state, so every page keeps its own
//! translated copy of the strings it shows and must be told to rebuild it
//! when the language changes. This module provides the pieces for that.
//!
//! # Architecture
//!
//! - `registry`: the fixed set of supported languages and their metadata
//! - `language`: validated `Language` handle
//! - `table`: immutable per-language key -> string tables
//! - `params`: `{name}` placeholder parameters and interpolation
//! - `store`: key resolution with raw-key fallback
//! - `controller`: active language, persistence, single mutation path
//! - `bridge`: observer registry used for fan-out
//! - `snapshot`: per-page translated snapshots
//! - `toggle`: the language switch button
//! - `validator`: locale table checks
//! - `metrics`: lookup and propagation counters
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use studio_i18n::i18n::{ConsumerSnapshot, LanguageController, MountedConsumer, TranslationStore};
//! use studio_i18n::storage::MemoryStorage;
//!
//! let store = Arc::new(TranslationStore::embedded()?);
//! let mut controller = LanguageController::new(store, MemoryStorage::new());
//! controller.initialize();
//!
//! let page = MountedConsumer::mount(
//!     "index",
//!     &controller,
//!     ConsumerSnapshot::builder().text("welcomeText", "index.welcome"),
//! );
//! controller.set_language("en");
//! assert_eq!(page.get("welcomeText").as_deref(), Some("Welcome to Futian Shaxia Home 24h Dance Studio"));
//! ```

mod bridge;
mod controller;
mod language;
mod metrics;
pub mod params;
mod registry;
mod snapshot;
mod store;
mod table;
mod toggle;
mod validator;

pub use bridge::{Phase, PropagationBridge, Subscription};
pub use controller::LanguageController;
pub use language::Language;
pub use metrics::{I18nMetrics, MetricsReport};
pub use params::Params;
pub use registry::{LanguageConfig, LanguageRegistry};
pub use snapshot::{ConsumerSnapshot, MountedConsumer, SnapshotLayout};
pub use store::{TranslationStore, Translator};
pub use table::TranslationTable;
pub use toggle::LanguageToggle;
pub use validator::{TableValidator, ValidationReport, REQUIRED_KEYS};
