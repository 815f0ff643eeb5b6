pub mod chrome;
pub mod config;
pub mod error;
pub mod i18n;
pub mod storage;
