//! Mockup Application
//!
//! The application shell: configuration, asset loading, the scripted host
//! loop and export delivery.

mod app;
mod files;
mod script;

pub use app::{App, AppConfig, ConfigError, PreviewReport, RunReport, SummaryReport};
pub use files::{DirectorySink, media_type_for, read_asset, read_upload};
pub use script::{Display, Script, Step};
