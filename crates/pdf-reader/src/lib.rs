rust_i18n::i18n!("locales", fallback = "en");

pub mod app;
pub mod config;
pub mod constants;
pub mod error;
pub mod file_io;
pub mod format;
pub mod locale;
pub mod shell;
pub mod tasks;
pub mod ui;
pub mod viewer;

pub use error::{ReaderError, Result};
pub use locale::Language;
pub use shell::{Action, AppState};
pub use viewer::session::{DocumentBackend, DocumentHandle, DocumentSession};
