use crate::locale::Language;
use log::LevelFilter;
use std::path::PathBuf;

pub const ENV_PDFIUM_DIR: &str = "PDF_READER_PDFIUM_DIR";
pub const ENV_LOG_FILE: &str = "PDF_READER_LOG_FILE";
pub const ENV_LOG_LEVEL: &str = "PDF_READER_LOG";
pub const ENV_LANGUAGE: &str = "PDF_READER_LANG";

const DEFAULT_LOG_FILE_NAME: &str = "pdf-reader.log";

#[derive(Debug, Clone, PartialEq)]
pub struct ReaderConfig {
    pub initial_file: Option<PathBuf>,
    pub pdfium_dir: Option<PathBuf>,
    pub log_file: PathBuf,
    pub log_level: LevelFilter,
    pub language: Language,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            initial_file: None,
            pdfium_dir: None,
            log_file: std::env::temp_dir().join(DEFAULT_LOG_FILE_NAME),
            log_level: LevelFilter::Info,
            language: Language::default(),
        }
    }
}

impl ReaderConfig {
    pub fn from_env(initial_file: Option<PathBuf>) -> Self {
        Self::from_lookup(initial_file, |key| std::env::var(key).ok())
    }

    /// `lookup` resolves environment variables; empty values count as unset.
    pub fn from_lookup(
        initial_file: Option<PathBuf>,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Self {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let defaults = Self::default();

        Self {
            initial_file,
            pdfium_dir: get(ENV_PDFIUM_DIR).map(PathBuf::from),
            log_file: get(ENV_LOG_FILE)
                .map(PathBuf::from)
                .unwrap_or(defaults.log_file),
            log_level: get(ENV_LOG_LEVEL)
                .and_then(|level| level.trim().parse().ok())
                .unwrap_or(defaults.log_level),
            language: get(ENV_LANGUAGE)
                .map(|tag| Language::from_tag(&tag))
                .unwrap_or(defaults.language),
        }
    }
}
