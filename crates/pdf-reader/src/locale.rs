use crate::error::ReaderError;
use rust_i18n::t;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Language {
    #[default]
    English,
    Chinese,
}

impl Language {
    pub const ALL: [Language; 2] = [Language::English, Language::Chinese];

    pub fn tag(self) -> &'static str {
        match self {
            Language::English => "en",
            Language::Chinese => "zh",
        }
    }

    /// Unrecognized tags resolve to the default language.
    pub fn from_tag(tag: &str) -> Self {
        match tag.trim().to_ascii_lowercase().as_str() {
            "zh" => Language::Chinese,
            _ => Language::English,
        }
    }

    /// Label used in the language menu.
    pub fn menu_label(self) -> String {
        match self {
            Language::English => t!("menu.english", locale = self.tag()).into_owned(),
            Language::Chinese => t!("menu.chinese", locale = self.tag()).into_owned(),
        }
    }
}

pub fn describe_error(error: &ReaderError, lang: Language) -> String {
    let locale = lang.tag();
    match error {
        ReaderError::NotFound(path) => {
            t!("errors.not_found", locale = locale, path = path.display()).into_owned()
        }
        ReaderError::OpenError(reason) => {
            t!("errors.open_error", locale = locale, reason = reason).into_owned()
        }
        ReaderError::OutOfRange { page, total } => {
            t!("errors.out_of_range", locale = locale, page = page, total = total).into_owned()
        }
        ReaderError::InvalidPageInput(_) => {
            t!("errors.invalid_page_input", locale = locale).into_owned()
        }
        ReaderError::RenderError(reason) => {
            t!("errors.render_error", locale = locale, reason = reason).into_owned()
        }
        ReaderError::NoDocument => t!("errors.no_document", locale = locale).into_owned(),
        ReaderError::Io(reason) => t!("errors.io", locale = locale, reason = reason).into_owned(),
    }
}

pub fn window_title(lang: Language) -> String {
    t!("window.title", locale = lang.tag()).into_owned()
}

pub fn about_text(lang: Language) -> String {
    let version = env!("CARGO_PKG_VERSION");
    t!("dialogs.about_text", locale = lang.tag(), version = version).into_owned()
}
