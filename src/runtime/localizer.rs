use super::loader::{LoadError, LocalizationLoader};
use crate::core::Language;

/// Lookup of translated strings keyed by their original text.
pub trait Localize {
    fn set_language(&mut self, language: Language);

    fn language(&self) -> Language;

    /// Translation of `key` in the current language.
    ///
    /// Falls back to `key` itself when the resource has no entry for it or
    /// the entry is still untranslated (`""`).
    fn get(&self, key: &str) -> Result<String, LoadError>;
}

pub struct Localizer<L: LocalizationLoader> {
    loader: L,
    language: Language,
}

impl<L: LocalizationLoader> Localizer<L> {
    /// Create a localizer whose current language is English.
    pub fn new(loader: L) -> Self {
        Self::with_language(loader, Language::En)
    }

    pub fn with_language(loader: L, language: Language) -> Self {
        Self { loader, language }
    }
}

impl<L: LocalizationLoader> Localize for Localizer<L> {
    fn set_language(&mut self, language: Language) {
        self.language = language;
    }

    fn language(&self) -> Language {
        self.language
    }

    fn get(&self, key: &str) -> Result<String, LoadError> {
        let map = self.loader.load(self.language)?;
        Ok(match map.get(key) {
            Some(translation) if !translation.is_empty() => translation.clone(),
            _ => key.to_string(),
        })
    }
}
