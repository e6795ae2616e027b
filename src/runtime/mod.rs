//! Runtime lookup of translations from generated resource files.
//!
//! ```ignore
//! use strloc::runtime::{LazyLocalizationLoader, Localize, Localizer};
//!
//! let loader = LazyLocalizationLoader::new("locales", "strings");
//! let mut localizer = Localizer::new(loader);
//! localizer.set_language(Language::Fr);
//! assert_eq!(localizer.get("Save")?, "Enregistrer");
//! ```

pub mod loader;
pub mod localizer;

pub use loader::{LazyLocalizationLoader, LoadError, LocaleMap, LocalizationLoader};
pub use localizer::{Localize, Localizer};
