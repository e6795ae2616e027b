//! Supported target languages.
//!
//! The declared order of [`Language::ALL`] is the fan-out order used when
//! resource files are synthesized.

use std::{fmt, str::FromStr};

use anyhow::{Result, anyhow};
use serde::{Serialize, Serializer};

macro_rules! languages {
    ($($variant:ident => $code:literal, $name:literal;)*) => {
        /// A target language for generated resource files.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum Language {
            $(
                #[doc = $name]
                $variant,
            )*
        }

        impl Language {
            /// Every supported language, in declaration order.
            pub const ALL: &'static [Language] = &[$(Language::$variant),*];

            /// Lowercase code used in resource file names (`strings.fr.json`).
            pub fn code(self) -> &'static str {
                match self {
                    $(Language::$variant => $code,)*
                }
            }

            /// English display name.
            pub fn name(self) -> &'static str {
                match self {
                    $(Language::$variant => $name,)*
                }
            }
        }
    };
}

languages! {
    Af => "af", "Afrikaans";
    Sq => "sq", "Albanian";
    Ar => "ar", "Arabic";
    Eu => "eu", "Basque";
    Bg => "bg", "Bulgarian";
    Be => "be", "Byelorussian";
    Ca => "ca", "Catalan";
    Hr => "hr", "Croatian";
    Cs => "cs", "Czech";
    Da => "da", "Danish";
    Nl => "nl", "Dutch";
    En => "en", "English";
    Eo => "eo", "Esperanto";
    Et => "et", "Estonian";
    Fo => "fo", "Faroese";
    Fi => "fi", "Finnish";
    Fr => "fr", "French";
    Gl => "gl", "Galician";
    De => "de", "German";
    El => "el", "Greek";
    Iw => "iw", "Hebrew";
    Hu => "hu", "Hungarian";
    Is => "is", "Icelandic";
    Eskimo => "eskimo", "Inuit";
    Ga => "ga", "Irish";
    It => "it", "Italian";
    Ja => "ja", "Japanese";
    Ko => "ko", "Korean";
    Lv => "lv", "Latvian";
    Lt => "lt", "Lithuanian";
    Mk => "mk", "Macedonian";
    Mt => "mt", "Maltese";
    No => "no", "Norwegian";
    Pl => "pl", "Polish";
    Pt => "pt", "Portuguese";
    Ro => "ro", "Romanian";
    Ru => "ru", "Russian";
    Gd => "gd", "Scottish";
    Sr => "sr", "Serbian cyrillic";
    Sk => "sk", "Slovak";
    Sl => "sl", "Slovenian";
    Es => "es", "Spanish";
    Sv => "sv", "Swedish";
    Tr => "tr", "Turkish";
    Uk => "uk", "Ukrainian";
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl Serialize for Language {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.code())
    }
}

impl FromStr for Language {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let needle = s.trim();
        Language::ALL
            .iter()
            .copied()
            .find(|lang| lang.code().eq_ignore_ascii_case(needle))
            .ok_or_else(|| anyhow!("Unknown language code: \"{}\"", needle))
    }
}

/// Result of parsing a list of language codes.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct ParsedLanguages {
    pub languages: Vec<Language>,
    /// Codes that did not name a supported language.
    pub unknown: Vec<String>,
}

/// Parse language codes leniently.
///
/// Each entry may itself be a comma-separated list, so both `["fr", "de"]` and
/// `["fr,de"]` are accepted. Blank entries are skipped and unknown codes are
/// returned separately instead of failing the whole list.
pub fn parse_languages<S: AsRef<str>>(values: &[S]) -> ParsedLanguages {
    let mut parsed = ParsedLanguages::default();

    for part in values.iter().flat_map(|v| v.as_ref().split(',')) {
        let part = part.trim();
        if part.is_empty() {
            continue;
        }
        match part.parse::<Language>() {
            Ok(lang) => {
                if !parsed.languages.contains(&lang) {
                    parsed.languages.push(lang);
                }
            }
            Err(_) => parsed.unknown.push(part.to_string()),
        }
    }

    parsed
}
