use std::{
    collections::HashMap,
    fs, io,
    path::{Path, PathBuf},
    sync::{
        Arc, Mutex,
        atomic::{AtomicUsize, Ordering},
    },
};

use thiserror::Error;
use tracing::debug;

use crate::core::{
    Language,
    parsers::resource::{parse_resource, resource_path},
};

/// Translations of one language: original text to translated text.
pub type LocaleMap = HashMap<String, String>;

/// Error type for loading a language's resource file.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("resource file for '{language}' not found: {}", .path.display())]
    Missing { language: Language, path: PathBuf },
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("malformed resource file {}: {message}", .path.display())]
    Malformed { path: PathBuf, message: String },
}

/// Source of per-language translation maps.
pub trait LocalizationLoader: Send + Sync {
    fn load(&self, language: Language) -> Result<Arc<LocaleMap>, LoadError>;
}

/// Loads `<dir>/<base>.<code>.json` on first use of a language and caches it.
///
/// Each language has its own slot, so the first lookups of two different
/// languages load in parallel while concurrent first lookups of the same
/// language load once. Failed loads are not cached and are retried on the
/// next lookup.
pub struct LazyLocalizationLoader {
    dir: PathBuf,
    base_name: String,
    slots: HashMap<Language, Mutex<Option<Arc<LocaleMap>>>>,
    loads: AtomicUsize,
}

impl LazyLocalizationLoader {
    pub fn new(dir: impl Into<PathBuf>, base_name: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            base_name: base_name.into(),
            slots: Language::ALL
                .iter()
                .map(|lang| (*lang, Mutex::new(None)))
                .collect(),
            loads: AtomicUsize::new(0),
        }
    }

    pub fn path_for(&self, language: Language) -> PathBuf {
        resource_path(&self.dir, &self.base_name, language)
    }

    /// Number of successful file loads so far.
    pub fn load_count(&self) -> usize {
        self.loads.load(Ordering::Relaxed)
    }

    fn read(&self, language: Language, path: &Path) -> Result<LocaleMap, LoadError> {
        let content = fs::read_to_string(path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => LoadError::Missing {
                language,
                path: path.to_path_buf(),
            },
            _ => LoadError::Read {
                path: path.to_path_buf(),
                source: e,
            },
        })?;

        let resource = parse_resource(&content).map_err(|e| LoadError::Malformed {
            path: path.to_path_buf(),
            message: format!("{:#}", e),
        })?;

        Ok(resource
            .into_iter()
            .filter_map(|(key, value)| value.as_str().map(|v| (key, v.to_string())))
            .collect())
    }
}

impl LocalizationLoader for LazyLocalizationLoader {
    fn load(&self, language: Language) -> Result<Arc<LocaleMap>, LoadError> {
        let Some(slot) = self.slots.get(&language) else {
            return Err(LoadError::Missing {
                language,
                path: self.path_for(language),
            });
        };
        // A poisoned slot only means another thread panicked mid-load; the
        // cached value is still either absent or complete.
        let mut cached = slot.lock().unwrap_or_else(|e| e.into_inner());

        if let Some(map) = cached.as_ref() {
            return Ok(Arc::clone(map));
        }

        let path = self.path_for(language);
        let map = Arc::new(self.read(language, &path)?);
        self.loads.fetch_add(1, Ordering::Relaxed);
        debug!("Loaded {} translation(s) from {}", map.len(), path.display());

        *cached = Some(Arc::clone(&map));
        Ok(map)
    }
}
