//! Phase 2: Classification - per-file literal harvesting.
//!
//! Each file is walked once by [`LiteralClassifier`], which emits the string
//! literals found in assignment and argument positions together with the
//! resolved callee of the enclosing call. Whether that callee is a
//! localization call is decided afterwards by `crate::core::resolve`.

pub mod classifier;
pub mod literal_site;

pub use classifier::{ClassifiedFile, LiteralClassifier};
pub use literal_site::{LiteralSite, SiteKind};
