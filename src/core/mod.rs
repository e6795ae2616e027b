//! Core extraction engine.
//!
//! ## Pipeline
//!
//! 1. `parsers::source` parses each file with swc
//! 2. `symbols` collects declarations and merges them into a `SymbolTable`
//! 3. `extract` finds literal sites and what each enclosing call denotes
//! 4. `resolve` marks sites that are arguments of a localization call
//! 5. `corpus` filters and deduplicates the literals into keys
//! 6. `synthesize` writes one resource file per target language
//!
//! `context::ExtractContext` drives the whole pipeline lazily.

pub mod context;
pub mod corpus;
pub mod extract;
pub mod file_scanner;
pub mod language;
pub mod parsers;
pub mod resolve;
pub mod symbols;
pub mod synthesize;

pub use context::ExtractContext;
pub use corpus::{Corpus, CorpusStats, FilterOptions};
pub use language::Language;
pub use parsers::resource::LocaleResource;
