//! strloc - string literal extraction and localization for TypeScript projects
//!
//! strloc scans a TypeScript/JavaScript source tree, collects the string
//! literals passed to calls or assigned to variables, marks the ones that go
//! through a localization interface, and writes one flat JSON resource file
//! per target language. The `runtime` module looks translations up from those
//! files.
//!
//! ## Module Structure
//!
//! - `cli`: Command-line interface layer
//! - `config`: Configuration file loading and parsing
//! - `core`: Extraction engine (symbols, classification, resolution, corpus, synthesis)
//! - `issues`: Issue type definitions and reporting
//! - `logging`: Side-channel log file setup
//! - `mcp`: Model Context Protocol server implementation
//! - `runtime`: Translation lookup from generated resource files
//! - `utils`: Shared utility functions

pub mod cli;
pub mod config;
pub mod core;
pub mod issues;
pub mod logging;
pub mod mcp;
pub mod runtime;
pub mod utils;
