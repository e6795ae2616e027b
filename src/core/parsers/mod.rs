//! File parsers for source code and resource files.
//!
//! - `source`: TypeScript/JavaScript source parser (uses swc for AST generation)
//! - `resource`: flat JSON locale resource reader/writer

pub mod resource;
pub mod source;
