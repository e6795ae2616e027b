//! Literal sites collected during Phase 2: Classification.
//!
//! A site is one occurrence of a string literal in a position that may hold
//! human-readable text. Sites are handed to the resolver, which decides
//! whether the enclosing call is a localization call, and then to the
//! corpus builder.

use serde::Serialize;

use crate::core::symbols::CallTarget;

/// Syntactic position of a qualifying literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum SiteKind {
    /// Right-hand side of an assignment: `label.text = "Save"`.
    Assignment,
    /// Argument of a call or constructor: `loc.get("Save")`.
    Argument,
}

/// One qualifying string literal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LiteralSite {
    /// Literal text with escapes decoded.
    pub text: String,
    pub kind: SiteKind,
    /// What the enclosing call denotes, when the provider could tell.
    /// Always `None` for [`SiteKind::Assignment`].
    pub call: Option<CallTarget>,
    /// 1-based line.
    pub line: usize,
    /// 1-based column.
    pub col: usize,
}
