//! Type and declaration knowledge used to resolve callees.
//!
//! - `collector`: Phase 1 visitor producing [`FileDeclarations`] per file
//! - `table`: merged [`SymbolTable`] shared by all files
//! - `model`: per-file [`SemanticModel`] behind the [`SymbolProvider`] trait
//! - `scope`: lexical scopes used while classifying a file

pub mod collector;
pub mod helpers;
pub mod model;
pub mod scope;
pub mod table;
pub mod types;

pub use collector::SymbolCollector;
pub use model::{LocalDecl, SemanticModel, SymbolProvider};
pub use scope::{Binding, ScopeStack};
pub use table::{NameScope, SymbolTable};
pub use types::{
    CallTarget, DeclId, DeclarationRef, FileDeclarations, Initializer, MethodSymbol, TypeId,
    TypeKind, TypeSymbol,
};
