use super::{
    table::SymbolTable,
    types::{DeclId, DeclarationRef, Initializer, TypeId, TypeSymbol},
};

/// Read-only semantic queries needed to decide whether a call is a
/// localization call.
///
/// Implementations must be safe to share across worker threads.
pub trait SymbolProvider: Sync {
    fn type_symbol(&self, id: &str) -> Option<&TypeSymbol>;

    /// Resolve a possibly unqualified type name.
    fn find_type(&self, name: &str) -> Option<&TypeSymbol>;

    /// True if `ty` is `target` or a transitive subtype of it.
    fn implements(&self, ty: &str, target: &str) -> bool;

    /// Initializer of a stored-callable declaration.
    ///
    /// `None` means the declaration itself could not be located.
    fn initializer(&self, declaration: &DeclarationRef) -> Option<Initializer>;
}

/// A variable or parameter declared inside the file being classified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalDecl {
    pub name: String,
    pub ty: Option<TypeId>,
    pub initializer: Initializer,
}

/// Per-file semantic model: the shared symbol table plus the local
/// declarations recorded while classifying that file.
pub struct SemanticModel<'a> {
    table: &'a SymbolTable,
    locals: Vec<LocalDecl>,
}

impl<'a> SemanticModel<'a> {
    pub fn new(table: &'a SymbolTable, locals: Vec<LocalDecl>) -> Self {
        Self { table, locals }
    }

    pub fn local(&self, id: DeclId) -> Option<&LocalDecl> {
        self.locals.get(id.0)
    }
}

impl SymbolProvider for SemanticModel<'_> {
    fn type_symbol(&self, id: &str) -> Option<&TypeSymbol> {
        self.table.type_symbol(id)
    }

    fn find_type(&self, name: &str) -> Option<&TypeSymbol> {
        self.table.find_type(name)
    }

    fn implements(&self, ty: &str, target: &str) -> bool {
        self.table.implements(ty, target)
    }

    fn initializer(&self, declaration: &DeclarationRef) -> Option<Initializer> {
        match declaration {
            DeclarationRef::Local(id) => self.local(*id).map(|d| d.initializer.clone()),
            DeclarationRef::Field { owner, name } => self.table.field_initializer(owner, name),
            DeclarationRef::Module { file, name } => self.table.module_initializer(file, name),
        }
    }
}
