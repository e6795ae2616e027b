//! Symbol data shared by the collector, the symbol table and the classifier.

/// Identity of a type in the symbol table.
///
/// Script declarations are global and use their namespace-qualified name
/// (`Localization.Common.ILocalizer`). Declarations in an ES module are
/// private to that file and carry its path as well (`src/a.ts#Service`).
pub type TypeId = String;

/// Index into a file's local declaration arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DeclId(pub usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeKind {
    Interface,
    Class,
}

/// Root of a member-access path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathRoot {
    This,
    Ident(String),
}

/// A syntactic member-access chain such as `this.loc.get` or `Localizer.get`.
///
/// Kept unresolved until a scope is available to interpret the root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValuePath {
    pub root: PathRoot,
    pub members: Vec<String>,
}

/// Initializer of a declaration as written in source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawInitializer {
    /// Declared without an initializer.
    Missing,
    /// Initializer is a member path, optionally wrapped in `.bind(...)`.
    Path(ValuePath),
    /// Any other expression.
    Opaque,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MemberKind {
    /// A method, method signature, or function-typed property signature.
    Method,
    /// A data member. Calls through it are calls through a stored callable.
    Field {
        type_name: Option<String>,
        initializer: RawInitializer,
    },
}

/// A member as collected from one declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeclaredMember {
    pub name: String,
    pub kind: MemberKind,
}

/// An interface or class declaration collected from one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeclaredType {
    pub name: String,
    /// Enclosing `namespace` path, outermost first.
    pub namespace: Vec<String>,
    pub kind: TypeKind,
    /// Declared inside `declare global { ... }`.
    pub global: bool,
    /// `extends` / `implements` references as written (`ILocalizer`, `Common.ILocalizer`).
    pub supertype_refs: Vec<String>,
    pub members: Vec<DeclaredMember>,
}

impl DeclaredType {
    pub fn qualified_name(&self) -> String {
        qualify(&self.namespace, &self.name)
    }
}

/// A variable declared at the top level of a module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleVariable {
    pub name: String,
    /// Type annotation, or the class of a `new C(...)` initializer.
    pub type_name: Option<String>,
    pub initializer: RawInitializer,
}

/// An import binding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportInfo {
    /// Local name in the importing file.
    pub local_name: String,
    /// Original name in the imported file (`"default"` or `"*"` for default and
    /// namespace imports).
    pub imported_name: String,
    /// Import source path (e.g., `"./i18n"`).
    pub module_path: String,
}

/// Everything Phase 1 collects from one file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileDeclarations {
    pub file_path: String,
    /// The file has a top-level `import` or `export`, so its declarations
    /// are not visible to other files unless imported.
    pub is_module: bool,
    pub types: Vec<DeclaredType>,
    pub variables: Vec<ModuleVariable>,
    pub imports: Vec<ImportInfo>,
}

// ============================================================
// Resolved symbols
// ============================================================

/// A member after symbol-table construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Member {
    Method,
    Field {
        ty: Option<TypeId>,
        initializer: RawInitializer,
        /// File declaring the field, used to interpret its initializer.
        file: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeSymbol {
    pub id: TypeId,
    pub name: String,
    /// Namespace-qualified name, without the file.
    pub qualified: String,
    pub kind: TypeKind,
    /// Resolved supertypes; class `extends` comes before `implements`.
    pub supertypes: Vec<TypeId>,
    pub members: std::collections::HashMap<String, Member>,
}

/// A method resolved to the type that declares it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MethodSymbol {
    pub declaring_type: TypeId,
    pub name: String,
}

/// Where a stored callable value is declared.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DeclarationRef {
    /// A local variable or parameter of the file being classified.
    Local(DeclId),
    /// A class field.
    Field { owner: TypeId, name: String },
    /// A module-level variable.
    Module { file: String, name: String },
}

/// What a callee denotes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CallTarget {
    /// A direct method call.
    DirectMethod(MethodSymbol),
    /// A call through a variable or field holding a function value.
    IndirectCallable { declaration: DeclarationRef },
}

/// The initializer of a stored-callable declaration, as seen by the resolver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Initializer {
    /// The declaration has no initializer.
    Missing,
    /// The initializer exists but does not resolve to a callable symbol.
    Unresolved,
    Resolved(CallTarget),
}

pub fn qualify(namespace: &[String], name: &str) -> String {
    if namespace.is_empty() {
        name.to_string()
    } else {
        format!("{}.{}", namespace.join("."), name)
    }
}

/// Id of the type named `qualified`, declared in `module_file` or globally.
pub fn type_id(module_file: Option<&str>, qualified: &str) -> TypeId {
    match module_file {
        Some(file) => format!("{}#{}", file, qualified),
        None => qualified.to_string(),
    }
}
