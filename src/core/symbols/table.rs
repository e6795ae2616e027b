//! Merged, read-only view of every type and module-level variable in the scan.
//!
//! Built once after Phase 1 and shared by all Phase 2 workers.

use std::{
    collections::{HashMap, HashSet, VecDeque},
    path::Path,
};

use tracing::debug;

use super::types::{
    CallTarget, DeclarationRef, DeclaredType, FileDeclarations, ImportInfo, Initializer, Member,
    MemberKind, MethodSymbol, PathRoot, RawInitializer, TypeId, TypeKind, TypeSymbol, ValuePath,
    qualify, type_id,
};
use crate::utils::normalize_path;

const MODULE_EXTENSIONS: &[&str] = &["ts", "tsx", "d.ts", "js", "jsx"];

/// A module-level variable with its type resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariableSymbol {
    pub ty: Option<TypeId>,
    pub initializer: RawInitializer,
}

#[derive(Debug, Default)]
struct ModuleSymbols {
    is_module: bool,
    variables: HashMap<String, VariableSymbol>,
    imports: HashMap<String, ImportInfo>,
}

/// Where a type reference is written: the file and the enclosing namespace.
#[derive(Debug, Clone, Copy)]
pub struct NameScope<'a> {
    pub file: &'a str,
    pub namespace: &'a [String],
}

impl<'a> NameScope<'a> {
    pub fn file(file: &'a str) -> Self {
        Self {
            file,
            namespace: &[],
        }
    }
}

/// Outcome of looking one candidate id up.
enum Candidate {
    Found(TypeId),
    /// Declared, but by more than one unrelated declaration.
    Ambiguous,
    Absent,
}

#[derive(Debug, Default)]
pub struct SymbolTable {
    types: HashMap<TypeId, TypeSymbol>,
    /// Global classes declared in more than one file. References to them
    /// stay unresolved.
    ambiguous: HashSet<TypeId>,
    modules: HashMap<String, ModuleSymbols>,
}

impl SymbolTable {
    /// Build the table from per-file declarations.
    ///
    /// Pass 1 registers every type id and import so that references can be
    /// resolved regardless of file order. Pass 2 resolves supertypes and
    /// member types. Declarations sharing an id (interface merging within a
    /// file, or global interfaces across script files) are merged into one
    /// symbol. A global class declared in two files is ambiguous.
    pub fn build(files: Vec<FileDeclarations>) -> Self {
        let mut table = SymbolTable::default();
        let mut class_files: HashMap<TypeId, &str> = HashMap::new();
        let file_keys: Vec<String> = files.iter().map(|f| normalize_path(&f.file_path)).collect();

        for (file, file_key) in files.iter().zip(&file_keys) {
            let module = table.modules.entry(file_key.clone()).or_default();
            module.is_module |= file.is_module;
            for import in &file.imports {
                module
                    .imports
                    .insert(import.local_name.clone(), import.clone());
            }
            for declared in &file.types {
                let id = declared_id(file, file_key, declared);
                if declared.kind == TypeKind::Class
                    && let Some(previous) = class_files.insert(id.clone(), file_key.as_str())
                    && previous != file_key.as_str()
                {
                    debug!(
                        "Class '{}' is declared in both {} and {}; references to it stay unresolved",
                        id, previous, file_key
                    );
                    table.ambiguous.insert(id.clone());
                }
                table.types.entry(id.clone()).or_insert_with(|| TypeSymbol {
                    id,
                    name: declared.name.clone(),
                    qualified: declared.qualified_name(),
                    kind: declared.kind,
                    supertypes: Vec::new(),
                    members: HashMap::new(),
                });
            }
        }

        let mut resolved_types = Vec::new();
        let mut resolved_variables = Vec::new();

        for (file, file_key) in files.iter().zip(&file_keys) {
            for declared in &file.types {
                let scope = NameScope {
                    file: file_key,
                    namespace: &declared.namespace,
                };

                let supertypes: Vec<TypeId> = declared
                    .supertype_refs
                    .iter()
                    .filter_map(|name| {
                        let resolved = table.resolve_type_name(scope, name);
                        if resolved.is_none() {
                            debug!(
                                "{}: supertype '{}' of '{}' does not resolve to a single declaration",
                                file_key, name, declared.name
                            );
                        }
                        resolved
                    })
                    .collect();

                let members: Vec<(String, Member)> = declared
                    .members
                    .iter()
                    .map(|m| {
                        let member = match &m.kind {
                            MemberKind::Method => Member::Method,
                            MemberKind::Field {
                                type_name,
                                initializer,
                            } => Member::Field {
                                ty: type_name
                                    .as_deref()
                                    .and_then(|t| table.resolve_type_name(scope, t)),
                                initializer: initializer.clone(),
                                file: file_key.clone(),
                            },
                        };
                        (m.name.clone(), member)
                    })
                    .collect();

                resolved_types.push((declared_id(file, file_key, declared), supertypes, members));
            }

            for variable in &file.variables {
                let ty = variable
                    .type_name
                    .as_deref()
                    .and_then(|t| table.resolve_type_name(NameScope::file(file_key), t));
                resolved_variables.push((
                    file_key.clone(),
                    variable.name.clone(),
                    VariableSymbol {
                        ty,
                        initializer: variable.initializer.clone(),
                    },
                ));
            }
        }

        for (id, supertypes, members) in resolved_types {
            let Some(symbol) = table.types.get_mut(&id) else {
                continue;
            };
            for supertype in supertypes {
                if supertype != id && !symbol.supertypes.contains(&supertype) {
                    symbol.supertypes.push(supertype);
                }
            }
            for (name, member) in members {
                symbol.members.entry(name).or_insert(member);
            }
        }

        for (file, name, variable) in resolved_variables {
            table
                .modules
                .entry(file)
                .or_default()
                .variables
                .entry(name)
                .or_insert(variable);
        }

        table
    }

    pub fn type_symbol(&self, id: &str) -> Option<&TypeSymbol> {
        self.types.get(id)
    }

    pub fn type_count(&self) -> usize {
        self.types.len()
    }

    /// Look a type up by its namespace-qualified name, wherever it is
    /// declared, falling back to a unique match on the trailing segments
    /// (`ILocalizer` finds `Localization.ILocalizer`).
    ///
    /// More than one matching declaration means no match.
    pub fn find_type(&self, name: &str) -> Option<&TypeSymbol> {
        let mut matches: Vec<&TypeSymbol> =
            self.types.values().filter(|t| t.qualified == name).collect();
        if matches.is_empty() {
            let suffix = format!(".{}", name);
            matches = self
                .types
                .values()
                .filter(|t| t.qualified.ends_with(&suffix))
                .collect();
        }
        match matches.as_slice() {
            [single] if !self.ambiguous.contains(&single.id) => Some(*single),
            [] => None,
            _ => {
                debug!("Type name '{}' does not name a single declaration", name);
                None
            }
        }
    }

    /// Id of the type `name` declared in `file` inside `namespace`.
    pub fn declared_type(&self, file: &str, namespace: &[String], name: &str) -> Option<TypeId> {
        let module_file = self.is_module(file).then_some(file);
        match self.candidate(type_id(module_file, &qualify(namespace, name))) {
            Candidate::Found(id) => Some(id),
            Candidate::Ambiguous | Candidate::Absent => None,
        }
    }

    /// Resolve a type reference written in `scope`.
    ///
    /// Order: declarations of the file itself (enclosing namespaces from the
    /// innermost outward), then imports, then global declarations, then a
    /// unique global simple-name match. The first level that declares the
    /// name decides; if that declaration is ambiguous the name is unresolved.
    pub fn resolve_type_name(&self, scope: NameScope<'_>, name: &str) -> Option<TypeId> {
        if self.is_module(scope.file) {
            for depth in (0..=scope.namespace.len()).rev() {
                let qualified = qualify(&scope.namespace[..depth], name);
                match self.candidate(type_id(Some(scope.file), &qualified)) {
                    Candidate::Found(id) => return Some(id),
                    Candidate::Ambiguous => return None,
                    Candidate::Absent => {}
                }
            }
        }

        let (head, rest) = match name.split_once('.') {
            Some((head, rest)) => (head, Some(rest)),
            None => (name, None),
        };
        if let Some(import) = self.import(scope.file, head) {
            // An import shadows globals even when it cannot be followed.
            return self.resolve_imported_type(scope.file, import, rest);
        }

        for depth in (0..=scope.namespace.len()).rev() {
            match self.candidate(qualify(&scope.namespace[..depth], name)) {
                Candidate::Found(id) => return Some(id),
                Candidate::Ambiguous => return None,
                Candidate::Absent => {}
            }
        }

        let simple = name.rsplit('.').next().unwrap_or(name);
        let mut matches = self
            .types
            .values()
            .filter(|t| t.name == simple && t.id == t.qualified);
        let first = matches.next()?;
        if matches.next().is_some() || self.ambiguous.contains(&first.id) {
            return None;
        }
        Some(first.id.clone())
    }

    /// Resolve `import`ed name (plus the `rest` of a dotted reference) to
    /// the declaration in the imported file.
    fn resolve_imported_type(
        &self,
        file: &str,
        import: &ImportInfo,
        rest: Option<&str>,
    ) -> Option<TypeId> {
        let qualified = match (import.imported_name.as_str(), rest) {
            ("*", Some(rest)) => rest.to_string(),
            ("*", None) | ("default", _) => return None,
            (imported, Some(rest)) => format!("{}.{}", imported, rest),
            (imported, None) => imported.to_string(),
        };
        let Some(target) = self.resolve_module_path(file, &import.module_path) else {
            debug!(
                "{}: '{}' is imported from '{}', which is not a scanned file",
                file, qualified, import.module_path
            );
            return None;
        };
        let module_file = self.is_module(&target).then_some(target.as_str());
        match self.candidate(type_id(module_file, &qualified)) {
            Candidate::Found(id) => Some(id),
            Candidate::Ambiguous | Candidate::Absent => None,
        }
    }

    fn candidate(&self, id: TypeId) -> Candidate {
        if !self.types.contains_key(&id) {
            Candidate::Absent
        } else if self.ambiguous.contains(&id) {
            Candidate::Ambiguous
        } else {
            Candidate::Found(id)
        }
    }

    fn is_module(&self, file: &str) -> bool {
        self.modules.get(file).is_some_and(|m| m.is_module)
    }

    /// Find the nearest type declaring `name`, searching `ty` and then its
    /// supertypes breadth-first.
    pub fn find_member(&self, ty: &str, name: &str) -> Option<(&TypeId, &Member)> {
        let mut queue = VecDeque::from([ty]);
        let mut visited = HashSet::new();

        while let Some(current) = queue.pop_front() {
            if !visited.insert(current) {
                continue;
            }
            let Some(symbol) = self.types.get(current) else {
                continue;
            };
            if let Some(member) = symbol.members.get(name) {
                return Some((&symbol.id, member));
            }
            queue.extend(symbol.supertypes.iter().map(String::as_str));
        }

        None
    }

    /// What `recv.name` denotes when called.
    pub fn member_target(&self, recv: &str, name: &str) -> Option<CallTarget> {
        let (declaring_type, member) = self.find_member(recv, name)?;
        Some(match member {
            Member::Method => CallTarget::DirectMethod(MethodSymbol {
                declaring_type: declaring_type.clone(),
                name: name.to_string(),
            }),
            Member::Field { .. } => CallTarget::IndirectCallable {
                declaration: DeclarationRef::Field {
                    owner: declaring_type.clone(),
                    name: name.to_string(),
                },
            },
        })
    }

    /// Declared type of field `name` on `ty` (or a supertype).
    pub fn field_type(&self, ty: &str, name: &str) -> Option<TypeId> {
        match self.find_member(ty, name)? {
            (_, Member::Field { ty, .. }) => ty.clone(),
            (_, Member::Method) => None,
        }
    }

    /// True if `ty` is `target` or reaches it through any chain of supertypes.
    pub fn implements(&self, ty: &str, target: &str) -> bool {
        let mut queue = VecDeque::from([ty]);
        let mut visited = HashSet::new();

        while let Some(current) = queue.pop_front() {
            if current == target {
                return true;
            }
            if !visited.insert(current) {
                continue;
            }
            if let Some(symbol) = self.types.get(current) {
                queue.extend(symbol.supertypes.iter().map(String::as_str));
            }
        }

        false
    }

    fn import(&self, file: &str, local_name: &str) -> Option<&ImportInfo> {
        self.modules.get(file)?.imports.get(local_name)
    }

    /// Resolve a module-level variable visible in `file` under `name`, either
    /// declared there or brought in by a named import.
    ///
    /// The returned reference names the variable where it is declared, so an
    /// aliased import (`import { localizer as loc }`) points at `localizer`.
    pub fn module_variable(
        &self,
        file: &str,
        name: &str,
    ) -> Option<(DeclarationRef, &VariableSymbol)> {
        let module = self.modules.get(file)?;
        if let Some(variable) = module.variables.get(name) {
            let declaration = DeclarationRef::Module {
                file: file.to_string(),
                name: name.to_string(),
            };
            return Some((declaration, variable));
        }

        let import = module.imports.get(name)?;
        if import.imported_name == "*" || import.imported_name == "default" {
            return None;
        }
        let target = self.resolve_module_path(file, &import.module_path)?;
        let variable = self
            .modules
            .get(&target)?
            .variables
            .get(&import.imported_name)?;
        let declaration = DeclarationRef::Module {
            file: target,
            name: import.imported_name.clone(),
        };
        Some((declaration, variable))
    }

    /// Resolve a relative import specifier against the scanned modules.
    ///
    /// Bare package specifiers never resolve.
    pub fn resolve_module_path(&self, from_file: &str, specifier: &str) -> Option<String> {
        if !specifier.starts_with('.') {
            return None;
        }

        let base_dir = Path::new(from_file).parent().unwrap_or(Path::new(""));
        let joined = normalize_path(base_dir.join(specifier));

        if self.modules.contains_key(&joined) {
            return Some(joined);
        }

        // `./i18n.js` may refer to `i18n.ts` under TS module resolution.
        let stem = Path::new(&joined)
            .extension()
            .filter(|ext| matches!(ext.to_str(), Some("js" | "jsx")))
            .map(|_| normalize_path(Path::new(&joined).with_extension("")))
            .unwrap_or_else(|| joined.clone());

        MODULE_EXTENSIONS
            .iter()
            .map(|ext| format!("{}.{}", stem, ext))
            .chain(
                MODULE_EXTENSIONS
                    .iter()
                    .map(|ext| format!("{}/index.{}", stem, ext)),
            )
            .find(|candidate| self.modules.contains_key(candidate))
    }

    /// Resolve a member path whose root is interpreted without local scopes:
    /// `this` is `this_type`, an identifier is a module-level variable or a
    /// type name (for static references such as `Localizer.get`).
    pub fn resolve_static_path(
        &self,
        path: &ValuePath,
        file: &str,
        this_type: Option<&str>,
    ) -> Option<CallTarget> {
        match &path.root {
            PathRoot::This => {
                let recv = this_type?;
                self.resolve_member_chain(recv, &path.members)
            }
            PathRoot::Ident(name) => {
                if let Some((declaration, variable)) = self.module_variable(file, name) {
                    if path.members.is_empty() {
                        return Some(CallTarget::IndirectCallable { declaration });
                    }
                    let recv = variable.ty.as_deref()?;
                    return self.resolve_member_chain(recv, &path.members);
                }
                self.resolve_type_rooted(NameScope::file(file), name, &path.members)
            }
        }
    }

    /// Resolve `A.B.C.m` where some prefix of the path names a type.
    pub fn resolve_type_rooted(
        &self,
        scope: NameScope<'_>,
        root: &str,
        members: &[String],
    ) -> Option<CallTarget> {
        // Longest type-name prefix wins so `Localization.Localizer.get` picks
        // the class rather than a namespace.
        for split in (0..members.len()).rev() {
            let mut name = root.to_string();
            for segment in &members[..split] {
                name.push('.');
                name.push_str(segment);
            }
            if let Some(ty) = self.resolve_type_name(scope, &name) {
                return self.resolve_member_chain(&ty, &members[split..]);
            }
        }
        None
    }

    /// Interpret a raw initializer written in `file`.
    pub fn resolve_initializer(
        &self,
        raw: &RawInitializer,
        file: &str,
        this_type: Option<&str>,
    ) -> Initializer {
        match raw {
            RawInitializer::Missing => Initializer::Missing,
            RawInitializer::Opaque => Initializer::Unresolved,
            RawInitializer::Path(path) => self
                .resolve_static_path(path, file, this_type)
                .map(Initializer::Resolved)
                .unwrap_or(Initializer::Unresolved),
        }
    }

    /// Initializer of field `name` declared on `owner`.
    pub fn field_initializer(&self, owner: &str, name: &str) -> Option<Initializer> {
        match self.types.get(owner)?.members.get(name)? {
            Member::Field {
                initializer, file, ..
            } => Some(self.resolve_initializer(initializer, file, Some(owner))),
            Member::Method => None,
        }
    }

    /// Initializer of module-level variable `name` declared in `file`.
    pub fn module_initializer(&self, file: &str, name: &str) -> Option<Initializer> {
        let variable = self.modules.get(file)?.variables.get(name)?;
        Some(self.resolve_initializer(&variable.initializer, file, None))
    }

    /// Follow field types along `members`, then resolve the last member.
    pub fn resolve_member_chain(&self, recv: &str, members: &[String]) -> Option<CallTarget> {
        let (last, fields) = members.split_last()?;
        let mut current = recv.to_string();
        for field in fields {
            current = self.field_type(&current, field)?;
        }
        self.member_target(&current, last)
    }
}

/// Id of a collected declaration: file-scoped in an ES module, global
/// otherwise.
fn declared_id(file: &FileDeclarations, file_key: &str, declared: &DeclaredType) -> TypeId {
    let module_file = (file.is_module && !declared.global).then_some(file_key);
    type_id(module_file, &declared.qualified_name())
}
