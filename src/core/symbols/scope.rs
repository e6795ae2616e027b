use std::collections::HashMap;

use super::types::DeclId;

/// What a name is bound to inside a function or block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Binding {
    /// A variable or parameter recorded in the file's local arena.
    Local(DeclId),
    /// A function declaration. Calling it never goes through a stored callable.
    Function,
    /// A binding whose value cannot be described (destructuring, catch clause,
    /// class declaration).
    Opaque,
}

/// Stack of lexical scopes for one file.
///
/// Names not found in any scope fall through to module-level variables,
/// imports and type names.
#[derive(Debug, Default)]
pub struct ScopeStack {
    scopes: Vec<HashMap<String, Binding>>,
}

impl ScopeStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn enter_scope(&mut self) {
        self.scopes.push(HashMap::new());
    }

    pub fn exit_scope(&mut self) {
        self.scopes.pop();
    }

    /// Whether any local scope is open (i.e. not at module level).
    pub fn is_local(&self) -> bool {
        !self.scopes.is_empty()
    }

    /// Bind `name` in the innermost scope. At module level this is a no-op:
    /// module-level bindings are answered by the symbol table.
    pub fn bind(&mut self, name: String, binding: Binding) {
        if let Some(scope) = self.scopes.last_mut() {
            scope.insert(name, binding);
        }
    }

    pub fn lookup(&self, name: &str) -> Option<Binding> {
        self.scopes
            .iter()
            .rev()
            .find_map(|scope| scope.get(name).copied())
    }
}
