//! Phase 2 visitor that finds string literals in assignment and argument
//! positions and records what each enclosing call denotes.

use swc_common::{SourceMap, Span};
use swc_ecma_ast::{
    ArrowExpr, AssignExpr, BlockStmt, CallExpr, Callee, CatchClause, Class, ClassDecl, ClassExpr,
    Constructor, Decl, Expr, ExprOrSpread, FnDecl, FnExpr, ForInStmt, ForOfStmt, ForStmt, Function,
    Lit, MemberExpr, MemberProp, MethodProp, Module, NewExpr, OptCall, OptChainBase,
    ParamOrTsParamProp, Pat, Stmt, TsModuleDecl, TsModuleName, TsNamespaceDecl, TsParamPropParam,
    VarDecl,
};
use swc_ecma_visit::{Visit, VisitWith};

use crate::core::extract::{LiteralSite, SiteKind};
use crate::core::symbols::{
    Binding, CallTarget, DeclId, DeclarationRef, Initializer, LocalDecl, NameScope, ScopeStack,
    SymbolTable, TypeId,
    helpers::{
        constructed_type, extract_binding_names, initializer_path, type_name_from_annotation,
        type_name_from_ts_type, value_path,
    },
    types::{PathRoot, ValuePath},
};
use crate::utils::normalize_path;

/// Result of classifying one file.
#[derive(Debug, Default)]
pub struct ClassifiedFile {
    pub sites: Vec<LiteralSite>,
    /// Local declarations referenced by `DeclarationRef::Local` in `sites`.
    pub locals: Vec<LocalDecl>,
}

/// Walks one module and emits a [`LiteralSite`] for every string literal that
/// is the right-hand side of an assignment or an argument of a call.
///
/// Variable initializers, object property values, array elements and
/// template literals are deliberately not visited as sites.
///
/// # Usage
///
/// ```ignore
/// let classified = LiteralClassifier::new("src/page.ts", &parsed.source_map, &table)
///     .classify(&parsed.module);
/// ```
pub struct LiteralClassifier<'a> {
    /// Normalized path used as the module key in the symbol table.
    file_key: String,
    source_map: &'a SourceMap,
    table: &'a SymbolTable,

    scopes: ScopeStack,
    locals: Vec<LocalDecl>,
    /// Type of `this` for each enclosing class or function boundary.
    this_stack: Vec<Option<TypeId>>,
    namespace: Vec<String>,

    sites: Vec<LiteralSite>,
}

impl<'a> LiteralClassifier<'a> {
    pub fn new(file_path: &str, source_map: &'a SourceMap, table: &'a SymbolTable) -> Self {
        Self {
            file_key: normalize_path(file_path),
            source_map,
            table,
            scopes: ScopeStack::new(),
            locals: Vec::new(),
            this_stack: Vec::new(),
            namespace: Vec::new(),
            sites: Vec::new(),
        }
    }

    pub fn classify(mut self, module: &Module) -> ClassifiedFile {
        module.visit_with(&mut self);
        ClassifiedFile {
            sites: self.sites,
            locals: self.locals,
        }
    }

    // ============================================================
    // Emission
    // ============================================================

    fn push_site(&mut self, text: &str, span: Span, kind: SiteKind, call: Option<CallTarget>) {
        let loc = self.source_map.lookup_char_pos(span.lo);
        self.sites.push(LiteralSite {
            text: text.to_string(),
            kind,
            call,
            line: loc.line,
            col: loc.col_display + 1,
        });
    }

    fn collect_arguments(&mut self, args: &[ExprOrSpread], call: Option<CallTarget>) {
        for arg in args {
            if arg.spread.is_some() {
                continue;
            }
            if let Expr::Lit(Lit::Str(s)) = &*arg.expr
                && let Some(text) = s.value.as_str()
            {
                self.push_site(text, s.span, SiteKind::Argument, call.clone());
            }
        }
    }

    // ============================================================
    // Bindings
    // ============================================================

    fn name_scope(&self) -> NameScope<'_> {
        NameScope {
            file: &self.file_key,
            namespace: &self.namespace,
        }
    }

    fn resolve_type(&self, name: &str) -> Option<TypeId> {
        self.table.resolve_type_name(self.name_scope(), name)
    }

    fn current_this(&self) -> Option<TypeId> {
        self.this_stack.last().cloned().flatten()
    }

    fn bind_local(&mut self, name: String, ty: Option<TypeId>, initializer: Initializer) {
        let id = DeclId(self.locals.len());
        self.locals.push(LocalDecl {
            name: name.clone(),
            ty,
            initializer,
        });
        self.scopes.bind(name, Binding::Local(id));
    }

    fn bind_opaque(&mut self, pat: &Pat) {
        for name in extract_binding_names(pat) {
            self.scopes.bind(name, Binding::Opaque);
        }
    }

    /// Parameters carry no initializer the resolver can follow; the caller
    /// decides what is passed.
    fn bind_param(&mut self, pat: &Pat) {
        let binding = match pat {
            Pat::Ident(binding) => binding,
            Pat::Assign(assign) => match &*assign.left {
                Pat::Ident(binding) => binding,
                other => return self.bind_opaque(other),
            },
            other => return self.bind_opaque(other),
        };
        let ty = type_name_from_annotation(binding.type_ann.as_deref())
            .and_then(|name| self.resolve_type(&name));
        self.bind_local(binding.id.sym.to_string(), ty, Initializer::Missing);
    }

    /// Bind function declarations of a block before visiting it, since they
    /// are hoisted.
    fn hoist_functions(&mut self, stmts: &[Stmt]) {
        for stmt in stmts {
            if let Stmt::Decl(Decl::Fn(fn_decl)) = stmt {
                self.scopes
                    .bind(fn_decl.ident.sym.to_string(), Binding::Function);
            }
        }
    }

    fn with_scope<F>(&mut self, f: F)
    where
        F: FnOnce(&mut Self),
    {
        self.scopes.enter_scope();
        f(self);
        self.scopes.exit_scope();
    }

    fn with_this<F>(&mut self, this: Option<TypeId>, f: F)
    where
        F: FnOnce(&mut Self),
    {
        self.this_stack.push(this);
        f(self);
        self.this_stack.pop();
    }

    fn visit_class_with_name(&mut self, name: Option<&str>, class: &Class) {
        let this = name.and_then(|n| {
            self.table
                .declared_type(&self.file_key, &self.namespace, n)
        });
        self.with_this(this, |this| class.visit_with(this));
    }

    // ============================================================
    // Expression typing and callee resolution
    // ============================================================

    fn ident_type(&self, name: &str) -> Option<TypeId> {
        match self.scopes.lookup(name) {
            Some(Binding::Local(id)) => self.locals.get(id.0).and_then(|d| d.ty.clone()),
            Some(_) => None,
            None => self
                .table
                .module_variable(&self.file_key, name)
                .and_then(|(_, variable)| variable.ty.clone()),
        }
    }

    fn ident_target(&self, name: &str) -> Option<CallTarget> {
        let declaration = match self.scopes.lookup(name) {
            Some(Binding::Local(id)) => DeclarationRef::Local(id),
            Some(_) => return None,
            None => self.table.module_variable(&self.file_key, name)?.0,
        };
        Some(CallTarget::IndirectCallable { declaration })
    }

    /// Static type of an expression, when it can be read off declarations.
    fn type_of(&self, expr: &Expr) -> Option<TypeId> {
        match expr {
            Expr::Ident(ident) => self.ident_type(ident.sym.as_str()),
            Expr::This(_) => self.current_this(),
            Expr::Member(member) => self.member_type(member),
            Expr::Paren(paren) => self.type_of(&paren.expr),
            Expr::TsNonNull(non_null) => self.type_of(&non_null.expr),
            Expr::TsSatisfies(satisfies) => self.type_of(&satisfies.expr),
            Expr::TsAs(as_expr) => {
                type_name_from_ts_type(&as_expr.type_ann).and_then(|n| self.resolve_type(&n))
            }
            Expr::TsTypeAssertion(assertion) => {
                type_name_from_ts_type(&assertion.type_ann).and_then(|n| self.resolve_type(&n))
            }
            Expr::New(_) => constructed_type(expr).and_then(|n| self.resolve_type(&n)),
            Expr::OptChain(chain) => match &*chain.base {
                OptChainBase::Member(member) => self.member_type(member),
                OptChainBase::Call(_) => None,
            },
            _ => None,
        }
    }

    fn member_type(&self, member: &MemberExpr) -> Option<TypeId> {
        let MemberProp::Ident(prop) = &member.prop else {
            return None;
        };
        let recv = self.type_of(&member.obj)?;
        self.table.field_type(&recv, prop.sym.as_str())
    }

    /// Resolve a member path (`this.loc.get`, `loc.get`, `Localizer.get`).
    fn resolve_path(&self, path: &ValuePath) -> Option<CallTarget> {
        if path.members.is_empty() {
            return match &path.root {
                PathRoot::Ident(name) => self.ident_target(name),
                PathRoot::This => None,
            };
        }

        let recv = match &path.root {
            PathRoot::This => self.current_this()?,
            PathRoot::Ident(name) => match self.ident_type(name) {
                Some(ty) => ty,
                None => {
                    let bound = self.scopes.lookup(name).is_some()
                        || self.table.module_variable(&self.file_key, name).is_some();
                    if bound {
                        return None;
                    }
                    return self
                        .table
                        .resolve_type_rooted(self.name_scope(), name, &path.members);
                }
            },
        };
        self.table.resolve_member_chain(&recv, &path.members)
    }

    fn member_callee_target(&self, member: &MemberExpr) -> Option<CallTarget> {
        let MemberProp::Ident(prop) = &member.prop else {
            return None;
        };
        if let Some(recv) = self.type_of(&member.obj) {
            return self.table.member_target(&recv, prop.sym.as_str());
        }
        let mut path = value_path(&member.obj)?;
        path.members.push(prop.sym.to_string());
        self.resolve_path(&path)
    }

    fn callee_target(&self, callee: &Expr) -> Option<CallTarget> {
        match callee {
            Expr::Ident(ident) => self.ident_target(ident.sym.as_str()),
            Expr::Member(member) => self.member_callee_target(member),
            Expr::Paren(paren) => self.callee_target(&paren.expr),
            Expr::TsNonNull(non_null) => self.callee_target(&non_null.expr),
            Expr::OptChain(chain) => match &*chain.base {
                OptChainBase::Member(member) => self.member_callee_target(member),
                OptChainBase::Call(_) => None,
            },
            _ => None,
        }
    }

    fn local_initializer(&self, init: Option<&Expr>) -> Initializer {
        let Some(init) = init else {
            return Initializer::Missing;
        };
        initializer_path(init)
            .and_then(|path| self.resolve_path(&path))
            .map(Initializer::Resolved)
            .unwrap_or(Initializer::Unresolved)
    }
}

impl Visit for LiteralClassifier<'_> {
    fn visit_assign_expr(&mut self, node: &AssignExpr) {
        if let Expr::Lit(Lit::Str(s)) = &*node.right
            && let Some(text) = s.value.as_str()
        {
            self.push_site(text, s.span, SiteKind::Assignment, None);
        }
        node.visit_children_with(self);
    }

    fn visit_call_expr(&mut self, node: &CallExpr) {
        let call = match &node.callee {
            Callee::Expr(callee) => self.callee_target(callee),
            Callee::Super(_) => None,
            // `import("./module")` takes a module specifier, not text.
            Callee::Import(_) => {
                node.visit_children_with(self);
                return;
            }
        };
        self.collect_arguments(&node.args, call);
        node.visit_children_with(self);
    }

    fn visit_opt_call(&mut self, node: &OptCall) {
        let call = self.callee_target(&node.callee);
        self.collect_arguments(&node.args, call);
        node.visit_children_with(self);
    }

    fn visit_new_expr(&mut self, node: &NewExpr) {
        if let Some(args) = &node.args {
            self.collect_arguments(args, None);
        }
        node.visit_children_with(self);
    }

    fn visit_var_decl(&mut self, node: &VarDecl) {
        for decl in &node.decls {
            decl.init.visit_with(self);
            decl.name.visit_with(self);

            if !self.scopes.is_local() {
                continue;
            }

            let Pat::Ident(binding) = &decl.name else {
                self.bind_opaque(&decl.name);
                continue;
            };
            let init = decl.init.as_deref();
            let ty = type_name_from_annotation(binding.type_ann.as_deref())
                .and_then(|name| self.resolve_type(&name))
                .or_else(|| init.and_then(|e| self.type_of(e)));
            let initializer = self.local_initializer(init);
            self.bind_local(binding.id.sym.to_string(), ty, initializer);
        }
    }

    fn visit_block_stmt(&mut self, node: &BlockStmt) {
        self.with_scope(|this| {
            this.hoist_functions(&node.stmts);
            node.visit_children_with(this);
        });
    }

    fn visit_function(&mut self, node: &Function) {
        self.with_scope(|this| {
            for param in &node.params {
                this.bind_param(&param.pat);
            }
            node.visit_children_with(this);
        });
    }

    fn visit_arrow_expr(&mut self, node: &ArrowExpr) {
        self.with_scope(|this| {
            for param in &node.params {
                this.bind_param(param);
            }
            node.visit_children_with(this);
        });
    }

    fn visit_constructor(&mut self, node: &Constructor) {
        self.with_scope(|this| {
            for param in &node.params {
                match param {
                    ParamOrTsParamProp::Param(param) => this.bind_param(&param.pat),
                    ParamOrTsParamProp::TsParamProp(prop) => match &prop.param {
                        TsParamPropParam::Ident(binding) => {
                            let ty = type_name_from_annotation(binding.type_ann.as_deref())
                                .and_then(|name| this.resolve_type(&name));
                            this.bind_local(binding.id.sym.to_string(), ty, Initializer::Missing);
                        }
                        TsParamPropParam::Assign(assign) => this.bind_param(&assign.left),
                    },
                }
            }
            node.visit_children_with(this);
        });
    }

    fn visit_fn_decl(&mut self, node: &FnDecl) {
        self.scopes
            .bind(node.ident.sym.to_string(), Binding::Function);
        self.with_this(None, |this| node.visit_children_with(this));
    }

    fn visit_fn_expr(&mut self, node: &FnExpr) {
        self.with_this(None, |this| node.visit_children_with(this));
    }

    fn visit_method_prop(&mut self, node: &MethodProp) {
        self.with_this(None, |this| node.visit_children_with(this));
    }

    fn visit_class_decl(&mut self, node: &ClassDecl) {
        self.scopes
            .bind(node.ident.sym.to_string(), Binding::Opaque);
        self.visit_class_with_name(Some(node.ident.sym.as_str()), &node.class);
    }

    fn visit_class_expr(&mut self, node: &ClassExpr) {
        let name = node.ident.as_ref().map(|i| i.sym.to_string());
        self.visit_class_with_name(name.as_deref(), &node.class);
    }

    fn visit_catch_clause(&mut self, node: &CatchClause) {
        self.with_scope(|this| {
            if let Some(param) = &node.param {
                this.bind_opaque(param);
            }
            node.visit_children_with(this);
        });
    }

    fn visit_for_stmt(&mut self, node: &ForStmt) {
        self.with_scope(|this| node.visit_children_with(this));
    }

    fn visit_for_in_stmt(&mut self, node: &ForInStmt) {
        self.with_scope(|this| node.visit_children_with(this));
    }

    fn visit_for_of_stmt(&mut self, node: &ForOfStmt) {
        self.with_scope(|this| node.visit_children_with(this));
    }

    fn visit_ts_module_decl(&mut self, node: &TsModuleDecl) {
        if node.global {
            self.with_scope(|this| node.body.visit_with(this));
            return;
        }
        let TsModuleName::Ident(ident) = &node.id else {
            return;
        };
        self.namespace.push(ident.sym.to_string());
        self.with_scope(|this| node.body.visit_with(this));
        self.namespace.pop();
    }

    fn visit_ts_namespace_decl(&mut self, node: &TsNamespaceDecl) {
        self.namespace.push(node.id.sym.to_string());
        node.body.visit_with(self);
        self.namespace.pop();
    }
}
