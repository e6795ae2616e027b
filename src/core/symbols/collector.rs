//! Phase 1: collect type, module-variable and import declarations from one file.

use swc_ecma_ast::{
    Class, ClassDecl, ClassMember, Decl, DefaultDecl, ExportDefaultDecl, ImportDecl,
    ImportSpecifier, MethodKind, Module, ModuleDecl, ModuleExportName, ModuleItem,
    ParamOrTsParamProp, Pat, Stmt, TsInterfaceDecl, TsModuleDecl, TsModuleName,
    TsModuleRef, TsNamespaceDecl, TsParamPropParam, TsTypeElement, VarDecl,
};
use swc_ecma_visit::{Visit, VisitWith};

use super::helpers::{
    constructed_type, dotted_name, is_function_expr, is_function_type, prop_name,
    raw_initializer, type_name_from_annotation,
};
use super::types::{
    DeclaredMember, DeclaredType, FileDeclarations, ImportInfo, MemberKind, ModuleVariable,
    RawInitializer, TypeKind,
};

/// Collects declarations that other files may refer to.
///
/// # Usage
///
/// ```ignore
/// let declarations = SymbolCollector::collect("src/i18n.ts", &parsed.module);
/// ```
pub struct SymbolCollector {
    declarations: FileDeclarations,
    /// Enclosing `namespace` names, outermost first.
    namespace: Vec<String>,
    /// Inside a `declare global` block.
    in_global: bool,
}

impl SymbolCollector {
    pub fn new(file_path: &str) -> Self {
        Self {
            declarations: FileDeclarations {
                file_path: file_path.to_string(),
                ..Default::default()
            },
            namespace: Vec::new(),
            in_global: false,
        }
    }

    pub fn collect(file_path: &str, module: &Module) -> FileDeclarations {
        let mut collector = Self::new(file_path);
        collector.declarations.is_module = module.body.iter().any(is_module_syntax);
        collector.collect_module_items(&module.body);
        module.visit_with(&mut collector);
        collector.declarations
    }

    /// Module-level variables and imports only live at the top of the file.
    fn collect_module_items(&mut self, items: &[ModuleItem]) {
        for item in items {
            match item {
                ModuleItem::ModuleDecl(ModuleDecl::Import(import)) => self.collect_import(import),
                ModuleItem::ModuleDecl(ModuleDecl::ExportDecl(export)) => {
                    if let Decl::Var(var) = &export.decl {
                        self.collect_module_variables(var);
                    }
                }
                ModuleItem::Stmt(Stmt::Decl(Decl::Var(var))) => self.collect_module_variables(var),
                _ => {}
            }
        }
    }

    fn collect_module_variables(&mut self, var: &VarDecl) {
        for decl in &var.decls {
            let Pat::Ident(binding) = &decl.name else {
                continue;
            };
            let init = decl.init.as_deref();
            let type_name = type_name_from_annotation(binding.type_ann.as_deref())
                .or_else(|| init.and_then(constructed_type));

            self.declarations.variables.push(ModuleVariable {
                name: binding.id.sym.to_string(),
                type_name,
                initializer: raw_initializer(init),
            });
        }
    }

    fn collect_import(&mut self, node: &ImportDecl) {
        let Some(module_path) = node.src.value.as_str() else {
            return;
        };

        for specifier in &node.specifiers {
            let (local_name, imported_name) = match specifier {
                ImportSpecifier::Named(named) => {
                    let local_name = named.local.sym.to_string();
                    let imported_name = named
                        .imported
                        .as_ref()
                        .map(|i| match i {
                            ModuleExportName::Ident(ident) => ident.sym.to_string(),
                            ModuleExportName::Str(s) => s.value.to_string_lossy().to_string(),
                        })
                        .unwrap_or_else(|| local_name.clone());
                    (local_name, imported_name)
                }
                ImportSpecifier::Default(default) => {
                    (default.local.sym.to_string(), "default".to_string())
                }
                ImportSpecifier::Namespace(ns) => (ns.local.sym.to_string(), "*".to_string()),
            };

            self.declarations.imports.push(ImportInfo {
                local_name,
                imported_name,
                module_path: module_path.to_string(),
            });
        }
    }

    fn collect_class(&mut self, name: &str, class: &Class) {
        let mut supertype_refs: Vec<String> = class
            .super_class
            .as_deref()
            .and_then(dotted_name)
            .into_iter()
            .collect();
        supertype_refs.extend(class.implements.iter().filter_map(|i| dotted_name(&i.expr)));

        let mut members = Vec::new();
        for member in &class.body {
            match member {
                ClassMember::Method(method) => {
                    let Some(name) = prop_name(&method.key) else {
                        continue;
                    };
                    let kind = match method.kind {
                        MethodKind::Method => MemberKind::Method,
                        MethodKind::Getter => MemberKind::Field {
                            type_name: type_name_from_annotation(
                                method.function.return_type.as_deref(),
                            ),
                            initializer: RawInitializer::Opaque,
                        },
                        MethodKind::Setter => continue,
                    };
                    members.push(DeclaredMember { name, kind });
                }
                ClassMember::ClassProp(prop) => {
                    let Some(name) = prop_name(&prop.key) else {
                        continue;
                    };
                    let value = prop.value.as_deref();
                    // `get = (key: string) => ...` behaves like a method.
                    let kind = if value.is_some_and(is_function_expr) {
                        MemberKind::Method
                    } else {
                        MemberKind::Field {
                            type_name: type_name_from_annotation(prop.type_ann.as_deref())
                                .or_else(|| value.and_then(constructed_type)),
                            initializer: raw_initializer(value),
                        }
                    };
                    members.push(DeclaredMember { name, kind });
                }
                ClassMember::Constructor(ctor) => {
                    for param in &ctor.params {
                        let ParamOrTsParamProp::TsParamProp(prop) = param else {
                            continue;
                        };
                        let binding = match &prop.param {
                            TsParamPropParam::Ident(binding) => binding,
                            TsParamPropParam::Assign(assign) => match &*assign.left {
                                Pat::Ident(binding) => binding,
                                _ => continue,
                            },
                        };
                        members.push(DeclaredMember {
                            name: binding.id.sym.to_string(),
                            kind: MemberKind::Field {
                                type_name: type_name_from_annotation(binding.type_ann.as_deref()),
                                initializer: RawInitializer::Missing,
                            },
                        });
                    }
                }
                _ => {}
            }
        }

        self.declarations.types.push(DeclaredType {
            name: name.to_string(),
            namespace: self.namespace.clone(),
            kind: TypeKind::Class,
            global: self.in_global,
            supertype_refs,
            members,
        });
    }

    fn collect_interface(&mut self, node: &TsInterfaceDecl) {
        let supertype_refs = node
            .extends
            .iter()
            .filter_map(|e| dotted_name(&e.expr))
            .collect();

        let members = node
            .body
            .body
            .iter()
            .filter_map(|element| match element {
                TsTypeElement::TsMethodSignature(method) => Some(DeclaredMember {
                    name: dotted_name(&method.key)?,
                    kind: MemberKind::Method,
                }),
                TsTypeElement::TsPropertySignature(prop) => {
                    let name = dotted_name(&prop.key)?;
                    let kind = if is_function_type(prop.type_ann.as_deref()) {
                        MemberKind::Method
                    } else {
                        MemberKind::Field {
                            type_name: type_name_from_annotation(prop.type_ann.as_deref()),
                            initializer: RawInitializer::Missing,
                        }
                    };
                    Some(DeclaredMember { name, kind })
                }
                _ => None,
            })
            .collect();

        self.declarations.types.push(DeclaredType {
            name: node.id.sym.to_string(),
            namespace: self.namespace.clone(),
            kind: TypeKind::Interface,
            global: self.in_global,
            supertype_refs,
            members,
        });
    }
}

/// A top-level `import` or `export` turns a file into an ES module.
/// `import x = N.y` aliases a namespace and does not.
fn is_module_syntax(item: &ModuleItem) -> bool {
    match item {
        ModuleItem::ModuleDecl(ModuleDecl::TsImportEquals(decl)) => {
            decl.is_export || matches!(decl.module_ref, TsModuleRef::TsExternalModuleRef(_))
        }
        ModuleItem::ModuleDecl(_) => true,
        ModuleItem::Stmt(_) => false,
    }
}

impl Visit for SymbolCollector {
    fn visit_class_decl(&mut self, node: &ClassDecl) {
        self.collect_class(node.ident.sym.as_str(), &node.class);
        node.visit_children_with(self);
    }

    fn visit_export_default_decl(&mut self, node: &ExportDefaultDecl) {
        match &node.decl {
            DefaultDecl::Class(class_expr) => {
                if let Some(ident) = &class_expr.ident {
                    self.collect_class(ident.sym.as_str(), &class_expr.class);
                }
            }
            DefaultDecl::TsInterfaceDecl(interface) => self.collect_interface(interface),
            DefaultDecl::Fn(_) => {}
        }
        node.visit_children_with(self);
    }

    fn visit_ts_interface_decl(&mut self, node: &TsInterfaceDecl) {
        self.collect_interface(node);
    }

    fn visit_ts_module_decl(&mut self, node: &TsModuleDecl) {
        if node.global {
            let outer = std::mem::replace(&mut self.in_global, true);
            node.body.visit_with(self);
            self.in_global = outer;
            return;
        }
        let TsModuleName::Ident(ident) = &node.id else {
            // `declare module "x"` blocks describe external packages.
            return;
        };
        self.namespace.push(ident.sym.to_string());
        node.body.visit_with(self);
        self.namespace.pop();
    }

    fn visit_ts_namespace_decl(&mut self, node: &TsNamespaceDecl) {
        self.namespace.push(node.id.sym.to_string());
        node.body.visit_with(self);
        self.namespace.pop();
    }
}
