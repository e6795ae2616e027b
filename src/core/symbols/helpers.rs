//! Pure functions for reading names and paths out of AST nodes.

use swc_ecma_ast::{
    Callee, Expr, MemberProp, ObjectPatProp, Pat, PropName, TsEntityName, TsFnOrConstructorType,
    TsKeywordTypeKind, TsType, TsTypeAnn, TsUnionOrIntersectionType,
};

use super::types::{PathRoot, RawInitializer, ValuePath};

/// Render an expression used as a type reference (`Foo`, `ns.Foo`) as a dotted name.
pub fn dotted_name(expr: &Expr) -> Option<String> {
    match expr {
        Expr::Ident(ident) => Some(ident.sym.to_string()),
        Expr::Member(member) => {
            let MemberProp::Ident(prop) = &member.prop else {
                return None;
            };
            let left = dotted_name(&member.obj)?;
            Some(format!("{}.{}", left, prop.sym))
        }
        _ => None,
    }
}

pub fn entity_name(name: &TsEntityName) -> String {
    match name {
        TsEntityName::Ident(ident) => ident.sym.to_string(),
        TsEntityName::TsQualifiedName(qualified) => {
            format!("{}.{}", entity_name(&qualified.left), qualified.right.sym)
        }
    }
}

/// Extract the named type from an annotation.
///
/// `T`, `ns.T`, `(T)` and `T | undefined | null` all yield `T`. Other shapes
/// (function types, arrays, unions of several named types) yield `None`.
pub fn type_name_from_ts_type(ty: &TsType) -> Option<String> {
    match ty {
        TsType::TsTypeRef(type_ref) => Some(entity_name(&type_ref.type_name)),
        TsType::TsParenthesizedType(paren) => type_name_from_ts_type(&paren.type_ann),
        TsType::TsUnionOrIntersectionType(TsUnionOrIntersectionType::TsUnionType(union)) => {
            let mut named = union.types.iter().filter(|t| !is_nullish(t));
            let first = named.next()?;
            if named.next().is_some() {
                return None;
            }
            type_name_from_ts_type(first)
        }
        _ => None,
    }
}

pub fn type_name_from_annotation(ann: Option<&TsTypeAnn>) -> Option<String> {
    ann.and_then(|a| type_name_from_ts_type(&a.type_ann))
}

fn is_nullish(ty: &TsType) -> bool {
    matches!(
        ty,
        TsType::TsKeywordType(k)
            if matches!(k.kind, TsKeywordTypeKind::TsUndefinedKeyword | TsKeywordTypeKind::TsNullKeyword)
    )
}

/// True if an annotation is a function type (`(s: string) => string`).
pub fn is_function_type(ann: Option<&TsTypeAnn>) -> bool {
    matches!(
        ann.map(|a| &*a.type_ann),
        Some(TsType::TsFnOrConstructorType(TsFnOrConstructorType::TsFnType(_)))
    )
}

/// True for expressions that define a function value inline.
pub fn is_function_expr(expr: &Expr) -> bool {
    match expr {
        Expr::Arrow(_) | Expr::Fn(_) => true,
        Expr::Paren(paren) => is_function_expr(&paren.expr),
        _ => false,
    }
}

/// Class named by a `new C(...)` expression.
pub fn constructed_type(expr: &Expr) -> Option<String> {
    match expr {
        Expr::New(new_expr) => dotted_name(&new_expr.callee),
        Expr::Paren(paren) => constructed_type(&paren.expr),
        _ => None,
    }
}

/// Read a member-access chain rooted at `this` or an identifier.
pub fn value_path(expr: &Expr) -> Option<ValuePath> {
    match expr {
        Expr::This(_) => Some(ValuePath {
            root: PathRoot::This,
            members: Vec::new(),
        }),
        Expr::Ident(ident) => Some(ValuePath {
            root: PathRoot::Ident(ident.sym.to_string()),
            members: Vec::new(),
        }),
        Expr::Member(member) => {
            let MemberProp::Ident(prop) = &member.prop else {
                return None;
            };
            let mut path = value_path(&member.obj)?;
            path.members.push(prop.sym.to_string());
            Some(path)
        }
        Expr::Paren(paren) => value_path(&paren.expr),
        Expr::TsNonNull(non_null) => value_path(&non_null.expr),
        Expr::TsAs(as_expr) => value_path(&as_expr.expr),
        Expr::TsSatisfies(satisfies) => value_path(&satisfies.expr),
        _ => None,
    }
}

/// Strip a trailing `.bind(...)` call: `loc.get.bind(loc)` -> `loc.get`.
pub fn unwrap_bind(expr: &Expr) -> &Expr {
    if let Expr::Call(call) = expr
        && let Callee::Expr(callee) = &call.callee
        && let Expr::Member(member) = &**callee
        && let MemberProp::Ident(prop) = &member.prop
        && prop.sym == "bind"
    {
        return &member.obj;
    }
    expr
}

/// Member path denoted by an initializer, if it has that shape.
pub fn initializer_path(expr: &Expr) -> Option<ValuePath> {
    value_path(unwrap_bind(expr))
}

pub fn raw_initializer(expr: Option<&Expr>) -> RawInitializer {
    match expr {
        None => RawInitializer::Missing,
        Some(e) => initializer_path(e)
            .map(RawInitializer::Path)
            .unwrap_or(RawInitializer::Opaque),
    }
}

pub fn prop_name(key: &PropName) -> Option<String> {
    match key {
        PropName::Ident(ident) => Some(ident.sym.to_string()),
        PropName::Str(s) => s.value.as_str().map(|s| s.to_string()),
        _ => None,
    }
}

/// Extract all binding names from a pattern.
pub fn extract_binding_names(pat: &Pat) -> Vec<String> {
    match pat {
        Pat::Ident(binding) => vec![binding.id.sym.to_string()],
        Pat::Object(obj) => obj
            .props
            .iter()
            .flat_map(|prop| match prop {
                ObjectPatProp::KeyValue(kv) => extract_binding_names(&kv.value),
                ObjectPatProp::Assign(assign) => vec![assign.key.sym.to_string()],
                ObjectPatProp::Rest(rest) => extract_binding_names(&rest.arg),
            })
            .collect(),
        Pat::Array(arr) => arr
            .elems
            .iter()
            .flatten()
            .flat_map(extract_binding_names)
            .collect(),
        Pat::Assign(assign) => extract_binding_names(&assign.left),
        Pat::Rest(rest) => extract_binding_names(&rest.arg),
        _ => vec![],
    }
}
