//! Phase 3: Resolution - decide which literal sites are arguments of a
//! localization call.
//!
//! A call is a localization call when the method it invokes is declared on
//! the capability interface or on a type that reaches it through any chain of
//! `extends`/`implements`. Calls through a stored callable (`const tr =
//! loc.get.bind(loc); tr("Save")`) are followed exactly one hop to the
//! declaration's initializer. Everything that cannot be resolved is treated as
//! "not a localization call".

use serde::Serialize;
use tracing::{debug, warn};

use crate::core::{
    extract::LiteralSite,
    symbols::{CallTarget, DeclarationRef, Initializer, MethodSymbol, SymbolProvider, TypeId},
};

/// Default name of the capability interface.
pub const DEFAULT_LOCALIZATION_INTERFACE: &str = "ILocalizer";

/// The method a call resolves to, for reporting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CallSymbol {
    pub declaring_type: TypeId,
    pub method_name: String,
    /// True if `declaring_type` is the capability or one of its subtypes.
    pub is_interface_match: bool,
}

/// A literal site after resolution.
#[derive(Debug, Clone)]
pub struct ResolvedLiteral {
    pub file_path: String,
    pub site: LiteralSite,
    pub symbol: Option<CallSymbol>,
    pub is_localization_call: bool,
}

/// Look up the capability interface by name.
///
/// Logs a warning when the interface is not declared in the scanned sources;
/// in that case no call is ever a localization call.
pub fn find_capability<P: SymbolProvider + ?Sized>(provider: &P, name: &str) -> Option<TypeId> {
    let found = provider.find_type(name).map(|t| t.id.clone());
    if found.is_none() {
        warn!(
            "Localization interface '{}' is not declared in the scanned sources; no call will be treated as a localization call",
            name
        );
    }
    found
}

pub struct LocalizationResolver<'a, P: SymbolProvider + ?Sized> {
    provider: &'a P,
    capability: Option<&'a str>,
}

impl<'a, P: SymbolProvider + ?Sized> LocalizationResolver<'a, P> {
    pub fn new(provider: &'a P, capability: Option<&'a str>) -> Self {
        Self {
            provider,
            capability,
        }
    }

    fn matches(&self, method: &MethodSymbol) -> bool {
        self.capability
            .is_some_and(|cap| self.provider.implements(&method.declaring_type, cap))
    }

    /// Follow a stored callable to the method its initializer names.
    fn follow(&self, declaration: &DeclarationRef) -> Option<MethodSymbol> {
        match self.provider.initializer(declaration) {
            None => {
                debug!("Declaration {:?} not found; call is not localized", declaration);
                None
            }
            Some(Initializer::Missing) => {
                debug!(
                    "Declaration {:?} has no initializer; call is not localized",
                    declaration
                );
                None
            }
            Some(Initializer::Unresolved) => {
                debug!(
                    "Initializer of {:?} does not name a method; call is not localized",
                    declaration
                );
                None
            }
            Some(Initializer::Resolved(CallTarget::DirectMethod(method))) => Some(method),
            Some(Initializer::Resolved(CallTarget::IndirectCallable { declaration: next })) => {
                debug!(
                    "Initializer of {:?} refers to another callable {:?}; only one hop is followed",
                    declaration, next
                );
                None
            }
        }
    }

    /// The method a call target ultimately invokes, if known within one hop.
    fn method(&self, target: &CallTarget) -> Option<MethodSymbol> {
        match target {
            CallTarget::DirectMethod(method) => Some(method.clone()),
            CallTarget::IndirectCallable { declaration } => self.follow(declaration),
        }
    }

    pub fn is_localization_call(&self, target: &CallTarget) -> bool {
        self.method(target).is_some_and(|m| self.matches(&m))
    }

    pub fn call_symbol(&self, target: &CallTarget) -> Option<CallSymbol> {
        let method = self.method(target)?;
        let is_interface_match = self.matches(&method);
        Some(CallSymbol {
            declaring_type: method.declaring_type,
            method_name: method.name,
            is_interface_match,
        })
    }

    /// Annotate every site of one file.
    pub fn resolve_sites(&self, file_path: &str, sites: Vec<LiteralSite>) -> Vec<ResolvedLiteral> {
        sites
            .into_iter()
            .map(|site| {
                let symbol = site.call.as_ref().and_then(|t| self.call_symbol(t));
                let is_localization_call = symbol.as_ref().is_some_and(|s| s.is_interface_match);
                ResolvedLiteral {
                    file_path: file_path.to_string(),
                    site,
                    symbol,
                    is_localization_call,
                }
            })
            .collect()
    }
}
