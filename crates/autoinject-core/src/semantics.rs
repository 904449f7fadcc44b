// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Semantic resolution of the interfaces a class implements.
//!
//! Syntax alone cannot tell whether a class implements `IProvide<T>`: the
//! interface may come from a base class, from another interface, or from
//! another `partial` part of the same class, declared anywhere. Analyzers ask
//! a [`SemanticModel`] instead.
//!
//! [`SymbolTable`] is a self-contained model built from the declarations of
//! one or more compilation units plus externally supplied type descriptions
//! (for library types the host has no source for).
//!
//! Types are keyed by their full path (namespace and containing types, then
//! the type's own name) plus generic arity. Every `partial` part of a type
//! lands on the same key and contributes its bases. A base type written in a
//! declaration is looked up the way C# binds it: from the declaring scope
//! outward, then through the file's `using` namespaces, then by simple name
//! when exactly one known type carries it.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use ecow::{EcoString, eco_format};
use serde::{Deserialize, Serialize};

use crate::host::{CancellationToken, Cancelled};
use crate::syntax::{CompilationUnit, Span, TypeDeclaration, TypeKind, TypeSyntax};

/// An interface a type implements, directly or transitively.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InterfaceSymbol {
    /// Simple name without namespace or type arguments.
    pub name: EcoString,
    /// Number of type parameters; zero for non-generic interfaces.
    #[serde(default)]
    pub arity: usize,
}

impl InterfaceSymbol {
    #[must_use]
    pub fn new(name: impl Into<EcoString>, arity: usize) -> Self {
        Self {
            name: name.into(),
            arity,
        }
    }

    #[must_use]
    pub const fn is_generic(&self) -> bool {
        self.arity > 0
    }
}

/// Semantic queries the analyzers need.
pub trait SemanticModel: Send + Sync {
    /// Returns every interface `class` implements, including interfaces
    /// inherited through base classes, base interfaces and the other
    /// `partial` parts of `class`, or `None` when no symbol is known for
    /// `class`.
    ///
    /// # Errors
    ///
    /// Returns [`Cancelled`] if `cancel` is cancelled during resolution.
    fn all_interfaces(
        &self,
        class: &TypeDeclaration,
        cancel: &CancellationToken,
    ) -> Result<Option<Vec<InterfaceSymbol>>, Cancelled>;
}

/// A type known to the [`SymbolTable`] without source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExternalType {
    /// Simple or dotted name: `IProvide` or `Chickensoft.IProvide`.
    pub name: EcoString,
    pub kind: TypeKind,
    #[serde(default)]
    pub arity: usize,
    /// Base class and interfaces, as written in the declaration.
    #[serde(default)]
    pub bases: Vec<TypeSyntax>,
}

/// Key for looking types up: a dotted path (or a simple name) plus generic
/// arity, so `IProvide` and `IProvide<T>` stay distinct.
type SymbolKey = (EcoString, usize);

/// Where a base type was written, for binding its name.
#[derive(Debug)]
struct Scope {
    /// Namespace and containing types of the declaring type, dotted.
    path: EcoString,
    usings: Vec<EcoString>,
}

#[derive(Debug, Clone)]
struct BaseType {
    ty: TypeSyntax,
    scope: Arc<Scope>,
}

#[derive(Debug, Clone)]
struct TypeSymbol {
    name: EcoString,
    kind: TypeKind,
    bases: Vec<BaseType>,
    /// Spans of the source declarations (one per `partial` part).
    declarations: Vec<Span>,
}

/// A [`SemanticModel`] over declared and external types.
///
/// Base types that resolve to nothing are skipped. A base that resolves to
/// itself, directly or through a cycle, is visited once. A class whose name
/// matches several known types is identified by its declaration span; if
/// that is still ambiguous it has no symbol.
#[derive(Debug, Clone, Default)]
pub struct SymbolTable {
    types: HashMap<SymbolKey, TypeSymbol>,
    /// Simple name and arity to every full key carrying it.
    by_simple_name: HashMap<SymbolKey, Vec<SymbolKey>>,
}

impl SymbolTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers every type declared in `unit`, nested types included.
    ///
    /// A type already known under the same path and arity, from an earlier
    /// `partial` part or an external description, is extended with this
    /// declaration's bases rather than replaced.
    pub fn add_unit(&mut self, unit: &CompilationUnit) {
        fn add(table: &mut SymbolTable, ty: &TypeDeclaration, scope: &Arc<Scope>) {
            let path = qualify(&scope.path, ty.name());
            let bases = ty.base_list.iter().map(|base| BaseType {
                ty: base.clone(),
                scope: Arc::clone(scope),
            });
            table.register(
                (path.clone(), ty.type_parameters.len()),
                ty.kind,
                bases.collect(),
                ty.span,
            );

            let inner = Arc::new(Scope {
                path,
                usings: scope.usings.clone(),
            });
            for nested in ty.nested_types() {
                add(table, nested, &inner);
            }
        }

        let scope = Arc::new(Scope {
            path: unit.namespace.clone().unwrap_or_default(),
            usings: unit.usings.clone(),
        });
        for ty in &unit.types {
            add(self, ty, &scope);
        }
    }

    /// Registers a type described without source, merging with any type
    /// already known under the same name and arity.
    pub fn add_external(&mut self, ty: ExternalType) {
        let scope = Arc::new(Scope {
            path: ty
                .name
                .rsplit_once('.')
                .map(|(namespace, _)| namespace.into())
                .unwrap_or_default(),
            usings: Vec::new(),
        });
        let bases = ty
            .bases
            .into_iter()
            .map(|base| BaseType {
                ty: base,
                scope: Arc::clone(&scope),
            })
            .collect();
        self.register((ty.name, ty.arity), ty.kind, bases, Span::default());
    }

    #[must_use]
    pub fn with_unit(mut self, unit: &CompilationUnit) -> Self {
        self.add_unit(unit);
        self
    }

    #[must_use]
    pub fn with_externals(mut self, types: impl IntoIterator<Item = ExternalType>) -> Self {
        for ty in types {
            self.add_external(ty);
        }
        self
    }

    /// Number of distinct types; `partial` parts count once.
    #[must_use]
    pub fn len(&self) -> usize {
        self.types.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    fn register(&mut self, key: SymbolKey, kind: TypeKind, bases: Vec<BaseType>, span: Span) {
        let declarations = if span.is_empty() { vec![] } else { vec![span] };
        if let Some(symbol) = self.types.get_mut(&key) {
            if symbol.kind != kind {
                tracing::debug!(name = %key.0, existing = ?symbol.kind, ?kind, "conflicting type kinds, keeping the first");
            }
            symbol.bases.extend(bases);
            symbol.declarations.extend(declarations);
            return;
        }

        let name = simple_name(&key.0);
        self.by_simple_name
            .entry((name.clone(), key.1))
            .or_default()
            .push(key.clone());
        self.types.insert(
            key,
            TypeSymbol {
                name,
                kind,
                bases,
                declarations,
            },
        );
    }

    /// Finds the symbol `class` declares.
    fn declared(&self, class: &TypeDeclaration) -> Option<&SymbolKey> {
        let candidates = self
            .by_simple_name
            .get(&(EcoString::from(class.name()), class.type_parameters.len()))?;
        if let [key] = candidates.as_slice() {
            return Some(key);
        }
        let mut at_span = candidates.iter().filter(|key| {
            self.types
                .get(*key)
                .is_some_and(|symbol| symbol.declarations.contains(&class.span))
        });
        match (at_span.next(), at_span.next()) {
            (Some(key), None) => Some(key),
            _ => {
                tracing::trace!(class = %class.name(), "ambiguous class name");
                None
            }
        }
    }

    /// Binds `base` as written in `scope`.
    fn lookup(&self, base: &BaseType) -> Option<(&SymbolKey, &TypeSymbol)> {
        let written = dotted_name(&base.ty)?;
        let arity = base.ty.arity();
        let enclosing = std::iter::successors(Some(base.scope.path.as_str()), |&path| {
            (!path.is_empty()).then(|| path.rsplit_once('.').map_or("", |(outer, _)| outer))
        });
        let prefixes = enclosing.chain(base.scope.usings.iter().map(EcoString::as_str));
        for prefix in prefixes {
            let key = (qualify(prefix, &written), arity);
            if let Some((key, symbol)) = self.types.get_key_value(&key) {
                return Some((key, symbol));
            }
        }

        let simple = base.ty.simple_name()?;
        match self.by_simple_name.get(&(EcoString::from(simple), arity))?.as_slice() {
            [key] => self.types.get_key_value(key),
            _ => None,
        }
    }
}

impl SemanticModel for SymbolTable {
    fn all_interfaces(
        &self,
        class: &TypeDeclaration,
        cancel: &CancellationToken,
    ) -> Result<Option<Vec<InterfaceSymbol>>, Cancelled> {
        let Some(key) = self.declared(class) else {
            return Ok(None);
        };
        let Some(symbol) = self.types.get(key) else {
            return Ok(None);
        };

        let mut interfaces = Vec::new();
        let mut visited: HashSet<&SymbolKey> = HashSet::from([key]);
        let mut pending: Vec<&BaseType> = symbol.bases.iter().rev().collect();
        while let Some(base) = pending.pop() {
            cancel.check()?;
            let Some((key, symbol)) = self.lookup(base) else {
                tracing::trace!(class = %class.name(), base = ?base.ty.simple_name(), "unresolved base type");
                continue;
            };
            if !visited.insert(key) {
                continue;
            }
            if symbol.kind == TypeKind::Interface {
                interfaces.push(InterfaceSymbol::new(symbol.name.clone(), key.1));
            }
            pending.extend(symbol.bases.iter().rev());
        }
        Ok(Some(interfaces))
    }
}

fn qualify(prefix: &str, name: &str) -> EcoString {
    if prefix.is_empty() {
        name.into()
    } else {
        eco_format!("{prefix}.{name}")
    }
}

fn simple_name(path: &str) -> EcoString {
    path.rsplit_once('.').map_or(path, |(_, name)| name).into()
}

/// `Godot.Node` for a qualified name, `IProvide` for `IProvide<int>`.
fn dotted_name(ty: &TypeSyntax) -> Option<EcoString> {
    match ty {
        TypeSyntax::Named(id) | TypeSyntax::Generic { name: id, .. } => Some(id.name.clone()),
        TypeSyntax::Qualified { left, right } => {
            Some(qualify(&dotted_name(left)?, &dotted_name(right)?))
        }
        TypeSyntax::Predefined(_) | TypeSyntax::Array(_) | TypeSyntax::Nullable(_) => None,
    }
}
