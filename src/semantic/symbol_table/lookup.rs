//! Name lookup through the scope tree.
//!
//! Lexical lookup walks outward from the reference site. Member lookup
//! starts from a type instead, following the struct inheritance chain.

use tracing::trace;

use super::scope::ScopeKind;
use super::table::SymbolTable;
use crate::base::{DeclId, NameKey, ScopeId};
use crate::types::{Type, TypeKind};

/// Every declaration of a name in the nearest scope declaring it.
#[derive(Debug, Clone)]
pub struct LookupResult {
    /// Overloads in declaration order; never empty.
    pub declarations: Vec<DeclId>,
    /// Struct whose member scope supplied the match. Member types are
    /// specialized through its context.
    pub owner: Option<Type>,
}

impl LookupResult {
    pub fn first(&self) -> DeclId {
        self.declarations[0]
    }

    pub fn is_overloaded(&self) -> bool {
        self.declarations.len() > 1
    }
}

impl SymbolTable {
    /// Resolve `name` as written at a site inside `scope`.
    pub fn lookup(&self, scope: ScopeId, name: &str) -> Option<LookupResult> {
        let key = NameKey::new(name);
        let mut current = Some(scope);
        while let Some(id) = current {
            if let Some(found) = self.lookup_in_scope(id, &key) {
                return Some(found);
            }
            current = self.scope(id).parent();
        }
        trace!(name, "lookup failed");
        None
    }

    /// Search one scope and whatever it imports, without its lexical parent.
    pub fn lookup_in_scope(&self, id: ScopeId, key: &NameKey) -> Option<LookupResult> {
        let scope = self.scope(id);
        trace!(scope = id.index(), kind = ?scope.kind(), name = key.as_str(), "lookup step");
        if let Some(declarations) = scope.get(key) {
            return Some(LookupResult {
                declarations: declarations.to_vec(),
                owner: scope.owner_type().cloned(),
            });
        }
        match scope.kind() {
            ScopeKind::Type => {
                let owner = scope.owner_type()?;
                self.lookup_in_parents(owner, key)
            }
            ScopeKind::Unit => scope.used_units().iter().rev().find_map(|unit| {
                trace!(unit = unit.index(), name = key.as_str(), "lookup in used unit");
                self.scope(*unit).get(key).map(|declarations| LookupResult {
                    declarations: declarations.to_vec(),
                    owner: None,
                })
            }),
            ScopeKind::System | ScopeKind::Enum | ScopeKind::Routine => None,
        }
    }

    /// Resolve `name` as a member of `ty`, as in `value.name`.
    ///
    /// Type references, class references and pointers are looked through to
    /// the struct or enum they denote.
    pub fn lookup_member(&self, ty: &Type, name: &str) -> Option<LookupResult> {
        let key = NameKey::new(name);
        let host = member_host(ty);
        trace!(ty = %host, name, "member lookup");
        match host.actual().kind() {
            TypeKind::Struct(_) => self.lookup_in_struct(host.actual(), &key),
            TypeKind::Enum(enumeration) => {
                let scope = enumeration.scope()?;
                self.scope(scope).get(&key).map(|declarations| LookupResult {
                    declarations: declarations.to_vec(),
                    owner: None,
                })
            }
            _ => None,
        }
    }

    fn lookup_in_struct(&self, ty: &Type, key: &NameKey) -> Option<LookupResult> {
        let structure = ty.as_struct()?;
        if structure.is_forward() {
            return None;
        }
        if let Some(declarations) = structure
            .scope()
            .and_then(|scope| self.scope(scope).get(key))
        {
            return Some(LookupResult {
                declarations: declarations.to_vec(),
                owner: Some(ty.clone()),
            });
        }
        self.lookup_in_parents(ty, key)
    }

    /// Depth first through the parents of `ty`, closest parent first.
    fn lookup_in_parents(&self, ty: &Type, key: &NameKey) -> Option<LookupResult> {
        let structure = ty.as_struct()?;
        if structure.is_forward() {
            return None;
        }
        structure.parents().iter().find_map(|parent| {
            trace!(parent = %parent, name = key.as_str(), "lookup in parent");
            self.lookup_in_struct(parent.actual(), key)
        })
    }
}

fn member_host(ty: &Type) -> Type {
    let mut current = ty.actual().clone();
    loop {
        let next = match current.kind() {
            TypeKind::TypeType(type_type) => type_type.ty().actual().clone(),
            TypeKind::ClassReference(reference) => match reference.class_type() {
                Some(class) => class.actual().clone(),
                None => return current,
            },
            TypeKind::Pointer(pointer) => match pointer.dereferenced() {
                Some(target) if target.is_struct() => target.actual().clone(),
                _ => return current,
            },
            _ => return current,
        };
        current = next;
    }
}
