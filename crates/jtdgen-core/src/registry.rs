//! Scoped identifier registry.
//!
//! Every stage that introduces an identifier goes through [`NameRegistry::reserve`].
//! Scopes form a tree rooted at the global type namespace; each generated
//! type that owns members or a converter gets a child scope. Sibling scopes
//! are independent, so a nested `JsonConverter` never collides with a
//! top-level type of the same name.
//!
//! Collisions within one scope are resolved by appending `2`, `3`, ... to the
//! candidate. The sequence of `reserve` calls fully determines the result, so
//! a fixed schema always yields the same identifiers.

use crate::error::{CodegenError, CodegenResult};
use crate::ir::TypeId;
use parking_lot::Mutex;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

/// Index of a naming scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ScopeId(usize);

/// The logical entity an identifier belongs to.
///
/// Re-registering the same key in the same scope returns the identifier
/// resolved the first time.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum NameKey {
    /// A generated type in the global scope
    Type(TypeId),
    /// A member of a type, keyed by its JSON name
    Member(TypeId, String),
    /// An enum member, keyed by its JSON value
    EnumMember(TypeId, String),
    /// The nested converter of a type
    Converter(TypeId),
    /// Anything else a target wants to reserve
    Other(String),
}

#[derive(Debug, Clone)]
struct Scope {
    parent: Option<ScopeId>,
    label: String,
    taken: BTreeSet<String>,
    resolved: BTreeMap<NameKey, String>,
}

impl Scope {
    fn new(parent: Option<ScopeId>, label: impl Into<String>) -> Self {
        Self {
            parent,
            label: label.into(),
            taken: BTreeSet::new(),
            resolved: BTreeMap::new(),
        }
    }
}

/// Registry of resolved identifiers, one namespace per scope.
#[derive(Debug, Clone)]
pub struct NameRegistry {
    scopes: Vec<Scope>,
    max_suffix: Option<u32>,
}

impl Default for NameRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl NameRegistry {
    /// Create a registry holding only the global scope
    pub fn new() -> Self {
        Self {
            scopes: vec![Scope::new(None, "<global>")],
            max_suffix: None,
        }
    }

    /// Bound the disambiguation suffix (`None` = unbounded)
    pub fn with_max_suffix(mut self, max_suffix: Option<u32>) -> Self {
        self.max_suffix = max_suffix;
        self
    }

    /// The root scope for top-level type names
    pub fn global(&self) -> ScopeId {
        ScopeId(0)
    }

    /// Open a scope nested in `parent`, owned by the type named `owner`.
    ///
    /// The owner's identifier is taken in the new scope: a member may not
    /// share its enclosing type's name.
    pub fn child_scope(&mut self, parent: ScopeId, owner: &str) -> CodegenResult<ScopeId> {
        self.scope(parent)?;

        let id = ScopeId(self.scopes.len());
        let mut scope = Scope::new(Some(parent), owner);
        scope.taken.insert(owner.to_string());
        self.scopes.push(scope);
        Ok(id)
    }

    /// Reserve an identifier for `key` in `scope`, disambiguating on collision.
    pub fn reserve(&mut self, scope: ScopeId, key: NameKey, candidate: &str) -> CodegenResult<String> {
        let max_suffix = self.max_suffix;
        let entry = self.scope_mut(scope)?;

        if let Some(existing) = entry.resolved.get(&key) {
            return Ok(existing.clone());
        }

        let resolved = if entry.taken.contains(candidate) {
            let name = disambiguate(&entry.taken, candidate, max_suffix)?;
            tracing::debug!(
                scope = %entry.label,
                candidate,
                resolved = %name,
                "Disambiguated colliding identifier"
            );
            name
        } else {
            candidate.to_string()
        };

        tracing::trace!(scope = %entry.label, ?key, resolved = %resolved, "Reserved identifier");
        entry.taken.insert(resolved.clone());
        entry.resolved.insert(key, resolved.clone());
        Ok(resolved)
    }

    /// The identifier already resolved for `key` in `scope`, if any
    pub fn resolved(&self, scope: ScopeId, key: &NameKey) -> Option<&str> {
        self.scopes
            .get(scope.0)
            .and_then(|s| s.resolved.get(key))
            .map(String::as_str)
    }

    /// Whether `name` is already used in `scope`
    pub fn is_taken(&self, scope: ScopeId, name: &str) -> bool {
        self.scopes
            .get(scope.0)
            .is_some_and(|s| s.taken.contains(name))
    }

    /// The enclosing scope, `None` for the global scope
    pub fn parent(&self, scope: ScopeId) -> Option<ScopeId> {
        self.scopes.get(scope.0).and_then(|s| s.parent)
    }

    /// Number of scopes, including the global one
    pub fn scope_count(&self) -> usize {
        self.scopes.len()
    }

    fn scope(&self, scope: ScopeId) -> CodegenResult<&Scope> {
        self.scopes
            .get(scope.0)
            .ok_or_else(|| CodegenError::invariant("<registry>", format!("unknown scope {}", scope.0)))
    }

    fn scope_mut(&mut self, scope: ScopeId) -> CodegenResult<&mut Scope> {
        self.scopes
            .get_mut(scope.0)
            .ok_or_else(|| CodegenError::invariant("<registry>", format!("unknown scope {}", scope.0)))
    }
}

/// Find the first free `candidateN` for N = 2, 3, ...
fn disambiguate(taken: &BTreeSet<String>, candidate: &str, max_suffix: Option<u32>) -> CodegenResult<String> {
    let mut attempts = 1;
    let mut suffix: u32 = 2;
    loop {
        if max_suffix.is_some_and(|max| suffix > max) || suffix == u32::MAX {
            return Err(CodegenError::NameRegistryExhausted {
                candidate: candidate.to_string(),
                attempts,
            });
        }

        let name = format!("{candidate}{suffix}");
        attempts += 1;
        if !taken.contains(&name) {
            return Ok(name);
        }
        suffix += 1;
    }
}

/// A [`NameRegistry`] behind a mutex, for mapping definitions on several threads.
///
/// Each call holds the lock for exactly one registry operation. Clones share
/// the same registry.
#[derive(Debug, Clone, Default)]
pub struct SharedNameRegistry {
    inner: Arc<Mutex<NameRegistry>>,
}

impl SharedNameRegistry {
    pub fn new(registry: NameRegistry) -> Self {
        Self {
            inner: Arc::new(Mutex::new(registry)),
        }
    }

    pub fn global(&self) -> ScopeId {
        self.inner.lock().global()
    }

    pub fn child_scope(&self, parent: ScopeId, owner: &str) -> CodegenResult<ScopeId> {
        self.inner.lock().child_scope(parent, owner)
    }

    pub fn reserve(&self, scope: ScopeId, key: NameKey, candidate: &str) -> CodegenResult<String> {
        self.inner.lock().reserve(scope, key, candidate)
    }

    pub fn resolved(&self, scope: ScopeId, key: &NameKey) -> Option<String> {
        self.inner.lock().resolved(scope, key).map(str::to_string)
    }

    pub fn is_taken(&self, scope: ScopeId, name: &str) -> bool {
        self.inner.lock().is_taken(scope, name)
    }

    /// Copy out the current state of the registry
    pub fn snapshot(&self) -> NameRegistry {
        self.inner.lock().clone()
    }
}

#[cfg(test)]
#[path = "registry/registry_tests.rs"]
mod registry_tests;
