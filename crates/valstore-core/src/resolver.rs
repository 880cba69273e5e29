//! Reference resolution
//!
//! A [`ReferenceResolver`] dereferences an [`ObjectFieldReference`] into an
//! untyped [`Value`]. Stores only depend on the trait; this module also
//! provides a closure adapter, a registry that dispatches on object kind,
//! and an in-memory resolver over a [`Value`] object graph.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::error::{Error, Result};
use crate::reference::ObjectFieldReference;
use crate::value::Value;

/// Shared cancellation flag.
///
/// Clones observe the same flag, so the caller can keep one handle and
/// cancel a resolution running elsewhere.
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Context provided to resolvers during resolution
#[derive(Debug, Clone, Default)]
pub struct ResolverContext {
    /// The config path of the field being resolved
    pub config_path: String,
    /// Point in time after which resolvers should give up
    pub deadline: Option<Instant>,
    /// Caller-controlled cancellation
    pub cancel: CancelFlag,
}

impl ResolverContext {
    /// Create a new resolver context
    pub fn new(config_path: impl Into<String>) -> Self {
        Self {
            config_path: config_path.into(),
            ..Self::default()
        }
    }

    /// Set an absolute deadline
    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Set a deadline relative to now
    pub fn with_timeout(self, timeout: Duration) -> Self {
        self.with_deadline(Instant::now() + timeout)
    }

    /// Share an existing cancellation flag
    pub fn with_cancel_flag(mut self, cancel: CancelFlag) -> Self {
        self.cancel = cancel;
        self
    }

    /// Config path for error reporting, if one was given
    pub fn path(&self) -> Option<String> {
        if self.config_path.is_empty() {
            None
        } else {
            Some(self.config_path.clone())
        }
    }

    /// Fail if the caller cancelled or the deadline passed.
    ///
    /// Resolvers call this before doing work; stores never do.
    pub fn check(&self) -> Result<()> {
        if self.cancel.is_cancelled() {
            return Err(Error::cancelled(self.path()));
        }
        if let Some(deadline) = self.deadline {
            if Instant::now() >= deadline {
                return Err(Error::deadline_exceeded(self.path()));
            }
        }
        Ok(())
    }
}

/// Trait for reference resolver implementations
pub trait ReferenceResolver: Send + Sync {
    /// Dereference a field reference
    ///
    /// `Ok(None)` means the reference produced no value; that is not an
    /// error. Any `Err` is handed back to the caller unchanged.
    fn resolve(
        &self,
        reference: &ObjectFieldReference,
        ctx: &ResolverContext,
    ) -> Result<Option<Value>>;

    /// Get the name of this resolver
    fn name(&self) -> &str;
}

/// Resolve an optional reference.
///
/// An absent reference is the "nothing configured" state and yields
/// `Ok(None)` without calling the resolver. A resolved null is the same as
/// no value.
pub fn resolve_indirect(
    reference: Option<&ObjectFieldReference>,
    resolver: &dyn ReferenceResolver,
    ctx: &ResolverContext,
) -> Result<Option<Value>> {
    match reference {
        Some(reference) => {
            log::trace!(
                "Resolving {} via '{}' for '{}'",
                reference,
                resolver.name(),
                ctx.config_path
            );
            match resolver.resolve(reference, ctx)? {
                Some(Value::Null) | None => Ok(None),
                Some(value) => Ok(Some(value)),
            }
        }
        None => {
            log::trace!("No reference configured for '{}'", ctx.config_path);
            Ok(None)
        }
    }
}

/// A simple function-based resolver
pub struct FnResolver<F>
where
    F: Fn(&ObjectFieldReference, &ResolverContext) -> Result<Option<Value>> + Send + Sync,
{
    name: String,
    func: F,
}

impl<F> FnResolver<F>
where
    F: Fn(&ObjectFieldReference, &ResolverContext) -> Result<Option<Value>> + Send + Sync,
{
    /// Create a new function-based resolver
    pub fn new(name: impl Into<String>, func: F) -> Self {
        Self {
            name: name.into(),
            func,
        }
    }
}

impl<F> ReferenceResolver for FnResolver<F>
where
    F: Fn(&ObjectFieldReference, &ResolverContext) -> Result<Option<Value>> + Send + Sync,
{
    fn resolve(
        &self,
        reference: &ObjectFieldReference,
        ctx: &ResolverContext,
    ) -> Result<Option<Value>> {
        (self.func)(reference, ctx)
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Resolvers keyed by the object kind they handle
#[derive(Clone, Default)]
pub struct ResolverRegistry {
    resolvers: HashMap<String, Arc<dyn ReferenceResolver>>,
    fallback: Option<Arc<dyn ReferenceResolver>>,
}

impl ResolverRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Use `resolver` for kinds without a dedicated resolver
    pub fn with_default(mut self, resolver: Arc<dyn ReferenceResolver>) -> Self {
        self.fallback = Some(resolver);
        self
    }

    /// Register a resolver for `kind`, replacing any existing one
    pub fn register(&mut self, kind: impl Into<String>, resolver: Arc<dyn ReferenceResolver>) {
        self.resolvers.insert(kind.into(), resolver);
    }

    /// Register a resolver with optional force overwrite.
    ///
    /// Without `force`, registering a kind twice is an error.
    pub fn register_with_force(
        &mut self,
        kind: impl Into<String>,
        resolver: Arc<dyn ReferenceResolver>,
        force: bool,
    ) -> Result<()> {
        let kind = kind.into();
        if !force && self.resolvers.contains_key(&kind) {
            return Err(Error::resolver_already_registered(&kind));
        }
        self.resolvers.insert(kind, resolver);
        Ok(())
    }

    /// Register a function as the resolver for `kind`
    pub fn register_fn<F>(&mut self, kind: impl Into<String>, func: F)
    where
        F: Fn(&ObjectFieldReference, &ResolverContext) -> Result<Option<Value>>
            + Send
            + Sync
            + 'static,
    {
        let kind = kind.into();
        let resolver = Arc::new(FnResolver::new(kind.clone(), func));
        self.register(kind, resolver);
    }

    /// Get the resolver registered for `kind`
    pub fn get(&self, kind: &str) -> Option<&Arc<dyn ReferenceResolver>> {
        self.resolvers.get(kind)
    }

    /// Check if a resolver is registered for `kind`
    pub fn contains(&self, kind: &str) -> bool {
        self.resolvers.contains_key(kind)
    }
}

impl ReferenceResolver for ResolverRegistry {
    fn resolve(
        &self,
        reference: &ObjectFieldReference,
        ctx: &ResolverContext,
    ) -> Result<Option<Value>> {
        let kind = reference.object.kind.as_str();
        let resolver = self
            .resolvers
            .get(kind)
            .or(self.fallback.as_ref())
            .ok_or_else(|| Error::unknown_resolver(kind, ctx.path()))?;
        log::debug!("Dispatching {} to resolver '{}'", reference, resolver.name());
        resolver.resolve(reference, ctx)
    }

    fn name(&self) -> &str {
        "registry"
    }
}

/// Resolves references against an in-memory object graph.
///
/// The graph is a mapping laid out as `kind -> namespace -> name -> object`.
/// Cluster-scoped objects, and references without a namespace, use the
/// empty-string namespace key.
#[derive(Debug, Clone)]
pub struct ObjectGraphResolver {
    graph: Arc<Value>,
}

impl ObjectGraphResolver {
    pub fn new(graph: Value) -> Self {
        Self {
            graph: Arc::new(graph),
        }
    }

    fn lookup(&self, reference: &ObjectFieldReference) -> Option<&Value> {
        let object = &reference.object;
        let namespace = object.namespace.as_deref().unwrap_or("");
        self.graph
            .as_mapping()?
            .get(object.kind.as_str())?
            .as_mapping()?
            .get(namespace)?
            .as_mapping()?
            .get(object.name.as_str())
    }
}

impl ReferenceResolver for ObjectGraphResolver {
    fn resolve(
        &self,
        reference: &ObjectFieldReference,
        ctx: &ResolverContext,
    ) -> Result<Option<Value>> {
        ctx.check()?;

        let object = self
            .lookup(reference)
            .ok_or_else(|| Error::not_found(reference.object.to_string(), ctx.path()))?;

        let field = object.get_path(&reference.field_path).map_err(|e| match ctx.path() {
            Some(path) => e.with_path(path),
            None => e,
        })?;

        match field {
            Some(Value::Null) | None => {
                log::trace!("{} has no value", reference);
                Ok(None)
            }
            Some(value) => Ok(Some(value.clone())),
        }
    }

    fn name(&self) -> &str {
        "object-graph"
    }
}
