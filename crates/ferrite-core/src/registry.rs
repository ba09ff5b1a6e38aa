//! The entity registry: polymorphic, memoized context construction.
//!
//! Each context module contributes a name/factory pair to the
//! [`ENTITY_FACTORIES`] distributed slice at link time, so new context
//! types register themselves without touching any central dispatcher
//! code. [`EntityRegistry::new`] collects the slice into a lookup table.
//!
//! Construction is memoized per registry instance: the cache key is the
//! type name plus a stable fingerprint of the raw payload, so asking for
//! the same `(type, payload)` twice yields the same shared instance.
//! Raw payloads are deserialized independently per update, so identity
//! is structural, not pointer-based. The cache is bounded: once it holds
//! [`CACHE_CAPACITY`] entries it is flushed wholesale, and value-equal
//! payloads simply reconstruct — contexts are value-identical across
//! independent constructions, so eviction is unobservable to callers.

use std::collections::HashMap;
use std::hash::{Hash, Hasher};

use linkme::distributed_slice;
use parking_lot::Mutex;
use serde_json::Value;
use tracing::trace;

use crate::client::Bot;
use crate::context::SharedEntity;
use crate::error::{RegistryError, RegistryResult};

// =============================================================================
// Registration
// =============================================================================

/// Arguments handed to an entity factory.
pub struct EntityArgs {
    /// The owning bot session, shared into the constructed context.
    pub bot: Bot,
    /// The raw payload slice the context is built from.
    pub source: Value,
}

/// Factory signature: raw payload plus client handle in, type-erased
/// context out.
pub type EntityFactory = fn(EntityArgs) -> RegistryResult<SharedEntity>;

/// One self-registered context type.
pub struct EntityRegistration {
    /// Registry name, matching [`UpdateKind::entity_name`] values for
    /// root contexts.
    ///
    /// [`UpdateKind::entity_name`]: crate::model::UpdateKind::entity_name
    pub name: &'static str,
    /// The factory constructing this context type.
    pub build: EntityFactory,
}

/// Link-time registry of every context type in the process.
#[distributed_slice]
pub static ENTITY_FACTORIES: [EntityRegistration];

/// Memo cache entry limit; the cache is flushed when it fills.
///
/// Long-running bots stream an unbounded number of distinct payloads
/// through one registry, so the memo table must not grow with them.
pub const CACHE_CAPACITY: usize = 128;

/// Implements [`Entity`](crate::context::Entity) for a context type and
/// contributes its name/factory pair to [`ENTITY_FACTORIES`].
///
/// The factory decodes the raw payload into `$raw` and wraps it in
/// `$ctx::new(bot, raw)`; a decode failure surfaces as
/// [`RegistryError::Payload`](crate::error::RegistryError::Payload).
macro_rules! register_entity {
    ($name:literal, $raw:ty, $ctx:ty) => {
        impl $crate::context::Entity for $ctx {
            fn kind(&self) -> &'static str {
                $name
            }

            fn as_any(&self) -> &dyn std::any::Any {
                self
            }
        }

        const _: () = {
            fn build_entity(
                args: $crate::registry::EntityArgs,
            ) -> $crate::error::RegistryResult<$crate::context::SharedEntity> {
                let raw: $raw = serde_json::from_value(args.source).map_err(|err| {
                    $crate::error::RegistryError::Payload {
                        name: $name,
                        reason: err.to_string(),
                    }
                })?;
                Ok($crate::context::SharedEntity::new(<$ctx>::new(
                    args.bot, raw,
                )))
            }

            #[linkme::distributed_slice($crate::registry::ENTITY_FACTORIES)]
            static ENTITY_REGISTRATION: $crate::registry::EntityRegistration =
                $crate::registry::EntityRegistration {
                    name: $name,
                    build: build_entity,
                };
        };
    };
}

pub(crate) use register_entity;

// =============================================================================
// EntityRegistry
// =============================================================================

/// Name-to-factory table with memoized construction.
pub struct EntityRegistry {
    factories: HashMap<&'static str, EntityFactory>,
    cache: Mutex<HashMap<(&'static str, u64), SharedEntity>>,
}

impl EntityRegistry {
    /// Builds a registry from every linked [`EntityRegistration`].
    pub fn new() -> Self {
        let mut factories = HashMap::with_capacity(ENTITY_FACTORIES.len());
        for registration in ENTITY_FACTORIES.iter() {
            factories.insert(registration.name, registration.build);
        }
        Self {
            factories,
            cache: Mutex::new(HashMap::new()),
        }
    }

    /// Adds or replaces a factory by hand.
    ///
    /// Normal context types register through the distributed slice; this
    /// exists for tests and for embedders extending the type set at
    /// startup.
    pub fn with(mut self, name: &'static str, build: EntityFactory) -> Self {
        self.factories.insert(name, build);
        self
    }

    /// Registered type names, for diagnostics.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.factories.keys().copied()
    }

    /// Constructs (or returns the memoized) context registered under
    /// `name` from the given raw payload.
    ///
    /// An unregistered `name` is a programmer error and fails with
    /// [`RegistryError::UnknownType`]; it is never silently swallowed.
    pub fn get(&self, name: &str, args: EntityArgs) -> RegistryResult<SharedEntity> {
        let (static_name, build) = self
            .factories
            .get_key_value(name)
            .map(|(key, build)| (*key, *build))
            .ok_or_else(|| RegistryError::UnknownType {
                name: name.to_string(),
            })?;

        let key = (static_name, fingerprint(&args.source));

        // Construction is synchronous and I/O-free, so holding the lock
        // across it gives single-flight semantics for free.
        let mut cache = self.cache.lock();
        if let Some(existing) = cache.get(&key) {
            trace!(name = %static_name, "entity cache hit");
            return Ok(existing.clone());
        }
        let built = build(args)?;
        if cache.len() >= CACHE_CAPACITY {
            trace!(evicted = cache.len(), "entity cache full, flushing");
            cache.clear();
        }
        cache.insert(key, built.clone());
        Ok(built)
    }

    /// Number of memoized contexts, for diagnostics and tests.
    pub fn cached(&self) -> usize {
        self.cache.lock().len()
    }
}

impl Default for EntityRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for EntityRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EntityRegistry")
            .field("types", &self.factories.len())
            .field("cached", &self.cached())
            .finish()
    }
}

/// Stable structural fingerprint of a raw payload.
///
/// `serde_json` serializes object keys in sorted order, so two
/// value-equal payloads fingerprint identically regardless of how their
/// JSON source was keyed.
fn fingerprint(value: &Value) -> u64 {
    let mut hasher = std::hash::DefaultHasher::new();
    value.to_string().hash(&mut hasher);
    hasher.finish()
}
