//! Type registry, method resolution and cache invalidation.
//!
//! Resolution walks the receiver type's own method table, then its included
//! capability sets (most recently included first), then the superclass chain.
//! Results are cached per (type, method name); reopening a type's method
//! table invalidates the cached entries for that type and every descendant
//! and bumps the global epoch that inline call-site caches key on.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::RwLock;

use core_types::{RubyError, RubyResult, Value};
use memory_manager::Heap;

use crate::call_site::CallSite;
use crate::comparable::CmpDerived;
use crate::method::{MethodImpl, MethodTable};

/// Identity of a registered type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TypeId(pub(crate) u32);

/// Identity of a registered capability set (mixin).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CapabilityId(pub(crate) u32);

/// Runtime record of a type: name, capabilities, superclass and methods.
#[derive(Debug)]
pub struct TypeDescriptor {
    name: String,
    superclass: Option<TypeId>,
    /// Included capability sets, in inclusion order (searched in reverse)
    includes: Vec<CapabilityId>,
    methods: MethodTable,
}

impl TypeDescriptor {
    /// The type's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The single superclass, if any.
    pub fn superclass(&self) -> Option<TypeId> {
        self.superclass
    }
}

#[derive(Debug)]
struct CapabilitySet {
    #[allow(dead_code)]
    name: String,
    methods: MethodTable,
}

#[derive(Debug, Default)]
struct RegistryInner {
    types: Vec<TypeDescriptor>,
    types_by_name: HashMap<String, TypeId>,
    capabilities: Vec<CapabilitySet>,
    capabilities_by_name: HashMap<String, CapabilityId>,
}

impl RegistryInner {
    fn descriptor(&self, id: TypeId) -> &TypeDescriptor {
        &self.types[id.0 as usize]
    }

    /// Own table, then includes (most recent first), then superclass chain.
    fn resolve_walk(&self, id: TypeId, name: &str) -> Option<MethodImpl> {
        let desc = self.descriptor(id);
        if let Some(m) = desc.methods.get(name) {
            return Some(m.clone());
        }
        for cap in desc.includes.iter().rev() {
            if let Some(m) = self.capabilities[cap.0 as usize].methods.get(name) {
                return Some(m.clone());
            }
        }
        desc.superclass.and_then(|s| self.resolve_walk(s, name))
    }

    /// `id` plus every type whose superclass chain passes through it.
    fn with_descendants(&self, id: TypeId) -> Vec<TypeId> {
        let mut affected = vec![id];
        for (i, _) in self.types.iter().enumerate() {
            let candidate = TypeId(i as u32);
            if candidate == id {
                continue;
            }
            let mut cursor = self.descriptor(candidate).superclass;
            while let Some(ancestor) = cursor {
                if ancestor == id {
                    affected.push(candidate);
                    break;
                }
                cursor = self.descriptor(ancestor).superclass;
            }
        }
        affected
    }

    /// Every type whose resolution can reach the capability set.
    fn capability_dependents(&self, cap: CapabilityId) -> Vec<TypeId> {
        let mut dependents = Vec::new();
        for (i, _) in self.types.iter().enumerate() {
            let candidate = TypeId(i as u32);
            let mut cursor = Some(candidate);
            'chain: while let Some(t) = cursor {
                if self.descriptor(t).includes.contains(&cap) {
                    dependents.push(candidate);
                    break 'chain;
                }
                cursor = self.descriptor(t).superclass;
            }
        }
        dependents
    }
}

/// The dispatch engine: type registry, resolution cache and invalidation.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use core_types::Value;
/// use memory_manager::Heap;
/// use method_dispatch::TypeRegistry;
///
/// let registry = TypeRegistry::with_core_types(Arc::new(Heap::new()));
/// let sum = registry
///     .call(&Value::integer(1), "+", &[Value::rational(1, 2).unwrap()])
///     .unwrap();
/// assert_eq!(sum, Value::rational(3, 2).unwrap());
/// ```
pub struct TypeRegistry {
    inner: RwLock<RegistryInner>,
    cache: RwLock<HashMap<(TypeId, String), MethodImpl>>,
    epoch: AtomicU64,
    heap: Arc<Heap>,
}

impl TypeRegistry {
    /// Creates an empty registry over the given heap.
    pub fn new(heap: Arc<Heap>) -> Self {
        TypeRegistry {
            inner: RwLock::new(RegistryInner::default()),
            cache: RwLock::new(HashMap::new()),
            epoch: AtomicU64::new(0),
            heap,
        }
    }

    /// The heap this registry resolves `ObjectRef` receivers through.
    pub fn heap(&self) -> &Arc<Heap> {
        &self.heap
    }

    /// The current cache epoch, bumped on every invalidation.
    pub fn epoch(&self) -> u64 {
        self.epoch.load(Ordering::Acquire)
    }

    /// Defines a new type with an optional superclass.
    pub fn define_type(&self, name: &str, superclass: Option<TypeId>) -> TypeId {
        let mut inner = self.inner.write();
        let id = TypeId(inner.types.len() as u32);
        inner.types.push(TypeDescriptor {
            name: name.to_string(),
            superclass,
            includes: Vec::new(),
            methods: MethodTable::new(),
        });
        inner.types_by_name.insert(name.to_string(), id);
        id
    }

    /// Looks up a type by name.
    pub fn type_id(&self, name: &str) -> Option<TypeId> {
        self.inner.read().types_by_name.get(name).copied()
    }

    /// The name of a registered type.
    pub fn type_name(&self, id: TypeId) -> String {
        self.inner.read().descriptor(id).name.to_string()
    }

    /// Defines a new, empty capability set.
    pub fn define_capability(&self, name: &str) -> CapabilityId {
        self.define_capability_with_table(name, MethodTable::new())
    }

    /// Defines a capability set with a pre-built method table.
    pub fn define_capability_with_table(&self, name: &str, table: MethodTable) -> CapabilityId {
        let mut inner = self.inner.write();
        let id = CapabilityId(inner.capabilities.len() as u32);
        inner.capabilities.push(CapabilitySet {
            name: name.to_string(),
            methods: table,
        });
        inner.capabilities_by_name.insert(name.to_string(), id);
        id
    }

    /// Looks up a capability set by name.
    pub fn capability_id(&self, name: &str) -> Option<CapabilityId> {
        self.inner.read().capabilities_by_name.get(name).copied()
    }

    /// Includes a capability set into a type. Later inclusions take
    /// precedence over earlier ones during resolution.
    pub fn include_capability(&self, id: TypeId, cap: CapabilityId) {
        {
            let mut inner = self.inner.write();
            inner.types[id.0 as usize].includes.push(cap);
        }
        self.invalidate(id);
    }

    /// Defines (or redefines) a method directly on a type, invalidating the
    /// cached resolutions of the type and its descendants.
    pub fn define_method<F>(&self, id: TypeId, name: &str, f: F)
    where
        F: Fn(&Value, &[Value]) -> RubyResult<Value> + Send + Sync + 'static,
    {
        {
            let mut inner = self.inner.write();
            inner.types[id.0 as usize].methods.insert_native(name, f);
        }
        self.invalidate(id);
    }

    /// Defines (or redefines) a method on a capability set, invalidating
    /// every type whose resolution reaches that set.
    pub fn define_capability_method<F>(&self, cap: CapabilityId, name: &str, f: F)
    where
        F: Fn(&Value, &[Value]) -> RubyResult<Value> + Send + Sync + 'static,
    {
        let dependents = {
            let mut inner = self.inner.write();
            inner.capabilities[cap.0 as usize]
                .methods
                .insert_native(name, f);
            inner.capability_dependents(cap)
        };
        for id in dependents {
            self.invalidate(id);
        }
    }

    /// Drops cached resolutions for a type and all of its descendants and
    /// bumps the epoch observed by inline call-site caches.
    ///
    /// The epoch is bumped before the cache sweep: a concurrent `resolve`
    /// that finished its walk against the old tables either observes the
    /// bump and declines to cache, or inserts before the sweep and has its
    /// entry removed by it. Either way no stale entry outlives invalidation.
    pub fn invalidate(&self, id: TypeId) {
        let affected = self.inner.read().with_descendants(id);
        self.epoch.fetch_add(1, Ordering::Release);
        let mut cache = self.cache.write();
        cache.retain(|(t, _), _| !affected.contains(t));
    }

    /// The dynamic type of a receiver value.
    ///
    /// `ObjectRef` receivers carry their type name in the heap; everything
    /// else maps through the built-in type names.
    pub fn type_of(&self, receiver: &Value) -> RubyResult<TypeId> {
        let name = match receiver {
            Value::ObjectRef(id) => self.heap.class_of(*id)?,
            other => other.class_name().to_string(),
        };
        let inner = self.inner.read();
        inner
            .types_by_name
            .get(&name)
            .or_else(|| inner.types_by_name.get("Object"))
            .copied()
            .ok_or_else(|| RubyError::type_mismatch(format!("unregistered type {}", name)))
    }

    /// Resolves a method against a receiver type, consulting the cache.
    pub fn resolve(&self, id: TypeId, name: &str) -> RubyResult<MethodImpl> {
        if let Some(m) = self.cache.read().get(&(id, name.to_string())) {
            return Ok(m.clone());
        }
        let epoch = self.epoch();
        let resolved = self.inner.read().resolve_walk(id, name);
        match resolved {
            Some(m) => {
                // Cache only if no invalidation raced the walk. The epoch is
                // re-read under the cache write lock, which `invalidate`
                // also takes after its bump, so a stale insert is either
                // skipped here or swept by the racing invalidation.
                let mut cache = self.cache.write();
                if self.epoch() == epoch {
                    cache.insert((id, name.to_string()), m.clone());
                }
                drop(cache);
                Ok(m)
            }
            None => {
                let type_name = self.type_name(id);
                Err(RubyError::method_missing(&type_name, name))
            }
        }
    }

    /// Dispatches a method call on a receiver.
    pub fn call(&self, receiver: &Value, name: &str, args: &[Value]) -> RubyResult<Value> {
        let id = self.type_of(receiver)?;
        let method = self.resolve(id, name)?;
        self.invoke(receiver, &method, args)
    }

    /// Dispatches through a per-call-site inline cache.
    pub fn call_cached(
        &self,
        site: &mut CallSite,
        receiver: &Value,
        name: &str,
        args: &[Value],
    ) -> RubyResult<Value> {
        let id = self.type_of(receiver)?;
        let epoch = self.epoch();
        let method = match site.lookup(id, epoch) {
            Some(m) => m,
            None => {
                let m = self.resolve(id, name)?;
                site.update(id, epoch, m.clone());
                m
            }
        };
        self.invoke(receiver, &method, args)
    }

    fn invoke(&self, receiver: &Value, method: &MethodImpl, args: &[Value]) -> RubyResult<Value> {
        match method {
            MethodImpl::Native(f) => f(receiver, args),
            MethodImpl::DerivedFromCmp(derived) => self.invoke_derived(receiver, *derived, args),
        }
    }

    /// Three-way comparison through dispatch. `None` means the receiver's
    /// `<=>` answered nil (incomparable operands).
    pub fn three_way(&self, a: &Value, b: &Value) -> RubyResult<Option<std::cmp::Ordering>> {
        match self.call(a, "<=>", std::slice::from_ref(b))? {
            Value::Integer(n) => {
                use num_traits::Signed;
                Ok(Some(if n.is_negative() {
                    std::cmp::Ordering::Less
                } else if n.is_positive() {
                    std::cmp::Ordering::Greater
                } else {
                    std::cmp::Ordering::Equal
                }))
            }
            Value::Nil => Ok(None),
            other => Err(RubyError::type_mismatch(format!(
                "<=> must answer an Integer or nil, got {}",
                other.class_name()
            ))),
        }
    }

    fn comparison_failed(&self, a: &Value, b: &Value) -> RubyError {
        RubyError::type_mismatch(format!(
            "comparison of {} with {} failed",
            a.class_name(),
            b.class_name()
        ))
    }

    fn ordered(&self, a: &Value, b: &Value) -> RubyResult<std::cmp::Ordering> {
        self.three_way(a, b)?
            .ok_or_else(|| self.comparison_failed(a, b))
    }

    fn invoke_derived(
        &self,
        receiver: &Value,
        derived: CmpDerived,
        args: &[Value],
    ) -> RubyResult<Value> {
        use std::cmp::Ordering::{Equal, Greater, Less};
        let arg = |i: usize| -> RubyResult<&Value> {
            args.get(i).ok_or_else(|| {
                RubyError::type_mismatch(format!(
                    "wrong number of arguments (given {}, expected {})",
                    args.len(),
                    i + 1
                ))
            })
        };
        match derived {
            CmpDerived::Lt => Ok(Value::Bool(self.ordered(receiver, arg(0)?)? == Less)),
            CmpDerived::Le => Ok(Value::Bool(self.ordered(receiver, arg(0)?)? != Greater)),
            CmpDerived::Gt => Ok(Value::Bool(self.ordered(receiver, arg(0)?)? == Greater)),
            CmpDerived::Ge => Ok(Value::Bool(self.ordered(receiver, arg(0)?)? != Less)),
            CmpDerived::Eq => match self.three_way(receiver, arg(0)?) {
                Ok(Some(ordering)) => Ok(Value::Bool(ordering == Equal)),
                Ok(None) => Ok(Value::Bool(false)),
                Err(e) if e.kind == core_types::ErrorKind::TypeMismatch => {
                    Ok(Value::Bool(false))
                }
                Err(e) => Err(e),
            },
            CmpDerived::Between => {
                let min = arg(0)?;
                let max = arg(1)?;
                let above = self.ordered(receiver, min)? != Less;
                let below = self.ordered(receiver, max)? != Greater;
                Ok(Value::Bool(above && below))
            }
            CmpDerived::Clamp => {
                let min = arg(0)?;
                let max = arg(1)?;
                if self.ordered(receiver, min)? == Less {
                    Ok(min.clone())
                } else if self.ordered(receiver, max)? == Greater {
                    Ok(max.clone())
                } else {
                    Ok(receiver.clone())
                }
            }
            CmpDerived::Min => {
                let mut best = receiver.clone();
                for candidate in args {
                    if self.ordered(candidate, &best)? == Less {
                        best = candidate.clone();
                    }
                }
                Ok(best)
            }
            CmpDerived::Max => {
                let mut best = receiver.clone();
                for candidate in args {
                    if self.ordered(candidate, &best)? == Greater {
                        best = candidate.clone();
                    }
                }
                Ok(best)
            }
        }
    }
}

impl std::fmt::Debug for TypeRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.read();
        f.debug_struct("TypeRegistry")
            .field("types", &inner.types.len())
            .field("capabilities", &inner.capabilities.len())
            .field("cached_resolutions", &self.cache.read().len())
            .field("epoch", &self.epoch())
            .finish()
    }
}
