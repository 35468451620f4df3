//! Method implementations and per-type method tables.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use core_types::{RubyResult, Value};

use crate::comparable::CmpDerived;

/// A native method body: receiver plus positional arguments.
pub type NativeFn = Arc<dyn Fn(&Value, &[Value]) -> RubyResult<Value> + Send + Sync>;

/// A resolved method implementation.
#[derive(Clone)]
pub enum MethodImpl {
    /// A directly callable native body
    Native(NativeFn),
    /// An ordering operation synthesized from the receiver's `<=>`;
    /// interpreted by the dispatch engine at invoke time
    DerivedFromCmp(CmpDerived),
}

impl fmt::Debug for MethodImpl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MethodImpl::Native(_) => write!(f, "Native(..)"),
            MethodImpl::DerivedFromCmp(d) => f.debug_tuple("DerivedFromCmp").field(d).finish(),
        }
    }
}

/// Mapping from method name to implementation, one per type or capability set.
#[derive(Debug, Clone, Default)]
pub struct MethodTable {
    methods: HashMap<String, MethodImpl>,
}

impl MethodTable {
    /// An empty table.
    pub fn new() -> Self {
        MethodTable {
            methods: HashMap::new(),
        }
    }

    /// Looks up a method by name.
    pub fn get(&self, name: &str) -> Option<&MethodImpl> {
        self.methods.get(name)
    }

    /// Defines or redefines a method.
    pub fn insert(&mut self, name: impl Into<String>, method: MethodImpl) {
        self.methods.insert(name.into(), method);
    }

    /// Defines a native method from a closure.
    pub fn insert_native<F>(&mut self, name: impl Into<String>, f: F)
    where
        F: Fn(&Value, &[Value]) -> RubyResult<Value> + Send + Sync + 'static,
    {
        self.insert(name, MethodImpl::Native(Arc::new(f)));
    }

    /// Number of methods defined directly in this table.
    pub fn len(&self) -> usize {
        self.methods.len()
    }

    /// True if no methods are defined.
    pub fn is_empty(&self) -> bool {
        self.methods.is_empty()
    }
}
