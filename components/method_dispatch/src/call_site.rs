//! Inline caching for call sites.
//!
//! Caches the (receiver type, method) resolution at a call site, transitioning
//! through mono/poly/megamorphic states as more receiver types are observed.
//! Entries carry the registry epoch at resolution time; a stale epoch is a
//! cache miss, which is how method-table reopening reaches existing sites.

use arrayvec::ArrayVec;

use crate::method::MethodImpl;
use crate::registry::TypeId;

/// Maximum receiver types cached before the site goes megamorphic.
const POLYMORPHIC_LIMIT: usize = 4;

/// Inline cache for one call site.
#[derive(Debug, Clone)]
pub enum CallSite {
    /// No receiver type observed yet
    Uninitialized,
    /// Single receiver type cached (most common case)
    Monomorphic {
        /// The cached receiver type
        type_id: TypeId,
        /// Registry epoch at resolution time
        epoch: u64,
        /// The resolved implementation
        method: MethodImpl,
    },
    /// Several receiver types cached
    Polymorphic {
        /// (type, epoch, implementation) entries
        entries: ArrayVec<(TypeId, u64, MethodImpl), POLYMORPHIC_LIMIT>,
    },
    /// Too many receiver types, fall back to registry lookup
    Megamorphic,
}

impl CallSite {
    /// Creates a new uninitialized call site.
    pub fn new() -> Self {
        CallSite::Uninitialized
    }

    /// Looks up the cached implementation for a receiver type.
    ///
    /// Entries resolved under an older epoch are ignored.
    pub fn lookup(&self, type_id: TypeId, epoch: u64) -> Option<MethodImpl> {
        match self {
            CallSite::Uninitialized => None,
            CallSite::Monomorphic {
                type_id: cached,
                epoch: cached_epoch,
                method,
            } => {
                if *cached == type_id && *cached_epoch == epoch {
                    Some(method.clone())
                } else {
                    None
                }
            }
            CallSite::Polymorphic { entries } => entries
                .iter()
                .find(|(t, e, _)| *t == type_id && *e == epoch)
                .map(|(_, _, m)| m.clone()),
            CallSite::Megamorphic => None,
        }
    }

    /// Records a resolution, transitioning the cache state as needed.
    pub fn update(&mut self, type_id: TypeId, epoch: u64, method: MethodImpl) {
        match self {
            CallSite::Uninitialized => {
                *self = CallSite::Monomorphic {
                    type_id,
                    epoch,
                    method,
                };
            }
            CallSite::Monomorphic {
                type_id: cached,
                epoch: cached_epoch,
                method: cached_method,
            } => {
                if *cached == type_id {
                    // Same receiver type: refresh in place (covers re-resolution
                    // after an epoch bump).
                    *cached_epoch = epoch;
                    *cached_method = method;
                } else {
                    let mut entries = ArrayVec::new();
                    entries.push((*cached, *cached_epoch, cached_method.clone()));
                    entries.push((type_id, epoch, method));
                    *self = CallSite::Polymorphic { entries };
                }
            }
            CallSite::Polymorphic { entries } => {
                if let Some(entry) = entries.iter_mut().find(|(t, _, _)| *t == type_id) {
                    entry.1 = epoch;
                    entry.2 = method;
                } else if entries.len() < POLYMORPHIC_LIMIT {
                    entries.push((type_id, epoch, method));
                } else {
                    *self = CallSite::Megamorphic;
                }
            }
            CallSite::Megamorphic => {}
        }
    }
}

impl Default for CallSite {
    fn default() -> Self {
        Self::new()
    }
}
