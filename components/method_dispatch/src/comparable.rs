//! The Comparable capability set.
//!
//! A type that defines only the three-way comparator `<=>` gains the full
//! family of ordering operations when it includes this capability set. The
//! derived entries are markers interpreted by the dispatch engine, not
//! separate user implementations.

use crate::method::{MethodImpl, MethodTable};

/// An ordering operation derived from the receiver's `<=>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CmpDerived {
    /// `<`
    Lt,
    /// `<=`
    Le,
    /// `>`
    Gt,
    /// `>=`
    Ge,
    /// `==`
    Eq,
    /// `between?(min, max)`
    Between,
    /// `clamp(min, max)`
    Clamp,
    /// `min(*others)`, smallest of receiver and arguments
    Min,
    /// `max(*others)`, largest of receiver and arguments
    Max,
}

/// Builds the Comparable method table: every ordering operation expressed
/// as a derived entry over the single `<=>` primitive.
pub fn comparable_table() -> MethodTable {
    let mut table = MethodTable::new();
    table.insert("<", MethodImpl::DerivedFromCmp(CmpDerived::Lt));
    table.insert("<=", MethodImpl::DerivedFromCmp(CmpDerived::Le));
    table.insert(">", MethodImpl::DerivedFromCmp(CmpDerived::Gt));
    table.insert(">=", MethodImpl::DerivedFromCmp(CmpDerived::Ge));
    table.insert("==", MethodImpl::DerivedFromCmp(CmpDerived::Eq));
    table.insert("between?", MethodImpl::DerivedFromCmp(CmpDerived::Between));
    table.insert("clamp", MethodImpl::DerivedFromCmp(CmpDerived::Clamp));
    table.insert("min", MethodImpl::DerivedFromCmp(CmpDerived::Min));
    table.insert("max", MethodImpl::DerivedFromCmp(CmpDerived::Max));
    table
}
