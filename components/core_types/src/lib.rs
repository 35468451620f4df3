//! Core runtime value types and error handling.
//!
//! This crate provides the foundational types for a Ruby-compatible runtime
//! evaluation core: the tagged value representation, exact numeric payloads,
//! encoding-aware strings, and the shared error taxonomy.
//!
//! # Overview
//!
//! - [`Value`] - Tagged representation of runtime values
//! - [`Rational`] / [`Complex`] - Exact numeric payloads with their invariants
//! - [`RString`] / [`Encoding`] - Encoding-tagged byte strings
//! - [`RubyError`] / [`ErrorKind`] - Runtime errors shared by every component
//!
//! # Examples
//!
//! ```
//! use core_types::{RubyError, Value};
//!
//! let half = Value::rational(2, 4).unwrap();
//! assert_eq!(half, Value::rational(1, 2).unwrap());
//!
//! let err = RubyError::method_missing("Integer", "each");
//! assert!(err.to_string().contains("undefined method"));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

mod error;
mod string;
mod value;

pub use error::{ErrorKind, RubyError, RubyResult};
pub use string::{Encoding, RString};
pub use value::{Complex, ObjectId, Rational, Real, Value};
