//! Numeric tower and coercion rules.
//!
//! This component implements the promotion order Integer < Rational < Float
//! < Complex, binary arithmetic dispatch over that order, the nil numeric
//! conversions, and calendar-date arithmetic on exact rational day counts.
//!
//! # Overview
//!
//! - [`coerce`] / [`NumericKind`] - promotion to a common numeric kind
//! - [`apply`] / [`BinaryOp`] - arithmetic in the common kind
//! - [`compare`] - three-way comparison over the ordered kinds
//! - [`to_rational`] / [`to_complex`] / [`to_float`] - conversions, including
//!   nil's defined coercions
//! - [`CalendarDate`] - proleptic-Gregorian dates on rational day numbers

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

mod arith;
mod coerce;
mod convert;
mod date;

pub use arith::{apply, compare, BinaryOp};
pub use coerce::{coerce, kind_of, NumericKind};
pub use convert::{to_complex, to_float, to_rational};
pub use date::CalendarDate;
