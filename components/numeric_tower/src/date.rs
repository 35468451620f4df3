//! Calendar dates on an exact rational day number.
//!
//! A `CalendarDate` is a day count relative to 1970-01-01 in the proleptic
//! Gregorian calendar, stored as an exact [`Rational`]. Adding a rational
//! number of days is arbitrary-precision arithmetic; there is no floating
//! approximation to drift across year boundaries, and day counts beyond
//! machine-word range stay exact.

use num_bigint::BigInt;
use num_integer::Integer as _;
use num_traits::{ToPrimitive, Zero};
use std::fmt;

use core_types::{Rational, RubyError, RubyResult};

/// A proleptic-Gregorian calendar date with fractional-day precision.
///
/// # Examples
///
/// ```
/// use num_bigint::BigInt;
/// use core_types::Rational;
/// use numeric_tower::CalendarDate;
///
/// let date = CalendarDate::from_civil(BigInt::from(2020), 1, 1).unwrap();
/// let later = date.add_days(&Rational::from_integer(BigInt::from(366)));
/// assert_eq!(later.civil(), (BigInt::from(2021), 1, 1));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarDate {
    /// Days since 1970-01-01, fractional part is time of day
    day: Rational,
}

impl CalendarDate {
    /// Builds a date from civil year, month and day.
    pub fn from_civil(year: BigInt, month: u32, day: u32) -> RubyResult<Self> {
        if !(1..=12).contains(&month) || day == 0 || day > days_in_month(&year, month) {
            return Err(RubyError::type_mismatch(format!(
                "invalid date {}-{}-{}",
                year, month, day
            )));
        }
        Ok(CalendarDate {
            day: Rational::from_integer(days_from_civil(&year, month, day)),
        })
    }

    /// The exact day number since 1970-01-01.
    pub fn day_number(&self) -> &Rational {
        &self.day
    }

    /// Adds an exact rational number of days.
    pub fn add_days(&self, days: &Rational) -> CalendarDate {
        CalendarDate {
            day: self.day.add(days),
        }
    }

    /// The civil (year, month, day) of this date, ignoring any fractional
    /// time-of-day part.
    pub fn civil(&self) -> (BigInt, u32, u32) {
        civil_from_days(&self.day.floor())
    }

    /// Civil year.
    pub fn year(&self) -> BigInt {
        self.civil().0
    }

    /// Civil month, 1 through 12.
    pub fn month(&self) -> u32 {
        self.civil().1
    }

    /// Civil day of month.
    pub fn day_of_month(&self) -> u32 {
        self.civil().2
    }
}

impl fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (y, m, d) = self.civil();
        write!(f, "{}-{:02}-{:02}", y, m, d)
    }
}

/// True for Gregorian leap years.
fn is_leap_year(year: &BigInt) -> bool {
    let four = BigInt::from(4);
    let hundred = BigInt::from(100);
    let four_hundred = BigInt::from(400);
    year.mod_floor(&four).is_zero()
        && (!year.mod_floor(&hundred).is_zero() || year.mod_floor(&four_hundred).is_zero())
}

fn days_in_month(year: &BigInt, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 => {
            if is_leap_year(year) {
                29
            } else {
                28
            }
        }
        _ => 0,
    }
}

/// Days since 1970-01-01 for a civil date (Gregorian, any year).
fn days_from_civil(year: &BigInt, month: u32, day: u32) -> BigInt {
    let y = if month <= 2 { year - 1 } else { year.clone() };
    let era = y.div_floor(&BigInt::from(400));
    let yoe = &y - &era * 400; // [0, 399]
    let mp = (month + 9) % 12; // March-based month, [0, 11]
    let doy = (153 * mp + 2) / 5 + day - 1; // [0, 365]
    let doe = &yoe * 365 + &yoe / 4 - &yoe / 100 + doy;
    era * 146097 + doe - 719468
}

/// Inverse of `days_from_civil`.
fn civil_from_days(days: &BigInt) -> (BigInt, u32, u32) {
    let z = days + BigInt::from(719468);
    let era = z.div_floor(&BigInt::from(146097));
    // day-of-era fits comfortably in i64
    let doe = (&z - &era * BigInt::from(146097))
        .to_i64()
        .unwrap_or_else(|| unreachable!("day-of-era out of range"));
    let yoe = (doe - doe / 1460 + doe / 36524 - doe / 146096) / 365;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let d = (doy - (153 * mp + 2) / 5 + 1) as u32;
    let m = (if mp < 10 { mp + 3 } else { mp - 9 }) as u32;
    let mut y = era * 400 + yoe;
    if m <= 2 {
        y += 1;
    }
    (y, m, d)
}
