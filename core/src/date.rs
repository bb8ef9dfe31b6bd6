//! Dates packed into 16 bits, for the `date` field of a visit.
//!
//! ```text
//! 15         9 8     5 4       0
//! ┌-----------┬-------┬---------┐
//! | years-2000| month |   day   |
//! └-----------┴-------┴---------┘
//! ```
use core::fmt;

use crate::err;

pub const EPOCH_YEAR: u16 = 2000;
pub const MAX_YEAR: u16 = EPOCH_YEAR + 0x7F;

#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, derive_more::Into)]
#[repr(transparent)]
pub struct CompactDate(u16);

impl CompactDate {
	pub fn new(year: u16, month: u8, day: u8) -> Result<Self, err::Date> {
		if !(EPOCH_YEAR..=MAX_YEAR).contains(&year) {
			return Err(err::Date::Year(year));
		}
		if !(1..=12).contains(&month) {
			return Err(err::Date::Month(month));
		}
		if !(1..=31).contains(&day) {
			return Err(err::Date::Day(day));
		}

		let years = year - EPOCH_YEAR;
		Ok(Self(years << 9 | (month as u16) << 5 | day as u16))
	}

	/// Whatever was stored on the card. Not validated, a raw value may hold
	/// a zero month or day.
	pub fn from_raw(raw: u16) -> Self {
		Self(raw)
	}

	pub fn year(self) -> u16 {
		EPOCH_YEAR + (self.0 >> 9)
	}

	pub fn month(self) -> u8 {
		(self.0 >> 5 & 0x0F) as u8
	}

	pub fn day(self) -> u8 {
		(self.0 & 0x1F) as u8
	}
}

impl fmt::Display for CompactDate {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		write!(f, "{:04}-{:02}-{:02}", self.year(), self.month(), self.day())
	}
}

impl fmt::Debug for CompactDate {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "CompactDate({self})")
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use pretty_assertions::assert_eq;
	use proptest::prelude::*;

	#[test]
	fn packs_known_date() {
		let d = CompactDate::new(2025, 12, 1).unwrap();
		assert_eq!(u16::from(d), 25 << 9 | 12 << 5 | 1);
		assert_eq!(d.to_string(), "2025-12-01");
	}

	#[test]
	fn rejects_out_of_range() {
		assert_eq!(CompactDate::new(1999, 1, 1), Err(err::Date::Year(1999)));
		assert_eq!(CompactDate::new(2128, 1, 1), Err(err::Date::Year(2128)));
		assert_eq!(CompactDate::new(2025, 0, 1), Err(err::Date::Month(0)));
		assert_eq!(CompactDate::new(2025, 13, 1), Err(err::Date::Month(13)));
		assert_eq!(CompactDate::new(2025, 1, 0), Err(err::Date::Day(0)));
		assert_eq!(CompactDate::new(2025, 1, 32), Err(err::Date::Day(32)));
	}

	#[test]
	fn orders_chronologically() {
		let a = CompactDate::new(2025, 11, 20).unwrap();
		let b = CompactDate::new(2025, 12, 1).unwrap();
		let c = CompactDate::new(2026, 1, 1).unwrap();
		assert!(a < b && b < c);
	}

	proptest! {
		#[test]
		fn fields_survive_packing(
			year in EPOCH_YEAR..=MAX_YEAR,
			month in 1..=12u8,
			day in 1..=31u8
		) {
			let d = CompactDate::new(year, month, day).unwrap();
			assert_eq!((d.year(), d.month(), d.day()), (year, month, day));
			assert_eq!(CompactDate::from_raw(d.into()), d);
		}
	}
}
