//! All publicly facing errors for sihat.
//!
//! They are rich rather than flat C style errors: each carries the numbers
//! that caused it, so a caller can report without re-reading the card.
//!
//! None of them allocate, so they are usable in a #[no_std] context.
use core::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Driver {
	/// Fatal. The region cannot hold a header and the history partition.
	RegionTooSmall { required: usize, actual: usize },
	/// Recoverable by calling format, which the driver never does on its own
	/// since that destroys the history.
	NotFormatted,
}

impl fmt::Display for Driver {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		match self {
			Self::RegionTooSmall { required, actual } => write!(
				f,
				"region too small: {actual} bytes given, {required} required"
			),
			Self::NotFormatted => write!(f, "region is not formatted"),
		}
	}
}

impl core::error::Error for Driver {}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Config {
	/// Partition cannot hold a single record
	NoCapacity { partition_size: usize },
	/// Capacity would not fit in the 16 bit max_capacity header field
	TooLarge { partition_size: usize },
}

impl fmt::Display for Config {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		match self {
			Self::NoCapacity { partition_size } => write!(
				f,
				"partition of {partition_size} bytes cannot hold a record"
			),
			Self::TooLarge { partition_size } => write!(
				f,
				"partition of {partition_size} bytes holds more than {} records",
				u16::MAX
			),
		}
	}
}

impl core::error::Error for Config {}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Date {
	Year(u16),
	Month(u8),
	Day(u8),
}

impl fmt::Display for Date {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		match self {
			Self::Year(y) => write!(f, "year {y} outside 2000..=2127"),
			Self::Month(m) => write!(f, "month {m} outside 1..=12"),
			Self::Day(d) => write!(f, "day {d} outside 1..=31"),
		}
	}
}

impl core::error::Error for Date {}
