use core::num::NonZeroU16;

use crate::err;
use crate::layout::{HEADER_SIZE, HISTORY_PARTITION_SIZE, RECORD_SIZE};
use crate::ring::Ring;

/// Sizes a driver works with. Fixed for the lifetime of a formatted region:
/// a region formatted under one config reads as unformatted under another
/// with a different capacity.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Config {
	partition_size: usize,
	capacity: NonZeroU16,
}

impl Config {
	pub const DEFAULT: Self = match Self::new(HISTORY_PARTITION_SIZE) {
		Ok(config) => config,
		Err(_) => panic!("default history partition must hold records"),
	};

	/// Trailing bytes of the partition that don't make up a whole record are
	/// never touched.
	pub const fn new(partition_size: usize) -> Result<Self, err::Config> {
		let capacity = partition_size / RECORD_SIZE;
		if capacity > u16::MAX as usize {
			return Err(err::Config::TooLarge { partition_size });
		}

		match NonZeroU16::new(capacity as u16) {
			Some(capacity) => Ok(Self { partition_size, capacity }),
			None => Err(err::Config::NoCapacity { partition_size }),
		}
	}

	pub fn partition_size(&self) -> usize {
		self.partition_size
	}

	/// Number of record slots, the max_capacity written by format.
	pub fn capacity(&self) -> u16 {
		self.capacity.get()
	}

	/// Smallest region a driver with this config accepts.
	pub fn region_size(&self) -> usize {
		HEADER_SIZE + self.partition_size
	}

	pub(crate) fn ring(&self) -> Ring {
		Ring::new(self.capacity)
	}
}

impl Default for Config {
	fn default() -> Self {
		Self::DEFAULT
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use pretty_assertions::assert_eq;

	#[test]
	fn default_matches_card() {
		let c = Config::default();
		assert_eq!(c.capacity(), 3413);
		assert_eq!(c.region_size(), 20_490);
	}

	#[test]
	fn capacity_rounds_down() {
		let c = Config::new(24).unwrap();
		assert_eq!(c.capacity(), 4);
		let c = Config::new(29).unwrap();
		assert_eq!(c.capacity(), 4);
		assert_eq!(c.region_size(), 39);
	}

	#[test]
	fn rejects_empty_partition() {
		assert_eq!(
			Config::new(5),
			Err(err::Config::NoCapacity { partition_size: 5 })
		);
	}

	#[test]
	fn rejects_capacity_beyond_header_field() {
		let largest = u16::MAX as usize * RECORD_SIZE;
		assert!(Config::new(largest + RECORD_SIZE - 1).is_ok());
		assert_eq!(
			Config::new(largest + RECORD_SIZE),
			Err(err::Config::TooLarge { partition_size: largest + RECORD_SIZE })
		);
	}
}
