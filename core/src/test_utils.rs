//! Useful random generators, and drivers over scratch memory.
use proptest::prelude::*;
use std::vec::Vec;

use crate::config::Config;
use crate::driver::Driver;
use crate::layout::Visit;

pub fn config(capacity: u16) -> Config {
	Config::new(capacity as usize * crate::RECORD_SIZE)
		.expect("capacity to be non zero")
}

/// Formatted driver whose region is exactly header + partition.
pub fn formatted(capacity: u16) -> Driver<Vec<u8>> {
	let config = config(capacity);
	let region = vec![0; config.region_size()];
	let mut driver =
		Driver::with_config(region, config).expect("region to fit config");
	driver.format();
	driver
}

pub fn arb_visit() -> impl Strategy<Value = Visit> {
	any::<(u16, u16, u16)>().prop_map(Visit::from)
}

pub fn arb_visits(max: usize) -> impl Strategy<Value = Vec<Visit>> {
	proptest::collection::vec(arb_visit(), 0..=max)
}
