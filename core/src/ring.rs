//! Wrap-aware slot arithmetic, shared by the write and the read path.
//!
//! This is the only place in the crate that does modulo arithmetic on
//! record indices.
use core::num::NonZeroU16;

/// Index of a record slot in the history partition. Always below the
/// capacity of the [Ring] that produced it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, derive_more::Into)]
#[repr(transparent)]
pub struct Slot(u16);

impl Slot {
	pub const ZERO: Self = Self(0);

	pub fn as_usize(self) -> usize {
		self.0 as usize
	}
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Ring {
	capacity: NonZeroU16,
}

impl Ring {
	pub fn new(capacity: NonZeroU16) -> Self {
		Self { capacity }
	}

	pub fn capacity(&self) -> u16 {
		self.capacity.get()
	}

	/// None if `i` is not a slot of this ring.
	pub fn slot(&self, i: u16) -> Option<Slot> {
		(i < self.capacity()).then_some(Slot(i))
	}

	/// `n` slots after `slot`, wrapping past the end.
	pub fn forward(&self, slot: Slot, n: usize) -> Slot {
		let cap = self.capacity() as usize;
		let i = (slot.as_usize() + n % cap) % cap;
		Slot(i as u16)
	}

	/// `n` slots before `slot`, wrapping past the start.
	pub fn back(&self, slot: Slot, n: usize) -> Slot {
		let cap = self.capacity() as usize;
		let i = (slot.as_usize() + cap - n % cap) % cap;
		Slot(i as u16)
	}
}
