//! Byte exact on-media layout of a card.
//!
//! ```text
//! 0        4      6       8              10      16      22
//! ┌--------┬------┬-------┬--------------┬-------┬-------┬---
//! | magic  | head | count | max_capacity | rec 0 | rec 1 | ...
//! └--------┴------┴-------┴--------------┴-------┴-------┴---
//! ```
//!
//! Every multi-byte field is little-endian. The overlays below are made of
//! byte arrays, so they have an alignment of 1 and can sit at any offset of
//! any buffer without unaligned reads.
use core::fmt;

/// ASCII "SIHT" read as a big-endian number. Stored little-endian, so the
/// bytes on media are "THIS".
pub const MAGIC: u32 = 0x5349_4854;

/// Size of the whole simulated EEPROM of a card.
pub const MAX_EEPROM_SIZE: usize = 32_000;

/// Bytes reserved for the record ring buffer, after the header.
pub const HISTORY_PARTITION_SIZE: usize = 20_480;

pub const HEADER_SIZE: usize = core::mem::size_of::<Header>();
pub const RECORD_SIZE: usize = core::mem::size_of::<Record>();

const _: () = assert!(HEADER_SIZE == 10);
const _: () = assert!(RECORD_SIZE == 6);
const _: () = assert!(HEADER_SIZE + HISTORY_PARTITION_SIZE <= MAX_EEPROM_SIZE);

/// Ring buffer state, at offset 0 of the region.
#[derive(bytemuck::Pod, bytemuck::Zeroable, Clone, Copy, Default, PartialEq)]
#[repr(C)]
pub struct Header {
	magic: [u8; 4],
	/// Next slot to be written
	head_index: [u8; 2],
	/// Valid records, saturates at max_capacity
	count: [u8; 2],
	max_capacity: [u8; 2],
}

impl Header {
	pub fn formatted(max_capacity: u16) -> Self {
		Self {
			magic: MAGIC.to_le_bytes(),
			head_index: [0; 2],
			count: [0; 2],
			max_capacity: max_capacity.to_le_bytes(),
		}
	}

	pub fn magic(&self) -> u32 {
		u32::from_le_bytes(self.magic)
	}

	pub fn head_index(&self) -> u16 {
		u16::from_le_bytes(self.head_index)
	}

	pub fn count(&self) -> u16 {
		u16::from_le_bytes(self.count)
	}

	pub fn max_capacity(&self) -> u16 {
		u16::from_le_bytes(self.max_capacity)
	}

	pub fn set_head_index(&mut self, head_index: u16) {
		self.head_index = head_index.to_le_bytes();
	}

	pub fn set_count(&mut self, count: u16) {
		self.count = count.to_le_bytes();
	}
}

impl fmt::Debug for Header {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Header")
			.field("magic", &format_args!("{:#010x}", self.magic()))
			.field("head_index", &self.head_index())
			.field("count", &self.count())
			.field("max_capacity", &self.max_capacity())
			.finish()
	}
}

/// One visit as it sits in the history partition.
#[derive(bytemuck::Pod, bytemuck::Zeroable, Clone, Copy, Default, PartialEq)]
#[repr(C)]
pub struct Record {
	date_compact: [u8; 2],
	diagnosis_code: [u8; 2],
	medication_code: [u8; 2],
}

impl From<Visit> for Record {
	fn from(v: Visit) -> Self {
		Self {
			date_compact: v.date.to_le_bytes(),
			diagnosis_code: v.diagnosis.to_le_bytes(),
			medication_code: v.medication.to_le_bytes(),
		}
	}
}

impl From<Record> for Visit {
	fn from(r: Record) -> Self {
		Self {
			date: u16::from_le_bytes(r.date_compact),
			diagnosis: u16::from_le_bytes(r.diagnosis_code),
			medication: u16::from_le_bytes(r.medication_code),
		}
	}
}

impl fmt::Debug for Record {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		fmt::Debug::fmt(&Visit::from(*self), f)
	}
}

/// A visit as the caller sees it. The driver stores and returns these fields
/// bit for bit, it never interprets them.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Visit {
	/// See [crate::date::CompactDate]
	pub date: u16,
	/// Compressed ICD-10 code
	pub diagnosis: u16,
	/// Compressed ATC code
	pub medication: u16,
}

impl Visit {
	pub fn new(date: u16, diagnosis: u16, medication: u16) -> Self {
		Self { date, diagnosis, medication }
	}
}

impl From<(u16, u16, u16)> for Visit {
	fn from((date, diagnosis, medication): (u16, u16, u16)) -> Self {
		Self { date, diagnosis, medication }
	}
}

/// Snapshot of a formatted header.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Stats {
	pub head: u16,
	pub count: u16,
	pub capacity: u16,
}
