//! Sihat is the storage engine of a medical smart card. It keeps a bounded,
//! append only history of visits in a fixed EEPROM region.
//!
//! The following implementation notes may be useful:
//! - A header followed by a ring buffer of 6 byte records, nothing else.
//! - The newest visits win: once full, every write evicts the oldest.
//! - No allocation. The caller owns the bytes, wherever they come from
//!   (card reader, file, test buffer).
//! - Byte exact and little-endian on every host, see [layout].
#![cfg_attr(not(test), no_std)]

pub mod config;
pub mod date;
mod driver;
pub mod err;
pub mod layout;
mod ring;
#[cfg(test)]
mod test_utils;

pub use config::Config;
pub use date::CompactDate;
pub use driver::*;
pub use layout::{
	Stats, Visit, HEADER_SIZE, HISTORY_PARTITION_SIZE, MAGIC, MAX_EEPROM_SIZE,
	RECORD_SIZE,
};
