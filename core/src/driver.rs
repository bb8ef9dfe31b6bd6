//! The card driver: a header plus a ring buffer of visits over a region of
//! bytes the caller owns.
//!
//! All state lives in the region. The driver itself only remembers the
//! sizes it was configured with, so two drivers over the same bytes (one
//! after the other) see the same history.
use core::iter::FusedIterator;

use crate::config::Config;
use crate::err;
use crate::layout::{Header, Record, Stats, Visit, HEADER_SIZE, MAGIC, RECORD_SIZE};
use crate::ring::{Ring, Slot};

type Res<T> = Result<T, err::Driver>;

/// Header fields after validation against the config.
#[derive(Clone, Copy, Debug)]
struct State {
	ring: Ring,
	head: Slot,
	count: u16,
}

pub struct Driver<B> {
	region: B,
	config: Config,
}

impl<B> Driver<B>
where
	B: AsRef<[u8]> + AsMut<[u8]>,
{
	pub fn new(region: B) -> Res<Self> {
		Self::with_config(region, Config::DEFAULT)
	}

	/// Fails straight away if the region is too small, so no later call
	/// ever has to.
	pub fn with_config(region: B, config: Config) -> Res<Self> {
		let required = config.region_size();
		let actual = region.as_ref().len();
		if actual < required {
			return Err(err::Driver::RegionTooSmall { required, actual });
		}

		Ok(Self { region, config })
	}

	/// Give the region back to the caller.
	pub fn into_inner(self) -> B {
		self.region
	}

	pub fn config(&self) -> Config {
		self.config
	}

	/// Discards all history. Record slots are left as they are; a count of
	/// zero means none of them are read before being written again.
	pub fn format(&mut self) {
		let capacity = self.config.capacity();
		*self.header_mut() = Header::formatted(capacity);
		log::debug!("card formatted, capacity: {capacity} visits");
	}

	pub fn is_formatted(&self) -> bool {
		self.state().is_ok()
	}

	pub fn stats(&self) -> Res<Stats> {
		let State { ring, head, count } = self.state()?;
		Ok(Stats { head: head.into(), count, capacity: ring.capacity() })
	}

	pub fn write_visit(
		&mut self,
		date: u16,
		diagnosis: u16,
		medication: u16,
	) -> Res<()> {
		self.write(Visit { date, diagnosis, medication })
	}

	/// Overwrites the slot at the head. Once the ring is full that slot holds
	/// the oldest visit, which is silently lost.
	pub fn write(&mut self, visit: Visit) -> Res<()> {
		let State { ring, head, count } = self.state()?;
		let (header, records) = self.parts_mut();

		records[head.as_usize()] = visit.into();
		header.set_head_index(ring.forward(head, 1).into());
		if count < ring.capacity() {
			header.set_count(count + 1);
		}

		log::trace!(
			"wrote record at index [{}] | date: {:x} diag: {:x}",
			head.as_usize(),
			visit.date,
			visit.diagnosis
		);

		Ok(())
	}

	/// Up to `limit` visits, newest first. Asking for more than are stored
	/// yields what is stored.
	pub fn dump_latest(&self, limit: usize) -> Res<Latest<'_>> {
		let State { ring, head, count } = self.state()?;
		Ok(Latest {
			records: self.records(),
			ring,
			head,
			next: 0,
			len: limit.min(count as usize),
		})
	}

	fn state(&self) -> Res<State> {
		let header = self.header();
		let ring = self.config.ring();

		let formatted = header.magic() == MAGIC
			&& header.max_capacity() == ring.capacity()
			&& header.count() <= ring.capacity();
		if !formatted {
			return Err(err::Driver::NotFormatted);
		}

		let head =
			ring.slot(header.head_index()).ok_or(err::Driver::NotFormatted)?;
		Ok(State { ring, head, count: header.count() })
	}

	fn partition_end(&self) -> usize {
		HEADER_SIZE + self.config.capacity() as usize * RECORD_SIZE
	}

	fn header(&self) -> &Header {
		bytemuck::from_bytes(&self.region.as_ref()[..HEADER_SIZE])
	}

	fn header_mut(&mut self) -> &mut Header {
		bytemuck::from_bytes_mut(&mut self.region.as_mut()[..HEADER_SIZE])
	}

	fn records(&self) -> &[Record] {
		let end = self.partition_end();
		bytemuck::cast_slice(&self.region.as_ref()[HEADER_SIZE..end])
	}

	fn parts_mut(&mut self) -> (&mut Header, &mut [Record]) {
		let end = self.partition_end();
		let bytes = &mut self.region.as_mut()[..end];
		let (header, records) = bytes.split_at_mut(HEADER_SIZE);
		(bytemuck::from_bytes_mut(header), bytemuck::cast_slice_mut(records))
	}
}

/// Visits read backwards from the head. Borrows the driver, so nothing can be
/// written while it is alive.
#[derive(Clone, Debug)]
pub struct Latest<'a> {
	records: &'a [Record],
	ring: Ring,
	head: Slot,
	next: usize,
	len: usize,
}

impl<'a> Iterator for Latest<'a> {
	type Item = Visit;

	fn next(&mut self) -> Option<Self::Item> {
		if self.next == self.len {
			return None;
		}

		let slot = self.ring.back(self.head, 1 + self.next);
		self.next += 1;
		self.records.get(slot.as_usize()).copied().map(Visit::from)
	}

	fn size_hint(&self) -> (usize, Option<usize>) {
		let remaining = self.len - self.next;
		(remaining, Some(remaining))
	}
}

impl<'a> ExactSizeIterator for Latest<'a> {}

impl<'a> FusedIterator for Latest<'a> {}
