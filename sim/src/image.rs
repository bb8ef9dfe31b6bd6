//! A card's EEPROM simulated by a file. Read whole on open, written back
//! whole on flush; the driver only ever sees the bytes in memory.
use rustix::{fd, fs, io, path};

pub struct Image {
	fd: fd::OwnedFd,
	bytes: Vec<u8>,
}

impl Image {
	/// Creates the file if needed. The image is at least `size` bytes, bytes
	/// past the end of a shorter file read as zero.
	pub fn open<P: path::Arg>(path: P, size: usize) -> io::Result<Self> {
		let flags = fs::OFlags::CREATE | fs::OFlags::RDWR;
		let mode = fs::Mode::RUSR | fs::Mode::WUSR;
		let fd = fs::open(path, flags, mode)?;

		let file_len = fs::fstat(&fd)?.st_size as usize;
		let mut bytes = vec![0; file_len.max(size)];

		let mut offset = 0;
		while offset < file_len {
			// pread ignores the fd offset, supply your own
			let n = io::pread(&fd, &mut bytes[offset..file_len], offset as u64)?;
			if n == 0 {
				break;
			}
			offset += n;
		}

		Ok(Self { fd, bytes })
	}

	/// Persist every byte, then fsync.
	pub fn flush(&self) -> io::Result<()> {
		let mut offset = 0;
		while offset < self.bytes.len() {
			offset += io::pwrite(&self.fd, &self.bytes[offset..], offset as u64)?;
		}
		fs::fsync(&self.fd)
	}

	pub fn len(&self) -> usize {
		self.bytes.len()
	}
}

impl AsRef<[u8]> for Image {
	fn as_ref(&self) -> &[u8] {
		&self.bytes
	}
}

impl AsMut<[u8]> for Image {
	fn as_mut(&mut self) -> &mut [u8] {
		&mut self.bytes
	}
}
