//! Card simulator. Drives a file-backed card image through the public
//! driver API, the way a card reader would.
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use rand::prelude::*;
use sihat_core::{CompactDate, Config, Driver, Visit, HISTORY_PARTITION_SIZE};
use tabled::{Table, Tabled};

mod image;

use image::Image;

mod config {
	/// The original test bench shrank the partition to prove wraparound.
	pub const DEMO_PARTITION_SIZE: usize = 24;
	pub const DEFAULT_DUMP_LIMIT: usize = 10;
}

#[derive(Parser)]
#[command(about = "Simulate a Sihat medical card on a file")]
struct Cli {
	/// Bytes reserved for the visit history. Must match the size the image
	/// was formatted with.
	#[arg(long, global = true, default_value_t = HISTORY_PARTITION_SIZE)]
	partition: usize,

	#[command(subcommand)]
	cmd: Cmd,
}

#[derive(Subcommand)]
enum Cmd {
	/// Reset the card, discarding all history
	Format { image: PathBuf },
	/// Append one visit
	Write {
		image: PathBuf,
		/// YYYY-MM-DD
		#[arg(long, value_parser = parse_date)]
		date: CompactDate,
		/// Compressed ICD-10 code, hex
		#[arg(long, value_parser = parse_code)]
		diagnosis: u16,
		/// Compressed ATC code, hex
		#[arg(long, value_parser = parse_code)]
		medication: u16,
	},
	/// Print the latest visits, newest first
	Dump {
		image: PathBuf,
		#[arg(long, default_value_t = config::DEFAULT_DUMP_LIMIT)]
		limit: usize,
	},
	/// Append random visits
	Fill {
		image: PathBuf,
		#[arg(long)]
		count: usize,
		#[arg(long)]
		seed: Option<u64>,
	},
	/// Overflow a four slot card in memory and dump it
	Demo,
}

fn parse_date(s: &str) -> anyhow::Result<CompactDate> {
	let mut parts = s.splitn(3, '-');
	let mut next = || parts.next().context("expected YYYY-MM-DD");
	let year: u16 = next()?.parse()?;
	let month: u8 = next()?.parse()?;
	let day: u8 = next()?.parse()?;
	Ok(CompactDate::new(year, month, day)?)
}

fn parse_code(s: &str) -> anyhow::Result<u16> {
	let digits = s.trim_start_matches("0x");
	Ok(u16::from_str_radix(digits, 16)?)
}

#[derive(Tabled)]
struct Row {
	#[tabled(rename = "visit")]
	age: String,
	date: String,
	diagnosis: String,
	medication: String,
	raw: String,
}

impl Row {
	fn new(age: usize, v: Visit) -> Self {
		Self {
			age: format!("-{age}"),
			date: CompactDate::from_raw(v.date).to_string(),
			diagnosis: format!("{:#06x}", v.diagnosis),
			medication: format!("{:#06x}", v.medication),
			raw: format!("{:04x}|{:04x}|{:04x}", v.date, v.diagnosis, v.medication),
		}
	}
}

fn print_latest<B>(driver: &Driver<B>, limit: usize) -> anyhow::Result<()>
where
	B: AsRef<[u8]> + AsMut<[u8]>,
{
	let stats = driver.stats()?;
	println!(
		"{} of {} visits stored, next write at index [{}]",
		stats.count, stats.capacity, stats.head
	);

	let rows: Vec<Row> = driver
		.dump_latest(limit)?
		.enumerate()
		.map(|(age, v)| Row::new(age, v))
		.collect();
	println!("{}", Table::new(rows));
	Ok(())
}

fn open(path: &Path, config: Config) -> anyhow::Result<Driver<Image>> {
	let image = Image::open(path, config.region_size())
		.with_context(|| format!("failed to open {}", path.display()))?;
	Ok(Driver::with_config(image, config)?)
}

fn flush(driver: Driver<Image>) -> anyhow::Result<()> {
	driver.into_inner().flush().context("failed to flush card image")
}

fn demo() -> anyhow::Result<()> {
	let config = Config::new(config::DEMO_PARTITION_SIZE)?;
	let mut eeprom = vec![0u8; sihat_core::MAX_EEPROM_SIZE];
	let mut driver = Driver::with_config(&mut eeprom[..], config)?;
	driver.format();

	println!("Simulating overflow...");
	let visits = [
		(CompactDate::new(2025, 11, 5)?, 0x0E11, 0x0A01),
		(CompactDate::new(2025, 11, 20)?, 0x0E12, 0x0A02),
		(CompactDate::new(2025, 12, 1)?, 0x0E13, 0x0A03),
		(CompactDate::new(2025, 12, 14)?, 0x0999, 0x0B05),
		(CompactDate::new(2026, 1, 2)?, 0x0A42, 0x0B01),
	];
	for (date, diagnosis, medication) in visits {
		driver.write_visit(date.into(), diagnosis, medication)?;
	}

	print_latest(&driver, config.capacity() as usize)
}

fn main() -> anyhow::Result<()> {
	env_logger::init();
	let cli = Cli::parse();
	let config = Config::new(cli.partition)?;

	match cli.cmd {
		Cmd::Format { image } => {
			let mut driver = open(&image, config)?;
			driver.format();
			println!("Card formatted. Capacity: {} visits", config.capacity());
			flush(driver)
		}
		Cmd::Write { image, date, diagnosis, medication } => {
			let mut driver = open(&image, config)?;
			driver.write_visit(date.into(), diagnosis, medication)?;
			flush(driver)
		}
		Cmd::Dump { image, limit } => {
			let driver = open(&image, config)?;
			print_latest(&driver, limit)
		}
		Cmd::Fill { image, count, seed } => {
			let seed = seed.unwrap_or_else(|| thread_rng().gen());
			let mut rng = SmallRng::seed_from_u64(seed);
			println!("Seed is {}", seed);

			let mut driver = open(&image, config)?;
			for _ in 0..count {
				let date = CompactDate::new(
					rng.gen_range(2000..=2127),
					rng.gen_range(1..=12),
					rng.gen_range(1..=28),
				)?;
				driver.write_visit(date.into(), rng.gen(), rng.gen())?;
			}
			log::info!("wrote {count} random visits");
			flush(driver)
		}
		Cmd::Demo => demo(),
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use pretty_assertions::assert_eq;

	#[test]
	fn parses_dates() {
		let d = parse_date("2025-12-01").unwrap();
		assert_eq!(d, CompactDate::new(2025, 12, 1).unwrap());
		assert!(parse_date("2025-12").is_err());
		assert!(parse_date("1999-01-01").is_err());
		assert!(parse_date("2025-13-01").is_err());
	}

	#[test]
	fn parses_hex_codes() {
		assert_eq!(parse_code("0xE11").unwrap(), 0x0E11);
		assert_eq!(parse_code("a142").unwrap(), 0xA142);
		assert!(parse_code("10000").is_err());
	}

	#[test]
	fn cli_is_well_formed() {
		use clap::CommandFactory;
		Cli::command().debug_assert();
	}

	#[test]
	fn demo_runs() {
		demo().unwrap();
	}
}
