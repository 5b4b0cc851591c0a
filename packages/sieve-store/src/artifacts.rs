use std::{
	fs,
	io::{BufReader, BufWriter},
	path::Path,
};

use sieve_domain::Record;

use crate::{Error, Result};

pub const RECORDS_FILE: &str = "records.json";
pub const EMBEDDINGS_FILE: &str = "embeddings.json";

pub fn save_records(dir: &Path, records: &[Record]) -> Result<()> {
	write_json(dir, RECORDS_FILE, &records)
}

pub fn load_records(dir: &Path) -> Result<Vec<Record>> {
	read_json(dir, RECORDS_FILE)
}

/// Persists the embedding matrix row-major; row order matches the record
/// sequence.
pub fn save_matrix(dir: &Path, matrix: &[Vec<f32>]) -> Result<()> {
	write_json(dir, EMBEDDINGS_FILE, &matrix)
}

pub fn load_matrix(dir: &Path) -> Result<Vec<Vec<f32>>> {
	read_json(dir, EMBEDDINGS_FILE)
}

fn write_json<T>(dir: &Path, file: &str, value: &T) -> Result<()>
where
	T: serde::Serialize,
{
	fs::create_dir_all(dir)?;

	let path = dir.join(file);
	let writer = BufWriter::new(fs::File::create(&path)?);

	serde_json::to_writer(writer, value)?;
	tracing::info!(path = %path.display(), "Wrote index artifact.");

	Ok(())
}

fn read_json<T>(dir: &Path, file: &str) -> Result<T>
where
	T: serde::de::DeserializeOwned,
{
	let path = dir.join(file);

	if !path.exists() {
		return Err(Error::MissingArtifact { path });
	}

	let reader = BufReader::new(fs::File::open(&path)?);

	Ok(serde_json::from_reader(reader)?)
}
