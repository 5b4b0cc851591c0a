use std::path::PathBuf;

use sieve_config::EmbeddingProviderConfig;
use sieve_domain::{Candidate, Record};
use sieve_providers::embedding;
use sieve_store::artifacts;

use crate::{Error, Result, rank};

struct Built {
	matrix: Vec<Vec<f32>>,
	records: Vec<Record>,
}

/// Embedding-similarity index. `build` is the only operation that talks to
/// the embedding provider for documents; `load` is pure deserialization.
pub struct VectorIndex {
	workdir: PathBuf,
	embedding: EmbeddingProviderConfig,
	built: Option<Built>,
}
impl VectorIndex {
	pub fn new(workdir: impl Into<PathBuf>, embedding: EmbeddingProviderConfig) -> Self {
		Self { workdir: workdir.into(), embedding, built: None }
	}

	/// Embeds every text in provider batches, validates the returned matrix
	/// and persists it together with the record sequence. Any provider
	/// failure aborts the build; no partial index is kept.
	pub async fn build(&mut self, texts: &[String], records: Vec<Record>) -> Result<()> {
		if records.is_empty() {
			return Err(Error::EmptyCorpus);
		}
		if texts.len() != records.len() {
			return Err(Error::InputMismatch { texts: texts.len(), records: records.len() });
		}

		let matrix = embedding::embed(&self.embedding, texts).await?;

		if matrix.len() != records.len() {
			return Err(Error::VectorCountMismatch {
				expected: records.len(),
				actual: matrix.len(),
			});
		}

		let expected = self.embedding.dimensions as usize;

		for row in &matrix {
			if row.len() != expected {
				return Err(Error::DimensionMismatch { expected, actual: row.len() });
			}
		}

		artifacts::save_records(&self.workdir, &records)?;
		artifacts::save_matrix(&self.workdir, &matrix)?;
		tracing::info!(docs = records.len(), dimensions = expected, "Vector index built.");

		self.built = Some(Built { matrix, records });

		Ok(())
	}

	/// Reconstructs the matrix and record sequence from persisted artifacts.
	/// No network calls.
	pub fn load(&mut self) -> Result<()> {
		let records = artifacts::load_records(&self.workdir)?;
		let matrix = artifacts::load_matrix(&self.workdir)?;

		if records.is_empty() {
			return Err(Error::EmptyCorpus);
		}
		if matrix.len() != records.len() {
			return Err(Error::VectorCountMismatch {
				expected: records.len(),
				actual: matrix.len(),
			});
		}

		self.built = Some(Built { matrix, records });

		Ok(())
	}

	/// Embeds a query through the same provider the documents went through.
	pub async fn embed_query(&self, query: &str) -> Result<Vec<f32>> {
		let mut vectors = embedding::embed(&self.embedding, &[query.to_string()]).await?;
		let vector =
			vectors.pop().ok_or(Error::VectorCountMismatch { expected: 1, actual: 0 })?;

		Ok(vector)
	}

	/// Full-corpus cosine-similarity vector against `query_vector`. Stored
	/// rows are read, never mutated.
	pub fn scores(&self, query_vector: &[f32]) -> Result<Vec<f32>> {
		let built = self.built.as_ref().ok_or(Error::NotBuilt)?;

		if let Some(row) = built.matrix.first()
			&& row.len() != query_vector.len()
		{
			return Err(Error::DimensionMismatch {
				expected: row.len(),
				actual: query_vector.len(),
			});
		}

		Ok(built.matrix.iter().map(|row| cosine(query_vector, row)).collect())
	}

	pub fn search_with_vector(&self, query_vector: &[f32], top_k: usize) -> Result<Vec<Candidate>> {
		let scores = self.scores(query_vector)?;
		let built = self.built.as_ref().ok_or(Error::NotBuilt)?;

		Ok(rank::top_candidates(&built.records, &scores, top_k))
	}

	pub async fn search(&self, query: &str, top_k: usize) -> Result<Vec<Candidate>> {
		if self.built.is_none() {
			return Err(Error::NotBuilt);
		}

		let query_vector = self.embed_query(query).await?;

		self.search_with_vector(&query_vector, top_k)
	}

	pub fn records(&self) -> Result<&[Record]> {
		Ok(&self.built.as_ref().ok_or(Error::NotBuilt)?.records)
	}

	pub fn is_built(&self) -> bool {
		self.built.is_some()
	}
}

fn cosine(a: &[f32], b: &[f32]) -> f32 {
	let mut dot = 0.0_f32;
	let mut norm_a = 0.0_f32;
	let mut norm_b = 0.0_f32;

	for (x, y) in a.iter().zip(b.iter()) {
		dot += x * y;
		norm_a += x * x;
		norm_b += y * y;
	}

	if norm_a <= 0.0 || norm_b <= 0.0 {
		return 0.0;
	}

	dot / (norm_a.sqrt() * norm_b.sqrt())
}
