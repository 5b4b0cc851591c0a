use sieve_domain::Candidate;
use sieve_index::{LexicalIndex, VectorIndex, rank};

use crate::{Error, Result};

/// Two score ranges closer than this are treated as constant and normalize
/// to zero instead of dividing by a vanishing span.
pub const NORMALIZE_EPSILON: f32 = 1e-8;

/// Min-max normalizes a score vector into `[0, 1]`. A constant-valued
/// vector maps to the all-zero vector of the same length.
pub fn normalize_scores(scores: &[f32]) -> Vec<f32> {
	if scores.is_empty() {
		return Vec::new();
	}

	let mut min = f32::INFINITY;
	let mut max = f32::NEG_INFINITY;

	for &score in scores {
		min = min.min(score);
		max = max.max(score);
	}

	if (max - min).abs() < NORMALIZE_EPSILON {
		return vec![0.0; scores.len()];
	}

	scores.iter().map(|&score| (score - min) / (max - min)).collect()
}

/// Blends full-corpus lexical and vector signals into one ranking:
/// `fused = alpha * vector + (1 - alpha) * lexical` over independently
/// normalized score vectors. Scoring the whole corpus on both sides keeps
/// the extremes exact: `alpha = 1` reproduces the vector ranking and
/// `alpha = 0` the lexical one. Each query rescans both indices in full,
/// which is the scaling boundary of this design.
pub struct HybridSearcher<'a> {
	lexical: &'a LexicalIndex,
	vector: &'a VectorIndex,
}
impl<'a> HybridSearcher<'a> {
	pub fn new(lexical: &'a LexicalIndex, vector: &'a VectorIndex) -> Self {
		Self { lexical, vector }
	}

	pub async fn search(&self, query: &str, top_k: usize, alpha: f32) -> Result<Vec<Candidate>> {
		self.check_alignment()?;

		let query_vector = self.vector.embed_query(query).await.map_err(Error::Index)?;

		self.search_with_vector(query, &query_vector, top_k, alpha)
	}

	/// Fusion for a query whose embedding was already obtained; no network.
	pub fn search_with_vector(
		&self,
		query: &str,
		query_vector: &[f32],
		top_k: usize,
		alpha: f32,
	) -> Result<Vec<Candidate>> {
		self.check_alignment()?;

		let alpha = alpha.clamp(0.0, 1.0);
		let lexical = normalize_scores(&self.lexical.scores(query)?);
		let vector = normalize_scores(&self.vector.scores(query_vector)?);
		let fused: Vec<f32> = vector
			.iter()
			.zip(lexical.iter())
			.map(|(v, l)| alpha * v + (1.0 - alpha) * l)
			.collect();

		Ok(rank::top_candidates(self.lexical.records()?, &fused, top_k))
	}

	/// Both indices must hold the same record sequence in the same order;
	/// anything else means they were built from different corpora.
	fn check_alignment(&self) -> Result<()> {
		let lexical = self.lexical.records()?;
		let vector = self.vector.records()?;

		if lexical.len() != vector.len() {
			return Err(Error::IndexMismatch {
				message: format!(
					"Lexical index holds {} records, vector index {}.",
					lexical.len(),
					vector.len()
				),
			});
		}

		for (l, v) in lexical.iter().zip(vector.iter()) {
			if l.index != v.index || l.id != v.id {
				return Err(Error::IndexMismatch {
					message: format!(
						"Record at position {} diverges between indices ({} vs {}).",
						l.index, l.id, v.id
					),
				});
			}
		}

		Ok(())
	}
}
